use std::{
    marker::PhantomData,
    panic::Location,
    sync::{
        atomic::{AtomicU64, AtomicUsize, Ordering},
        Arc,
    },
};

use parking_lot::Mutex;

use crate::{
    instruction::{DeletableRawResourceHandle, InstructionStreamPair},
    types::{RawResourceHandle, ResourceHandle},
};

pub(crate) struct HandleAllocator<T>
where
    RawResourceHandle<T>: DeletableRawResourceHandle,
{
    max_allocated: AtomicUsize,
    /// Never reused, so every handle ever given out is distinct.
    next_generation: AtomicU64,
    freelist: Mutex<Vec<usize>>,
    _phantom: PhantomData<T>,
}

impl<T> HandleAllocator<T>
where
    RawResourceHandle<T>: DeletableRawResourceHandle,
{
    pub fn new() -> Self {
        Self {
            max_allocated: AtomicUsize::new(0),
            next_generation: AtomicU64::new(0),
            freelist: Mutex::new(Vec::new()),
            _phantom: PhantomData,
        }
    }

    /// Hands out an owning handle whose last drop queues a delete instruction.
    #[track_caller]
    pub fn allocate(&self, instructions: &Arc<InstructionStreamPair>) -> ResourceHandle<T> {
        let maybe_idx = self.freelist.lock().pop();
        let idx = maybe_idx.unwrap_or_else(|| self.max_allocated.fetch_add(1, Ordering::Relaxed));
        let generation = self.next_generation.fetch_add(1, Ordering::Relaxed);

        let location = *Location::caller();
        let instructions = Arc::clone(instructions);
        let destroy_fn = move |handle: RawResourceHandle<T>| {
            instructions.push(handle.into_delete_instruction_kind(), location)
        };

        ResourceHandle::new(destroy_fn, RawResourceHandle::with_generation(idx, generation))
    }

    /// Returns the index to the freelist. Only call once the resource is gone.
    pub fn deallocate(&self, handle: RawResourceHandle<T>) {
        self.freelist.lock().push(handle.idx);
    }
}
