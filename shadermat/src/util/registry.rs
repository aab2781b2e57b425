use std::marker::PhantomData;

use crate::types::RawResourceHandle;

/// Dense storage of resources keyed by the index of their handle.
///
/// Handle indices come from a freelist so the storage stays compact; a slot is
/// only reused after its previous occupant was removed. Each slot remembers the
/// generation it was filled with and lookups with any other generation miss.
#[derive(Debug)]
pub struct ResourceRegistry<T, H> {
    data: Vec<Option<(u64, T)>>,
    count: usize,
    _phantom: PhantomData<H>,
}

impl<T, H> ResourceRegistry<T, H> {
    pub fn new() -> Self {
        Self {
            data: Vec::new(),
            count: 0,
            _phantom: PhantomData,
        }
    }

    /// Inserts a value, returning the previous occupant of the slot if there was one.
    pub fn insert(&mut self, handle: RawResourceHandle<H>, value: T) -> Option<T> {
        if self.data.len() <= handle.idx {
            self.data.resize_with(handle.idx + 1, || None);
        }
        let previous = self.data[handle.idx].replace((handle.generation, value));
        if previous.is_none() {
            self.count += 1;
        }
        previous.map(|(_, value)| value)
    }

    /// Removes the value if `handle` still refers to it.
    pub fn remove(&mut self, handle: RawResourceHandle<H>) -> Option<T> {
        let slot = self.data.get_mut(handle.idx)?;
        if !matches!(*slot, Some((generation, _)) if generation == handle.generation) {
            return None;
        }
        self.count -= 1;
        slot.take().map(|(_, value)| value)
    }

    pub fn get(&self, handle: RawResourceHandle<H>) -> Option<&T> {
        match *self.data.get(handle.idx)? {
            Some((generation, ref value)) if generation == handle.generation => Some(value),
            _ => None,
        }
    }

    pub fn get_mut(&mut self, handle: RawResourceHandle<H>) -> Option<&mut T> {
        match *self.data.get_mut(handle.idx)? {
            Some((generation, ref mut value)) if generation == handle.generation => Some(value),
            _ => None,
        }
    }

    pub fn contains(&self, handle: RawResourceHandle<H>) -> bool {
        self.get(handle).is_some()
    }

    /// Live entries in handle index order.
    pub fn iter(&self) -> impl Iterator<Item = (RawResourceHandle<H>, &T)> {
        self.data
            .iter()
            .enumerate()
            .filter_map(|(idx, slot)| {
                let (generation, ref value) = *slot.as_ref()?;
                Some((RawResourceHandle::with_generation(idx, generation), value))
            })
    }

    pub fn count(&self) -> usize {
        self.count
    }
}

impl<T, H> Default for ResourceRegistry<T, H> {
    fn default() -> Self {
        Self::new()
    }
}
