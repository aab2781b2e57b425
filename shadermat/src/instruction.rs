use std::{mem, panic::Location};

use parking_lot::Mutex;

use crate::types::{MaterialTag, RawMaterialHandle, RawResourceHandle, RawTextureHandle, TextureTag};

pub enum InstructionKind {
    DeleteTexture { handle: RawTextureHandle },
    DeleteMaterial { handle: RawMaterialHandle },
}

pub struct Instruction {
    pub kind: InstructionKind,
    pub location: Location<'static>,
}

/// Raw handles that know which instruction deletes their resource.
pub trait DeletableRawResourceHandle {
    fn into_delete_instruction_kind(self) -> InstructionKind;
}

impl DeletableRawResourceHandle for RawResourceHandle<TextureTag> {
    fn into_delete_instruction_kind(self) -> InstructionKind {
        InstructionKind::DeleteTexture { handle: self }
    }
}

impl DeletableRawResourceHandle for RawResourceHandle<MaterialTag> {
    fn into_delete_instruction_kind(self) -> InstructionKind {
        InstructionKind::DeleteMaterial { handle: self }
    }
}

/// Instructions are pushed to the producer from any thread (usually from a
/// handle's drop) and drained from the consumer when the scene evaluates them.
pub struct InstructionStreamPair {
    pub producer: Mutex<Vec<Instruction>>,
    pub consumer: Mutex<Vec<Instruction>>,
}
impl InstructionStreamPair {
    pub fn new() -> Self {
        Self {
            producer: Mutex::new(Vec::new()),
            consumer: Mutex::new(Vec::new()),
        }
    }

    pub fn push(&self, kind: InstructionKind, location: Location<'static>) {
        self.producer.lock().push(Instruction { kind, location })
    }

    pub fn swap(&self) {
        let mut produce = self.producer.lock();
        let mut consume = self.consumer.lock();

        mem::swap(&mut *produce, &mut *consume);
    }
}
