use std::any::Any;

use crate::{
    types::{Material, MaterialTag, RawMaterialHandle},
    util::registry::ResourceRegistry,
};

/// Type erased view of a material that can be downcast back to its concrete type.
pub trait ErasedMaterial: Material {
    fn as_material(&self) -> &dyn Material;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<M: Material> ErasedMaterial for M {
    fn as_material(&self) -> &dyn Material {
        self
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Internal representation of a material.
pub struct InternalMaterial {
    pub material: Box<dyn ErasedMaterial>,
    /// Order in which materials were registered. Lower is older.
    pub sequence: u64,
}

/// Holds every material registered with a scene, regardless of type.
pub struct MaterialManager {
    registry: ResourceRegistry<InternalMaterial, MaterialTag>,
    next_sequence: u64,
}

impl MaterialManager {
    pub fn new() -> Self {
        Self {
            registry: ResourceRegistry::new(),
            next_sequence: 0,
        }
    }

    pub fn fill<M: Material>(&mut self, handle: RawMaterialHandle, material: M) {
        profiling::scope!("MaterialManager::fill");

        log::debug!(
            "Adding material {:?} ({}) at {:?}",
            material.name(),
            std::any::type_name::<M>(),
            handle
        );

        let sequence = self.next_sequence;
        self.next_sequence += 1;

        self.registry.insert(
            handle,
            InternalMaterial {
                material: Box::new(material),
                sequence,
            },
        );
    }

    pub fn remove(&mut self, handle: RawMaterialHandle) -> Option<InternalMaterial> {
        let removed = self.registry.remove(handle);
        if let Some(ref internal) = removed {
            log::debug!("Removed material {:?} at {:?}", internal.material.name(), handle);
        }
        removed
    }

    pub fn get_dyn(&self, handle: RawMaterialHandle) -> Option<&dyn Material> {
        Some(self.registry.get(handle)?.material.as_material())
    }

    pub fn get<M: Material>(&self, handle: RawMaterialHandle) -> Option<&M> {
        self.registry.get(handle)?.material.as_any().downcast_ref::<M>()
    }

    pub fn get_mut<M: Material>(&mut self, handle: RawMaterialHandle) -> Option<&mut M> {
        self.registry.get_mut(handle)?.material.as_any_mut().downcast_mut::<M>()
    }

    /// Oldest registered material with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<RawMaterialHandle> {
        self.registry
            .iter()
            .filter(|(_, internal)| internal.material.name() == name)
            .min_by_key(|(_, internal)| internal.sequence)
            .map(|(handle, _)| handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RawMaterialHandle, &dyn Material)> {
        self.registry
            .iter()
            .map(|(handle, internal)| (handle, internal.material.as_material()))
    }

    pub fn count(&self) -> usize {
        self.registry.count()
    }
}

impl Default for MaterialManager {
    fn default() -> Self {
        Self::new()
    }
}
