use std::{mem, sync::Arc};

use parking_lot::Mutex;
use thiserror::Error;

use crate::{
    depth::{self, DepthArchetype},
    instruction::{InstructionKind, InstructionStreamPair},
    managers::{HandleAllocator, MaterialManager, TextureManager},
    types::{
        Material, MaterialHandle, MaterialTag, RawMaterialHandle, RawTextureHandle, SceneId, Texture, TextureHandle,
        TextureTag, TextureValidationError,
    },
    util::typedefs::FastHashMap,
};

/// Reason a material was refused by a scene.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("Material {name:?} was created for scene {material_scene:?} and can't be added to scene {scene:?}")]
    ForeignMaterial {
        name: String,
        material_scene: SceneId,
        scene: SceneId,
    },
}

/// Owner of all textures and materials.
///
/// Resources are added through `add_*`, which hands back a refcounted owning
/// handle. Dropping the last clone of that handle only queues the deletion;
/// the resource is actually removed, and its index freed for reuse, on the
/// next call to [`Scene::evaluate_instructions`].
///
/// Textures and materials sit behind separate locks and the scene never holds
/// both at once, so a closure passed to a texture accessor may use material
/// accessors and vice versa. The `with_*` accessors hold their registry's
/// lock while the closure runs, so inside a `with_texture` closure nothing
/// may touch textures again, and inside `with_material*` / `with_dyn_material`
/// nothing may touch materials again. [`Scene::depth_archetypes`] and
/// [`Scene::evaluate_instructions`] take both locks one after the other and
/// must not be called from any closure.
pub struct Scene {
    id: SceneId,
    instructions: Arc<InstructionStreamPair>,

    texture_handles: HandleAllocator<TextureTag>,
    material_handles: HandleAllocator<MaterialTag>,

    textures: Mutex<TextureManager>,
    materials: Mutex<MaterialManager>,
}

impl Scene {
    pub fn new() -> Self {
        let id = SceneId::next();
        log::debug!("Creating scene {id:?}");

        Self {
            id,
            instructions: Arc::new(InstructionStreamPair::new()),
            texture_handles: HandleAllocator::new(),
            material_handles: HandleAllocator::new(),
            textures: Mutex::new(TextureManager::new()),
            materials: Mutex::new(MaterialManager::new()),
        }
    }

    pub fn id(&self) -> SceneId {
        self.id
    }

    /// Validates and stores a texture.
    #[track_caller]
    pub fn add_texture(&self, texture: Texture) -> Result<TextureHandle, TextureValidationError> {
        profiling::scope!("Scene::add_texture");

        texture.validate()?;

        let handle = self.texture_handles.allocate(&self.instructions);
        self.textures.lock().fill(handle.get_raw(), texture);
        Ok(handle)
    }

    /// Registers a material with the scene it was created for.
    #[track_caller]
    pub fn add_material<M: Material>(&self, material: M) -> Result<MaterialHandle, SceneError> {
        profiling::scope!("Scene::add_material");

        if material.scene_id() != self.id {
            return Err(SceneError::ForeignMaterial {
                name: material.name().to_owned(),
                material_scene: material.scene_id(),
                scene: self.id,
            });
        }

        let handle = self.material_handles.allocate(&self.instructions);
        self.materials.lock().fill(handle.get_raw(), material);
        Ok(handle)
    }

    pub fn with_texture<R>(&self, handle: RawTextureHandle, func: impl FnOnce(&Texture) -> R) -> Option<R> {
        let textures = self.textures.lock();
        textures.get(handle).map(func)
    }

    pub fn contains_texture(&self, handle: RawTextureHandle) -> bool {
        self.textures.lock().contains(handle)
    }

    /// Runs `func` on the material if it exists and is of type `M`.
    pub fn with_material<M: Material, R>(&self, handle: RawMaterialHandle, func: impl FnOnce(&M) -> R) -> Option<R> {
        let materials = self.materials.lock();
        materials.get::<M>(handle).map(func)
    }

    pub fn with_material_mut<M: Material, R>(
        &self,
        handle: RawMaterialHandle,
        func: impl FnOnce(&mut M) -> R,
    ) -> Option<R> {
        let mut materials = self.materials.lock();
        materials.get_mut::<M>(handle).map(func)
    }

    /// Runs `func` on the material regardless of its concrete type.
    pub fn with_dyn_material<R>(&self, handle: RawMaterialHandle, func: impl FnOnce(&dyn Material) -> R) -> Option<R> {
        let materials = self.materials.lock();
        materials.get_dyn(handle).map(func)
    }

    /// The oldest material registered under `name`.
    pub fn material_by_name(&self, name: &str) -> Option<RawMaterialHandle> {
        self.materials.lock().find_by_name(name)
    }

    pub fn texture_count(&self) -> usize {
        self.textures.lock().count()
    }

    pub fn material_count(&self) -> usize {
        self.materials.lock().count()
    }

    /// How every live material takes part in a depth-only pass, in handle order.
    pub fn depth_archetypes(&self) -> Vec<(RawMaterialHandle, DepthArchetype)> {
        profiling::scope!("Scene::depth_archetypes");

        let texture_alpha: FastHashMap<RawTextureHandle, bool> = {
            let textures = self.textures.lock();
            textures.iter().map(|(handle, texture)| (handle, texture.has_alpha())).collect()
        };

        let materials = self.materials.lock();
        materials
            .iter()
            .map(|(handle, material)| {
                let archetype = depth::classify(material, |tex| texture_alpha.get(&tex).copied());
                (handle, archetype)
            })
            .collect()
    }

    /// Applies all deletions queued by dropped handles. Returns how many
    /// resources were removed.
    pub fn evaluate_instructions(&self) -> usize {
        profiling::scope!("Scene::evaluate_instructions");

        self.instructions.swap();

        let instructions = mem::take(&mut *self.instructions.consumer.lock());
        let mut removed = 0;

        for instruction in instructions {
            match instruction.kind {
                InstructionKind::DeleteTexture { handle } => {
                    log::trace!("Deleting {handle:?} from handle created at {}", instruction.location);
                    if self.textures.lock().remove(handle).is_some() {
                        removed += 1;
                    }
                    self.texture_handles.deallocate(handle);
                }
                InstructionKind::DeleteMaterial { handle } => {
                    log::trace!("Deleting {handle:?} from handle created at {}", instruction.location);
                    if self.materials.lock().remove(handle).is_some() {
                        removed += 1;
                    }
                    self.material_handles.deallocate(handle);
                }
            }
        }

        if removed != 0 {
            log::debug!("Scene {:?} removed {removed} resources", self.id);
        }

        removed
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Scene {
    fn drop(&mut self) {
        log::debug!(
            "Dropping scene {:?} with {} textures and {} materials",
            self.id,
            self.textures.get_mut().count(),
            self.materials.get_mut().count()
        );
    }
}
