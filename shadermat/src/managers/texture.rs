use crate::{
    types::{RawTextureHandle, Texture, TextureTag},
    util::registry::ResourceRegistry,
};

/// Holds the pixel data of every texture in a scene.
pub struct TextureManager {
    registry: ResourceRegistry<Texture, TextureTag>,
}

impl TextureManager {
    pub fn new() -> Self {
        Self {
            registry: ResourceRegistry::new(),
        }
    }

    pub fn fill(&mut self, handle: RawTextureHandle, texture: Texture) {
        profiling::scope!("TextureManager::fill");

        log::debug!(
            "Adding texture {:?} ({:?}, {}x{}) at {:?}",
            texture.label,
            texture.format,
            texture.size.x,
            texture.size.y,
            handle
        );
        self.registry.insert(handle, texture);
    }

    pub fn remove(&mut self, handle: RawTextureHandle) -> Option<Texture> {
        let removed = self.registry.remove(handle);
        if let Some(ref texture) = removed {
            log::debug!("Removed texture {:?} at {:?}", texture.label, handle);
        }
        removed
    }

    pub fn get(&self, handle: RawTextureHandle) -> Option<&Texture> {
        self.registry.get(handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RawTextureHandle, &Texture)> {
        self.registry.iter()
    }

    pub fn contains(&self, handle: RawTextureHandle) -> bool {
        self.registry.contains(handle)
    }

    pub fn count(&self) -> usize {
        self.registry.count()
    }
}

impl Default for TextureManager {
    fn default() -> Self {
        Self::new()
    }
}
