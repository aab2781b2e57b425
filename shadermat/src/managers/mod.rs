//! Storage for the resources a scene owns.

mod handle_alloc;
mod material;
mod texture;

pub(crate) use handle_alloc::HandleAllocator;
pub use material::MaterialManager;
pub use texture::TextureManager;
