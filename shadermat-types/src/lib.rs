//! Type declarations for the shadermat material crate.
//!
//! This is reexported in the shadermat crate proper and includes all the
//! "surface" api arguments.

use std::{
    fmt::Debug,
    hash::Hash,
    marker::PhantomData,
    ops::Deref,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

/// Reexport of the glam version shadermat is using.
pub use glam;
use glam::UVec2;
use thiserror::Error;

mod options;
mod shader_path;

pub use options::*;
pub use shader_path::*;

/// Non-owning resource handle.
///
/// An index into a scene registry plus the generation of the resource that was
/// stored there. Indices are recycled once a resource is deleted; the
/// generation is not, so a handle to a deleted resource never resolves to
/// whatever took its slot.
pub struct RawResourceHandle<T> {
    /// Slot in the registry.
    pub idx: usize,
    /// Allocation counter value of the resource this handle was made for.
    pub generation: u64,
    _phantom: PhantomData<T>,
}

impl<T> RawResourceHandle<T> {
    /// Handle to slot `idx` in generation zero.
    pub const fn new(idx: usize) -> Self {
        Self::with_generation(idx, 0)
    }

    pub const fn with_generation(idx: usize, generation: u64) -> Self {
        Self {
            idx,
            generation,
            _phantom: PhantomData,
        }
    }
}

// Manual impls so T (a tag type) needs no bounds.
impl<T> Debug for RawResourceHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RawResourceHandle")
            .field("idx", &self.idx)
            .field("generation", &self.generation)
            .finish()
    }
}

impl<T> Copy for RawResourceHandle<T> {}

impl<T> Clone for RawResourceHandle<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> PartialEq for RawResourceHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.idx == other.idx && self.generation == other.generation
    }
}

impl<T> Eq for RawResourceHandle<T> {}

impl<T> Hash for RawResourceHandle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.idx.hash(state);
        self.generation.hash(state);
    }
}

/// Refcounted owning handle handed out by `Scene::add_*`.
///
/// Once the last clone is dropped the destroy function runs with the raw
/// handle, which queues the resource for deletion.
pub struct ResourceHandle<T> {
    destroy: Arc<dyn Fn(RawResourceHandle<T>) + Send + Sync>,
    raw: RawResourceHandle<T>,
}

impl<T> Drop for ResourceHandle<T> {
    fn drop(&mut self) {
        if Arc::strong_count(&self.destroy) == 1 {
            (self.destroy)(self.raw);
        }
    }
}

impl<T> Debug for ResourceHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResourceHandle")
            .field("refcount", &Arc::strong_count(&self.destroy))
            .field("raw", &self.raw)
            .finish()
    }
}

impl<T> Clone for ResourceHandle<T> {
    fn clone(&self) -> Self {
        Self {
            destroy: Arc::clone(&self.destroy),
            raw: self.raw,
        }
    }
}

impl<T> PartialEq for ResourceHandle<T> {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<T> Eq for ResourceHandle<T> {}

impl<T> Hash for ResourceHandle<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl<T> ResourceHandle<T> {
    /// Wraps `raw` so that `destroy_fn` runs once every clone is gone.
    pub fn new(destroy_fn: impl Fn(RawResourceHandle<T>) + Send + Sync + 'static, raw: RawResourceHandle<T>) -> Self {
        Self {
            destroy: Arc::new(destroy_fn),
            raw,
        }
    }

    pub fn get_raw(&self) -> RawResourceHandle<T> {
        self.raw
    }
}

impl<T> Deref for ResourceHandle<T> {
    type Target = RawResourceHandle<T>;

    fn deref(&self) -> &Self::Target {
        &self.raw
    }
}

/// Tag type for differentiating Textures on the type level.
#[doc(hidden)]
pub struct TextureTag;
/// Tag type for differentiating Materials on the type level.
#[doc(hidden)]
pub struct MaterialTag;

/// Refcounted handle to a Texture
pub type TextureHandle = ResourceHandle<TextureTag>;
/// Refcounted handle to a Material
pub type MaterialHandle = ResourceHandle<MaterialTag>;

/// Non-owning handle to a Texture
pub type RawTextureHandle = RawResourceHandle<TextureTag>;
/// Non-owning handle to a Material
pub type RawMaterialHandle = RawResourceHandle<MaterialTag>;

// WGPU REEXPORTS
#[doc(inline)]
pub use wgt::TextureFormat;

/// Identity of a scene. Materials remember which scene they were created
/// against and may only be added to that one.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(usize);

impl SceneId {
    /// Returns a scene id that has never been handed out before.
    pub fn next() -> Self {
        static NEXT_SCENE_ID: AtomicUsize = AtomicUsize::new(0);
        Self(NEXT_SCENE_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Error returned from texture validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextureValidationError {
    #[error("Texture {label:?} has a zero sized dimension: {size}")]
    ZeroSize { label: Option<String>, size: UVec2 },
    #[error("Texture {label:?} of size {size} is too large to address")]
    TooLarge { label: Option<String>, size: UVec2 },
    #[error("Texture {label:?} uses unsupported format {format:?}")]
    UnsupportedFormat { label: Option<String>, format: TextureFormat },
    #[error("Texture {label:?} of size {size} needs {expected} bytes of data but was given {actual}")]
    DataSizeMismatch {
        label: Option<String>,
        size: UVec2,
        expected: usize,
        actual: usize,
    },
}

/// A bitmap image used as a data source for a texture.
#[derive(Debug, Clone)]
pub struct Texture {
    pub label: Option<String>,
    pub data: Vec<u8>,
    pub format: TextureFormat,
    pub size: UVec2,
}

impl Texture {
    /// Bytes per pixel of the given format, or None if shadermat can't store it.
    pub fn bytes_per_pixel(format: TextureFormat) -> Option<usize> {
        match format {
            TextureFormat::R8Unorm => Some(1),
            TextureFormat::Rg8Unorm => Some(2),
            TextureFormat::Rgba8Unorm
            | TextureFormat::Rgba8UnormSrgb
            | TextureFormat::Bgra8Unorm
            | TextureFormat::Bgra8UnormSrgb => Some(4),
            _ => None,
        }
    }

    /// Whether the texture carries an alpha channel that can be tested against.
    pub fn has_alpha(&self) -> bool {
        matches!(
            self.format,
            TextureFormat::Rgba8Unorm
                | TextureFormat::Rgba8UnormSrgb
                | TextureFormat::Bgra8Unorm
                | TextureFormat::Bgra8UnormSrgb
        )
    }

    pub fn validate(&self) -> Result<(), TextureValidationError> {
        if self.size.x == 0 || self.size.y == 0 {
            return Err(TextureValidationError::ZeroSize {
                label: self.label.clone(),
                size: self.size,
            });
        }

        let bpp = Self::bytes_per_pixel(self.format).ok_or_else(|| TextureValidationError::UnsupportedFormat {
            label: self.label.clone(),
            format: self.format,
        })?;

        let expected = (self.size.x as usize)
            .checked_mul(self.size.y as usize)
            .and_then(|pixels| pixels.checked_mul(bpp))
            .ok_or_else(|| TextureValidationError::TooLarge {
                label: self.label.clone(),
                size: self.size,
            })?;
        if self.data.len() != expected {
            return Err(TextureValidationError::DataSizeMismatch {
                label: self.label.clone(),
                size: self.size,
                expected,
                actual: self.data.len(),
            });
        }

        Ok(())
    }
}

/// Description of how objects using a material should be sorted.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Sorting {
    pub reason: SortingReason,
    pub order: SortingOrder,
}

impl Sorting {
    /// Default sorting for opaque and cutout objects
    pub const OPAQUE: Self = Self {
        reason: SortingReason::Optimization,
        order: SortingOrder::FrontToBack,
    };

    /// Default sorting for any objects using blending
    pub const BLENDING: Self = Self {
        reason: SortingReason::Requirement,
        order: SortingOrder::BackToFront,
    };
}

/// Reason why object need sorting
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortingReason {
    /// Objects should be sorted for optimization purposes.
    Optimization,
    /// If objects aren't sorted, things will render incorrectly.
    Requirement,
}

/// An object sorting order.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SortingOrder {
    /// Sort with the nearest objects first.
    FrontToBack,
    /// Sort with the furthest objects first.
    BackToFront,
}

/// Interface that all materials stored in a scene must provide.
///
/// The scene never inspects a material beyond this trait. In particular the
/// alpha-test texture is only ever read through [`Material::alpha_test_texture`],
/// which returns `None` unless a material type overrides it.
pub trait Material: Send + Sync + 'static {
    /// Name the material was created with. Not required to be unique.
    fn name(&self) -> &str;

    /// Scene this material was created against.
    fn scene_id(&self) -> SceneId;

    fn needs_alpha_blending(&self) -> bool;

    fn needs_alpha_testing(&self) -> bool;

    /// Texture whose alpha is used to discard fragments, if any.
    fn alpha_test_texture(&self) -> Option<RawTextureHandle> {
        None
    }

    /// How objects with this material should be sorted.
    fn sorting(&self) -> Sorting {
        if self.needs_alpha_blending() {
            Sorting::BLENDING
        } else {
            Sorting::OPAQUE
        }
    }

    /// u64 key that allows different materials to be somehow categorized.
    fn key(&self) -> u64;
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicBool;

    use super::*;

    fn rgba(size: UVec2) -> Texture {
        Texture {
            label: Some("test".into()),
            data: vec![255; (size.x * size.y * 4) as usize],
            format: TextureFormat::Rgba8Unorm,
            size,
        }
    }

    #[test]
    fn owning_handle_destroys_once_on_last_drop() {
        let destroyed = Arc::new(AtomicUsize::new(usize::MAX));
        let destroyed2 = Arc::clone(&destroyed);
        let handle = TextureHandle::new(
            move |raw| destroyed2.store(raw.idx, Ordering::SeqCst),
            RawTextureHandle::new(7),
        );
        let clone = handle.clone();

        drop(handle);
        assert_eq!(destroyed.load(Ordering::SeqCst), usize::MAX);
        assert_eq!(clone.get_raw(), RawTextureHandle::new(7));
        drop(clone);
        assert_eq!(destroyed.load(Ordering::SeqCst), 7);
    }

    #[test]
    fn raw_handle_does_not_keep_alive() {
        let destroyed = Arc::new(AtomicBool::new(false));
        let destroyed2 = Arc::clone(&destroyed);
        let handle = MaterialHandle::new(
            move |_| destroyed2.store(true, Ordering::SeqCst),
            RawMaterialHandle::new(0),
        );
        let raw = *handle;
        drop(handle);
        assert!(destroyed.load(Ordering::SeqCst));
        assert_eq!(raw.idx, 0);
    }

    #[test]
    fn generation_is_part_of_identity() {
        let old = RawTextureHandle::with_generation(3, 1);
        let new = RawTextureHandle::with_generation(3, 2);
        assert_ne!(old, new);
        assert_eq!(old, RawTextureHandle::with_generation(3, 1));
    }

    #[test]
    fn huge_texture_is_rejected_without_overflow() {
        let texture = Texture {
            label: None,
            data: Vec::new(),
            format: TextureFormat::Rgba8Unorm,
            size: UVec2::new(u32::MAX, u32::MAX),
        };
        assert_eq!(
            texture.validate(),
            Err(TextureValidationError::TooLarge {
                label: None,
                size: UVec2::new(u32::MAX, u32::MAX),
            })
        );
    }

    #[test]
    fn scene_ids_are_unique() {
        assert_ne!(SceneId::next(), SceneId::next());
    }

    #[test]
    fn texture_validation() {
        assert_eq!(rgba(UVec2::new(2, 3)).validate(), Ok(()));
        assert!(rgba(UVec2::new(2, 3)).has_alpha());

        let mut short = rgba(UVec2::new(2, 2));
        short.data.pop();
        assert_eq!(
            short.validate(),
            Err(TextureValidationError::DataSizeMismatch {
                label: Some("test".into()),
                size: UVec2::new(2, 2),
                expected: 16,
                actual: 15,
            })
        );

        let empty = rgba(UVec2::new(0, 4));
        assert!(matches!(empty.validate(), Err(TextureValidationError::ZeroSize { .. })));

        let mut depth = rgba(UVec2::ONE);
        depth.format = TextureFormat::Depth32Float;
        assert!(matches!(
            depth.validate(),
            Err(TextureValidationError::UnsupportedFormat { .. })
        ));

        let mut red = rgba(UVec2::ONE);
        red.format = TextureFormat::R8Unorm;
        red.data = vec![0];
        assert_eq!(red.validate(), Ok(()));
        assert!(!red.has_alpha());
    }
}
