//! Material agnostic depth classification. Shadows or a prepass.
//!
//! Decides per material whether it can be drawn into a depth-only pass as a
//! plain opaque surface, needs its alpha-test texture read to cut out
//! fragments, or has to stay out of the pass entirely. Only the [`Material`]
//! trait is consulted; where the texture ends up being bound is up to the host.

use crate::types::{Material, RawTextureHandle, SortingReason};

/// How a material takes part in a depth-only pass.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DepthArchetype {
    /// Every fragment writes depth.
    Opaque,
    /// Fragments are discarded based on the alpha of `texture`.
    Cutout { texture: RawTextureHandle },
    /// Needs back-to-front blending, so it doesn't write depth.
    Skipped,
}

/// Classifies a material. `texture_alpha` returns `None` when a handle no
/// longer refers to a texture in the scene, otherwise whether that texture has
/// an alpha channel.
pub fn classify(material: &dyn Material, texture_alpha: impl Fn(RawTextureHandle) -> Option<bool>) -> DepthArchetype {
    if material.sorting().reason == SortingReason::Requirement {
        return DepthArchetype::Skipped;
    }

    if !material.needs_alpha_testing() {
        return DepthArchetype::Opaque;
    }

    let Some(texture) = material.alpha_test_texture() else {
        log::warn!(
            "Material {:?} wants alpha testing but has no alpha-test texture, treating as opaque",
            material.name()
        );
        return DepthArchetype::Opaque;
    };

    match texture_alpha(texture) {
        Some(true) => DepthArchetype::Cutout { texture },
        Some(false) => {
            log::warn!(
                "Material {:?} wants alpha testing but its alpha-test texture {:?} has no alpha channel, treating as opaque",
                material.name(),
                texture
            );
            DepthArchetype::Opaque
        }
        None => {
            log::warn!(
                "Material {:?} wants alpha testing but its alpha-test texture {:?} is gone, treating as opaque",
                material.name(),
                texture
            );
            DepthArchetype::Opaque
        }
    }
}
