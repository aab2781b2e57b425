//! Shader materials on top of a handle based scene.
//!
//! The centrepiece is [`AlphaTestTextureMaterial`]: a [`ShaderMaterial`] that
//! additionally remembers which texture is used to alpha test it. The
//! [`Scene`] owns textures and materials behind refcounted handles and can
//! report how each material takes part in a depth-only pass.
//!
//! ```
//! use shadermat::{types::ShaderMaterialOptions, AlphaTestTextureMaterial, Scene};
//!
//! let scene = Scene::new();
//! let material = AlphaTestTextureMaterial::new(
//!     "leaves",
//!     &scene,
//!     "leaves",
//!     ShaderMaterialOptions::default().with_alpha_testing(),
//!     None,
//! );
//! assert_eq!(material.alpha_test_texture(), None);
//! let _handle = scene.add_material(material).unwrap();
//! ```

pub mod depth;
mod instruction;
mod managers;
mod material;
mod scene;
pub mod shader;
pub mod util;

pub use material::{AlphaTestTextureMaterial, ShaderMaterial, UniformValue};
pub use scene::{Scene, SceneError};
/// Reexport of the shadermat-types crate.
pub use shadermat_types as types;
