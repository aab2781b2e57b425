//! The material types shadermat ships with.

mod alpha_test;
mod shader_material;

pub use alpha_test::AlphaTestTextureMaterial;
pub use shader_material::{ShaderMaterial, UniformValue};
