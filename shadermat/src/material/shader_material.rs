use std::hash::{Hash, Hasher};

use glam::{Mat4, Vec2, Vec3, Vec4};
use rustc_hash::FxHasher;

use crate::{
    shader::ShaderStore,
    types::{Material, RawTextureHandle, ResolvedShader, SceneId, ShaderMaterialOptions, ShaderPath},
    util::typedefs::{FastHashMap, SsoString},
    Scene,
};

/// A value bound to a named uniform or sampler of a shader material.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum UniformValue {
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
    Texture(RawTextureHandle),
}

/// Material driven by a user supplied shader.
///
/// Holds the shader path, the compilation options and the values of the
/// uniforms the shader declares. Nothing is compiled here.
#[derive(Debug, Clone)]
pub struct ShaderMaterial {
    name: String,
    scene: SceneId,
    shader_path: ShaderPath,
    options: ShaderMaterialOptions,
    uniforms: FastHashMap<SsoString, UniformValue>,
}

impl ShaderMaterial {
    /// Creates a material for `scene`. The material still has to be added with
    /// [`Scene::add_material`] before the scene knows about it.
    pub fn new(
        name: impl Into<String>,
        scene: &Scene,
        shader_path: impl Into<ShaderPath>,
        options: ShaderMaterialOptions,
    ) -> Self {
        Self {
            name: name.into(),
            scene: scene.id(),
            shader_path: shader_path.into(),
            options,
            uniforms: FastHashMap::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scene_id(&self) -> SceneId {
        self.scene
    }

    pub fn shader_path(&self) -> &ShaderPath {
        &self.shader_path
    }

    pub fn options(&self) -> &ShaderMaterialOptions {
        &self.options
    }

    pub fn uniform(&self, name: &str) -> Option<&UniformValue> {
        self.uniforms.get(name)
    }

    pub fn set_float(&mut self, name: &str, value: f32) -> &mut Self {
        self.set_uniform(name, UniformValue::Float(value))
    }

    pub fn set_vec2(&mut self, name: &str, value: Vec2) -> &mut Self {
        self.set_uniform(name, UniformValue::Vec2(value))
    }

    pub fn set_vec3(&mut self, name: &str, value: Vec3) -> &mut Self {
        self.set_uniform(name, UniformValue::Vec3(value))
    }

    pub fn set_vec4(&mut self, name: &str, value: Vec4) -> &mut Self {
        self.set_uniform(name, UniformValue::Vec4(value))
    }

    pub fn set_mat4(&mut self, name: &str, value: Mat4) -> &mut Self {
        self.set_uniform(name, UniformValue::Mat4(value))
    }

    /// Binds a texture to the named sampler, declaring the sampler if needed.
    pub fn set_texture(&mut self, name: &str, texture: RawTextureHandle) -> &mut Self {
        declare(&mut self.options.samplers, name);
        self.uniforms.insert(name.into(), UniformValue::Texture(texture));
        self
    }

    fn set_uniform(&mut self, name: &str, value: UniformValue) -> &mut Self {
        declare(&mut self.options.uniforms, name);
        self.uniforms.insert(name.into(), value);
        self
    }

    pub fn resolve_shader(&self, store: &ShaderStore) -> ResolvedShader {
        store.resolve(&self.shader_path)
    }
}

fn declare(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_owned());
    }
}

impl Material for ShaderMaterial {
    fn name(&self) -> &str {
        &self.name
    }

    fn scene_id(&self) -> SceneId {
        self.scene
    }

    fn needs_alpha_blending(&self) -> bool {
        self.options.need_alpha_blending
    }

    fn needs_alpha_testing(&self) -> bool {
        self.options.need_alpha_testing
    }

    /// Materials that share a shader path and defines share a key.
    fn key(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.shader_path.hash(&mut hasher);
        self.options.defines.hash(&mut hasher);
        hasher.finish()
    }
}
