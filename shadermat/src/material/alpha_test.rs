use std::ops::{Deref, DerefMut};

use crate::{
    types::{Material, RawTextureHandle, SceneId, ShaderMaterialOptions, ShaderPath},
    Scene, ShaderMaterial,
};

/// A [`ShaderMaterial`] that also carries the texture used for alpha testing.
///
/// The texture is referenced, not owned: the scene keeps it alive for as long
/// as someone holds its [`TextureHandle`](crate::types::TextureHandle). It is
/// fixed at construction; there is no way to change it afterwards.
#[derive(Debug, Clone)]
pub struct AlphaTestTextureMaterial {
    base: ShaderMaterial,
    alpha_test_texture: Option<RawTextureHandle>,
}

impl AlphaTestTextureMaterial {
    /// Everything but `alpha_test_texture` is handed to [`ShaderMaterial::new`]
    /// as is. The texture is not checked against the scene.
    pub fn new(
        name: impl Into<String>,
        scene: &Scene,
        shader_path: impl Into<ShaderPath>,
        options: ShaderMaterialOptions,
        alpha_test_texture: Option<RawTextureHandle>,
    ) -> Self {
        Self {
            base: ShaderMaterial::new(name, scene, shader_path, options),
            alpha_test_texture,
        }
    }

    pub fn alpha_test_texture(&self) -> Option<RawTextureHandle> {
        self.alpha_test_texture
    }

    pub fn base(&self) -> &ShaderMaterial {
        &self.base
    }

    pub fn into_parts(self) -> (ShaderMaterial, Option<RawTextureHandle>) {
        (self.base, self.alpha_test_texture)
    }
}

impl Deref for AlphaTestTextureMaterial {
    type Target = ShaderMaterial;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

impl DerefMut for AlphaTestTextureMaterial {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.base
    }
}

impl Material for AlphaTestTextureMaterial {
    fn name(&self) -> &str {
        self.base.name()
    }

    fn scene_id(&self) -> SceneId {
        self.base.scene_id()
    }

    fn needs_alpha_blending(&self) -> bool {
        self.base.needs_alpha_blending()
    }

    fn needs_alpha_testing(&self) -> bool {
        self.base.needs_alpha_testing()
    }

    fn alpha_test_texture(&self) -> Option<RawTextureHandle> {
        self.alpha_test_texture
    }

    fn sorting(&self) -> crate::types::Sorting {
        self.base.sorting()
    }

    fn key(&self) -> u64 {
        self.base.key()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_the_texture_it_was_built_with() {
        let scene = Scene::new();
        let tex42 = RawTextureHandle::new(42);
        let material = AlphaTestTextureMaterial::new(
            "mat1",
            &scene,
            "mat1",
            ShaderMaterialOptions::default(),
            Some(tex42),
        );

        assert_eq!(material.alpha_test_texture(), Some(tex42));
        assert_eq!(material.alpha_test_texture(), Some(tex42));
        assert_eq!(Material::alpha_test_texture(&material), Some(tex42));
        assert_eq!(material.name(), "mat1");
    }

    #[test]
    fn none_round_trips() {
        let scene = Scene::new();
        let material =
            AlphaTestTextureMaterial::new("mat1", &scene, "mat1", ShaderMaterialOptions::default(), None);
        assert_eq!(material.alpha_test_texture(), None);
        assert_eq!(Material::alpha_test_texture(&material), None);
    }

    #[test]
    fn base_mutation_leaves_texture_alone() {
        let scene = Scene::new();
        let tex = RawTextureHandle::new(1);
        let mut material = AlphaTestTextureMaterial::new(
            "leaves",
            &scene,
            "leaves",
            ShaderMaterialOptions::default().with_alpha_testing(),
            Some(tex),
        );

        material.set_texture("alphaSampler", RawTextureHandle::new(9));

        assert_eq!(material.alpha_test_texture(), Some(tex));
        assert!(Material::needs_alpha_testing(&material));

        let (base, texture) = material.into_parts();
        assert_eq!(texture, Some(tex));
        assert_eq!(base.options().samplers, ["alphaSampler"]);
        assert_eq!(Material::alpha_test_texture(&base), None);
    }

    #[test]
    fn forwards_to_base() {
        let scene = Scene::new();
        let options = ShaderMaterialOptions::default().with_define("CUTOUT");
        let material = AlphaTestTextureMaterial::new("bush", &scene, "bush", options.clone(), None);
        let plain = ShaderMaterial::new("bush", &scene, "bush", options.clone());

        assert_eq!(Material::scene_id(&material), scene.id());
        assert_eq!(material.key(), plain.key());
        assert_eq!(material.options(), &options);
        assert_eq!(material.shader_path(), &ShaderPath::named("bush"));
        assert_eq!(material.sorting(), plain.sorting());
    }
}
