use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when shader material options can't be parsed.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("Failed to parse shader material options")]
    Json(#[source] serde_json::Error),
}

/// Compilation options of a shader material.
///
/// The names listed here are what the host declares to the shader: vertex
/// attributes, plain uniforms, uniform buffers, samplers and preprocessor
/// defines. The two `need_*` flags tell the host how the material blends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct ShaderMaterialOptions {
    pub attributes: Vec<String>,
    pub uniforms: Vec<String>,
    pub uniform_buffers: Vec<String>,
    pub samplers: Vec<String>,
    pub defines: Vec<String>,
    pub need_alpha_blending: bool,
    pub need_alpha_testing: bool,
}

impl Default for ShaderMaterialOptions {
    fn default() -> Self {
        Self {
            attributes: vec!["position".into(), "normal".into(), "uv".into()],
            uniforms: vec!["worldViewProjection".into()],
            uniform_buffers: Vec::new(),
            samplers: Vec::new(),
            defines: Vec::new(),
            need_alpha_blending: false,
            need_alpha_testing: false,
        }
    }
}

impl ShaderMaterialOptions {
    /// Parses options from json. Missing keys keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        serde_json::from_str(json).map_err(OptionsError::Json)
    }

    pub fn with_alpha_testing(mut self) -> Self {
        self.need_alpha_testing = true;
        self
    }

    pub fn with_alpha_blending(mut self) -> Self {
        self.need_alpha_blending = true;
        self
    }

    pub fn with_define(mut self, define: impl Into<String>) -> Self {
        self.defines.push(define.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_is_default() {
        let options = ShaderMaterialOptions::from_json("{}").unwrap();
        assert_eq!(options, ShaderMaterialOptions::default());
        assert_eq!(options.attributes, ["position", "normal", "uv"]);
        assert_eq!(options.uniforms, ["worldViewProjection"]);
    }

    #[test]
    fn camel_case_keys() {
        let options = ShaderMaterialOptions::from_json(
            r#"{ "needAlphaTesting": true, "samplers": ["alphaSampler"], "uniformBuffers": ["Scene"] }"#,
        )
        .unwrap();
        assert!(options.need_alpha_testing);
        assert!(!options.need_alpha_blending);
        assert_eq!(options.samplers, ["alphaSampler"]);
        assert_eq!(options.uniform_buffers, ["Scene"]);
        assert_eq!(options.uniforms, ["worldViewProjection"]);
    }

    #[test]
    fn unknown_keys_rejected() {
        let err = ShaderMaterialOptions::from_json(r#"{ "needAlphaTest": true }"#).unwrap_err();
        assert!(matches!(err, OptionsError::Json(_)));
    }
}
