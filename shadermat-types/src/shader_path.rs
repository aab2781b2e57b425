/// Where a shader material gets its vertex and fragment programs from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ShaderPath {
    /// Base name used for both stages. Looked up in the shader store as
    /// `{base}VertexShader` / `{base}PixelShader`, falling back to the files
    /// `{base}.vertex.fx` / `{base}.fragment.fx`.
    Named(String),
    /// Separate names per stage, each resolved with the same store-then-file rule.
    Split { vertex: String, fragment: String },
    /// Inline shader sources.
    Source { vertex: String, fragment: String },
}

impl ShaderPath {
    pub fn named(base: impl Into<String>) -> Self {
        Self::Named(base.into())
    }
}

impl From<&str> for ShaderPath {
    fn from(base: &str) -> Self {
        Self::Named(base.to_owned())
    }
}

/// Shader stage a location belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// Suffix of the shader store entry for this stage.
    pub fn store_suffix(self) -> &'static str {
        match self {
            Self::Vertex => "VertexShader",
            Self::Fragment => "PixelShader",
        }
    }

    /// Extension of the shader file for this stage.
    pub fn file_extension(self) -> &'static str {
        match self {
            Self::Vertex => ".vertex.fx",
            Self::Fragment => ".fragment.fx",
        }
    }
}

/// A single resolved shader stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShaderLocation {
    /// Source code is already available.
    Inline(String),
    /// Source code has to be fetched from this path by the host.
    File(String),
}

/// Both stages of a shader material, resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedShader {
    pub vertex: ShaderLocation,
    pub fragment: ShaderLocation,
}
