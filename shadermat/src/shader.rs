//! Named shader sources and resolution of [`ShaderPath`]s against them.

use crate::{
    format_sso,
    types::{ResolvedShader, ShaderLocation, ShaderPath, ShaderStage},
    util::typedefs::FastHashMap,
};

/// Registry of shader sources addressable by name.
///
/// Entries are keyed the way shader paths look them up, so a vertex stage
/// named `"leaf"` is stored as `"leafVertexShader"`.
#[derive(Debug, Default)]
pub struct ShaderStore {
    files: FastHashMap<String, String>,
}

impl ShaderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_shader(&mut self, name: &str, contents: &str) {
        log::trace!("Registering shader {name}");
        self.files.insert(name.to_owned(), contents.to_owned());
    }

    /// Registers both stages of a shader under the given base name.
    pub fn add_shader_pair(&mut self, base: &str, vertex: &str, fragment: &str) {
        self.add_shader(&format_sso!("{base}{}", ShaderStage::Vertex.store_suffix()), vertex);
        self.add_shader(&format_sso!("{base}{}", ShaderStage::Fragment.store_suffix()), fragment);
    }

    pub fn get(&self, name: &str) -> Option<&String> {
        self.files.get(name)
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut v: Vec<_> = self.files.keys().map(String::as_str).collect();
        v.sort_unstable();
        v
    }

    pub fn resolve(&self, path: &ShaderPath) -> ResolvedShader {
        match *path {
            ShaderPath::Named(ref base) => ResolvedShader {
                vertex: self.resolve_stage(base, ShaderStage::Vertex),
                fragment: self.resolve_stage(base, ShaderStage::Fragment),
            },
            ShaderPath::Split {
                ref vertex,
                ref fragment,
            } => ResolvedShader {
                vertex: self.resolve_stage(vertex, ShaderStage::Vertex),
                fragment: self.resolve_stage(fragment, ShaderStage::Fragment),
            },
            ShaderPath::Source {
                ref vertex,
                ref fragment,
            } => ResolvedShader {
                vertex: ShaderLocation::Inline(vertex.clone()),
                fragment: ShaderLocation::Inline(fragment.clone()),
            },
        }
    }

    fn resolve_stage(&self, name: &str, stage: ShaderStage) -> ShaderLocation {
        let key = format_sso!("{name}{}", stage.store_suffix());
        match self.files.get(key.as_str()) {
            Some(source) => ShaderLocation::Inline(source.clone()),
            None => {
                log::trace!("Shader {key} not in store, falling back to file");
                ShaderLocation::File(format!("{name}{}", stage.file_extension()))
            }
        }
    }
}
