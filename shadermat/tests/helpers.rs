use shadermat::types::{glam::UVec2, Texture, TextureFormat};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Fully opaque rgba texture of the given size.
pub fn rgba_texture(label: &str, width: u32, height: u32) -> Texture {
    Texture {
        label: Some(label.to_owned()),
        data: vec![255; (width * height * 4) as usize],
        format: TextureFormat::Rgba8Unorm,
        size: UVec2::new(width, height),
    }
}
