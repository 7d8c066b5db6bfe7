use crate::domain::model::ImageUpload;
use base64::Engine;

/// Standard base64 of the raw image bytes. Pure and deterministic; no
/// resizing or recompression happens here.
pub fn encode_image(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

/// Transport reference for the vision API: `data:<mime>;base64,<payload>`.
pub fn data_uri(image: &ImageUpload) -> String {
    format!(
        "data:{};base64,{}",
        image.media_type.mime(),
        encode_image(&image.bytes)
    )
}
