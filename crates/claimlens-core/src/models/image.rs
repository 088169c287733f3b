use serde::{Deserialize, Serialize};

/// Evidence file downloaded from the stage for the current render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageAsset {
    pub file_name: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

impl ImageAsset {
    /// MIME type guessed from the file extension.
    pub fn content_type(&self) -> &'static str {
        content_type_for(&self.file_name)
    }
}

pub fn content_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tif" | "tiff" => "image/tiff",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}
