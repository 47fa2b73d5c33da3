//! Media reference types carried by leaf nodes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use galleria_core::AppError;

/// Reference to one stored media asset.
///
/// The upload/storage pipeline owns the bytes; the gallery engine only
/// keeps this descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaRef {
    /// Public URL of the asset.
    pub url: String,
    /// Stored file name (including extension).
    pub file_name: String,
    /// File name as uploaded by the user, when it differs from the stored
    /// name.
    pub original_name: Option<String>,
    /// MIME type of the asset.
    pub mime_type: String,
    /// Asset size in bytes.
    pub size_bytes: i64,
    /// Coarse media classification used for filtering.
    pub media_type: MediaType,
    /// Optional thumbnail URL.
    pub thumbnail_url: Option<String>,
}

/// Coarse media classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "media_type", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum MediaType {
    /// A raster or vector image.
    Image,
    /// A video file.
    Video,
    /// A PDF document.
    Pdf,
    /// A Word document.
    Word,
    /// Embedded external content (e.g. a video platform link).
    Embed,
}

impl MediaType {
    /// All known media types, in facet emission order.
    pub const ALL: [MediaType; 5] = [
        MediaType::Image,
        MediaType::Video,
        MediaType::Pdf,
        MediaType::Word,
        MediaType::Embed,
    ];

    /// Classify a media type from a MIME type.
    ///
    /// Anything that is not an image, video, PDF, or Word document is
    /// treated as embedded content.
    pub fn from_mime(mime_type: &str) -> Self {
        let mime = mime_type.trim().to_ascii_lowercase();
        if mime.starts_with("image/") {
            Self::Image
        } else if mime.starts_with("video/") {
            Self::Video
        } else if mime == "application/pdf" {
            Self::Pdf
        } else if mime == "application/msword"
            || mime == "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        {
            Self::Word
        } else {
            Self::Embed
        }
    }

    /// Return the media type as its uppercase wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Image => "IMAGE",
            Self::Video => "VIDEO",
            Self::Pdf => "PDF",
            Self::Word => "WORD",
            Self::Embed => "EMBED",
        }
    }

    /// Return the human-readable label used by filter UIs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Image => "Image",
            Self::Video => "Video",
            Self::Pdf => "PDF",
            Self::Word => "Word",
            Self::Embed => "Embed",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "IMAGE" => Ok(Self::Image),
            "VIDEO" => Ok(Self::Video),
            "PDF" => Ok(Self::Pdf),
            "WORD" => Ok(Self::Word),
            "EMBED" => Ok(Self::Embed),
            _ => Err(AppError::validation(format!(
                "Invalid media type: '{s}'. Expected one of: IMAGE, VIDEO, PDF, WORD, EMBED"
            ))),
        }
    }
}

/// Descriptor handed over by the upload/storage pipeline when a leaf is
/// created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadedMedia {
    /// Stored file name.
    pub file_name: String,
    /// File name as uploaded by the user.
    pub original_name: Option<String>,
    /// Asset size in bytes.
    pub size_bytes: i64,
    /// MIME type reported by the pipeline.
    pub mime_type: String,
    /// Public URL of the asset.
    pub file_url: String,
    /// Optional thumbnail URL.
    pub thumbnail_url: Option<String>,
}

impl UploadedMedia {
    /// Build a media reference, classifying the media type from the MIME
    /// type.
    pub fn into_media_ref(self) -> MediaRef {
        let media_type = MediaType::from_mime(&self.mime_type);
        MediaRef {
            url: self.file_url,
            file_name: self.file_name,
            original_name: self.original_name,
            mime_type: self.mime_type,
            size_bytes: self.size_bytes,
            media_type,
            thumbnail_url: self.thumbnail_url,
        }
    }
}
