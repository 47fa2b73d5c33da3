//! Leaf filter categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use galleria_core::AppError;

/// Filter category assigned to media leaves.
///
/// The wire values are the legacy constants the surrounding backend and
/// its clients already exchange (`DIS_MEKAN` = outdoor, `IC_MEKAN` =
/// indoor).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "media_category")]
pub enum MediaCategory {
    /// Outdoor shots.
    #[serde(rename = "DIS_MEKAN")]
    #[sqlx(rename = "DIS_MEKAN")]
    Outdoor,
    /// Indoor shots.
    #[serde(rename = "IC_MEKAN")]
    #[sqlx(rename = "IC_MEKAN")]
    Indoor,
    /// Video content.
    #[serde(rename = "VIDEO")]
    #[sqlx(rename = "VIDEO")]
    Video,
}

impl MediaCategory {
    /// All known categories, in facet emission order.
    pub const ALL: [MediaCategory; 3] = [
        MediaCategory::Outdoor,
        MediaCategory::Indoor,
        MediaCategory::Video,
    ];

    /// Return the category as its wire value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Outdoor => "DIS_MEKAN",
            Self::Indoor => "IC_MEKAN",
            Self::Video => "VIDEO",
        }
    }

    /// Return the human-readable label used by filter UIs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Outdoor => "Outdoor",
            Self::Indoor => "Indoor",
            Self::Video => "Video",
        }
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for MediaCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DIS_MEKAN" => Ok(Self::Outdoor),
            "IC_MEKAN" => Ok(Self::Indoor),
            "VIDEO" => Ok(Self::Video),
            _ => Err(AppError::validation(format!(
                "Invalid media category: '{s}'. Expected one of: DIS_MEKAN, IC_MEKAN, VIDEO"
            ))),
        }
    }
}
