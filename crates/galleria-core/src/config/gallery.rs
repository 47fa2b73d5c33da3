//! Gallery engine configuration.

use serde::{Deserialize, Serialize};

/// Tunables for the gallery tree engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GalleryConfig {
    /// Maximum number of ancestors followed when walking parent references
    /// (breadcrumbs, cycle checks). Exceeding the bound is reported as an
    /// integrity error rather than looping on corrupted data.
    #[serde(default = "default_max_ancestry_depth")]
    pub max_ancestry_depth: u32,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        Self {
            max_ancestry_depth: default_max_ancestry_depth(),
        }
    }
}

fn default_max_ancestry_depth() -> u32 {
    64
}
