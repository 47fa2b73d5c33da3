//! Facet counts for filter UIs.

use serde::{Deserialize, Serialize};

/// One selectable facet value with its match count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOption {
    /// Machine-readable facet value (e.g. `DIS_MEKAN`, `IMAGE`, `7d`).
    pub value: String,
    /// Human-readable label (e.g. `Outdoor`, `Image`, `Last 7 days`).
    pub label: String,
    /// Number of matching leaves. Zero-count options are never emitted.
    pub count: u64,
}

impl FacetOption {
    /// Create a new facet option.
    pub fn new(value: impl Into<String>, label: impl Into<String>, count: u64) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            count,
        }
    }
}

/// Facet counts across one project's media leaves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FacetSummary {
    /// Per-category counts.
    pub categories: Vec<FacetOption>,
    /// Per-media-type counts.
    pub media_types: Vec<FacetOption>,
    /// Per-date-window counts. Windows overlap: an item counts toward
    /// every window containing its creation time.
    pub date_ranges: Vec<FacetOption>,
}

impl FacetSummary {
    /// Create an empty summary (project with no leaves).
    pub fn empty() -> Self {
        Self {
            categories: Vec::new(),
            media_types: Vec::new(),
            date_ranges: Vec::new(),
        }
    }
}
