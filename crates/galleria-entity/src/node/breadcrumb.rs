//! Breadcrumb trail entries for navigation display.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One step of a root-to-node breadcrumb trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreadcrumbEntry {
    /// Node ID.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// Depth of this step; the root is level 0.
    pub level: u32,
}
