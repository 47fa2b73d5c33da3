//! Nested tree entries for hierarchical gallery display.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A node in the rendered gallery tree.
///
/// Produced by the tree builder from the flat node set of one project;
/// folders and leaves both appear as entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Node ID.
    pub id: Uuid,
    /// Display title.
    pub title: String,
    /// Display description.
    pub description: Option<String>,
    /// Sibling ordering key.
    pub sort_order: i32,
    /// Whether the node has at least one direct leaf child.
    pub has_media: bool,
    /// Number of leaf descendants at any depth (1 for a leaf entry
    /// itself).
    pub media_count: u64,
    /// Child entries, ordered by `(sort_order, created_at)`.
    pub sub_galleries: Vec<TreeEntry>,
}
