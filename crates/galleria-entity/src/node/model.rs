//! Gallery node entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::MediaCategory;
use super::media::MediaRef;

/// What a gallery node is: a container folder or a media leaf.
///
/// The media reference lives inside the `Leaf` variant, so a folder
/// carrying media (or a leaf without any) cannot be represented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "media", rename_all = "UPPERCASE")]
pub enum NodeKind {
    /// A container node; may have folder or leaf children.
    Folder,
    /// A node carrying a reference to one media asset; has no children.
    Leaf(MediaRef),
}

impl NodeKind {
    /// Check if this is the folder variant.
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder)
    }

    /// Check if this is the leaf variant.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }
}

/// A single element of a project's gallery tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryNode {
    /// Unique node identifier.
    pub id: Uuid,
    /// The project this node belongs to; every query is scoped to one
    /// project.
    pub project_id: Uuid,
    /// Parent node ID (`None` for root nodes).
    pub parent_id: Option<Uuid>,
    /// Display title.
    pub title: String,
    /// Display description.
    pub description: Option<String>,
    /// Sibling ordering key. Only meaningful among nodes sharing the same
    /// parent; ties break by `created_at` ascending.
    pub sort_order: i32,
    /// Folder or leaf, with the media reference on the leaf variant.
    #[serde(flatten)]
    pub kind: NodeKind,
    /// Filter category; meaningful only on leaves.
    pub category: Option<MediaCategory>,
    /// Soft-delete flag. Inactive nodes are excluded from all read
    /// operations.
    pub is_active: bool,
    /// When the node was created.
    pub created_at: DateTime<Utc>,
    /// When the node was last updated.
    pub updated_at: DateTime<Utc>,
}

impl GalleryNode {
    /// Check if this is a root node (no parent).
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// Check if this node is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    /// Check if this node is a media leaf.
    pub fn is_leaf(&self) -> bool {
        self.kind.is_leaf()
    }

    /// Return the media reference, if this node is a leaf.
    pub fn media(&self) -> Option<&MediaRef> {
        match &self.kind {
            NodeKind::Folder => None,
            NodeKind::Leaf(media) => Some(media),
        }
    }
}

/// Data required to create a new gallery node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateNode {
    /// The owning project.
    pub project_id: Uuid,
    /// Parent node (`None` for root-level).
    pub parent_id: Option<Uuid>,
    /// Display title.
    pub title: String,
    /// Display description.
    pub description: Option<String>,
    /// Sibling ordering key.
    pub sort_order: i32,
    /// Folder or leaf (with its media reference).
    pub kind: NodeKind,
    /// Filter category; leaves only.
    pub category: Option<MediaCategory>,
}

/// A partial update to a gallery node.
///
/// `None` fields are left untouched. Parent reassignment is a separate
/// store operation (`move_node`), not a patch field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodePatch {
    /// New display title.
    pub title: Option<String>,
    /// New display description.
    pub description: Option<String>,
    /// New sibling ordering key.
    pub sort_order: Option<i32>,
    /// New filter category; leaves only.
    pub category: Option<MediaCategory>,
    /// Replacement media reference; leaves only.
    pub media: Option<MediaRef>,
    /// Soft-delete or restore.
    pub is_active: Option<bool>,
}

impl NodePatch {
    /// Check whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.sort_order.is_none()
            && self.category.is_none()
            && self.media.is_none()
            && self.is_active.is_none()
    }
}
