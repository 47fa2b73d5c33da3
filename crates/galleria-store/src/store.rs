//! The node store contract.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use galleria_core::error::AppError;
use galleria_core::result::AppResult;
use galleria_entity::node::{CreateNode, GalleryNode, NodeKind, NodePatch};

/// Durable storage of gallery nodes.
///
/// The engine treats the store as an external collaborator: every read
/// operation loads the node set it needs through this trait and computes
/// its result from that snapshot. Each mutation is a single store
/// operation; the store provides no cross-node atomicity.
///
/// Implementations must refuse to delete a node that still has active
/// children, and must reject media or category patches against a folder.
/// Cycle prevention on `move_node` is the caller's responsibility.
#[async_trait]
pub trait NodeStore: Send + Sync + std::fmt::Debug + 'static {
    /// List all active nodes of one project.
    async fn list_active_nodes(&self, project_id: Uuid) -> AppResult<Vec<GalleryNode>>;

    /// Find a node by ID, active or not.
    async fn get_node(&self, node_id: Uuid) -> AppResult<Option<GalleryNode>>;

    /// Create a new node and return it.
    async fn create_node(&self, data: &CreateNode) -> AppResult<GalleryNode>;

    /// Apply a partial update and return the updated node.
    async fn update_node(&self, node_id: Uuid, patch: &NodePatch) -> AppResult<GalleryNode>;

    /// Reassign a node's parent (`None` moves it to the root level).
    async fn move_node(
        &self,
        node_id: Uuid,
        new_parent_id: Option<Uuid>,
    ) -> AppResult<GalleryNode>;

    /// Hard-delete a node. Returns `true` if a node was deleted, `false`
    /// if no such node exists; refuses with a conflict while active
    /// children remain.
    async fn delete_node(&self, node_id: Uuid) -> AppResult<bool>;
}

/// Apply a patch to a node in place.
///
/// Shared by both store implementations so the patch semantics cannot
/// drift apart. Media and category fields are leaf-only.
pub(crate) fn apply_patch(node: &mut GalleryNode, patch: &NodePatch) -> AppResult<()> {
    if node.is_folder() && (patch.media.is_some() || patch.category.is_some()) {
        return Err(AppError::conflict(
            "cannot assign media fields to a folder",
        ));
    }

    if let Some(title) = &patch.title {
        node.title = title.clone();
    }
    if let Some(description) = &patch.description {
        node.description = Some(description.clone());
    }
    if let Some(sort_order) = patch.sort_order {
        node.sort_order = sort_order;
    }
    if let Some(category) = patch.category {
        node.category = Some(category);
    }
    if let Some(media) = &patch.media {
        node.kind = NodeKind::Leaf(media.clone());
    }
    if let Some(is_active) = patch.is_active {
        node.is_active = is_active;
    }
    node.updated_at = Utc::now();

    Ok(())
}
