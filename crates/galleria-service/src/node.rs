//! Gallery node lifecycle: create, update, move, reorder, delete.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use galleria_core::error::AppError;
use galleria_core::result::AppResult;
use galleria_entity::node::{
    CreateNode, GalleryNode, MediaCategory, NodeKind, NodePatch, UploadedMedia,
};
use galleria_store::NodeStore;

/// Default bound on how many ancestors are followed during cycle checks.
const DEFAULT_MAX_ANCESTRY_DEPTH: u32 = 64;

/// Request to create a media leaf from an uploaded asset.
///
/// The upload/storage pipeline supplies the [`UploadedMedia`] descriptor;
/// the media type is classified from its MIME type.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateLeafRequest {
    /// The owning project.
    pub project_id: Uuid,
    /// Parent folder (`None` for root-level).
    pub parent_id: Option<Uuid>,
    /// Display title.
    pub title: String,
    /// Display description.
    pub description: Option<String>,
    /// Sibling ordering key.
    pub sort_order: i32,
    /// Filter category.
    pub category: Option<MediaCategory>,
    /// The uploaded asset descriptor.
    pub upload: UploadedMedia,
}

/// Manages gallery node mutations.
///
/// Each mutation is a single store operation; there is no cross-node
/// atomicity (see [`NodeService::reorder`]).
#[derive(Debug, Clone)]
pub struct NodeService {
    /// Node store.
    store: Arc<dyn NodeStore>,
    /// Ancestry depth bound for cycle checks.
    max_ancestry_depth: u32,
}

impl NodeService {
    /// Creates a new node service with the default ancestry depth bound.
    pub fn new(store: Arc<dyn NodeStore>) -> Self {
        Self::with_max_ancestry_depth(store, DEFAULT_MAX_ANCESTRY_DEPTH)
    }

    /// Creates a new node service with an explicit ancestry depth bound.
    pub fn with_max_ancestry_depth(store: Arc<dyn NodeStore>, max_ancestry_depth: u32) -> Self {
        Self {
            store,
            max_ancestry_depth,
        }
    }

    /// Creates a new gallery node.
    ///
    /// The parent, when given, must exist, be active, be a folder, and
    /// belong to the same project. A category on a folder is rejected.
    pub async fn create_node(&self, spec: CreateNode) -> AppResult<GalleryNode> {
        if spec.title.trim().is_empty() {
            return Err(AppError::validation("Node title cannot be empty"));
        }
        if spec.kind.is_folder() && spec.category.is_some() {
            return Err(AppError::validation(
                "category applies only to media leaves",
            ));
        }

        if let Some(parent_id) = spec.parent_id {
            let parent = self
                .store
                .get_node(parent_id)
                .await?
                .filter(|n| n.is_active)
                .ok_or_else(|| {
                    AppError::not_found(format!("Parent gallery {parent_id} not found"))
                })?;
            if parent.project_id != spec.project_id {
                return Err(AppError::validation(
                    "parent belongs to a different project",
                ));
            }
            if parent.is_leaf() {
                return Err(AppError::conflict("media leaves cannot have children"));
            }
        }

        let node = self.store.create_node(&spec).await?;

        info!(
            node_id = %node.id,
            project_id = %node.project_id,
            folder = node.is_folder(),
            "Gallery node created"
        );

        Ok(node)
    }

    /// Creates a media leaf from an uploaded asset.
    pub async fn create_leaf(&self, req: CreateLeafRequest) -> AppResult<GalleryNode> {
        let spec = CreateNode {
            project_id: req.project_id,
            parent_id: req.parent_id,
            title: req.title,
            description: req.description,
            sort_order: req.sort_order,
            kind: NodeKind::Leaf(req.upload.into_media_ref()),
            category: req.category,
        };
        self.create_node(spec).await
    }

    /// Applies a partial update to a node.
    ///
    /// Inactive nodes are updatable — that is how a soft delete is
    /// reversed. Media and category fields on a folder are rejected.
    pub async fn update_node(&self, node_id: Uuid, patch: NodePatch) -> AppResult<GalleryNode> {
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(AppError::validation("Node title cannot be empty"));
            }
        }

        let node = self.require_node(node_id).await?;
        if node.is_folder() && (patch.media.is_some() || patch.category.is_some()) {
            return Err(AppError::conflict(
                "cannot assign media fields to a folder",
            ));
        }

        let updated = self.store.update_node(node_id, &patch).await?;

        info!(node_id = %node_id, "Gallery node updated");

        Ok(updated)
    }

    /// Moves a node under a new parent (`None` moves it to the root
    /// level).
    pub async fn move_node(
        &self,
        node_id: Uuid,
        new_parent_id: Option<Uuid>,
    ) -> AppResult<GalleryNode> {
        self.require_node(node_id).await?;

        if let Some(parent_id) = new_parent_id {
            if parent_id == node_id {
                return Err(AppError::validation("Cannot move a gallery into itself"));
            }
            let parent = self
                .store
                .get_node(parent_id)
                .await?
                .filter(|n| n.is_active)
                .ok_or_else(|| {
                    AppError::not_found(format!("Parent gallery {parent_id} not found"))
                })?;
            if parent.is_leaf() {
                return Err(AppError::conflict("media leaves cannot have children"));
            }

            // Walk the target's ancestor chain to refuse cycle-creating
            // moves.
            let ancestors = self.ancestor_ids(parent_id).await?;
            if ancestors.contains(&node_id) {
                return Err(AppError::validation(
                    "Cannot move a gallery into one of its descendants",
                ));
            }
        }

        let moved = self.store.move_node(node_id, new_parent_id).await?;

        info!(
            node_id = %node_id,
            new_parent = ?new_parent_id,
            "Gallery node moved"
        );

        Ok(moved)
    }

    /// Reassigns sequential sibling positions.
    ///
    /// Each position is an independent single-node store write: two
    /// concurrent reorders interleave last-write-wins and may leave
    /// `sort_order` values non-monotonic. Callers needing stronger
    /// guarantees must serialize reorders themselves.
    pub async fn reorder(&self, ordered_ids: &[Uuid]) -> AppResult<()> {
        for (position, node_id) in ordered_ids.iter().enumerate() {
            let patch = NodePatch {
                sort_order: Some(position as i32),
                ..Default::default()
            };
            self.store.update_node(*node_id, &patch).await?;
        }
        Ok(())
    }

    /// Soft-deletes a node. Children are unaffected and behave as roots
    /// in read operations until the node is restored.
    pub async fn soft_delete(&self, node_id: Uuid) -> AppResult<GalleryNode> {
        let patch = NodePatch {
            is_active: Some(false),
            ..Default::default()
        };
        let node = self.store.update_node(node_id, &patch).await?;

        info!(node_id = %node_id, "Gallery node soft-deleted");

        Ok(node)
    }

    /// Restores a soft-deleted node.
    pub async fn restore(&self, node_id: Uuid) -> AppResult<GalleryNode> {
        let patch = NodePatch {
            is_active: Some(true),
            ..Default::default()
        };
        let node = self.store.update_node(node_id, &patch).await?;

        info!(node_id = %node_id, "Gallery node restored");

        Ok(node)
    }

    /// Hard-deletes a node. A folder must be emptied (or its children
    /// soft-deleted) first; otherwise the delete is refused and the
    /// store left unchanged.
    pub async fn delete_node(&self, node_id: Uuid) -> AppResult<()> {
        let node = self.require_node(node_id).await?;

        if node.is_folder() {
            let siblings = self.store.list_active_nodes(node.project_id).await?;
            if siblings.iter().any(|n| n.parent_id == Some(node_id)) {
                return Err(AppError::conflict("gallery folder is not empty"));
            }
        }

        let deleted = self.store.delete_node(node_id).await?;
        if !deleted {
            return Err(AppError::not_found(format!(
                "Gallery node {node_id} not found"
            )));
        }

        info!(node_id = %node_id, "Gallery node deleted");

        Ok(())
    }

    /// Fetch a node or fail with `NotFound`.
    async fn require_node(&self, node_id: Uuid) -> AppResult<GalleryNode> {
        self.store
            .get_node(node_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Gallery node {node_id} not found")))
    }

    /// Collect a node's id followed by its ancestor ids, bounded by the
    /// ancestry depth limit.
    async fn ancestor_ids(&self, node_id: Uuid) -> AppResult<Vec<Uuid>> {
        let mut ids = vec![node_id];
        let mut current = self
            .store
            .get_node(node_id)
            .await?
            .and_then(|n| n.parent_id);
        let mut hops: u32 = 0;

        while let Some(pid) = current {
            hops += 1;
            if hops > self.max_ancestry_depth {
                return Err(AppError::integrity(format!(
                    "Ancestry of node {node_id} exceeds {} levels; parent references form a cycle",
                    self.max_ancestry_depth
                )));
            }
            ids.push(pid);
            current = self.store.get_node(pid).await?.and_then(|n| n.parent_id);
        }

        Ok(ids)
    }
}
