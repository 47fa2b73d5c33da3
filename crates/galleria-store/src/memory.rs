//! In-memory node store implementation.
//!
//! Backs the engine test-suites and embedded callers that have no
//! PostgreSQL at hand. Enforces the same contract as the production
//! store.

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use galleria_core::error::AppError;
use galleria_core::result::AppResult;
use galleria_entity::node::{CreateNode, GalleryNode, NodePatch};

use crate::store::{self, NodeStore};

/// Node store backed by a concurrent in-memory map.
#[derive(Debug, Default)]
pub struct MemoryNodeStore {
    nodes: DashMap<Uuid, GalleryNode>,
}

impl MemoryNodeStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fully formed node, bypassing creation defaults.
    ///
    /// Intended for seeding test fixtures with specific ids, timestamps,
    /// or deliberately corrupted parent references.
    pub fn insert(&self, node: GalleryNode) {
        self.nodes.insert(node.id, node);
    }
}

#[async_trait]
impl NodeStore for MemoryNodeStore {
    async fn list_active_nodes(&self, project_id: Uuid) -> AppResult<Vec<GalleryNode>> {
        let mut nodes: Vec<GalleryNode> = self
            .nodes
            .iter()
            .filter(|entry| entry.project_id == project_id && entry.is_active)
            .map(|entry| entry.value().clone())
            .collect();
        // DashMap iteration order is arbitrary; keep the listing stable.
        nodes.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then(a.created_at.cmp(&b.created_at))
                .then(a.id.cmp(&b.id))
        });
        Ok(nodes)
    }

    async fn get_node(&self, node_id: Uuid) -> AppResult<Option<GalleryNode>> {
        Ok(self.nodes.get(&node_id).map(|entry| entry.value().clone()))
    }

    async fn create_node(&self, data: &CreateNode) -> AppResult<GalleryNode> {
        let now = Utc::now();
        let node = GalleryNode {
            id: Uuid::new_v4(),
            project_id: data.project_id,
            parent_id: data.parent_id,
            title: data.title.clone(),
            description: data.description.clone(),
            sort_order: data.sort_order,
            kind: data.kind.clone(),
            category: data.category,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.nodes.insert(node.id, node.clone());
        Ok(node)
    }

    async fn update_node(&self, node_id: Uuid, patch: &NodePatch) -> AppResult<GalleryNode> {
        let mut entry = self
            .nodes
            .get_mut(&node_id)
            .ok_or_else(|| AppError::not_found(format!("Gallery node {node_id} not found")))?;
        store::apply_patch(entry.value_mut(), patch)?;
        Ok(entry.value().clone())
    }

    async fn move_node(
        &self,
        node_id: Uuid,
        new_parent_id: Option<Uuid>,
    ) -> AppResult<GalleryNode> {
        let mut entry = self
            .nodes
            .get_mut(&node_id)
            .ok_or_else(|| AppError::not_found(format!("Gallery node {node_id} not found")))?;
        entry.parent_id = new_parent_id;
        entry.updated_at = Utc::now();
        Ok(entry.value().clone())
    }

    async fn delete_node(&self, node_id: Uuid) -> AppResult<bool> {
        let has_active_children = self
            .nodes
            .iter()
            .any(|entry| entry.parent_id == Some(node_id) && entry.is_active);
        if has_active_children {
            return Err(AppError::conflict("gallery folder is not empty"));
        }
        Ok(self.nodes.remove(&node_id).is_some())
    }
}
