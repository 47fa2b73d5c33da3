//! Breadcrumb trail construction.

use std::sync::Arc;

use uuid::Uuid;

use galleria_core::error::AppError;
use galleria_core::result::AppResult;
use galleria_entity::node::BreadcrumbEntry;
use galleria_store::NodeStore;

/// Default bound on how many ancestors are followed before the parent
/// chain is considered cyclic.
const DEFAULT_MAX_ANCESTRY_DEPTH: u32 = 64;

/// Builds root-to-node breadcrumb trails.
#[derive(Debug, Clone)]
pub struct BreadcrumbService {
    /// Node store.
    store: Arc<dyn NodeStore>,
    /// Ancestry depth bound.
    max_depth: u32,
}

impl BreadcrumbService {
    /// Creates a new breadcrumb service with the default depth bound.
    pub fn new(store: Arc<dyn NodeStore>) -> Self {
        Self::with_max_depth(store, DEFAULT_MAX_ANCESTRY_DEPTH)
    }

    /// Creates a new breadcrumb service with an explicit depth bound.
    pub fn with_max_depth(store: Arc<dyn NodeStore>, max_depth: u32) -> Self {
        Self { store, max_depth }
    }

    /// Builds the breadcrumb trail for a node, root first, `level`
    /// starting at 0.
    ///
    /// A missing or inactive ancestor terminates the walk: the node then
    /// behaves as a root, consistent with the tree builder's orphan
    /// promotion. Exceeding the depth bound means the parent references
    /// form a cycle and is reported as an integrity error.
    pub async fn breadcrumb(&self, node_id: Uuid) -> AppResult<Vec<BreadcrumbEntry>> {
        let node = self
            .store
            .get_node(node_id)
            .await?
            .filter(|n| n.is_active)
            .ok_or_else(|| AppError::not_found(format!("Gallery node {node_id} not found")))?;

        let mut trail = vec![(node.id, node.title)];
        let mut parent_id = node.parent_id;
        let mut hops: u32 = 0;

        while let Some(pid) = parent_id {
            hops += 1;
            if hops > self.max_depth {
                return Err(AppError::integrity(format!(
                    "Ancestry of node {node_id} exceeds {} levels; parent references form a cycle",
                    self.max_depth
                )));
            }
            match self.store.get_node(pid).await? {
                Some(parent) if parent.is_active => {
                    parent_id = parent.parent_id;
                    trail.push((parent.id, parent.title));
                }
                // Orphaned: the node behaves as a root.
                _ => break,
            }
        }

        trail.reverse();
        Ok(trail
            .into_iter()
            .enumerate()
            .map(|(level, (id, title))| BreadcrumbEntry {
                id,
                title,
                level: level as u32,
            })
            .collect())
    }
}
