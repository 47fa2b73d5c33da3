//! Gallery tree building.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use uuid::Uuid;

use galleria_core::result::AppResult;
use galleria_entity::node::{GalleryNode, TreeEntry};
use galleria_store::NodeStore;

/// Builds nested gallery trees from flat node sets.
#[derive(Debug, Clone)]
pub struct TreeService {
    /// Node store.
    store: Arc<dyn NodeStore>,
}

impl TreeService {
    /// Creates a new tree service.
    pub fn new(store: Arc<dyn NodeStore>) -> Self {
        Self { store }
    }

    /// Builds the gallery forest of one project.
    pub async fn project_tree(&self, project_id: Uuid) -> AppResult<Vec<TreeEntry>> {
        let nodes = self.store.list_active_nodes(project_id).await?;
        Ok(build_forest(&nodes))
    }
}

/// Build a nested forest from a flat, parent-referencing node set.
///
/// Inactive nodes are ignored. A node whose parent is missing from the
/// set is promoted to a root rather than dropped. Folders and leaves both
/// become entries; children are ordered by `(sort_order, created_at)` and
/// `media_count` aggregates leaf descendants bottom-up. The traversal
/// uses an explicit stack, so a pathologically deep tree cannot overflow
/// the call stack. O(n) in the number of active nodes.
pub fn build_forest(nodes: &[GalleryNode]) -> Vec<TreeEntry> {
    let active: Vec<&GalleryNode> = nodes.iter().filter(|n| n.is_active).collect();
    let ids: HashSet<Uuid> = active.iter().map(|n| n.id).collect();

    // One pass: group child indexes by parent, promoting orphans to roots.
    let mut children: HashMap<Uuid, Vec<usize>> = HashMap::new();
    let mut roots: Vec<usize> = Vec::new();
    for (idx, node) in active.iter().enumerate() {
        match node.parent_id {
            Some(parent_id) if parent_id != node.id && ids.contains(&parent_id) => {
                children.entry(parent_id).or_default().push(idx);
            }
            _ => roots.push(idx),
        }
    }

    let sibling_order = |&a: &usize, &b: &usize| {
        active[a]
            .sort_order
            .cmp(&active[b].sort_order)
            .then(active[a].created_at.cmp(&active[b].created_at))
            .then(active[a].id.cmp(&active[b].id))
    };
    roots.sort_by(sibling_order);
    for siblings in children.values_mut() {
        siblings.sort_by(sibling_order);
    }

    // Post-order traversal with an explicit stack: children are finished
    // before their parent folds their counts in.
    let mut built: Vec<Option<TreeEntry>> = (0..active.len()).map(|_| None).collect();
    let mut stack: Vec<(usize, bool)> = roots.iter().rev().map(|&idx| (idx, false)).collect();

    while let Some((idx, expanded)) = stack.pop() {
        let node = active[idx];
        if expanded {
            let mut entry = TreeEntry {
                id: node.id,
                title: node.title.clone(),
                description: node.description.clone(),
                sort_order: node.sort_order,
                has_media: false,
                media_count: u64::from(node.is_leaf()),
                sub_galleries: Vec::new(),
            };
            if let Some(kids) = children.get(&node.id) {
                for &child_idx in kids {
                    if let Some(child) = built[child_idx].take() {
                        entry.media_count += child.media_count;
                        if active[child_idx].is_leaf() {
                            entry.has_media = true;
                        }
                        entry.sub_galleries.push(child);
                    }
                }
            }
            built[idx] = Some(entry);
        } else {
            stack.push((idx, true));
            if let Some(kids) = children.get(&node.id) {
                for &child_idx in kids.iter().rev() {
                    stack.push((child_idx, false));
                }
            }
        }
    }

    roots
        .into_iter()
        .filter_map(|idx| built[idx].take())
        .collect()
}
