//! Folder-scoped media queries.

use std::collections::HashSet;
use std::sync::Arc;

use uuid::Uuid;

use galleria_core::error::AppError;
use galleria_core::result::AppResult;
use galleria_core::types::pagination::{PageRequest, PageResponse};
use galleria_entity::node::GalleryNode;
use galleria_store::NodeStore;

/// Parameters of a media listing request.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct MediaQuery {
    /// Also include media from the folder's **direct** child folders.
    /// One level only, not the full subtree.
    pub include_child_folders: bool,
    /// Page number (1-based).
    pub page: u64,
    /// Items per page.
    pub limit: u64,
}

impl Default for MediaQuery {
    fn default() -> Self {
        Self {
            include_child_folders: false,
            page: 1,
            limit: 25,
        }
    }
}

/// Serves paginated media listings scoped to a gallery folder.
#[derive(Debug, Clone)]
pub struct MediaService {
    /// Node store.
    store: Arc<dyn NodeStore>,
}

impl MediaService {
    /// Creates a new media service.
    pub fn new(store: Arc<dyn NodeStore>) -> Self {
        Self { store }
    }

    /// Lists the active media leaves of a folder, ordered by
    /// `(sort_order asc, created_at desc)`, with offset pagination.
    ///
    /// When `include_child_folders` is set, media of the folder's direct
    /// child folders is merged in as well — deliberately one level deep.
    pub async fn query_media(
        &self,
        folder_id: Uuid,
        query: &MediaQuery,
    ) -> AppResult<PageResponse<GalleryNode>> {
        let page = PageRequest::try_new(query.page, query.limit)?;

        let folder = self
            .store
            .get_node(folder_id)
            .await?
            .filter(|n| n.is_active && n.is_folder())
            .ok_or_else(|| AppError::not_found(format!("Gallery folder {folder_id} not found")))?;

        let nodes = self.store.list_active_nodes(folder.project_id).await?;

        let mut candidates: HashSet<Uuid> = HashSet::from([folder.id]);
        if query.include_child_folders {
            candidates.extend(
                nodes
                    .iter()
                    .filter(|n| n.parent_id == Some(folder.id) && n.is_folder())
                    .map(|n| n.id),
            );
        }

        let mut matches: Vec<&GalleryNode> = nodes
            .iter()
            .filter(|n| {
                n.is_leaf() && n.parent_id.is_some_and(|parent| candidates.contains(&parent))
            })
            .collect();
        // Newest first within the same sort_order; id as final tiebreak so
        // pagination stays stable.
        matches.sort_by(|a, b| {
            a.sort_order
                .cmp(&b.sort_order)
                .then(b.created_at.cmp(&a.created_at))
                .then(a.id.cmp(&b.id))
        });

        let total = matches.len() as u64;
        let items: Vec<GalleryNode> = matches
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .cloned()
            .collect();

        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }
}
