//! PostgreSQL node store implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use galleria_core::error::{AppError, ErrorKind};
use galleria_core::result::AppResult;
use galleria_entity::node::{
    CreateNode, GalleryNode, MediaCategory, MediaRef, MediaType, NodeKind, NodePatch,
};

use crate::store::{self, NodeStore};

/// Node store backed by the `gallery_nodes` table.
#[derive(Debug, Clone)]
pub struct PgNodeStore {
    pool: PgPool,
}

/// Row-level kind discriminator, mirroring the `node_kind` Postgres enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "node_kind", rename_all = "UPPERCASE")]
enum NodeKindRow {
    Folder,
    Leaf,
}

/// Flat row shape of the `gallery_nodes` table.
///
/// The tagged [`GalleryNode`] model is rebuilt from this via `TryFrom`;
/// a leaf row missing its media columns is corrupted data.
#[derive(Debug, FromRow)]
struct NodeRow {
    id: Uuid,
    project_id: Uuid,
    parent_id: Option<Uuid>,
    title: String,
    description: Option<String>,
    sort_order: i32,
    kind: NodeKindRow,
    file_url: Option<String>,
    file_name: Option<String>,
    original_name: Option<String>,
    mime_type: Option<String>,
    size_bytes: Option<i64>,
    media_type: Option<MediaType>,
    thumbnail_url: Option<String>,
    category: Option<MediaCategory>,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<NodeRow> for GalleryNode {
    type Error = AppError;

    fn try_from(row: NodeRow) -> Result<Self, Self::Error> {
        let kind = match row.kind {
            NodeKindRow::Folder => NodeKind::Folder,
            NodeKindRow::Leaf => {
                match (
                    row.file_url,
                    row.file_name,
                    row.mime_type,
                    row.size_bytes,
                    row.media_type,
                ) {
                    (Some(url), Some(file_name), Some(mime_type), Some(size_bytes), Some(media_type)) => {
                        NodeKind::Leaf(MediaRef {
                            url,
                            file_name,
                            original_name: row.original_name,
                            mime_type,
                            size_bytes,
                            media_type,
                            thumbnail_url: row.thumbnail_url,
                        })
                    }
                    _ => {
                        return Err(AppError::integrity(format!(
                            "Leaf node {} is missing media columns",
                            row.id
                        )));
                    }
                }
            }
        };

        Ok(GalleryNode {
            id: row.id,
            project_id: row.project_id,
            parent_id: row.parent_id,
            title: row.title,
            description: row.description,
            sort_order: row.sort_order,
            kind,
            category: row.category,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl PgNodeStore {
    /// Create a new PostgreSQL node store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Write every mutable column of a node back to its row.
    async fn persist(&self, node: &GalleryNode) -> AppResult<GalleryNode> {
        let media = node.media();
        sqlx::query_as::<_, NodeRow>(
            "UPDATE gallery_nodes SET title = $2, description = $3, sort_order = $4, \
             category = $5, file_url = $6, file_name = $7, original_name = $8, \
             mime_type = $9, size_bytes = $10, media_type = $11, thumbnail_url = $12, \
             is_active = $13, updated_at = $14 \
             WHERE id = $1 RETURNING *",
        )
        .bind(node.id)
        .bind(&node.title)
        .bind(&node.description)
        .bind(node.sort_order)
        .bind(node.category)
        .bind(media.map(|m| m.url.as_str()))
        .bind(media.map(|m| m.file_name.as_str()))
        .bind(media.and_then(|m| m.original_name.as_deref()))
        .bind(media.map(|m| m.mime_type.as_str()))
        .bind(media.map(|m| m.size_bytes))
        .bind(media.map(|m| m.media_type))
        .bind(media.and_then(|m| m.thumbnail_url.as_deref()))
        .bind(node.is_active)
        .bind(node.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update node", e))?
        .ok_or_else(|| AppError::not_found(format!("Gallery node {} not found", node.id)))?
        .try_into()
    }
}

#[async_trait]
impl NodeStore for PgNodeStore {
    async fn list_active_nodes(&self, project_id: Uuid) -> AppResult<Vec<GalleryNode>> {
        let rows = sqlx::query_as::<_, NodeRow>(
            "SELECT * FROM gallery_nodes WHERE project_id = $1 AND is_active \
             ORDER BY sort_order ASC, created_at ASC, id ASC",
        )
        .bind(project_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list project nodes", e)
        })?;

        rows.into_iter().map(GalleryNode::try_from).collect()
    }

    async fn get_node(&self, node_id: Uuid) -> AppResult<Option<GalleryNode>> {
        sqlx::query_as::<_, NodeRow>("SELECT * FROM gallery_nodes WHERE id = $1")
            .bind(node_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find node", e))?
            .map(GalleryNode::try_from)
            .transpose()
    }

    async fn create_node(&self, data: &CreateNode) -> AppResult<GalleryNode> {
        let (kind, media) = match &data.kind {
            NodeKind::Folder => (NodeKindRow::Folder, None),
            NodeKind::Leaf(media) => (NodeKindRow::Leaf, Some(media)),
        };

        sqlx::query_as::<_, NodeRow>(
            "INSERT INTO gallery_nodes (project_id, parent_id, title, description, sort_order, \
             kind, file_url, file_name, original_name, mime_type, size_bytes, media_type, \
             thumbnail_url, category) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) RETURNING *",
        )
        .bind(data.project_id)
        .bind(data.parent_id)
        .bind(&data.title)
        .bind(&data.description)
        .bind(data.sort_order)
        .bind(kind)
        .bind(media.map(|m| m.url.as_str()))
        .bind(media.map(|m| m.file_name.as_str()))
        .bind(media.and_then(|m| m.original_name.as_deref()))
        .bind(media.map(|m| m.mime_type.as_str()))
        .bind(media.map(|m| m.size_bytes))
        .bind(media.map(|m| m.media_type))
        .bind(media.and_then(|m| m.thumbnail_url.as_deref()))
        .bind(data.category)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("gallery_nodes_kind_media_check") =>
            {
                AppError::conflict("media fields do not match the node kind")
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create node", e),
        })?
        .try_into()
    }

    async fn update_node(&self, node_id: Uuid, patch: &NodePatch) -> AppResult<GalleryNode> {
        let mut node = self
            .get_node(node_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Gallery node {node_id} not found")))?;

        store::apply_patch(&mut node, patch)?;
        self.persist(&node).await
    }

    async fn move_node(
        &self,
        node_id: Uuid,
        new_parent_id: Option<Uuid>,
    ) -> AppResult<GalleryNode> {
        sqlx::query_as::<_, NodeRow>(
            "UPDATE gallery_nodes SET parent_id = $2, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(node_id)
        .bind(new_parent_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to move node", e))?
        .ok_or_else(|| AppError::not_found(format!("Gallery node {node_id} not found")))?
        .try_into()
    }

    async fn delete_node(&self, node_id: Uuid) -> AppResult<bool> {
        let active_children: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM gallery_nodes WHERE parent_id = $1 AND is_active",
        )
        .bind(node_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count children", e)
        })?;

        if active_children > 0 {
            return Err(AppError::conflict("gallery folder is not empty"));
        }

        let result = sqlx::query("DELETE FROM gallery_nodes WHERE id = $1")
            .bind(node_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete node", e))?;

        Ok(result.rows_affected() > 0)
    }
}
