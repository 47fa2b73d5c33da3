//! Facet aggregation across a project's media leaves.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use galleria_core::result::AppResult;
use galleria_entity::node::{FacetOption, FacetSummary, GalleryNode, MediaCategory, MediaType};
use galleria_store::NodeStore;

/// Date windows offered to filter UIs. Windows overlap: a 10-day-old
/// item counts toward the 30-, 90-, and 365-day windows alike.
const DATE_WINDOWS: [(i64, &str, &str); 4] = [
    (7, "7d", "Last 7 days"),
    (30, "30d", "Last 30 days"),
    (90, "90d", "Last 90 days"),
    (365, "365d", "Last 365 days"),
];

/// Computes category, media-type, and date facet counts.
#[derive(Debug, Clone)]
pub struct FacetService {
    /// Node store.
    store: Arc<dyn NodeStore>,
}

impl FacetService {
    /// Creates a new facet service.
    pub fn new(store: Arc<dyn NodeStore>) -> Self {
        Self { store }
    }

    /// Computes the facet summary for one project, measured from the
    /// current time.
    pub async fn facets(&self, project_id: Uuid) -> AppResult<FacetSummary> {
        let nodes = self.store.list_active_nodes(project_id).await?;
        Ok(facet_summary(&nodes, Utc::now()))
    }
}

/// Tally facet counts over a node snapshot in a single pass.
///
/// Only active leaves contribute. Zero-count options are suppressed in
/// every dimension; a project without leaves yields an empty summary.
pub fn facet_summary(nodes: &[GalleryNode], now: DateTime<Utc>) -> FacetSummary {
    let mut category_counts: HashMap<MediaCategory, u64> = HashMap::new();
    let mut type_counts: HashMap<MediaType, u64> = HashMap::new();
    let mut window_counts = [0u64; DATE_WINDOWS.len()];

    for node in nodes.iter().filter(|n| n.is_active && n.is_leaf()) {
        if let Some(category) = node.category {
            *category_counts.entry(category).or_default() += 1;
        }
        if let Some(media) = node.media() {
            *type_counts.entry(media.media_type).or_default() += 1;
        }
        for (count, (days, _, _)) in window_counts.iter_mut().zip(DATE_WINDOWS.iter()) {
            if node.created_at > now - Duration::days(*days) && node.created_at <= now {
                *count += 1;
            }
        }
    }

    let categories = MediaCategory::ALL
        .iter()
        .filter_map(|category| {
            category_counts
                .get(category)
                .map(|&count| FacetOption::new(category.as_str(), category.label(), count))
        })
        .collect();

    let media_types = MediaType::ALL
        .iter()
        .filter_map(|media_type| {
            type_counts
                .get(media_type)
                .map(|&count| FacetOption::new(media_type.as_str(), media_type.label(), count))
        })
        .collect();

    let date_ranges = DATE_WINDOWS
        .iter()
        .zip(window_counts.iter())
        .filter(|&(_, &count)| count > 0)
        .map(|((_, value, label), &count)| FacetOption::new(*value, *label, count))
        .collect();

    FacetSummary {
        categories,
        media_types,
        date_ranges,
    }
}
