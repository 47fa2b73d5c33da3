//! End-to-end gallery engine tests over the in-memory node store.

use std::sync::Arc;

use uuid::Uuid;

use galleria_core::error::ErrorKind;
use galleria_entity::node::{CreateNode, MediaCategory, NodeKind, NodePatch, UploadedMedia};
use galleria_service::{
    BreadcrumbService, CreateLeafRequest, FacetService, MediaQuery, MediaService, NodeService,
    TreeService,
};
use galleria_store::{MemoryNodeStore, NodeStore};

/// Everything a test needs, wired over one shared in-memory store.
struct TestEngine {
    store: Arc<MemoryNodeStore>,
    nodes: NodeService,
    tree: TreeService,
    breadcrumbs: BreadcrumbService,
    media: MediaService,
    facets: FacetService,
    project_id: Uuid,
}

impl TestEngine {
    fn new() -> Self {
        let store = Arc::new(MemoryNodeStore::new());
        let dyn_store: Arc<dyn NodeStore> = store.clone();
        Self {
            store,
            nodes: NodeService::new(dyn_store.clone()),
            tree: TreeService::new(dyn_store.clone()),
            breadcrumbs: BreadcrumbService::new(dyn_store.clone()),
            media: MediaService::new(dyn_store.clone()),
            facets: FacetService::new(dyn_store),
            project_id: Uuid::new_v4(),
        }
    }

    async fn create_folder(&self, parent_id: Option<Uuid>, title: &str) -> Uuid {
        self.nodes
            .create_node(CreateNode {
                project_id: self.project_id,
                parent_id,
                title: title.to_string(),
                description: None,
                sort_order: 0,
                kind: NodeKind::Folder,
                category: None,
            })
            .await
            .expect("folder created")
            .id
    }

    async fn create_leaf(
        &self,
        parent_id: Option<Uuid>,
        title: &str,
        sort_order: i32,
        category: MediaCategory,
    ) -> Uuid {
        self.nodes
            .create_leaf(CreateLeafRequest {
                project_id: self.project_id,
                parent_id,
                title: title.to_string(),
                description: None,
                sort_order,
                category: Some(category),
                upload: UploadedMedia {
                    file_name: format!("{title}.jpg"),
                    original_name: Some(format!("{title} original.jpg")),
                    size_bytes: 2048,
                    mime_type: "image/jpeg".to_string(),
                    file_url: format!("https://cdn.example.com/media/{title}.jpg"),
                    thumbnail_url: None,
                },
            })
            .await
            .expect("leaf created")
            .id
    }
}

/// The sample tree used throughout the suite:
/// A (folder, root) > B (folder) > L1, L2 (indoor leaves); L3 (outdoor
/// leaf) directly under A.
struct SampleTree {
    a: Uuid,
    b: Uuid,
    l1: Uuid,
    l2: Uuid,
    l3: Uuid,
}

async fn seed_sample(engine: &TestEngine) -> SampleTree {
    let a = engine.create_folder(None, "A").await;
    let b = engine.create_folder(Some(a), "B").await;
    let l1 = engine
        .create_leaf(Some(b), "L1", 1, MediaCategory::Indoor)
        .await;
    let l2 = engine
        .create_leaf(Some(b), "L2", 2, MediaCategory::Indoor)
        .await;
    let l3 = engine
        .create_leaf(Some(a), "L3", 0, MediaCategory::Outdoor)
        .await;
    SampleTree { a, b, l1, l2, l3 }
}

#[tokio::test]
async fn tree_aggregates_media_counts() {
    let engine = TestEngine::new();
    let sample = seed_sample(&engine).await;

    let forest = engine.tree.project_tree(engine.project_id).await.unwrap();
    assert_eq!(forest.len(), 1);

    let a = &forest[0];
    assert_eq!(a.id, sample.a);
    assert_eq!(a.media_count, 3);
    assert!(a.has_media);

    let b = a
        .sub_galleries
        .iter()
        .find(|e| e.id == sample.b)
        .expect("B under A");
    assert_eq!(b.media_count, 2);
    assert!(b.has_media);
}

#[tokio::test]
async fn tree_total_equals_active_leaf_count() {
    let engine = TestEngine::new();
    seed_sample(&engine).await;

    let forest = engine.tree.project_tree(engine.project_id).await.unwrap();
    let total: u64 = forest.iter().map(|e| e.media_count).sum();
    assert_eq!(total, 3);
}

#[tokio::test]
async fn soft_deleted_leaf_leaves_the_counts() {
    let engine = TestEngine::new();
    let sample = seed_sample(&engine).await;

    engine.nodes.soft_delete(sample.l1).await.unwrap();

    let forest = engine.tree.project_tree(engine.project_id).await.unwrap();
    assert_eq!(forest[0].media_count, 2);

    engine.nodes.restore(sample.l1).await.unwrap();
    let forest = engine.tree.project_tree(engine.project_id).await.unwrap();
    assert_eq!(forest[0].media_count, 3);
}

#[tokio::test]
async fn breadcrumb_of_root_is_single_entry() {
    let engine = TestEngine::new();
    let sample = seed_sample(&engine).await;

    let trail = engine.breadcrumbs.breadcrumb(sample.a).await.unwrap();
    assert_eq!(trail.len(), 1);
    assert_eq!(trail[0].id, sample.a);
    assert_eq!(trail[0].title, "A");
    assert_eq!(trail[0].level, 0);
}

#[tokio::test]
async fn breadcrumb_is_root_first_with_levels() {
    let engine = TestEngine::new();
    let sample = seed_sample(&engine).await;

    let trail = engine.breadcrumbs.breadcrumb(sample.l1).await.unwrap();
    let ids: Vec<Uuid> = trail.iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![sample.a, sample.b, sample.l1]);
    let levels: Vec<u32> = trail.iter().map(|e| e.level).collect();
    assert_eq!(levels, vec![0, 1, 2]);
}

#[tokio::test]
async fn breadcrumb_length_is_depth_plus_one() {
    let engine = TestEngine::new();
    let mut parent = None;
    let mut ids = Vec::new();
    for depth in 0..5 {
        let id = engine
            .create_folder(parent, &format!("level-{depth}"))
            .await;
        ids.push(id);
        parent = Some(id);
    }

    for (depth, id) in ids.iter().enumerate() {
        let trail = engine.breadcrumbs.breadcrumb(*id).await.unwrap();
        assert_eq!(trail.len(), depth + 1);
    }
}

#[tokio::test]
async fn breadcrumb_of_missing_or_inactive_node_is_not_found() {
    let engine = TestEngine::new();
    let sample = seed_sample(&engine).await;

    let err = engine
        .breadcrumbs
        .breadcrumb(Uuid::new_v4())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    engine.nodes.soft_delete(sample.l1).await.unwrap();
    let err = engine.breadcrumbs.breadcrumb(sample.l1).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn breadcrumb_detects_cyclic_parent_references() {
    let engine = TestEngine::new();
    let a = engine.create_folder(None, "A").await;
    let b = engine.create_folder(Some(a), "B").await;

    // Corrupt the data behind the lifecycle service's back: the raw store
    // does not validate cycles.
    engine.store.move_node(a, Some(b)).await.unwrap();

    let err = engine.breadcrumbs.breadcrumb(a).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Integrity);
}

#[tokio::test]
async fn media_query_merges_one_level_of_child_folders() {
    let engine = TestEngine::new();
    let sample = seed_sample(&engine).await;

    let page = engine
        .media
        .query_media(
            sample.a,
            &MediaQuery {
                include_child_folders: true,
                page: 1,
                limit: 10,
            },
        )
        .await
        .unwrap();

    assert_eq!(page.total_items, 3);
    assert!(!page.has_next);
    let ids: Vec<Uuid> = page.items.iter().map(|n| n.id).collect();
    // sort_order asc: L3 (0), L1 (1), L2 (2).
    assert_eq!(ids, vec![sample.l3, sample.l1, sample.l2]);
}

#[tokio::test]
async fn media_query_without_children_sees_direct_leaves_only() {
    let engine = TestEngine::new();
    let sample = seed_sample(&engine).await;

    let page = engine
        .media
        .query_media(sample.a, &MediaQuery::default())
        .await
        .unwrap();

    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].id, sample.l3);
}

#[tokio::test]
async fn media_query_does_not_descend_past_direct_children() {
    let engine = TestEngine::new();
    let sample = seed_sample(&engine).await;
    let c = engine.create_folder(Some(sample.b), "C").await;
    engine
        .create_leaf(Some(c), "deep", 0, MediaCategory::Indoor)
        .await;

    let page = engine
        .media
        .query_media(
            sample.a,
            &MediaQuery {
                include_child_folders: true,
                page: 1,
                limit: 10,
            },
        )
        .await
        .unwrap();

    // The grandchild folder's leaf is not merged: one level only.
    assert_eq!(page.total_items, 3);
}

#[tokio::test]
async fn media_query_paginates_completely_and_stably() {
    let engine = TestEngine::new();
    let folder = engine.create_folder(None, "big").await;
    for i in 0..7 {
        engine
            .create_leaf(
                Some(folder),
                &format!("item-{i}"),
                i,
                MediaCategory::Outdoor,
            )
            .await;
    }

    let limit = 3;
    let mut seen = Vec::new();
    let mut page_no = 1;
    loop {
        let page = engine
            .media
            .query_media(
                folder,
                &MediaQuery {
                    include_child_folders: false,
                    page: page_no,
                    limit,
                },
            )
            .await
            .unwrap();
        assert_eq!(page.total_items, 7);
        seen.extend(page.items.iter().map(|n| n.id));
        if !page.has_next {
            break;
        }
        page_no += 1;
    }

    assert_eq!(page_no, 3);
    assert_eq!(seen.len(), 7);
    let mut unique = seen.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 7);

    // Concatenated pages equal the one-shot listing, in the same order.
    let all = engine
        .media
        .query_media(
            folder,
            &MediaQuery {
                include_child_folders: false,
                page: 1,
                limit: 100,
            },
        )
        .await
        .unwrap();
    let all_ids: Vec<Uuid> = all.items.iter().map(|n| n.id).collect();
    assert_eq!(seen, all_ids);
}

#[tokio::test]
async fn media_query_rejects_bad_pagination() {
    let engine = TestEngine::new();
    let sample = seed_sample(&engine).await;

    for (page, limit) in [(0, 10), (1, 0)] {
        let err = engine
            .media
            .query_media(
                sample.a,
                &MediaQuery {
                    include_child_folders: false,
                    page,
                    limit,
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }
}

#[tokio::test]
async fn media_query_of_missing_inactive_or_leaf_target_is_not_found() {
    let engine = TestEngine::new();
    let sample = seed_sample(&engine).await;

    let err = engine
        .media
        .query_media(Uuid::new_v4(), &MediaQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let err = engine
        .media
        .query_media(sample.l3, &MediaQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    engine.nodes.soft_delete(sample.b).await.unwrap();
    let err = engine
        .media
        .query_media(sample.b, &MediaQuery::default())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);
}

#[tokio::test]
async fn facets_count_categories_with_zero_suppression() {
    let engine = TestEngine::new();
    seed_sample(&engine).await;

    let summary = engine.facets.facets(engine.project_id).await.unwrap();

    assert_eq!(summary.categories.len(), 2);
    let indoor = summary
        .categories
        .iter()
        .find(|o| o.value == "IC_MEKAN")
        .expect("indoor facet");
    assert_eq!(indoor.count, 2);
    let outdoor = summary
        .categories
        .iter()
        .find(|o| o.value == "DIS_MEKAN")
        .expect("outdoor facet");
    assert_eq!(outdoor.count, 1);
    assert!(summary.categories.iter().all(|o| o.value != "VIDEO"));

    // All three leaves are images created just now.
    assert_eq!(summary.media_types.len(), 1);
    assert_eq!(summary.media_types[0].value, "IMAGE");
    assert_eq!(summary.media_types[0].count, 3);
    assert_eq!(summary.date_ranges.len(), 4);
}

#[tokio::test]
async fn facets_of_empty_project_are_empty() {
    let engine = TestEngine::new();
    let summary = engine.facets.facets(Uuid::new_v4()).await.unwrap();
    assert!(summary.categories.is_empty());
    assert!(summary.media_types.is_empty());
    assert!(summary.date_ranges.is_empty());
}

#[tokio::test]
async fn deleting_a_folder_with_active_children_conflicts_and_changes_nothing() {
    let engine = TestEngine::new();
    let sample = seed_sample(&engine).await;

    let err = engine.nodes.delete_node(sample.b).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    for id in [sample.b, sample.l1, sample.l2] {
        let node = engine.store.get_node(id).await.unwrap();
        assert!(node.is_some_and(|n| n.is_active));
    }
}

#[tokio::test]
async fn emptied_folder_can_be_hard_deleted() {
    let engine = TestEngine::new();
    let sample = seed_sample(&engine).await;

    engine.nodes.soft_delete(sample.l1).await.unwrap();
    engine.nodes.soft_delete(sample.l2).await.unwrap();
    engine.nodes.delete_node(sample.b).await.unwrap();

    assert!(engine.store.get_node(sample.b).await.unwrap().is_none());
}

#[tokio::test]
async fn create_validates_parent_and_fields() {
    let engine = TestEngine::new();
    let sample = seed_sample(&engine).await;

    // Blank title.
    let err = engine
        .nodes
        .create_node(CreateNode {
            project_id: engine.project_id,
            parent_id: None,
            title: "   ".to_string(),
            description: None,
            sort_order: 0,
            kind: NodeKind::Folder,
            category: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    // Category on a folder.
    let err = engine
        .nodes
        .create_node(CreateNode {
            project_id: engine.project_id,
            parent_id: None,
            title: "folder".to_string(),
            description: None,
            sort_order: 0,
            kind: NodeKind::Folder,
            category: Some(MediaCategory::Video),
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    // Missing parent.
    let err = engine
        .nodes
        .create_node(CreateNode {
            project_id: engine.project_id,
            parent_id: Some(Uuid::new_v4()),
            title: "child".to_string(),
            description: None,
            sort_order: 0,
            kind: NodeKind::Folder,
            category: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    // Parent in another project.
    let err = engine
        .nodes
        .create_node(CreateNode {
            project_id: Uuid::new_v4(),
            parent_id: Some(sample.a),
            title: "stray".to_string(),
            description: None,
            sort_order: 0,
            kind: NodeKind::Folder,
            category: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    // A leaf cannot be a parent.
    let err = engine
        .nodes
        .create_node(CreateNode {
            project_id: engine.project_id,
            parent_id: Some(sample.l3),
            title: "child of leaf".to_string(),
            description: None,
            sort_order: 0,
            kind: NodeKind::Folder,
            category: None,
        })
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);
}

#[tokio::test]
async fn move_rejects_self_and_descendants() {
    let engine = TestEngine::new();
    let sample = seed_sample(&engine).await;

    let err = engine
        .nodes
        .move_node(sample.a, Some(sample.a))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    let err = engine
        .nodes
        .move_node(sample.a, Some(sample.b))
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);

    // A legal move: B becomes a root.
    let moved = engine.nodes.move_node(sample.b, None).await.unwrap();
    assert!(moved.parent_id.is_none());

    let forest = engine.tree.project_tree(engine.project_id).await.unwrap();
    assert_eq!(forest.len(), 2);
}

#[tokio::test]
async fn reorder_assigns_sequential_positions() {
    let engine = TestEngine::new();
    let folder = engine.create_folder(None, "parent").await;
    let x = engine
        .create_leaf(Some(folder), "x", 5, MediaCategory::Outdoor)
        .await;
    let y = engine
        .create_leaf(Some(folder), "y", 6, MediaCategory::Outdoor)
        .await;
    let z = engine
        .create_leaf(Some(folder), "z", 7, MediaCategory::Outdoor)
        .await;

    engine.nodes.reorder(&[z, x, y]).await.unwrap();

    let page = engine
        .media
        .query_media(folder, &MediaQuery::default())
        .await
        .unwrap();
    let ids: Vec<Uuid> = page.items.iter().map(|n| n.id).collect();
    assert_eq!(ids, vec![z, x, y]);
}

#[tokio::test]
async fn update_guards_folder_against_media_fields() {
    let engine = TestEngine::new();
    let sample = seed_sample(&engine).await;

    let err = engine
        .nodes
        .update_node(
            sample.a,
            NodePatch {
                category: Some(MediaCategory::Indoor),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind, ErrorKind::Conflict);

    let renamed = engine
        .nodes
        .update_node(
            sample.a,
            NodePatch {
                title: Some("Renamed".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.title, "Renamed");
}
