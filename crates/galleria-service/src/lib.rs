//! # galleria-service
//!
//! The gallery engine proper: tree building, breadcrumb trails, paginated
//! media queries, facet aggregation, and the node lifecycle.
//!
//! Services follow constructor injection — each one holds an
//! `Arc<dyn NodeStore>` and nothing else. Every operation loads the node
//! set it needs from the store and computes its result from that
//! snapshot; there is no engine-owned cache, so concurrent callers never
//! share mutable engine state.

pub mod breadcrumb;
pub mod facets;
pub mod media;
pub mod node;
pub mod tree;

pub use breadcrumb::BreadcrumbService;
pub use facets::FacetService;
pub use media::{MediaQuery, MediaService};
pub use node::{CreateLeafRequest, NodeService};
pub use tree::TreeService;
