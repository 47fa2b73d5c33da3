//! Gallery node entity and its projections.

pub mod breadcrumb;
pub mod category;
pub mod facet;
pub mod media;
pub mod model;
pub mod tree;

pub use breadcrumb::BreadcrumbEntry;
pub use category::MediaCategory;
pub use facet::{FacetOption, FacetSummary};
pub use media::{MediaRef, MediaType, UploadedMedia};
pub use model::{CreateNode, GalleryNode, NodeKind, NodePatch};
pub use tree::TreeEntry;
