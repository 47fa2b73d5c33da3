//! # galleria-entity
//!
//! Domain entity models for Galleria. The single persisted entity is the
//! [`node::GalleryNode`] — a gallery tree element that is either a folder
//! or a media leaf — together with the read-side projection types the
//! engine produces for the gallery renderer (tree entries, breadcrumbs,
//! facet summaries).

pub mod node;
