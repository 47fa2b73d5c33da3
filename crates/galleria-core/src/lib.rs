//! # galleria-core
//!
//! Core crate for Galleria, the hierarchical project gallery engine.
//! Contains configuration schemas, pagination types, and the unified
//! error system.
//!
//! This crate has **no** internal dependencies on other Galleria crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
