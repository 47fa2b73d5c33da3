//! # galleria-store
//!
//! The abstract node store contract consumed by the gallery engine, with
//! two implementations: PostgreSQL (the production store) and an
//! in-memory map (tests, embedded callers). Also owns the connection-pool
//! and migration plumbing for the PostgreSQL store.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod postgres;
pub mod store;

pub use connection::DatabasePool;
pub use memory::MemoryNodeStore;
pub use postgres::PgNodeStore;
pub use store::NodeStore;
