//! In-Memory Document Store
//!
//! Implements the persistence layer as concurrent in-memory collections.
//!
//! ## Core Concepts
//! - **`Collection`**: a dashmap-backed document map keyed by store-assigned
//!   string ids, shared across request handlers behind `Arc`.
//! - **Typed stores**: `CatalogStore`, `FeedbackStore`, and `UserStore` wrap a
//!   `Collection` with the lookups each domain needs (tmdb-id dedup, per-movie
//!   feedback scans, unique email/username checks).
//!
//! All reads see a consistent per-call snapshot; there is no cross-request
//! locking because the catalog and feedback stores are read-mostly.

pub mod catalog;
pub mod feedback;
pub mod memory;
pub mod users;

#[cfg(test)]
mod tests;

pub use catalog::{CatalogStore, UpsertOutcome};
pub use feedback::FeedbackStore;
pub use memory::Collection;
pub use users::UserStore;
