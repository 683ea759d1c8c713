//! Feedback Module
//!
//! User-authored comments and ratings tied to a movie and a user.
//!
//! ## Responsibilities
//! - **CRUD**: Create, update, and delete of individual comments, gated on
//!   "requester id == comment owner id".
//! - **Aggregation**: The shared average-rating routine consumed by both the
//!   ratings endpoint and the catalog query planner.
//! - **Read paths**: Per-movie comment listings with resolved authors.
//!
//! ## Submodules
//! - **`aggregate`**: Rating summary computation.
//! - **`service`**: Validation, ownership checks, and view assembly.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: Comment records and wire shapes.

pub mod aggregate;
pub mod handlers;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;
