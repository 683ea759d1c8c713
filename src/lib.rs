//! Movie Catalog REST Backend Library
//!
//! This library crate defines the core modules that make up the movie-cataloguing
//! service. It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of six loosely coupled subsystems:
//!
//! - **`auth`**: Identity layer. Handles registration, login, bearer-token issuing
//!   and verification, and user profile management.
//! - **`catalog`**: The movie domain. Contains the query planner that turns
//!   untrusted listing parameters into a filter/aggregate/sort/paginate pipeline.
//! - **`feedback`**: User comments and ratings per movie, including the shared
//!   rating aggregation routine used by the planner and the ratings endpoint.
//! - **`importer`**: The data intake pipeline. Fetches movie metadata from the
//!   TMDB API and upserts it into the catalog.
//! - **`store`**: The state layer. In-memory document collections backing the
//!   catalog, feedback, and user stores.
//! - **`config` / `error`**: Process configuration and the HTTP error taxonomy.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod error;
pub mod feedback;
pub mod importer;
pub mod store;
