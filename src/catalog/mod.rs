//! Catalog Module
//!
//! The movie domain and the query engine behind the browsing endpoint.
//!
//! ## Overview
//! A single listing endpoint supports free-text search, multi-value genre
//! filtering, release-year ranges, rating filters computed from feedback,
//! section views (latest / popular / upcoming) with fallback behavior,
//! configurable sorting, and pagination, all composed into one pipeline by
//! the planner.
//!
//! ## Submodules
//! - **`planner`**: Stage composition and execution (the core).
//! - **`query`**: Untrusted parameter parsing into a validated query.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: Movie records, genres, and the projected view.

pub mod handlers;
pub mod planner;
pub mod query;
pub mod types;
