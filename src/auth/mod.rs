//! Identity & Auth Module
//!
//! Issues and validates bearer tokens, and exposes the current authenticated
//! principal to downstream handlers.
//!
//! ## Submodules
//! - **`service`**: Registration, login, token issue/verify, profile flows.
//! - **`extract`**: The `AuthUser` request extractor (middleware contract).
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: User records, claims, and wire shapes.

pub mod extract;
pub mod handlers;
pub mod service;
pub mod types;
