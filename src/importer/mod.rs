//! Catalog Importer Module
//!
//! The data intake pipeline. Fetches movie metadata from the TMDB API, maps it
//! onto catalog records, and upserts the results deduplicated by external id.
//!
//! ## Submodules
//! - **`client`**: Outbound HTTP with retry and upstream status mapping.
//! - **`service`**: Record mapping and the import loops.
//! - **`handlers`**: HTTP request handlers for the Axum web server.
//! - **`types`**: Provider DTOs and import responses.

pub mod client;
pub mod handlers;
pub mod service;
pub mod types;

#[cfg(test)]
mod tests;
