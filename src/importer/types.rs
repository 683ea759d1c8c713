//! Importer Data Types
//!
//! DTOs for the TMDB metadata provider and the import endpoint responses.

use serde::{Deserialize, Serialize};

/// A movie record as the provider returns it. Everything is optional: records
/// missing essential data are skipped during mapping, not errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TmdbMovie {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub overview: Option<String>,
    pub release_date: Option<String>,
    pub vote_average: Option<f64>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub genre_ids: Option<Vec<i32>>,
    pub runtime: Option<u32>,
}

/// One page of provider results.
#[derive(Debug, Default, Deserialize)]
pub struct TmdbPage {
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
    pub total_pages: Option<usize>,
}

/// Response returned after an import run completes.
#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub message: String,
    pub imported_count: usize,
}
