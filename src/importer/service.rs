//! Import Pipeline
//!
//! Maps provider records into catalog records and upserts them, deduplicating
//! by external catalog identifier. Runs at process startup and on demand.

use super::client::TmdbClient;
use super::types::TmdbMovie;
use crate::catalog::types::{Genre, MovieInput, epoch_release_date};
use crate::error::ApiError;
use crate::store::{CatalogStore, UpsertOutcome};
use chrono::NaiveDate;

/// Maps one provider record onto the catalog shape. Records missing a title,
/// id, or release date are skipped; genre ids are migrated to the canonical
/// `{id, name}` form.
pub fn map_tmdb_movie(raw: &TmdbMovie, image_base_url: &str) -> Option<MovieInput> {
    let title = raw.title.as_deref().filter(|t| !t.is_empty())?;
    let tmdb_id = raw.id?;
    let raw_date = raw.release_date.as_deref().filter(|d| !d.is_empty())?;

    let release_date = match NaiveDate::parse_from_str(raw_date, "%Y-%m-%d") {
        Ok(date) => date,
        Err(_) => {
            tracing::warn!("invalid release date for movie {} ({}): {}", title, tmdb_id, raw_date);
            epoch_release_date()
        }
    };

    Some(MovieInput {
        tmdb_id: tmdb_id.to_string(),
        title: title.to_string(),
        overview: raw
            .overview
            .clone()
            .filter(|o| !o.is_empty())
            .unwrap_or_else(|| "No overview available.".to_string()),
        release_date,
        vote_average: raw.vote_average.unwrap_or(0.0),
        poster_path: prefix_image(raw.poster_path.as_deref(), image_base_url),
        backdrop_path: prefix_image(raw.backdrop_path.as_deref(), image_base_url),
        genres: raw
            .genre_ids
            .clone()
            .unwrap_or_default()
            .into_iter()
            .map(Genre::from_tmdb_id)
            .collect(),
        runtime: raw.runtime,
    })
}

fn prefix_image(path: Option<&str>, base_url: &str) -> String {
    match path {
        Some(p) if !p.is_empty() => format!("{}{}", base_url, p),
        _ => String::new(),
    }
}

/// Imports pages of popular movies until the provider runs out or `max_pages`
/// is reached. Returns the number of newly inserted movies; updates to known
/// movies are not counted.
pub async fn import_popular(
    client: &TmdbClient,
    catalog: &CatalogStore,
    image_base_url: &str,
    max_pages: usize,
) -> Result<usize, ApiError> {
    tracing::info!("importing popular movies from TMDB (up to {} pages)", max_pages);

    let mut inserted = 0;
    let mut page = 1;
    let mut total_pages = 1;

    while page <= total_pages && page <= max_pages {
        tracing::info!("importing popular movies, page {}", page);
        let batch = client.popular_page(page).await?;
        total_pages = batch.total_pages.unwrap_or(total_pages);

        inserted += upsert_batch(&batch.results, catalog, image_base_url);
        page += 1;
    }

    tracing::info!("popular import finished, {} new movies", inserted);
    Ok(inserted)
}

/// Searches the provider and imports every mapped result.
pub async fn search_and_import(
    client: &TmdbClient,
    catalog: &CatalogStore,
    image_base_url: &str,
    query: &str,
) -> Result<usize, ApiError> {
    if query.trim().is_empty() {
        return Err(ApiError::Validation(
            "A search query is required to import movies".to_string(),
        ));
    }

    let batch = client.search(query).await?;
    let inserted = upsert_batch(&batch.results, catalog, image_base_url);

    tracing::info!("search import for {:?} finished, {} new movies", query, inserted);
    Ok(inserted)
}

fn upsert_batch(results: &[TmdbMovie], catalog: &CatalogStore, image_base_url: &str) -> usize {
    results
        .iter()
        .filter_map(|raw| map_tmdb_movie(raw, image_base_url))
        .filter(|input| catalog.upsert_by_tmdb_id(input.clone()) == UpsertOutcome::Inserted)
        .count()
}
