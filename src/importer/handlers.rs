use super::client::TmdbClient;
use super::service;
use super::types::ImportResponse;
use crate::auth::extract::AuthUser;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::store::CatalogStore;
use axum::extract::Query;
use axum::{Extension, Json};
use serde::Deserialize;
use std::sync::Arc;

/// Pages fetched when the import is triggered manually.
const MANUAL_IMPORT_PAGES: usize = 10;

#[derive(Debug, Deserialize)]
pub struct SearchImportParams {
    pub search: Option<String>,
}

pub async fn handle_import_popular(
    AuthUser(principal): AuthUser,
    Extension(client): Extension<Arc<TmdbClient>>,
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(config): Extension<Arc<AppConfig>>,
) -> Result<Json<ImportResponse>, ApiError> {
    tracing::info!("user {} triggered a popular import", principal.email);

    let imported = service::import_popular(
        &client,
        &catalog,
        &config.image_base_url,
        MANUAL_IMPORT_PAGES,
    )
    .await?;

    Ok(Json(ImportResponse {
        message: "Popular movie import completed".to_string(),
        imported_count: imported,
    }))
}

pub async fn handle_search_and_import(
    AuthUser(principal): AuthUser,
    Query(params): Query<SearchImportParams>,
    Extension(client): Extension<Arc<TmdbClient>>,
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(config): Extension<Arc<AppConfig>>,
) -> Result<Json<ImportResponse>, ApiError> {
    let query = params.search.unwrap_or_default();
    let query = query.trim();
    tracing::info!("user {} importing movies for query {:?}", principal.email, query);

    let imported =
        service::search_and_import(&client, &catalog, &config.image_base_url, query).await?;

    Ok(Json(ImportResponse {
        message: format!("Movie import for query {:?} completed", query),
        imported_count: imported,
    }))
}
