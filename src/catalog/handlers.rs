use super::planner;
use super::query::{ListParams, ListQuery};
use super::types::{Movie, MovieView};
use crate::auth::extract::AuthUser;
use crate::error::ApiError;
use crate::store::{CatalogStore, FeedbackStore};
use axum::extract::{Path, Query};
use axum::{Extension, Json};
use std::sync::Arc;
use uuid::Uuid;

/// `GET /api/movies`, the listing endpoint. Responds with a plain array of
/// projected movies; an empty result is a valid outcome, not an error.
pub async fn handle_list_movies(
    AuthUser(_principal): AuthUser,
    Query(params): Query<ListParams>,
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(feedback): Extension<Arc<FeedbackStore>>,
) -> Json<Vec<MovieView>> {
    let query = ListQuery::from_params(params);
    tracing::debug!("listing movies with {:?}", query);

    Json(planner::list_movies(&query, &catalog, &feedback))
}

/// `GET /api/movies/:id`. 400 for a malformed identifier, 404 when absent.
pub async fn handle_movie_by_id(
    AuthUser(_principal): AuthUser,
    Path(id): Path<String>,
    Extension(catalog): Extension<Arc<CatalogStore>>,
) -> Result<Json<Movie>, ApiError> {
    if Uuid::parse_str(&id).is_err() {
        return Err(ApiError::Validation("Invalid movie id format".to_string()));
    }

    catalog
        .get(&id)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound("Movie not found".to_string()))
}
