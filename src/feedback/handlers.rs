use super::aggregate::rating_summary;
use super::service;
use super::types::{CommentView, CreateCommentRequest, RatingResponse, UpdateCommentRequest};
use crate::auth::extract::AuthUser;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::store::{CatalogStore, FeedbackStore, UserStore};
use axum::extract::Path;
use axum::http::StatusCode;
use axum::{Extension, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Serialize)]
pub struct CommentEnvelope {
    pub status: &'static str,
    pub data: CommentData,
}

#[derive(Serialize)]
pub struct CommentData {
    pub comment: CommentView,
}

#[derive(Serialize)]
pub struct CommentListEnvelope {
    pub status: &'static str,
    pub results: usize,
    pub data: CommentListData,
}

#[derive(Serialize)]
pub struct CommentListData {
    pub comments: Vec<CommentView>,
}

pub async fn handle_create_comment(
    AuthUser(principal): AuthUser,
    Extension(feedback): Extension<Arc<FeedbackStore>>,
    Extension(catalog): Extension<Arc<CatalogStore>>,
    Extension(users): Extension<Arc<UserStore>>,
    Extension(config): Extension<Arc<AppConfig>>,
    Json(req): Json<CreateCommentRequest>,
) -> Result<(StatusCode, Json<CommentEnvelope>), ApiError> {
    let comment = service::create_comment(&feedback, &catalog, &config, &principal.id, req)?;
    let view = service::comment_by_id(&feedback, &users, &comment.id)?;

    Ok((
        StatusCode::CREATED,
        Json(CommentEnvelope {
            status: "success",
            data: CommentData { comment: view },
        }),
    ))
}

pub async fn handle_update_comment(
    AuthUser(principal): AuthUser,
    Path(id): Path<String>,
    Extension(feedback): Extension<Arc<FeedbackStore>>,
    Extension(users): Extension<Arc<UserStore>>,
    Extension(config): Extension<Arc<AppConfig>>,
    Json(req): Json<UpdateCommentRequest>,
) -> Result<Json<CommentEnvelope>, ApiError> {
    let comment = service::update_comment(&feedback, &config, &principal.id, &id, req)?;
    let view = service::comment_by_id(&feedback, &users, &comment.id)?;

    Ok(Json(CommentEnvelope {
        status: "success",
        data: CommentData { comment: view },
    }))
}

pub async fn handle_delete_comment(
    AuthUser(principal): AuthUser,
    Path(id): Path<String>,
    Extension(feedback): Extension<Arc<FeedbackStore>>,
) -> Result<StatusCode, ApiError> {
    service::delete_comment(&feedback, &principal.id, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn handle_ratings_for_movie(
    Path(movie_id): Path<String>,
    Extension(feedback): Extension<Arc<FeedbackStore>>,
) -> Json<RatingResponse> {
    let summary = rating_summary(&movie_id, &feedback);

    Json(RatingResponse {
        average_rating: summary.rounded_mean(),
        number_of_ratings: summary.count,
    })
}

pub async fn handle_comments_for_movie(
    Path(movie_id): Path<String>,
    Extension(feedback): Extension<Arc<FeedbackStore>>,
    Extension(users): Extension<Arc<UserStore>>,
) -> Json<CommentListEnvelope> {
    let comments = service::comments_for_movie(&feedback, &users, &movie_id);

    Json(CommentListEnvelope {
        status: "success",
        results: comments.len(),
        data: CommentListData { comments },
    })
}

pub async fn handle_comment_by_id(
    Path(id): Path<String>,
    Extension(feedback): Extension<Arc<FeedbackStore>>,
    Extension(users): Extension<Arc<UserStore>>,
) -> Result<Json<CommentEnvelope>, ApiError> {
    let comment = service::comment_by_id(&feedback, &users, &id)?;

    Ok(Json(CommentEnvelope {
        status: "success",
        data: CommentData { comment },
    }))
}
