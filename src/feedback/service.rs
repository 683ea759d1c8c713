//! Feedback Service
//!
//! Create/update/delete of individual comments with validation and ownership
//! enforcement, and the read paths that resolve authors for display. Handlers
//! stay thin; all policy lives here.

use super::types::{
    Comment, CommentAuthor, CommentView, CreateCommentRequest, MAX_COMMENT_LENGTH,
    UpdateCommentRequest,
};
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::store::{CatalogStore, Collection, FeedbackStore, UserStore};
use chrono::Utc;

pub fn create_comment(
    feedback: &FeedbackStore,
    catalog: &CatalogStore,
    config: &AppConfig,
    user_id: &str,
    req: CreateCommentRequest,
) -> Result<Comment, ApiError> {
    if req.movie_id.trim().is_empty() || req.text.trim().is_empty() {
        return Err(ApiError::Validation(
            "Movie id, text, and rating are required".to_string(),
        ));
    }
    validate_text(&req.text)?;
    validate_rating(req.rating, config)?;

    if catalog.get(&req.movie_id).is_none() {
        return Err(ApiError::NotFound("Movie not found".to_string()));
    }

    let now = Utc::now();
    let comment = Comment {
        id: Collection::<Comment>::generate_id(),
        user_id: user_id.to_string(),
        movie_id: req.movie_id,
        text: req.text,
        rating: req.rating,
        created_at: now,
        updated_at: now,
    };
    feedback.insert(comment.clone());

    tracing::debug!("user {} commented on movie {}", user_id, comment.movie_id);
    Ok(comment)
}

pub fn update_comment(
    feedback: &FeedbackStore,
    config: &AppConfig,
    user_id: &str,
    comment_id: &str,
    req: UpdateCommentRequest,
) -> Result<Comment, ApiError> {
    if req.text.is_none() && req.rating.is_none() {
        return Err(ApiError::Validation(
            "Provide text or a rating to update".to_string(),
        ));
    }
    if let Some(text) = &req.text {
        validate_text(text)?;
    }
    if let Some(rating) = req.rating {
        validate_rating(rating, config)?;
    }

    let mut comment = feedback
        .get(comment_id)
        .ok_or_else(|| ApiError::NotFound("Comment not found".to_string()))?;

    if comment.user_id != user_id {
        return Err(ApiError::Forbidden(
            "You are not allowed to edit this comment".to_string(),
        ));
    }

    if let Some(text) = req.text {
        comment.text = text;
    }
    if let Some(rating) = req.rating {
        comment.rating = rating;
    }
    comment.updated_at = Utc::now();
    feedback.put(comment.clone());

    Ok(comment)
}

pub fn delete_comment(
    feedback: &FeedbackStore,
    user_id: &str,
    comment_id: &str,
) -> Result<(), ApiError> {
    let comment = feedback
        .get(comment_id)
        .ok_or_else(|| ApiError::NotFound("Comment not found".to_string()))?;

    if comment.user_id != user_id {
        return Err(ApiError::Forbidden(
            "You are not allowed to delete this comment".to_string(),
        ));
    }

    feedback.remove(comment_id);
    Ok(())
}

/// All comments for a movie, oldest first, with authors resolved and repeat
/// comments by the same user flagged.
pub fn comments_for_movie(
    feedback: &FeedbackStore,
    users: &UserStore,
    movie_id: &str,
) -> Vec<CommentView> {
    let comments = feedback.for_movie(movie_id);
    comments
        .iter()
        .map(|comment| to_view(comment, &comments, users))
        .collect()
}

pub fn comment_by_id(
    feedback: &FeedbackStore,
    users: &UserStore,
    comment_id: &str,
) -> Result<CommentView, ApiError> {
    let comment = feedback
        .get(comment_id)
        .ok_or_else(|| ApiError::NotFound("Comment not found".to_string()))?;
    let siblings = feedback.for_movie(&comment.movie_id);
    Ok(to_view(&comment, &siblings, users))
}

fn to_view(comment: &Comment, movie_comments: &[Comment], users: &UserStore) -> CommentView {
    let earlier_by_same_user = movie_comments
        .iter()
        .filter(|c| c.user_id == comment.user_id && c.created_at < comment.created_at)
        .count();

    let username = users
        .get(&comment.user_id)
        .map(|user| user.username)
        .unwrap_or_else(|| "[deleted]".to_string());

    CommentView {
        id: comment.id.clone(),
        movie_id: comment.movie_id.clone(),
        text: comment.text.clone(),
        rating: comment.rating,
        created_at: comment.created_at,
        updated_at: comment.updated_at,
        user: CommentAuthor {
            id: comment.user_id.clone(),
            username,
        },
        is_subsequent_comment: earlier_by_same_user > 0,
    }
}

fn validate_text(text: &str) -> Result<(), ApiError> {
    if text.chars().count() > MAX_COMMENT_LENGTH {
        return Err(ApiError::Validation(format!(
            "Comment text cannot exceed {} characters",
            MAX_COMMENT_LENGTH
        )));
    }
    Ok(())
}

fn validate_rating(rating: f64, config: &AppConfig) -> Result<(), ApiError> {
    if !rating.is_finite() || rating < config.rating_min || rating > config.rating_max {
        return Err(ApiError::Validation(format!(
            "Rating must be a number between {} and {}",
            config.rating_min, config.rating_max
        )));
    }
    Ok(())
}
