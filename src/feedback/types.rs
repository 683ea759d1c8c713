//! Feedback Data Types
//!
//! Comment records linking a user and a movie, plus the request and response
//! shapes of the comment endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MAX_COMMENT_LENGTH: usize = 500;

/// A user-authored comment with a numeric rating. A user may post several
/// comments on the same movie; there is no uniqueness constraint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub user_id: String,
    pub movie_id: String,
    pub text: String,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub movie_id: String,
    pub text: String,
    pub rating: f64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub text: Option<String>,
    pub rating: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentAuthor {
    pub id: String,
    pub username: String,
}

/// Comment as returned by the read endpoints: author resolved to a display
/// shape, plus a flag marking repeat comments by the same user on the movie.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: String,
    pub movie_id: String,
    pub text: String,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user: CommentAuthor,
    pub is_subsequent_comment: bool,
}

/// Aggregate returned by `GET /api/comments/ratings/:movie_id`.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingResponse {
    pub average_rating: f64,
    pub number_of_ratings: usize,
}
