//! Rating Aggregation
//!
//! The single shared routine computing a movie's average comment rating. Used
//! by the standalone ratings endpoint (rounded to one decimal) and by the
//! query planner's rating-aggregate branch (raw mean).

use crate::store::FeedbackStore;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    /// Mean of all ratings referencing the movie; 0.0 when there are none.
    pub mean: f64,
    pub count: usize,
}

impl RatingSummary {
    pub fn rounded_mean(&self) -> f64 {
        (self.mean * 10.0).round() / 10.0
    }
}

/// Aggregates all feedback for a movie. No feedback is a valid outcome, not
/// an error: the summary is `{0, 0}`.
pub fn rating_summary(movie_id: &str, feedback: &FeedbackStore) -> RatingSummary {
    let comments = feedback.for_movie(movie_id);
    if comments.is_empty() {
        return RatingSummary { mean: 0.0, count: 0 };
    }

    let total: f64 = comments.iter().map(|c| c.rating).sum();
    RatingSummary {
        mean: total / comments.len() as f64,
        count: comments.len(),
    }
}
