use super::memory::Collection;
use crate::feedback::types::Comment;

/// Durable storage of user feedback, scanned per movie for aggregation.
pub struct FeedbackStore {
    comments: Collection<Comment>,
}

impl FeedbackStore {
    pub fn new() -> Self {
        Self {
            comments: Collection::new(),
        }
    }

    pub fn insert(&self, comment: Comment) {
        self.comments.insert(comment.id.clone(), comment);
    }

    pub fn get(&self, id: &str) -> Option<Comment> {
        self.comments.get(id)
    }

    pub fn put(&self, comment: Comment) {
        self.comments.insert(comment.id.clone(), comment);
    }

    pub fn remove(&self, id: &str) -> Option<Comment> {
        self.comments.remove(id)
    }

    /// All comments for a movie, oldest first.
    pub fn for_movie(&self, movie_id: &str) -> Vec<Comment> {
        let mut comments = self.comments.filter(|c| c.movie_id == movie_id);
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        comments
    }

    pub fn count_for_movie(&self, movie_id: &str) -> usize {
        self.comments
            .filter(|c| c.movie_id == movie_id)
            .len()
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }
}

impl Default for FeedbackStore {
    fn default() -> Self {
        Self::new()
    }
}
