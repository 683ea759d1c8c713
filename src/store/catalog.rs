use super::memory::Collection;
use crate::catalog::types::{Movie, MovieInput};

/// Result of a tmdb-id-deduplicated write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Updated,
}

/// Durable storage and indexed retrieval of movie records.
pub struct CatalogStore {
    movies: Collection<Movie>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            movies: Collection::new(),
        }
    }

    pub fn insert(&self, input: MovieInput) -> Movie {
        let movie = input.into_movie(Collection::<Movie>::generate_id());
        self.movies.insert(movie.id.clone(), movie.clone());
        movie
    }

    /// Deduplicates by external catalog identifier: updates in place when the
    /// tmdb id is already known, inserts otherwise.
    pub fn upsert_by_tmdb_id(&self, input: MovieInput) -> UpsertOutcome {
        match self.find_by_tmdb_id(&input.tmdb_id) {
            Some(existing) => {
                let updated = input.into_movie(existing.id.clone());
                self.movies.insert(existing.id, updated);
                UpsertOutcome::Updated
            }
            None => {
                self.insert(input);
                UpsertOutcome::Inserted
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<Movie> {
        self.movies.get(id)
    }

    pub fn find_by_tmdb_id(&self, tmdb_id: &str) -> Option<Movie> {
        self.movies.find(|movie| movie.tmdb_id == tmdb_id)
    }

    pub fn all(&self) -> Vec<Movie> {
        self.movies.all()
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}
