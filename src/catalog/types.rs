//! Catalog Data Types
//!
//! Movie records as persisted in the catalog store, plus the projected view
//! returned by the listing endpoint.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentinel release date used when the provider supplies none.
pub fn epoch_release_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1900, 1, 1).expect("valid sentinel date")
}

/// Canonical genre shape: always `{id, name}`, never a bare id list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

impl Genre {
    /// Maps a TMDB genre id onto the canonical shape. Unknown ids are kept
    /// with an empty name so the filterable id is never lost.
    pub fn from_tmdb_id(id: i32) -> Self {
        let name = match id {
            28 => "Action",
            12 => "Adventure",
            16 => "Animation",
            35 => "Comedy",
            80 => "Crime",
            99 => "Documentary",
            18 => "Drama",
            10751 => "Family",
            14 => "Fantasy",
            36 => "History",
            27 => "Horror",
            10402 => "Music",
            9648 => "Mystery",
            10749 => "Romance",
            878 => "Science Fiction",
            10770 => "TV Movie",
            53 => "Thriller",
            10752 => "War",
            37 => "Western",
            _ => "",
        };

        Self {
            id,
            name: name.to_string(),
        }
    }
}

/// A movie record retrieved from the catalog store.
///
/// On the wire `tmdb_id` renders as `tmdbId`; the remaining fields keep the
/// provider's snake_case names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    #[serde(rename = "tmdbId")]
    pub tmdb_id: String,
    pub title: String,
    pub overview: String,
    pub release_date: NaiveDate,
    pub vote_average: f64,
    pub poster_path: String,
    pub backdrop_path: String,
    pub genres: Vec<Genre>,
    pub runtime: Option<u32>,
}

/// The fields provided when creating or updating a movie; the store assigns
/// the identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieInput {
    pub tmdb_id: String,
    pub title: String,
    pub overview: String,
    pub release_date: NaiveDate,
    pub vote_average: f64,
    pub poster_path: String,
    pub backdrop_path: String,
    pub genres: Vec<Genre>,
    pub runtime: Option<u32>,
}

impl MovieInput {
    pub fn into_movie(self, id: String) -> Movie {
        Movie {
            id,
            tmdb_id: self.tmdb_id,
            title: self.title,
            overview: self.overview,
            release_date: self.release_date,
            vote_average: self.vote_average,
            poster_path: self.poster_path,
            backdrop_path: self.backdrop_path,
            genres: self.genres,
            runtime: self.runtime,
        }
    }
}

/// Inclusion-only projection returned by the listing endpoint. The shape is
/// identical regardless of which planner branch executed; the derived fields
/// are present only when the corresponding branch computed them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieView {
    pub id: String,
    #[serde(rename = "tmdbId")]
    pub tmdb_id: String,
    pub title: String,
    pub overview: String,
    pub release_date: NaiveDate,
    pub vote_average: f64,
    pub poster_path: String,
    pub backdrop_path: String,
    pub genres: Vec<Genre>,
    pub runtime: Option<u32>,
    #[serde(rename = "averageCommentRating", skip_serializing_if = "Option::is_none")]
    pub average_comment_rating: Option<f64>,
    #[serde(rename = "commentCount", skip_serializing_if = "Option::is_none")]
    pub comment_count: Option<usize>,
}

impl MovieView {
    pub fn project(movie: Movie, average: Option<f64>, comments: Option<usize>) -> Self {
        Self {
            id: movie.id,
            tmdb_id: movie.tmdb_id,
            title: movie.title,
            overview: movie.overview,
            release_date: movie.release_date,
            vote_average: movie.vote_average,
            poster_path: movie.poster_path,
            backdrop_path: movie.backdrop_path,
            genres: movie.genres,
            runtime: movie.runtime,
            average_comment_rating: average,
            comment_count: comments,
        }
    }
}
