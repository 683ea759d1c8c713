//! Listing Query Model
//!
//! Raw query parameters arrive untyped and untrusted. [`ListParams`] captures
//! them as optional strings; [`ListQuery`] is the validated form the planner
//! consumes, built once per request. Numeric parameters that fail to parse are
//! treated as absent, never as an error.

use serde::Deserialize;

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Raw query string of `GET /api/movies`, exactly as the client sent it.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub search: Option<String>,
    #[serde(rename = "genreId")]
    pub genre_id: Option<String>,
    #[serde(rename = "minRating")]
    pub min_rating: Option<String>,
    #[serde(rename = "maxRating")]
    pub max_rating: Option<String>,
    #[serde(rename = "startYear")]
    pub start_year: Option<String>,
    #[serde(rename = "endYear")]
    pub end_year: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
    pub order: Option<String>,
    #[serde(rename = "type")]
    pub view: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

/// Bounded, non-paginated listings used for home-screen shelves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionView {
    Latest,
    Popular,
    Upcoming,
}

impl SectionView {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "latest" => Some(Self::Latest),
            "popular" => Some(Self::Popular),
            "upcoming" => Some(Self::Upcoming),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    ReleaseDate,
    VoteAverage,
    Title,
    AverageCommentRating,
}

impl SortKey {
    fn parse(raw: &str) -> Option<Self> {
        match raw {
            "release_date" => Some(Self::ReleaseDate),
            "vote_average" => Some(Self::VoteAverage),
            "title" => Some(Self::Title),
            "averageCommentRating" => Some(Self::AverageCommentRating),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Validated view request with enumerated defaults.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub search: Option<String>,
    pub genre_ids: Vec<i32>,
    pub min_rating: Option<f64>,
    pub max_rating: Option<f64>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
    pub sort_by: SortKey,
    pub order: SortOrder,
    pub view: Option<SectionView>,
    pub page: usize,
    pub page_size: usize,
}

impl ListQuery {
    pub fn from_params(params: ListParams) -> Self {
        let search = params
            .search
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        // Comma-separated genre ids; unparseable entries are dropped.
        let genre_ids = params
            .genre_id
            .as_deref()
            .map(|raw| {
                raw.split(',')
                    .filter_map(|part| part.trim().parse::<i32>().ok())
                    .collect()
            })
            .unwrap_or_default();

        // A valid sortBy honors the requested order; an unknown sortBy falls
        // back to release_date descending, ignoring the order parameter.
        let requested_order = match params.order.as_deref() {
            Some("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        };
        let (sort_by, order) = match params.sort_by.as_deref() {
            None => (SortKey::ReleaseDate, requested_order),
            Some(raw) => match SortKey::parse(raw) {
                Some(key) => (key, requested_order),
                None => (SortKey::ReleaseDate, SortOrder::Desc),
            },
        };

        Self {
            search,
            genre_ids,
            min_rating: parse_finite(params.min_rating.as_deref()),
            max_rating: parse_finite(params.max_rating.as_deref()),
            start_year: parse_opt(params.start_year.as_deref()),
            end_year: parse_opt(params.end_year.as_deref()),
            sort_by,
            order,
            view: params.view.as_deref().and_then(SectionView::parse),
            page: parse_opt(params.page.as_deref())
                .filter(|&p: &usize| p >= 1)
                .unwrap_or(DEFAULT_PAGE),
            page_size: parse_opt(params.page_size.as_deref())
                .filter(|&p: &usize| p >= 1)
                .unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }

    /// Latest, popular, and upcoming render bounded shelves, not paged lists.
    pub fn is_section(&self) -> bool {
        self.view.is_some()
    }
}

fn parse_opt<T: std::str::FromStr>(raw: Option<&str>) -> Option<T> {
    raw.and_then(|s| s.trim().parse().ok())
}

fn parse_finite(raw: Option<&str>) -> Option<f64> {
    parse_opt::<f64>(raw).filter(|v| v.is_finite())
}
