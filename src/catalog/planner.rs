//! Query Planner
//!
//! Translates a validated [`ListQuery`] into an ordered sequence of pipeline
//! stages over the catalog and feedback stores:
//!
//! 1. base filter (search / genres / release-date bounds)
//! 2. popularity branch (comment-count ranking with fallback backfill), or
//!    rating-aggregate branch (inner join on feedback, decile bucket filter)
//! 3. sort on the allow-listed key
//! 4. pagination (fixed cap for section views)
//! 5. inclusion-only projection
//!
//! Stages that add no selectivity are omitted. Any combination of well-formed
//! inputs produces a result list, never an error: store reads are infallible
//! here and malformed filter input was already degraded to "absent" during
//! parsing.

use super::query::{ListQuery, SectionView, SortKey, SortOrder};
use super::types::{Movie, MovieView};
use crate::feedback::aggregate::rating_summary;
use crate::store::{CatalogStore, FeedbackStore};
use chrono::{Days, NaiveDate, Utc};
use rand::Rng;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Width of the implied rating bucket when only a lower bound is supplied:
/// `minRating=3` selects averages in `[3.0, 3.9999]`.
const RATING_BUCKET_WIDTH: f64 = 0.9999;

/// Fallback backfill triggers only while the popularity result is this small.
const POPULAR_FALLBACK_THRESHOLD: usize = 5;

/// Executes the listing pipeline against "today".
pub fn list_movies(
    query: &ListQuery,
    catalog: &CatalogStore,
    feedback: &FeedbackStore,
) -> Vec<MovieView> {
    plan_at(query, catalog, feedback, Utc::now().date_naive())
}

/// Pipeline execution with an explicit clock, so section-view cutoffs are
/// deterministic under test.
pub fn plan_at(
    query: &ListQuery,
    catalog: &CatalogStore,
    feedback: &FeedbackStore,
    today: NaiveDate,
) -> Vec<MovieView> {
    let movies = base_filter(catalog.all(), query, today);

    if query.view == Some(SectionView::Popular) {
        return popular_branch(movies, query.page_size, catalog, feedback);
    }

    let mut ranked: Vec<(Movie, Option<f64>)> = if wants_rating_aggregate(query) {
        rating_branch(movies, query, feedback)
    } else {
        movies.into_iter().map(|m| (m, None)).collect()
    };

    sort_stage(&mut ranked, query.sort_by, query.order);

    let paged: Vec<(Movie, Option<f64>)> = if query.is_section() {
        ranked.into_iter().take(query.page_size).collect()
    } else {
        ranked
            .into_iter()
            .skip((query.page - 1) * query.page_size)
            .take(query.page_size)
            .collect()
    };

    paged
        .into_iter()
        .map(|(movie, average)| MovieView::project(movie, average, None))
        .collect()
}

/// Predicate over independent (non-aggregate) criteria. Applied before any
/// join so aggregate stages never touch movies already excluded.
fn base_filter(movies: Vec<Movie>, query: &ListQuery, today: NaiveDate) -> Vec<Movie> {
    let search = query.search.as_deref().map(str::to_lowercase);
    let genre_set: HashSet<i32> = query.genre_ids.iter().copied().collect();

    let mut min_date = query
        .start_year
        .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1));
    let mut max_date = query
        .end_year
        .and_then(|y| NaiveDate::from_ymd_opt(y, 12, 31));

    // Section cutoffs combine with any explicit year bounds via AND.
    match query.view {
        Some(SectionView::Latest) => {
            max_date = Some(max_date.map_or(today, |d| d.min(today)));
        }
        Some(SectionView::Upcoming) => {
            if let Some(tomorrow) = today.checked_add_days(Days::new(1)) {
                min_date = Some(min_date.map_or(tomorrow, |d| d.max(tomorrow)));
            }
        }
        _ => {}
    }

    movies
        .into_iter()
        .filter(|movie| {
            if let Some(needle) = &search {
                if !movie.title.to_lowercase().contains(needle) {
                    return false;
                }
            }
            if !genre_set.is_empty() && !movie.genres.iter().any(|g| genre_set.contains(&g.id)) {
                return false;
            }
            if let Some(min) = min_date {
                if movie.release_date < min {
                    return false;
                }
            }
            if let Some(max) = max_date {
                if movie.release_date > max {
                    return false;
                }
            }
            true
        })
        .collect()
}

/// Outer-joins each movie to its feedback, ranks by comment count, and caps at
/// the shelf size. When the commented catalog is still tiny the result is
/// backfilled from the full catalog (random offset, no duplicates) so the
/// "popular" shelf is never near-empty early in a catalog's life.
fn popular_branch(
    movies: Vec<Movie>,
    cap: usize,
    catalog: &CatalogStore,
    feedback: &FeedbackStore,
) -> Vec<MovieView> {
    let mut ranked: Vec<(Movie, usize)> = movies
        .into_iter()
        .map(|movie| {
            let count = feedback.count_for_movie(&movie.id);
            (movie, count)
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.1.cmp(&a.1)
            .then(cmp_f64(b.0.vote_average, a.0.vote_average))
            .then(b.0.release_date.cmp(&a.0.release_date))
    });
    ranked.truncate(cap);

    let mut views: Vec<MovieView> = ranked
        .into_iter()
        .map(|(movie, count)| MovieView::project(movie, None, Some(count)))
        .collect();

    if views.len() < cap && views.len() < POPULAR_FALLBACK_THRESHOLD {
        tracing::debug!(
            "popular shelf underfilled ({} of {}), backfilling from catalog",
            views.len(),
            cap
        );
        backfill_popular(&mut views, cap, catalog);
    }

    views
}

fn backfill_popular(views: &mut Vec<MovieView>, cap: usize, catalog: &CatalogStore) {
    let missing = cap - views.len();
    let chosen: HashSet<String> = views.iter().map(|v| v.id.clone()).collect();

    let mut candidates: Vec<Movie> = catalog
        .all()
        .into_iter()
        .filter(|movie| !chosen.contains(&movie.id))
        .collect();
    candidates.sort_by(|a, b| {
        b.release_date
            .cmp(&a.release_date)
            .then(cmp_f64(b.vote_average, a.vote_average))
    });

    // Random offset keeps the backfill set from always being the same. The
    // surplus read may race with concurrent imports; that is cosmetic.
    let surplus = candidates.len().saturating_sub(missing);
    let offset = if surplus == 0 {
        0
    } else {
        rand::thread_rng().gen_range(0..=surplus)
    };

    views.extend(
        candidates
            .into_iter()
            .skip(offset)
            .take(missing)
            .map(|movie| MovieView::project(movie, None, None)),
    );
}

fn wants_rating_aggregate(query: &ListQuery) -> bool {
    query.min_rating.is_some()
        || query.max_rating.is_some()
        || query.sort_by == SortKey::AverageCommentRating
}

/// Inner join against feedback: movies with zero comments are dropped, since
/// they can neither satisfy a rating filter nor be rank-ordered by rating.
fn rating_branch(
    movies: Vec<Movie>,
    query: &ListQuery,
    feedback: &FeedbackStore,
) -> Vec<(Movie, Option<f64>)> {
    let (lower, upper) = rating_bounds(query.min_rating, query.max_rating);

    movies
        .into_iter()
        .filter_map(|movie| {
            let summary = rating_summary(&movie.id, feedback);
            if summary.count == 0 {
                return None;
            }
            let average = summary.mean;
            if lower.is_some_and(|bound| average < bound) {
                return None;
            }
            if upper.is_some_and(|bound| average > bound) {
                return None;
            }
            Some((movie, Some(average)))
        })
        .collect()
}

/// Decile-bucket semantics: a lone lower bound implies an upper bound just
/// below the next unit; an explicit upper bound always wins.
fn rating_bounds(min: Option<f64>, max: Option<f64>) -> (Option<f64>, Option<f64>) {
    match (min, max) {
        (Some(lo), None) => (Some(lo), Some(lo + RATING_BUCKET_WIDTH)),
        (Some(lo), Some(hi)) => (Some(lo), Some(hi)),
        (None, Some(hi)) => (None, Some(hi)),
        (None, None) => (None, None),
    }
}

fn sort_stage(ranked: &mut [(Movie, Option<f64>)], key: SortKey, order: SortOrder) {
    ranked.sort_by(|a, b| {
        let ordering = match key {
            SortKey::ReleaseDate => a.0.release_date.cmp(&b.0.release_date),
            SortKey::VoteAverage => cmp_f64(a.0.vote_average, b.0.vote_average),
            SortKey::Title => a.0.title.cmp(&b.0.title),
            SortKey::AverageCommentRating => {
                cmp_f64(a.1.unwrap_or(0.0), b.1.unwrap_or(0.0))
            }
        };
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}
