//! Importer Module Tests
//!
//! Validates the mapping from provider records to catalog records and the
//! deduplicating batch upsert.
//!
//! ## Test Scopes
//! - **Mapping**: Skip rules, date sentinel, image prefixing, genre migration.
//! - **Batch upsert**: Insert counting across repeated imports.
//!
//! *Note: the HTTP client's retry behavior is exercised against a live
//! provider only; its status mapping is pure and covered here indirectly
//! through the service layer.*

#[cfg(test)]
mod tests {
    use crate::catalog::types::epoch_release_date;
    use crate::importer::service::map_tmdb_movie;
    use crate::importer::types::TmdbMovie;
    use crate::store::{CatalogStore, UpsertOutcome};

    const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

    fn raw_movie(id: i64, title: &str, release_date: &str) -> TmdbMovie {
        TmdbMovie {
            id: Some(id),
            title: Some(title.to_string()),
            overview: Some("An overview".to_string()),
            release_date: Some(release_date.to_string()),
            vote_average: Some(7.5),
            poster_path: Some("/poster.jpg".to_string()),
            backdrop_path: Some("/backdrop.jpg".to_string()),
            genre_ids: Some(vec![28, 878]),
            runtime: None,
        }
    }

    // ============================================================
    // MAPPING TESTS
    // ============================================================

    #[test]
    fn test_complete_record_maps_fully() {
        let input = map_tmdb_movie(&raw_movie(550, "Fight Club", "1999-10-15"), IMAGE_BASE).unwrap();

        assert_eq!(input.tmdb_id, "550");
        assert_eq!(input.title, "Fight Club");
        assert_eq!(input.release_date.to_string(), "1999-10-15");
        assert_eq!(input.vote_average, 7.5);
    }

    #[test]
    fn test_records_missing_essentials_are_skipped() {
        let no_title = TmdbMovie {
            title: None,
            ..raw_movie(1, "x", "2020-01-01")
        };
        assert!(map_tmdb_movie(&no_title, IMAGE_BASE).is_none());

        let empty_title = TmdbMovie {
            title: Some(String::new()),
            ..raw_movie(1, "x", "2020-01-01")
        };
        assert!(map_tmdb_movie(&empty_title, IMAGE_BASE).is_none());

        let no_id = TmdbMovie {
            id: None,
            ..raw_movie(1, "x", "2020-01-01")
        };
        assert!(map_tmdb_movie(&no_id, IMAGE_BASE).is_none());

        let no_date = TmdbMovie {
            release_date: None,
            ..raw_movie(1, "x", "2020-01-01")
        };
        assert!(map_tmdb_movie(&no_date, IMAGE_BASE).is_none());
    }

    #[test]
    fn test_unparseable_date_falls_back_to_sentinel() {
        let input = map_tmdb_movie(&raw_movie(1, "Odd", "15/10/1999"), IMAGE_BASE).unwrap();

        assert_eq!(input.release_date, epoch_release_date());
    }

    #[test]
    fn test_image_paths_get_the_base_url_prefix() {
        let input = map_tmdb_movie(&raw_movie(1, "Heat", "1995-12-15"), IMAGE_BASE).unwrap();
        assert_eq!(input.poster_path, format!("{}/poster.jpg", IMAGE_BASE));
        assert_eq!(input.backdrop_path, format!("{}/backdrop.jpg", IMAGE_BASE));

        let bare = TmdbMovie {
            poster_path: None,
            backdrop_path: Some(String::new()),
            ..raw_movie(1, "Heat", "1995-12-15")
        };
        let input = map_tmdb_movie(&bare, IMAGE_BASE).unwrap();
        assert_eq!(input.poster_path, "");
        assert_eq!(input.backdrop_path, "");
    }

    #[test]
    fn test_genre_ids_migrate_to_canonical_shape() {
        let input = map_tmdb_movie(&raw_movie(1, "Heat", "1995-12-15"), IMAGE_BASE).unwrap();

        assert_eq!(input.genres.len(), 2);
        assert_eq!(input.genres[0].id, 28);
        assert_eq!(input.genres[0].name, "Action");
        assert_eq!(input.genres[1].name, "Science Fiction");
    }

    #[test]
    fn test_unknown_genre_id_keeps_the_id() {
        let odd = TmdbMovie {
            genre_ids: Some(vec![424242]),
            ..raw_movie(1, "Heat", "1995-12-15")
        };
        let input = map_tmdb_movie(&odd, IMAGE_BASE).unwrap();

        assert_eq!(input.genres[0].id, 424242);
        assert_eq!(input.genres[0].name, "");
    }

    #[test]
    fn test_missing_overview_gets_a_placeholder() {
        let silent = TmdbMovie {
            overview: None,
            ..raw_movie(1, "Heat", "1995-12-15")
        };
        let input = map_tmdb_movie(&silent, IMAGE_BASE).unwrap();

        assert_eq!(input.overview, "No overview available.");
    }

    // ============================================================
    // BATCH UPSERT TESTS
    // ============================================================

    #[test]
    fn test_reimport_updates_instead_of_duplicating() {
        let catalog = CatalogStore::new();

        let first = map_tmdb_movie(&raw_movie(550, "Fight Club", "1999-10-15"), IMAGE_BASE).unwrap();
        assert_eq!(catalog.upsert_by_tmdb_id(first), UpsertOutcome::Inserted);

        let again = map_tmdb_movie(&raw_movie(550, "Fight Club", "1999-10-15"), IMAGE_BASE).unwrap();
        assert_eq!(catalog.upsert_by_tmdb_id(again), UpsertOutcome::Updated);

        assert_eq!(catalog.len(), 1);
    }
}
