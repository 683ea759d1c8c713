//! Store Module Tests
//!
//! Validates the generic collection mechanics and the typed store operations
//! built on top of it.
//!
//! ## Test Scopes
//! - **Collection**: Insert/get/remove, id generation, predicate scans.
//! - **CatalogStore**: Id assignment and tmdb-id-deduplicated upserts.
//! - **FeedbackStore**: Per-movie scans and ordering.
//! - **UserStore**: Uniqueness lookups by email and username.

#[cfg(test)]
mod tests {
    use crate::auth::types::User;
    use crate::catalog::types::{Genre, MovieInput};
    use crate::feedback::types::Comment;
    use crate::store::{CatalogStore, Collection, FeedbackStore, UpsertOutcome, UserStore};
    use chrono::{Duration, NaiveDate, Utc};

    fn movie_input(tmdb_id: &str, title: &str) -> MovieInput {
        MovieInput {
            tmdb_id: tmdb_id.to_string(),
            title: title.to_string(),
            overview: "An overview".to_string(),
            release_date: NaiveDate::from_ymd_opt(2020, 6, 1).unwrap(),
            vote_average: 7.2,
            poster_path: String::new(),
            backdrop_path: String::new(),
            genres: vec![Genre::from_tmdb_id(18)],
            runtime: Some(120),
        }
    }

    fn comment(id: &str, user_id: &str, movie_id: &str, age_secs: i64) -> Comment {
        let at = Utc::now() - Duration::seconds(age_secs);
        Comment {
            id: id.to_string(),
            user_id: user_id.to_string(),
            movie_id: movie_id.to_string(),
            text: "fine".to_string(),
            rating: 4.0,
            created_at: at,
            updated_at: at,
        }
    }

    // ============================================================
    // COLLECTION TESTS
    // ============================================================

    #[test]
    fn test_collection_insert_and_get() {
        let collection: Collection<String> = Collection::new();
        collection.insert("a".to_string(), "alpha".to_string());

        assert_eq!(collection.get("a"), Some("alpha".to_string()));
        assert_eq!(collection.get("missing"), None);
        assert_eq!(collection.len(), 1);
    }

    #[test]
    fn test_collection_remove_returns_value() {
        let collection: Collection<u32> = Collection::new();
        collection.insert("k".to_string(), 7);

        assert_eq!(collection.remove("k"), Some(7));
        assert!(collection.is_empty());
        assert_eq!(collection.remove("k"), None);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Collection::<u32>::generate_id();
        let b = Collection::<u32>::generate_id();
        assert_ne!(a, b, "Two generated ids should never collide");
    }

    #[test]
    fn test_collection_find_and_filter() {
        let collection: Collection<u32> = Collection::new();
        for i in 0..10 {
            collection.insert(i.to_string(), i);
        }

        assert_eq!(collection.find(|v| *v == 4), Some(4));
        assert_eq!(collection.find(|v| *v == 99), None);
        assert_eq!(collection.filter(|v| *v % 2 == 0).len(), 5);
    }

    // ============================================================
    // CATALOG STORE TESTS
    // ============================================================

    #[test]
    fn test_catalog_insert_assigns_id() {
        let catalog = CatalogStore::new();
        let movie = catalog.insert(movie_input("100", "Heat"));

        assert!(!movie.id.is_empty());
        assert_eq!(catalog.get(&movie.id).unwrap().title, "Heat");
    }

    #[test]
    fn test_upsert_deduplicates_by_tmdb_id() {
        let catalog = CatalogStore::new();

        let first = catalog.upsert_by_tmdb_id(movie_input("100", "Heat"));
        assert_eq!(first, UpsertOutcome::Inserted);

        let second = catalog.upsert_by_tmdb_id(movie_input("100", "Heat (Remastered)"));
        assert_eq!(second, UpsertOutcome::Updated);
        assert_eq!(catalog.len(), 1, "Re-importing a known movie must not duplicate it");

        let stored = catalog.find_by_tmdb_id("100").unwrap();
        assert_eq!(stored.title, "Heat (Remastered)");
    }

    #[test]
    fn test_upsert_keeps_existing_id() {
        let catalog = CatalogStore::new();
        let original = catalog.insert(movie_input("100", "Heat"));

        catalog.upsert_by_tmdb_id(movie_input("100", "Heat (Remastered)"));

        let stored = catalog.find_by_tmdb_id("100").unwrap();
        assert_eq!(stored.id, original.id, "Updates must keep the original catalog id");
    }

    // ============================================================
    // FEEDBACK STORE TESTS
    // ============================================================

    #[test]
    fn test_for_movie_returns_oldest_first() {
        let feedback = FeedbackStore::new();
        feedback.insert(comment("c1", "u1", "m1", 10));
        feedback.insert(comment("c2", "u2", "m1", 30));
        feedback.insert(comment("c3", "u1", "m2", 20));

        let for_m1 = feedback.for_movie("m1");
        assert_eq!(for_m1.len(), 2);
        assert_eq!(for_m1[0].id, "c2", "Oldest comment should come first");
        assert_eq!(for_m1[1].id, "c1");
    }

    #[test]
    fn test_count_for_movie() {
        let feedback = FeedbackStore::new();
        feedback.insert(comment("c1", "u1", "m1", 1));
        feedback.insert(comment("c2", "u2", "m1", 2));

        assert_eq!(feedback.count_for_movie("m1"), 2);
        assert_eq!(feedback.count_for_movie("m2"), 0);
    }

    // ============================================================
    // USER STORE TESTS
    // ============================================================

    #[test]
    fn test_user_lookups_by_email_and_username() {
        let users = UserStore::new();
        users.insert(User {
            id: "u1".to_string(),
            email: "ana@example.com".to_string(),
            username: "ana".to_string(),
            password_hash: "hash".to_string(),
            is_critic: false,
        });

        assert_eq!(users.find_by_email("ana@example.com").unwrap().id, "u1");
        assert_eq!(users.find_by_username("ana").unwrap().id, "u1");
        assert!(users.find_by_email("bob@example.com").is_none());
        assert!(users.find_by_username("bob").is_none());
    }
}
