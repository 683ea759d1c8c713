//! Feedback Module Tests
//!
//! Validates comment lifecycle policy and the shared rating aggregation.
//!
//! ## Test Scopes
//! - **Aggregation**: Empty summaries, means, and display rounding.
//! - **Validation**: Rating bounds and comment length limits.
//! - **Lifecycle**: Create/update/delete with ownership enforcement.
//! - **Views**: Author resolution and repeat-comment flagging.

#[cfg(test)]
mod tests {
    use crate::auth::types::User;
    use crate::config::AppConfig;
    use crate::error::ApiError;
    use crate::feedback::aggregate::rating_summary;
    use crate::feedback::service;
    use crate::feedback::types::{Comment, CreateCommentRequest, UpdateCommentRequest};
    use crate::store::{CatalogStore, FeedbackStore, UserStore};
    use chrono::{Duration, NaiveDate, Utc};

    fn seed_movie(catalog: &CatalogStore) -> String {
        let movie = catalog.insert(crate::catalog::types::MovieInput {
            tmdb_id: "tmdb-1".to_string(),
            title: "Heat".to_string(),
            overview: "An overview".to_string(),
            release_date: NaiveDate::from_ymd_opt(1995, 12, 15).unwrap(),
            vote_average: 8.3,
            poster_path: String::new(),
            backdrop_path: String::new(),
            genres: vec![],
            runtime: Some(170),
        });
        movie.id
    }

    fn seed_user(users: &UserStore, id: &str, username: &str) {
        users.insert(User {
            id: id.to_string(),
            email: format!("{}@example.com", username),
            username: username.to_string(),
            password_hash: "hash".to_string(),
            is_critic: false,
        });
    }

    fn raw_comment(id: &str, user_id: &str, movie_id: &str, rating: f64, age_secs: i64) -> Comment {
        let at = Utc::now() - Duration::seconds(age_secs);
        Comment {
            id: id.to_string(),
            user_id: user_id.to_string(),
            movie_id: movie_id.to_string(),
            text: "fine".to_string(),
            rating,
            created_at: at,
            updated_at: at,
        }
    }

    fn create_req(movie_id: &str, text: &str, rating: f64) -> CreateCommentRequest {
        CreateCommentRequest {
            movie_id: movie_id.to_string(),
            text: text.to_string(),
            rating,
        }
    }

    // ============================================================
    // AGGREGATION TESTS
    // ============================================================

    #[test]
    fn test_summary_of_no_feedback_is_zero() {
        let feedback = FeedbackStore::new();
        let summary = rating_summary("m1", &feedback);

        assert_eq!(summary.mean, 0.0);
        assert_eq!(summary.count, 0);
    }

    #[test]
    fn test_summary_averages_all_ratings() {
        let feedback = FeedbackStore::new();
        feedback.insert(raw_comment("c1", "u1", "m1", 2.0, 3));
        feedback.insert(raw_comment("c2", "u2", "m1", 5.0, 2));
        feedback.insert(raw_comment("c3", "u3", "m2", 1.0, 1));

        let summary = rating_summary("m1", &feedback);
        assert_eq!(summary.mean, 3.5);
        assert_eq!(summary.count, 2);
    }

    #[test]
    fn test_rounded_mean_keeps_one_decimal() {
        let feedback = FeedbackStore::new();
        feedback.insert(raw_comment("c1", "u1", "m1", 4.0, 3));
        feedback.insert(raw_comment("c2", "u2", "m1", 4.0, 2));
        feedback.insert(raw_comment("c3", "u3", "m1", 5.0, 1));

        let summary = rating_summary("m1", &feedback);
        assert_eq!(summary.rounded_mean(), 4.3);
    }

    // ============================================================
    // VALIDATION TESTS
    // ============================================================

    #[test]
    fn test_rating_below_minimum_is_rejected() {
        let catalog = CatalogStore::new();
        let feedback = FeedbackStore::new();
        let config = AppConfig::for_tests();
        let movie_id = seed_movie(&catalog);

        let result =
            service::create_comment(&feedback, &catalog, &config, "u1", create_req(&movie_id, "ok", 0.4));

        assert!(matches!(result, Err(ApiError::Validation(_))));
        assert!(feedback.is_empty());
    }

    #[test]
    fn test_rating_above_maximum_is_rejected() {
        let catalog = CatalogStore::new();
        let feedback = FeedbackStore::new();
        let config = AppConfig::for_tests();
        let movie_id = seed_movie(&catalog);

        let result =
            service::create_comment(&feedback, &catalog, &config, "u1", create_req(&movie_id, "ok", 5.5));

        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_overlong_text_is_rejected() {
        let catalog = CatalogStore::new();
        let feedback = FeedbackStore::new();
        let config = AppConfig::for_tests();
        let movie_id = seed_movie(&catalog);
        let text = "x".repeat(501);

        let result =
            service::create_comment(&feedback, &catalog, &config, "u1", create_req(&movie_id, &text, 3.0));

        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_comment_on_unknown_movie_is_not_found() {
        let catalog = CatalogStore::new();
        let feedback = FeedbackStore::new();
        let config = AppConfig::for_tests();

        let result =
            service::create_comment(&feedback, &catalog, &config, "u1", create_req("nope", "ok", 3.0));

        assert!(matches!(result, Err(ApiError::NotFound(_))));
    }

    // ============================================================
    // LIFECYCLE TESTS
    // ============================================================

    #[test]
    fn test_create_then_fetch_round_trip() {
        let catalog = CatalogStore::new();
        let feedback = FeedbackStore::new();
        let users = UserStore::new();
        let config = AppConfig::for_tests();
        let movie_id = seed_movie(&catalog);
        seed_user(&users, "u1", "ana");

        let comment = service::create_comment(
            &feedback,
            &catalog,
            &config,
            "u1",
            create_req(&movie_id, "Loved the pacing", 4.5),
        )
        .unwrap();

        let view = service::comment_by_id(&feedback, &users, &comment.id).unwrap();
        assert_eq!(view.text, "Loved the pacing");
        assert_eq!(view.rating, 4.5);
        assert_eq!(view.user.username, "ana");
        assert!(!view.is_subsequent_comment);
    }

    #[test]
    fn test_update_requires_some_change() {
        let feedback = FeedbackStore::new();
        let config = AppConfig::for_tests();
        feedback.insert(raw_comment("c1", "u1", "m1", 3.0, 0));

        let result = service::update_comment(
            &feedback,
            &config,
            "u1",
            "c1",
            UpdateCommentRequest { text: None, rating: None },
        );

        assert!(matches!(result, Err(ApiError::Validation(_))));
    }

    #[test]
    fn test_update_by_non_owner_is_forbidden() {
        let feedback = FeedbackStore::new();
        let config = AppConfig::for_tests();
        feedback.insert(raw_comment("c1", "u1", "m1", 3.0, 0));

        let result = service::update_comment(
            &feedback,
            &config,
            "u2",
            "c1",
            UpdateCommentRequest {
                text: Some("hijacked".to_string()),
                rating: None,
            },
        );

        assert!(matches!(result, Err(ApiError::Forbidden(_))));
        assert_eq!(feedback.get("c1").unwrap().text, "fine");
    }

    #[test]
    fn test_update_applies_partial_changes() {
        let feedback = FeedbackStore::new();
        let config = AppConfig::for_tests();
        feedback.insert(raw_comment("c1", "u1", "m1", 3.0, 60));

        let updated = service::update_comment(
            &feedback,
            &config,
            "u1",
            "c1",
            UpdateCommentRequest {
                text: None,
                rating: Some(4.5),
            },
        )
        .unwrap();

        assert_eq!(updated.text, "fine", "Absent fields keep their value");
        assert_eq!(updated.rating, 4.5);
        assert!(updated.updated_at > updated.created_at);
    }

    #[test]
    fn test_delete_by_non_owner_is_forbidden() {
        let feedback = FeedbackStore::new();
        feedback.insert(raw_comment("c1", "u1", "m1", 3.0, 0));

        let result = service::delete_comment(&feedback, "u2", "c1");

        assert!(matches!(result, Err(ApiError::Forbidden(_))));
        assert!(feedback.get("c1").is_some());
    }

    #[test]
    fn test_delete_removes_the_comment() {
        let feedback = FeedbackStore::new();
        feedback.insert(raw_comment("c1", "u1", "m1", 3.0, 0));

        service::delete_comment(&feedback, "u1", "c1").unwrap();

        assert!(feedback.get("c1").is_none());
        assert!(matches!(
            service::delete_comment(&feedback, "u1", "c1"),
            Err(ApiError::NotFound(_))
        ));
    }

    // ============================================================
    // VIEW TESTS
    // ============================================================

    #[test]
    fn test_repeat_comments_are_flagged() {
        let feedback = FeedbackStore::new();
        let users = UserStore::new();
        seed_user(&users, "u1", "ana");
        seed_user(&users, "u2", "bob");
        feedback.insert(raw_comment("c1", "u1", "m1", 3.0, 30));
        feedback.insert(raw_comment("c2", "u2", "m1", 4.0, 20));
        feedback.insert(raw_comment("c3", "u1", "m1", 5.0, 10));

        let views = service::comments_for_movie(&feedback, &users, "m1");

        assert_eq!(views.len(), 3);
        assert!(!views[0].is_subsequent_comment);
        assert!(!views[1].is_subsequent_comment, "First comment by another user is not a repeat");
        assert!(views[2].is_subsequent_comment, "Second comment by the same user is a repeat");
    }

    #[test]
    fn test_deleted_author_renders_placeholder() {
        let feedback = FeedbackStore::new();
        let users = UserStore::new();
        feedback.insert(raw_comment("c1", "gone", "m1", 3.0, 0));

        let view = service::comment_by_id(&feedback, &users, "c1").unwrap();

        assert_eq!(view.user.username, "[deleted]");
    }
}
