use axum::{
    Router,
    extract::Extension,
    routing::{get, post, put},
};
use cinelog::auth::handlers::{
    handle_delete_me, handle_login, handle_me, handle_register, handle_update_me,
};
use cinelog::auth::service::AuthService;
use cinelog::catalog::handlers::{handle_list_movies, handle_movie_by_id};
use cinelog::config::{AppConfig, Cli};
use cinelog::feedback::handlers::{
    handle_comment_by_id, handle_comments_for_movie, handle_create_comment, handle_delete_comment,
    handle_ratings_for_movie, handle_update_comment,
};
use cinelog::importer::client::TmdbClient;
use cinelog::importer::handlers::{handle_import_popular, handle_search_and_import};
use cinelog::importer::service::import_popular;
use cinelog::store::{CatalogStore, FeedbackStore, UserStore};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Arc::new(AppConfig::from_env(&cli));

    tracing::info!("Starting cinelog on {}", config.bind_addr);

    // 1. Stores:
    let catalog = Arc::new(CatalogStore::new());
    let feedback = Arc::new(FeedbackStore::new());
    let users = Arc::new(UserStore::new());

    // 2. Services:
    let auth = Arc::new(AuthService::new(users.clone(), &config));
    let tmdb = Arc::new(TmdbClient::new(&config));

    // 3. Startup catalog import:
    if tmdb.is_configured() {
        let client = tmdb.clone();
        let store = catalog.clone();
        let cfg = config.clone();
        tokio::spawn(async move {
            match import_popular(&client, &store, &cfg.image_base_url, cfg.import_pages).await {
                Ok(count) => tracing::info!("startup import added {} movies", count),
                Err(e) => tracing::error!("startup import failed: {}", e),
            }
        });
    } else {
        tracing::warn!("TMDB_API_KEY is not set, starting with an empty catalog");
    }

    // 4. HTTP Router:
    let app = Router::new()
        .route("/api/auth/register", post(handle_register))
        .route("/api/auth/login", post(handle_login))
        .route(
            "/api/users/me",
            get(handle_me).put(handle_update_me).delete(handle_delete_me),
        )
        .route("/api/movies", get(handle_list_movies))
        .route("/api/movies/import-popular", get(handle_import_popular))
        .route("/api/movies/search-and-import", get(handle_search_and_import))
        .route("/api/movies/:id", get(handle_movie_by_id))
        .route("/api/comments", post(handle_create_comment))
        .route(
            "/api/comments/:id",
            put(handle_update_comment).delete(handle_delete_comment),
        )
        .route("/api/comments/ratings/:movie_id", get(handle_ratings_for_movie))
        .route("/api/comments/list/:movie_id", get(handle_comments_for_movie))
        .route("/api/comments/single/:id", get(handle_comment_by_id))
        .layer(Extension(config.clone()))
        .layer(Extension(catalog))
        .layer(Extension(feedback))
        .layer(Extension(users))
        .layer(Extension(auth))
        .layer(Extension(tmdb));

    // 5. Start HTTP server:
    tracing::info!("HTTP server listening on {}", config.bind_addr);
    tracing::info!("Press Ctrl+C to shutdown");

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
