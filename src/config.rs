//! Process Configuration
//!
//! All tunables live in a single [`AppConfig`] value built once at startup and
//! handed into component constructors. Nothing reads the environment after
//! startup, so tests can substitute their own configuration freely.

use clap::Parser;
use std::net::SocketAddr;

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

#[derive(Parser, Debug)]
#[command(name = "cinelog", about = "Movie catalog REST backend")]
pub struct Cli {
    /// Address the HTTP server binds to.
    #[arg(long, default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    /// TMDB API key; importer endpoints reject requests when absent.
    pub tmdb_api_key: Option<String>,
    pub tmdb_base_url: String,
    pub image_base_url: String,
    pub jwt_secret: String,
    pub token_ttl_secs: i64,
    /// Comment rating bounds, inclusive.
    pub rating_min: f64,
    pub rating_max: f64,
    pub bcrypt_cost: u32,
    /// Pages of popular movies imported at startup.
    pub import_pages: usize,
}

impl AppConfig {
    /// Builds the configuration from CLI arguments and the environment.
    /// `.env` files are honored via dotenvy, loaded by the caller.
    pub fn from_env(cli: &Cli) -> Self {
        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET is not set, using an insecure development secret");
                "dev-secret-change-me".to_string()
            }
        };

        Self {
            bind_addr: cli.bind,
            tmdb_api_key: std::env::var("TMDB_API_KEY").ok().filter(|k| !k.is_empty()),
            tmdb_base_url: std::env::var("TMDB_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_TMDB_BASE_URL.to_string()),
            image_base_url: std::env::var("TMDB_IMAGE_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_IMAGE_BASE_URL.to_string()),
            jwt_secret,
            token_ttl_secs: env_parse("TOKEN_TTL_SECS", 3600),
            rating_min: env_parse("COMMENT_RATING_MIN", 0.5),
            rating_max: env_parse("COMMENT_RATING_MAX", 5.0),
            bcrypt_cost: env_parse("BCRYPT_COST", 10),
            import_pages: env_parse("IMPORT_PAGES", 5),
        }
    }

    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            tmdb_api_key: None,
            tmdb_base_url: DEFAULT_TMDB_BASE_URL.to_string(),
            image_base_url: DEFAULT_IMAGE_BASE_URL.to_string(),
            jwt_secret: "test-secret".to_string(),
            token_ttl_secs: 3600,
            rating_min: 0.5,
            rating_max: 5.0,
            // Low cost keeps hashing fast in tests.
            bcrypt_cost: 4,
            import_pages: 1,
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(default)
}
