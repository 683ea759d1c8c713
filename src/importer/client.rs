//! TMDB HTTP Client
//!
//! Outbound calls to the metadata provider, with bounded retry and upstream
//! status mapping. This is the only component expected to need timeout and
//! retry handling.

use super::types::TmdbPage;
use crate::config::AppConfig;
use crate::error::ApiError;
use anyhow::anyhow;
use axum::http::StatusCode;
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const RETRY_ATTEMPTS: usize = 3;

pub struct TmdbClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl TmdbClient {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: config.tmdb_api_key.clone(),
            base_url: config.tmdb_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub async fn popular_page(&self, page: usize) -> Result<TmdbPage, ApiError> {
        self.get_page("/movie/popular", &[("page", page.to_string())])
            .await
    }

    pub async fn search(&self, query: &str) -> Result<TmdbPage, ApiError> {
        self.get_page("/search/movie", &[("query", query.to_string())])
            .await
    }

    async fn get_page(&self, path: &str, params: &[(&str, String)]) -> Result<TmdbPage, ApiError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ApiError::Internal(anyhow!("server configuration error: TMDB API key is not set"))
        })?;

        let url = format!("{}{}", self.base_url, path);
        let mut query: Vec<(&str, String)> = vec![
            ("api_key", api_key.to_string()),
            ("language", "en-US".to_string()),
        ];
        query.extend(params.iter().cloned());

        let response = self.get_with_retry(&url, &query).await?;
        let status = response.status();

        if status.is_success() {
            return response
                .json::<TmdbPage>()
                .await
                .map_err(|e| ApiError::Internal(anyhow!("malformed TMDB response: {}", e)));
        }

        Err(map_upstream_status(status))
    }

    async fn get_with_retry(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<reqwest::Response, ApiError> {
        let mut delay_ms = 150u64;

        for attempt in 0..RETRY_ATTEMPTS {
            let response = self
                .http
                .get(url)
                .query(query)
                .timeout(REQUEST_TIMEOUT)
                .send()
                .await;

            match response {
                Ok(resp) => return Ok(resp),
                Err(e) => {
                    tracing::warn!("TMDB request failed (attempt {}): {}", attempt + 1, e);
                    if attempt + 1 == RETRY_ATTEMPTS {
                        return Err(ApiError::Upstream {
                            status: StatusCode::GATEWAY_TIMEOUT,
                            message: "Could not reach the TMDB server".to_string(),
                        });
                    }
                    let jitter = rand::random::<u64>() % 50;
                    tokio::time::sleep(Duration::from_millis(delay_ms + jitter)).await;
                    delay_ms = (delay_ms * 2).min(1200);
                }
            }
        }

        Err(ApiError::Upstream {
            status: StatusCode::GATEWAY_TIMEOUT,
            message: "Could not reach the TMDB server".to_string(),
        })
    }
}

fn map_upstream_status(status: reqwest::StatusCode) -> ApiError {
    match status.as_u16() {
        401 | 403 => ApiError::Upstream {
            status: StatusCode::UNAUTHORIZED,
            message: "TMDB rejected the configured API key".to_string(),
        },
        404 => ApiError::Upstream {
            status: StatusCode::NOT_FOUND,
            message: "TMDB resource not found".to_string(),
        },
        code if code >= 500 => ApiError::Upstream {
            status: StatusCode::BAD_GATEWAY,
            message: "TMDB server error, try again later".to_string(),
        },
        code => ApiError::Upstream {
            status: StatusCode::BAD_GATEWAY,
            message: format!("Unexpected TMDB response status {}", code),
        },
    }
}
