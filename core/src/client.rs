//! Stateless HTTP request builder and response parser for the article API.
//!
//! # Design
//! `DevToClient` holds only an immutable `ClientConfig` and carries no state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller, or `BlockingClient`, executes the round trip
//! in between, keeping this layer deterministic and free of I/O.

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::query::Arguments;
use crate::types::{Article, ArticleEnvelope, ArticleSummary, CreateArticle};

/// The article listing endpoints. All of them answer with a JSON array of
/// `ArticleSummary`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Listing {
    /// Published articles from everyone.
    Published,
    /// The authenticated user's published articles (`/articles/me`).
    Mine,
    MyPublished,
    MyUnpublished,
    /// Published and unpublished.
    MyAll,
}

impl Listing {
    pub fn path(&self) -> &'static str {
        match self {
            Listing::Published => "/articles",
            Listing::Mine => "/articles/me",
            Listing::MyPublished => "/articles/me/published",
            Listing::MyUnpublished => "/articles/me/unpublished",
            Listing::MyAll => "/articles/me/all",
        }
    }
}

/// Synchronous, stateless client for the article API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network.
#[derive(Debug, Clone)]
pub struct DevToClient {
    config: ClientConfig,
}

impl DevToClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    /// Client for `base_url` with no API key.
    pub fn with_base_url(base_url: &str) -> Self {
        Self::new(ClientConfig::new().with_base_url(base_url))
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn build_list(&self, listing: Listing, args: &Arguments) -> HttpRequest {
        self.request(HttpMethod::Get, &self.url(listing.path(), args), None)
    }

    pub fn build_articles(&self, args: &Arguments) -> HttpRequest {
        self.build_list(Listing::Published, args)
    }

    pub fn build_my_articles(&self, args: &Arguments) -> HttpRequest {
        self.build_list(Listing::Mine, args)
    }

    pub fn build_my_published_articles(&self, args: &Arguments) -> HttpRequest {
        self.build_list(Listing::MyPublished, args)
    }

    pub fn build_my_unpublished_articles(&self, args: &Arguments) -> HttpRequest {
        self.build_list(Listing::MyUnpublished, args)
    }

    pub fn build_all_my_articles(&self, args: &Arguments) -> HttpRequest {
        self.build_list(Listing::MyAll, args)
    }

    pub fn build_published_article(&self, id: u32) -> HttpRequest {
        let path = format!("/articles/{id}");
        self.request(HttpMethod::Get, &self.url(&path, &Arguments::default()), None)
    }

    pub fn build_create_article(&self, input: &CreateArticle) -> Result<HttpRequest, ApiError> {
        let body = encode_envelope(input)?;
        let url = self.url("/articles", &Arguments::default());
        Ok(self.request(HttpMethod::Post, &url, Some(body)))
    }

    pub fn build_update_article(
        &self,
        id: u32,
        input: &CreateArticle,
    ) -> Result<HttpRequest, ApiError> {
        let body = encode_envelope(input)?;
        let url = self.url(&format!("/articles/{id}"), &Arguments::default());
        Ok(self.request(HttpMethod::Put, &url, Some(body)))
    }

    /// Decode any listing response.
    pub fn parse_article_list(&self, response: HttpResponse) -> Result<Vec<ArticleSummary>, ApiError> {
        parse_json(response)
    }

    /// Decode a single-article response (get, create or update).
    pub fn parse_article(&self, response: HttpResponse) -> Result<Article, ApiError> {
        parse_json(response)
    }

    /// Empty arguments produce no `?` at all.
    fn url(&self, path: &str, args: &Arguments) -> String {
        let base = self.config.base_url();
        if args.is_empty() {
            format!("{base}{path}")
        } else {
            format!("{base}{path}?{}", args.to_query_string())
        }
    }

    fn request(&self, method: HttpMethod, url: &str, body: Option<String>) -> HttpRequest {
        let mut headers = vec![
            ("accept".to_string(), "application/json".to_string()),
            ("user-agent".to_string(), self.config.user_agent().to_string()),
        ];
        if let Some(key) = self.config.api_key() {
            headers.push(("api-key".to_string(), key.to_string()));
        }
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        HttpRequest {
            method,
            url: url.to_string(),
            headers,
            body,
        }
    }
}

fn encode_envelope(input: &CreateArticle) -> Result<String, ApiError> {
    serde_json::to_string(&ArticleEnvelope { article: input }).map_err(ApiError::Encode)
}

/// Map non-2xx statuses to `ApiError::Status`, then decode the body.
fn parse_json<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    if !response.is_success() {
        warn!(status = response.status, "article API returned an error status");
        return Err(ApiError::Status {
            status: response.status,
            body: response.body,
        });
    }
    serde_json::from_str(&response.body).map_err(ApiError::Decode)
}
