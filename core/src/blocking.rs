//! Blocking client that runs each article operation end to end.
//!
//! Every method is one request and one response: build with `DevToClient`,
//! execute with the `Transport`, parse with `DevToClient`. No retries.

use crate::client::{DevToClient, Listing};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport, UreqTransport};
use crate::query::Arguments;
use crate::types::{Article, ArticleSummary, CreateArticle};

/// Article API client that performs the HTTP round trip itself.
///
/// Holds no per-call state, so a shared reference can be used from several
/// threads when the transport allows it.
#[derive(Debug, Clone)]
pub struct BlockingClient<T = UreqTransport> {
    inner: DevToClient,
    transport: T,
}

impl BlockingClient<UreqTransport> {
    /// Client backed by a `ureq` agent using the configured timeout.
    pub fn new(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout());
        Self::with_transport(config, transport)
    }

    /// Configuration taken from `DEVTO_API_URL` and `DEVTO_API_KEY`.
    pub fn from_env() -> Self {
        Self::new(ClientConfig::from_env())
    }
}

impl<T: Transport> BlockingClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            inner: DevToClient::new(config),
            transport,
        }
    }

    pub fn requests(&self) -> &DevToClient {
        &self.inner
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// A published article with its full body.
    pub fn published_article(&self, id: u32) -> Result<Article, ApiError> {
        let request = self.inner.build_published_article(id);
        self.inner.parse_article(self.send(&request)?)
    }

    pub fn list(&self, listing: Listing, args: &Arguments) -> Result<Vec<ArticleSummary>, ApiError> {
        let request = self.inner.build_list(listing, args);
        self.inner.parse_article_list(self.send(&request)?)
    }

    /// Published articles from everyone, filtered by `args`.
    pub fn articles(&self, args: &Arguments) -> Result<Vec<ArticleSummary>, ApiError> {
        self.list(Listing::Published, args)
    }

    pub fn my_articles(&self, args: &Arguments) -> Result<Vec<ArticleSummary>, ApiError> {
        self.list(Listing::Mine, args)
    }

    pub fn my_published_articles(&self, args: &Arguments) -> Result<Vec<ArticleSummary>, ApiError> {
        self.list(Listing::MyPublished, args)
    }

    pub fn my_unpublished_articles(
        &self,
        args: &Arguments,
    ) -> Result<Vec<ArticleSummary>, ApiError> {
        self.list(Listing::MyUnpublished, args)
    }

    pub fn all_my_articles(&self, args: &Arguments) -> Result<Vec<ArticleSummary>, ApiError> {
        self.list(Listing::MyAll, args)
    }

    pub fn create_article(&self, input: &CreateArticle) -> Result<Article, ApiError> {
        let request = self.inner.build_create_article(input)?;
        self.inner.parse_article(self.send(&request)?)
    }

    pub fn update_article(&self, id: u32, input: &CreateArticle) -> Result<Article, ApiError> {
        let request = self.inner.build_update_article(id, input)?;
        self.inner.parse_article(self.send(&request)?)
    }

    fn send(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        self.transport.execute(request)
    }
}
