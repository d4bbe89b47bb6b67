//! Blocking client core for a blogging platform's article API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). `BlockingClient` pairs that
//! with a `Transport` to run each operation as one request/response round
//! trip; `UreqTransport` is the default.
//!
//! # Design
//! - `DevToClient` is stateless; it holds only an immutable `ClientConfig`.
//! - Each operation is split into `build_*` (produces request) and
//!   `parse_*` (consumes response), so the I/O boundary is explicit.
//! - Listing and single-article responses are decoded into independent
//!   types; timestamps the server sends as `""` or `null` go through
//!   `NullableTimestamp`.
//! - Query arguments encode in ascending key order.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod blocking;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod query;
pub mod timestamp;
pub mod types;

pub use blocking::BlockingClient;
pub use client::{DevToClient, Listing};
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use query::{defaults, Arguments};
pub use timestamp::{LooseTimestamp, NullableTimestamp};
pub use types::{Article, ArticleEnvelope, ArticleSummary, CreateArticle, Organization, User};
