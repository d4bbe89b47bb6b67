//! Article DTOs for the blogging platform API.
//!
//! # Design
//! The listing endpoints and the single-article endpoint return overlapping
//! but different field sets (`tag_list` is an array in one and a
//! comma-joined string in the other, for instance). `ArticleSummary` and
//! `Article` are therefore separate types and neither is derived from the
//! other. Fields the server may omit are `#[serde(default)]`; the ones it
//! may also send as `null` are `Option` or go through `null_as_default`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::timestamp::{LooseTimestamp, NullableTimestamp};

/// An article as returned by the listing endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ArticleSummary {
    pub type_of: String,
    pub id: u32,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tag_list: Vec<String>,
    pub slug: String,
    pub path: String,
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub canonical_url: String,
    #[serde(default)]
    pub comments_count: u32,
    #[serde(default)]
    pub positive_reactions_count: u32,
    /// `""` while the article is unpublished.
    #[serde(default)]
    pub published_timestamp: NullableTimestamp,
    pub user: User,
    #[serde(default)]
    pub organization: Option<Organization>,
    #[serde(default)]
    pub published: bool,
    /// Only present on the `/articles/me*` endpoints.
    #[serde(default)]
    pub body_markdown: Option<String>,
}

/// A single article with its full body, as returned by `/articles/{id}` and
/// by the write endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Article {
    pub type_of: String,
    pub id: u32,
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub readable_publish_date: Option<String>,
    #[serde(default)]
    pub social_image: Option<String>,
    /// Comma-joined, e.g. `"go, help"`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tag_list: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    pub slug: String,
    pub path: String,
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub canonical_url: String,
    #[serde(default)]
    pub comments_count: u32,
    #[serde(default)]
    pub positive_reactions_count: u32,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub edited_at: LooseTimestamp,
    #[serde(default)]
    pub crossposted_at: LooseTimestamp,
    #[serde(default)]
    pub published_at: NullableTimestamp,
    #[serde(default)]
    pub last_comment_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body_html: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub body_markdown: String,
    pub user: User,
}

/// Author of an article.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub username: String,
    #[serde(default)]
    pub twitter_username: Option<String>,
    #[serde(default)]
    pub github_username: Option<String>,
    #[serde(default)]
    pub website_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_image_90: String,
}

/// Organization an article was published under.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Organization {
    pub name: String,
    pub username: String,
    pub slug: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_image: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub profile_image_90: String,
}

/// Payload for creating or updating an article.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateArticle {
    pub title: String,
    #[serde(default)]
    pub published: bool,
    pub body_markdown: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Left off the wire when unset or empty.
    #[serde(default, skip_serializing_if = "series_is_unset")]
    pub series: Option<String>,
    #[serde(default)]
    pub canonical_url: String,
}

/// `null` decodes like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

fn series_is_unset(series: &Option<String>) -> bool {
    series.as_deref().map_or(true, str::is_empty)
}

/// The `{"article": ...}` wrapper the write endpoints expect.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArticleEnvelope<A = CreateArticle> {
    pub article: A,
}
