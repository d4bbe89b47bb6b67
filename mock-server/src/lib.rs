use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

/// Key the server accepts in the `api-key` header.
pub const API_KEY: &str = "myApiKey";

const DEFAULT_PER_PAGE: usize = 30;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewArticle {
    pub title: String,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub body_markdown: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub series: Option<String>,
    #[serde(default)]
    pub canonical_url: String,
}

#[derive(Deserialize)]
pub struct Envelope {
    pub article: NewArticle,
}

#[derive(Clone, Debug)]
pub struct StoredArticle {
    pub id: u32,
    pub input: NewArticle,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserJson {
    pub name: String,
    pub username: String,
    pub twitter_username: Option<String>,
    pub github_username: Option<String>,
    pub website_url: Option<String>,
    pub profile_image: String,
    pub profile_image_90: String,
}

/// Listing shape. `published_timestamp` is `""` for drafts, as upstream does.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SummaryJson {
    pub type_of: String,
    pub id: u32,
    pub title: String,
    pub description: String,
    pub cover_image: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub tag_list: Vec<String>,
    pub slug: String,
    pub path: String,
    pub url: String,
    pub canonical_url: String,
    pub comments_count: u32,
    pub positive_reactions_count: u32,
    pub published_timestamp: String,
    pub published: bool,
    pub user: UserJson,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body_markdown: Option<String>,
}

/// Single-article shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetailJson {
    pub type_of: String,
    pub id: u32,
    pub title: String,
    pub description: String,
    pub cover_image: Option<String>,
    pub readable_publish_date: Option<String>,
    pub social_image: String,
    pub tag_list: String,
    pub tags: Vec<String>,
    pub slug: String,
    pub path: String,
    pub url: String,
    pub canonical_url: String,
    pub comments_count: u32,
    pub positive_reactions_count: u32,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
    pub crossposted_at: Option<DateTime<Utc>>,
    pub published_at: Option<DateTime<Utc>>,
    pub last_comment_at: DateTime<Utc>,
    pub body_html: String,
    pub body_markdown: String,
    pub user: UserJson,
}

pub struct Store {
    next_id: u32,
    articles: HashMap<u32, StoredArticle>,
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store {
        next_id: 1000,
        articles: HashMap::new(),
    }));
    Router::new()
        .route("/articles", get(list_published).post(create_article))
        .route("/articles/me", get(list_mine))
        .route("/articles/me/published", get(list_mine))
        .route("/articles/me/unpublished", get(list_my_unpublished))
        .route("/articles/me/all", get(list_my_all))
        .route("/articles/{id}", get(get_article).put(update_article))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock article API listening");
    }
    axum::serve(listener, app()).await
}

fn author() -> UserJson {
    UserJson {
        name: "Mock Author".to_string(),
        username: "mockauthor".to_string(),
        twitter_username: None,
        github_username: Some("mockauthor".to_string()),
        website_url: None,
        profile_image: "https://example.com/u/mockauthor.png".to_string(),
        profile_image_90: "https://example.com/u/mockauthor_90.png".to_string(),
    }
}

fn slugify(title: &str) -> String {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

impl StoredArticle {
    fn slug(&self) -> String {
        let base = slugify(&self.input.title);
        if self.published_at.is_some() {
            format!("{base}-{}", self.id)
        } else {
            format!("{base}-temp-slug-{}", self.id)
        }
    }

    fn path(&self) -> String {
        format!("/{}/{}", author().username, self.slug())
    }

    fn url(&self) -> String {
        format!("https://dev.to{}", self.path())
    }

    fn canonical_url(&self) -> String {
        if self.input.canonical_url.is_empty() {
            self.url()
        } else {
            self.input.canonical_url.clone()
        }
    }

    fn description(&self) -> String {
        self.input.body_markdown.chars().take(100).collect()
    }

    pub fn summary(&self, with_markdown: bool) -> SummaryJson {
        SummaryJson {
            type_of: "article".to_string(),
            id: self.id,
            title: self.input.title.clone(),
            description: self.description(),
            cover_image: None,
            published_at: self.published_at,
            tag_list: self.input.tags.clone(),
            slug: self.slug(),
            path: self.path(),
            url: self.url(),
            canonical_url: self.canonical_url(),
            comments_count: 0,
            positive_reactions_count: 0,
            published_timestamp: self.published_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
            published: self.input.published,
            user: author(),
            body_markdown: with_markdown.then(|| self.input.body_markdown.clone()),
        }
    }

    pub fn detail(&self) -> DetailJson {
        DetailJson {
            type_of: "article".to_string(),
            id: self.id,
            title: self.input.title.clone(),
            description: self.description(),
            cover_image: None,
            readable_publish_date: self.published_at.map(|t| t.format("%b %-d").to_string()),
            social_image: format!("https://example.com/social/{}.png", self.id),
            tag_list: self.input.tags.join(", "),
            tags: self.input.tags.clone(),
            slug: self.slug(),
            path: self.path(),
            url: self.url(),
            canonical_url: self.canonical_url(),
            comments_count: 0,
            positive_reactions_count: 0,
            created_at: self.created_at,
            edited_at: self.edited_at,
            crossposted_at: None,
            published_at: self.published_at,
            last_comment_at: self.created_at,
            body_html: format!("<p>{}</p>", self.input.body_markdown),
            body_markdown: self.input.body_markdown.clone(),
            user: author(),
        }
    }
}

fn error(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(json!({ "error": message, "status": status.as_u16() })),
    )
        .into_response()
}

fn authorized(headers: &HeaderMap) -> Result<(), Response> {
    match headers.get("api-key").and_then(|v| v.to_str().ok()) {
        Some(API_KEY) => Ok(()),
        _ => Err(error(StatusCode::UNAUTHORIZED, "unauthorized")),
    }
}

/// Newest first, then `tag`, `page` and `per_page` from the query.
fn select<'a>(
    articles: impl Iterator<Item = &'a StoredArticle>,
    params: &HashMap<String, String>,
) -> Vec<&'a StoredArticle> {
    let mut picked: Vec<&StoredArticle> = articles
        .filter(|a| match params.get("tag") {
            Some(tag) => a.input.tags.iter().any(|t| t == tag),
            None => true,
        })
        .collect();
    picked.sort_by(|a, b| b.id.cmp(&a.id));

    let per_page = params
        .get("per_page")
        .and_then(|v| v.parse().ok())
        .filter(|n: &usize| *n > 0)
        .unwrap_or(DEFAULT_PER_PAGE);
    let page = params
        .get("page")
        .and_then(|v| v.parse().ok())
        .filter(|n: &usize| *n > 0)
        .unwrap_or(1);

    picked
        .into_iter()
        .skip((page - 1).saturating_mul(per_page))
        .take(per_page)
        .collect()
}

async fn list_published(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<SummaryJson>> {
    let store = db.read().await;
    let published = store.articles.values().filter(|a| a.input.published);
    Json(select(published, &params).into_iter().map(|a| a.summary(false)).collect())
}

async fn list_mine(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<SummaryJson>>, Response> {
    authorized(&headers)?;
    let store = db.read().await;
    let mine = store.articles.values().filter(|a| a.input.published);
    Ok(Json(select(mine, &params).into_iter().map(|a| a.summary(true)).collect()))
}

async fn list_my_unpublished(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<SummaryJson>>, Response> {
    authorized(&headers)?;
    let store = db.read().await;
    let drafts = store.articles.values().filter(|a| !a.input.published);
    Ok(Json(select(drafts, &params).into_iter().map(|a| a.summary(true)).collect()))
}

async fn list_my_all(
    State(db): State<Db>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Vec<SummaryJson>>, Response> {
    authorized(&headers)?;
    let store = db.read().await;
    Ok(Json(
        select(store.articles.values(), &params)
            .into_iter()
            .map(|a| a.summary(true))
            .collect(),
    ))
}

async fn get_article(State(db): State<Db>, Path(id): Path<u32>) -> Result<Json<DetailJson>, Response> {
    let store = db.read().await;
    store
        .articles
        .get(&id)
        .filter(|a| a.input.published)
        .map(|a| Json(a.detail()))
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "not found"))
}

async fn create_article(
    State(db): State<Db>,
    headers: HeaderMap,
    Json(envelope): Json<Envelope>,
) -> Result<(StatusCode, Json<DetailJson>), Response> {
    authorized(&headers)?;
    let input = envelope.article;
    if input.title.trim().is_empty() {
        return Err(error(StatusCode::UNPROCESSABLE_ENTITY, "Title can't be blank"));
    }

    let now = Utc::now();
    let mut store = db.write().await;
    let id = store.next_id;
    store.next_id += 1;
    let article = StoredArticle {
        id,
        published_at: input.published.then_some(now),
        input,
        created_at: now,
        edited_at: None,
    };
    debug!(id, published = article.input.published, "created article");
    let detail = article.detail();
    store.articles.insert(id, article);
    Ok((StatusCode::CREATED, Json(detail)))
}

async fn update_article(
    State(db): State<Db>,
    headers: HeaderMap,
    Path(id): Path<u32>,
    Json(envelope): Json<Envelope>,
) -> Result<Json<DetailJson>, Response> {
    authorized(&headers)?;
    let mut store = db.write().await;
    let article = store
        .articles
        .get_mut(&id)
        .ok_or_else(|| error(StatusCode::NOT_FOUND, "not found"))?;

    let now = Utc::now();
    if !envelope.article.published {
        article.published_at = None;
    } else if article.published_at.is_none() {
        article.published_at = Some(now);
    }
    article.input = envelope.article;
    article.edited_at = Some(now);
    debug!(id, "updated article");
    Ok(Json(article.detail()))
}
