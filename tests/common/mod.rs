//! Shared fixtures: an in-memory store implementing both repository traits,
//! token minting, and request helpers for driving the real router.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, Datelike, Utc};
use content_admin::{
    config::{Config, DatabaseConfig, JwtConfig, ServerConfig},
    error::Result,
    middleware::{Claims, Principal},
    models::{ContentDraft, ContentRecord, ContentStatus, DateRange, OwnerSummary, PlatformPost},
    repository::{ContentRepository, ReportingRepository},
    AppState,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const JWT_SECRET: &str = "integration-test-secret";

#[derive(Debug, Clone)]
struct StoredUser {
    id: Uuid,
    username: String,
    name: String,
    email: String,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct StoredContent {
    id: Uuid,
    owner_id: Uuid,
    title: String,
    body: String,
    media: Vec<String>,
    hashtags: Vec<String>,
    mentions: Vec<String>,
    scheduled_at: Option<DateTime<Utc>>,
    posted_at: Option<DateTime<Utc>>,
    status: ContentStatus,
    social_accounts: Vec<PlatformPost>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Default)]
struct Inner {
    users: Vec<StoredUser>,
    contents: Vec<StoredContent>,
}

/// Mirrors the PostgreSQL repository's owner scoping, ordering and update rules
#[derive(Default)]
pub struct InMemoryStore {
    inner: Mutex<Inner>,
}

impl InMemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn add_user(&self, username: &str, created_at: DateTime<Utc>) -> Principal {
        let user = StoredUser {
            id: Uuid::new_v4(),
            username: username.to_string(),
            name: format!("{} name", username),
            email: format!("{}@example.com", username),
            created_at,
        };
        let principal = Principal {
            user_id: user.id,
            email: user.email.clone(),
        };
        self.inner.lock().unwrap().users.push(user);
        principal
    }

    /// Insert with an explicit creation time
    pub fn seed_content(&self, owner: &Principal, draft: &ContentDraft, created_at: DateTime<Utc>) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.lock().unwrap().contents.push(StoredContent {
            id,
            owner_id: owner.user_id,
            title: draft.title.clone(),
            body: draft.body.clone(),
            media: draft.media.clone().unwrap_or_default(),
            hashtags: draft.hashtags.clone().unwrap_or_default(),
            mentions: draft.mentions.clone().unwrap_or_default(),
            scheduled_at: draft.scheduled_at.flatten(),
            posted_at: draft.posted_at.flatten(),
            status: draft.status.unwrap_or_default(),
            social_accounts: draft.social_accounts.clone().unwrap_or_default(),
            created_at,
            updated_at: created_at,
        });
        id
    }

    pub fn content_count(&self) -> usize {
        self.inner.lock().unwrap().contents.len()
    }

    fn to_record(inner: &Inner, stored: &StoredContent) -> ContentRecord {
        let owner = inner
            .users
            .iter()
            .find(|u| u.id == stored.owner_id)
            .expect("content owner must exist");

        ContentRecord {
            id: stored.id,
            owner: OwnerSummary {
                id: owner.id,
                username: owner.username.clone(),
                name: owner.name.clone(),
                email: owner.email.clone(),
            },
            title: stored.title.clone(),
            body: stored.body.clone(),
            media: stored.media.clone(),
            hashtags: stored.hashtags.clone(),
            mentions: stored.mentions.clone(),
            scheduled_at: stored.scheduled_at,
            posted_at: stored.posted_at,
            status: stored.status,
            social_accounts: stored.social_accounts.clone(),
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }
}

#[async_trait::async_trait]
impl ContentRepository for InMemoryStore {
    async fn insert(&self, owner_id: Uuid, draft: &ContentDraft) -> Result<Uuid> {
        let principal = Principal {
            user_id: owner_id,
            email: String::new(),
        };
        Ok(self.seed_content(&principal, draft, Utc::now()))
    }

    async fn find_owned(&self, owner_id: Uuid, id: Uuid) -> Result<Option<ContentRecord>> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .contents
            .iter()
            .find(|c| c.id == id && c.owner_id == owner_id)
            .map(|c| Self::to_record(&inner, c)))
    }

    async fn list_owned(&self, owner_id: Uuid, range: Option<DateRange>) -> Result<Vec<ContentRecord>> {
        let inner = self.inner.lock().unwrap();
        let mut records: Vec<ContentRecord> = inner
            .contents
            .iter()
            .filter(|c| c.owner_id == owner_id)
            .filter(|c| range.map_or(true, |r| r.contains(c.created_at)))
            .map(|c| Self::to_record(&inner, c))
            .collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    async fn update_owned(&self, owner_id: Uuid, id: Uuid, draft: &ContentDraft) -> Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        let Some(stored) = inner
            .contents
            .iter_mut()
            .find(|c| c.id == id && c.owner_id == owner_id)
        else {
            return Ok(false);
        };

        stored.title = draft.title.clone();
        stored.body = draft.body.clone();
        if let Some(media) = &draft.media {
            stored.media = media.clone();
        }
        if let Some(hashtags) = &draft.hashtags {
            stored.hashtags = hashtags.clone();
        }
        if let Some(mentions) = &draft.mentions {
            stored.mentions = mentions.clone();
        }
        if let Some(scheduled_at) = draft.scheduled_at {
            stored.scheduled_at = scheduled_at;
        }
        if let Some(posted_at) = draft.posted_at {
            stored.posted_at = posted_at;
        }
        if let Some(status) = draft.status {
            stored.status = status;
        }
        if let Some(accounts) = &draft.social_accounts {
            stored.social_accounts = accounts.clone();
        }
        stored.updated_at = Utc::now();
        Ok(true)
    }

    async fn delete_owned(&self, owner_id: Uuid, id: Uuid) -> Result<bool> {
        let mut inner = self.inner.lock().unwrap();
        let before = inner.contents.len();
        inner.contents.retain(|c| !(c.id == id && c.owner_id == owner_id));
        Ok(inner.contents.len() < before)
    }
}

fn group_by_month<'a>(
    times: impl Iterator<Item = &'a DateTime<Utc>>,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Vec<(i32, i64)> {
    let mut counts = [0i64; 12];
    for ts in times.filter(|ts| **ts >= start && **ts < end) {
        counts[ts.month0() as usize] += 1;
    }
    counts
        .iter()
        .enumerate()
        .filter(|(_, count)| **count > 0)
        .map(|(i, count)| (i as i32 + 1, *count))
        .collect()
}

#[async_trait::async_trait]
impl ReportingRepository for InMemoryStore {
    async fn count_users(&self) -> Result<i64> {
        Ok(self.inner.lock().unwrap().users.len() as i64)
    }

    async fn count_content(&self, since: Option<DateTime<Utc>>) -> Result<i64> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .contents
            .iter()
            .filter(|c| since.map_or(true, |s| c.created_at >= s))
            .count() as i64)
    }

    async fn content_per_month(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<(i32, i64)>> {
        let inner = self.inner.lock().unwrap();
        Ok(group_by_month(inner.contents.iter().map(|c| &c.created_at), start, end))
    }

    async fn users_per_month(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<(i32, i64)>> {
        let inner = self.inner.lock().unwrap();
        Ok(group_by_month(inner.users.iter().map(|u| &u.created_at), start, end))
    }
}

pub fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 1,
        },
        jwt: JwtConfig {
            secret: JWT_SECRET.to_string(),
        },
    }
}

pub fn test_app(store: Arc<InMemoryStore>) -> Router {
    content_admin::app(AppState {
        content: store.clone(),
        reports: store,
        config: test_config(),
    })
}

pub fn token_for(principal: &Principal) -> String {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: principal.user_id.to_string(),
        email: principal.email.clone(),
        iat: now as usize,
        exp: (now + 3600) as usize,
    };
    encode(&Header::default(), &claims, &EncodingKey::from_secret(JWT_SECRET.as_bytes())).unwrap()
}

pub fn draft(title: &str) -> ContentDraft {
    ContentDraft {
        title: title.to_string(),
        body: format!("{} body", title),
        media: None,
        hashtags: None,
        mentions: None,
        scheduled_at: None,
        posted_at: None,
        status: None,
        social_accounts: None,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub bytes: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.bytes).expect("response body should be JSON")
    }
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    principal: Option<&Principal>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(principal) = principal {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token_for(principal)));
    }
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse { status, headers, bytes }
}
