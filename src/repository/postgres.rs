use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::{ContentRepository, ReportingRepository};
use crate::error::{AppError, Result};
use crate::models::{ContentDraft, ContentRecord, ContentStatus, DateRange, OwnerSummary, PlatformPost};

/// PostgreSQL-backed implementation of both repositories
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Content row joined with its owner's display fields
#[derive(Debug, FromRow)]
struct ContentRow {
    id: Uuid,
    user_id: Uuid,
    title: String,
    content: String,
    media: Vec<String>,
    hashtags: Vec<String>,
    mentions: Vec<String>,
    scheduled_at: Option<DateTime<Utc>>,
    posted_at: Option<DateTime<Utc>>,
    status: String,
    social_accounts: Json<Vec<PlatformPost>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    owner_username: String,
    owner_name: String,
    owner_email: String,
}

impl TryFrom<ContentRow> for ContentRecord {
    type Error = AppError;

    fn try_from(row: ContentRow) -> Result<Self> {
        let status = row
            .status
            .parse::<ContentStatus>()
            .map_err(|e: String| AppError::Internal(anyhow::anyhow!("content {}: {}", row.id, e)))?;

        Ok(ContentRecord {
            id: row.id,
            owner: OwnerSummary {
                id: row.user_id,
                username: row.owner_username,
                name: row.owner_name,
                email: row.owner_email,
            },
            title: row.title,
            body: row.content,
            media: row.media,
            hashtags: row.hashtags,
            mentions: row.mentions,
            scheduled_at: row.scheduled_at,
            posted_at: row.posted_at,
            status,
            social_accounts: row.social_accounts.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const SELECT_CONTENT: &str = r#"
    SELECT
        c.id,
        c.user_id,
        c.title,
        c.content,
        c.media,
        c.hashtags,
        c.mentions,
        c.scheduled_at,
        c.posted_at,
        c.status,
        c.social_accounts,
        c.created_at,
        c.updated_at,
        u.username AS owner_username,
        u.name AS owner_name,
        u.email AS owner_email
    FROM contents c
    JOIN users u ON u.id = c.user_id
"#;

#[async_trait::async_trait]
impl ContentRepository for PgRepository {
    async fn insert(&self, owner_id: Uuid, draft: &ContentDraft) -> Result<Uuid> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO contents
                (user_id, title, content, media, hashtags, mentions, scheduled_at, posted_at, status, social_accounts)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id
            "#,
        )
        .bind(owner_id)
        .bind(&draft.title)
        .bind(&draft.body)
        .bind(draft.media.clone().unwrap_or_default())
        .bind(draft.hashtags.clone().unwrap_or_default())
        .bind(draft.mentions.clone().unwrap_or_default())
        .bind(draft.scheduled_at.flatten())
        .bind(draft.posted_at.flatten())
        .bind(draft.status.unwrap_or_default().as_str())
        .bind(Json(draft.social_accounts.clone().unwrap_or_default()))
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn find_owned(&self, owner_id: Uuid, id: Uuid) -> Result<Option<ContentRecord>> {
        let query = format!("{} WHERE c.id = $1 AND c.user_id = $2", SELECT_CONTENT);

        let row: Option<ContentRow> = sqlx::query_as(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(ContentRecord::try_from).transpose()
    }

    async fn list_owned(&self, owner_id: Uuid, range: Option<DateRange>) -> Result<Vec<ContentRecord>> {
        let query = format!(
            r#"{}
            WHERE c.user_id = $1
              AND ($2::timestamptz IS NULL OR c.created_at >= $2)
              AND ($3::timestamptz IS NULL OR c.created_at <= $3)
            ORDER BY c.created_at DESC
            "#,
            SELECT_CONTENT
        );

        let rows: Vec<ContentRow> = sqlx::query_as(&query)
            .bind(owner_id)
            .bind(range.map(|r| r.start))
            .bind(range.map(|r| r.end))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(ContentRecord::try_from).collect()
    }

    async fn update_owned(&self, owner_id: Uuid, id: Uuid, draft: &ContentDraft) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE contents SET
                title = $3,
                content = $4,
                media = COALESCE($5, media),
                hashtags = COALESCE($6, hashtags),
                mentions = COALESCE($7, mentions),
                scheduled_at = CASE WHEN $8 THEN $9 ELSE scheduled_at END,
                posted_at = CASE WHEN $10 THEN $11 ELSE posted_at END,
                status = COALESCE($12, status),
                social_accounts = COALESCE($13, social_accounts),
                updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(&draft.title)
        .bind(&draft.body)
        .bind(draft.media.as_ref())
        .bind(draft.hashtags.as_ref())
        .bind(draft.mentions.as_ref())
        .bind(draft.scheduled_at.is_some())
        .bind(draft.scheduled_at.flatten())
        .bind(draft.posted_at.is_some())
        .bind(draft.posted_at.flatten())
        .bind(draft.status.map(|s| s.as_str()))
        .bind(draft.social_accounts.as_ref().map(Json))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_owned(&self, owner_id: Uuid, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM contents WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait::async_trait]
impl ReportingRepository for PgRepository {
    async fn count_users(&self) -> Result<i64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        Ok(total)
    }

    async fn count_content(&self, since: Option<DateTime<Utc>>) -> Result<i64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM contents WHERE ($1::timestamptz IS NULL OR created_at >= $1)",
        )
        .bind(since)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    async fn content_per_month(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<(i32, i64)>> {
        let rows: Vec<(i32, i64)> = sqlx::query_as(
            r#"
            SELECT EXTRACT(MONTH FROM created_at AT TIME ZONE 'UTC')::int AS month, COUNT(*) AS total
            FROM contents
            WHERE created_at >= $1 AND created_at < $2
            GROUP BY 1
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn users_per_month(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<(i32, i64)>> {
        let rows: Vec<(i32, i64)> = sqlx::query_as(
            r#"
            SELECT EXTRACT(MONTH FROM created_at AT TIME ZONE 'UTC')::int AS month, COUNT(*) AS total
            FROM users
            WHERE created_at >= $1 AND created_at < $2
            GROUP BY 1
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
