//! Storage seams for the content and reporting services.
//!
//! Every content operation is scoped by owner at query time: a record that
//! belongs to someone else behaves exactly like a record that does not exist.

mod postgres;

pub use postgres::PgRepository;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::{ContentDraft, ContentRecord, DateRange};

#[async_trait::async_trait]
pub trait ContentRepository: Send + Sync {
    /// Persist a new record for `owner_id` and return its id
    async fn insert(&self, owner_id: Uuid, draft: &ContentDraft) -> Result<Uuid>;

    /// Fetch one record with its owner expanded
    async fn find_owned(&self, owner_id: Uuid, id: Uuid) -> Result<Option<ContentRecord>>;

    /// All records of `owner_id`, newest first, optionally limited to a creation window
    async fn list_owned(&self, owner_id: Uuid, range: Option<DateRange>) -> Result<Vec<ContentRecord>>;

    /// Apply `draft` to an owned record. Returns false when nothing matched.
    async fn update_owned(&self, owner_id: Uuid, id: Uuid, draft: &ContentDraft) -> Result<bool>;

    /// Returns false when nothing matched
    async fn delete_owned(&self, owner_id: Uuid, id: Uuid) -> Result<bool>;
}

#[async_trait::async_trait]
pub trait ReportingRepository: Send + Sync {
    async fn count_users(&self) -> Result<i64>;

    /// Content records overall, or only those created at or after `since`
    async fn count_content(&self, since: Option<DateTime<Utc>>) -> Result<i64>;

    /// `(month, count)` of content created in `[start, end)`, grouped by UTC month
    async fn content_per_month(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<(i32, i64)>>;

    /// `(month, count)` of owner registrations in `[start, end)`, grouped by UTC month
    async fn users_per_month(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<(i32, i64)>>;
}
