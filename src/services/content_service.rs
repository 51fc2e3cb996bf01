// Content service - owner-scoped create/list/get/update/delete of scheduled posts
use std::sync::Arc;

use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::middleware::Principal;
use crate::models::{ContentPayload, ContentRecord, DateRange};
use crate::repository::ContentRepository;

pub struct ContentService {
    repo: Arc<dyn ContentRepository>,
}

impl ContentService {
    pub fn new(repo: Arc<dyn ContentRepository>) -> Self {
        Self { repo }
    }

    /// Validate and persist a new record owned by the caller
    pub async fn create(&self, principal: &Principal, payload: ContentPayload) -> Result<ContentRecord> {
        let draft = payload.into_draft().map_err(AppError::Validation)?;

        let id = self.repo.insert(principal.user_id, &draft).await?;
        tracing::info!(content_id = %id, owner_id = %principal.user_id, "content created");

        self.repo
            .find_owned(principal.user_id, id)
            .await?
            .ok_or_else(|| AppError::Internal(anyhow::anyhow!("content {} vanished after insert", id)))
    }

    /// The caller's records, newest first
    pub async fn list(&self, principal: &Principal, range: Option<DateRange>) -> Result<Vec<ContentRecord>> {
        self.repo.list_owned(principal.user_id, range).await
    }

    pub async fn get(&self, principal: &Principal, id: &str) -> Result<ContentRecord> {
        let content_id = parse_content_id(id)?;
        self.repo
            .find_owned(principal.user_id, content_id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn update(&self, principal: &Principal, id: &str, payload: ContentPayload) -> Result<ContentRecord> {
        let draft = payload.into_draft().map_err(AppError::Validation)?;
        let content_id = parse_content_id(id)?;

        if !self.repo.update_owned(principal.user_id, content_id, &draft).await? {
            return Err(not_found());
        }
        tracing::info!(content_id = %content_id, owner_id = %principal.user_id, "content updated");

        // A concurrent delete between the two calls is reported as not found
        self.repo
            .find_owned(principal.user_id, content_id)
            .await?
            .ok_or_else(not_found)
    }

    pub async fn delete(&self, principal: &Principal, id: &str) -> Result<()> {
        let content_id = parse_content_id(id)?;

        if !self.repo.delete_owned(principal.user_id, content_id).await? {
            return Err(not_found());
        }
        tracing::info!(content_id = %content_id, owner_id = %principal.user_id, "content deleted");

        Ok(())
    }
}

/// Ids that cannot exist are reported the same way as ids owned by someone else
fn parse_content_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id).map_err(|_| not_found())
}

fn not_found() -> AppError {
    AppError::NotFound("Content not found".to_string())
}
