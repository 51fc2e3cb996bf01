// Dashboard service - owner and content counts for the admin home page
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};
use crate::models::{monthly_buckets, ContentPerMonth, DashboardSummary};
use crate::repository::ReportingRepository;
use crate::utils::{start_of_month, year_window};

pub struct DashboardService {
    repo: Arc<dyn ReportingRepository>,
}

impl DashboardService {
    pub fn new(repo: Arc<dyn ReportingRepository>) -> Self {
        Self { repo }
    }

    /// Totals plus content created since the first day of `now`'s month
    pub async fn summary(&self, now: DateTime<Utc>) -> Result<DashboardSummary> {
        let total_users = self.repo.count_users().await?;
        let total_content = self.repo.count_content(None).await?;
        let total_content_this_month = self.repo.count_content(Some(start_of_month(now))).await?;

        Ok(DashboardSummary {
            total_users,
            total_content,
            total_content_this_month,
        })
    }

    /// Twelve calendar buckets of content and owner registrations for `year`
    pub async fn content_per_month(&self, year: i32) -> Result<ContentPerMonth> {
        let (start, end) =
            year_window(year).ok_or_else(|| AppError::BadRequest(format!("Unsupported year {}", year)))?;

        let content = self.repo.content_per_month(start, end).await?;
        let users = self.repo.users_per_month(start, end).await?;
        let total_users = self.repo.count_users().await?;

        Ok(ContentPerMonth {
            total_users,
            monthly_stats: monthly_buckets(year, &content, &users),
        })
    }
}
