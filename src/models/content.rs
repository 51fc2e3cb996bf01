// Content scheduling records and the request payload that creates/updates them

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;
use validator::Validate;

use crate::error::FieldError;
use crate::utils::{parse_range_bound, parse_timestamp, Bound};

/// Overall lifecycle status of a record.
///
/// Data only: any value may be written by an update at any time and nothing
/// in this service moves a record from one status to another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    #[default]
    Pending,
    Scheduled,
    Posting,
    Success,
    Failed,
}

impl ContentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentStatus::Pending => "pending",
            ContentStatus::Scheduled => "scheduled",
            ContentStatus::Posting => "posting",
            ContentStatus::Success => "success",
            ContentStatus::Failed => "failed",
        }
    }
}

impl FromStr for ContentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(ContentStatus::Pending),
            "scheduled" => Ok(ContentStatus::Scheduled),
            "posting" => Ok(ContentStatus::Posting),
            "success" => Ok(ContentStatus::Success),
            "failed" => Ok(ContentStatus::Failed),
            other => Err(format!("unknown content status: {}", other)),
        }
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Facebook,
    Twitter,
    Instagram,
    Tiktok,
    Linkedin,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Twitter => "twitter",
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
            Platform::Linkedin => "linkedin",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformStatus {
    #[default]
    Pending,
    Posting,
    Success,
    Failed,
}

impl PlatformStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlatformStatus::Pending => "pending",
            PlatformStatus::Posting => "posting",
            PlatformStatus::Success => "success",
            PlatformStatus::Failed => "failed",
        }
    }
}

/// One target platform's delivery attempt, embedded in its parent record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformPost {
    pub platform: Platform,
    #[serde(default)]
    pub post_url: Option<String>,
    #[serde(default)]
    pub post_id: Option<String>,
    #[serde(default)]
    pub status: PlatformStatus,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Owner reference expanded with display fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnerSummary {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentRecord {
    pub id: Uuid,
    pub owner: OwnerSummary,
    pub title: String,
    #[serde(rename = "content")]
    pub body: String,
    pub media: Vec<String>,
    pub hashtags: Vec<String>,
    pub mentions: Vec<String>,
    pub scheduled_at: Option<DateTime<Utc>>,
    pub posted_at: Option<DateTime<Utc>>,
    pub status: ContentStatus,
    pub social_accounts: Vec<PlatformPost>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create/update request body, exactly as the client sent it.
///
/// Fields are kept as raw JSON so that a wrongly typed field becomes one
/// entry in the validation report instead of aborting deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContentPayload {
    pub title: Option<Value>,
    pub content: Option<Value>,
    pub media: Option<Value>,
    pub hashtags: Option<Value>,
    pub mentions: Option<Value>,
    /// `None` when absent, `Some(Value::Null)` when sent as `null`
    #[serde(default, deserialize_with = "present")]
    pub scheduled_at: Option<Value>,
    #[serde(default, deserialize_with = "present")]
    pub posted_at: Option<Value>,
    pub status: Option<Value>,
    pub social_accounts: Option<Value>,
}

/// Keep an explicit `null` distinguishable from a missing key
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Required text fields once they are known to be strings
#[derive(Debug, Validate)]
struct ContentText {
    #[validate(
        required(message = "title is required"),
        length(min = 1, message = "title must not be empty")
    )]
    title: Option<String>,
    #[validate(
        required(message = "content is required"),
        length(min = 1, message = "content must not be empty")
    )]
    content: Option<String>,
}

/// A payload that passed validation, with timestamps already parsed.
///
/// Optional fields stay optional: on insert an absent field takes its
/// default, on update it leaves the stored value alone. The timestamps
/// carry one more state: `Some(None)` clears the stored value.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentDraft {
    pub title: String,
    pub body: String,
    pub media: Option<Vec<String>>,
    pub hashtags: Option<Vec<String>>,
    pub mentions: Option<Vec<String>>,
    pub scheduled_at: Option<Option<DateTime<Utc>>>,
    pub posted_at: Option<Option<DateTime<Utc>>>,
    pub status: Option<ContentStatus>,
    pub social_accounts: Option<Vec<PlatformPost>>,
}

impl ContentPayload {
    /// Check every constraint and report all failing fields at once,
    /// sorted by field name
    pub fn into_draft(self) -> Result<ContentDraft, Vec<FieldError>> {
        let mut errors = Vec::new();

        let text = ContentText {
            title: typed_field("title", self.title, "a string", &mut errors),
            content: typed_field("content", self.content, "a string", &mut errors),
        };
        if let Err(e) = text.validate() {
            // A field that already failed its type check is not also "required"
            for error in FieldError::from_validation(&e) {
                if !errors.iter().any(|known| known.field == error.field) {
                    errors.push(error);
                }
            }
        }

        let media = typed_field("media", self.media, "a list of strings", &mut errors);
        let hashtags = typed_field("hashtags", self.hashtags, "a list of strings", &mut errors);
        let mentions = typed_field("mentions", self.mentions, "a list of strings", &mut errors);
        let status = typed_field(
            "status",
            self.status,
            "one of pending, scheduled, posting, success, failed",
            &mut errors,
        );
        let social_accounts = typed_field(
            "social_accounts",
            self.social_accounts,
            "a list of platform posts",
            &mut errors,
        );
        let scheduled_at = timestamp_field("scheduled_at", self.scheduled_at, &mut errors);
        let posted_at = timestamp_field("posted_at", self.posted_at, &mut errors);

        if !errors.is_empty() {
            errors.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.code.cmp(&b.code)));
            return Err(errors);
        }

        Ok(ContentDraft {
            title: text.title.unwrap_or_default(),
            body: text.content.unwrap_or_default(),
            media,
            hashtags,
            mentions,
            scheduled_at,
            posted_at,
            status,
            social_accounts,
        })
    }
}

/// `null` and absent both mean "not given"
fn typed_field<T: DeserializeOwned>(
    field: &str,
    raw: Option<Value>,
    expected: &str,
    errors: &mut Vec<FieldError>,
) -> Option<T> {
    match raw {
        None | Some(Value::Null) => None,
        Some(value) => match serde_json::from_value(value) {
            Ok(parsed) => Some(parsed),
            Err(_) => {
                errors.push(FieldError::new(field, "type", format!("{} must be {}", field, expected)));
                None
            }
        },
    }
}

fn timestamp_field(
    field: &str,
    raw: Option<Value>,
    errors: &mut Vec<FieldError>,
) -> Option<Option<DateTime<Utc>>> {
    let parsed = match raw? {
        Value::Null => return Some(None),
        Value::String(text) => parse_timestamp(&text),
        _ => None,
    };
    if parsed.is_none() {
        errors.push(FieldError::new(
            field,
            "timestamp",
            format!("{} must be an RFC 3339 timestamp such as 2024-05-01T10:00:00Z", field),
        ));
    }
    parsed.map(Some)
}

/// Inclusive creation-time window for list and export
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl DateRange {
    /// Both bounds must be present and parse; anything else means "no filter"
    pub fn from_query(start: Option<&str>, end: Option<&str>) -> Option<Self> {
        let (start_raw, end_raw) = (start?, end?);
        match (
            parse_range_bound(start_raw, Bound::Start),
            parse_range_bound(end_raw, Bound::End),
        ) {
            (Some(start), Some(end)) => Some(Self { start, end }),
            _ => {
                tracing::debug!(start = start_raw, end = end_raw, "ignoring unparseable date range");
                None
            }
        }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start <= ts && ts <= self.end
    }
}
