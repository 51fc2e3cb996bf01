// Export service - flattens content into one spreadsheet row per platform post
use rust_xlsxwriter::{Format, Workbook};

use crate::error::Result;
use crate::models::ContentRecord;
use crate::utils::format_datetime;

pub const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const EXPORT_FILENAME: &str = "ContentData.xlsx";

const LIST_DELIMITER: &str = ", ";
const MISSING_URL: &str = "-";

pub const COLUMNS: [&str; 15] = [
    "No",
    "Username",
    "Email",
    "Title",
    "Content",
    "Media",
    "Hashtags",
    "Mentions",
    "Scheduled At",
    "Status",
    "Platform",
    "Post URL",
    "Platform Status",
    "Created At",
    "Error Message",
];

/// One (record × platform post) pair, already rendered to cell text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRow {
    pub sequence: u32,
    pub username: String,
    pub email: String,
    pub title: String,
    pub content: String,
    pub media: String,
    pub hashtags: String,
    pub mentions: String,
    pub scheduled_at: String,
    pub status: String,
    pub platform: String,
    pub post_url: String,
    pub platform_status: String,
    pub created_at: String,
    pub error_message: String,
}

impl ExportRow {
    fn cells(&self) -> [&str; 14] {
        [
            self.username.as_str(),
            self.email.as_str(),
            self.title.as_str(),
            self.content.as_str(),
            self.media.as_str(),
            self.hashtags.as_str(),
            self.mentions.as_str(),
            self.scheduled_at.as_str(),
            self.status.as_str(),
            self.platform.as_str(),
            self.post_url.as_str(),
            self.platform_status.as_str(),
            self.created_at.as_str(),
            self.error_message.as_str(),
        ]
    }
}

/// Flatten records in the order given.
///
/// A record without platform posts contributes no rows; it never fails
/// the export.
pub fn build_rows(records: &[ContentRecord]) -> Vec<ExportRow> {
    let mut rows = Vec::new();

    for record in records {
        if record.social_accounts.is_empty() {
            tracing::debug!(content_id = %record.id, "content has no platform posts, skipping in export");
            continue;
        }

        let media = record.media.join(LIST_DELIMITER);
        let hashtags = record.hashtags.join(LIST_DELIMITER);
        let mentions = record.mentions.join(LIST_DELIMITER);
        let scheduled_at = record.scheduled_at.map(format_datetime).unwrap_or_default();
        let created_at = format_datetime(record.created_at);

        for post in &record.social_accounts {
            rows.push(ExportRow {
                sequence: rows.len() as u32 + 1,
                username: record.owner.username.clone(),
                email: record.owner.email.clone(),
                title: record.title.clone(),
                content: record.body.clone(),
                media: media.clone(),
                hashtags: hashtags.clone(),
                mentions: mentions.clone(),
                scheduled_at: scheduled_at.clone(),
                status: record.status.as_str().to_string(),
                platform: post.platform.as_str().to_string(),
                post_url: post.post_url.clone().unwrap_or_else(|| MISSING_URL.to_string()),
                platform_status: post.status.as_str().to_string(),
                created_at: created_at.clone(),
                error_message: post.error_message.clone().unwrap_or_default(),
            });
        }
    }

    rows
}

/// Encode rows as a single-sheet workbook with a bold header row
pub fn render_workbook(rows: &[ExportRow]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Content Data")?;

        for (col, title) in COLUMNS.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, *title, &header)?;
        }

        for (i, row) in rows.iter().enumerate() {
            let line = i as u32 + 1;
            sheet.write_number(line, 0, row.sequence)?;
            for (offset, cell) in row.cells().iter().enumerate() {
                sheet.write_string(line, offset as u16 + 1, *cell)?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}
