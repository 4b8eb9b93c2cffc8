//! Report export type

use chrono::{DateTime, Utc};
use serde::Serialize;

/// File name the report is downloaded as.
pub const REPORT_FILE_NAME: &str = "server-report.xls";

/// MIME type announced for the report.
pub const REPORT_MIME_TYPE: &str = "application/vnd.ms-excel.sheet.macroEnabled.12";

/// Spreadsheet-compatible export of the current snapshot.
///
/// The body is an HTML `<table id="servers">`, which spreadsheet applications open
/// directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerReport {
    pub file_name: String,
    pub mime_type: String,
    pub html: String,
    pub row_count: usize,
    pub generated_at: DateTime<Utc>,
}

impl ServerReport {
    /// `data:` URI the rendering layer can hand to a download link.
    ///
    /// Spaces in the table are encoded as `%20`.
    pub fn data_uri(&self) -> String {
        format!("data:{}, {}", self.mime_type, self.html.replace(' ', "%20"))
    }
}
