//! 报表导出服务

use std::fmt::Write as _;

use chrono::Utc;
use server_monitor_gateway::Server;

use crate::types::{REPORT_FILE_NAME, REPORT_MIME_TYPE, ServerReport};

const COLUMNS: [&str; 6] = ["ID", "IP Address", "Name", "Memory", "Type", "Status"];

/// Renders the snapshot as a spreadsheet-compatible HTML table.
pub struct ReportService;

impl ReportService {
    /// Builds the report, one row per server in snapshot order.
    #[must_use]
    pub fn build(servers: &[Server]) -> ServerReport {
        let mut html = String::from("<table id=\"servers\"><thead><tr>");
        for column in COLUMNS {
            let _ = write!(html, "<th>{column}</th>");
        }
        html.push_str("</tr></thead><tbody>");

        for server in servers {
            let id = server.id.to_string();
            html.push_str("<tr>");
            for cell in [
                id.as_str(),
                server.ip_address.as_str(),
                server.name.as_str(),
                server.memory.as_str(),
                server.server_type.as_str(),
                server.status.as_str(),
            ] {
                let _ = write!(html, "<td>{}</td>", escape_html(cell));
            }
            html.push_str("</tr>");
        }
        html.push_str("</tbody></table>");

        ServerReport {
            file_name: REPORT_FILE_NAME.to_string(),
            mime_type: REPORT_MIME_TYPE.to_string(),
            html,
            row_count: servers.len(),
            generated_at: Utc::now(),
        }
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use server_monitor_gateway::ServerStatus;

    use super::*;
    use crate::test_utils::test_server;

    #[test]
    fn one_row_per_server_in_order() {
        let report = ReportService::build(&[
            test_server(2, "10.0.0.2", ServerStatus::ServerUp),
            test_server(1, "10.0.0.1", ServerStatus::ServerDown),
        ]);

        assert_eq!(report.row_count, 2);
        assert_eq!(report.file_name, "server-report.xls");
        assert!(report.html.starts_with("<table id=\"servers\">"));
        let first = report.html.find("10.0.0.2").unwrap();
        let second = report.html.find("10.0.0.1").unwrap();
        assert!(first < second);
        assert!(report.html.contains("<td>SERVER_UP</td>"));
    }

    #[test]
    fn cells_are_escaped() {
        let mut server = test_server(1, "10.0.0.1", ServerStatus::ServerUp);
        server.name = "<b>db & cache</b>".to_string();
        let report = ReportService::build(&[server]);
        assert!(report.html.contains("&lt;b&gt;db &amp; cache&lt;/b&gt;"));
        assert!(!report.html.contains("<b>"));
    }

    #[test]
    fn data_uri_encodes_spaces() {
        let report = ReportService::build(&[test_server(1, "10.0.0.1", ServerStatus::ServerUp)]);
        let uri = report.data_uri();
        assert!(uri.starts_with("data:application/vnd.ms-excel.sheet.macroEnabled.12, <table"));
        assert!(uri.contains("IP%20Address"));
        assert!(!uri["data:".len() + REPORT_MIME_TYPE.len() + 2..].contains(' '));
    }

    #[test]
    fn empty_snapshot_still_has_header() {
        let report = ReportService::build(&[]);
        assert_eq!(report.row_count, 0);
        assert!(report.html.contains("<th>Status</th>"));
        assert!(report.html.contains("<tbody></tbody>"));
    }
}
