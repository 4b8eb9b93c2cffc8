//! 类型定义模块

mod report;
mod view_state;

pub use report::{REPORT_FILE_NAME, REPORT_MIME_TYPE, ServerReport};
pub use view_state::{ActionPhase, ViewEvent, ViewState};

// Re-export gateway 库的公共类型
pub use server_monitor_gateway::{
    Envelope, EnvelopeData, Server, ServerDraft, ServerStatus, StatusFilter,
};
