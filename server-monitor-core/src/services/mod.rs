//! 业务逻辑服务层

mod action;
mod coordinator;
mod report_service;

pub use action::ActionHandle;
pub use coordinator::StateCoordinator;
pub use report_service::ReportService;

use std::sync::Arc;

use server_monitor_gateway::ServerGateway;

use crate::traits::{LogNotifier, NoopViewHooks, Notifier, ViewHooks};

/// 服务上下文 - 持有所有依赖
///
/// 平台层创建此上下文并注入 gateway、通知与渲染回调实现。
pub struct ServiceContext {
    /// 后端 gateway
    pub gateway: Arc<dyn ServerGateway>,
    /// 通知出口
    pub notifier: Arc<dyn Notifier>,
    /// 渲染层回调
    pub hooks: Arc<dyn ViewHooks>,
}

impl ServiceContext {
    /// 创建服务上下文（日志通知，无渲染回调）
    #[must_use]
    pub fn new(gateway: Arc<dyn ServerGateway>) -> Self {
        Self {
            gateway,
            notifier: Arc::new(LogNotifier),
            hooks: Arc::new(NoopViewHooks),
        }
    }

    #[must_use]
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    #[must_use]
    pub fn with_hooks(mut self, hooks: Arc<dyn ViewHooks>) -> Self {
        self.hooks = hooks;
        self
    }
}
