//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use server_monitor_gateway::{
    Envelope, EnvelopeData, Result, Server, ServerDraft, ServerGateway, ServerStatus,
    TransportError,
};
use tokio::sync::{RwLock, Semaphore};

use crate::services::{ServiceContext, StateCoordinator};
use crate::traits::{Notifier, ViewHooks};

pub fn test_server(id: i64, ip: &str, status: ServerStatus) -> Server {
    Server {
        id,
        ip_address: ip.to_string(),
        name: format!("node-{id}"),
        memory: "16 GB".to_string(),
        server_type: "SERVER".to_string(),
        image_url: None,
        status,
    }
}

// ===== MockGateway =====

/// In-memory backend with failure injection and a call gate.
pub struct MockGateway {
    /// 后端存储（插入顺序）
    servers: RwLock<Vec<Server>>,
    next_id: AtomicI64,
    /// ping 结果：IP -> 是否可达（缺省可达）
    reachable: RwLock<HashMap<String, bool>>,
    /// 操作名 -> 注入的错误
    failures: RwLock<HashMap<&'static str, TransportError>>,
    calls: Mutex<Vec<&'static str>>,
    /// Some 时每次调用都需要先拿到一个许可
    gate: RwLock<Option<Arc<Semaphore>>>,
}

impl MockGateway {
    pub fn new(servers: Vec<Server>) -> Self {
        let next_id = servers.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        Self {
            servers: RwLock::new(servers),
            next_id: AtomicI64::new(next_id),
            reachable: RwLock::new(HashMap::new()),
            failures: RwLock::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            gate: RwLock::new(None),
        }
    }

    pub fn set_next_id(&self, id: i64) {
        self.next_id.store(id, Ordering::SeqCst);
    }

    pub async fn set_reachable(&self, ip: &str, reachable: bool) {
        self.reachable
            .write()
            .await
            .insert(ip.to_string(), reachable);
    }

    /// 让指定操作返回错误
    pub async fn fail(&self, op: &'static str, err: TransportError) {
        self.failures.write().await.insert(op, err);
    }

    /// 直接写入后端（协调器不知情）
    pub async fn insert_server(&self, server: Server) {
        self.servers.write().await.push(server);
    }

    /// 之后的调用都会阻塞，直到 `release`
    pub async fn hold(&self) {
        *self.gate.write().await = Some(Arc::new(Semaphore::new(0)));
    }

    pub async fn release(&self, calls: usize) {
        if let Some(gate) = self.gate.read().await.as_ref() {
            gate.add_permits(calls);
        }
    }

    pub fn call_count(&self, op: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == op).count()
    }

    async fn enter(&self, op: &'static str) -> Result<()> {
        self.calls.lock().unwrap().push(op);
        let gate = self.gate.read().await.clone();
        if let Some(gate) = gate {
            gate.acquire().await.unwrap().forget();
        }
        match self.failures.read().await.get(op) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }

    fn not_found(detail: String) -> TransportError {
        TransportError::Http {
            status_code: 404,
            message: detail,
        }
    }

    fn entity(server: Server, status_code: u16, message: &str) -> Envelope {
        let mut envelope = Envelope {
            data: Some(EnvelopeData::Server { server }),
            ..Envelope::default()
        }
        .with_message(message);
        envelope.status_code = Some(status_code);
        envelope
    }
}

#[async_trait]
impl ServerGateway for MockGateway {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn list(&self) -> Result<Envelope> {
        self.enter("list").await?;
        let servers = self.servers.read().await.clone();
        Ok(Envelope::with_servers(servers).with_message("Servers retrieved"))
    }

    async fn get(&self, id: i64) -> Result<Envelope> {
        self.enter("get").await?;
        let servers = self.servers.read().await;
        let server = servers
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| Self::not_found(format!("Server {id} not found")))?;
        Ok(Self::entity(server, 200, "Server retrieved"))
    }

    async fn ping(&self, ip_address: &str) -> Result<Envelope> {
        self.enter("ping").await?;
        let reachable = self
            .reachable
            .read()
            .await
            .get(ip_address)
            .copied()
            .unwrap_or(true);

        let mut servers = self.servers.write().await;
        let server = servers
            .iter_mut()
            .find(|s| s.ip_address == ip_address)
            .ok_or_else(|| Self::not_found(format!("No server with IP {ip_address}")))?;
        server.status = if reachable {
            ServerStatus::ServerUp
        } else {
            ServerStatus::ServerDown
        };

        let message = if reachable { "Ping success" } else { "Ping failed" };
        Ok(Self::entity(server.clone(), 200, message))
    }

    async fn filter_by_status(&self, status: ServerStatus) -> Result<Envelope> {
        self.enter("filter_by_status").await?;
        let matching: Vec<_> = self
            .servers
            .read()
            .await
            .iter()
            .filter(|s| s.status == status)
            .cloned()
            .collect();
        let message = if matching.is_empty() {
            format!("No servers of {status} found")
        } else {
            format!("Servers filtered by {status} status")
        };
        Ok(Envelope::with_servers(matching).with_message(message))
    }

    async fn create(&self, draft: &ServerDraft) -> Result<Envelope> {
        self.enter("create").await?;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let server = draft.clone().into_server(id);
        self.servers.write().await.push(server.clone());
        Ok(Self::entity(server, 201, "Server created"))
    }

    async fn delete(&self, id: i64) -> Result<Envelope> {
        self.enter("delete").await?;
        let mut servers = self.servers.write().await;
        let before = servers.len();
        servers.retain(|s| s.id != id);
        if servers.len() == before {
            return Err(Self::not_found(format!("Server {id} not found")));
        }
        Ok(Envelope {
            data: Some(EnvelopeData::Acknowledged { server: true }),
            ..Envelope::default()
        }
        .with_message("Server deleted"))
    }
}

// ===== RecordingNotifier =====

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
    errors: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }

    fn notify_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}

// ===== RecordingHooks =====

#[derive(Default)]
pub struct RecordingHooks {
    saved: Mutex<Vec<Server>>,
    resets: Mutex<Vec<ServerDraft>>,
}

impl RecordingHooks {
    pub fn saved(&self) -> Vec<Server> {
        self.saved.lock().unwrap().clone()
    }

    pub fn resets(&self) -> Vec<ServerDraft> {
        self.resets.lock().unwrap().clone()
    }
}

impl ViewHooks for RecordingHooks {
    fn on_server_saved(&self, server: &Server) {
        self.saved.lock().unwrap().push(server.clone());
    }

    fn reset_form(&self, draft: ServerDraft) {
        self.resets.lock().unwrap().push(draft);
    }
}

// ===== 工厂方法 =====

/// 创建带 mock 依赖的 `StateCoordinator`
pub fn create_test_coordinator(
    servers: Vec<Server>,
) -> (
    StateCoordinator,
    Arc<MockGateway>,
    Arc<RecordingNotifier>,
    Arc<RecordingHooks>,
) {
    let gateway = Arc::new(MockGateway::new(servers));
    let notifier = Arc::new(RecordingNotifier::default());
    let hooks = Arc::new(RecordingHooks::default());

    let ctx = ServiceContext::new(gateway.clone())
        .with_notifier(notifier.clone())
        .with_hooks(hooks.clone());
    let coordinator = StateCoordinator::new(Arc::new(ctx));

    (coordinator, gateway, notifier, hooks)
}

/// Backend holding `A(1, up)` and `B(2, down)`, in that order.
pub fn two_servers() -> Vec<Server> {
    vec![
        test_server(1, "10.0.0.1", ServerStatus::ServerUp),
        test_server(2, "10.0.0.2", ServerStatus::ServerDown),
    ]
}
