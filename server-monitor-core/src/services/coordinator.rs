//! 状态协调器

use std::sync::Arc;

use futures::stream::BoxStream;
use server_monitor_gateway::{Envelope, Server, ServerDraft, StatusFilter, TransportError};
use tokio::sync::watch;

use crate::error::{CoreError, CoreResult};
use crate::services::{ActionHandle, ReportService, ServiceContext};
use crate::state::{FilterSignal, SnapshotPatch, SnapshotStore, StateCell};
use crate::types::{ActionPhase, ServerReport, ViewEvent, ViewState};

/// Turns gateway calls into view-states and keeps the snapshot consistent.
///
/// Cloning is cheap; clones share the same state. Every action publishes its
/// pending view-state synchronously, then runs on a spawned tokio task and must
/// therefore be called from within a runtime.
///
/// Actions are not serialized. Each one patches the snapshot as it is when the
/// gateway answers, so overlapping actions compose and the last write wins.
#[derive(Clone)]
pub struct StateCoordinator {
    inner: Arc<Inner>,
}

struct Inner {
    ctx: Arc<ServiceContext>,
    snapshot: SnapshotStore,
    filter_signal: FilterSignal,
    saving: StateCell<bool>,
    view: StateCell<ViewState>,
    main: StateCell<Option<ActionHandle>>,
    /// Status the snapshot is currently narrowed to.
    active_filter: StateCell<StatusFilter>,
}

impl StateCoordinator {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            inner: Arc::new(Inner {
                ctx,
                snapshot: SnapshotStore::new(),
                filter_signal: FilterSignal::new(),
                saving: StateCell::new(false),
                view: StateCell::default(),
                main: StateCell::new(None),
                active_filter: StateCell::default(),
            }),
        }
    }

    // ============ 渲染层观察接口 ============

    /// Handle of the most recently issued action, `None` before the first one.
    pub fn app_state(&self) -> Option<ActionHandle> {
        self.inner.main.current()
    }

    /// Latest view-state emitted by any action. Starts as `Loading`.
    pub fn view(&self) -> watch::Receiver<ViewState> {
        self.inner.view.watch()
    }

    /// [`view`](Self::view) as a stream: current value first, then every change.
    pub fn view_stream(&self) -> BoxStream<'static, ViewState> {
        self.inner.view.subscribe()
    }

    /// Address being pinged, or empty.
    pub fn filter_signal(&self) -> BoxStream<'static, String> {
        self.inner.filter_signal.subscribe()
    }

    pub fn pinging(&self) -> String {
        self.inner.filter_signal.current()
    }

    /// `true` while a save is in flight.
    pub fn saving(&self) -> BoxStream<'static, bool> {
        self.inner.saving.subscribe()
    }

    pub fn is_saving(&self) -> bool {
        self.inner.saving.current()
    }

    pub fn snapshot(&self) -> Option<Arc<Envelope>> {
        self.inner.snapshot.current()
    }

    pub fn snapshot_version(&self) -> u64 {
        self.inner.snapshot.version()
    }

    /// Status the snapshot is narrowed to; `ALL` after a load.
    pub fn active_filter(&self) -> StatusFilter {
        self.inner.active_filter.current()
    }

    // ============ 动作 ============

    /// Fetches the full listing and stores it newest-first.
    pub fn load(&self) -> ActionHandle {
        let (handle, settler) = self.begin("load", None);
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let outcome = inner.load().await;
            settler.settle(outcome.as_ref());
        });
        handle
    }

    /// Pings one server and patches its status in place.
    ///
    /// The previous view stays loaded while the ping runs; the pinged address is
    /// published through [`filter_signal`](Self::filter_signal) until it ends.
    /// Surrounding whitespace is trimmed, so the signal matches the row's address.
    ///
    /// The signal holds one address. Overlapping pings overwrite it, and the first
    /// one to settle clears it while the others are still in flight.
    pub fn ping(&self, ip_address: impl Into<String>) -> ActionHandle {
        let ip_address = ip_address.into().trim().to_string();
        self.inner.filter_signal.set(ip_address.clone());
        let (handle, settler) = self.begin("ping", self.optimistic());
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let outcome = inner.ping(&ip_address).await;
            inner.filter_signal.clear();
            settler.settle(outcome.as_ref());
        });
        handle
    }

    /// Filters the snapshot by status. The result replaces the snapshot.
    pub fn filter_servers(&self, status: StatusFilter) -> ActionHandle {
        let (handle, settler) = self.begin("filter_servers", self.optimistic());
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let outcome = inner.filter(status).await;
            settler.settle(outcome.as_ref());
        });
        handle
    }

    /// Creates a server and puts it first in the snapshot.
    ///
    /// On success the hooks are told about the new server and asked to reset the
    /// form. The saving flag is back to `false` before the terminal view-state is
    /// published, whatever the outcome.
    pub fn save_server(&self, draft: ServerDraft) -> ActionHandle {
        self.inner.saving.set(true);
        let (handle, settler) = self.begin("save_server", None);
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let outcome = inner.create(&draft).await;
            inner.saving.set(false);
            if let Ok((_, server)) = &outcome {
                inner.ctx.hooks.on_server_saved(server);
                inner.ctx.hooks.reset_form(ServerDraft::default());
            }
            settler.settle(outcome.as_ref().map(|(envelope, _)| envelope));
        });
        handle
    }

    /// Deletes a server and drops it from the snapshot.
    pub fn delete_server(&self, id: i64) -> ActionHandle {
        let (handle, settler) = self.begin("delete_server", self.optimistic());
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let outcome = inner.delete(id).await;
            settler.settle(outcome.as_ref());
        });
        handle
    }

    /// Exports the current snapshot. Does not change any state.
    pub fn print_report(&self) -> CoreResult<ServerReport> {
        let notifier = &self.inner.ctx.notifier;
        let Some(snapshot) = self.inner.snapshot.current() else {
            let err = CoreError::NoSnapshot;
            log::warn!("[print_report] {err}");
            notifier.notify_error(&err.to_string());
            return Err(err);
        };

        let report = ReportService::build(snapshot.servers().unwrap_or_default());
        log::info!(
            "[print_report] {} rows exported to {}",
            report.row_count,
            report.file_name
        );
        notifier.notify("Report downloaded");
        Ok(report)
    }

    // ============ 内部 ============

    fn optimistic(&self) -> Option<Envelope> {
        self.inner.snapshot.current().map(|snapshot| (*snapshot).clone())
    }

    /// Publishes the pending view-state and hands back the settling half.
    fn begin(
        &self,
        action: &'static str,
        optimistic: Option<Envelope>,
    ) -> (ActionHandle, Settler) {
        let phase = ActionPhase::begin(optimistic);
        let pending = phase.view().clone();
        let (tx, rx) = watch::channel(phase.clone());
        let handle = ActionHandle::new(action, pending.clone(), rx);

        log::debug!("[{action}] pending");
        self.inner.view.set(pending);
        self.inner.main.set(Some(handle.clone()));

        let settler = Settler {
            action,
            phase,
            tx,
            inner: Arc::clone(&self.inner),
        };
        (handle, settler)
    }
}

/// Settling half of an action.
struct Settler {
    action: &'static str,
    phase: ActionPhase,
    tx: watch::Sender<ActionPhase>,
    inner: Arc<Inner>,
}

impl Settler {
    /// Notifies, then publishes the terminal view-state.
    fn settle(self, outcome: Result<&Envelope, &CoreError>) {
        let notifier = &self.inner.ctx.notifier;
        let event = match outcome {
            Ok(envelope) => {
                log::info!("[{}] {}", self.action, envelope.message_text());
                notifier.notify(envelope.message_text());
                ViewEvent::Resolved(envelope.clone())
            }
            Err(e) => {
                if e.is_expected() {
                    log::warn!("[{}] {e}", self.action);
                } else {
                    log::error!("[{}] {e}", self.action);
                }
                let message = e.to_string();
                notifier.notify_error(&message);
                ViewEvent::Failed(message)
            }
        };

        self.publish(self.phase.clone().next(event));
    }

    fn publish(&self, settled: ActionPhase) {
        self.inner.view.set(settled.view().clone());
        self.tx.send_replace(settled);
    }
}

/// A task that unwinds before settling still ends its action, as an `Error`.
impl Drop for Settler {
    fn drop(&mut self) {
        let settled = self.tx.borrow().is_settled();
        if settled {
            return;
        }
        let err = CoreError::ActionAbandoned(self.action.to_string());
        log::error!("[{}] {err}", self.action);
        self.publish(self.phase.clone().next(ViewEvent::Failed(err.to_string())));
    }
}

impl Inner {
    fn current_or_empty(&self) -> Arc<Envelope> {
        self.snapshot
            .current()
            .unwrap_or_else(|| Arc::new(Envelope::with_servers(Vec::new())))
    }

    async fn load(&self) -> CoreResult<Envelope> {
        let listing = self.ctx.gateway.list().await?;
        let newest_first = listing.reversed();
        self.snapshot.replace(newest_first.clone());
        self.active_filter.set(StatusFilter::All);
        Ok(newest_first)
    }

    async fn ping(&self, ip_address: &str) -> CoreResult<Envelope> {
        let response = self.ctx.gateway.ping(ip_address).await?;
        let server = single_server(&response)?;
        let patched = self
            .current_or_empty()
            .with_server_replaced(server)?
            .with_metadata_of(&response);
        self.snapshot.replace(patched.clone());
        Ok(patched)
    }

    async fn filter(&self, status: StatusFilter) -> CoreResult<Envelope> {
        let current = self.current_or_empty();
        let narrowed_to = self.active_filter.current();
        if status == StatusFilter::All && narrowed_to != StatusFilter::All {
            log::warn!(
                "[filter_servers] ALL keeps the snapshot narrowed to {narrowed_to}; \
                 other servers come back on the next load"
            );
        }

        let filtered = self.ctx.gateway.filter(status, &current).await?;
        // The backend answers oldest-first; ALL is the snapshot itself.
        let filtered = if status == StatusFilter::All {
            filtered
        } else {
            filtered.reversed()
        };
        self.snapshot.replace(filtered.clone());
        if status != StatusFilter::All {
            self.active_filter.set(status);
        }
        Ok(filtered)
    }

    async fn create(&self, draft: &ServerDraft) -> CoreResult<(Envelope, Server)> {
        let response = self.ctx.gateway.create(draft).await?;
        let server = single_server(&response)?.clone();
        let patched = self
            .current_or_empty()
            .with_server_prepended(server.clone())
            .with_metadata_of(&response);
        self.snapshot.replace(patched.clone());
        Ok((patched, server))
    }

    async fn delete(&self, id: i64) -> CoreResult<Envelope> {
        let response = self.ctx.gateway.delete(id).await?;
        let patched = self
            .current_or_empty()
            .without_server(id)
            .with_metadata_of(&response);
        self.snapshot.replace(patched.clone());
        Ok(patched)
    }
}

fn single_server(response: &Envelope) -> CoreResult<&Server> {
    response.server().ok_or_else(|| {
        TransportError::UnexpectedPayload {
            expected: "server".to_string(),
        }
        .into()
    })
}
