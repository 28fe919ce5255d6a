use chrono::{DateTime, Utc};
use cp_core::ids::ItemId;
use cp_core::settings::Preferences;
use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{debug, info, trace, warn};

use crate::events::EngineEvent;
use crate::history::{EngineSnapshot, HistoryEngine, PinOutcome};
use crate::poller::{ClipboardPoller, TickOutcome};

const COMMAND_CHANNEL_CAPACITY: usize = 32;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("engine runtime is not running")]
    RuntimeClosed,
    #[error("clipboard operation failed: {0}")]
    Clipboard(String),
}

enum EngineCommand {
    Snapshot(oneshot::Sender<EngineSnapshot>),
    Pin(ItemId, oneshot::Sender<PinOutcome>),
    Unpin(ItemId, oneshot::Sender<bool>),
    Delete(ItemId, oneshot::Sender<bool>),
    CopyToClipboard(ItemId, oneshot::Sender<Result<bool, EngineError>>),
    ClearHistory(oneshot::Sender<()>),
    UpdatePreferences(Box<Preferences>, oneshot::Sender<()>),
    SetPaused(bool, oneshot::Sender<()>),
    DismissPinSuggestion(ItemId, oneshot::Sender<bool>),
    Shutdown,
}

/// Drives the engine: poll ticks, scheduled deadlines and commands, all on
/// the task that calls [`EngineRuntime::run`].
pub struct EngineRuntime {
    engine: HistoryEngine,
    poller: ClipboardPoller,
    command_rx: mpsc::Receiver<EngineCommand>,
    shutting_down: bool,
}

impl EngineRuntime {
    pub fn new(engine: HistoryEngine, poller: ClipboardPoller) -> (Self, EngineHandle) {
        let (command_tx, command_rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
        let handle = EngineHandle {
            command_tx,
            events: engine.event_sender(),
        };
        let runtime = Self {
            engine,
            poller,
            command_rx,
            shutting_down: false,
        };
        (runtime, handle)
    }

    /// Runs until [`EngineHandle::shutdown`] is called or every handle is
    /// dropped.
    pub async fn run(mut self) {
        if let Err(e) = self.poller.prime() {
            warn!(error = %e, "failed to prime clipboard poller");
        }

        let mut interval = tokio::time::interval(self.engine.config().poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        info!(
            interval_ms = self.engine.config().poll_interval.as_millis() as u64,
            "engine runtime started"
        );

        while !self.shutting_down {
            let deadline = self.engine.next_scheduled_at().map(|at| self.instant_for(at));
            tokio::select! {
                _ = interval.tick() => self.on_tick(),
                _ = sleep_until(deadline) => {
                    let now = self.engine.now();
                    self.engine.run_scheduled(now);
                }
                command = self.command_rx.recv() => match command {
                    Some(command) => self.handle_command(command),
                    None => {
                        debug!("all engine handles dropped");
                        self.shutting_down = true;
                    }
                },
            }
        }
        info!("engine runtime stopped");
    }

    fn instant_for(&self, at: DateTime<Utc>) -> Instant {
        let delay = (at - self.engine.now()).to_std().unwrap_or_default();
        Instant::now() + delay
    }

    fn on_tick(&mut self) {
        match self.poller.tick(&mut self.engine) {
            Ok(TickOutcome::Captured(outcome)) => debug!(?outcome, "clipboard captured"),
            Ok(TickOutcome::Rejected(reason)) => warn!(%reason, "clipboard capture rejected"),
            Ok(outcome) => trace!(?outcome, "poll tick"),
            Err(e) => warn!(error = %e, "clipboard poll failed"),
        }
    }

    fn handle_command(&mut self, command: EngineCommand) {
        // A dropped reply receiver only means the caller stopped waiting.
        match command {
            EngineCommand::Snapshot(reply) => {
                let _ = reply.send(self.engine.snapshot());
            }
            EngineCommand::Pin(id, reply) => {
                let _ = reply.send(self.engine.pin(&id));
            }
            EngineCommand::Unpin(id, reply) => {
                let _ = reply.send(self.engine.unpin(&id));
            }
            EngineCommand::Delete(id, reply) => {
                let _ = reply.send(self.engine.delete(&id));
            }
            EngineCommand::CopyToClipboard(id, reply) => {
                let result = self
                    .poller
                    .copy_to_clipboard(&self.engine, &id)
                    .map_err(|e| EngineError::Clipboard(format!("{e:#}")));
                let _ = reply.send(result);
            }
            EngineCommand::ClearHistory(reply) => {
                self.engine.clear_history();
                let _ = reply.send(());
            }
            EngineCommand::UpdatePreferences(preferences, reply) => {
                self.engine.update_preferences(*preferences);
                let _ = reply.send(());
            }
            EngineCommand::SetPaused(paused, reply) => {
                self.engine.set_paused(paused);
                let _ = reply.send(());
            }
            EngineCommand::DismissPinSuggestion(id, reply) => {
                let _ = reply.send(self.engine.dismiss_pin_suggestion(&id));
            }
            EngineCommand::Shutdown => {
                info!("engine runtime shutting down");
                self.shutting_down = true;
            }
        }
    }
}

async fn sleep_until(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Cloneable front door to a running [`EngineRuntime`].
#[derive(Clone)]
pub struct EngineHandle {
    command_tx: mpsc::Sender<EngineCommand>,
    events: broadcast::Sender<EngineEvent>,
}

impl EngineHandle {
    pub fn subscribe(&self) -> broadcast::Receiver<EngineEvent> {
        self.events.subscribe()
    }

    pub async fn snapshot(&self) -> Result<EngineSnapshot, EngineError> {
        self.request(EngineCommand::Snapshot).await
    }

    pub async fn pin(&self, id: ItemId) -> Result<PinOutcome, EngineError> {
        self.request(|reply| EngineCommand::Pin(id, reply)).await
    }

    pub async fn unpin(&self, id: ItemId) -> Result<bool, EngineError> {
        self.request(|reply| EngineCommand::Unpin(id, reply)).await
    }

    pub async fn delete(&self, id: ItemId) -> Result<bool, EngineError> {
        self.request(|reply| EngineCommand::Delete(id, reply)).await
    }

    pub async fn copy_to_clipboard(&self, id: ItemId) -> Result<bool, EngineError> {
        self.request(|reply| EngineCommand::CopyToClipboard(id, reply))
            .await?
    }

    pub async fn clear_history(&self) -> Result<(), EngineError> {
        self.request(EngineCommand::ClearHistory).await
    }

    pub async fn update_preferences(&self, preferences: Preferences) -> Result<(), EngineError> {
        self.request(|reply| EngineCommand::UpdatePreferences(Box::new(preferences), reply))
            .await
    }

    pub async fn set_paused(&self, paused: bool) -> Result<(), EngineError> {
        self.request(|reply| EngineCommand::SetPaused(paused, reply))
            .await
    }

    pub async fn dismiss_pin_suggestion(&self, id: ItemId) -> Result<bool, EngineError> {
        self.request(|reply| EngineCommand::DismissPinSuggestion(id, reply))
            .await
    }

    /// Asks the runtime to stop. Succeeds if it has already stopped.
    pub async fn shutdown(&self) -> Result<(), EngineError> {
        if self.command_tx.send(EngineCommand::Shutdown).await.is_err() {
            debug!("engine runtime already stopped");
        }
        Ok(())
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> EngineCommand,
    ) -> Result<T, EngineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.command_tx
            .send(command(reply_tx))
            .await
            .map_err(|_| EngineError::RuntimeClosed)?;
        reply_rx.await.map_err(|_| EngineError::RuntimeClosed)
    }
}
