//! # cp-app
//!
//! Application layer for ClipPin. The [`HistoryEngine`] owns the recent and
//! pinned collections and every mutation rule; the [`ClipboardPoller`] feeds it
//! from the system clipboard; the [`EngineRuntime`] drives both on a single
//! task and serves commands from an [`EngineHandle`].

pub mod app_paths;
pub mod deps;
pub mod events;
pub mod history;
pub mod poller;
pub mod runtime;

pub use app_paths::AppPaths;
pub use deps::EngineDeps;
pub use events::EngineEvent;
pub use history::{
    CaptureOutcome, EngineSnapshot, HistoryEngine, PinOutcome, RejectReason,
};
pub use poller::{ClipboardPoller, TickOutcome};
pub use runtime::{EngineError, EngineHandle, EngineRuntime};
