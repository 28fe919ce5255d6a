use cp_core::settings::Preferences;
use serde::Serialize;

/// Change notifications published by the history engine.
///
/// Delivered over a `tokio::sync::broadcast` channel; slow subscribers may
/// observe `Lagged` and should re-read a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EngineEvent {
    HistoryChanged,
    PinsChanged,
    PreferencesChanged(Preferences),
    CaptureRejected { reason: String },
}
