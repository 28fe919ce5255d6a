//! The history engine: recent and pinned collections plus every rule that
//! mutates them.

mod capture;
mod deferred;
mod engine;
mod eviction;
mod pins;
mod preferences;
mod sanitize;

#[cfg(test)]
pub(crate) mod test_support;

pub use capture::{CaptureOutcome, RejectReason};
pub use deferred::DeferredDeletes;
pub use engine::{EngineSnapshot, HistoryEngine};
pub use eviction::{enforce_recent_caps, unreferenced_images};
pub use pins::PinOutcome;
