//! Port interfaces for the application layer
//!
//! Ports define the contract between the history engine and the adapters in
//! `cp-infra` and `cp-platform`. The engine is driven from a single task, so
//! every port is synchronous.

pub mod app_dirs;
pub mod autostart;
pub mod clipboard;
mod clock;
pub mod errors;
pub mod image_store;
pub mod snapshot_store;

pub use app_dirs::AppDirsPort;
pub use autostart::AutostartPort;
pub use clipboard::SystemClipboardPort;
pub use clock::ClockPort;
pub use errors::{AppDirsError, ImageStoreError, PersistenceError};
pub use image_store::ImageStorePort;
pub use snapshot_store::{ItemCollection, SnapshotKind, SnapshotStorePort};
