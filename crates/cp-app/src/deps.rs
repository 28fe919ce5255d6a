//! # Engine Dependencies
//!
//! Plain grouping of the ports the history engine talks to.
//! Not a builder: no defaults, no hidden logic.

use std::sync::Arc;

use cp_core::ports::{AutostartPort, ClockPort, ImageStorePort, SnapshotStorePort};

pub struct EngineDeps {
    pub store: Arc<dyn SnapshotStorePort>,
    pub images: Arc<dyn ImageStorePort>,
    pub autostart: Arc<dyn AutostartPort>,
    pub clock: Arc<dyn ClockPort>,
}
