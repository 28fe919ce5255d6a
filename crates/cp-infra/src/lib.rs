pub mod image;
pub mod persistence;
pub mod time;

pub use image::FsImageStore;
pub use persistence::{InMemorySnapshotStore, JsonSnapshotStore};
pub use time::{ManualClock, SystemClock};
