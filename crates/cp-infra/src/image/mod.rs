mod store;
mod thumbnail;

pub use store::FsImageStore;
pub use thumbnail::{aspect_fill_thumbnail, THUMBNAIL_EDGE};
