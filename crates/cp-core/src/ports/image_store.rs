use crate::clipboard::{ImageMetadata, RawImage};
use crate::ids::ItemId;
use crate::ports::errors::ImageStoreError;

/// File-backed storage for captured images and their thumbnails.
pub trait ImageStorePort: Send + Sync {
    /// Encodes and writes the image plus its 32×32 thumbnail, named after `id`.
    /// Nothing is written when the encoded image exceeds the size limit.
    fn save(&self, image: &RawImage, id: &ItemId) -> Result<ImageMetadata, ImageStoreError>;

    fn load(&self, filename: &str) -> Result<RawImage, ImageStoreError>;

    fn load_thumbnail(&self, filename: &str) -> Result<RawImage, ImageStoreError>;

    /// Removes both files; files already gone are not an error.
    fn delete(&self, metadata: &ImageMetadata) -> Result<(), ImageStoreError>;
}
