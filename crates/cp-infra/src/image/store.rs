use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use cp_core::clipboard::{ImageMetadata, RawImage, IMAGE_FORMAT_PNG};
use cp_core::ids::ItemId;
use cp_core::ports::{ImageStoreError, ImageStorePort};
use image::{DynamicImage, ImageFormat, RgbaImage};
use tracing::{debug, warn};

use super::thumbnail::{aspect_fill_thumbnail, THUMBNAIL_EDGE};

/// PNG files under one directory: `<id>.png` and `<id>_thumb.png`.
pub struct FsImageStore {
    dir: PathBuf,
    max_image_bytes: u64,
}

impl FsImageStore {
    pub fn new(dir: impl Into<PathBuf>, max_image_bytes: u64) -> Self {
        Self {
            dir: dir.into(),
            max_image_bytes,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn full_filename(id: &ItemId) -> String {
        format!("{id}.png")
    }

    pub fn thumbnail_filename(id: &ItemId) -> String {
        format!("{id}_thumb.png")
    }

    fn resolve(&self, filename: &str) -> Result<PathBuf, ImageStoreError> {
        validate_filename(filename)?;
        Ok(self.dir.join(filename))
    }

    fn read_png(&self, filename: &str) -> Result<RawImage, ImageStoreError> {
        let path = self.resolve(filename)?;
        let bytes = fs::read(&path)?;
        let decoded = image::load_from_memory_with_format(&bytes, ImageFormat::Png)
            .map_err(|e| ImageStoreError::EncodingFailed(format!("decode {filename}: {e}")))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(RawImage::new(width, height, rgba.into_raw()))
    }

    fn remove_if_present(path: &Path) -> io::Result<()> {
        match fs::remove_file(path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
            _ => Ok(()),
        }
    }
}

impl ImageStorePort for FsImageStore {
    fn save(&self, image: &RawImage, id: &ItemId) -> Result<ImageMetadata, ImageStoreError> {
        let filename = Self::full_filename(id);
        let thumbnail_filename = Self::thumbnail_filename(id);
        let full_path = self.resolve(&filename)?;
        let thumb_path = self.resolve(&thumbnail_filename)?;

        if !image.is_well_formed() {
            return Err(ImageStoreError::EncodingFailed(format!(
                "pixel buffer of {} bytes does not match {}x{} rgba",
                image.rgba.len(),
                image.width,
                image.height
            )));
        }
        let rgba = RgbaImage::from_raw(image.width, image.height, image.rgba.clone())
            .ok_or_else(|| ImageStoreError::EncodingFailed("invalid rgba buffer".to_string()))?;

        let full_bytes = encode_png(&rgba).map_err(ImageStoreError::EncodingFailed)?;
        let size = full_bytes.len() as u64;
        if size > self.max_image_bytes {
            return Err(ImageStoreError::ImageTooLarge {
                size,
                limit: self.max_image_bytes,
            });
        }

        let thumbnail = aspect_fill_thumbnail(&rgba, THUMBNAIL_EDGE);
        let thumb_bytes = encode_png(&thumbnail).map_err(ImageStoreError::ThumbnailFailed)?;

        fs::create_dir_all(&self.dir)?;
        fs::write(&full_path, &full_bytes)?;
        if let Err(e) = fs::write(&thumb_path, &thumb_bytes) {
            if let Err(cleanup) = Self::remove_if_present(&full_path) {
                warn!(error = %cleanup, path = %full_path.display(), "failed to remove orphaned image");
            }
            return Err(ImageStoreError::ThumbnailFailed(format!(
                "write {}: {e}",
                thumb_path.display()
            )));
        }

        debug!(item_id = %id, width = image.width, height = image.height, size, "image saved");

        Ok(ImageMetadata {
            width: image.width,
            height: image.height,
            format: IMAGE_FORMAT_PNG.to_string(),
            file_size: size,
            filename,
            thumbnail_filename,
        })
    }

    fn load(&self, filename: &str) -> Result<RawImage, ImageStoreError> {
        self.read_png(filename)
    }

    fn load_thumbnail(&self, filename: &str) -> Result<RawImage, ImageStoreError> {
        self.read_png(filename)
    }

    fn delete(&self, metadata: &ImageMetadata) -> Result<(), ImageStoreError> {
        for name in [&metadata.filename, &metadata.thumbnail_filename] {
            let path = self.resolve(name)?;
            Self::remove_if_present(&path)?;
        }
        debug!(filename = %metadata.filename, "image files deleted");
        Ok(())
    }
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, String> {
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(image.clone())
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| e.to_string())?;
    Ok(bytes)
}

// Filenames come from snapshots on disk; keep them inside the image directory.
fn validate_filename(filename: &str) -> Result<(), ImageStoreError> {
    let invalid = filename.is_empty()
        || filename == "."
        || filename == ".."
        || filename.contains(|c: char| c == '/' || c == '\\' || c == '\0');
    if invalid {
        return Err(ImageStoreError::InvalidFilename(filename.to_string()));
    }
    Ok(())
}
