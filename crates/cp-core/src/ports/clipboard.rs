use anyhow::Result;

use crate::clipboard::RawImage;

/// The shared system clipboard.
///
/// `current_generation` changes whenever the clipboard content changes,
/// including after this process writes to it. `read_text` returns `None`
/// when there is no text or the text is empty.
pub trait SystemClipboardPort: Send + Sync {
    fn current_generation(&self) -> Result<u64>;
    fn read_text(&self) -> Result<Option<String>>;
    fn read_image(&self) -> Result<Option<RawImage>>;
    fn write_text(&self, text: &str) -> Result<()>;
    fn write_image(&self, image: &RawImage) -> Result<()>;
}
