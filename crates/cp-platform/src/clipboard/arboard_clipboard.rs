use std::borrow::Cow;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use arboard::{Clipboard, ImageData};
use cp_core::clipboard::RawImage;
use cp_core::ports::SystemClipboardPort;
use tracing::debug;

use super::generation::{image_fingerprint, next_generation, text_fingerprint, GenerationTracker};
use super::platform;

struct Inner {
    clipboard: Clipboard,
    tracker: GenerationTracker,
}

/// System clipboard through `arboard`.
///
/// The generation is the host's change count on macOS and Windows. Elsewhere
/// it is derived from a content fingerprint taken on every
/// `current_generation` call: text first, the image only when there is no
/// text.
pub struct ArboardClipboard {
    inner: Mutex<Inner>,
}

impl ArboardClipboard {
    pub fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("open system clipboard")?;
        Ok(Self {
            inner: Mutex::new(Inner {
                clipboard,
                tracker: GenerationTracker::new(),
            }),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| anyhow!("clipboard lock poisoned"))
    }
}

fn read_text(clipboard: &mut Clipboard) -> Result<Option<String>> {
    non_empty_text(clipboard.get_text())
}

fn non_empty_text(result: Result<String, arboard::Error>) -> Result<Option<String>> {
    match result {
        Ok(text) if text.is_empty() => Ok(None),
        Ok(text) => Ok(Some(text)),
        Err(arboard::Error::ContentNotAvailable) => Ok(None),
        Err(e) => Err(e).context("read clipboard text"),
    }
}

fn read_image(clipboard: &mut Clipboard) -> Result<Option<ImageData<'static>>> {
    match clipboard.get_image() {
        Ok(image) => Ok(Some(image)),
        Err(arboard::Error::ContentNotAvailable) => Ok(None),
        Err(e) => Err(e).context("read clipboard image"),
    }
}

impl SystemClipboardPort for ArboardClipboard {
    fn current_generation(&self) -> Result<u64> {
        let mut guard = self.lock()?;
        let Inner { clipboard, tracker } = &mut *guard;
        next_generation(platform::change_count(), tracker, || {
            Ok(match read_text(clipboard)? {
                Some(text) => Some(text_fingerprint(&text)),
                None => read_image(clipboard)?
                    .map(|image| image_fingerprint(image.width, image.height, &image.bytes)),
            })
        })
    }

    fn read_text(&self) -> Result<Option<String>> {
        let mut inner = self.lock()?;
        read_text(&mut inner.clipboard)
    }

    fn read_image(&self) -> Result<Option<RawImage>> {
        let mut inner = self.lock()?;
        let Some(image) = read_image(&mut inner.clipboard)? else {
            return Ok(None);
        };
        let width = u32::try_from(image.width).context("clipboard image width exceeds u32")?;
        let height = u32::try_from(image.height).context("clipboard image height exceeds u32")?;
        Ok(Some(RawImage::new(width, height, image.bytes.into_owned())))
    }

    fn write_text(&self, text: &str) -> Result<()> {
        let mut inner = self.lock()?;
        inner
            .clipboard
            .set_text(text.to_owned())
            .context("write clipboard text")?;
        debug!(len = text.len(), "text written to clipboard");
        Ok(())
    }

    fn write_image(&self, image: &RawImage) -> Result<()> {
        let mut inner = self.lock()?;
        inner
            .clipboard
            .set_image(ImageData {
                width: image.width as usize,
                height: image.height as usize,
                bytes: Cow::Borrowed(&image.rgba),
            })
            .context("write clipboard image")?;
        debug!(width = image.width, height = image.height, "image written to clipboard");
        Ok(())
    }
}
