use anyhow::Result;
use sha2::{Digest, Sha256};

pub type Fingerprint = [u8; 32];

/// Picks the clipboard generation for one poll.
///
/// A native change count is used as is, so re-copying identical content
/// still moves it. Without one, `fingerprint` reads the content and the
/// tracker turns it into a counter.
pub fn next_generation(
    native: Option<u64>,
    tracker: &mut GenerationTracker,
    fingerprint: impl FnOnce() -> Result<Option<Fingerprint>>,
) -> Result<u64> {
    match native {
        Some(count) => Ok(count),
        None => Ok(tracker.observe(fingerprint()?)),
    }
}

/// Synthesizes a clipboard generation counter from content fingerprints, for
/// hosts whose clipboard API has no change count.
///
/// The counter moves whenever the observed fingerprint differs from the last
/// one, so it never decreases.
#[derive(Debug, Default)]
pub struct GenerationTracker {
    last: Option<Fingerprint>,
    generation: u64,
}

impl GenerationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, fingerprint: Option<Fingerprint>) -> u64 {
        if fingerprint != self.last {
            self.last = fingerprint;
            self.generation += 1;
        }
        self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

pub fn text_fingerprint(text: &str) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(b"text:");
    hasher.update(text.as_bytes());
    hasher.finalize().into()
}

pub fn image_fingerprint(width: usize, height: usize, bytes: &[u8]) -> Fingerprint {
    let mut hasher = Sha256::new();
    hasher.update(b"image:");
    hasher.update((width as u64).to_le_bytes());
    hasher.update((height as u64).to_le_bytes());
    hasher.update(bytes);
    hasher.finalize().into()
}
