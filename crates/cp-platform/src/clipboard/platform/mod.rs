//! Native clipboard change counters.
//!
//! `change_count` reads the host's own counter without touching the
//! clipboard payload. It returns `None` where the host has no counter or it
//! could not be read, and callers fall back to content fingerprints.

#[cfg(target_os = "macos")]
mod macos;
#[cfg(windows)]
mod windows;

#[cfg(target_os = "macos")]
pub use macos::change_count;
#[cfg(windows)]
pub use windows::change_count;

#[cfg(not(any(target_os = "macos", windows)))]
pub fn change_count() -> Option<u64> {
    None
}
