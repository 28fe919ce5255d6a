mod arboard_clipboard;
mod generation;
mod platform;

pub use arboard_clipboard::ArboardClipboard;
pub use generation::GenerationTracker;
