pub mod app_dirs;
pub mod autostart;
pub mod clipboard;

pub use app_dirs::DirsAppDirsAdapter;
pub use autostart::{DesktopAutostart, UnsupportedAutostart};
pub use clipboard::ArboardClipboard;
