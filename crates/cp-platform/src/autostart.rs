//! Launch-at-login registration.
//!
//! Linux and the BSDs use an XDG autostart entry
//! (`$XDG_CONFIG_HOME/autostart/clippin.desktop`); macOS uses a per-user
//! LaunchAgent (`~/Library/LaunchAgents/app.clippin.plist`). The entry's
//! presence is the enabled state.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use cp_core::ports::AutostartPort;
use tracing::info;

const DESKTOP_ENTRY_NAME: &str = "clippin.desktop";
const LAUNCH_AGENT_LABEL: &str = "app.clippin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryFormat {
    XdgDesktop,
    LaunchAgent,
}

pub struct DesktopAutostart {
    entry_path: PathBuf,
    format: EntryFormat,
    executable: PathBuf,
}

impl DesktopAutostart {
    pub fn new(entry_path: impl Into<PathBuf>, format: EntryFormat, executable: impl Into<PathBuf>) -> Self {
        Self {
            entry_path: entry_path.into(),
            format,
            executable: executable.into(),
        }
    }

    /// Registration for the running executable on this OS.
    pub fn for_current_platform() -> Result<Self> {
        let executable = std::env::current_exe().context("resolve current executable")?;

        if cfg!(target_os = "macos") {
            let home = dirs::home_dir().context("home directory unavailable")?;
            let entry = home
                .join("Library/LaunchAgents")
                .join(format!("{LAUNCH_AGENT_LABEL}.plist"));
            Ok(Self::new(entry, EntryFormat::LaunchAgent, executable))
        } else if cfg!(unix) {
            let config = dirs::config_dir().context("config directory unavailable")?;
            let entry = config.join("autostart").join(DESKTOP_ENTRY_NAME);
            Ok(Self::new(entry, EntryFormat::XdgDesktop, executable))
        } else {
            bail!("launch at login is not supported on this platform")
        }
    }

    pub fn entry_path(&self) -> &Path {
        &self.entry_path
    }

    fn render(&self) -> String {
        let exec = self.executable.display();
        match self.format {
            EntryFormat::XdgDesktop => format!(
                "[Desktop Entry]\n\
                 Type=Application\n\
                 Name=ClipPin\n\
                 Comment=Clipboard history\n\
                 Exec=\"{exec}\"\n\
                 X-GNOME-Autostart-enabled=true\n\
                 NoDisplay=true\n"
            ),
            EntryFormat::LaunchAgent => format!(
                r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
    <key>Label</key>
    <string>{LAUNCH_AGENT_LABEL}</string>
    <key>ProgramArguments</key>
    <array>
        <string>{exec}</string>
    </array>
    <key>RunAtLoad</key>
    <true/>
</dict>
</plist>
"#
            ),
        }
    }
}

impl AutostartPort for DesktopAutostart {
    fn is_enabled(&self) -> Result<bool> {
        Ok(self.entry_path.is_file())
    }

    fn enable(&self) -> Result<()> {
        if let Some(dir) = self.entry_path.parent() {
            fs::create_dir_all(dir)
                .with_context(|| format!("create autostart dir failed: {}", dir.display()))?;
        }
        fs::write(&self.entry_path, self.render()).with_context(|| {
            format!("write autostart entry failed: {}", self.entry_path.display())
        })?;
        info!(entry = %self.entry_path.display(), "launch at login enabled");
        Ok(())
    }

    fn disable(&self) -> Result<()> {
        match fs::remove_file(&self.entry_path) {
            Ok(()) => {
                info!(entry = %self.entry_path.display(), "launch at login disabled");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| {
                format!("remove autostart entry failed: {}", self.entry_path.display())
            }),
        }
    }
}

/// Stand-in used where no registration mechanism exists.
pub struct UnsupportedAutostart;

impl AutostartPort for UnsupportedAutostart {
    fn is_enabled(&self) -> Result<bool> {
        Ok(false)
    }

    fn enable(&self) -> Result<()> {
        bail!("launch at login is not supported on this platform")
    }

    fn disable(&self) -> Result<()> {
        Ok(())
    }
}
