use cp_core::settings::Preferences;
use tracing::{info, info_span, warn};

use super::engine::HistoryEngine;
use super::eviction::enforce_recent_caps;

impl HistoryEngine {
    /// Replaces the preferences, persists them and applies side effects:
    /// launch-at-login registration, a lowered history cap, and pause
    /// bookkeeping.
    pub fn update_preferences(&mut self, preferences: Preferences) {
        let _span = info_span!("engine.update_preferences").entered();

        let old = std::mem::replace(&mut self.preferences, preferences);

        if old.launch_at_login != self.preferences.launch_at_login {
            self.apply_launch_at_login(self.preferences.launch_at_login);
        }

        if old.is_paused != self.preferences.is_paused {
            self.on_pause_toggled();
        }

        if self.preferences.max_history_items < old.max_history_items {
            let evicted = enforce_recent_caps(
                &mut self.recent,
                self.preferences.max_history_items,
                self.config.max_images,
            );
            if !evicted.is_empty() {
                info!(count = evicted.len(), "history trimmed to the new cap");
                self.history_changed();
                self.reclaim_images(&evicted);
            }
        }

        info!(
            paused = self.preferences.is_paused,
            launch_at_login = self.preferences.launch_at_login,
            max_history_items = self.preferences.max_history_items,
            "preferences updated"
        );
        self.preferences_changed();
    }

    /// Pauses or resumes capture.
    pub fn set_paused(&mut self, paused: bool) {
        if self.preferences.is_paused == paused {
            return;
        }
        self.preferences.is_paused = paused;
        self.on_pause_toggled();
        info!(paused, "capture pause toggled");
        self.preferences_changed();
    }

    fn on_pause_toggled(&mut self) {
        if self.preferences.is_paused {
            let now = self.now();
            self.arm_auto_resume(now);
        } else {
            self.resume_at = None;
        }
    }

    fn apply_launch_at_login(&self, enabled: bool) {
        let result = if enabled {
            self.deps.autostart.enable()
        } else {
            self.deps.autostart.disable()
        };
        if let Err(e) = result {
            warn!(error = %e, enabled, "failed to update launch at login");
        }
    }
}
