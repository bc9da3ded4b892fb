//! Stored preferences: two independent booleans in browser local storage.
//!
//! The pad keeps almost nothing — just whether the pencil sound plays and
//! whether the hidden version badge is shown. Both live under plain string
//! keys. Storage being unavailable (private browsing, embedded webviews) is
//! an expected environment, not an error: loads fall back to defaults and
//! writes become no-ops, with a warning so the condition shows up in a
//! console once.

use web_sys::Storage;

const SOUND_ENABLED_KEY: &str = "splotch-sound-enabled";
const VERSION_VISIBLE_KEY: &str = "splotch_version_visible";

/// The shell's persisted toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prefs {
    /// Pencil sound on stroke. Defaults on.
    pub sound_enabled: bool,
    /// Version badge visibility. Defaults hidden.
    pub version_visible: bool,
}

impl Default for Prefs {
    fn default() -> Self {
        Self { sound_enabled: true, version_visible: false }
    }
}

impl Prefs {
    /// Load both toggles from local storage, defaulting where absent.
    #[must_use]
    pub fn load() -> Self {
        let Some(storage) = local_storage() else {
            return Self::default();
        };
        Self {
            // Anything but an explicit opt-out keeps sound on.
            sound_enabled: read(&storage, SOUND_ENABLED_KEY) != Some(false),
            version_visible: read(&storage, VERSION_VISIBLE_KEY) == Some(true),
        }
    }

    /// Persist the sound toggle.
    pub fn save_sound_enabled(enabled: bool) {
        write(SOUND_ENABLED_KEY, enabled);
    }

    /// Persist the version-badge toggle.
    pub fn save_version_visible(visible: bool) {
        write(VERSION_VISIBLE_KEY, visible);
    }
}

fn local_storage() -> Option<Storage> {
    let storage = web_sys::window()?.local_storage().unwrap_or(None);
    if storage.is_none() {
        log::warn!("local storage unavailable; preferences will not persist");
    }
    storage
}

fn read(storage: &Storage, key: &str) -> Option<bool> {
    match storage.get_item(key) {
        Ok(Some(value)) => Some(value == "true"),
        Ok(None) | Err(_) => None,
    }
}

fn write(key: &str, value: bool) {
    let Some(storage) = local_storage() else {
        return;
    };
    if let Err(err) = storage.set_item(key, if value { "true" } else { "false" }) {
        log::warn!("failed to persist {key}: {err:?}");
    }
}
