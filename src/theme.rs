use thiserror::Error;

use crate::models::ThemeMode;
use crate::storage::{Storage, StorageError};

const THEME_KEY: &str = "themeMode";

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),
}

/// Host appearance used to resolve the `system` mode. In a terminal there is
/// no reliable way to ask the emulator, so this comes from the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Appearance {
    #[default]
    Light,
    Dark,
}

impl Appearance {
    pub fn parse(s: &str) -> Option<Appearance> {
        match s {
            "light" => Some(Appearance::Light),
            "dark" => Some(Appearance::Dark),
            _ => None,
        }
    }
}

/// A resolved color palette. Colors are hex strings parsed at render time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    pub mode: ThemeMode,
    pub primary: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub border: &'static str,
    pub header_start: &'static str,
    pub header_end: &'static str,
    pub success: &'static str,
    pub error: &'static str,
}

pub const LIGHT: Palette = Palette {
    mode: ThemeMode::Light,
    primary: "#7C3AED",
    background: "#FFFFFF",
    surface: "#F3F3F5",
    text: "#030213",
    text_secondary: "#71717A",
    border: "#E5E5E5",
    header_start: "#9333EA",
    header_end: "#7C3AED",
    success: "#059669",
    error: "#DC2626",
};

pub const DARK: Palette = Palette {
    mode: ThemeMode::Dark,
    primary: "#A78BFA",
    background: "#0F172A",
    surface: "#1E293B",
    text: "#F1F5F9",
    text_secondary: "#94A3B8",
    border: "#334155",
    header_start: "#6366F1",
    header_end: "#4F46E5",
    success: "#10B981",
    error: "#EF4444",
};

/// Resolve a theme mode against the host appearance.
pub fn resolve(mode: ThemeMode, appearance: Appearance) -> &'static Palette {
    match mode {
        ThemeMode::Light => &LIGHT,
        ThemeMode::Dark => &DARK,
        ThemeMode::System => match appearance {
            Appearance::Dark => &DARK,
            Appearance::Light => &LIGHT,
        },
    }
}

/// The persisted light/dark/system preference.
///
/// Stored as a bare string rather than a JSON document; an unknown stored
/// value falls back to `system`.
pub struct ThemeStore<'a, S: Storage> {
    storage: &'a S,
}

impl<'a, S: Storage> ThemeStore<'a, S> {
    pub fn new(storage: &'a S) -> Self {
        Self { storage }
    }

    pub fn load(&self) -> Result<ThemeMode, ThemeError> {
        let mode = self
            .storage
            .get(THEME_KEY)?
            .as_deref()
            .and_then(ThemeMode::parse)
            .unwrap_or_default();
        Ok(mode)
    }

    pub fn set_mode(&self, mode: ThemeMode) -> Result<(), ThemeError> {
        self.storage.set(THEME_KEY, mode.as_str())?;
        Ok(())
    }

    /// Flip between light and dark based on the currently resolved palette.
    /// Toggling never lands on `system`; an explicit choice replaces it.
    pub fn toggle(&self, appearance: Appearance) -> Result<ThemeMode, ThemeError> {
        let current = resolve(self.load()?, appearance);
        let next = match current.mode {
            ThemeMode::Light => ThemeMode::Dark,
            _ => ThemeMode::Light,
        };
        self.set_mode(next)?;
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn defaults_to_system_and_stores_bare_strings() {
        let storage = MemoryStorage::new();
        let store = ThemeStore::new(&storage);
        assert_eq!(store.load().unwrap(), ThemeMode::System);

        store.set_mode(ThemeMode::Dark).unwrap();
        assert_eq!(storage.get("themeMode").unwrap().unwrap(), "dark");
        assert_eq!(store.load().unwrap(), ThemeMode::Dark);
    }

    #[test]
    fn unknown_stored_value_falls_back_to_system() {
        let storage = MemoryStorage::new();
        storage.set("themeMode", "sepia").unwrap();
        let store = ThemeStore::new(&storage);
        assert_eq!(store.load().unwrap(), ThemeMode::System);
    }

    #[test]
    fn system_mode_follows_the_host_appearance() {
        assert_eq!(resolve(ThemeMode::System, Appearance::Dark).mode, ThemeMode::Dark);
        assert_eq!(resolve(ThemeMode::System, Appearance::Light).mode, ThemeMode::Light);
        assert_eq!(resolve(ThemeMode::Dark, Appearance::Light).mode, ThemeMode::Dark);
    }

    #[test]
    fn toggle_flips_the_resolved_palette() {
        let storage = MemoryStorage::new();
        let store = ThemeStore::new(&storage);

        // system + light host resolves light, so the first toggle goes dark.
        assert_eq!(store.toggle(Appearance::Light).unwrap(), ThemeMode::Dark);
        assert_eq!(store.toggle(Appearance::Light).unwrap(), ThemeMode::Light);
        assert_eq!(store.toggle(Appearance::Light).unwrap(), ThemeMode::Dark);
    }
}
