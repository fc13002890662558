//! Light/dark theme preference and the store it is persisted in.
//!
//! The preference lives under a single key, `theme`, holding `"dark"` or
//! `"light"`. It is read once when [`ThemeSettings::load`] runs and written on
//! every toggle. Gameplay never waits on the store: a failed write is logged
//! and the in-memory theme still flips.

use crate::{debug_log, info_log};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemePreference {
    #[default]
    Light,
    Dark,
}

impl ThemePreference {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Anything other than `"dark"` reads as light.
    #[must_use]
    pub fn from_stored(value: &str) -> Self {
        if value.trim() == "dark" {
            Self::Dark
        } else {
            Self::Light
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

/// Key/value storage port for persisted preferences.
pub trait PreferenceStore {
    fn read(&self, key: &str) -> Option<String>;

    /// # Errors
    /// Returns an I/O error if the value could not be persisted.
    fn write(&mut self, key: &str, value: &str) -> io::Result<()>;
}

/// Default location of the preferences file, if the platform has a config dir
#[must_use]
pub fn get_preferences_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("wordle-game").join("preferences"))
}

/// `key=value` lines in a plain text file.
pub struct FilePreferenceStore {
    path: PathBuf,
}

impl FilePreferenceStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, String> {
        let Ok(contents) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        contents
            .lines()
            .filter_map(|line| line.split_once('='))
            .map(|(key, value)| (key.trim().to_string(), value.trim().to_string()))
            .collect()
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn read(&self, key: &str) -> Option<String> {
        self.read_all().remove(key)
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        let mut values = self.read_all();
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let contents: String = values
            .iter()
            .map(|(key, value)| format!("{key}={value}\n"))
            .collect();
        fs::write(&self.path, contents)?;
        debug_log!("Wrote preference {}={} to {}", key, value, self.path.display());
        Ok(())
    }
}

/// Store that forgets everything on exit.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    values: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn read(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn write(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Current theme together with the store it came from.
pub struct ThemeSettings {
    theme: ThemePreference,
    store: Box<dyn PreferenceStore>,
}

impl ThemeSettings {
    pub fn load(store: Box<dyn PreferenceStore>) -> Self {
        let theme = store
            .read(THEME_KEY)
            .map(|value| ThemePreference::from_stored(&value))
            .unwrap_or_default();
        info_log!("ThemeSettings::load() - theme is {}", theme.as_str());
        Self { theme, store }
    }

    #[must_use]
    pub fn theme(&self) -> ThemePreference {
        self.theme
    }

    /// Flip the theme and persist it.
    pub fn toggle(&mut self) -> ThemePreference {
        self.theme = self.theme.toggled();
        if let Err(e) = self.store.write(THEME_KEY, self.theme.as_str()) {
            log::warn!("Failed to save theme preference: {e}");
        }
        self.theme
    }

    #[must_use]
    pub fn store(&self) -> &dyn PreferenceStore {
        self.store.as_ref()
    }
}
