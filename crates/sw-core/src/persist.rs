//! Typed documents kept in a [`Store`].
//!
//! Saved wheels, statistics and settings keep their historical key names and
//! JSON shapes, so data written by older builds still loads.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::WheelResult;
use crate::option::WheelOption;
use crate::stats::StatisticsLog;
use crate::store::Store;

/// Key of the saved-wheel collection.
pub const SAVED_WHEELS_KEY: &str = "spinWheelSavedWheels";
/// Key of the win counts.
pub const STATISTICS_KEY: &str = "spinWheelStatistics";
/// Key of the user settings.
pub const SETTINGS_KEY: &str = "spinWheelSettings";
/// Key of the live option list and resting angle.
pub const CURRENT_KEY: &str = "spinWheelCurrent";

/// A named snapshot of an option list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedWheel {
    /// Options at save time.
    pub options: Vec<WheelOption>,
    /// When the snapshot was taken.
    #[serde(rename = "savedAt")]
    pub saved_at: DateTime<Utc>,
}

/// Saved wheels by name.
pub type SavedWheels = BTreeMap<String, SavedWheel>;

/// User preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Offer to remove the winner after each spin.
    #[serde(rename = "removeAfterWin", default)]
    pub remove_after_win: bool,
}

/// The working wheel between runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurrentWheel {
    /// Live option list.
    pub options: Vec<WheelOption>,
    /// Resting angle in radians.
    #[serde(default)]
    pub rotation: f64,
}

fn load<T: DeserializeOwned + Default>(store: &dyn Store, key: &str) -> WheelResult<T> {
    match store.get(key)? {
        Some(text) => Ok(serde_json::from_str(&text)?),
        None => Ok(T::default()),
    }
}

fn save<T: Serialize>(store: &mut dyn Store, key: &str, value: &T) -> WheelResult<()> {
    let text = serde_json::to_string_pretty(value)?;
    store.set(key, &text)
}

/// Load the saved-wheel collection, empty when absent.
pub fn load_saved_wheels(store: &dyn Store) -> WheelResult<SavedWheels> {
    load(store, SAVED_WHEELS_KEY)
}

/// Replace the saved-wheel collection.
pub fn save_saved_wheels(store: &mut dyn Store, wheels: &SavedWheels) -> WheelResult<()> {
    save(store, SAVED_WHEELS_KEY, wheels)
}

/// Load win counts, empty when absent.
pub fn load_statistics(store: &dyn Store) -> WheelResult<StatisticsLog> {
    load(store, STATISTICS_KEY)
}

/// Replace win counts.
pub fn save_statistics(store: &mut dyn Store, stats: &StatisticsLog) -> WheelResult<()> {
    save(store, STATISTICS_KEY, stats)
}

/// Load settings, defaults when absent.
pub fn load_settings(store: &dyn Store) -> WheelResult<Settings> {
    load(store, SETTINGS_KEY)
}

/// Replace settings.
pub fn save_settings(store: &mut dyn Store, settings: &Settings) -> WheelResult<()> {
    save(store, SETTINGS_KEY, settings)
}

/// Load the working wheel. `None` when nothing was ever stored, so callers
/// can seed a first-run default.
pub fn load_current(store: &dyn Store) -> WheelResult<Option<CurrentWheel>> {
    match store.get(CURRENT_KEY)? {
        Some(text) => Ok(Some(serde_json::from_str(&text)?)),
        None => Ok(None),
    }
}

/// Replace the working wheel.
pub fn save_current(store: &mut dyn Store, current: &CurrentWheel) -> WheelResult<()> {
    save(store, CURRENT_KEY, current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WheelError;
    use crate::store::MemoryStore;

    #[test]
    fn absent_keys_yield_defaults() {
        let store = MemoryStore::new();
        assert!(load_saved_wheels(&store).unwrap().is_empty());
        assert!(load_statistics(&store).unwrap().is_empty());
        assert_eq!(load_settings(&store).unwrap(), Settings::default());
        assert_eq!(load_current(&store).unwrap(), None);
    }

    #[test]
    fn malformed_value_is_a_parse_error() {
        let mut store = MemoryStore::new();
        store.set(STATISTICS_KEY, "not json").unwrap();
        assert!(matches!(
            load_statistics(&store),
            Err(WheelError::Parse(_))
        ));
    }

    #[test]
    fn reads_legacy_saved_wheel_shape() {
        let mut store = MemoryStore::new();
        let legacy = r##"{
            "Lunch": {
                "options": [
                    {"text": "Pizza", "color": "#FF6B6B"},
                    {"text": "Sushi", "color": "#4ECDC4"}
                ],
                "savedAt": "2024-03-01T12:00:00.000Z"
            }
        }"##;
        store.set(SAVED_WHEELS_KEY, legacy).unwrap();
        let wheels = load_saved_wheels(&store).unwrap();
        let lunch = &wheels["Lunch"];
        assert_eq!(lunch.options.len(), 2);
        assert_eq!(lunch.options[1].text, "Sushi");
        assert_eq!(lunch.saved_at.to_rfc3339(), "2024-03-01T12:00:00+00:00");
    }

    #[test]
    fn settings_use_camel_case_key() {
        let mut store = MemoryStore::new();
        save_settings(
            &mut store,
            &Settings {
                remove_after_win: true,
            },
        )
        .unwrap();
        let raw = store.get(SETTINGS_KEY).unwrap().unwrap();
        assert!(raw.contains("removeAfterWin"));
        assert!(load_settings(&store).unwrap().remove_after_win);
    }

    #[test]
    fn current_wheel_roundtrip() {
        let mut store = MemoryStore::new();
        let current = CurrentWheel {
            options: vec![WheelOption::new("A", "#FF6B6B")],
            rotation: 1.25,
        };
        save_current(&mut store, &current).unwrap();
        assert_eq!(load_current(&store).unwrap(), Some(current));
    }
}
