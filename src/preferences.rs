use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::sampler::SamplerMode;
use crate::series::RateUnit;
use crate::theme::ThemeVariant;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(default)]
    pub theme: ThemeVariant,
    /// Seconds between live samples.
    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,
    /// Real host counters or the simulated stand-in.
    #[serde(default)]
    pub sampler: SamplerMode,
    /// Unit for the network chart ("mbps" or "megabytes").
    #[serde(default)]
    pub network_unit: RateUnit,
    /// Entries of the city picker.
    #[serde(default = "default_cities")]
    pub cities: Vec<String>,
    /// Cities that get their own always-visible chart.
    #[serde(default = "default_pinned_cities")]
    pub pinned_cities: Vec<String>,
    /// City fetched at startup, if any.
    #[serde(default)]
    pub default_city: Option<String>,
}

const REFRESH_OPTIONS: &[u64] = &[1, 2, 5];
const MAX_PINNED: usize = 4;
fn default_refresh_interval() -> u64 { 1 }

fn default_cities() -> Vec<String> {
    [
        "New Delhi", "Mumbai", "Kolkata", "Chennai", "Bengaluru",
        "Hyderabad", "Pune", "Ahmedabad", "Lucknow",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_pinned_cities() -> Vec<String> {
    vec!["New Delhi".into(), "Mumbai".into()]
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: ThemeVariant::default(),
            refresh_interval_secs: default_refresh_interval(),
            sampler: SamplerMode::default(),
            network_unit: RateUnit::default(),
            cities: default_cities(),
            pinned_cities: default_pinned_cities(),
            default_city: None,
        }
    }
}

impl Preferences {
    /// Windows → AppData/Local/airdash/, Linux → ~/.config/airdash/
    fn config_dir() -> Option<PathBuf> {
        dirs::config_local_dir().map(|d| d.join("airdash"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Self::config_dir()
            .map(|d| d.join("preferences.json"))
            .ok_or(Error::NoConfigDir)
    }

    /// Load from the default location, falling back to defaults on any error.
    pub fn load() -> Self {
        let path = match Self::config_path() {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!("{e}, using default preferences");
                return Self::default();
            }
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no preferences file, using defaults");
            return Self::default();
        }
        Self::load_from(&path).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), "{e}, using defaults");
            Self::default()
        })
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let mut prefs: Self = serde_json::from_str(contents)?;
        prefs.sanitize();
        Ok(prefs)
    }

    /// Clamp all fields to valid values.
    fn sanitize(&mut self) {
        if !REFRESH_OPTIONS.contains(&self.refresh_interval_secs) {
            self.refresh_interval_secs = default_refresh_interval();
        }
        self.cities.retain(|c| !c.trim().is_empty());
        if self.cities.is_empty() {
            self.cities = default_cities();
        }
        self.pinned_cities.retain(|c| !c.trim().is_empty());
        self.pinned_cities.dedup();
        self.pinned_cities.truncate(MAX_PINNED);
        if self
            .default_city
            .as_deref()
            .is_some_and(|c| c.trim().is_empty())
        {
            self.default_city = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let prefs = Preferences::default();
        assert_eq!(prefs.refresh_interval_secs, 1);
        assert_eq!(prefs.sampler, SamplerMode::System);
        assert_eq!(prefs.network_unit, RateUnit::Mbps);
        assert_eq!(prefs.pinned_cities, vec!["New Delhi", "Mumbai"]);
        assert!(prefs.cities.iter().any(|c| c == "Mumbai"));
        assert!(prefs.default_city.is_none());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let prefs = Preferences::from_json(r#"{"sampler":"simulated","network_unit":"megabytes"}"#).unwrap();
        assert_eq!(prefs.sampler, SamplerMode::Simulated);
        assert_eq!(prefs.network_unit, RateUnit::Megabytes);
        assert_eq!(prefs.refresh_interval_secs, 1);
        assert_eq!(prefs.pinned_cities.len(), 2);
    }

    #[test]
    fn test_sanitize_clamps() {
        let json = r#"{
            "refresh_interval_secs": 42,
            "cities": ["", "  "],
            "pinned_cities": ["A", "A", "B", "C", "D", "E"],
            "default_city": " "
        }"#;
        let prefs = Preferences::from_json(json).unwrap();
        assert_eq!(prefs.refresh_interval_secs, 1);
        assert_eq!(prefs.cities, default_cities());
        assert_eq!(prefs.pinned_cities, vec!["A", "B", "C", "D"]);
        assert!(prefs.default_city.is_none());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(Preferences::from_json("{not json"), Err(Error::Json(_))));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = std::env::temp_dir().join("airdash-does-not-exist.json");
        assert!(matches!(Preferences::load_from(&path), Err(Error::Io(_))));
    }
}
