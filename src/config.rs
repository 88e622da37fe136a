use std::path::Path;

use chrono::{DateTime, FixedOffset};
use parse_display::Display;
use serde::{Deserialize, Serialize};

use crate::{AlarmEnv, AlarmId, AlarmItem, Tab};

#[cfg(test)]
mod tests;

/// Initial state of the screen, usually read from a TOML file.
///
/// ```toml
/// selected_tab = "alarms"
///
/// [[alarms]]
/// date = "2015-01-01T07:30:00.000+00:00"
/// is_on = true
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub selected_tab: Tab,
    pub alarms: Vec<AlarmSeed>,
}

/// An alarm listed in [`AppConfig`]. Without an `id`, a fresh one is assigned on load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlarmSeed {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AlarmId>,
    pub date: DateTime<FixedOffset>,
    #[serde(default)]
    pub is_on: bool,
}

impl AlarmSeed {
    pub fn to_item(&self, env: &AlarmEnv) -> AlarmItem {
        let id = self.id.unwrap_or_else(|| env.new_id());
        AlarmItem::new(id, self.date, self.is_on)
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Parse)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&s)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(ConfigError::Serialize)
    }
}

#[non_exhaustive]
#[derive(Display, Debug)]
pub enum ConfigError {
    #[display("cannot read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[display("invalid config: {0}")]
    Parse(toml::de::Error),
    #[display("cannot write config: {0}")]
    Serialize(toml::ser::Error),
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(e) => Some(e),
            Self::Serialize(e) => Some(e),
        }
    }
}
