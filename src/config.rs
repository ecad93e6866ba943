//! Engine configuration, fixed at startup.
//!
//! Values come from [`Config::default`], from environment variables
//! ([`Config::from_env`]), or from a JSON document handed over by the host
//! ([`Config::from_json`]). Nothing here can change once the engine runs.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::env::VarError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_MIN_CONTACTS, DEFAULT_OFFSET_DECAY, DEFAULT_POOL_SIZE, DEFAULT_THING_RADIUS, ENV_PREFIX};

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("invalid value for {var}: {value:?}")]
    BadEnv { var: String, value: String },
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// How the gesture anchor moves while a gesture is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnchorPolicy {
    /// Re-anchor at the region's origin after every frame, so each frame
    /// applies only the movement since the previous one.
    #[default]
    RollForward,
    /// Keep the anchor from gesture start, so the full displacement is
    /// applied on every frame.
    Hold,
}

impl FromStr for AnchorPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "roll_forward" => Ok(Self::RollForward),
            "hold" => Ok(Self::Hold),
            other => Err(format!("unknown anchor policy '{other}'")),
        }
    }
}

/// Which input callbacks re-evaluate thing selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPolicy {
    /// Contact start and end only; a moving gesture drags what it grabbed.
    #[default]
    ContactChange,
    /// Also on every contact move.
    RegionChange,
}

impl FromStr for SelectionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "contact_change" => Ok(Self::ContactChange),
            "region_change" => Ok(Self::RegionChange),
            other => Err(format!("unknown selection policy '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of things in the pool.
    pub pool_size: usize,
    /// Contacts required before a gesture region exists.
    pub min_contacts: usize,
    /// Fraction of the offset leaked per moved thing.
    pub offset_decay: f64,
    /// Radius of every thing, in normalized units.
    pub thing_radius: f64,
    pub anchor_policy: AnchorPolicy,
    pub selection_policy: SelectionPolicy,
    /// Seed for the pool layout; random when absent.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            min_contacts: DEFAULT_MIN_CONTACTS,
            offset_decay: DEFAULT_OFFSET_DECAY,
            thing_radius: DEFAULT_THING_RADIUS,
            anchor_policy: AnchorPolicy::default(),
            selection_policy: SelectionPolicy::default(),
            seed: None,
        }
    }
}

impl Config {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `MULTITOUCH_POOL_SIZE`: default 50
    /// - `MULTITOUCH_MIN_CONTACTS`: default 1
    /// - `MULTITOUCH_OFFSET_DECAY`: default 0.01
    /// - `MULTITOUCH_THING_RADIUS`: default 0.05
    /// - `MULTITOUCH_ANCHOR_POLICY`: `roll_forward` (default) or `hold`
    /// - `MULTITOUCH_SELECTION_POLICY`: `contact_change` (default) or `region_change`
    /// - `MULTITOUCH_SEED`: unset for a random layout
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::BadEnv`] if a variable is set but does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            pool_size: env_parse("POOL_SIZE")?.unwrap_or(defaults.pool_size),
            min_contacts: env_parse("MIN_CONTACTS")?.unwrap_or(defaults.min_contacts),
            offset_decay: env_parse("OFFSET_DECAY")?.unwrap_or(defaults.offset_decay),
            thing_radius: env_parse("THING_RADIUS")?.unwrap_or(defaults.thing_radius),
            anchor_policy: env_parse("ANCHOR_POLICY")?.unwrap_or(defaults.anchor_policy),
            selection_policy: env_parse("SELECTION_POLICY")?.unwrap_or(defaults.selection_policy),
            seed: env_parse("SEED")?,
        })
    }

    /// Parse config from JSON. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the document is malformed.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reject values the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_contacts == 0 {
            return Err(ConfigError::Invalid { field: "min_contacts", reason: "must be at least 1".into() });
        }
        if !(0.0..1.0).contains(&self.offset_decay) {
            return Err(ConfigError::Invalid {
                field: "offset_decay",
                reason: format!("{} is outside [0, 1)", self.offset_decay),
            });
        }
        if !self.thing_radius.is_finite() || self.thing_radius < 0.0 {
            return Err(ConfigError::Invalid {
                field: "thing_radius",
                reason: format!("{} is not a finite non-negative number", self.thing_radius),
            });
        }
        Ok(())
    }
}

/// Read `MULTITOUCH_<key>`. Unset means `None`; set but unparseable is an error.
fn env_parse<T: FromStr>(key: &str) -> Result<Option<T>, ConfigError> {
    let var = format!("{ENV_PREFIX}{key}");
    match std::env::var(&var) {
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| ConfigError::BadEnv { var, value: raw }),
        Err(VarError::NotPresent) => Ok(None),
        Err(VarError::NotUnicode(raw)) => Err(ConfigError::BadEnv { var, value: raw.to_string_lossy().into_owned() }),
    }
}
