//! Load generation configuration
//!
//! Ranges are inclusive and 1-based, matching the key formats the engine's
//! demo processes correlate on (`M1`, `M1-SPS1`, ...). An empty range
//! (`end < start`) is allowed and produces zero dispatches.

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::str::FromStr;
use std::time::Duration;

/// Load generation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Range of main process indices
    #[serde(default = "default_main_range")]
    pub main_range: KeyRange,

    /// Range of SHORT subprocess indices per main process
    #[serde(default = "default_subprocess_range")]
    pub short_range: KeyRange,

    /// Range of LONG subprocess indices per main process
    #[serde(default = "default_subprocess_range")]
    pub long_range: KeyRange,

    /// Subprocess key naming scheme
    #[serde(default)]
    pub naming_scheme: NamingScheme,

    /// Inter-request pacing
    #[serde(default)]
    pub pacing: PacingConfig,
}

/// Inclusive integer range of key indices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRange {
    pub start: u32,
    pub end: u32,
}

impl KeyRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Iterate over the indices in the range
    pub fn iter(&self) -> RangeInclusive<u32> {
        self.start..=self.end
    }

    /// Number of indices in the range; zero when `end < start`
    pub fn count(&self) -> u64 {
        if self.end < self.start {
            0
        } else {
            u64::from(self.end - self.start) + 1
        }
    }

    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// Subprocess key naming scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NamingScheme {
    /// `M<i>-SPS<j>` for SHORT and `M<i>-SPL<k>` for LONG subprocesses
    #[default]
    Split,
    /// `M<i>-SP<j>` for both subprocess classes
    Unified,
}

impl FromStr for NamingScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "split" => Ok(NamingScheme::Split),
            "unified" => Ok(NamingScheme::Unified),
            _ => Err(format!("Invalid naming scheme: {}", s)),
        }
    }
}

/// Inter-request pacing configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Whether the coordinating loop pauses between dispatches
    #[serde(default = "crate::domains::utils::default_true")]
    pub enabled: bool,

    /// Delay between dispatches in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl PacingConfig {
    /// Effective delay, `None` when pacing is disabled or non-positive
    pub fn delay(&self) -> Option<Duration> {
        if self.enabled && self.delay_ms > 0 {
            Some(Duration::from_millis(self.delay_ms))
        } else {
            None
        }
    }
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            main_range: default_main_range(),
            short_range: default_subprocess_range(),
            long_range: default_subprocess_range(),
            naming_scheme: NamingScheme::default(),
            pacing: PacingConfig::default(),
        }
    }
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            delay_ms: default_delay_ms(),
        }
    }
}

impl Validatable for LoadConfig {
    fn validate(&self) -> ConfigResult<()> {
        for (range, field) in [
            (&self.main_range, "main_range"),
            (&self.short_range, "short_range"),
            (&self.long_range, "long_range"),
        ] {
            // Keys are 1-based; an empty range (end < start) is fine
            if range.start == 0 {
                return Err(self.validation_error(format!("{}.start must be at least 1", field)));
            }
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "load"
    }
}

// Default value functions
fn default_main_range() -> KeyRange {
    KeyRange::new(1, 100)
}

fn default_subprocess_range() -> KeyRange {
    KeyRange::new(1, 2)
}

fn default_delay_ms() -> u64 {
    10
}
