// ⚙️ Engine Configuration - thresholds as data
// Business-rule thresholds live here so they can be tuned from a JSON file
// without touching call sites. Every field has a default.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Days without a recibo before a tenant counts as overdue
pub const DEFAULT_OVERDUE_DAYS: i64 = 35;

/// Days without a recibo before the status turns critical
pub const DEFAULT_CRITICAL_DAYS: i64 = 60;

/// Legal minimum notice period for an indexation
pub const DEFAULT_NOTICE_DAYS: i64 = 30;

/// Indexation percentages above this trigger a warning
pub const DEFAULT_HIGH_INDEXATION_PCT: f64 = 5.0;

/// Default herinnering dag
pub const DEFAULT_REMINDER_DAY: u32 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub overdue_days: i64,
    pub critical_days: i64,
    pub notice_days: i64,
    pub high_indexation_pct: f64,
    pub reminder_day: u32,

    /// How far ahead the portfolio overview looks for indexations
    pub indexation_horizon_days: i64,

    /// Reserve fund at or above this lowers physical risk by one
    pub reserve_healthy_pct: f64,

    /// Reserve fund below this raises physical risk by one
    pub reserve_weak_pct: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            overdue_days: DEFAULT_OVERDUE_DAYS,
            critical_days: DEFAULT_CRITICAL_DAYS,
            notice_days: DEFAULT_NOTICE_DAYS,
            high_indexation_pct: DEFAULT_HIGH_INDEXATION_PCT,
            reminder_day: DEFAULT_REMINDER_DAY,
            indexation_horizon_days: 60,
            reserve_healthy_pct: 80.0,
            reserve_weak_pct: 50.0,
        }
    }
}

impl EngineConfig {
    /// Load config from JSON file; missing fields fall back to defaults
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: EngineConfig =
            serde_json::from_str(&content).context("Failed to parse engine config JSON")?;

        tracing::debug!(?config, "loaded engine config");
        Ok(config)
    }

    /// Load from file when a path is given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.overdue_days, 35);
        assert_eq!(cfg.critical_days, 60);
        assert_eq!(cfg.notice_days, 30);
        assert_eq!(cfg.high_indexation_pct, 5.0);
        assert_eq!(cfg.reminder_day, 5);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"notice_days": 60}}"#).unwrap();

        let cfg = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(cfg.notice_days, 60);
        assert_eq!(cfg.overdue_days, 35);
    }

    #[test]
    fn test_missing_file_errors() {
        let result = EngineConfig::from_file("/nonexistent/engine.json");
        assert!(result.is_err());
        assert!(EngineConfig::load_or_default(None).is_ok());
    }
}
