//! Engine configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SlotError};
use crate::exception::YearlyMatch;

/// Upper bound on `publicWindowDays` (roughly ten years).
pub const MAX_PUBLIC_WINDOW_DAYS: u32 = 3_660;

/// Tunables for window defaults and exception matching.
///
/// Every field has a default, so `{}` is a valid configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Horizon, in calendar months from now, for patterns without an end date.
    pub horizon_months: u32,
    /// Length of the public view window in days, starting today.
    pub public_window_days: u32,
    /// Yearly-exception matching mode.
    pub yearly_match: YearlyMatch,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            horizon_months: 3,
            public_window_days: 30,
            yearly_match: YearlyMatch::Projected,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| SlotError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_json(&raw)
    }

    fn validate(&self) -> Result<()> {
        if self.horizon_months == 0 {
            return Err(SlotError::Config("horizonMonths must be at least 1".to_string()));
        }
        if self.public_window_days > MAX_PUBLIC_WINDOW_DAYS {
            return Err(SlotError::Config(format!(
                "publicWindowDays must be at most {}, got {}",
                MAX_PUBLIC_WINDOW_DAYS, self.public_window_days
            )));
        }
        Ok(())
    }
}
