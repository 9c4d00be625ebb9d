use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data::aggregate::DisplayUnits;

/// Name of the optional settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

/// Startup settings. Every field has a default, so the file may set any subset.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Sales file read once at startup.
    pub data_path: PathBuf,
    /// `chrono` format of the `Date` column (day/month/year by default).
    pub date_format: String,
    pub currency_symbol: String,
    pub purchase_unit: String,
    /// Number of bins of the amount histogram.
    pub histogram_bins: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("supermarket_sales.csv"),
            date_format: "%d/%m/%Y".to_string(),
            currency_symbol: "€".to_string(),
            purchase_unit: "achats".to_string(),
            histogram_bins: 20,
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("No {} found, using default settings", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing {}", path.display()))?;
        if config.histogram_bins == 0 {
            log::warn!("histogram_bins is 0 in {}, using a single bin", path.display());
        }
        log::info!("Loaded settings from {}", path.display());
        Ok(config)
    }

    pub fn display_units(&self) -> DisplayUnits {
        DisplayUnits {
            currency_symbol: self.currency_symbol.clone(),
            purchase_unit: self.purchase_unit.clone(),
        }
    }
}
