use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

pub const DEFAULT_MEMBERS_MAX: u32 = 1000;
pub const DEFAULT_CAPACITY_MAX: f64 = 20000.0;
pub const DEFAULT_EXPORT_FILE_NAME: &str = "beltraide_cooperatives.csv";

/// TOML-backed explorer configuration.
///
/// Every section is optional; a missing section falls back to the built-in
/// defaults, so an empty file is a valid config.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExplorerConfig {
    #[serde(default)]
    pub ranges: RangesConfig,
    #[serde(default)]
    pub export: ExportConfig,
    /// Buyer name → country. Feeds the buyer-country selector and hubs.
    #[serde(default = "default_buyer_countries")]
    pub buyer_countries: BTreeMap<String, String>,
}

/// Upper bounds of the default numeric ranges. Lower bounds are always 0.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RangesConfig {
    #[serde(default = "default_members_max")]
    pub members_max: u32,
    #[serde(default = "default_capacity_max")]
    pub capacity_max: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExportConfig {
    #[serde(default = "default_export_file_name")]
    pub file_name: String,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            ranges: RangesConfig::default(),
            export: ExportConfig::default(),
            buyer_countries: default_buyer_countries(),
        }
    }
}

impl Default for RangesConfig {
    fn default() -> Self {
        Self {
            members_max: DEFAULT_MEMBERS_MAX,
            capacity_max: DEFAULT_CAPACITY_MAX,
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: default_export_file_name(),
        }
    }
}

fn default_members_max() -> u32 {
    DEFAULT_MEMBERS_MAX
}

fn default_capacity_max() -> f64 {
    DEFAULT_CAPACITY_MAX
}

fn default_export_file_name() -> String {
    DEFAULT_EXPORT_FILE_NAME.to_string()
}

/// Canonical buyer → country table for the bundled catalog.
pub fn default_buyer_countries() -> BTreeMap<String, String> {
    [
        ("Caribbean Seafood Traders", "United States"),
        ("Maya Gold Chocolate", "United Kingdom"),
        ("Belize Sugar Industries", "Belize"),
        ("Fair Trade Honey Imports", "Canada"),
        ("Citrus Products of Belize", "Belize"),
        ("Mexico Agro Distributors", "Mexico"),
        ("Guatemala Fresh Markets", "Guatemala"),
    ]
    .into_iter()
    .map(|(buyer, country)| (buyer.to_string(), country.to_string()))
    .collect()
}

/// Parse a TOML config document.
pub fn parse_config(content: &str) -> Result<ExplorerConfig> {
    toml::from_str(content).context("Failed to parse explorer config")
}

/// Load and parse a TOML config file.
pub fn load_config(path: &Path) -> Result<ExplorerConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let config: ExplorerConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    Ok(config)
}
