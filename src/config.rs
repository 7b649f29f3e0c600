use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use crate::analysis::ranking::DEFAULT_TOP_K;
use crate::data::classify::DEFAULT_COVERAGE_THRESHOLD;

// ---------------------------------------------------------------------------
// Engine configuration
// ---------------------------------------------------------------------------

/// Tunables for inference, ranking and the display-size menu.
///
/// Read from an optional JSON file; every field falls back to its default.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Minimum share of finite parses for a column to be numeric.
    pub coverage_threshold: f64,
    /// Number of features kept after ranking.
    pub top_k: usize,
    /// Display-size menu entries.
    pub display_sizes: Vec<usize>,
    /// Columns never offered to numeric inference.
    pub excluded_columns: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            coverage_threshold: DEFAULT_COVERAGE_THRESHOLD,
            top_k: DEFAULT_TOP_K,
            display_sizes: vec![5, 8, 10],
            excluded_columns: ["File_ID", "Transcript", "DX1", "DX2"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(text).context("parsing config JSON")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.coverage_threshold > 0.0 && self.coverage_threshold <= 1.0) {
            bail!(
                "coverage_threshold must be in (0, 1], got {}",
                self.coverage_threshold
            );
        }
        if self.top_k == 0 {
            bail!("top_k must be at least 1");
        }
        if !self.display_sizes.iter().any(|&s| s >= 1) {
            bail!("display_sizes needs at least one entry >= 1");
        }
        Ok(())
    }

    /// Initial display size: the largest menu entry that fits `top_k`.
    pub fn default_display_size(&self) -> usize {
        self.display_sizes
            .iter()
            .copied()
            .filter(|&s| s >= 1 && s <= self.top_k)
            .max()
            .unwrap_or(self.top_k)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_dashboard_constants() {
        let c = EngineConfig::default();
        assert_eq!(c.coverage_threshold, 0.75);
        assert_eq!(c.top_k, 10);
        assert_eq!(c.display_sizes, vec![5, 8, 10]);
        assert_eq!(c.default_display_size(), 10);
        assert!(c.excluded_columns.iter().any(|e| e == "DX1"));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let c = EngineConfig::from_json(r#"{ "top_k": 6 }"#).unwrap();
        assert_eq!(c.top_k, 6);
        assert_eq!(c.coverage_threshold, 0.75);
        assert_eq!(c.default_display_size(), 5);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(EngineConfig::from_json(r#"{ "coverage_threshold": 0 }"#).is_err());
        assert!(EngineConfig::from_json(r#"{ "coverage_threshold": 1.5 }"#).is_err());
        assert!(EngineConfig::from_json(r#"{ "top_k": 0 }"#).is_err());
        assert!(EngineConfig::from_json(r#"{ "display_sizes": [] }"#).is_err());
        assert!(EngineConfig::from_json("not json").is_err());
    }

    #[test]
    fn small_top_k_below_every_menu_entry() {
        let c = EngineConfig {
            top_k: 3,
            ..EngineConfig::default()
        };
        assert_eq!(c.default_display_size(), 3);
    }
}
