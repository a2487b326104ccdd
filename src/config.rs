use crate::models::ModelKind;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

/// Batch (CSV) processing options
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BatchConfig {
    /// Append delta, gamma, vega, theta and rho columns to the output
    #[serde(default)]
    pub with_greeks: bool,
    /// Decimal places written for computed values
    #[serde(default = "default_precision")]
    pub precision: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            with_greeks: false,
            precision: default_precision(),
        }
    }
}

/// Throughput benchmark options
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BenchmarkConfig {
    /// Number of options priced per run
    #[serde(default = "default_sizes")]
    pub sizes: Vec<usize>,
    /// Random seed for reproducibility (None = entropy)
    #[serde(default)]
    pub seed: Option<u64>,
    /// Calls that must complete within `target_seconds`
    #[serde(default = "default_target_ops")]
    pub target_ops: usize,
    #[serde(default = "default_target_seconds")]
    pub target_seconds: f64,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            sizes: default_sizes(),
            seed: None,
            target_ops: default_target_ops(),
            target_seconds: default_target_seconds(),
        }
    }
}

impl BenchmarkConfig {
    /// Minimum operations per second implied by the target.
    pub fn target_ops_per_second(&self) -> f64 {
        self.target_ops as f64 / self.target_seconds
    }
}

/// Top-level configuration, typically loaded from `pricer.toml`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PricerConfig {
    #[serde(default)]
    pub model: ModelKind,

    /// Default tracing filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub batch: BatchConfig,

    #[serde(default)]
    pub benchmark: BenchmarkConfig,
}

impl Default for PricerConfig {
    fn default() -> Self {
        Self {
            model: ModelKind::default(),
            log_level: default_log_level(),
            batch: BatchConfig::default(),
            benchmark: BenchmarkConfig::default(),
        }
    }
}

impl PricerConfig {
    /// Defaults with Greeks enabled for batch output
    pub fn with_greeks() -> Self {
        Self {
            batch: BatchConfig {
                with_greeks: true,
                ..BatchConfig::default()
            },
            ..Self::default()
        }
    }

    /// Small, seeded benchmark runs for smoke tests
    pub fn quick() -> Self {
        Self {
            benchmark: BenchmarkConfig {
                sizes: vec![100, 1000],
                seed: Some(123456),
                ..BenchmarkConfig::default()
            },
            ..Self::default()
        }
    }

    /// Parse a TOML document. Missing keys fall back to their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: PricerConfig = toml::from_str(text).context("invalid pricer configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("in config file {}", path.display()))
    }

    fn validate(&self) -> Result<()> {
        if self.benchmark.sizes.iter().any(|&n| n == 0) {
            anyhow::bail!("benchmark sizes must be positive");
        }
        if !(self.benchmark.target_seconds > 0.0 && self.benchmark.target_seconds.is_finite()) {
            anyhow::bail!(
                "benchmark target_seconds ({}) must be positive and finite",
                self.benchmark.target_seconds
            );
        }
        Ok(())
    }
}

fn default_precision() -> usize {
    6
}

fn default_sizes() -> Vec<usize> {
    vec![100, 1000, 10000]
}

fn default_target_ops() -> usize {
    10_000
}

fn default_target_seconds() -> f64 {
    1.0
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config = PricerConfig::from_toml_str("").unwrap();
        assert_eq!(config, PricerConfig::default());
        assert_eq!(config.batch.precision, 6);
        assert_eq!(config.benchmark.sizes, vec![100, 1000, 10000]);
        assert_eq!(config.model, ModelKind::BlackScholes);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let text = r#"
            model = "black_scholes"
            log_level = "debug"

            [batch]
            with_greeks = true

            [benchmark]
            sizes = [10, 20]
            seed = 7
        "#;
        let config = PricerConfig::from_toml_str(text).unwrap();
        assert_eq!(config.log_level, "debug");
        assert!(config.batch.with_greeks);
        assert_eq!(config.batch.precision, 6);
        assert_eq!(config.benchmark.sizes, vec![10, 20]);
        assert_eq!(config.benchmark.seed, Some(7));
        assert_eq!(config.benchmark.target_ops, 10_000);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(PricerConfig::from_toml_str("model = \"binomial\"").is_err());
        assert!(PricerConfig::from_toml_str("[benchmark]\nsizes = [0]").is_err());
        assert!(PricerConfig::from_toml_str("[benchmark]\ntarget_seconds = 0.0").is_err());
    }

    #[test]
    fn test_presets() {
        assert!(PricerConfig::with_greeks().batch.with_greeks);
        assert_eq!(PricerConfig::quick().benchmark.seed, Some(123456));
        assert_eq!(
            BenchmarkConfig::default().target_ops_per_second(),
            10_000.0
        );
    }
}
