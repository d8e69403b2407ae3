//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the loader.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the resource loader.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LoaderConfig {
    /// Per-load defaults (timeout, attempt bound).
    pub loader: LoadSettings,

    /// Backoff between attempts.
    pub backoff: BackoffConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Demo module catalog.
    pub catalog: CatalogConfig,
}

/// Defaults applied to every `load` that does not pass explicit options.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoadSettings {
    /// Maximum wall time for a single attempt in milliseconds.
    pub timeout_ms: u64,

    /// Maximum number of attempts per load.
    pub max_retries: u32,
}

impl Default for LoadSettings {
    fn default() -> Self {
        Self {
            timeout_ms: 5000,
            max_retries: 3,
        }
    }
}

/// Exponential backoff configuration.
///
/// The delay after attempt `n` is `unit_ms * 2^n`, capped at `max_delay_ms` when one is set.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackoffConfig {
    /// Base time unit in milliseconds.
    pub unit_ms: u64,

    /// Upper bound for a single delay in milliseconds. Unset means no cap.
    pub max_delay_ms: Option<u64>,

    /// Extra random delay as a fraction of the computed delay (0.0 disables jitter).
    pub jitter_ratio: f64,
}

impl Default for BackoffConfig {
    fn default() -> Self {
        Self {
            unit_ms: 1000,
            max_delay_ms: None,
            jitter_ratio: 0.0,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

/// Module catalog configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Directory holding `<Name>.toml` module manifests.
    pub module_dir: String,

    /// Names warmed by `preload` when none are given on the command line.
    pub preload: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            module_dir: "modules".to_string(),
            preload: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_loader_contract() {
        let config = LoaderConfig::default();
        assert_eq!(config.loader.timeout_ms, 5000);
        assert_eq!(config.loader.max_retries, 3);
        assert_eq!(config.backoff.unit_ms, 1000);
        assert!(!config.observability.metrics_enabled);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: LoaderConfig = toml::from_str(
            r#"
            [loader]
            max_retries = 5

            [catalog]
            preload = ["App"]
            "#,
        )
        .unwrap();

        assert_eq!(config.loader.max_retries, 5);
        assert_eq!(config.loader.timeout_ms, 5000);
        assert_eq!(config.catalog.module_dir, "modules");
        assert_eq!(config.catalog.preload, vec!["App".to_string()]);
    }
}
