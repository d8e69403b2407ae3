//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, at least one attempt)
//! - Check that preload names exist in the catalog
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: LoaderConfig → Result<(), Vec<ValidationError>>

use std::fmt;
use std::net::SocketAddr;

use crate::catalog::Component;
use crate::config::schema::LoaderConfig;
use crate::registry::ResourceName;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Check a parsed configuration for values serde cannot reject on its own.
pub fn validate_config(config: &LoaderConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.loader.timeout_ms == 0 {
        errors.push(ValidationError::new("loader.timeout_ms", "must be greater than 0"));
    }
    if config.loader.max_retries == 0 {
        errors.push(ValidationError::new("loader.max_retries", "must allow at least one attempt"));
    }

    if config.backoff.unit_ms == 0 {
        errors.push(ValidationError::new("backoff.unit_ms", "must be greater than 0"));
    }
    if let Some(max_delay_ms) = config.backoff.max_delay_ms {
        if max_delay_ms < config.backoff.unit_ms {
            errors.push(ValidationError::new(
                "backoff.max_delay_ms",
                format!("must be at least unit_ms ({})", config.backoff.unit_ms),
            ));
        }
    }
    if !(0.0..=1.0).contains(&config.backoff.jitter_ratio) {
        errors.push(ValidationError::new("backoff.jitter_ratio", "must be between 0.0 and 1.0"));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    for name in &config.catalog.preload {
        if Component::parse(name).is_none() {
            errors.push(ValidationError::new(
                "catalog.preload",
                format!("unknown module '{}'", name),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&LoaderConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = LoaderConfig::default();
        config.loader.timeout_ms = 0;
        config.loader.max_retries = 0;
        config.backoff.jitter_ratio = 2.0;
        config.backoff.max_delay_ms = Some(10);
        config.catalog.preload = vec!["App".into(), "Leaderboard".into()];

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert!(errors.iter().any(|e| e.field == "backoff.max_delay_ms"));
        assert!(errors.iter().any(|e| e.message.contains("Leaderboard")));
    }

    #[test]
    fn test_metrics_address_checked_only_when_enabled() {
        let mut config = LoaderConfig::default();
        config.observability.metrics_address = "not-an-address".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "observability.metrics_address");
    }
}
