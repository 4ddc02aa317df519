use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid max_iterations: {0}. Must be between 1 and 50")]
    InvalidMaxIterations(u32),

    #[error("Invalid accept_threshold: {0}. Must be strictly between 0 and 1")]
    InvalidAcceptThreshold(f64),

    #[error("Invalid rate limit: {0}. Must be positive")]
    InvalidRateLimit(f64),

    #[error("Invalid max_retries: {0}. Cannot be 0")]
    InvalidMaxRetries(u32),

    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must not exceed max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),

    #[error("Translation route needs at least two intermediate hops, got {0}")]
    RouteTooShort(usize),

    #[error("Translation route repeats language code '{0}' on consecutive hops")]
    RepeatedRouteHop(String),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. `ghostwriter.yaml` in the working directory
    /// 3. Environment variables (`GHOSTWRITER_` prefix, `__` separator)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file("ghostwriter.yaml"))
            .merge(Env::prefixed("GHOSTWRITER_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let policy = &config.loop_policy;
        if policy.max_iterations == 0 || policy.max_iterations > 50 {
            return Err(ConfigError::InvalidMaxIterations(policy.max_iterations));
        }
        if policy.accept_threshold <= 0.0 || policy.accept_threshold >= 1.0 {
            return Err(ConfigError::InvalidAcceptThreshold(policy.accept_threshold));
        }

        if config.llm.rate_limit.requests_per_second <= 0.0 {
            return Err(ConfigError::InvalidRateLimit(
                config.llm.rate_limit.requests_per_second,
            ));
        }

        let retry = &config.llm.retry;
        if retry.max_retries == 0 {
            return Err(ConfigError::InvalidMaxRetries(retry.max_retries));
        }
        if retry.initial_backoff_ms > retry.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                retry.initial_backoff_ms,
                retry.max_backoff_ms,
            ));
        }

        let route = &config.translation.route;
        if route.len() < 2 {
            return Err(ConfigError::RouteTooShort(route.len()));
        }
        for pair in route.windows(2) {
            if pair[0] == pair[1] {
                return Err(ConfigError::RepeatedRouteHop(pair[0].clone()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_pass_validation() {
        assert!(ConfigLoader::validate(&Config::default()).is_ok());
    }

    #[test]
    fn zero_iterations_is_rejected() {
        let mut config = Config::default();
        config.loop_policy.max_iterations = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidMaxIterations(0))
        ));
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let mut config = Config::default();
        config.loop_policy.accept_threshold = 1.0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidAcceptThreshold(_))
        ));
    }

    #[test]
    fn inverted_backoff_is_rejected() {
        let mut config = Config::default();
        config.llm.retry.initial_backoff_ms = 60_000;
        config.llm.retry.max_backoff_ms = 1_000;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidBackoff(60_000, 1_000))
        ));
    }

    #[test]
    fn single_hop_route_is_rejected() {
        let mut config = Config::default();
        config.translation.route = vec!["ja".to_string()];
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::RouteTooShort(1))
        ));
    }

    #[test]
    fn consecutive_duplicate_route_hops_are_rejected() {
        let mut config = Config::default();
        config.translation.route = vec!["ja".to_string(), "ja".to_string()];
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::RepeatedRouteHop(_))
        ));
    }

    #[test]
    fn yaml_file_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "loop:\n  max_iterations: 4\nllm:\n  model: test-model"
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.loop_policy.max_iterations, 4);
        assert_eq!(config.llm.model, "test-model");
        // Untouched fields keep defaults
        assert!((config.loop_policy.accept_threshold - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn environment_overrides_defaults() {
        temp_env::with_var("GHOSTWRITER_LLM__MODEL", Some("env-model"), || {
            let config = ConfigLoader::load().unwrap();
            assert_eq!(config.llm.model, "env-model");
        });
    }
}
