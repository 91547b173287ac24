use std::time::Duration;

use crate::config::config_spec::ConfigSpec;
use crate::config::errors::SettingsError;
use crate::config::{EnvironmentProvider, SystemEnvironment};

pub const DEFAULT_DATABASE_URL: &str = "sqlite://workshop.db?mode=rwc";
pub const DEFAULT_TRANSIENT_RETRY_LIMIT: u32 = 3;
pub const DEFAULT_TRANSIENT_RETRY_BACKOFF_MS: u64 = 50;

/// Process-level settings, read once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkshopSettings {
    pub database_url: String,
    /// Attempts (including the first) a caller makes on transient errors
    pub transient_retry_limit: u32,
    pub transient_retry_backoff: Duration,
}

impl WorkshopSettings {
    pub fn from_env_provider(env: &dyn EnvironmentProvider) -> Result<Self, SettingsError> {
        let database_url = ConfigSpec::new("DATABASE_URL")
            .default_value(DEFAULT_DATABASE_URL)
            .min_length(1)
            .load(env)?
            .value;

        let transient_retry_limit = ConfigSpec::new("TRANSIENT_RETRY_LIMIT")
            .default_value("3")
            .validator(|v| ConfigSpec::validate_range(v, 1, 10))
            .load_parsed::<u32>(env)?;

        let backoff_ms = ConfigSpec::new("TRANSIENT_RETRY_BACKOFF_MS")
            .default_value("50")
            .validator(|v| ConfigSpec::validate_range(v, 0, 60_000))
            .load_parsed::<u64>(env)?;

        Ok(Self {
            database_url,
            transient_retry_limit,
            transient_retry_backoff: Duration::from_millis(backoff_ms),
        })
    }

    /// Convenience method that uses the system environment provider
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_env_provider(&SystemEnvironment)
    }
}

impl Default for WorkshopSettings {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            transient_retry_limit: DEFAULT_TRANSIENT_RETRY_LIMIT,
            transient_retry_backoff: Duration::from_millis(DEFAULT_TRANSIENT_RETRY_BACKOFF_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::env_provider::MockEnvironment;

    #[test]
    fn test_defaults() {
        let settings = WorkshopSettings::from_env_provider(&MockEnvironment::empty()).unwrap();
        assert_eq!(settings, WorkshopSettings::default());
    }

    #[test]
    fn test_overrides() {
        let env = MockEnvironment::empty().with_vars(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("TRANSIENT_RETRY_LIMIT", "5"),
            ("TRANSIENT_RETRY_BACKOFF_MS", "0"),
        ]);
        let settings = WorkshopSettings::from_env_provider(&env).unwrap();
        assert_eq!(settings.database_url, "sqlite::memory:");
        assert_eq!(settings.transient_retry_limit, 5);
        assert_eq!(settings.transient_retry_backoff, Duration::ZERO);
    }

    #[test]
    fn test_retry_limit_out_of_range() {
        for bad in ["0", "11", "-1", "three"] {
            let env = MockEnvironment::empty().with_var("TRANSIENT_RETRY_LIMIT", bad);
            let result = WorkshopSettings::from_env_provider(&env);
            assert!(
                matches!(result, Err(SettingsError::InvalidSetting { ref setting_name, .. }) if setting_name == "TRANSIENT_RETRY_LIMIT"),
                "{bad}: {result:?}"
            );
        }
    }
}
