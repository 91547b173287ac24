use std::str::FromStr;

use crate::config::errors::SettingsError;
use crate::config::EnvironmentProvider;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValueSource {
    EnvironmentVariable { name: String },
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigValue {
    pub value: String,
    pub source: ConfigValueSource,
}

/// One setting: environment override → default, then validation
pub struct ConfigSpec {
    pub env_override: String,
    pub default_value: Option<String>,
    pub min_length: Option<usize>,
    pub validator: Option<fn(&str) -> Result<(), String>>,
}

impl ConfigSpec {
    pub fn new(env_override: &str) -> Self {
        Self {
            env_override: env_override.to_string(),
            default_value: None,
            min_length: None,
            validator: None,
        }
    }

    pub fn default_value(mut self, value: &str) -> Self {
        self.default_value = Some(value.to_string());
        self
    }

    pub fn min_length(mut self, length: usize) -> Self {
        self.min_length = Some(length);
        self
    }

    pub fn validator(mut self, f: fn(&str) -> Result<(), String>) -> Self {
        self.validator = Some(f);
        self
    }

    /// Resolve the value, recording where it came from
    ///
    /// Blank environment values count as unset.
    pub fn load(&self, env: &dyn EnvironmentProvider) -> Result<ConfigValue, SettingsError> {
        let from_env = env.get_setting(&self.env_override);

        let resolved = match (from_env, &self.default_value) {
            (Some(value), _) => ConfigValue {
                value,
                source: ConfigValueSource::EnvironmentVariable {
                    name: self.env_override.clone(),
                },
            },
            (None, Some(default)) => ConfigValue {
                value: default.clone(),
                source: ConfigValueSource::Default,
            },
            (None, None) => {
                return Err(SettingsError::InvalidSetting {
                    setting_name: self.env_override.clone(),
                    reason: "Required setting has no value".to_string(),
                })
            }
        };

        self.validate_value(&resolved.value)?;
        Ok(resolved)
    }

    /// Resolve and parse into `T`
    pub fn load_parsed<T>(&self, env: &dyn EnvironmentProvider) -> Result<T, SettingsError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        let value = self.load(env)?.value;
        value.parse::<T>().map_err(|e| SettingsError::ParseError {
            setting_name: self.env_override.clone(),
            error: format!("'{}': {}", value, e),
        })
    }

    fn validate_value(&self, value: &str) -> Result<(), SettingsError> {
        if let Some(min) = self.min_length {
            if value.len() < min {
                return Err(SettingsError::InvalidSetting {
                    setting_name: self.env_override.clone(),
                    reason: format!("must be at least {} characters", min),
                });
            }
        }

        if let Some(validator) = self.validator {
            validator(value).map_err(|reason| SettingsError::InvalidSetting {
                setting_name: self.env_override.clone(),
                reason,
            })?;
        }

        Ok(())
    }

    /// Validator factory body for integer ranges
    pub fn validate_range(value: &str, min: u64, max: u64) -> Result<(), String> {
        match value.parse::<u64>() {
            Ok(n) if (min..=max).contains(&n) => Ok(()),
            Ok(n) => Err(format!("{} is outside {}..={}", n, min, max)),
            Err(e) => Err(format!("'{}' is not a number: {}", value, e)),
        }
    }
}
