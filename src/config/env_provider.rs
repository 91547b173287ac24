/// Source of environment variables for settings and logging
///
/// Injected so tests can supply values without touching the process
/// environment, which parallel tests share.
pub trait EnvironmentProvider: Send + Sync {
    fn get_var(&self, key: &str) -> Option<String>;

    /// Trimmed value, with blank values treated as unset
    fn get_setting(&self, key: &str) -> Option<String> {
        self.get_var(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }
}

/// Reads the real process environment (after `dotenv` has loaded `.env`)
pub struct SystemEnvironment;

impl EnvironmentProvider for SystemEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// In-memory environment for settings tests
#[cfg(test)]
#[derive(Default)]
pub struct MockEnvironment {
    vars: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl MockEnvironment {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn with_var(self, key: &str, value: &str) -> Self {
        self.with_vars(&[(key, value)])
    }

    pub fn with_vars(mut self, vars: &[(&str, &str)]) -> Self {
        self.vars
            .extend(vars.iter().map(|(k, v)| (k.to_string(), v.to_string())));
        self
    }
}

#[cfg(test)]
impl EnvironmentProvider for MockEnvironment {
    fn get_var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_setting_treats_blank_as_unset() {
        let env = MockEnvironment::empty()
            .with_var("DATABASE_URL", "  sqlite::memory:  ")
            .with_var("LOG_LEVEL", "   ");

        assert_eq!(env.get_setting("DATABASE_URL"), Some("sqlite::memory:".to_string()));
        assert_eq!(env.get_setting("LOG_LEVEL"), None);
        assert_eq!(env.get_var("LOG_LEVEL"), Some("   ".to_string()));
    }

    #[test]
    fn test_mock_environment_provider() {
        let provider = MockEnvironment::empty()
            .with_var("DATABASE_URL", "sqlite::memory:")
            .with_vars(&[("LOG_LEVEL", "debug"), ("APP_LOG_FILE", "logs/workshop.log")]);

        assert_eq!(provider.get_var("DATABASE_URL"), Some("sqlite::memory:".to_string()));
        assert_eq!(provider.get_var("LOG_LEVEL"), Some("debug".to_string()));
        assert_eq!(provider.get_var("APP_LOG_FILE"), Some("logs/workshop.log".to_string()));
        assert_eq!(provider.get_var("TRANSIENT_RETRY_LIMIT"), None);
    }
}
