pub mod config_spec;
pub mod database;
pub mod env_provider;
pub mod errors;
pub mod logging;
pub mod settings;

pub use env_provider::{EnvironmentProvider, SystemEnvironment};
pub use errors::SettingsError;
pub use logging::{init_logging, LoggingConfig, LoggingError};
pub use settings::WorkshopSettings;
