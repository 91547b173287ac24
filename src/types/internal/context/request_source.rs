use std::fmt;

/// Source of the request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestSource {
    /// Request originated from the request-handling layer on behalf of a staff member
    Api,

    /// Request originated from a CLI command
    Cli,

    /// Request originated from the system itself (bootstrap, maintenance)
    System,
}

impl fmt::Display for RequestSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestSource::Api => f.write_str("api"),
            RequestSource::Cli => f.write_str("cli"),
            RequestSource::System => f.write_str("system"),
        }
    }
}
