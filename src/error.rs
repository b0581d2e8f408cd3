/// Error types shared across the player
pub type Result<T> = std::result::Result<T, PlayerError>;

/// Common error type for the player crate.
///
/// Controller operations never fail; these cover the edges of the program
/// (configuration, terminal I/O and sample data parsing).
#[derive(Debug, thiserror::Error)]
pub enum PlayerError {
    /// Terminal or filesystem failure.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// Configuration could not be read or deserialized.
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    /// A duration string that is not in `M:SS` form.
    #[error("invalid track duration '{0}', expected M:SS")]
    InvalidDuration(String),
    /// A log level that tracing does not understand.
    #[error("invalid log level '{0}'")]
    InvalidLogLevel(String),
    #[error("{0}")]
    Message(String),
}

impl PlayerError {
    pub fn msg<T: Into<String>>(msg: T) -> Self {
        Self::Message(msg.into())
    }
}

impl From<&str> for PlayerError {
    fn from(value: &str) -> Self {
        Self::msg(value)
    }
}

impl From<String> for PlayerError {
    fn from(value: String) -> Self {
        Self::Message(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = PlayerError::InvalidDuration("3-32".to_string());
        assert_eq!(err.to_string(), "invalid track duration '3-32', expected M:SS");

        let err: PlayerError = "boom".into();
        assert_eq!(err.to_string(), "boom");
    }
}
