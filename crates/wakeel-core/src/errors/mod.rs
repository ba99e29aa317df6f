use std::error::Error;

/// Base trait for all engine errors.
pub trait WakeelError: Error + Send + Sync + 'static {
    /// Error code for programmatic handling.
    fn error_code(&self) -> &'static str;

    /// Whether this error is expected operational noise (logged as a
    /// warning) rather than a defect (logged as an error).
    fn is_operational(&self) -> bool {
        false
    }
}

impl WakeelError for wakeel_config::ConfigError {
    fn error_code(&self) -> &'static str {
        match self {
            wakeel_config::ConfigError::ConfigParseError { .. } => "CONFIG_PARSE_ERROR",
            wakeel_config::ConfigError::InvalidConfiguration { .. } => "INVALID_CONFIGURATION",
            wakeel_config::ConfigError::HomeDirNotFound => "HOME_DIR_NOT_FOUND",
            wakeel_config::ConfigError::MissingSecret { .. } => "MISSING_SECRET",
            wakeel_config::ConfigError::IoError { .. } => "CONFIG_IO_ERROR",
        }
    }

    fn is_operational(&self) -> bool {
        matches!(
            self,
            wakeel_config::ConfigError::ConfigParseError { .. }
                | wakeel_config::ConfigError::MissingSecret { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_codes_are_stable() {
        let err = wakeel_config::ConfigError::MissingSecret {
            name: "WAKEEL_TELEGRAM_TOKEN".to_string(),
        };
        assert_eq!(err.error_code(), "MISSING_SECRET");
        assert!(err.is_operational());

        let err = wakeel_config::ConfigError::HomeDirNotFound;
        assert_eq!(err.error_code(), "HOME_DIR_NOT_FOUND");
        assert!(!err.is_operational());
    }
}
