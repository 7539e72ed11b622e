use std::fmt;

/// Errors that abort a run before or around validation.
///
/// Per-URL failures never show up here; they are reported as an
/// [`Outcome`](crate::core::types::Outcome) of that URL instead.
#[derive(Debug)]
pub enum LinchError {
    /// IO error (reading the path list, config files, ...)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// HTTP client error
    Http(reqwest::Error),

    /// TOML parsing error
    TomlParsing(toml::de::Error),

    /// Invalid argument error
    InvalidArgument(String),

    /// The input stream of paths could not be consumed
    Input(String),
}

impl fmt::Display for LinchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinchError::Io(err) => write!(f, "IO error: {err}"),
            LinchError::Config(msg) => write!(f, "Configuration error: {msg}"),
            LinchError::Http(err) => write!(f, "HTTP error: {err}"),
            LinchError::TomlParsing(err) => write!(f, "TOML parsing error: {err}"),
            LinchError::InvalidArgument(msg) => write!(f, "Invalid argument: {msg}"),
            LinchError::Input(msg) => write!(f, "Input error: {msg}"),
        }
    }
}

impl std::error::Error for LinchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LinchError::Io(err) => Some(err),
            LinchError::Http(err) => Some(err),
            LinchError::TomlParsing(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for LinchError {
    fn from(err: std::io::Error) -> Self {
        LinchError::Io(err)
    }
}

impl From<reqwest::Error> for LinchError {
    fn from(err: reqwest::Error) -> Self {
        LinchError::Http(err)
    }
}

impl From<toml::de::Error> for LinchError {
    fn from(err: toml::de::Error) -> Self {
        LinchError::TomlParsing(err)
    }
}

/// Type alias for Results using LinchError
pub type Result<T> = std::result::Result<T, LinchError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn test_error_display() {
        let config_error = LinchError::Config("Invalid timeout".to_string());
        assert_eq!(
            format!("{config_error}"),
            "Configuration error: Invalid timeout"
        );

        let input_error = LinchError::Input("stdin closed".to_string());
        assert_eq!(format!("{input_error}"), "Input error: stdin closed");
    }

    #[test]
    fn test_error_from_io() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let linch_error = LinchError::from(io_error);

        assert!(matches!(linch_error, LinchError::Io(_)));
        assert!(format!("{linch_error}").starts_with("IO error:"));
    }

    #[test]
    fn test_error_from_toml() {
        let toml_error = toml::from_str::<toml::Value>("invalid toml [").unwrap_err();
        let linch_error = LinchError::from(toml_error);

        assert!(matches!(linch_error, LinchError::TomlParsing(_)));
        assert!(format!("{linch_error}").contains("TOML parsing error:"));
    }

    #[test]
    fn test_error_source() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let linch_error = LinchError::Io(io_error);

        let source = linch_error.source().expect("io errors carry a source");
        assert!(format!("{source}").contains("file not found"));

        let errors_without_source = vec![
            LinchError::Config("test".to_string()),
            LinchError::InvalidArgument("test".to_string()),
            LinchError::Input("test".to_string()),
        ];
        for error in errors_without_source {
            assert!(error.source().is_none());
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LinchError>();
    }
}
