// SPDX-License-Identifier: MPL-2.0
use crate::notifications::ConfigError;

/// Errors surfaced by settings persistence and app startup.
///
/// Notification display itself never fails after validation; see
/// [`ConfigError`] for the options a caller can get wrong.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("I/O Error: {0}")]
    Io(String),

    #[error("Config Error: {0}")]
    Config(String),

    #[error("Invalid notification settings: {0}")]
    InvalidOptions(#[from] ConfigError),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let err: Error = std::io::Error::other("boom").into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn from_toml_error_produces_config_variant() {
        let parse = toml::from_str::<toml::Table>("a = = 1").unwrap_err();
        assert!(matches!(Error::from(parse), Error::Config(_)));
    }

    #[test]
    fn invalid_options_wrap_config_error() {
        let err: Error = ConfigError::NegativeDuration(-1.0).into();
        assert_eq!(err, Error::InvalidOptions(ConfigError::NegativeDuration(-1.0)));
        assert!(err.to_string().starts_with("Invalid notification settings"));
    }
}
