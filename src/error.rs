//! Error types for the sensor.

use thiserror::Error;

/// Errors raised while producing a report.
///
/// Every variant ends up as the `Text` of a failed PRTG result document.
#[derive(Debug, Error)]
pub enum SensorError {
    /// The management API could not be reached.
    #[error("Connection failed: {0}")]
    Transport(String),

    /// The management API answered with a non-success status.
    #[error("API returned status {status}")]
    HttpStatus {
        /// Status code and reason phrase, e.g. `404 Not Found`.
        status: String,
    },

    /// The response body was not valid JSON.
    #[error("Failed to parse response: {0}")]
    Parse(String),

    /// The resource kind is neither a queue nor an exchange.
    #[error("{0} is an unsupported object type")]
    UnsupportedKind(String),

    /// A vhost or name of `.` or `..`, which URL parsers collapse into the
    /// parent path.
    #[error("'{0}' cannot be addressed through the management API")]
    InvalidSegment(String),

    /// The result document could not be rendered.
    #[error("Failed to render result: {0}")]
    Render(String),

    /// The credential configuration could not be loaded.
    #[error("Failed to load configuration: {0}")]
    Config(String),
}

/// Errors in the command line itself.
///
/// These never produce a result document; the caller prints usage instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ArgumentError {
    #[error("Missing Required arguments (got {0}, expected 4 or 6)")]
    WrongArgumentCount(usize),

    #[error("No stored credentials named '{0}'")]
    UnknownCredential(String),

    #[error("Stored credentials '{0}' are not in user:password form")]
    MalformedCredential(String),
}

impl From<reqwest::Error> for SensorError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            SensorError::Parse(err.to_string())
        } else if let Some(status) = err.status() {
            SensorError::HttpStatus {
                status: status.to_string(),
            }
        } else {
            SensorError::Transport(err.to_string())
        }
    }
}

impl From<config::ConfigError> for SensorError {
    fn from(err: config::ConfigError) -> Self {
        SensorError::Config(err.to_string())
    }
}

impl From<quick_xml::se::SeError> for SensorError {
    fn from(err: quick_xml::se::SeError) -> Self {
        SensorError::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_kind_message() {
        let err = SensorError::UnsupportedKind("topic".to_string());
        assert_eq!(err.to_string(), "topic is an unsupported object type");
    }

    #[test]
    fn test_http_status_message() {
        let err = SensorError::HttpStatus {
            status: "404 Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "API returned status 404 Not Found");
    }

    #[test]
    fn test_wrong_argument_count_message() {
        let err = ArgumentError::WrongArgumentCount(5);
        assert!(err.to_string().contains("got 5"));
    }
}
