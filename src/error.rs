//! Error types for table store and pipeline operations.
//!
//! Storage code returns [`Result`] so callers can match on
//! [`RidesError::TableNotFound`]. Pipeline stages work in `anyhow` and pick up
//! these errors through the blanket `std::error::Error` conversion.
//!
//! ```
//! use ride_eda::error::RidesError;
//!
//! fn describe(err: &RidesError) -> &'static str {
//!     match err {
//!         RidesError::TableNotFound(_) => "missing table",
//!         RidesError::Io(_) => "io",
//!         _ => "other",
//!     }
//! }
//! ```

use std::fmt;

/// Main error type for ride-eda operations.
#[derive(Debug)]
pub enum RidesError {
    /// I/O errors (warehouse files, config files)
    Io(std::io::Error),

    /// Dataframe engine errors
    DataProcessing(String),

    /// A named table does not exist in the store
    TableNotFound(String),

    /// Invalid or unreadable configuration
    Config(String),

    /// Generic error with context
    Other(String),
}

impl fmt::Display for RidesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::TableNotFound(name) => write!(f, "Table not found: {name}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for RidesError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for RidesError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<anyhow::Error> for RidesError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(format!("{err:#}"))
    }
}

impl From<serde_json::Error> for RidesError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for RidesError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

/// Result type alias for ride-eda operations.
pub type Result<T> = std::result::Result<T, RidesError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<RidesError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| wrap(e.into(), msg.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| wrap(e.into(), f()))
    }
}

// Missing tables keep their variant so callers can still match on them.
fn wrap(err: RidesError, msg: String) -> RidesError {
    match err {
        RidesError::TableNotFound(_) => err,
        RidesError::Io(e) => RidesError::Io(std::io::Error::new(e.kind(), format!("{msg}: {e}"))),
        other => RidesError::Other(format!("{msg}: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RidesError::TableNotFound("max.taxi_rides".to_owned());
        assert_eq!(err.to_string(), "Table not found: max.taxi_rides");
    }

    #[test]
    fn test_result_context() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "taxi_rides.parquet",
        ));

        let result: Result<()> = result.context("Failed to write table");
        let err = result.unwrap_err();
        assert!(matches!(err, RidesError::Io(_)));
        assert!(err.to_string().contains("Failed to write table"));
    }

    #[test]
    fn test_context_keeps_table_not_found() {
        let result: Result<()> = Err(RidesError::TableNotFound("taxi_rides".to_owned()));
        let err = result
            .with_context(|| "Failed to load source".to_owned())
            .unwrap_err();
        assert!(matches!(err, RidesError::TableNotFound(ref name) if name == "taxi_rides"));
    }

    #[test]
    fn test_polars_error_conversion() {
        let err: RidesError =
            polars::error::PolarsError::ColumnNotFound("fareAmount".into()).into();
        assert!(matches!(err, RidesError::DataProcessing(_)));
    }
}
