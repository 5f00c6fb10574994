//! Error types.
//!
//! Application plumbing (configuration, file IO, the CLI) uses `anyhow` through
//! [`Result`]. The engine reports rejected user input and failed imports with the typed
//! [`Rejection`] and [`ImportError`] so that callers can tell them apart from IO problems.

use std::fmt::{Display, Formatter};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// User input that the engine refused. No state is changed when one of these is returned.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum Rejection {
    #[error("Enter the amount paid or the volume; at least one must be greater than zero")]
    NoQuantity,
    #[error("The volume must be greater than zero (is the price per unit set?)")]
    NonPositiveVolume,
    #[error("The amount paid is too large to record")]
    AmountOutOfRange,
    #[error("The distance since the last refuel cannot be negative: {0}")]
    NegativeDistance(f64),
    #[error("Settings values cannot be negative: {0}")]
    NegativeSetting(f64),
}

/// Failures that abort an import as a whole.
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("The import file is not a JSON array of refuel records: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The broad category of a failure, used by the command handlers to label what went wrong
/// before the error reaches the user.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum ErrorType {
    Config,
    Input,
    Import,
    Storage,
}

impl Display for ErrorType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorType::Config => "Configuration error",
            ErrorType::Input => "Input rejected",
            ErrorType::Import => "Import failed",
            ErrorType::Storage => "Storage error",
        };
        f.write_str(s)
    }
}

/// Converts any result into a crate [`Result`] labelled with an [`ErrorType`].
pub trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| e.into().context(error_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pub_result_labels_error() {
        let r: std::result::Result<(), Rejection> = Err(Rejection::NoQuantity);
        let e = r.pub_result(ErrorType::Input).unwrap_err();
        assert_eq!(e.to_string(), "Input rejected");
        let chain = format!("{e:#}");
        assert!(chain.contains("at least one must be greater than zero"));
        assert_eq!(
            e.downcast_ref::<Rejection>(),
            Some(&Rejection::NoQuantity)
        );
    }

    #[test]
    fn test_pub_result_passes_ok() {
        let r: std::result::Result<u8, Rejection> = Ok(7);
        assert_eq!(r.pub_result(ErrorType::Input).unwrap(), 7);
    }
}
