//! The module contains the errors the engine can return.
//!
//! - [`NotFound`] a referenced request, time sheet, contract or call-off
//!   order is absent.
//! - [`Validation`] malformed input, e.g. an unknown status name.
//! - [`Conflict`] an illegal state transition, an attempt to discard an
//!   in-progress time sheet or a contract amount misconfiguration.
//! - [`Forbidden`] the caller lacks the administrator capability.
//! - [`Compensation`] a multi-step operation failed and undoing its side
//!   effects failed too; an operator has to clean up.
//!
//!  [`NotFound`]: EngineError::NotFound
//!  [`Validation`]: EngineError::Validation
//!  [`Conflict`]: EngineError::Conflict
//!  [`Forbidden`]: EngineError::Forbidden
//!  [`Compensation`]: EngineError::Compensation
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("\"{0}\" not found!")]
    NotFound(String),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("{original} (compensation failed: {cleanup})")]
    Compensation {
        original: Box<EngineError>,
        cleanup: Box<EngineError>,
    },
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl EngineError {
    pub(crate) fn compensation(original: EngineError, cleanup: EngineError) -> Self {
        Self::Compensation {
            original: Box::new(original),
            cleanup: Box::new(cleanup),
        }
    }

    /// Returns `true` for [`EngineError::NotFound`].
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            (Self::Validation(a), Self::Validation(b)) => a == b,
            (Self::Conflict(a), Self::Conflict(b)) => a == b,
            (Self::Forbidden(a), Self::Forbidden(b)) => a == b,
            (Self::Configuration(a), Self::Configuration(b)) => a == b,
            (
                Self::Compensation {
                    original: a,
                    cleanup: c,
                },
                Self::Compensation {
                    original: b,
                    cleanup: d,
                },
            ) => a == b && c == d,
            (Self::Serialization(a), Self::Serialization(b)) => a.to_string() == b.to_string(),
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}
