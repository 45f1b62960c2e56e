use crate::table::TableError;
use std::fmt;
use thiserror::Error as ThisError;

///
/// InternalError
///
/// Structured load error with a stable classification.
/// Every fatal construction failure surfaces as one of these.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct InternalError {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    pub detail: Option<ErrorDetail>,
}

impl InternalError {
    /// Construct an InternalError without detail.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Wrap a table read failure raised while loading `origin`.
    pub(crate) fn table(origin: ErrorOrigin, err: TableError) -> Self {
        Self {
            class: err.class(),
            origin,
            message: err.to_string(),
            detail: Some(ErrorDetail::Table(err)),
        }
    }

    /// Construct an invariant violation for a specific origin.
    pub(crate) fn invariant(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::InvariantViolation, origin, message)
    }

    #[must_use]
    pub const fn is_parse(&self) -> bool {
        matches!(self.class, ErrorClass::Parse)
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

///
/// ErrorDetail
///
/// Origin-independent structured detail carried by [`InternalError`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Table(TableError),
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Io,
    Parse,
    MissingColumn,
    InvariantViolation,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Io => "io",
            Self::Parse => "parse",
            Self::MissingColumn => "missing_column",
            Self::InvariantViolation => "invariant_violation",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///
/// Which input or component raised the error.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    PlanningUnit,
    Cost,
    Species,
    Lock,
    Zone,
    Connection,
    Matrix,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::PlanningUnit => "planning_unit",
            Self::Cost => "cost",
            Self::Species => "species",
            Self::Lock => "lock",
            Self::Zone => "zone",
            Self::Connection => "connection",
            Self::Matrix => "matrix",
        };
        write!(f, "{label}")
    }
}
