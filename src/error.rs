//! # Error Taxonomy
//!
//! Every fallible operation returns `eyre::Result`. Failures that callers may
//! want to branch on carry a [`TableError`] payload which can be recovered with
//! `report.downcast_ref::<TableError>()`.
//!
//! ## Errors versus Warnings
//!
//! | Situation | Reported as |
//! |-----------|-------------|
//! | Bad index, unknown opcode, shape with no truncation rule | `Err(TableError)` |
//! | Length mismatch with an obvious truncation (join, cat) | `Outcome::Warned(Truncate)` |
//! | Operand shape padded or cut (scalop_table) | `Outcome::Warned(DimensionMismatch)` |
//! | Unmatched rows in index generation | `tracing::warn!` per row, count returned |
//!
//! Warnings are always logged through `tracing::warn!` before they are
//! returned so that callers ignoring the [`Outcome`] still leave a trace.
//!
//! ## Usage
//!
//! ```ignore
//! use datatable::error::{ErrorKind, TableError};
//!
//! let err = table.select_records(&src, 10, 5).unwrap_err();
//! let kind = err.downcast_ref::<TableError>().map(TableError::kind);
//! assert_eq!(kind, Some(ErrorKind::Empty));
//! ```

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The operation needs valid records but the table has none.
    Empty,
    BadComponent,
    BadIndex,
    DimensionMismatch,
    /// Mixed numeric and symbolic components where one kind is required.
    Homogeneity,
    BadOpcode,
    NoSupport,
    BadInitializer,
    TooFewOrMany,
    BadMarkMode,
    NoMark,
    BadSortMode,
    BadSortType,
    OutOfMemory,
    Truncate,
    NotFound,
    NotImplemented,
    Internal,
}

impl ErrorKind {
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Empty => "empty",
            ErrorKind::BadComponent => "bad component",
            ErrorKind::BadIndex => "bad index",
            ErrorKind::DimensionMismatch => "dimension mismatch",
            ErrorKind::Homogeneity => "homogeneity",
            ErrorKind::BadOpcode => "bad opcode",
            ErrorKind::NoSupport => "not supported",
            ErrorKind::BadInitializer => "bad initializer",
            ErrorKind::TooFewOrMany => "too few or too many initializers",
            ErrorKind::BadMarkMode => "bad mark mode",
            ErrorKind::NoMark => "no mark",
            ErrorKind::BadSortMode => "bad sort mode",
            ErrorKind::BadSortType => "bad sort type",
            ErrorKind::OutOfMemory => "out of memory",
            ErrorKind::Truncate => "truncated",
            ErrorKind::NotFound => "not found",
            ErrorKind::NotImplemented => "not implemented",
            ErrorKind::Internal => "internal error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableError {
    kind: ErrorKind,
    detail: String,
}

impl TableError {
    pub fn new(kind: ErrorKind, detail: impl Into<String>) -> Self {
        Self {
            kind,
            detail: detail.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.detail.is_empty() {
            write!(f, "{}", self.kind.name())
        } else {
            write!(f, "{}: {}", self.kind.name(), self.detail)
        }
    }
}

impl std::error::Error for TableError {}

/// Returns the [`ErrorKind`] of a report produced by this crate, if any.
pub fn kind_of(report: &eyre::Report) -> Option<ErrorKind> {
    report.downcast_ref::<TableError>().map(TableError::kind)
}

/// Result of an operation that completed, possibly after recovering from a
/// shape problem.
#[must_use]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Complete,
    Warned(ErrorKind),
}

impl Outcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, Outcome::Complete)
    }

    pub fn warning(&self) -> Option<ErrorKind> {
        match self {
            Outcome::Complete => None,
            Outcome::Warned(kind) => Some(*kind),
        }
    }

    /// Keeps the first warning seen.
    pub fn and(self, other: Outcome) -> Outcome {
        match self {
            Outcome::Complete => other,
            warned => warned,
        }
    }

    pub(crate) fn warn(kind: ErrorKind, detail: impl fmt::Display) -> Outcome {
        tracing::warn!(kind = kind.name(), "{}", detail);
        Outcome::Warned(kind)
    }
}

/// Returns early with a typed [`TableError`].
#[macro_export]
macro_rules! table_bail {
    ($kind:ident, $($arg:tt)*) => {
        return Err(::eyre::Report::new($crate::error::TableError::new(
            $crate::error::ErrorKind::$kind,
            format!($($arg)*),
        )))
    };
}

/// Like `ensure!`, with a typed [`TableError`].
#[macro_export]
macro_rules! table_ensure {
    ($cond:expr, $kind:ident, $($arg:tt)*) => {
        if !$cond {
            $crate::table_bail!($kind, $($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fails() -> eyre::Result<()> {
        table_bail!(BadComponent, "component {} out of range", 7);
    }

    #[test]
    fn table_error_survives_eyre_round_trip() {
        let err = fails().unwrap_err();
        assert_eq!(kind_of(&err), Some(ErrorKind::BadComponent));
        assert_eq!(err.to_string(), "bad component: component 7 out of range");
    }

    #[test]
    fn outcome_keeps_first_warning() {
        let o = Outcome::Complete
            .and(Outcome::Warned(ErrorKind::Truncate))
            .and(Outcome::Warned(ErrorKind::DimensionMismatch));
        assert_eq!(o.warning(), Some(ErrorKind::Truncate));
        assert!(Outcome::Complete.and(Outcome::Complete).is_complete());
    }
}
