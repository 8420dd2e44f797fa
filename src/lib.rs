//! # datatable - Typed In-Memory Tables
//!
//! A table is a dense grid of records by components. Every component has a
//! name and an element type; all records share one byte layout and live in
//! one contiguous buffer. Records may be grouped into equally sized blocks,
//! and an optional mark restricts most operations to a subset of components,
//! records, blocks or cells.
//!
//! ## Quick Start
//!
//! ```ignore
//! use datatable::{ElementType, SortOrder, Table};
//!
//! let mut people = Table::with_components(
//!     &[("name", ElementType::symbolic(8)?), ("age", ElementType::I32)],
//!     3,
//! )?;
//! people.init_from_str("Bob 30 Al 21 Cy 40", 0, 0, None)?;
//!
//! let mut index = Table::new();
//! people.sort(datatable::Operand::This, Some(&mut index), 1, SortOrder::Ascending, false)?;
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  strings │  sort  │  lookup  │     arith      │
//! ├──────────────────────────────────────────────┤
//! │       structure (select, join, reshape)       │
//! ├──────────────────────────────────────────────┤
//! │                mark (MarkMap)                 │
//! ├──────────────────────────────────────────────┤
//! │  table (Layout, buffer, cells, descriptors)   │
//! ├──────────────────────────────────────────────┤
//! │     types (ElementType, Complex, format)      │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Operands
//!
//! Operations that produce a new table take their source as an
//! [`Operand`]: either another table or [`Operand::This`], the destination
//! itself. The result is built in a fresh table and moved into the
//! destination only on success, so a failing call never leaves a
//! half-written table behind.
//!
//! ## Errors
//!
//! Fallible operations return `eyre::Result`. Every error carries a
//! [`TableError`] whose [`ErrorKind`] can be read back with
//! [`error::kind_of`]. Conditions the operation recovers from are logged
//! through `tracing` and reported as an [`Outcome`].
//!
//! ## Module Overview
//!
//! - [`types`]: element types, complex numbers, cell text
//! - [`table`]: the table itself, cell and bulk access, initializers
//! - [`mark`]: component, record, block and cell marks
//! - [`structure`]: selection, concatenation, reshaping, run-length coding
//! - [`arith`]: scalar operations and aggregation
//! - [`strings`]: string operations and checksums
//! - [`sort`]: record sorting
//! - [`lookup`]: index lookup, index generation and record search

#[macro_use]
mod macros;

pub mod arith;
pub mod config;
pub mod error;
pub mod lookup;
pub mod mark;
pub mod sort;
pub mod strings;
pub mod structure;
pub mod table;
pub mod types;

pub use arith::{AggregateOp, ScalarOp};
pub use error::{ErrorKind, Outcome, TableError};
pub use lookup::Key;
pub use mark::Axis;
pub use sort::SortOrder;
pub use strings::StringOp;
pub use table::{Interpolation, Operand, Table};
pub use types::{Complex, ElementType, NumericKind};
