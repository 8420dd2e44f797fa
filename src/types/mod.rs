//! # Element Type System
//!
//! This module defines what a table cell can hold and how it is encoded.
//!
//! ## Module Structure
//!
//! - `element`: `NumericKind`, `ElementType` and the `Element` storage trait
//! - `complex`: `Complex`, the common intermediate for numeric cells
//! - `format`: locale-free number printing and parsing for symbolic cells
//!
//! ## Key Types
//!
//! | Type | Purpose |
//! |------|---------|
//! | `ElementType` | Declared type of a component (symbolic, numeric, pointer) |
//! | `NumericKind` | Closed set of numeric storage kinds |
//! | `Element` | Little-endian load/store for one numeric kind |
//! | `Complex` | Real + imaginary pair, used for every numeric fetch |
//!
//! ## Usage
//!
//! ```ignore
//! use datatable::types::{Complex, ElementType, NumericKind};
//!
//! let ty: ElementType = "double".parse()?;
//! assert_eq!(ty.code(), 3008);
//!
//! let mut cell = [0u8; 2];
//! NumericKind::I16.store(&mut cell, Complex::real(1e9));
//! assert_eq!(NumericKind::I16.load(&cell).re, i16::MAX as f64);
//! ```

pub mod complex;
pub mod element;
pub mod format;

#[cfg(test)]
mod tests;

pub use complex::Complex;
pub use element::{Element, ElementType, NumericKind};
pub use format::{cell_str, number_text, parse_leading, write_cell_str};
