//! # Cell-wise Arithmetic
//!
//! Scalar operators applied cell by cell and aggregations that reduce a
//! window of cells to one value.
//!
//! ## Dispatch
//!
//! ```text
//! cell type        operand        kernel            store
//! ─────────        ───────        ──────            ─────
//! integral/float   real           real(f64, f64)    clipped to the cell type
//! integral/float   complex        complex(..)       real part, clipped
//! complex          any            complex(..)       both parts
//! symbolic/pointer -              skipped           -
//! ```
//!
//! Every operation honors the mark of the table it writes: unmarked records,
//! components or cells are left alone. With forced noise on
//! ([`Table::set_noise`](crate::table::Table::set_noise)) every stored value
//! gets uniform `[0, 1)` dither on the real part, and on the imaginary part
//! of complex cells.
//!
//! ## Operations
//!
//! | Operation | Writes | Operand |
//! |-----------|--------|---------|
//! | `scalop` | `self` in place | constant |
//! | `scalop_table` | copy of `src` | scalar, row, column or matrix table |
//! | `fill` | `self` in place | arithmetic progression |
//! | `aggregate` | fresh table | optional weight mask |
//! | `quantize` | fresh `short` table | midpoint and scale header records |
//! | `dequantize` | fresh `double` table | header records of a quantized table |
//!
//! ## Opcodes
//!
//! [`ScalarOp`] and [`AggregateOp`] parse from their names (`"add"`,
//! `"+"`, `"mean"`, ..). An unknown scalar name is `BadOpcode`; an unknown
//! aggregation is `NoSupport`.
//!
//! ## Usage
//!
//! ```ignore
//! use datatable::arith::{AggregateOp, ScalarOp};
//! use datatable::{Axis, Complex, Table};
//!
//! table.scalop(Complex::real(10.0), "+".parse()?, None)?;
//!
//! let mut means = Table::new();
//! means.aggregate(&table, None, Complex::ZERO, AggregateOp::Mean, Axis::Components)?;
//! ```

mod aggregate;
pub mod kernels;
mod ops;
mod quantize;
mod reduce;
mod scalop;

#[cfg(test)]
mod tests;

pub use ops::{AggregateOp, ScalarOp};
