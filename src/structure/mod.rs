//! # Structural Editing
//!
//! Operations that change the shape of a table: which records and
//! components it holds and in what order. Most of them read a source
//! [`Operand`](crate::table::Operand), build a fresh table and install it in
//! `self` once everything succeeded.
//!
//! ## Operations
//!
//! | Operation | Axis | Result |
//! |-----------|------|--------|
//! | `select` | records, blocks, components | contiguous sub-range, clamped |
//! | `delete` | records, blocks, components | source without a sub-range |
//! | `join`, `njoin` | components | columns of both tables side by side |
//! | `cat`, `cat_range` | records | rows of both tables one after the other |
//! | `reshape` | cells | same cells, `R' × C'` |
//! | `repmat` | both | source tiled |
//! | `shift`, `rotate` | records | records moved, vacated ones zeroed or wrapped |
//! | `compress`, `expand` | records | run-length encoding of one component |
//! | `xstore` | records, blocks, components | range overwritten in place |
//! | `copy_components` | components | columns overwritten in place |
//! | `copy_marked` | records, components | marked (or unmarked) runs |
//! | `copy_labels` | records | symbolic columns mapped by record increment |
//! | `resample` | records | interpolated at `1/rate` steps |
//!
//! Inserting empty records or components is part of the table core
//! (`insert_records`, `insert_components`).
//!
//! ## Recoverable Mismatches
//!
//! `join`, `cat` and `copy_labels` resolve shape mismatches by truncation
//! and report an [`Outcome`](crate::error::Outcome) warning instead of
//! failing:
//!
//! ```text
//! self: 4 records   src: 3 records
//!   join -> 3 records, Warned(Truncate)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use datatable::{Axis, Operand, Table};
//!
//! let mut head = Table::new();
//! head.select(&table, Axis::Records, 0, Some(10))?;
//!
//! // in place: drop the first two components of `table` itself
//! table.delete(Operand::This, Axis::Components, 0, Some(2))?;
//! ```

mod combine;
mod copy;
mod reshape;
mod resample;
mod rle;
mod select;
