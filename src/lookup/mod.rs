//! # Lookup and Index Generation
//!
//! Moves data between tables through index columns, builds those index
//! columns from values, and searches records by typed keys.
//!
//! ## Operations
//!
//! | Operation | Direction |
//! |-----------|-----------|
//! | `lookup` | index column ──> rows of a reference table |
//! | `lookup2` | row and column indices ──> cells of a reference table |
//! | `gen_index` | values ──> first matching row of a reference table |
//! | `gen_index_list` | copied index column, label indices or a reference column |
//! | `gen_label_index` | first label column ──> labels and label indices |
//! | `find` | typed keys ──> first matching record |
//!
//! ## Unmatched Values
//!
//! `gen_index` writes -1 for values the reference table does not hold,
//! logs each one and returns their count. Only a source without a single
//! match is an error (`NotFound`).
//!
//! ```text
//! src     tab      index
//! "b"     "a"      1
//! "z"     "b"  ──> -1     (warn: label not found)
//! "a"              0      returns Ok(1)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use datatable::lookup::Key;
//!
//! let mut index = Table::new();
//! let missing = index.gen_index(&words, &vocabulary, None, 0, true)?;
//!
//! let row = people.find(0, people.record_count(), &[(0, Key::Str("Al")), (1, Key::I32(21))])?;
//! ```

mod index;
mod key;
mod rows;


pub use key::Key;
