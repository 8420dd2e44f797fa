//! # Table Core
//!
//! This module provides `Table`, a heterogeneous row-major record store with
//! named, typed components. Every other subsystem (marks, structural editing,
//! arithmetic, strings, sort, lookup) adds `impl Table` blocks on top of the
//! primitives defined here.
//!
//! ## Memory Layout
//!
//! ```text
//! components: [ name:char[8] | age:int | score:double ]
//! offsets:      0              8         12            reclen = 20
//!
//! buffer:
//! +----------+------+--------+----------+------+--------+-----
//! | "Bob\0.."| 30   | 1.5    | "Al\0..."| 21   | 0.25   | ...
//! +----------+------+--------+----------+------+--------+-----
//! |<------- record 0 ------->|<------- record 1 ------->|
//! ```
//!
//! Cells are stored little-endian with no padding between components.
//!
//! ## Invariants
//!
//! | Invariant | Maintained by |
//! |-----------|---------------|
//! | `nrec <= capacity` | every count setter clips |
//! | `reclen == Σ size`, offsets cumulative | `Layout` recomputes on change |
//! | `nblock <= nrec` when records exist | `set_block_count`, allocation |
//! | a mark map matches its granularity | component, record and block changes drop it |
//!
//! ## Module Structure
//!
//! - `layout`: `Component` and `Layout`
//! - `descriptors`: scalar metadata and `DescriptorKey`
//! - `operand`: `Operand`, the source argument of self-modifying operations
//! - `base`: `Table` struct, components, allocation, counts
//! - `cell`: single-cell fetch/store
//! - `bulk`: record, component and block vectors; interpolation
//! - `init`: literal initializers
//! - `convert`: `tconvert` and descriptor copies
//!
//! ## Usage
//!
//! ```ignore
//! use datatable::{ElementType, Table};
//!
//! let mut t = Table::new();
//! t.add_component("name", ElementType::symbolic(8)?)?;
//! t.add_component("age", ElementType::I32)?;
//! t.allocate(3)?;
//! t.init_from_str("Bob 30 Al 21 Cy 40", 0, 0, None)?;
//!
//! assert_eq!(t.sfetch(1, 0), "Al");
//! assert_eq!(t.dfetch(2, 1), 40.0);
//! ```

pub mod base;
pub mod bulk;
pub mod cell;
pub mod convert;
pub mod descriptors;
pub mod init;
pub mod layout;
pub mod operand;


pub use base::Table;
pub use bulk::Interpolation;
pub use descriptors::{DescriptorKey, Descriptors};
pub use layout::{Component, Layout};
pub use operand::Operand;
