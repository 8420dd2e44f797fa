//! # Mark Subsystem
//!
//! A mark selects a subset of one axis of a table. At most one mark map
//! exists per table; building a map for a different axis discards the old
//! one.
//!
//! ## States
//!
//! ```text
//!              mark(axis, ..)                   mark(other axis, ..)
//! Unmarked ──────────────────> Marked(axis) ───────────────────────> Marked(other)
//!    ^                            │   ^  │
//!    └────────── unmark() ────────┘   └──┘ mark(same axis, ..) adds bits
//! ```
//!
//! ## Granularity
//!
//! | Axis | Bits | Bit index of element |
//! |------|------|----------------------|
//! | `Components` | component count | `c` |
//! | `Records` | record count | `r` |
//! | `Blocks` | block count | `b` |
//! | `Cells` | records × components | `r * ncomp + c` |
//!
//! A map whose length no longer equals the granularity of its axis (records
//! were added, for example) is stale: the table reports itself as unmarked
//! and every predicate answers false.
//!
//! ## Participation
//!
//! Operations scoped by marks ask `selects_record`, `selects_component` and
//! `selects_cell`. Each answers true when the table is unmarked or marked
//! along a different axis, so an unmarked table behaves exactly as if every
//! element were selected.
//!
//! ## Usage
//!
//! ```ignore
//! use datatable::mark::Axis;
//!
//! table.mark(Axis::Records, 1, 1)?;
//! table.mark(Axis::Records, 3, 1)?;
//! table.scalop(Complex::real(10.0), ScalarOp::Add, None)?;
//! table.unmark();
//! ```

pub mod map;
mod ops;

#[cfg(test)]
mod tests;

use std::fmt;

pub use map::MarkMap;

/// Axis of a table, used both as mark mode and as the axis of structural
/// operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Components,
    Records,
    Blocks,
    Cells,
}

impl Axis {
    pub fn name(&self) -> &'static str {
        match self {
            Axis::Components => "components",
            Axis::Records => "records",
            Axis::Blocks => "blocks",
            Axis::Cells => "cells",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
