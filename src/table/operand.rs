//! # Source Operands
//!
//! Operations that write `self` while reading another table take the source
//! as an [`Operand`]. Rust forbids passing `&mut self` and `&self` together,
//! so an in-place call names the destination with `Operand::This`.
//!
//! Two ways of honoring an aliased source:
//!
//! | Helper | Used by | Aliased source |
//! |--------|---------|----------------|
//! | `Operand::source` | operations producing a fresh table | read through `&self`, no copy |
//! | `Operand::resolve` | operations writing into existing cells | cloned into a temporary |
//!
//! In both cases the destination is only replaced after the operation
//! succeeded, so a failing call leaves it untouched.

use std::borrow::Cow;

use tracing::debug;

use super::Table;

#[derive(Debug, Clone, Copy)]
pub enum Operand<'a> {
    /// The destination itself.
    This,
    Other(&'a Table),
}

impl<'a> From<&'a Table> for Operand<'a> {
    fn from(table: &'a Table) -> Self {
        Operand::Other(table)
    }
}

impl<'a> From<&'a mut Table> for Operand<'a> {
    fn from(table: &'a mut Table) -> Self {
        Operand::Other(table)
    }
}

impl<'a> Operand<'a> {
    /// Returns a source that stays valid while `this` is mutated.
    pub(crate) fn resolve(self, this: &Table) -> Cow<'a, Table> {
        match self {
            Operand::This => {
                debug!(records = this.record_count(), "source aliases destination, cloning");
                Cow::Owned(this.clone())
            }
            Operand::Other(table) => Cow::Borrowed(table),
        }
    }

    /// Borrows the source for operations that build a new table and install
    /// it afterwards.
    pub(crate) fn source<'s>(self, this: &'s Table) -> &'s Table
    where
        'a: 's,
    {
        match self {
            Operand::This => this,
            Operand::Other(table) => table,
        }
    }

    pub fn is_this(&self) -> bool {
        matches!(self, Operand::This)
    }
}
