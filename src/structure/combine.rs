//! Column-wise (`join`) and row-wise (`cat`) concatenation.

use eyre::Result;

use crate::error::{ErrorKind, Outcome};
use crate::table::{Operand, Table};
use crate::types::ElementType;

use super::select::record_slice;

impl Table {
    /// Appends the components of `src`. When the record counts differ both
    /// sides are cut to the shorter one and a `Truncate` warning is returned.
    /// An empty `self` becomes a copy of `src`; an empty `src` is a no-op.
    pub fn join<'a>(&mut self, src: impl Into<Operand<'a>>) -> Result<Outcome> {
        let (next, outcome) = {
            let src = src.into().source(self);
            if src.is_empty() {
                return Ok(Outcome::Complete);
            }
            if self.is_empty() {
                let mut copy = src.clone();
                copy.mark = None;
                (copy, Outcome::Complete)
            } else {
                join_tables(self, src)?
            }
        };
        self.install(next);
        Ok(outcome)
    }

    /// Joins components `first..first + count` of `src`.
    pub fn njoin(&mut self, src: &Table, first: usize, count: Option<usize>) -> Result<Outcome> {
        let mut part = Table::new();
        part.select_components(src, first, count)?;
        self.join(&part)
    }

    /// Appends all records of `src`.
    pub fn cat<'a>(&mut self, src: impl Into<Operand<'a>>) -> Result<Outcome> {
        self.cat_range(src, 0, None)
    }

    /// Appends records `first..first + count` of `src` (clamped).
    ///
    /// With identical component types the records are copied byte for byte.
    /// Otherwise cells are converted one by one: numeric into numeric,
    /// symbolic into symbolic (widening the destination component when the
    /// source is wider). Cells whose kinds differ are left zero. Source
    /// components beyond the destination's are dropped with a `Truncate`
    /// warning. A destination without components or storage becomes a copy.
    pub fn cat_range<'a>(
        &mut self,
        src: impl Into<Operand<'a>>,
        first: usize,
        count: Option<usize>,
    ) -> Result<Outcome> {
        let (next, outcome) = {
            let src = src.into().source(self);
            let first = first.min(src.record_count());
            let count = count.map_or(src.record_count() - first, |n| {
                n.min(src.record_count() - first)
            });
            if src.is_empty() || count == 0 {
                return Ok(Outcome::Complete);
            }
            if self.component_count() == 0 && self.capacity() == 0 {
                (record_slice(src, first, count)?, Outcome::Complete)
            } else {
                cat_tables(self, src, first, count)?
            }
        };
        self.install(next);
        Ok(outcome)
    }
}

fn join_tables(this: &Table, src: &Table) -> Result<(Table, Outcome)> {
    let n = this.record_count().min(src.record_count());
    let outcome = if this.record_count() != src.record_count() {
        Outcome::warn(
            ErrorKind::Truncate,
            format_args!(
                "joining {} records onto {}, keeping {}",
                src.record_count(),
                this.record_count(),
                n
            ),
        )
    } else {
        Outcome::Complete
    };

    let mut out = Table::new();
    out.descr = this.descr.clone();
    for c in this.layout().components().iter().chain(src.layout().components()) {
        out.add_component(c.name(), c.ty())?;
    }
    out.allocate(n)?;
    let (lt, ls, lo) = (this.record_len(), src.record_len(), out.record_len());
    for r in 0..n {
        let row = &mut out.buffer[r * lo..(r + 1) * lo];
        row[..lt].copy_from_slice(&this.buffer[r * lt..(r + 1) * lt]);
        row[lt..].copy_from_slice(&src.buffer[r * ls..(r + 1) * ls]);
    }
    out.set_block_count(this.nblock);
    Ok((out, outcome))
}

fn cat_tables(this: &Table, src: &Table, first: usize, count: usize) -> Result<(Table, Outcome)> {
    let mut out = this.clone();
    out.mark = None;

    let identical = out.layout().same_structure(src.layout());
    let shared = out.component_count().min(src.component_count());
    if !identical {
        for c in 0..shared {
            if let (Some(ElementType::Symbolic(to)), Some(ElementType::Symbolic(from))) =
                (out.component_type(c), src.component_type(c))
            {
                if from > to {
                    out.retype_component(c, ElementType::Symbolic(from))?;
                }
            }
        }
    }

    let at = out.add_records(count, 0)?;
    let outcome = if identical {
        let reclen = src.record_len();
        out.buffer[at * reclen..(at + count) * reclen]
            .copy_from_slice(&src.buffer[first * reclen..(first + count) * reclen]);
        Outcome::Complete
    } else {
        for c in 0..shared {
            let (Some(to), Some(from)) = (out.component_type(c), src.component_type(c)) else {
                continue;
            };
            for r in 0..count {
                if to.is_numeric() && from.is_numeric() {
                    out.cstore(at + r, c, src.cfetch(first + r, c));
                } else if to.is_symbolic() && from.is_symbolic() {
                    if let Some(bytes) = src.sbytes(first + r, c) {
                        if let Some(cell) = out.cell_mut(at + r, c) {
                            crate::types::write_cell_str(cell, bytes);
                        }
                    }
                }
            }
        }
        if src.component_count() > out.component_count() {
            Outcome::warn(
                ErrorKind::Truncate,
                format_args!(
                    "appending {} components onto {}",
                    src.component_count(),
                    out.component_count()
                ),
            )
        } else {
            Outcome::Complete
        }
    };
    Ok((out, outcome))
}
