//! Range selection and deletion along one axis.

use eyre::Result;

use crate::mark::Axis;
use crate::table::{Operand, Table};
use crate::{table_bail, table_ensure};

/// Clamps `first..first + count` to `0..len`. `None` means "to the end".
fn clamp(first: usize, count: Option<usize>, len: usize) -> (usize, usize) {
    let first = first.min(len);
    let count = count.map_or(len - first, |n| n.min(len - first));
    (first, count)
}

/// Records `first..first + count` of `src` with its layout and descriptors.
pub(crate) fn record_slice(src: &Table, first: usize, count: usize) -> Result<Table> {
    let mut out = Table::structure_of(src);
    out.allocate(count)?;
    let reclen = src.record_len();
    out.buffer[..count * reclen]
        .copy_from_slice(&src.buffer[first * reclen..(first + count) * reclen]);
    Ok(out)
}

/// Components `first..end` of `src`, all records, with its descriptors.
pub(crate) fn component_slice(src: &Table, first: usize, end: usize) -> Result<Table> {
    let mut out = Table::new();
    for c in &src.layout().components()[first..end] {
        out.add_component(c.name(), c.ty())?;
    }
    out.allocate(src.record_count())?;
    out.descr = src.descr.clone();
    out.set_block_count(src.nblock);
    if first < end {
        let from = src.layout().components()[first].offset();
        let width = out.record_len();
        for r in 0..src.record_count() {
            let s = r * src.record_len() + from;
            out.buffer[r * width..(r + 1) * width].copy_from_slice(&src.buffer[s..s + width]);
        }
    }
    Ok(out)
}

impl Table {
    /// Copies a contiguous range of `src` along `axis`. The range is clamped
    /// to what `src` holds; `count = None` selects to the end.
    pub fn select<'a>(
        &mut self,
        src: impl Into<Operand<'a>>,
        axis: Axis,
        first: usize,
        count: Option<usize>,
    ) -> Result<()> {
        let next = {
            let src = src.into().source(self);
            match axis {
                Axis::Records => {
                    let (first, count) = clamp(first, count, src.record_count());
                    record_slice(src, first, count)?
                }
                Axis::Blocks => {
                    let (first, count) = clamp(first, count, src.block_count());
                    let rpb = src.records_per_block();
                    let mut out = record_slice(src, first * rpb, count * rpb)?;
                    out.set_block_count(count);
                    out
                }
                Axis::Components => {
                    let (first, count) = clamp(first, count, src.component_count());
                    component_slice(src, first, first + count)?
                }
                Axis::Cells => table_bail!(NoSupport, "cannot select a range of cells"),
            }
        };
        self.install(next);
        Ok(())
    }

    pub fn select_records<'a>(
        &mut self,
        src: impl Into<Operand<'a>>,
        first: usize,
        count: Option<usize>,
    ) -> Result<()> {
        self.select(src, Axis::Records, first, count)
    }

    pub fn select_blocks<'a>(
        &mut self,
        src: impl Into<Operand<'a>>,
        first: usize,
        count: Option<usize>,
    ) -> Result<()> {
        self.select(src, Axis::Blocks, first, count)
    }

    pub fn select_components<'a>(
        &mut self,
        src: impl Into<Operand<'a>>,
        first: usize,
        count: Option<usize>,
    ) -> Result<()> {
        self.select(src, Axis::Components, first, count)
    }

    /// Copies `src` without a contiguous range along `axis`.
    ///
    /// Record and component ranges are clipped. A block range must lie within
    /// the block count; deleting blocks removes whole blocks and keeps the
    /// records that trail the last full block.
    pub fn delete<'a>(
        &mut self,
        src: impl Into<Operand<'a>>,
        axis: Axis,
        first: usize,
        count: Option<usize>,
    ) -> Result<()> {
        let mut next = src.into().source(self).clone();
        next.mark = None;
        match axis {
            Axis::Records => next.delete_records(first, count.unwrap_or(usize::MAX))?,
            Axis::Components => next.delete_components(first, count.unwrap_or(usize::MAX))?,
            Axis::Blocks => {
                let nblock = next.block_count();
                let count = count.unwrap_or(nblock.saturating_sub(first));
                table_ensure!(
                    first.checked_add(count).is_some_and(|end| end <= nblock),
                    BadIndex,
                    "cannot delete blocks {}..{} of {}",
                    first,
                    first.saturating_add(count),
                    nblock
                );
                let rpb = next.records_per_block();
                next.delete_records(first * rpb, count * rpb)?;
                next.set_block_count(nblock - count);
            }
            Axis::Cells => table_bail!(NoSupport, "cannot delete a range of cells"),
        }
        self.install(next);
        Ok(())
    }

    pub fn delete_blocks<'a>(
        &mut self,
        src: impl Into<Operand<'a>>,
        first: usize,
        count: usize,
    ) -> Result<()> {
        self.delete(src, Axis::Blocks, first, Some(count))
    }
}
