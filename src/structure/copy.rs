//! Range overwrites and mark- or label-driven copies.

use eyre::Result;

use crate::error::{ErrorKind, Outcome};
use crate::mark::{Axis, MarkMap};
use crate::table::convert::{convert_cell, convert_column};
use crate::table::{Operand, Table};
use crate::types::format;
use crate::{table_bail, table_ensure};

/// Maximal runs `(first, len)` of indices in `0..len` for which `keep` holds.
fn runs(len: usize, keep: impl Fn(usize) -> bool) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < len {
        if !keep(i) {
            i += 1;
            continue;
        }
        let first = i;
        while i < len && keep(i) {
            i += 1;
        }
        out.push((first, i - first));
    }
    out
}

fn fits(first: usize, count: usize, len: usize) -> bool {
    first.checked_add(count).is_some_and(|end| end <= len)
}

impl Table {
    /// Overwrites `count` records, blocks or components of `self` starting at
    /// `first_dst` with those of `src` starting at `first_src`. All checks run
    /// before the first cell is written.
    ///
    /// | Axis | Requirements |
    /// |------|--------------|
    /// | records | identical component layout |
    /// | blocks | equal records per block and component count |
    /// | components | equal record count |
    pub fn xstore<'a>(
        &mut self,
        src: impl Into<Operand<'a>>,
        first_src: usize,
        count: usize,
        first_dst: usize,
        axis: Axis,
    ) -> Result<()> {
        let src = src.into().resolve(self);
        let (have_src, have_dst) = (src.granularity(axis), self.granularity(axis));
        table_ensure!(
            fits(first_src, count, have_src),
            BadIndex,
            "source holds {} {}, cannot read {}..{}",
            have_src,
            axis,
            first_src,
            first_src.saturating_add(count)
        );
        table_ensure!(
            fits(first_dst, count, have_dst),
            BadIndex,
            "destination holds {} {}, cannot write {}..{}",
            have_dst,
            axis,
            first_dst,
            first_dst.saturating_add(count)
        );

        match axis {
            Axis::Records => {
                table_ensure!(
                    self.layout().same_structure(src.layout()),
                    DimensionMismatch,
                    "records of a different layout cannot be stored"
                );
                let reclen = self.record_len();
                self.buffer[first_dst * reclen..(first_dst + count) * reclen]
                    .copy_from_slice(&src.buffer[first_src * reclen..(first_src + count) * reclen]);
            }
            Axis::Blocks => {
                let rpb = self.records_per_block();
                table_ensure!(
                    rpb == src.records_per_block()
                        && self.component_count() == src.component_count(),
                    DimensionMismatch,
                    "block format {}x{} differs from {}x{}",
                    src.records_per_block(),
                    src.component_count(),
                    rpb,
                    self.component_count()
                );
                for b in 0..count {
                    for r in 0..rpb {
                        for c in 0..self.component_count() {
                            convert_cell(
                                &src,
                                (first_src + b) * rpb + r,
                                c,
                                self,
                                (first_dst + b) * rpb + r,
                                c,
                            );
                        }
                    }
                }
            }
            Axis::Components => {
                table_ensure!(
                    self.record_count() == src.record_count(),
                    DimensionMismatch,
                    "{} records cannot be stored into {}",
                    src.record_count(),
                    self.record_count()
                );
                for i in 0..count {
                    convert_column(&src, first_src + i, self, first_dst + i);
                }
            }
            Axis::Cells => table_bail!(NoSupport, "cannot store a range of cells"),
        }
        Ok(())
    }

    /// Copies up to `count` components of `src` from `src_first` into the
    /// components of `self` from `dst_first`, stopping at the last component
    /// of either table. A destination without records first receives as
    /// many records as `src` holds. Descriptors follow `src`.
    pub fn copy_components<'a>(
        &mut self,
        src: impl Into<Operand<'a>>,
        src_first: usize,
        dst_first: usize,
        count: usize,
    ) -> Result<()> {
        let src = src.into().resolve(self);
        src.ensure_component(src_first)?;
        if self.record_count() == 0 {
            self.allocate_uninitialized(src.record_count())?;
        }
        let n = count.min(src.component_count() - src_first);
        for i in 0..n {
            let dc = dst_first + i;
            if dc >= self.component_count() {
                break;
            }
            convert_column(&src, src_first + i, self, dc);
        }
        self.copy_descriptors(&src);
        Ok(())
    }

    /// Copies the marked (`positive`) or unmarked elements of `src`.
    ///
    /// Record marks splice the selected runs together with [`Table::cat`],
    /// component marks with [`Table::join`]. Without a mark the result is
    /// empty (`positive`) or a copy of `src`. The result is never marked.
    pub fn copy_marked<'a>(&mut self, src: impl Into<Operand<'a>>, positive: bool) -> Result<()> {
        let next = {
            let src = src.into().source(self);
            let mut out = Table::new();
            match src.mark_map().map(MarkMap::axis) {
                None if positive => {}
                None => {
                    out = src.clone();
                    out.mark = None;
                }
                Some(Axis::Records) => {
                    for (first, len) in runs(src.record_count(), |r| src.is_record_marked(r) == positive) {
                        let mut part = Table::new();
                        part.select_records(src, first, Some(len))?;
                        let _ = out.cat(&part)?;
                    }
                }
                Some(Axis::Components) => {
                    for (first, len) in
                        runs(src.component_count(), |c| src.is_component_marked(c) == positive)
                    {
                        let mut part = Table::new();
                        part.select_components(src, first, Some(len))?;
                        let _ = out.join(&part)?;
                    }
                }
                Some(axis) => table_bail!(BadMarkMode, "cannot copy elements selected by a {} mark", axis),
            }
            out
        };
        self.install(next);
        Ok(())
    }

    /// Writes the symbolic components of `src` into the symbolic components
    /// of `self`, pairing them in order.
    ///
    /// The record increments (`rec_inc`) of both tables decide the mapping:
    ///
    /// | Increments | Mapping |
    /// |------------|---------|
    /// | equal | row to row; differing counts warn `DimensionMismatch` |
    /// | both positive | source row `i` covers target rows up to `⌊inc_src·(i+1)/inc_dst + 0.5⌋`, the last label fills the rest |
    /// | otherwise | row `i` covers target rows up to `⌊(i+1)·n_dst/n_src + 0.5⌋`, with a warning |
    ///
    /// Copying a table onto itself does nothing.
    pub fn copy_labels<'a>(&mut self, src: impl Into<Operand<'a>>) -> Result<Outcome> {
        let Operand::Other(src) = src.into() else {
            return Ok(Outcome::Complete);
        };
        let (inc_src, inc_dst) = (src.descr.rec_inc, self.descr.rec_inc);
        let n_dst = self.record_count();
        let mut n_src = src.record_count();
        let mut outcome = Outcome::Complete;

        let targets: Vec<usize> = (0..self.component_count())
            .filter(|&c| self.is_symbolic_component(c))
            .collect();
        let sources = (0..src.component_count()).filter(|&c| src.is_symbolic_component(c));

        for (j, k) in sources.zip(targets) {
            if inc_src == inc_dst {
                if n_src != n_dst {
                    outcome = outcome.and(Outcome::warn(
                        ErrorKind::DimensionMismatch,
                        format_args!("copying {} labels onto {} records", n_src, n_dst),
                    ));
                    n_src = n_src.min(n_dst);
                }
                for i in 0..n_src {
                    store_label(src, i, j, self, i, k);
                }
            } else if inc_src > 0.0 && inc_dst > 0.0 {
                let mut m1 = 0;
                for i in 0..n_src {
                    let m2 = ((inc_src * (i + 1) as f64 / inc_dst + 0.5) as usize).min(n_dst);
                    for m in m1..m2 {
                        store_label(src, i, j, self, m, k);
                    }
                    m1 = m1.max(m2);
                }
                if n_src > 0 {
                    for m in m1..n_dst {
                        store_label(src, n_src - 1, j, self, m, k);
                    }
                }
            } else {
                outcome = outcome.and(Outcome::warn(
                    ErrorKind::DimensionMismatch,
                    format_args!(
                        "record increments {} and {} cannot be related, stretching by count",
                        inc_src, inc_dst
                    ),
                ));
                let mut m1 = 0;
                for i in 0..n_src {
                    let m2 = (((i + 1) * n_dst) as f64 / n_src as f64 + 0.5) as usize;
                    for m in m1..m2.min(n_dst) {
                        store_label(src, i, j, self, m, k);
                    }
                    m1 = m1.max(m2);
                }
            }
        }
        Ok(outcome)
    }
}

fn store_label(src: &Table, sr: usize, sc: usize, dst: &mut Table, dr: usize, dc: usize) {
    if let (Some(label), Some(cell)) = (src.sbytes(sr, sc), dst.cell_mut(dr, dc)) {
        format::write_cell_str(cell, label);
    }
}
