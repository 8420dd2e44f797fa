//! Reshaping, tiling, shifting and rotating.

use eyre::Result;

use crate::mark::Axis;
use crate::table::{Operand, Table};
use crate::types::ElementType;
use crate::{table_bail, table_ensure};

impl Table {
    /// Reinterprets the `R × C` cells of `src` as `recs × comps`. Cells are
    /// read column by column. Numeric cells are written column by column,
    /// symbolic cells record by record.
    ///
    /// Numeric tables become `double` (complex if any component is complex);
    /// symbolic tables keep their widest width. Mixing numeric and symbolic
    /// components is a `Homogeneity` error.
    pub fn reshape<'a>(
        &mut self,
        src: impl Into<Operand<'a>>,
        recs: usize,
        comps: usize,
    ) -> Result<()> {
        let next = {
            let src = src.into().source(self);
            let (nr, nc) = (src.record_count(), src.component_count());
            table_ensure!(
                recs.checked_mul(comps) == Some(nr * nc),
                DimensionMismatch,
                "{}x{} != {}x{}",
                recs,
                comps,
                nr,
                nc
            );
            let types: Vec<ElementType> = src.layout().components().iter().map(|c| c.ty()).collect();
            let target = if types.iter().all(ElementType::is_numeric) {
                if types.iter().any(ElementType::is_complex) {
                    ElementType::COMPLEX
                } else {
                    ElementType::F64
                }
            } else if types.iter().all(ElementType::is_symbolic) {
                let width = types.iter().filter_map(|t| t.symbolic_width()).max().unwrap_or(1);
                ElementType::symbolic(width)?
            } else {
                table_bail!(Homogeneity, "cannot reshape mixed numeric and symbolic components")
            };

            let mut out = Table::new();
            out.add_ncomps(target, comps)?;
            out.allocate(recs)?;
            out.descr = src.descr.clone();
            for i in 0..nr * nc {
                let (sr, sc) = (i % nr, i / nr);
                if target.is_symbolic() {
                    let (dr, dc) = (i / comps, i % comps);
                    if let (Some(bytes), Some(cell)) = (src.sbytes(sr, sc), out.cell_mut(dr, dc)) {
                        crate::types::write_cell_str(cell, bytes);
                    }
                } else {
                    out.cstore(i % recs, i / recs, src.cfetch(sr, sc));
                }
            }
            out
        };
        self.install(next);
        Ok(())
    }

    /// Tiles `src` `nrec` times downwards and `ncomp` times sideways.
    pub fn repmat<'a>(&mut self, src: impl Into<Operand<'a>>, nrec: usize, ncomp: usize) -> Result<()> {
        table_ensure!(
            nrec >= 1 && ncomp >= 1,
            BadIndex,
            "repetition counts must be positive, got {}x{}",
            nrec,
            ncomp
        );
        let next = {
            let src = src.into().source(self);
            let mut out = Table::new();
            for _ in 0..ncomp {
                for c in src.layout().components() {
                    out.add_component(c.name(), c.ty())?;
                }
            }
            let n = src.record_count();
            out.allocate(n * nrec)?;
            out.descr = src.descr.clone();
            let ls = src.record_len();
            for r in 0..n * nrec {
                let row = &src.buffer[(r % n) * ls..(r % n + 1) * ls];
                let base = r * out.record_len();
                for k in 0..ncomp {
                    out.buffer[base + k * ls..base + (k + 1) * ls].copy_from_slice(row);
                }
            }
            out
        };
        self.install(next);
        Ok(())
    }

    /// Moves the records of `src` by `n` positions (positive: towards the
    /// end) and zero-fills the vacated records. Only the record axis is
    /// supported.
    pub fn shift<'a>(&mut self, src: impl Into<Operand<'a>>, axis: Axis, n: isize) -> Result<()> {
        ensure_record_axis(axis, "shift")?;
        let mut next = src.into().source(self).clone();
        next.mark = None;
        let nrec = next.record_count();
        let k = n.unsigned_abs().min(nrec);
        if k > 0 {
            let reclen = next.record_len();
            let data = next.data_mut();
            if n > 0 {
                data.copy_within(..(nrec - k) * reclen, k * reclen);
                data[..k * reclen].fill(0);
            } else {
                data.copy_within(k * reclen.., 0);
                data[(nrec - k) * reclen..].fill(0);
            }
        }
        self.install(next);
        Ok(())
    }

    /// Like [`Table::shift`], but records moved out at one end come back in
    /// at the other.
    pub fn rotate<'a>(&mut self, src: impl Into<Operand<'a>>, axis: Axis, n: isize) -> Result<()> {
        ensure_record_axis(axis, "rotate")?;
        let mut next = src.into().source(self).clone();
        next.ensure_not_empty("rotate source")?;
        next.mark = None;
        let nrec = next.record_count() as isize;
        let k = n.rem_euclid(nrec) as usize;
        let reclen = next.record_len();
        next.data_mut().rotate_right(k * reclen);
        self.install(next);
        Ok(())
    }
}

fn ensure_record_axis(axis: Axis, what: &str) -> Result<()> {
    if axis != Axis::Records {
        table_bail!(NotImplemented, "{} along {} is not implemented", what, axis);
    }
    Ok(())
}
