//! # Type Conversion and Metadata Copies
//!
//! `tconvert` rewrites every component to one target type:
//!
//! | Source | Target | Conversion |
//! |--------|--------|------------|
//! | same code | same code | byte copy |
//! | numeric | numeric | through `Complex`, clipped to the target |
//! | numeric | symbolic | locale-free printing |
//! | symbolic | numeric | leading numeric content, 0 otherwise |
//! | symbolic | symbolic | copy, truncated to the target width |

use eyre::Result;

use crate::table_ensure;
use crate::types::ElementType;

use super::{Operand, Table};

impl Table {
    pub fn tconvert<'a>(&mut self, src: impl Into<Operand<'a>>, ty: ElementType) -> Result<()> {
        table_ensure!(
            ty.is_numeric() || ty.is_symbolic(),
            NoSupport,
            "cannot convert to {}",
            ty
        );
        let next = {
            let src = src.into().source(self);
            let mut out = Table::new();
            for c in src.layout.components() {
                out.add_component(&c.name, ty)?;
            }
            out.allocate(src.nrec)?;
            for c in 0..src.component_count() {
                convert_column(src, c, &mut out, c);
            }
            out.descr = src.descr.clone();
            out.nblock = src.nblock;
            out
        };
        self.install(next);
        Ok(())
    }

    /// Copies descriptors and block count from `src`.
    pub fn copy_descriptors(&mut self, src: &Table) {
        self.descr = src.descr.clone();
        self.set_block_count(src.nblock);
    }
}

/// Copies column `sc` of `src` into column `dc` of `dst` for the records both
/// tables hold, converting between numeric and symbolic representations.
pub(crate) fn convert_column(src: &Table, sc: usize, dst: &mut Table, dc: usize) {
    for r in 0..src.nrec.min(dst.nrec) {
        convert_cell(src, r, sc, dst, r, dc);
    }
}

/// Copies one cell. Equal types copy bytes; a symbolic target receives the
/// printed value; any other target goes through `Complex`.
pub(crate) fn convert_cell(src: &Table, sr: usize, sc: usize, dst: &mut Table, dr: usize, dc: usize) {
    let (Some(st), Some(dt)) = (src.component_type(sc), dst.component_type(dc)) else {
        return;
    };
    if st == dt {
        if let (Some(from), Some(to)) = (src.cell(sr, sc), dst.cell_mut(dr, dc)) {
            to.copy_from_slice(from);
        }
    } else if dt.is_symbolic() {
        let s = src.sfetch(sr, sc);
        dst.sstore(dr, dc, &s);
    } else {
        dst.cstore(dr, dc, src.cfetch(sr, sc));
    }
}
