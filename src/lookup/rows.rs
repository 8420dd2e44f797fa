//! Row lookup through index columns.

use eyre::Result;
use tracing::debug;

use crate::config::LOOKUP_DEFAULT_WIDTH;
use crate::table::convert::convert_cell;
use crate::table::{Operand, Table};
use crate::types::ElementType;
use crate::table_ensure;

/// Reads cell `(rec, comp)` as a row or column index.
fn index_at(table: &Table, rec: usize, comp: usize, len: usize) -> Option<usize> {
    let v = table.dfetch(rec, comp);
    (v >= 0.0 && (v as usize) < len).then_some(v as usize)
}

impl Table {
    /// For every record of `sel`, copies components `tab_comp..tab_comp +
    /// count` of the `tab` record whose index is in `sel[.., sel_comp]`.
    ///
    /// Out-of-range indices leave the record zeroed, or initialize it from
    /// `init`. Without `tab` the result has `count` unnamed string columns
    /// and every record takes the `init` path.
    pub fn lookup<'a>(
        &mut self,
        sel: impl Into<Operand<'a>>,
        sel_comp: usize,
        tab: Option<&Table>,
        tab_comp: usize,
        count: usize,
        init: Option<&str>,
    ) -> Result<()> {
        let next = {
            let sel = sel.into().source(self);
            sel.ensure_not_empty("lookup selector")?;
            sel.ensure_component(sel_comp)?;
            table_ensure!(count > 0, BadComponent, "lookup of zero components");
            if let Some(tab) = tab {
                table_ensure!(
                    tab_comp.checked_add(count).is_some_and(|end| end <= tab.component_count()),
                    BadComponent,
                    "components {}..{} out of range ({} components)",
                    tab_comp,
                    tab_comp.saturating_add(count),
                    tab.component_count()
                );
            }

            let mut out = Table::new();
            match tab {
                Some(tab) => {
                    for c in tab_comp..tab_comp + count {
                        let ty = tab.component_type(c).unwrap_or(ElementType::F64);
                        out.add_component(tab.component_name(c).unwrap_or_default(), ty)?;
                    }
                }
                None => out.add_ncomps(ElementType::symbolic(LOOKUP_DEFAULT_WIDTH)?, count)?,
            }
            out.allocate(sel.record_count())?;
            out.copy_descriptors(sel);

            let (rows, from) = match tab {
                Some(tab) => (tab.record_count(), tab.component_offset(tab_comp).unwrap_or(0)),
                None => (0, 0),
            };
            let width = out.record_len();
            let mut missed = 0;
            for r in 0..sel.record_count() {
                match (tab, index_at(sel, r, sel_comp, rows)) {
                    (Some(tab), Some(idx)) => {
                        if let (Some(dst), Some(rec)) = (out.record_mut(r), tab.record(idx)) {
                            dst.copy_from_slice(&rec[from..from + width]);
                        }
                    }
                    _ => {
                        missed += 1;
                        if let Some(init) = init {
                            out.init_record(init, r, 0)?;
                        }
                    }
                }
            }
            debug!(records = sel.record_count(), missed, "lookup");
            out
        };
        self.install(next);
        Ok(())
    }

    /// Two-key lookup into `tab`: record indices come from `sel1[.., c1]`,
    /// component indices from `sel2[.., c2]`.
    ///
    /// | `matrix` | Result |
    /// |----------|--------|
    /// | false | one column typed like the first valid component index; record `i` gets `tab[sel1[i], sel2[i]]` |
    /// | true | one column per valid component index in `sel2`; record `i` gets row `sel1[i]` across them |
    ///
    /// Cells without a valid index pair are zero, or initialized from `init`
    /// in vector mode.
    #[allow(clippy::too_many_arguments)]
    pub fn lookup2<'a>(
        &mut self,
        sel1: impl Into<Operand<'a>>,
        c1: usize,
        sel2: &Table,
        c2: usize,
        tab: &Table,
        matrix: bool,
        init: Option<&str>,
    ) -> Result<()> {
        let next = {
            let sel1 = sel1.into().source(self);
            sel1.ensure_not_empty("first lookup selector")?;
            sel1.ensure_component(c1)?;
            sel2.ensure_not_empty("second lookup selector")?;
            sel2.ensure_component(c2)?;
            tab.ensure_not_empty("lookup table")?;

            let ncomp = tab.component_count();
            let columns: Vec<usize> = (0..sel2.record_count())
                .filter_map(|j| index_at(sel2, j, c2, ncomp))
                .take(if matrix { usize::MAX } else { 1 })
                .collect();
            table_ensure!(
                !columns.is_empty(),
                BadComponent,
                "selector holds no component index below {}",
                ncomp
            );

            let mut out = Table::new();
            for &c in &columns {
                let ty = tab.component_type(c).unwrap_or(ElementType::F64);
                out.add_component(tab.component_name(c).unwrap_or_default(), ty)?;
            }
            out.allocate(sel1.record_count())?;

            let nrow = tab.record_count();
            for i in 0..sel1.record_count() {
                let row = index_at(sel1, i, c1, nrow);
                if matrix {
                    if let Some(row) = row {
                        for (k, &c) in columns.iter().enumerate() {
                            convert_cell(tab, row, c, &mut out, i, k);
                        }
                    }
                    continue;
                }
                let col = if i < sel2.record_count() { index_at(sel2, i, c2, ncomp) } else { None };
                match (row, col) {
                    (Some(row), Some(col)) => convert_cell(tab, row, col, &mut out, i, 0),
                    _ => {
                        if let Some(init) = init {
                            out.init_record(init, i, 0)?;
                        }
                    }
                }
            }
            out.copy_descriptors(sel1);
            out
        };
        self.install(next);
        Ok(())
    }
}
