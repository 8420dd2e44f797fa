//! Run-length encoding of one component.
//!
//! ```text
//! value: 5 5 5 7 7 2        compress        value ind_ n___
//!                         ───────────>       5     0    3
//!                         <───────────       7     3    2
//!                            expand          2     5    1
//! ```

use eyre::Result;

use crate::table::{Operand, Table};
use crate::types::ElementType;
use crate::{table_bail, table_ensure};

const START_NAME: &str = "ind_";
const LENGTH_NAME: &str = "n___";

impl Table {
    /// Encodes component `comp` of `src` as runs of equal values. Numeric
    /// values compare as complex numbers; symbolic values compare up to the
    /// first NUL.
    pub fn compress<'a>(&mut self, src: impl Into<Operand<'a>>, comp: usize) -> Result<()> {
        let next = {
            let src = src.into().source(self);
            src.ensure_not_empty("compress source")?;
            src.ensure_component(comp)?;

            let ty = src.layout().components()[comp].ty();
            let same = |a: usize, b: usize| {
                if ty.is_numeric() {
                    src.cfetch(a, comp) == src.cfetch(b, comp)
                } else if ty.is_symbolic() {
                    src.sbytes(a, comp) == src.sbytes(b, comp)
                } else {
                    src.cell(a, comp) == src.cell(b, comp)
                }
            };

            let mut runs: Vec<(usize, usize)> = Vec::new();
            let mut start = 0;
            for r in 1..=src.record_count() {
                if r == src.record_count() || !same(start, r) {
                    runs.push((start, r - start));
                    start = r;
                }
            }

            let mut out = Table::new();
            out.add_component(src.component_name(comp).unwrap_or_default(), ty)?;
            out.add_component(START_NAME, ElementType::I64)?;
            out.add_component(LENGTH_NAME, ElementType::I64)?;
            out.allocate(runs.len())?;
            out.descr = src.descr.clone();
            for (i, &(first, len)) in runs.iter().enumerate() {
                if let (Some(value), Some(cell)) = (src.cell(first, comp), out.cell_mut(i, 0)) {
                    cell.copy_from_slice(value);
                }
                out.dstore(i, 1, first as f64);
                out.dstore(i, 2, len as f64);
            }
            out
        };
        self.install(next);
        Ok(())
    }

    /// Decodes runs. Each record of `src` writes its `value` cell `length`
    /// times starting at output record `start`.
    ///
    /// | `start` | `len` | Output length | Run length |
    /// |---------|-------|---------------|------------|
    /// | given | given | last start + last length | `len` |
    /// | given | - | last start | next start - start |
    /// | - | given | Σ length | `len`, runs packed |
    ///
    /// Without `value` every component other than `start` and `len` is
    /// expanded and the results are joined.
    pub fn expand<'a>(
        &mut self,
        src: impl Into<Operand<'a>>,
        value: Option<usize>,
        start: Option<usize>,
        len: Option<usize>,
    ) -> Result<()> {
        let next = {
            let src = src.into().source(self);
            src.ensure_not_empty("expand source")?;
            for c in [value, start, len].into_iter().flatten() {
                src.ensure_component(c)?;
            }
            table_ensure!(
                start.is_some() || len.is_some(),
                BadComponent,
                "expand needs a start or a length component"
            );
            match value {
                Some(v) => expand_component(src, v, start, len)?,
                None => {
                    let mut out = Table::new();
                    for c in 0..src.component_count() {
                        if Some(c) != start && Some(c) != len {
                            let part = expand_component(src, c, start, len)?;
                            let _ = out.join(&part)?;
                        }
                    }
                    out.descr = src.descr.clone();
                    out
                }
            }
        };
        self.install(next);
        Ok(())
    }
}

fn expand_component(
    src: &Table,
    comp: usize,
    start: Option<usize>,
    len: Option<usize>,
) -> Result<Table> {
    let n = src.record_count();
    let at = |r: usize, c: usize| src.dfetch(r, c) as i64;
    let total = match (start, len) {
        (Some(s), Some(l)) => at(n - 1, s).checked_add(at(n - 1, l)),
        (Some(s), None) => Some(at(n - 1, s)),
        (None, Some(l)) => Some((0..n).map(|r| src.dfetch(r, l)).sum::<f64>() as i64),
        (None, None) => table_bail!(BadComponent, "expand needs a start or a length component"),
    };
    let Some(total) = total else {
        table_bail!(
            OutOfMemory,
            "expanding '{}' needs more than {} records",
            src.component_name(comp).unwrap_or_default(),
            i64::MAX
        );
    };
    let total = usize::try_from(total).unwrap_or(0);

    let mut out = Table::new();
    let ty = src.layout().components()[comp].ty();
    out.add_component(src.component_name(comp).unwrap_or_default(), ty)?;
    out.allocate(total)?;
    out.descr = src.descr.clone();

    let (mut from, mut run) = (0i64, 0i64);
    for r in 0..n {
        from = match start {
            Some(s) => at(r, s),
            None => from.saturating_add(run),
        };
        run = match (len, start) {
            (Some(l), _) => at(r, l),
            (None, Some(s)) => at(r + 1, s).saturating_sub(from),
            (None, None) => 0,
        };
        let Ok(first) = usize::try_from(from) else {
            continue;
        };
        let Some(value) = src.cell(r, comp) else {
            continue;
        };
        for k in 0..run.max(0) as usize {
            let Some(cell) = out.cell_mut(first + k, 0) else {
                table_bail!(
                    Internal,
                    "run {} of '{}' overflows {} output records",
                    r,
                    src.component_name(comp).unwrap_or_default(),
                    total
                );
            };
            cell.copy_from_slice(value);
        }
    }
    Ok(out)
}
