//! Index generation: mapping source values to positions in a reference table.

use eyre::Result;
use hashbrown::HashMap;
use tracing::{debug, warn};

use crate::table::{Operand, Table};
use crate::types::{Complex, ElementType};
use crate::{table_bail, table_ensure};

/// Name of the index column built by [`Table::gen_index_list`].
const INDEX_LIST_NAME: &str = "indx";

/// Hashable form of a complex value. Zeros of both signs share one key.
fn value_key(v: Complex) -> (u64, u64) {
    ((v.re + 0.0).to_bits(), (v.im + 0.0).to_bits())
}

fn trim_ascii(s: &[u8]) -> &[u8] {
    let start = s.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(s.len());
    let end = s.iter().rposition(|b| !b.is_ascii_whitespace()).map_or(start, |p| p + 1);
    &s[start..end.max(start)]
}

/// Drops a trailing `[digits]` suffix: `a[12]` becomes `a`. A label that is
/// nothing but the suffix is kept whole.
fn strip_label_suffix(s: &[u8]) -> &[u8] {
    let Some(body) = s.strip_suffix(b"]") else {
        return s;
    };
    let digits = body.iter().rev().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return s;
    }
    match body[..body.len() - digits].strip_suffix(b"[") {
        Some(stem) if !stem.is_empty() => stem,
        _ => s,
    }
}

/// Builds the index column for [`Table::gen_index`] and counts unmatched
/// records.
fn index_of(
    src: &Table,
    tab: &Table,
    src_comp: Option<usize>,
    tab_comp: usize,
    label_mode: bool,
) -> Result<(Table, usize)> {
    src.ensure_not_empty("index source")?;
    tab.ensure_not_empty("index reference")?;
    tab.ensure_component(tab_comp)?;
    let numeric = tab.is_numeric_component(tab_comp);
    let src_comp = match src_comp {
        Some(c) => {
            src.ensure_component(c)?;
            c
        }
        None => match (0..src.component_count()).find(|&c| src.is_numeric_component(c) == numeric) {
            Some(c) => c,
            None => table_bail!(
                BadComponent,
                "source has no {} component",
                if numeric { "numeric" } else { "symbolic" }
            ),
        },
    };
    let fits = if numeric {
        src.is_numeric_component(src_comp)
    } else {
        src.is_symbolic_component(src_comp) && tab.is_symbolic_component(tab_comp)
    };
    table_ensure!(
        fits,
        Homogeneity,
        "source component {} and reference component {} differ in kind",
        src_comp,
        tab_comp
    );

    let mut out = Table::new();
    out.add_component(tab.component_name(tab_comp).unwrap_or_default(), ElementType::I64)?;
    out.allocate(src.record_count())?;
    out.copy_descriptors(src);

    let mut unmatched = 0;
    if numeric {
        let mut positions = HashMap::with_capacity(tab.record_count());
        for j in 0..tab.record_count() {
            let v = tab.cfetch(j, tab_comp);
            if !v.is_nan() {
                positions.entry(value_key(v)).or_insert(j);
            }
        }
        for r in 0..src.record_count() {
            let j = positions.get(&value_key(src.cfetch(r, src_comp))).map_or(-1, |&j| j as i64);
            if j < 0 {
                unmatched += 1;
            }
            out.store_i64(r, 0, j);
        }
    } else {
        let mut positions: HashMap<&[u8], usize> = HashMap::with_capacity(tab.record_count());
        for j in 0..tab.record_count() {
            let label = trim_ascii(tab.sbytes(j, tab_comp).unwrap_or_default());
            positions.entry(label).or_insert(j);
        }
        for r in 0..src.record_count() {
            let mut label = trim_ascii(src.sbytes(r, src_comp).unwrap_or_default());
            if label_mode {
                label = strip_label_suffix(label);
            }
            let j = positions.get(label).map_or(-1, |&j| j as i64);
            if j < 0 {
                warn!(record = r, label = %String::from_utf8_lossy(label), "label not found");
                unmatched += 1;
            }
            out.store_i64(r, 0, j);
        }
    }
    table_ensure!(
        unmatched < src.record_count(),
        NotFound,
        "none of {} source values found in the reference table",
        src.record_count()
    );
    debug!(src_comp, tab_comp, unmatched, "index generated");
    Ok((out, unmatched))
}

impl Table {
    /// Replaces `self` with one `long` column holding, for every record of
    /// `src`, the first record of `tab` whose `tab_comp` value equals the
    /// source value, or -1.
    ///
    /// `src_comp = None` picks the first source component of the same kind
    /// (numeric or symbolic) as `tab_comp`. Numeric values match exactly.
    /// Labels match after trimming whitespace; with `label_mode` a trailing
    /// `[n]` on the source label is ignored.
    ///
    /// Returns the number of unmatched records, each logged as a warning.
    /// If no record matched at all the call fails with `NotFound`.
    pub fn gen_index<'a>(
        &mut self,
        src: impl Into<Operand<'a>>,
        tab: &Table,
        src_comp: Option<usize>,
        tab_comp: usize,
        label_mode: bool,
    ) -> Result<usize> {
        let (next, unmatched) = {
            let src = src.into().source(self);
            index_of(src, tab, src_comp, tab_comp, label_mode)?
        };
        self.install(next);
        Ok(unmatched)
    }

    /// Builds an index list for `src`:
    ///
    /// | Input | Result |
    /// |-------|--------|
    /// | `index_comp` given | `indx` column copied from that component |
    /// | `tab` empty | empty table |
    /// | `tab` starts with a symbolic column | label indices of `src` against it |
    /// | otherwise | `indx` column: `tab`'s first column, -1 past its end |
    pub fn gen_index_list<'a>(
        &mut self,
        src: impl Into<Operand<'a>>,
        tab: &Table,
        index_comp: Option<usize>,
    ) -> Result<()> {
        let next = {
            let src = src.into().source(self);
            src.ensure_not_empty("index list source")?;
            if let Some(c) = index_comp {
                src.ensure_component(c)?;
                index_list(src.record_count(), |r| src.dfetch(r, c))?
            } else if tab.is_empty() {
                Table::new()
            } else if tab.is_symbolic_component(0) {
                let Some(labels) = first_symbolic(src) else {
                    table_bail!(NotFound, "source has no label component");
                };
                let (mut out, _) = index_of(src, tab, Some(labels), 0, false)?;
                out.rename_component(0, INDEX_LIST_NAME)?;
                out
            } else {
                let n = tab.record_count();
                index_list(src.record_count(), |r| if r < n { tab.dfetch(r, 0) } else { -1.0 })?
            }
        };
        self.install(next);
        Ok(())
    }

    /// Extracts the first symbolic component of `self` into `label_out`
    /// and, given `label_table`, its indices against the table's first
    /// column into `index_out`.
    ///
    /// Returns the number of labels missing from `label_table`.
    pub fn gen_label_index(
        &self,
        label_out: Option<&mut Table>,
        index_out: Option<&mut Table>,
        label_table: Option<&Table>,
    ) -> Result<usize> {
        self.ensure_not_empty("label source")?;
        let Some(comp) = first_symbolic(self) else {
            table_bail!(NotFound, "table has no label component");
        };
        let index = match (&index_out, label_table) {
            (Some(_), Some(tab)) => Some(index_of(self, tab, Some(comp), 0, false)?),
            _ => None,
        };
        if let Some(labels) = label_out {
            let mut next = Table::new();
            next.select_components(self, comp, Some(1))?;
            labels.install(next);
        }
        match (index_out, index) {
            (Some(target), Some((next, unmatched))) => {
                target.install(next);
                Ok(unmatched)
            }
            _ => Ok(0),
        }
    }
}

fn first_symbolic(table: &Table) -> Option<usize> {
    (0..table.component_count()).find(|&c| table.is_symbolic_component(c))
}

fn index_list(nrec: usize, value: impl Fn(usize) -> f64) -> Result<Table> {
    let mut out = Table::new();
    out.add_component(INDEX_LIST_NAME, ElementType::I64)?;
    out.allocate(nrec)?;
    for r in 0..nrec {
        out.dstore(r, 0, value(r));
    }
    Ok(out)
}
