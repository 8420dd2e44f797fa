//! Stable permutation sort of whole records.

use std::cmp::Ordering;

use eyre::Result;
use tracing::debug;

use crate::table::{Operand, Table};
use crate::table_bail;
use crate::types::{format, ElementType, NumericKind};

use super::SortOrder;

/// Name of the index column written by [`Table::sort`].
const INDEX_NAME: &str = "idx";

impl Table {
    /// Copies `src` into `self` with the records ordered by component `comp`.
    ///
    /// With `numeric_strings` a symbolic key compares by its leading number
    /// first. When `index_out` is given it receives a single `long` column
    /// `idx` holding, for every output position, the source record placed
    /// there. The mark of `src` is not carried over.
    pub fn sort<'a>(
        &mut self,
        src: impl Into<Operand<'a>>,
        index_out: Option<&mut Table>,
        comp: usize,
        order: SortOrder,
        numeric_strings: bool,
    ) -> Result<()> {
        let (next, index) = {
            let src = src.into().source(self);
            src.ensure_not_empty("sort source")?;
            src.ensure_component(comp)?;
            let ty = match src.component_type(comp) {
                Some(ElementType::Pointer) | None => table_bail!(
                    BadSortType,
                    "component {} ('{}') is not orderable",
                    comp,
                    src.component_name(comp).unwrap_or_default()
                ),
                Some(ty) => ty,
            };
            let n = src.record_count();
            let leading: Vec<f64> = if numeric_strings && ty.is_symbolic() {
                (0..n)
                    .map(|r| src.sbytes(r, comp).map_or(0.0, |s| format::parse_leading(&format::cell_str(s))))
                    .collect()
            } else {
                Vec::new()
            };

            let mut permutation: Vec<usize> = (0..n).collect();
            permutation.sort_by(|&a, &b| {
                let ord = match leading.as_slice() {
                    [] => compare(src, comp, ty, a, b),
                    keys => keys[a]
                        .partial_cmp(&keys[b])
                        .unwrap_or(Ordering::Equal)
                        .then_with(|| compare(src, comp, ty, a, b)),
                };
                match order {
                    SortOrder::Ascending => ord,
                    SortOrder::Descending => ord.reverse(),
                }
            });
            debug!(comp, %order, records = n, numeric_strings, "sort");

            let mut out = Table::structure_of(src);
            out.allocate(n)?;
            out.copy_descriptors(src);
            for (to, &from) in permutation.iter().enumerate() {
                if let (Some(dst), Some(rec)) = (out.record_mut(to), src.record(from)) {
                    dst.copy_from_slice(rec);
                }
            }

            let index = if index_out.is_some() {
                let mut index = Table::new();
                index.add_component(INDEX_NAME, ElementType::I64)?;
                index.allocate(n)?;
                for (i, &p) in permutation.iter().enumerate() {
                    index.store_i64(i, 0, p as i64);
                }
                Some(index)
            } else {
                None
            };
            (out, index)
        };
        self.install(next);
        if let (Some(target), Some(index)) = (index_out, index) {
            target.install(index);
        }
        Ok(())
    }
}

/// Natural order of the key cells of records `a` and `b`.
fn compare(src: &Table, comp: usize, ty: ElementType, a: usize, b: usize) -> Ordering {
    match ty {
        ElementType::Numeric(NumericKind::U64) => src.fetch_u64(a, comp).cmp(&src.fetch_u64(b, comp)),
        ElementType::Numeric(NumericKind::I64) => src.fetch_i64(a, comp).cmp(&src.fetch_i64(b, comp)),
        ElementType::Numeric(_) => src
            .dfetch(a, comp)
            .partial_cmp(&src.dfetch(b, comp))
            .unwrap_or(Ordering::Equal),
        ElementType::Symbolic(_) => src
            .sbytes(a, comp)
            .unwrap_or_default()
            .cmp(src.sbytes(b, comp).unwrap_or_default()),
        ElementType::Pointer => Ordering::Equal,
    }
}
