//! Aggregation along components, records or blocks.

use eyre::Result;
use tracing::debug;

use crate::mark::Axis;
use crate::table::{Operand, Table};
use crate::types::{Complex, ElementType};
use crate::{table_bail, table_ensure};

use super::reduce::reduce;
use super::AggregateOp;

const AGGREGATE_NAME: &str = "aggr";

impl Table {
    /// Reduces the numeric cells of `src` with `op`.
    ///
    /// | Axis | Window | Result |
    /// |------|--------|--------|
    /// | components | numeric cells of one record | one `aggr` column per record, then the symbolic columns |
    /// | records | records of one block, per component | one record per block |
    /// | blocks | one intra-block offset across blocks, per component | one record per offset |
    ///
    /// Numeric result columns are `double`, or `complex` when a source
    /// component is complex or `param` has an imaginary part. Symbolic
    /// columns keep their type; in component mode a single label column is
    /// carried through.
    ///
    /// `mask` supplies one weight per window element: its first numeric
    /// column, or its only record when it has one record. A mask shorter than
    /// the window is a `DimensionMismatch`.
    pub fn aggregate<'a>(
        &mut self,
        src: impl Into<Operand<'a>>,
        mask: Option<&Table>,
        param: Complex,
        op: AggregateOp,
        axis: Axis,
    ) -> Result<()> {
        let next = {
            let src = src.into().source(self);
            src.ensure_not_empty("aggregate source")?;
            let complex = !param.is_real()
                || (0..src.component_count())
                    .any(|c| src.component_type(c).is_some_and(|t| t.is_complex()));

            let window = match axis {
                Axis::Components => src.numeric_components(None).count(),
                Axis::Records => src.records_per_block(),
                Axis::Blocks => src.block_count(),
                Axis::Cells => table_bail!(NoSupport, "cannot aggregate over cells"),
            };
            let weights = mask.map(|m| mask_weights(m, window)).transpose()?;
            debug!(op = op.name(), %axis, window, complex, "aggregate");

            let reduce_window = |values: &[Complex]| -> Complex {
                let w = weights.as_deref();
                if complex {
                    reduce(values, w, param, op)
                } else {
                    let re: Vec<f64> = values.iter().map(|v| v.re).collect();
                    Complex::real(reduce(&re, w, param.re, op))
                }
            };
            let result_type = if complex { ElementType::COMPLEX } else { ElementType::F64 };

            let mut out = Table::new();
            if axis == Axis::Components {
                out.add_component(AGGREGATE_NAME, result_type)?;
                let mut labels = 0;
                for c in 0..src.component_count() {
                    if let Some(ty @ ElementType::Symbolic(_)) = src.component_type(c) {
                        out.add_component(src.component_name(c).unwrap_or_default(), ty)?;
                        labels += 1;
                    }
                }
                out.allocate(src.record_count())?;
                out.copy_descriptors(src);
                for r in 0..src.record_count() {
                    let v = reduce_window(&src.fetch_record(r, None));
                    out.cstore(r, 0, v);
                }
                if labels == 1 {
                    let _ = out.copy_labels(src)?;
                }
            } else {
                for c in 0..src.component_count() {
                    let ty = match src.component_type(c) {
                        Some(ty) if ty.is_numeric() => result_type,
                        Some(ty) => ty,
                        None => continue,
                    };
                    out.add_component(src.component_name(c).unwrap_or_default(), ty)?;
                }
                let rpb = src.records_per_block();
                let nout = if axis == Axis::Records { src.block_count() } else { rpb };
                out.allocate(nout)?;
                out.copy_descriptors(src);
                out.set_block_count(1);
                for c in src.numeric_components(None) {
                    let column = src.fetch_component(c);
                    for i in 0..nout {
                        let v = if axis == Axis::Records {
                            reduce_window(&column[i * rpb..(i + 1) * rpb])
                        } else {
                            reduce_window(&src.fetch_across_blocks(i, c))
                        };
                        out.cstore(i, c, v);
                    }
                }
            }
            out
        };
        self.install(next);
        Ok(())
    }
}

fn mask_weights(mask: &Table, window: usize) -> Result<Vec<f64>> {
    mask.ensure_not_empty("aggregation mask")?;
    let weights: Vec<f64> = if mask.record_count() == 1 {
        mask.fetch_record(0, None).iter().map(|v| v.re).collect()
    } else {
        let Some(c) = mask.numeric_components(None).next() else {
            table_bail!(BadComponent, "aggregation mask has no numeric component");
        };
        mask.fetch_component(c).iter().map(|v| v.re).collect()
    };
    table_ensure!(
        weights.len() >= window,
        DimensionMismatch,
        "mask holds {} weights, window needs {}",
        weights.len(),
        window
    );
    Ok(weights)
}
