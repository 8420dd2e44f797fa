//! Lossy packing of numeric tables into 16-bit cells.
//!
//! A quantized table keeps two header records in front of the data:
//!
//! ```text
//! record 0     midpoint per component   (max + min) / 2
//! record 1     scale per component      32767 / max |x - midpoint|
//! record 2..   packed values            (x - midpoint) * scale
//! ```
//!
//! Every cell is a `short`, so midpoint and scale are truncated to integers.

use eyre::Result;
use tracing::debug;

use crate::mark::Axis;
use crate::table::{Operand, Table};
use crate::table_ensure;
use crate::types::{Complex, ElementType};

use super::{AggregateOp, ScalarOp};

/// Records ahead of the packed values.
const HEADER_RECORDS: usize = 2;

impl Table {
    /// Packs `src` into a `short` table with a midpoint and a scale record
    /// per component. All components must be real numeric.
    ///
    /// Scales are at least 1, so a component spanning more than the `short`
    /// range saturates instead of collapsing to zero.
    pub fn quantize<'a>(&mut self, src: impl Into<Operand<'a>>) -> Result<()> {
        let next = {
            let src = src.into().source(self);
            src.ensure_not_empty("quantize source")?;
            ensure_real_components(src)?;

            let mut values = Table::new();
            values.tconvert(src, ElementType::F64)?;
            values.set_block_count(1);

            let mut mid = Table::new();
            let mut low = Table::new();
            mid.aggregate(&values, None, Complex::ZERO, AggregateOp::Max, Axis::Records)?;
            low.aggregate(&values, None, Complex::ZERO, AggregateOp::Min, Axis::Records)?;
            let _ = mid.scalop_table(Operand::This, Some(&low), ScalarOp::Add, None)?;
            mid.scalop(Complex::real(0.5), ScalarOp::Mult, None)?;
            mid.tconvert(Operand::This, ElementType::I16)?;
            mid.tconvert(Operand::This, ElementType::F64)?;
            let _ = values.scalop_table(Operand::This, Some(&mid), ScalarOp::Diff, None)?;

            let mut scale = values.clone();
            scale.scalop(Complex::ZERO, ScalarOp::Abs, None)?;
            scale.aggregate(Operand::This, None, Complex::ZERO, AggregateOp::Max, Axis::Records)?;
            scale.scalop(Complex::real(-1.0), ScalarOp::Pow, None)?;
            scale.scalop(Complex::real(f64::from(i16::MAX)), ScalarOp::Mult, None)?;
            scale.tconvert(Operand::This, ElementType::I16)?;
            scale.tconvert(Operand::This, ElementType::F64)?;
            scale.scalop(Complex::ONE, ScalarOp::Max, None)?;
            let _ = values.scalop_table(Operand::This, Some(&scale), ScalarOp::Mult, None)?;

            let _ = mid.cat(&scale)?;
            let _ = mid.cat(&values)?;
            mid.tconvert(Operand::This, ElementType::I16)?;
            mid.copy_descriptors(src);
            mid.set_block_count(1);
            mid.descr.realization_text = "compressed".to_owned();
            debug!(records = src.record_count(), components = src.component_count(), "quantize");
            mid
        };
        self.install(next);
        Ok(())
    }

    /// Restores a table packed by [`quantize`](Self::quantize) as `double`
    /// values: the header records are dropped and each value becomes
    /// `x / scale + midpoint`.
    pub fn dequantize<'a>(&mut self, src: impl Into<Operand<'a>>) -> Result<()> {
        let next = {
            let src = src.into().source(self);
            src.ensure_not_empty("dequantize source")?;
            ensure_real_components(src)?;
            table_ensure!(
                src.record_count() >= HEADER_RECORDS,
                DimensionMismatch,
                "quantized table holds {} records, needs {} header records",
                src.record_count(),
                HEADER_RECORDS
            );

            let mut mid = Table::new();
            let mut scale = Table::new();
            mid.select(src, Axis::Records, 0, Some(1))?;
            scale.select(src, Axis::Records, 1, Some(1))?;
            mid.tconvert(Operand::This, ElementType::F64)?;
            scale.tconvert(Operand::This, ElementType::F64)?;

            let mut out = Table::new();
            out.delete(src, Axis::Records, 0, Some(HEADER_RECORDS))?;
            out.tconvert(Operand::This, ElementType::F64)?;
            let _ = out.scalop_table(Operand::This, Some(&scale), ScalarOp::Div, None)?;
            let _ = out.scalop_table(Operand::This, Some(&mid), ScalarOp::Add, None)?;
            out.descr.realization_text = "uncompressed".to_owned();
            out
        };
        self.install(next);
        Ok(())
    }
}

fn ensure_real_components(t: &Table) -> Result<()> {
    for c in 0..t.component_count() {
        table_ensure!(
            t.component_type(c).is_some_and(|ty| ty.is_numeric() && !ty.is_complex()),
            Homogeneity,
            "component {} ('{}') is not real numeric",
            c,
            t.component_name(c).unwrap_or_default()
        );
    }
    Ok(())
}
