//! Record-axis resampling.

use eyre::Result;

use crate::table::{Interpolation, Operand, Table};
use crate::table_ensure;

impl Table {
    /// Resamples `src` to `rate` times as many records. Numeric components
    /// are read at fractional positions `0, 1/rate, 2/rate, ..` with `mode`;
    /// all other components take the cell of the record the position falls
    /// into. The record increment descriptor is scaled by `1/rate`.
    pub fn resample<'a>(
        &mut self,
        src: impl Into<Operand<'a>>,
        rate: f64,
        mode: Interpolation,
    ) -> Result<()> {
        let next = {
            let src = src.into().source(self);
            src.ensure_not_empty("resample source")?;
            table_ensure!(
                rate > 0.0 && rate.is_finite(),
                BadIndex,
                "resampling rate must be positive, got {}",
                rate
            );
            if rate == 1.0 {
                let mut copy = src.clone();
                copy.mark = None;
                copy
            } else {
                resample_records(src, rate, mode)?
            }
        };
        self.install(next);
        Ok(())
    }
}

fn resample_records(src: &Table, rate: f64, mode: Interpolation) -> Result<Table> {
    let n = src.record_count();
    let step = 1.0 / rate;
    let held: Vec<usize> = (0..src.component_count())
        .filter(|&c| !src.is_numeric_component(c))
        .collect();

    let mut out = Table::structure_of(src);
    out.allocate((n as f64 * rate + 1.0) as usize)?;
    let (mut j, mut at) = (0usize, 0.0f64);
    loop {
        if j >= out.record_count() {
            out.add_records(1, n)?;
        }
        let values = src.fetch_record_interpolated(at, None, mode);
        out.store_record(j, &values, None);
        for &c in &held {
            if let (Some(from), Some(to)) = (src.cell(at as usize, c), out.cell_mut(j, c)) {
                to.copy_from_slice(from);
            }
        }
        j += 1;
        at += step;
        if at >= n as f64 {
            break;
        }
    }
    out.set_record_count(j);
    out.descr.rec_inc *= step;
    Ok(out)
}
