//! # Bulk Transfer and Interpolation
//!
//! Vector-wise access used by importers and by the arithmetic engine. Record
//! and block transfers only touch numeric components; the optional `ignore`
//! component (typically a label column) is skipped as well.
//!
//! Block vectors are laid out component-major: all records of the block for
//! the first numeric component, then the second, and so on.

use crate::types::Complex;

use super::Table;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    Nearest,
    #[default]
    Linear,
}

impl Table {
    pub(crate) fn numeric_components(&self, ignore: Option<usize>) -> impl Iterator<Item = usize> + '_ {
        (0..self.component_count())
            .filter(move |&c| Some(c) != ignore && self.is_numeric_component(c))
    }

    /// Numeric values of one record, skipping `ignore`.
    pub fn fetch_record(&self, rec: usize, ignore: Option<usize>) -> Vec<Complex> {
        if rec >= self.nrec {
            return Vec::new();
        }
        self.numeric_components(ignore)
            .map(|c| self.cfetch(rec, c))
            .collect()
    }

    /// Stores `values` into the numeric components of one record, skipping
    /// `ignore`. Returns the number of values stored.
    pub fn store_record(&mut self, rec: usize, values: &[Complex], ignore: Option<usize>) -> usize {
        if rec >= self.nrec {
            return 0;
        }
        let comps: Vec<usize> = self.numeric_components(ignore).collect();
        let mut stored = 0;
        for (c, v) in comps.into_iter().zip(values) {
            self.cstore(rec, c, *v);
            stored += 1;
        }
        stored
    }

    /// All valid values of one component.
    pub fn fetch_component(&self, comp: usize) -> Vec<Complex> {
        if comp >= self.component_count() {
            return Vec::new();
        }
        (0..self.nrec).map(|r| self.cfetch(r, comp)).collect()
    }

    pub fn store_component(&mut self, comp: usize, values: &[Complex]) -> usize {
        if comp >= self.component_count() {
            return 0;
        }
        let n = values.len().min(self.nrec);
        for (r, v) in values[..n].iter().enumerate() {
            self.cstore(r, comp, *v);
        }
        n
    }

    pub fn fetch_block(&self, block: usize, ignore: Option<usize>) -> Vec<Complex> {
        let rpb = self.records_per_block();
        if block >= self.block_count() || rpb == 0 {
            return Vec::new();
        }
        let first = block * rpb;
        let mut out = Vec::new();
        for c in self.numeric_components(ignore) {
            out.extend((first..first + rpb).map(|r| self.cfetch(r, c)));
        }
        out
    }

    pub fn store_block(&mut self, block: usize, values: &[Complex], ignore: Option<usize>) -> usize {
        let rpb = self.records_per_block();
        if block >= self.block_count() || rpb == 0 {
            return 0;
        }
        let first = block * rpb;
        let comps: Vec<usize> = self.numeric_components(ignore).collect();
        let mut stored = 0;
        for (i, v) in values.iter().enumerate() {
            let Some(&c) = comps.get(i / rpb) else {
                break;
            };
            self.cstore(first + i % rpb, c, *v);
            stored += 1;
        }
        stored
    }

    /// Value of cell `(rec_in_block, comp)` in every block.
    pub fn fetch_across_blocks(&self, rec_in_block: usize, comp: usize) -> Vec<Complex> {
        let rpb = self.records_per_block();
        if rec_in_block >= rpb {
            return Vec::new();
        }
        (0..self.block_count())
            .map(|b| self.cfetch(b * rpb + rec_in_block, comp))
            .collect()
    }

    /// Value of a numeric component at a fractional record index.
    ///
    /// An index in `[nrec - 1, nrec)` holds the last record's value. An index
    /// of `nrec` or more reads 0, as do negative or NaN indices and
    /// non-numeric components.
    pub fn fetch_interpolated(&self, rec: f64, comp: usize, mode: Interpolation) -> Complex {
        if !self.is_numeric_component(comp) || self.nrec == 0 {
            return Complex::ZERO;
        }
        if rec.is_nan() || rec < 0.0 || rec >= self.nrec as f64 {
            return Complex::ZERO;
        }
        let lower = rec.floor() as usize;
        let frac = rec - lower as f64;
        let here = self.cfetch(lower, comp);
        if frac == 0.0 {
            return here;
        }
        let next = if lower + 1 < self.nrec {
            self.cfetch(lower + 1, comp)
        } else {
            here
        };
        match mode {
            Interpolation::Nearest => {
                if frac < 0.5 {
                    here
                } else {
                    next
                }
            }
            Interpolation::Linear => here + (next - here).scale(frac),
        }
    }

    pub fn fetch_record_interpolated(
        &self,
        rec: f64,
        ignore: Option<usize>,
        mode: Interpolation,
    ) -> Vec<Complex> {
        self.numeric_components(ignore)
            .map(|c| self.fetch_interpolated(rec, c, mode))
            .collect()
    }
}
