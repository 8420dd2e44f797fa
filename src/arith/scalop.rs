//! Cell-wise operators against a constant or an operand table, and fill.

use eyre::Result;
use rand::Rng;
use tracing::debug;

use crate::error::{ErrorKind, Outcome};
use crate::mark::Axis;
use crate::table::{Operand, Table};
use crate::types::{Complex, NumericKind};
use crate::{table_bail, table_ensure};

use super::{kernels, ScalarOp};

/// How an operand table maps onto the cells of the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Broadcast {
    Scalar,
    PerComponent,
    PerBlock,
    PerRecord,
    Elementwise,
}

impl Table {
    /// Applies `op` with `constant` to every selected cell of `comp`, or of
    /// every numeric component when `comp` is `None`.
    ///
    /// Integral and floating cells compute on doubles and are clipped to
    /// their type when stored. Complex cells, and every cell when `constant`
    /// has an imaginary part, compute on complex values.
    pub fn scalop(&mut self, constant: Complex, op: ScalarOp, comp: Option<usize>) -> Result<()> {
        let comps = self.operated_components(comp)?;
        for c in comps {
            for r in 0..self.record_count() {
                if self.selects_cell(r, c) {
                    self.apply_cell(r, c, constant, op);
                }
            }
        }
        Ok(())
    }

    /// Copies `src` into `self` and applies `op` cell-wise with values taken
    /// from `operand`. The operand shape selects the broadcast:
    ///
    /// | Operand | Value for cell `(r, c)` |
    /// |---------|-------------------------|
    /// | none | 0 |
    /// | 1 × 1 | `operand[0, 0]` |
    /// | 1 × N | `operand[0, c]` |
    /// | N × 1, source has blocks | `operand[r / records_per_block, 0]` |
    /// | N × 1 | `operand[r, 0]` |
    /// | N × M | `operand[r, c]` |
    ///
    /// An operand smaller than the source is padded with zeros, a larger one
    /// is cut. Both report `DimensionMismatch` through the returned
    /// [`Outcome`] and the operation proceeds.
    pub fn scalop_table<'a>(
        &mut self,
        src: impl Into<Operand<'a>>,
        operand: Option<&Table>,
        op: ScalarOp,
        comp: Option<usize>,
    ) -> Result<Outcome> {
        let (next, outcome) = {
            let src = src.into().source(self);
            let mut out = src.clone();
            let comps = out.operated_components(comp)?;
            let operand = operand.filter(|k| !k.is_empty());

            let (shape, outcome) = match operand {
                None => (Broadcast::Scalar, Outcome::Complete),
                Some(k) => broadcast_of(src, k),
            };
            debug!(?shape, op = op.name(), "scalar operation against table");

            for &c in &comps {
                for r in 0..out.record_count() {
                    if !out.selects_cell(r, c) {
                        continue;
                    }
                    let b = match (operand, shape) {
                        (None, _) => Complex::ZERO,
                        (Some(k), Broadcast::Scalar) => k.cfetch(0, 0),
                        (Some(k), Broadcast::PerComponent) => k.cfetch(0, c),
                        (Some(k), Broadcast::PerBlock) => k.cfetch(r / out.records_per_block(), 0),
                        (Some(k), Broadcast::PerRecord) => k.cfetch(r, 0),
                        (Some(k), Broadcast::Elementwise) => k.cfetch(r, c),
                    };
                    out.apply_cell(r, c, b, op);
                }
            }
            (out, outcome)
        };
        self.install(next);
        Ok(outcome)
    }

    /// Stores `start`, `start + delta`, `start + 2 delta`, .. into the
    /// selected numeric cells in record-major order. The value advances once
    /// per record that received at least one store.
    pub fn fill(&mut self, start: Complex, delta: Complex) -> Result<()> {
        self.ensure_not_empty("fill target")?;
        table_ensure!(
            self.mark_mode() != Some(Axis::Blocks),
            BadMarkMode,
            "fill does not support block marks"
        );
        let mut value = start;
        for r in 0..self.record_count() {
            let mut stored = false;
            for c in 0..self.component_count() {
                if self.is_numeric_component(c) && self.selects_cell(r, c) {
                    let complex = self.numeric_kind(c) == Some(NumericKind::Complex);
                    let v = self.dithered(value, complex);
                    self.cstore(r, c, v);
                    stored = true;
                }
            }
            if stored {
                value += delta;
            }
        }
        Ok(())
    }

    fn operated_components(&self, comp: Option<usize>) -> Result<Vec<usize>> {
        match comp {
            None => Ok(self
                .numeric_components(None)
                .filter(|&c| self.selects_component(c))
                .collect()),
            Some(c) => {
                self.ensure_component(c)?;
                if !self.is_numeric_component(c) {
                    table_bail!(
                        Homogeneity,
                        "component {} ('{}') is not numeric",
                        c,
                        self.component_name(c).unwrap_or_default()
                    );
                }
                Ok(if self.selects_component(c) { vec![c] } else { Vec::new() })
            }
        }
    }

    fn apply_cell(&mut self, r: usize, c: usize, b: Complex, op: ScalarOp) {
        let complex = self.numeric_kind(c) == Some(NumericKind::Complex);
        let a = self.cfetch(r, c);
        let v = if complex || !b.is_real() {
            kernels::complex(a, b, op)
        } else {
            Complex::real(kernels::real(a.re, b.re, op))
        };
        let v = self.dithered(v, complex);
        self.cstore(r, c, v);
    }

    /// Adds uniform `[0, 1)` noise when forced noise is on.
    pub(crate) fn dithered(&mut self, mut v: Complex, complex: bool) -> Complex {
        if let Some(rng) = self.noise.as_mut() {
            v.re += rng.gen::<f64>();
            if complex {
                v.im += rng.gen::<f64>();
            }
        }
        v
    }
}

fn broadcast_of(src: &Table, k: &Table) -> (Broadcast, Outcome) {
    let (n, m) = (src.record_count(), src.component_count());
    let (kn, km) = (k.record_count(), k.component_count());
    let mismatch = |what: &str, have: usize, want: usize| {
        if have == want {
            Outcome::Complete
        } else {
            Outcome::warn(
                ErrorKind::DimensionMismatch,
                format_args!("operand has {} {}, expected {}", have, what, want),
            )
        }
    };

    if kn == 1 && km == 1 {
        (Broadcast::Scalar, Outcome::Complete)
    } else if kn == 1 {
        (Broadcast::PerComponent, mismatch("components", km, m))
    } else if km == 1 && src.block_count() > 1 {
        (Broadcast::PerBlock, mismatch("records", kn, src.block_count()))
    } else if km == 1 {
        (Broadcast::PerRecord, mismatch("records", kn, n))
    } else {
        let outcome = mismatch("records", kn, n).and(mismatch("components", km, m));
        (Broadcast::Elementwise, outcome)
    }
}
