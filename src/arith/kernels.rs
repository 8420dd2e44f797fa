//! Scalar kernels.
//!
//! Two entry points compute `op(a, b)`: [`real`] on doubles and [`complex`]
//! on complex values. Integral and floating cells run through `real` and are
//! clipped when stored; complex cells, and any cell combined with a complex
//! operand, run through `complex`.
//!
//! Comparisons and the extrema on complex values use the real parts.
//! Operators without a complex meaning (`mod`, `factorial`, `over`, the
//! logical and bit operators, `sigmoid`) evaluate the real parts and return
//! a real result.

use std::f64::consts::LN_2;

use crate::types::Complex;

use super::ScalarOp;

#[inline]
fn truth(b: bool) -> f64 {
    if b {
        1.0
    } else {
        0.0
    }
}

/// `-ln(e^-a + e^-b)`, evaluated from the smaller operand.
pub(crate) fn lsadd(a: f64, b: f64) -> f64 {
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    lo - ((lo - hi).exp() + 1.0).ln()
}

fn expadd(a: f64, b: f64) -> f64 {
    let (lo, hi) = if a < b { (a, b) } else { (b, a) };
    hi + ((lo - hi).exp() + 1.0).ln()
}

/// Largest `n` whose factorial is finite in an `f64`.
const MAX_FINITE_FACTORIAL: i64 = 170;

fn factorial(a: f64) -> f64 {
    if a.is_nan() {
        return f64::NAN;
    }
    let n = a as i64;
    if n < 2 {
        return 1.0;
    }
    if n > MAX_FINITE_FACTORIAL {
        return f64::INFINITY;
    }
    (2..=n).fold(1.0, |acc, i| acc * i as f64)
}

/// Binomial coefficient. Past `MAX_FINITE_FACTORIAL` factors the product
/// is taken in log space through `ln_factorial`.
fn n_over_k(n: f64, k: f64) -> f64 {
    let (n, k) = (n as i64, k as i64);
    if k < 0 || k > n {
        return 0.0;
    }
    let k = k.min(n - k);
    if k <= MAX_FINITE_FACTORIAL {
        return (0..k).fold(1.0, |acc, i| acc * (n - i) as f64 / (i + 1) as f64).round();
    }
    (ln_factorial(n) - ln_factorial(k) - ln_factorial(n - k)).exp().round()
}

/// `ln(n!)`: exact summation up to `MAX_FINITE_FACTORIAL`, Stirling's
/// series beyond.
fn ln_factorial(n: i64) -> f64 {
    if n <= MAX_FINITE_FACTORIAL {
        return (2..=n).map(|i| (i as f64).ln()).sum();
    }
    let x = n as f64;
    x * x.ln() - x + 0.5 * (2.0 * std::f64::consts::PI * x).ln() + 1.0 / (12.0 * x)
        - 1.0 / (360.0 * x * x * x)
}

fn nan_guarded(a: f64, b: f64, f: impl FnOnce(f64, f64) -> f64) -> f64 {
    if a.is_nan() || b.is_nan() {
        f64::NAN
    } else {
        f(a, b)
    }
}

fn compared(a: f64, b: f64, f: impl FnOnce(f64, f64) -> bool) -> f64 {
    if a.is_nan() || b.is_nan() {
        0.0
    } else {
        truth(f(a, b))
    }
}

pub fn real(a: f64, b: f64, op: ScalarOp) -> f64 {
    match op {
        ScalarOp::Noop | ScalarOp::Real | ScalarOp::Conj => a,
        ScalarOp::Imag | ScalarOp::Angle => 0.0,
        ScalarOp::Neg => -a,
        ScalarOp::Sqr => a * a,
        ScalarOp::Abs => a.abs(),
        ScalarOp::Sqrt => a.sqrt(),
        ScalarOp::Sign => {
            if a < 0.0 {
                -1.0
            } else if a > 0.0 {
                1.0
            } else {
                0.0
            }
        }
        ScalarOp::Ent => a.trunc(),
        ScalarOp::Floor => a.floor(),
        ScalarOp::Ceil => a.ceil(),
        ScalarOp::Inc => a + 1.0,
        ScalarOp::Dec => a - 1.0,
        ScalarOp::Inv => 1.0 / a,
        ScalarOp::Log => a.log10(),
        ScalarOp::Log2 => a.ln() / LN_2,
        ScalarOp::Ln => a.ln(),
        ScalarOp::Exp => a.exp(),
        ScalarOp::Sin => a.sin(),
        ScalarOp::Asin => a.asin(),
        ScalarOp::Sinh => a.sinh(),
        ScalarOp::Asinh => a.asinh(),
        ScalarOp::Cos => a.cos(),
        ScalarOp::Acos => a.acos(),
        ScalarOp::Cosh => a.cosh(),
        ScalarOp::Acosh => a.acosh(),
        ScalarOp::Tan => a.tan(),
        ScalarOp::Atan => a.atan(),
        ScalarOp::Tanh => a.tanh(),
        ScalarOp::Atanh => a.atanh(),
        ScalarOp::Sinc => {
            if a == 0.0 {
                1.0
            } else {
                a.sin() / a
            }
        }
        ScalarOp::Add => a + b,
        ScalarOp::LsAdd => lsadd(a, b),
        ScalarOp::ExpAdd => expadd(a, b),
        ScalarOp::Diff => a - b,
        ScalarOp::AbsDiff => (a - b).abs(),
        ScalarOp::QDiff | ScalarOp::QAbsDiff => (a - b) * (a - b),
        ScalarOp::Mult => a * b,
        ScalarOp::Div => a / b,
        ScalarOp::Mod => match (a as i64).checked_rem(b as i64) {
            Some(r) => r as f64,
            None => f64::NAN,
        },
        ScalarOp::Set => b,
        ScalarOp::Factorial => factorial(a),
        ScalarOp::Lnl => {
            let l = a.ln();
            if l < b {
                b
            } else {
                l
            }
        }
        ScalarOp::Pow => a.powf(b),
        ScalarOp::Over => n_over_k(a, b),
        ScalarOp::Gauss => (-(a * a) / (b * b)).exp(),
        ScalarOp::Sigmoid => {
            if b == 0.0 {
                a
            } else {
                1.0 / (1.0 + (-(a / b)).exp())
            }
        }
        ScalarOp::Or => truth(a != 0.0 || b != 0.0),
        ScalarOp::BitOr => ((a as i32) | (b as i32)) as f64,
        ScalarOp::And => truth(a != 0.0 && b != 0.0),
        ScalarOp::BitAnd => ((a as i32) & (b as i32)) as f64,
        ScalarOp::Not => truth(a == 0.0),
        ScalarOp::Eq => truth(a == b),
        ScalarOp::Neq => truth(a != b),
        ScalarOp::Less => compared(a, b, |a, b| a < b),
        ScalarOp::Greater => compared(a, b, |a, b| a > b),
        ScalarOp::Leq => compared(a, b, |a, b| a <= b),
        ScalarOp::Geq => compared(a, b, |a, b| a >= b),
        ScalarOp::IsNan => truth(a.is_nan()),
        ScalarOp::Max => nan_guarded(a, b, |a, b| if a > b { a } else { b }),
        ScalarOp::AMax => nan_guarded(a, b, |a, b| a.abs().max(b.abs())),
        ScalarOp::SMax => nan_guarded(a, b, |a, b| if a.abs() > b.abs() { a } else { b }),
        ScalarOp::Min => nan_guarded(a, b, |a, b| if a < b { a } else { b }),
        ScalarOp::AMin => nan_guarded(a, b, |a, b| a.abs().min(b.abs())),
        ScalarOp::SMin => nan_guarded(a, b, |a, b| if a.abs() < b.abs() { a } else { b }),
        ScalarOp::Round => {
            if a.is_nan() {
                a
            } else {
                a.round()
            }
        }
    }
}

fn complex_lsadd(a: Complex, b: Complex) -> Complex {
    let (lo, hi) = if a.less(b) { (a, b) } else { (b, a) };
    lo - ((lo - hi).exp() + Complex::ONE).ln()
}

fn complex_expadd(a: Complex, b: Complex) -> Complex {
    let (lo, hi) = if a.less(b) { (a, b) } else { (b, a) };
    hi + ((lo - hi).exp() + Complex::ONE).ln()
}

pub fn complex(a: Complex, b: Complex, op: ScalarOp) -> Complex {
    match op {
        ScalarOp::Noop => a,
        ScalarOp::Real => Complex::real(a.re),
        ScalarOp::Imag => Complex::real(a.im),
        ScalarOp::Conj => a.conj(),
        ScalarOp::Neg => -a,
        ScalarOp::Sqr => a * a,
        ScalarOp::Abs => Complex::real(a.abs()),
        ScalarOp::Angle => Complex::real(a.arg()),
        ScalarOp::Sqrt => a.sqrt(),
        ScalarOp::Sign => {
            let m = a.abs();
            if m == 0.0 {
                Complex::ZERO
            } else {
                a.div_real(m)
            }
        }
        ScalarOp::Ent => a.trunc(),
        ScalarOp::Floor => a.floor(),
        ScalarOp::Ceil => a.ceil(),
        ScalarOp::Inc => a + Complex::ONE,
        ScalarOp::Dec => a - Complex::ONE,
        ScalarOp::Inv => a.inv(),
        ScalarOp::Log => a.log_base(10.0),
        ScalarOp::Log2 => a.log_base(2.0),
        ScalarOp::Ln => a.ln(),
        ScalarOp::Exp => a.exp(),
        ScalarOp::Sin => a.sin(),
        ScalarOp::Asin => a.asin(),
        ScalarOp::Sinh => a.sinh(),
        ScalarOp::Asinh => a.asinh(),
        ScalarOp::Cos => a.cos(),
        ScalarOp::Acos => a.acos(),
        ScalarOp::Cosh => a.cosh(),
        ScalarOp::Acosh => a.acosh(),
        ScalarOp::Tan => a.tan(),
        ScalarOp::Atan => a.atan(),
        ScalarOp::Tanh => a.tanh(),
        ScalarOp::Atanh => a.atanh(),
        ScalarOp::Sinc => {
            if a == Complex::ZERO {
                Complex::ONE
            } else {
                a.sin() / a
            }
        }
        ScalarOp::Add => a + b,
        ScalarOp::LsAdd => complex_lsadd(a, b),
        ScalarOp::ExpAdd => complex_expadd(a, b),
        ScalarOp::Diff => a - b,
        ScalarOp::AbsDiff => Complex::real((a - b).abs()),
        ScalarOp::QDiff => (a - b) * (a - b),
        ScalarOp::QAbsDiff => {
            let d = a - b;
            d * d.conj()
        }
        ScalarOp::Mult => a * b,
        ScalarOp::Div => a / b,
        ScalarOp::Set => b,
        ScalarOp::Lnl => {
            let l = a.ln();
            if l.less(b) {
                b
            } else {
                l
            }
        }
        ScalarOp::Pow => a.powc(b),
        ScalarOp::Gauss => (-((a * a) / (b * b))).exp(),
        ScalarOp::Eq => Complex::real(truth(a == b)),
        ScalarOp::Neq => Complex::real(truth(a != b)),
        ScalarOp::Less => Complex::real(compared(a.re, b.re, |a, b| a < b)),
        ScalarOp::Greater => Complex::real(compared(a.re, b.re, |a, b| a > b)),
        ScalarOp::Leq => Complex::real(compared(a.re, b.re, |a, b| a <= b)),
        ScalarOp::Geq => Complex::real(compared(a.re, b.re, |a, b| a >= b)),
        ScalarOp::IsNan => Complex::real(truth(a.is_nan())),
        ScalarOp::Max => {
            if a.greater(b) {
                a
            } else {
                b
            }
        }
        ScalarOp::AMax => Complex::real(a.abs().max(b.abs())),
        ScalarOp::SMax => {
            if a.abs() > b.abs() {
                a
            } else {
                b
            }
        }
        ScalarOp::Min => {
            if a.less(b) {
                a
            } else {
                b
            }
        }
        ScalarOp::AMin => Complex::real(a.abs().min(b.abs())),
        ScalarOp::SMin => {
            if a.abs() < b.abs() {
                a
            } else {
                b
            }
        }
        ScalarOp::Round => a.round(),
        ScalarOp::Mod
        | ScalarOp::Factorial
        | ScalarOp::Over
        | ScalarOp::Sigmoid
        | ScalarOp::Or
        | ScalarOp::BitOr
        | ScalarOp::And
        | ScalarOp::BitAnd
        | ScalarOp::Not => Complex::real(real(a.re, b.re, op)),
    }
}
