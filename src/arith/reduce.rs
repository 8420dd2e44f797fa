//! Window reduction shared by real and complex aggregation.

use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Sub};

use crate::types::Complex;

use super::kernels;
use super::AggregateOp;

/// Value type a window can be reduced over. Ordering uses [`Sample::key`],
/// the real part for complex values.
pub(crate) trait Sample:
    Copy + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Div<Output = Self>
{
    fn from_f64(x: f64) -> Self;
    fn key(self) -> f64;
    fn magnitude(self) -> f64;
    fn ln(self) -> Self;
    fn exp(self) -> Self;
    fn pow(self, p: Self) -> Self;
    fn sqrt(self) -> Self;
    fn lsadd(self, other: Self) -> Self;
}

impl Sample for f64 {
    fn from_f64(x: f64) -> Self {
        x
    }

    fn key(self) -> f64 {
        self
    }

    fn magnitude(self) -> f64 {
        self.abs()
    }

    fn ln(self) -> Self {
        f64::ln(self)
    }

    fn exp(self) -> Self {
        f64::exp(self)
    }

    fn pow(self, p: Self) -> Self {
        self.powf(p)
    }

    fn sqrt(self) -> Self {
        f64::sqrt(self)
    }

    fn lsadd(self, other: Self) -> Self {
        kernels::lsadd(self, other)
    }
}

impl Sample for Complex {
    fn from_f64(x: f64) -> Self {
        Complex::real(x)
    }

    fn key(self) -> f64 {
        self.re
    }

    fn magnitude(self) -> f64 {
        self.abs()
    }

    fn ln(self) -> Self {
        Complex::ln(self)
    }

    fn exp(self) -> Self {
        Complex::exp(self)
    }

    fn pow(self, p: Self) -> Self {
        self.powc(p)
    }

    fn sqrt(self) -> Self {
        Complex::sqrt(self)
    }

    fn lsadd(self, other: Self) -> Self {
        kernels::complex(self, other, super::ScalarOp::LsAdd)
    }
}

/// Mask entries at or above this value exclude an element from log-semiring
/// sums.
const LS_EXCLUDED: f64 = f32::MAX as f64;

/// Reduces `values` with `op`.
///
/// `weights`, when given, scale every value before the reduction. The
/// log-semiring sums instead add the weight and skip elements whose weight
/// is at least `f32::MAX`. `param` is the order of moments and norms and the
/// position for `rank`.
pub(crate) fn reduce<T: Sample>(values: &[T], weights: Option<&[f64]>, param: T, op: AggregateOp) -> T {
    let zero = T::from_f64(0.0);
    if values.is_empty() {
        return zero;
    }
    if matches!(op, AggregateOp::LsSum | AggregateOp::LsMean) {
        let mut acc = T::from_f64(LS_EXCLUDED);
        for (i, &x) in values.iter().enumerate() {
            let w = weights.map_or(0.0, |w| w.get(i).copied().unwrap_or(0.0));
            if w < LS_EXCLUDED {
                acc = acc.lsadd(x + T::from_f64(w));
            }
        }
        if op == AggregateOp::LsMean {
            acc = acc + T::from_f64((values.len() as f64).ln());
        }
        return acc;
    }

    let weighted: Vec<T>;
    let xs: &[T] = match weights {
        Some(w) => {
            weighted = values
                .iter()
                .enumerate()
                .map(|(i, &x)| x * T::from_f64(w.get(i).copied().unwrap_or(0.0)))
                .collect();
            &weighted
        }
        None => values,
    };

    let n = xs.len() as f64;
    let mean = || total(xs.iter().copied()) / T::from_f64(n);

    match op {
        AggregateOp::Sum => total(xs.iter().copied()),
        AggregateOp::Prod => xs[1..].iter().fold(xs[0], |a, &x| a * x),
        AggregateOp::Max => extreme(xs, Ordering::Greater).1,
        AggregateOp::Min => extreme(xs, Ordering::Less).1,
        AggregateOp::IMax => T::from_f64(extreme(xs, Ordering::Greater).0 as f64),
        AggregateOp::IMin => T::from_f64(extreme(xs, Ordering::Less).0 as f64),
        AggregateOp::Span => extreme(xs, Ordering::Greater).1 - extreme(xs, Ordering::Less).1,
        AggregateOp::Mean => mean(),
        AggregateOp::AMean => T::from_f64(xs.iter().map(|x| x.magnitude()).sum::<f64>() / n),
        AggregateOp::QMean => total(xs.iter().map(|&x| x * x)) / T::from_f64(n),
        AggregateOp::Moment => total(xs.iter().map(|&x| x.pow(param))) / T::from_f64(n),
        AggregateOp::CMoment => {
            let m = mean();
            total(xs.iter().map(|&x| (x - m).pow(param))) / T::from_f64(n)
        }
        AggregateOp::GMean => (total(xs.iter().map(|&x| x.ln())) / T::from_f64(n)).exp(),
        AggregateOp::HMean => {
            T::from_f64(n) / total(xs.iter().map(|&x| T::from_f64(1.0) / x))
        }
        AggregateOp::Rank => ranked(xs, param.key()),
        AggregateOp::Median => ranked(xs, n * 0.5),
        AggregateOp::Quantile => ranked(xs, n * param.key()),
        AggregateOp::Quartile => ranked(xs, n * 0.25),
        AggregateOp::Var | AggregateOp::Sdev => {
            let a = total(xs.iter().copied());
            let g = total(xs.iter().map(|&x| x * x));
            let b = a / T::from_f64(n - 1.0);
            let var = g / T::from_f64(n - 1.0) - (a / T::from_f64(n)) * b;
            if op == AggregateOp::Var {
                var
            } else {
                var.sqrt()
            }
        }
        AggregateOp::Skew => {
            let (m2, m3, _) = central_moments(xs, mean());
            m3 / m2.pow(T::from_f64(1.5))
        }
        AggregateOp::Exc => {
            let (m2, _, m4) = central_moments(xs, mean());
            m4 / (m2 * m2) - T::from_f64(3.0)
        }
        AggregateOp::Mink | AggregateOp::MinkPow => {
            let a = total(xs.iter().map(|&x| x.pow(param)));
            if op == AggregateOp::MinkPow {
                a
            } else {
                a.pow(T::from_f64(1.0) / param)
            }
        }
        AggregateOp::Diff => xs[0] - xs[xs.len() - 1],
        AggregateOp::LsSum | AggregateOp::LsMean => zero,
    }
}

fn total<T: Sample>(it: impl Iterator<Item = T>) -> T {
    it.fold(T::from_f64(0.0), |a, x| a + x)
}

/// Position and value of the first maximum (`Greater`) or minimum (`Less`).
fn extreme<T: Sample>(xs: &[T], want: Ordering) -> (usize, T) {
    let mut best = (0, xs[0]);
    for (i, &x) in xs.iter().enumerate().skip(1) {
        if x.key().partial_cmp(&best.1.key()) == Some(want) {
            best = (i, x);
        }
    }
    best
}

/// Value at position `at` of the ascending order, clamped to the window.
fn ranked<T: Sample>(xs: &[T], at: f64) -> T {
    let mut sorted = xs.to_vec();
    sorted.sort_by(|a, b| a.key().total_cmp(&b.key()));
    let r = if at > 0.0 { at as usize } else { 0 };
    sorted[r.min(sorted.len() - 1)]
}

/// Second, third and fourth central moments around `m`.
fn central_moments<T: Sample>(xs: &[T], m: T) -> (T, T, T) {
    let n = T::from_f64(xs.len() as f64);
    let zero = T::from_f64(0.0);
    let (mut m2, mut m3, mut m4) = (zero, zero, zero);
    for &x in xs {
        let d = x - m;
        let d2 = d * d;
        m2 = m2 + d2;
        m3 = m3 + d2 * d;
        m4 = m4 + d2 * d2;
    }
    (m2 / n, m3 / n, m4 / n)
}
