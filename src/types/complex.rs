//! # Complex Numbers
//!
//! `Complex` is both a cell type (two little-endian doubles, 16 bytes) and the
//! common intermediate every numeric fetch goes through. Ordering compares the
//! real parts only; equality compares both parts.

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Complex {
    pub re: f64,
    pub im: f64,
}

impl Complex {
    pub const ZERO: Complex = Complex { re: 0.0, im: 0.0 };
    pub const ONE: Complex = Complex { re: 1.0, im: 0.0 };

    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    pub const fn real(re: f64) -> Self {
        Self { re, im: 0.0 }
    }

    pub fn is_real(&self) -> bool {
        self.im == 0.0
    }

    pub fn is_nan(&self) -> bool {
        self.re.is_nan() || self.im.is_nan()
    }

    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    /// Magnitude, computed without intermediate overflow.
    pub fn abs(self) -> f64 {
        self.re.hypot(self.im)
    }

    pub fn arg(self) -> f64 {
        self.im.atan2(self.re)
    }

    pub fn less(self, other: Self) -> bool {
        self.re < other.re
    }

    pub fn greater(self, other: Self) -> bool {
        self.re > other.re
    }

    pub fn scale(self, f: f64) -> Self {
        Self::new(self.re * f, self.im * f)
    }

    pub fn div_real(self, d: f64) -> Self {
        Self::new(self.re / d, self.im / d)
    }

    pub fn inv(self) -> Self {
        if self.im == 0.0 {
            return Self::real(1.0 / self.re);
        }
        if self.re.abs() >= self.im.abs() {
            let r = self.im / self.re;
            let den = self.re + r * self.im;
            Self::new(1.0 / den, -r / den)
        } else {
            let r = self.re / self.im;
            let den = self.im + r * self.re;
            Self::new(r / den, -1.0 / den)
        }
    }

    pub fn exp(self) -> Self {
        let m = self.re.exp();
        Self::new(m * self.im.cos(), m * self.im.sin())
    }

    pub fn ln(self) -> Self {
        Self::new(self.abs().ln(), self.arg())
    }

    pub fn log_base(self, base: f64) -> Self {
        self.ln().div_real(base.ln())
    }

    pub fn sqrt(self) -> Self {
        if self.re == 0.0 && self.im == 0.0 {
            return Self::ZERO;
        }
        let x = self.re.abs();
        let y = self.im.abs();
        let w = if x >= y {
            let r = y / x;
            x.sqrt() * (0.5 * (1.0 + (1.0 + r * r).sqrt())).sqrt()
        } else {
            let r = x / y;
            y.sqrt() * (0.5 * (r + (1.0 + r * r).sqrt())).sqrt()
        };
        if self.re >= 0.0 {
            Self::new(w, self.im / (2.0 * w))
        } else {
            let w = if self.im < 0.0 { -w } else { w };
            Self::new(self.im / (2.0 * w), w)
        }
    }

    /// Principal value of `self^exp`. Real bases with real exponents stay on
    /// the real axis whenever the real result exists.
    pub fn powc(self, exp: Self) -> Self {
        if self.is_real() && exp.is_real() {
            let r = self.re.powf(exp.re);
            if !r.is_nan() || self.re.is_nan() || exp.re.is_nan() {
                return Self::real(r);
            }
        }
        if self.re == 0.0 && self.im == 0.0 {
            return if exp.re == 0.0 && exp.im == 0.0 {
                Self::ONE
            } else {
                Self::ZERO
            };
        }
        (exp * self.ln()).exp()
    }

    pub fn sin(self) -> Self {
        Self::new(
            self.re.sin() * self.im.cosh(),
            self.re.cos() * self.im.sinh(),
        )
    }

    pub fn cos(self) -> Self {
        Self::new(
            self.re.cos() * self.im.cosh(),
            -self.re.sin() * self.im.sinh(),
        )
    }

    pub fn tan(self) -> Self {
        self.sin() / self.cos()
    }

    pub fn sinh(self) -> Self {
        Self::new(
            self.re.sinh() * self.im.cos(),
            self.re.cosh() * self.im.sin(),
        )
    }

    pub fn cosh(self) -> Self {
        Self::new(
            self.re.cosh() * self.im.cos(),
            self.re.sinh() * self.im.sin(),
        )
    }

    pub fn tanh(self) -> Self {
        self.sinh() / self.cosh()
    }

    const I: Complex = Complex { re: 0.0, im: 1.0 };

    /// asin(z) = -i ln(iz + sqrt(1 - z²))
    pub fn asin(self) -> Self {
        let root = (Self::ONE - self * self).sqrt();
        let w = (Self::I * self + root).ln();
        Self::new(w.im, -w.re)
    }

    /// acos(z) = -i ln(z + i sqrt(1 - z²))
    pub fn acos(self) -> Self {
        let root = (Self::ONE - self * self).sqrt();
        let w = (self + Self::I * root).ln();
        Self::new(w.im, -w.re)
    }

    /// atan(z) = i/2 (ln(1 - iz) - ln(1 + iz))
    pub fn atan(self) -> Self {
        let iz = Self::I * self;
        let d = (Self::ONE - iz).ln() - (Self::ONE + iz).ln();
        Self::new(-d.im / 2.0, d.re / 2.0)
    }

    pub fn asinh(self) -> Self {
        (self + (self * self + Self::ONE).sqrt()).ln()
    }

    pub fn acosh(self) -> Self {
        (self + (self + Self::ONE).sqrt() * (self - Self::ONE).sqrt()).ln()
    }

    pub fn atanh(self) -> Self {
        ((Self::ONE + self).ln() - (Self::ONE - self).ln()).scale(0.5)
    }

    pub fn round(self) -> Self {
        let r = |v: f64| if v.is_nan() { v } else { v.round() };
        Self::new(r(self.re), r(self.im))
    }

    pub fn floor(self) -> Self {
        Self::new(self.re.floor(), self.im.floor())
    }

    pub fn ceil(self) -> Self {
        Self::new(self.re.ceil(), self.im.ceil())
    }

    pub fn trunc(self) -> Self {
        Self::new(self.re.trunc(), self.im.trunc())
    }

    pub fn to_le_bytes(self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[..8].copy_from_slice(&self.re.to_le_bytes());
        out[8..].copy_from_slice(&self.im.to_le_bytes());
        out
    }

    pub fn from_le_slice(bytes: &[u8]) -> Self {
        let mut re = [0u8; 8];
        let mut im = [0u8; 8];
        re.copy_from_slice(&bytes[..8]);
        im.copy_from_slice(&bytes[8..16]);
        Self::new(f64::from_le_bytes(re), f64::from_le_bytes(im))
    }
}

impl From<f64> for Complex {
    fn from(re: f64) -> Self {
        Self::real(re)
    }
}

impl Add for Complex {
    type Output = Complex;
    fn add(self, rhs: Complex) -> Complex {
        Complex::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl AddAssign for Complex {
    fn add_assign(&mut self, rhs: Complex) {
        self.re += rhs.re;
        self.im += rhs.im;
    }
}

impl Sub for Complex {
    type Output = Complex;
    fn sub(self, rhs: Complex) -> Complex {
        Complex::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Complex {
    type Output = Complex;
    fn mul(self, rhs: Complex) -> Complex {
        Complex::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Div for Complex {
    type Output = Complex;
    fn div(self, rhs: Complex) -> Complex {
        if rhs.im == 0.0 {
            return self.div_real(rhs.re);
        }
        if rhs.re.abs() >= rhs.im.abs() {
            let r = rhs.im / rhs.re;
            let den = rhs.re + r * rhs.im;
            Complex::new(
                (self.re + r * self.im) / den,
                (self.im - r * self.re) / den,
            )
        } else {
            let r = rhs.re / rhs.im;
            let den = rhs.im + r * rhs.re;
            Complex::new(
                (self.re * r + self.im) / den,
                (self.im * r - self.re) / den,
            )
        }
    }
}

impl Neg for Complex {
    type Output = Complex;
    fn neg(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}

impl std::fmt::Display for Complex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.im == 0.0 {
            write!(f, "{}", super::format::number_text(self.re))
        } else {
            write!(
                f,
                "{}{}{}i",
                super::format::number_text(self.re),
                if self.im < 0.0 { "-" } else { "+" },
                super::format::number_text(self.im.abs())
            )
        }
    }
}
