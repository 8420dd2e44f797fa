//! # Cell Access
//!
//! Single-cell reads and writes. Reads of an out-of-range cell return a zero
//! value; writes to an out-of-range cell are ignored and return `false`.
//!
//! | Method | Numeric cell | Symbolic cell | Pointer cell |
//! |--------|--------------|---------------|--------------|
//! | `cfetch` / `cstore` | value | leading number / printed number | handle as number |
//! | `dfetch` / `dstore` | real part | same as `cfetch` | same as `cfetch` |
//! | `sfetch` / `sstore` | printed / parsed | text | hex / parsed |
//! | `pfetch` / `pstore` | - | - | handle |

use crate::types::{format, Complex, ElementType};

use super::Table;

impl Table {
    /// Byte offset of cell `(rec, comp)` in the buffer, or `None` when either
    /// index is out of range.
    pub fn address_of(&self, rec: usize, comp: usize) -> Option<usize> {
        if rec >= self.nrec {
            return None;
        }
        let c = self.layout.get(comp)?;
        Some(rec * self.layout.record_len() + c.offset)
    }

    #[inline]
    pub fn cell(&self, rec: usize, comp: usize) -> Option<&[u8]> {
        let at = self.address_of(rec, comp)?;
        let size = self.layout.get(comp)?.size();
        Some(&self.buffer[at..at + size])
    }

    #[inline]
    pub fn cell_mut(&mut self, rec: usize, comp: usize) -> Option<&mut [u8]> {
        let at = self.address_of(rec, comp)?;
        let size = self.layout.get(comp)?.size();
        Some(&mut self.buffer[at..at + size])
    }

    pub fn record(&self, rec: usize) -> Option<&[u8]> {
        if rec >= self.nrec {
            return None;
        }
        let reclen = self.layout.record_len();
        Some(&self.buffer[rec * reclen..(rec + 1) * reclen])
    }

    pub fn record_mut(&mut self, rec: usize) -> Option<&mut [u8]> {
        if rec >= self.nrec {
            return None;
        }
        let reclen = self.layout.record_len();
        Some(&mut self.buffer[rec * reclen..(rec + 1) * reclen])
    }

    crate::typed_cell_accessors! { u8, i8, u16, i16, u32, i32, u64, i64, f32, f64 }

    pub fn cfetch(&self, rec: usize, comp: usize) -> Complex {
        let (Some(ty), Some(bytes)) = (self.component_type(comp), self.cell(rec, comp)) else {
            return Complex::ZERO;
        };
        match ty {
            ElementType::Numeric(kind) => kind.load(bytes),
            ElementType::Symbolic(_) => {
                Complex::real(format::parse_leading(&format::cell_str(bytes)))
            }
            ElementType::Pointer => Complex::real(u64::from_le_bytes(pointer_bytes(bytes)) as f64),
        }
    }

    pub fn cstore(&mut self, rec: usize, comp: usize, v: Complex) -> bool {
        let Some(ty) = self.component_type(comp) else {
            return false;
        };
        let Some(bytes) = self.cell_mut(rec, comp) else {
            return false;
        };
        match ty {
            ElementType::Numeric(kind) => kind.store(bytes, v),
            ElementType::Symbolic(_) => format::write_cell_str(bytes, v.to_string().as_bytes()),
            ElementType::Pointer => bytes.copy_from_slice(&(v.re as u64).to_le_bytes()),
        }
        true
    }

    #[inline]
    pub fn dfetch(&self, rec: usize, comp: usize) -> f64 {
        self.cfetch(rec, comp).re
    }

    #[inline]
    pub fn dstore(&mut self, rec: usize, comp: usize, v: f64) -> bool {
        self.cstore(rec, comp, Complex::real(v))
    }

    pub fn sfetch(&self, rec: usize, comp: usize) -> String {
        let (Some(ty), Some(bytes)) = (self.component_type(comp), self.cell(rec, comp)) else {
            return String::new();
        };
        match ty {
            ElementType::Symbolic(_) => format::cell_str(bytes).into_owned(),
            ElementType::Numeric(kind) => kind.load(bytes).to_string(),
            ElementType::Pointer => format!("{:#x}", u64::from_le_bytes(pointer_bytes(bytes))),
        }
    }

    pub fn sstore(&mut self, rec: usize, comp: usize, s: &str) -> bool {
        let Some(ty) = self.component_type(comp) else {
            return false;
        };
        let Some(bytes) = self.cell_mut(rec, comp) else {
            return false;
        };
        match ty {
            ElementType::Symbolic(_) => format::write_cell_str(bytes, s.as_bytes()),
            ElementType::Numeric(kind) => kind.store(bytes, Complex::real(format::parse_leading(s))),
            ElementType::Pointer => {
                let handle = parse_handle(s);
                bytes.copy_from_slice(&handle.to_le_bytes());
            }
        }
        true
    }

    /// Raw bytes of a symbolic cell up to the first NUL.
    pub fn sbytes(&self, rec: usize, comp: usize) -> Option<&[u8]> {
        if !self.is_symbolic_component(comp) {
            return None;
        }
        self.cell(rec, comp).map(format::cell_bytes)
    }

    pub fn pfetch(&self, rec: usize, comp: usize) -> Option<u64> {
        if self.component_type(comp)? != ElementType::Pointer {
            return None;
        }
        self.cell(rec, comp)
            .map(|b| u64::from_le_bytes(pointer_bytes(b)))
    }

    pub fn pstore(&mut self, rec: usize, comp: usize, handle: u64) -> bool {
        if self.component_type(comp) != Some(ElementType::Pointer) {
            return false;
        }
        match self.cell_mut(rec, comp) {
            Some(bytes) => {
                bytes.copy_from_slice(&handle.to_le_bytes());
                true
            }
            None => false,
        }
    }
}

fn pointer_bytes(bytes: &[u8]) -> [u8; 8] {
    let mut raw = [0u8; 8];
    raw.copy_from_slice(&bytes[..8]);
    raw
}

fn parse_handle(s: &str) -> u64 {
    let t = s.trim();
    match t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(hex, 16).unwrap_or(0),
        None => t.parse().unwrap_or(0),
    }
}
