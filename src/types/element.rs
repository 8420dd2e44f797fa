//! # Element Types
//!
//! Every component of a table is declared with an [`ElementType`]. The type
//! code space is shared between fixed-width symbolic fields and a closed set
//! of numeric kinds:
//!
//! | Variant | Code | Size |
//! |---------|------|------|
//! | `Symbolic(n)` | `n` (1..=255) | `n` bytes, NUL padded |
//! | `Numeric(kind)` | see [`NumericKind::code`] | 1..=16 bytes |
//! | `Pointer` | 6000 | 8 bytes, opaque handle |
//!
//! ## Storage Rules
//!
//! - All numeric cells are little-endian.
//! - Storing into an integer cell saturates at the type bounds and truncates
//!   toward zero; NaN stores as 0.
//! - Storing into a bool cell stores 1 for any nonzero value.
//! - Complex cells hold two doubles, real part first.

use std::fmt;
use std::str::FromStr;

use eyre::Result;

use crate::config::{
    CODE_BOOL, CODE_COMPLEX, CODE_F32, CODE_F64, CODE_I16, CODE_I32, CODE_I64, CODE_I8,
    CODE_POINTER, CODE_U16, CODE_U32, CODE_U64, CODE_U8, MAX_SYMBOLIC_WIDTH,
};
use crate::table_bail;

use super::Complex;

/// A numeric cell type that can be read from and written to little-endian
/// bytes, converting through [`Complex`].
pub trait Element: Copy {
    const KIND: NumericKind;

    fn load(bytes: &[u8]) -> Self;
    fn save(self, bytes: &mut [u8]);
    fn to_complex(self) -> Complex;
    fn from_complex(v: Complex) -> Self;
}

crate::numeric_element! {
    u8 => U8,
    i8 => I8,
    u16 => U16,
    i16 => I16,
    u32 => U32,
    i32 => I32,
    u64 => U64,
    i64 => I64,
    f32 => F32,
    f64 => F64,
}

impl Element for bool {
    const KIND: NumericKind = NumericKind::Bool;

    fn load(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }

    fn save(self, bytes: &mut [u8]) {
        bytes[0] = self as u8;
    }

    fn to_complex(self) -> Complex {
        Complex::real(if self { 1.0 } else { 0.0 })
    }

    fn from_complex(v: Complex) -> Self {
        v.re != 0.0 && !v.re.is_nan()
    }
}

impl Element for Complex {
    const KIND: NumericKind = NumericKind::Complex;

    fn load(bytes: &[u8]) -> Self {
        Complex::from_le_slice(bytes)
    }

    fn save(self, bytes: &mut [u8]) {
        bytes[..16].copy_from_slice(&self.to_le_bytes());
    }

    fn to_complex(self) -> Complex {
        self
    }

    fn from_complex(v: Complex) -> Self {
        v
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NumericKind {
    Bool = 0,
    U8 = 1,
    I8 = 2,
    U16 = 3,
    I16 = 4,
    U32 = 5,
    I32 = 6,
    U64 = 7,
    I64 = 8,
    F32 = 9,
    F64 = 10,
    Complex = 11,
}

impl NumericKind {
    pub const ALL: [NumericKind; 12] = [
        NumericKind::Bool,
        NumericKind::U8,
        NumericKind::I8,
        NumericKind::U16,
        NumericKind::I16,
        NumericKind::U32,
        NumericKind::I32,
        NumericKind::U64,
        NumericKind::I64,
        NumericKind::F32,
        NumericKind::F64,
        NumericKind::Complex,
    ];

    pub fn code(&self) -> u16 {
        match self {
            NumericKind::Bool => CODE_BOOL,
            NumericKind::U8 => CODE_U8,
            NumericKind::I8 => CODE_I8,
            NumericKind::U16 => CODE_U16,
            NumericKind::I16 => CODE_I16,
            NumericKind::U32 => CODE_U32,
            NumericKind::I32 => CODE_I32,
            NumericKind::U64 => CODE_U64,
            NumericKind::I64 => CODE_I64,
            NumericKind::F32 => CODE_F32,
            NumericKind::F64 => CODE_F64,
            NumericKind::Complex => CODE_COMPLEX,
        }
    }

    pub fn size(&self) -> usize {
        match self {
            NumericKind::Bool | NumericKind::U8 | NumericKind::I8 => 1,
            NumericKind::U16 | NumericKind::I16 => 2,
            NumericKind::U32 | NumericKind::I32 | NumericKind::F32 => 4,
            NumericKind::U64 | NumericKind::I64 | NumericKind::F64 => 8,
            NumericKind::Complex => 16,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            NumericKind::Bool => "bool",
            NumericKind::U8 => "unsigned char",
            NumericKind::I8 => "char",
            NumericKind::U16 => "unsigned short",
            NumericKind::I16 => "short",
            NumericKind::U32 => "unsigned int",
            NumericKind::I32 => "int",
            NumericKind::U64 => "unsigned long",
            NumericKind::I64 => "long",
            NumericKind::F32 => "float",
            NumericKind::F64 => "double",
            NumericKind::Complex => "complex",
        }
    }

    pub fn print_width(&self) -> usize {
        match self {
            NumericKind::Bool => 1,
            NumericKind::U8 => 3,
            NumericKind::I8 => 4,
            NumericKind::U16 => 5,
            NumericKind::I16 => 6,
            NumericKind::U32 => 10,
            NumericKind::I32 => 11,
            NumericKind::U64 | NumericKind::I64 => 20,
            NumericKind::F32 => 12,
            NumericKind::F64 => 16,
            NumericKind::Complex => 30,
        }
    }

    pub fn is_integral(&self) -> bool {
        !matches!(
            self,
            NumericKind::F32 | NumericKind::F64 | NumericKind::Complex
        )
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, NumericKind::Complex)
    }

    /// Reads one cell as a complex value.
    #[inline]
    pub fn load(&self, bytes: &[u8]) -> Complex {
        crate::with_element!(*self, T => <T as Element>::load(bytes).to_complex())
    }

    /// Writes one cell, clipping to the range of the kind. Only complex cells
    /// keep the imaginary part.
    #[inline]
    pub fn store(&self, bytes: &mut [u8], v: Complex) {
        crate::with_element!(*self, T => <T as Element>::from_complex(v).save(bytes))
    }
}

impl fmt::Display for NumericKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    /// Fixed-width string field; the width includes the NUL terminator.
    Symbolic(u8),
    Numeric(NumericKind),
    /// Opaque 64-bit handle, neither numeric nor symbolic.
    Pointer,
}

impl ElementType {
    pub const BOOL: ElementType = ElementType::Numeric(NumericKind::Bool);
    pub const U8: ElementType = ElementType::Numeric(NumericKind::U8);
    pub const I8: ElementType = ElementType::Numeric(NumericKind::I8);
    pub const U16: ElementType = ElementType::Numeric(NumericKind::U16);
    pub const I16: ElementType = ElementType::Numeric(NumericKind::I16);
    pub const U32: ElementType = ElementType::Numeric(NumericKind::U32);
    pub const I32: ElementType = ElementType::Numeric(NumericKind::I32);
    pub const U64: ElementType = ElementType::Numeric(NumericKind::U64);
    pub const I64: ElementType = ElementType::Numeric(NumericKind::I64);
    pub const F32: ElementType = ElementType::Numeric(NumericKind::F32);
    pub const F64: ElementType = ElementType::Numeric(NumericKind::F64);
    pub const COMPLEX: ElementType = ElementType::Numeric(NumericKind::Complex);

    pub fn symbolic(width: usize) -> Result<Self> {
        if width == 0 || width > MAX_SYMBOLIC_WIDTH {
            table_bail!(
                NoSupport,
                "symbolic width {} outside 1..={}",
                width,
                MAX_SYMBOLIC_WIDTH
            );
        }
        Ok(ElementType::Symbolic(width as u8))
    }

    pub fn from_code(code: u16) -> Result<Self> {
        let ty = match code {
            1..=255 => ElementType::Symbolic(code as u8),
            CODE_BOOL => ElementType::BOOL,
            CODE_U8 => ElementType::U8,
            CODE_I8 => ElementType::I8,
            CODE_U16 => ElementType::U16,
            CODE_I16 => ElementType::I16,
            CODE_U32 => ElementType::U32,
            CODE_I32 => ElementType::I32,
            CODE_U64 => ElementType::U64,
            CODE_I64 => ElementType::I64,
            CODE_F32 => ElementType::F32,
            CODE_F64 => ElementType::F64,
            CODE_COMPLEX => ElementType::COMPLEX,
            CODE_POINTER => ElementType::Pointer,
            _ => table_bail!(NoSupport, "unknown type code {}", code),
        };
        Ok(ty)
    }

    pub fn code(&self) -> u16 {
        match self {
            ElementType::Symbolic(w) => *w as u16,
            ElementType::Numeric(kind) => kind.code(),
            ElementType::Pointer => CODE_POINTER,
        }
    }

    pub fn size(&self) -> usize {
        match self {
            ElementType::Symbolic(w) => *w as usize,
            ElementType::Numeric(kind) => kind.size(),
            ElementType::Pointer => 8,
        }
    }

    pub fn print_width(&self) -> usize {
        match self {
            ElementType::Symbolic(w) => *w as usize,
            ElementType::Numeric(kind) => kind.print_width(),
            ElementType::Pointer => 16,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, ElementType::Numeric(_))
    }

    pub fn is_symbolic(&self) -> bool {
        matches!(self, ElementType::Symbolic(_))
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, ElementType::Numeric(NumericKind::Complex))
    }

    pub fn numeric_kind(&self) -> Option<NumericKind> {
        match self {
            ElementType::Numeric(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn symbolic_width(&self) -> Option<usize> {
        match self {
            ElementType::Symbolic(w) => Some(*w as usize),
            _ => None,
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::Symbolic(w) => write!(f, "char[{}]", w),
            ElementType::Numeric(kind) => f.write_str(kind.name()),
            ElementType::Pointer => f.write_str("pointer"),
        }
    }
}

impl From<NumericKind> for ElementType {
    fn from(kind: NumericKind) -> Self {
        ElementType::Numeric(kind)
    }
}

impl TryFrom<u16> for ElementType {
    type Error = eyre::Report;

    fn try_from(code: u16) -> Result<Self> {
        ElementType::from_code(code)
    }
}

impl FromStr for ElementType {
    type Err = eyre::Report;

    fn from_str(s: &str) -> Result<Self> {
        let lower = s.trim().to_ascii_lowercase();
        let ty = match lower.as_str() {
            "bool" => ElementType::BOOL,
            "unsigned char" | "uchar" | "u8" => ElementType::U8,
            "char" | "i8" => ElementType::I8,
            "unsigned short" | "ushort" | "u16" => ElementType::U16,
            "short" | "i16" => ElementType::I16,
            "unsigned int" | "uint" | "u32" => ElementType::U32,
            "int" | "i32" => ElementType::I32,
            "unsigned long" | "ulong" | "u64" => ElementType::U64,
            "long" | "i64" => ElementType::I64,
            "float" | "f32" => ElementType::F32,
            "double" | "f64" => ElementType::F64,
            "complex" | "cplx" => ElementType::COMPLEX,
            "pointer" => ElementType::Pointer,
            other => {
                let width = other
                    .strip_prefix("char[")
                    .and_then(|rest| rest.strip_suffix(']'))
                    .or_else(|| other.strip_prefix("string"))
                    .and_then(|w| w.parse::<usize>().ok());
                match width {
                    Some(w) => ElementType::symbolic(w)?,
                    None => table_bail!(NoSupport, "unknown type name '{}'", s),
                }
            }
        };
        Ok(ty)
    }
}
