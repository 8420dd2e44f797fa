//! Typed search keys and record search.

use eyre::Result;

use crate::table::Table;
use crate::types::{Complex, ElementType, NumericKind};
use crate::{table_bail, table_ensure};

/// A value to look for in one component. The variant must match the
/// component's declared type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Key<'k> {
    Bool(bool),
    U8(u8),
    I8(i8),
    U16(u16),
    I16(i16),
    U32(u32),
    I32(i32),
    U64(u64),
    I64(i64),
    F32(f32),
    F64(f64),
    Complex(Complex),
    /// Compared with the cell text up to its first NUL.
    Str(&'k str),
}

impl Key<'_> {
    /// Type of the component this key can be matched against. Strings match
    /// any symbolic width.
    fn fits(&self, ty: ElementType) -> bool {
        match (self, ty) {
            (Key::Str(_), ElementType::Symbolic(_)) => true,
            (Key::Str(_), _) | (_, ElementType::Symbolic(_)) | (_, ElementType::Pointer) => false,
            (key, ElementType::Numeric(kind)) => key.kind() == Some(kind),
        }
    }

    fn kind(&self) -> Option<NumericKind> {
        Some(match self {
            Key::Bool(_) => NumericKind::Bool,
            Key::U8(_) => NumericKind::U8,
            Key::I8(_) => NumericKind::I8,
            Key::U16(_) => NumericKind::U16,
            Key::I16(_) => NumericKind::I16,
            Key::U32(_) => NumericKind::U32,
            Key::I32(_) => NumericKind::I32,
            Key::U64(_) => NumericKind::U64,
            Key::I64(_) => NumericKind::I64,
            Key::F32(_) => NumericKind::F32,
            Key::F64(_) => NumericKind::F64,
            Key::Complex(_) => NumericKind::Complex,
            Key::Str(_) => return None,
        })
    }

    fn matches(&self, table: &Table, rec: usize, comp: usize) -> bool {
        match *self {
            Key::Bool(v) => (table.dfetch(rec, comp) != 0.0) == v,
            Key::U8(v) => table.fetch_u8(rec, comp) == Some(v),
            Key::I8(v) => table.fetch_i8(rec, comp) == Some(v),
            Key::U16(v) => table.fetch_u16(rec, comp) == Some(v),
            Key::I16(v) => table.fetch_i16(rec, comp) == Some(v),
            Key::U32(v) => table.fetch_u32(rec, comp) == Some(v),
            Key::I32(v) => table.fetch_i32(rec, comp) == Some(v),
            Key::U64(v) => table.fetch_u64(rec, comp) == Some(v),
            Key::I64(v) => table.fetch_i64(rec, comp) == Some(v),
            Key::F32(v) => table.fetch_f32(rec, comp) == Some(v),
            Key::F64(v) => table.fetch_f64(rec, comp) == Some(v),
            Key::Complex(v) => table.cfetch(rec, comp) == v,
            Key::Str(v) => table.sbytes(rec, comp) == Some(v.as_bytes()),
        }
    }
}

impl Table {
    /// First record in `first..last` whose cells equal every `(component,
    /// key)` pair, or `None`.
    ///
    /// A key whose type does not match its component is a `Homogeneity`
    /// error, checked before any record is read.
    pub fn find(&self, first: usize, last: usize, keys: &[(usize, Key<'_>)]) -> Result<Option<usize>> {
        table_ensure!(
            last <= self.record_count(),
            BadIndex,
            "search range ends at {} beyond {} records",
            last,
            self.record_count()
        );
        for &(comp, key) in keys {
            self.ensure_component(comp)?;
            let Some(ty) = self.component_type(comp) else {
                continue;
            };
            if !key.fits(ty) {
                table_bail!(
                    Homogeneity,
                    "key {:?} does not fit component {} of type {}",
                    key,
                    comp,
                    ty
                );
            }
        }
        Ok((first..last).find(|&r| keys.iter().all(|(comp, key)| key.matches(self, r, *comp))))
    }
}
