//! # Internal Macros
//!
//! This module provides the macros that keep per-type code down to one code
//! path per operation.
//!
//! ## numeric_element!
//!
//! Implements [`Element`](crate::types::Element) for primitive numeric types
//! stored little-endian. Stores from `f64` saturate at the type bounds and
//! truncate toward zero, which is what `as` does for float-to-integer casts.
//!
//! ## with_element!
//!
//! Expands a generic body once per [`NumericKind`](crate::types::NumericKind)
//! with `$T` bound to the storage type:
//!
//! ```ignore
//! let v = with_element!(kind, T => <T as Element>::load(bytes).to_complex());
//! ```
//!
//! ## typed_cell_accessors!
//!
//! Generates checked typed getters and setters on `Table`:
//!
//! ```ignore
//! impl Table {
//!     typed_cell_accessors! { u8, i32, f64 }
//! }
//!
//! // Generates:
//! // pub fn fetch_u8(&self, rec: usize, comp: usize) -> Option<u8>
//! // pub fn store_u8(&mut self, rec: usize, comp: usize, val: u8) -> bool
//! // ...
//! ```

/// Implements `Element` for little-endian primitive numeric types.
#[macro_export]
macro_rules! numeric_element {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl $crate::types::Element for $ty {
                const KIND: $crate::types::NumericKind = $crate::types::NumericKind::$kind;

                #[inline]
                fn load(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; ::std::mem::size_of::<$ty>()];
                    raw.copy_from_slice(&bytes[..::std::mem::size_of::<$ty>()]);
                    <$ty>::from_le_bytes(raw)
                }

                #[inline]
                fn save(self, bytes: &mut [u8]) {
                    bytes[..::std::mem::size_of::<$ty>()].copy_from_slice(&self.to_le_bytes());
                }

                #[inline]
                fn to_complex(self) -> $crate::types::Complex {
                    $crate::types::Complex::real(self as f64)
                }

                #[inline]
                fn from_complex(v: $crate::types::Complex) -> Self {
                    v.re as $ty
                }
            }
        )*
    };
}

/// Runs `$body` with `$T` bound to the storage type of a numeric kind.
#[macro_export]
macro_rules! with_element {
    ($kind:expr, $T:ident => $body:expr) => {
        match $kind {
            $crate::types::NumericKind::Bool => {
                type $T = bool;
                $body
            }
            $crate::types::NumericKind::U8 => {
                type $T = u8;
                $body
            }
            $crate::types::NumericKind::I8 => {
                type $T = i8;
                $body
            }
            $crate::types::NumericKind::U16 => {
                type $T = u16;
                $body
            }
            $crate::types::NumericKind::I16 => {
                type $T = i16;
                $body
            }
            $crate::types::NumericKind::U32 => {
                type $T = u32;
                $body
            }
            $crate::types::NumericKind::I32 => {
                type $T = i32;
                $body
            }
            $crate::types::NumericKind::U64 => {
                type $T = u64;
                $body
            }
            $crate::types::NumericKind::I64 => {
                type $T = i64;
                $body
            }
            $crate::types::NumericKind::F32 => {
                type $T = f32;
                $body
            }
            $crate::types::NumericKind::F64 => {
                type $T = f64;
                $body
            }
            $crate::types::NumericKind::Complex => {
                type $T = $crate::types::Complex;
                $body
            }
        }
    };
}

/// Generates `fetch_<ty>` / `store_<ty>` accessors that only succeed when the
/// component is declared with exactly that element type.
#[macro_export]
macro_rules! typed_cell_accessors {
    ($($ty:ident),* $(,)?) => {
        ::paste::paste! {
            $(
                #[inline]
                pub fn [<fetch_ $ty>](&self, rec: usize, comp: usize) -> Option<$ty> {
                    if self.numeric_kind(comp)? != <$ty as $crate::types::Element>::KIND {
                        return None;
                    }
                    self.cell(rec, comp).map(<$ty as $crate::types::Element>::load)
                }

                #[inline]
                pub fn [<store_ $ty>](&mut self, rec: usize, comp: usize, val: $ty) -> bool {
                    if self.numeric_kind(comp) != Some(<$ty as $crate::types::Element>::KIND) {
                        return false;
                    }
                    match self.cell_mut(rec, comp) {
                        Some(bytes) => {
                            $crate::types::Element::save(val, bytes);
                            true
                        }
                        None => false,
                    }
                }
            )*
        }
    };
}
