//! # Table Engine Constants
//!
//! This module centralizes all configuration constants, grouping interdependent
//! values together and documenting their relationships.
//!
//! ## Dependency Graph
//!
//! ```text
//! MAX_SYMBOLIC_WIDTH (255)
//!       │
//!       ├─> RCAT_LIMIT (must be <)
//!       │     rcat grows one string per column until the total would reach
//!       │     this limit; the result column is len+1 bytes wide.
//!       │
//!       ├─> CCAT_WIDTH (must be <=)
//!       │
//!       ├─> LOOKUP_DEFAULT_WIDTH (must be <=)
//!       │     Width of the unnamed string columns lookup creates when no
//!       │     reference table is given.
//!       │
//!       └─> MAX_SUBSTRING_LEN
//!             left/right reject |len| above this value.
//!
//! HASH_WIDTH (10)
//!       └─> 8 hex digits of a CRC-32, NUL terminated, one spare byte
//! ```
//!
//! ## Type Codes
//!
//! Symbolic codes are the field widths 1..=255 themselves. Numeric codes are a
//! closed set encoding signedness and byte width:
//!
//! | Range | Meaning |
//! |-------|---------|
//! | 1..=255 | symbolic, width in bytes |
//! | 1000 | bool |
//! | 1001..=1008 | unsigned integer, last digit is the byte width |
//! | 2001..=2008 | signed integer, last digit is the byte width |
//! | 3004, 3008 | float, double |
//! | 3009 | complex (two doubles) |
//! | 6000 | opaque pointer handle |

// ============================================================================
// SYMBOLIC WIDTHS
// ============================================================================

/// Widest symbolic component, in bytes including the NUL terminator.
pub const MAX_SYMBOLIC_WIDTH: usize = 255;

/// Maximum length of a component name.
pub const MAX_COMPONENT_NAME_LEN: usize = 255;

/// rcat stops appending once the accumulated string would reach this length.
pub const RCAT_LIMIT: usize = 254;

/// Width of the single column produced by ccat.
pub const CCAT_WIDTH: usize = 255;

/// Width of the columns produced by hash and chash.
pub const HASH_WIDTH: usize = 10;

/// Width of the string columns lookup creates without a reference table.
pub const LOOKUP_DEFAULT_WIDTH: usize = 255;

/// Largest substring length accepted by left and right.
pub const MAX_SUBSTRING_LEN: usize = 255;

const _: () = assert!(
    RCAT_LIMIT < MAX_SYMBOLIC_WIDTH,
    "RCAT_LIMIT must leave room for the NUL terminator"
);

const _: () = assert!(CCAT_WIDTH <= MAX_SYMBOLIC_WIDTH);
const _: () = assert!(LOOKUP_DEFAULT_WIDTH <= MAX_SYMBOLIC_WIDTH);

const _: () = assert!(
    HASH_WIDTH >= 9,
    "HASH_WIDTH must hold 8 hex digits plus a terminator"
);

// ============================================================================
// NUMERIC TYPE CODES
// ============================================================================

pub const CODE_BOOL: u16 = 1000;
pub const CODE_U8: u16 = 1001;
pub const CODE_I8: u16 = 2001;
pub const CODE_U16: u16 = 1002;
pub const CODE_I16: u16 = 2002;
pub const CODE_U32: u16 = 1004;
pub const CODE_I32: u16 = 2004;
pub const CODE_U64: u16 = 1008;
pub const CODE_I64: u16 = 2008;
pub const CODE_F32: u16 = 3004;
pub const CODE_F64: u16 = 3008;
pub const CODE_COMPLEX: u16 = 3009;
pub const CODE_POINTER: u16 = 6000;

const _: () = assert!(
    MAX_SYMBOLIC_WIDTH < CODE_BOOL as usize,
    "symbolic codes must not overlap numeric codes"
);

// ============================================================================
// MARKS AND NOISE
// ============================================================================

/// Bytes of mark bitset stored inline before spilling to the heap.
/// 16 bytes cover 128 components or records.
pub const MARK_INLINE_BYTES: usize = 16;

/// Seed used by [`Table::set_noise`](crate::table::Table::set_noise) when the
/// caller asks for forced noise without picking one.
pub const DEFAULT_NOISE_SEED: u64 = 0x5eed_d17a;
