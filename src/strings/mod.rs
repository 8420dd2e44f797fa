//! # String Operations
//!
//! Transformations over the symbolic components of a table. Numeric
//! components pass through, or read as -1 where the result is a number per
//! cell.
//!
//! ## Opcodes
//!
//! | Opcode | Parameter | Result |
//! |--------|-----------|--------|
//! | `len` | - | `short` per cell: string length |
//! | `cmp` | string | `short` per cell: sign of `param` vs cell |
//! | `search` | string | `short` per cell: offset of `param` or -1 |
//! | `hash` | `""` or `CRC-32` | one cell: CRC-32 over all strings |
//! | `chash` | `""` or `CRC-32` | hex CRC-32 per cell |
//! | `lwr`, `upr` | - | case folded copy |
//! | `left`, `right` | length | first/last `n` bytes, negative `n` drops from the other end |
//! | `replace` | `/key/rpl` | every `key` replaced, first char is the delimiter |
//! | `trim` | char set | leading and trailing set members removed |
//! | `rcat` | - | one record, strings of each component appended |
//! | `ccat` | separator | one `ccat` column, cells of each record joined |
//! | `split` | delimiters | tokens between delimiter runs |
//! | `splitall` | delimiters | tokens at every delimiter, empty tokens kept |
//! | `splitd` | delimiters | tokens and the delimiters themselves |
//! | `splitp` | - | directory and file name |
//!
//! The split family grows one output component per token, named and typed
//! like the source component; records with fewer tokens are padded with
//! empty strings.
//!
//! ## Marks
//!
//! ```text
//! records:  0 1 2 3 4 5
//! mark:     . x x . . x
//! runs:     [0] [1 2] [3 4] [5]
//!                 │           │
//!           copy  op   copy   op   ──cat──>  result, mark copied back
//! ```
//!
//! Component marks work the same way with `join`. Block and cell marks are
//! rejected.
//!
//! ## Usage
//!
//! ```ignore
//! use datatable::strings::StringOp;
//!
//! let mut words = Table::new();
//! words.strop(&sentences, " ", StringOp::Split)?;
//! let crc = words.checksum(None);
//! ```

mod ops;
mod strop;

#[cfg(test)]
mod tests;

pub use ops::StringOp;
