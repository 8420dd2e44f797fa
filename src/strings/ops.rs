//! String opcode names.

use std::fmt;
use std::str::FromStr;

use phf::phf_map;

use crate::table_bail;

/// Transformation applied by [`Table::strop`](crate::table::Table::strop).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StringOp {
    /// Joins the cells of each record, separated by the parameter.
    Ccat,
    /// CRC-32 of every cell as 8 hex digits.
    Chash,
    /// Compares the parameter against every cell.
    Cmp,
    /// One CRC-32 over all symbolic cells.
    Hash,
    Left,
    Len,
    Lwr,
    /// Concatenates the records of each symbolic component into one string.
    Rcat,
    Replace,
    Right,
    /// Byte offset of the parameter in every cell, or -1.
    Search,
    /// Splits at runs of delimiter characters.
    Split,
    /// Splits at every delimiter character, keeping empty tokens.
    SplitAll,
    /// Splits at delimiters and keeps each delimiter as a token.
    SplitD,
    /// Splits path names into directory and file.
    SplitP,
    Trim,
    Upr,
}

static STRING_OPS: phf::Map<&'static str, StringOp> = phf_map! {
    "ccat" => StringOp::Ccat,
    "chash" => StringOp::Chash,
    "cmp" => StringOp::Cmp,
    "hash" => StringOp::Hash,
    "left" => StringOp::Left,
    "len" => StringOp::Len,
    "lwr" => StringOp::Lwr,
    "rcat" => StringOp::Rcat,
    "replace" => StringOp::Replace,
    "right" => StringOp::Right,
    "search" => StringOp::Search,
    "split" => StringOp::Split,
    "splitall" => StringOp::SplitAll,
    "splitd" => StringOp::SplitD,
    "splitp" => StringOp::SplitP,
    "trim" => StringOp::Trim,
    "upr" => StringOp::Upr,
};

impl StringOp {
    pub fn name(&self) -> &'static str {
        match self {
            StringOp::Ccat => "ccat",
            StringOp::Chash => "chash",
            StringOp::Cmp => "cmp",
            StringOp::Hash => "hash",
            StringOp::Left => "left",
            StringOp::Len => "len",
            StringOp::Lwr => "lwr",
            StringOp::Rcat => "rcat",
            StringOp::Replace => "replace",
            StringOp::Right => "right",
            StringOp::Search => "search",
            StringOp::Split => "split",
            StringOp::SplitAll => "splitall",
            StringOp::SplitD => "splitd",
            StringOp::SplitP => "splitp",
            StringOp::Trim => "trim",
            StringOp::Upr => "upr",
        }
    }
}

impl FromStr for StringOp {
    type Err = eyre::Report;

    fn from_str(s: &str) -> eyre::Result<Self> {
        match STRING_OPS.get(s) {
            Some(&op) => Ok(op),
            None => table_bail!(BadOpcode, "unknown string operation '{}'", s),
        }
    }
}

impl fmt::Display for StringOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
