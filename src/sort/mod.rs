//! # Record Sorting
//!
//! Reorders the records of a table by the values of one component.
//!
//! ## Comparison
//!
//! | Key component | Order |
//! |---------------|-------|
//! | integral | by value, 64-bit types without rounding |
//! | float, double | by value, NaN compares equal to everything |
//! | complex | by real part |
//! | symbolic | bytewise up to the first NUL |
//! | symbolic, numeric strings | by leading number, ties bytewise |
//! | pointer | rejected with `BadSortType` |
//!
//! The sort is stable in both directions: records with equal keys keep
//! their relative order.
//!
//! ## Index Output
//!
//! ```text
//! src           sorted by age        index
//! Bob  30       Al   21              idx
//! Al   21  ──>  Bob  30              1
//! Cy   40       Cy   40              0
//!                                    2
//! ```
//!
//! `index[i]` is the source record that ended up at position `i`.
//!
//! ## Usage
//!
//! ```ignore
//! use datatable::sort::SortOrder;
//!
//! let mut index = Table::new();
//! people.sort(Operand::This, Some(&mut index), age, SortOrder::Ascending, false)?;
//! ```

mod records;


use std::fmt;
use std::str::FromStr;

use crate::table_bail;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    pub fn name(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "up",
            SortOrder::Descending => "down",
        }
    }
}

impl FromStr for SortOrder {
    type Err = eyre::Report;

    fn from_str(s: &str) -> eyre::Result<Self> {
        match s {
            "up" | "asc" | "ascending" => Ok(SortOrder::Ascending),
            "down" | "desc" | "descending" => Ok(SortOrder::Descending),
            _ => table_bail!(BadSortMode, "unknown sort mode '{}'", s),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
