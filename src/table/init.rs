//! # Literal Initializers
//!
//! Fills cells from a whitespace-separated token stream, row-major:
//!
//! ```text
//! table.init_from_str("1 2 3  4 * 6", 0, 0, None)?;
//!
//!   rec 0: 1 2 3
//!   rec 1: 4 _ 6      (* leaves the cell unchanged)
//! ```
//!
//! After the last component the stream wraps to `first_comp` of the next
//! record. Double-quoted tokens may contain whitespace. Every token is checked
//! before any cell is written, so a malformed stream leaves the table as it
//! was.

use eyre::Result;

use crate::types::{Complex, ElementType};
use crate::{table_bail, table_ensure};

use super::Table;

enum Cell {
    Skip,
    Number(Complex),
    Text(String),
    Handle(u64),
}

impl Table {
    /// Initializes cells starting at `(first_rec, first_comp)`. Records up to
    /// the capacity may be written; the record count grows to cover them.
    /// With `count`, exactly that many tokens are expected.
    pub fn init_from_str(
        &mut self,
        text: &str,
        first_rec: usize,
        first_comp: usize,
        count: Option<usize>,
    ) -> Result<()> {
        self.ensure_component(first_comp)?;
        let tokens = tokenize(text)?;
        let ncomp = self.component_count();
        let limit = count.unwrap_or(usize::MAX);

        let mut cells = Vec::new();
        let (mut r, mut c) = (first_rec, first_comp);
        for token in &tokens {
            if r >= self.capacity || cells.len() >= limit {
                table_bail!(
                    TooFewOrMany,
                    "too many initializers: {} given, room for {}",
                    tokens.len(),
                    cells.len()
                );
            }
            let ty = self.layout.components()[c].ty;
            cells.push((r, c, parse_cell(token, ty, r, c)?));
            c += 1;
            if c == ncomp {
                c = first_comp;
                r += 1;
            }
        }
        if let Some(n) = count {
            table_ensure!(
                cells.len() >= n,
                TooFewOrMany,
                "too few initializers: {} given, {} expected",
                cells.len(),
                n
            );
        }

        if let Some(&(last, _, _)) = cells.last() {
            if last >= self.nrec {
                self.set_record_count(last + 1);
            }
        }
        for (r, c, cell) in cells {
            self.write_init_cell(r, c, cell);
        }
        Ok(())
    }

    /// Initializes one record starting at `first_comp`. The tokens must cover
    /// the remaining components of the record exactly.
    pub fn init_record(&mut self, text: &str, rec: usize, first_comp: usize) -> Result<()> {
        self.ensure_component(first_comp)?;
        table_ensure!(
            rec < self.nrec,
            BadIndex,
            "record {} out of range ({} records)",
            rec,
            self.nrec
        );
        let tokens = tokenize(text)?;
        let expected = self.component_count() - first_comp;
        table_ensure!(
            tokens.len() == expected,
            TooFewOrMany,
            "{} initializers for {} components",
            tokens.len(),
            expected
        );
        let mut cells = Vec::with_capacity(tokens.len());
        for (i, token) in tokens.iter().enumerate() {
            let c = first_comp + i;
            let ty = self.layout.components()[c].ty;
            cells.push((c, parse_cell(token, ty, rec, c)?));
        }
        for (c, cell) in cells {
            self.write_init_cell(rec, c, cell);
        }
        Ok(())
    }

    fn write_init_cell(&mut self, rec: usize, comp: usize, cell: Cell) {
        match cell {
            Cell::Skip => {}
            Cell::Number(v) => {
                self.cstore(rec, comp, v);
            }
            Cell::Text(s) => {
                self.sstore(rec, comp, &s);
            }
            Cell::Handle(h) => {
                self.pstore(rec, comp, h);
            }
        }
    }
}

fn tokenize(text: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut chars = text.chars().peekable();
    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }
        let mut token = String::new();
        if ch == '"' {
            chars.next();
            let mut closed = false;
            for ch in chars.by_ref() {
                if ch == '"' {
                    closed = true;
                    break;
                }
                token.push(ch);
            }
            table_ensure!(closed, BadInitializer, "unterminated quote in '{}'", text);
            tokens.push(token);
            continue;
        }
        while let Some(&ch) = chars.peek() {
            if ch.is_whitespace() {
                break;
            }
            token.push(ch);
            chars.next();
        }
        tokens.push(token);
    }
    Ok(tokens)
}

fn parse_cell(token: &str, ty: ElementType, rec: usize, comp: usize) -> Result<Cell> {
    if token == "*" {
        return Ok(Cell::Skip);
    }
    let cell = match ty {
        ElementType::Symbolic(_) => Cell::Text(token.to_string()),
        ElementType::Numeric(_) => match parse_complex(token) {
            Some(v) => Cell::Number(v),
            None => table_bail!(
                BadInitializer,
                "'{}' at record {}, component {}",
                token,
                rec,
                comp
            ),
        },
        ElementType::Pointer => match token.parse::<u64>() {
            Ok(h) => Cell::Handle(h),
            Err(_) => table_bail!(
                BadInitializer,
                "'{}' at record {}, component {}",
                token,
                rec,
                comp
            ),
        },
    };
    Ok(cell)
}

/// Parses `3`, `-1.5e2`, `2i`, or `1.5-2i`.
fn parse_complex(token: &str) -> Option<Complex> {
    if let Ok(v) = token.parse::<f64>() {
        return Some(Complex::real(v));
    }
    let body = token.strip_suffix('i')?;
    if let Ok(im) = body.parse::<f64>() {
        return Some(Complex::new(0.0, im));
    }
    let bytes = body.as_bytes();
    let split = (1..bytes.len())
        .rev()
        .find(|&i| (bytes[i] == b'+' || bytes[i] == b'-') && !matches!(bytes[i - 1], b'e' | b'E'))?;
    let re = body[..split].parse::<f64>().ok()?;
    let im = body[split..].parse::<f64>().ok()?;
    Some(Complex::new(re, im))
}
