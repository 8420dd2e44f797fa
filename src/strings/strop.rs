//! String transformations over symbolic components, and the table checksum.

use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;
use crc::{Crc, CRC_32_ISO_HDLC};
use eyre::Result;
use tracing::debug;

use crate::config::{CCAT_WIDTH, HASH_WIDTH, MAX_SUBSTRING_LEN, RCAT_LIMIT};
use crate::mark::Axis;
use crate::table::convert::convert_cell;
use crate::table::{Operand, Table};
use crate::types::format::write_cell_str;
use crate::types::ElementType;
use crate::{table_bail, table_ensure};

use super::StringOp;

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

/// Name of the hash algorithm `hash` and `chash` accept as parameter.
const HASH_ALGORITHM: &str = "CRC-32";

impl Table {
    /// Applies `op` to the symbolic cells of `src` and stores the result in
    /// `self`.
    ///
    /// With a record or component mark on `src`, the table is cut into runs
    /// of equally marked records (components). Only marked runs are
    /// transformed; all runs are concatenated (joined) again in their
    /// original order and the mark is carried over when the result still
    /// has the same extent. Block and cell marks are a `BadMarkMode`.
    pub fn strop<'a>(&mut self, src: impl Into<Operand<'a>>, param: &str, op: StringOp) -> Result<()> {
        let next = {
            let src = src.into().source(self);
            match src.mark_mode() {
                None => transform(src, param, op)?,
                Some(axis @ (Axis::Records | Axis::Components)) => spliced(src, axis, param, op)?,
                Some(axis) => {
                    table_bail!(BadMarkMode, "string operations do not support {} marks", axis)
                }
            }
        };
        self.install(next);
        Ok(())
    }

    /// CRC-32 (ISO-HDLC) over the bytes of every cell in record-major order,
    /// skipping component `ignore`.
    pub fn checksum(&self, ignore: Option<usize>) -> u32 {
        let mut digest = CRC32.digest();
        for r in 0..self.record_count() {
            for c in (0..self.component_count()).filter(|&c| Some(c) != ignore) {
                if let Some(bytes) = self.cell(r, c) {
                    digest.update(bytes);
                }
            }
        }
        digest.finalize()
    }
}

fn spliced(src: &Table, axis: Axis, param: &str, op: StringOp) -> Result<Table> {
    let len = src.granularity(axis);
    let marked = |i: usize| match axis {
        Axis::Records => src.is_record_marked(i),
        _ => src.is_component_marked(i),
    };
    debug!(op = op.name(), %axis, len, "string operation on marked runs");

    let mut out = Table::new();
    out.copy_descriptors(src);
    let mut first = 0;
    while first < len {
        let on = marked(first);
        let mut end = first + 1;
        while end < len && marked(end) == on {
            end += 1;
        }
        let mut part = Table::new();
        part.select(src, axis, first, Some(end - first))?;
        if on {
            part = transform(&part, param, op)?;
        }
        let _ = match axis {
            Axis::Records => out.cat(&part)?,
            _ => out.join(&part)?,
        };
        first = end;
    }
    if out.granularity(axis) == len {
        out.copy_mark(src)?;
    }
    Ok(out)
}

fn transform(src: &Table, param: &str, op: StringOp) -> Result<Table> {
    match op {
        StringOp::Len => per_cell_number(src, |s| s.len() as i64),
        StringOp::Cmp => {
            let key = param.as_bytes();
            per_cell_number(src, |s| key.cmp(s) as i64)
        }
        StringOp::Search => {
            let key = param.as_bytes();
            per_cell_number(src, |s| find(s, key).map_or(-1, |p| p as i64))
        }
        StringOp::Hash => hash(src, param),
        StringOp::Chash => chash(src, param),
        StringOp::Lwr => Ok(map_symbolic(src, |s| s.to_ascii_lowercase())),
        StringOp::Upr => Ok(map_symbolic(src, |s| s.to_ascii_uppercase())),
        StringOp::Left | StringOp::Right => {
            let n = substring_len(param)?;
            let right = op == StringOp::Right;
            Ok(map_symbolic(src, |s| {
                let size = if n < 0 {
                    s.len().saturating_sub(n.unsigned_abs() as usize)
                } else {
                    (n as usize).min(s.len())
                };
                if right {
                    s[s.len() - size..].to_vec()
                } else {
                    s[..size].to_vec()
                }
            }))
        }
        StringOp::Replace => {
            let (key, rpl) = replacement(param)?;
            Ok(map_symbolic(src, |s| replace_all(s, key.as_bytes(), rpl.as_bytes())))
        }
        StringOp::Trim => {
            let set = param.as_bytes();
            Ok(map_symbolic(src, |s| {
                let start = s.iter().position(|b| !set.contains(b)).unwrap_or(s.len());
                let end = s.iter().rposition(|b| !set.contains(b)).map_or(start, |p| p + 1);
                s[start..end.max(start)].to_vec()
            }))
        }
        StringOp::Rcat => rcat(src),
        StringOp::Ccat => ccat(src, param),
        StringOp::Split | StringOp::SplitAll | StringOp::SplitD | StringOp::SplitP => {
            split(src, param.as_bytes(), op)
        }
    }
}

/// One `short` column per source component. Symbolic cells map through `f`,
/// all others become -1.
fn per_cell_number(src: &Table, f: impl Fn(&[u8]) -> i64) -> Result<Table> {
    let mut out = like_components(src, ElementType::I16)?;
    for r in 0..src.record_count() {
        for c in 0..src.component_count() {
            let v = src.sbytes(r, c).map_or(-1, &f);
            out.dstore(r, c, v as f64);
        }
    }
    Ok(out)
}

/// Table with the component names and record count of `src`, every
/// component of type `ty`.
fn like_components(src: &Table, ty: ElementType) -> Result<Table> {
    let mut out = Table::new();
    for c in 0..src.component_count() {
        out.add_component(src.component_name(c).unwrap_or_default(), ty)?;
    }
    out.allocate(src.record_count())?;
    out.copy_descriptors(src);
    Ok(out)
}

/// Copy of `src` with every symbolic cell replaced by `f(cell)`, cut to the
/// component width.
fn map_symbolic(src: &Table, mut f: impl FnMut(&[u8]) -> Vec<u8>) -> Table {
    let mut out = src.clone();
    out.mark = None;
    for c in (0..src.component_count()).filter(|&c| src.is_symbolic_component(c)) {
        for r in 0..src.record_count() {
            if let (Some(s), Some(field)) = (src.sbytes(r, c), out.cell_mut(r, c)) {
                write_cell_str(field, &f(s));
            }
        }
    }
    out
}

fn ensure_hash_algorithm(param: &str) -> Result<()> {
    table_ensure!(
        param.is_empty() || param.eq_ignore_ascii_case(HASH_ALGORITHM),
        BadOpcode,
        "unknown hash algorithm '{}'",
        param
    );
    Ok(())
}

fn hash(src: &Table, param: &str) -> Result<Table> {
    ensure_hash_algorithm(param)?;
    let mut digest = CRC32.digest();
    for r in 0..src.record_count() {
        for c in 0..src.component_count() {
            if let Some(s) = src.sbytes(r, c) {
                digest.update(s);
            }
        }
    }
    let mut out = Table::new();
    out.add_component("CRC", ElementType::symbolic(HASH_WIDTH)?)?;
    out.allocate(1)?;
    out.sstore(0, 0, &format!("{:08X}", digest.finalize()));
    Ok(out)
}

fn chash(src: &Table, param: &str) -> Result<Table> {
    ensure_hash_algorithm(param)?;
    let mut out = like_components(src, ElementType::symbolic(HASH_WIDTH)?)?;
    for r in 0..src.record_count() {
        for c in 0..src.component_count() {
            let text = match src.sbytes(r, c) {
                Some(s) => format!("{:08X}", CRC32.checksum(s)),
                None => "-1".to_string(),
            };
            out.sstore(r, c, &text);
        }
    }
    Ok(out)
}

/// Parses the length argument of `left` and `right`.
fn substring_len(param: &str) -> Result<i32> {
    let Ok(n) = param.trim().parse::<i32>() else {
        table_bail!(BadInitializer, "'{}' is not a substring length", param);
    };
    table_ensure!(
        n.unsigned_abs() as usize <= MAX_SUBSTRING_LEN,
        BadIndex,
        "substring length {} exceeds {}",
        n,
        MAX_SUBSTRING_LEN
    );
    Ok(n)
}

/// Splits `"/key/replacement"`: the first character delimits key and
/// replacement. Empty fields are skipped; a missing replacement deletes.
fn replacement(param: &str) -> Result<(&str, &str)> {
    let mut chars = param.chars();
    let Some(delim) = chars.next() else {
        table_bail!(BadInitializer, "replace needs a delimiter and a key");
    };
    let mut fields = chars.as_str().split(delim).filter(|f| !f.is_empty());
    let Some(key) = fields.next() else {
        table_bail!(BadInitializer, "replace parameter '{}' has no key", param);
    };
    Ok((key, fields.next().unwrap_or("")))
}

fn find(hay: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    hay.windows(needle.len()).position(|w| w == needle)
}

fn replace_all(hay: &[u8], key: &[u8], rpl: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(hay.len());
    let mut rest = hay;
    while let Some(p) = find(rest, key) {
        out.extend_from_slice(&rest[..p]);
        out.extend_from_slice(rpl);
        rest = &rest[p + key.len()..];
    }
    out.extend_from_slice(rest);
    out
}

fn rcat(src: &Table) -> Result<Table> {
    let mut out = Table::new();
    let mut texts = Vec::new();
    for c in 0..src.component_count() {
        let (Some(ty), name) = (src.component_type(c), src.component_name(c).unwrap_or_default())
        else {
            continue;
        };
        if ty.is_symbolic() {
            let mut acc = Vec::new();
            for r in 0..src.record_count() {
                let s = src.sbytes(r, c).unwrap_or_default();
                if acc.len() + s.len() >= RCAT_LIMIT {
                    break;
                }
                acc.extend_from_slice(s);
            }
            out.add_component(name, ElementType::symbolic(acc.len() + 1)?)?;
            texts.push((c, acc));
        } else {
            out.add_component(name, ty)?;
        }
    }
    if out.component_count() > 0 {
        out.allocate(1)?;
    }
    for c in 0..src.component_count() {
        if !src.is_symbolic_component(c) {
            convert_cell(src, 0, c, &mut out, 0, c);
        }
    }
    for (c, text) in texts {
        if let Some(field) = out.cell_mut(0, c) {
            write_cell_str(field, &text);
        }
    }
    Ok(out)
}

fn ccat(src: &Table, separator: &str) -> Result<Table> {
    let mut out = Table::new();
    out.add_component("ccat", ElementType::symbolic(CCAT_WIDTH)?)?;
    out.allocate(src.record_count())?;
    out.copy_descriptors(src);
    for r in 0..src.record_count() {
        let mut line = String::new();
        for c in 0..src.component_count() {
            if c > 0 {
                line.push_str(separator);
            }
            line.push_str(src.sfetch(r, c).trim());
        }
        out.sstore(r, 0, &line);
    }
    Ok(out)
}

/// Where an output column of a split takes its values from.
enum SplitColumn<'s, 'bump> {
    /// Non-symbolic source component copied unchanged.
    Copy { from: usize, to: usize },
    /// Tokens of one symbolic source component, per record, starting at
    /// output column `to`.
    Tokens { to: usize, rows: Vec<BumpVec<'bump, &'s [u8]>> },
}

fn split(src: &Table, delims: &[u8], op: StringOp) -> Result<Table> {
    let arena = Bump::new();
    let mut out = Table::new();
    let mut plan = Vec::with_capacity(src.component_count());

    for c in 0..src.component_count() {
        let (Some(ty), name) = (src.component_type(c), src.component_name(c).unwrap_or_default())
        else {
            continue;
        };
        let to = out.component_count();
        if !ty.is_symbolic() {
            out.add_component(name, ty)?;
            plan.push(SplitColumn::Copy { from: c, to });
            continue;
        }
        let mut rows = Vec::with_capacity(src.record_count());
        for r in 0..src.record_count() {
            let mut tokens = BumpVec::new_in(&arena);
            tokenize(src.sbytes(r, c).unwrap_or_default(), delims, op, &mut tokens);
            rows.push(tokens);
        }
        let width = match op {
            StringOp::SplitP => 2,
            _ => rows.iter().map(|t| t.len()).max().unwrap_or(0).max(1),
        };
        for _ in 0..width {
            out.add_component(name, ty)?;
        }
        plan.push(SplitColumn::Tokens { to, rows });
    }

    out.allocate(src.record_count())?;
    out.copy_descriptors(src);
    debug!(op = op.name(), components = out.component_count(), "split");

    for column in &plan {
        match column {
            SplitColumn::Copy { from, to } => {
                for r in 0..src.record_count() {
                    convert_cell(src, r, *from, &mut out, r, *to);
                }
            }
            SplitColumn::Tokens { to, rows } => {
                for (r, tokens) in rows.iter().enumerate() {
                    for (k, token) in tokens.iter().enumerate() {
                        if let Some(field) = out.cell_mut(r, to + k) {
                            write_cell_str(field, token);
                        }
                    }
                }
            }
        }
    }
    Ok(out)
}

fn tokenize<'s>(s: &'s [u8], delims: &[u8], op: StringOp, into: &mut BumpVec<'_, &'s [u8]>) {
    if s.is_empty() {
        return;
    }
    let is_delim = |b: &u8| delims.contains(b);
    match op {
        StringOp::Split => into.extend(s.split(is_delim).filter(|t| !t.is_empty())),
        StringOp::SplitAll => into.extend(s.split(is_delim)),
        StringOp::SplitD => {
            let mut start = 0;
            for (i, b) in s.iter().enumerate() {
                if is_delim(b) {
                    if i > start {
                        into.push(&s[start..i]);
                    }
                    into.push(&s[i..=i]);
                    start = i + 1;
                }
            }
            if start < s.len() {
                into.push(&s[start..]);
            }
        }
        StringOp::SplitP => {
            let (path, file) = match s.iter().rposition(|&b| b == b'/' || b == b'\\') {
                Some(p) => (&s[..p], &s[p + 1..]),
                None => (&s[..0], s),
            };
            into.push(path);
            into.push(file);
        }
        _ => {}
    }
}
