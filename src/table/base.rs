//! # Table Storage
//!
//! The `Table` struct owns one contiguous byte buffer of `capacity` records.
//! The first `nrec` records are valid; the rest is zeroed spare capacity.
//!
//! ```text
//! buffer: [ rec 0 | rec 1 | ... | rec nrec-1 | spare ... ]
//!           <reclen>
//! ```
//!
//! ## Allocation Family
//!
//! | Method | Capacity | Valid records | Existing bytes |
//! |--------|----------|---------------|----------------|
//! | `allocate(n)` | n | n | discarded, all zero |
//! | `allocate_uninitialized(n)` | n | n | kept where they fit |
//! | `alloc(n)` | n | 0 | discarded, all zero |
//! | `alloc_uninitialized(n)` | n | 0 | kept where they fit |
//! | `realloc(n)` | n | min(count, n) | kept where they fit |
//!
//! Any byte offset obtained through [`Table::address_of`] is invalidated by
//! every method in this table.
//!
//! ## Blocks
//!
//! A block count of 0 and 1 both mean a single block spanning all records.
//! `records_per_block = count / blocks`; trailing records that do not fill a
//! block are ignored by block-wise operations.

use eyre::Result;
use rand::rngs::StdRng;

use crate::config::MAX_COMPONENT_NAME_LEN;
use crate::mark::MarkMap;
use crate::types::{ElementType, NumericKind};
use crate::{table_bail, table_ensure};

use super::{Component, Descriptors, Layout};

#[derive(Debug, Clone, Default)]
pub struct Table {
    pub(crate) layout: Layout,
    pub(crate) buffer: Vec<u8>,
    pub(crate) nrec: usize,
    pub(crate) capacity: usize,
    pub(crate) nblock: usize,
    pub(crate) descr: Descriptors,
    pub(crate) mark: Option<MarkMap>,
    pub(crate) noise: Option<StdRng>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a table with the given components and `nrec` zeroed records.
    pub fn with_components(components: &[(&str, ElementType)], nrec: usize) -> Result<Self> {
        let mut table = Table::new();
        table.add_components(components)?;
        table.allocate(nrec)?;
        Ok(table)
    }

    /// An empty table with the components and descriptors of `src`.
    pub fn structure_of(src: &Table) -> Self {
        Self {
            layout: src.layout.clone(),
            descr: src.descr.clone(),
            nblock: 0,
            ..Self::default()
        }
    }

    // ------------------------------------------------------------------
    // Components
    // ------------------------------------------------------------------

    pub fn add_component(&mut self, name: &str, ty: ElementType) -> Result<usize> {
        let at = self.layout.len();
        self.insert_component(name, ty, at)?;
        Ok(at)
    }

    /// Appends named components in order, stopping at the first invalid type.
    pub fn add_components(&mut self, components: &[(&str, ElementType)]) -> Result<()> {
        for (name, ty) in components {
            self.add_component(name, *ty)?;
        }
        Ok(())
    }

    /// Appends `count` unnamed components of one type.
    pub fn add_ncomps(&mut self, ty: ElementType, count: usize) -> Result<()> {
        let at = self.layout.len();
        self.insert_ncomps(ty, at, count)
    }

    pub fn insert_component(&mut self, name: &str, ty: ElementType, at: usize) -> Result<()> {
        validate_type(ty)?;
        let at = at.min(self.layout.len());
        let mut next = self.layout.clone();
        next.insert(at, clip_name(name), ty);
        let map = (0..next.len())
            .map(|i| match i.cmp(&at) {
                std::cmp::Ordering::Less => Some(i),
                std::cmp::Ordering::Equal => None,
                std::cmp::Ordering::Greater => Some(i - 1),
            })
            .collect::<Vec<_>>();
        self.relayout(next, &map)
    }

    pub fn insert_ncomps(&mut self, ty: ElementType, at: usize, count: usize) -> Result<()> {
        validate_type(ty)?;
        let at = at.min(self.layout.len());
        let mut next = self.layout.clone();
        for i in 0..count {
            next.insert(at + i, String::new(), ty);
        }
        let map = (0..next.len())
            .map(|i| {
                if i < at {
                    Some(i)
                } else if i < at + count {
                    None
                } else {
                    Some(i - count)
                }
            })
            .collect::<Vec<_>>();
        self.relayout(next, &map)
    }

    /// Removes `count` components starting at `first`; the range is clipped
    /// to the existing components.
    pub fn delete_components(&mut self, first: usize, count: usize) -> Result<()> {
        let ncomp = self.layout.len();
        table_ensure!(
            first <= ncomp,
            BadComponent,
            "first component {} exceeds {} components",
            first,
            ncomp
        );
        let end = first.saturating_add(count).min(ncomp);
        if end == first {
            return Ok(());
        }
        let removed = end - first;
        let mut next = self.layout.clone();
        next.remove(first, removed);
        let map = (0..next.len())
            .map(|i| Some(if i < first { i } else { i + removed }))
            .collect::<Vec<_>>();
        self.relayout(next, &map)
    }

    pub fn rename_component(&mut self, comp: usize, name: &str) -> Result<()> {
        table_ensure!(
            comp < self.layout.len(),
            BadComponent,
            "component {} out of range",
            comp
        );
        self.layout.rename(comp, clip_name(name));
        Ok(())
    }

    /// Changes the type of one component, keeping the leading bytes of every
    /// cell. Only meaningful between types of one family (symbolic widths).
    pub(crate) fn retype_component(&mut self, comp: usize, ty: ElementType) -> Result<()> {
        self.ensure_component(comp)?;
        validate_type(ty)?;
        let mut next = self.layout.clone();
        next.retype(comp, ty);
        let map = (0..next.len()).map(Some).collect::<Vec<_>>();
        self.relayout(next, &map)
    }

    /// Switches to `next`, copying each new component from the old component
    /// named by `map` and zeroing components that map to `None`.
    pub(crate) fn relayout(&mut self, next: Layout, map: &[Option<usize>]) -> Result<()> {
        if self.capacity == 0 {
            self.layout = next;
            self.buffer.clear();
            return Ok(());
        }
        let new_reclen = next.record_len();
        let mut buffer = zeroed(self.capacity, new_reclen)?;
        let old_reclen = self.layout.record_len();
        for r in 0..self.nrec {
            let src = &self.buffer[r * old_reclen..(r + 1) * old_reclen];
            let dst = &mut buffer[r * new_reclen..(r + 1) * new_reclen];
            for (new_c, old_c) in map.iter().enumerate() {
                let (Some(old_c), Some(nc)) = (old_c, next.get(new_c)) else {
                    continue;
                };
                if let Some(oc) = self.layout.get(*old_c) {
                    let n = oc.size().min(nc.size());
                    dst[nc.offset..nc.offset + n].copy_from_slice(&src[oc.offset..oc.offset + n]);
                }
            }
        }
        self.layout = next;
        self.buffer = buffer;
        self.mark = None;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Allocation
    // ------------------------------------------------------------------

    pub fn allocate(&mut self, nrec: usize) -> Result<()> {
        self.buffer = zeroed(nrec, self.layout.record_len())?;
        self.capacity = nrec;
        self.nrec = nrec;
        self.settle_counts();
        Ok(())
    }

    pub fn allocate_uninitialized(&mut self, nrec: usize) -> Result<()> {
        self.resize_capacity(nrec)?;
        self.nrec = nrec;
        self.settle_counts();
        Ok(())
    }

    pub fn alloc(&mut self, capacity: usize) -> Result<()> {
        self.buffer = zeroed(capacity, self.layout.record_len())?;
        self.capacity = capacity;
        self.nrec = 0;
        self.nblock = 0;
        self.settle_counts();
        Ok(())
    }

    pub fn alloc_uninitialized(&mut self, capacity: usize) -> Result<()> {
        self.resize_capacity(capacity)?;
        self.nrec = 0;
        self.nblock = 0;
        self.settle_counts();
        Ok(())
    }

    pub fn realloc(&mut self, capacity: usize) -> Result<()> {
        self.resize_capacity(capacity)?;
        self.nrec = self.nrec.min(capacity);
        self.settle_counts();
        Ok(())
    }

    fn resize_capacity(&mut self, capacity: usize) -> Result<()> {
        let bytes = byte_len(capacity, self.layout.record_len())?;
        if bytes > self.buffer.len() {
            let additional = bytes - self.buffer.len();
            if self.buffer.try_reserve_exact(additional).is_err() {
                table_bail!(OutOfMemory, "cannot grow table to {} bytes", bytes);
            }
        }
        self.buffer.resize(bytes, 0);
        self.capacity = capacity;
        Ok(())
    }

    /// Appends `count` zeroed records, growing capacity by at least `grow_by`.
    /// Returns the index of the first new record.
    pub fn add_records(&mut self, count: usize, grow_by: usize) -> Result<usize> {
        let first = self.nrec;
        let needed = first.saturating_add(count);
        if needed > self.capacity {
            let target = needed.max(self.capacity.saturating_add(grow_by));
            self.resize_capacity(target)?;
        }
        let reclen = self.layout.record_len();
        self.buffer[first * reclen..needed * reclen].fill(0);
        self.nrec = needed;
        self.settle_counts();
        Ok(first)
    }

    /// Inserts `count` zeroed records before record `at`.
    pub fn insert_records(&mut self, at: usize, count: usize, grow_by: usize) -> Result<()> {
        table_ensure!(
            at <= self.nrec,
            BadIndex,
            "insert position {} beyond {} records",
            at,
            self.nrec
        );
        let old = self.nrec;
        self.add_records(count, grow_by)?;
        let reclen = self.layout.record_len();
        self.buffer
            .copy_within(at * reclen..old * reclen, (at + count) * reclen);
        self.buffer[at * reclen..(at + count) * reclen].fill(0);
        Ok(())
    }

    /// Removes `count` records starting at `first`, shifting the tail left.
    /// The range is clipped to the valid records.
    pub fn delete_records(&mut self, first: usize, count: usize) -> Result<()> {
        table_ensure!(
            first <= self.nrec,
            BadIndex,
            "first record {} exceeds {} records",
            first,
            self.nrec
        );
        let end = first.saturating_add(count).min(self.nrec);
        let reclen = self.layout.record_len();
        self.buffer
            .copy_within(end * reclen..self.nrec * reclen, first * reclen);
        let nrec = self.nrec - (end - first);
        self.buffer[nrec * reclen..self.nrec * reclen].fill(0);
        self.nrec = nrec;
        self.settle_counts();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Counts
    // ------------------------------------------------------------------

    /// Sets the number of valid records, clipped to the capacity.
    pub fn set_record_count(&mut self, nrec: usize) {
        self.nrec = nrec.min(self.capacity);
        self.settle_counts();
    }

    pub fn increment_record_count(&mut self, by: usize) {
        self.set_record_count(self.nrec.saturating_add(by));
    }

    /// Sets the block count, clipped to the record count.
    pub fn set_block_count(&mut self, nblock: usize) {
        self.nblock = nblock;
        self.settle_counts();
    }

    /// Clips the block count to the records and drops a mark whose axis
    /// changed length.
    fn settle_counts(&mut self) {
        if self.nrec > 0 && self.nblock > self.nrec {
            self.nblock = self.nrec;
        }
        if let Some(map) = &self.mark {
            if map.len() != self.granularity(map.axis()) {
                self.mark = None;
            }
        }
    }

    /// Number of blocks; never 0.
    pub fn block_count(&self) -> usize {
        self.nblock.max(1)
    }

    pub fn records_per_block(&self) -> usize {
        self.nrec / self.block_count()
    }

    pub fn record_count(&self) -> usize {
        self.nrec
    }

    pub fn component_count(&self) -> usize {
        self.layout.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn record_len(&self) -> usize {
        self.layout.record_len()
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Drops all records but keeps components and descriptors.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.capacity = 0;
        self.nrec = 0;
        self.nblock = 0;
        self.mark = None;
    }

    /// Drops everything; descriptors survive when `keep_descriptors` is set.
    pub fn reset(&mut self, keep_descriptors: bool) {
        let descr = std::mem::take(&mut self.descr);
        let noise = self.noise.take();
        *self = Table::default();
        self.noise = noise;
        if keep_descriptors {
            self.descr = descr;
        }
    }

    /// Replaces `self` with `next`, keeping the noise setting of `self`.
    pub(crate) fn install(&mut self, mut next: Table) {
        next.noise = self.noise.take();
        *self = next;
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    /// True when there are no components or no valid records.
    pub fn is_empty(&self) -> bool {
        self.layout.is_empty() || self.nrec == 0
    }

    /// The common type code of all components, or 0 if they differ or there
    /// are none.
    pub fn is_homogeneous(&self) -> u16 {
        let mut types = self.layout.components().iter().map(|c| c.ty);
        let Some(first) = types.next() else {
            return 0;
        };
        if types.all(|t| t == first) {
            first.code()
        } else {
            0
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn component(&self, comp: usize) -> Option<&Component> {
        self.layout.get(comp)
    }

    pub fn component_type(&self, comp: usize) -> Option<ElementType> {
        self.layout.get(comp).map(|c| c.ty)
    }

    pub fn component_name(&self, comp: usize) -> Option<&str> {
        self.layout.get(comp).map(|c| c.name.as_str())
    }

    pub fn component_size(&self, comp: usize) -> Option<usize> {
        self.layout.get(comp).map(|c| c.size())
    }

    pub fn component_offset(&self, comp: usize) -> Option<usize> {
        self.layout.get(comp).map(|c| c.offset)
    }

    pub fn numeric_kind(&self, comp: usize) -> Option<NumericKind> {
        self.component_type(comp)?.numeric_kind()
    }

    pub fn find_component(&self, name: &str) -> Option<usize> {
        self.layout.position(name)
    }

    pub fn is_numeric_component(&self, comp: usize) -> bool {
        self.component_type(comp).is_some_and(|t| t.is_numeric())
    }

    pub fn is_symbolic_component(&self, comp: usize) -> bool {
        self.component_type(comp).is_some_and(|t| t.is_symbolic())
    }

    pub fn descriptors(&self) -> &Descriptors {
        &self.descr
    }

    pub fn descriptors_mut(&mut self) -> &mut Descriptors {
        &mut self.descr
    }

    /// Valid records as raw bytes.
    pub fn data(&self) -> &[u8] {
        &self.buffer[..self.nrec * self.layout.record_len()]
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        let n = self.nrec * self.layout.record_len();
        &mut self.buffer[..n]
    }

    /// Same component names, types and valid record bytes. Descriptors,
    /// marks, capacity and blocks are not compared.
    pub fn content_eq(&self, other: &Table) -> bool {
        self.layout == other.layout && self.nrec == other.nrec && self.data() == other.data()
    }

    /// Turns on uniform dither for stores made by arithmetic operations.
    pub fn set_noise(&mut self, seed: Option<u64>) {
        use rand::SeedableRng;
        self.noise = Some(StdRng::seed_from_u64(
            seed.unwrap_or(crate::config::DEFAULT_NOISE_SEED),
        ));
    }

    pub fn clear_noise(&mut self) {
        self.noise = None;
    }

    pub fn has_noise(&self) -> bool {
        self.noise.is_some()
    }

    pub(crate) fn ensure_component(&self, comp: usize) -> Result<()> {
        table_ensure!(
            comp < self.layout.len(),
            BadComponent,
            "component {} out of range ({} components)",
            comp,
            self.layout.len()
        );
        Ok(())
    }

    pub(crate) fn ensure_not_empty(&self, what: &str) -> Result<()> {
        table_ensure!(!self.is_empty(), Empty, "{} has no records", what);
        Ok(())
    }
}

fn validate_type(ty: ElementType) -> Result<()> {
    table_ensure!(
        ty != ElementType::Symbolic(0),
        NoSupport,
        "symbolic width must be positive"
    );
    Ok(())
}

fn clip_name(name: &str) -> String {
    if name.len() <= MAX_COMPONENT_NAME_LEN {
        return name.to_string();
    }
    let mut end = MAX_COMPONENT_NAME_LEN;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    name[..end].to_string()
}

fn byte_len(nrec: usize, reclen: usize) -> Result<usize> {
    match nrec.checked_mul(reclen) {
        Some(n) if n <= isize::MAX as usize => Ok(n),
        _ => table_bail!(OutOfMemory, "{} records of {} bytes", nrec, reclen),
    }
}

fn zeroed(nrec: usize, reclen: usize) -> Result<Vec<u8>> {
    let bytes = byte_len(nrec, reclen)?;
    let mut buffer = Vec::new();
    if buffer.try_reserve_exact(bytes).is_err() {
        table_bail!(OutOfMemory, "cannot allocate {} bytes", bytes);
    }
    buffer.resize(bytes, 0);
    Ok(buffer)
}
