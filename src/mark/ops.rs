use eyre::Result;
use tracing::debug;

use crate::error::{ErrorKind, Outcome};
use crate::table::Table;
use crate::{table_bail, table_ensure};

use super::{Axis, MarkMap};

impl Table {
    /// Number of markable elements along `axis`.
    pub fn granularity(&self, axis: Axis) -> usize {
        match axis {
            Axis::Components => self.component_count(),
            Axis::Records => self.record_count(),
            Axis::Blocks => self.block_count(),
            Axis::Cells => self.record_count() * self.component_count(),
        }
    }

    /// Marks `count` elements from `first` along `axis`. Existing marks on the
    /// same axis are kept; a map for another axis is discarded.
    pub fn mark(&mut self, axis: Axis, first: usize, count: usize) -> Result<()> {
        let len = self.granularity(axis);
        table_ensure!(
            first.checked_add(count).is_some_and(|end| end <= len),
            BadIndex,
            "cannot mark {}..{} of {} {}",
            first,
            first.saturating_add(count),
            len,
            axis
        );
        let map = match self.mark.take() {
            Some(map) if map.axis() == axis && map.len() == len => map,
            _ => MarkMap::new(axis, len),
        };
        let map = self.mark.insert(map);
        map.set_range(first, count, true);
        Ok(())
    }

    pub fn unmark(&mut self) {
        self.mark = None;
    }

    /// Clears `count` bits from `first` and keeps the map.
    pub fn unmark_range(&mut self, first: usize, count: usize) -> Result<()> {
        let Some(axis) = self.mark_mode() else {
            table_bail!(NoMark, "table is not marked");
        };
        let len = self.granularity(axis);
        table_ensure!(
            first.checked_add(count).is_some_and(|end| end <= len),
            BadIndex,
            "cannot unmark {}..{} of {} {}",
            first,
            first.saturating_add(count),
            len,
            axis
        );
        if let Some(map) = self.mark.as_mut() {
            map.set_range(first, count, false);
        }
        Ok(())
    }

    /// The mark map, unless there is none or it went stale.
    pub fn mark_map(&self) -> Option<&MarkMap> {
        self.mark
            .as_ref()
            .filter(|m| m.len() == self.granularity(m.axis()))
    }

    pub fn is_marked(&self) -> bool {
        self.mark_map().is_some()
    }

    pub fn mark_mode(&self) -> Option<Axis> {
        self.mark_map().map(MarkMap::axis)
    }

    fn marked_on(&self, axis: Axis, i: usize) -> bool {
        self.mark_map()
            .is_some_and(|m| m.axis() == axis && m.get(i))
    }

    pub fn is_component_marked(&self, comp: usize) -> bool {
        self.marked_on(Axis::Components, comp)
    }

    pub fn is_record_marked(&self, rec: usize) -> bool {
        self.marked_on(Axis::Records, rec)
    }

    pub fn is_block_marked(&self, block: usize) -> bool {
        self.marked_on(Axis::Blocks, block)
    }

    pub fn is_cell_marked(&self, rec: usize, comp: usize) -> bool {
        comp < self.component_count()
            && self.marked_on(Axis::Cells, rec * self.component_count() + comp)
    }

    pub(crate) fn selects_component(&self, comp: usize) -> bool {
        self.mark_mode() != Some(Axis::Components) || self.is_component_marked(comp)
    }

    pub(crate) fn selects_record(&self, rec: usize) -> bool {
        match self.mark_mode() {
            Some(Axis::Records) => self.is_record_marked(rec),
            Some(Axis::Blocks) => {
                let rpb = self.records_per_block();
                rpb > 0 && self.is_block_marked(rec / rpb)
            }
            _ => true,
        }
    }

    pub(crate) fn selects_cell(&self, rec: usize, comp: usize) -> bool {
        match self.mark_mode() {
            Some(Axis::Cells) => self.is_cell_marked(rec, comp),
            _ => self.selects_record(rec) && self.selects_component(comp),
        }
    }

    /// Builds a mark from the truth values (`value as i32 != 0`) in `aux`.
    ///
    /// | `aux` shape | Mark |
    /// |-------------|------|
    /// | 1 × n | components, from row 0 |
    /// | n × 1 | records, from column 0 |
    /// | n × m | cells |
    /// | 1 × 1 | components, with a `DimensionMismatch` warning |
    ///
    /// `pin` overrides the inference. An empty `aux` leaves `self` as is.
    pub fn dmark(&mut self, aux: &Table, pin: Option<Axis>) -> Result<Outcome> {
        if aux.is_empty() {
            return Ok(Outcome::Complete);
        }
        let (ar, ac) = (aux.record_count(), aux.component_count());
        let mut outcome = Outcome::Complete;
        let axis = match pin {
            Some(Axis::Blocks) => {
                table_bail!(BadMarkMode, "cannot derive a block mark from a table")
            }
            Some(axis) => axis,
            None if ar == 1 && ac > 1 => Axis::Components,
            None if ac == 1 && ar > 1 => Axis::Records,
            None if ac > 1 && ar > 1 => Axis::Cells,
            None => {
                outcome = Outcome::warn(
                    ErrorKind::DimensionMismatch,
                    "single-element mark table is ambiguous, marking components",
                );
                Axis::Components
            }
        };
        debug!(%axis, records = ar, components = ac, "dmark");

        let mut map = MarkMap::new(axis, self.granularity(axis));
        let truth = |r: usize, c: usize| aux.dfetch(r, c) as i32 != 0;
        match axis {
            Axis::Components => {
                for c in 0..ac.min(self.component_count()) {
                    map.set(c, truth(0, c));
                }
            }
            Axis::Records => {
                for r in 0..ar.min(self.record_count()) {
                    map.set(r, truth(r, 0));
                }
            }
            Axis::Cells => {
                let ncomp = self.component_count();
                for r in 0..ar.min(self.record_count()) {
                    for c in 0..ac.min(ncomp) {
                        map.set(r * ncomp + c, truth(r, c));
                    }
                }
            }
            Axis::Blocks => {}
        }
        self.mark = Some(map);
        Ok(outcome)
    }

    /// Copies the mark of `src`. The axis it marks must have the same extent
    /// in both tables; otherwise `self` is left as it was.
    pub fn copy_mark(&mut self, src: &Table) -> Result<()> {
        let Some(map) = src.mark_map() else {
            table_bail!(NoMark, "source table is not marked");
        };
        let axis = map.axis();
        let compatible = match axis {
            Axis::Cells => {
                src.component_count() == self.component_count()
                    && src.record_count() == self.record_count()
            }
            _ => src.granularity(axis) == self.granularity(axis),
        };
        table_ensure!(
            compatible,
            DimensionMismatch,
            "cannot copy a {} mark of {} elements onto {}",
            axis,
            map.len(),
            self.granularity(axis)
        );
        self.mark = Some(map.clone());
        Ok(())
    }
}
