//! # Record Layout
//!
//! A `Layout` is the ordered list of component descriptors with pre-computed
//! byte offsets, so that cell addressing is a multiply and an add.
//!
//! ## Invariants
//!
//! - `reclen == Σ component.size`
//! - `component[i].offset == Σ_{j<i} component[j].size`
//!
//! Both are re-established by every mutating method.

use crate::types::ElementType;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub(crate) name: String,
    pub(crate) ty: ElementType,
    pub(crate) offset: usize,
}

impl Component {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> ElementType {
        self.ty
    }

    pub fn size(&self) -> usize {
        self.ty.size()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    components: Vec<Component>,
    reclen: usize,
}

impl Layout {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn record_len(&self) -> usize {
        self.reclen
    }

    pub fn get(&self, idx: usize) -> Option<&Component> {
        self.components.get(idx)
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.components.iter().position(|c| c.name == name)
    }

    /// Same component types in the same order. Names are ignored.
    pub fn same_structure(&self, other: &Layout) -> bool {
        self.components.len() == other.components.len()
            && self
                .components
                .iter()
                .zip(&other.components)
                .all(|(a, b)| a.ty == b.ty)
    }

    pub(crate) fn insert(&mut self, at: usize, name: String, ty: ElementType) {
        let at = at.min(self.components.len());
        self.components.insert(
            at,
            Component {
                name,
                ty,
                offset: 0,
            },
        );
        self.recompute();
    }

    pub(crate) fn remove(&mut self, first: usize, count: usize) {
        let end = (first + count).min(self.components.len());
        if first < end {
            self.components.drain(first..end);
            self.recompute();
        }
    }

    pub(crate) fn rename(&mut self, idx: usize, name: String) {
        if let Some(c) = self.components.get_mut(idx) {
            c.name = name;
        }
    }

    pub(crate) fn retype(&mut self, idx: usize, ty: ElementType) {
        if let Some(c) = self.components.get_mut(idx) {
            c.ty = ty;
            self.recompute();
        }
    }

    fn recompute(&mut self) {
        let mut offset = 0;
        for c in &mut self.components {
            c.offset = offset;
            offset += c.ty.size();
        }
        self.reclen = offset;
    }
}
