//! # Mark Bitset
//!
//! `MarkMap` is a fixed-length bitset tagged with the axis it was built for.
//! Bit `i` lives in byte `i / 8` at position `i % 8`, so a map of `n` bits
//! occupies `⌈n/8⌉` bytes. Maps over at most `MARK_INLINE_BYTES * 8`
//! elements stay inline.

use smallvec::{smallvec, SmallVec};

use crate::config::MARK_INLINE_BYTES;

use super::Axis;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkMap {
    axis: Axis,
    len: usize,
    bits: SmallVec<[u8; MARK_INLINE_BYTES]>,
}

impl MarkMap {
    /// A cleared map of `len` bits.
    pub fn new(axis: Axis, len: usize) -> Self {
        Self {
            axis,
            len,
            bits: smallvec![0; len.div_ceil(8)],
        }
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn get(&self, i: usize) -> bool {
        i < self.len && self.bits[i / 8] & (1 << (i % 8)) != 0
    }

    #[inline]
    pub fn set(&mut self, i: usize, on: bool) {
        if i >= self.len {
            return;
        }
        let mask = 1u8 << (i % 8);
        if on {
            self.bits[i / 8] |= mask;
        } else {
            self.bits[i / 8] &= !mask;
        }
    }

    /// Sets or clears `count` bits from `first`; bits past the end are ignored.
    pub fn set_range(&mut self, first: usize, count: usize, on: bool) {
        let end = first.saturating_add(count).min(self.len);
        for i in first..end {
            self.set(i, on);
        }
    }

    /// Number of set bits.
    pub fn count(&self) -> usize {
        self.bits.iter().map(|b| b.count_ones() as usize).sum()
    }

    pub fn iter_set(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.len).filter(move |&i| self.get(i))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }
}
