//! Tests for the mark module

use super::*;
use crate::error::{kind_of, ErrorKind};
use crate::table::Table;
use crate::types::ElementType;

fn grid(nrec: usize, ncomp: usize) -> Table {
    let mut t = Table::new();
    t.add_ncomps(ElementType::F64, ncomp).unwrap();
    t.allocate(nrec).unwrap();
    t
}

fn truth_table(rows: &[&[f64]]) -> Table {
    let mut t = grid(rows.len(), rows[0].len());
    for (r, row) in rows.iter().enumerate() {
        for (c, v) in row.iter().enumerate() {
            t.dstore(r, c, *v);
        }
    }
    t
}

#[test]
fn map_occupies_one_bit_per_element() {
    let mut m = MarkMap::new(Axis::Records, 17);
    assert_eq!(m.as_bytes().len(), 3);
    m.set_range(15, 5, true);
    assert!(m.get(15) && m.get(16));
    assert!(!m.get(17));
    assert_eq!(m.count(), 2);
    m.set(15, false);
    assert_eq!(m.iter_set().collect::<Vec<_>>(), vec![16]);
}

#[test]
fn marking_records_sets_only_those_bits() {
    let mut t = grid(4, 2);
    t.mark(Axis::Records, 1, 1).unwrap();
    t.mark(Axis::Records, 3, 1).unwrap();

    assert_eq!(t.mark_mode(), Some(Axis::Records));
    let marked: Vec<bool> = (0..4).map(|r| t.is_record_marked(r)).collect();
    assert_eq!(marked, vec![false, true, false, true]);
}

#[test]
fn predicates_ignore_bits_from_another_axis() {
    let mut t = grid(4, 4);
    t.mark(Axis::Components, 0, 2).unwrap();
    assert!(t.is_component_marked(1));
    assert!(!t.is_record_marked(1));
    assert!(!t.is_cell_marked(0, 1));
    assert!(!t.is_block_marked(0));
}

#[test]
fn marking_another_axis_discards_the_old_map() {
    let mut t = grid(4, 4);
    t.mark(Axis::Components, 0, 2).unwrap();
    t.mark(Axis::Records, 3, 1).unwrap();
    assert!(!t.is_component_marked(0));
    assert_eq!(t.mark_map().map(MarkMap::count), Some(1));
}

#[test]
fn out_of_range_mark_fails() {
    let mut t = grid(3, 2);
    let err = t.mark(Axis::Records, 2, 2).unwrap_err();
    assert_eq!(kind_of(&err), Some(ErrorKind::BadIndex));
    assert!(!t.is_marked());
}

#[test]
fn unmark_restores_full_participation() {
    let mut t = grid(3, 2);
    t.mark(Axis::Cells, 1, 1).unwrap();
    assert!(!t.selects_cell(0, 0));
    assert!(t.selects_cell(0, 1));

    t.unmark();
    assert!(!t.is_marked());
    assert!((0..3).all(|r| (0..2).all(|c| t.selects_cell(r, c))));
}

#[test]
fn unmark_range_keeps_the_map() {
    let mut t = grid(5, 1);
    t.mark(Axis::Records, 0, 5).unwrap();
    t.unmark_range(1, 3).unwrap();
    let marked: Vec<bool> = (0..5).map(|r| t.is_record_marked(r)).collect();
    assert_eq!(marked, vec![true, false, false, false, true]);

    t.unmark();
    let err = t.unmark_range(0, 1).unwrap_err();
    assert_eq!(kind_of(&err), Some(ErrorKind::NoMark));
}

#[test]
fn record_mark_goes_stale_when_records_change() {
    let mut t = grid(3, 1);
    t.mark(Axis::Records, 0, 1).unwrap();
    t.add_records(1, 0).unwrap();
    assert!(!t.is_marked());
    assert!(!t.is_record_marked(0));
    assert!(t.selects_record(0));
}

#[test]
fn block_marks_scope_their_records() {
    let mut t = grid(6, 1);
    t.set_block_count(3);
    t.mark(Axis::Blocks, 1, 1).unwrap();
    let selected: Vec<bool> = (0..6).map(|r| t.selects_record(r)).collect();
    assert_eq!(selected, vec![false, false, true, true, false, false]);
}

#[test]
fn dmark_infers_axis_from_shape() {
    let mut t = grid(3, 3);

    t.dmark(&truth_table(&[&[1.0, 0.0, 1.0]]), None).unwrap();
    assert_eq!(t.mark_mode(), Some(Axis::Components));
    assert!(t.is_component_marked(2) && !t.is_component_marked(1));

    t.dmark(&truth_table(&[&[0.0], &[0.7], &[2.0]]), None).unwrap();
    assert_eq!(t.mark_mode(), Some(Axis::Records));
    assert!(!t.is_record_marked(1), "0.7 truncates to 0");
    assert!(t.is_record_marked(2));

    t.dmark(&truth_table(&[&[0.0, 1.0], &[1.0, 0.0]]), None)
        .unwrap();
    assert_eq!(t.mark_mode(), Some(Axis::Cells));
    assert!(t.is_cell_marked(0, 1) && t.is_cell_marked(1, 0));
    assert!(!t.is_cell_marked(0, 0) && !t.is_cell_marked(2, 2));
}

#[test]
fn dmark_single_element_warns_and_marks_components() {
    let mut t = grid(2, 2);
    let outcome = t.dmark(&truth_table(&[&[1.0]]), None).unwrap();
    assert_eq!(outcome.warning(), Some(ErrorKind::DimensionMismatch));
    assert_eq!(t.mark_mode(), Some(Axis::Components));
    assert!(t.is_component_marked(0));

    let outcome = t.dmark(&truth_table(&[&[1.0]]), Some(Axis::Records)).unwrap();
    assert!(outcome.is_complete());
    assert!(t.is_record_marked(0));
}

#[test]
fn copy_mark_requires_matching_extent() {
    let mut src = grid(4, 2);
    src.mark(Axis::Records, 2, 2).unwrap();

    let mut same = grid(4, 5);
    same.copy_mark(&src).unwrap();
    assert!(same.is_record_marked(3));

    let mut other = grid(3, 2);
    other.mark(Axis::Components, 0, 1).unwrap();
    let err = other.copy_mark(&src).unwrap_err();
    assert_eq!(kind_of(&err), Some(ErrorKind::DimensionMismatch));
    assert!(other.is_component_marked(0));

    let err = other.copy_mark(&grid(1, 1)).unwrap_err();
    assert_eq!(kind_of(&err), Some(ErrorKind::NoMark));
}
