//! Fuzz testing for table operations.
//!
//! This fuzz target drives random sequences of structural, arithmetic,
//! string and sort operations against one table and checks the layout
//! invariants after every step, whether the operation succeeded or not.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use datatable::{
    AggregateOp, Axis, Complex, ElementType, Operand, ScalarOp, SortOrder, StringOp, Table,
};

#[derive(Debug, Arbitrary, Clone, Copy)]
enum FuzzType {
    U8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Complex,
    Text(u8),
}

impl From<FuzzType> for ElementType {
    fn from(ft: FuzzType) -> Self {
        match ft {
            FuzzType::U8 => ElementType::U8,
            FuzzType::I16 => ElementType::I16,
            FuzzType::I32 => ElementType::I32,
            FuzzType::I64 => ElementType::I64,
            FuzzType::F32 => ElementType::F32,
            FuzzType::F64 => ElementType::F64,
            FuzzType::Complex => ElementType::COMPLEX,
            FuzzType::Text(w) => ElementType::Symbolic(w.max(1)),
        }
    }
}

#[derive(Debug, Arbitrary, Clone, Copy)]
enum FuzzAxis {
    Components,
    Records,
    Blocks,
    Cells,
}

impl From<FuzzAxis> for Axis {
    fn from(fa: FuzzAxis) -> Self {
        match fa {
            FuzzAxis::Components => Axis::Components,
            FuzzAxis::Records => Axis::Records,
            FuzzAxis::Blocks => Axis::Blocks,
            FuzzAxis::Cells => Axis::Cells,
        }
    }
}

#[derive(Debug, Arbitrary)]
enum TableOperation {
    Store { rec: u8, comp: u8, value: f64 },
    StoreText { rec: u8, comp: u8, text: String },
    Mark { axis: FuzzAxis, first: u8, count: u8 },
    Unmark,
    Blocks(u8),
    Select { axis: FuzzAxis, first: u8, count: u8 },
    Delete { axis: FuzzAxis, first: u8, count: u8 },
    CatSelf,
    JoinSelf,
    Shift { axis: FuzzAxis, n: i8 },
    Rotate { axis: FuzzAxis, n: i8 },
    Reshape { nrec: u8, ncomp: u8 },
    Compress(u8),
    Scalop { op: String, value: f64 },
    Fill { start: f64, delta: f64 },
    Aggregate { op: String, axis: FuzzAxis },
    Strop { op: String, param: String },
    Sort { comp: u8, descending: bool },
    Convert(FuzzType),
}

#[derive(Debug, Arbitrary)]
struct TableInput {
    components: Vec<FuzzType>,
    records: u8,
    operations: Vec<TableOperation>,
}

fn check_invariants(t: &Table) {
    assert!(t.record_count() <= t.capacity());
    let mut offset = 0;
    for (i, comp) in t.layout().components().iter().enumerate() {
        assert_eq!(comp.offset(), offset, "component {i}");
        assert_eq!(comp.size(), comp.ty().size());
        offset += comp.size();
    }
    assert_eq!(t.record_len(), offset);
    assert!(t.block_count() <= t.record_count().max(1));
    assert!(t.records_per_block() * t.block_count() <= t.record_count());
    if let Some(map) = t.mark_map() {
        assert_eq!(map.len(), t.granularity(map.axis()));
        assert_eq!(map.as_bytes().len(), map.len().div_ceil(8));
    }
    let code = t.is_homogeneous();
    let mut types = t.layout().components().iter().map(|c| c.ty().code());
    match types.next() {
        Some(first) if types.all(|c| c == first) => assert_eq!(code, first),
        _ => assert_eq!(code, 0),
    }
}

fn apply(t: &mut Table, op: &TableOperation) {
    let ncomp = t.component_count().max(1);
    let nrec = t.record_count().max(1);
    match op {
        TableOperation::Store { rec, comp, value } => {
            t.dstore(*rec as usize % nrec, *comp as usize % ncomp, *value);
        }
        TableOperation::StoreText { rec, comp, text } => {
            if text.len() <= 512 {
                t.sstore(*rec as usize % nrec, *comp as usize % ncomp, text);
            }
        }
        TableOperation::Mark { axis, first, count } => {
            let _ = t.mark((*axis).into(), *first as usize, *count as usize);
        }
        TableOperation::Unmark => t.unmark(),
        TableOperation::Blocks(n) => {
            let n = *n as usize;
            if n > 0 && t.record_count() % n == 0 {
                t.set_block_count(n);
            }
        }
        TableOperation::Select { axis, first, count } => {
            let _ = t.select(Operand::This, (*axis).into(), *first as usize, Some(*count as usize));
        }
        TableOperation::Delete { axis, first, count } => {
            let _ = t.delete(Operand::This, (*axis).into(), *first as usize, Some(*count as usize));
        }
        TableOperation::CatSelf => {
            if t.record_count() < 1024 {
                let _ = t.cat(Operand::This);
            }
        }
        TableOperation::JoinSelf => {
            if t.component_count() < 64 {
                let _ = t.join(Operand::This);
            }
        }
        TableOperation::Shift { axis, n } => {
            let _ = t.shift(Operand::This, (*axis).into(), *n as isize);
        }
        TableOperation::Rotate { axis, n } => {
            let _ = t.rotate(Operand::This, (*axis).into(), *n as isize);
        }
        TableOperation::Reshape { nrec, ncomp } => {
            let _ = t.reshape(Operand::This, *nrec as usize, *ncomp as usize);
        }
        TableOperation::Compress(comp) => {
            let _ = t.compress(Operand::This, *comp as usize % ncomp);
        }
        TableOperation::Scalop { op, value } => {
            if let Ok(op) = op.parse::<ScalarOp>() {
                let _ = t.scalop(Complex::real(*value), op, None);
            }
        }
        TableOperation::Fill { start, delta } => {
            let _ = t.fill(Complex::real(*start), Complex::real(*delta));
        }
        TableOperation::Aggregate { op, axis } => {
            if let Ok(op) = op.parse::<AggregateOp>() {
                let _ = t.aggregate(Operand::This, None, Complex::ZERO, op, (*axis).into());
            }
        }
        TableOperation::Strop { op, param } => {
            if let Ok(op) = op.parse::<StringOp>() {
                if param.len() <= 64 {
                    let _ = t.strop(Operand::This, param, op);
                }
            }
        }
        TableOperation::Sort { comp, descending } => {
            let order = if *descending { SortOrder::Descending } else { SortOrder::Ascending };
            let _ = t.sort(Operand::This, None, *comp as usize % ncomp, order, false);
        }
        TableOperation::Convert(ty) => {
            let _ = t.tconvert(Operand::This, (*ty).into());
        }
    }
}

fuzz_target!(|input: TableInput| {
    if input.components.len() > 16 || input.operations.len() > 64 {
        return;
    }

    let mut table = Table::new();
    for (i, ty) in input.components.iter().enumerate() {
        let _ = table.add_component(&format!("c{i}"), (*ty).into());
    }
    if table.allocate(input.records as usize).is_err() {
        return;
    }
    check_invariants(&table);

    for op in &input.operations {
        apply(&mut table, op);
        check_invariants(&table);
    }
});
