//! Tests for the arithmetic engine

use super::kernels;
use super::reduce::reduce;
use super::{AggregateOp, ScalarOp};
use crate::error::{kind_of, ErrorKind};
use crate::mark::Axis;
use crate::table::Table;
use crate::types::{Complex, ElementType};

fn numbers(values: &[f64]) -> Table {
    let mut t = Table::with_components(&[("x", ElementType::F64)], values.len()).unwrap();
    for (r, v) in values.iter().enumerate() {
        t.dstore(r, 0, *v);
    }
    t
}

fn matrix(rows: &[&[f64]]) -> Table {
    let mut t = Table::new();
    t.add_ncomps(ElementType::F64, rows[0].len()).unwrap();
    t.allocate(rows.len()).unwrap();
    for (r, row) in rows.iter().enumerate() {
        for (c, v) in row.iter().enumerate() {
            t.dstore(r, c, *v);
        }
    }
    t
}

fn column(t: &Table, comp: usize) -> Vec<f64> {
    (0..t.record_count()).map(|r| t.dfetch(r, comp)).collect()
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ============================================================================
// Opcodes and kernels
// ============================================================================

#[test]
fn opcodes_parse_from_names_and_symbols() {
    assert_eq!("add".parse::<ScalarOp>().unwrap(), ScalarOp::Add);
    assert_eq!("+".parse::<ScalarOp>().unwrap(), ScalarOp::Add);
    assert_eq!("<=".parse::<ScalarOp>().unwrap(), ScalarOp::Leq);
    assert_eq!("!".parse::<ScalarOp>().unwrap(), ScalarOp::Factorial);
    assert_eq!("med".parse::<AggregateOp>().unwrap(), AggregateOp::Median);
    assert_eq!(ScalarOp::QAbsDiff.to_string(), "qabsdiff");

    let err = "plus".parse::<ScalarOp>().unwrap_err();
    assert_eq!(kind_of(&err), Some(ErrorKind::BadOpcode));
    let err = "average".parse::<AggregateOp>().unwrap_err();
    assert_eq!(kind_of(&err), Some(ErrorKind::NoSupport));
}

#[test]
fn real_kernel_matches_reference_formulas() {
    assert_eq!(kernels::real(5.0, 0.0, ScalarOp::Factorial), 120.0);
    assert_eq!(kernels::real(5.0, 2.0, ScalarOp::Over), 10.0);
    assert_eq!(kernels::real(0.0, 0.0, ScalarOp::Sinc), 1.0);
    assert_eq!(kernels::real(7.0, 3.0, ScalarOp::Mod), 1.0);
    assert_eq!(kernels::real(-7.0, 3.0, ScalarOp::Mod), -1.0);
    assert!(kernels::real(7.0, 0.0, ScalarOp::Mod).is_nan());
    assert_eq!(kernels::real(2.5, 9.0, ScalarOp::Set), 9.0);
    assert_eq!(kernels::real(-3.7, 0.0, ScalarOp::Ent), -3.0);
    assert_eq!(kernels::real(6.0, 3.0, ScalarOp::BitAnd), 2.0);
    assert!(close(kernels::real(1.0, 1.0, ScalarOp::LsAdd), 1.0 - 2f64.ln()));
    assert!(close(kernels::real(1.0, 1.0, ScalarOp::ExpAdd), 1.0 + 2f64.ln()));
}

#[test]
fn factorial_and_binomial_stay_bounded_on_large_inputs() {
    assert_eq!(kernels::real(-4.0, 0.0, ScalarOp::Factorial), 1.0);
    assert!(kernels::real(170.0, 0.0, ScalarOp::Factorial).is_finite());
    assert_eq!(kernels::real(171.0, 0.0, ScalarOp::Factorial), f64::INFINITY);
    assert_eq!(kernels::real(1e12, 0.0, ScalarOp::Factorial), f64::INFINITY);

    assert_eq!(kernels::real(1e12, 1.0, ScalarOp::Over), 1e12);
    assert_eq!(kernels::real(1e12, 5e11, ScalarOp::Over), f64::INFINITY);
    let c = kernels::real(400.0, 200.0, ScalarOp::Over);
    assert!((c.ln() - 274.0367).abs() < 1e-3, "ln C(400, 200) = {}", c.ln());

    let mut t = numbers(&[1e12]);
    t.scalop(Complex::ZERO, ScalarOp::Factorial, None).unwrap();
    assert_eq!(t.dfetch(0, 0), f64::INFINITY);
}

#[test]
fn real_kernel_nan_rules() {
    assert_eq!(kernels::real(f64::NAN, 1.0, ScalarOp::Less), 0.0);
    assert_eq!(kernels::real(1.0, f64::NAN, ScalarOp::Geq), 0.0);
    assert!(kernels::real(f64::NAN, 1.0, ScalarOp::Max).is_nan());
    assert!(kernels::real(1.0, f64::NAN, ScalarOp::SMin).is_nan());
    assert!(kernels::real(f64::NAN, 0.0, ScalarOp::Round).is_nan());
    assert_eq!(kernels::real(f64::NAN, 0.0, ScalarOp::IsNan), 1.0);
}

#[test]
fn complex_kernel_orders_by_real_part() {
    let a = Complex::new(1.0, 100.0);
    let b = Complex::real(2.0);
    assert_eq!(kernels::complex(a, b, ScalarOp::Less), Complex::real(1.0));
    assert_eq!(kernels::complex(a, b, ScalarOp::Max), b);
    assert_eq!(kernels::complex(a, b, ScalarOp::SMax), a);
    assert_eq!(kernels::complex(a, a, ScalarOp::Eq), Complex::real(1.0));
    assert_eq!(
        kernels::complex(Complex::new(1.0, 1.0), Complex::new(0.0, 1.0), ScalarOp::Mult),
        Complex::new(-1.0, 1.0)
    );
    let q = kernels::complex(Complex::new(3.0, 4.0), Complex::ZERO, ScalarOp::QAbsDiff);
    assert!(close(q.re, 25.0) && close(q.im, 0.0));
}

// ============================================================================
// scalop and fill
// ============================================================================

#[test]
fn fill_counts_up_from_start() {
    let mut t = numbers(&[0.0; 5]);
    t.fill(Complex::ZERO, Complex::real(1.0)).unwrap();
    assert_eq!(column(&t, 0), vec![0.0, 1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn fill_advances_only_on_marked_records() {
    let mut t = Table::new();
    t.add_component("lab", ElementType::symbolic(4).unwrap()).unwrap();
    t.add_component("x", ElementType::F64).unwrap();
    t.allocate(3).unwrap();
    t.sstore(1, 0, "abc");
    t.dstore(1, 1, -1.0);
    t.mark(Axis::Records, 0, 1).unwrap();
    t.mark(Axis::Records, 2, 1).unwrap();

    t.fill(Complex::real(10.0), Complex::real(5.0)).unwrap();
    assert_eq!(column(&t, 1), vec![10.0, -1.0, 15.0]);
    assert_eq!(t.sfetch(1, 0), "abc");
}

#[test]
fn fill_rejects_block_marks_and_empty_tables() {
    let mut t = numbers(&[0.0; 4]);
    t.set_block_count(2);
    t.mark(Axis::Blocks, 0, 1).unwrap();
    let err = t.fill(Complex::ZERO, Complex::ONE).unwrap_err();
    assert_eq!(kind_of(&err), Some(ErrorKind::BadMarkMode));

    let mut empty = Table::new();
    let err = empty.fill(Complex::ZERO, Complex::ONE).unwrap_err();
    assert_eq!(kind_of(&err), Some(ErrorKind::Empty));
}

#[test]
fn scalop_touches_only_marked_records() {
    let mut t = matrix(&[&[1.0, 2.0], &[3.0, 4.0], &[5.0, 6.0], &[7.0, 8.0]]);
    t.mark(Axis::Records, 1, 1).unwrap();
    t.mark(Axis::Records, 3, 1).unwrap();

    t.scalop(Complex::real(10.0), ScalarOp::Add, None).unwrap();
    assert_eq!(column(&t, 0), vec![1.0, 13.0, 5.0, 17.0]);
    assert_eq!(column(&t, 1), vec![2.0, 14.0, 6.0, 18.0]);
}

#[test]
fn scalop_on_one_component() {
    let mut t = matrix(&[&[1.0, 2.0], &[3.0, 4.0]]);
    t.scalop(Complex::real(2.0), "*".parse().unwrap(), Some(1)).unwrap();
    assert_eq!(column(&t, 0), vec![1.0, 3.0]);
    assert_eq!(column(&t, 1), vec![4.0, 8.0]);
}

#[test]
fn scalop_keeps_integral_storage() {
    let mut t = Table::with_components(&[("small", ElementType::I8), ("int", ElementType::I32)], 1)
        .unwrap();
    t.dstore(0, 0, 100.0);
    t.dstore(0, 1, 7.0);

    t.scalop(Complex::real(100.0), ScalarOp::Add, Some(0)).unwrap();
    t.scalop(Complex::real(2.0), ScalarOp::Div, Some(1)).unwrap();
    assert_eq!(t.fetch_i8(0, 0), Some(127));
    assert_eq!(t.fetch_i32(0, 1), Some(3));
}

#[test]
fn scalop_uses_complex_arithmetic_for_complex_operands() {
    let mut t = Table::with_components(&[("z", ElementType::COMPLEX), ("x", ElementType::F64)], 1)
        .unwrap();
    t.cstore(0, 0, Complex::new(1.0, 1.0));
    t.dstore(0, 1, 2.0);

    t.scalop(Complex::new(0.0, 1.0), ScalarOp::Mult, Some(0)).unwrap();
    t.scalop(Complex::new(1.0, 5.0), ScalarOp::Add, Some(1)).unwrap();
    assert_eq!(t.cfetch(0, 0), Complex::new(-1.0, 1.0));
    assert_eq!(t.cfetch(0, 1), Complex::real(3.0));
}

#[test]
fn scalop_rejects_symbolic_component() {
    let mut t = Table::with_components(&[("lab", ElementType::symbolic(8).unwrap())], 2).unwrap();
    let err = t.scalop(Complex::ONE, ScalarOp::Add, Some(0)).unwrap_err();
    assert_eq!(kind_of(&err), Some(ErrorKind::Homogeneity));
    let err = t.scalop(Complex::ONE, ScalarOp::Add, Some(3)).unwrap_err();
    assert_eq!(kind_of(&err), Some(ErrorKind::BadComponent));
}

#[test]
fn forced_noise_dithers_stored_values() {
    let mut t = numbers(&[0.0; 8]);
    t.set_noise(Some(7));
    t.scalop(Complex::real(5.0), ScalarOp::Set, None).unwrap();

    let values = column(&t, 0);
    assert!(values.iter().all(|v| (5.0..6.0).contains(v)));
    assert!(values.iter().any(|&v| v != 5.0));

    t.clear_noise();
    t.scalop(Complex::real(5.0), ScalarOp::Set, None).unwrap();
    assert_eq!(column(&t, 0), vec![5.0; 8]);
}

// ============================================================================
// scalop_table
// ============================================================================

#[test]
fn scalop_table_broadcasts_a_scalar() {
    let src = matrix(&[&[1.0, 2.0], &[3.0, 4.0]]);
    let k = numbers(&[10.0]);
    let mut t = Table::new();
    let outcome = t.scalop_table(&src, Some(&k), ScalarOp::Add, None).unwrap();
    assert!(outcome.is_complete());
    assert_eq!(column(&t, 0), vec![11.0, 13.0]);
    assert_eq!(column(&t, 1), vec![12.0, 14.0]);
}

#[test]
fn scalop_table_broadcasts_a_row_per_component() {
    let src = matrix(&[&[1.0, 2.0], &[3.0, 4.0]]);
    let k = matrix(&[&[1.0, 100.0]]);
    let mut t = Table::new();
    let outcome = t.scalop_table(&src, Some(&k), ScalarOp::Mult, None).unwrap();
    assert!(outcome.is_complete());
    assert_eq!(column(&t, 0), vec![1.0, 3.0]);
    assert_eq!(column(&t, 1), vec![200.0, 400.0]);
}

#[test]
fn scalop_table_column_operand_follows_blocks() {
    let mut src = numbers(&[0.0, 1.0, 2.0, 3.0]);
    src.set_block_count(2);
    let k = numbers(&[10.0, 20.0]);
    let mut t = Table::new();
    let outcome = t.scalop_table(&src, Some(&k), ScalarOp::Add, None).unwrap();
    assert!(outcome.is_complete());
    assert_eq!(column(&t, 0), vec![10.0, 11.0, 22.0, 23.0]);
}

#[test]
fn scalop_table_pads_short_column_with_zeros() {
    let src = numbers(&[1.0, 2.0, 3.0]);
    let k = numbers(&[5.0, 5.0]);
    let mut t = Table::new();
    let outcome = t.scalop_table(&src, Some(&k), ScalarOp::Add, None).unwrap();
    assert_eq!(outcome.warning(), Some(ErrorKind::DimensionMismatch));
    assert_eq!(column(&t, 0), vec![6.0, 7.0, 3.0]);
}

#[test]
fn scalop_table_elementwise_and_in_place() {
    let mut t = matrix(&[&[1.0, 2.0], &[3.0, 4.0]]);
    let k = matrix(&[&[1.0, 1.0], &[2.0, 2.0], &[9.0, 9.0]]);
    let outcome = t
        .scalop_table(crate::table::Operand::This, Some(&k), ScalarOp::Diff, None)
        .unwrap();
    assert_eq!(outcome.warning(), Some(ErrorKind::DimensionMismatch));
    assert_eq!(column(&t, 0), vec![0.0, 1.0]);
    assert_eq!(column(&t, 1), vec![1.0, 2.0]);
}

#[test]
fn scalop_table_without_operand_uses_zero() {
    let src = numbers(&[-1.0, 2.0]);
    let mut t = Table::new();
    let outcome = t.scalop_table(&src, None, ScalarOp::Max, None).unwrap();
    assert!(outcome.is_complete());
    assert_eq!(column(&t, 0), vec![0.0, 2.0]);
}

// ============================================================================
// Reducers
// ============================================================================

#[test]
fn reduce_statistics() {
    let xs = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    assert!(close(reduce(&xs, None, 0.0, AggregateOp::Var), 32.0 / 7.0));
    assert!(close(reduce(&xs, None, 0.0, AggregateOp::Sdev), (32.0f64 / 7.0).sqrt()));
    assert_eq!(reduce(&xs, None, 0.0, AggregateOp::Span), 7.0);
    assert_eq!(reduce(&xs, None, 0.0, AggregateOp::Diff), -7.0);
    assert!(close(reduce(&xs, None, 2.0, AggregateOp::Mink), 232f64.sqrt()));
    assert!(close(reduce(&xs, None, 2.0, AggregateOp::MinkPow), 232.0));
    assert!(close(reduce(&xs, None, 2.0, AggregateOp::CMoment), 4.0));

    let sym = [-1.0, 1.0, -1.0, 1.0];
    assert!(close(reduce(&sym, None, 0.0, AggregateOp::Exc), -2.0));
    assert!(close(reduce(&sym, None, 0.0, AggregateOp::Skew), 0.0));
}

#[test]
fn reduce_order_statistics() {
    let xs = [3.0, 1.0, 2.0, 5.0, 4.0];
    assert_eq!(reduce(&xs, None, 0.0, AggregateOp::Median), 3.0);
    assert_eq!(reduce(&xs, None, 0.0, AggregateOp::Rank), 1.0);
    assert_eq!(reduce(&xs, None, 4.0, AggregateOp::Rank), 5.0);
    assert_eq!(reduce(&xs, None, 9.0, AggregateOp::Rank), 5.0);
    assert_eq!(reduce(&xs, None, 0.0, AggregateOp::Quartile), 2.0);

    let ys = [1.0, 9.0, 3.0, 9.0];
    assert_eq!(reduce(&ys, None, 0.0, AggregateOp::IMax), 1.0);
    assert_eq!(reduce(&ys, None, 0.0, AggregateOp::IMin), 0.0);
}

#[test]
fn reduce_means() {
    let xs = [1.0, 2.0, 4.0];
    assert!(close(reduce(&xs, None, 0.0, AggregateOp::GMean), 2.0));
    assert!(close(reduce(&xs, None, 0.0, AggregateOp::HMean), 3.0 / 1.75));
    assert!(close(reduce(&xs, None, 0.0, AggregateOp::QMean), 7.0));
    assert!(close(reduce(&[-2.0, 2.0], None, 0.0, AggregateOp::AMean), 2.0));
}

#[test]
fn reduce_log_semiring_sum() {
    let xs = [0.0, 0.0];
    assert!(close(reduce(&xs, None, 0.0, AggregateOp::LsSum), -(2f64.ln())));
    assert!(close(reduce(&xs, None, 0.0, AggregateOp::LsMean), 0.0));

    let excluded = [0.0, f32::MAX as f64];
    assert!(close(reduce(&xs, Some(&excluded[..]), 0.0, AggregateOp::LsSum), 0.0));
}

#[test]
fn reduce_weights_scale_values() {
    let xs = [1.0, 2.0, 3.0];
    assert_eq!(reduce(&xs, Some(&[1.0, 0.0, 2.0][..]), 0.0, AggregateOp::Sum), 7.0);
    assert_eq!(reduce(&xs, Some(&[1.0, 0.0, 2.0][..]), 0.0, AggregateOp::Prod), 0.0);
}

#[test]
fn reduce_complex_window() {
    let zs = [Complex::new(1.0, 1.0), Complex::new(2.0, -3.0)];
    assert_eq!(reduce(&zs, None, Complex::ZERO, AggregateOp::Sum), Complex::new(3.0, -2.0));
    assert_eq!(reduce(&zs, None, Complex::ZERO, AggregateOp::Max), Complex::new(2.0, -3.0));
    assert_eq!(reduce(&zs, None, Complex::ZERO, AggregateOp::Mean), Complex::new(1.5, -1.0));
}

// ============================================================================
// aggregate
// ============================================================================

#[test]
fn component_aggregation_matches_cell_loop() {
    let src = matrix(&[&[1.0, 5.0, 3.0], &[-2.0, 0.0, 4.0], &[7.0, 7.0, 1.0]]);
    for op in [AggregateOp::Sum, AggregateOp::Min, AggregateOp::Max, AggregateOp::Mean] {
        let mut t = Table::new();
        t.aggregate(&src, None, Complex::ZERO, op, Axis::Components).unwrap();
        assert_eq!(t.component_count(), 1);
        assert_eq!(t.component_name(0), Some("aggr"));

        for r in 0..src.record_count() {
            let cells: Vec<f64> = (0..src.component_count()).map(|c| src.dfetch(r, c)).collect();
            let expected = match op {
                AggregateOp::Sum => cells.iter().sum(),
                AggregateOp::Min => cells.iter().copied().fold(f64::INFINITY, f64::min),
                AggregateOp::Max => cells.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                _ => cells.iter().sum::<f64>() / cells.len() as f64,
            };
            assert!(close(t.dfetch(r, 0), expected), "{} of record {}", op, r);
        }
    }
}

#[test]
fn component_aggregation_carries_single_label_column() {
    let mut src = Table::new();
    src.add_component("lab", ElementType::symbolic(8).unwrap()).unwrap();
    src.add_component("a", ElementType::I32).unwrap();
    src.add_component("b", ElementType::F64).unwrap();
    src.allocate(2).unwrap();
    src.init_from_str("one 1 2.5 two 3 4", 0, 0, None).unwrap();

    let mut t = Table::new();
    t.aggregate(&src, None, Complex::ZERO, AggregateOp::Sum, Axis::Components)
        .unwrap();
    assert_eq!(t.component_count(), 2);
    assert_eq!(t.component_type(0), Some(ElementType::F64));
    assert_eq!(column(&t, 0), vec![3.5, 7.0]);
    assert_eq!(t.sfetch(0, 1), "one");
    assert_eq!(t.sfetch(1, 1), "two");
}

#[test]
fn complex_param_selects_complex_result() {
    let src = matrix(&[&[1.0, 2.0]]);
    let mut t = Table::new();
    t.aggregate(&src, None, Complex::new(2.0, 1.0), AggregateOp::Sum, Axis::Components)
        .unwrap();
    assert_eq!(t.component_type(0), Some(ElementType::COMPLEX));
    assert_eq!(t.cfetch(0, 0), Complex::real(3.0));
}

#[test]
fn record_aggregation_reduces_each_block() {
    let mut src = matrix(&[
        &[0.0, 10.0],
        &[1.0, 20.0],
        &[2.0, 30.0],
        &[3.0, 40.0],
        &[4.0, 50.0],
        &[5.0, 60.0],
    ]);
    src.set_block_count(3);

    let mut t = Table::new();
    t.aggregate(&src, None, Complex::ZERO, AggregateOp::Sum, Axis::Records)
        .unwrap();
    assert_eq!(t.record_count(), 3);
    assert_eq!(column(&t, 0), vec![1.0, 5.0, 9.0]);
    assert_eq!(column(&t, 1), vec![30.0, 70.0, 110.0]);

    t.aggregate(&src, None, Complex::ZERO, AggregateOp::Max, Axis::Blocks)
        .unwrap();
    assert_eq!(t.record_count(), 2);
    assert_eq!(column(&t, 0), vec![4.0, 5.0]);
    assert_eq!(column(&t, 1), vec![50.0, 60.0]);
}

#[test]
fn aggregation_without_blocks_reduces_whole_columns() {
    let src = numbers(&[2.0, 4.0, 9.0]);
    let mut t = Table::new();
    t.aggregate(&src, None, Complex::ZERO, AggregateOp::Mean, Axis::Records)
        .unwrap();
    assert_eq!(column(&t, 0), vec![5.0]);
}

#[test]
fn masked_aggregation_weights_the_window() {
    let src = matrix(&[&[1.0, 2.0, 3.0]]);
    let mask = numbers(&[1.0, 0.0, 2.0]);
    let mut t = Table::new();
    t.aggregate(&src, Some(&mask), Complex::ZERO, AggregateOp::Sum, Axis::Components)
        .unwrap();
    assert_eq!(t.dfetch(0, 0), 7.0);

    let short = numbers(&[1.0, 1.0]);
    let err = t
        .aggregate(&src, Some(&short), Complex::ZERO, AggregateOp::Sum, Axis::Components)
        .unwrap_err();
    assert_eq!(kind_of(&err), Some(ErrorKind::DimensionMismatch));
    assert_eq!(t.dfetch(0, 0), 7.0);
}

#[test]
fn aggregation_rejects_empty_sources_and_cells() {
    let mut t = Table::new();
    let err = t
        .aggregate(&Table::new(), None, Complex::ZERO, AggregateOp::Sum, Axis::Records)
        .unwrap_err();
    assert_eq!(kind_of(&err), Some(ErrorKind::Empty));

    let src = numbers(&[1.0]);
    let err = t
        .aggregate(&src, None, Complex::ZERO, AggregateOp::Sum, Axis::Cells)
        .unwrap_err();
    assert_eq!(kind_of(&err), Some(ErrorKind::NoSupport));
}

// ============================================================================
// Quantization
// ============================================================================

#[test]
fn quantize_round_trip_stays_within_one_step() {
    let src = matrix(&[&[-1.0, 10.0], &[0.25, 20.0], &[1.0, 35.0]]);
    let mut packed = Table::new();
    packed.quantize(&src).unwrap();

    assert_eq!(packed.record_count(), 5);
    assert!((0..2).all(|c| packed.component_type(c) == Some(ElementType::I16)));
    assert_eq!(packed.component_name(1), src.component_name(1));
    assert_eq!(packed.descriptors().realization_text, "compressed");
    assert_eq!(packed.fetch_record(0, None), vec![Complex::ZERO, Complex::real(22.0)]);
    assert_eq!(column(&packed, 0)[1], 32767.0);
    assert_eq!(column(&packed, 1)[1], 2520.0);

    let mut back = Table::new();
    back.dequantize(&packed).unwrap();
    assert_eq!(back.record_count(), 3);
    assert_eq!(back.component_type(0), Some(ElementType::F64));
    assert_eq!(back.descriptors().realization_text, "uncompressed");
    for c in 0..2 {
        for (got, want) in column(&back, c).iter().zip(column(&src, c)) {
            assert!((got - want).abs() < 1e-3, "component {c}: {got} vs {want}");
        }
    }
}

#[test]
fn quantize_keeps_a_unit_scale_for_wide_ranges() {
    let mut packed = Table::new();
    packed.quantize(&numbers(&[-100_000.0, 100_000.0])).unwrap();
    assert_eq!(column(&packed, 0), vec![0.0, 1.0, -32768.0, 32767.0]);

    let mut back = Table::new();
    back.dequantize(&packed).unwrap();
    assert_eq!(column(&back, 0), vec![-32768.0, 32767.0]);
}

#[test]
fn quantize_rejects_labels_and_short_inputs() {
    let mut t = Table::with_components(&[("lab", ElementType::symbolic(4).unwrap())], 2).unwrap();
    t.sstore(0, 0, "a");
    let err = Table::new().quantize(&t).unwrap_err();
    assert_eq!(kind_of(&err), Some(ErrorKind::Homogeneity));

    let err = Table::new().quantize(&Table::new()).unwrap_err();
    assert_eq!(kind_of(&err), Some(ErrorKind::Empty));

    let err = Table::new().dequantize(&numbers(&[3.0])).unwrap_err();
    assert_eq!(kind_of(&err), Some(ErrorKind::DimensionMismatch));
}
