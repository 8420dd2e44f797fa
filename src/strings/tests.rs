//! Tests for string operations

use crate::error::{kind_of, ErrorKind};
use crate::mark::Axis;
use crate::table::{Operand, Table};
use crate::types::ElementType;

use super::StringOp;

fn labels(values: &[&str], width: usize) -> Table {
    let ty = ElementType::symbolic(width).unwrap();
    let mut t = Table::with_components(&[("lab", ty)], values.len()).unwrap();
    for (r, v) in values.iter().enumerate() {
        t.sstore(r, 0, v);
    }
    t
}

/// Symbolic column `lab` followed by a double column `x`.
fn labeled(values: &[&str], numbers: &[f64]) -> Table {
    let mut t = labels(values, 16);
    let mut x = Table::with_components(&[("x", ElementType::F64)], numbers.len()).unwrap();
    for (r, v) in numbers.iter().enumerate() {
        x.dstore(r, 0, *v);
    }
    let _ = t.join(&x).unwrap();
    t
}

fn strings(t: &Table, comp: usize) -> Vec<String> {
    (0..t.record_count()).map(|r| t.sfetch(r, comp)).collect()
}

fn column(t: &Table, comp: usize) -> Vec<f64> {
    (0..t.record_count()).map(|r| t.dfetch(r, comp)).collect()
}

fn apply(src: &Table, param: &str, op: StringOp) -> Table {
    let mut out = Table::new();
    out.strop(src, param, op).unwrap();
    out
}

#[test]
fn opcodes_parse_by_name() {
    assert_eq!("splitall".parse::<StringOp>().unwrap(), StringOp::SplitAll);
    assert_eq!("upr".parse::<StringOp>().unwrap(), StringOp::Upr);
    assert_eq!(StringOp::Chash.to_string(), "chash");
    let err = "reverse".parse::<StringOp>().unwrap_err();
    assert_eq!(kind_of(&err), Some(ErrorKind::BadOpcode));
}

#[test]
fn len_counts_bytes_and_flags_numbers() {
    let src = labeled(&["abc", ""], &[1.0, 2.0]);
    let out = apply(&src, "", StringOp::Len);
    assert_eq!(out.component_type(0), Some(ElementType::I16));
    assert_eq!(out.component_name(1), Some("x"));
    assert_eq!(column(&out, 0), vec![3.0, 0.0]);
    assert_eq!(column(&out, 1), vec![-1.0, -1.0]);
}

#[test]
fn cmp_and_search_report_per_cell() {
    let src = labels(&["a", "b", "c", "hello"], 8);
    assert_eq!(column(&apply(&src, "b", StringOp::Cmp), 0), vec![1.0, 0.0, -1.0, -1.0]);
    assert_eq!(column(&apply(&src, "lo", StringOp::Search), 0), vec![-1.0, -1.0, -1.0, 3.0]);
}

#[test]
fn crc32_matches_the_check_value() {
    let src = labels(&["123456789"], 16);
    let cells = apply(&src, "", StringOp::Chash);
    assert_eq!(cells.sfetch(0, 0), "CBF43926");

    let whole = apply(&src, "CRC-32", StringOp::Hash);
    assert_eq!(whole.component_name(0), Some("CRC"));
    assert_eq!(whole.record_count(), 1);
    assert_eq!(whole.sfetch(0, 0), "CBF43926");

    let mut out = Table::new();
    let err = out.strop(&src, "MD5", StringOp::Hash).unwrap_err();
    assert_eq!(kind_of(&err), Some(ErrorKind::BadOpcode));
}

#[test]
fn chash_marks_numeric_cells() {
    let src = labeled(&["a"], &[4.0]);
    let out = apply(&src, "", StringOp::Chash);
    assert_eq!(out.sfetch(0, 1), "-1");
}

#[test]
fn case_conversion_leaves_numbers_alone() {
    let src = labeled(&["MiXeD"], &[2.5]);
    let lower = apply(&src, "", StringOp::Lwr);
    assert_eq!(lower.sfetch(0, 0), "mixed");
    assert_eq!(lower.dfetch(0, 1), 2.5);
    assert_eq!(apply(&src, "", StringOp::Upr).sfetch(0, 0), "MIXED");
}

#[test]
fn left_and_right_cut_substrings() {
    let src = labels(&["hello", "hi"], 8);
    assert_eq!(strings(&apply(&src, "2", StringOp::Left), 0), vec!["he", "hi"]);
    assert_eq!(strings(&apply(&src, "-2", StringOp::Left), 0), vec!["hel", ""]);
    assert_eq!(strings(&apply(&src, "2", StringOp::Right), 0), vec!["lo", "hi"]);
    assert_eq!(strings(&apply(&src, "-2", StringOp::Right), 0), vec!["llo", ""]);

    let mut out = Table::new();
    let err = out.strop(&src, "two", StringOp::Left).unwrap_err();
    assert_eq!(kind_of(&err), Some(ErrorKind::BadInitializer));
    let err = out.strop(&src, "300", StringOp::Right).unwrap_err();
    assert_eq!(kind_of(&err), Some(ErrorKind::BadIndex));
}

#[test]
fn replace_uses_the_leading_delimiter() {
    let src = labels(&["hello"], 8);
    assert_eq!(apply(&src, "/l/L/", StringOp::Replace).sfetch(0, 0), "heLLo");
    assert_eq!(apply(&src, "#ll", StringOp::Replace).sfetch(0, 0), "heo");
    assert_eq!(apply(&src, "/l/LLLL", StringOp::Replace).sfetch(0, 0), "heLLLLL");

    let mut out = Table::new();
    let err = out.strop(&src, "/", StringOp::Replace).unwrap_err();
    assert_eq!(kind_of(&err), Some(ErrorKind::BadInitializer));
}

#[test]
fn trim_strips_both_ends() {
    let src = labels(&["- ab -", "---", "a-b"], 8);
    assert_eq!(strings(&apply(&src, " -", StringOp::Trim), 0), vec!["ab", "", "a-b"]);
}

#[test]
fn rcat_appends_records_into_one() {
    let src = labeled(&["ab", "cd", "ef"], &[1.0, 2.0, 3.0]);
    let out = apply(&src, "", StringOp::Rcat);
    assert_eq!(out.record_count(), 1);
    assert_eq!(out.component_type(0), Some(ElementType::Symbolic(7)));
    assert_eq!(out.sfetch(0, 0), "abcdef");
    assert_eq!(out.dfetch(0, 1), 1.0);
}

#[test]
fn rcat_stops_below_the_length_limit() {
    let long = "x".repeat(100);
    let src = labels(&[long.as_str(), long.as_str(), long.as_str()], 128);
    let out = apply(&src, "", StringOp::Rcat);
    assert_eq!(out.sfetch(0, 0).len(), 200);
}

#[test]
fn ccat_joins_the_cells_of_each_record() {
    let src = labeled(&[" ab ", "cd"], &[1.5, 2.0]);
    let out = apply(&src, "|", StringOp::Ccat);
    assert_eq!(out.component_name(0), Some("ccat"));
    assert_eq!(strings(&out, 0), vec!["ab|1.5", "cd|2"]);
}

#[test]
fn split_variants_tokenize_differently() {
    let src = labels(&["a,,b", "c"], 8);

    let out = apply(&src, ",", StringOp::Split);
    assert_eq!(out.component_count(), 2);
    assert_eq!(out.component_name(1), Some("lab"));
    assert_eq!(strings(&out, 0), vec!["a", "c"]);
    assert_eq!(strings(&out, 1), vec!["b", ""]);

    let out = apply(&src, ",", StringOp::SplitAll);
    assert_eq!(out.component_count(), 3);
    assert_eq!(out.sfetch(0, 1), "");
    assert_eq!(out.sfetch(0, 2), "b");

    let out = apply(&labels(&["a;b"], 8), ";", StringOp::SplitD);
    assert_eq!(strings(&out, 0), vec!["a"]);
    assert_eq!(out.sfetch(0, 1), ";");
    assert_eq!(out.sfetch(0, 2), "b");
}

#[test]
fn split_passes_numeric_components_through() {
    let src = labeled(&["x y", "z"], &[7.0, 8.0]);
    let out = apply(&src, " ", StringOp::Split);
    assert_eq!(out.component_count(), 3);
    assert_eq!(out.component_name(2), Some("x"));
    assert_eq!(column(&out, 2), vec![7.0, 8.0]);
}

#[test]
fn splitp_separates_directory_and_file() {
    let src = labels(&["dir/sub/file.txt", "plain", "/root"], 32);
    let out = apply(&src, "", StringOp::SplitP);
    assert_eq!(out.component_count(), 2);
    assert_eq!(strings(&out, 0), vec!["dir/sub", "", ""]);
    assert_eq!(strings(&out, 1), vec!["file.txt", "plain", "root"]);
}

#[test]
fn marked_records_are_the_only_ones_transformed() {
    let mut src = labels(&["ab", "cd", "ef", "gh"], 4);
    src.mark(Axis::Records, 1, 2).unwrap();
    let out = apply(&src, "", StringOp::Upr);
    assert_eq!(strings(&out, 0), vec!["ab", "CD", "EF", "gh"]);
    assert!(out.is_record_marked(1));
    assert!(!out.is_record_marked(0));
}

#[test]
fn marked_components_are_split_in_place() {
    let mut src = labels(&["p,q"], 8);
    let _ = src.join(&labels(&["r,s"], 8)).unwrap();
    src.mark(Axis::Components, 1, 1).unwrap();
    let out = apply(&src, ",", StringOp::Split);
    assert_eq!(out.component_count(), 3);
    assert_eq!(out.sfetch(0, 0), "p,q");
    assert_eq!(out.sfetch(0, 1), "r");
    assert_eq!(out.sfetch(0, 2), "s");
    assert!(!out.is_marked());
}

#[test]
fn block_and_cell_marks_are_rejected() {
    let mut src = labels(&["a", "b"], 4);
    src.mark(Axis::Cells, 0, 1).unwrap();
    let mut out = Table::new();
    let err = out.strop(&src, "", StringOp::Lwr).unwrap_err();
    assert_eq!(kind_of(&err), Some(ErrorKind::BadMarkMode));

    src.set_block_count(2);
    src.mark(Axis::Blocks, 1, 1).unwrap();
    let err = out.strop(&src, "", StringOp::Lwr).unwrap_err();
    assert_eq!(kind_of(&err), Some(ErrorKind::BadMarkMode));
}

#[test]
fn strop_in_place_rewrites_the_table() {
    let mut t = labels(&["quiet"], 8);
    t.strop(Operand::This, "", StringOp::Upr).unwrap();
    assert_eq!(t.sfetch(0, 0), "QUIET");
}

#[test]
fn checksum_covers_every_cell_byte() {
    let mut digits = Table::with_components(&[("d", ElementType::U8)], 9).unwrap();
    for (r, b) in b"123456789".iter().enumerate() {
        digits.dstore(r, 0, *b as f64);
    }
    assert_eq!(digits.checksum(None), 0xCBF4_3926);

    let mut wider = digits.clone();
    let _ = wider.join(&labels(&["a"; 9], 4)).unwrap();
    assert_ne!(wider.checksum(None), digits.checksum(None));
    assert_eq!(wider.checksum(Some(1)), digits.checksum(None));
}
