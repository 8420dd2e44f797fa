//! Tests for the types module

use super::*;

#[test]
fn type_codes_round_trip_through_from_code() {
    for kind in NumericKind::ALL {
        let ty = ElementType::Numeric(kind);
        assert_eq!(ElementType::from_code(ty.code()).unwrap(), ty);
    }
    assert_eq!(
        ElementType::from_code(12).unwrap(),
        ElementType::Symbolic(12)
    );
    assert_eq!(
        ElementType::from_code(6000).unwrap(),
        ElementType::Pointer
    );
}

#[test]
fn from_code_rejects_zero_and_unknown_codes() {
    assert!(ElementType::from_code(0).is_err());
    assert!(ElementType::from_code(256).is_err());
    assert!(ElementType::from_code(4242).is_err());
}

#[test]
fn element_type_parses_names_and_aliases() {
    assert_eq!("double".parse::<ElementType>().unwrap(), ElementType::F64);
    assert_eq!("unsigned char".parse::<ElementType>().unwrap(), ElementType::U8);
    assert_eq!("I32".parse::<ElementType>().unwrap(), ElementType::I32);
    assert_eq!(
        "char[16]".parse::<ElementType>().unwrap(),
        ElementType::Symbolic(16)
    );
    assert!("char[0]".parse::<ElementType>().is_err());
    assert!("quaternion".parse::<ElementType>().is_err());
}

#[test]
fn sizes_match_storage_widths() {
    assert_eq!(ElementType::BOOL.size(), 1);
    assert_eq!(ElementType::I16.size(), 2);
    assert_eq!(ElementType::F32.size(), 4);
    assert_eq!(ElementType::U64.size(), 8);
    assert_eq!(ElementType::COMPLEX.size(), 16);
    assert_eq!(ElementType::Symbolic(255).size(), 255);
    assert_eq!(ElementType::Pointer.size(), 8);
}

#[test]
fn pointer_is_neither_numeric_nor_symbolic() {
    assert!(!ElementType::Pointer.is_numeric());
    assert!(!ElementType::Pointer.is_symbolic());
}

#[test]
fn integer_stores_saturate_and_truncate() {
    let mut cell = [0u8; 2];
    NumericKind::I16.store(&mut cell, Complex::real(1e9));
    assert_eq!(NumericKind::I16.load(&cell).re, i16::MAX as f64);

    NumericKind::I16.store(&mut cell, Complex::real(-2.9));
    assert_eq!(NumericKind::I16.load(&cell).re, -2.0);

    let mut byte = [0u8; 1];
    NumericKind::U8.store(&mut byte, Complex::real(-5.0));
    assert_eq!(byte[0], 0);
    NumericKind::U8.store(&mut byte, Complex::real(f64::NAN));
    assert_eq!(byte[0], 0);
}

#[test]
fn bool_store_normalizes_nonzero_to_one() {
    let mut cell = [0u8; 1];
    NumericKind::Bool.store(&mut cell, Complex::real(-3.5));
    assert_eq!(cell[0], 1);
    NumericKind::Bool.store(&mut cell, Complex::ZERO);
    assert_eq!(cell[0], 0);
}

#[test]
fn complex_cells_keep_both_parts_while_real_cells_drop_imaginary() {
    let v = Complex::new(1.5, -2.5);
    let mut wide = [0u8; 16];
    NumericKind::Complex.store(&mut wide, v);
    assert_eq!(NumericKind::Complex.load(&wide), v);

    let mut narrow = [0u8; 8];
    NumericKind::F64.store(&mut narrow, v);
    assert_eq!(NumericKind::F64.load(&narrow), Complex::real(1.5));
}

#[test]
fn cells_are_little_endian() {
    let mut cell = [0u8; 4];
    NumericKind::U32.store(&mut cell, Complex::real(0x0102_0304 as f64));
    assert_eq!(cell, [0x04, 0x03, 0x02, 0x01]);
}

#[test]
fn complex_ordering_uses_real_part() {
    let a = Complex::new(1.0, 100.0);
    let b = Complex::new(2.0, -100.0);
    assert!(a.less(b));
    assert!(b.greater(a));
    assert_ne!(Complex::new(1.0, 1.0), Complex::new(1.0, 2.0));
}

#[test]
fn complex_arithmetic_matches_textbook_identities() {
    let z = Complex::new(3.0, 4.0);
    assert_eq!(z.abs(), 5.0);
    let q = z / z;
    assert!((q.re - 1.0).abs() < 1e-12 && q.im.abs() < 1e-12);
    let s = Complex::new(-4.0, 0.0).sqrt();
    assert!(s.re.abs() < 1e-12 && (s.im - 2.0).abs() < 1e-12);
    let e = Complex::new(0.0, std::f64::consts::PI).exp();
    assert!((e.re + 1.0).abs() < 1e-12);
    let w = Complex::new(0.3, 0.2);
    let back = w.sin().asin();
    assert!((back.re - w.re).abs() < 1e-9 && (back.im - w.im).abs() < 1e-9);
}

#[test]
fn real_power_stays_real() {
    let p = Complex::real(2.0).powc(Complex::real(10.0));
    assert_eq!(p, Complex::real(1024.0));
    let r = Complex::real(-8.0).powc(Complex::real(1.0 / 3.0));
    assert!(r.im != 0.0);
}

#[test]
fn number_text_prints_integers_without_fraction() {
    assert_eq!(number_text(42.0), "42");
    assert_eq!(number_text(-3.0), "-3");
    assert_eq!(number_text(2.5), "2.5");
    assert_eq!(number_text(f64::NAN), "nan");
}

#[test]
fn parse_leading_reads_numeric_prefix() {
    assert_eq!(parse_leading("12abc"), 12.0);
    assert_eq!(parse_leading("  -3.5e2xyz"), -350.0);
    assert_eq!(parse_leading(".5"), 0.5);
    assert_eq!(parse_leading("1e"), 1.0);
    assert_eq!(parse_leading("abc"), 0.0);
    assert_eq!(parse_leading(""), 0.0);
    assert!(parse_leading("inf").is_infinite());
}

#[test]
fn write_cell_str_truncates_and_pads() {
    let mut field = [0xffu8; 4];
    write_cell_str(&mut field, b"abcdef");
    assert_eq!(&field, b"abc\0");
    write_cell_str(&mut field, b"x");
    assert_eq!(&field, b"x\0\0\0");
    assert_eq!(cell_str(&field), "x");
}

#[test]
fn parse_leading_handles_multibyte_text() {
    assert_eq!(parse_leading("éé"), 0.0);
    assert_eq!(parse_leading("-é"), 0.0);
    assert_eq!(parse_leading("in€"), 0.0);
    assert_eq!(parse_leading("7€"), 7.0);
    assert_eq!(parse_leading("-Inf€"), f64::NEG_INFINITY);
}
