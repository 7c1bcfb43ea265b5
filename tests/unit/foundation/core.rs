use super::*;

fn r(s: &str) -> Rational {
    Rational::parse(s).unwrap()
}

#[test]
fn parse_accepts_fraction_and_integer_forms() {
    assert_eq!(r("1001/30000s"), Rational::new(1001, 30000).unwrap());
    assert_eq!(r("3600s"), Rational::from_int(3600));
    assert_eq!(r("-5s"), Rational::from_int(-5));
    assert_eq!(r("+2/4s"), Rational::new(1, 2).unwrap());
    assert_eq!(r("0s"), Rational::ZERO);
}

#[test]
fn parse_rejects_other_shapes() {
    for bad in [
        "", "s", "12", "1/2", "1/0s", "a/2s", "1.5s", "1//2s", "/2s", "-s", " 1s", "1/2s ",
    ] {
        let err = Rational::parse(bad).unwrap_err();
        assert!(matches!(err, ResolveError::Format(_)), "{bad:?}");
    }
}

#[test]
fn parse_reduces_to_lowest_terms() {
    let v = r("8648640000/2400000s");
    assert_eq!(v.num(), 18018);
    assert_eq!(v.den(), 5);
}

#[test]
fn display_parse_roundtrip_preserves_value() {
    for s in ["1001/30000s", "27248221/7500s", "1441440000/2400000s", "-7/3s", "12s"] {
        let v = r(s);
        assert_eq!(r(&v.to_string()), v);
    }
    assert_eq!(r("10/2s").to_string(), "5s");
}

#[test]
fn arithmetic_is_exact() {
    let a = r("1001/30000s");
    let mut acc = Rational::ZERO;
    for _ in 0..30000 {
        acc = acc + a;
    }
    assert_eq!(acc, Rational::from_int(1001));
    assert_eq!(acc - acc, Rational::ZERO);
    assert_eq!(r("1/2s") * r("2/3s"), r("1/3s"));
    assert_eq!(r("1/2s").checked_div(r("1/4s")), Some(Rational::from_int(2)));
    assert_eq!(r("1/2s").checked_div(Rational::ZERO), None);
}

#[test]
fn checked_ops_report_values_past_i64() {
    let max = Rational::from_int(i64::MAX);
    assert_eq!(max.checked_add(Rational::from_int(1)), None);
    assert_eq!(max.checked_mul(Rational::from_int(2)), None);
    assert_eq!(Rational::from_int(i64::MIN).checked_neg(), None);
    assert_eq!(r("1/3s").checked_sub(r("1/6s")), Some(r("1/6s")));
    assert_eq!(r("3/2s").checked_mul(r("2/3s")), Some(Rational::from_int(1)));

    // Operators saturate instead of wrapping.
    assert_eq!(max + Rational::from_int(1), max);
    assert_eq!(-Rational::from_int(i64::MIN), max);
}

#[test]
fn ordering_and_floor() {
    assert!(r("1/3s") < r("1/2s"));
    assert!(r("-1/2s") < Rational::ZERO);
    assert_eq!(r("7/2s").floor(), 3);
    assert_eq!(r("-7/2s").floor(), -4);
}

#[test]
fn serde_uses_fcpxml_strings() {
    let v: Rational = serde_json::from_str("\"100/2500s\"").unwrap();
    assert_eq!(v, r("1/25s"));
    assert_eq!(serde_json::to_string(&v).unwrap(), "\"1/25s\"");
    assert!(serde_json::from_str::<Rational>("\"1/25\"").is_err());
}

#[test]
fn time_range_clamps_and_treats_touching_as_disjoint() {
    let a = TimeRange::new(Rational::from_int(0), Rational::from_int(10));
    let b = TimeRange::new(Rational::from_int(10), Rational::from_int(20));
    assert!(!a.overlaps(b));
    assert_eq!(a.intersection(b), None);

    let inverted = TimeRange::new(Rational::from_int(5), Rational::from_int(1));
    assert!(inverted.is_empty());
    assert_eq!(inverted.end, Rational::from_int(5));

    let c = TimeRange::new(Rational::from_int(5), Rational::from_int(15));
    assert_eq!(
        a.intersection(c),
        Some(TimeRange::new(Rational::from_int(5), Rational::from_int(10)))
    );
    assert!(a.contains(Rational::ZERO));
    assert!(!a.contains(Rational::from_int(10)));
    assert!(a.shift(Rational::from_int(5)).contains_range(c));
}
