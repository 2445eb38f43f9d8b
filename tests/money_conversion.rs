use groupbuy_stripe_bridge::money::{format_major_units, to_cents};

#[test]
fn strips_thousands_separators_and_trailing_noise() {
    assert_eq!(to_cents("1,234.56abc"), 123456);
    assert_eq!(to_cents("1,234.56"), to_cents("1234.56"));
    assert_eq!(to_cents("$ 1,000,000.00"), 100000000);
}

#[test]
fn non_numeric_input_coerces_to_zero() {
    assert_eq!(to_cents("abc"), 0);
    assert_eq!(to_cents(""), 0);
    assert_eq!(to_cents("3...304"), 0);
    assert_eq!(to_cents("1.2.3"), 0);
    assert_eq!(to_cents("-"), 0);
    assert_eq!(to_cents("."), 0);
}

#[test]
fn rounds_half_up_at_two_decimals() {
    assert_eq!(to_cents("10.005"), 1001);
    assert_eq!(to_cents("10.004"), 1000);
    // Extra digits past the third cannot reach the half-cent mark
    assert_eq!(to_cents("10.00499"), 1000);
    assert_eq!(to_cents("2.675"), 268);
    assert_eq!(to_cents("0.999"), 100);
}

#[test]
fn plain_amounts_convert_exactly() {
    assert_eq!(to_cents("0.00"), 0);
    assert_eq!(to_cents("10"), 1000);
    assert_eq!(to_cents("25.00"), 2500);
    assert_eq!(to_cents(".5"), 50);
    assert_eq!(to_cents("0.01"), 1);
}

#[test]
fn negative_amounts_round_away_from_zero() {
    assert_eq!(to_cents("-5.00"), -500);
    assert_eq!(to_cents("-5.005"), -501);
    assert_eq!(to_cents("-0.004"), 0);
}

#[test]
fn amounts_too_large_for_cents_coerce_to_zero() {
    // 17 integer digits parse as i64 but overflow the cents multiply
    assert_eq!(to_cents("92233720368547759.00"), 0);
    // Beyond i64 entirely (unparseable integer part)
    assert_eq!(to_cents("99999999999999999999.50"), 0);
    // Large but representable amounts still convert
    assert_eq!(to_cents("90000000000000000.00"), 9_000_000_000_000_000_000);
}

#[test]
fn interior_minus_is_rejected() {
    assert_eq!(to_cents("5-0"), 0);
}

#[test]
fn formats_cents_as_major_units() {
    assert_eq!(format_major_units(1050), "10.50");
    assert_eq!(format_major_units(123456), "1234.56");
    assert_eq!(format_major_units(5), "0.05");
    assert_eq!(format_major_units(0), "0.00");
    assert_eq!(format_major_units(-75), "-0.75");
}
