//! Conversion of upstream decimal currency strings into integer minor units.
//!
//! The host platform formats payable totals as decimal strings, sometimes with
//! thousands separators or trailing noise. The gateway wants integer cents.
//! This is a defensive cleanup pass, not a full currency parser: anything that
//! does not survive sanitization is coerced to zero rather than raised as an
//! error.

/// Convert a decimal currency string into integer cents.
///
/// # Process
///
/// 1. Strip every character that is not a digit, dot, or minus
///    (thousands separators and stray text disappear here)
/// 2. If the remainder is not a plain decimal number, return 0
/// 3. Round to 2 decimal places (half-up, away from zero) and return cents
///
/// # Examples
///
/// - `"1,234.56abc"` → 123456 (same as `"1234.56"`)
/// - `"abc"` → 0
/// - `"10.005"` → 1001 (half-up)
pub fn to_cents(raw: &str) -> i64 {
    let sanitized: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    // No +.4393 or 3...304 or bare dashes
    if !is_plain_decimal(&sanitized) {
        return 0;
    }

    let negative = sanitized.starts_with('-');
    let digits = sanitized.trim_start_matches('-');

    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, f),
        None => (digits, ""),
    };

    // Amounts too large for i64 cents get the same zero coercion as garbage:
    // an unparseable integer part bails out here, and a parseable one that
    // overflows the cents multiply bails out below
    let whole: i64 = if int_part.is_empty() {
        0
    } else {
        match int_part.parse() {
            Ok(value) => value,
            Err(_) => return 0,
        }
    };

    let mut frac = frac_part.chars().map(|c| c as i64 - '0' as i64);
    let tenths = frac.next().unwrap_or(0);
    let hundredths = frac.next().unwrap_or(0);
    let thousandths = frac.next().unwrap_or(0);

    // Round half-up on the third fractional digit; anything beyond it cannot
    // push the remainder past the half-cent mark and is truncated
    let round_up = if thousandths >= 5 { 1 } else { 0 };
    let cents = match whole
        .checked_mul(100)
        .and_then(|v| v.checked_add(tenths * 10 + hundredths + round_up))
    {
        Some(value) => value,
        None => return 0,
    };

    if negative { -cents } else { cents }
}

/// Check that a sanitized string is a plain decimal number: an optional
/// leading minus, at most one dot, at least one digit, nothing else.
fn is_plain_decimal(value: &str) -> bool {
    let body = value.strip_prefix('-').unwrap_or(value);
    let mut dots = 0;
    let mut digits = 0;
    for c in body.chars() {
        match c {
            '.' => dots += 1,
            d if d.is_ascii_digit() => digits += 1,
            // A minus anywhere but the front
            _ => return false,
        }
    }
    dots <= 1 && digits >= 1
}

/// Format integer cents as a major-units decimal string (e.g. 1050 → "10.50").
pub fn format_major_units(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}
