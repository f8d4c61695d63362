use crate::document::Kind;

// 10^0 .. 10^19; exponents past the table go through powf.
const POWER_TABLE: [f64; 20] = [
    1.0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19,
];

/// Decodes one numeric literal starting at `*pos`, advancing `*pos` past
/// it. Never fails: any non-numeric byte simply ends the literal.
///
/// The kind is syntax-driven: a fraction or exponent part makes the value
/// a `Number`, otherwise it stays `Int`. Integer digits accumulate into an
/// `i64` with wrapping arithmetic, so literals past 19 digits wrap rather
/// than erroring.
pub(super) fn decode(text: &[u8], pos: &mut usize) -> (Kind, f64) {
    let mut kind = Kind::Int;
    let negative = accept(text, pos, b'-');

    // A leading zero ends the integer part: "0" and "0.5" parse, while in
    // "00" the second zero is trailing content.
    let mut whole = 0i64;
    if !accept(text, pos, b'0') {
        whole = accept_digits(text, pos);
    }
    let mut value = whole as f64;

    if accept(text, pos, b'.') {
        kind = Kind::Number;
        value += accept_fraction(text, pos);
    }

    if accept(text, pos, b'e') || accept(text, pos, b'E') {
        kind = Kind::Number;
        let negative_exponent = accept(text, pos, b'-');
        accept(text, pos, b'+');
        let exponent = accept_digits(text, pos);
        if exponent != 0 {
            let multiplier = if exponent > 0 && (exponent as usize) < POWER_TABLE.len() {
                POWER_TABLE[exponent as usize]
            } else {
                10f64.powf(exponent as f64)
            };
            if negative_exponent {
                value /= multiplier;
            } else {
                value *= multiplier;
            }
        }
    }

    if negative {
        value = -value;
    }
    (kind, value)
}

fn accept(text: &[u8], pos: &mut usize, want: u8) -> bool {
    if text.get(*pos) == Some(&want) {
        *pos += 1;
        return true;
    }
    false
}

fn accept_digits(text: &[u8], pos: &mut usize) -> i64 {
    let mut value = 0i64;
    while let Some(&byte) = text.get(*pos) {
        if !byte.is_ascii_digit() {
            break;
        }
        value = value.wrapping_mul(10).wrapping_add(i64::from(byte - b'0'));
        *pos += 1;
    }
    value
}

// Digits after the dot: rawDigits / 10^digitCount, tracked as a running
// weight so the division happens once.
fn accept_fraction(text: &[u8], pos: &mut usize) -> f64 {
    let mut weight = 1.0f64;
    let mut value = 0.0f64;
    while let Some(&byte) = text.get(*pos) {
        if !byte.is_ascii_digit() {
            break;
        }
        weight *= 10.0;
        value = value * 10.0 + f64::from(byte - b'0');
        *pos += 1;
    }
    value / weight
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode_str(input: &str) -> (Kind, f64, usize) {
        let mut pos = 0;
        let (kind, value) = decode(input.as_bytes(), &mut pos);
        (kind, value, pos)
    }

    #[rstest::rstest]
    #[case("1", Kind::Int, 1.0)]
    #[case("0", Kind::Int, 0.0)]
    #[case("42", Kind::Int, 42.0)]
    #[case("-17", Kind::Int, -17.0)]
    #[case("-0", Kind::Int, 0.0)]
    #[case("1.0", Kind::Number, 1.0)]
    #[case("1.5", Kind::Number, 1.5)]
    #[case("-0.5", Kind::Number, -0.5)]
    #[case("0.25", Kind::Number, 0.25)]
    #[case("1e0", Kind::Number, 1.0)]
    #[case("1e2", Kind::Number, 100.0)]
    #[case("1E3", Kind::Number, 1000.0)]
    #[case("1e+3", Kind::Number, 1000.0)]
    #[case("1e-2", Kind::Number, 0.01)]
    #[case("2.5e2", Kind::Number, 250.0)]
    #[case("1e19", Kind::Number, 1e19)]
    fn test_decode(#[case] input: &str, #[case] kind: Kind, #[case] value: f64) {
        let (got_kind, got_value, consumed) = decode_str(input);
        assert_eq!(got_kind, kind, "kind of {input:?}");
        assert_eq!(got_value, value, "value of {input:?}");
        assert_eq!(consumed, input.len(), "consumed length of {input:?}");
    }

    #[rstest::rstest]
    fn test_exponent_past_table_uses_general_power() {
        let (kind, value, _) = decode_str("1e25");
        assert_eq!(kind, Kind::Number);
        assert!((value - 1e25).abs() / 1e25 < 1e-12);
    }

    #[rstest::rstest]
    fn test_long_integer_wraps_instead_of_failing() {
        let (kind, value, consumed) = decode_str("100000000000000000000");
        assert_eq!(kind, Kind::Int);
        assert_eq!(consumed, 21);
        // 10^20 mod 2^64, reinterpreted as i64.
        assert_eq!(value, 7_766_279_631_452_241_920i64 as f64);
    }

    #[rstest::rstest]
    fn test_negative_zero_keeps_its_sign() {
        let (kind, value, _) = decode_str("-0");
        assert_eq!(kind, Kind::Int);
        assert!(value.is_sign_negative());
    }

    #[rstest::rstest]
    #[case("12abc", 2)]
    #[case("1.5]", 3)]
    #[case("7,", 1)]
    #[case("1e", 2)]
    #[case("-", 1)]
    fn test_stops_at_first_non_numeric_byte(#[case] input: &str, #[case] consumed: usize) {
        let (_, _, got) = decode_str(input);
        assert_eq!(got, consumed);
    }

    #[rstest::rstest]
    fn test_bare_minus_is_integer_zero() {
        let (kind, value, _) = decode_str("-");
        assert_eq!(kind, Kind::Int);
        assert_eq!(value, 0.0);
    }
}
