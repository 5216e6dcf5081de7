//! 문자열 -> 유리수. 십진, 지수, 분수, 0x/0b/0 접두 정수를 받는다.

use num_bigint::BigInt;
use num_traits::{Num, Zero};

use crate::error::{MathError, MathResult};
use crate::rational::Rational;

const EXPECTED: &str = "number";

/// 십진 지수 한계
const SCALE_LIMIT: u64 = 1 << 31;

pub fn parse_rational(text: &str, op: &'static str) -> MathResult<Rational> {
    let trimmed = text.trim();
    let (negative, body) = split_sign(trimmed);
    if body.is_empty() {
        return Err(MathError::coercion(op, text, EXPECTED));
    }
    let value = match body.split_once('/') {
        Some((num, den)) => {
            let num = parse_unsigned(num, op, text)?;
            let den = parse_unsigned(den, op, text)?;
            if den.is_zero() {
                return Err(MathError::div_zero(op));
            }
            num.checked_div(&den)?
        }
        None => parse_unsigned(body, op, text)?,
    };
    Ok(if negative { -value } else { value })
}

/// 정수 값이어야 한다. "1e3" 은 되고 "1/2" 는 TypeCoercion.
pub fn parse_integer(text: &str, op: &'static str) -> MathResult<BigInt> {
    parse_rational(text, op)?
        .to_integer()
        .ok_or_else(|| MathError::coercion(op, text, "integer"))
}

fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else {
        (false, text)
    }
}

fn parse_unsigned(part: &str, op: &'static str, whole: &str) -> MathResult<Rational> {
    let bad = || MathError::coercion(op, whole, EXPECTED);
    let lower = part.to_ascii_lowercase();
    if let Some(hex) = lower.strip_prefix("0x") {
        return radix_integer(hex, 16).ok_or_else(bad);
    }
    if let Some(bin) = lower.strip_prefix("0b") {
        return radix_integer(bin, 2).ok_or_else(bad);
    }
    if lower.len() > 1 && lower.starts_with('0') && lower.bytes().all(|b| (b'0'..=b'7').contains(&b)) {
        return radix_integer(&lower[1..], 8).ok_or_else(bad);
    }
    parse_decimal(&lower, op, whole)
}

fn radix_integer(digits: &str, radix: u32) -> Option<Rational> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    BigInt::from_str_radix(digits, radix)
        .ok()
        .map(Rational::from_integer)
}

/// digits[.digits][e[+-]digits]
fn parse_decimal(text: &str, op: &'static str, whole_text: &str) -> MathResult<Rational> {
    let bad = || MathError::coercion(op, whole_text, EXPECTED);
    let too_large = || MathError::domain(op, format!("exponent out of range: {}", whole_text));
    let (mantissa, exponent) = match text.split_once('e') {
        Some((m, e)) => (m, Some(e)),
        None => (text, None),
    };
    let (whole, frac) = match mantissa.split_once('.') {
        Some((w, f)) => (w, f),
        None => (mantissa, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return Err(bad());
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad());
    }
    let digits = format!("{}{}", whole, frac);
    let mantissa = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or_else(bad)?;
    let mut scale = -i64::try_from(frac.len()).map_err(|_| too_large())?;
    if let Some(exp) = exponent {
        let (negative, body) = split_sign(exp);
        if body.is_empty() || !body.bytes().all(|b| b.is_ascii_digit()) {
            return Err(bad());
        }
        // 숫자만 있는데 i64 로 안 읽히면 너무 큰 지수
        let value: i64 = body.parse().map_err(|_| too_large())?;
        let value = if negative { -value } else { value };
        scale = scale.checked_add(value).ok_or_else(too_large)?;
    }
    if scale.unsigned_abs() >= SCALE_LIMIT {
        return Err(too_large());
    }
    Ok(Rational::from_integer(mantissa) * Rational::pow10(scale))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn q(n: i64, d: i64) -> Rational {
        Rational::ratio(n, d).expect("ratio")
    }

    #[test]
    fn decimal_and_exponent_forms() {
        assert_eq!(parse_rational("1.25", "t").expect("1.25"), q(5, 4));
        assert_eq!(parse_rational(" -.5 ", "t").expect(".5"), q(-1, 2));
        assert_eq!(parse_rational("1e-3", "t").expect("1e-3"), q(1, 1000));
        assert_eq!(parse_rational("2.5E+4", "t").expect("2.5e4"), q(25000, 1));
    }

    #[test]
    fn fractions_and_based_integers() {
        assert_eq!(parse_rational("3/6", "t").expect("3/6"), q(1, 2));
        assert_eq!(parse_rational("-1.5/2", "t").expect("1.5/2"), q(-3, 4));
        assert_eq!(parse_rational("0x2a", "t").expect("hex"), q(42, 1));
        assert_eq!(parse_rational("0b101010", "t").expect("bin"), q(42, 1));
        assert_eq!(parse_rational("052", "t").expect("oct"), q(42, 1));
        assert_eq!(parse_rational("0", "t").expect("zero"), q(0, 1));
        assert_eq!(parse_rational("09", "t").expect("decimal"), q(9, 1));
    }

    #[test]
    fn rejects_garbage_and_zero_denominators() {
        for bad in ["", "abc", "1..2", "1e", "0x", "1/2/3", "--1"] {
            assert_eq!(
                parse_rational(bad, "t").unwrap_err().kind(),
                ErrorKind::TypeCoercion,
                "{}",
                bad
            );
        }
        assert_eq!(
            parse_rational("1/0", "t").unwrap_err().kind(),
            ErrorKind::DivisionByZero
        );
        assert_eq!(
            parse_integer("1/2", "t").unwrap_err().kind(),
            ErrorKind::TypeCoercion
        );
        assert_eq!(parse_integer("1e3", "t").expect("1e3"), BigInt::from(1000));
    }

    #[test]
    fn huge_exponents_are_rejected_not_truncated() {
        for text in [
            "3e4294967297",
            "1e4294967296",
            ".55e-9223372036854775807",
            "1e-9223372036854775808",
            "1e99999999999999999999",
            "2e2147483648",
        ] {
            assert_eq!(
                parse_rational(text, "t").unwrap_err().kind(),
                ErrorKind::Domain,
                "{}",
                text
            );
        }
        assert_eq!(parse_rational("1e40", "t").expect("1e40"), Rational::pow10(40));
        assert_eq!(parse_rational("25e-3", "t").expect("25e-3"), q(1, 40));
    }
}
