//! 출력 방식별 문자열 변환 (to_s, estr)

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

use crate::config::DisplayMode;
use crate::rational::Rational;
use crate::rounding;

/// 출력 방식 하나로 유리수를 쓴다. digits 는 real/sci 소수 자릿수.
pub fn format_rational(x: &Rational, mode: DisplayMode, digits: u32) -> String {
    match mode {
        DisplayMode::Fraction => x.to_string(),
        DisplayMode::Integer => {
            let whole = x.trunc();
            if x.is_integer() {
                whole.to_string()
            } else {
                format!("~{}", whole)
            }
        }
        DisplayMode::Real => real_string(x, digits),
        DisplayMode::Scientific => scientific_string(x, digits),
        DisplayMode::Hex => based_string(x, 16, "0x"),
        DisplayMode::Octal => based_string(x, 8, "0"),
        DisplayMode::Binary => based_string(x, 2, "0b"),
    }
}

/// 실수부, 허수부 순. 0 인 부분은 빼고 허수부에는 i 를 붙인다.
pub fn format_complex(re: &Rational, im: &Rational, mode: DisplayMode, digits: u32) -> String {
    if im.is_zero() {
        return format_rational(re, mode, digits);
    }
    let imag = imaginary_string(im, mode, digits);
    if re.is_zero() {
        return imag;
    }
    let real = format_rational(re, mode, digits);
    if im.is_negative() {
        format!("{}{}", real, imag)
    } else {
        format!("{}+{}", real, imag)
    }
}

fn imaginary_string(im: &Rational, mode: DisplayMode, digits: u32) -> String {
    let text = format_rational(im, mode, digits);
    let fractional = matches!(
        mode,
        DisplayMode::Fraction | DisplayMode::Hex | DisplayMode::Octal | DisplayMode::Binary
    );
    match text.split_once('/') {
        Some((num, den)) if fractional => format!("{}i/{}", num, den),
        _ => format!("{}i", text),
    }
}

/// 생성자 꼴 표현: Q(1,2), Q(4)
pub fn estr_rational(x: &Rational) -> String {
    if x.is_integer() {
        format!("Q({})", x.numer())
    } else {
        format!("Q({},{})", x.numer(), x.denom())
    }
}

/// C(4), C(0,-4), C(Q(-1,2),2)
pub fn estr_complex(re: &Rational, im: &Rational) -> String {
    let part = |x: &Rational| {
        if x.is_integer() {
            x.numer().to_string()
        } else {
            estr_rational(x)
        }
    };
    if im.is_zero() {
        format!("C({})", part(re))
    } else {
        format!("C({},{})", part(re), part(im))
    }
}

fn real_string(x: &Rational, digits: u32) -> String {
    if x.is_integer() {
        return x.numer().to_string();
    }
    if let Some(places) = terminating_places(x.denom()) {
        if places <= digits as u64 {
            let scaled = x * &Rational::pow10(places as i64);
            return decimal_string(scaled.numer(), places as usize);
        }
    }
    let unit = Rational::pow10(-(digits as i64));
    let n = rounding::quotient(x.as_big(), unit.as_big(), 24);
    format!("~{}", decimal_string(&n, digits as usize))
}

/// 분모가 2^a 5^b 꼴이면 max(a, b)
fn terminating_places(den: &BigInt) -> Option<u64> {
    let two = BigInt::from(2);
    let five = BigInt::from(5);
    let mut rest = den.clone();
    let mut twos = 0u64;
    let mut fives = 0u64;
    while rest.is_even() {
        rest /= &two;
        twos += 1;
    }
    while (&rest % &five).is_zero() {
        rest /= &five;
        fives += 1;
    }
    if rest == BigInt::from(1) {
        Some(twos.max(fives))
    } else {
        None
    }
}

/// n / 10^places 를 소수로. 소수부 끝의 0 은 지운다.
fn decimal_string(n: &BigInt, places: usize) -> String {
    let sign = if n.is_negative() { "-" } else { "" };
    let mut text = n.abs().to_string();
    if places == 0 {
        return format!("{}{}", sign, text);
    }
    if text.len() <= places {
        text = format!("{}{}", "0".repeat(places + 1 - text.len()), text);
    }
    let (whole, frac) = text.split_at(text.len() - places);
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        format!("{}{}", sign, whole)
    } else {
        format!("{}{}.{}", sign, whole, frac)
    }
}

fn scientific_string(x: &Rational, digits: u32) -> String {
    if x.is_zero() {
        return "0".to_string();
    }
    let magnitude = x.abs();
    let mut exponent =
        magnitude.numer().to_string().len() as i64 - magnitude.denom().to_string().len() as i64;
    let ten = Rational::from_i64(10);
    let one = Rational::one();
    let mut mantissa = &magnitude * &Rational::pow10(-exponent);
    while mantissa >= ten {
        mantissa = &mantissa * &Rational::pow10(-1);
        exponent += 1;
    }
    while mantissa < one {
        mantissa = &mantissa * &ten;
        exponent -= 1;
    }
    let mantissa = if x.is_negative() { -mantissa } else { mantissa };
    let text = real_string(&mantissa, digits);
    if exponent == 0 {
        text
    } else {
        format!("{}e{}", text, exponent)
    }
}

fn based_string(x: &Rational, radix: u32, prefix: &str) -> String {
    let sign = if x.is_negative() { "-" } else { "" };
    // 한 자리 값은 어느 진법이든 같으므로 접두 없이 쓴다
    let digits = |n: &BigInt| {
        let n = n.abs();
        if n < BigInt::from(radix.min(10)) {
            n.to_string()
        } else {
            format!("{}{}", prefix, n.to_str_radix(radix))
        }
    };
    if x.is_integer() {
        format!("{}{}", sign, digits(x.numer()))
    } else {
        format!("{}{}/{}", sign, digits(x.numer()), digits(x.denom()))
    }
}
