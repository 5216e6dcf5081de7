//! 실수 초월함수의 고정소수점 급수. 호출자는 정의역을 먼저 확인한다.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::{from_fixed, integer_bits, log2_estimate, pow2, rat, to_fixed, trunc};

/// 급수 내부 여유 비트
const SERIES_GUARD: u32 = 16;

/// e^x, 오차 약 2^-p
pub(crate) fn exp(x: &BigRational, p: u32) -> BigRational {
    if x.is_zero() {
        return BigRational::one();
    }
    // 결과 크기만큼 정밀도를 더한다 (log2 e < 1.5)
    let grow = if x.is_positive() {
        let bits = x.ceil().to_integer().to_u32().unwrap_or(u32::MAX / 4);
        bits + bits / 2 + 1
    } else {
        0
    };
    let q = p + grow + SERIES_GUARD;
    let raw = to_fixed(x, q);
    // |x| / 2^s < 2^-8
    let s = (raw.bits() as i64 - q as i64 + 8).max(0) as u32;
    let q2 = q + s;
    // raw 는 x/2^s 를 2^q2 스케일로 나타낸 값과 같다
    let one = BigInt::one() << q2 as usize;
    let mut sum = one.clone();
    let mut term = one;
    let mut k: u32 = 1;
    loop {
        term = (&term * &raw) >> q2 as usize;
        term /= k;
        if term.is_zero() {
            break;
        }
        sum += &term;
        k += 1;
    }
    for _ in 0..s {
        sum = (&sum * &sum) >> q2 as usize;
    }
    from_fixed(sum, q2)
}

/// atanh(z) 급수, |z| <= 1/3, 고정소수점 q
fn atanh_fixed(z: &BigRational, q: u32) -> BigInt {
    let zf = to_fixed(z, q);
    let z2 = (&zf * &zf) >> q as usize;
    let mut term = zf.clone();
    let mut sum = zf;
    let mut n: u32 = 3;
    loop {
        term = (&term * &z2) >> q as usize;
        if term.is_zero() {
            break;
        }
        sum += &term / n;
        n += 2;
    }
    sum
}

fn ln2_fixed(q: u32) -> BigInt {
    atanh_fixed(&BigRational::new(BigInt::one(), BigInt::from(3)), q) * 2
}

/// ln x (x > 0)
pub(crate) fn ln(x: &BigRational, p: u32) -> BigRational {
    if x.is_one() {
        return BigRational::zero();
    }
    let mut k = log2_estimate(x);
    let mut m = x * pow2(-k);
    let two = rat(2);
    while m >= two {
        m /= &two;
        k += 1;
    }
    while m < BigRational::one() {
        m *= &two;
        k -= 1;
    }
    let k_bits = (k.unsigned_abs() + 1).ilog2() + 1;
    let q = p + k_bits + SERIES_GUARD;
    // ln m = 2 atanh((m-1)/(m+1)), m in [1, 2)
    let z = (&m - BigRational::one()) / (&m + BigRational::one());
    let ln_m = atanh_fixed(&z, q) * 2;
    let total = ln2_fixed(q) * BigInt::from(k) + ln_m;
    from_fixed(total, q)
}

/// atan(1/n) 급수, 고정소수점 q
fn atan_inv_fixed(n: u32, q: u32) -> BigInt {
    let n2 = BigInt::from(n) * BigInt::from(n);
    let mut power = (BigInt::one() << q as usize) / n;
    let mut sum = power.clone();
    let mut k: u32 = 1;
    loop {
        power /= &n2;
        if power.is_zero() {
            break;
        }
        let term = &power / (2 * k + 1);
        if k % 2 == 1 {
            sum -= term;
        } else {
            sum += term;
        }
        k += 1;
    }
    sum
}

/// 마친 공식: pi = 16 atan(1/5) - 4 atan(1/239)
pub(crate) fn pi_fixed(q: u32) -> BigInt {
    let inner = q + 8;
    let value = atan_inv_fixed(5, inner) * 16 - atan_inv_fixed(239, inner) * 4;
    value >> 8usize
}

pub(crate) fn pi(p: u32) -> BigRational {
    let q = p + 4;
    from_fixed(pi_fixed(q), q)
}

/// (sin x, cos x)
pub(crate) fn sin_cos(x: &BigRational, p: u32) -> (BigRational, BigRational) {
    if x.is_zero() {
        return (BigRational::zero(), BigRational::one());
    }
    let q = p + integer_bits(x) + SERIES_GUARD;
    let xf = to_fixed(x, q);
    let half_pi = pi_fixed(q) >> 1usize;
    // k = round(x / (pi/2))
    let k = (&xf * 2u32 + &half_pi).div_floor(&(&half_pi * 2u32));
    let r = &xf - &k * &half_pi;
    let r2 = (&r * &r) >> q as usize;
    let one = BigInt::one() << q as usize;
    let mut sin_sum = r.clone();
    let mut cos_sum = one.clone();
    let mut sin_term = r;
    let mut cos_term = one;
    let mut n: u32 = 1;
    loop {
        sin_term = -((&sin_term * &r2) >> q as usize) / ((2 * n) * (2 * n + 1));
        cos_term = -((&cos_term * &r2) >> q as usize) / ((2 * n - 1) * (2 * n));
        if sin_term.is_zero() && cos_term.is_zero() {
            break;
        }
        sin_sum += &sin_term;
        cos_sum += &cos_term;
        n += 1;
    }
    let quadrant = k.mod_floor(&BigInt::from(4)).to_u32().unwrap_or(0);
    let (s, c) = match quadrant {
        0 => (sin_sum, cos_sum),
        1 => (cos_sum, -sin_sum),
        2 => (-sin_sum, -cos_sum),
        _ => (-cos_sum, sin_sum),
    };
    (from_fixed(s, q), from_fixed(c, q))
}

/// |x| <= 1 에서 오일러 급수: ratio x^2/(1+x^2) <= 1/2
fn atan_small_fixed(x: &BigRational, q: u32) -> BigInt {
    let x2 = x * x;
    let d = BigRational::one() + &x2;
    let mut term = to_fixed(&(x / &d), q);
    let w = to_fixed(&(x2 / d), q);
    let mut sum = term.clone();
    let mut n: u32 = 1;
    loop {
        term = ((&term * &w) >> q as usize) * (2 * n) / (2 * n + 1);
        if term.is_zero() {
            break;
        }
        sum += &term;
        n += 1;
    }
    sum
}

pub(crate) fn atan(x: &BigRational, p: u32) -> BigRational {
    if x.is_zero() {
        return BigRational::zero();
    }
    let q = p + SERIES_GUARD;
    if x.abs() <= BigRational::one() {
        return from_fixed(atan_small_fixed(x, q), q);
    }
    // atan x = sign(x) pi/2 - atan(1/x)
    let half_pi = pi_fixed(q) >> 1usize;
    let inner = atan_small_fixed(&x.recip(), q);
    let value = if x.is_negative() {
        -half_pi - inner
    } else {
        half_pi - inner
    };
    from_fixed(value, q)
}

/// atan2(y, x), atan2(0, 0) = 0
pub(crate) fn atan2(y: &BigRational, x: &BigRational, p: u32) -> BigRational {
    if x.is_zero() {
        let half = pi(p + 1) / rat(2);
        return if y.is_positive() {
            half
        } else if y.is_negative() {
            -half
        } else {
            BigRational::zero()
        };
    }
    let base = atan(&(y / x), p + 2);
    if x.is_positive() {
        base
    } else if y.is_negative() {
        base - pi(p + 2)
    } else {
        base + pi(p + 2)
    }
}

/// 제곱근: 제곱수면 정확히, 아니면 floor(sqrt(x) 2^p) / 2^p
pub(crate) fn sqrt(x: &BigRational, p: u32) -> BigRational {
    if let Some(root) = crate::rounding::exact_sqrt(x) {
        return root;
    }
    let scaled = to_fixed(x, 2 * p);
    from_fixed(scaled.sqrt(), p)
}

/// n 제곱근 (x >= 0, n >= 1)
pub(crate) fn root(x: &BigRational, n: u32, p: u32) -> BigRational {
    if n == 1 {
        return x.clone();
    }
    let num = x.numer().nth_root(n);
    let den = x.denom().nth_root(n);
    if num.pow(n) == *x.numer() && den.pow(n) == *x.denom() {
        return BigRational::new(num, den);
    }
    let scaled = to_fixed(x, n * p);
    from_fixed(scaled.nth_root(n), p)
}

/// (sinh x, cosh x)
pub(crate) fn sinh_cosh(x: &BigRational, p: u32) -> (BigRational, BigRational) {
    if x.is_zero() {
        return (BigRational::zero(), BigRational::one());
    }
    let q = p + 8;
    let e = trunc(&exp(&x.abs(), q), q + integer_bits(x) * 2);
    let inv = e.recip();
    let half = rat(2);
    let s = (&e - &inv) / &half;
    let c = (&e + &inv) / &half;
    let s = if x.is_negative() { -s } else { s };
    (s, c)
}
