//! 산술 커널: 고정소수점 급수와 정수론 보조 함수.
//! 모든 근사는 값 = m / 2^p 꼴의 유리수로 돌려준다.

pub(crate) mod cfrac;
pub(crate) mod complex;
pub(crate) mod real;
pub(crate) mod theory;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

/// 결과를 epsilon 배수로 반올림하기 전에 더 두는 여유 비트
pub(crate) const GUARD_BITS: u32 = 32;

/// eps 를 표현하는 데 필요한 이진 자릿수 + 여유 비트
pub(crate) fn precision_for(eps: &BigRational) -> u32 {
    let eps = eps.abs();
    let num_bits = eps.numer().bits() as i64;
    let den_bits = eps.denom().bits() as i64;
    let need = (den_bits - num_bits + 1).max(0);
    need.to_u32().unwrap_or(u32::MAX - GUARD_BITS) + GUARD_BITS
}

/// floor(x * 2^p)
pub(crate) fn to_fixed(x: &BigRational, p: u32) -> BigInt {
    (x.numer() << p as usize).div_floor(x.denom())
}

pub(crate) fn from_fixed(m: BigInt, p: u32) -> BigRational {
    BigRational::new(m, BigInt::one() << p as usize)
}

/// p 비트로 잘라 분모 크기를 묶어 둔다
pub(crate) fn trunc(x: &BigRational, p: u32) -> BigRational {
    if x.denom().bits() <= p as u64 {
        return x.clone();
    }
    from_fixed(to_fixed(x, p), p)
}

/// floor(log2 |x|) 근사 (x != 0). 한 자리 오차를 허용한다.
pub(crate) fn log2_estimate(x: &BigRational) -> i64 {
    x.numer().bits() as i64 - x.denom().bits() as i64
}

/// |x| 의 정수부 비트 수
pub(crate) fn integer_bits(x: &BigRational) -> u32 {
    let whole = x.abs().ceil().to_integer();
    if whole.is_zero() {
        0
    } else {
        whole.bits().to_u32().unwrap_or(u32::MAX / 2)
    }
}

pub(crate) fn rat(n: i64) -> BigRational {
    BigRational::from_integer(BigInt::from(n))
}

pub(crate) fn pow2(k: i64) -> BigRational {
    if k >= 0 {
        BigRational::from_integer(BigInt::one() << k as usize)
    } else {
        BigRational::new(BigInt::one(), BigInt::one() << (-k) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precision_covers_epsilon() {
        let eps = BigRational::new(BigInt::from(1), BigInt::from(1000));
        // 1/1000 < 2^-9
        assert!(precision_for(&eps) >= 10 + GUARD_BITS);
        assert_eq!(precision_for(&rat(4)), GUARD_BITS);
    }

    #[test]
    fn fixed_round_trip_floors() {
        let third = BigRational::new(BigInt::from(1), BigInt::from(3));
        let m = to_fixed(&third, 8);
        assert_eq!(m, BigInt::from(85));
        assert_eq!(from_fixed(m, 8), BigRational::new(BigInt::from(85), BigInt::from(256)));
        assert_eq!(to_fixed(&-third, 8), BigInt::from(-86));
    }
}
