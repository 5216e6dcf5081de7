use num_bigint::BigInt;
use num_integer::Integer as _;
use num_rational::BigRational;
use num_traits::{One, Pow, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{MathError, MathResult};

/// 기약 분수. 분모는 항상 양수이고 부호는 분자에만 있다.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rational(BigRational);

impl Rational {
    /// 분모 0 은 DivisionByZero
    pub fn new(num: BigInt, den: BigInt) -> MathResult<Self> {
        if den.is_zero() {
            return Err(MathError::div_zero("rational"));
        }
        Ok(Rational(BigRational::new(num, den)))
    }

    pub fn from_integer(n: BigInt) -> Self {
        Rational(BigRational::from_integer(n))
    }

    pub fn from_i64(n: i64) -> Self {
        Rational::from_integer(BigInt::from(n))
    }

    /// 두 i64 의 분수. 테스트와 상수용.
    pub fn ratio(num: i64, den: i64) -> MathResult<Self> {
        Rational::new(BigInt::from(num), BigInt::from(den))
    }

    /// f64 의 이진 값 그대로. 유한하지 않으면 TypeCoercion.
    pub fn from_f64(value: f64) -> MathResult<Self> {
        BigRational::from_float(value)
            .map(Rational)
            .ok_or_else(|| MathError::coercion("rational", value.to_string(), "finite number"))
    }

    pub(crate) fn from_big(value: BigRational) -> Self {
        Rational(value)
    }

    pub(crate) fn as_big(&self) -> &BigRational {
        &self.0
    }

    pub(crate) fn into_big(self) -> BigRational {
        self.0
    }

    pub fn zero() -> Self {
        Rational(BigRational::zero())
    }

    pub fn one() -> Self {
        Rational(BigRational::one())
    }

    /// 10^k (k 는 음수 가능)
    pub fn pow10(k: i64) -> Self {
        let base: BigInt = Pow::pow(BigInt::from(10), k.unsigned_abs());
        if k >= 0 {
            Rational::from_integer(base)
        } else {
            Rational(BigRational::new(BigInt::one(), base))
        }
    }

    /// 2^k (k 는 음수 가능)
    pub fn pow2(k: i64) -> Self {
        Rational(crate::kernel::pow2(k))
    }

    pub fn numer(&self) -> &BigInt {
        self.0.numer()
    }

    pub fn denom(&self) -> &BigInt {
        self.0.denom()
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.0.is_one()
    }

    pub fn is_positive(&self) -> bool {
        self.0.is_positive()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn is_integer(&self) -> bool {
        self.0.is_integer()
    }

    pub fn is_even(&self) -> bool {
        self.is_integer() && self.numer().is_even()
    }

    pub fn is_odd(&self) -> bool {
        self.is_integer() && self.numer().is_odd()
    }

    /// -1, 0, 1
    pub fn signum(&self) -> i8 {
        crate::rounding::sign_of(&self.0)
    }

    pub fn to_integer(&self) -> Option<BigInt> {
        if self.is_integer() {
            Some(self.0.numer().clone())
        } else {
            None
        }
    }

    /// 정수 값을 i64 로. 정수가 아니거나 범위를 넘으면 None.
    pub fn to_i64(&self) -> Option<i64> {
        self.to_integer().and_then(|n| n.to_i64())
    }

    pub fn to_f64(&self) -> Option<f64> {
        self.0.to_f64()
    }

    pub fn floor(&self) -> BigInt {
        self.0.floor().to_integer()
    }

    pub fn ceil(&self) -> BigInt {
        self.0.ceil().to_integer()
    }

    /// 0 쪽으로 자른 정수부
    pub fn trunc(&self) -> BigInt {
        self.0.trunc().to_integer()
    }

    pub fn fract(&self) -> Rational {
        Rational(self.0.fract())
    }

    pub fn abs(&self) -> Rational {
        Rational(self.0.abs())
    }

    pub fn recip(&self) -> MathResult<Rational> {
        if self.is_zero() {
            return Err(MathError::div_zero("inverse"));
        }
        Ok(Rational(self.0.recip()))
    }

    pub fn checked_div(&self, other: &Rational) -> MathResult<Rational> {
        if other.is_zero() {
            return Err(MathError::div_zero("/"));
        }
        Ok(Rational(&self.0 / &other.0))
    }

    /// 정수 지수 거듭제곱. 0^음수 는 DivisionByZero.
    pub fn pow_int(&self, exp: &BigInt) -> MathResult<Rational> {
        if exp.is_negative() && self.is_zero() {
            return Err(MathError::div_zero("power"));
        }
        let magnitude = exp
            .abs()
            .to_i32()
            .ok_or_else(|| MathError::domain("power", "exponent too large"))?;
        let base = if exp.is_negative() {
            self.0.recip()
        } else {
            self.0.clone()
        };
        Ok(Rational(num_traits::pow(base, magnitude as usize)))
    }

    pub fn square(&self) -> Rational {
        Rational(&self.0 * &self.0)
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_integer() {
            write!(f, "{}", self.numer())
        } else {
            write!(f, "{}/{}", self.numer(), self.denom())
        }
    }
}

impl From<BigInt> for Rational {
    fn from(n: BigInt) -> Self {
        Rational::from_integer(n)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Rational::from_i64(n)
    }
}

impl PartialEq<i64> for Rational {
    fn eq(&self, other: &i64) -> bool {
        self.is_integer() && self.numer() == &BigInt::from(*other)
    }
}

impl PartialOrd<i64> for Rational {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        Some(self.0.cmp(&BigRational::from_integer(BigInt::from(*other))))
    }
}

macro_rules! rational_binop {
    ($trait:ident, $method:ident) => {
        impl $trait<&Rational> for &Rational {
            type Output = Rational;
            fn $method(self, rhs: &Rational) -> Rational {
                Rational((&self.0).$method(&rhs.0))
            }
        }

        impl $trait for Rational {
            type Output = Rational;
            fn $method(self, rhs: Rational) -> Rational {
                Rational(self.0.$method(rhs.0))
            }
        }
    };
}

rational_binop!(Add, add);
rational_binop!(Sub, sub);
rational_binop!(Mul, mul);

impl Neg for Rational {
    type Output = Rational;
    fn neg(self) -> Rational {
        Rational(-self.0)
    }
}

impl Neg for &Rational {
    type Output = Rational;
    fn neg(self) -> Rational {
        Rational(-&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_reduces_and_moves_sign() {
        let q = Rational::ratio(6, -4).expect("6/-4");
        assert_eq!(q.numer(), &BigInt::from(-3));
        assert_eq!(q.denom(), &BigInt::from(2));
        assert_eq!(q.to_string(), "-3/2");
        let err = Rational::ratio(1, 0).unwrap_err();
        assert_eq!(err.code(), "E_MATH_DIV_ZERO");
    }

    #[test]
    fn construction_is_canonical_over_a_grid() {
        let values = [-36i64, -12, -7, -6, -1, 0, 1, 2, 4, 9, 15, 24, 35];
        for &n in &values {
            for &d in values.iter().filter(|&&d| d != 0) {
                let q = Rational::ratio(n, d).expect("ratio");
                assert!(q.denom().is_positive(), "{}/{}", n, d);
                assert!(q.numer().gcd(q.denom()).is_one(), "{}/{}", n, d);
                // a/b == n/d  <=>  a*d == n*b
                assert_eq!(
                    q.numer() * BigInt::from(d),
                    BigInt::from(n) * q.denom(),
                    "{}/{}",
                    n,
                    d
                );
            }
        }
        assert_eq!(Rational::ratio(0, -5).expect("0/-5").denom(), &BigInt::one());
    }

    #[test]
    fn construction_from_i64_min_keeps_sign_canonical() {
        let min = BigInt::from(i64::MIN);
        let q = Rational::ratio(i64::MIN, -1).expect("min/-1");
        assert_eq!(q.numer(), &-&min);
        assert!(q.is_positive());
        let q = Rational::ratio(1, i64::MIN).expect("1/min");
        assert_eq!(q.numer(), &BigInt::from(-1));
        assert_eq!(q.denom(), &-&min);
        let q = Rational::ratio(i64::MIN, i64::MIN).expect("min/min");
        assert!(q.is_one());
        let q = Rational::ratio(i64::MIN, -2).expect("min/-2");
        assert_eq!(q, Rational::from_integer(BigInt::one() << 62usize));
    }

    #[test]
    fn floats_convert_to_their_binary_value() {
        assert_eq!(Rational::from_f64(0.5).expect("0.5"), Rational::ratio(1, 2).expect("1/2"));
        let tenth = Rational::from_f64(0.1).expect("0.1");
        assert_eq!(tenth.denom(), &(BigInt::one() << 55usize));
        assert!(Rational::from_f64(f64::NAN).is_err());
    }

    #[test]
    fn integer_round_trip_is_lossless() {
        let n = BigInt::from(1234567890123i64);
        let q = Rational::from_integer(n.clone());
        assert_eq!(q.to_integer(), Some(n));
        assert_eq!(Rational::ratio(1, 3).expect("1/3").to_integer(), None);
    }

    #[test]
    fn integer_powers() {
        let half = Rational::ratio(1, 2).expect("half");
        assert_eq!(half.pow_int(&BigInt::from(-3)).expect("pow"), Rational::from_i64(8));
        assert!(Rational::zero().pow_int(&BigInt::from(-1)).is_err());
        assert_eq!(Rational::pow10(-2), Rational::ratio(1, 100).expect("1/100"));
    }
}
