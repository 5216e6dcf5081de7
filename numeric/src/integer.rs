use num_bigint::BigInt;
use num_integer::Integer as _;
use num_traits::{Signed, ToPrimitive, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::{MathError, MathResult};
use crate::rational::Rational;

/// 임의 정밀도 정수
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Integer(BigInt);

/// 자리 이동 한도
const SHIFT_LIMIT: u64 = 1 << 31;

impl Integer {
    pub fn new(value: BigInt) -> Self {
        Integer(value)
    }

    pub fn from_i64(value: i64) -> Self {
        Integer(BigInt::from(value))
    }

    pub fn value(&self) -> &BigInt {
        &self.0
    }

    pub fn into_inner(self) -> BigInt {
        self.0
    }

    pub fn to_rational(&self) -> Rational {
        Rational::from_integer(self.0.clone())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_negative()
    }

    pub fn is_even(&self) -> bool {
        self.0.is_even()
    }

    pub fn abs(&self) -> Integer {
        Integer(self.0.abs())
    }

    pub fn to_i64(&self) -> Option<i64> {
        self.0.to_i64()
    }

    /// 내림 나눗셈
    pub fn div_floor(&self, other: &Integer) -> MathResult<Integer> {
        if other.is_zero() {
            return Err(MathError::div_zero("/"));
        }
        Ok(Integer(self.0.div_floor(&other.0)))
    }

    /// 나머지 부호는 제수를 따른다
    pub fn mod_floor(&self, other: &Integer) -> MathResult<Integer> {
        if other.is_zero() {
            return Err(MathError::div_zero("%"));
        }
        Ok(Integer(self.0.mod_floor(&other.0)))
    }

    pub fn pow(&self, exp: u32) -> Integer {
        Integer(self.0.pow(exp))
    }

    /// 음수 n 은 오른쪽 이동
    pub fn shl(&self, n: i64) -> MathResult<Integer> {
        if n.unsigned_abs() >= SHIFT_LIMIT {
            return Err(MathError::domain("<<", "shift count too large"));
        }
        Ok(if n >= 0 {
            Integer(&self.0 << n as usize)
        } else {
            Integer(shift_right(&self.0, n.unsigned_abs() as usize))
        })
    }

    pub fn shr(&self, n: i64) -> MathResult<Integer> {
        if n.unsigned_abs() >= SHIFT_LIMIT {
            return Err(MathError::domain(">>", "shift count too large"));
        }
        self.shl(-n)
    }
}

/// 0 쪽으로 자르는 오른쪽 이동 (-20 >> 4 == -1)
fn shift_right(value: &BigInt, n: usize) -> BigInt {
    let magnitude = value.abs() >> n;
    if value.is_negative() {
        -magnitude
    } else {
        magnitude
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Integer::from_i64(value)
    }
}

impl From<BigInt> for Integer {
    fn from(value: BigInt) -> Self {
        Integer(value)
    }
}

macro_rules! integer_binop {
    ($trait:ident, $method:ident) => {
        impl $trait<&Integer> for &Integer {
            type Output = Integer;
            fn $method(self, rhs: &Integer) -> Integer {
                Integer((&self.0).$method(&rhs.0))
            }
        }

        impl $trait for Integer {
            type Output = Integer;
            fn $method(self, rhs: Integer) -> Integer {
                Integer(self.0.$method(rhs.0))
            }
        }
    };
}

integer_binop!(Add, add);
integer_binop!(Sub, sub);
integer_binop!(Mul, mul);

impl Neg for Integer {
    type Output = Integer;
    fn neg(self) -> Integer {
        Integer(-self.0)
    }
}

impl Neg for &Integer {
    type Output = Integer;
    fn neg(self) -> Integer {
        Integer(-&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn floor_division_and_modulo() {
        let a = Integer::from(-7);
        let b = Integer::from(2);
        assert_eq!(a.div_floor(&b).expect("div"), Integer::from(-4));
        assert_eq!(a.mod_floor(&b).expect("mod"), Integer::from(1));
        assert_eq!(
            a.div_floor(&Integer::from(0)).unwrap_err().kind(),
            ErrorKind::DivisionByZero
        );
    }

    #[test]
    fn shifts_truncate_toward_zero() {
        assert_eq!(Integer::from(4).shl(5).expect("shl"), Integer::from(128));
        assert_eq!(Integer::from(-20).shr(4).expect("shr"), Integer::from(-1));
        assert_eq!(Integer::from(20).shl(-4).expect("shl"), Integer::from(1));
    }
}
