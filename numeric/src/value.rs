use num_traits::Signed;
use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::complex::Complex;
use crate::config::DisplayMode;
use crate::error::{MathError, MathResult};
use crate::format;
use crate::integer::Integer;
use crate::rational::Rational;

/// 수 종류. 승격 순서 Integer < Rational < Complex
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Kind {
    Integer,
    Rational,
    Complex,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::Integer => "integer",
            Kind::Rational => "rational",
            Kind::Complex => "complex",
        }
    }
}

/// 세 종류 수의 합. 같음은 종류를 넘어 값으로 비교한다.
#[derive(Debug, Clone)]
pub enum NumericValue {
    Integer(Integer),
    Rational(Rational),
    Complex(Complex),
}

impl NumericValue {
    pub fn int(n: i64) -> Self {
        NumericValue::Integer(Integer::from_i64(n))
    }

    /// num/den 유리수. den 이 0 이면 DivisionByZero.
    pub fn ratio(num: i64, den: i64) -> MathResult<Self> {
        Ok(NumericValue::Rational(Rational::ratio(num, den)?))
    }

    pub fn complex(re: Rational, im: Rational) -> Self {
        NumericValue::Complex(Complex::new(re, im))
    }

    pub fn kind(&self) -> Kind {
        match self {
            NumericValue::Integer(_) => Kind::Integer,
            NumericValue::Rational(_) => Kind::Rational,
            NumericValue::Complex(_) => Kind::Complex,
        }
    }

    /// kind 까지 올린다. 이미 더 높으면 그대로.
    pub fn promote(&self, kind: Kind) -> NumericValue {
        match (self, kind) {
            (NumericValue::Integer(n), Kind::Rational) => NumericValue::Rational(n.to_rational()),
            (NumericValue::Integer(n), Kind::Complex) => {
                NumericValue::Complex(Complex::from_rational(n.to_rational()))
            }
            (NumericValue::Rational(q), Kind::Complex) => {
                NumericValue::Complex(Complex::from_rational(q.clone()))
            }
            _ => self.clone(),
        }
    }

    /// 실수 값이면 유리수로. 허수부가 있으면 TypeCoercion.
    pub fn to_rational(&self, op: &'static str) -> MathResult<Rational> {
        match self {
            NumericValue::Integer(n) => Ok(n.to_rational()),
            NumericValue::Rational(q) => Ok(q.clone()),
            NumericValue::Complex(c) if c.is_real() => Ok(c.re()),
            NumericValue::Complex(c) => Err(MathError::coercion(op, c.to_string(), "real number")),
        }
    }

    pub fn to_complex(&self) -> Complex {
        match self {
            NumericValue::Integer(n) => Complex::from_rational(n.to_rational()),
            NumericValue::Rational(q) => Complex::from_rational(q.clone()),
            NumericValue::Complex(c) => c.clone(),
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            NumericValue::Integer(n) => n.is_zero(),
            NumericValue::Rational(q) => q.is_zero(),
            NumericValue::Complex(c) => c.is_zero(),
        }
    }

    pub fn is_real(&self) -> bool {
        match self {
            NumericValue::Complex(c) => c.is_real(),
            _ => true,
        }
    }

    /// 실수끼리만 순서가 있다
    pub fn partial_cmp_value(&self, other: &NumericValue) -> Option<Ordering> {
        let a = self.to_rational("cmp").ok()?;
        let b = other.to_rational("cmp").ok()?;
        Some(a.cmp(&b))
    }

    /// 순서 비교. 실수가 아니면 TypeCoercion.
    pub fn compare(&self, other: &NumericValue, op: &'static str) -> MathResult<Ordering> {
        let a = self.to_rational(op)?;
        let b = other.to_rational(op)?;
        Ok(a.cmp(&b))
    }

    /// 정수 / 정수 는 내림 나눗셈, 나머지는 정확한 나눗셈
    pub fn try_div(&self, other: &NumericValue) -> MathResult<NumericValue> {
        match (self, other) {
            (NumericValue::Integer(a), NumericValue::Integer(b)) => {
                Ok(NumericValue::Integer(a.div_floor(b)?))
            }
            _ => match self.kind().max(other.kind()) {
                Kind::Complex => Ok(NumericValue::Complex(
                    self.to_complex().checked_div(&other.to_complex())?,
                )),
                _ => Ok(NumericValue::Rational(
                    self.to_rational("/")?.checked_div(&other.to_rational("/")?)?,
                )),
            },
        }
    }

    /// 정수 지수만 받는 정확한 거듭제곱. 0^음수 는 DivisionByZero.
    pub fn checked_pow(&self, exp: &NumericValue) -> MathResult<NumericValue> {
        let exp = exp
            .to_rational("**")?
            .to_integer()
            .ok_or_else(|| MathError::domain("**", "non-integer exponent"))?;
        match self {
            NumericValue::Integer(n) if !exp.is_negative() => {
                let e = num_traits::ToPrimitive::to_u32(&exp)
                    .ok_or_else(|| MathError::domain("**", "exponent too large"))?;
                Ok(NumericValue::Integer(n.pow(e)))
            }
            NumericValue::Integer(n) => Ok(NumericValue::Rational(n.to_rational().pow_int(&exp)?)),
            NumericValue::Rational(q) => Ok(NumericValue::Rational(q.pow_int(&exp)?)),
            NumericValue::Complex(c) => Ok(NumericValue::Complex(c.pow_int(&exp)?)),
        }
    }

    /// 정수 값의 자리 이동. 정수가 아니면 Domain.
    pub fn shl(&self, n: &NumericValue) -> MathResult<NumericValue> {
        let count = n
            .to_rational("<<")?
            .to_i64()
            .ok_or_else(|| MathError::domain("<<", "shift count must be an integer"))?;
        let shifted = self.integer_value("<<")?.shl(count)?;
        Ok(match self {
            NumericValue::Integer(_) => NumericValue::Integer(shifted),
            _ => NumericValue::Rational(shifted.to_rational()),
        })
    }

    pub fn shr(&self, n: &NumericValue) -> MathResult<NumericValue> {
        let count = n
            .to_rational(">>")?
            .to_i64()
            .ok_or_else(|| MathError::domain(">>", "shift count must be an integer"))?;
        let shifted = self.integer_value(">>")?.shr(count)?;
        Ok(match self {
            NumericValue::Integer(_) => NumericValue::Integer(shifted),
            _ => NumericValue::Rational(shifted.to_rational()),
        })
    }

    fn integer_value(&self, op: &'static str) -> MathResult<Integer> {
        match self {
            NumericValue::Integer(n) => Ok(n.clone()),
            other => other
                .to_rational(op)?
                .to_integer()
                .map(Integer::new)
                .ok_or_else(|| MathError::domain(op, "integer value required")),
        }
    }

    pub fn to_string_mode(&self, mode: DisplayMode, digits: u32) -> String {
        match self {
            NumericValue::Integer(n) => format::format_rational(&n.to_rational(), mode, digits),
            NumericValue::Rational(q) => format::format_rational(q, mode, digits),
            NumericValue::Complex(c) => c.to_string_mode(mode, digits),
        }
    }
}

impl PartialEq for NumericValue {
    fn eq(&self, other: &NumericValue) -> bool {
        match (self, other) {
            (NumericValue::Integer(a), NumericValue::Integer(b)) => a == b,
            (NumericValue::Complex(_), _) | (_, NumericValue::Complex(_)) => {
                self.to_complex() == other.to_complex()
            }
            _ => self.partial_cmp_value(other) == Some(Ordering::Equal),
        }
    }
}

impl Eq for NumericValue {}

impl fmt::Display for NumericValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericValue::Integer(n) => write!(f, "{}", n),
            NumericValue::Rational(q) => write!(f, "{}", q),
            NumericValue::Complex(c) => write!(f, "{}", c),
        }
    }
}

impl From<Integer> for NumericValue {
    fn from(value: Integer) -> Self {
        NumericValue::Integer(value)
    }
}

impl From<Rational> for NumericValue {
    fn from(value: Rational) -> Self {
        NumericValue::Rational(value)
    }
}

impl From<Complex> for NumericValue {
    fn from(value: Complex) -> Self {
        NumericValue::Complex(value)
    }
}

impl From<i64> for NumericValue {
    fn from(value: i64) -> Self {
        NumericValue::int(value)
    }
}

/// 복소수 결과를 허수부 0 이면 유리수로 내린다
pub(crate) fn demoted(c: Complex) -> NumericValue {
    match c.demote() {
        Ok(q) => NumericValue::Rational(q),
        Err(c) => NumericValue::Complex(c),
    }
}

macro_rules! value_binop {
    ($trait:ident, $method:ident) => {
        impl $trait<&NumericValue> for &NumericValue {
            type Output = NumericValue;
            fn $method(self, rhs: &NumericValue) -> NumericValue {
                match (self, rhs) {
                    (NumericValue::Integer(a), NumericValue::Integer(b)) => {
                        NumericValue::Integer(a.$method(b))
                    }
                    (NumericValue::Complex(_), _) | (_, NumericValue::Complex(_)) => {
                        NumericValue::Complex((&self.to_complex()).$method(&rhs.to_complex()))
                    }
                    _ => NumericValue::Rational(
                        (&self.promote_real()).$method(&rhs.promote_real()),
                    ),
                }
            }
        }

        impl $trait for NumericValue {
            type Output = NumericValue;
            fn $method(self, rhs: NumericValue) -> NumericValue {
                (&self).$method(&rhs)
            }
        }
    };
}

impl NumericValue {
    /// Integer/Rational 을 Rational 로 (복소수는 실부)
    fn promote_real(&self) -> Rational {
        match self {
            NumericValue::Integer(n) => n.to_rational(),
            NumericValue::Rational(q) => q.clone(),
            NumericValue::Complex(c) => c.re(),
        }
    }
}

value_binop!(Add, add);
value_binop!(Sub, sub);
value_binop!(Mul, mul);

impl Neg for &NumericValue {
    type Output = NumericValue;
    fn neg(self) -> NumericValue {
        match self {
            NumericValue::Integer(n) => NumericValue::Integer(-n),
            NumericValue::Rational(q) => NumericValue::Rational(-q),
            NumericValue::Complex(c) => NumericValue::Complex(-c),
        }
    }
}

impl Neg for NumericValue {
    type Output = NumericValue;
    fn neg(self) -> NumericValue {
        -&self
    }
}
