//! 이항 연산 전 피연산자 맞추기. 승격 순서는 Integer < Rational < Complex.

use std::cmp::Ordering;
use std::fmt;

use crate::complex::Complex;
use crate::error::{MathError, MathResult};
use crate::integer::Integer;
use crate::parse::parse_rational;
use crate::rational::Rational;
use crate::value::{Kind, NumericValue};

/// 호출자가 넘기는 값. 수가 아닌 것도 들어올 수 있다.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Num(NumericValue),
    Int(i64),
    Float(f64),
    /// (실부, 허수부)
    Complex(f64, f64),
    Str(String),
    Bool(bool),
    List(Vec<Operand>),
    Nil,
}

impl Operand {
    pub fn type_name(&self) -> &'static str {
        match self {
            Operand::Num(v) => v.kind().name(),
            Operand::Int(_) => "int",
            Operand::Float(_) => "float",
            Operand::Complex(..) => "complex pair",
            Operand::Str(_) => "string",
            Operand::Bool(_) => "bool",
            Operand::List(_) => "list",
            Operand::Nil => "nil",
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, Operand::Nil)
    }

    /// 정밀도를 잃지 않는 가장 낮은 종류로 바꾼다.
    /// float 는 이진 값 그대로의 유리수, 문자열은 유리수.
    pub fn to_numeric(&self, op: &'static str) -> MathResult<NumericValue> {
        match self {
            Operand::Num(v) => Ok(v.clone()),
            Operand::Int(n) => Ok(NumericValue::int(*n)),
            Operand::Float(f) => Ok(NumericValue::Rational(Rational::from_f64(*f)?)),
            Operand::Complex(re, im) => Ok(NumericValue::Complex(Complex::from_f64(*re, *im)?)),
            Operand::Str(s) => Ok(NumericValue::Rational(parse_rational(s, op)?)),
            other => Err(MathError::coercion(op, other.to_string(), "number")),
        }
    }

    /// 실수 값. 복소수는 허수부가 0 일 때만.
    pub fn to_rational(&self, op: &'static str) -> MathResult<Rational> {
        self.to_numeric(op)?.to_rational(op)
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Num(v) => write!(f, "{}", v),
            Operand::Int(n) => write!(f, "{}", n),
            Operand::Float(x) => write!(f, "{}", x),
            Operand::Complex(re, im) => write!(f, "({}, {})", re, im),
            Operand::Str(s) => write!(f, "{:?}", s),
            Operand::Bool(b) => write!(f, "{}", b),
            Operand::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Operand::Nil => f.write_str("nil"),
        }
    }
}

impl From<NumericValue> for Operand {
    fn from(value: NumericValue) -> Self {
        Operand::Num(value)
    }
}

impl From<Rational> for Operand {
    fn from(value: Rational) -> Self {
        Operand::Num(NumericValue::Rational(value))
    }
}

impl From<Integer> for Operand {
    fn from(value: Integer) -> Self {
        Operand::Num(NumericValue::Integer(value))
    }
}

impl From<Complex> for Operand {
    fn from(value: Complex) -> Self {
        Operand::Num(NumericValue::Complex(value))
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Operand::Int(value)
    }
}

impl From<f64> for Operand {
    fn from(value: f64) -> Self {
        Operand::Float(value)
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Operand::Str(value.to_string())
    }
}

/// (a, b) 를 같은 종류로 맞춘다. 결과 종류는 둘 중 높은 쪽.
pub fn coerce(
    a: &NumericValue,
    b: &Operand,
    op: &'static str,
) -> MathResult<(NumericValue, NumericValue)> {
    let b = match b {
        Operand::Int(n) if a.kind() == Kind::Integer => NumericValue::Integer(Integer::from(*n)),
        other => other.to_numeric(op)?,
    };
    let kind = a.kind().max(b.kind());
    Ok((a.promote(kind), b.promote(kind)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
        }
    }
}

/// 맞춘 뒤 계산. 정수 나눗셈은 내림.
pub fn apply(a: &NumericValue, b: &Operand, op: BinaryOp) -> MathResult<NumericValue> {
    let (x, y) = coerce(a, b, op.symbol())?;
    match op {
        BinaryOp::Add => Ok(&x + &y),
        BinaryOp::Sub => Ok(&x - &y),
        BinaryOp::Mul => Ok(&x * &y),
        BinaryOp::Div => x.try_div(&y),
    }
}

/// 순서 비교. 수로 바꿀 수 없거나 실수가 아니면 TypeCoercion.
pub fn compare(a: &NumericValue, b: &Operand, op: &'static str) -> MathResult<Ordering> {
    let (x, y) = coerce(a, b, op)?;
    x.compare(&y, op)
}

/// 삼원 비교. 비교할 수 없으면 None.
pub fn partial_compare(a: &NumericValue, b: &Operand) -> Option<Ordering> {
    let (x, y) = coerce(a, b, "<=>").ok()?;
    x.partial_cmp_value(&y)
}

/// 값 같음. 수로 바꿀 수 없는 상대와는 다르다.
pub fn equals(a: &NumericValue, b: &Operand) -> bool {
    match coerce(a, b, "==") {
        Ok((x, y)) => x == y,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn half() -> NumericValue {
        NumericValue::ratio(1, 2).expect("half")
    }

    #[test]
    fn promotion_follows_the_lattice() {
        let (x, y) = coerce(&NumericValue::int(3), &Operand::Int(4), "+").expect("coerce");
        assert_eq!((x.kind(), y.kind()), (Kind::Integer, Kind::Integer));

        let (x, y) = coerce(&half(), &Operand::Int(4), "+").expect("coerce");
        assert_eq!((x.kind(), y.kind()), (Kind::Rational, Kind::Rational));

        let c = Operand::Num(NumericValue::complex(Rational::one(), Rational::one()));
        let (x, y) = coerce(&half(), &c, "+").expect("coerce");
        assert_eq!((x.kind(), y.kind()), (Kind::Complex, Kind::Complex));

        let (x, _) = coerce(&NumericValue::int(1), &Operand::Complex(0.0, 1.0), "+")
            .expect("coerce");
        assert_eq!(x.kind(), Kind::Complex);
    }

    #[test]
    fn floats_convert_exactly() {
        let sum = apply(&half(), &Operand::Float(0.5), BinaryOp::Add).expect("add");
        assert_eq!(sum, NumericValue::int(1));
        assert_eq!(sum.kind(), Kind::Rational);
        let tenth = Operand::Float(0.1).to_numeric("test").expect("tenth");
        assert_ne!(tenth, NumericValue::ratio(1, 10).expect("ratio"));
        assert!(Operand::Float(f64::NAN).to_numeric("test").is_err());
    }

    #[test]
    fn strings_parse_and_other_values_fail() {
        let sum = apply(&NumericValue::int(1), &Operand::from("1/3"), BinaryOp::Add)
            .expect("add");
        assert_eq!(sum, NumericValue::ratio(4, 3).expect("ratio"));
        let err = apply(&NumericValue::int(1), &Operand::Bool(true), BinaryOp::Add).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeCoercion);
        let err = apply(&NumericValue::int(1), &Operand::from("pear"), BinaryOp::Mul).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeCoercion);
    }

    #[test]
    fn division_and_ordering() {
        let q = apply(&NumericValue::int(-7), &Operand::Int(2), BinaryOp::Div).expect("div");
        assert_eq!(q, NumericValue::int(-4));
        let err = apply(&NumericValue::int(1), &Operand::Int(0), BinaryOp::Div).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivisionByZero);

        assert_eq!(
            compare(&half(), &Operand::Int(1), "<").expect("cmp"),
            Ordering::Less
        );
        let i = Operand::Complex(0.0, 1.0);
        assert_eq!(
            compare(&half(), &i, "<").unwrap_err().kind(),
            ErrorKind::TypeCoercion
        );
        assert_eq!(partial_compare(&half(), &i), None);
        assert_eq!(partial_compare(&half(), &Operand::Nil), None);
        assert!(equals(&NumericValue::int(2), &Operand::from("2")));
        assert!(!equals(&NumericValue::int(2), &Operand::Nil));
    }
}
