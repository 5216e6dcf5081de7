use num_bigint::BigInt;
use num_complex::Complex as NumComplex;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};

use crate::config::DisplayMode;
use crate::error::{MathError, MathResult};
use crate::format;
use crate::kernel::complex::Cx;
use crate::rational::Rational;

/// 유리수 성분 복소수. 일반 산술은 허수부가 0 이 되어도 복소수로 남는다.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Complex(NumComplex<BigRational>);

impl Complex {
    pub fn new(re: Rational, im: Rational) -> Self {
        Complex(NumComplex::new(re.into_big(), im.into_big()))
    }

    pub fn from_rational(re: Rational) -> Self {
        Complex::new(re, Rational::zero())
    }

    pub fn from_i64(re: i64, im: i64) -> Self {
        Complex::new(Rational::from_i64(re), Rational::from_i64(im))
    }

    /// f64 쌍의 정확한 이진 값
    pub fn from_f64(re: f64, im: f64) -> MathResult<Self> {
        Ok(Complex::new(Rational::from_f64(re)?, Rational::from_f64(im)?))
    }

    pub fn i() -> Self {
        Complex(NumComplex::i())
    }

    pub fn re(&self) -> Rational {
        Rational::from_big(self.0.re.clone())
    }

    pub fn im(&self) -> Rational {
        Rational::from_big(self.0.im.clone())
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_real(&self) -> bool {
        self.0.im.is_zero()
    }

    /// 순허수: 실부 0, 허수부 0 아님
    pub fn is_imag(&self) -> bool {
        self.0.re.is_zero() && !self.0.im.is_zero()
    }

    pub fn conj(&self) -> Complex {
        Complex(self.0.conj())
    }

    /// re^2 + im^2
    pub fn norm(&self) -> Rational {
        Rational::from_big(self.0.norm_sqr())
    }

    pub fn checked_div(&self, other: &Complex) -> MathResult<Complex> {
        if other.is_zero() {
            return Err(MathError::div_zero("/"));
        }
        Ok(Complex(&self.0 / &other.0))
    }

    pub fn inverse(&self) -> MathResult<Complex> {
        if self.is_zero() {
            return Err(MathError::div_zero("inverse"));
        }
        Ok(Complex(self.0.inv()))
    }

    /// 정수 지수 거듭제곱
    pub fn pow_int(&self, exp: &BigInt) -> MathResult<Complex> {
        let base = if exp.is_negative() {
            if self.is_zero() {
                return Err(MathError::div_zero("power"));
            }
            self.0.inv()
        } else {
            self.0.clone()
        };
        let magnitude = exp
            .abs()
            .to_u32()
            .ok_or_else(|| MathError::domain("power", "exponent too large"))?;
        Ok(Complex(base.powu(magnitude)))
    }

    /// 허수부가 0 이면 유리수로 내린다
    pub fn demote(self) -> Result<Rational, Complex> {
        if self.is_real() {
            Ok(Rational::from_big(self.0.re))
        } else {
            Err(self)
        }
    }

    pub fn to_string_mode(&self, mode: DisplayMode, digits: u32) -> String {
        format::format_complex(&self.re(), &self.im(), mode, digits)
    }

    pub fn estr(&self) -> String {
        format::estr_complex(&self.re(), &self.im())
    }

    pub(crate) fn to_cx(&self) -> Cx {
        self.0.clone()
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_mode(DisplayMode::Fraction, 0))
    }
}

impl From<Rational> for Complex {
    fn from(re: Rational) -> Self {
        Complex::from_rational(re)
    }
}

impl Add<&Complex> for &Complex {
    type Output = Complex;
    fn add(self, rhs: &Complex) -> Complex {
        Complex(&self.0 + &rhs.0)
    }
}

impl Sub<&Complex> for &Complex {
    type Output = Complex;
    fn sub(self, rhs: &Complex) -> Complex {
        Complex(&self.0 - &rhs.0)
    }
}

impl Mul<&Complex> for &Complex {
    type Output = Complex;
    fn mul(self, rhs: &Complex) -> Complex {
        Complex(&self.0 * &rhs.0)
    }
}

impl Neg for &Complex {
    type Output = Complex;
    fn neg(self) -> Complex {
        Complex(-&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(re: i64, im: i64) -> Complex {
        Complex::from_i64(re, im)
    }

    #[test]
    fn arithmetic_keeps_complex_kind() {
        assert_eq!(&c(1, 1) * &c(1, 1), c(0, 2));
        assert_eq!(&c(1, 1) - &c(1, 1), c(0, 0));
        assert_eq!(c(4, -4).checked_div(&c(2, 2)).expect("div"), c(0, -2));
        assert_eq!(c(1, 1).checked_div(&c(0, 1)).expect("div"), c(1, -1));
        assert!(c(1, 1).checked_div(&c(0, 0)).is_err());
        assert!(c(0, 0).inverse().is_err());
        assert!(c(0, 0).pow_int(&BigInt::from(-2)).is_err());
    }

    #[test]
    fn integer_powers() {
        assert_eq!(c(1, 1).pow_int(&BigInt::from(4)).expect("pow"), c(-4, 0));
        assert_eq!(c(1, 3).pow_int(&BigInt::from(3)).expect("pow"), c(-26, -18));
        assert_eq!(c(0, 2).pow_int(&BigInt::from(-2)).expect("pow"), Complex::new(
            Rational::ratio(-1, 4).expect("re"),
            Rational::zero(),
        ));
        assert_eq!(c(7, -3).pow_int(&BigInt::from(0)).expect("pow"), c(1, 0));
        let inv = c(3, 4).inverse().expect("inverse");
        assert_eq!(
            inv,
            Complex::new(
                Rational::ratio(3, 25).expect("re"),
                Rational::ratio(-4, 25).expect("im")
            )
        );
    }

    #[test]
    fn norm_predicates_and_demotion() {
        assert_eq!(c(3, 4).norm(), Rational::from_i64(25));
        assert!(c(0, 2).is_imag());
        assert!(!c(0, 0).is_imag());
        assert_eq!(c(5, 0).demote(), Ok(Rational::from_i64(5)));
        assert!(c(5, 1).demote().is_err());
    }
}
