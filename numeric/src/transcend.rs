//! epsilon 근사 초월함수. 결과는 epsilon 의 가장 가까운 배수로 반올림한다.
//! 실수 정의역을 벗어난 유리수 입력은 복소 함수로 넘어간다.

use log::trace;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::complex::Complex;
use crate::error::{MathError, MathResult};
use crate::kernel::complex::{self as cxk, checked_div, real_cx, Cx};
use crate::kernel::{integer_bits, precision_for, rat, real};
use crate::rational::Rational;
use crate::rounding;
use crate::value::{demoted, NumericValue};

/// 가장 가까운 배수, 동률은 짝수
const NEAREST: u32 = 24;

/// exp 인자 상한
const EXP_LIMIT: i64 = 1 << 22;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Transcendental {
    Exp,
    Ln,
    Log,
    Sin,
    Cos,
    Tan,
    Cot,
    Sec,
    Csc,
    Sinh,
    Cosh,
    Tanh,
    Coth,
    Sech,
    Csch,
    Asin,
    Acos,
    Atan,
    Acot,
    Asec,
    Acsc,
    Asinh,
    Acosh,
    Atanh,
    Acoth,
    Asech,
    Acsch,
    Gd,
    Agd,
}

impl Transcendental {
    pub const ALL: [Transcendental; 29] = [
        Transcendental::Exp,
        Transcendental::Ln,
        Transcendental::Log,
        Transcendental::Sin,
        Transcendental::Cos,
        Transcendental::Tan,
        Transcendental::Cot,
        Transcendental::Sec,
        Transcendental::Csc,
        Transcendental::Sinh,
        Transcendental::Cosh,
        Transcendental::Tanh,
        Transcendental::Coth,
        Transcendental::Sech,
        Transcendental::Csch,
        Transcendental::Asin,
        Transcendental::Acos,
        Transcendental::Atan,
        Transcendental::Acot,
        Transcendental::Asec,
        Transcendental::Acsc,
        Transcendental::Asinh,
        Transcendental::Acosh,
        Transcendental::Atanh,
        Transcendental::Acoth,
        Transcendental::Asech,
        Transcendental::Acsch,
        Transcendental::Gd,
        Transcendental::Agd,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Transcendental::Exp => "exp",
            Transcendental::Ln => "ln",
            Transcendental::Log => "log",
            Transcendental::Sin => "sin",
            Transcendental::Cos => "cos",
            Transcendental::Tan => "tan",
            Transcendental::Cot => "cot",
            Transcendental::Sec => "sec",
            Transcendental::Csc => "csc",
            Transcendental::Sinh => "sinh",
            Transcendental::Cosh => "cosh",
            Transcendental::Tanh => "tanh",
            Transcendental::Coth => "coth",
            Transcendental::Sech => "sech",
            Transcendental::Csch => "csch",
            Transcendental::Asin => "asin",
            Transcendental::Acos => "acos",
            Transcendental::Atan => "atan",
            Transcendental::Acot => "acot",
            Transcendental::Asec => "asec",
            Transcendental::Acsc => "acsc",
            Transcendental::Asinh => "asinh",
            Transcendental::Acosh => "acosh",
            Transcendental::Atanh => "atanh",
            Transcendental::Acoth => "acoth",
            Transcendental::Asech => "asech",
            Transcendental::Acsch => "acsch",
            Transcendental::Gd => "gd",
            Transcendental::Agd => "agd",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Transcendental::ALL.iter().copied().find(|f| f.name() == name)
    }
}

fn round_to(x: &BigRational, eps: &Rational) -> Rational {
    Rational::from_big(rounding::appr(x, eps.as_big(), NEAREST))
}

fn round_cx(z: &Cx, eps: &Rational) -> Complex {
    Complex::new(round_to(&z.re, eps), round_to(&z.im, eps))
}

fn working_bits(op: &'static str, eps: &Rational) -> u32 {
    let p = precision_for(eps.as_big());
    trace!("{}: eps {} -> {} working bits", op, eps, p);
    p
}

fn div_or(op: &'static str, a: BigRational, b: &BigRational) -> MathResult<BigRational> {
    if b.is_zero() {
        return Err(MathError::domain(op, "function is undefined at this point"));
    }
    Ok(a / b)
}

fn half() -> BigRational {
    BigRational::new(BigInt::one(), BigInt::from(2))
}

/// 실수 결과. None 이면 복소 함수로 넘긴다.
fn real_value(f: Transcendental, x: &BigRational, p: u32) -> MathResult<Option<BigRational>> {
    use Transcendental::*;
    let op = f.name();
    let one = BigRational::one();
    let singular = || MathError::domain(op, "function is undefined at this point");
    let value = match f {
        Exp => {
            if x > &rat(EXP_LIMIT) {
                return Err(MathError::domain(op, "argument too large"));
            }
            if x < &rat(-(p as i64) - 1) {
                BigRational::zero()
            } else {
                real::exp(x, p)
            }
        }
        Ln | Log => {
            if x.is_zero() {
                return Err(MathError::domain(op, "logarithm of zero"));
            }
            if x.is_negative() {
                return Ok(None);
            }
            let ln = real::ln(x, p + 8);
            if f == Log {
                ln / real::ln(&rat(10), p + 8)
            } else {
                ln
            }
        }
        Sin | Cos | Tan | Cot | Sec | Csc => {
            if x.is_zero() && matches!(f, Cot | Csc) {
                return Err(singular());
            }
            let (s, c) = real::sin_cos(x, p + 8);
            match f {
                Sin => s,
                Cos => c,
                Tan => div_or(op, s, &c)?,
                Cot => div_or(op, c, &s)?,
                Sec => div_or(op, one, &c)?,
                _ => div_or(op, one, &s)?,
            }
        }
        Sinh | Cosh | Tanh | Coth | Sech | Csch => {
            if x.is_zero() && matches!(f, Coth | Csch) {
                return Err(singular());
            }
            let (s, c) = real::sinh_cosh(x, p + 8);
            match f {
                Sinh => s,
                Cosh => c,
                Tanh => div_or(op, s, &c)?,
                Coth => div_or(op, c, &s)?,
                Sech => div_or(op, one, &c)?,
                _ => div_or(op, one, &s)?,
            }
        }
        Asin | Acos => {
            if x.abs() > one {
                return Ok(None);
            }
            let w = real::sqrt(&(&one - x * x), p + 8);
            if f == Asin {
                real::atan2(x, &w, p + 8)
            } else {
                real::atan2(&w, x, p + 8)
            }
        }
        Atan => real::atan(x, p + 8),
        Acot => real::pi(p + 8) * half() - real::atan(x, p + 8),
        Asec | Acsc | Asech | Acsch => {
            if x.is_zero() {
                return Err(singular());
            }
            let inner = match f {
                Asec => Acos,
                Acsc => Asin,
                Asech => Acosh,
                _ => Asinh,
            };
            return real_value(inner, &x.recip(), p);
        }
        Asinh => {
            let a = x.abs();
            let w = real::sqrt(&(&a * &a + &one), p + 8);
            let v = real::ln(&(a + w), p + 8);
            if x.is_negative() {
                -v
            } else {
                v
            }
        }
        Acosh => {
            if x < &one {
                return Ok(None);
            }
            let w = real::sqrt(&(x * x - &one), p + 8);
            real::ln(&(x + w), p + 8)
        }
        Atanh => {
            if x.abs() == one {
                return Err(singular());
            }
            if x.abs() > one {
                return Ok(None);
            }
            real::ln(&((&one + x) / (&one - x)), p + 8) * half()
        }
        Acoth => {
            if x.is_zero() || x.abs() == one {
                return Err(singular());
            }
            if x.abs() < one {
                return Ok(None);
            }
            real::ln(&((x + &one) / (x - &one)), p + 8) * half()
        }
        Gd => {
            let (s, _) = real::sinh_cosh(x, p + 8);
            real::atan(&s, p + 8)
        }
        Agd => {
            let (s, c) = real::sin_cos(x, p + 8);
            if !c.is_positive() {
                return Ok(None);
            }
            real::ln(&(&one + s), p + 8) - real::ln(&c, p + 8)
        }
    };
    Ok(Some(value))
}

/// 주 가지 복소 값
fn complex_value(f: Transcendental, z: &Cx, p: u32) -> MathResult<Cx> {
    use Transcendental::*;
    let op = f.name();
    let singular = || MathError::domain(op, "function is undefined at this point");
    let q = p + 8;
    let one = Cx::one();
    let value = match f {
        Exp => {
            if z.re > rat(EXP_LIMIT) {
                return Err(MathError::domain(op, "argument too large"));
            }
            cxk::exp(z, q)
        }
        Ln => cxk::ln(z, q).ok_or_else(|| MathError::domain(op, "logarithm of zero"))?,
        Log => {
            let ln = cxk::ln(z, q).ok_or_else(|| MathError::domain(op, "logarithm of zero"))?;
            ln.scale(real::ln(&rat(10), q).recip())
        }
        Sin => cxk::sin(z, q),
        Cos => cxk::cos(z, q),
        Tan => checked_div(&cxk::sin(z, q), &cxk::cos(z, q)).ok_or_else(singular)?,
        Cot => checked_div(&cxk::cos(z, q), &cxk::sin(z, q)).ok_or_else(singular)?,
        Sec => checked_div(&one, &cxk::cos(z, q)).ok_or_else(singular)?,
        Csc => checked_div(&one, &cxk::sin(z, q)).ok_or_else(singular)?,
        Sinh => cxk::sinh(z, q),
        Cosh => cxk::cosh(z, q),
        Tanh => checked_div(&cxk::sinh(z, q), &cxk::cosh(z, q)).ok_or_else(singular)?,
        Coth => checked_div(&cxk::cosh(z, q), &cxk::sinh(z, q)).ok_or_else(singular)?,
        Sech => checked_div(&one, &cxk::cosh(z, q)).ok_or_else(singular)?,
        Csch => checked_div(&one, &cxk::sinh(z, q)).ok_or_else(singular)?,
        Asin => cxk::asin(z, q).ok_or_else(singular)?,
        Acos => cxk::acos(z, q).ok_or_else(singular)?,
        Atan => cxk::atan(z, q).ok_or_else(singular)?,
        Acot => {
            let half_pi = real_cx(real::pi(q) * half());
            half_pi - cxk::atan(z, q).ok_or_else(singular)?
        }
        Asec | Acsc | Asech | Acsch => {
            let inv = checked_div(&one, z).ok_or_else(singular)?;
            let inner = match f {
                Asec => Acos,
                Acsc => Asin,
                Asech => Acosh,
                _ => Asinh,
            };
            return complex_value(inner, &inv, p);
        }
        Asinh => cxk::asinh(z, q).ok_or_else(singular)?,
        Acosh => cxk::acosh(z, q).ok_or_else(singular)?,
        Atanh => cxk::atanh(z, q).ok_or_else(singular)?,
        Acoth => {
            let ratio = checked_div(&(z + &one), &(z - &one)).ok_or_else(singular)?;
            cxk::ln(&ratio, q).ok_or_else(singular)?.scale(half())
        }
        Gd => {
            let t = complex_value(Tanh, &z.scale(half()), q)?;
            let a = cxk::atan(&t, q).ok_or_else(singular)?;
            a.scale(rat(2))
        }
        Agd => {
            let a = cxk::ln(&(&one + cxk::sin(z, q)), q).ok_or_else(singular)?;
            let b = cxk::ln(&cxk::cos(z, q), q).ok_or_else(singular)?;
            a - b
        }
    };
    Ok(value)
}

/// 정수 n 제곱근 차수 검사
fn root_order(n: &Rational) -> MathResult<u32> {
    let order = n
        .to_integer()
        .ok_or_else(|| MathError::domain("root", "non-integer root order"))?;
    if !order.is_positive() {
        return Err(MathError::domain("root", "root order must be positive"));
    }
    order
        .to_u32()
        .ok_or_else(|| MathError::domain("root", "root order too large"))
}

impl Rational {
    /// 초월함수 f(self). eps 는 이미 검사된 값.
    pub fn trans(&self, f: Transcendental, eps: &Rational) -> MathResult<NumericValue> {
        let p = working_bits(f.name(), eps);
        match real_value(f, self.as_big(), p)? {
            Some(value) => Ok(NumericValue::Rational(round_to(&value, eps))),
            None => {
                let z = complex_value(f, &real_cx(self.as_big().clone()), p)?;
                Ok(demoted(round_cx(&z, eps)))
            }
        }
    }

    /// eps 배수의 pi
    pub fn pi(eps: &Rational) -> Rational {
        let p = working_bits("pi", eps);
        round_to(&real::pi(p), eps)
    }

    /// 실수 x 의 편각: 0 또는 pi
    pub fn arg(&self, eps: &Rational) -> Rational {
        if self.is_negative() {
            Rational::pi(eps)
        } else {
            Rational::zero()
        }
    }

    /// atan2(self, x): self 가 y
    pub fn atan2(&self, x: &Rational, eps: &Rational) -> Rational {
        let p = working_bits("atan2", eps);
        round_to(&real::atan2(self.as_big(), x.as_big(), p + 8), eps)
    }

    pub fn hypot(&self, y: &Rational, eps: &Rational) -> Rational {
        let p = working_bits("hypot", eps);
        let sum = self.square() + y.square();
        round_to(&real::sqrt(sum.as_big(), p + 8), eps)
    }

    /// sqrt(1 - x^2), |x| <= 1
    pub fn ltol(&self, eps: &Rational) -> MathResult<Rational> {
        if self.abs() > Rational::one() {
            return Err(MathError::domain("ltol", "argument out of range [-1, 1]"));
        }
        let p = working_bits("ltol", eps);
        let rest = Rational::one() - self.square();
        Ok(round_to(&real::sqrt(rest.as_big(), p + 8), eps))
    }

    /// rnd: 하위 5비트 반올림, 32 정확한 근 우선, 64 음의 근
    pub fn sqrt_with(&self, eps: &Rational, rnd: u32) -> NumericValue {
        let root = |x: &Rational| -> Rational {
            if rnd & 32 != 0 {
                if let Some(exact) = rounding::exact_sqrt(x.as_big()) {
                    return Rational::from_big(exact);
                }
            }
            Rational::from_big(rounding::sqrt_appr(x.as_big(), eps.as_big(), rnd & 31))
        };
        let magnitude = root(&self.abs());
        let magnitude = if rnd & 64 != 0 { -magnitude } else { magnitude };
        if self.is_negative() {
            NumericValue::Complex(Complex::new(Rational::zero(), magnitude))
        } else {
            NumericValue::Rational(magnitude)
        }
    }

    pub fn root_with(&self, n: &Rational, eps: &Rational) -> MathResult<NumericValue> {
        let order = root_order(n)?;
        if self.is_negative() && order % 2 == 0 {
            return Err(MathError::domain("root", "even root of a negative number"));
        }
        let p = working_bits("root", eps);
        let magnitude = real::root(self.abs().as_big(), order, p + 8);
        let value = round_to(&magnitude, eps);
        Ok(NumericValue::Rational(if self.is_negative() {
            -value
        } else {
            value
        }))
    }

    /// self^y. 정확한 결과가 있으면 그대로 두고 아니면 eps 로 반올림.
    pub fn power_real(&self, y: &Rational, eps: &Rational) -> MathResult<NumericValue> {
        if self.is_zero() {
            if y.is_negative() {
                return Err(MathError::domain("power", "zero to a negative power"));
            }
            if y.is_zero() {
                return Ok(NumericValue::Rational(Rational::one()));
            }
            return Ok(NumericValue::Rational(Rational::zero()));
        }
        if let Some(exp) = y.to_integer() {
            let exact = self.pow_int(&exp)?;
            return Ok(NumericValue::Rational(round_to(exact.as_big(), eps)));
        }
        if self.is_negative() {
            return Complex::from_rational(self.clone())
                .power_with(&Complex::from_rational(y.clone()), eps)
                .map(demoted);
        }
        if let Some(order) = y.denom().to_u32() {
            if let Some(exact) = exact_root(self.as_big(), order) {
                let value = Rational::from_big(exact).pow_int(y.numer())?;
                return Ok(NumericValue::Rational(round_to(value.as_big(), eps)));
            }
        }
        let p = working_bits("power", eps);
        let estimate = real::ln(self.as_big(), 16) * y.as_big();
        let extra = integer_bits(&estimate) * 2 + integer_bits(y.as_big()) + 8;
        let exponent = real::ln(self.as_big(), p + extra) * y.as_big();
        if exponent > rat(EXP_LIMIT) {
            return Err(MathError::domain("power", "result too large"));
        }
        Ok(NumericValue::Rational(round_to(
            &real::exp(&exponent, p + 8),
            eps,
        )))
    }
}

fn exact_root(x: &BigRational, n: u32) -> Option<BigRational> {
    use num_integer::Roots;
    let num = x.numer().nth_root(n);
    let den = x.denom().nth_root(n);
    if &num.pow(n) == x.numer() && &den.pow(n) == x.denom() {
        Some(BigRational::new(num, den))
    } else {
        None
    }
}

impl Complex {
    /// 복소 초월함수. 결과는 복소수로 남는다.
    pub fn trans(&self, f: Transcendental, eps: &Rational) -> MathResult<Complex> {
        let p = working_bits(f.name(), eps);
        let z = complex_value(f, &self.to_cx(), p)?;
        Ok(round_cx(&z, eps))
    }

    /// 절댓값 (유리수)
    pub fn abs_with(&self, eps: &Rational) -> Rational {
        let p = working_bits("abs", eps);
        round_to(&cxk::abs(&self.to_cx(), p + 8), eps)
    }

    pub fn arg_with(&self, eps: &Rational) -> Rational {
        let p = working_bits("arg", eps);
        round_to(&cxk::arg(&self.to_cx(), p + 8), eps)
    }

    pub fn power_with(&self, y: &Complex, eps: &Rational) -> MathResult<Complex> {
        if y.is_real() {
            if let Some(exp) = y.re().to_integer() {
                if self.is_zero() && exp.is_negative() {
                    return Err(MathError::domain("power", "zero to a negative power"));
                }
                let exact = self.pow_int(&exp)?;
                return Ok(round_cx(&exact.to_cx(), eps));
            }
        }
        let p = working_bits("power", eps);
        let z = cxk::pow(&self.to_cx(), &y.to_cx(), p)
            .ok_or_else(|| MathError::domain("power", "zero to a non-positive power"))?;
        Ok(round_cx(&z, eps))
    }

    /// 주 제곱근을 성분별 rnd 로. 64 는 음의 근.
    pub fn sqrt_with(&self, eps: &Rational, rnd: u32) -> Complex {
        let p = working_bits("sqrt", eps);
        let z = cxk::sqrt(&self.to_cx(), p + 16);
        let exact = rnd & 32 != 0 && &z * &z == self.to_cx();
        let component = |x: &BigRational| {
            if exact {
                Rational::from_big(x.clone())
            } else {
                Rational::from_big(rounding::appr(x, eps.as_big(), rnd & 31))
            }
        };
        let root = Complex::new(component(&z.re), component(&z.im));
        if rnd & 64 != 0 {
            -&root
        } else {
            root
        }
    }

    pub fn root_with(&self, n: &Rational, eps: &Rational) -> MathResult<Complex> {
        let order = root_order(n)?;
        if self.is_zero() {
            return Ok(Complex::from_rational(Rational::zero()));
        }
        let p = working_bits("root", eps);
        Ok(round_cx(&cxk::root(&self.to_cx(), order, p + 8), eps))
    }
}

/// r (cos t + i sin t). t 가 0 이면 유리수.
pub fn polar(r: &Rational, theta: &Rational, eps: &Rational) -> NumericValue {
    if theta.is_zero() {
        return NumericValue::Rational(r.clone());
    }
    let p = working_bits("polar", eps);
    let bits = p + 8 + integer_bits(r.as_big());
    let (s, c) = real::sin_cos(theta.as_big(), bits);
    let re = round_to(&(r.as_big() * c), eps);
    let im = round_to(&(r.as_big() * s), eps);
    demoted(Complex::new(re, im))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn eps() -> Rational {
        Rational::pow10(-20)
    }

    fn q(n: i64, d: i64) -> Rational {
        Rational::ratio(n, d).expect("ratio")
    }

    fn near(value: &Rational, expected: f64) -> bool {
        let v = value.to_f64().unwrap_or(f64::NAN);
        (v - expected).abs() <= 1e-12 * expected.abs().max(1.0)
    }

    fn real_of(value: NumericValue) -> Rational {
        match value {
            NumericValue::Rational(q) => q,
            other => panic!("expected rational, got {:?}", other),
        }
    }

    fn complex_of(value: NumericValue) -> Complex {
        match value {
            NumericValue::Complex(c) => c,
            other => panic!("expected complex, got {:?}", other),
        }
    }

    #[test]
    fn exact_points_stay_exact() {
        let e = eps();
        assert_eq!(real_of(Rational::zero().trans(Transcendental::Sin, &e).expect("sin")), q(0, 1));
        assert_eq!(real_of(Rational::zero().trans(Transcendental::Exp, &e).expect("exp")), q(1, 1));
        assert_eq!(real_of(Rational::one().trans(Transcendental::Ln, &e).expect("ln")), q(0, 1));
        assert_eq!(real_of(Rational::one().trans(Transcendental::Asec, &e).expect("asec")), q(0, 1));
    }

    #[test]
    fn real_values_match_reference_digits() {
        let e = eps();
        let cases = [
            (Transcendental::Exp, q(-1, 1), 0.3678794411714423216),
            (Transcendental::Tan, q(1, 1), 1.55740772465490223051),
            (Transcendental::Cot, q(1, 1), 0.64209261593433070301),
            (Transcendental::Sech, q(1, 1), 0.64805427366388539958),
            (Transcendental::Acot, q(-1, 1), 2.35619449019234492885),
            (Transcendental::Asinh, q(-1, 1), -0.88137358701954302523),
            (Transcendental::Atanh, q(1, 2), 0.5493061443340548457),
            (Transcendental::Acoth, q(2, 1), 0.5493061443340548457),
            (Transcendental::Asech, q(1, 2), 1.31695789692481670862),
            (Transcendental::Gd, q(1, 1), 0.86576948323965862429),
            (Transcendental::Agd, q(1, 1), 1.22619117088351707081),
        ];
        for (f, x, expected) in cases {
            let value = real_of(x.trans(f, &e).expect(f.name()));
            assert!(near(&value, expected), "{} = {}", f.name(), value);
        }
    }

    #[test]
    fn out_of_domain_reals_become_complex() {
        let e = eps();
        let acos = complex_of(q(2, 1).trans(Transcendental::Acos, &e).expect("acos"));
        assert!(acos.re().is_zero() && near(&acos.im(), 1.31695789692481670863));
        let ln = complex_of(q(-2, 1).trans(Transcendental::Ln, &e).expect("ln"));
        assert!(near(&ln.re(), 0.69314718055994530942) && near(&ln.im(), std::f64::consts::PI));
        let asech = complex_of(q(-1, 2).trans(Transcendental::Asech, &e).expect("asech"));
        assert!(near(&asech.re(), -1.31695789692481670863) && near(&asech.im(), std::f64::consts::PI));
        let agd = complex_of(q(2, 1).trans(Transcendental::Agd, &e).expect("agd"));
        assert!(near(&agd.re(), 1.5234524435626735209) && near(&agd.im(), -std::f64::consts::PI));
    }

    #[test]
    fn singular_points_are_domain_errors() {
        let e = eps();
        for (f, x) in [
            (Transcendental::Ln, 0),
            (Transcendental::Log, 0),
            (Transcendental::Cot, 0),
            (Transcendental::Csch, 0),
            (Transcendental::Acoth, 1),
            (Transcendental::Acoth, 0),
            (Transcendental::Atanh, -1),
            (Transcendental::Asec, 0),
        ] {
            let err = Rational::from_i64(x).trans(f, &e).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Domain, "{}", f.name());
        }
    }

    #[test]
    fn powers_prefer_exact_results() {
        let e = eps();
        assert_eq!(real_of(q(81, 1).power_real(&q(1, 4), &e).expect("81^1/4")), q(3, 1));
        assert_eq!(real_of(q(8, 1).power_real(&q(2, 3), &e).expect("8^2/3")), q(4, 1));
        assert_eq!(real_of(q(-2, 1).power_real(&q(3, 1), &e).expect("-2^3")), q(-8, 1));
        let w = real_of(q(12345, 10000).power_real(&q(10, 1), &e).expect("power"));
        assert!(near(&w, 8.2207405646327461795));
        let c = complex_of(q(-1, 1).power_real(&q(1, 10), &e).expect("-1^0.1"));
        assert!(near(&c.re(), 0.95105651629515357212) && near(&c.im(), 0.3090169943749474241));
        assert!(Rational::zero().power_real(&q(-1, 1), &e).is_err());
    }

    #[test]
    fn square_roots_and_nth_roots() {
        let e = q(1, 10000);
        assert_eq!(real_of(q(4, 1).sqrt_with(&e, 0)), q(2, 1));
        assert_eq!(real_of(q(4, 1).sqrt_with(&e, 64)), q(-2, 1));
        assert_eq!(real_of(q(2, 1).sqrt_with(&e, 1)), q(14143, 10000));
        assert_eq!(complex_of(q(-4, 1).sqrt_with(&e, 24)), Complex::from_i64(0, 2));
        let r = real_of(q(7, 1).root_with(&q(4, 1), &eps()).expect("root"));
        assert!(near(&r, 1.6265765616977856));
        assert!(q(1, 1).root_with(&q(0, 1), &eps()).is_err());
        assert!(q(-2, 1).root_with(&q(4, 1), &eps()).is_err());
        assert_eq!(real_of(q(-8, 1).root_with(&q(3, 1), &eps()).expect("cbrt")), q(-2, 1));
    }

    #[test]
    fn complex_functions_round_each_part() {
        let e = eps();
        let z = Complex::from_i64(1, 2).trans(Transcendental::Exp, &e).expect("exp");
        assert!(near(&z.re(), -1.13120438375681363843) && near(&z.im(), 2.47172667200481892762));
        let log = Complex::from_i64(2, 2).trans(Transcendental::Log, &e).expect("log");
        assert!(near(&log.re(), 0.45154499349597179282) && near(&log.im(), 0.34109408846046033687));
        let gd = Complex::from_i64(2, 1).trans(Transcendental::Gd, &e).expect("gd");
        assert!(near(&gd.re(), 1.422911462459226797) && near(&gd.im(), 0.22751065843194319695));
        let agd = Complex::from_i64(1, 2).trans(Transcendental::Agd, &e).expect("agd");
        assert!(near(&agd.re(), 0.22751065843194319695) && near(&agd.im(), 1.422911462459226797));
        assert!(near(&Complex::from_i64(1, 1).abs_with(&e), std::f64::consts::SQRT_2));
        assert_eq!(Complex::from_i64(3, -4).abs_with(&e), q(5, 1));
        assert!(near(&Complex::from_i64(2, 3).arg_with(&e), 0.98279372324732906799));
    }

    #[test]
    fn complex_sqrt_and_roots() {
        let e = q(1, 10000);
        let c = Complex::from_i64(0, 8);
        assert_eq!(c.sqrt_with(&e, 0), Complex::from_i64(2, 2));
        assert_eq!(c.sqrt_with(&e, 64), Complex::from_i64(-2, -2));
        let r = Complex::from_i64(0, 1).root_with(&q(100, 1), &eps()).expect("root");
        assert!(near(&r.re(), 0.99987663248166059864) && near(&r.im(), 0.01570731731182067575));
    }

    #[test]
    fn polar_and_pi() {
        let e = eps();
        assert!(near(&Rational::pi(&e), std::f64::consts::PI));
        assert_eq!(polar(&q(2, 1), &q(0, 1), &e), NumericValue::int(2));
        match polar(&q(2, 1), &q(1, 1), &e) {
            NumericValue::Complex(c) => {
                assert!(near(&c.re(), 2.0 * 1f64.cos()) && near(&c.im(), 2.0 * 1f64.sin()))
            }
            other => panic!("expected complex, got {:?}", other),
        }
    }
}
