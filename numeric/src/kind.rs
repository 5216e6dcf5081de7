//! 세 종류 수가 공통으로 제공하는 연산. 분배기는 이 트레잇만 본다.
//!
//! Integer 는 neg, abs, conj, re, im, int, frac, norm 만 정수로 남기고
//! 나머지는 유리수 연산에 맡긴다. Complex 의 반올림 계열(appr, round,
//! bround, mod, quo, ceil, floor, mmin)은 성분별로 계산한 뒤 허수부가
//! 0 이면 유리수로 내린다.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive};

use crate::complex::Complex;
use crate::config::{Config, DisplayMode};
use crate::error::{MathError, MathResult};
use crate::format;
use crate::integer::Integer;
use crate::kernel::theory::factorial;
use crate::rational::Rational;
use crate::rounding;
use crate::transcend::Transcendental;
use crate::value::{demoted, Kind, NumericValue};

/// comb, perm 의 k 상한
const COUNT_LIMIT: u64 = 1 << 31;

pub trait NumericKind {
    fn kind(&self) -> Kind;
    fn to_value(&self) -> NumericValue;

    fn is_zero(&self) -> bool;
    fn is_real(&self) -> bool;
    fn is_imag(&self) -> bool;
    fn is_int(&self) -> bool;
    fn is_even(&self) -> bool;
    fn is_odd(&self) -> bool;

    fn neg(&self) -> NumericValue;
    fn conj(&self) -> NumericValue;
    fn re(&self) -> NumericValue;
    fn im(&self) -> NumericValue;
    /// 0 쪽으로 자른 정수부
    fn int(&self) -> NumericValue;
    fn frac(&self) -> NumericValue;
    fn norm(&self) -> NumericValue;
    fn inverse(&self) -> MathResult<NumericValue>;

    fn abs(&self, cx: &Config, eps: Option<&Rational>) -> MathResult<NumericValue>;
    fn arg(&self, cx: &Config, eps: Option<&Rational>) -> MathResult<NumericValue>;
    /// 실수는 -1, 0, 1. 복소수는 성분별 부호.
    fn cmp_to(&self, other: &NumericValue) -> NumericValue;
    fn estr(&self) -> String;
    fn to_s(&self, cx: &Config, mode: Option<DisplayMode>) -> String;

    fn appr(&self, cx: &Config, eps: Option<&Rational>, rnd: Option<u32>)
        -> MathResult<NumericValue>;
    fn round(&self, cx: &Config, places: Option<i64>, rnd: Option<u32>)
        -> MathResult<NumericValue>;
    fn bround(&self, cx: &Config, places: Option<i64>, rnd: Option<u32>)
        -> MathResult<NumericValue>;
    fn modulo(&self, cx: &Config, y: &Rational, rnd: Option<u32>) -> NumericValue;
    fn quo(&self, cx: &Config, y: &Rational, rnd: Option<u32>) -> NumericValue;
    fn ceil(&self) -> NumericValue;
    fn floor(&self) -> NumericValue;
    /// 절댓값이 가장 작은 나머지
    fn mmin(&self, md: &Rational) -> NumericValue;

    fn power(&self, cx: &Config, y: &NumericValue, eps: Option<&Rational>)
        -> MathResult<NumericValue>;
    fn sqrt(&self, cx: &Config, eps: Option<&Rational>, rnd: Option<u32>)
        -> MathResult<NumericValue>;
    fn root(&self, cx: &Config, n: &Rational, eps: Option<&Rational>)
        -> MathResult<NumericValue>;
    fn comb(&self, k: &NumericValue) -> MathResult<NumericValue> {
        combination(&self.to_value(), k)
    }
    fn perm(&self, k: &NumericValue) -> MathResult<NumericValue> {
        permutation(&self.to_value(), k)
    }

    fn trans(&self, f: Transcendental, cx: &Config, eps: Option<&Rational>)
        -> MathResult<NumericValue>;

    /// floor(log_base |x|)
    fn ilog(&self, base: &Rational) -> MathResult<NumericValue>;
    fn ilog2(&self) -> MathResult<NumericValue> {
        self.ilog(&Rational::from_i64(2))
    }
    fn ilog10(&self) -> MathResult<NumericValue> {
        self.ilog(&Rational::from_i64(10))
    }
}

impl NumericValue {
    pub fn as_kind(&self) -> &dyn NumericKind {
        match self {
            NumericValue::Integer(n) => n,
            NumericValue::Rational(q) => q,
            NumericValue::Complex(c) => c,
        }
    }
}

fn real(x: BigRational) -> NumericValue {
    NumericValue::Rational(Rational::from_big(x))
}

fn places_unit(op: &'static str, places: Option<i64>, radix: u32) -> MathResult<Rational> {
    let places = places.unwrap_or(0);
    if places.unsigned_abs() >= COUNT_LIMIT {
        return Err(MathError::domain(op, "too many places"));
    }
    Ok(match radix {
        2 => Rational::pow2(-places),
        _ => Rational::pow10(-places),
    })
}

fn sign_value(x: &Rational) -> Rational {
    Rational::from_i64(x.signum() as i64)
}

fn compare_values(a: &NumericValue, b: &NumericValue) -> NumericValue {
    if let (Ok(x), Ok(y)) = (a.to_rational("cmp"), b.to_rational("cmp")) {
        return NumericValue::Rational(sign_value(&(x - y)));
    }
    let diff = &a.to_complex() - &b.to_complex();
    demoted(Complex::new(sign_value(&diff.re()), sign_value(&diff.im())))
}

/// 정수 k, 0 <= k < 2^31 이면 Some. 음수는 None.
fn falling_count(k: &NumericValue, op: &'static str) -> MathResult<Option<BigInt>> {
    let k = k
        .to_rational(op)?
        .to_integer()
        .ok_or_else(|| MathError::domain(op, "non-integer count"))?;
    if k.is_negative() {
        return Ok(None);
    }
    Ok(Some(k))
}

fn small_count(k: &BigInt, op: &'static str) -> MathResult<u64> {
    match k.to_u64() {
        Some(v) if v < COUNT_LIMIT => Ok(v),
        _ => Err(MathError::domain(op, "count too large")),
    }
}

/// x (x-1) ... (x-k+1). 정수 수신자도 유리수로 계산한다.
fn falling(x: &NumericValue, k: u64) -> NumericValue {
    let one = NumericValue::Rational(Rational::one());
    let mut acc = one.clone();
    let mut term = x.promote(Kind::Rational);
    for _ in 0..k {
        acc = &acc * &term;
        term = &term - &one;
    }
    acc
}

fn combination(x: &NumericValue, k: &NumericValue) -> MathResult<NumericValue> {
    let mut k = match falling_count(k, "comb")? {
        Some(k) => k,
        None => return Ok(NumericValue::Rational(Rational::zero())),
    };
    if let Some(n) = x.to_rational("comb").ok().and_then(|q| q.to_integer()) {
        if !n.is_negative() {
            if k > n {
                return Ok(NumericValue::Rational(Rational::zero()));
            }
            if &k * 2 > n {
                k = n - k;
            }
        }
    }
    let k = small_count(&k, "comb")?;
    let den = NumericValue::Rational(Rational::from_integer(factorial(k as u32)));
    falling(x, k).try_div(&den)
}

fn permutation(x: &NumericValue, k: &NumericValue) -> MathResult<NumericValue> {
    let k = falling_count(k, "perm")?
        .ok_or_else(|| MathError::domain("perm", "negative count"))?;
    Ok(falling(x, small_count(&k, "perm")?))
}

fn ilog_real(x: &Rational, base: &BigInt) -> MathResult<i64> {
    if x.is_zero() {
        return Err(MathError::domain("ilog", "logarithm of zero"));
    }
    let x = Rational::abs(x);
    let b = Rational::from_integer(base.clone());
    let bits = x.numer().bits() as f64 - x.denom().bits() as f64;
    let per = base.to_f64().map(f64::log2).unwrap_or(f64::INFINITY);
    let mut k = (bits / per).floor() as i64;
    loop {
        if b.pow_int(&BigInt::from(k))? > x {
            k -= 1;
        } else if b.pow_int(&BigInt::from(k + 1))? <= x {
            k += 1;
        } else {
            return Ok(k);
        }
    }
}

fn ilog_base(base: &Rational) -> MathResult<BigInt> {
    match base.to_integer() {
        Some(b) if b >= BigInt::from(2) => Ok(b),
        _ => Err(MathError::domain("ilog", "base must be an integer of at least 2")),
    }
}

impl NumericKind for Rational {
    fn kind(&self) -> Kind {
        Kind::Rational
    }

    fn to_value(&self) -> NumericValue {
        NumericValue::Rational(self.clone())
    }

    fn is_zero(&self) -> bool {
        Rational::is_zero(self)
    }

    fn is_real(&self) -> bool {
        true
    }

    fn is_imag(&self) -> bool {
        false
    }

    fn is_int(&self) -> bool {
        self.is_integer()
    }

    fn is_even(&self) -> bool {
        Rational::is_even(self)
    }

    fn is_odd(&self) -> bool {
        Rational::is_odd(self)
    }

    fn neg(&self) -> NumericValue {
        NumericValue::Rational(-self)
    }

    fn conj(&self) -> NumericValue {
        self.to_value()
    }

    fn re(&self) -> NumericValue {
        self.to_value()
    }

    fn im(&self) -> NumericValue {
        NumericValue::Rational(Rational::zero())
    }

    fn int(&self) -> NumericValue {
        NumericValue::Rational(Rational::from_integer(self.trunc()))
    }

    fn frac(&self) -> NumericValue {
        NumericValue::Rational(self.fract())
    }

    fn norm(&self) -> NumericValue {
        NumericValue::Rational(self.square())
    }

    fn inverse(&self) -> MathResult<NumericValue> {
        Ok(NumericValue::Rational(self.recip()?))
    }

    fn abs(&self, _cx: &Config, _eps: Option<&Rational>) -> MathResult<NumericValue> {
        Ok(NumericValue::Rational(Rational::abs(self)))
    }

    fn arg(&self, cx: &Config, eps: Option<&Rational>) -> MathResult<NumericValue> {
        let eps = cx.effective_epsilon("arg", eps)?;
        Ok(NumericValue::Rational(Rational::arg(self, eps)))
    }

    fn cmp_to(&self, other: &NumericValue) -> NumericValue {
        compare_values(&self.to_value(), other)
    }

    fn estr(&self) -> String {
        format::estr_rational(self)
    }

    fn to_s(&self, cx: &Config, mode: Option<DisplayMode>) -> String {
        format::format_rational(self, mode.unwrap_or(cx.mode()), cx.display())
    }

    fn appr(
        &self,
        cx: &Config,
        eps: Option<&Rational>,
        rnd: Option<u32>,
    ) -> MathResult<NumericValue> {
        let eps = eps.unwrap_or(cx.epsilon());
        let rnd = rnd.unwrap_or(cx.appr());
        Ok(real(rounding::appr(self.as_big(), eps.as_big(), rnd)))
    }

    fn round(
        &self,
        cx: &Config,
        places: Option<i64>,
        rnd: Option<u32>,
    ) -> MathResult<NumericValue> {
        let unit = places_unit("round", places, 10)?;
        let rnd = rnd.unwrap_or(cx.round());
        Ok(real(rounding::appr(self.as_big(), unit.as_big(), rnd)))
    }

    fn bround(
        &self,
        cx: &Config,
        places: Option<i64>,
        rnd: Option<u32>,
    ) -> MathResult<NumericValue> {
        let unit = places_unit("bround", places, 2)?;
        let rnd = rnd.unwrap_or(cx.round());
        Ok(real(rounding::appr(self.as_big(), unit.as_big(), rnd)))
    }

    fn modulo(&self, cx: &Config, y: &Rational, rnd: Option<u32>) -> NumericValue {
        let rnd = rnd.unwrap_or(cx.modulo());
        real(rounding::modulo(self.as_big(), y.as_big(), rnd))
    }

    fn quo(&self, cx: &Config, y: &Rational, rnd: Option<u32>) -> NumericValue {
        let rnd = rnd.unwrap_or(cx.quo());
        real(BigRational::from_integer(rounding::quo(
            self.as_big(),
            y.as_big(),
            rnd,
        )))
    }

    fn ceil(&self) -> NumericValue {
        NumericValue::Rational(Rational::from_integer(Rational::ceil(self)))
    }

    fn floor(&self) -> NumericValue {
        NumericValue::Rational(Rational::from_integer(Rational::floor(self)))
    }

    fn mmin(&self, md: &Rational) -> NumericValue {
        real(rounding::modulo(self.as_big(), md.as_big(), 16))
    }

    fn power(
        &self,
        cx: &Config,
        y: &NumericValue,
        eps: Option<&Rational>,
    ) -> MathResult<NumericValue> {
        let eps = cx.effective_epsilon("power", eps)?;
        match y.to_rational("power") {
            Ok(y) => self.power_real(&y, eps),
            Err(_) => Complex::from_rational(self.clone())
                .power_with(&y.to_complex(), eps)
                .map(demoted),
        }
    }

    fn sqrt(
        &self,
        cx: &Config,
        eps: Option<&Rational>,
        rnd: Option<u32>,
    ) -> MathResult<NumericValue> {
        let eps = cx.effective_epsilon("sqrt", eps)?;
        Ok(self.sqrt_with(eps, rnd.unwrap_or(cx.sqrt())))
    }

    fn root(
        &self,
        cx: &Config,
        n: &Rational,
        eps: Option<&Rational>,
    ) -> MathResult<NumericValue> {
        let eps = cx.effective_epsilon("root", eps)?;
        self.root_with(n, eps)
    }

    fn trans(
        &self,
        f: Transcendental,
        cx: &Config,
        eps: Option<&Rational>,
    ) -> MathResult<NumericValue> {
        let eps = cx.effective_epsilon(f.name(), eps)?;
        Rational::trans(self, f, eps)
    }

    fn ilog(&self, base: &Rational) -> MathResult<NumericValue> {
        let base = ilog_base(base)?;
        Ok(NumericValue::Rational(Rational::from_i64(ilog_real(
            self, &base,
        )?)))
    }
}

impl NumericKind for Integer {
    fn kind(&self) -> Kind {
        Kind::Integer
    }

    fn to_value(&self) -> NumericValue {
        NumericValue::Integer(self.clone())
    }

    fn is_zero(&self) -> bool {
        Integer::is_zero(self)
    }

    fn is_real(&self) -> bool {
        true
    }

    fn is_imag(&self) -> bool {
        false
    }

    fn is_int(&self) -> bool {
        true
    }

    fn is_even(&self) -> bool {
        Integer::is_even(self)
    }

    fn is_odd(&self) -> bool {
        !Integer::is_even(self)
    }

    fn neg(&self) -> NumericValue {
        NumericValue::Integer(-self)
    }

    fn conj(&self) -> NumericValue {
        self.to_value()
    }

    fn re(&self) -> NumericValue {
        self.to_value()
    }

    fn im(&self) -> NumericValue {
        NumericValue::int(0)
    }

    fn int(&self) -> NumericValue {
        self.to_value()
    }

    fn frac(&self) -> NumericValue {
        NumericValue::int(0)
    }

    fn norm(&self) -> NumericValue {
        NumericValue::Integer(self * self)
    }

    fn inverse(&self) -> MathResult<NumericValue> {
        NumericKind::inverse(&self.to_rational())
    }

    fn abs(&self, _cx: &Config, _eps: Option<&Rational>) -> MathResult<NumericValue> {
        Ok(NumericValue::Integer(Integer::abs(self)))
    }

    fn arg(&self, cx: &Config, eps: Option<&Rational>) -> MathResult<NumericValue> {
        NumericKind::arg(&self.to_rational(), cx, eps)
    }

    fn cmp_to(&self, other: &NumericValue) -> NumericValue {
        compare_values(&self.to_value(), other)
    }

    fn estr(&self) -> String {
        format::estr_rational(&self.to_rational())
    }

    fn to_s(&self, cx: &Config, mode: Option<DisplayMode>) -> String {
        NumericKind::to_s(&self.to_rational(), cx, mode)
    }

    fn appr(
        &self,
        cx: &Config,
        eps: Option<&Rational>,
        rnd: Option<u32>,
    ) -> MathResult<NumericValue> {
        NumericKind::appr(&self.to_rational(), cx, eps, rnd)
    }

    fn round(
        &self,
        cx: &Config,
        places: Option<i64>,
        rnd: Option<u32>,
    ) -> MathResult<NumericValue> {
        NumericKind::round(&self.to_rational(), cx, places, rnd)
    }

    fn bround(
        &self,
        cx: &Config,
        places: Option<i64>,
        rnd: Option<u32>,
    ) -> MathResult<NumericValue> {
        NumericKind::bround(&self.to_rational(), cx, places, rnd)
    }

    fn modulo(&self, cx: &Config, y: &Rational, rnd: Option<u32>) -> NumericValue {
        NumericKind::modulo(&self.to_rational(), cx, y, rnd)
    }

    fn quo(&self, cx: &Config, y: &Rational, rnd: Option<u32>) -> NumericValue {
        NumericKind::quo(&self.to_rational(), cx, y, rnd)
    }

    fn ceil(&self) -> NumericValue {
        NumericKind::ceil(&self.to_rational())
    }

    fn floor(&self) -> NumericValue {
        NumericKind::floor(&self.to_rational())
    }

    fn mmin(&self, md: &Rational) -> NumericValue {
        NumericKind::mmin(&self.to_rational(), md)
    }

    fn power(
        &self,
        cx: &Config,
        y: &NumericValue,
        eps: Option<&Rational>,
    ) -> MathResult<NumericValue> {
        NumericKind::power(&self.to_rational(), cx, y, eps)
    }

    fn sqrt(
        &self,
        cx: &Config,
        eps: Option<&Rational>,
        rnd: Option<u32>,
    ) -> MathResult<NumericValue> {
        NumericKind::sqrt(&self.to_rational(), cx, eps, rnd)
    }

    fn root(
        &self,
        cx: &Config,
        n: &Rational,
        eps: Option<&Rational>,
    ) -> MathResult<NumericValue> {
        NumericKind::root(&self.to_rational(), cx, n, eps)
    }

    fn trans(
        &self,
        f: Transcendental,
        cx: &Config,
        eps: Option<&Rational>,
    ) -> MathResult<NumericValue> {
        NumericKind::trans(&self.to_rational(), f, cx, eps)
    }

    fn ilog(&self, base: &Rational) -> MathResult<NumericValue> {
        NumericKind::ilog(&self.to_rational(), base)
    }
}

impl Complex {
    fn map_parts(&self, f: impl Fn(&BigRational) -> BigRational) -> NumericValue {
        demoted(Complex::new(
            Rational::from_big(f(self.re().as_big())),
            Rational::from_big(f(self.im().as_big())),
        ))
    }

    fn parts_value(re: Rational, im: Rational) -> NumericValue {
        NumericValue::Complex(Complex::new(re, im))
    }
}

impl NumericKind for Complex {
    fn kind(&self) -> Kind {
        Kind::Complex
    }

    fn to_value(&self) -> NumericValue {
        NumericValue::Complex(self.clone())
    }

    fn is_zero(&self) -> bool {
        Complex::is_zero(self)
    }

    fn is_real(&self) -> bool {
        Complex::is_real(self)
    }

    fn is_imag(&self) -> bool {
        Complex::is_imag(self)
    }

    fn is_int(&self) -> bool {
        Complex::is_real(self) && self.re().is_integer()
    }

    fn is_even(&self) -> bool {
        Complex::is_real(self) && self.re().is_even()
    }

    fn is_odd(&self) -> bool {
        Complex::is_real(self) && self.re().is_odd()
    }

    fn neg(&self) -> NumericValue {
        NumericValue::Complex(-self)
    }

    fn conj(&self) -> NumericValue {
        NumericValue::Complex(Complex::conj(self))
    }

    fn re(&self) -> NumericValue {
        NumericValue::Rational(Complex::re(self))
    }

    fn im(&self) -> NumericValue {
        NumericValue::Rational(Complex::im(self))
    }

    fn int(&self) -> NumericValue {
        Complex::parts_value(
            Rational::from_integer(Complex::re(self).trunc()),
            Rational::from_integer(Complex::im(self).trunc()),
        )
    }

    fn frac(&self) -> NumericValue {
        Complex::parts_value(Complex::re(self).fract(), Complex::im(self).fract())
    }

    fn norm(&self) -> NumericValue {
        NumericValue::Rational(Complex::norm(self))
    }

    fn inverse(&self) -> MathResult<NumericValue> {
        Ok(NumericValue::Complex(Complex::inverse(self)?))
    }

    fn abs(&self, cx: &Config, eps: Option<&Rational>) -> MathResult<NumericValue> {
        let eps = cx.effective_epsilon("abs", eps)?;
        Ok(NumericValue::Rational(self.abs_with(eps)))
    }

    fn arg(&self, cx: &Config, eps: Option<&Rational>) -> MathResult<NumericValue> {
        let eps = cx.effective_epsilon("arg", eps)?;
        Ok(NumericValue::Rational(self.arg_with(eps)))
    }

    fn cmp_to(&self, other: &NumericValue) -> NumericValue {
        compare_values(&self.to_value(), other)
    }

    fn estr(&self) -> String {
        Complex::estr(self)
    }

    fn to_s(&self, cx: &Config, mode: Option<DisplayMode>) -> String {
        self.to_string_mode(mode.unwrap_or(cx.mode()), cx.display())
    }

    fn appr(
        &self,
        cx: &Config,
        eps: Option<&Rational>,
        rnd: Option<u32>,
    ) -> MathResult<NumericValue> {
        let eps = eps.unwrap_or(cx.epsilon());
        let rnd = rnd.unwrap_or(cx.appr());
        Ok(self.map_parts(|x| rounding::appr(x, eps.as_big(), rnd)))
    }

    fn round(
        &self,
        cx: &Config,
        places: Option<i64>,
        rnd: Option<u32>,
    ) -> MathResult<NumericValue> {
        let unit = places_unit("round", places, 10)?;
        let rnd = rnd.unwrap_or(cx.round());
        Ok(self.map_parts(|x| rounding::appr(x, unit.as_big(), rnd)))
    }

    fn bround(
        &self,
        cx: &Config,
        places: Option<i64>,
        rnd: Option<u32>,
    ) -> MathResult<NumericValue> {
        let unit = places_unit("bround", places, 2)?;
        let rnd = rnd.unwrap_or(cx.round());
        Ok(self.map_parts(|x| rounding::appr(x, unit.as_big(), rnd)))
    }

    fn modulo(&self, cx: &Config, y: &Rational, rnd: Option<u32>) -> NumericValue {
        let rnd = rnd.unwrap_or(cx.modulo());
        self.map_parts(|x| rounding::modulo(x, y.as_big(), rnd))
    }

    fn quo(&self, cx: &Config, y: &Rational, rnd: Option<u32>) -> NumericValue {
        let rnd = rnd.unwrap_or(cx.quo());
        self.map_parts(|x| BigRational::from_integer(rounding::quo(x, y.as_big(), rnd)))
    }

    fn ceil(&self) -> NumericValue {
        self.map_parts(|x| x.ceil())
    }

    fn floor(&self) -> NumericValue {
        self.map_parts(|x| x.floor())
    }

    fn mmin(&self, md: &Rational) -> NumericValue {
        self.map_parts(|x| rounding::modulo(x, md.as_big(), 16))
    }

    fn power(
        &self,
        cx: &Config,
        y: &NumericValue,
        eps: Option<&Rational>,
    ) -> MathResult<NumericValue> {
        let eps = cx.effective_epsilon("power", eps)?;
        Ok(NumericValue::Complex(
            self.power_with(&y.to_complex(), eps)?,
        ))
    }

    fn sqrt(
        &self,
        cx: &Config,
        eps: Option<&Rational>,
        rnd: Option<u32>,
    ) -> MathResult<NumericValue> {
        let eps = cx.effective_epsilon("sqrt", eps)?;
        Ok(NumericValue::Complex(
            self.sqrt_with(eps, rnd.unwrap_or(cx.sqrt())),
        ))
    }

    fn root(
        &self,
        cx: &Config,
        n: &Rational,
        eps: Option<&Rational>,
    ) -> MathResult<NumericValue> {
        let eps = cx.effective_epsilon("root", eps)?;
        Ok(NumericValue::Complex(self.root_with(n, eps)?))
    }

    fn trans(
        &self,
        f: Transcendental,
        cx: &Config,
        eps: Option<&Rational>,
    ) -> MathResult<NumericValue> {
        let eps = cx.effective_epsilon(f.name(), eps)?;
        Ok(NumericValue::Complex(Complex::trans(self, f, eps)?))
    }

    /// |z| 의 로그는 norm 의 밑 b^2 로그와 같다
    fn ilog(&self, base: &Rational) -> MathResult<NumericValue> {
        let base = ilog_base(base)?;
        let squared = &base * &base;
        Ok(NumericValue::Rational(Rational::from_i64(ilog_real(
            &Complex::norm(self),
            &squared,
        )?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::parse::parse_rational;

    fn r(text: &str) -> Rational {
        parse_rational(text, "test").expect("parse")
    }

    fn c(re: &str, im: &str) -> NumericValue {
        NumericValue::Complex(Complex::new(r(re), r(im)))
    }

    fn q(text: &str) -> NumericValue {
        NumericValue::Rational(r(text))
    }

    #[test]
    fn complex_rounding_is_componentwise_and_demotes() {
        let cx = Config::default();
        let x = c("7/32", "-7/32");
        let k = x.as_kind();
        assert_eq!(k.round(&cx, None, None).expect("round"), q("0"));
        assert_eq!(k.round(&cx, None, None).expect("round").kind(), Kind::Rational);
        assert_eq!(k.round(&cx, Some(3), None).expect("round"), c(".219", "-.219"));
        assert_eq!(k.round(&cx, Some(3), Some(0)).expect("round"), c(".218", "-.219"));
        let kept = k.round(&cx, Some(3), Some(0)).expect("round");
        assert_eq!(kept.kind(), Kind::Complex);
        assert_eq!(k.bround(&cx, Some(3), None).expect("bround"), c(".25", "-.25"));
        assert_eq!(k.bround(&cx, Some(3), Some(0)).expect("bround"), c(".125", "-.25"));

        let y = c("7.8", "-9.1");
        assert_eq!(y.as_kind().ceil(), c("8", "-9"));
        assert_eq!(y.as_kind().floor(), c("7", "-10"));
    }

    #[test]
    fn complex_mod_quo_and_mmin() {
        let cx = Config::default();
        let five = r("5");
        let x = c("0", "11");
        assert_eq!(x.as_kind().modulo(&cx, &five, None), c("0", "1"));
        assert_eq!(x.as_kind().modulo(&cx, &five, Some(1)), c("0", "-4"));
        assert_eq!(c("4", "4").as_kind().quo(&cx, &five, None), q("0"));
        assert_eq!(c("11", "11").as_kind().quo(&cx, &five, Some(0)), c("2", "2"));
        assert_eq!(c("11", "11").as_kind().quo(&cx, &five, Some(1)), c("3", "3"));
        let six = r("6");
        assert_eq!(c("0", "4").as_kind().mmin(&six), c("0", "-2"));
        let zero = c("0", "6").as_kind().mmin(&six);
        assert_eq!(zero.kind(), Kind::Rational);
        assert!(zero.is_zero());
    }

    #[test]
    fn general_arithmetic_results_stay_complex() {
        let cx = Config::default();
        let x = c("5", "2");
        assert_eq!(x.as_kind().int().kind(), Kind::Complex);
        assert_eq!(c("2.5", "0").as_kind().frac().kind(), Kind::Complex);
        assert_eq!(c("3", "4").as_kind().norm(), q("25"));
        assert_eq!(c("3", "4").as_kind().abs(&cx, None).expect("abs"), q("5"));
        assert_eq!(x.as_kind().conj(), c("5", "-2"));
    }

    #[test]
    fn integers_keep_their_kind_for_simple_operations() {
        let cx = Config::default();
        let n = NumericValue::int(-7);
        assert_eq!(n.as_kind().abs(&cx, None).expect("abs").kind(), Kind::Integer);
        assert_eq!(n.as_kind().norm(), NumericValue::int(49));
        assert_eq!(n.as_kind().neg().kind(), Kind::Integer);
        let inv = n.as_kind().inverse().expect("inverse");
        assert_eq!(inv.kind(), Kind::Rational);
        assert_eq!(inv, q("-1/7"));
        assert!(n.as_kind().is_odd());
        assert_eq!(n.as_kind().mmin(&r("4")), q("1"));
    }

    #[test]
    fn combinations_and_permutations() {
        let seven = NumericValue::int(7);
        assert_eq!(seven.as_kind().comb(&NumericValue::int(3)).expect("comb"), q("35"));
        assert_eq!(seven.as_kind().perm(&NumericValue::int(3)).expect("perm"), q("210"));
        assert_eq!(
            q("7.5").as_kind().comb(&NumericValue::int(3)).expect("comb"),
            q("715/16")
        );
        let big = q("2147483649");
        assert_eq!(
            big.as_kind().comb(&q("2147483647")).expect("comb"),
            q("2305843010287435776")
        );
        assert_eq!(
            big.as_kind().perm(&NumericValue::int(3)).expect("perm"),
            q("9903520314283042197045510144")
        );
        assert_eq!(
            c("0", "7").as_kind().comb(&NumericValue::int(3)).expect("comb"),
            c("49/2", "-329/6")
        );
        let half = q("0.5");
        assert_eq!(
            seven.as_kind().comb(&half).unwrap_err().kind(),
            ErrorKind::Domain
        );
        assert_eq!(seven.as_kind().comb(&NumericValue::int(-1)).expect("comb"), q("0"));
        assert!(seven.as_kind().perm(&NumericValue::int(-1)).is_err());
    }

    #[test]
    fn integer_logarithms() {
        let three = r("3");
        assert_eq!(q("2").as_kind().ilog(&three).expect("ilog"), q("0"));
        assert_eq!(q("8.9").as_kind().ilog(&three).expect("ilog"), q("1"));
        assert_eq!(q("1/8").as_kind().ilog(&three).expect("ilog"), q("-2"));
        assert_eq!(q("100").as_kind().ilog(&three).expect("ilog"), q("4"));
        assert!(q("0").as_kind().ilog(&three).is_err());
        assert!(q("5").as_kind().ilog(&r("1")).is_err());
        assert_eq!(q(".00777").as_kind().ilog10().expect("ilog10"), q("-3"));
        assert_eq!(q("-1e27").as_kind().ilog10().expect("ilog10"), q("27"));
        assert_eq!(q("1/15").as_kind().ilog2().expect("ilog2"), q("-4"));
        assert_eq!(c("3", "4").as_kind().ilog(&r("5")).expect("ilog"), q("1"));
    }

    #[test]
    fn comparison_and_strings() {
        let cx = Config::default();
        assert_eq!(q("1/2").as_kind().cmp_to(&NumericValue::int(1)), q("-1"));
        assert_eq!(NumericValue::int(3).as_kind().cmp_to(&q("3")), q("0"));
        assert_eq!(c("1", "1").as_kind().cmp_to(&c("0", "2")), c("1", "-1"));
        assert_eq!(c("2", "1").as_kind().cmp_to(&c("1", "1")), q("1"));
        assert_eq!(c("0", "-4").as_kind().estr(), "C(0,-4)");
        assert_eq!(q("-1/2").as_kind().estr(), "Q(-1,2)");
        assert_eq!(
            q("1/20").as_kind().to_s(&cx, Some(DisplayMode::Hex)),
            "1/0x14"
        );
        assert_eq!(c("1", "1").as_kind().to_s(&cx, None), "1+1i");
    }

    #[test]
    fn powers_and_roots() {
        let cx = Config::default();
        let two = NumericValue::int(2);
        assert_eq!(
            c("1", "1").as_kind().power(&cx, &two, None).expect("power"),
            c("0", "2")
        );
        assert_eq!(
            NumericValue::int(4).as_kind().sqrt(&cx, None, None).expect("sqrt"),
            q("2")
        );
        assert_eq!(
            q("-4").as_kind().sqrt(&cx, None, None).expect("sqrt"),
            c("0", "2")
        );
        assert_eq!(
            q("27").as_kind().root(&cx, &r("3"), None).expect("root"),
            q("3")
        );
        assert_eq!(
            q("0").as_kind().power(&cx, &q("-1"), None).unwrap_err().kind(),
            ErrorKind::Domain
        );
    }
}
