//! 정수론, 비트, 연분수 연산. 실수(유리수) 수신자 전용.

use num_bigint::BigInt;
use num_integer::{Integer, Roots};
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;

use crate::error::{MathError, MathResult};
use crate::kernel::{cfrac, theory};
use crate::rational::Rational;
use crate::rounding::{self, Split};

/// fact, fib 등 정수 인자 상한
const ARG_LIMIT: u64 = 1 << 31;

/// factor 의 기본 상한이자 최댓값
const FACTOR_LIMIT: u64 = (1 << 32) - 1;

/// lfactor 가 훑는 소수 개수 상한
const LFACTOR_LIMIT: u64 = 1 << 24;

fn integer_arg(x: &Rational, op: &'static str) -> MathResult<BigInt> {
    x.to_integer()
        .ok_or_else(|| MathError::domain(op, format!("non-integer argument {}", x)))
}

/// 0 <= x < 2^31 인 정수
fn count_arg(x: &Rational, op: &'static str) -> MathResult<u32> {
    let n = integer_arg(x, op)?;
    match n.to_u64() {
        Some(v) if v < ARG_LIMIT => Ok(v as u32),
        _ => Err(MathError::domain(op, format!("argument {} out of range", n))),
    }
}

/// 2 이상의 정수 진법
fn base_arg(base: Option<&Rational>, op: &'static str) -> MathResult<BigInt> {
    let base = match base {
        None => return Ok(BigInt::from(10)),
        Some(b) => integer_arg(b, op)?,
    };
    if base < BigInt::from(2) {
        return Err(MathError::domain(op, "base must be at least 2"));
    }
    Ok(base)
}

fn rat_big(n: BigInt) -> Rational {
    Rational::from_integer(n)
}

/// 아래(true) 또는 위(false) 근사를 rnd 규칙으로 고른다
fn take_lower(x: &Rational, eps: &Rational, rnd: u32) -> bool {
    let split = Split {
        floor: BigInt::zero(),
        exact: false,
        half: Ordering::Less,
    };
    rounding::choose(split, x.signum(), eps.signum(), rnd & 15).is_zero()
}

/// 가까운 쪽, 같으면 rnd 하위 규칙
fn nearer(
    x: &BigRational,
    lower: BigRational,
    upper: BigRational,
    lower_on_tie: bool,
) -> BigRational {
    let below = x - &lower;
    let above = &upper - x;
    match below.cmp(&above) {
        Ordering::Less => lower,
        Ordering::Greater => upper,
        Ordering::Equal if lower_on_tie => lower,
        Ordering::Equal => upper,
    }
}

impl Rational {
    /// 분자 (부호 포함)
    pub fn num(&self) -> Rational {
        rat_big(self.numer().clone())
    }

    pub fn den(&self) -> Rational {
        rat_big(self.denom().clone())
    }

    pub fn fact(&self) -> MathResult<Rational> {
        let n = integer_arg(self, "fact")?;
        if n.is_negative() {
            return Err(MathError::domain("fact", "negative argument"));
        }
        Ok(rat_big(theory::factorial(count_arg(self, "fact")?)))
    }

    /// fib(-n) = (-1)^(n+1) fib(n)
    pub fn fib(&self) -> MathResult<Rational> {
        let n = integer_arg(self, "fib")?;
        match n.to_i64() {
            Some(v) if v.unsigned_abs() < ARG_LIMIT => Ok(rat_big(theory::fibonacci(v))),
            _ => Err(MathError::domain("fib", "argument too large")),
        }
    }

    pub fn bernoulli(&self) -> MathResult<Rational> {
        let n = integer_arg(self, "bernoulli")?;
        if n.is_negative() {
            return Ok(Rational::zero());
        }
        match n.to_u64() {
            Some(v) if v < ARG_LIMIT => Ok(Rational::from_big(theory::bernoulli(v as u32))),
            _ if n.is_odd() => Ok(Rational::zero()),
            _ => Err(MathError::domain("bernoulli", "even argument too large")),
        }
    }

    pub fn euler(&self) -> MathResult<Rational> {
        let n = integer_arg(self, "euler")?;
        if n.is_negative() {
            return Ok(Rational::zero());
        }
        Ok(rat_big(theory::euler(count_arg(self, "euler")?)))
    }

    pub fn catalan(&self) -> MathResult<Rational> {
        let n = integer_arg(self, "catalan")?;
        if n.is_negative() {
            return Ok(Rational::zero());
        }
        Ok(rat_big(theory::catalan(count_arg(self, "catalan")?)))
    }

    /// lcm(1, 2, ..., n)
    pub fn lcmfact(&self) -> MathResult<Rational> {
        Ok(rat_big(theory::lcm_upto(count_arg(self, "lcmfact")?)))
    }

    /// gcd(a/b, c/d) = gcd(a, c) / lcm(b, d)
    pub fn gcd(&self, others: &[Rational]) -> Rational {
        let mut num = self.numer().abs();
        let mut den = self.denom().clone();
        for y in others {
            num = num.gcd(y.numer());
            den = den.lcm(y.denom());
        }
        Rational::from_big(BigRational::new(num, den))
    }

    /// lcm(a/b, c/d) = lcm(a, c) / gcd(b, d)
    pub fn lcm(&self, others: &[Rational]) -> Rational {
        if self.is_zero() || others.iter().any(Rational::is_zero) {
            return Rational::zero();
        }
        let mut num = self.numer().abs();
        let mut den = self.denom().clone();
        for y in others {
            num = num.lcm(y.numer());
            den = den.gcd(y.denom());
        }
        Rational::from_big(BigRational::new(num, den))
    }

    /// y 와 공통인 인수를 모두 걷어낸 |x|
    pub fn gcdrem(&self, y: &Rational) -> MathResult<Rational> {
        let mut x = integer_arg(self, "gcdrem")?.abs();
        let y = integer_arg(y, "gcdrem")?;
        if x.is_zero() {
            return Ok(Rational::zero());
        }
        loop {
            let g = x.gcd(&y);
            if g.is_one() {
                break;
            }
            x /= g;
        }
        Ok(rat_big(x))
    }

    /// limit 이하의 가장 작은 소인수, 없으면 1
    pub fn factor(&self, limit: Option<&Rational>) -> MathResult<Rational> {
        let n = integer_arg(self, "factor")?;
        let limit = match limit {
            None => FACTOR_LIMIT,
            Some(l) => {
                let l = integer_arg(l, "factor")?;
                if l.is_negative() {
                    return Ok(Rational::one());
                }
                match l.to_u64() {
                    Some(v) if v <= FACTOR_LIMIT => v,
                    _ => return Err(MathError::domain("factor", "limit must be below 2^32")),
                }
            }
        };
        Ok(rat_big(theory::smallest_factor(&n, limit)))
    }

    /// 처음 count 개 소수 중 가장 작은 인수, 없으면 1
    pub fn lfactor(&self, count: &Rational) -> MathResult<Rational> {
        let n = integer_arg(self, "lfactor")?;
        let count = integer_arg(count, "lfactor")?;
        if !count.is_positive() {
            return Ok(Rational::one());
        }
        match count.to_u64() {
            Some(c) if c <= LFACTOR_LIMIT => Ok(rat_big(theory::smallest_listed_factor(&n, c))),
            _ => Err(MathError::domain("lfactor", "count too large")),
        }
    }

    /// x 가 y 로 나누어 떨어지는 횟수
    pub fn fcnt(&self, y: &Rational) -> MathResult<Rational> {
        let x = integer_arg(self, "fcnt")?;
        let y = integer_arg(y, "fcnt")?;
        let (count, _) = theory::divide_count(&x, &y);
        Ok(rat_big(BigInt::from(count)))
    }

    /// y 인수를 모두 뺀 |x|
    pub fn frem(&self, y: &Rational) -> MathResult<Rational> {
        let x = integer_arg(self, "frem")?;
        let y = integer_arg(y, "frem")?;
        if y.is_zero() {
            return Err(MathError::domain("frem", "zero factor"));
        }
        let (_, rest) = theory::divide_count(&x, &y);
        Ok(rat_big(rest.abs()))
    }

    /// floor(|x|) 의 n 제곱근 정수부, 부호는 x 를 따른다
    pub fn iroot(&self, n: &Rational) -> MathResult<Rational> {
        let n = integer_arg(n, "iroot")?;
        let order = match n.to_u32() {
            Some(v) if v > 0 => v,
            _ => return Err(MathError::domain("iroot", "order must be a positive integer")),
        };
        if self.is_negative() && order % 2 == 0 {
            return Err(MathError::domain("iroot", "even root of a negative number"));
        }
        let root = self.abs().floor().nth_root(order);
        Ok(rat_big(if self.is_negative() { -root } else { root }))
    }

    pub fn isqrt(&self) -> MathResult<Rational> {
        if self.is_negative() {
            return Err(MathError::domain("isqrt", "negative argument"));
        }
        Ok(rat_big(self.floor().sqrt()))
    }

    /// 야코비 기호 (x / y)
    pub fn jacobi(&self, y: &Rational) -> MathResult<Rational> {
        let x = integer_arg(self, "jacobi")?;
        let y = integer_arg(y, "jacobi")?;
        Ok(Rational::from_i64(theory::jacobi(&x, &y) as i64))
    }

    /// 법 md 역원. 대표값은 mod 규칙 rnd 로 고른다. 역원이 없으면 0.
    pub fn minv(&self, md: &Rational, rnd: u32) -> MathResult<Rational> {
        let x = integer_arg(self, "minv")?;
        let m = integer_arg(md, "minv")?;
        match theory::mod_inverse(&x, &m) {
            Some(inv) => Ok(Rational::from_big(rounding::modulo(
                &BigRational::from_integer(inv),
                md.as_big(),
                rnd,
            ))),
            None => Ok(Rational::zero()),
        }
    }

    /// [quo, mod] 를 같은 규칙으로
    pub fn quomod(&self, y: &Rational, rnd: u32) -> (Rational, Rational) {
        let q = rounding::quo(self.as_big(), y.as_big(), rnd);
        let r = rounding::modulo(self.as_big(), y.as_big(), rnd);
        (rat_big(q), Rational::from_big(r))
    }

    /// 2^32 미만은 결정적, 그 위 홀수는 Domain
    pub fn is_prime(&self) -> MathResult<bool> {
        let n = integer_arg(self, "isprime")?.abs();
        match n.to_u64() {
            Some(v) if v <= FACTOR_LIMIT => Ok(theory::is_prime_u64(v)),
            _ if n.is_even() => Ok(false),
            _ => Err(MathError::domain("isprime", "odd argument above 2^32")),
        }
    }

    /// x / y 가 정수인가. y == 0 이면 x == 0 일 때만.
    pub fn is_mult(&self, y: &Rational) -> bool {
        if y.is_zero() {
            return self.is_zero();
        }
        (self.as_big() / y.as_big()).is_integer()
    }

    pub fn is_rel(&self, y: &Rational) -> MathResult<bool> {
        let x = integer_arg(self, "isrel")?;
        let y = integer_arg(y, "isrel")?;
        Ok(x.gcd(&y).is_one())
    }

    /// 유리수의 제곱인가
    pub fn is_sq(&self) -> bool {
        rounding::exact_sqrt(self.as_big()).is_some()
    }

    /// x ≡ y (mod md)
    pub fn meq(&self, y: &Rational, md: &Rational) -> bool {
        (self - y).is_mult(md)
    }

    pub fn mne(&self, y: &Rational, md: &Rational) -> bool {
        !self.meq(y, md)
    }

    /// floor(|x| 2^-n) 가 홀수인가
    pub fn bit(&self, n: &Rational) -> MathResult<bool> {
        let n = integer_arg(n, "bit")?
            .to_i64()
            .ok_or_else(|| MathError::domain("bit", "bit position too large"))?;
        let shifted = &self.abs() * &Rational::pow2(-n);
        Ok(shifted.floor().is_odd())
    }

    /// 가장 높은 1 비트 위치, 0 이면 -1
    pub fn highbit(&self) -> MathResult<Rational> {
        let n = integer_arg(self, "highbit")?;
        if n.is_zero() {
            return Ok(Rational::from_i64(-1));
        }
        Ok(rat_big(BigInt::from(n.bits()) - 1))
    }

    /// 가장 낮은 1 비트 위치, 0 이면 -1
    pub fn lowbit(&self) -> MathResult<Rational> {
        let n = integer_arg(self, "lowbit")?;
        match n.trailing_zeros() {
            Some(z) => Ok(rat_big(BigInt::from(z))),
            None => Ok(Rational::from_i64(-1)),
        }
    }

    /// base 진법 n 번째 자리 (음수 n 은 소수부)
    pub fn digit(&self, n: &Rational, base: Option<&Rational>) -> MathResult<Rational> {
        let n = integer_arg(n, "digit")?;
        let base = base_arg(base, "digit")?;
        let scale = Rational::from_integer(base.clone()).pow_int(&-n)?;
        let shifted = (&self.abs() * &scale).floor();
        Ok(rat_big(shifted.mod_floor(&base)))
    }

    /// 정수부 자릿수, 최소 1
    pub fn digits(&self, base: Option<&Rational>) -> MathResult<Rational> {
        let base = base_arg(base, "digits")?;
        let mut rest = self.abs().floor();
        let mut count = 1u64;
        while rest >= base {
            rest /= &base;
            count += 1;
        }
        Ok(rat_big(BigInt::from(count)))
    }

    /// 2의 보수 배타적 논리합
    pub fn xor(&self, others: &[Rational]) -> MathResult<Rational> {
        let mut acc = integer_arg(self, "xor")?;
        for y in others {
            acc ^= integer_arg(y, "xor")?;
        }
        Ok(rat_big(acc))
    }

    /// 0..=255 의 한 글자. 0 은 빈 문자열.
    pub fn to_char(&self) -> MathResult<String> {
        let n = integer_arg(self, "char")?;
        match n.to_u8() {
            Some(0) => Ok(String::new()),
            Some(b) => Ok(char::from(b).to_string()),
            None => Err(MathError::out_of_range("char", format!("{} is not in 0..255", n))),
        }
    }

    /// eps < 1: 오차 구간 안 가장 단순한 분수. eps >= 1: 분모 eps 이하 최선 근사.
    pub fn cfappr(&self, eps: &Rational, rnd: u32) -> Rational {
        if eps.is_zero() || self.is_integer() {
            return self.clone();
        }
        let x = self.as_big();
        let width = eps.abs().into_big();
        let nearest = rnd & 16 != 0;
        let lower_on_tie = take_lower(self, eps, rnd);
        let value = if width < BigRational::one() {
            if nearest {
                let half = &width / BigRational::from_integer(BigInt::from(2));
                cfrac::simplest_between(&(x - &half), &(x + &half))
            } else if lower_on_tie {
                cfrac::simplest_between(&(x - &width), x)
            } else {
                cfrac::simplest_between(x, &(x + &width))
            }
        } else {
            let (lower, upper) = cfrac::best_bounded(x, &width.floor().to_integer());
            if nearest {
                nearer(x, lower, upper, lower_on_tie)
            } else if lower_on_tie {
                lower
            } else {
                upper
            }
        };
        Rational::from_big(value)
    }

    /// 분모 den(x)-1 차 패리 수열의 이웃. 정수는 x-1 또는 x+1.
    pub fn cfsim(&self, rnd: u32) -> Rational {
        let lower_on_tie = rnd % 2 == 0;
        let x = self.as_big();
        let (lower, upper) = if self.is_integer() {
            (x - BigRational::one(), x + BigRational::one())
        } else {
            cfrac::farey_neighbours(x)
        };
        let value = if rnd & 16 != 0 {
            nearer(x, lower, upper, lower_on_tie)
        } else if lower_on_tie {
            lower
        } else {
            upper
        };
        Rational::from_big(value)
    }
}

/// v mod (h 2^n + r)
pub fn hnrmod(v: &Rational, h: &Rational, n: &Rational, r: &Rational) -> MathResult<Rational> {
    let v = integer_arg(v, "hnrmod")?;
    let h = integer_arg(h, "hnrmod")?;
    if !h.is_positive() {
        return Err(MathError::domain("hnrmod", "h must be positive"));
    }
    let n = count_arg(n, "hnrmod")?;
    if n == 0 {
        return Err(MathError::domain("hnrmod", "n must be positive"));
    }
    let r = integer_arg(r, "hnrmod")?;
    if r.abs() > BigInt::one() {
        return Err(MathError::domain("hnrmod", "r must be -1, 0 or 1"));
    }
    let modulus = (h << n as usize) + r;
    Ok(rat_big(v.mod_floor(&modulus)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::parse::parse_rational;

    fn q(n: i64) -> Rational {
        Rational::from_i64(n)
    }

    fn r(text: &str) -> Rational {
        parse_rational(text, "test").expect("parse")
    }

    #[test]
    fn sequences_and_their_domains() {
        assert_eq!(q(10).fact().expect("fact"), q(3628800));
        assert_eq!(q(-1).fact().unwrap_err().kind(), ErrorKind::Domain);
        assert_eq!(r("1/4").fact().unwrap_err().kind(), ErrorKind::Domain);
        assert_eq!(q(-10).fib().expect("fib"), q(-55));
        assert_eq!(q(-9).fib().expect("fib"), q(34));
        assert_eq!(q(2).bernoulli().expect("bernoulli"), r("1/6"));
        assert_eq!(q(1).bernoulli().expect("bernoulli"), r("-1/2"));
        assert_eq!((q(1 << 31) + q(1)).bernoulli().expect("odd"), q(0));
        assert!(q(1 << 31).bernoulli().is_err());
        assert_eq!(q(6).euler().expect("euler"), q(-61));
        assert_eq!(q(20).catalan().expect("catalan"), q(6564120420));
        assert_eq!(q(-1).catalan().expect("catalan"), q(0));
        assert_eq!(q(10).lcmfact().expect("lcmfact"), q(2520));
    }

    #[test]
    fn gcd_and_lcm_extend_to_rationals() {
        assert_eq!(q(12).gcd(&[q(-24), q(30)]), q(6));
        assert_eq!(r("9/10").gcd(&[r("11/5"), r("4/25")]), r("0.02"));
        assert_eq!(q(0).gcd(&[q(0), q(0)]), q(0));
        assert_eq!(q(4).lcm(&[q(6)]), q(12));
        assert_eq!(q(4).lcm(&[q(0)]), q(0));
        assert_eq!(q(630).gcdrem(&q(6)).expect("gcdrem"), q(35));
        assert_eq!(q(15).gcdrem(&q(6)).expect("gcdrem"), q(5));
    }

    #[test]
    fn factoring() {
        assert_eq!(q(35).factor(Some(&q(4))).expect("factor"), q(1));
        assert_eq!(q(-35).factor(None).expect("factor"), q(5));
        let fermat5 = Rational::pow2(32) + q(1);
        assert_eq!(fermat5.factor(None).expect("factor"), q(641));
        let mersenne = Rational::pow2(59) - q(1);
        assert_eq!(mersenne.factor(None).expect("factor"), q(179951));
        assert_eq!(q(35).lfactor(&q(3)).expect("lfactor"), q(5));
        assert_eq!(q(24).fcnt(&q(4)).expect("fcnt"), q(1));
        assert_eq!(q(48).fcnt(&q(4)).expect("fcnt"), q(2));
        assert_eq!(q(-48).frem(&q(4)).expect("frem"), q(3));
        assert!(r("1.5").fcnt(&q(2)).is_err());
    }

    #[test]
    fn integer_roots() {
        assert_eq!(q(100).iroot(&q(3)).expect("iroot"), q(4));
        assert_eq!(q(-44).iroot(&q(3)).expect("iroot"), q(-3));
        assert!(q(8).iroot(&q(0)).is_err());
        assert_eq!(r("8.5").isqrt().expect("isqrt"), q(2));
        assert_eq!(
            r("2e56").isqrt().expect("isqrt"),
            r("14142135623730950488016887242")
        );
        assert!(q(-1).isqrt().is_err());
    }

    #[test]
    fn modular_helpers() {
        assert_eq!(q(11).minv(&q(5), 0).expect("minv"), q(1));
        assert_eq!(q(11).minv(&q(5), 1).expect("minv"), q(-4));
        assert_eq!(q(13).quomod(&q(5), 0), (q(2), q(3)));
        assert_eq!(q(13).quomod(&q(0), 0), (q(0), q(13)));
        assert_eq!(q(2).jacobi(&q(7)).expect("jacobi"), q(1));
        assert!(q(7).meq(&q(17), &q(5)));
        assert!(q(7).mne(&q(18), &q(5)));
        assert_eq!(hnrmod(&q(1000), &q(3), &q(4), &q(1)).expect("hnrmod"), q(20));
        assert!(hnrmod(&q(1000), &q(3), &q(4), &q(2)).is_err());
    }

    #[test]
    fn predicates() {
        assert!(q(-3).is_prime().expect("prime"));
        assert!(!q(1).is_prime().expect("prime"));
        assert!((Rational::pow2(31) - q(1)).is_prime().expect("prime"));
        assert!(!(Rational::pow2(31) - q(9)).is_prime().expect("prime"));
        assert!(!Rational::pow2(40).is_prime().expect("even"));
        assert!((Rational::pow2(40) + q(1)).is_prime().is_err());
        assert!(r("7.5").is_mult(&r("2.5")));
        assert!(!q(13).is_mult(&r("4/67")));
        assert!(q(13).is_mult(&r("7/56")));
        assert!(q(9).is_rel(&q(10)).expect("rel"));
        assert!(r("4/9").is_sq());
        assert!(!q(-4).is_sq());
    }

    #[test]
    fn bits_and_digits() {
        assert!(q(9).bit(&q(3)).expect("bit"));
        assert!(!q(9).bit(&q(-1)).expect("bit"));
        assert!(r("1.25").bit(&q(-2)).expect("bit"));
        assert!(!r("1.25").bit(&q(-1)).expect("bit"));
        assert_eq!(q(0).highbit().expect("highbit"), q(-1));
        assert_eq!(q(-15).highbit().expect("highbit"), q(3));
        assert!(r("0.5").highbit().is_err());
        assert_eq!(q(12).lowbit().expect("lowbit"), q(2));
        let x = r("123456.789");
        assert_eq!(x.digit(&q(5), None).expect("digit"), q(1));
        assert_eq!(x.digit(&q(-1), None).expect("digit"), q(7));
        assert_eq!(q(-1234).digits(None).expect("digits"), q(4));
        assert_eq!(q(0).digits(None).expect("digits"), q(1));
        assert_eq!(r("12.3456").digits(None).expect("digits"), q(2));
        assert_eq!(q(3).xor(&[q(5)]).expect("xor"), q(6));
        assert_eq!(q(-1).xor(&[q(1)]).expect("xor"), q(-2));
    }

    #[test]
    fn characters() {
        assert_eq!(q(0).to_char().expect("char"), "");
        assert_eq!(q(88).to_char().expect("char"), "X");
        assert_eq!(r("88.5").to_char().unwrap_err().kind(), ErrorKind::Domain);
        assert_eq!(q(256).to_char().unwrap_err().kind(), ErrorKind::OutOfRange);
    }

    #[test]
    fn continued_fraction_approximations() {
        let x = r("43/30");
        assert_eq!(x.cfappr(&q(0), 0), x);
        assert_eq!(x.cfappr(&q(10), 0), r("10/7"));
        assert_eq!(x.cfappr(&q(10), 1), r("13/9"));
        assert_eq!(x.cfappr(&q(10), 16), r("10/7"));
        let pi = Rational::pi(&r("1e-10"));
        assert_eq!(pi.cfappr(&q(100), 16), r("311/99"));
        assert_eq!(pi.cfappr(&r(".01"), 16), r("22/7"));
        assert_eq!(pi.cfappr(&r("1e-6"), 16), r("355/113"));
        let y = r("17/12");
        assert_eq!(y.cfappr(&q(4), 0), r("4/3"));
        assert_eq!(y.cfappr(&q(4), 1), r("3/2"));
        assert_eq!(x.cfsim(8), r("10/7"));
        assert_eq!(x.cfsim(1), r("33/23"));
    }
}
