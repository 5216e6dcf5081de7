//! 복소 초월함수. 실수 급수를 조합하고 중간값은 q 비트로 자른다.
//! None 은 특이점(ln 0, atan(±i) 등)을 뜻한다.

use num_complex::Complex;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::real;
use super::{integer_bits, rat, trunc};

const STEP_GUARD: u32 = 16;

pub(crate) type Cx = Complex<BigRational>;

pub(crate) fn real_cx(re: BigRational) -> Cx {
    Cx::new(re, BigRational::zero())
}

/// 0 으로 나누면 None
pub(crate) fn checked_div(a: &Cx, b: &Cx) -> Option<Cx> {
    if b.is_zero() {
        None
    } else {
        Some(a / b)
    }
}

/// i * z
fn mul_i(z: &Cx) -> Cx {
    Cx::new(-&z.im, z.re.clone())
}

fn trunc_cx(z: &Cx, p: u32) -> Cx {
    Cx::new(trunc(&z.re, p), trunc(&z.im, p))
}

fn half() -> BigRational {
    BigRational::new(1.into(), 2.into())
}

/// 실부 크기로 생기는 지수 증폭만큼 더 둘 비트
fn growth(x: &BigRational) -> u32 {
    let bits = integer_bits(x);
    bits + bits / 2 + 2
}

pub(crate) fn exp(z: &Cx, p: u32) -> Cx {
    let q = p + STEP_GUARD;
    let scale = real::exp(&z.re, q);
    if z.im.is_zero() {
        return real_cx(scale);
    }
    let extra = if z.re.is_positive() { growth(&z.re) } else { 0 };
    let (s, c) = real::sin_cos(&z.im, q + extra);
    trunc_cx(&Cx::new(&scale * c, &scale * s), q + extra)
}

pub(crate) fn abs(z: &Cx, p: u32) -> BigRational {
    if z.im.is_zero() {
        return z.re.abs();
    }
    if z.re.is_zero() {
        return z.im.abs();
    }
    real::sqrt(&z.norm_sqr(), p)
}

pub(crate) fn arg(z: &Cx, p: u32) -> BigRational {
    real::atan2(&z.im, &z.re, p)
}

pub(crate) fn ln(z: &Cx, p: u32) -> Option<Cx> {
    if z.is_zero() {
        return None;
    }
    let q = p + STEP_GUARD;
    let re = real::ln(&z.norm_sqr(), q) / rat(2);
    let im = if z.im.is_zero() && z.re.is_positive() {
        BigRational::zero()
    } else {
        arg(z, q)
    };
    Some(trunc_cx(&Cx::new(re, im), q))
}

pub(crate) fn sqrt(z: &Cx, p: u32) -> Cx {
    let q = p + STEP_GUARD;
    if z.im.is_zero() {
        return if z.re.is_negative() {
            Cx::new(BigRational::zero(), real::sqrt(&-&z.re, q))
        } else {
            real_cx(real::sqrt(&z.re, q))
        };
    }
    let r = real::sqrt(&z.norm_sqr(), q + 8);
    let two = rat(2);
    if !z.re.is_negative() {
        let u = real::sqrt(&((&r + &z.re) / &two), q + 8);
        let v = &z.im / (&u * &two);
        trunc_cx(&Cx::new(u, v), q)
    } else {
        let mut v = real::sqrt(&((&r - &z.re) / &two), q + 8);
        if z.im.is_negative() {
            v = -v;
        }
        let u = &z.im / (&v * &two);
        trunc_cx(&Cx::new(u, v), q)
    }
}

pub(crate) fn sin(z: &Cx, p: u32) -> Cx {
    let q = p + STEP_GUARD + growth(&z.im);
    let (s, c) = real::sin_cos(&z.re, q);
    let (sh, ch) = real::sinh_cosh(&z.im, q);
    trunc_cx(&Cx::new(s * ch, c * sh), q)
}

pub(crate) fn cos(z: &Cx, p: u32) -> Cx {
    let q = p + STEP_GUARD + growth(&z.im);
    let (s, c) = real::sin_cos(&z.re, q);
    let (sh, ch) = real::sinh_cosh(&z.im, q);
    trunc_cx(&Cx::new(c * ch, -(s * sh)), q)
}

pub(crate) fn sinh(z: &Cx, p: u32) -> Cx {
    let q = p + STEP_GUARD + growth(&z.re);
    let (s, c) = real::sin_cos(&z.im, q);
    let (sh, ch) = real::sinh_cosh(&z.re, q);
    trunc_cx(&Cx::new(sh * c, ch * s), q)
}

pub(crate) fn cosh(z: &Cx, p: u32) -> Cx {
    let q = p + STEP_GUARD + growth(&z.re);
    let (s, c) = real::sin_cos(&z.im, q);
    let (sh, ch) = real::sinh_cosh(&z.re, q);
    trunc_cx(&Cx::new(ch * c, sh * s), q)
}

/// asin z = -i ln(iz + sqrt(1 - z^2))
pub(crate) fn asin(z: &Cx, p: u32) -> Option<Cx> {
    let q = p + STEP_GUARD;
    let w = sqrt(&(Cx::one() - z * z), q);
    let l = ln(&(mul_i(z) + w), q)?;
    Some(-mul_i(&l))
}

/// acos z = pi/2 - asin z
pub(crate) fn acos(z: &Cx, p: u32) -> Option<Cx> {
    let q = p + STEP_GUARD;
    let half_pi = real::pi(q) / rat(2);
    Some(real_cx(half_pi) - asin(z, q)?)
}

/// atan z = (i/2) (ln(1 - iz) - ln(1 + iz))
pub(crate) fn atan(z: &Cx, p: u32) -> Option<Cx> {
    let q = p + STEP_GUARD;
    let iz = mul_i(z);
    let a = ln(&(Cx::one() - &iz), q)?;
    let b = ln(&(Cx::one() + &iz), q)?;
    Some(mul_i(&(a - b)).scale(half()))
}

/// asinh z = ln(z + sqrt(z^2 + 1))
pub(crate) fn asinh(z: &Cx, p: u32) -> Option<Cx> {
    let q = p + STEP_GUARD;
    let w = sqrt(&(z * z + Cx::one()), q);
    ln(&(z + w), q)
}

/// acosh z = ln(z + sqrt(z^2 - 1))
pub(crate) fn acosh(z: &Cx, p: u32) -> Option<Cx> {
    let q = p + STEP_GUARD;
    let w = sqrt(&(z * z - Cx::one()), q);
    ln(&(z + w), q)
}

/// atanh z = ln((1 + z) / (1 - z)) / 2
pub(crate) fn atanh(z: &Cx, p: u32) -> Option<Cx> {
    let q = p + STEP_GUARD;
    let ratio = checked_div(&(Cx::one() + z), &(Cx::one() - z))?;
    Some(ln(&ratio, q)?.scale(half()))
}

/// z^w = exp(w ln z), 0^w 는 Re w > 0 일 때만 0
pub(crate) fn pow(z: &Cx, w: &Cx, p: u32) -> Option<Cx> {
    if z.is_zero() {
        return if w.re.is_positive() {
            Some(Cx::zero())
        } else {
            None
        };
    }
    let q = p + STEP_GUARD;
    let mut l = ln(z, q)?;
    let mut exponent = w * &l;
    if exponent.re.is_positive() {
        let extra = growth(&exponent.re);
        l = ln(z, q + extra)?;
        exponent = trunc_cx(&(w * &l), q + extra);
    }
    Some(exp(&exponent, q))
}

/// 주 n 제곱근
pub(crate) fn root(z: &Cx, n: u32, p: u32) -> Cx {
    if z.is_zero() {
        return Cx::zero();
    }
    let q = p + STEP_GUARD;
    match ln(z, q) {
        Some(l) => exp(&l.scale(BigRational::new(1.into(), n.into())), q),
        None => Cx::zero(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::ToPrimitive;

    fn approx(z: &Cx, re: f64, im: f64) -> bool {
        let a = z.re.to_f64().unwrap_or(f64::NAN);
        let b = z.im.to_f64().unwrap_or(f64::NAN);
        (a - re).abs() < 1e-12 && (b - im).abs() < 1e-12
    }

    fn c(re: i64, im: i64) -> Cx {
        Cx::new(rat(re), rat(im))
    }

    #[test]
    fn elementary_functions_at_two_plus_three_i() {
        let z = c(2, 3);
        assert!(approx(&sin(&z, 80), 9.154499146911430, -4.168906959966565));
        assert!(approx(&cos(&z, 80), -4.189625690968807, -9.109227893755337));
        assert!(approx(&sinh(&z, 80), -3.590564589985780, 0.530921086248520));
        assert!(approx(&exp(&c(1, 2), 80), -1.131204383756814, 2.471726672004819));
    }

    #[test]
    fn inverse_functions_use_principal_branch() {
        let z = c(2, 3);
        let asin_z = asin(&z, 80).expect("asin");
        assert!(approx(&asin_z, 0.570652784321099, 1.983387029916535));
        let atan_z = atan(&z, 80).expect("atan");
        assert!(approx(&atan_z, 1.409921049596576, 0.229072682968539));
        let atanh_z = atanh(&z, 80).expect("atanh");
        assert!(approx(&atanh_z, 0.146946666225530, 1.338972522294494));
        let acosh_z = acosh(&z, 80).expect("acosh");
        assert!(approx(&acosh_z, 1.983387029916535, 1.000143542473797));
    }

    #[test]
    fn singular_points_are_none() {
        assert!(ln(&Cx::zero(), 40).is_none());
        assert!(atan(&c(0, 1), 40).is_none());
        assert!(atanh(&c(1, 0), 40).is_none());
        assert!(pow(&Cx::zero(), &c(-1, 0), 40).is_none());
    }

    #[test]
    fn powers_and_roots() {
        let i = c(0, 1);
        let ii = pow(&i, &i, 80).expect("i^i");
        assert!(approx(&ii, 0.207879576350761, 0.0));
        let w = pow(&c(1, 3), &c(2, 1), 80).expect("pow");
        let re = w.re.to_f64().unwrap_or(f64::NAN);
        let im = w.im.to_f64().unwrap_or(f64::NAN);
        assert!((re + 2.50593).abs() < 1e-5 && (im + 1.39445).abs() < 1e-5);
        assert!(approx(&root(&c(1, 3), 3, 80), 1.342407745233140, 0.593612782519010));
        assert_eq!(sqrt(&c(0, 8), 40), c(2, 2));
    }
}
