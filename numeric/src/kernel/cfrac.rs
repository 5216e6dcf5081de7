//! 연분수 근사: 구간 안 가장 단순한 분수, 분모 상한 최선 근사, 패리 이웃.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use super::theory::mod_inverse;

/// [lo, hi] 안에서 분모가 가장 작은 분수 (lo <= hi)
pub(crate) fn simplest_between(lo: &BigRational, hi: &BigRational) -> BigRational {
    if !lo.is_positive() && !hi.is_negative() {
        return BigRational::zero();
    }
    if hi.is_negative() {
        return -simplest_between(&-hi, &-lo);
    }
    let ceil = lo.ceil();
    if &ceil <= hi {
        return ceil;
    }
    let whole = lo.floor();
    let inner = simplest_between(&(hi - &whole).recip(), &(lo - &whole).recip());
    whole + inner.recip()
}

#[derive(Debug, Clone)]
struct Frac {
    p: BigInt,
    q: BigInt,
}

impl Frac {
    fn value(&self) -> BigRational {
        BigRational::new(self.p.clone(), self.q.clone())
    }
}

/// 분모가 max_den 이하인 x 의 아래/위 최선 근사 (max_den >= 1)
pub(crate) fn best_bounded(x: &BigRational, max_den: &BigInt) -> (BigRational, BigRational) {
    if x.denom() <= max_den {
        return (x.clone(), x.clone());
    }
    let n = x.numer();
    let d = x.denom();
    let whole = x.floor().to_integer();
    let mut lo = Frac {
        p: whole.clone(),
        q: BigInt::one(),
    };
    let mut hi = Frac {
        p: whole + 1,
        q: BigInt::one(),
    };
    loop {
        let mq = &lo.q + &hi.q;
        if &mq > max_den {
            break;
        }
        let mp = &lo.p + &hi.p;
        // 분모가 max_den 이하인 분수는 x 와 같을 수 없다
        if &mp * d < n * &mq {
            let gap = n * &lo.q - &lo.p * d;
            let step = &hi.p * d - n * &hi.q;
            let by_value = (gap - 1u32).div_floor(&step);
            let by_den = (max_den - &lo.q).div_floor(&hi.q);
            let k = by_value.min(by_den);
            lo = Frac {
                p: &lo.p + &k * &hi.p,
                q: &lo.q + &k * &hi.q,
            };
        } else {
            let gap = &hi.p * d - n * &hi.q;
            let step = n * &lo.q - &lo.p * d;
            let by_value = (gap - 1u32).div_floor(&step);
            let by_den = (max_den - &hi.q).div_floor(&lo.q);
            let k = by_value.min(by_den);
            hi = Frac {
                p: &hi.p + &k * &lo.p,
                q: &hi.q + &k * &lo.q,
            };
        }
    }
    (lo.value(), hi.value())
}

/// 분모가 den(x) 보다 작은 패리 이웃 (아래, 위). 정수면 자기 자신.
pub(crate) fn farey_neighbours(x: &BigRational) -> (BigRational, BigRational) {
    if x.is_integer() {
        return (x.clone(), x.clone());
    }
    let p = x.numer();
    let q = x.denom();
    // p q' - q p' = 1, 0 < q' < q
    let q_below = match mod_inverse(p, q) {
        Some(v) => v,
        None => return (x.clone(), x.clone()),
    };
    let p_below = (p * &q_below - 1u32) / q;
    let below = BigRational::new(p_below.clone(), q_below.clone());
    let above = BigRational::new(p - p_below, q - q_below);
    (below, above)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn simplest_fraction_in_interval() {
        assert_eq!(simplest_between(&q(3, 10), &q(4, 10)), q(1, 3));
        assert_eq!(simplest_between(&q(-4, 10), &q(-3, 10)), q(-1, 3));
        assert_eq!(simplest_between(&q(-1, 2), &q(1, 3)), q(0, 1));
        assert_eq!(simplest_between(&q(5, 2), &q(7, 2)), q(3, 1));
    }

    #[test]
    fn bounded_denominator_brackets_pi() {
        let pi = q(314159265358979, 100000000000000);
        let (lo, hi) = best_bounded(&pi, &BigInt::from(100));
        assert_eq!(lo, q(311, 99));
        assert_eq!(hi, q(22, 7));
        let (lo, hi) = best_bounded(&pi, &BigInt::from(1));
        assert_eq!((lo, hi), (q(3, 1), q(4, 1)));
    }

    #[test]
    fn farey_neighbours_of_fraction() {
        let (below, above) = farey_neighbours(&q(43, 30));
        assert_eq!(below, q(10, 7));
        assert_eq!(above, q(33, 23));
        let (below, above) = farey_neighbours(&q(-1, 2));
        assert_eq!((below, above), (q(-1, 1), q(0, 1)));
    }
}
