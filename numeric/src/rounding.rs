//! 반올림 방식(rnd) 규칙. appr, round, bround, mod, quo, sqrt가 모두 이 선택을 쓴다.

use num_bigint::BigInt;
use num_integer::{Integer, Roots};
use num_rational::BigRational;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;

/// 몫 후보: floor 값과, 소수부가 1/2보다 작은지/큰지/같은지
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Split {
    pub floor: BigInt,
    pub exact: bool,
    pub half: Ordering,
}

impl Split {
    pub fn of(q: &BigRational) -> Split {
        let floor = q.floor().to_integer();
        let frac = q - BigRational::from_integer(floor.clone());
        let exact = frac.is_zero();
        let half = (frac * BigRational::from_integer(BigInt::from(2))).cmp(&BigRational::one());
        Split { floor, exact, half }
    }

    /// -q 의 분할
    fn negated(self) -> Split {
        if self.exact {
            return Split {
                floor: -self.floor,
                exact: true,
                half: Ordering::Less,
            };
        }
        Split {
            floor: -(self.floor + 1u32),
            exact: false,
            half: self.half.reverse(),
        }
    }
}

pub(crate) fn sign_of(x: &BigRational) -> i8 {
    if x.is_zero() {
        0
    } else if x.is_negative() {
        -1
    } else {
        1
    }
}

/// rnd 규칙으로 floor 와 floor+1 중 하나를 고른다.
/// x_sign, y_sign 은 x/y 의 피제수와 제수 부호.
pub(crate) fn choose(split: Split, x_sign: i8, y_sign: i8, rnd: u32) -> BigInt {
    if split.exact {
        return split.floor;
    }
    let rnd = rnd & 31;
    let floor = split.floor;
    let ceil = &floor + 1;
    let mode = if rnd >= 16 {
        match split.half {
            Ordering::Less => return floor,
            Ordering::Greater => return ceil,
            Ordering::Equal => rnd - 16,
        }
    } else {
        rnd
    };
    let q_sign = x_sign * y_sign;
    // floor 를 고르면 나머지 부호가 y 부호와 같다
    let remainder_sign = |sign: i8| sign == y_sign;
    let take_floor = match mode {
        0 => true,
        1 => remainder_sign(-y_sign),
        2 => remainder_sign(x_sign),
        3 => remainder_sign(-x_sign),
        4 => remainder_sign(1),
        5 => remainder_sign(-1),
        6 => remainder_sign(q_sign),
        7 => remainder_sign(-q_sign),
        _ => {
            let want_even = match mode {
                8 => true,
                9 => false,
                10 => q_sign > 0,
                11 => q_sign < 0,
                12 => y_sign > 0,
                13 => y_sign < 0,
                14 => x_sign > 0,
                _ => x_sign < 0,
            };
            floor.is_even() == want_even
        }
    };
    if take_floor {
        floor
    } else {
        ceil
    }
}

/// y != 0 에서 x/y 근처 정수
pub(crate) fn quotient(x: &BigRational, y: &BigRational, rnd: u32) -> BigInt {
    let q = x / y;
    choose(Split::of(&q), sign_of(x), sign_of(y), rnd)
}

/// eps 의 배수 중 rnd 규칙으로 고른 값. eps == 0 이면 그대로.
pub(crate) fn appr(x: &BigRational, eps: &BigRational, rnd: u32) -> BigRational {
    if eps.is_zero() {
        return x.clone();
    }
    eps * BigRational::from_integer(quotient(x, eps, rnd))
}

pub(crate) fn modulo(x: &BigRational, y: &BigRational, rnd: u32) -> BigRational {
    if y.is_zero() {
        return x.clone();
    }
    x - y * BigRational::from_integer(quotient(x, y, rnd))
}

pub(crate) fn quo(x: &BigRational, y: &BigRational, rnd: u32) -> BigInt {
    if y.is_zero() {
        return BigInt::zero();
    }
    quotient(x, y, rnd)
}

/// 유리수 제곱근. 분자와 분모가 모두 제곱수일 때만 Some.
pub(crate) fn exact_sqrt(x: &BigRational) -> Option<BigRational> {
    if x.is_negative() {
        return None;
    }
    let n = x.numer().sqrt();
    let d = x.denom().sqrt();
    if &(&n * &n) == x.numer() && &(&d * &d) == x.denom() {
        Some(BigRational::new(n, d))
    } else {
        None
    }
}

/// sqrt(x)/eps 의 분할 (x >= 0, eps != 0)
fn sqrt_split(x: &BigRational, eps: &BigRational) -> Split {
    let t = x / (eps * eps);
    let split = match exact_sqrt(&t) {
        Some(root) => Split::of(&root),
        None => {
            let floor = t.floor().to_integer().sqrt();
            // s 와 floor + 1/2 비교: 4t 와 (2 floor + 1)^2
            let twice = BigInt::from(2) * &floor + 1;
            let four_t = &t * BigRational::from_integer(BigInt::from(4));
            let half = four_t.cmp(&BigRational::from_integer(&twice * &twice));
            Split {
                floor,
                exact: false,
                half,
            }
        }
    };
    if eps.is_negative() {
        split.negated()
    } else {
        split
    }
}

/// eps 배수로 반올림한 sqrt(x) (x >= 0). rnd 는 0..31 만 본다.
pub(crate) fn sqrt_appr(x: &BigRational, eps: &BigRational, rnd: u32) -> BigRational {
    let n = choose(sqrt_split(x, eps), 1, sign_of(eps), rnd);
    eps * BigRational::from_integer(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(n: i64, d: i64) -> BigRational {
        BigRational::new(BigInt::from(n), BigInt::from(d))
    }

    #[test]
    fn appr_follows_remainder_sign_modes() {
        let tenth = q(1, 10);
        assert_eq!(appr(&q(-544, 100), &tenth, 0), q(-55, 10));
        assert_eq!(appr(&q(544, 100), &tenth, 0), q(54, 10));
        assert_eq!(appr(&q(544, 100), &q(-1, 10), 0), q(55, 10));
        assert_eq!(appr(&q(544, 100), &tenth, 3), q(55, 10));
        assert_eq!(appr(&q(-57, 10), &q(1, 1), 6), q(-5, 1));
    }

    #[test]
    fn appr_parity_modes() {
        let tenth = q(1, 10);
        assert_eq!(appr(&q(-44, 100), &tenth, 11), q(-4, 10));
        assert_eq!(appr(&q(44, 100), &tenth, 11), q(5, 10));
        assert_eq!(appr(&q(-44, 100), &q(-1, 10), 12), q(-5, 10));
        assert_eq!(appr(&q(57, 10), &q(1, 1), 15), q(5, 1));
    }

    #[test]
    fn nearest_breaks_ties_with_low_bits() {
        // 5.5 -> 6 (24 = 16 + 8 짝수), appr 0 이면 5
        assert_eq!(appr(&q(11, 2), &q(1, 1), 24), q(6, 1));
        assert_eq!(appr(&q(9, 2), &q(1, 1), 24), q(4, 1));
        assert_eq!(appr(&q(11, 2), &q(1, 1), 0), q(5, 1));
    }

    #[test]
    fn modulo_and_quo_use_floor_by_default() {
        assert_eq!(modulo(&q(13, 1), &q(-4, 1), 0), q(-3, 1));
        assert_eq!(modulo(&q(-23, 2), &q(4, 1), 0), q(1, 2));
        assert_eq!(modulo(&q(1, 4), &q(0, 1), 0), q(1, 4));
        assert_eq!(quo(&q(11, 1), &q(5, 1), 2), BigInt::from(2));
        assert_eq!(quo(&q(11, 1), &q(5, 1), 1), BigInt::from(3));
        assert_eq!(quo(&q(11, 1), &q(0, 1), 1), BigInt::zero());
    }

    #[test]
    fn sqrt_rounds_to_epsilon_multiples() {
        let eps = q(1, 10000);
        assert_eq!(sqrt_appr(&q(2, 1), &eps, 0), q(14142, 10000));
        assert_eq!(sqrt_appr(&q(2, 1), &eps, 1), q(14143, 10000));
        assert_eq!(sqrt_appr(&q(4, 1), &eps, 0), q(2, 1));
        // .00005^2 -> 정확히 반, 짝수 쪽 0
        let tiny = q(5, 100000);
        assert_eq!(sqrt_appr(&(&tiny * &tiny), &eps, 24), q(0, 1));
        let small = q(15, 100000);
        assert_eq!(sqrt_appr(&(&small * &small), &eps, 24), q(2, 10000));
    }
}
