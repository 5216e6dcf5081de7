//! 정수론 보조 함수 (BigInt 위에서)

use num_bigint::BigInt;
use num_integer::{Integer, Roots};
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

pub(crate) fn factorial(n: u32) -> BigInt {
    (2..=n).fold(BigInt::one(), |acc, k| acc * k)
}

/// C(n, k), 0 <= k
pub(crate) fn binomial(n: u32, k: u32) -> BigInt {
    if k > n {
        return BigInt::zero();
    }
    let k = k.min(n - k);
    let mut acc = BigInt::one();
    for i in 0..k {
        acc = acc * (n - i) / (i + 1);
    }
    acc
}

/// (F(n), F(n+1)) 빠른 배증
fn fib_pair(n: u64) -> (BigInt, BigInt) {
    if n == 0 {
        return (BigInt::zero(), BigInt::one());
    }
    let (a, b) = fib_pair(n / 2);
    let c = &a * (&b * 2 - &a);
    let d = &a * &a + &b * &b;
    if n % 2 == 0 {
        (c, d)
    } else {
        let next = &c + &d;
        (d, next)
    }
}

/// F(-n) = (-1)^(n+1) F(n)
pub(crate) fn fibonacci(n: i64) -> BigInt {
    let (value, _) = fib_pair(n.unsigned_abs());
    if n < 0 && n % 2 == 0 {
        -value
    } else {
        value
    }
}

/// B(n), B(1) = -1/2
pub(crate) fn bernoulli(n: u32) -> BigRational {
    if n == 1 {
        return BigRational::new(BigInt::from(-1), BigInt::from(2));
    }
    if n % 2 == 1 {
        return BigRational::zero();
    }
    // 아키야마-타니가와
    let mut row: Vec<BigRational> = Vec::with_capacity(n as usize + 1);
    for m in 0..=n as usize {
        row.push(BigRational::new(BigInt::one(), BigInt::from(m + 1)));
        for j in (1..=m).rev() {
            let diff = &row[j - 1] - &row[j];
            row[j - 1] = diff * BigRational::from_integer(BigInt::from(j));
        }
    }
    row.swap_remove(0)
}

/// 오일러 수 E(n): E(0) = 1, 홀수는 0
pub(crate) fn euler(n: u32) -> BigInt {
    if n % 2 == 1 {
        return BigInt::zero();
    }
    let half = (n / 2) as usize;
    let mut values: Vec<BigInt> = Vec::with_capacity(half + 1);
    values.push(BigInt::one());
    for m in 1..=half {
        let two_m = (2 * m) as u32;
        let mut acc = BigInt::zero();
        for (k, e) in values.iter().enumerate() {
            acc += binomial(two_m, (2 * k) as u32) * e;
        }
        values.push(-acc);
    }
    values.pop().unwrap_or_else(BigInt::one)
}

pub(crate) fn catalan(n: u32) -> BigInt {
    binomial(2 * n, n) / (n + 1)
}

/// lcm(1, 2, ..., n)
pub(crate) fn lcm_upto(n: u32) -> BigInt {
    (2..=n).fold(BigInt::one(), |acc, k| acc.lcm(&BigInt::from(k)))
}

/// 시행 나눗셈 소수 판정 (n < 2^32)
pub(crate) fn is_prime_u64(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let mut d: u64 = 3;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// limit 이하의 가장 작은 소인수, 없으면 1
pub(crate) fn smallest_factor(n: &BigInt, limit: u64) -> BigInt {
    let n = n.abs();
    if n < BigInt::from(2) {
        return BigInt::one();
    }
    if n.is_even() {
        return if limit >= 2 {
            BigInt::from(2)
        } else {
            BigInt::one()
        };
    }
    let root = n.sqrt().to_u64().unwrap_or(u64::MAX);
    let mut d: u64 = 3;
    while d <= limit && d <= root {
        if (&n % d).is_zero() {
            return BigInt::from(d);
        }
        d += 2;
    }
    // 남은 n 자체가 소수일 수 있다
    match n.to_u64() {
        Some(v) if v <= limit => n,
        _ => BigInt::one(),
    }
}

/// 처음 count 개 소수 중 n 을 나누는 가장 작은 것, 없으면 1
pub(crate) fn smallest_listed_factor(n: &BigInt, count: u64) -> BigInt {
    let mut seen = 0u64;
    let mut candidate = 2u64;
    while seen < count {
        if is_prime_u64(candidate) {
            seen += 1;
            if (n % candidate).is_zero() {
                return BigInt::from(candidate);
            }
        }
        candidate += 1;
    }
    BigInt::one()
}

/// 야코비 기호 (a / n), n 이 양의 홀수가 아니면 0
pub(crate) fn jacobi(a: &BigInt, n: &BigInt) -> i32 {
    if !n.is_positive() || n.is_even() {
        return 0;
    }
    let mut a = a.mod_floor(n);
    let mut n = n.clone();
    let mut result = 1;
    let three = BigInt::from(3);
    let five = BigInt::from(5);
    let eight = BigInt::from(8);
    let four = BigInt::from(4);
    while !a.is_zero() {
        while a.is_even() {
            a >>= 1usize;
            let r = n.mod_floor(&eight);
            if r == three || r == five {
                result = -result;
            }
        }
        std::mem::swap(&mut a, &mut n);
        if a.mod_floor(&four) == three && n.mod_floor(&four) == three {
            result = -result;
        }
        a = a.mod_floor(&n);
    }
    if n.is_one() {
        result
    } else {
        0
    }
}

/// a 의 법 m 역원 (0 <= r < |m|), 없으면 None
pub(crate) fn mod_inverse(a: &BigInt, m: &BigInt) -> Option<BigInt> {
    let m = m.abs();
    if m.is_zero() {
        return None;
    }
    let eg = a.mod_floor(&m).extended_gcd(&m);
    if !eg.gcd.is_one() {
        return None;
    }
    Some(eg.x.mod_floor(&m))
}

/// n 을 d 로 나눌 수 있는 횟수 (|d| > 1, n != 0)
pub(crate) fn divide_count(n: &BigInt, d: &BigInt) -> (u64, BigInt) {
    let mut count = 0u64;
    let mut rest = n.clone();
    if d.abs() <= BigInt::one() || n.is_zero() {
        return (0, rest);
    }
    loop {
        let (q, r) = rest.div_rem(d);
        if !r.is_zero() {
            break;
        }
        rest = q;
        count += 1;
    }
    (count, rest)
}
