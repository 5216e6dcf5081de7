//! 가변 인자 집계: avg, hmean, ssq, sum, max, min. 목록 인자는 펼친다.

use std::cmp::Ordering;

use qcalc_numeric::{
    apply, compare, BinaryOp, MathResult, NumericKind, NumericValue, Operand, Rational,
};

use crate::runtime::flatten;

fn rational(n: usize) -> NumericValue {
    NumericValue::Rational(Rational::from_i64(n as i64))
}

/// 덧셈으로 모은다. 빈 입력은 None.
fn total(items: &[&Operand], op: &'static str) -> MathResult<Option<NumericValue>> {
    let Some((first, rest)) = items.split_first() else {
        return Ok(None);
    };
    let mut acc = first.to_numeric(op)?;
    for item in rest {
        acc = apply(&acc, item, BinaryOp::Add)?;
    }
    Ok(Some(acc))
}

/// 합 / 개수 (유리수 나눗셈)
pub fn avg(args: &[Operand]) -> MathResult<Option<NumericValue>> {
    let items = flatten(args);
    let Some(sum) = total(&items, "avg")? else {
        return Ok(None);
    };
    sum.try_div(&rational(items.len())).map(Some)
}

/// 개수 / Σ(1/x). 0 이 하나라도 있으면 0.
pub fn hmean(args: &[Operand]) -> MathResult<Option<NumericValue>> {
    let values = flatten(args)
        .into_iter()
        .map(|arg| arg.to_numeric("hmean"))
        .collect::<MathResult<Vec<_>>>()?;
    if values.is_empty() {
        return Ok(None);
    }
    if values.iter().any(NumericValue::is_zero) {
        return Ok(Some(rational(0)));
    }
    let mut acc = rational(0);
    for x in &values {
        acc = &acc + &x.as_kind().inverse()?;
    }
    rational(values.len()).try_div(&acc).map(Some)
}

/// Σx². 빈 입력은 0.
pub fn ssq(args: &[Operand]) -> MathResult<Option<NumericValue>> {
    let mut acc = rational(0);
    for arg in flatten(args) {
        let x = arg.to_numeric("ssq")?;
        acc = &acc + &(&x * &x);
    }
    Ok(Some(acc))
}

/// nil 은 건너뛴다. 빈 입력은 0.
pub fn sum(args: &[Operand]) -> MathResult<Option<NumericValue>> {
    let items: Vec<&Operand> = flatten(args).into_iter().filter(|a| !a.is_nil()).collect();
    Ok(Some(total(&items, "sum")?.unwrap_or_else(|| rational(0))))
}

fn extreme(
    args: &[Operand],
    op: &'static str,
    keep: Ordering,
) -> MathResult<Option<NumericValue>> {
    let mut best: Option<NumericValue> = None;
    for arg in flatten(args).into_iter().filter(|a| !a.is_nil()) {
        let x = arg.to_numeric(op)?;
        best = match best {
            None => {
                // 실수인지 먼저 확인한다
                x.to_rational(op)?;
                Some(x)
            }
            Some(current) => {
                if compare(&x, &Operand::Num(current.clone()), op)? == keep {
                    Some(x)
                } else {
                    Some(current)
                }
            }
        };
    }
    Ok(best)
}

pub fn max(args: &[Operand]) -> MathResult<Option<NumericValue>> {
    extreme(args, "max", Ordering::Greater)
}

pub fn min(args: &[Operand]) -> MathResult<Option<NumericValue>> {
    extreme(args, "min", Ordering::Less)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcalc_numeric::ErrorKind;

    fn ints(values: &[i64]) -> Vec<Operand> {
        values.iter().copied().map(Operand::Int).collect()
    }

    #[test]
    fn aggregate_sum_skips_nil_but_avg_does_not() {
        let args = vec![Operand::Int(1), Operand::Nil, Operand::Int(2)];
        assert_eq!(sum(&args).expect("sum"), Some(NumericValue::int(3)));
        assert_eq!(avg(&args).unwrap_err().kind(), ErrorKind::TypeCoercion);
        assert_eq!(sum(&[]).expect("sum"), Some(NumericValue::int(0)));
    }

    #[test]
    fn aggregate_avg_divides_exactly() {
        let value = avg(&ints(&[1, 2])).expect("avg").expect("value");
        assert_eq!(value, NumericValue::ratio(3, 2).expect("ratio"));
    }

    #[test]
    fn aggregate_ssq_flattens_nested_lists() {
        let args = vec![
            Operand::Int(1),
            Operand::List(vec![Operand::Int(2), Operand::List(ints(&[3]))]),
        ];
        assert_eq!(ssq(&args).expect("ssq"), Some(NumericValue::int(14)));
    }

    #[test]
    fn aggregate_extremes_keep_the_original_kind() {
        let args = vec![
            Operand::Int(3),
            Operand::Nil,
            Operand::from(Rational::ratio(7, 2).expect("ratio")),
            Operand::Float(-1.5),
        ];
        assert_eq!(
            max(&args).expect("max"),
            Some(NumericValue::ratio(7, 2).expect("ratio"))
        );
        assert_eq!(
            min(&args).expect("min"),
            Some(NumericValue::ratio(-3, 2).expect("ratio"))
        );
        assert_eq!(max(&[Operand::Nil]).expect("max"), None);
        let err = max(&[Operand::Int(1), Operand::Complex(0.0, 1.0)]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeCoercion);
    }
}
