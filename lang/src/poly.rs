//! poly: 평탄형 (c0, ..., cn-1, x) 과 중첩형 ([계수...], x, y, ...).
//! 중첩 한 단계가 점 하나를 쓴다.

use qcalc_numeric::{MathError, MathResult, NumericValue, Operand, Rational};

/// 계수 나무
#[derive(Debug, Clone, PartialEq)]
pub enum PolyTerm {
    Coeff(NumericValue),
    Nested(Vec<PolyTerm>),
}

impl PolyTerm {
    /// 목록은 Nested, 나머지는 수로 바꾼다
    pub fn from_operand(operand: &Operand) -> MathResult<PolyTerm> {
        match operand {
            Operand::List(items) => Ok(PolyTerm::Nested(
                items
                    .iter()
                    .map(PolyTerm::from_operand)
                    .collect::<MathResult<_>>()?,
            )),
            other => Ok(PolyTerm::Coeff(other.to_numeric("poly")?)),
        }
    }
}

fn zero() -> NumericValue {
    NumericValue::Rational(Rational::zero())
}

/// d 번째 점으로 list 를 계산한다. 빈 목록은 None.
pub fn evalpoly(list: &[PolyTerm], points: &[NumericValue], d: usize) -> Option<NumericValue> {
    let first = list.first()?;
    let Some(x) = points.get(d) else {
        return match first {
            PolyTerm::Nested(inner) => evalpoly(inner, points, d + 1),
            PolyTerm::Coeff(c) => Some(c.clone()),
        };
    };
    let value = list.iter().rev().fold(zero(), |acc, term| {
        let term = match term {
            PolyTerm::Coeff(c) => c.clone(),
            PolyTerm::Nested(inner) => evalpoly(inner, points, d + 1).unwrap_or_else(zero),
        };
        &(&acc * x) + &term
    });
    Some(value)
}

/// 평탄형은 c0 이 최고차. x 만 주면 x.
fn horner(coeffs: &[NumericValue], x: &NumericValue) -> NumericValue {
    match coeffs.split_first() {
        None => x.clone(),
        Some((lead, rest)) => rest
            .iter()
            .fold(lead.clone(), |acc, c| &(&acc * x) + c),
    }
}

pub fn poly(args: &[Operand]) -> MathResult<Option<NumericValue>> {
    let Some((first, rest)) = args.split_first() else {
        return Err(MathError::arity("poly", 1, None, 0));
    };
    if let Operand::List(items) = first {
        let terms = items
            .iter()
            .map(PolyTerm::from_operand)
            .collect::<MathResult<Vec<_>>>()?;
        let points = rest
            .iter()
            .map(|p| p.to_numeric("poly"))
            .collect::<MathResult<Vec<_>>>()?;
        return Ok(evalpoly(&terms, &points, 0));
    }
    let values = args
        .iter()
        .map(|a| a.to_numeric("poly"))
        .collect::<MathResult<Vec<_>>>()?;
    let Some((x, coeffs)) = values.split_last() else {
        return Err(MathError::arity("poly", 1, None, 0));
    };
    Ok(Some(horner(coeffs, x)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poly_flat_form_leads_with_the_highest_degree() {
        let args: Vec<Operand> = [2, 3, 5, 7].into_iter().map(Operand::Int).collect();
        let value = poly(&args).expect("poly").expect("value");
        assert_eq!(value, NumericValue::int(124));
    }

    #[test]
    fn poly_with_only_a_point_is_the_point() {
        let value = poly(&[Operand::Int(9)]).expect("poly").expect("value");
        assert_eq!(value, NumericValue::int(9));
    }

    #[test]
    fn poly_empty_coefficient_list_is_absent() {
        let value = poly(&[Operand::List(vec![]), Operand::Int(2)]).expect("poly");
        assert!(value.is_none());
    }

    #[test]
    fn poly_nested_terms_fall_back_to_first_coefficient() {
        let terms = vec![PolyTerm::Nested(vec![PolyTerm::Coeff(NumericValue::int(4))])];
        assert_eq!(evalpoly(&terms, &[], 0), Some(NumericValue::int(4)));
    }
}
