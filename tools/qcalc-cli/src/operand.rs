use qcalc_numeric::{
    parse_integer, parse_rational, Complex, Integer, MathError, MathResult, Operand, Rational,
};

/// 명령줄 인자 하나 → Operand
///
/// nil, true/false, [a, b, ...], "문자열", 수, 끝에 i 가 붙은 허수.
/// 수로 읽히지 않는 낱말은 문자열로 넘긴다 (config 이름 등).
pub fn parse_operand(text: &str) -> MathResult<Operand> {
    let text = text.trim();
    match text {
        "nil" => return Ok(Operand::Nil),
        "true" => return Ok(Operand::Bool(true)),
        "false" => return Ok(Operand::Bool(false)),
        _ => {}
    }
    if let Some(inner) = text.strip_prefix('[') {
        let inner = inner
            .strip_suffix(']')
            .ok_or_else(|| MathError::coercion("call", text, "closed list"))?;
        return split_items(inner)?
            .into_iter()
            .map(parse_operand)
            .collect::<MathResult<Vec<_>>>()
            .map(Operand::List);
    }
    if let Some(inner) = quoted(text) {
        return Ok(Operand::Str(inner.to_string()));
    }
    if let Some(im) = text.strip_suffix('i') {
        let im = match im {
            "" | "+" => Rational::one(),
            "-" => -Rational::one(),
            other => match parse_rational(other, "call") {
                Ok(q) => q,
                Err(_) => return Ok(Operand::Str(text.to_string())),
            },
        };
        return Ok(Operand::from(Complex::new(Rational::zero(), im)));
    }
    if let Ok(n) = parse_integer(text, "call") {
        return Ok(Operand::from(Integer::new(n)));
    }
    match parse_rational(text, "call") {
        Ok(q) => Ok(Operand::from(q)),
        Err(err) if looks_numeric(text) => Err(err),
        Err(_) => Ok(Operand::Str(text.to_string())),
    }
}

fn quoted(text: &str) -> Option<&str> {
    ['"', '\''].iter().find_map(|&q| {
        text.strip_prefix(q)
            .and_then(|rest| rest.strip_suffix(q))
    })
}

/// 0 으로 나누기 같은 수 오류는 문자열로 덮지 않는다
fn looks_numeric(text: &str) -> bool {
    text.starts_with(|c: char| c.is_ascii_digit() || c == '-' || c == '+' || c == '.')
}

/// 최상위 쉼표로 나눈다
fn split_items(inner: &str) -> MathResult<Vec<&str>> {
    let mut items = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in inner.char_indices() {
        match c {
            '[' => depth += 1,
            ']' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| MathError::coercion("call", inner, "balanced list"))?;
            }
            ',' if depth == 0 => {
                items.push(&inner[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(MathError::coercion("call", inner, "balanced list"));
    }
    let last = &inner[start..];
    if !last.trim().is_empty() || !items.is_empty() {
        items.push(last);
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use qcalc_numeric::{ErrorKind, Kind, NumericValue};

    #[test]
    fn literals() {
        assert_eq!(parse_operand("nil").expect("nil"), Operand::Nil);
        assert_eq!(parse_operand("true").expect("bool"), Operand::Bool(true));
        assert_eq!(parse_operand("'mode'").expect("str"), Operand::Str("mode".into()));
        assert_eq!(parse_operand("epsilon").expect("word"), Operand::Str("epsilon".into()));
    }

    #[test]
    fn numbers_keep_their_kind() {
        let Operand::Num(n) = parse_operand("-12").expect("int") else {
            panic!("expected number");
        };
        assert_eq!(n.kind(), Kind::Integer);
        let Operand::Num(q) = parse_operand("1/3").expect("ratio") else {
            panic!("expected number");
        };
        assert_eq!(q, NumericValue::ratio(1, 3).expect("ratio"));
        let Operand::Num(z) = parse_operand("-2i").expect("imag") else {
            panic!("expected number");
        };
        assert_eq!(z, NumericValue::complex(Rational::zero(), Rational::from_i64(-2)));
        let err = parse_operand("1/0").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DivisionByZero);
    }

    #[test]
    fn nested_lists() {
        let value = parse_operand("[[2,3],[5],1]").expect("list");
        let Operand::List(items) = value else {
            panic!("expected list");
        };
        assert_eq!(items.len(), 3);
        assert!(matches!(&items[0], Operand::List(inner) if inner.len() == 2));
        assert_eq!(parse_operand("[]").expect("empty"), Operand::List(vec![]));
        assert!(parse_operand("[1,[2]").is_err());
    }
}
