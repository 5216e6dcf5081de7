use qcalc_numeric::{
    Complex, Config, ConfigValue, DisplayMode, Integer, NumericKind, NumericValue, Operand,
    Rational,
};
use serde_json::{json, Map};

/// 내장 함수 결과
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Nil,
    Bool(bool),
    Str(String),
    Num(NumericValue),
    List(Vec<Value>),
}

impl Value {
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    pub fn as_num(&self) -> Option<&NumericValue> {
        match self {
            Value::Num(v) => Some(v),
            _ => None,
        }
    }

    /// 0/1 유리수 (isX 꼴)
    pub fn flag(b: bool) -> Value {
        Value::Num(NumericValue::Rational(Rational::from_i64(b as i64)))
    }

    /// 현재 출력 방식으로 쓴다
    pub fn render(&self, cx: &Config, mode: Option<DisplayMode>) -> String {
        match self {
            Value::Nil => "nil".to_string(),
            Value::Bool(b) => b.to_string(),
            Value::Str(s) => format!("{:?}", s),
            Value::Num(v) => v.as_kind().to_s(cx, mode),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(|v| v.render(cx, mode)).collect();
                format!("[{}]", parts.join(", "))
            }
        }
    }

    /// 수는 {kind, value(분수), text(출력 방식)} 꼴
    pub fn to_json(&self, cx: &Config) -> serde_json::Value {
        match self {
            Value::Nil => serde_json::Value::Null,
            Value::Bool(b) => json!(b),
            Value::Str(s) => json!(s),
            Value::Num(v) => {
                let mut map = Map::new();
                map.insert("kind".to_string(), json!(v.kind().name()));
                map.insert(
                    "value".to_string(),
                    json!(v.as_kind().to_s(cx, Some(DisplayMode::Fraction))),
                );
                map.insert("text".to_string(), json!(v.as_kind().to_s(cx, None)));
                serde_json::Value::Object(map)
            }
            Value::List(items) => {
                serde_json::Value::Array(items.iter().map(|v| v.to_json(cx)).collect())
            }
        }
    }

    /// 다음 호출의 인자로 되먹인다
    pub fn into_operand(self) -> Operand {
        match self {
            Value::Nil => Operand::Nil,
            Value::Bool(b) => Operand::Bool(b),
            Value::Str(s) => Operand::Str(s),
            Value::Num(v) => Operand::Num(v),
            Value::List(items) => {
                Operand::List(items.into_iter().map(Value::into_operand).collect())
            }
        }
    }
}

impl From<NumericValue> for Value {
    fn from(value: NumericValue) -> Self {
        Value::Num(value)
    }
}

impl From<Rational> for Value {
    fn from(value: Rational) -> Self {
        Value::Num(NumericValue::Rational(value))
    }
}

impl From<Integer> for Value {
    fn from(value: Integer) -> Self {
        Value::Num(NumericValue::Integer(value))
    }
}

impl From<Complex> for Value {
    fn from(value: Complex) -> Self {
        Value::Num(NumericValue::Complex(value))
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<Option<NumericValue>> for Value {
    fn from(value: Option<NumericValue>) -> Self {
        value.map_or(Value::Nil, Value::Num)
    }
}

impl From<ConfigValue> for Value {
    fn from(value: ConfigValue) -> Self {
        match value {
            ConfigValue::Mode(mode) => Value::Str(mode.name().to_string()),
            ConfigValue::Count(n) => Value::Num(NumericValue::int(n as i64)),
            ConfigValue::Epsilon(eps) => Value::from(eps),
        }
    }
}

/// 중첩 목록을 펼친다
pub fn flatten(args: &[Operand]) -> Vec<&Operand> {
    let mut out = Vec::with_capacity(args.len());
    for arg in args {
        match arg {
            Operand::List(items) => out.extend(flatten(items)),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_flatten_walks_nested_lists() {
        let args = vec![
            Operand::Int(1),
            Operand::List(vec![Operand::Int(2), Operand::List(vec![Operand::Int(3)])]),
            Operand::Nil,
        ];
        let flat = flatten(&args);
        assert_eq!(flat.len(), 4);
        assert_eq!(flat[2], &Operand::Int(3));
        assert!(flat[3].is_nil());
    }

    #[test]
    fn runtime_render_uses_the_display_mode() {
        let cx = Config::default();
        let half = Value::from(Rational::ratio(1, 2).expect("half"));
        assert_eq!(half.render(&cx, None), "0.5");
        assert_eq!(half.render(&cx, Some(DisplayMode::Fraction)), "1/2");
        let list = Value::List(vec![Value::Bool(true), Value::Nil, half]);
        assert_eq!(list.render(&cx, None), "[true, nil, 0.5]");
    }

    #[test]
    fn runtime_json_keeps_exact_value() {
        let cx = Config::default();
        let third = Value::from(Rational::ratio(1, 3).expect("third"));
        let json = third.to_json(&cx);
        assert_eq!(json["kind"], "rational");
        assert_eq!(json["value"], "1/3");
        assert_eq!(json["text"], "~0.33333333333333333333");
        assert_eq!(Value::Nil.to_json(&cx), serde_json::Value::Null);
    }

    #[test]
    fn runtime_values_feed_back_as_operands() {
        let value = Value::List(vec![Value::from(Integer::from_i64(4)), Value::Nil]);
        let operand = value.into_operand();
        assert_eq!(
            operand,
            Operand::List(vec![Operand::Num(NumericValue::int(4)), Operand::Nil])
        );
    }
}
