use std::fmt;

/// 오류 종류. 분배기와 직접 호출이 같은 종류를 내는지 비교할 때 쓴다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    DivisionByZero,
    Domain,
    TypeCoercion,
    ArgumentCount,
    OutOfRange,
    Undefined,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MathError {
    DivisionByZero {
        op: &'static str,
    },
    Domain {
        op: &'static str,
        message: String,
    },
    TypeCoercion {
        op: &'static str,
        found: String,
        expected: &'static str,
    },
    ArgumentCount {
        op: &'static str,
        min: usize,
        max: Option<usize>,
        got: usize,
    },
    OutOfRange {
        op: &'static str,
        message: String,
    },
    Undefined {
        name: String,
    },
}

pub type MathResult<T> = Result<T, MathError>;

impl MathError {
    pub fn div_zero(op: &'static str) -> Self {
        MathError::DivisionByZero { op }
    }

    pub fn domain(op: &'static str, message: impl Into<String>) -> Self {
        MathError::Domain {
            op,
            message: message.into(),
        }
    }

    pub fn coercion(op: &'static str, found: impl Into<String>, expected: &'static str) -> Self {
        MathError::TypeCoercion {
            op,
            found: found.into(),
            expected,
        }
    }

    pub fn arity(op: &'static str, min: usize, max: Option<usize>, got: usize) -> Self {
        MathError::ArgumentCount { op, min, max, got }
    }

    pub fn out_of_range(op: &'static str, message: impl Into<String>) -> Self {
        MathError::OutOfRange {
            op,
            message: message.into(),
        }
    }

    pub fn undefined(name: impl Into<String>) -> Self {
        MathError::Undefined { name: name.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            MathError::DivisionByZero { .. } => ErrorKind::DivisionByZero,
            MathError::Domain { .. } => ErrorKind::Domain,
            MathError::TypeCoercion { .. } => ErrorKind::TypeCoercion,
            MathError::ArgumentCount { .. } => ErrorKind::ArgumentCount,
            MathError::OutOfRange { .. } => ErrorKind::OutOfRange,
            MathError::Undefined { .. } => ErrorKind::Undefined,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            MathError::DivisionByZero { .. } => "E_MATH_DIV_ZERO",
            MathError::Domain { .. } => "E_MATH_DOMAIN",
            MathError::TypeCoercion { .. } => "E_MATH_TYPE",
            MathError::ArgumentCount { .. } => "E_MATH_ARITY",
            MathError::OutOfRange { .. } => "E_MATH_RANGE",
            MathError::Undefined { .. } => "E_MATH_UNDEFINED",
        }
    }
}

impl fmt::Display for MathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MathError::DivisionByZero { op } => write!(f, "{}: division by zero", op),
            MathError::Domain { op, message } => write!(f, "{}: {}", op, message),
            MathError::TypeCoercion {
                op,
                found,
                expected,
            } => write!(f, "{}: cannot convert {} into {}", op, found, expected),
            MathError::ArgumentCount { op, min, max, got } => match max {
                Some(max) if max == min => {
                    write!(f, "{}: expected {} arguments, got {}", op, min, got)
                }
                Some(max) => write!(
                    f,
                    "{}: expected {} to {} arguments, got {}",
                    op, min, max, got
                ),
                None => write!(f, "{}: expected at least {} arguments, got {}", op, min, got),
            },
            MathError::OutOfRange { op, message } => write!(f, "{}: {}", op, message),
            MathError::Undefined { name } => write!(f, "undefined name: {}", name),
        }
    }
}

impl std::error::Error for MathError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_and_code_follow_variant() {
        let err = MathError::domain("fact", "negative argument");
        assert_eq!(err.kind(), ErrorKind::Domain);
        assert_eq!(err.code(), "E_MATH_DOMAIN");
        assert_eq!(err.to_string(), "fact: negative argument");
    }

    #[test]
    fn arity_message_names_the_range() {
        let err = MathError::arity("round", 0, Some(2), 3);
        assert_eq!(err.to_string(), "round: expected 0 to 2 arguments, got 3");
        let err = MathError::arity("poly", 1, None, 0);
        assert_eq!(err.to_string(), "poly: expected at least 1 arguments, got 0");
    }
}
