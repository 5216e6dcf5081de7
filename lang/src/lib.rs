// qcalc-lang/src/lib.rs
// 내장 함수 호출 층
//
// - stdlib: 고정 내장 함수 표
// - dispatcher: 이름 + 인자 → 결과
// - poly: 다항식 계산 (평탄형, 중첩형)
// - aggregate: avg, hmean, ssq, sum, max, min
// - runtime: 결과 값과 JSON 변환

pub mod aggregate;
pub mod dispatcher;
pub mod poly;
pub mod runtime;
pub mod stdlib;

pub use dispatcher::Dispatcher;
pub use poly::{evalpoly, PolyTerm};
pub use qcalc_numeric::{
    Config, ConfigKey, ConfigValue, DisplayMode, ErrorKind, MathError, MathResult, NumericKind,
    NumericValue, Operand,
};
pub use runtime::{flatten, Value};
pub use stdlib::{lookup, BuiltinSig, Category, Receiver, CATALOGUE};

/// 편리 함수: 기본 설정으로 한 번 호출
pub fn call(name: &str, args: &[Operand]) -> MathResult<Value> {
    Dispatcher::new().call(name, args)
}
