// qcalc-numeric/src/lib.rs
// 정확한 수 탑: Integer < Rational < Complex
//
// - kernel: 고정소수점 급수, 정수론 보조
// - rational/integer/complex: 세 종류
// - kind: 종류 공통 연산 트레잇
// - coerce: 이항 연산 피연산자 맞추기

pub mod coerce;
pub mod complex;
pub mod config;
pub mod error;
pub mod format;
pub mod integer;
mod kernel;
pub mod kind;
pub mod parse;
pub mod rational;
mod rounding;
pub mod theory;
pub mod transcend;
pub mod value;

pub use coerce::{apply, coerce, compare, equals, partial_compare, BinaryOp, Operand};
pub use complex::Complex;
pub use config::{Config, ConfigFile, ConfigKey, ConfigValue, DisplayMode};
pub use error::{ErrorKind, MathError, MathResult};
pub use integer::Integer;
pub use kind::NumericKind;
pub use parse::{parse_integer, parse_rational};
pub use rational::Rational;
pub use theory::hnrmod;
pub use transcend::{polar, Transcendental};
pub use value::{Kind, NumericValue};
