//! 내장 함수 목록. 분배기는 이 표만 보고 이름을 푼다.

use qcalc_numeric::Transcendental;
use qcalc_numeric::Transcendental as T;

use Form::{Bool, Numeric};

/// 내장 함수 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    /// 첫 인자를 받는 쪽으로 맞춘 뒤 그 메서드로 넘긴다
    Instance,
    /// 가변 인자를 직접 다룬다
    Module,
}

/// 받는 쪽 정의역
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receiver {
    /// Integer, Rational, Complex
    Any,
    /// 유리수로 바꿀 수 있어야 한다
    Real,
    /// 모듈 함수
    Args,
}

impl Receiver {
    pub fn name(self) -> &'static str {
        match self {
            Receiver::Any => "any",
            Receiver::Real => "real",
            Receiver::Args => "args",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    Real,
    Imag,
    Int,
    Even,
    Odd,
    Zero,
    Prime,
    Mult,
    Rel,
    Sq,
    Meq,
    Mne,
    Bit,
}

/// isX 는 0/1 유리수, X? 는 참거짓
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    Numeric,
    Bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Abs,
    Conj,
    Re,
    Im,
    Int,
    Frac,
    Inverse,
    Neg,
    Arg,
    Norm,
    Cmp,
    Estr,
    ToS,
    Appr,
    Round,
    Bround,
    Mod,
    Quo,
    Ceil,
    Floor,
    Mmin,
    Power,
    Sqrt,
    Root,
    Comb,
    Perm,
    Ilog,
    Ilog2,
    Ilog10,
    Trans(Transcendental),
    Is(Predicate, Form),
    Atan2,
    Hypot,
    Ltol,
    Num,
    Den,
    Highbit,
    Lowbit,
    Digit,
    Digits,
    Xor,
    Char,
    Fact,
    Fib,
    Bernoulli,
    Euler,
    Catalan,
    Gcd,
    Lcm,
    Gcdrem,
    Lcmfact,
    Factor,
    Lfactor,
    Fcnt,
    Frem,
    Iroot,
    Isqrt,
    Jacobi,
    Minv,
    Quomod,
    Cfappr,
    Cfsim,
    Avg,
    Hmean,
    Ssq,
    Sum,
    Max,
    Min,
    Poly,
    Pi,
    Polar,
    Hnrmod,
    Config,
}

/// 표 한 줄. 인스턴스 함수의 인자 수는 받는 쪽을 뺀 수.
#[derive(Debug, Clone, Copy)]
pub struct BuiltinSig {
    pub name: &'static str,
    pub category: Category,
    pub receiver: Receiver,
    pub min_args: usize,
    pub max_args: Option<usize>,
    pub op: Builtin,
}

impl BuiltinSig {
    pub fn accepts(&self, count: usize) -> bool {
        count >= self.min_args && self.max_args.map_or(true, |max| count <= max)
    }

    /// "0..1", "2", "1.." 꼴
    pub fn arity_text(&self) -> String {
        match self.max_args {
            Some(max) if max == self.min_args => max.to_string(),
            Some(max) => format!("{}..{}", self.min_args, max),
            None => format!("{}..", self.min_args),
        }
    }
}

const fn any(name: &'static str, min: usize, max: usize, op: Builtin) -> BuiltinSig {
    BuiltinSig {
        name,
        category: Category::Instance,
        receiver: Receiver::Any,
        min_args: min,
        max_args: Some(max),
        op,
    }
}

const fn real(name: &'static str, min: usize, max: Option<usize>, op: Builtin) -> BuiltinSig {
    BuiltinSig {
        name,
        category: Category::Instance,
        receiver: Receiver::Real,
        min_args: min,
        max_args: max,
        op,
    }
}

const fn module(name: &'static str, min: usize, max: Option<usize>, op: Builtin) -> BuiltinSig {
    BuiltinSig {
        name,
        category: Category::Module,
        receiver: Receiver::Args,
        min_args: min,
        max_args: max,
        op,
    }
}

const fn trans(name: &'static str, f: Transcendental) -> BuiltinSig {
    any(name, 0, 1, Builtin::Trans(f))
}

const fn pred(name: &'static str, args: usize, p: Predicate, form: Form) -> BuiltinSig {
    let receiver = match p {
        Predicate::Real
        | Predicate::Imag
        | Predicate::Int
        | Predicate::Even
        | Predicate::Odd
        | Predicate::Zero => Receiver::Any,
        _ => Receiver::Real,
    };
    BuiltinSig {
        name,
        category: Category::Instance,
        receiver,
        min_args: args,
        max_args: Some(args),
        op: Builtin::Is(p, form),
    }
}

pub static CATALOGUE: &[BuiltinSig] = &[
    any("abs", 0, 1, Builtin::Abs),
    any("conj", 0, 0, Builtin::Conj),
    any("re", 0, 0, Builtin::Re),
    any("im", 0, 0, Builtin::Im),
    any("int", 0, 0, Builtin::Int),
    any("frac", 0, 0, Builtin::Frac),
    any("inverse", 0, 0, Builtin::Inverse),
    any("neg", 0, 0, Builtin::Neg),
    any("arg", 0, 1, Builtin::Arg),
    any("norm", 0, 0, Builtin::Norm),
    any("cmp", 1, 1, Builtin::Cmp),
    any("estr", 0, 0, Builtin::Estr),
    any("to_s", 0, 1, Builtin::ToS),
    pred("isreal", 0, Predicate::Real, Numeric),
    pred("real?", 0, Predicate::Real, Bool),
    pred("isimag", 0, Predicate::Imag, Numeric),
    pred("imag?", 0, Predicate::Imag, Bool),
    pred("isint", 0, Predicate::Int, Numeric),
    pred("int?", 0, Predicate::Int, Bool),
    pred("iseven", 0, Predicate::Even, Numeric),
    pred("even?", 0, Predicate::Even, Bool),
    pred("isodd", 0, Predicate::Odd, Numeric),
    pred("odd?", 0, Predicate::Odd, Bool),
    pred("zero?", 0, Predicate::Zero, Bool),
    any("appr", 0, 2, Builtin::Appr),
    any("round", 0, 2, Builtin::Round),
    any("bround", 0, 2, Builtin::Bround),
    any("mod", 1, 2, Builtin::Mod),
    any("quo", 1, 2, Builtin::Quo),
    any("ceil", 0, 0, Builtin::Ceil),
    any("floor", 0, 0, Builtin::Floor),
    any("mmin", 1, 1, Builtin::Mmin),
    any("power", 1, 2, Builtin::Power),
    any("sqrt", 0, 2, Builtin::Sqrt),
    any("root", 1, 2, Builtin::Root),
    any("comb", 1, 1, Builtin::Comb),
    any("perm", 1, 1, Builtin::Perm),
    trans("exp", T::Exp),
    trans("ln", T::Ln),
    trans("log", T::Log),
    trans("sin", T::Sin),
    trans("cos", T::Cos),
    trans("tan", T::Tan),
    trans("cot", T::Cot),
    trans("sec", T::Sec),
    trans("csc", T::Csc),
    trans("sinh", T::Sinh),
    trans("cosh", T::Cosh),
    trans("tanh", T::Tanh),
    trans("coth", T::Coth),
    trans("sech", T::Sech),
    trans("csch", T::Csch),
    trans("asin", T::Asin),
    trans("acos", T::Acos),
    trans("atan", T::Atan),
    trans("acot", T::Acot),
    trans("asec", T::Asec),
    trans("acsc", T::Acsc),
    trans("asinh", T::Asinh),
    trans("acosh", T::Acosh),
    trans("atanh", T::Atanh),
    trans("acoth", T::Acoth),
    trans("asech", T::Asech),
    trans("acsch", T::Acsch),
    trans("gd", T::Gd),
    trans("agd", T::Agd),
    any("ilog", 1, 1, Builtin::Ilog),
    any("ilog2", 0, 0, Builtin::Ilog2),
    any("ilog10", 0, 0, Builtin::Ilog10),
    real("atan2", 1, Some(2), Builtin::Atan2),
    real("hypot", 1, Some(2), Builtin::Hypot),
    real("ltol", 0, Some(1), Builtin::Ltol),
    real("num", 0, Some(0), Builtin::Num),
    real("den", 0, Some(0), Builtin::Den),
    pred("bit", 1, Predicate::Bit, Numeric),
    pred("bit?", 1, Predicate::Bit, Bool),
    real("highbit", 0, Some(0), Builtin::Highbit),
    real("lowbit", 0, Some(0), Builtin::Lowbit),
    real("digit", 1, Some(2), Builtin::Digit),
    real("digits", 0, Some(1), Builtin::Digits),
    real("xor", 0, None, Builtin::Xor),
    real("char", 0, Some(0), Builtin::Char),
    real("fact", 0, Some(0), Builtin::Fact),
    real("fib", 0, Some(0), Builtin::Fib),
    real("bernoulli", 0, Some(0), Builtin::Bernoulli),
    real("euler", 0, Some(0), Builtin::Euler),
    real("catalan", 0, Some(0), Builtin::Catalan),
    real("gcd", 0, None, Builtin::Gcd),
    real("lcm", 0, None, Builtin::Lcm),
    real("gcdrem", 1, Some(1), Builtin::Gcdrem),
    real("lcmfact", 0, Some(0), Builtin::Lcmfact),
    real("factor", 0, Some(1), Builtin::Factor),
    real("lfactor", 1, Some(1), Builtin::Lfactor),
    real("fcnt", 1, Some(1), Builtin::Fcnt),
    real("frem", 1, Some(1), Builtin::Frem),
    real("iroot", 1, Some(1), Builtin::Iroot),
    real("isqrt", 0, Some(0), Builtin::Isqrt),
    real("jacobi", 1, Some(1), Builtin::Jacobi),
    real("minv", 1, Some(1), Builtin::Minv),
    real("quomod", 1, Some(2), Builtin::Quomod),
    pred("isprime", 0, Predicate::Prime, Numeric),
    pred("prime?", 0, Predicate::Prime, Bool),
    pred("ismult", 1, Predicate::Mult, Numeric),
    pred("mult?", 1, Predicate::Mult, Bool),
    pred("isrel", 1, Predicate::Rel, Numeric),
    pred("rel?", 1, Predicate::Rel, Bool),
    pred("issq", 0, Predicate::Sq, Numeric),
    pred("sq?", 0, Predicate::Sq, Bool),
    pred("meq", 2, Predicate::Meq, Numeric),
    pred("meq?", 2, Predicate::Meq, Bool),
    pred("mne", 2, Predicate::Mne, Numeric),
    pred("mne?", 2, Predicate::Mne, Bool),
    real("cfappr", 0, Some(2), Builtin::Cfappr),
    real("cfsim", 0, Some(1), Builtin::Cfsim),
    module("avg", 0, None, Builtin::Avg),
    module("hmean", 0, None, Builtin::Hmean),
    module("ssq", 0, None, Builtin::Ssq),
    module("sum", 0, None, Builtin::Sum),
    module("max", 0, None, Builtin::Max),
    module("min", 0, None, Builtin::Min),
    module("poly", 1, None, Builtin::Poly),
    module("pi", 0, Some(1), Builtin::Pi),
    module("polar", 2, Some(3), Builtin::Polar),
    module("hnrmod", 4, Some(4), Builtin::Hnrmod),
    module("config", 1, Some(2), Builtin::Config),
];

/// 다른 이름 → 표 이름
pub fn canonicalize_alias(name: &str) -> &str {
    match name {
        "magnitude" => "abs",
        "divmod" => "quomod",
        "numerator" => "num",
        "denominator" => "den",
        "real" => "re",
        "imag" => "im",
        "integer?" => "int?",
        _ => name,
    }
}

pub fn lookup(name: &str) -> Option<&'static BuiltinSig> {
    let name = canonicalize_alias(name);
    CATALOGUE.iter().find(|sig| sig.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    #[test]
    fn names_are_unique() {
        let names: BTreeSet<_> = CATALOGUE.iter().map(|sig| sig.name).collect();
        assert_eq!(names.len(), CATALOGUE.len());
    }

    #[test]
    fn every_transcendental_is_listed() {
        for f in Transcendental::ALL {
            let sig = lookup(f.name()).expect("listed");
            assert_eq!(sig.op, Builtin::Trans(f));
            assert_eq!(sig.receiver, Receiver::Any);
        }
    }

    #[test]
    fn aliases_resolve() {
        assert_eq!(lookup("magnitude").expect("abs").op, Builtin::Abs);
        assert_eq!(lookup("divmod").expect("quomod").op, Builtin::Quomod);
        assert_eq!(lookup("numerator").expect("num").op, Builtin::Num);
        assert_eq!(
            lookup("integer?").expect("int?").op,
            Builtin::Is(Predicate::Int, Form::Bool)
        );
        assert!(lookup("frobnicate").is_none());
    }

    #[test]
    fn arity_ranges() {
        let poly = lookup("poly").expect("poly");
        assert!(!poly.accepts(0));
        assert!(poly.accepts(7));
        assert_eq!(poly.arity_text(), "1..");
        let hnrmod = lookup("hnrmod").expect("hnrmod");
        assert_eq!(hnrmod.arity_text(), "4");
        assert_eq!(lookup("mod").expect("mod").arity_text(), "1..2");
        assert_eq!(lookup("prime?").expect("prime?").receiver, Receiver::Real);
        assert_eq!(lookup("zero?").expect("zero?").receiver, Receiver::Any);
    }
}
