//! 이름 + 인자 목록 → 결과. 첫 인자를 받는 쪽으로 맞춘 뒤 NumericKind
//! 또는 Rational 메서드로 넘긴다. 오류는 바꾸지 않고 그대로 올린다.

use log::trace;
use qcalc_numeric::{
    hnrmod, polar, Config, ConfigKey, DisplayMode, MathError, MathResult, NumericKind,
    NumericValue, Operand, Rational,
};

use crate::aggregate;
use crate::poly;
use crate::runtime::Value;
use crate::stdlib::{self, Builtin, BuiltinSig, Category, Form, Predicate, Receiver};

/// 반올림 플래그 상한
const RND_LIMIT: u32 = 1 << 31;

#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    config: Config,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn call(&mut self, name: &str, args: &[Operand]) -> MathResult<Value> {
        let sig = stdlib::lookup(name).ok_or_else(|| MathError::undefined(name))?;
        trace!("dispatch {} -> {:?} ({} args)", name, sig.op, args.len());
        match sig.category {
            Category::Instance => {
                let Some((receiver, rest)) = args.split_first() else {
                    return Err(instance_arity(sig, 0));
                };
                if !sig.accepts(rest.len()) {
                    return Err(instance_arity(sig, args.len()));
                }
                let x = receiver.to_numeric(sig.name)?;
                match sig.receiver {
                    Receiver::Real => {
                        let q = x.to_rational(sig.name)?;
                        real_instance(&self.config, sig, &q, rest)
                    }
                    _ => any_instance(&self.config, sig, &x, rest),
                }
            }
            Category::Module => {
                if !sig.accepts(args.len()) {
                    return Err(MathError::arity(sig.name, sig.min_args, sig.max_args, args.len()));
                }
                self.module(sig, args)
            }
        }
    }

    fn module(&mut self, sig: &'static BuiltinSig, args: &[Operand]) -> MathResult<Value> {
        let name = sig.name;
        let value = match sig.op {
            Builtin::Avg => aggregate::avg(args)?.into(),
            Builtin::Hmean => aggregate::hmean(args)?.into(),
            Builtin::Ssq => aggregate::ssq(args)?.into(),
            Builtin::Sum => aggregate::sum(args)?.into(),
            Builtin::Max => aggregate::max(args)?.into(),
            Builtin::Min => aggregate::min(args)?.into(),
            Builtin::Poly => poly::poly(args)?.into(),
            Builtin::Pi => {
                let eps = eps_arg(args, 0, name)?;
                Rational::pi(self.config.effective_epsilon(name, eps.as_ref())?).into()
            }
            Builtin::Polar => {
                let r = rational_arg(args, 0, name)?;
                let theta = rational_arg(args, 1, name)?;
                let eps = eps_arg(args, 2, name)?;
                polar(&r, &theta, self.config.effective_epsilon(name, eps.as_ref())?).into()
            }
            Builtin::Hnrmod => hnrmod(
                &rational_arg(args, 0, name)?,
                &rational_arg(args, 1, name)?,
                &rational_arg(args, 2, name)?,
                &rational_arg(args, 3, name)?,
            )?
            .into(),
            Builtin::Config => self.config_call(args)?,
            other => return Err(MathError::undefined(format!("{:?}", other))),
        };
        Ok(value)
    }

    /// config(name) 는 현재 값, config(name, value) 는 바꾸고 이전 값
    fn config_call(&mut self, args: &[Operand]) -> MathResult<Value> {
        let Operand::Str(name) = &args[0] else {
            return Err(MathError::coercion("config", args[0].to_string(), "parameter name"));
        };
        let key = ConfigKey::from_name(name)?;
        let previous = match args.get(1) {
            None | Some(Operand::Nil) => return Ok(self.config.get(key).into()),
            Some(Operand::Str(text)) if key == ConfigKey::Mode => {
                self.config.set_mode_name(text)?
            }
            Some(value) => {
                let value = value.to_rational("config")?;
                self.config.set_rational(key, &value)?
            }
        };
        Ok(previous.into())
    }
}

fn instance_arity(sig: &BuiltinSig, got: usize) -> MathError {
    MathError::arity(
        sig.name,
        sig.min_args + 1,
        sig.max_args.map(|max| max + 1),
        got,
    )
}

fn any_instance(
    cx: &Config,
    sig: &BuiltinSig,
    x: &NumericValue,
    args: &[Operand],
) -> MathResult<Value> {
    let name = sig.name;
    let k = x.as_kind();
    let value = match sig.op {
        Builtin::Abs => k.abs(cx, eps_arg(args, 0, name)?.as_ref())?.into(),
        Builtin::Conj => k.conj().into(),
        Builtin::Re => k.re().into(),
        Builtin::Im => k.im().into(),
        Builtin::Int => k.int().into(),
        Builtin::Frac => k.frac().into(),
        Builtin::Inverse => k.inverse()?.into(),
        Builtin::Neg => k.neg().into(),
        Builtin::Arg => k.arg(cx, eps_arg(args, 0, name)?.as_ref())?.into(),
        Builtin::Norm => k.norm().into(),
        Builtin::Cmp => k.cmp_to(&numeric_arg(args, 0, name)?).into(),
        Builtin::Estr => Value::Str(k.estr()),
        Builtin::ToS => Value::Str(k.to_s(cx, mode_arg(args, 0, name)?)),
        Builtin::Is(p, form) => {
            let b = match p {
                Predicate::Real => k.is_real(),
                Predicate::Imag => k.is_imag(),
                Predicate::Int => k.is_int(),
                Predicate::Even => k.is_even(),
                Predicate::Odd => k.is_odd(),
                Predicate::Zero => k.is_zero(),
                _ => {
                    let q = x.to_rational(name)?;
                    return real_instance(cx, sig, &q, args);
                }
            };
            predicate(b, form)
        }
        Builtin::Appr => k
            .appr(cx, eps_arg(args, 0, name)?.as_ref(), rnd_arg(args, 1, name)?)?
            .into(),
        Builtin::Round => k
            .round(cx, places_arg(args, 0, name)?, rnd_arg(args, 1, name)?)?
            .into(),
        Builtin::Bround => k
            .bround(cx, places_arg(args, 0, name)?, rnd_arg(args, 1, name)?)?
            .into(),
        Builtin::Mod => k
            .modulo(cx, &rational_arg(args, 0, name)?, rnd_arg(args, 1, name)?)
            .into(),
        Builtin::Quo => k
            .quo(cx, &rational_arg(args, 0, name)?, rnd_arg(args, 1, name)?)
            .into(),
        Builtin::Ceil => k.ceil().into(),
        Builtin::Floor => k.floor().into(),
        Builtin::Mmin => k.mmin(&rational_arg(args, 0, name)?).into(),
        Builtin::Power => k
            .power(cx, &numeric_arg(args, 0, name)?, eps_arg(args, 1, name)?.as_ref())?
            .into(),
        Builtin::Sqrt => k
            .sqrt(cx, eps_arg(args, 0, name)?.as_ref(), rnd_arg(args, 1, name)?)?
            .into(),
        Builtin::Root => k
            .root(cx, &rational_arg(args, 0, name)?, eps_arg(args, 1, name)?.as_ref())?
            .into(),
        Builtin::Comb => k.comb(&numeric_arg(args, 0, name)?)?.into(),
        Builtin::Perm => k.perm(&numeric_arg(args, 0, name)?)?.into(),
        Builtin::Trans(f) => k.trans(f, cx, eps_arg(args, 0, name)?.as_ref())?.into(),
        Builtin::Ilog => k.ilog(&rational_arg(args, 0, name)?)?.into(),
        Builtin::Ilog2 => k.ilog2()?.into(),
        Builtin::Ilog10 => k.ilog10()?.into(),
        other => return Err(MathError::undefined(format!("{:?}", other))),
    };
    Ok(value)
}

fn real_instance(cx: &Config, sig: &BuiltinSig, q: &Rational, args: &[Operand]) -> MathResult<Value> {
    let name = sig.name;
    let value = match sig.op {
        Builtin::Atan2 => {
            let x = rational_arg(args, 0, name)?;
            let eps = eps_arg(args, 1, name)?;
            q.atan2(&x, cx.effective_epsilon(name, eps.as_ref())?).into()
        }
        Builtin::Hypot => {
            let y = rational_arg(args, 0, name)?;
            let eps = eps_arg(args, 1, name)?;
            q.hypot(&y, cx.effective_epsilon(name, eps.as_ref())?).into()
        }
        Builtin::Ltol => {
            let eps = eps_arg(args, 0, name)?;
            q.ltol(cx.effective_epsilon(name, eps.as_ref())?)?.into()
        }
        Builtin::Num => q.num().into(),
        Builtin::Den => q.den().into(),
        Builtin::Highbit => q.highbit()?.into(),
        Builtin::Lowbit => q.lowbit()?.into(),
        Builtin::Digit => q
            .digit(&rational_arg(args, 0, name)?, optional_rational(args, 1, name)?.as_ref())?
            .into(),
        Builtin::Digits => q.digits(optional_rational(args, 0, name)?.as_ref())?.into(),
        Builtin::Xor => q.xor(&rest_rationals(args, name)?)?.into(),
        Builtin::Char => Value::Str(q.to_char()?),
        Builtin::Fact => q.fact()?.into(),
        Builtin::Fib => q.fib()?.into(),
        Builtin::Bernoulli => q.bernoulli()?.into(),
        Builtin::Euler => q.euler()?.into(),
        Builtin::Catalan => q.catalan()?.into(),
        Builtin::Gcd => q.gcd(&rest_rationals(args, name)?).into(),
        Builtin::Lcm => q.lcm(&rest_rationals(args, name)?).into(),
        Builtin::Gcdrem => q.gcdrem(&rational_arg(args, 0, name)?)?.into(),
        Builtin::Lcmfact => q.lcmfact()?.into(),
        Builtin::Factor => q.factor(optional_rational(args, 0, name)?.as_ref())?.into(),
        Builtin::Lfactor => q.lfactor(&rational_arg(args, 0, name)?)?.into(),
        Builtin::Fcnt => q.fcnt(&rational_arg(args, 0, name)?)?.into(),
        Builtin::Frem => q.frem(&rational_arg(args, 0, name)?)?.into(),
        Builtin::Iroot => q.iroot(&rational_arg(args, 0, name)?)?.into(),
        Builtin::Isqrt => q.isqrt()?.into(),
        Builtin::Jacobi => q.jacobi(&rational_arg(args, 0, name)?)?.into(),
        Builtin::Minv => q.minv(&rational_arg(args, 0, name)?, cx.modulo())?.into(),
        Builtin::Quomod => {
            let y = rational_arg(args, 0, name)?;
            let rnd = rnd_arg(args, 1, name)?.unwrap_or(cx.quomod());
            let (quo, rem) = q.quomod(&y, rnd);
            Value::List(vec![quo.into(), rem.into()])
        }
        Builtin::Cfappr => {
            let eps = optional_rational(args, 0, name)?.unwrap_or_else(|| cx.epsilon().clone());
            let rnd = rnd_arg(args, 1, name)?.unwrap_or(cx.cfappr());
            q.cfappr(&eps, rnd).into()
        }
        Builtin::Cfsim => q.cfsim(rnd_arg(args, 0, name)?.unwrap_or(cx.cfsim())).into(),
        Builtin::Is(p, form) => {
            let b = match p {
                Predicate::Prime => q.is_prime()?,
                Predicate::Mult => q.is_mult(&rational_arg(args, 0, name)?),
                Predicate::Rel => q.is_rel(&rational_arg(args, 0, name)?)?,
                Predicate::Sq => q.is_sq(),
                Predicate::Meq => q.meq(&rational_arg(args, 0, name)?, &rational_arg(args, 1, name)?),
                Predicate::Mne => q.mne(&rational_arg(args, 0, name)?, &rational_arg(args, 1, name)?),
                Predicate::Bit => q.bit(&rational_arg(args, 0, name)?)?,
                Predicate::Real => true,
                Predicate::Imag => false,
                Predicate::Int => q.is_integer(),
                Predicate::Even => q.is_even(),
                Predicate::Odd => q.is_odd(),
                Predicate::Zero => q.is_zero(),
            };
            predicate(b, form)
        }
        other => return Err(MathError::undefined(format!("{:?}", other))),
    };
    Ok(value)
}

fn predicate(b: bool, form: Form) -> Value {
    match form {
        Form::Numeric => Value::flag(b),
        Form::Bool => Value::Bool(b),
    }
}

/// 빠졌거나 nil 이면 None
fn optional(args: &[Operand], i: usize) -> Option<&Operand> {
    args.get(i).filter(|arg| !arg.is_nil())
}

fn numeric_arg(args: &[Operand], i: usize, op: &'static str) -> MathResult<NumericValue> {
    args.get(i).unwrap_or(&Operand::Nil).to_numeric(op)
}

fn rational_arg(args: &[Operand], i: usize, op: &'static str) -> MathResult<Rational> {
    args.get(i).unwrap_or(&Operand::Nil).to_rational(op)
}

fn optional_rational(args: &[Operand], i: usize, op: &'static str) -> MathResult<Option<Rational>> {
    optional(args, i).map(|arg| arg.to_rational(op)).transpose()
}

fn eps_arg(args: &[Operand], i: usize, op: &'static str) -> MathResult<Option<Rational>> {
    optional_rational(args, i, op)
}

fn rnd_arg(args: &[Operand], i: usize, op: &'static str) -> MathResult<Option<u32>> {
    let Some(q) = optional_rational(args, i, op)? else {
        return Ok(None);
    };
    match q.to_i64() {
        Some(n) if q.is_integer() && (0..RND_LIMIT as i64).contains(&n) => Ok(Some(n as u32)),
        _ => Err(MathError::domain(op, format!("invalid rounding flags: {}", q))),
    }
}

fn places_arg(args: &[Operand], i: usize, op: &'static str) -> MathResult<Option<i64>> {
    let Some(q) = optional_rational(args, i, op)? else {
        return Ok(None);
    };
    match q.to_i64() {
        Some(n) if q.is_integer() => Ok(Some(n)),
        _ => Err(MathError::domain(op, format!("invalid place count: {}", q))),
    }
}

fn mode_arg(args: &[Operand], i: usize, op: &'static str) -> MathResult<Option<DisplayMode>> {
    match optional(args, i) {
        None => Ok(None),
        Some(Operand::Str(name)) => DisplayMode::from_name(name).map(Some),
        Some(other) => Err(MathError::coercion(op, other.to_string(), "mode name")),
    }
}

/// gcd, lcm, xor 의 나머지 인자. 목록은 펼친다.
fn rest_rationals(args: &[Operand], op: &'static str) -> MathResult<Vec<Rational>> {
    crate::runtime::flatten(args)
        .into_iter()
        .map(|arg| arg.to_rational(op))
        .collect()
}
