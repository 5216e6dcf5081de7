use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{MathError, MathResult};
use crate::parse::parse_rational;
use crate::rational::Rational;

/// 출력 방식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    Fraction,
    Integer,
    Real,
    Scientific,
    Hex,
    Octal,
    Binary,
}

impl DisplayMode {
    pub fn from_name(name: &str) -> MathResult<Self> {
        let mode = match name.trim().to_ascii_lowercase().as_str() {
            "fraction" | "frac" => DisplayMode::Fraction,
            "integer" | "int" => DisplayMode::Integer,
            "real" | "float" | "default" => DisplayMode::Real,
            "scientific" | "sci" | "exp" => DisplayMode::Scientific,
            "hexadecimal" | "hex" => DisplayMode::Hex,
            "octal" | "oct" => DisplayMode::Octal,
            "binary" | "bin" => DisplayMode::Binary,
            other => {
                return Err(MathError::domain(
                    "mode",
                    format!("invalid output mode: {}", other),
                ))
            }
        };
        Ok(mode)
    }

    pub fn name(self) -> &'static str {
        match self {
            DisplayMode::Fraction => "fraction",
            DisplayMode::Integer => "integer",
            DisplayMode::Real => "real",
            DisplayMode::Scientific => "scientific",
            DisplayMode::Hex => "hexadecimal",
            DisplayMode::Octal => "octal",
            DisplayMode::Binary => "binary",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Mode,
    Display,
    Epsilon,
    Quomod,
    Quo,
    Mod,
    Sqrt,
    Appr,
    Cfappr,
    Cfsim,
    Round,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 11] = [
        ConfigKey::Mode,
        ConfigKey::Display,
        ConfigKey::Epsilon,
        ConfigKey::Quomod,
        ConfigKey::Quo,
        ConfigKey::Mod,
        ConfigKey::Sqrt,
        ConfigKey::Appr,
        ConfigKey::Cfappr,
        ConfigKey::Cfsim,
        ConfigKey::Round,
    ];

    pub fn from_name(name: &str) -> MathResult<Self> {
        ConfigKey::ALL
            .iter()
            .copied()
            .find(|key| key.name() == name)
            .ok_or_else(|| MathError::undefined(format!("config parameter {}", name)))
    }

    pub fn name(self) -> &'static str {
        match self {
            ConfigKey::Mode => "mode",
            ConfigKey::Display => "display",
            ConfigKey::Epsilon => "epsilon",
            ConfigKey::Quomod => "quomod",
            ConfigKey::Quo => "quo",
            ConfigKey::Mod => "mod",
            ConfigKey::Sqrt => "sqrt",
            ConfigKey::Appr => "appr",
            ConfigKey::Cfappr => "cfappr",
            ConfigKey::Cfsim => "cfsim",
            ConfigKey::Round => "round",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Mode(DisplayMode),
    Count(u32),
    Epsilon(Rational),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Mode(mode) => f.write_str(mode.name()),
            ConfigValue::Count(n) => write!(f, "{}", n),
            ConfigValue::Epsilon(eps) => write!(f, "{}", eps),
        }
    }
}

/// 계산 설정. 전역이 아니라 값으로 들고 다닌다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    epsilon: Rational,
    display: u32,
    mode: DisplayMode,
    quomod: u32,
    quo: u32,
    modulo: u32,
    sqrt: u32,
    appr: u32,
    cfappr: u32,
    cfsim: u32,
    round: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            epsilon: Rational::pow10(-20),
            display: 20,
            mode: DisplayMode::Real,
            quomod: 0,
            quo: 2,
            modulo: 0,
            sqrt: 24,
            appr: 24,
            cfappr: 0,
            cfsim: 8,
            round: 24,
        }
    }
}

/// 상한 2^31 (계수형 설정값)
const COUNT_LIMIT: u32 = 1 << 31;

impl Config {
    pub fn epsilon(&self) -> &Rational {
        &self.epsilon
    }

    pub fn display(&self) -> u32 {
        self.display
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn quomod(&self) -> u32 {
        self.quomod
    }

    pub fn quo(&self) -> u32 {
        self.quo
    }

    pub fn modulo(&self) -> u32 {
        self.modulo
    }

    pub fn sqrt(&self) -> u32 {
        self.sqrt
    }

    pub fn appr(&self) -> u32 {
        self.appr
    }

    pub fn cfappr(&self) -> u32 {
        self.cfappr
    }

    pub fn cfsim(&self) -> u32 {
        self.cfsim
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    /// 호출별 epsilon이 있으면 그것을, 없으면 설정값을 쓴다.
    pub fn effective_epsilon<'a>(
        &'a self,
        op: &'static str,
        eps: Option<&'a Rational>,
    ) -> MathResult<&'a Rational> {
        match eps {
            None => Ok(&self.epsilon),
            Some(eps) => {
                if !eps.is_positive() {
                    return Err(MathError::domain(op, "epsilon must be positive"));
                }
                if eps > &Rational::one() {
                    warn!("{}: epsilon {} is coarser than 1", op, eps);
                }
                Ok(eps)
            }
        }
    }

    pub fn get(&self, key: ConfigKey) -> ConfigValue {
        match key {
            ConfigKey::Mode => ConfigValue::Mode(self.mode),
            ConfigKey::Epsilon => ConfigValue::Epsilon(self.epsilon.clone()),
            ConfigKey::Display => ConfigValue::Count(self.display),
            ConfigKey::Quomod => ConfigValue::Count(self.quomod),
            ConfigKey::Quo => ConfigValue::Count(self.quo),
            ConfigKey::Mod => ConfigValue::Count(self.modulo),
            ConfigKey::Sqrt => ConfigValue::Count(self.sqrt),
            ConfigKey::Appr => ConfigValue::Count(self.appr),
            ConfigKey::Cfappr => ConfigValue::Count(self.cfappr),
            ConfigKey::Cfsim => ConfigValue::Count(self.cfsim),
            ConfigKey::Round => ConfigValue::Count(self.round),
        }
    }

    /// 값을 검사해 바꾸고 이전 값을 돌려준다.
    pub fn set(&mut self, key: ConfigKey, value: ConfigValue) -> MathResult<ConfigValue> {
        let previous = self.get(key);
        match (key, value) {
            (ConfigKey::Mode, ConfigValue::Mode(mode)) => self.mode = mode,
            (ConfigKey::Epsilon, ConfigValue::Epsilon(eps)) => {
                if !eps.is_positive() {
                    return Err(MathError::domain("epsilon", "epsilon must be positive"));
                }
                self.epsilon = eps;
            }
            (ConfigKey::Epsilon, ConfigValue::Count(n)) => {
                if n == 0 {
                    return Err(MathError::domain("epsilon", "epsilon must be positive"));
                }
                self.epsilon = Rational::from_i64(n as i64);
            }
            (ConfigKey::Mode, other) | (ConfigKey::Display, other @ ConfigValue::Mode(_)) => {
                return Err(MathError::coercion(key.name(), other.to_string(), "config value"))
            }
            (_, ConfigValue::Count(n)) => {
                if n >= COUNT_LIMIT {
                    return Err(MathError::domain(key.name(), "integer too big"));
                }
                let slot = self.count_slot(key).ok_or_else(|| {
                    MathError::coercion(key.name(), n.to_string(), "config value")
                })?;
                *slot = n;
            }
            (_, other) => {
                return Err(MathError::coercion(key.name(), other.to_string(), "integer"))
            }
        }
        debug!("config {} = {} (was {})", key.name(), self.get(key), previous);
        Ok(previous)
    }

    /// 유리수 입력을 키에 맞게 검사한다. mode는 이름으로만 바꾼다.
    pub fn set_rational(&mut self, key: ConfigKey, value: &Rational) -> MathResult<ConfigValue> {
        match key {
            ConfigKey::Epsilon => self.set(key, ConfigValue::Epsilon(value.clone())),
            ConfigKey::Mode => Err(MathError::coercion("mode", value.to_string(), "mode name")),
            _ => {
                let n = count_from_rational(key.name(), value)?;
                self.set(key, ConfigValue::Count(n))
            }
        }
    }

    pub fn set_mode_name(&mut self, name: &str) -> MathResult<ConfigValue> {
        let mode = DisplayMode::from_name(name)?;
        self.set(ConfigKey::Mode, ConfigValue::Mode(mode))
    }

    /// 계수형 키의 저장 칸. mode, epsilon 은 None.
    fn count_slot(&mut self, key: ConfigKey) -> Option<&mut u32> {
        match key {
            ConfigKey::Display => Some(&mut self.display),
            ConfigKey::Quomod => Some(&mut self.quomod),
            ConfigKey::Quo => Some(&mut self.quo),
            ConfigKey::Mod => Some(&mut self.modulo),
            ConfigKey::Sqrt => Some(&mut self.sqrt),
            ConfigKey::Appr => Some(&mut self.appr),
            ConfigKey::Cfappr => Some(&mut self.cfappr),
            ConfigKey::Cfsim => Some(&mut self.cfsim),
            ConfigKey::Round => Some(&mut self.round),
            ConfigKey::Mode | ConfigKey::Epsilon => None,
        }
    }

    pub fn from_json(text: &str) -> MathResult<Self> {
        let file: ConfigFile = serde_json::from_str(text)
            .map_err(|err| MathError::coercion("config", err.to_string(), "configuration"))?;
        let mut config = Config::default();
        config.apply_file(&file)?;
        Ok(config)
    }

    pub fn apply_file(&mut self, file: &ConfigFile) -> MathResult<()> {
        if let Some(eps) = &file.epsilon {
            let eps = parse_rational(eps, "epsilon")?;
            self.set(ConfigKey::Epsilon, ConfigValue::Epsilon(eps))?;
        }
        if let Some(mode) = &file.mode {
            self.set_mode_name(mode)?;
        }
        let counts = [
            (ConfigKey::Display, file.display),
            (ConfigKey::Quomod, file.quomod),
            (ConfigKey::Quo, file.quo),
            (ConfigKey::Mod, file.modulo),
            (ConfigKey::Sqrt, file.sqrt),
            (ConfigKey::Appr, file.appr),
            (ConfigKey::Cfappr, file.cfappr),
            (ConfigKey::Cfsim, file.cfsim),
            (ConfigKey::Round, file.round),
        ];
        for (key, value) in counts {
            if let Some(n) = value {
                self.set(key, ConfigValue::Count(n))?;
            }
        }
        Ok(())
    }

    pub fn to_file(&self) -> ConfigFile {
        ConfigFile {
            epsilon: Some(self.epsilon.to_string()),
            mode: Some(self.mode.name().to_string()),
            display: Some(self.display),
            quomod: Some(self.quomod),
            quo: Some(self.quo),
            modulo: Some(self.modulo),
            sqrt: Some(self.sqrt),
            appr: Some(self.appr),
            cfappr: Some(self.cfappr),
            cfsim: Some(self.cfsim),
            round: Some(self.round),
        }
    }
}

fn count_from_rational(name: &'static str, value: &Rational) -> MathResult<u32> {
    let n = value
        .to_integer()
        .ok_or_else(|| MathError::domain(name, format!("non-integer value for {}", name)))?;
    if n.sign() == num_bigint::Sign::Minus {
        return Err(MathError::domain(name, format!("negative value for {}", name)));
    }
    num_traits::ToPrimitive::to_u32(&n)
        .filter(|n| *n < COUNT_LIMIT)
        .ok_or_else(|| MathError::domain(name, format!("integer too big for {}", name)))
}

/// JSON 설정 문서. 빠진 키는 기본값을 유지한다.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub epsilon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quomod: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quo: Option<u32>,
    #[serde(rename = "mod", skip_serializing_if = "Option::is_none")]
    pub modulo: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sqrt: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appr: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfappr: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cfsim: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub round: Option<u32>,
}
