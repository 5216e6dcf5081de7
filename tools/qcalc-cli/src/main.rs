use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use env_logger::Env;
use log::debug;
use serde::Serialize;

use qcalc_lang::{stdlib::CATALOGUE, Dispatcher, Value};
use qcalc_numeric::{parse_rational, Config, ConfigKey, ConfigValue, MathError, Operand};

mod operand;

use operand::parse_operand;

#[derive(Parser)]
#[command(name = "qcalc")]
#[command(about = "정확한 유리수/복소수 계산 도구")]
struct Cli {
    /// 근사 연산 허용 오차 (예: 1e-30, 1/1000)
    #[arg(long, global = true)]
    epsilon: Option<String>,
    /// 출력 방식 (fraction, real, sci, hex, ...)
    #[arg(long, global = true)]
    mode: Option<String>,
    /// real/sci 출력 소수 자릿수
    #[arg(long, global = true)]
    display: Option<u32>,
    /// JSON 설정 파일
    #[arg(long = "config", global = true, value_name = "FILE")]
    config_file: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 내장 함수 호출
    Call {
        name: String,
        #[arg(allow_hyphen_values = true, num_args = 0..)]
        args: Vec<String>,
    },
    /// 내장 함수 목록
    List,
    /// 설정 보기/바꾸기 (이번 실행에만)
    Config {
        name: Option<String>,
        #[arg(allow_hyphen_values = true)]
        value: Option<String>,
    },
}

enum CliError {
    Math(MathError),
    Io(PathBuf, std::io::Error),
    Json(serde_json::Error),
}

impl CliError {
    fn code(&self) -> &'static str {
        match self {
            CliError::Math(err) => err.code(),
            CliError::Io(..) => "E_CLI_IO",
            CliError::Json(_) => "E_CLI_JSON",
        }
    }

    fn message(&self) -> String {
        match self {
            CliError::Math(err) => err.to_string(),
            CliError::Io(path, err) => format!("{}: {}", path.display(), err),
            CliError::Json(err) => err.to_string(),
        }
    }
}

impl From<MathError> for CliError {
    fn from(err: MathError) -> Self {
        CliError::Math(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Json(err)
    }
}

#[derive(Serialize)]
struct CatalogueRow {
    name: &'static str,
    category: &'static str,
    receiver: &'static str,
    arity: String,
}

fn main() {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    if let Err(err) = run(cli) {
        eprintln!("[{}] {}", err.code(), err.message());
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let config = build_config(&cli)?;
    debug!("config: {:?}", config);
    let mut dispatcher = Dispatcher::with_config(config);
    match cli.command {
        Commands::Call { name, args } => {
            let operands = args
                .iter()
                .map(String::as_str)
                .map(parse_operand)
                .collect::<Result<Vec<_>, _>>()?;
            let value = dispatcher.call(&name, &operands)?;
            print_value(&dispatcher, &value, cli.json);
        }
        Commands::List => print_catalogue(cli.json)?,
        Commands::Config { name: None, .. } => {
            let config = dispatcher.config();
            if cli.json {
                // --config 로 다시 읽을 수 있는 모양
                println!("{}", serde_json::to_string_pretty(&config.to_file())?);
            } else {
                for key in ConfigKey::ALL {
                    println!("{} = {}", key.name(), config.get(key));
                }
            }
        }
        Commands::Config {
            name: Some(name),
            value,
        } => {
            let mut args = vec![Operand::Str(name)];
            if let Some(value) = value {
                args.push(Operand::Str(value));
            }
            let value = dispatcher.call("config", &args)?;
            print_value(&dispatcher, &value, cli.json);
        }
    }
    Ok(())
}

/// 기본값 ← 설정 파일 ← 명령줄 옵션 순으로 덮는다
fn build_config(cli: &Cli) -> Result<Config, CliError> {
    let mut config = match &cli.config_file {
        Some(path) => {
            let text =
                std::fs::read_to_string(path).map_err(|err| CliError::Io(path.clone(), err))?;
            Config::from_json(&text)?
        }
        None => Config::default(),
    };
    if let Some(eps) = &cli.epsilon {
        config.set_rational(ConfigKey::Epsilon, &parse_rational(eps, "epsilon")?)?;
    }
    if let Some(mode) = &cli.mode {
        config.set_mode_name(mode)?;
    }
    if let Some(display) = cli.display {
        config.set(ConfigKey::Display, ConfigValue::Count(display))?;
    }
    Ok(config)
}

fn print_value(dispatcher: &Dispatcher, value: &Value, json: bool) {
    let cx = dispatcher.config();
    if json {
        println!("{}", value.to_json(cx));
    } else {
        println!("{}", value.render(cx, None));
    }
}

fn print_catalogue(json: bool) -> Result<(), CliError> {
    let rows: Vec<CatalogueRow> = CATALOGUE
        .iter()
        .map(|sig| CatalogueRow {
            name: sig.name,
            category: match sig.category {
                qcalc_lang::Category::Instance => "instance",
                qcalc_lang::Category::Module => "module",
            },
            receiver: sig.receiver.name(),
            arity: sig.arity_text(),
        })
        .collect();
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }
    for row in rows {
        println!(
            "{:<10} {:<8} {:<4} {}",
            row.name, row.category, row.receiver, row.arity
        );
    }
    Ok(())
}
