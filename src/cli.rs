//! CLI definition and dispatch.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::accessor::ConfigAccessor;
use crate::domain::coerce;
use crate::domain::error::{CoercionError, KeyconfError};
use crate::domain::value::ConfigValue;
use crate::logging;

#[derive(Parser, Debug)]
#[command(name = "keyconf", about = "Typed lookups in INI configuration files")]
pub struct Cli {
    /// Log filter used when RUST_LOG is unset
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the value of a key
    Get {
        #[arg(short, long)]
        config: PathBuf,
        key: String,
        #[arg(long = "as", value_enum, default_value_t = ValueKind::Raw)]
        kind: ValueKind,
        /// Returned when the key is absent or cannot be coerced
        #[arg(long)]
        default: Option<String>,
    },
    /// Print whether a key has a value
    Contains {
        #[arg(short, long)]
        config: PathBuf,
        key: String,
    },
    /// List every key with a value
    Keys {
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Raw,
    Bool,
    Int,
    Long,
    Float,
    Double,
    String,
}

pub fn run(cli: Cli) -> ExitCode {
    if let Err(e) = logging::init(&cli.log_level) {
        eprintln!("warning: {e}");
    }

    let result = match cli.command {
        Command::Get {
            config,
            key,
            kind,
            default,
        } => load_accessor(&config)
            .and_then(|accessor| render(&accessor, &key, kind, default.as_deref())),
        Command::Contains { config, key } => {
            load_accessor(&config).map(|accessor| accessor.contains_key(&key).to_string())
        }
        Command::Keys { config } => {
            FileConfigAdapter::from_file(&config).map(|adapter| adapter.keys().join("\n"))
        }
    };

    match result {
        Ok(output) => {
            if !output.is_empty() {
                println!("{output}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

pub fn load_accessor(path: &Path) -> Result<ConfigAccessor, KeyconfError> {
    let adapter = FileConfigAdapter::from_file(path)?;
    Ok(ConfigAccessor::with_source(adapter))
}

/// Looks `key` up as `kind` and formats the result for printing. Floats keep
/// a fractional part, matching how raw float values print.
///
/// With a default, the defaulted accessor is used after the default text has
/// itself been coerced to `kind`.
pub fn render(
    accessor: &ConfigAccessor,
    key: &str,
    kind: ValueKind,
    default: Option<&str>,
) -> Result<String, KeyconfError> {
    let Some(default) = default else {
        return Ok(match kind {
            ValueKind::Raw | ValueKind::String => accessor.get_string(key)?,
            ValueKind::Bool => accessor.get_bool(key)?.to_string(),
            ValueKind::Int => accessor.get_int(key)?.to_string(),
            ValueKind::Long => accessor.get_long(key)?.to_string(),
            ValueKind::Float => format!("{:?}", accessor.get_float(key)?),
            ValueKind::Double => format!("{:?}", accessor.get_double(key)?),
        });
    };

    let fallback = ConfigValue::from(default);
    Ok(match kind {
        ValueKind::Raw => accessor.get_or(key, fallback).to_string(),
        ValueKind::String => accessor.get_string_or(key, default),
        ValueKind::Bool => {
            let d = parse_default(&fallback, coerce::to_bool)?;
            accessor.get_bool_or(key, d).to_string()
        }
        ValueKind::Int => {
            let d = parse_default(&fallback, coerce::to_i32)?;
            accessor.get_int_or(key, d).to_string()
        }
        ValueKind::Long => {
            let d = parse_default(&fallback, coerce::to_i64)?;
            accessor.get_long_or(key, d).to_string()
        }
        ValueKind::Float => {
            let d = parse_default(&fallback, coerce::to_f32)?;
            format!("{:?}", accessor.get_float_or(key, d))
        }
        ValueKind::Double => {
            let d = parse_default(&fallback, coerce::to_f64)?;
            format!("{:?}", accessor.get_double_or(key, d))
        }
    })
}

fn parse_default<T>(
    value: &ConfigValue,
    convert: fn(&ConfigValue) -> Result<T, CoercionError>,
) -> Result<T, KeyconfError> {
    convert(value).map_err(|cause| KeyconfError::WrongValue {
        key: "--default".to_string(),
        value: value.clone(),
        cause,
    })
}
