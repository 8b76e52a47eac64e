//! Purpose: Environment-driven runtime configuration and logging init.
//! Exports: `Config`, `LOG_ENV`, `init`, `init_from_env`.
//! Invariants: Init is idempotent; a second call never panics or replaces the
//! installed subscriber.
//! Invariants: A bad filter directive is a reported error, never a crash.

use std::env;

use tracing_subscriber::EnvFilter;

use crate::core::error::{Error, ErrorKind};

/// Environment variable holding a `tracing` filter directive for the library
/// (`MARROW_LOG=trace`, `MARROW_LOG=marrow=debug`, ...).
pub const LOG_ENV: &str = "MARROW_LOG";

const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Default)]
pub struct Config {
    pub log_filter: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, Error> {
        match env::var(LOG_ENV) {
            Ok(value) => parse_filter(&value),
            Err(env::VarError::NotPresent) => Ok(Self::default()),
            Err(env::VarError::NotUnicode(_)) => Err(Error::new(ErrorKind::Config)
                .with_message(format!("{LOG_ENV} is not valid UTF-8"))),
        }
    }
}

fn parse_filter(value: &str) -> Result<Config, Error> {
    let directive = value.trim();
    if directive.is_empty() {
        return Ok(Config::default());
    }
    EnvFilter::try_new(directive).map_err(|err| {
        Error::new(ErrorKind::Config)
            .with_message(format!("invalid {LOG_ENV} filter `{directive}`: {err}"))
    })?;
    Ok(Config {
        log_filter: Some(directive.to_string()),
    })
}

/// Installs the `tracing` subscriber for this process. Callers that already
/// installed their own keep it; `try_init` failure is deliberately ignored.
pub fn init(config: &Config) {
    let filter = match &config.log_filter {
        Some(directive) => EnvFilter::new(directive),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

pub fn init_from_env() -> Result<(), Error> {
    let config = Config::from_env()?;
    init(&config);
    Ok(())
}
