use burrow_shortener::{HashMethod, StrategyKind};
use clap::{Parser, ValueEnum};
use std::fmt::{Display, Formatter};

pub const STRATEGY_ENV: &str = "BURROW_STRATEGY";
pub const HASH_METHOD_ENV: &str = "BURROW_HASH_METHOD";
pub const MAX_RETRIES_ENV: &str = "BURROW_MAX_RETRIES";
pub const EXPECTED_CODES_ENV: &str = "BURROW_EXPECTED_CODES";
pub const FALSE_POSITIVE_RATE_ENV: &str = "BURROW_FALSE_POSITIVE_RATE";
pub const LOG_FORMAT_ENV: &str = "BURROW_LOG_FORMAT";

pub const DEFAULT_MAX_RETRIES: &str = "8";
pub const DEFAULT_EXPECTED_CODES: &str = "1000000";
pub const DEFAULT_FALSE_POSITIVE_RATE: &str = "0.01";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    #[value(name = "hash")]
    Hash,
    #[value(name = "id")]
    Id,
}

impl From<StrategyArg> for StrategyKind {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Hash => StrategyKind::Hash,
            StrategyArg::Id => StrategyKind::Id,
        }
    }
}

impl Display for StrategyArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&StrategyKind::from(*self), f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum HashMethodArg {
    #[value(name = "sha256")]
    Sha256,
    #[value(name = "md5")]
    Md5,
    #[value(name = "sha1")]
    Sha1,
    #[value(name = "crc32")]
    Crc32,
}

impl From<HashMethodArg> for HashMethod {
    fn from(value: HashMethodArg) -> Self {
        match value {
            HashMethodArg::Sha256 => HashMethod::Sha256,
            HashMethodArg::Md5 => HashMethod::Md5,
            HashMethodArg::Sha1 => HashMethod::Sha1,
            HashMethodArg::Crc32 => HashMethod::Crc32,
        }
    }
}

impl Display for HashMethodArg {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&HashMethod::from(*self), f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
}

/// Shortens URLs with the chosen strategy and prints `code<TAB>url` lines.
#[derive(Debug, Parser)]
#[command(name = "burrow")]
pub struct CLI {
    /// URLs to shorten.
    #[arg(required = true)]
    pub urls: Vec<String>,

    #[arg(long, env = STRATEGY_ENV, value_enum, default_value_t = StrategyArg::Hash)]
    pub strategy: StrategyArg,

    /// Shorten the same URLs a second time after switching to this strategy.
    #[arg(long, value_enum)]
    pub then: Option<StrategyArg>,

    #[arg(long, env = HASH_METHOD_ENV, value_enum, default_value_t = HashMethodArg::Sha256)]
    pub hash_method: HashMethodArg,

    #[arg(long, env = MAX_RETRIES_ENV, default_value = DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    /// Expected number of issued codes, used to size the existence filter.
    #[arg(long, env = EXPECTED_CODES_ENV, default_value = DEFAULT_EXPECTED_CODES)]
    pub expected_codes: usize,

    #[arg(long, env = FALSE_POSITIVE_RATE_ENV, default_value = DEFAULT_FALSE_POSITIVE_RATE)]
    pub false_positive_rate: f64,

    #[arg(long, env = LOG_FORMAT_ENV, value_enum, default_value = "text")]
    pub log_format: LogFormatArg,
}
