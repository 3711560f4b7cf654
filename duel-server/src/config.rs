use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::scheduler::CosmeticDelays;
use crate::websocket::RateLimitSettings;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub match_start_delay_ms: u64,
    pub round_over_delay_ms: u64,
    pub word_list_path: Option<PathBuf>,
    pub rate_limit_burst: u32,
    pub rate_limit_refill_ms: u64,
}

impl Config {
    /// Reads the environment, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", 8080)?,
            match_start_delay_ms: parse_var("MATCH_START_DELAY_MS", 1000)?,
            round_over_delay_ms: parse_var("ROUND_OVER_DELAY_MS", 1500)?,
            word_list_path: env::var_os("WORD_LIST_PATH").map(PathBuf::from),
            rate_limit_burst: parse_var("RATE_LIMIT_BURST", 30)?,
            rate_limit_refill_ms: parse_var("RATE_LIMIT_REFILL_MS", 500)?,
        })
    }

    /// Defaults with the cosmetic delays collapsed to zero.
    pub fn for_tests() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            match_start_delay_ms: 0,
            round_over_delay_ms: 0,
            word_list_path: None,
            rate_limit_burst: 30,
            rate_limit_refill_ms: 500,
        }
    }

    pub fn delays(&self) -> CosmeticDelays {
        CosmeticDelays {
            match_start: Duration::from_millis(self.match_start_delay_ms),
            round_over: Duration::from_millis(self.round_over_delay_ms),
        }
    }

    pub fn rate_limit(&self) -> RateLimitSettings {
        RateLimitSettings {
            burst: self.rate_limit_burst,
            refill: Duration::from_millis(self.rate_limit_refill_ms),
        }
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {:?}", name, value)),
        Err(_) => Ok(default),
    }
}
