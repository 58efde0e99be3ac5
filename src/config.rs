use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_GENERATOR_URL: &str = "https://api-inference.huggingface.co";
pub const DEFAULT_MODEL: &str = "gpt2";
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 8192;
pub const DEFAULT_CONVERSATION_TTL_SECS: u64 = 3600;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: IpAddr,
    pub port: u16,
    pub generator_url: String,
    pub model: String,
    pub api_token: Option<String>,
    pub max_message_bytes: usize,
    pub conversation_ttl: Duration,
    pub warmup: bool,
    pub log_level: String,
}

impl AppConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup, falling back to defaults.
    ///
    /// `HOST` takes a literal IP address or `localhost`. `GENERATOR_WARMUP`
    /// takes `true`/`false`, `1`/`0` or `yes`/`no`, in any case.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Ok(Self {
            host: parse_host(&get)?,
            port: parse(&get, "PORT", DEFAULT_PORT)?,
            generator_url: get("GENERATOR_URL")
                .unwrap_or_else(|| DEFAULT_GENERATOR_URL.to_string()),
            model: get("GENERATOR_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_token: get("HUGGINGFACE_API_KEY"),
            max_message_bytes: parse(&get, "MAX_MESSAGE_BYTES", DEFAULT_MAX_MESSAGE_BYTES)?,
            conversation_ttl: parse_ttl(&get)?,
            warmup: parse_flag(&get, "GENERATOR_WARMUP", false)?,
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
        })
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}

fn parse_host<G>(get: &G) -> Result<IpAddr, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    match get("HOST") {
        Some(raw) if raw.trim().eq_ignore_ascii_case("localhost") => {
            Ok(IpAddr::V4(Ipv4Addr::LOCALHOST))
        }
        Some(_) => parse(get, "HOST", IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
        None => Ok(IpAddr::V4(Ipv4Addr::UNSPECIFIED)),
    }
}

fn parse_flag<G>(get: &G, key: &'static str, default: bool) -> Result<bool, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let Some(raw) = get(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(ConfigError::Invalid { key, value: raw }),
    }
}

// The purge interval is the TTL itself, so zero is rejected.
fn parse_ttl<G>(get: &G) -> Result<Duration, ConfigError>
where
    G: Fn(&str) -> Option<String>,
{
    let key = "CONVERSATION_TTL_SECS";
    match parse(get, key, DEFAULT_CONVERSATION_TTL_SECS)? {
        0 => Err(ConfigError::Invalid {
            key,
            value: "0".to_string(),
        }),
        secs => Ok(Duration::from_secs(secs)),
    }
}
