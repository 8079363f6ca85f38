use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, FileFormat};
use coupon_core::{Operator, OperatorConfig, OperatorRegistry, SortDirection};
use coupon_shared::Masked;
use serde::Deserialize;
use std::env;
use std::net::{AddrParseError, IpAddr, SocketAddr};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub rate_limit: RateLimitConfig,
    pub upstream: UpstreamConfig,
    pub operators: OperatorsConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

fn default_host() -> String { "0.0.0.0".to_string() }

impl ServerConfig {
    /// Listen address; `host` is a bare IPv4 or IPv6 address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self { max_requests: 10, window_seconds: 60 }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UpstreamConfig {
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    /// Shared by all operators, sent as `X-Api-Key`.
    pub api_key: Masked<String>,
}

fn default_timeout() -> u64 { 15 }

#[derive(Debug, Deserialize, Clone)]
pub struct OperatorsConfig {
    pub pullman: OperatorSettings,
    pub rutabus: OperatorSettings,
    pub tacoha: OperatorSettings,
}

impl OperatorsConfig {
    pub fn get(&self, operator: Operator) -> &OperatorSettings {
        match operator {
            Operator::Pullman => &self.pullman,
            Operator::Rutabus => &self.rutabus,
            Operator::Tacoha => &self.tacoha,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct OperatorSettings {
    pub url: String,
    pub auth: Masked<String>,
    #[serde(default = "default_sort_field")]
    pub sort_field: String,
    #[serde(default)]
    pub sort_type: SortDirection,
}

fn default_sort_field() -> String { "id".to_string() }

/// Environment variables of the original single-file deployment, mapped to config keys.
const LEGACY_ENV: &[(&str, &str)] = &[
    ("PULLMAN_URL", "operators.pullman.url"),
    ("PULLMAN_AUTH", "operators.pullman.auth"),
    ("RUTABUS_URL", "operators.rutabus.url"),
    ("RUTABUS_AUTH", "operators.rutabus.auth"),
    ("TACOHA_URL", "operators.tacoha.url"),
    ("TACOHA_AUTH", "operators.tacoha.auth"),
    ("API_KEY", "upstream.api_key"),
];

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default"))
            // Per-environment and local overrides are optional
            .add_source(config::File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(config::File::with_name("config/local").required(false))
            // Eg. `CUPONES_SERVER__PORT=8080`
            .add_source(
                config::Environment::with_prefix("CUPONES")
                    .prefix_separator("_")
                    .separator("__"),
            );

        let builder = apply_legacy_env(builder, |name| env::var(name).ok())?;
        builder.build()?.try_deserialize()
    }

    /// Parses a complete TOML document, without consulting files or the environment.
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    pub fn operator_registry(&self) -> OperatorRegistry {
        OperatorRegistry::from_fn(|operator| {
            let settings = self.operators.get(operator);
            OperatorConfig::new(
                operator,
                settings.url.clone(),
                settings.auth.clone(),
                self.upstream.api_key.clone(),
            )
            .with_sort(settings.sort_field.clone(), settings.sort_type)
        })
    }
}

fn apply_legacy_env<F>(
    mut builder: ConfigBuilder<DefaultState>,
    lookup: F,
) -> Result<ConfigBuilder<DefaultState>, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    for (var, key) in LEGACY_ENV {
        builder = builder.set_override_option(*key, lookup(var).filter(|v| !v.is_empty()))?;
    }
    Ok(builder)
}
