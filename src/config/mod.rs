//! Configuration layer: typed settings with layered precedence (file → env → CLI).

mod cli;

use std::{
    net::SocketAddr,
    num::{NonZeroU64, NonZeroUsize},
    path::PathBuf,
    str::FromStr,
    time::Duration,
};

use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

pub use cli::{CliArgs, Command, RenderArgs, ServeArgs, ServeOverrides};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "a2ui";
const ENV_PREFIX: &str = "A2UI";
/// Conventional variable for the Gemini key, read when no other layer sets one.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3001;
const DEFAULT_GRACEFUL_SHUTDOWN_SECS: u64 = 10;
const DEFAULT_AGENT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_AGENT_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_AGENT_TIMEOUT_SECS: u64 = 60;
const DEFAULT_TRANSPORT_TIMEOUT_SECS: u64 = 90;
const DEFAULT_CONTENT_DIR: &str = "content/articles";
const DEFAULT_SURFACE_CACHE_CAPACITY: u64 = 32;

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub logging: LoggingSettings,
    pub agent: AgentSettings,
    pub transport: TransportSettings,
    pub content: ContentSettings,
    pub cache: CacheSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
    pub graceful_shutdown: Duration,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct AgentSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: Url,
    pub timeout_seconds: NonZeroU64,
}

#[derive(Debug, Clone)]
pub struct TransportSettings {
    /// Remote agent base URL; `None` means the generator runs in-process.
    pub endpoint: Option<Url>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ContentSettings {
    pub directory: PathBuf,
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub surface_capacity: NonZeroUsize,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix(ENV_PREFIX).separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_api_key_fallback(std::env::var(GEMINI_API_KEY_ENV).ok());

    match cli.command.as_ref() {
        Some(Command::Serve(args)) => raw.apply_serve_overrides(&args.overrides),
        Some(Command::Render(_)) | Some(Command::Schema) | None => {
            raw.apply_serve_overrides(&ServeOverrides::default())
        }
    }

    Settings::from_raw(raw)
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    server: RawServerSettings,
    logging: RawLoggingSettings,
    agent: RawAgentSettings,
    transport: RawTransportSettings,
    content: RawContentSettings,
    cache: RawCacheSettings,
}

impl RawSettings {
    fn apply_api_key_fallback(&mut self, key: Option<String>) {
        if self.agent.api_key.is_none() {
            self.agent.api_key = key;
        }
    }

    fn apply_serve_overrides(&mut self, overrides: &ServeOverrides) {
        if let Some(host) = overrides.server_host.as_ref() {
            self.server.host = Some(host.clone());
        }
        if let Some(port) = overrides.server_port {
            self.server.port = Some(port);
        }
        if let Some(seconds) = overrides.server_graceful_shutdown_seconds {
            self.server.graceful_shutdown_seconds = Some(seconds);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
        if let Some(key) = overrides.agent_api_key.as_ref() {
            self.agent.api_key = Some(key.clone());
        }
        if let Some(model) = overrides.agent_model.as_ref() {
            self.agent.model = Some(model.clone());
        }
        if let Some(base) = overrides.agent_api_base.as_ref() {
            self.agent.api_base = Some(base.clone());
        }
        if let Some(seconds) = overrides.agent_timeout_seconds {
            self.agent.timeout_seconds = Some(seconds);
        }
        if let Some(endpoint) = overrides.transport_endpoint.as_ref() {
            self.transport.endpoint = Some(endpoint.clone());
        }
        if let Some(seconds) = overrides.transport_timeout_seconds {
            self.transport.timeout_seconds = Some(seconds);
        }
        if let Some(directory) = overrides.content_directory.as_ref() {
            self.content.directory = Some(directory.clone());
        }
        if let Some(capacity) = overrides.surface_cache_capacity {
            self.cache.surface_capacity = Some(capacity);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            server,
            logging,
            agent,
            transport,
            content,
            cache,
        } = raw;

        Ok(Self {
            server: build_server_settings(server)?,
            logging: build_logging_settings(logging)?,
            agent: build_agent_settings(agent)?,
            transport: build_transport_settings(transport)?,
            content: build_content_settings(content)?,
            cache: build_cache_settings(cache)?,
        })
    }
}

fn build_server_settings(server: RawServerSettings) -> Result<ServerSettings, LoadError> {
    let host = server.host.unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = server.port.unwrap_or(DEFAULT_PORT);
    if port == 0 {
        return Err(LoadError::invalid(
            "server.port",
            "port must be greater than zero",
        ));
    }
    let addr = parse_socket_addr(&host, port)
        .map_err(|reason| LoadError::invalid("server.addr", reason))?;
    let graceful_secs = server
        .graceful_shutdown_seconds
        .unwrap_or(DEFAULT_GRACEFUL_SHUTDOWN_SECS);
    let graceful_secs = non_zero_u64(graceful_secs, "server.graceful_shutdown_seconds")?;

    Ok(ServerSettings {
        addr,
        graceful_shutdown: Duration::from_secs(graceful_secs.get()),
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };
    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };
    Ok(LoggingSettings { level, format })
}

fn build_agent_settings(agent: RawAgentSettings) -> Result<AgentSettings, LoadError> {
    let api_key = non_blank(agent.api_key);
    let model = non_blank(agent.model).unwrap_or_else(|| DEFAULT_AGENT_MODEL.to_string());
    let api_base = agent
        .api_base
        .as_deref()
        .unwrap_or(DEFAULT_AGENT_API_BASE);
    let api_base = parse_http_url(api_base, "agent.api_base")?;
    let timeout_seconds = non_zero_u64(
        agent.timeout_seconds.unwrap_or(DEFAULT_AGENT_TIMEOUT_SECS),
        "agent.timeout_seconds",
    )?;

    Ok(AgentSettings {
        api_key,
        model,
        api_base,
        timeout_seconds,
    })
}

fn build_transport_settings(
    transport: RawTransportSettings,
) -> Result<TransportSettings, LoadError> {
    let endpoint = non_blank(transport.endpoint)
        .map(|value| parse_http_url(&value, "transport.endpoint"))
        .transpose()?;
    let timeout = non_zero_u64(
        transport
            .timeout_seconds
            .unwrap_or(DEFAULT_TRANSPORT_TIMEOUT_SECS),
        "transport.timeout_seconds",
    )?;

    Ok(TransportSettings {
        endpoint,
        timeout: Duration::from_secs(timeout.get()),
    })
}

fn build_content_settings(content: RawContentSettings) -> Result<ContentSettings, LoadError> {
    let directory = content
        .directory
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_DIR));
    if directory.as_os_str().is_empty() {
        return Err(LoadError::invalid(
            "content.directory",
            "path must not be empty",
        ));
    }
    Ok(ContentSettings { directory })
}

fn build_cache_settings(cache: RawCacheSettings) -> Result<CacheSettings, LoadError> {
    let capacity = cache
        .surface_capacity
        .unwrap_or(DEFAULT_SURFACE_CACHE_CAPACITY);
    let capacity = usize::try_from(capacity).map_err(|_| {
        LoadError::invalid(
            "cache.surface_capacity",
            "value exceeds supported range for usize",
        )
    })?;
    let surface_capacity = NonZeroUsize::new(capacity)
        .ok_or_else(|| LoadError::invalid("cache.surface_capacity", "must be greater than zero"))?;
    Ok(CacheSettings { surface_capacity })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawServerSettings {
    host: Option<String>,
    port: Option<u16>,
    graceful_shutdown_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawAgentSettings {
    api_key: Option<String>,
    model: Option<String>,
    api_base: Option<String>,
    timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawTransportSettings {
    endpoint: Option<String>,
    timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawContentSettings {
    directory: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCacheSettings {
    surface_capacity: Option<u64>,
}

fn parse_socket_addr(host: &str, port: u16) -> Result<SocketAddr, String> {
    let candidate = format!("{host}:{port}");
    candidate
        .parse()
        .map_err(|err| format!("invalid address `{candidate}`: {err}"))
}

fn parse_http_url(value: &str, key: &'static str) -> Result<Url, LoadError> {
    let url = Url::parse(value.trim())
        .map_err(|err| LoadError::invalid(key, format!("invalid url `{value}`: {err}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(LoadError::invalid(
            key,
            format!("unsupported scheme `{other}`"),
        )),
    }
}

fn non_zero_u64(value: u64, key: &'static str) -> Result<NonZeroU64, LoadError> {
    NonZeroU64::new(value).ok_or_else(|| LoadError::invalid(key, "must be greater than zero"))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}
