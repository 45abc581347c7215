use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the a2ui-content binary.
#[derive(Debug, Parser)]
#[command(
    name = "a2ui-content",
    version,
    about = "Agent-driven article renderer for A2UI surfaces"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "A2UI_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the agent API and the article pages.
    Serve(Box<ServeArgs>),
    /// Render a surface update JSON file to HTML on stdout.
    Render(RenderArgs),
    /// Print the component schema served at /api/a2ui/schema.
    Schema,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    /// Surface update JSON (`{"surfaceUpdate": {...}}`) to render.
    #[arg(value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub file: PathBuf,

    /// Gallery focus to render, as `<entry-id>:<index>`.
    #[arg(long = "focus", value_name = "ENTRY:INDEX")]
    pub focus: Option<String>,

    /// Render referenced children at their own position as well.
    #[arg(long = "duplicate-children", action = clap::ArgAction::SetTrue)]
    pub duplicate_children: bool,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    /// Override the listener host.
    #[arg(long = "server-host", value_name = "HOST")]
    pub server_host: Option<String>,

    /// Override the listener port.
    #[arg(long = "server-port", value_name = "PORT")]
    pub server_port: Option<u16>,

    /// Override the graceful shutdown timeout.
    #[arg(long = "server-graceful-shutdown-seconds", value_name = "SECONDS")]
    pub server_graceful_shutdown_seconds: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,

    /// Override the Gemini API key.
    #[arg(long = "agent-api-key", value_name = "KEY")]
    pub agent_api_key: Option<String>,

    /// Override the Gemini model name.
    #[arg(long = "agent-model", value_name = "MODEL")]
    pub agent_model: Option<String>,

    /// Override the Gemini API base URL.
    #[arg(long = "agent-api-base", value_name = "URL")]
    pub agent_api_base: Option<String>,

    /// Override the agent request timeout.
    #[arg(long = "agent-timeout-seconds", value_name = "SECONDS")]
    pub agent_timeout_seconds: Option<u64>,

    /// Fetch surfaces from a remote agent instead of calling the generator in-process.
    #[arg(long = "transport-endpoint", value_name = "URL")]
    pub transport_endpoint: Option<String>,

    /// Override the remote agent request timeout.
    #[arg(long = "transport-timeout-seconds", value_name = "SECONDS")]
    pub transport_timeout_seconds: Option<u64>,

    /// Override the article directory.
    #[arg(long = "content-directory", value_name = "PATH", value_hint = ValueHint::DirPath)]
    pub content_directory: Option<PathBuf>,

    /// Override the number of article surfaces kept in memory.
    #[arg(long = "surface-cache-capacity", value_name = "COUNT")]
    pub surface_cache_capacity: Option<u64>,
}
