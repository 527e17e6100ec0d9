use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};

/// Command-line arguments for the anaconda binary.
#[derive(Debug, Parser)]
#[command(name = "anaconda", version, about = "Markdown documentation server")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "ANACONDA_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Run the documentation HTTP server.
    Serve(Box<ServeArgs>),
    /// Render a single document to stdout.
    Render(RenderArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    #[command(flatten)]
    pub overrides: ServeOverrides,
}

#[derive(Debug, Args, Default, Clone)]
pub struct RenderOverrides {
    /// Override the directory Markdown documents are loaded from.
    #[arg(long = "content-directory", value_name = "PATH")]
    pub content_directory: Option<PathBuf>,

    /// Toggle syntax highlighting of fenced code blocks.
    #[arg(
        long = "render-highlight-code",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub highlight_code: Option<bool>,

    /// Only anchor h1 through h5, leaving h6 untouched.
    #[arg(
        long = "render-legacy-heading-tags",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub legacy_heading_tags: Option<bool>,

    /// Suffix repeated heading anchors with -2, -3, ...
    #[arg(
        long = "render-unique-anchors",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub unique_anchors: Option<bool>,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeOverrides {
    #[command(flatten)]
    pub render: RenderOverrides,

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
}

#[derive(Debug, Args, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub overrides: RenderOverrides,

    /// Document name relative to the content directory.
    #[arg(value_name = "DOCUMENT")]
    pub document: String,

    /// Template variable as KEY=VALUE; may be repeated.
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub vars: Vec<(String, String)>,

    /// Also print the heading navigation as JSON.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub navigation: bool,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got `{raw}`"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("variable name missing in `{raw}`"));
    }
    Ok((key.to_string(), value.to_string()))
}
