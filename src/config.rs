use clap::Parser;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::time::Duration;

use crate::widget::WidgetConfig;

/// Prefix for environment overrides, e.g. `CHAT_WIDGET_SERVER__PORT=8000`.
pub const ENV_PREFIX: &str = "CHAT_WIDGET";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Base URL of the conversation server
    #[arg(long, env = "COLLABORATOR_URL")]
    pub collaborator_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub collaborator: CollaboratorConfig,
    pub registry: RegistryConfig,
    #[serde(default)]
    pub widget: WidgetConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CollaboratorConfig {
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RegistryConfig {
    pub idle_timeout_secs: u64,
    pub cleanup_interval_secs: u64,
}

impl RegistryConfig {
    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Sweep interval, never below one second.
    #[must_use]
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs.max(1))
    }
}

impl ServerConfig {
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from_args(std::env::args())
    }

    /// Layer defaults, config file, `CHAT_WIDGET_*` env and CLI flags, in
    /// increasing precedence.
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;

        let mut builder = Config::builder()
            .set_default("server.port", 3000)?
            .set_default("server.host", "0.0.0.0")?
            .set_default("collaborator.base_url", "http://127.0.0.1:5000")?
            .set_default("registry.idle_timeout_secs", 30 * 60)?
            .set_default("registry.cleanup_interval_secs", 60)?;

        // An explicit file must exist; ./config.{yaml,toml,json} is optional.
        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        if let Some(host) = cli.host {
            builder = builder.set_override("server.host", host)?;
        }
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", i64::from(port))?;
        }
        if let Some(url) = cli.collaborator_url {
            builder = builder.set_override("collaborator.base_url", url)?;
        }

        builder.build()?.try_deserialize()
    }
}
