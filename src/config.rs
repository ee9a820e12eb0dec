use std::time::Duration;

use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Prefix of environment variables read by the `config` layer,
/// e.g. `JOBS_CHAT_SERVER__PORT=8080`.
pub const ENV_PREFIX: &str = "JOBS_CHAT";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Port to listen on
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    /// Base URL of the question-answering backend
    #[arg(long, env = "API_URL")]
    pub api_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub ui: UiConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    /// Base URL questions are posted to (`{base_url}/question`).
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    pub idle_timeout_secs: u64,
    pub sweep_interval_secs: u64,
}

impl SessionConfig {
    #[must_use]
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    pub title: String,
    pub htmx_src: String,
    pub tailwind_src: String,
    /// Delay between polls of the chat panel while a question is pending.
    pub poll_interval_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                port: 3000,
                host: "0.0.0.0".to_string(),
            },
            backend: BackendConfig {
                base_url: "http://localhost:8000".to_string(),
            },
            session: SessionConfig {
                idle_timeout_secs: 30 * 60,
                sweep_interval_secs: 60,
            },
            ui: UiConfig {
                title: "Jobs RAG Chat".to_string(),
                htmx_src: "https://unpkg.com/htmx.org@2.0.8".to_string(),
                tailwind_src: "https://cdn.tailwindcss.com".to_string(),
                poll_interval_ms: 700,
            },
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_args(std::env::args())
    }

    pub fn load_from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args).map_err(|e| ConfigError::Message(e.to_string()))?;
        let defaults = Self::default();

        // 1. Defaults
        let mut builder = Config::builder()
            .set_default("server.port", defaults.server.port)?
            .set_default("server.host", defaults.server.host)?
            .set_default("backend.base_url", defaults.backend.base_url)?
            .set_default("session.idle_timeout_secs", defaults.session.idle_timeout_secs)?
            .set_default("session.sweep_interval_secs", defaults.session.sweep_interval_secs)?
            .set_default("ui.title", defaults.ui.title)?
            .set_default("ui.htmx_src", defaults.ui.htmx_src)?
            .set_default("ui.tailwind_src", defaults.ui.tailwind_src)?
            .set_default("ui.poll_interval_ms", defaults.ui.poll_interval_ms)?;

        // 2. Config file: explicit path, else ./config.{yaml,toml,json} if present
        builder = match &cli.config {
            Some(path) => builder.add_source(File::with_name(path)),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        // 3. Prefixed environment, e.g. JOBS_CHAT_BACKEND__BASE_URL
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // 4. CLI flags (and their plain env fallbacks PORT / API_URL)
        if let Some(port) = cli.port {
            builder = builder.set_override("server.port", port)?;
        }
        if let Some(api_url) = cli.api_url {
            builder = builder.set_override("backend.base_url", api_url)?;
        }

        let cfg: Self = builder.build()?.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let url = url::Url::parse(&self.backend.base_url).map_err(|e| {
            ConfigError::Message(format!(
                "backend.base_url `{}` is not a valid URL: {e}",
                self.backend.base_url
            ))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::Message(format!(
                "backend.base_url must use http or https, got `{}`",
                url.scheme()
            )));
        }
        Ok(())
    }
}
