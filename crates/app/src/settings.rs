//! Handles settings for the application.
//!
//! Values are read, in increasing priority, from built-in defaults, an
//! optional `settings.toml`, and `FINORG__*` environment variables
//! (`FINORG__SERVER__PORT=8080`). The connection string comes from
//! `DATABASE_URI`.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
    pub database_uri: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.bind", "127.0.0.1")?
            .set_default("server.port", 5000)?
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("FINORG").separator("__"));

        if let Ok(uri) = std::env::var("DATABASE_URI") {
            builder = builder.set_override("database_uri", uri)?;
        }

        let settings: Self = builder.build()?.try_deserialize()?;
        if settings.database_uri.trim().is_empty() {
            return Err(ConfigError::Message(
                "DATABASE_URI must not be empty".to_string(),
            ));
        }
        Ok(settings)
    }
}
