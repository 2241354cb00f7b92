use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
///
/// Only the generator URL is required; the other collaborator URLs default to
/// it, matching a deployment where one backend serves every endpoint.
#[derive(Debug, Clone)]
pub struct Config {
    pub generator_url: String,
    pub exporter_url: String,
    pub ats_url: String,
    pub vacancy_url: String,
    pub cloud_export_url: String,
    pub data_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let generator_url = require_env("GENERATOR_URL")?;
        Ok(Config {
            exporter_url: env_or("EXPORTER_URL", &generator_url),
            ats_url: env_or("ATS_URL", &generator_url),
            vacancy_url: env_or("VACANCY_URL", &generator_url),
            cloud_export_url: env_or("CLOUD_EXPORT_URL", &generator_url),
            generator_url,
            data_dir: PathBuf::from(env_or("DATA_DIR", "./data")),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
