use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

/// Labels the bundled classifier was trained on, in encoder index order.
pub const DEFAULT_MODEL_LABELS: [&str; 6] = ["anger", "fear", "joy", "love", "sadness", "surprise"];

/// Which strategy answers `POST /predictions`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifierBackend {
    Remote,
    Local,
}

impl FromStr for ClassifierBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "remote" | "gemini" => Ok(ClassifierBackend::Remote),
            "local" | "model" => Ok(ClassifierBackend::Local),
            other => bail!("CLASSIFIER_BACKEND must be 'remote' or 'local', got '{other}'"),
        }
    }
}

/// Artifacts for the local tokenizer + classifier pair.
#[derive(Debug, Clone)]
pub struct LocalModelConfig {
    /// URL (http/https) or filesystem path of the tokenizer definition.
    pub tokenizer_location: String,
    /// URL (http/https) or filesystem path of the dense-layer model artifact.
    pub model_location: String,
    pub max_len: usize,
    pub labels: Vec<String>,
}

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub api_url: String,
    pub api_key: String,
    pub classifier_backend: ClassifierBackend,
    pub local_model: Option<LocalModelConfig>,
    pub catalog_path: Option<PathBuf>,
    pub backend_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let classifier_backend: ClassifierBackend = std::env::var("CLASSIFIER_BACKEND")
            .unwrap_or_else(|_| "remote".to_string())
            .parse()?;

        let local_model = match classifier_backend {
            ClassifierBackend::Remote => None,
            ClassifierBackend::Local => Some(LocalModelConfig {
                tokenizer_location: require_env("TOKENIZER_URL")?,
                model_location: require_env("MODEL_PATH")?,
                max_len: parse_env_or("MODEL_MAX_LEN", 100)?,
                labels: std::env::var("MODEL_LABELS")
                    .map(|raw| parse_labels(&raw))
                    .unwrap_or_else(|_| default_labels()),
            }),
        };

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            api_url: require_env("API_URL")?,
            api_key: require_env("API_KEY")?,
            classifier_backend,
            local_model,
            catalog_path: std::env::var("CATALOG_PATH").ok().map(PathBuf::from),
            backend_timeout_secs: parse_env_or("BACKEND_TIMEOUT_SECS", 10)?,
            port: parse_env_or("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

pub fn default_labels() -> Vec<String> {
    DEFAULT_MODEL_LABELS.iter().map(|l| l.to_string()).collect()
}

/// Splits a comma-separated label list, dropping blanks.
pub fn parse_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
