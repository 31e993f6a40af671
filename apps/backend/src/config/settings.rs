use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::catalog::CatalogSources;
use crate::error::AppError;

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StorageSettings {
    /// Select the relational backend instead of the in-memory one
    pub use_db: bool,
    pub db_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmSettings {
    /// Generative mode is available only when this is set
    pub api_key: Option<String>,
    pub model: String,
    pub max_output_tokens: u32,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-1.5-flash".to_string(),
            max_output_tokens: 512,
            temperature: 0.6,
            timeout_secs: 20,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub catalog: CatalogSources,
    pub storage: StorageSettings,
    pub llm: LlmSettings,
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, which returns `None` for unset keys.
    ///
    /// Malformed numbers and booleans are configuration errors; empty
    /// strings count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let server = ServerSettings {
            host: var("BACKEND_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&var, "BACKEND_PORT", 3001)?,
        };

        let catalog = CatalogSources {
            data_path: var("DATA_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data/tarot-images.json")),
            meanings_path: var("MEANINGS_PATH").map(PathBuf::from),
            meanings_dir: var("MEANINGS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("data")),
            static_cards_dir: var("STATIC_CARDS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static/cards")),
            prefer_local_images: bool_or(&var, "PREFER_LOCAL_IMAGES", true)?,
        };

        let storage = StorageSettings {
            use_db: bool_or(&var, "USE_DB", false)?,
            db_url: var("DB_URL"),
        };

        let defaults = LlmSettings::default();
        let llm = LlmSettings {
            api_key: var("GOOGLE_API_KEY"),
            model: var("LLM_MODEL").unwrap_or(defaults.model),
            max_output_tokens: parse_or(&var, "LLM_MAX_OUTPUT_TOKENS", defaults.max_output_tokens)?,
            temperature: parse_or(&var, "LLM_TEMPERATURE", defaults.temperature)?,
            timeout_secs: parse_or(&var, "LLM_TIMEOUT_SECS", defaults.timeout_secs)?,
        };

        Ok(Self {
            server,
            catalog,
            storage,
            llm,
        })
    }
}

fn parse_or<T, F>(var: &F, key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| AppError::config(format!("{key} has invalid value {raw:?}: {e}"))),
    }
}

fn bool_or<F>(var: &F, key: &str, default: bool) -> Result<bool, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(AppError::config(format!(
                "{key} must be a boolean, got {raw:?}"
            ))),
        },
    }
}
