use crate::services::providers::gemini::{GeminiConfig, GEMINI_API_BASE};
use secrecy::{ExposeSecret, SecretString};
use service_core::config as core_config;
use service_core::error::AppError;
use service_core::retry::RetryConfig;
use std::env;
use std::time::Duration;

/// Value shipped in the sample `.env`; treated the same as no key at all.
const API_KEY_PLACEHOLDER: &str = "your_gemini_api_key_here";

const DEV_SECRET_KEY: &str = "legalease-secret-key-change-in-production";

#[derive(Debug, Clone)]
pub struct LegaleaseConfig {
    pub common: core_config::Config,
    pub environment: String,
    pub genai: GenaiSettings,
    pub session: SessionSettings,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GenaiSettings {
    /// `None` when no usable key is configured; the service then runs without a provider.
    pub api_key: Option<SecretString>,
    pub text_model: String,
    pub fallback_models: Vec<String>,
    pub discover_models: bool,
    pub request_timeout_secs: u64,
    pub max_retries: u32,
    pub api_base: String,
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub secret_key: SecretString,
    pub cookie_name: String,
    pub cookie_secure: bool,
}

impl LegaleaseConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Build the service settings from `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(mut common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = get_env(&lookup, "ENVIRONMENT", Some("dev"), false)?;
        let is_prod = environment == "prod";

        if let Some(level) = lookup("LOG_LEVEL") {
            common.log_level = level;
        }

        let api_key = lookup("GOOGLE_API_KEY")
            .or_else(|| lookup("GEMINI_API_KEY"))
            .and_then(usable_api_key);

        let genai = GenaiSettings {
            api_key,
            text_model: get_env(&lookup, "GENAI_TEXT_MODEL", Some("gemini-1.5-flash"), false)?,
            fallback_models: parse_list(&get_env(
                &lookup,
                "GENAI_FALLBACK_MODELS",
                Some("gemini-pro,gemini-1.5-flash,gemini-1.5-pro"),
                false,
            )?),
            discover_models: parse_bool(
                "GENAI_DISCOVER_MODELS",
                &get_env(&lookup, "GENAI_DISCOVER_MODELS", Some("true"), false)?,
            )?,
            request_timeout_secs: parse_number(
                "GENAI_REQUEST_TIMEOUT_SECS",
                &get_env(&lookup, "GENAI_REQUEST_TIMEOUT_SECS", Some("60"), false)?,
            )?,
            max_retries: parse_number(
                "GENAI_MAX_RETRIES",
                &get_env(&lookup, "GENAI_MAX_RETRIES", Some("2"), false)?,
            )?,
            api_base: get_env(&lookup, "GENAI_API_BASE", Some(GEMINI_API_BASE), false)?,
        };

        let session = SessionSettings {
            secret_key: SecretString::new(get_env(
                &lookup,
                "SECRET_KEY",
                Some(DEV_SECRET_KEY),
                is_prod,
            )?),
            cookie_name: get_env(&lookup, "SESSION_COOKIE_NAME", Some("legalease_session"), false)?,
            cookie_secure: parse_bool(
                "SESSION_COOKIE_SECURE",
                &get_env(&lookup, "SESSION_COOKIE_SECURE", Some("false"), false)?,
            )?,
        };

        if session.secret_key.expose_secret() == DEV_SECRET_KEY {
            tracing::warn!("SECRET_KEY not set, using development key for session cookies");
        }

        Ok(LegaleaseConfig {
            common,
            environment,
            genai,
            session,
            otlp_endpoint: lookup("OTLP_ENDPOINT").filter(|v| !v.trim().is_empty()),
        })
    }
}

impl GenaiSettings {
    /// Provider settings, or `None` when no API key is configured.
    pub fn gemini_config(&self) -> Option<GeminiConfig> {
        let api_key = self.api_key.clone()?;
        let mut config = GeminiConfig::new(api_key, self.text_model.clone());
        config.fallback_models = self.fallback_models.clone();
        config.discover_models = self.discover_models;
        config.request_timeout = self.request_timeout();
        config.base_url = self.api_base.clone();
        Some(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::with_max_retries(self.max_retries)
    }
}

fn usable_api_key(raw: String) -> Option<SecretString> {
    let key = raw.trim();
    if key.is_empty() || key == API_KEY_PLACEHOLDER {
        None
    } else {
        Some(SecretString::new(key.to_string()))
    }
}

fn parse_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(AppError::ConfigError(anyhow::anyhow!(
            "{} must be a boolean, got {:?}",
            key,
            other
        ))),
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T, AppError> {
    raw.trim().parse().map_err(|_| {
        AppError::ConfigError(anyhow::anyhow!("{} must be a number, got {:?}", key, raw))
    })
}

fn get_env<F>(lookup: &F, key: &str, default: Option<&str>, is_prod: bool) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(val) => Ok(val),
        None => {
            if is_prod {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required in production but not set",
                    key
                )))
            } else if let Some(def) = default {
                Ok(def.to_string())
            } else {
                Err(AppError::ConfigError(anyhow::anyhow!(
                    "{} is required but not set",
                    key
                )))
            }
        }
    }
}
