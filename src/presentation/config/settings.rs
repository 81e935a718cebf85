use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::application::services::{PromptParameters, PromptPreset, TaskParameters};
use crate::domain::TaskKind;
use crate::infrastructure::llm::{DEFAULT_BASE_URL, SamplingOptions};

use super::Environment;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const ENV_PREFIX: &str = "MEDISCAN";

/// Upper bound for `session.idle_ttl_secs`: 30 days.
pub const MAX_IDLE_TTL_SECS: u64 = 30 * 24 * 60 * 60;

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub prompts: PromptSettings,
    pub summary: SummarySettings,
    pub cache: CacheSettings,
    pub extraction: ExtractionSettings,
    pub session: SessionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LlmSettings {
    /// Never read from files; filled from `OPENAI_API_KEY`.
    #[serde(skip)]
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub top_p: Option<f32>,
    pub frequency_penalty: Option<f32>,
    pub presence_penalty: Option<f32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PromptSettings {
    pub preset: PromptPreset,
    pub include_system_preamble: Option<bool>,
    pub qa: Option<TaskOverride>,
    pub summary: Option<TaskOverride>,
    pub eli5: Option<TaskOverride>,
    pub medications: Option<TaskOverride>,
    pub recommendations: Option<TaskOverride>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TaskOverride {
    pub budget_chars: Option<usize>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SummarySettings {
    pub max_concurrency: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    pub enabled: bool,
    pub ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExtractionSettings {
    pub max_file_size_mb: u64,
    pub timeout_secs: u64,
    pub normalize_text: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    pub idle_ttl_secs: u64,
    pub sweep_interval_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("OPENAI_API_KEY is not set; refusing to start")]
    MissingApiKey,
    #[error("invalid environment: {0}")]
    InvalidEnvironment(String),
    #[error("configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("invalid setting {key}: {reason}")]
    Invalid { key: String, reason: String },
}

impl Settings {
    /// Loads settings for the process: `APP_ENVIRONMENT`, `./config` and the
    /// `OPENAI_API_KEY` credential.
    pub fn from_env() -> Result<Self, SettingsError> {
        let environment = Environment::from_env().map_err(SettingsError::InvalidEnvironment)?;
        Self::load(environment, Path::new("config"), std::env::var(API_KEY_ENV).ok())
    }

    /// Layers built-in defaults, `config/base.toml`, `config/{environment}.toml`
    /// and `MEDISCAN__*` environment variables, in that order.
    pub fn load(
        environment: Environment,
        config_dir: &Path,
        api_key: Option<String>,
    ) -> Result<Self, SettingsError> {
        let api_key = api_key
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(SettingsError::MissingApiKey)?;

        let base = config_dir.join("base");
        let overlay = config_dir.join(environment.as_str());

        let mut settings: Settings = config::Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("llm.base_url", DEFAULT_BASE_URL)?
            .set_default("llm.model", "gpt-3.5-turbo")?
            .set_default("llm.timeout_secs", 60)?
            .set_default("prompts.preset", "extended")?
            .set_default("summary.max_concurrency", 4)?
            .set_default("cache.enabled", true)?
            .set_default("cache.ttl_secs", 3600)?
            .set_default("extraction.max_file_size_mb", 20)?
            .set_default("extraction.timeout_secs", 30)?
            .set_default("extraction.normalize_text", false)?
            .set_default("session.idle_ttl_secs", 3600)?
            .set_default("session.sweep_interval_secs", 300)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .add_source(config::File::with_name(&base.to_string_lossy()).required(false))
            .add_source(config::File::with_name(&overlay.to_string_lossy()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.llm.api_key = api_key;
        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.summary.max_concurrency == 0 {
            return Err(invalid("summary.max_concurrency", "must be at least 1"));
        }
        if !(1..=MAX_IDLE_TTL_SECS).contains(&self.session.idle_ttl_secs) {
            return Err(invalid(
                "session.idle_ttl_secs",
                &format!("must be within 1..={MAX_IDLE_TTL_SECS}"),
            ));
        }
        if self.session.sweep_interval_secs == 0 {
            return Err(invalid("session.sweep_interval_secs", "must be at least 1"));
        }
        if self.cache.enabled && self.cache.ttl_secs == 0 {
            return Err(invalid("cache.ttl_secs", "must be positive when the cache is enabled"));
        }
        for task in TaskKind::ALL {
            let params = self.prompts.parameters().for_task(task);
            if params.budget_chars == 0 {
                return Err(invalid(
                    &format!("prompts.{task}.budget_chars"),
                    "must be at least 1",
                ));
            }
            if !(0.0..=2.0).contains(&params.temperature) {
                return Err(invalid(
                    &format!("prompts.{task}.temperature"),
                    "must be within 0.0..=2.0",
                ));
            }
        }
        Ok(())
    }

    pub fn sampling(&self) -> SamplingOptions {
        SamplingOptions {
            top_p: self.llm.top_p,
            frequency_penalty: self.llm.frequency_penalty,
            presence_penalty: self.llm.presence_penalty,
        }
    }
}

impl PromptSettings {
    /// The preset with every configured override applied on top.
    pub fn parameters(&self) -> PromptParameters {
        let mut parameters = PromptParameters::preset(self.preset);
        if let Some(include) = self.include_system_preamble {
            parameters.include_system_preamble = include;
        }

        let overrides = [
            (TaskKind::Qa, self.qa),
            (TaskKind::Summary, self.summary),
            (TaskKind::Eli5, self.eli5),
            (TaskKind::Medications, self.medications),
            (TaskKind::Recommendations, self.recommendations),
        ];
        for (task, task_override) in overrides {
            if let Some(o) = task_override {
                let base = parameters.for_task(task);
                parameters = parameters.with_task(
                    task,
                    TaskParameters::new(
                        o.budget_chars.unwrap_or(base.budget_chars),
                        o.temperature.unwrap_or(base.temperature),
                        o.max_tokens.or(base.max_tokens),
                    ),
                );
            }
        }
        parameters
    }
}

impl ExtractionSettings {
    pub fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb * 1024 * 1024
    }
}

impl SessionSettings {
    pub fn idle_ttl(&self) -> Result<chrono::Duration, SettingsError> {
        i64::try_from(self.idle_ttl_secs)
            .ok()
            .and_then(chrono::Duration::try_seconds)
            .ok_or_else(|| invalid("session.idle_ttl_secs", "out of range"))
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs)
    }
}

impl LlmSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn invalid(key: &str, reason: &str) -> SettingsError {
    SettingsError::Invalid {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
