mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    API_KEY_ENV, CacheSettings, ENV_PREFIX, ExtractionSettings, LlmSettings, LoggingSettings,
    MAX_IDLE_TTL_SECS, PromptSettings, ServerSettings, SessionSettings, Settings, SettingsError,
    SummarySettings, TaskOverride,
};
