use std::fs;
use std::path::{Path, PathBuf};

use mediscan::application::services::PromptPreset;
use mediscan::domain::TaskKind;
use mediscan::presentation::config::{Environment, MAX_IDLE_TTL_SECS, Settings, SettingsError};

/// A throwaway config directory under the target dir, unique per test.
fn config_dir(name: &str, files: &[(&str, &str)]) -> PathBuf {
    let dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join(format!("settings-{name}"));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    for (file, contents) in files {
        fs::write(dir.join(file), contents).unwrap();
    }
    dir
}

fn key() -> Option<String> {
    Some("sk-test".to_string())
}

#[test]
fn given_no_api_key_when_loading_then_refuses_to_start() {
    let dir = config_dir("no-key", &[]);

    let result = Settings::load(Environment::Test, &dir, None);
    assert!(matches!(result, Err(SettingsError::MissingApiKey)));

    let result = Settings::load(Environment::Test, &dir, Some("   ".to_string()));
    assert!(matches!(result, Err(SettingsError::MissingApiKey)));
}

#[test]
fn given_no_config_files_when_loading_then_uses_defaults() {
    let dir = config_dir("defaults", &[]);

    let settings = Settings::load(Environment::Test, &dir, key()).unwrap();

    assert_eq!(settings.llm.api_key, "sk-test");
    assert_eq!(settings.llm.model, "gpt-3.5-turbo");
    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.prompts.preset, PromptPreset::Extended);
    assert_eq!(settings.summary.max_concurrency, 4);
    assert!(settings.cache.enabled);
    assert_eq!(settings.cache.ttl_secs, 3600);
    assert_eq!(settings.extraction.max_file_size_bytes(), 20 * 1024 * 1024);
    assert!(!settings.extraction.normalize_text);
}

#[test]
fn given_environment_overlay_when_loading_then_overrides_base() {
    let dir = config_dir(
        "overlay",
        &[
            ("base.toml", "[server]\nport = 8080\n\n[llm]\nmodel = \"gpt-4o-mini\"\n"),
            ("test.toml", "[server]\nport = 9090\n"),
        ],
    );

    let settings = Settings::load(Environment::Test, &dir, key()).unwrap();

    assert_eq!(settings.server.port, 9090);
    assert_eq!(settings.llm.model, "gpt-4o-mini");
}

#[test]
fn given_basic_preset_with_override_when_loading_then_parameters_merge() {
    let dir = config_dir(
        "preset",
        &[(
            "base.toml",
            "[prompts]\npreset = \"basic\"\n\n[prompts.qa]\ntemperature = 0.1\nmax_tokens = 256\n",
        )],
    );

    let settings = Settings::load(Environment::Test, &dir, key()).unwrap();
    let parameters = settings.prompts.parameters();

    let qa = parameters.for_task(TaskKind::Qa);
    assert_eq!(qa.budget_chars, 3000);
    assert_eq!(qa.temperature, 0.1);
    assert_eq!(qa.max_tokens, Some(256));
    assert!(!parameters.include_system_preamble);
    assert_eq!(parameters.for_task(TaskKind::Eli5).budget_chars, 1500);
}

#[test]
fn given_zero_concurrency_when_loading_then_rejects_setting() {
    let dir = config_dir(
        "zero-concurrency",
        &[("base.toml", "[summary]\nmax_concurrency = 0\n")],
    );

    let result = Settings::load(Environment::Test, &dir, key());

    assert!(matches!(
        result,
        Err(SettingsError::Invalid { ref key, .. }) if key == "summary.max_concurrency"
    ));
}

#[test]
fn given_out_of_range_temperature_when_loading_then_rejects_setting() {
    let dir = config_dir(
        "bad-temperature",
        &[("base.toml", "[prompts.eli5]\ntemperature = 3.5\n")],
    );

    let result = Settings::load(Environment::Test, &dir, key());

    assert!(matches!(result, Err(SettingsError::Invalid { .. })));
}

#[test]
fn given_environment_names_when_parsing_then_accepts_known_ones() {
    assert_eq!(Environment::try_from("prod").unwrap(), Environment::Prod);
    assert_eq!(Environment::try_from("LOCAL").unwrap(), Environment::Local);
    assert!(Environment::try_from("staging").is_err());
}

#[test]
fn given_huge_idle_ttl_when_loading_then_rejects_setting() {
    let dir = config_dir(
        "huge-idle-ttl",
        &[("base.toml", "[session]\nidle_ttl_secs = 9223372036854775807\n")],
    );

    let result = Settings::load(Environment::Test, &dir, key());

    assert!(matches!(
        result,
        Err(SettingsError::Invalid { ref key, .. }) if key == "session.idle_ttl_secs"
    ));
}

#[test]
fn given_zero_idle_ttl_when_loading_then_rejects_setting() {
    let dir = config_dir("zero-idle-ttl", &[("base.toml", "[session]\nidle_ttl_secs = 0\n")]);

    let result = Settings::load(Environment::Test, &dir, key());

    assert!(matches!(result, Err(SettingsError::Invalid { .. })));
}

#[test]
fn given_max_idle_ttl_when_converting_then_yields_positive_duration() {
    let dir = config_dir(
        "max-idle-ttl",
        &[(
            "base.toml",
            &format!("[session]\nidle_ttl_secs = {MAX_IDLE_TTL_SECS}\n"),
        )],
    );

    let settings = Settings::load(Environment::Test, &dir, key()).unwrap();
    let idle_ttl = settings.session.idle_ttl().unwrap();

    assert_eq!(idle_ttl.num_seconds(), MAX_IDLE_TTL_SECS as i64);
    assert!(idle_ttl > chrono::Duration::zero());
}
