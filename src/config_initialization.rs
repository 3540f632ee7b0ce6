//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::{debug, info};

use crate::adapters::toml_config::{AppConfig, ProbeBackend, DEFAULT_CONFIG_FILE};
use crate::cli::{Cli, Commands};
use crate::domain::errors::DomainError;
use crate::error::ReelPickResult;
use crate::utils::logging::LogLevel;

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(cli: &Cli) -> ReelPickResult<AppConfig> {
    initialize_with_env(cli, |key| std::env::var(key).ok())
}

/// Same as `initialize_configuration_hierarchy` with an explicit environment lookup
pub fn initialize_with_env<F>(cli: &Cli, env: F) -> ReelPickResult<AppConfig>
where
    F: Fn(&str) -> Option<String>,
{
    // Step 1 and 2: defaults, then the file on top
    let mut config = load_config_file(cli.config.as_deref())?;

    // Step 3: Override with environment variables
    apply_environment_overrides(&mut config, &env)?;

    // Step 4: Override with CLI arguments
    apply_cli_overrides(&mut config, cli);

    config.validate()?;
    debug!("Configuration hierarchy initialized");
    Ok(config)
}

/// Explicit file must exist; the default file is optional
fn load_config_file(explicit: Option<&Path>) -> ReelPickResult<AppConfig> {
    match explicit {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            AppConfig::load_file(path)
        }
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            info!("Loading configuration from: {}", DEFAULT_CONFIG_FILE);
            AppConfig::load_file(Path::new(DEFAULT_CONFIG_FILE))
        }
        None => Ok(AppConfig::default()),
    }
}

fn parse_env<T: FromStr>(key: &str, value: &str) -> Result<T, DomainError>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| DomainError::ConfigError(format!("{}={}: {}", key, value, e)))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, DomainError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(DomainError::ConfigError(format!(
            "{}={}: expected true or false",
            key, value
        ))),
    }
}

fn parse_backend(key: &str, value: &str) -> Result<ProbeBackend, DomainError> {
    match value.trim().to_lowercase().as_str() {
        "ffprobe" => Ok(ProbeBackend::Ffprobe),
        "libav" => Ok(ProbeBackend::Libav),
        _ => Err(DomainError::ConfigError(format!(
            "{}={}: expected ffprobe or libav",
            key, value
        ))),
    }
}

/// Apply `REELPICK_*` variables to the configuration
fn apply_environment_overrides<F>(config: &mut AppConfig, env: &F) -> Result<(), DomainError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut env_overrides = 0;
    let mut lookup = |key: &str| {
        let value = env(key);
        if let Some(value) = &value {
            debug!("Found environment override: {} = {}", key, value);
            env_overrides += 1;
        }
        value
    };

    if let Some(v) = lookup("REELPICK_STORAGE_DIR") {
        config.storage.dir = PathBuf::from(v);
    }
    if let Some(v) = lookup("REELPICK_PREVIEW_TEMP_ROOT") {
        config.preview.temp_root = Some(PathBuf::from(v));
    }
    if let Some(v) = lookup("REELPICK_PREVIEW_MAX_DURATION") {
        config.preview.max_duration = parse_env("REELPICK_PREVIEW_MAX_DURATION", &v)?;
    }
    if let Some(v) = lookup("REELPICK_GRID_COLUMNS") {
        config.selection.grid_columns = parse_env("REELPICK_GRID_COLUMNS", &v)?;
    }
    if let Some(v) = lookup("REELPICK_DOWNLOAD_AUDIO_DURATION") {
        config.selection.download_audio_duration =
            parse_env("REELPICK_DOWNLOAD_AUDIO_DURATION", &v)?;
    }
    if let Some(v) = lookup("REELPICK_FFMPEG_BIN") {
        config.ffmpeg.ffmpeg_bin = PathBuf::from(v);
    }
    if let Some(v) = lookup("REELPICK_FFPROBE_BIN") {
        config.ffmpeg.ffprobe_bin = PathBuf::from(v);
    }
    if let Some(v) = lookup("REELPICK_THREADS") {
        config.ffmpeg.threads = Some(parse_env("REELPICK_THREADS", &v)?);
    }
    if let Some(v) = lookup("REELPICK_PROBE_BACKEND") {
        config.ffmpeg.probe_backend = parse_backend("REELPICK_PROBE_BACKEND", &v)?;
    }
    if let Some(v) = lookup("REELPICK_MATERIAL_DIR") {
        config.material.library_dir = PathBuf::from(v);
    }
    if let Some(v) = lookup("REELPICK_LOG_LEVEL") {
        config.logging.level = parse_env::<LogLevel>("REELPICK_LOG_LEVEL", &v)?;
    }
    if let Some(v) = lookup("REELPICK_JSON_LOGS") {
        config.logging.json = parse_bool("REELPICK_JSON_LOGS", &v)?;
    }

    if env_overrides > 0 {
        debug!("Applied {} environment variable overrides", env_overrides);
    }
    Ok(())
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut AppConfig, cli: &Cli) {
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.json_logs {
        config.logging.json = true;
    }
    if let Some(dir) = &cli.storage_dir {
        config.storage.dir = dir.clone();
    }
    if let Commands::Preview(args) = &cli.command {
        if let Some(max_duration) = args.max_duration {
            config.preview.max_duration = max_duration;
        }
    }
}
