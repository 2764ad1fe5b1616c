//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.coursebook/config.toml`. If missing on first run,
//! a commented-out default is generated so users can discover all
//! options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct CoursebookConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub content: ContentConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    pub bind_addr: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ContentConfig {
    pub lessons_dir: Option<String>,
    pub public_dir: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 6996;
pub const DEFAULT_LESSONS_DIR: &str = "lessons";
pub const DEFAULT_PUBLIC_DIR: &str = "public";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub bind_addr: String,
    pub port: u16,
    pub lessons_dir: PathBuf,
    pub public_dir: PathBuf,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.coursebook/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".coursebook").join("config.toml"))
}

/// Load config from `~/.coursebook/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `CoursebookConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<CoursebookConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(CoursebookConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(CoursebookConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: CoursebookConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# Coursebook Configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [server]
# bind_addr = "0.0.0.0"
# port = 6996

# [content]
# lessons_dir = "lessons"    # Base directory of unit subdirectories
# public_dir = "public"      # Static assets served under /public
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env
/// vars → CLI.
///
/// `cli_lessons_dir` and `cli_port` come from CLI flags (None = not
/// specified).
pub fn resolve(
    config: &CoursebookConfig,
    cli_lessons_dir: Option<&str>,
    cli_port: Option<u16>,
) -> ResolvedConfig {
    // Lessons dir: CLI → env → config → default
    let lessons_dir = cli_lessons_dir
        .map(|s| s.to_string())
        .or_else(|| std::env::var("COURSEBOOK_LESSONS_DIR").ok())
        .or_else(|| config.content.lessons_dir.clone())
        .unwrap_or_else(|| DEFAULT_LESSONS_DIR.to_string());

    // Port: CLI → env → config → default
    let port = cli_port
        .or_else(|| {
            std::env::var("COURSEBOOK_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
        })
        .or_else(|| config.server.port)
        .unwrap_or(DEFAULT_PORT);

    // Bind address: env → config → default
    let bind_addr = std::env::var("COURSEBOOK_BIND_ADDR")
        .ok()
        .or_else(|| config.server.bind_addr.clone())
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());

    // Public dir: env → config → default
    let public_dir = std::env::var("COURSEBOOK_PUBLIC_DIR")
        .ok()
        .or_else(|| config.content.public_dir.clone())
        .unwrap_or_else(|| DEFAULT_PUBLIC_DIR.to_string());

    ResolvedConfig {
        bind_addr,
        port,
        lessons_dir: PathBuf::from(lessons_dir),
        public_dir: PathBuf::from(public_dir),
    }
}
