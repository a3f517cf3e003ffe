//! Daemon configuration.
//!
//! Configuration is loaded in the following order (later overrides earlier):
//! 1. Default values
//! 2. YAML config file (if specified via MARQUEE_CONFIG)
//! 3. Environment variables

use marquee_client::UdpConfig;
use marquee_protocol::{DisplayAttributes, Session, DEFAULT_PORT, MAX_FRAMES};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Daemon configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sign addressing and transport.
    pub sign: SignConfig,
    /// Refresh schedule.
    pub refresh: RefreshConfig,
    /// Playlist contents; entry `i` is written to frame `i`.
    pub frames: Frames,
}

impl Config {
    /// Loads configuration from file, then applies environment variable overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("MARQUEE_CONFIG") {
            config = Self::from_file(&path)?;
        }

        config.apply_env_overrides();

        Ok(config)
    }

    /// Loads configuration from a YAML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.to_path_buf(), e))?;
        let config: Config = serde_yaml::from_str(&content)
            .map_err(|e| ConfigError::ParseError(path.to_path_buf(), e.to_string()))?;
        Ok(config)
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any variable source.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        self.sign.apply_overrides(&var);
        self.refresh.apply_overrides(&var);
    }

    /// Checks everything that YAML parsing alone cannot.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sign.session()?;

        if self.frames.0.is_empty() {
            return Err(ConfigError::ValidationError(
                "at least one frame must be configured".to_string(),
            ));
        }
        if self.frames.0.len() > MAX_FRAMES as usize {
            return Err(ConfigError::ValidationError(format!(
                "{} frames configured, the sign holds at most {}",
                self.frames.0.len(),
                MAX_FRAMES
            )));
        }
        if self.refresh.interval_secs == 0 {
            return Err(ConfigError::ValidationError(
                "refresh.interval_secs must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Sign addressing and transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignConfig {
    /// Sign host name or IP address.
    pub host: String,
    pub port: u16,
    /// Group address on the command bus.
    pub group_addr: u8,
    /// Unit address on the command bus.
    pub unit_addr: u8,
    /// Drive letter holding the frame files.
    pub drive: char,
    /// Delay after each datagram in milliseconds.
    pub pace_ms: u64,
}

impl Default for SignConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
            group_addr: 1,
            unit_addr: 1,
            drive: 'E',
            pace_ms: 300,
        }
    }
}

impl SignConfig {
    fn apply_overrides(&mut self, var: &impl Fn(&str) -> Option<String>) {
        if let Some(host) = var("MARQUEE_SIGN_ADDR") {
            self.host = host;
        }

        if let Some(port) = var("MARQUEE_SIGN_PORT") {
            if let Ok(port) = port.parse() {
                self.port = port;
            }
        }

        if let Some(group) = var("MARQUEE_GROUP_ADDR") {
            if let Ok(group) = group.parse() {
                self.group_addr = group;
            }
        }

        if let Some(unit) = var("MARQUEE_UNIT_ADDR") {
            if let Ok(unit) = unit.parse() {
                self.unit_addr = unit;
            }
        }

        if let Some(drive) = var("MARQUEE_DRIVE") {
            if let Ok(drive) = drive.parse() {
                self.drive = drive;
            }
        }

        if let Some(pace) = var("MARQUEE_PACE_MS") {
            if let Ok(ms) = pace.parse() {
                self.pace_ms = ms;
            }
        }
    }

    /// Builds a fresh session for the configured addresses and drive.
    pub fn session(&self) -> Result<Session, ConfigError> {
        Session::new(self.group_addr, self.unit_addr)
            .with_drive(self.drive)
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }

    pub fn udp_config(&self) -> UdpConfig {
        UdpConfig::new(self.host.clone())
            .with_port(self.port)
            .with_pace(Duration::from_millis(self.pace_ms))
    }
}

/// Refresh schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Seconds between refresh cycles.
    pub interval_secs: u64,
    /// Re-upload CONFIG.SYS and defaults once at startup.
    pub redo_settings_on_start: bool,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_secs: 180,
            redo_settings_on_start: false,
        }
    }
}

impl RefreshConfig {
    fn apply_overrides(&mut self, var: &impl Fn(&str) -> Option<String>) {
        if let Some(interval) = var("MARQUEE_REFRESH_SECS") {
            if let Ok(secs) = interval.parse() {
                self.interval_secs = secs;
            }
        }
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

/// One playlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FrameConfig {
    /// Text with inline markup.
    pub text: String,
    #[serde(default)]
    pub attributes: DisplayAttributes,
}

impl FrameConfig {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attributes: DisplayAttributes::default(),
        }
    }
}

/// Configured playlist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frames(pub Vec<FrameConfig>);

impl Default for Frames {
    /// A date and 12-hour clock rendered by the sign itself.
    fn default() -> Self {
        Self(vec![FrameConfig {
            text: "{0}{r}{ma} {dd}  {g}{12}".to_string(),
            attributes: DisplayAttributes {
                typeset: false,
                ..DisplayAttributes::default()
            },
        }])
    }
}

/// Configuration error.
#[derive(Debug)]
pub enum ConfigError {
    IoError(PathBuf, std::io::Error),
    ParseError(PathBuf, String),
    ValidationError(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(path, e) => {
                write!(f, "failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::ValidationError(msg) => {
                write!(f, "configuration validation failed: {}", msg)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
