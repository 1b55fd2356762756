use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::errors::{ScreenBridgeError, ScreenBridgeResult};
use crate::geometry::types::BrowserOffsets;
use crate::page::traits::CallConvention;

const CONFIG_ENV: &str = "SCREENBRIDGE_CONFIG";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub physical_input: PhysicalInputConfig,
}

impl AppConfig {
    pub fn from_toml_str(content: &str) -> ScreenBridgeResult<Self> {
        let mut config: AppConfig = toml::from_str(content)?;
        config.physical_input.timing.enforce_floors();
        Ok(config)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicalInputConfig {
    /// Master switch for the physical input path.
    #[serde(default)]
    pub enabled: bool,
    /// Action names attempted with physical input; everything else is synthetic.
    #[serde(default = "default_actions")]
    pub actions: Vec<String>,
    /// Reject computed points that fall outside the primary screen.
    #[serde(default = "default_true")]
    pub validate_bounds: bool,
    /// Read the cursor back after each move.
    #[serde(default = "default_true")]
    pub verify_cursor: bool,
    /// Check that a click landed on the intended element rather than an overlay.
    #[serde(default = "default_true")]
    pub verify_ownership: bool,
    /// Abort any actuation while the cursor sits in the top-left corner.
    #[serde(default = "default_true")]
    pub failsafe: bool,
    #[serde(default)]
    pub call_convention: CallConvention,
    #[serde(default)]
    pub offsets: BrowserOffsets,
    #[serde(default)]
    pub timing: TimingConfig,
}

impl Default for PhysicalInputConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            actions: default_actions(),
            validate_bounds: true,
            verify_cursor: true,
            verify_ownership: true,
            failsafe: true,
            call_convention: CallConvention::default(),
            offsets: BrowserOffsets::default(),
            timing: TimingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Total time for a pointer glide.
    #[serde(default = "default_move_duration")]
    pub move_duration_ms: u64,
    /// Waypoints per glide, including the final position.
    #[serde(default = "default_move_steps")]
    pub move_steps: u32,
    /// Pause after a click before anything else happens.
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,
    /// Pause after each move, key sequence or scroll.
    #[serde(default = "default_action_pause")]
    pub action_pause_ms: u64,
}

/// Shortest glide accepted from a config file. Zero would make every move an
/// instantaneous jump.
pub const MIN_MOVE_DURATION_MS: u64 = 50;

impl TimingConfig {
    fn enforce_floors(&mut self) {
        if self.move_duration_ms < MIN_MOVE_DURATION_MS {
            tracing::warn!(
                configured = self.move_duration_ms,
                floor = MIN_MOVE_DURATION_MS,
                "move_duration_ms below floor; clamping"
            );
            self.move_duration_ms = MIN_MOVE_DURATION_MS;
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            move_duration_ms: default_move_duration(),
            move_steps: default_move_steps(),
            settle_delay_ms: default_settle_delay(),
            action_pause_ms: default_action_pause(),
        }
    }
}

fn default_actions() -> Vec<String> {
    ["click_element", "input_text", "scroll_down", "scroll_up"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_true() -> bool {
    true
}

fn default_move_duration() -> u64 {
    200
}

fn default_move_steps() -> u32 {
    10
}

fn default_settle_delay() -> u64 {
    100
}

fn default_action_pause() -> u64 {
    100
}

fn resolve_config_path() -> ScreenBridgeResult<PathBuf> {
    if let Ok(explicit) = std::env::var(CONFIG_ENV) {
        let candidate = PathBuf::from(explicit);
        if candidate.exists() {
            tracing::debug!(path = %candidate.display(), "config found via SCREENBRIDGE_CONFIG");
            return Ok(candidate);
        }
        return Err(ScreenBridgeError::Config(format!(
            "{CONFIG_ENV} points to missing file {}",
            candidate.display()
        )));
    }

    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            let candidate = parent.join(CONFIG_FILE);
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "config found next to executable");
                return Ok(candidate);
            }
        }
    }

    let cwd = std::env::current_dir()?;
    let candidate = cwd.join(CONFIG_FILE);
    if candidate.exists() {
        tracing::debug!(path = %candidate.display(), "config found in working directory");
        return Ok(candidate);
    }

    if let Some(dir) = dirs::config_dir() {
        let candidate = dir.join("screenbridge").join(CONFIG_FILE);
        if candidate.exists() {
            tracing::debug!(path = %candidate.display(), "config found in user config dir");
            return Ok(candidate);
        }
    }

    Err(ScreenBridgeError::Config(
        "config.toml not found via SCREENBRIDGE_CONFIG, next to executable, in working directory or user config dir".into(),
    ))
}

pub fn load_config() -> ScreenBridgeResult<AppConfig> {
    let path = resolve_config_path()?;
    let content = std::fs::read_to_string(&path)?;
    let config = AppConfig::from_toml_str(&content)?;
    tracing::info!(
        path = %path.display(),
        enabled = config.physical_input.enabled,
        actions = ?config.physical_input.actions,
        "config loaded"
    );
    Ok(config)
}

/// Like [`load_config`], but a missing or broken file yields the defaults.
pub fn load_or_default() -> AppConfig {
    match load_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %e, "using default physical input config");
            AppConfig::default()
        }
    }
}

pub fn save_config(config: &AppConfig) -> ScreenBridgeResult<()> {
    let path = resolve_config_path()?;
    let content = toml::to_string_pretty(config)?;
    std::fs::write(&path, content)?;
    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}
