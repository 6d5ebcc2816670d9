use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::constants::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, DEFAULT_PREVIEW_MAX_HEIGHT,
    DEFAULT_PREVIEW_MAX_WIDTH, DEFAULT_PREVIEW_QUALITY,
};

/// System set for config loading (other plugins can run after this)
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConfigLoaded;

/// Engine configuration persisted to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfigData {
    /// Retention cap for undo history, `None` keeps every entry
    pub max_history_entries: Option<usize>,

    /// Canvas size used for new compositions and image placement
    pub canvas_width: f64,
    pub canvas_height: f64,

    /// Bounds that imported images are scaled down to
    pub preview_max_width: u32,
    pub preview_max_height: u32,

    /// JPEG quality (1-100) for imported image previews
    pub preview_quality: u8,
}

impl Default for EngineConfigData {
    fn default() -> Self {
        Self {
            max_history_entries: None,
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            preview_max_width: DEFAULT_PREVIEW_MAX_WIDTH,
            preview_max_height: DEFAULT_PREVIEW_MAX_HEIGHT,
            preview_quality: DEFAULT_PREVIEW_QUALITY,
        }
    }
}

impl EngineConfigData {
    pub fn canvas_size(&self) -> (f64, f64) {
        (self.canvas_width, self.canvas_height)
    }

    pub fn preview_bounds(&self) -> (u32, u32) {
        (self.preview_max_width, self.preview_max_height)
    }

    /// Quality clamped into the range the JPEG encoder accepts
    pub fn preview_quality(&self) -> u8 {
        self.preview_quality.clamp(1, 100)
    }
}

/// Runtime configuration resource
#[derive(Resource)]
pub struct EngineConfig {
    /// The persisted configuration data
    pub data: EngineConfigData,
    /// Path to the config file
    pub config_path: PathBuf,
    /// Whether config needs to be saved (dirty flag)
    pub dirty: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data: EngineConfigData::default(),
            config_path: crate::paths::config_file(),
            dirty: false,
        }
    }
}

/// Resource to notify user when config was reset to defaults
#[derive(Resource, Default)]
pub struct ConfigResetNotification {
    /// Whether to show the notification
    pub show: bool,
    /// The reason for the reset (parse error, read error, etc.)
    pub reason: Option<String>,
}

/// Message to trigger config save
#[derive(Message)]
pub struct SaveConfigRequest;

/// Message to change the history retention cap
#[derive(Message)]
pub struct SetHistoryLimitRequest {
    pub max_entries: Option<usize>,
}

/// Result of loading config from disk
pub struct LoadConfigResult {
    pub data: EngineConfigData,
    /// Error message if config was reset to defaults due to an error
    pub reset_reason: Option<String>,
}

/// Load configuration from `path`, falling back to defaults
pub fn load_config(path: &Path) -> LoadConfigResult {
    let (data, reset_reason) = if path.exists() {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(data) => {
                    info!("Loaded config from {:?}", path);
                    (data, None)
                }
                Err(e) => {
                    warn!("Failed to parse config file: {}", e);
                    (
                        EngineConfigData::default(),
                        Some(format!("Configuration file was corrupted: {}", e)),
                    )
                }
            },
            Err(e) => {
                warn!("Failed to read config file: {}", e);
                (
                    EngineConfigData::default(),
                    Some(format!("Could not read configuration file: {}", e)),
                )
            }
        }
    } else {
        info!("No config file found, using defaults");
        (EngineConfigData::default(), None)
    };

    LoadConfigResult { data, reset_reason }
}

/// Save configuration to disk
pub fn save_config(config: &EngineConfig) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(&config.data).map_err(std::io::Error::other)?;
    std::fs::write(&config.config_path, json)?;
    info!("Config saved to {:?}", config.config_path);
    Ok(())
}

/// Startup system to load config from disk into the existing resource
fn load_config_system(
    mut config: ResMut<EngineConfig>,
    mut reset_notification: ResMut<ConfigResetNotification>,
) {
    if let Err(e) = crate::paths::ensure_directories() {
        warn!("Failed to create config directories: {}", e);
    }
    let result = load_config(&config.config_path);
    config.data = result.data;
    config.dirty = false;

    if let Some(reason) = result.reset_reason {
        reset_notification.show = true;
        reset_notification.reason = Some(reason);
    }
}

/// System to save config when requested
fn save_config_system(
    mut events: MessageReader<SaveConfigRequest>,
    mut config: ResMut<EngineConfig>,
) {
    for _ in events.read() {
        if config.dirty {
            match save_config(&config) {
                Ok(()) => config.dirty = false,
                Err(e) => error!("Failed to save config: {}", e),
            }
        }
    }
}

/// System to update the history retention cap
fn set_history_limit_system(
    mut events: MessageReader<SetHistoryLimitRequest>,
    mut config: ResMut<EngineConfig>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) {
    for event in events.read() {
        config.data.max_history_entries = event.max_entries;
        config.dirty = true;
        save_events.write(SaveConfigRequest);
        info!("History limit set to {:?}", event.max_entries);
    }
}

pub struct ConfigPlugin;

impl Plugin for ConfigPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EngineConfig>()
            .init_resource::<ConfigResetNotification>()
            .add_message::<SaveConfigRequest>()
            .add_message::<SetHistoryLimitRequest>()
            .add_systems(Startup, load_config_system.in_set(ConfigLoaded))
            .add_systems(
                Update,
                (
                    set_history_limit_system.run_if(on_message::<SetHistoryLimitRequest>),
                    save_config_system.run_if(on_message::<SaveConfigRequest>),
                )
                    .chain(),
            );
    }
}
