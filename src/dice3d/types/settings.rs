//! Shaker configuration and persisted settings
//!
//! `ShakerConfig` holds the launch options; `ShakerSettings` is the part that
//! survives restarts through the [`SettingsStore`].

use bevy::log::info;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::database::SettingsStore;
use super::dice::{DesiredDiceCount, DEFAULT_DICE_COUNT, MAX_DICE_COUNT, MIN_DICE_COUNT};

/// Remote dice model loaded when no `--asset` is given.
pub const DEFAULT_DICE_ASSET: &str =
    "https://raw.githubusercontent.com/KhronosGroup/glTF-Sample-Assets/main/Models/Box/glTF/Box.gltf";

/// Name of the mesh inside the asset used as the dice template.
pub const DEFAULT_DICE_MESH_NAME: &str = "Mesh";

pub const DEFAULT_SHAKE_FORCE: f32 = 3.0;

/// Launch configuration, fixed for the lifetime of the app.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ShakerConfig {
    /// Asset path or URL of the dice model.
    pub asset_path: String,
    pub mesh_name: String,
    pub shake_force: f32,
    pub show_fps: bool,
}

impl Default for ShakerConfig {
    fn default() -> Self {
        Self {
            asset_path: DEFAULT_DICE_ASSET.to_string(),
            mesh_name: DEFAULT_DICE_MESH_NAME.to_string(),
            shake_force: DEFAULT_SHAKE_FORCE,
            show_fps: false,
        }
    }
}

/// Settings persisted between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShakerSettings {
    #[serde(default = "default_dice_count")]
    pub dice_count: usize,
}

fn default_dice_count() -> usize {
    DEFAULT_DICE_COUNT
}

impl Default for ShakerSettings {
    fn default() -> Self {
        Self {
            dice_count: default_dice_count(),
        }
    }
}

impl ShakerSettings {
    pub const DICE_COUNT_KEY: &'static str = "dice_count";

    /// Load settings from the store, falling back to defaults for missing keys.
    pub fn load(db: &SettingsStore) -> Result<Self, String> {
        let mut settings = Self::default();
        if let Some(count) = db.get_setting::<usize>(Self::DICE_COUNT_KEY)? {
            info!("Loaded dice count {} from settings", count);
            settings.dice_count = count;
        }
        Ok(settings)
    }

    /// Desired count bounded to the allowed range.
    pub fn desired_count(&self) -> DesiredDiceCount {
        DesiredDiceCount::new(self.dice_count, MIN_DICE_COUNT, MAX_DICE_COUNT)
    }

    /// Replace the count with a launch override, keeping only the clamped value.
    pub fn override_count(&mut self, count: usize) -> DesiredDiceCount {
        let desired = DesiredDiceCount::new(count, MIN_DICE_COUNT, MAX_DICE_COUNT);
        self.dice_count = desired.get();
        desired
    }

    pub fn save(&self, db: &SettingsStore) -> Result<(), String> {
        db.set_setting(Self::DICE_COUNT_KEY, self.dice_count)
    }
}
