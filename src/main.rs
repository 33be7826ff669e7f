// Hide console window on Windows for release builds (GUI app).
#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use clap::Parser;
use std::path::PathBuf;

use dice_shaker::dice3d::{
    DiceScenePlugin, PhysicsBackend, SettingsStore, ShakerConfig, ShakerSettings,
    DEFAULT_DICE_ASSET, DEFAULT_DICE_MESH_NAME, DEFAULT_SHAKE_FORCE,
};

/// Dice Shaker - shake physics dice in a 3D box
#[derive(Parser, Debug)]
#[command(name = "dice-shaker")]
#[command(author, version, about = "Dice Shaker - shake physics dice in a 3D box")]
struct Cli {
    /// glTF path or URL of the dice model
    #[arg(long, default_value = DEFAULT_DICE_ASSET)]
    asset: String,

    /// Name of the mesh inside the model used as the die
    #[arg(long, default_value = DEFAULT_DICE_MESH_NAME)]
    mesh_name: String,

    /// Number of dice to start with (saved for next time)
    #[arg(short = 'n', long)]
    dice_count: Option<usize>,

    /// Strength of each shake
    #[arg(long, default_value_t = DEFAULT_SHAKE_FORCE)]
    shake_force: f32,

    /// Show a frame rate counter
    #[arg(long)]
    show_fps: bool,

    /// Directory of the settings store (defaults to the app data folder)
    #[arg(long)]
    store: Option<PathBuf>,

    /// Keep settings in memory only
    #[arg(long)]
    no_persist: bool,
}

impl Cli {
    fn config(&self) -> ShakerConfig {
        ShakerConfig {
            asset_path: self.asset.clone(),
            mesh_name: self.mesh_name.clone(),
            shake_force: self.shake_force,
            show_fps: self.show_fps,
        }
    }
}

fn open_settings_store(cli: &Cli) -> Result<SettingsStore, String> {
    if cli.no_persist {
        return SettingsStore::open_in_memory();
    }
    let opened = match &cli.store {
        Some(dir) => SettingsStore::open_at(dir.clone()),
        None => SettingsStore::open(),
    };
    opened.or_else(|e| {
        warn!("{}; settings will not be saved", e);
        SettingsStore::open_in_memory()
    })
}

fn main() {
    let cli = Cli::parse();

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Dice Shaker".to_string(),
                    resolution: (1280u32, 720u32).into(),
                    ..default()
                }),
                ..default()
            })
            .set(bevy::log::LogPlugin {
                level: bevy::log::Level::INFO,
                filter: "info,wgpu=error,naga=warn".to_string(),
                ..default()
            }),
    );

    if cli.show_fps {
        app.add_plugins(FrameTimeDiagnosticsPlugin::default());
    }

    // Stored count first, then the command line on top.
    let store = match open_settings_store(&cli) {
        Ok(store) => Some(store),
        Err(e) => {
            warn!("Settings store unavailable: {}", e);
            None
        }
    };
    let mut settings = store
        .as_ref()
        .map(|store| {
            ShakerSettings::load(store).unwrap_or_else(|e| {
                warn!("Failed to load settings: {}", e);
                ShakerSettings::default()
            })
        })
        .unwrap_or_default();
    let desired = match cli.dice_count {
        Some(count) => {
            let desired = settings.override_count(count);
            if let Some(store) = &store {
                if let Err(e) = settings.save(store) {
                    warn!("Failed to save settings: {}", e);
                }
            }
            desired
        }
        None => settings.desired_count(),
    };

    app.insert_resource(cli.config()).insert_resource(desired);
    if let Some(store) = store {
        app.insert_resource(store);
    }

    app.add_plugins(DiceScenePlugin {
        physics: PhysicsBackend::Rapier,
    })
    .run();
}
