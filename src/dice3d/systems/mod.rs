//! Systems module for dice3d
//!
//! This module contains all the Bevy systems for the dice shaker,
//! organized into submodules by functionality:
//!
//! - `scene`: Engine and scene registration in the scene store
//! - `physics`: Gravity bootstrap for the registered scene
//! - `camera`: Orbit camera rig, zoom, and the tap-to-shake override
//! - `asset_loader`: Async loading of the dice model and template extraction
//! - `environment`: Walls, roof, and floor
//! - `population`: Dice clones kept in step with the desired count
//! - `actions`: Shake, relocate, count changes, and the roll summary
//! - `input`: Keyboard shortcuts and control panel buttons
//! - `ui`: Control panel, labels, and toasts
//! - `persistence`: Saving the desired count to the settings store

mod actions;
mod asset_loader;
mod camera;
mod environment;
mod input;
mod persistence;
mod physics;
mod population;
mod scene;
mod ui;

// Re-export all public systems
pub use actions::{handle_dice_actions, tick_roll_summary};
pub use asset_loader::{
    poll_dice_asset_load, spawn_dice_meshes, start_dice_asset_load, DiceAssetLoader,
    DiceAssetState,
};
pub use camera::{apply_orbit_camera, camera_pointer_input, camera_wheel_zoom, setup_camera};
pub use environment::build_environment;
pub use input::{button_color, handle_control_buttons, keyboard_shortcuts};
pub use persistence::persist_dice_count;
pub use physics::enable_physics;
pub use population::{populate_dice, reconcile_dice_population};
pub use scene::{create_scene, register_engine, release_engine_on_exit};
pub use ui::{
    expire_toast, setup_control_panel, show_toasts, update_dice_count_text, update_fps_text,
};
