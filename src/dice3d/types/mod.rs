//! Type definitions for the Dice Shaker 3D scene
//!
//! This module is organized into submodules:
//! - `scene` - Scene store and the engine/scene/camera handles it holds
//! - `dice` - Dice template, instances, roster, desired count, face values
//! - `camera` - Orbit camera component and main camera marker
//! - `actions` - Dice action bus and the cancelable deferred task
//! - `ui` - Control panel components and toast notifications
//! - `settings` - Runtime configuration and persisted settings
//! - `database` - Embedded SurrealDB store for persisted settings

pub mod actions;
pub mod camera;
pub mod database;
pub mod dice;
pub mod scene;
pub mod settings;
pub mod ui;

// Re-export all public types for convenient access
pub use actions::*;
pub use camera::*;
pub use database::*;
pub use dice::*;
pub use scene::*;
pub use settings::*;
pub use ui::*;
