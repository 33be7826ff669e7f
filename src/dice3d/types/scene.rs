//! Scene-level types
//!
//! The [`SceneStore`] is the single place that knows which window, scene
//! root, camera, and dice template are live. Physics bootstrap and boundary
//! layout types also live here.

use bevy::prelude::*;

use super::dice::DiceTemplate;

/// Name of the scene root entity.
pub const SCENE_NAME: &str = "diceScene";

pub const STANDARD_GRAVITY: f32 = 9.81;
pub const GRAVITY_SCALE: f32 = 3.0;

/// Gravity vector for a given multiple of standard gravity.
pub fn scaled_gravity(scale: f32) -> Vec3 {
    Vec3::new(0.0, -STANDARD_GRAVITY * scale, 0.0)
}

/// Rendering surface (the primary window entity).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EngineHandle(pub Entity);

/// Scene root entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SceneHandle(pub Entity);

/// Orbit camera entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CameraHandle(pub Entity);

/// Marker for the scene root entity
#[derive(Component)]
pub struct DiceSceneRoot;

/// Live engine, scene, camera, and dice template references.
///
/// Setters replace the stored value; readers rely on resource change
/// detection to observe updates. Last writer wins.
#[derive(Resource, Default, Debug)]
pub struct SceneStore {
    engine: Option<EngineHandle>,
    scene: Option<SceneHandle>,
    camera: Option<CameraHandle>,
    dice_template: Option<DiceTemplate>,
    template_revision: u64,
}

impl SceneStore {
    pub fn engine(&self) -> Option<EngineHandle> {
        self.engine
    }

    pub fn scene(&self) -> Option<SceneHandle> {
        self.scene
    }

    pub fn camera(&self) -> Option<CameraHandle> {
        self.camera
    }

    pub fn dice_template(&self) -> Option<&DiceTemplate> {
        self.dice_template.as_ref()
    }

    /// Bumped only when the dice template is set.
    pub fn template_revision(&self) -> u64 {
        self.template_revision
    }

    pub fn set_engine(&mut self, engine: Option<EngineHandle>) {
        self.engine = engine;
    }

    pub fn set_scene(&mut self, scene: Option<SceneHandle>) {
        self.scene = scene;
    }

    pub fn set_camera(&mut self, camera: Option<CameraHandle>) {
        self.camera = camera;
    }

    pub fn set_dice_template(&mut self, template: Option<DiceTemplate>) {
        self.dice_template = template;
        self.template_revision += 1;
    }
}

/// How the rigid-body simulation is provided to the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PhysicsBackend {
    /// The dice plugin installs Rapier itself.
    #[default]
    Rapier,
    /// The host app has already installed a Rapier plugin.
    External,
}

/// Records which scene physics has been enabled for.
#[derive(Resource, Debug, Clone, Copy)]
pub struct PhysicsBootstrap {
    pub enabled_for: Option<Entity>,
    pub gravity: Vec3,
}

impl Default for PhysicsBootstrap {
    fn default() -> Self {
        Self {
            enabled_for: None,
            gravity: scaled_gravity(GRAVITY_SCALE),
        }
    }
}

// ============================================================================
// Boundary
// ============================================================================

/// Size of the closed box the dice are shaken in.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct BoundaryConfig {
    /// Inner width and depth of the play area.
    pub wall_size: f32,
    pub wall_thickness: f32,
    pub wall_height: f32,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            wall_size: 10.0,
            wall_thickness: 0.5,
            wall_height: 10.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryKind {
    Wall,
    Roof,
    Floor,
}

/// Component on every spawned boundary collider
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct BoundaryPiece {
    pub kind: BoundaryKind,
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl BoundaryPiece {
    /// Walls and roof only collide; the floor is drawn.
    pub fn is_visible(&self) -> bool {
        self.kind == BoundaryKind::Floor
    }
}

/// Which scene the boundary was built for.
#[derive(Resource, Default, Debug)]
pub struct EnvironmentState {
    pub built_for: Option<Entity>,
}

/// Layout of the four walls, the roof, and the floor around the origin.
///
/// Walls sit just outside `wall_size`, so the inner area is exactly
/// `wall_size` on each side. Walls and roof overlap at the corners.
pub fn boundary_layout(config: &BoundaryConfig) -> Vec<(&'static str, BoundaryPiece)> {
    let half_size = config.wall_size / 2.0;
    let half_thick = config.wall_thickness / 2.0;
    let half_height = config.wall_height / 2.0;
    let span = half_size + config.wall_thickness;
    let offset = half_size + half_thick;

    let wall = |center: Vec3, half_extents: Vec3| BoundaryPiece {
        kind: BoundaryKind::Wall,
        center,
        half_extents,
    };

    vec![
        (
            "wallLeft",
            wall(
                Vec3::new(-offset, half_height, 0.0),
                Vec3::new(half_thick, half_height, span),
            ),
        ),
        (
            "wallRight",
            wall(
                Vec3::new(offset, half_height, 0.0),
                Vec3::new(half_thick, half_height, span),
            ),
        ),
        (
            "wallBack",
            wall(
                Vec3::new(0.0, half_height, -offset),
                Vec3::new(span, half_height, half_thick),
            ),
        ),
        (
            "wallFront",
            wall(
                Vec3::new(0.0, half_height, offset),
                Vec3::new(span, half_height, half_thick),
            ),
        ),
        (
            "roof",
            BoundaryPiece {
                kind: BoundaryKind::Roof,
                center: Vec3::new(0.0, config.wall_height + half_thick, 0.0),
                half_extents: Vec3::new(span, half_thick, span),
            },
        ),
        (
            "floor",
            BoundaryPiece {
                kind: BoundaryKind::Floor,
                center: Vec3::new(0.0, -half_thick, 0.0),
                half_extents: Vec3::new(span, half_thick, span),
            },
        ),
    ]
}
