//! Dice-related types and components
//!
//! This module contains the dice template, the per-clone `DiceInstance`
//! component, the owned `DiceRoster`, the bounded `DesiredDiceCount`,
//! seed positions, and face-value evaluation.

use bevy::prelude::*;
use std::collections::BTreeMap;

/// Name prefix of every dice clone (`dice0`, `dice1`, ...).
pub const DICE_NAME_PREFIX: &str = "dice";

/// Name given to the parked prototype mesh.
pub const TEMPLATE_NAME: &str = "diceTemplate";

/// Where the template waits, far outside the play area.
pub const PARKING_POSITION: Vec3 = Vec3::new(0.0, -500.0, 0.0);

pub const DICE_MASS: f32 = 1.0;
pub const DICE_RESTITUTION: f32 = 1.0;

pub const MIN_DICE_COUNT: usize = 1;
pub const MAX_DICE_COUNT: usize = 10;
pub const DEFAULT_DICE_COUNT: usize = 4;

/// Hand-placed seeds for the first dice.
const SEED_TABLE: [Vec3; 4] = [
    Vec3::new(-1.5, 4.0, -1.5),
    Vec3::new(1.5, 4.0, -1.5),
    Vec3::new(-1.5, 4.0, 1.5),
    Vec3::new(1.5, 4.0, 1.5),
];

const GRID_COLUMNS: usize = 3;
const GRID_SPACING: f32 = 2.5;
const GRID_BASE_HEIGHT: f32 = 6.0;
const GRID_LAYER_HEIGHT: f32 = 2.0;

/// Local face normals and the value reported when that normal rests on the ground.
///
/// Opposite faces sum to 7.
pub const FACE_NORMALS: [(Vec3, u32); 6] = [
    (Vec3::Y, 1),
    (Vec3::NEG_Y, 6),
    (Vec3::X, 5),
    (Vec3::NEG_X, 2),
    (Vec3::Z, 3),
    (Vec3::NEG_Z, 4),
];

/// Name of the clone at `index`.
pub fn dice_name(index: usize) -> String {
    format!("{}{}", DICE_NAME_PREFIX, index)
}

/// Seed position for the die at `index`.
///
/// The first four indices use the hand-placed table. Later indices are laid
/// out on a 3x3 grid per layer, stacked above the table so no two dice share
/// a seed.
pub fn seed_position(index: usize) -> Vec3 {
    if let Some(seed) = SEED_TABLE.get(index) {
        return *seed;
    }

    let overflow = index - SEED_TABLE.len();
    let per_layer = GRID_COLUMNS * GRID_COLUMNS;
    let layer = overflow / per_layer;
    let cell = overflow % per_layer;
    let row = cell / GRID_COLUMNS;
    let col = cell % GRID_COLUMNS;

    let offset = (GRID_COLUMNS - 1) as f32 * GRID_SPACING / 2.0;
    Vec3::new(
        col as f32 * GRID_SPACING - offset,
        GRID_BASE_HEIGHT + layer as f32 * GRID_LAYER_HEIGHT,
        row as f32 * GRID_SPACING - offset,
    )
}

/// Face value of a die from its orientation.
///
/// Each local normal is rotated into world space; the one pointing furthest
/// down is the face resting on the ground, and its table value is reported.
/// A die without an orientation is treated as unrotated.
pub fn resting_face_value(rotation: Option<Quat>) -> u32 {
    let matrix = Mat3::from_quat(rotation.unwrap_or(Quat::IDENTITY));

    let mut best_match = FACE_NORMALS[1].1;
    let mut lowest_y = f32::INFINITY;

    for (normal, value) in &FACE_NORMALS {
        let world_normal = matrix * *normal;
        if world_normal.y < lowest_y {
            lowest_y = world_normal.y;
            best_match = *value;
        }
    }

    best_match
}

/// One renderable piece of the template (a glTF primitive).
#[derive(Debug, Clone)]
pub struct DicePrimitive {
    pub mesh: Handle<Mesh>,
    pub material: Handle<StandardMaterial>,
}

/// The loaded prototype every die is cloned from.
#[derive(Debug, Clone)]
pub struct DiceTemplate {
    /// The parked, hidden template entity.
    pub entity: Entity,
    pub primitives: Vec<DicePrimitive>,
    /// Half extents of the box collider, from the mesh bounds.
    pub half_extents: Vec3,
    /// Shift applied to the meshes so their bounds are centered on the body.
    pub mesh_offset: Vec3,
}

/// Marker for the parked template entity
#[derive(Component)]
pub struct DiceTemplateMarker;

/// Component attached to each die clone
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceInstance {
    pub index: usize,
}

/// Live dice, keyed by index.
#[derive(Resource, Default, Debug)]
pub struct DiceRoster {
    dice: BTreeMap<usize, Entity>,
}

impl DiceRoster {
    pub fn len(&self) -> usize {
        self.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Entity> {
        self.dice.get(&index).copied()
    }

    pub fn insert(&mut self, index: usize, entity: Entity) -> Option<Entity> {
        self.dice.insert(index, entity)
    }

    /// Iterate `(index, entity)` in index order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, Entity)> + '_ {
        self.dice.iter().map(|(index, entity)| (*index, *entity))
    }

    /// Remove every entry, returning the entities that were live.
    pub fn take_all(&mut self) -> Vec<Entity> {
        std::mem::take(&mut self.dice).into_values().collect()
    }
}

/// A count change refused at a bound
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountLimit {
    AtMinimum(usize),
    AtMaximum(usize),
}

impl CountLimit {
    pub fn message(&self) -> String {
        match self {
            CountLimit::AtMinimum(min) => format!("At least {} dice required", min),
            CountLimit::AtMaximum(max) => format!("No more than {} dice allowed", max),
        }
    }
}

/// Desired number of dice, bounded to `[min, max]`
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesiredDiceCount {
    value: usize,
    min: usize,
    max: usize,
}

impl Default for DesiredDiceCount {
    fn default() -> Self {
        Self::new(DEFAULT_DICE_COUNT, MIN_DICE_COUNT, MAX_DICE_COUNT)
    }
}

impl DesiredDiceCount {
    /// Build a count; `value` is clamped into the bounds.
    pub fn new(value: usize, min: usize, max: usize) -> Self {
        let max = max.max(min);
        Self {
            value: value.clamp(min, max),
            min,
            max,
        }
    }

    pub fn get(&self) -> usize {
        self.value
    }

    pub fn min(&self) -> usize {
        self.min
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn increase(&mut self) -> Result<usize, CountLimit> {
        if self.value >= self.max {
            return Err(CountLimit::AtMaximum(self.max));
        }
        self.value += 1;
        Ok(self.value)
    }

    pub fn decrease(&mut self) -> Result<usize, CountLimit> {
        if self.value <= self.min {
            return Err(CountLimit::AtMinimum(self.min));
        }
        self.value -= 1;
        Ok(self.value)
    }
}

/// Result of the last face-value summary
#[derive(Resource, Default, Debug, Clone)]
pub struct RollSummary {
    /// `(index, value)` per die, in index order.
    pub values: Vec<(usize, u32)>,
    pub total: u32,
}

impl RollSummary {
    pub fn from_values(values: Vec<(usize, u32)>) -> Self {
        let total = values.iter().map(|(_, value)| value).sum();
        Self { values, total }
    }

    pub fn describe(&self) -> String {
        if self.values.is_empty() {
            return String::from("No dice");
        }
        let faces: Vec<String> = self.values.iter().map(|(_, v)| v.to_string()).collect();
        format!("{} = {}", faces.join(" + "), self.total)
    }
}

/// Face values of every roster die.
///
/// `rotation_of` returns the die's orientation, or `None` when it has none.
pub fn summarize_roster(
    roster: &DiceRoster,
    rotation_of: impl Fn(Entity) -> Option<Quat>,
) -> RollSummary {
    let values = roster
        .iter()
        .map(|(index, entity)| (index, resting_face_value(rotation_of(entity))))
        .collect();
    RollSummary::from_values(values)
}
