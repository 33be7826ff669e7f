//! Dice model loading
//!
//! The glTF is requested once at startup. Its load state is polled each frame;
//! when everything is in, the named mesh becomes the parked dice template.

use bevy::asset::{LoadState, RecursiveDependencyLoadState};
use bevy::camera::primitives::MeshAabb;
use bevy::gltf::{Gltf, GltfMesh};
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::dice3d::types::*;

/// Fallback half extent when the mesh has no usable bounds.
const DEFAULT_HALF_EXTENT: f32 = 0.5;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DiceAssetState {
    #[default]
    Idle,
    Loading,
    Ready,
    /// The asset loaded but has no mesh with the configured name.
    MissingMesh,
    Failed(String),
}

/// Resource that tracks the dice model load
#[derive(Resource, Default)]
pub struct DiceAssetLoader {
    pub handle: Option<Handle<Gltf>>,
    pub state: DiceAssetState,
}

impl DiceAssetLoader {
    fn fail(&mut self, source: &str, error: String) {
        error!("Failed to load dice model {}: {}", source, error);
        self.state = DiceAssetState::Failed(error);
    }
}

/// Issue the asynchronous load request.
pub fn start_dice_asset_load(
    asset_server: Res<AssetServer>,
    config: Res<ShakerConfig>,
    mut loader: ResMut<DiceAssetLoader>,
) {
    if loader.state != DiceAssetState::Idle {
        return;
    }

    info!("Loading dice model from {}", config.asset_path);
    loader.handle = Some(asset_server.load(config.asset_path.clone()));
    loader.state = DiceAssetState::Loading;
}

/// Watch the pending load and publish the template when it completes.
///
/// Failures are logged once and never retried.
#[allow(clippy::too_many_arguments)]
pub fn poll_dice_asset_load(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<ShakerConfig>,
    gltfs: Res<Assets<Gltf>>,
    gltf_meshes: Res<Assets<GltfMesh>>,
    meshes: Res<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut loader: ResMut<DiceAssetLoader>,
    mut store: ResMut<SceneStore>,
) {
    if loader.state != DiceAssetState::Loading {
        return;
    }
    let Some(handle) = loader.handle.clone() else {
        return;
    };

    if let LoadState::Failed(err) = asset_server.load_state(handle.id()) {
        loader.fail(&config.asset_path, err.to_string());
        return;
    }
    if let RecursiveDependencyLoadState::Failed(err) =
        asset_server.recursive_dependency_load_state(handle.id())
    {
        loader.fail(&config.asset_path, err.to_string());
        return;
    }
    if !asset_server.is_loaded_with_dependencies(handle.id()) {
        return;
    }

    let Some(gltf) = gltfs.get(&handle) else {
        return;
    };

    let Some(gltf_mesh) = gltf
        .named_meshes
        .get(config.mesh_name.as_str())
        .and_then(|h| gltf_meshes.get(h))
    else {
        let available: Vec<&str> = gltf.named_meshes.keys().map(|name| &**name).collect();
        warn!(
            "Dice mesh '{}' not found in {}; available meshes: {:?}",
            config.mesh_name, config.asset_path, available
        );
        loader.state = DiceAssetState::MissingMesh;
        return;
    };

    let mut fallback: Option<Handle<StandardMaterial>> = None;
    let primitives: Vec<DicePrimitive> = gltf_mesh
        .primitives
        .iter()
        .map(|primitive| DicePrimitive {
            mesh: primitive.mesh.clone(),
            material: primitive.material.clone().unwrap_or_else(|| {
                fallback
                    .get_or_insert_with(|| {
                        materials.add(StandardMaterial {
                            base_color: Color::srgb(0.95, 0.93, 0.88),
                            perceptual_roughness: 0.4,
                            ..default()
                        })
                    })
                    .clone()
            }),
        })
        .collect();

    // A republished template replaces the parked one.
    if let Some(previous) = store.dice_template() {
        if let Ok(mut entity) = commands.get_entity(previous.entity) {
            entity.despawn();
        }
    }

    let (center, half_extents) = primitive_bounds(&primitives, &meshes);
    let mut template = DiceTemplate {
        entity: Entity::PLACEHOLDER,
        primitives,
        half_extents,
        mesh_offset: -center,
    };
    template.entity = spawn_template(&mut commands, &template);

    info!(
        "Dice template '{}' published from mesh '{}' ({} primitive(s), half extents {:?})",
        TEMPLATE_NAME,
        config.mesh_name,
        template.primitives.len(),
        template.half_extents
    );
    store.set_dice_template(Some(template));
    loader.state = DiceAssetState::Ready;
}

/// Center and half extents of the union of the primitives' bounds.
fn primitive_bounds(primitives: &[DicePrimitive], meshes: &Assets<Mesh>) -> (Vec3, Vec3) {
    let mut min = Vec3::splat(f32::INFINITY);
    let mut max = Vec3::splat(f32::NEG_INFINITY);

    for aabb in primitives
        .iter()
        .filter_map(|p| meshes.get(&p.mesh))
        .filter_map(|mesh| mesh.compute_aabb())
    {
        let center = Vec3::from(aabb.center);
        let half = Vec3::from(aabb.half_extents);
        min = min.min(center - half);
        max = max.max(center + half);
    }

    if !min.is_finite() || !max.is_finite() {
        return (Vec3::ZERO, Vec3::splat(DEFAULT_HALF_EXTENT));
    }

    let half = ((max - min) / 2.0).max(Vec3::splat(0.01));
    ((min + max) / 2.0, half)
}

/// Spawn the parked, hidden prototype with its own static collider.
fn spawn_template(commands: &mut Commands, template: &DiceTemplate) -> Entity {
    let half = template.half_extents;
    commands
        .spawn((
            Name::new(TEMPLATE_NAME),
            DiceTemplateMarker,
            Transform::from_translation(PARKING_POSITION),
            Visibility::Hidden,
            RigidBody::Fixed,
            Collider::cuboid(half.x, half.y, half.z),
            ColliderMassProperties::Mass(DICE_MASS),
            Restitution::coefficient(DICE_RESTITUTION),
        ))
        .with_children(|parent| spawn_dice_meshes(parent, template))
        .id()
}

/// Attach the template's meshes as children of a dice body.
pub fn spawn_dice_meshes(parent: &mut ChildSpawnerCommands, template: &DiceTemplate) {
    for primitive in &template.primitives {
        parent.spawn((
            Mesh3d(primitive.mesh.clone()),
            MeshMaterial3d(primitive.material.clone()),
            Transform::from_translation(template.mesh_offset),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn primitive(mesh: Handle<Mesh>) -> DicePrimitive {
        DicePrimitive {
            mesh,
            material: Handle::default(),
        }
    }

    #[test]
    fn test_bounds_fall_back_without_meshes() {
        let meshes = Assets::<Mesh>::default();
        assert_eq!(
            primitive_bounds(&[], &meshes),
            (Vec3::ZERO, Vec3::splat(DEFAULT_HALF_EXTENT))
        );

        // A handle with no loaded mesh behind it also falls back.
        let unloaded = [primitive(Handle::default())];
        assert_eq!(
            primitive_bounds(&unloaded, &meshes),
            (Vec3::ZERO, Vec3::splat(DEFAULT_HALF_EXTENT))
        );
    }

    #[test]
    fn test_bounds_of_unit_cuboid() {
        let mut meshes = Assets::<Mesh>::default();
        let cube = meshes.add(Cuboid::new(1.0, 1.0, 1.0));

        let (center, half) = primitive_bounds(&[primitive(cube)], &meshes);
        assert!(center.length() < 1e-5);
        assert!((half - Vec3::splat(0.5)).length() < 1e-5);
    }

    #[test]
    fn test_bounds_union_of_offset_primitives() {
        let mut meshes = Assets::<Mesh>::default();
        let slab = Mesh::from(Cuboid::new(2.0, 1.0, 4.0));
        let left = meshes.add(slab.clone().translated_by(Vec3::X));
        let right = meshes.add(slab.translated_by(Vec3::X * 3.0));

        let (center, half) = primitive_bounds(&[primitive(left), primitive(right)], &meshes);
        assert!((center - Vec3::new(2.0, 0.0, 0.0)).length() < 1e-5);
        assert!((half - Vec3::new(2.0, 0.5, 2.0)).length() < 1e-5);
    }
}
