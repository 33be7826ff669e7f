//! Boundary construction
//!
//! Four walls and a roof close the play area. They collide but are never
//! drawn. The floor is the only visible piece.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::dice3d::types::*;

/// Build the boundary once per scene.
pub fn build_environment(
    mut commands: Commands,
    store: Res<SceneStore>,
    config: Res<BoundaryConfig>,
    mut state: ResMut<EnvironmentState>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(SceneHandle(scene)) = store.scene() else {
        return;
    };
    if state.built_for == Some(scene) {
        return;
    }

    let floor_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.18, 0.32, 0.22),
        perceptual_roughness: 0.9,
        ..default()
    });

    let layout = boundary_layout(&config);
    for (name, piece) in &layout {
        let half = piece.half_extents;
        let visibility = if piece.is_visible() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };

        let mut entity = commands.spawn((
            Name::new(*name),
            *piece,
            Transform::from_translation(piece.center),
            visibility,
            RigidBody::Fixed,
            Collider::cuboid(half.x, half.y, half.z),
        ));

        if piece.is_visible() {
            entity.insert((
                Mesh3d(meshes.add(Cuboid::from_size(half * 2.0))),
                MeshMaterial3d(floor_material.clone()),
            ));
        }
    }

    state.built_for = Some(scene);
    info!(
        "Boundary built: {} pieces around a {}x{} area",
        layout.len(),
        config.wall_size,
        config.wall_size
    );
}
