//! Dice population
//!
//! Keeps the roster in step with the desired count. Every change rebuilds
//! the whole set of clones from the parked template.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::asset_loader::spawn_dice_meshes;
use crate::dice3d::types::*;

/// Rebuild the dice when the desired count or the template changes.
///
/// Nothing happens until a template has been published.
pub fn reconcile_dice_population(
    mut commands: Commands,
    store: Res<SceneStore>,
    desired: Res<DesiredDiceCount>,
    mut roster: ResMut<DiceRoster>,
    mut templates: Query<&mut Transform, With<DiceTemplateMarker>>,
    mut last_seen: Local<Option<(usize, u64)>>,
) {
    let Some(template) = store.dice_template() else {
        return;
    };

    let key = (desired.get(), store.template_revision());
    if *last_seen == Some(key) {
        return;
    }
    *last_seen = Some(key);

    if let Ok(mut transform) = templates.get_mut(template.entity) {
        *transform = Transform::from_translation(PARKING_POSITION);
    }

    populate_dice(&mut commands, template, &mut roster, desired.get());
}

/// Despawn every live die and spawn `count` fresh clones.
pub fn populate_dice(
    commands: &mut Commands,
    template: &DiceTemplate,
    roster: &mut DiceRoster,
    count: usize,
) {
    let removed = roster.take_all();
    for entity in &removed {
        if let Ok(mut entity) = commands.get_entity(*entity) {
            entity.despawn();
        }
    }

    let half = template.half_extents;
    for index in 0..count {
        let entity = commands
            .spawn((
                Name::new(dice_name(index)),
                DiceInstance { index },
                Transform::from_translation(seed_position(index)),
                Visibility::Visible,
                RigidBody::Dynamic,
                Collider::cuboid(half.x, half.y, half.z),
                ColliderMassProperties::Mass(DICE_MASS),
                Restitution::coefficient(DICE_RESTITUTION),
                Velocity::zero(),
                ExternalImpulse::default(),
            ))
            .with_children(|parent| spawn_dice_meshes(parent, template))
            .id();
        roster.insert(index, entity);
    }

    info!(
        "Dice population: removed {}, spawned {}",
        removed.len(),
        count
    );
}
