//! Physics bootstrap
//!
//! Applies the scaled gravity to the Rapier configuration once a scene exists.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::dice3d::types::*;

/// Enable physics for the registered scene.
///
/// Does nothing until a scene is registered. If Rapier has not created its
/// configuration yet, the system tries again next frame.
pub fn enable_physics(
    store: Res<SceneStore>,
    mut bootstrap: ResMut<PhysicsBootstrap>,
    mut configs: Query<&mut RapierConfiguration>,
) {
    let Some(SceneHandle(scene)) = store.scene() else {
        return;
    };
    if bootstrap.enabled_for == Some(scene) {
        return;
    }

    let gravity = bootstrap.gravity;
    let mut applied = 0;
    for mut config in configs.iter_mut() {
        config.gravity = gravity;
        applied += 1;
    }
    if applied == 0 {
        return;
    }

    bootstrap.enabled_for = Some(scene);
    info!(
        "Physics enabled for scene {:?} (gravity {:?}, {} context(s))",
        scene, gravity, applied
    );
}
