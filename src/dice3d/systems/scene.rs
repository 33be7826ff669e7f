//! Scene store lifecycle systems

use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::dice3d::types::*;

/// Register the primary window as the engine handle.
pub fn register_engine(
    mut store: ResMut<SceneStore>,
    windows: Query<Entity, With<PrimaryWindow>>,
) {
    match windows.single() {
        Ok(window) => {
            store.set_engine(Some(EngineHandle(window)));
            info!("Engine registered (window {:?})", window);
        }
        Err(_) => warn!("No primary window; running without a rendering surface"),
    }
}

/// Create the scene root, once.
pub fn create_scene(mut commands: Commands, mut store: ResMut<SceneStore>) {
    if store.scene().is_some() {
        return;
    }

    let scene = commands
        .spawn((
            Name::new(SCENE_NAME),
            DiceSceneRoot,
            Transform::default(),
            Visibility::default(),
        ))
        .id();

    store.set_scene(Some(SceneHandle(scene)));
    info!("Scene '{}' ready ({:?})", SCENE_NAME, scene);
}

/// Drop the engine handle when the app is shutting down.
pub fn release_engine_on_exit(mut exits: MessageReader<AppExit>, mut store: ResMut<SceneStore>) {
    if exits.read().next().is_none() || store.engine().is_none() {
        return;
    }
    store.set_engine(None);
    info!("Engine released");
}
