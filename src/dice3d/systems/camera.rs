//! Camera control systems
//!
//! This module contains the orbit camera rig, pinch and wheel zoom, and the
//! pointer override that turns a tap on the viewport into a shake.

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::dice3d::types::*;

/// Pixels of precise scrolling that count as one wheel line.
const PIXELS_PER_LINE: f32 = 100.0;

/// Spawn the orbit camera and light once a scene exists.
pub fn setup_camera(mut commands: Commands, mut store: ResMut<SceneStore>) {
    if store.scene().is_none() || store.camera().is_some() {
        return;
    }

    let orbit = OrbitCamera::default();
    let camera = commands
        .spawn((
            Name::new("mainCamera"),
            Camera3d::default(),
            orbit.transform(),
            orbit,
            MainCamera,
        ))
        .id();

    commands.spawn((
        Name::new("sun"),
        DirectionalLight {
            illuminance: 12_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 16.0, 8.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    store.set_camera(Some(CameraHandle(camera)));
    info!("Camera attached (radius {})", orbit.radius);
}

/// Keep the camera transform in sync with its orbit parameters.
pub fn apply_orbit_camera(
    mut cameras: Query<(&OrbitCamera, &mut Transform), Changed<OrbitCamera>>,
) {
    for (orbit, mut transform) in cameras.iter_mut() {
        *transform = orbit.transform();
    }
}

/// Pointer input on the viewport.
///
/// A new single press (left mouse button or one touch) shakes the dice
/// instead of rotating the camera. Two fingers pinch-zoom. Panning and
/// double-tap do nothing.
pub fn camera_pointer_input(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    buttons: Query<&Interaction, With<Button>>,
    mut cameras: Query<&mut OrbitCamera, With<MainCamera>>,
    mut actions: MessageWriter<DiceAction>,
) {
    let over_ui = buttons.iter().any(|i| *i != Interaction::None);

    let active: Vec<&bevy::input::touch::Touch> = touches.iter().collect();
    let new_touches = touches.iter_just_pressed().count();

    if active.len() == 2 {
        let (a, b) = (active[0], active[1]);
        if let Some(ratio) = pinch_ratio(
            a.previous_position(),
            b.previous_position(),
            a.position(),
            b.position(),
        ) {
            for mut orbit in cameras.iter_mut() {
                orbit.zoom_by_ratio(ratio);
            }
        }
        return;
    }

    if over_ui {
        return;
    }

    let single_touch = new_touches == 1 && active.len() == 1;
    if mouse.just_pressed(MouseButton::Left) || single_touch {
        actions.write(DiceAction::Shake);
    }
}

/// Mouse-wheel zoom, bounded like pinch zoom.
pub fn camera_wheel_zoom(
    mut wheel: MessageReader<MouseWheel>,
    mut cameras: Query<&mut OrbitCamera, With<MainCamera>>,
) {
    let mut delta = 0.0;
    for event in wheel.read() {
        delta += match event.unit {
            MouseScrollUnit::Line => event.y,
            MouseScrollUnit::Pixel => event.y / PIXELS_PER_LINE,
        };
    }
    if delta == 0.0 {
        return;
    }

    for mut orbit in cameras.iter_mut() {
        orbit.zoom_by(delta * WHEEL_ZOOM_STEP);
    }
}
