//! Tests for scene bootstrap: store, physics, camera, boundary, persistence

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use dice_shaker::dice3d::*;

fn scene_app() -> App {
    let mut app = App::new();
    app.init_resource::<SceneStore>()
        .init_resource::<PhysicsBootstrap>()
        .init_resource::<BoundaryConfig>()
        .init_resource::<EnvironmentState>()
        .init_resource::<Assets<Mesh>>()
        .init_resource::<Assets<StandardMaterial>>()
        .add_systems(Startup, create_scene)
        .add_systems(
            Update,
            (enable_physics, setup_camera, build_environment).chain(),
        );
    app
}

#[test]
fn test_physics_waits_for_scene() {
    let mut app = App::new();
    app.init_resource::<SceneStore>()
        .init_resource::<PhysicsBootstrap>()
        .add_systems(Update, enable_physics);
    let config = app.world_mut().spawn(RapierConfiguration::new(1.0)).id();
    app.update();

    assert!(app.world().resource::<PhysicsBootstrap>().enabled_for.is_none());
    let gravity = app.world().get::<RapierConfiguration>(config).unwrap().gravity;
    assert_ne!(gravity, scaled_gravity(GRAVITY_SCALE));
}

#[test]
fn test_physics_enabled_with_scaled_gravity() {
    let mut app = scene_app();
    let config = app.world_mut().spawn(RapierConfiguration::new(1.0)).id();
    app.update();

    let scene = app.world().resource::<SceneStore>().scene().unwrap();
    assert_eq!(
        app.world().resource::<PhysicsBootstrap>().enabled_for,
        Some(scene.0)
    );
    let gravity = app.world().get::<RapierConfiguration>(config).unwrap().gravity;
    assert_eq!(gravity, Vec3::new(0.0, -9.81 * 3.0, 0.0));
}

#[test]
fn test_single_scene_and_camera() {
    let mut app = scene_app();
    app.update();
    app.update();
    app.update();

    let mut roots = app.world_mut().query_filtered::<&Name, With<DiceSceneRoot>>();
    let names: Vec<String> = roots
        .iter(app.world())
        .map(|n| n.as_str().to_string())
        .collect();
    assert_eq!(names, vec![SCENE_NAME.to_string()]);

    let mut cameras = app.world_mut().query_filtered::<Entity, With<MainCamera>>();
    let cameras: Vec<Entity> = cameras.iter(app.world()).collect();
    assert_eq!(cameras.len(), 1);
    assert_eq!(
        app.world().resource::<SceneStore>().camera(),
        Some(CameraHandle(cameras[0]))
    );
}

#[test]
fn test_camera_follows_orbit_zoom() {
    let mut app = scene_app();
    app.add_systems(Update, apply_orbit_camera.after(setup_camera));
    app.update();

    let camera = app.world().resource::<SceneStore>().camera().unwrap().0;
    let start = app.world().get::<Transform>(camera).unwrap().translation;
    assert!((start.length() - DEFAULT_CAMERA_RADIUS).abs() < 1e-3);

    app.world_mut()
        .get_mut::<OrbitCamera>(camera)
        .unwrap()
        .zoom_by_ratio(2.0);
    app.update();

    let zoomed = app.world().get::<Transform>(camera).unwrap().translation;
    assert!((zoomed.length() - 10.0).abs() < 1e-3);
}

#[test]
fn test_boundary_built_once() {
    let mut app = scene_app();
    app.update();
    app.update();

    let mut pieces = app
        .world_mut()
        .query::<(&BoundaryPiece, &Visibility, &RigidBody)>();
    let pieces: Vec<(BoundaryPiece, Visibility, RigidBody)> = pieces
        .iter(app.world())
        .map(|(p, v, b)| (*p, *v, *b))
        .collect();
    assert_eq!(pieces.len(), 6);

    for (piece, visibility, body) in &pieces {
        assert_eq!(*body, RigidBody::Fixed);
        if piece.kind == BoundaryKind::Floor {
            assert_eq!(*visibility, Visibility::Visible);
        } else {
            assert_eq!(*visibility, Visibility::Hidden);
        }
    }
}

#[test]
fn test_count_change_is_persisted() {
    let store = SettingsStore::open_in_memory().unwrap();
    let mut app = App::new();
    app.insert_resource(store)
        .insert_resource(DesiredDiceCount::default())
        .add_systems(Update, persist_dice_count);

    // The initial value is not written back.
    app.update();
    let saved: Option<usize> = app
        .world()
        .resource::<SettingsStore>()
        .get_setting(ShakerSettings::DICE_COUNT_KEY)
        .unwrap();
    assert!(saved.is_none());

    let mut desired = app.world_mut().resource_mut::<DesiredDiceCount>();
    desired.increase().unwrap();
    app.update();

    let loaded = ShakerSettings::load(app.world().resource::<SettingsStore>()).unwrap();
    assert_eq!(loaded.dice_count, DEFAULT_DICE_COUNT + 1);
}
