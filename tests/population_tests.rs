//! Tests for the dice population controller

use bevy::ecs::system::RunSystemOnce;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use dice_shaker::dice3d::*;

fn population_app(count: usize) -> App {
    let mut app = App::new();
    app.init_resource::<SceneStore>()
        .init_resource::<DiceRoster>()
        .insert_resource(DesiredDiceCount::new(count, MIN_DICE_COUNT, MAX_DICE_COUNT))
        .add_systems(Update, reconcile_dice_population);
    app
}

fn publish_template(app: &mut App) -> Entity {
    let entity = app
        .world_mut()
        .spawn((
            DiceTemplateMarker,
            Transform::from_xyz(3.0, 3.0, 3.0),
        ))
        .id();
    app.world_mut()
        .resource_mut::<SceneStore>()
        .set_dice_template(Some(DiceTemplate {
            entity,
            primitives: Vec::new(),
            half_extents: Vec3::splat(0.5),
            mesh_offset: Vec3::ZERO,
        }));
    entity
}

fn live_dice(app: &mut App) -> Vec<(usize, String, Entity)> {
    let mut query = app.world_mut().query::<(Entity, &Name, &DiceInstance)>();
    let mut dice: Vec<(usize, String, Entity)> = query
        .iter(app.world())
        .map(|(entity, name, die)| (die.index, name.as_str().to_string(), entity))
        .collect();
    dice.sort_by_key(|(index, _, _)| *index);
    dice
}

fn set_count(app: &mut App, count: usize) {
    app.world_mut()
        .insert_resource(DesiredDiceCount::new(count, MIN_DICE_COUNT, MAX_DICE_COUNT));
}

#[test]
fn test_no_dice_before_template() {
    let mut app = population_app(4);
    app.update();
    app.update();

    assert!(live_dice(&mut app).is_empty());
    assert!(app.world().resource::<DiceRoster>().is_empty());
}

#[test]
fn test_template_publish_spawns_desired_count() {
    let mut app = population_app(4);
    app.update();
    let template = publish_template(&mut app);
    app.update();

    let dice = live_dice(&mut app);
    let names: Vec<&str> = dice.iter().map(|(_, name, _)| name.as_str()).collect();
    assert_eq!(names, vec!["dice0", "dice1", "dice2", "dice3"]);

    let roster = app.world().resource::<DiceRoster>();
    assert_eq!(roster.len(), 4);
    for (index, _, entity) in &dice {
        assert_eq!(roster.get(*index), Some(*entity));
    }

    let parked = app.world().get::<Transform>(template).unwrap();
    assert_eq!(parked.translation, PARKING_POSITION);
}

#[test]
fn test_clones_start_at_seeds_with_dynamic_bodies() {
    let mut app = population_app(6);
    publish_template(&mut app);
    app.update();

    for (index, _, entity) in live_dice(&mut app) {
        let world = app.world();
        assert_eq!(
            world.get::<Transform>(entity).unwrap().translation,
            seed_position(index)
        );
        assert_eq!(world.get::<RigidBody>(entity), Some(&RigidBody::Dynamic));
        assert!(world.get::<Collider>(entity).is_some());
        let velocity = world.get::<Velocity>(entity).unwrap();
        assert_eq!(velocity.linvel, Vec3::ZERO);
        assert_eq!(velocity.angvel, Vec3::ZERO);
    }
}

#[test]
fn test_count_changes_rebuild_exactly() {
    let mut app = population_app(4);
    publish_template(&mut app);
    app.update();

    for count in [7, 2, 10, 1] {
        set_count(&mut app, count);
        app.update();

        let dice = live_dice(&mut app);
        assert_eq!(dice.len(), count);
        let indices: Vec<usize> = dice.iter().map(|(index, _, _)| *index).collect();
        assert_eq!(indices, (0..count).collect::<Vec<_>>());
        assert_eq!(app.world().resource::<DiceRoster>().len(), count);
    }
}

#[test]
fn test_repopulation_is_idempotent() {
    let mut app = population_app(5);
    publish_template(&mut app);
    app.update();
    let first: Vec<Entity> = live_dice(&mut app).into_iter().map(|(_, _, e)| e).collect();

    // Same count again: nothing is rebuilt.
    set_count(&mut app, 5);
    app.update();
    app.update();
    let second: Vec<Entity> = live_dice(&mut app).into_iter().map(|(_, _, e)| e).collect();
    assert_eq!(first, second);

    // A round trip through another count ends with the same shape.
    set_count(&mut app, 3);
    app.update();
    set_count(&mut app, 5);
    app.update();
    let dice = live_dice(&mut app);
    assert_eq!(dice.len(), 5);
    assert!(dice.iter().all(|(_, _, e)| !first.contains(e)));
}

#[test]
fn test_template_republish_rebuilds() {
    let mut app = population_app(3);
    publish_template(&mut app);
    app.update();
    let before: Vec<Entity> = live_dice(&mut app).into_iter().map(|(_, _, e)| e).collect();

    publish_template(&mut app);
    app.update();
    let after = live_dice(&mut app);
    assert_eq!(after.len(), 3);
    assert!(after.iter().all(|(_, _, e)| !before.contains(e)));
}

fn clear_dice(mut commands: Commands, store: Res<SceneStore>, mut roster: ResMut<DiceRoster>) {
    if let Some(template) = store.dice_template() {
        populate_dice(&mut commands, template, &mut roster, 0);
    }
}

#[test]
fn test_zero_count_leaves_empty_roster() {
    let mut app = population_app(4);
    publish_template(&mut app);
    app.update();
    assert_eq!(live_dice(&mut app).len(), 4);

    app.world_mut().run_system_once(clear_dice).unwrap();

    assert!(app.world().resource::<DiceRoster>().is_empty());
    assert!(live_dice(&mut app).is_empty());
}

#[test]
fn test_template_stays_parked_after_rebuild() {
    let mut app = population_app(2);
    let template = publish_template(&mut app);
    app.update();

    app.world_mut()
        .get_mut::<Transform>(template)
        .unwrap()
        .translation = Vec3::ZERO;
    set_count(&mut app, 3);
    app.update();

    let parked = app.world().get::<Transform>(template).unwrap();
    assert_eq!(parked.translation, PARKING_POSITION);
}
