use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::systems::*;
use super::types::*;

/// Wires the dice scene into an app.
///
/// Resources already inserted by the host (config, desired count, settings
/// store) are kept; everything else starts from its default.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiceScenePlugin {
    pub physics: PhysicsBackend,
}

impl Plugin for DiceScenePlugin {
    fn build(&self, app: &mut App) {
        if self.physics == PhysicsBackend::Rapier {
            app.add_plugins(RapierPhysicsPlugin::<NoUserData>::default());
        }

        app.init_resource::<ShakerConfig>()
            .init_resource::<DesiredDiceCount>()
            .init_resource::<SceneStore>()
            .init_resource::<PhysicsBootstrap>()
            .init_resource::<BoundaryConfig>()
            .init_resource::<EnvironmentState>()
            .init_resource::<DiceAssetLoader>()
            .init_resource::<DiceRoster>()
            .init_resource::<SummarySchedule>()
            .init_resource::<RollSummary>()
            .init_resource::<ToastState>()
            .add_message::<DiceAction>()
            .add_message::<ToastMessage>()
            .add_systems(
                Startup,
                (
                    register_engine,
                    create_scene,
                    setup_control_panel,
                    start_dice_asset_load,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    enable_physics,
                    setup_camera,
                    build_environment,
                    poll_dice_asset_load,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (camera_pointer_input, camera_wheel_zoom, apply_orbit_camera).chain(),
            )
            .add_systems(
                Update,
                (
                    tick_roll_summary,
                    handle_control_buttons,
                    keyboard_shortcuts,
                    handle_dice_actions,
                    reconcile_dice_population,
                    persist_dice_count,
                )
                    .chain()
                    .after(camera_pointer_input)
                    .after(poll_dice_asset_load),
            )
            .add_systems(
                Update,
                (
                    update_dice_count_text,
                    show_toasts,
                    expire_toast,
                    update_fps_text,
                )
                    .after(handle_dice_actions),
            )
            .add_systems(Last, release_engine_on_exit);
    }
}
