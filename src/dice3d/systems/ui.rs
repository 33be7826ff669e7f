//! Control panel, labels, and toasts

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use super::input::button_color;
use crate::dice3d::types::*;

/// Spawn the bottom control panel, the count label, the toast line, and
/// the optional FPS counter.
pub fn setup_control_panel(
    mut commands: Commands,
    config: Res<ShakerConfig>,
    desired: Res<DesiredDiceCount>,
) {
    commands
        .spawn((
            Name::new("controlPanel"),
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(24.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                column_gap: Val::Px(12.0),
                ..default()
            },
        ))
        .with_children(|panel| {
            for button in ControlButton::ALL {
                if button == ControlButton::Relocate {
                    panel.spawn((
                        Text::new(count_label(desired.get())),
                        TextFont {
                            font_size: 22.0,
                            ..default()
                        },
                        TextColor(Color::WHITE),
                        DiceCountText,
                    ));
                }
                panel
                    .spawn((
                        Button,
                        Node {
                            min_width: Val::Px(64.0),
                            height: Val::Px(48.0),
                            padding: UiRect::horizontal(Val::Px(16.0)),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            ..default()
                        },
                        BackgroundColor(button_color(Interaction::None)),
                        button,
                    ))
                    .with_children(|b| {
                        b.spawn((
                            Text::new(button.label()),
                            TextFont {
                                font_size: 24.0,
                                ..default()
                            },
                            TextColor(Color::WHITE),
                        ));
                    });
            }
        });

    commands
        .spawn((
            Name::new("toastArea"),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(24.0),
                width: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
        ))
        .with_children(|area| {
            area.spawn((
                Text::new(""),
                TextFont {
                    font_size: 28.0,
                    ..default()
                },
                TextColor(ToastLevel::Info.color()),
                ToastText,
            ));
        });

    if config.show_fps {
        commands.spawn((
            Name::new("fps"),
            Text::new("FPS: --"),
            TextFont {
                font_size: 16.0,
                ..default()
            },
            TextColor(Color::srgb(0.7, 1.0, 0.7)),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(8.0),
                left: Val::Px(8.0),
                ..default()
            },
            FpsText,
        ));
    }
}

fn count_label(count: usize) -> String {
    format!("Dice: {}", count)
}

pub fn update_dice_count_text(
    desired: Res<DesiredDiceCount>,
    mut labels: Query<&mut Text, With<DiceCountText>>,
) {
    if !desired.is_changed() {
        return;
    }
    for mut text in labels.iter_mut() {
        text.0 = count_label(desired.get());
    }
}

/// Show the newest toast; it replaces whatever is on screen.
pub fn show_toasts(
    mut messages: MessageReader<ToastMessage>,
    mut state: ResMut<ToastState>,
    mut labels: Query<(&mut Text, &mut TextColor), With<ToastText>>,
) {
    let Some(latest) = messages.read().last().cloned() else {
        return;
    };

    for (mut text, mut color) in labels.iter_mut() {
        text.0 = latest.text.clone();
        color.0 = latest.level.color();
    }
    state.timer = Some(Timer::new(TOAST_DURATION, TimerMode::Once));
}

pub fn expire_toast(
    time: Res<Time>,
    mut state: ResMut<ToastState>,
    mut labels: Query<&mut Text, With<ToastText>>,
) {
    let Some(timer) = state.timer.as_mut() else {
        return;
    };
    if !timer.tick(time.delta()).just_finished() {
        return;
    }

    state.timer = None;
    for mut text in labels.iter_mut() {
        text.0.clear();
    }
}

pub fn update_fps_text(
    diagnostics: Option<Res<DiagnosticsStore>>,
    mut labels: Query<&mut Text, With<FpsText>>,
) {
    let Some(diagnostics) = diagnostics else {
        return;
    };
    let Some(fps) = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
    else {
        return;
    };
    for mut text in labels.iter_mut() {
        text.0 = format!("FPS: {:.0}", fps);
    }
}
