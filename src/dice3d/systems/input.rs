//! Keyboard and button input
//!
//! Both only translate input into [`DiceAction`] messages.

use bevy::prelude::*;

use crate::dice3d::types::*;

const BUTTON_IDLE: Color = Color::srgba(0.12, 0.14, 0.2, 0.85);
const BUTTON_HOVER: Color = Color::srgba(0.2, 0.24, 0.34, 0.9);
const BUTTON_PRESSED: Color = Color::srgba(0.3, 0.45, 0.7, 0.95);

pub fn button_color(interaction: Interaction) -> Color {
    match interaction {
        Interaction::Pressed => BUTTON_PRESSED,
        Interaction::Hovered => BUTTON_HOVER,
        Interaction::None => BUTTON_IDLE,
    }
}

/// Control panel clicks.
pub fn handle_control_buttons(
    mut buttons: Query<
        (&Interaction, &ControlButton, &mut BackgroundColor),
        Changed<Interaction>,
    >,
    mut actions: MessageWriter<DiceAction>,
) {
    for (interaction, button, mut background) in buttons.iter_mut() {
        *background = BackgroundColor(button_color(*interaction));
        if *interaction == Interaction::Pressed {
            actions.write(button.action());
        }
    }
}

/// Space shakes, R resets, +/- change the count.
pub fn keyboard_shortcuts(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut actions: MessageWriter<DiceAction>,
) {
    if keyboard.just_pressed(KeyCode::Space) {
        actions.write(DiceAction::Shake);
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        actions.write(DiceAction::Relocate);
    }
    if keyboard.any_just_pressed([KeyCode::Equal, KeyCode::NumpadAdd]) {
        actions.write(DiceAction::IncreaseCount);
    }
    if keyboard.any_just_pressed([KeyCode::Minus, KeyCode::NumpadSubtract]) {
        actions.write(DiceAction::DecreaseCount);
    }
}
