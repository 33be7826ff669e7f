//! Dice action handlers
//!
//! Consumes [`DiceAction`] messages: shake, relocate, and count changes. The
//! face-value summary runs from the debounced schedule.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::dice3d::types::*;

/// Apply every queued action in order.
pub fn handle_dice_actions(
    mut actions: MessageReader<DiceAction>,
    config: Res<ShakerConfig>,
    roster: Res<DiceRoster>,
    mut desired: ResMut<DesiredDiceCount>,
    mut schedule: ResMut<SummarySchedule>,
    mut dice: Query<(&mut Transform, &mut Velocity, &mut ExternalImpulse), With<DiceInstance>>,
    mut toasts: MessageWriter<ToastMessage>,
) {
    for action in actions.read() {
        match action {
            DiceAction::Shake => {
                let mut rng = rand::thread_rng();
                for (_, entity) in roster.iter() {
                    if let Ok((_, _, mut impulse)) = dice.get_mut(entity) {
                        // Applied at the body's own position, so no torque.
                        impulse.impulse += shake_impulse(&mut rng, config.shake_force);
                    }
                }
                schedule.0.schedule();
            }
            DiceAction::Relocate => {
                for (index, entity) in roster.iter() {
                    if let Ok((mut transform, mut velocity, mut impulse)) = dice.get_mut(entity) {
                        transform.translation = seed_position(index);
                        *velocity = Velocity::zero();
                        *impulse = ExternalImpulse::default();
                    }
                }
                info!("Relocated {} dice", roster.len());
            }
            DiceAction::IncreaseCount | DiceAction::DecreaseCount => {
                let mut next = *desired;
                let result = if *action == DiceAction::IncreaseCount {
                    next.increase()
                } else {
                    next.decrease()
                };
                match result {
                    Ok(count) => {
                        *desired = next;
                        info!("Desired dice count set to {}", count);
                    }
                    Err(limit) => {
                        let message = limit.message();
                        warn!("{}", message);
                        toasts.write(ToastMessage::warning(message));
                    }
                }
            }
        }
    }
}

/// Fire the face-value summary once the debounce delay has passed.
pub fn tick_roll_summary(
    time: Res<Time>,
    mut schedule: ResMut<SummarySchedule>,
    roster: Res<DiceRoster>,
    dice: Query<&Transform, With<DiceInstance>>,
    mut summary: ResMut<RollSummary>,
    mut toasts: MessageWriter<ToastMessage>,
) {
    if !schedule.0.is_pending() || !schedule.0.tick(time.delta()) {
        return;
    }

    *summary = summarize_roster(&roster, |entity| {
        dice.get(entity).ok().map(|transform| transform.rotation)
    });
    info!("Roll summary: {}", summary.describe());
    toasts.write(ToastMessage::info(format!("Total: {}", summary.total)));
}
