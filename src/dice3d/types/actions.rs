//! Dice actions and the summary debounce
//!
//! Buttons, keyboard shortcuts, and the camera pointer override all request
//! work by writing a [`DiceAction`].

use bevy::prelude::*;
use rand::Rng;
use std::time::Duration;

/// Delay between the last shake and the face-value summary.
pub const SUMMARY_DELAY: Duration = Duration::from_millis(2000);

/// Requested dice action
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiceAction {
    Shake,
    Relocate,
    IncreaseCount,
    DecreaseCount,
}

/// A cancelable one-shot delay.
///
/// Scheduling while pending restarts the delay from zero, so only the last
/// schedule fires.
#[derive(Debug, Clone)]
pub struct DeferredTask {
    delay: Duration,
    timer: Option<Timer>,
}

impl DeferredTask {
    pub fn new(delay: Duration) -> Self {
        Self { delay, timer: None }
    }

    pub fn schedule(&mut self) {
        self.timer = Some(Timer::new(self.delay, TimerMode::Once));
    }

    pub fn cancel(&mut self) {
        self.timer = None;
    }

    pub fn is_pending(&self) -> bool {
        self.timer.is_some()
    }

    /// Advance by `delta`; returns true exactly once, when the delay elapses.
    pub fn tick(&mut self, delta: Duration) -> bool {
        let Some(timer) = self.timer.as_mut() else {
            return false;
        };
        timer.tick(delta);
        if timer.just_finished() {
            self.timer = None;
            return true;
        }
        false
    }
}

/// Pending face-value summary.
#[derive(Resource, Debug, Clone)]
pub struct SummarySchedule(pub DeferredTask);

impl Default for SummarySchedule {
    fn default() -> Self {
        Self(DeferredTask::new(SUMMARY_DELAY))
    }
}

/// Random shake impulse.
///
/// Each axis is `1 + r * force` with `r` in `[0, 1)`; X and Z flip sign on a
/// coin toss each. The whole vector is then scaled by `force`.
pub fn shake_impulse<R: Rng>(rng: &mut R, force: f32) -> Vec3 {
    let mut axis = || 1.0 + rng.gen::<f32>() * force;
    let mut impulse = Vec3::new(axis(), axis(), axis());
    if rng.gen_bool(0.5) {
        impulse.x = -impulse.x;
    }
    if rng.gen_bool(0.5) {
        impulse.z = -impulse.z;
    }
    impulse * force
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_deferred_task_fires_once() {
        let mut task = DeferredTask::new(Duration::from_millis(2000));
        assert!(!task.tick(Duration::from_millis(5000)));

        task.schedule();
        assert!(task.is_pending());
        assert!(!task.tick(Duration::from_millis(1999)));
        assert!(task.tick(Duration::from_millis(1)));
        assert!(!task.is_pending());
        assert!(!task.tick(Duration::from_millis(2000)));
    }

    #[test]
    fn test_reschedule_restarts_delay() {
        let mut task = DeferredTask::new(Duration::from_millis(2000));
        task.schedule();
        assert!(!task.tick(Duration::from_millis(1500)));

        task.schedule();
        assert!(!task.tick(Duration::from_millis(1500)));
        assert!(task.tick(Duration::from_millis(500)));
    }

    #[test]
    fn test_cancel_prevents_firing() {
        let mut task = DeferredTask::new(Duration::from_millis(100));
        task.schedule();
        task.cancel();
        assert!(!task.tick(Duration::from_millis(200)));
    }

    #[test]
    fn test_shake_impulse_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let force = 3.0;
        let mut saw_negative_x = false;
        let mut saw_positive_x = false;

        for _ in 0..200 {
            let impulse = shake_impulse(&mut rng, force);
            // Y is never flipped.
            assert!(impulse.y >= force && impulse.y <= (1.0 + force) * force);
            for value in [impulse.x.abs(), impulse.z.abs()] {
                assert!(value >= force && value <= (1.0 + force) * force);
            }
            saw_negative_x |= impulse.x < 0.0;
            saw_positive_x |= impulse.x > 0.0;
        }

        assert!(saw_negative_x && saw_positive_x);
    }
}
