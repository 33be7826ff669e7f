//! UI-related types and components
//!
//! Control panel buttons, labels, and the toast notification.

use bevy::prelude::*;
use std::time::Duration;

use super::actions::DiceAction;

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Control panel button
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlButton {
    Decrease,
    Increase,
    Relocate,
    Shake,
}

impl ControlButton {
    pub const ALL: [ControlButton; 4] = [
        ControlButton::Decrease,
        ControlButton::Increase,
        ControlButton::Relocate,
        ControlButton::Shake,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ControlButton::Decrease => "-",
            ControlButton::Increase => "+",
            ControlButton::Relocate => "Reset",
            ControlButton::Shake => "Shake",
        }
    }

    pub fn action(&self) -> DiceAction {
        match self {
            ControlButton::Decrease => DiceAction::DecreaseCount,
            ControlButton::Increase => DiceAction::IncreaseCount,
            ControlButton::Relocate => DiceAction::Relocate,
            ControlButton::Shake => DiceAction::Shake,
        }
    }
}

/// Label showing the desired dice count
#[derive(Component)]
pub struct DiceCountText;

/// Frame rate label (only spawned with `--show-fps`)
#[derive(Component)]
pub struct FpsText;

/// Toast label
#[derive(Component)]
pub struct ToastText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
}

impl ToastLevel {
    pub fn color(&self) -> Color {
        match self {
            ToastLevel::Info => Color::srgb(0.9, 0.95, 1.0),
            ToastLevel::Warning => Color::srgb(1.0, 0.75, 0.3),
        }
    }
}

/// Transient notification request
#[derive(Message, Debug, Clone, PartialEq)]
pub struct ToastMessage {
    pub text: String,
    pub level: ToastLevel,
}

impl ToastMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: ToastLevel::Info,
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            level: ToastLevel::Warning,
        }
    }
}

/// Expiry of the visible toast, if any
#[derive(Resource, Default)]
pub struct ToastState {
    pub timer: Option<Timer>,
}
