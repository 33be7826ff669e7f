//! Settings persistence

use bevy::prelude::*;

use crate::dice3d::types::*;

/// Save the desired dice count whenever it changes.
///
/// Storage problems are logged and otherwise ignored.
pub fn persist_dice_count(desired: Res<DesiredDiceCount>, store: Option<Res<SettingsStore>>) {
    if !desired.is_changed() || desired.is_added() {
        return;
    }
    let Some(store) = store else {
        return;
    };

    let settings = ShakerSettings {
        dice_count: desired.get(),
    };
    if let Err(e) = settings.save(&store) {
        warn!("Failed to persist dice count: {}", e);
    }
}
