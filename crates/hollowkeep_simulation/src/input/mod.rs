//! Input domain — PlayerAction events → player components
//!
//! # Архитектура
//!
//! **Actions** (`actions`): PlayerAction, ActionKind, SetInputEnabled, InputGate
//! **Systems** (`systems`): gate + locomotion toggles
//! **Interaction** (`interaction`): click / alternate click / hover focus
//!
//! Equip/Drop/Throw/Scroll/SelectSlot обрабатывает equipment domain
//! (тот же PlayerSet::Input, после gate).

use bevy::prelude::*;

pub mod actions;
pub mod interaction;
pub mod systems;

pub use actions::*;
pub use interaction::*;
pub use systems::*;

use crate::equipment::{process_hotbar_actions, process_item_actions};
use crate::PlayerSet;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerAction>()
            .add_event::<SetInputEnabled>()
            .add_event::<InteractionPerformed>()
            .add_event::<ItemToggled>()
            .add_event::<HoverStarted>()
            .add_event::<HoverEnded>()
            .add_systems(
                FixedUpdate,
                (apply_input_gate, apply_locomotion_actions, process_interactions, update_focus)
                    .chain()
                    .before(process_item_actions)
                    .before(process_hotbar_actions)
                    .in_set(PlayerSet::Input),
            );
    }
}
