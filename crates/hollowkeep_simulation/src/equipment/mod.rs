//! Equipment domain — hotbar, swap sequence, rig ramps
//!
//! # Архитектура
//!
//! **Components** (`crate::components`): Hotbar, RigBlendWeight, HandSlot, PlayerHand
//! **Swap** (`swap`): HotbarSwap — multi-frame sequence смены слота
//! **Events** (`events`): ItemPickedUp, ItemRemoved, HotbarScrolled, SessionTeardown
//! **Systems** (`systems`): обработка actions + продвижение ramps/swap/locks

use bevy::prelude::*;

pub mod events;
pub mod swap;
pub mod systems;

pub use events::*;
pub use swap::*;
pub use systems::*;

use crate::PlayerSet;

/// Equipment Plugin
///
/// Input stage: equip/drop/throw, scroll/select, teardown.
/// Equipment stage: rig ramps → swap sequences → equip lock release.
pub struct EquipmentPlugin;

impl Plugin for EquipmentPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ItemPickedUp>()
            .add_event::<ItemRemoved>()
            .add_event::<HotbarScrolled>()
            .add_event::<SessionTeardown>()
            .add_systems(
                FixedUpdate,
                (process_item_actions, process_hotbar_actions, remove_all_on_teardown)
                    .chain()
                    .in_set(PlayerSet::Input),
            )
            .add_systems(
                FixedUpdate,
                (advance_rig_ramps, advance_swap_sequences, release_equip_locks)
                    .chain()
                    .in_set(PlayerSet::Equipment),
            );
    }
}
