//! Movement domain — locomotion state machine + stamina coupling
//!
//! # Architecture
//!
//! **Input → State flow:**
//! - input системы пишут `LocomotionInput` (intent, toggles, jump trigger)
//! - physics layer пишет `Grounding`
//! - LocomotionMachine решает состояние через guard'ы, публикует `MovementStateChanged`
//! - `CharacterMotion` / `AnimationParams` — выход для controller и AnimationTree
//!
//! **Stamina coupling:**
//! - бег тратит stamina каждый тик, fatigue выключает бег (one-shot `PlayerFatigued`)

use bevy::prelude::*;

use crate::PlayerSet;

pub mod events;
pub mod state;
pub mod stats;
pub mod systems;

// Re-exports
pub use events::*;
pub use state::*;
pub use stats::*;
pub use systems::*;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod state_tests;

/// Movement plugin (locomotion + stamina)
///
/// Порядок фиксирован: поздние стадии читают флаги (running, grounded),
/// записанные ранними на этом же тике.
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MovementStateChanged>()
            .add_event::<StaminaChanged>()
            .add_event::<PlayerFatigued>()
            .add_systems(
                FixedUpdate,
                (
                    tick_jump_recovery,
                    apply_gravity,
                    update_animation_params,
                    apply_movement,
                    refresh_stamina,
                    evaluate_movement_state,
                    accumulate_movement_stats,
                )
                    .chain()
                    .in_set(PlayerSet::Locomotion),
            );
    }
}
