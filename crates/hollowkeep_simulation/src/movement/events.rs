//! Movement + stamina events (notifications для HUD, audio, noise)

use bevy::prelude::*;

use crate::movement::MovementState;

/// Принятый переход locomotion state (один event на переход)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct MovementStateChanged {
    pub entity: Entity,
    pub from: MovementState,
    pub to: MovementState,
}

/// Stamina изменилась на этом тике (HUD bar)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct StaminaChanged {
    pub entity: Entity,
    pub current: f32,
    pub max: f32,
}

/// Начало fatigue эпизода (ровно один раз за эпизод)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerFatigued {
    pub entity: Entity,
}
