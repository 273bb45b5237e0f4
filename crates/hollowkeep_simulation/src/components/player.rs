//! Player control marker component

use bevy::prelude::Component;

use crate::components::{AnimationParams, CharacterMotion, Grounding, LocomotionInput, MovementStats};

/// Marker component для player-controlled entity
///
/// Через Required Components добавляет всё, что не зависит от tuning:
/// ввод, grounding, выход для character controller, gate ввода, focus.
/// Tuning-зависимые компоненты (Stamina, LocomotionMachine, Hotbar, ...)
/// кладёт `spawn_player`.
///
/// # Single-player
/// Обычно только один entity имеет этот компонент, но системы не полагаются на это:
/// каждое событие адресовано конкретному entity.
#[derive(Component, Debug, Clone, Copy, Default)]
#[require(
    LocomotionInput,
    Grounding,
    CharacterMotion,
    AnimationParams,
    MovementStats,
    crate::equipment::HotbarSwap,
    crate::feedback::FootstepTracker,
    crate::feedback::NoiseEmitter,
    crate::input::InputGate,
    crate::input::InteractionFocus
)]
pub struct Player;
