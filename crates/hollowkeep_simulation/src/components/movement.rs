//! Movement компоненты: сырой ввод, grounding, выход для character controller

use bevy::prelude::*;

/// Ввод движения игрока (пишут input системы из `PlayerAction`)
///
/// - `intent` — ось движения (x = strafe, y = forward), каждый кадр
/// - `wants_crouch` / `wants_run` — toggle'ы (переключаются discrete событиями)
/// - `jump_requested` — one-shot, сбрасывается после evaluation
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct LocomotionInput {
    pub intent: Vec2,
    pub wants_crouch: bool,
    pub wants_run: bool,
    pub jump_requested: bool,
    /// Горизонтальная ось "right" камеры в world space (пишет camera layer)
    pub camera_right: Vec3,
}

impl Default for LocomotionInput {
    fn default() -> Self {
        Self {
            intent: Vec2::ZERO,
            wants_crouch: false,
            wants_run: false,
            jump_requested: false,
            camera_right: Vec3::X,
        }
    }
}

/// Контакт с землёй (пишет physics layer: raycast вниз от ног)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Grounding {
    pub grounded: bool,
    pub gravity: Vec3,
}

impl Default for Grounding {
    fn default() -> Self {
        Self {
            grounded: true,
            gravity: Vec3::new(0.0, -9.81, 0.0),
        }
    }
}

/// Желаемая скорость персонажа (читает character controller)
///
/// velocity = camera-relative planar intent × speed + vertical
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct CharacterMotion {
    pub velocity: Vec3,
}

/// Параметры для AnimationTree (blend + флаги)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct AnimationParams {
    /// Сглаженный forward blend [-1, 1]
    pub forward: f32,
    /// Сглаженный sideways blend [-1, 1]
    pub sideways: f32,
    pub crouched: bool,
    pub running: bool,
    pub jumping: bool,
    pub grounded: bool,
}

/// Накопленное время по режимам движения (сек)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MovementStats {
    pub walk_time: f32,
    pub run_time: f32,
    pub crouch_time: f32,
}
