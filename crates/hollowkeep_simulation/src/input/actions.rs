//! Player actions (input → simulation)
//!
//! Input collaborator (клавиатура, геймпад, UI) переводит сырой ввод в
//! `PlayerAction` и пишет события. Каждое действие адресовано конкретному игроку.

use bevy::prelude::*;

/// Дискретное действие игрока
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PlayerAction {
    pub player: Entity,
    pub kind: ActionKind,
}

impl PlayerAction {
    pub fn new(player: Entity, kind: ActionKind) -> Self {
        Self { player, kind }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionKind {
    /// Intent движения (x = strafe, y = forward), держится до следующего Move
    Move(Vec2),
    CrouchToggle,
    RunToggle,
    JumpPressed,
    /// Клик по объекту под прицелом (None — в пустоту)
    ClickPrimary { target: Option<Entity> },
    /// Альтернативное действие предмета в руке (фонарик вкл/выкл)
    ClickAlternate,
    Equip { target: Entity },
    Drop,
    Throw,
    /// Колесо мыши
    Scroll(f32),
    /// Hotkey слота
    SelectSlot(usize),
    /// Что сейчас под прицелом
    Focus(Option<Entity>),
}

/// Включить/выключить приём ввода (катсцены, меню, смерть)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetInputEnabled {
    pub player: Entity,
    pub enabled: bool,
}

/// Gate ввода: пока выключен, все `PlayerAction` отбрасываются
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct InputGate {
    pub enabled: bool,
}

impl Default for InputGate {
    fn default() -> Self {
        Self { enabled: true }
    }
}
