//! Предметы мира: Item (можно взять в руку), Interactable (можно кликнуть)

use bevy::prelude::*;

/// Capability "с этим можно взаимодействовать" (click / alternate click)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Interactable {
    /// false → клики игнорируются (заблокированная дверь, сломанный фонарь)
    pub enabled: bool,
}

impl Default for Interactable {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Предмет, который игрок может подобрать в hotbar
///
/// `enabled` — состояние самого предмета (фонарик вкл/выкл), переключается
/// взаимодействием. `equipped` — лежит в hotbar игрока.
#[derive(Component, Debug, Clone, PartialEq, Eq, Reflect)]
#[reflect(Component)]
#[require(Interactable, crate::feedback::NoiseEmitter)]
pub struct Item {
    pub name: String,
    pub equipable: bool,
    pub throwable: bool,
    pub equipped: bool,
    pub enabled: bool,
}

impl Item {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            equipable: true,
            throwable: false,
            equipped: false,
            enabled: false,
        }
    }

    pub fn throwable(mut self) -> Self {
        self.throwable = true;
        self
    }

    /// Предмет-декорация: кликается, но в руку не берётся
    pub fn fixed(mut self) -> Self {
        self.equipable = false;
        self
    }

    /// Переключить enabled, вернуть новое состояние
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.enabled
    }
}
