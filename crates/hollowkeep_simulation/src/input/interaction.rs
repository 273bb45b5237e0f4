//! Interaction: клики по объектам, hover focus, toggle предметов
//!
//! # Flow
//! - `ClickPrimary { target }` → объект под прицелом (нужен `Interactable`)
//! - `ClickAlternate` → предмет в руке (toggle только если он equipped)
//! - `Focus(target)` → edge-triggered HoverStarted / HoverEnded

use bevy::prelude::*;

use crate::components::{Hotbar, Interactable, Item};
use crate::error::{escalate, PlayerError};
use crate::input::{ActionKind, InputGate, PlayerAction};
use crate::log;

/// Текущий объект под прицелом
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct InteractionFocus {
    target: Option<Entity>,
}

impl InteractionFocus {
    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    /// Новый focus. Возвращает (ended, started) — только реальные изменения.
    pub fn set(&mut self, target: Option<Entity>) -> (Option<Entity>, Option<Entity>) {
        if self.target == target {
            return (None, None);
        }

        let previous = std::mem::replace(&mut self.target, target);
        (previous, target)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum InteractionMethod {
    Click,
    ClickAlternate,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionPerformed {
    pub player: Entity,
    pub target: Entity,
    pub method: InteractionMethod,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemToggled {
    pub item: Entity,
    pub enabled: bool,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverStarted {
    pub player: Entity,
    pub target: Entity,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoverEnded {
    pub player: Entity,
    pub target: Entity,
}

pub fn process_interactions(
    mut actions: EventReader<PlayerAction>,
    players: Query<(&Hotbar, &InputGate)>,
    mut targets: Query<(&Interactable, Option<&mut Item>)>,
    mut performed: EventWriter<InteractionPerformed>,
    mut toggled: EventWriter<ItemToggled>,
) {
    for action in actions.read() {
        let (target, method) = match action.kind {
            ActionKind::ClickPrimary { target: Some(target) } => (target, InteractionMethod::Click),
            ActionKind::ClickAlternate => {
                let Ok((hotbar, _)) = players.get(action.player) else {
                    continue;
                };
                let Some(held) = hotbar.active_item() else {
                    continue;
                };
                (held.entity, InteractionMethod::ClickAlternate)
            }
            _ => continue,
        };

        let Ok((_, gate)) = players.get(action.player) else {
            continue;
        };
        if !gate.enabled {
            continue;
        }

        let Ok((interactable, item)) = targets.get_mut(target) else {
            escalate(PlayerError::MissingCapability {
                entity: target,
                capability: "Interactable",
            });
            continue;
        };
        if !interactable.enabled {
            continue;
        }

        performed.write(InteractionPerformed {
            player: action.player,
            target,
            method,
        });

        let Some(mut item) = item else {
            continue;
        };
        // Alternate действует только на предмет в руке
        if method == InteractionMethod::ClickAlternate && !item.equipped {
            continue;
        }

        let enabled = item.toggle();
        toggled.write(ItemToggled { item: target, enabled });
        log(&format!(
            "💡 {:?} {} {} ({:?})",
            action.player,
            item.name,
            if enabled { "on" } else { "off" },
            method
        ));
    }
}

pub fn update_focus(
    mut actions: EventReader<PlayerAction>,
    mut players: Query<(&mut InteractionFocus, &InputGate)>,
    mut started: EventWriter<HoverStarted>,
    mut ended: EventWriter<HoverEnded>,
) {
    for action in actions.read() {
        let ActionKind::Focus(target) = action.kind else {
            continue;
        };
        let Ok((mut focus, gate)) = players.get_mut(action.player) else {
            continue;
        };
        if !gate.enabled {
            continue;
        }

        let (previous, current) = focus.set(target);
        if let Some(previous) = previous {
            ended.write(HoverEnded {
                player: action.player,
                target: previous,
            });
        }
        if let Some(current) = current {
            started.write(HoverStarted {
                player: action.player,
                target: current,
            });
        }
    }
}
