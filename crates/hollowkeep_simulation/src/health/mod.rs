//! Health domain — clamped health + delayed regeneration
//!
//! # Flow
//! 1. `SetPlayerHealth` → clamp в [0, max] → `HealthChanged`
//! 2. регенерация отменяется и (если жив) запускается заново
//! 3. `regen_delay` сек ожидания → +`regen_amount` каждые `regen_interval` до max

use bevy::prelude::*;

use crate::components::Health;
use crate::config::HealthConfig;
use crate::{log, PlayerSet};

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum RegenPhase {
    /// Ожидание перед первым шагом (осталось сек)
    Waiting(f32),
    /// Идут шаги (до следующего сек)
    Ticking(f32),
}

#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HealthRegen {
    phase: Option<RegenPhase>,
    delay: f32,
    interval: f32,
    amount: u32,
}

impl Default for HealthRegen {
    fn default() -> Self {
        Self::from_config(&HealthConfig::default())
    }
}

impl HealthRegen {
    pub fn from_config(config: &HealthConfig) -> Self {
        Self {
            phase: None,
            delay: config.regen_delay,
            interval: config.regen_interval.max(1e-3),
            amount: config.regen_amount,
        }
    }

    pub fn phase(&self) -> Option<RegenPhase> {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase.is_some()
    }

    pub fn restart(&mut self) {
        self.phase = Some(RegenPhase::Waiting(self.delay));
    }

    pub fn cancel(&mut self) {
        self.phase = None;
    }

    /// Продвинуть sequence. Возвращает сколько HP добавлено на этом тике.
    pub fn tick(&mut self, delta_time: f32, health: &mut Health) -> u32 {
        let Some(phase) = self.phase else {
            return 0;
        };

        let mut until_next = match phase {
            RegenPhase::Waiting(remaining) => {
                let remaining = remaining - delta_time;
                if remaining > 0.0 {
                    self.phase = Some(RegenPhase::Waiting(remaining));
                    return 0;
                }
                // Первый шаг сразу по окончании ожидания
                remaining
            }
            RegenPhase::Ticking(remaining) => remaining - delta_time,
        };

        let mut healed = 0;
        while until_next <= 0.0 && !health.is_full() {
            healed += health.heal(self.amount);
            until_next += self.interval;
        }

        self.phase = if health.is_full() {
            None
        } else {
            Some(RegenPhase::Ticking(until_next))
        };

        healed
    }
}

// ============================================================================
// Events
// ============================================================================

/// Запрос: установить здоровье (урон/лечение снаружи)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetPlayerHealth {
    pub player: Entity,
    pub value: i64,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthChanged {
    pub player: Entity,
    pub current: u32,
    pub max: u32,
}

// ============================================================================
// Systems
// ============================================================================

pub fn apply_health_changes(
    mut requests: EventReader<SetPlayerHealth>,
    mut players: Query<(&mut Health, &mut HealthRegen)>,
    mut changed: EventWriter<HealthChanged>,
) {
    for request in requests.read() {
        let Ok((mut health, mut regen)) = players.get_mut(request.player) else {
            continue;
        };

        health.set_clamped(request.value);
        changed.write(HealthChanged {
            player: request.player,
            current: health.current(),
            max: health.max(),
        });

        regen.cancel();
        if health.is_alive() {
            regen.restart();
        } else {
            log(&format!("💀 {:?} health reached 0", request.player));
        }
    }
}

pub fn tick_health_regen(
    time: Res<Time<Fixed>>,
    mut players: Query<(Entity, &mut Health, &mut HealthRegen)>,
    mut changed: EventWriter<HealthChanged>,
) {
    let delta = time.delta_secs();

    for (entity, mut health, mut regen) in players.iter_mut() {
        if !regen.is_active() {
            continue;
        }

        if regen.tick(delta, &mut health) > 0 {
            changed.write(HealthChanged {
                player: entity,
                current: health.current(),
                max: health.max(),
            });
        }
    }
}

pub struct HealthPlugin;

impl Plugin for HealthPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SetPlayerHealth>()
            .add_event::<HealthChanged>()
            .add_systems(
                FixedUpdate,
                (apply_health_changes, tick_health_regen).chain().in_set(PlayerSet::Feedback),
            );
    }
}
