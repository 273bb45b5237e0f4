//! World noise radius
//!
//! Радиус, на котором враги "слышат" источник. Геометрия триггера снаружи:
//! здесь только значение и `NoiseRadiusChanged` при реальном изменении.
//!
//! - Игрок: постоянный радиус по текущему MovementState × difficulty multiplier
//! - Предмет: короткий pulse при toggle, потом радиус 0

use bevy::prelude::*;

use crate::config::{NoiseConfig, PlayerConfig};
use crate::input::ItemToggled;
use crate::movement::{MovementState, MovementStateChanged};

#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct NoiseEmitter {
    radius: f32,
    pulse_remaining: Option<f32>,
}

impl NoiseEmitter {
    pub fn persistent(radius: f32) -> Self {
        Self {
            radius,
            pulse_remaining: None,
        }
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn is_pulsing(&self) -> bool {
        self.pulse_remaining.is_some()
    }

    /// true → радиус изменился
    pub fn set_persistent(&mut self, radius: f32) -> bool {
        if self.radius == radius {
            return false;
        }
        self.radius = radius;
        true
    }

    /// Временный радиус. Пока идёт предыдущий pulse — запрос отбрасывается.
    pub fn pulse(&mut self, radius: f32, duration: f32) -> bool {
        if self.pulse_remaining.is_some() {
            return false;
        }
        self.radius = radius;
        self.pulse_remaining = Some(duration);
        true
    }

    /// true → pulse закончился на этом тике (радиус сброшен в 0)
    pub fn tick(&mut self, delta_time: f32) -> bool {
        let Some(remaining) = self.pulse_remaining else {
            return false;
        };

        let remaining = remaining - delta_time;
        if remaining > 0.0 {
            self.pulse_remaining = Some(remaining);
            return false;
        }

        self.pulse_remaining = None;
        self.radius = 0.0;
        true
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct NoiseRadiusChanged {
    pub source: Entity,
    pub radius: f32,
}

pub fn noise_radius_for(state: MovementState, config: &NoiseConfig) -> f32 {
    let base = match state {
        MovementState::Idle => config.idle,
        MovementState::Walking => config.walking,
        MovementState::Crouching => config.crouching,
        MovementState::CrouchingIdle => config.crouching_idle,
        MovementState::Running => config.running,
        MovementState::Jumping => config.jumping,
        MovementState::Falling => config.falling,
    };

    base * config.difficulty_multiplier
}

pub fn update_player_noise(
    mut transitions: EventReader<MovementStateChanged>,
    config: Res<PlayerConfig>,
    mut emitters: Query<&mut NoiseEmitter>,
    mut changed: EventWriter<NoiseRadiusChanged>,
) {
    for transition in transitions.read() {
        let Ok(mut emitter) = emitters.get_mut(transition.entity) else {
            continue;
        };

        let radius = noise_radius_for(transition.to, &config.noise);
        if emitter.set_persistent(radius) {
            changed.write(NoiseRadiusChanged {
                source: transition.entity,
                radius,
            });
        }
    }
}

pub fn tick_noise_pulses(
    time: Res<Time<Fixed>>,
    mut emitters: Query<(Entity, &mut NoiseEmitter)>,
    mut changed: EventWriter<NoiseRadiusChanged>,
) {
    let delta = time.delta_secs();

    for (entity, mut emitter) in emitters.iter_mut() {
        if !emitter.is_pulsing() {
            continue;
        }
        if emitter.tick(delta) {
            changed.write(NoiseRadiusChanged {
                source: entity,
                radius: 0.0,
            });
        }
    }
}

pub fn pulse_toggled_items(
    mut toggled: EventReader<ItemToggled>,
    config: Res<PlayerConfig>,
    mut emitters: Query<&mut NoiseEmitter>,
    mut changed: EventWriter<NoiseRadiusChanged>,
) {
    for event in toggled.read() {
        let Ok(mut emitter) = emitters.get_mut(event.item) else {
            continue;
        };

        let radius = config.noise.item_toggle * config.noise.difficulty_multiplier;
        if emitter.pulse(radius, config.noise.item_pulse_duration) {
            changed.write(NoiseRadiusChanged {
                source: event.item,
                radius,
            });
        }
    }
}
