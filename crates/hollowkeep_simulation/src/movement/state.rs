//! Locomotion state machine
//!
//! # Состояния
//! Idle, Walking, Crouching, CrouchingIdle, Running, Jumping, Falling — ровно одно активно.
//! Состояние меняется ТОЛЬКО через `try_transition` (guard + entry effects).
//!
//! # Порядок evaluation (каждый тик)
//! 1. Idle → 2. Walking → 3. Crouching → 4. CrouchingIdle → 5. Running →
//! 6. Jumping (только при jump_requested) → 7. Falling.
//! Каждый кандидат проверяется от текущего состояния; поздний accepted переход
//! перекрывает ранний. Кандидат == текущее состояние → no-op.
//!
//! # Jump in progress
//! После отрыва держим Jumping `jump_recovery_delay` сек: кадры взлёта (ещё
//! grounded) не превращаются обратно в Idle, и отрыв от земли не считается падением.

use bevy::prelude::*;
use std::fmt;

use crate::components::{Grounding, LocomotionInput, Stamina};
use crate::config::{MovementConfig, StaminaConfig};
use crate::error::PlayerError;

/// Вертикальная скорость "прижатия" к земле
pub const GROUND_STICK_VELOCITY: f32 = -1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect)]
pub enum MovementState {
    #[default]
    Idle,
    Walking,
    Crouching,
    CrouchingIdle,
    Running,
    Jumping,
    Falling,
}

impl MovementState {
    pub const ALL: [MovementState; 7] = [
        MovementState::Idle,
        MovementState::Walking,
        MovementState::Crouching,
        MovementState::CrouchingIdle,
        MovementState::Running,
        MovementState::Jumping,
        MovementState::Falling,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MovementState::Idle => "Idle",
            MovementState::Walking => "Walking",
            MovementState::Crouching => "Crouching",
            MovementState::CrouchingIdle => "CrouchingIdle",
            MovementState::Running => "Running",
            MovementState::Jumping => "Jumping",
            MovementState::Falling => "Falling",
        }
    }

    pub fn is_crouched(&self) -> bool {
        matches!(self, MovementState::Crouching | MovementState::CrouchingIdle)
    }
}

impl fmt::Display for MovementState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<MovementState> for u8 {
    fn from(state: MovementState) -> u8 {
        state as u8
    }
}

impl TryFrom<u8> for MovementState {
    type Error = PlayerError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        MovementState::ALL
            .get(value as usize)
            .copied()
            .ok_or(PlayerError::UnknownMovementState(value))
    }
}

/// Снимок входов для guard'ов (один тик)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuardInputs {
    pub grounded: bool,
    pub intent: Vec2,
    pub wants_crouch: bool,
    pub wants_run: bool,
    pub gravity_y: f32,
}

impl GuardInputs {
    pub fn from_components(input: &LocomotionInput, grounding: &Grounding) -> Self {
        Self {
            grounded: grounding.grounded,
            intent: input.intent,
            wants_crouch: input.wants_crouch,
            wants_run: input.wants_run,
            gravity_y: grounding.gravity.y,
        }
    }

    pub fn has_intent(&self) -> bool {
        self.intent != Vec2::ZERO
    }
}

/// Принятый переход (публикуется как MovementStateChanged)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: MovementState,
    pub to: MovementState,
}

/// Результат stamina refresh: переходы + начало fatigue эпизода
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaminaRefresh {
    pub transitions: Vec<Transition>,
    pub fatigue_started: bool,
}

#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct LocomotionMachine {
    state: MovementState,
    is_running: bool,
    jump_in_progress: bool,
    jump_recovery: f32,
    vertical_velocity: f32,
    speed: f32,
    jump_count: u32,
    crouch_count: u32,
    run_cost: f32,
    jump_cost: f32,
    tuning: MovementConfig,
}

impl Default for LocomotionMachine {
    fn default() -> Self {
        Self::new(MovementConfig::default(), &StaminaConfig::default())
    }
}

impl LocomotionMachine {
    pub fn new(tuning: MovementConfig, stamina: &StaminaConfig) -> Self {
        Self {
            state: MovementState::Idle,
            is_running: false,
            jump_in_progress: false,
            jump_recovery: 0.0,
            vertical_velocity: 0.0,
            speed: tuning.walk_speed,
            jump_count: 0,
            crouch_count: 0,
            run_cost: stamina.run_cost,
            jump_cost: stamina.jump_cost,
            tuning,
        }
    }

    pub fn state(&self) -> MovementState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.is_running
    }

    pub fn is_jump_in_progress(&self) -> bool {
        self.jump_in_progress
    }

    pub fn vertical_velocity(&self) -> f32 {
        self.vertical_velocity
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn jump_count(&self) -> u32 {
        self.jump_count
    }

    pub fn crouch_count(&self) -> u32 {
        self.crouch_count
    }

    pub fn jump_cost(&self) -> f32 {
        self.jump_cost
    }

    pub fn tuning(&self) -> &MovementConfig {
        &self.tuning
    }

    pub fn register_crouch(&mut self) {
        self.crouch_count += 1;
    }

    /// Полная evaluation тика в фиксированном порядке
    pub fn evaluate(
        &mut self,
        inputs: &GuardInputs,
        jump_requested: bool,
        stamina: &mut Stamina,
    ) -> Vec<Transition> {
        const GROUNDED_ORDER: [MovementState; 5] = [
            MovementState::Idle,
            MovementState::Walking,
            MovementState::Crouching,
            MovementState::CrouchingIdle,
            MovementState::Running,
        ];

        let mut transitions = Vec::new();

        for candidate in GROUNDED_ORDER {
            transitions.extend(self.try_transition(candidate, inputs, stamina));
        }

        if jump_requested {
            transitions.extend(self.try_transition(MovementState::Jumping, inputs, stamina));
        }

        transitions.extend(self.try_transition(MovementState::Falling, inputs, stamina));

        transitions
    }

    /// Попытка перехода. None → отклонено (или уже в этом состоянии).
    pub fn try_transition(
        &mut self,
        candidate: MovementState,
        inputs: &GuardInputs,
        stamina: &mut Stamina,
    ) -> Option<Transition> {
        if candidate == self.state || !self.guard_allows(candidate, inputs, stamina) {
            return None;
        }

        let transition = Transition {
            from: self.state,
            to: candidate,
        };
        self.state = candidate;
        self.enter(candidate, inputs, stamina);

        Some(transition)
    }

    /// Guard кандидата (без учёта "уже в этом состоянии")
    pub fn guard_allows(&self, candidate: MovementState, inputs: &GuardInputs, stamina: &Stamina) -> bool {
        // Взлёт: держим Jumping до конца recovery
        if self.state == MovementState::Jumping && self.jump_in_progress {
            return false;
        }

        let has_intent = inputs.has_intent();

        match candidate {
            MovementState::Idle => {
                inputs.grounded
                    && !has_intent
                    && !(inputs.wants_crouch && self.state == MovementState::CrouchingIdle)
            }
            MovementState::Walking => {
                inputs.grounded && has_intent && !inputs.wants_crouch && !self.is_running
            }
            MovementState::Crouching => inputs.grounded && inputs.wants_crouch && has_intent,
            MovementState::CrouchingIdle => inputs.grounded && inputs.wants_crouch && !has_intent,
            MovementState::Running => {
                inputs.grounded
                    && inputs.wants_run
                    && !inputs.wants_crouch
                    && has_intent
                    && inputs.intent.y > 0.0
                    && !stamina.is_fatigued()
            }
            MovementState::Jumping => {
                inputs.grounded
                    && !inputs.wants_crouch
                    && !stamina.is_fatigued()
                    && stamina.can_afford(self.jump_cost)
            }
            MovementState::Falling => !inputs.grounded,
        }
    }

    fn enter(&mut self, state: MovementState, inputs: &GuardInputs, stamina: &mut Stamina) {
        match state {
            MovementState::Idle | MovementState::Walking => {
                self.speed = self.tuning.walk_speed;
            }
            MovementState::Crouching | MovementState::CrouchingIdle => {
                // Присед отменяет бег
                self.speed = self.tuning.crouch_speed;
                self.is_running = false;
            }
            MovementState::Running => {
                self.speed = self.tuning.run_speed;
                self.is_running = true;
            }
            MovementState::Jumping => {
                let consumed = stamina.try_consume(self.jump_cost);
                debug_assert!(consumed, "jump guard пропустил без stamina");

                self.jump_in_progress = true;
                self.jump_recovery = self.tuning.jump_recovery_delay;
                self.vertical_velocity +=
                    (self.tuning.jump_height * -3.0 * inputs.gravity_y).max(0.0).sqrt();
                self.jump_count += 1;
            }
            MovementState::Falling => {}
        }
    }

    /// Stamina coupling (до evaluation):
    /// 1. fatigue one-shot → сброс running, попытка Walking
    /// 2. регенерация пока не бежим
    /// 3. fatigue cooldown
    /// 4. бег: потерян forward, снят toggle или присед → Walking, иначе расход
    pub fn refresh_stamina(&mut self, inputs: &GuardInputs, stamina: &mut Stamina, delta_time: f32) -> StaminaRefresh {
        let mut refresh = StaminaRefresh::default();

        if stamina.take_fatigue_event() {
            refresh.fatigue_started = true;
            if self.is_running {
                self.is_running = false;
                refresh
                    .transitions
                    .extend(self.try_transition(MovementState::Walking, inputs, stamina));
            }
        }

        if !self.is_running {
            stamina.regenerate(delta_time);
        }

        stamina.tick(delta_time, self.is_running);

        if self.is_running {
            if inputs.intent.y <= 0.0 || !inputs.wants_run || inputs.wants_crouch {
                self.is_running = false;
                refresh
                    .transitions
                    .extend(self.try_transition(MovementState::Walking, inputs, stamina));
            } else {
                stamina.deplete(self.run_cost * delta_time);
            }
        }

        refresh
    }

    /// Гравитация: на земле без прыжка — прижатие, в воздухе — накопление
    pub fn apply_gravity(&mut self, grounded: bool, gravity_y: f32, delta_time: f32) {
        if grounded && !self.jump_in_progress {
            self.vertical_velocity = GROUND_STICK_VELOCITY;
        } else if !grounded {
            self.vertical_velocity += gravity_y * delta_time;
        }
    }

    /// Отсчёт jump recovery. true → окно закончилось на этом тике.
    pub fn tick_jump_recovery(&mut self, delta_time: f32) -> bool {
        if !self.jump_in_progress {
            return false;
        }

        self.jump_recovery -= delta_time;
        if self.jump_recovery <= 0.0 {
            self.jump_recovery = 0.0;
            self.jump_in_progress = false;
            return true;
        }

        false
    }

    /// Желаемая скорость: planar (camera-relative) × speed + vertical
    pub fn desired_velocity(&self, intent: Vec2, camera_right: Vec3) -> Vec3 {
        planar_direction(intent, camera_right) * self.speed + Vec3::Y * self.vertical_velocity
    }

    #[cfg(test)]
    pub(crate) fn force_state(&mut self, state: MovementState) {
        self.state = state;
    }

    #[cfg(test)]
    pub(crate) fn force_running(&mut self, running: bool) {
        self.is_running = running;
    }
}

/// Intent → направление в мире. forward = up × right (Bevy: right=+X → forward=-Z).
pub fn planar_direction(intent: Vec2, camera_right: Vec3) -> Vec3 {
    let right = Vec3::new(camera_right.x, 0.0, camera_right.z).normalize_or_zero();
    let forward = Vec3::Y.cross(right);

    forward * intent.y + right * intent.x
}
