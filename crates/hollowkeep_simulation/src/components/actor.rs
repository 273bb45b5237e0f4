//! Ресурсы игрока: Stamina (бег/прыжок + fatigue), Health

use bevy::prelude::*;

use crate::config::{HealthConfig, StaminaConfig};

/// Выносливость игрока
///
/// Инвариант: 0.0 ≤ current ≤ max.
///
/// # Fatigue
/// - `current` дошёл до 0 → `fatigued` немедленно
/// - пока fatigued, `fatigue_timer` растёт до `fatigue_duration`
/// - fatigue снимается только когда таймер дошёл И игрок не бежит
/// - `take_fatigue_event()` true ровно один раз за эпизод (one-shot, re-arm при снятии)
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Stamina {
    current: f32,
    max: f32,
    regen_rate: f32,
    fatigued: bool,
    fatigue_timer: f32,
    fatigue_duration: f32,
    armed: bool,
}

impl Default for Stamina {
    fn default() -> Self {
        Self::from_config(&StaminaConfig::default())
    }
}

impl Stamina {
    pub fn new(max: f32, fatigue_duration: f32) -> Self {
        let max = max.max(0.0);
        Self {
            current: max,
            max,
            regen_rate: 1.0,
            fatigued: false,
            fatigue_timer: 0.0,
            fatigue_duration: fatigue_duration.max(0.0),
            armed: true,
        }
    }

    pub fn from_config(config: &StaminaConfig) -> Self {
        Self::new(config.max, config.fatigue_duration).with_regen_rate(config.regen_rate)
    }

    pub fn with_regen_rate(mut self, regen_rate: f32) -> Self {
        self.regen_rate = regen_rate.max(0.0);
        self
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn regen_rate(&self) -> f32 {
        self.regen_rate
    }

    pub fn fatigue_timer(&self) -> f32 {
        self.fatigue_timer
    }

    pub fn is_fatigued(&self) -> bool {
        self.fatigued
    }

    pub fn can_afford(&self, cost: f32) -> bool {
        self.current >= cost
    }

    /// Списать amount (clamp в 0). Отрицательный amount игнорируется.
    pub fn deplete(&mut self, amount: f32) {
        self.current = (self.current - amount.max(0.0)).max(0.0);
        self.mark_exhaustion();
    }

    /// Списать cost только если хватает. false → ничего не изменилось.
    pub fn try_consume(&mut self, cost: f32) -> bool {
        if cost < 0.0 || !self.can_afford(cost) {
            return false;
        }

        self.current = (self.current - cost).max(0.0);
        self.mark_exhaustion();
        true
    }

    pub fn regenerate(&mut self, delta_time: f32) {
        if self.current < self.max {
            self.current = (self.current + self.regen_rate * delta_time.max(0.0)).min(self.max);
        }
    }

    /// Fatigue cooldown. Возвращает true если fatigue снят на этом тике.
    pub fn tick(&mut self, delta_time: f32, is_running: bool) -> bool {
        if !self.fatigued {
            return false;
        }

        if self.fatigue_timer <= self.fatigue_duration {
            self.fatigue_timer = (self.fatigue_timer + delta_time.max(0.0)).min(self.fatigue_duration);
        }

        if self.fatigue_timer >= self.fatigue_duration && !is_running {
            self.fatigue_timer = 0.0;
            self.fatigued = false;
            self.armed = true;
            return true;
        }

        false
    }

    /// One-shot: true только на первом вызове за эпизод fatigue
    pub fn take_fatigue_event(&mut self) -> bool {
        self.mark_exhaustion();

        if self.fatigued && self.armed {
            self.armed = false;
            return true;
        }

        false
    }

    fn mark_exhaustion(&mut self) {
        if self.current <= 0.0 {
            self.current = 0.0;
            self.fatigued = true;
        }
    }
}

/// Здоровье игрока
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    current: u32,
    max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(HealthConfig::default().max)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }

    /// Установить значение с clamp в [0, max]. true если значение изменилось.
    pub fn set_clamped(&mut self, value: i64) -> bool {
        let clamped = value.clamp(0, self.max as i64) as u32;
        let changed = clamped != self.current;
        self.current = clamped;
        changed
    }

    /// Возвращает сколько реально добавлено
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.current;
        self.current = self.current.saturating_add(amount).min(self.max);
        self.current - before
    }
}
