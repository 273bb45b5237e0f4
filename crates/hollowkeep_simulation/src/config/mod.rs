//! Tuning игрока (внешняя конфигурация)
//!
//! Все числа — opaque параметры геймдизайна. Default = тюнинг из оригинальной игры.
//! `spawn_player` копирует per-entity параметры в компоненты; глобальные
//! (импульсы, радиусы шума, pitch) системы читают из `Res<PlayerConfig>`.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub movement: MovementConfig,
    pub stamina: StaminaConfig,
    pub hotbar: HotbarConfig,
    pub health: HealthConfig,
    pub noise: NoiseConfig,
    pub feedback: FeedbackConfig,
    /// Максимальная дистанция до item для Equip
    pub interact_range: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            movement: MovementConfig::default(),
            stamina: StaminaConfig::default(),
            hotbar: HotbarConfig::default(),
            health: HealthConfig::default(),
            noise: NoiseConfig::default(),
            feedback: FeedbackConfig::default(),
            interact_range: 3.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Reflect)]
#[serde(default)]
pub struct MovementConfig {
    pub walk_speed: f32,
    pub crouch_speed: f32,
    pub run_speed: f32,
    pub jump_height: f32,
    /// Окно "jump in progress" после отрыва (сек)
    pub jump_recovery_delay: f32,
    /// Скорость сглаживания blend-параметров анимации (1/сек)
    pub animation_damping: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 2.0,
            crouch_speed: 1.0,
            run_speed: 4.0,
            jump_height: 0.6,
            jump_recovery_delay: 0.5,
            animation_damping: 10.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaminaConfig {
    pub max: f32,
    /// Расход в секунду бега
    pub run_cost: f32,
    pub jump_cost: f32,
    pub fatigue_duration: f32,
    pub regen_rate: f32,
    /// Сбрасывать run toggle при fatigue (gamepad схема)
    pub release_run_on_fatigue: bool,
}

impl Default for StaminaConfig {
    fn default() -> Self {
        Self {
            max: 50.0,
            run_cost: 10.0,
            jump_cost: 10.0,
            fatigue_duration: 3.0,
            regen_rate: 1.0,
            release_run_on_fatigue: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotbarConfig {
    pub slot_count: usize,
    pub rig_steps: u32,
    pub rig_step_interval: f32,
    /// Пауза swap'а когда новый слот пустой (сек)
    pub swap_settle_delay: f32,
    pub drop_impulse: f32,
    pub throw_impulse: f32,
    /// Точка руки относительно игрока [x, y, z] (drop/throw spawn)
    pub hand_anchor_offset: [f32; 3],
}

impl Default for HotbarConfig {
    fn default() -> Self {
        Self {
            slot_count: 4,
            rig_steps: 10,
            rig_step_interval: 0.01,
            swap_settle_delay: 0.05,
            drop_impulse: 2.0,
            throw_impulse: 5.0,
            hand_anchor_offset: [0.3, 1.4, -0.5],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    pub max: u32,
    pub regen_delay: f32,
    pub regen_interval: f32,
    pub regen_amount: u32,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            max: 100,
            regen_delay: 10.0,
            regen_interval: 0.5,
            regen_amount: 1,
        }
    }
}

/// Радиусы "слышимости" для врагов (метры до множителя сложности)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub difficulty_multiplier: f32,
    pub idle: f32,
    pub walking: f32,
    pub crouching: f32,
    pub crouching_idle: f32,
    pub running: f32,
    pub jumping: f32,
    pub falling: f32,
    pub item_toggle: f32,
    pub item_pulse_duration: f32,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            difficulty_multiplier: 1.0,
            idle: 1.0,
            walking: 4.0,
            crouching: 2.5,
            crouching_idle: 0.5,
            running: 7.0,
            jumping: 9.0,
            falling: 6.0,
            item_toggle: 5.0,
            item_pulse_duration: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedbackConfig {
    /// [min, max] pitch для шагов
    pub footstep_pitch: [f32; 2],
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            footstep_pitch: [0.9, 1.1],
        }
    }
}

impl HotbarConfig {
    pub fn hand_anchor(&self) -> Vec3 {
        Vec3::from_array(self.hand_anchor_offset)
    }
}

impl PlayerConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: PlayerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |message: &str| -> Result<(), ConfigError> {
            Err(ConfigError::Invalid(message.to_string()))
        };

        if self.hotbar.slot_count == 0 {
            return invalid("hotbar.slot_count must be at least 1");
        }
        if self.hotbar.rig_steps == 0 {
            return invalid("hotbar.rig_steps must be at least 1");
        }
        if self.hotbar.rig_step_interval <= 0.0 {
            return invalid("hotbar.rig_step_interval must be positive");
        }
        if self.stamina.max <= 0.0 {
            return invalid("stamina.max must be positive");
        }
        if self.stamina.run_cost < 0.0 || self.stamina.jump_cost < 0.0 {
            return invalid("stamina costs must not be negative");
        }
        if self.stamina.regen_rate < 0.0 || self.stamina.fatigue_duration < 0.0 {
            return invalid("stamina regen_rate/fatigue_duration must not be negative");
        }
        if self.health.max == 0 {
            return invalid("health.max must be positive");
        }
        if self.health.regen_interval <= 0.0 {
            return invalid("health.regen_interval must be positive");
        }
        let [pitch_min, pitch_max] = self.feedback.footstep_pitch;
        if pitch_min > pitch_max || pitch_min <= 0.0 {
            return invalid("feedback.footstep_pitch must be a positive [min, max] range");
        }

        Ok(())
    }
}
