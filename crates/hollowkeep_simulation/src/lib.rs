//! HOLLOWKEEP Player Simulation Core
//!
//! ECS-симуляция игрока на Bevy 0.16 (headless, FixedUpdate 60Hz)
//!
//! Архитектура:
//! - ECS = player model (locomotion, stamina, hotbar, health, feedback)
//! - Коллабораторы (engine/physics/audio) = grounding, foot contacts, ввод, воспроизведение
//!
//! Порядок тика: `PlayerSet::Input → Locomotion → Equipment → Feedback`

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod components;
pub mod config;
pub mod equipment;
pub mod error;
pub mod feedback;
pub mod health;
pub mod input;
pub mod logger;
pub mod movement;
pub mod player;

// Re-export базовых типов для удобства
pub use components::*;
pub use config::PlayerConfig;
pub use equipment::{EquipmentPlugin, HotbarScrolled, ItemPickedUp, ItemRemoved, SessionTeardown};
pub use error::{escalate, ConfigError, PlayerError, PlayerResult};
pub use feedback::{AudioCue, CueKind, FeedbackPlugin, Foot, FootContact, FootContactKind, NoiseRadiusChanged};
pub use health::{HealthChanged, HealthPlugin, SetPlayerHealth};
pub use input::{ActionKind, InputPlugin, PlayerAction, SetInputEnabled};
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_log_level, LogLevel, LogPrinter};
pub use movement::{MovementPlugin, MovementState, MovementStateChanged, PlayerFatigued, StaminaChanged};
pub use player::{spawn_player, PlayerPlugin, PlayerSnapshot, SessionStats};

/// Стадии тика игрока (FixedUpdate, строго по порядку)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerSet {
    /// PlayerAction / SetInputEnabled → компоненты
    Input,
    /// Jump recovery, гравитация, stamina, переходы состояния
    Locomotion,
    /// Rig ramps, swap sequences, equip lock
    Equipment,
    /// Audio cues, noise, footsteps, health, отчёты
    Feedback,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Детерминистичный RNG (seed по умолчанию, если create_headless_app не задал свой)
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .init_resource::<PlayerConfig>()
            .configure_sets(
                FixedUpdate,
                (
                    PlayerSet::Input,
                    PlayerSet::Locomotion,
                    PlayerSet::Equipment,
                    PlayerSet::Feedback,
                )
                    .chain(),
            )
            .add_plugins((
                InputPlugin,
                MovementPlugin,
                EquipmentPlugin,
                HealthPlugin,
                FeedbackPlugin,
                PlayerPlugin,
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции.
///
/// Время двигается вручную на 1/60 сек за `app.update()` → один fixed tick на update.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(60.0))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / 60.0)));

    app
}
