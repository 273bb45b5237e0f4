//! Player facade — spawn, read API, session report
//!
//! Игрок — обычный entity: `Player` marker тянет tuning-независимые компоненты
//! (Required Components), `spawn_player` кладёт всё, что зависит от `PlayerConfig`,
//! и создаёт child entities слотов руки.

use bevy::prelude::*;

use crate::components::{HandSlot, Health, Hotbar, MovementStats, Player, PlayerHand, RigBlendWeight, Stamina};
use crate::config::PlayerConfig;
use crate::equipment::SessionTeardown;
use crate::feedback::{noise_radius_for, FootstepTracker, NoiseEmitter};
use crate::health::HealthRegen;
use crate::movement::{GameStats, LocomotionMachine, MovementState};
use crate::{log, log_info, log_warning, PlayerSet};

/// Спавн игрока со всеми компонентами + HandSlot children (слот 0 видим)
pub fn spawn_player(commands: &mut Commands, config: &PlayerConfig, position: Vec3) -> Entity {
    let player = commands
        .spawn((
            Player,
            Transform::from_translation(position),
            LocomotionMachine::new(config.movement.clone(), &config.stamina),
            Stamina::from_config(&config.stamina),
            Health::new(config.health.max),
            HealthRegen::from_config(&config.health),
            Hotbar::new(config.hotbar.slot_count),
            RigBlendWeight::new(config.hotbar.rig_steps, config.hotbar.rig_step_interval),
            NoiseEmitter::persistent(noise_radius_for(MovementState::Idle, &config.noise)),
        ))
        .id();

    let anchor = config.hotbar.hand_anchor();
    let slot_count = config.hotbar.slot_count.max(1);
    let mut slots = Vec::with_capacity(slot_count);

    for index in 0..slot_count {
        let slot = commands
            .spawn((
                HandSlot {
                    owner: player,
                    index,
                    visible: index == 0,
                },
                Transform::from_translation(anchor),
            ))
            .id();
        commands.entity(player).add_child(slot);
        slots.push(slot);
    }

    commands.entity(player).insert(PlayerHand {
        slots,
        anchor_offset: anchor,
    });

    log(&format!("🧍 Player {:?} spawned at {:?} ({} hotbar slots)", player, position, slot_count));

    player
}

// ============================================================================
// Read API
// ============================================================================

/// Снимок состояния игрока для HUD / тестов
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerSnapshot {
    pub state: MovementState,
    pub stamina: f32,
    pub max_stamina: f32,
    pub fatigued: bool,
    pub active_slot: usize,
    pub equipped_item: Option<Entity>,
    pub rig_weight: f32,
    pub health: u32,
}

impl PlayerSnapshot {
    /// None если entity не игрок (нет нужных компонентов)
    pub fn capture(world: &World, player: Entity) -> Option<Self> {
        let machine = world.get::<LocomotionMachine>(player)?;
        let stamina = world.get::<Stamina>(player)?;
        let hotbar = world.get::<Hotbar>(player)?;
        let rig = world.get::<RigBlendWeight>(player)?;
        let health = world.get::<Health>(player)?;

        Some(Self {
            state: machine.state(),
            stamina: stamina.current(),
            max_stamina: stamina.max(),
            fatigued: stamina.is_fatigued(),
            active_slot: hotbar.active_index(),
            equipped_item: hotbar.active_item().map(|held| held.entity),
            rig_weight: rig.weight(),
            health: health.current(),
        })
    }
}

// ============================================================================
// Session report
// ============================================================================

#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct SessionStats {
    pub player: Entity,
    pub stats: GameStats,
}

pub fn publish_session_stats(
    mut teardown: EventReader<SessionTeardown>,
    players: Query<(&MovementStats, &LocomotionMachine, &FootstepTracker)>,
    mut reports: EventWriter<SessionStats>,
) {
    for event in teardown.read() {
        let Ok((stats, machine, footsteps)) = players.get(event.player) else {
            continue;
        };

        let stats = GameStats::collect(stats, machine, footsteps);
        match stats.to_json() {
            Ok(json) => log_info(&format!("📊 {:?} session stats: {}", event.player, json)),
            Err(err) => log_warning(&format!("📊 {:?} stats not serializable: {}", event.player, err)),
        }

        reports.write(SessionStats {
            player: event.player,
            stats,
        });
    }
}

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<SessionStats>()
            .add_systems(FixedUpdate, publish_session_stats.in_set(PlayerSet::Feedback));
    }
}
