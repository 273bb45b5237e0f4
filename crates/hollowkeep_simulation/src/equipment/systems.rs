//! Equipment system implementations
//!
//! # Systems
//!
//! **Input stage (PlayerSet::Input):**
//! - `process_item_actions` — equip / drop / throw
//! - `process_hotbar_actions` — scroll / select slot → swap sequence
//! - `remove_all_on_teardown` — все предметы в мир
//!
//! **Progress stage (PlayerSet::Equipment):**
//! - `advance_rig_ramps` — шаги rig weight
//! - `advance_swap_sequences` — lowering → toggle → raising/settling
//! - `release_equip_locks` — detach ramp завершён → equip_lock свободен

use bevy::prelude::*;
use bevy_rapier3d::prelude::{ExternalImpulse, RigidBody};

use crate::components::{EquipRejection, HandSlot, HeldItem, Hotbar, Item, Player, PlayerHand, RigBlendWeight};
use crate::config::PlayerConfig;
use crate::equipment::events::{HotbarScrolled, ItemPickedUp, ItemRemoved, SessionTeardown};
use crate::equipment::HotbarSwap;
use crate::error::{escalate, PlayerError};
use crate::feedback::{AudioCue, CueKind};
use crate::input::{ActionKind, InputGate, PlayerAction};
use crate::{log, log_warning};

// ============================================================================
// Equip / Drop / Throw
// ============================================================================

/// Equip/Drop/Throw actions.
///
/// Equip: предмет должен иметь `Item` (иначе MissingCapability), быть equipable,
/// не лежать уже в чьей-то руке и быть в пределах `interact_range`.
pub fn process_item_actions(
    mut commands: Commands,
    mut actions: EventReader<PlayerAction>,
    config: Res<PlayerConfig>,
    mut players: Query<(&mut Hotbar, &mut RigBlendWeight, &PlayerHand, &Transform, &InputGate), With<Player>>,
    mut items: Query<(&mut Item, &Transform), Without<Player>>,
    mut picked_up: EventWriter<ItemPickedUp>,
    mut removed: EventWriter<ItemRemoved>,
    mut cues: EventWriter<AudioCue>,
) {
    for action in actions.read() {
        let throw = match action.kind {
            ActionKind::Equip { .. } | ActionKind::Drop => false,
            ActionKind::Throw => true,
            _ => continue,
        };

        let Ok((mut hotbar, mut rig, hand, player_tf, gate)) = players.get_mut(action.player) else {
            log_warning(&format!("Entity {:?} has no hotbar, item action ignored", action.player));
            continue;
        };
        if !gate.enabled {
            continue;
        }

        // 1. Equip
        if let ActionKind::Equip { target } = action.kind {
            let Ok((mut item, item_tf)) = items.get_mut(target) else {
                escalate(PlayerError::MissingCapability {
                    entity: target,
                    capability: "Item",
                });
                continue;
            };

            if !item.equipable || item.equipped {
                continue;
            }

            let distance = item_tf.translation.distance(player_tf.translation);
            if distance > config.interact_range {
                log(&format!(
                    "📏 {:?} too far to equip {} ({:.2}m > {:.2}m)",
                    action.player, item.name, distance, config.interact_range
                ));
                continue;
            }

            let held = HeldItem {
                entity: target,
                throwable: item.throwable,
            };

            let slot = match hotbar.equip(held) {
                Ok(slot) => slot,
                Err(EquipRejection::HandsFull) => {
                    log(&format!("🎒 {:?} hands full, {} stays", action.player, item.name));
                    continue;
                }
                Err(EquipRejection::Locked) => {
                    log(&format!("🔒 {:?} equip rejected (detach in progress)", action.player));
                    continue;
                }
            };

            item.equipped = true;

            if let Some(&slot_entity) = hand.slots.get(slot) {
                commands.entity(slot_entity).add_child(target);
            }
            commands
                .entity(target)
                .insert((Transform::IDENTITY, RigidBody::KinematicPositionBased));

            if slot == hotbar.active_index() {
                rig.start_ramp(1.0);
            }

            picked_up.write(ItemPickedUp {
                player: action.player,
                item: target,
                slot,
            });
            cues.write(AudioCue::new(action.player, CueKind::ItemPickup));

            log(&format!("✅ {:?} equipped {} → slot {}", action.player, item.name, slot));
            continue;
        }

        // 2. Drop / Throw
        let Some((slot, held)) = hotbar.begin_detach(throw) else {
            continue;
        };

        let impulse = if throw {
            config.hotbar.throw_impulse
        } else {
            config.hotbar.drop_impulse
        };
        release_to_world(
            &mut commands,
            held.entity,
            player_tf,
            hand.anchor_offset,
            Some(*player_tf.forward() * impulse),
        );

        if let Ok((mut item, _)) = items.get_mut(held.entity) {
            item.equipped = false;
        }

        let ramp = rig.start_ramp(0.0);
        hotbar.hold_equip_lock_until(ramp);

        removed.write(ItemRemoved {
            player: action.player,
            item: held.entity,
            slot,
        });
        let kind = if throw { CueKind::ItemThrow } else { CueKind::ItemDrop };
        cues.write(AudioCue::new(action.player, kind));

        log(&format!(
            "🫳 {:?} {} {:?} from slot {}",
            action.player,
            if throw { "threw" } else { "dropped" },
            held.entity,
            slot
        ));
    }
}

/// Предмет → мир: отцепить от слота, поставить в руку, включить физику
fn release_to_world(
    commands: &mut Commands,
    item: Entity,
    player_tf: &Transform,
    anchor_offset: Vec3,
    impulse: Option<Vec3>,
) {
    let transform =
        Transform::from_translation(player_tf.transform_point(anchor_offset)).with_rotation(player_tf.rotation);

    let mut entity = commands.entity(item);
    entity.remove::<ChildOf>().insert((transform, RigidBody::Dynamic));

    if let Some(impulse) = impulse {
        entity.insert(ExternalImpulse {
            impulse,
            torque_impulse: Vec3::ZERO,
        });
    }
}

// ============================================================================
// Hotbar Scroll / Select
// ============================================================================

pub fn process_hotbar_actions(
    mut actions: EventReader<PlayerAction>,
    mut players: Query<(&mut Hotbar, &mut RigBlendWeight, &mut HotbarSwap, &InputGate)>,
    mut scrolled: EventWriter<HotbarScrolled>,
    mut cues: EventWriter<AudioCue>,
) {
    for action in actions.read() {
        if !matches!(action.kind, ActionKind::Scroll(_) | ActionKind::SelectSlot(_)) {
            continue;
        }

        let Ok((mut hotbar, mut rig, mut swap, gate)) = players.get_mut(action.player) else {
            continue;
        };
        if !gate.enabled {
            continue;
        }

        let change = match action.kind {
            ActionKind::Scroll(delta) => hotbar.scroll(delta),
            ActionKind::SelectSlot(index) => match hotbar.select(index) {
                Ok(change) => change,
                Err(err) => {
                    escalate(err);
                    continue;
                }
            },
            _ => continue,
        };

        // Тот же слот или swap уже идёт
        let Some(change) = change else {
            continue;
        };

        let kind = if hotbar.slot(change.to).is_some() {
            CueKind::ScrollInventory
        } else {
            CueKind::ScrollInventoryEmpty
        };
        cues.write(AudioCue::new(action.player, kind));

        swap.begin(change, &mut rig);
        scrolled.write(HotbarScrolled {
            player: action.player,
            index: change.to,
        });

        log(&format!(
            "🔄 {:?} hotbar swap: slot {} → {}",
            action.player, change.from, change.to
        ));
    }
}

// ============================================================================
// Teardown
// ============================================================================

/// RemoveAll: каждый слот → мир (без импульса), рука опускается
pub fn remove_all_on_teardown(
    mut commands: Commands,
    mut teardown: EventReader<SessionTeardown>,
    mut players: Query<(&mut Hotbar, &mut RigBlendWeight, &PlayerHand, &Transform), With<Player>>,
    mut items: Query<&mut Item, Without<Player>>,
    mut removed: EventWriter<ItemRemoved>,
) {
    for event in teardown.read() {
        let Ok((mut hotbar, mut rig, hand, player_tf)) = players.get_mut(event.player) else {
            continue;
        };

        let drained = hotbar.drain();
        for (slot, held) in &drained {
            release_to_world(&mut commands, held.entity, player_tf, hand.anchor_offset, None);

            if let Ok(mut item) = items.get_mut(held.entity) {
                item.equipped = false;
            }

            removed.write(ItemRemoved {
                player: event.player,
                item: held.entity,
                slot: *slot,
            });
        }

        rig.start_ramp(0.0);
        log(&format!("🧹 {:?} teardown: released {} item(s)", event.player, drained.len()));
    }
}

// ============================================================================
// Progress (rig ramps, swap, locks)
// ============================================================================

pub fn advance_rig_ramps(time: Res<Time<Fixed>>, mut rigs: Query<&mut RigBlendWeight>) {
    let delta = time.delta_secs();

    for mut rig in rigs.iter_mut() {
        // Не трогаем Changed, если ramp нет
        if rig.is_ramping() {
            rig.advance(delta);
        }
    }
}

pub fn advance_swap_sequences(
    time: Res<Time<Fixed>>,
    config: Res<PlayerConfig>,
    mut players: Query<(Entity, &mut HotbarSwap, &mut Hotbar, &mut RigBlendWeight, &PlayerHand)>,
    mut slots: Query<&mut HandSlot>,
) {
    let delta = time.delta_secs();

    for (entity, mut swap, mut hotbar, mut rig, hand) in players.iter_mut() {
        if !swap.is_active() {
            continue;
        }

        let progress = swap.advance(&mut rig, &hotbar, config.hotbar.swap_settle_delay, delta);

        if let Some(change) = progress.toggled {
            set_slot_visible(&mut slots, hand, change.from, false);
            set_slot_visible(&mut slots, hand, change.to, true);
        }

        if progress.finished {
            hotbar.finish_swap();
            log(&format!("🔄 {:?} swap finished (active slot {})", entity, hotbar.active_index()));
        }
    }
}

fn set_slot_visible(slots: &mut Query<&mut HandSlot>, hand: &PlayerHand, index: usize, visible: bool) {
    let Some(&slot_entity) = hand.slots.get(index) else {
        return;
    };
    if let Ok(mut slot) = slots.get_mut(slot_entity) {
        slot.visible = visible;
    }
}

pub fn release_equip_locks(mut players: Query<(Entity, &mut Hotbar, &RigBlendWeight)>) {
    for (entity, mut hotbar, rig) in players.iter_mut() {
        if !hotbar.is_equip_locked() {
            continue;
        }
        if hotbar.release_equip_lock_if_done(rig) {
            log(&format!("🔓 {:?} equip lock released", entity));
        }
    }
}
