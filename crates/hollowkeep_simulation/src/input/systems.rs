//! Input systems: gate + locomotion actions

use bevy::prelude::*;

use crate::components::LocomotionInput;
use crate::input::{ActionKind, InputGate, PlayerAction, SetInputEnabled};
use crate::log;
use crate::movement::LocomotionMachine;

/// SetInputEnabled → InputGate. Пока gate закрыт, intent обнулён каждый тик.
pub fn apply_input_gate(
    mut requests: EventReader<SetInputEnabled>,
    mut players: Query<(Entity, &mut InputGate, &mut LocomotionInput)>,
) {
    for request in requests.read() {
        let Ok((entity, mut gate, _)) = players.get_mut(request.player) else {
            continue;
        };
        if gate.enabled != request.enabled {
            gate.enabled = request.enabled;
            log(&format!(
                "🎮 {:?} input {}",
                entity,
                if request.enabled { "enabled" } else { "disabled" }
            ));
        }
    }

    for (_, gate, mut input) in players.iter_mut() {
        if gate.enabled {
            continue;
        }
        if input.intent != Vec2::ZERO || input.jump_requested {
            input.intent = Vec2::ZERO;
            input.jump_requested = false;
        }
    }
}

/// Move / CrouchToggle / RunToggle / JumpPressed → LocomotionInput
pub fn apply_locomotion_actions(
    mut actions: EventReader<PlayerAction>,
    mut players: Query<(&mut LocomotionInput, &mut LocomotionMachine, &InputGate)>,
) {
    for action in actions.read() {
        let Ok((mut input, mut machine, gate)) = players.get_mut(action.player) else {
            continue;
        };
        if !gate.enabled {
            continue;
        }

        match action.kind {
            ActionKind::Move(intent) => {
                input.intent = intent.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));
            }
            ActionKind::CrouchToggle => {
                input.wants_crouch = !input.wants_crouch;
                if input.wants_crouch {
                    machine.register_crouch();
                }
            }
            ActionKind::RunToggle => {
                input.wants_run = !input.wants_run;
            }
            ActionKind::JumpPressed => {
                input.jump_requested = true;
            }
            _ => {}
        }
    }
}
