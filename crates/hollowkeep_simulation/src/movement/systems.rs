//! Locomotion systems (FixedUpdate, порядок задан в MovementPlugin)
//!
//! 1. `tick_jump_recovery` — окно "jump in progress"
//! 2. `apply_gravity` — вертикальная скорость
//! 3. `update_animation_params` — blend + флаги для AnimationTree
//! 4. `apply_movement` — желаемая скорость для character controller
//! 5. `refresh_stamina` — расход/регенерация/fatigue
//! 6. `evaluate_movement_state` — guarded переходы
//! 7. `accumulate_movement_stats` — время по режимам

use bevy::prelude::*;

use crate::components::{
    AnimationParams, CharacterMotion, Grounding, LocomotionInput, MovementStats, Stamina,
};
use crate::config::PlayerConfig;
use crate::logger::log;
use crate::movement::{
    GuardInputs, LocomotionMachine, MovementState, MovementStateChanged, PlayerFatigued, StaminaChanged,
    Transition,
};

pub fn tick_jump_recovery(time: Res<Time<Fixed>>, mut machines: Query<&mut LocomotionMachine>) {
    let delta = time.delta_secs();

    for mut machine in machines.iter_mut() {
        machine.tick_jump_recovery(delta);
    }
}

pub fn apply_gravity(time: Res<Time<Fixed>>, mut query: Query<(&mut LocomotionMachine, &Grounding)>) {
    let delta = time.delta_secs();

    for (mut machine, grounding) in query.iter_mut() {
        machine.apply_gravity(grounding.grounded, grounding.gravity.y, delta);
    }
}

/// Damped blend к intent + флаги из текущего состояния
pub fn update_animation_params(
    time: Res<Time<Fixed>>,
    mut query: Query<(&mut AnimationParams, &LocomotionMachine, &LocomotionInput, &Grounding)>,
) {
    let delta = time.delta_secs();

    for (mut params, machine, input, grounding) in query.iter_mut() {
        let blend = 1.0 - (-machine.tuning().animation_damping * delta).exp();
        let target = input.intent.clamp(Vec2::splat(-1.0), Vec2::splat(1.0));

        params.forward += (target.y - params.forward) * blend;
        params.sideways += (target.x - params.sideways) * blend;

        let state = machine.state();
        params.crouched = state.is_crouched();
        params.running = state == MovementState::Running;
        params.jumping = state == MovementState::Jumping;
        params.grounded = grounding.grounded;
    }
}

pub fn apply_movement(mut query: Query<(&mut CharacterMotion, &LocomotionMachine, &LocomotionInput)>) {
    for (mut motion, machine, input) in query.iter_mut() {
        motion.velocity = machine.desired_velocity(input.intent, input.camera_right);
    }
}

/// Stamina coupling: расход на беге, регенерация, fatigue one-shot
pub fn refresh_stamina(
    time: Res<Time<Fixed>>,
    config: Res<PlayerConfig>,
    mut query: Query<(Entity, &mut LocomotionMachine, &mut Stamina, &mut LocomotionInput, &Grounding)>,
    mut stamina_changed: EventWriter<StaminaChanged>,
    mut fatigued: EventWriter<PlayerFatigued>,
    mut state_changed: EventWriter<MovementStateChanged>,
) {
    let delta = time.delta_secs();

    for (entity, mut machine, mut stamina, mut input, grounding) in query.iter_mut() {
        let before = stamina.current();
        let guard = GuardInputs::from_components(&input, grounding);

        let refresh = machine.refresh_stamina(&guard, &mut stamina, delta);

        if refresh.fatigue_started {
            fatigued.write(PlayerFatigued { entity });
            log(&format!("😮‍💨 {:?} fatigued (stamina depleted)", entity));

            if config.stamina.release_run_on_fatigue {
                input.wants_run = false;
            }
        }

        publish_transitions(entity, &refresh.transitions, &mut state_changed);

        if stamina.current() != before {
            stamina_changed.write(StaminaChanged {
                entity,
                current: stamina.current(),
                max: stamina.max(),
            });
        }
    }
}

/// Guarded переходы (jump trigger потребляется каждый тик)
pub fn evaluate_movement_state(
    mut query: Query<(Entity, &mut LocomotionMachine, &mut Stamina, &mut LocomotionInput, &Grounding)>,
    mut state_changed: EventWriter<MovementStateChanged>,
    mut stamina_changed: EventWriter<StaminaChanged>,
) {
    for (entity, mut machine, mut stamina, mut input, grounding) in query.iter_mut() {
        let before = stamina.current();
        let guard = GuardInputs::from_components(&input, grounding);
        let jump_requested = std::mem::take(&mut input.jump_requested);

        let transitions = machine.evaluate(&guard, jump_requested, &mut stamina);
        publish_transitions(entity, &transitions, &mut state_changed);

        // Jump списал stamina
        if stamina.current() != before {
            stamina_changed.write(StaminaChanged {
                entity,
                current: stamina.current(),
                max: stamina.max(),
            });
        }
    }
}

pub fn accumulate_movement_stats(
    time: Res<Time<Fixed>>,
    mut query: Query<(&mut MovementStats, &LocomotionMachine, &LocomotionInput, &Grounding)>,
) {
    let delta = time.delta_secs();

    for (mut stats, machine, input, grounding) in query.iter_mut() {
        if machine.is_running() {
            stats.run_time += delta;
        } else if input.wants_crouch {
            stats.crouch_time += delta;
        } else if input.intent != Vec2::ZERO && grounding.grounded {
            stats.walk_time += delta;
        }
    }
}

fn publish_transitions(
    entity: Entity,
    transitions: &[Transition],
    writer: &mut EventWriter<MovementStateChanged>,
) {
    for transition in transitions {
        log(&format!(
            "🚶 {:?} movement: {} → {}",
            entity, transition.from, transition.to
        ));
        writer.write(MovementStateChanged {
            entity,
            from: transition.from,
            to: transition.to,
        });
    }
}
