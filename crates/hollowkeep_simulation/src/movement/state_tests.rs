//! Tests for LocomotionMachine guards and transitions.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;

    use crate::components::Stamina;
    use crate::config::{MovementConfig, StaminaConfig};
    use crate::error::PlayerError;
    use crate::movement::{planar_direction, GuardInputs, LocomotionMachine, MovementState, Transition};

    const TICK: f32 = 1.0 / 60.0;
    const GRAVITY: f32 = -9.81;

    fn machine() -> LocomotionMachine {
        LocomotionMachine::new(MovementConfig::default(), &StaminaConfig::default())
    }

    fn inputs(grounded: bool, intent: Vec2, wants_crouch: bool, wants_run: bool) -> GuardInputs {
        GuardInputs {
            grounded,
            intent,
            wants_crouch,
            wants_run,
            gravity_y: GRAVITY,
        }
    }

    fn fatigued_stamina() -> Stamina {
        let mut stamina = Stamina::new(50.0, 3.0);
        stamina.deplete(50.0);
        stamina
    }

    const INTENTS: [Vec2; 4] = [
        Vec2::ZERO,
        Vec2::new(0.0, 1.0),
        Vec2::new(0.0, -1.0),
        Vec2::new(1.0, 0.0),
    ];

    #[test]
    fn test_idle_to_walking() {
        let mut machine = machine();
        let mut stamina = Stamina::default();

        let transitions = machine.evaluate(&inputs(true, Vec2::Y, false, false), false, &mut stamina);

        assert_eq!(
            transitions,
            vec![Transition { from: MovementState::Idle, to: MovementState::Walking }]
        );
        assert_eq!(machine.speed(), MovementConfig::default().walk_speed);
    }

    #[test]
    fn test_no_change_publishes_nothing() {
        let mut machine = machine();
        let mut stamina = Stamina::default();

        let transitions = machine.evaluate(&inputs(true, Vec2::ZERO, false, false), false, &mut stamina);

        assert!(transitions.is_empty());
        assert_eq!(machine.state(), MovementState::Idle);
    }

    #[test]
    fn test_later_rule_overrides_earlier() {
        // Из Walking: zero intent + crouch → Idle (1) → CrouchingIdle (4)
        let mut machine = machine();
        machine.force_state(MovementState::Walking);
        let mut stamina = Stamina::default();

        let transitions = machine.evaluate(&inputs(true, Vec2::ZERO, true, false), false, &mut stamina);

        assert_eq!(transitions.len(), 2);
        assert_eq!(machine.state(), MovementState::CrouchingIdle);
    }

    #[test]
    fn test_idle_blocked_from_crouching_idle_while_crouched() {
        let mut machine = machine();
        machine.force_state(MovementState::CrouchingIdle);
        let mut stamina = Stamina::default();

        let transitions = machine.evaluate(&inputs(true, Vec2::ZERO, true, false), false, &mut stamina);

        assert!(transitions.is_empty());
        assert_eq!(machine.state(), MovementState::CrouchingIdle);
    }

    #[test]
    fn test_running_requires_positive_forward() {
        let mut machine = machine();
        let mut stamina = Stamina::default();

        machine.evaluate(&inputs(true, Vec2::new(1.0, 0.0), false, true), false, &mut stamina);
        assert_eq!(machine.state(), MovementState::Walking, "strafe не бег");

        machine.evaluate(&inputs(true, Vec2::Y, false, true), false, &mut stamina);
        assert_eq!(machine.state(), MovementState::Running);
        assert!(machine.is_running());
    }

    #[test]
    fn test_fatigue_blocks_running() {
        let mut machine = machine();
        let mut stamina = fatigued_stamina();

        machine.evaluate(&inputs(true, Vec2::Y, false, true), false, &mut stamina);

        assert_eq!(machine.state(), MovementState::Walking);
        assert!(!machine.is_running());
    }

    #[test]
    fn test_jump_deducts_cost_and_adds_velocity() {
        let mut machine = machine();
        let mut stamina = Stamina::default();

        let transitions = machine.evaluate(&inputs(true, Vec2::ZERO, false, false), true, &mut stamina);

        assert_eq!(
            transitions,
            vec![Transition { from: MovementState::Idle, to: MovementState::Jumping }]
        );
        assert_eq!(stamina.current(), 40.0);
        assert_eq!(machine.jump_count(), 1);
        assert!(machine.is_jump_in_progress());

        let expected = (0.6f32 * -3.0 * GRAVITY).sqrt();
        assert!((machine.vertical_velocity() - expected).abs() < 1e-4);
    }

    #[test]
    fn test_jump_denied_without_stamina() {
        let mut machine = machine();
        machine.force_state(MovementState::Walking);
        let mut stamina = Stamina::new(50.0, 3.0);
        stamina.deplete(45.0); // 5 < jump_cost 10

        let transitions = machine.evaluate(&inputs(true, Vec2::Y, false, false), true, &mut stamina);

        assert!(transitions.is_empty());
        assert_eq!(machine.state(), MovementState::Walking);
        assert_eq!(stamina.current(), 5.0);
        assert_eq!(machine.jump_count(), 0);
    }

    #[test]
    fn test_jump_denied_while_crouched() {
        let mut machine = machine();
        let mut stamina = Stamina::default();

        machine.evaluate(&inputs(true, Vec2::ZERO, true, false), true, &mut stamina);

        assert_eq!(machine.state(), MovementState::CrouchingIdle);
        assert_eq!(stamina.current(), 50.0);
    }

    #[test]
    fn test_jump_holds_until_recovery_then_falls() {
        let mut machine = machine();
        let mut stamina = Stamina::default();
        machine.evaluate(&inputs(true, Vec2::ZERO, false, false), true, &mut stamina);

        // Кадры взлёта: ещё grounded → остаёмся в Jumping
        let grounded = inputs(true, Vec2::ZERO, false, false);
        assert!(machine.evaluate(&grounded, false, &mut stamina).is_empty());

        // В воздухе до конца recovery → не Falling
        let airborne = inputs(false, Vec2::ZERO, false, false);
        assert!(machine.evaluate(&airborne, false, &mut stamina).is_empty());

        for _ in 0..31 {
            machine.tick_jump_recovery(TICK);
        }
        assert!(!machine.is_jump_in_progress());

        machine.evaluate(&airborne, false, &mut stamina);
        assert_eq!(machine.state(), MovementState::Falling);

        machine.evaluate(&grounded, false, &mut stamina);
        assert_eq!(machine.state(), MovementState::Idle);
    }

    #[test]
    fn test_gravity_integration() {
        let mut machine = machine();

        machine.apply_gravity(true, GRAVITY, TICK);
        assert_eq!(machine.vertical_velocity(), -1.0);

        machine.apply_gravity(false, GRAVITY, 0.5);
        assert!((machine.vertical_velocity() - (-1.0 + GRAVITY * 0.5)).abs() < 1e-5);
    }

    #[test]
    fn test_refresh_drains_while_running() {
        let mut machine = machine();
        let mut stamina = Stamina::default();
        let run = inputs(true, Vec2::Y, false, true);
        machine.evaluate(&run, false, &mut stamina);
        assert_eq!(machine.state(), MovementState::Running);

        let refresh = machine.refresh_stamina(&run, &mut stamina, 1.0);

        assert!(refresh.transitions.is_empty());
        assert_eq!(stamina.current(), 40.0);
    }

    #[test]
    fn test_refresh_stops_running_when_forward_lost() {
        let mut machine = machine();
        let mut stamina = Stamina::default();
        machine.evaluate(&inputs(true, Vec2::Y, false, true), false, &mut stamina);

        let strafe = inputs(true, Vec2::X, false, true);
        let refresh = machine.refresh_stamina(&strafe, &mut stamina, TICK);

        assert!(!machine.is_running());
        assert_eq!(
            refresh.transitions,
            vec![Transition { from: MovementState::Running, to: MovementState::Walking }]
        );
    }

    #[test]
    fn test_crouch_excludes_running() {
        let mut machine = machine();
        let mut stamina = Stamina::default();
        machine.evaluate(&inputs(true, Vec2::Y, false, true), false, &mut stamina);
        assert_eq!(machine.state(), MovementState::Running);

        let crouched_run = inputs(true, Vec2::Y, true, true);
        let refresh = machine.refresh_stamina(&crouched_run, &mut stamina, TICK);
        assert!(refresh.transitions.is_empty(), "Walking закрыт присядом");
        assert!(!machine.is_running());

        let transitions = machine.evaluate(&crouched_run, false, &mut stamina);
        assert_eq!(
            transitions,
            vec![Transition { from: MovementState::Running, to: MovementState::Crouching }]
        );
        assert_eq!(machine.speed(), MovementConfig::default().crouch_speed);

        let before = stamina.current();
        for _ in 0..10 {
            machine.refresh_stamina(&crouched_run, &mut stamina, TICK);
            assert!(machine.evaluate(&crouched_run, false, &mut stamina).is_empty());
        }
        assert_eq!(machine.state(), MovementState::Crouching);
        assert!(stamina.current() >= before);
    }

    #[test]
    fn test_crouch_entry_clears_running_flag() {
        let mut machine = machine();
        machine.force_state(MovementState::Running);
        machine.force_running(true);
        let mut stamina = Stamina::default();

        machine.evaluate(&inputs(true, Vec2::ZERO, true, true), false, &mut stamina);

        assert_eq!(machine.state(), MovementState::CrouchingIdle);
        assert!(!machine.is_running());
    }

    #[test]
    fn test_refresh_fatigue_forces_walking_once() {
        let mut machine = machine();
        let mut stamina = Stamina::new(50.0, 3.0);
        let run = inputs(true, Vec2::Y, false, true);
        machine.evaluate(&run, false, &mut stamina);

        stamina.deplete(50.0);
        let first = machine.refresh_stamina(&run, &mut stamina, TICK);
        assert!(first.fatigue_started);
        assert_eq!(machine.state(), MovementState::Walking);

        let second = machine.refresh_stamina(&run, &mut stamina, TICK);
        assert!(!second.fatigue_started);
    }

    #[test]
    fn test_state_round_trips_through_u8() {
        for state in MovementState::ALL {
            let raw: u8 = state.into();
            assert_eq!(MovementState::try_from(raw), Ok(state));
        }
        assert_eq!(MovementState::try_from(7), Err(PlayerError::UnknownMovementState(7)));
    }

    #[test]
    fn test_planar_direction_follows_camera() {
        let forward = planar_direction(Vec2::Y, Vec3::X);
        assert!((forward - Vec3::NEG_Z).length() < 1e-5);

        let right = planar_direction(Vec2::X, Vec3::X);
        assert!((right - Vec3::X).length() < 1e-5);

        // Камера повёрнута на 90° (right = -Z) → forward = -X
        let turned = planar_direction(Vec2::Y, Vec3::NEG_Z);
        assert!((turned - Vec3::NEG_X).length() < 1e-5);
    }

    /// Closure: для каждого (состояние × входы) evaluation детерминирована,
    /// переходы образуют цепочку, финальное состояние удовлетворяет своему guard'у
    #[test]
    fn test_state_machine_closure() {
        for start in MovementState::ALL {
            for grounded in [true, false] {
                for intent in INTENTS {
                    for wants_crouch in [true, false] {
                        for wants_run in [true, false] {
                            for fatigued in [true, false] {
                                for jump in [true, false] {
                                    check_closure(start, inputs(grounded, intent, wants_crouch, wants_run), fatigued, jump);
                                }
                            }
                        }
                    }
                }
            }
        }
    }

    fn check_closure(start: MovementState, guard: GuardInputs, fatigued: bool, jump: bool) {
        let stamina_for = || if fatigued { fatigued_stamina() } else { Stamina::default() };

        let mut machine_a = machine();
        machine_a.force_state(start);
        let mut machine_b = machine_a.clone();
        let mut stamina_a = stamina_for();
        let mut stamina_b = stamina_for();

        let transitions = machine_a.evaluate(&guard, jump, &mut stamina_a);
        let transitions_b = machine_b.evaluate(&guard, jump, &mut stamina_b);

        let context = format!("start={start} inputs={guard:?} fatigued={fatigued} jump={jump}");

        assert_eq!(transitions, transitions_b, "не детерминировано: {context}");
        assert_eq!(machine_a.state(), machine_b.state());

        // Цепочка переходов
        let mut current = start;
        for transition in &transitions {
            assert_eq!(transition.from, current, "разрыв цепочки: {context}");
            assert_ne!(transition.from, transition.to, "self-transition: {context}");
            current = transition.to;
        }
        assert_eq!(current, machine_a.state());

        // Финальное состояние согласовано с входами
        let final_state = machine_a.state();
        let has_intent = guard.intent != Vec2::ZERO;
        match final_state {
            MovementState::Falling => {
                if !transitions.is_empty() {
                    assert!(!guard.grounded, "{context}");
                }
            }
            MovementState::Running if !transitions.is_empty() => {
                assert!(
                    guard.wants_run && !guard.wants_crouch && guard.intent.y > 0.0 && !fatigued,
                    "{context}"
                );
            }
            MovementState::CrouchingIdle if !transitions.is_empty() => {
                assert!(guard.wants_crouch && !has_intent, "{context}");
            }
            MovementState::Crouching if !transitions.is_empty() => {
                assert!(guard.wants_crouch && has_intent, "{context}");
            }
            MovementState::Jumping if !transitions.is_empty() => {
                assert!(jump && !guard.wants_crouch && !fatigued, "{context}");
            }
            _ => {}
        }

        // Повторная evaluation с теми же входами ничего не меняет
        if !jump {
            let repeat = machine_a.evaluate(&guard, false, &mut stamina_a);
            assert!(repeat.is_empty(), "нет fixpoint: {repeat:?} {context}");
            assert_eq!(machine_a.state(), final_state);
        }

        // В воздухе всегда оказываемся в Falling
        if !guard.grounded {
            assert_eq!(final_state, MovementState::Falling, "{context}");
        }
        // На земле из Falling всегда выходим (running-флаг сброшен у свежей машины)
        if guard.grounded {
            assert_ne!(final_state, MovementState::Falling, "{context}");
        }
    }

    #[test]
    fn test_machine_rejects_unknown_state_value() {
        let err = MovementState::try_from(200).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn test_forced_running_flag_blocks_walking() {
        let mut machine = machine();
        machine.force_running(true);
        let mut stamina = Stamina::default();

        let walked = machine.try_transition(MovementState::Walking, &inputs(true, Vec2::Y, false, false), &mut stamina);

        assert!(walked.is_none());
    }
}
