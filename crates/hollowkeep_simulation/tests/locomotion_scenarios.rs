//! Locomotion integration tests
//!
//! Полный тик через SimulationPlugin: PlayerAction → LocomotionInput →
//! LocomotionMachine + Stamina → события.

mod common;

use bevy::prelude::*;
use common::*;
use hollowkeep_simulation::*;

#[test]
fn test_walk_run_fatigue_walk() {
    let mut app = test_app();
    record_events::<MovementStateChanged>(&mut app);
    record_events::<PlayerFatigued>(&mut app);
    record_events::<AudioCue>(&mut app);
    let player = spawn_test_player(&mut app);

    act(&mut app, player, ActionKind::Move(Vec2::Y));
    tick(&mut app, 2);
    assert_eq!(snapshot(&app, player).state, MovementState::Walking);

    act(&mut app, player, ActionKind::RunToggle);
    tick(&mut app, 1);
    assert_eq!(snapshot(&app, player).state, MovementState::Running);

    // 50 stamina / 10 в сек ≈ 300 тиков бега, fatigue держится 180 тиков
    tick(&mut app, 330);

    let snap = snapshot(&app, player);
    assert_eq!(snap.state, MovementState::Walking);
    assert!(snap.fatigued);
    assert!(snap.stamina < 1.0);

    let fatigued = recorded::<PlayerFatigued>(&app);
    assert_eq!(fatigued.len(), 1, "fatigue событие one-shot");
    assert_eq!(fatigued[0].entity, player);

    let transitions: Vec<_> = recorded::<MovementStateChanged>(&app)
        .iter()
        .map(|event| (event.from, event.to))
        .collect();
    assert_eq!(
        transitions,
        vec![
            (MovementState::Idle, MovementState::Walking),
            (MovementState::Walking, MovementState::Running),
            (MovementState::Running, MovementState::Walking),
        ]
    );

    let depleted_cues = recorded::<AudioCue>(&app)
        .iter()
        .filter(|cue| cue.kind == CueKind::StaminaDepleted)
        .count();
    assert_eq!(depleted_cues, 1);
}

#[test]
fn test_fatigue_blocks_running_until_cooldown() {
    let mut app = test_app();
    let player = spawn_test_player(&mut app);

    act(&mut app, player, ActionKind::Move(Vec2::Y));
    act(&mut app, player, ActionKind::RunToggle);
    tick(&mut app, 320);
    assert!(snapshot(&app, player).fatigued);

    // Fatigue 3 сек: бег возвращается сам (toggle всё ещё включён),
    // накопленных ~3 stamina хватает ещё на ~18 тиков
    tick(&mut app, 170);

    let snap = snapshot(&app, player);
    assert!(!snap.fatigued);
    assert_eq!(snap.state, MovementState::Running);
}

#[test]
fn test_releasing_run_returns_to_walking() {
    let mut app = test_app();
    let player = spawn_test_player(&mut app);

    act(&mut app, player, ActionKind::Move(Vec2::Y));
    act(&mut app, player, ActionKind::RunToggle);
    tick(&mut app, 30);
    assert_eq!(snapshot(&app, player).state, MovementState::Running);

    act(&mut app, player, ActionKind::RunToggle);
    tick(&mut app, 1);
    assert_eq!(snapshot(&app, player).state, MovementState::Walking);

    // Бег назад не разрешён
    act(&mut app, player, ActionKind::RunToggle);
    act(&mut app, player, ActionKind::Move(Vec2::NEG_Y));
    tick(&mut app, 2);
    assert_eq!(snapshot(&app, player).state, MovementState::Walking);
}

#[test]
fn test_jump_denied_without_stamina() {
    let mut config = PlayerConfig::default();
    config.stamina.max = 5.0;

    let mut app = test_app_with_config(config);
    record_events::<MovementStateChanged>(&mut app);
    record_events::<StaminaChanged>(&mut app);
    let player = spawn_test_player(&mut app);

    act(&mut app, player, ActionKind::JumpPressed);
    tick(&mut app, 1);

    let snap = snapshot(&app, player);
    assert_eq!(snap.state, MovementState::Idle);
    assert_eq!(snap.stamina, 5.0);
    assert!(recorded::<MovementStateChanged>(&app).is_empty());
    assert!(recorded::<StaminaChanged>(&app).is_empty());

    let machine = app.world().get::<movement::LocomotionMachine>(player).unwrap();
    assert_eq!(machine.jump_count(), 0);
}

#[test]
fn test_jump_costs_stamina_and_holds_until_recovery() {
    let mut app = test_app();
    let player = spawn_test_player(&mut app);

    act(&mut app, player, ActionKind::JumpPressed);
    tick(&mut app, 1);

    let snap = snapshot(&app, player);
    assert_eq!(snap.state, MovementState::Jumping);
    assert_eq!(snap.stamina, 40.0);

    // Взлёт ещё grounded (физики нет), но Jumping держится recovery окно
    tick(&mut app, 10);
    assert_eq!(snapshot(&app, player).state, MovementState::Jumping);

    tick(&mut app, 30);
    assert_eq!(snapshot(&app, player).state, MovementState::Idle);

    let machine = app.world().get::<movement::LocomotionMachine>(player).unwrap();
    assert_eq!(machine.jump_count(), 1);
}

#[test]
fn test_leaving_ground_falls_and_landing_idles() {
    let mut app = test_app();
    let player = spawn_test_player(&mut app);

    set_grounded(&mut app, player, false);
    tick(&mut app, 1);
    assert_eq!(snapshot(&app, player).state, MovementState::Falling);

    tick(&mut app, 10);
    let motion = app.world().get::<CharacterMotion>(player).unwrap();
    assert!(motion.velocity.y < 0.0, "гравитация набирает скорость падения");

    set_grounded(&mut app, player, true);
    tick(&mut app, 1);
    assert_eq!(snapshot(&app, player).state, MovementState::Idle);
}

#[test]
fn test_crouch_toggle_counts_and_slows() {
    let mut app = test_app();
    let player = spawn_test_player(&mut app);

    act(&mut app, player, ActionKind::CrouchToggle);
    tick(&mut app, 1);
    assert_eq!(snapshot(&app, player).state, MovementState::CrouchingIdle);

    act(&mut app, player, ActionKind::Move(Vec2::X));
    tick(&mut app, 1);
    assert_eq!(snapshot(&app, player).state, MovementState::Crouching);

    let motion = app.world().get::<CharacterMotion>(player).unwrap();
    let planar = Vec2::new(motion.velocity.x, motion.velocity.z).length();
    assert!((planar - 1.0).abs() < 1e-4, "crouch speed 1 м/с, получили {}", planar);

    act(&mut app, player, ActionKind::CrouchToggle);
    act(&mut app, player, ActionKind::CrouchToggle);
    tick(&mut app, 1);

    let machine = app.world().get::<movement::LocomotionMachine>(player).unwrap();
    assert_eq!(machine.crouch_count(), 2, "считаются только включения");
}

#[test]
fn test_crouch_over_run_settles_without_events() {
    let mut app = test_app();
    record_events::<MovementStateChanged>(&mut app);
    record_events::<NoiseRadiusChanged>(&mut app);
    let player = spawn_test_player(&mut app);

    act(&mut app, player, ActionKind::Move(Vec2::Y));
    act(&mut app, player, ActionKind::RunToggle);
    tick(&mut app, 2);
    assert_eq!(snapshot(&app, player).state, MovementState::Running);

    act(&mut app, player, ActionKind::CrouchToggle);
    tick(&mut app, 1);
    assert_eq!(snapshot(&app, player).state, MovementState::Crouching);

    clear_recorded::<MovementStateChanged>(&mut app);
    clear_recorded::<NoiseRadiusChanged>(&mut app);
    let stamina_before = snapshot(&app, player).stamina;

    // Run toggle всё ещё включён, forward держится
    tick(&mut app, 10);

    assert!(recorded::<MovementStateChanged>(&app).is_empty());
    assert!(recorded::<NoiseRadiusChanged>(&app).is_empty());

    let snap = snapshot(&app, player);
    assert_eq!(snap.state, MovementState::Crouching);
    assert!(snap.stamina >= stamina_before, "в присяде stamina не тратится");
    let machine = app.world().get::<movement::LocomotionMachine>(player).unwrap();
    assert!(!machine.is_running());

    // Снятие приседа возвращает бег
    act(&mut app, player, ActionKind::CrouchToggle);
    tick(&mut app, 1);
    assert_eq!(snapshot(&app, player).state, MovementState::Running);
}

#[test]
fn test_forward_intent_moves_along_negative_z() {
    let mut app = test_app();
    let player = spawn_test_player(&mut app);

    act(&mut app, player, ActionKind::Move(Vec2::Y));
    tick(&mut app, 1);

    let motion = app.world().get::<CharacterMotion>(player).unwrap();
    assert!(motion.velocity.z < -1.9);
    assert!(motion.velocity.x.abs() < 1e-4);
}
