//! Общие helpers для integration тестов
//!
//! - `test_app` — headless App + SimulationPlugin, один fixed tick на `update()`
//! - `Recorded<E>` — все события E, записанные за прогон (система в `Last`)

#![allow(dead_code)]

use bevy::prelude::*;
use hollowkeep_simulation::*;

/// Все события E с начала прогона
#[derive(Resource)]
pub struct Recorded<E: Event + Clone>(pub Vec<E>);

fn record<E: Event + Clone>(mut reader: EventReader<E>, mut recorded: ResMut<Recorded<E>>) {
    recorded.0.extend(reader.read().cloned());
}

pub fn record_events<E: Event + Clone>(app: &mut App) {
    app.insert_resource(Recorded::<E>(Vec::new()))
        .add_systems(Last, record::<E>);
}

pub fn recorded<E: Event + Clone>(app: &App) -> Vec<E> {
    app.world().resource::<Recorded<E>>().0.clone()
}

pub fn clear_recorded<E: Event + Clone>(app: &mut App) {
    app.world_mut().resource_mut::<Recorded<E>>().0.clear();
}

/// Headless App с дефолтным конфигом
pub fn test_app() -> App {
    test_app_with_config(PlayerConfig::default())
}

pub fn test_app_with_config(config: PlayerConfig) -> App {
    let mut app = create_headless_app(42);
    app.add_plugins(SimulationPlugin).insert_resource(config);

    // Первый update только запоминает стартовое время (fixed tick не идёт)
    app.update();

    app
}

pub fn spawn_test_player(app: &mut App) -> Entity {
    let config = app.world().resource::<PlayerConfig>().clone();
    let world = app.world_mut();
    let player = spawn_player(&mut world.commands(), &config, Vec3::ZERO);
    world.flush();
    player
}

pub fn spawn_item(app: &mut App, item: Item, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((item, Transform::from_translation(position)))
        .id()
}

pub fn act(app: &mut App, player: Entity, kind: ActionKind) {
    app.world_mut().send_event(PlayerAction::new(player, kind));
}

pub fn tick(app: &mut App, count: usize) {
    for _ in 0..count {
        app.update();
    }
}

pub fn snapshot(app: &App, player: Entity) -> PlayerSnapshot {
    PlayerSnapshot::capture(app.world(), player).expect("player components present")
}

pub fn set_grounded(app: &mut App, player: Entity, grounded: bool) {
    let mut grounding = app
        .world_mut()
        .get_mut::<Grounding>(player)
        .expect("player has Grounding");
    grounding.grounded = grounded;
}

pub fn hotbar(app: &App, player: Entity) -> Hotbar {
    app.world()
        .get::<Hotbar>(player)
        .expect("player has Hotbar")
        .clone()
}

/// Equip + дождаться конца ramp
pub fn equip_and_settle(app: &mut App, player: Entity, item: Entity) {
    act(app, player, ActionKind::Equip { target: item });
    tick(app, 20);
}
