//! Headless симуляция HOLLOWKEEP
//!
//! Скриптованная сессия: подобрать фонарь, пробежаться до усталости,
//! переключить слот, выбросить предмет, закончить сессию.

use bevy::prelude::*;
use hollowkeep_simulation::{
    create_headless_app, spawn_player, ActionKind, Item, PlayerAction, PlayerConfig, PlayerSnapshot,
    SessionTeardown, SimulationPlugin,
};

fn send(app: &mut App, player: Entity, kind: ActionKind) {
    app.world_mut().send_event(PlayerAction::new(player, kind));
}

fn main() {
    let seed = 42;
    println!("Starting HOLLOWKEEP headless simulation (seed: {})", seed);

    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);

    let config = PlayerConfig::default();
    let world = app.world_mut();
    let player = spawn_player(&mut world.commands(), &config, Vec3::ZERO);
    let lantern = world
        .spawn((Item::new("Lantern"), Transform::from_xyz(0.0, 0.0, -1.0)))
        .id();
    let bottle = world
        .spawn((Item::new("Bottle").throwable(), Transform::from_xyz(1.0, 0.0, 0.0)))
        .id();
    world.flush();

    for tick in 0..900 {
        match tick {
            10 => send(&mut app, player, ActionKind::Equip { target: lantern }),
            20 => send(&mut app, player, ActionKind::Equip { target: bottle }),
            30 => send(&mut app, player, ActionKind::ClickAlternate),
            60 => {
                send(&mut app, player, ActionKind::Move(Vec2::Y));
                send(&mut app, player, ActionKind::RunToggle);
            }
            500 => send(&mut app, player, ActionKind::Scroll(-1.0)),
            600 => send(&mut app, player, ActionKind::Throw),
            700 => send(&mut app, player, ActionKind::Move(Vec2::ZERO)),
            _ => {}
        }

        app.update();

        if tick % 100 == 0 {
            if let Some(snapshot) = PlayerSnapshot::capture(app.world(), player) {
                println!("Tick {}: {:?}", tick, snapshot);
            }
        }
    }

    app.world_mut().send_event(SessionTeardown { player });
    app.update();

    println!("Simulation complete!");
}
