//! Equipment events (notifications + teardown request)
//!
//! # Flow
//! - `ItemPickedUp` — предмет лёг в слот (после circular search)
//! - `ItemRemoved` — предмет покинул слот (drop / throw / teardown)
//! - `HotbarScrolled` — началась swap sequence на новый активный слот
//! - `SessionTeardown` — конец сессии: все предметы в мир + отчёт статистики

use bevy::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemPickedUp {
    pub player: Entity,
    pub item: Entity,
    pub slot: usize,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemRemoved {
    pub player: Entity,
    pub item: Entity,
    pub slot: usize,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotbarScrolled {
    pub player: Entity,
    pub index: usize,
}

/// Запрос: закончить сессию игрока (RemoveAll + SessionStats)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTeardown {
    pub player: Entity,
}
