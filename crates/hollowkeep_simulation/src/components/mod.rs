//! ECS Components игрока и предметов
//!
//! Организация по доменам:
//! - actor: ресурсы (Stamina, Health)
//! - movement: ввод движения, grounding, выход для controller/анимации
//! - rig: вес IK руки (RigBlendWeight, RampId)
//! - equipment: hotbar (Hotbar, HandSlot, PlayerHand)
//! - item: предметы мира (Item, Interactable)
//! - player: player control marker (Player)

pub mod actor;
pub mod equipment;
pub mod item;
pub mod movement;
pub mod player;
pub mod rig;

// Re-exports для удобного импорта
pub use actor::*;
pub use equipment::*;
pub use item::*;
pub use movement::*;
pub use player::*;
pub use rig::*;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod actor_tests;
