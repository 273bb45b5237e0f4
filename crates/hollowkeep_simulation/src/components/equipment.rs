//! Hotbar: слоты предметов в руке
//!
//! # Архитектура
//!
//! **Hotbar** — кольцо из N слотов (N фиксирован при spawn, ≥ 1):
//! - `active` — единственный источник правды "что сейчас в руке"
//! - видим максимум один слот (визуал слотов — `HandSlot` entities)
//! - equip кладёт в активный слот, иначе в первый пустой по кольцу от active+1
//!
//! **Locks** (try-acquire, при конкуренции запрос отбрасывается):
//! - `equip_lock` — держится пока идёт detach (drop/throw) до конца rig ramp
//! - `swap_lock` — держится на всё время swap sequence

use bevy::prelude::*;

use crate::components::rig::{RampId, RigBlendWeight};
use crate::error::{PlayerError, PlayerResult};

/// Предмет в слоте (ссылка на item entity + кэш capability)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct HeldItem {
    pub entity: Entity,
    pub throwable: bool,
}

/// Advisory lock: try_acquire без ожидания
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub struct AdvisoryLock {
    held: bool,
}

impl AdvisoryLock {
    /// true → lock взят нами. false → уже занят, запрос надо отбросить.
    pub fn try_acquire(&mut self) -> bool {
        if self.held {
            return false;
        }
        self.held = true;
        true
    }

    pub fn release(&mut self) {
        self.held = false;
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}

/// Смена активного слота (начало swap sequence)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub struct SlotChange {
    pub from: usize,
    pub to: usize,
}

/// Почему equip не выполнен (не ошибки — тихий отказ)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EquipRejection {
    /// Идёт drop/throw
    Locked,
    /// Все слоты заняты
    HandsFull,
}

#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Hotbar {
    slots: Vec<Option<HeldItem>>,
    active: usize,
    equip_lock: AdvisoryLock,
    swap_lock: AdvisoryLock,
    /// Rig ramp, до завершения которого держится equip_lock
    equip_lock_ramp: Option<RampId>,
}

impl Default for Hotbar {
    fn default() -> Self {
        Self::new(4)
    }
}

impl Hotbar {
    /// slot_count < 1 поднимается до 1
    pub fn new(slot_count: usize) -> Self {
        Self {
            slots: vec![None; slot_count.max(1)],
            active: 0,
            equip_lock: AdvisoryLock::default(),
            swap_lock: AdvisoryLock::default(),
            equip_lock_ramp: None,
        }
    }

    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_item(&self) -> Option<HeldItem> {
        self.slot(self.active)
    }

    /// None для пустого слота и для index вне диапазона
    pub fn slot(&self, index: usize) -> Option<HeldItem> {
        self.slots.get(index).copied().flatten()
    }

    pub fn occupied_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.occupied_count() == self.slots.len()
    }

    pub fn is_equip_locked(&self) -> bool {
        self.equip_lock.is_held()
    }

    pub fn is_swap_locked(&self) -> bool {
        self.swap_lock.is_held()
    }

    /// Слот для нового предмета: активный если пустой, иначе первый пустой
    /// по кольцу active+1 .. active+N-1. Каждый слот проверяется максимум раз.
    pub fn find_target_slot(&self) -> Option<usize> {
        let count = self.slots.len();

        (0..count)
            .map(|offset| (self.active + offset) % count)
            .find(|&index| self.slots[index].is_none())
    }

    /// Положить предмет. Ok(slot) — куда положили.
    pub fn equip(&mut self, item: HeldItem) -> Result<usize, EquipRejection> {
        if self.equip_lock.is_held() {
            return Err(EquipRejection::Locked);
        }

        let index = self.find_target_slot().ok_or(EquipRejection::HandsFull)?;
        self.slots[index] = Some(item);
        Ok(index)
    }

    /// Начать drop/throw активного предмета.
    ///
    /// None если рука пустая, throw для не-throwable, или equip_lock занят.
    /// Some → предмет вынут из слота, equip_lock взят (отпустить через
    /// `hold_equip_lock_until` + `release_equip_lock_if_done`).
    pub fn begin_detach(&mut self, throw: bool) -> Option<(usize, HeldItem)> {
        let item = self.active_item()?;
        if throw && !item.throwable {
            return None;
        }
        if !self.equip_lock.try_acquire() {
            return None;
        }

        self.slots[self.active] = None;
        Some((self.active, item))
    }

    pub fn hold_equip_lock_until(&mut self, ramp: RampId) {
        self.equip_lock_ramp = Some(ramp);
    }

    /// Отпустить equip_lock когда detach ramp завершён или вытеснен
    pub fn release_equip_lock_if_done(&mut self, rig: &RigBlendWeight) -> bool {
        let Some(ramp) = self.equip_lock_ramp else {
            return false;
        };
        if rig.is_pending(ramp) {
            return false;
        }

        self.equip_lock_ramp = None;
        self.equip_lock.release();
        true
    }

    /// Вынуть все предметы (teardown). Проходит ВСЕ слоты.
    pub fn drain(&mut self) -> Vec<(usize, HeldItem)> {
        self.slots
            .iter_mut()
            .enumerate()
            .filter_map(|(index, slot)| slot.take().map(|item| (index, item)))
            .collect()
    }

    /// Колесо: delta < 0 → следующий слот, delta > 0 → предыдущий (с wraparound)
    pub fn scroll(&mut self, delta: f32) -> Option<SlotChange> {
        if delta == 0.0 {
            return None;
        }

        let count = self.slots.len();
        let target = if delta < 0.0 {
            (self.active + 1) % count
        } else {
            (self.active + count - 1) % count
        };

        self.begin_swap(target)
    }

    /// Прямой выбор слота (hotkey)
    pub fn select(&mut self, index: usize) -> PlayerResult<Option<SlotChange>> {
        if index >= self.slots.len() {
            return Err(PlayerError::SlotOutOfRange {
                index,
                count: self.slots.len(),
            });
        }

        Ok(self.begin_swap(index))
    }

    /// Swap sequence закончена
    pub fn finish_swap(&mut self) {
        self.swap_lock.release();
    }

    fn begin_swap(&mut self, target: usize) -> Option<SlotChange> {
        if target == self.active {
            return None;
        }
        if !self.swap_lock.try_acquire() {
            return None;
        }

        let change = SlotChange {
            from: self.active,
            to: target,
        };
        self.active = target;
        Some(change)
    }
}

/// Визуальный слот руки (child entity игрока)
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct HandSlot {
    pub owner: Entity,
    pub index: usize,
    pub visible: bool,
}

/// Рука игрока: entities слотов + точка отпускания предметов
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PlayerHand {
    pub slots: Vec<Entity>,
    /// Смещение руки относительно Transform игрока (local space)
    pub anchor_offset: Vec3,
}
