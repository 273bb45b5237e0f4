//! Hand rig blend weight (IK руки с предметом)
//!
//! # Ramp
//! Вес идёт к 0 или 1 фиксированными шагами (`steps` шагов, один шаг на
//! `step_interval` сек). Первый шаг применяется сразу при следующем `advance`.
//!
//! Новый ramp отменяет текущий. Каждый ramp имеет `RampId` — ожидающие
//! последовательности (swap, drop) проверяют по нему: ramp ещё идёт / завершился /
//! был вытеснен другим ramp'ом.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub struct RampId(u32);

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
struct RigRamp {
    id: RampId,
    target: f32,
    elapsed: f32,
}

#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct RigBlendWeight {
    weight: f32,
    steps: u32,
    step_interval: f32,
    ramp: Option<RigRamp>,
    last_completed: Option<RampId>,
    next_id: u32,
}

impl Default for RigBlendWeight {
    fn default() -> Self {
        Self::new(10, 0.01)
    }
}

impl RigBlendWeight {
    pub fn new(steps: u32, step_interval: f32) -> Self {
        Self {
            weight: 0.0,
            steps: steps.max(1),
            step_interval: step_interval.max(1e-4),
            ramp: None,
            last_completed: None,
            next_id: 0,
        }
    }

    /// Текущий вес, всегда в [0, 1]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    pub fn target(&self) -> Option<f32> {
        self.ramp.map(|ramp| ramp.target)
    }

    pub fn is_ramping(&self) -> bool {
        self.ramp.is_some()
    }

    /// Запустить ramp к target (clamp в [0, 1]), отменив текущий
    pub fn start_ramp(&mut self, target: f32) -> RampId {
        let id = RampId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);

        self.ramp = Some(RigRamp {
            id,
            target: target.clamp(0.0, 1.0),
            elapsed: self.step_interval,
        });

        id
    }

    /// Продвинуть ramp. Возвращает id если ramp завершился на этом вызове.
    pub fn advance(&mut self, delta_time: f32) -> Option<RampId> {
        let mut ramp = self.ramp.take()?;
        let step = 1.0 / self.steps as f32;

        ramp.elapsed += delta_time.max(0.0);
        while ramp.elapsed >= self.step_interval && self.weight != ramp.target {
            ramp.elapsed -= self.step_interval;
            self.weight = step_towards(self.weight, ramp.target, step);
        }

        if self.weight == ramp.target {
            self.last_completed = Some(ramp.id);
            return Some(ramp.id);
        }

        self.ramp = Some(ramp);
        None
    }

    /// Ramp с этим id всё ещё выполняется
    pub fn is_pending(&self, id: RampId) -> bool {
        self.ramp.is_some_and(|ramp| ramp.id == id)
    }

    /// Ramp с этим id дошёл до цели (последний завершённый).
    /// Не pending и не completed → вытеснен другим ramp'ом.
    pub fn completed(&self, id: RampId) -> bool {
        self.last_completed == Some(id)
    }
}

fn step_towards(current: f32, target: f32, step: f32) -> f32 {
    if target > current {
        (current + step).min(target)
    } else {
        (current - step).max(target)
    }
}
