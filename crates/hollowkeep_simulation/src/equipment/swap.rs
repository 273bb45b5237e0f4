//! Hotbar swap sequence (multi-frame, cooperative)
//!
//! # Flow
//! 1. `Hotbar::scroll/select` взял swap_lock и сменил active
//! 2. `begin` — rig ramp → 0
//! 3. Lowering: ждём ramp → переключаем видимость слотов
//! 4. новый слот с предметом → Raising (ramp → 1), иначе Settling (короткая пауза)
//! 5. конец → swap_lock отпускается
//!
//! Если ramp вытеснен (drop/equip запустил свой), не запускаем новый ramp:
//! Lowering всё равно переключает видимость и уходит в Settling, Raising завершается.

use bevy::prelude::*;

use crate::components::{Hotbar, RampId, RigBlendWeight, SlotChange};

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum SwapPhase {
    Lowering(RampId),
    Raising(RampId),
    Settling(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct SwapSequence {
    pub change: SlotChange,
    pub phase: SwapPhase,
}

/// Что произошло на этом шаге (применяет система)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SwapProgress {
    /// Скрыть `from`, показать `to`
    pub toggled: Option<SlotChange>,
    /// Sequence закончена → отпустить swap_lock
    pub finished: bool,
}

#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct HotbarSwap {
    sequence: Option<SwapSequence>,
}

impl HotbarSwap {
    pub fn sequence(&self) -> Option<&SwapSequence> {
        self.sequence.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.sequence.is_some()
    }

    pub fn begin(&mut self, change: SlotChange, rig: &mut RigBlendWeight) {
        let ramp = rig.start_ramp(0.0);
        self.sequence = Some(SwapSequence {
            change,
            phase: SwapPhase::Lowering(ramp),
        });
    }

    pub fn advance(
        &mut self,
        rig: &mut RigBlendWeight,
        hotbar: &Hotbar,
        settle_delay: f32,
        delta_time: f32,
    ) -> SwapProgress {
        let mut progress = SwapProgress::default();

        let Some(sequence) = self.sequence.as_mut() else {
            return progress;
        };

        let phase = sequence.phase;
        match phase {
            SwapPhase::Lowering(ramp) => {
                if rig.is_pending(ramp) {
                    return progress;
                }

                progress.toggled = Some(sequence.change);

                let superseded = !rig.completed(ramp);
                let has_item = hotbar.slot(sequence.change.to).is_some();

                sequence.phase = if !superseded && has_item {
                    SwapPhase::Raising(rig.start_ramp(1.0))
                } else {
                    SwapPhase::Settling(settle_delay)
                };
            }
            SwapPhase::Raising(ramp) => {
                if rig.is_pending(ramp) {
                    return progress;
                }
                self.sequence = None;
                progress.finished = true;
            }
            SwapPhase::Settling(remaining) => {
                let remaining = remaining - delta_time;
                if remaining > 0.0 {
                    sequence.phase = SwapPhase::Settling(remaining);
                } else {
                    self.sequence = None;
                    progress.finished = true;
                }
            }
        }

        progress
    }
}
