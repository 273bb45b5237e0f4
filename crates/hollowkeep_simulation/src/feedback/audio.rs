//! Audio cues — что проиграть, не как (микшер/spatialization снаружи)

use bevy::prelude::*;

use crate::feedback::Foot;
use crate::input::ItemToggled;
use crate::movement::PlayerFatigued;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum CueKind {
    ItemPickup,
    ItemDrop,
    ItemThrow,
    ScrollInventory,
    ScrollInventoryEmpty,
    StaminaDepleted,
    Footstep(Foot),
    ItemInteract,
}

/// Запрос проиграть звук в точке `source`
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct AudioCue {
    pub source: Entity,
    pub kind: CueKind,
    pub pitch: f32,
}

impl AudioCue {
    pub fn new(source: Entity, kind: CueKind) -> Self {
        Self {
            source,
            kind,
            pitch: 1.0,
        }
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch;
        self
    }
}

/// Одышка при истощении stamina
pub fn play_fatigue_cue(mut fatigued: EventReader<PlayerFatigued>, mut cues: EventWriter<AudioCue>) {
    for event in fatigued.read() {
        cues.write(AudioCue::new(event.entity, CueKind::StaminaDepleted));
    }
}

/// Щелчок предмета (фонарик, рация)
pub fn play_interaction_cues(mut toggled: EventReader<ItemToggled>, mut cues: EventWriter<AudioCue>) {
    for event in toggled.read() {
        cues.write(AudioCue::new(event.item, CueKind::ItemInteract));
    }
}
