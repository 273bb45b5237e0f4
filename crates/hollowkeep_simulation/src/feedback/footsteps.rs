//! Footsteps: foot-contact callbacks от анимации → шаги + звук
//!
//! Шаг засчитывается, если игрок на земле и нога "взведена".
//! Stepped разряжает ногу, Lifted взводит снова.

use bevy::prelude::*;
use rand::Rng;

use crate::components::Grounding;
use crate::config::PlayerConfig;
use crate::feedback::{AudioCue, CueKind};
use crate::DeterministicRng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Foot {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum FootContactKind {
    Stepped,
    Lifted,
}

/// Callback анимации: нога коснулась земли / оторвалась
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct FootContact {
    pub player: Entity,
    pub foot: Foot,
    pub kind: FootContactKind,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct FootstepTracker {
    left_armed: bool,
    right_armed: bool,
    left_steps: u32,
    right_steps: u32,
}

impl Default for FootstepTracker {
    fn default() -> Self {
        Self {
            left_armed: true,
            right_armed: true,
            left_steps: 0,
            right_steps: 0,
        }
    }
}

impl FootstepTracker {
    pub fn left_steps(&self) -> u32 {
        self.left_steps
    }

    pub fn right_steps(&self) -> u32 {
        self.right_steps
    }

    pub fn is_armed(&self, foot: Foot) -> bool {
        match foot {
            Foot::Left => self.left_armed,
            Foot::Right => self.right_armed,
        }
    }

    /// true → засчитан шаг (нужен звук)
    pub fn register(&mut self, foot: Foot, kind: FootContactKind, grounded: bool) -> bool {
        let (armed, steps) = match foot {
            Foot::Left => (&mut self.left_armed, &mut self.left_steps),
            Foot::Right => (&mut self.right_armed, &mut self.right_steps),
        };

        match kind {
            FootContactKind::Lifted => {
                *armed = true;
                false
            }
            FootContactKind::Stepped => {
                if !grounded || !*armed {
                    return false;
                }
                *armed = false;
                *steps += 1;
                true
            }
        }
    }
}

/// Pitch шага в [min, max] из детерминистичного RNG
pub fn sample_pitch(rng: &mut impl Rng, range: [f32; 2]) -> f32 {
    let [min, max] = range;
    if min >= max {
        return min;
    }
    rng.gen_range(min..max)
}

pub fn process_foot_contacts(
    mut contacts: EventReader<FootContact>,
    config: Res<PlayerConfig>,
    mut rng: ResMut<DeterministicRng>,
    mut players: Query<(&mut FootstepTracker, &Grounding)>,
    mut cues: EventWriter<AudioCue>,
) {
    for contact in contacts.read() {
        let Ok((mut tracker, grounding)) = players.get_mut(contact.player) else {
            continue;
        };

        if tracker.register(contact.foot, contact.kind, grounding.grounded) {
            let pitch = sample_pitch(&mut rng.rng, config.feedback.footstep_pitch);
            cues.write(AudioCue::new(contact.player, CueKind::Footstep(contact.foot)).with_pitch(pitch));
        }
    }
}
