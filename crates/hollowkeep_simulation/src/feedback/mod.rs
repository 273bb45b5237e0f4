//! Feedback domain — audio cues, world noise radius, footsteps
//!
//! Симуляция только публикует *что* произошло (AudioCue, NoiseRadiusChanged);
//! микшер, 3D-звук и триггеры для врагов живут у коллабораторов.

use bevy::prelude::*;

pub mod audio;
pub mod footsteps;
pub mod noise;

pub use audio::*;
pub use footsteps::*;
pub use noise::*;

use crate::PlayerSet;

pub struct FeedbackPlugin;

impl Plugin for FeedbackPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<AudioCue>()
            .add_event::<NoiseRadiusChanged>()
            .add_event::<FootContact>()
            .add_systems(
                FixedUpdate,
                (
                    play_fatigue_cue,
                    play_interaction_cues,
                    process_foot_contacts,
                    update_player_noise,
                    tick_noise_pulses,
                    pulse_toggled_items,
                )
                    .chain()
                    .in_set(PlayerSet::Feedback),
            );
    }
}
