//! Статистика сессии (отчёт на teardown)

use serde::{Deserialize, Serialize};

use crate::components::MovementStats;
use crate::feedback::FootstepTracker;
use crate::movement::LocomotionMachine;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub walk_time: f32,
    pub run_time: f32,
    pub crouch_time: f32,
    pub crouch_count: u32,
    pub jump_count: u32,
    pub left_footsteps: u32,
    pub right_footsteps: u32,
}

impl GameStats {
    pub fn collect(stats: &MovementStats, machine: &LocomotionMachine, footsteps: &FootstepTracker) -> Self {
        Self {
            walk_time: stats.walk_time,
            run_time: stats.run_time,
            crouch_time: stats.crouch_time,
            crouch_count: machine.crouch_count(),
            jump_count: machine.jump_count(),
            left_footsteps: footsteps.left_steps(),
            right_footsteps: footsteps.right_steps(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
