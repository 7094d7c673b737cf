//! Time management for the scene clock

use bevy::prelude::*;

use crate::settings::{MAX_SPEED, MIN_SPEED, SceneSettings};

/// Scene clock resource.
///
/// Every angle in the simulation is derived from `elapsed_seconds`
/// absolutely, never from per-frame deltas, so two runs reaching the same
/// elapsed time show the same sky regardless of frame pacing or pauses.
#[derive(Resource, Debug, Clone)]
pub struct SceneClock {
    /// Accumulated scene time in seconds.
    pub elapsed_seconds: f64,
    /// Real-time multiplier applied while running.
    pub speed: f64,
    /// Frozen clocks accumulate nothing.
    pub paused: bool,
}

impl Default for SceneClock {
    fn default() -> Self {
        Self {
            elapsed_seconds: 0.0,
            speed: 1.0,
            paused: false,
        }
    }
}

impl SceneClock {
    pub fn from_settings(settings: &SceneSettings) -> Self {
        Self {
            elapsed_seconds: 0.0,
            speed: settings.start_speed,
            paused: settings.start_paused,
        }
    }

    /// Accumulate a real-time delta, scaled. Negative speeds are treated
    /// as zero so elapsed time never runs backwards.
    pub fn advance(&mut self, delta_seconds: f64) {
        if !self.paused {
            self.elapsed_seconds += delta_seconds * self.speed.max(0.0);
        }
    }

    /// Rewind the scene to its initial configuration.
    pub fn reset(&mut self) {
        self.elapsed_seconds = 0.0;
    }
}

/// System to advance the scene clock by scaled frame time
pub fn advance_scene_clock(time: Res<Time>, mut clock: ResMut<SceneClock>) {
    clock.advance(time.delta_secs_f64());
}

/// Keyboard control over the clock: Space toggles pause, `[` halves and
/// `]` doubles the speed, R rewinds to the start.
pub fn clock_controls(input: Res<ButtonInput<KeyCode>>, mut clock: ResMut<SceneClock>) {
    if input.just_pressed(KeyCode::Space) {
        clock.paused = !clock.paused;
        info!("Scene clock {}", if clock.paused { "paused" } else { "running" });
    }
    if input.just_pressed(KeyCode::BracketLeft) {
        clock.speed = (clock.speed * 0.5).max(MIN_SPEED);
        info!("Scene clock speed: {}x", clock.speed);
    }
    if input.just_pressed(KeyCode::BracketRight) {
        clock.speed = (clock.speed * 2.0).min(MAX_SPEED);
        info!("Scene clock speed: {}x", clock.speed);
    }
    if input.just_pressed(KeyCode::KeyR) {
        clock.reset();
        info!("Scene clock rewound");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_clock_default() {
        let clock = SceneClock::default();
        assert_eq!(clock.elapsed_seconds, 0.0);
        assert_eq!(clock.speed, 1.0);
        assert!(!clock.paused);
    }

    #[test]
    fn test_clock_starts_from_settings() {
        let settings = SceneSettings {
            start_speed: 4.0,
            start_paused: true,
            ..SceneSettings::default()
        };
        let clock = SceneClock::from_settings(&settings);
        assert_eq!(clock.speed, 4.0);
        assert!(clock.paused);
        assert_eq!(clock.elapsed_seconds, 0.0);
    }

    #[test]
    fn test_advance_scales_by_speed() {
        let mut clock = SceneClock {
            speed: 8.0,
            ..SceneClock::default()
        };
        clock.advance(0.25);
        assert_eq!(clock.elapsed_seconds, 2.0);
    }

    #[test]
    fn test_paused_clock_accumulates_nothing() {
        let mut clock = SceneClock {
            paused: true,
            ..SceneClock::default()
        };
        clock.advance(10.0);
        assert_eq!(clock.elapsed_seconds, 0.0);
    }

    #[test]
    fn test_negative_speed_never_rewinds() {
        let mut clock = SceneClock {
            elapsed_seconds: 5.0,
            speed: -3.0,
            paused: false,
        };
        clock.advance(1.0);
        assert_eq!(clock.elapsed_seconds, 5.0);
    }

    #[test]
    fn test_reset_rewinds_elapsed_only() {
        let mut clock = SceneClock {
            elapsed_seconds: 42.0,
            speed: 2.0,
            paused: true,
        };
        clock.reset();
        assert_eq!(clock.elapsed_seconds, 0.0);
        assert_eq!(clock.speed, 2.0);
        assert!(clock.paused);
    }
}
