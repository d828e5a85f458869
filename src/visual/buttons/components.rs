use bevy::prelude::*;

use crate::visual::utils::ease_out_cubic;

/// The static, affirmative button
#[derive(Component)]
pub struct TargetButton;

/// The button that runs away
#[derive(Component)]
pub struct EvaderButton;

/// Backdrop of the play area and everything on it; hidden when the page ends
#[derive(Component)]
pub struct PlayAreaMember;

/// Size of a button in world units (logical pixels)
#[derive(Component, Debug, Clone, Copy)]
pub struct ButtonExtent {
    pub size: Vec2,
}

/// Short shake played after each jump
#[derive(Component, Debug, Clone, Copy)]
pub struct Wobble {
    /// Seconds since the last (re)trigger
    pub elapsed: f32,
    /// 1.0 right after a trigger, 0.0 when at rest
    pub amplitude: f32,
}

/// Wobble length in seconds
const WOBBLE_DURATION: f32 = 0.45;
/// Oscillations per second
const WOBBLE_FREQUENCY: f32 = 9.0;
/// Peak tilt in radians
const WOBBLE_MAX_ANGLE: f32 = 0.18;

impl Default for Wobble {
    fn default() -> Self {
        Wobble {
            elapsed: WOBBLE_DURATION,
            amplitude: 0.0,
        }
    }
}

impl Wobble {
    /// Restart from the beginning, even mid-wobble
    pub fn retrigger(&mut self) {
        self.elapsed = 0.0;
        self.amplitude = 1.0;
    }

    pub fn is_active(&self) -> bool {
        self.amplitude > 0.0
    }

    /// Advance by `dt` and return the tilt angle for this frame
    pub fn advance(&mut self, dt: f32) -> f32 {
        if !self.is_active() {
            return 0.0;
        }

        self.elapsed += dt;
        if self.elapsed >= WOBBLE_DURATION {
            self.amplitude = 0.0;
            return 0.0;
        }

        self.amplitude = ease_out_cubic(1.0 - self.elapsed / WOBBLE_DURATION);
        let phase = self.elapsed * WOBBLE_FREQUENCY * std::f32::consts::TAU;
        phase.sin() * self.amplitude * WOBBLE_MAX_ANGLE
    }
}

/// Once true the evader is a normal, clickable button
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct EvaderAffordance {
    pub interactive: bool,
}
