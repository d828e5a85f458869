// game/session.rs

use bevy::math::Vec2;
use bevy::prelude::Resource;

use crate::geometry::EvasionState;

/// Where the page is in its short life
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Buttons are live, the evader may still run
    Playing,
    /// Target was activated; confetti is flying
    Celebrating,
    /// Settled evader was activated
    Declined,
}

/// What an activation of the evader turns into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaderActivation {
    /// Still shy: swallow the click and run
    Evade,
    /// Settled: accept the "no"
    SoftDecline,
    Ignored,
}

/// What an activation of the target turns into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetActivation {
    Celebrate,
    Ignored,
}

/// The interaction session - decides when the evader runs and when the page ends
#[derive(Debug, Clone, Resource)]
pub struct InteractionSession {
    /// Evasion attempts so far
    state: EvasionState,
    phase: Phase,
    /// Pointer distance from the target center that triggers an evasion
    proximity_radius: f32,
}

impl InteractionSession {
    pub fn new(attempt_limit: u32, proximity_radius: f32) -> Self {
        InteractionSession {
            state: EvasionState::new(attempt_limit),
            phase: Phase::Playing,
            proximity_radius,
        }
    }

    // === Query Methods ===

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }

    pub fn is_settled(&self) -> bool {
        self.state.is_settled()
    }

    pub fn state(&self) -> &EvasionState {
        &self.state
    }

    /// Is `pointer` close enough to the target to scare the evader?
    pub fn is_near_target(&self, pointer: Vec2, target_center: Vec2) -> bool {
        pointer.distance(target_center) < self.proximity_radius
    }

    // === Trigger Methods (return true when an evasion should run) ===

    /// Mouse moved somewhere over the play area
    pub fn pointer_moved(&self, pointer: Vec2, target_center: Vec2) -> bool {
        self.is_playing() && self.is_near_target(pointer, target_center)
    }

    /// A touch began somewhere over the play area
    pub fn touch_started(&self, pointer: Vec2, target_center: Vec2) -> bool {
        self.is_playing() && self.is_near_target(pointer, target_center)
    }

    /// Pointer entered the evader
    pub fn evader_entered(&self) -> bool {
        self.is_playing()
    }

    // === Mutation Methods ===

    pub fn activate_evader(&mut self) -> EvaderActivation {
        if !self.is_playing() {
            return EvaderActivation::Ignored;
        }

        if self.state.is_settled() {
            self.phase = Phase::Declined;
            EvaderActivation::SoftDecline
        } else {
            EvaderActivation::Evade
        }
    }

    pub fn activate_target(&mut self) -> TargetActivation {
        if !self.is_playing() {
            return TargetActivation::Ignored;
        }

        self.phase = Phase::Celebrating;
        TargetActivation::Celebrate
    }

    /// Mutable access for the placer
    pub fn state_mut(&mut self) -> &mut EvasionState {
        &mut self.state
    }
}
