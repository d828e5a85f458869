use bevy::math::Vec2;
use rand::Rng;

use super::placement::{LayoutSnapshot, Placement, Placer};
use super::rect::Rect;

/// Attempt bookkeeping for one page session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvasionState {
    attempt_count: u32,
    attempt_limit: u32,
    settled: bool,
}

impl EvasionState {
    pub fn new(attempt_limit: u32) -> Self {
        EvasionState {
            attempt_count: 0,
            attempt_limit: attempt_limit.max(1),
            settled: false,
        }
    }

    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    pub fn attempt_limit(&self) -> u32 {
        self.attempt_limit
    }

    pub fn is_settled(&self) -> bool {
        self.settled
    }

    pub fn remaining(&self) -> u32 {
        self.attempt_limit.saturating_sub(self.attempt_count)
    }

    /// Count one evasion. Returns true on the call that settles the state.
    pub fn record_attempt(&mut self) -> bool {
        if self.settled {
            return false;
        }

        self.attempt_count += 1;
        if self.attempt_count >= self.attempt_limit {
            self.settled = true;
            return true;
        }
        false
    }
}

/// Read side of the rendering surface: bounding boxes on demand
pub trait GeometrySource {
    fn container_rect(&self) -> Rect;
    fn target_rect(&self) -> Rect;
    fn evader_rect(&self) -> Rect;

    fn snapshot(&self) -> LayoutSnapshot {
        LayoutSnapshot {
            container: self.container_rect(),
            target: self.target_rect(),
            evader: self.evader_rect(),
        }
    }
}

/// Write side of the rendering surface
pub trait PositionSink {
    /// `center` is relative to the container's top-left corner
    fn move_evader(&mut self, center: Vec2);
    /// Restart the short wobble cue, even if one is still playing
    fn retrigger_wobble(&mut self);
    /// The evader is now a normal, clickable button
    fn mark_interactive(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EvasionOutcome {
    /// Terminal state; nothing moved
    Settled,
    Moved {
        placement: Placement,
        just_settled: bool,
    },
}

/// Run one evasion event against a rendering surface
pub fn evade<S, K, R>(
    source: &S,
    sink: &mut K,
    state: &mut EvasionState,
    placer: &Placer,
    rng: &mut R,
) -> EvasionOutcome
where
    S: GeometrySource + ?Sized,
    K: PositionSink + ?Sized,
    R: Rng,
{
    if state.is_settled() {
        return EvasionOutcome::Settled;
    }

    let placement = placer.place(&source.snapshot(), rng);

    sink.move_evader(placement.center);
    sink.retrigger_wobble();

    let just_settled = state.record_attempt();
    if just_settled {
        sink.mark_interactive();
    }

    log::debug!(
        "evasion {}/{} -> {:?}",
        state.attempt_count(),
        state.attempt_limit(),
        placement.kind
    );

    EvasionOutcome::Moved {
        placement,
        just_settled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// In-memory stand-in for a rendered page
    struct FakeSurface {
        container: Rect,
        target: Rect,
        evader: Rect,
        wobbles: u32,
        interactive: u32,
    }

    impl FakeSurface {
        fn new(width: f32, height: f32, target_center: Vec2, evader_center: Vec2) -> Self {
            let size = Vec2::new(80.0, 40.0);
            FakeSurface {
                container: Rect::from_corners(Vec2::ZERO, Vec2::new(width, height)),
                target: Rect::from_center(target_center, size),
                evader: Rect::from_center(evader_center, size),
                wobbles: 0,
                interactive: 0,
            }
        }
    }

    impl GeometrySource for FakeSurface {
        fn container_rect(&self) -> Rect {
            self.container
        }

        fn target_rect(&self) -> Rect {
            self.target
        }

        fn evader_rect(&self) -> Rect {
            self.evader
        }
    }

    impl PositionSink for FakeSurface {
        fn move_evader(&mut self, center: Vec2) {
            let absolute = center + self.container.origin();
            self.evader = Rect::from_center(absolute, self.evader.size());
        }

        fn retrigger_wobble(&mut self) {
            self.wobbles += 1;
        }

        fn mark_interactive(&mut self) {
            self.interactive += 1;
        }
    }

    /// Split borrow so the surface can be both source and sink
    fn run(surface: &mut FakeSurface, state: &mut EvasionState, rng: &mut StdRng) -> EvasionOutcome {
        let source = FakeSurface {
            container: surface.container,
            target: surface.target,
            evader: surface.evader,
            wobbles: 0,
            interactive: 0,
        };
        evade(&source, surface, state, &Placer::default(), rng)
    }

    #[test]
    fn test_state_saturates() {
        let mut state = EvasionState::new(3);
        assert!(!state.record_attempt());
        assert!(!state.record_attempt());
        assert_eq!(state.remaining(), 1);
        assert!(state.record_attempt());
        assert!(state.is_settled());

        assert!(!state.record_attempt());
        assert_eq!(state.attempt_count(), 3);
        assert_eq!(state.remaining(), 0);
    }

    #[test]
    fn test_zero_limit_is_raised_to_one() {
        let mut state = EvasionState::new(0);
        assert_eq!(state.attempt_limit(), 1);
        assert!(state.record_attempt());
    }

    #[test]
    fn test_evade_moves_and_wobbles() {
        let mut surface = FakeSurface::new(640.0, 320.0, Vec2::new(200.0, 160.0), Vec2::new(320.0, 160.0));
        let mut state = EvasionState::new(10);
        let mut rng = StdRng::seed_from_u64(4);
        let before = surface.evader;

        let outcome = run(&mut surface, &mut state, &mut rng);

        assert!(matches!(
            outcome,
            EvasionOutcome::Moved {
                just_settled: false,
                ..
            }
        ));
        assert_ne!(surface.evader, before);
        assert_eq!(surface.wobbles, 1);
        assert_eq!(surface.interactive, 0);
        assert_eq!(state.attempt_count(), 1);
    }

    #[test]
    fn test_settles_after_limit_then_stops_moving() {
        let mut surface = FakeSurface::new(400.0, 300.0, Vec2::new(100.0, 150.0), Vec2::new(100.0, 150.0));
        let mut state = EvasionState::new(10);
        let mut rng = StdRng::seed_from_u64(21);

        let mut previous_count = 0;
        for call in 1..=10 {
            let outcome = run(&mut surface, &mut state, &mut rng);
            assert!(state.attempt_count() >= previous_count);
            previous_count = state.attempt_count();

            let EvasionOutcome::Moved { just_settled, .. } = outcome else {
                panic!("call {} should have moved", call);
            };
            assert_eq!(just_settled, call == 10);
        }

        assert!(state.is_settled());
        assert_eq!(surface.interactive, 1);
        let tenth = surface.evader;

        let outcome = run(&mut surface, &mut state, &mut rng);
        assert_eq!(outcome, EvasionOutcome::Settled);
        assert_eq!(surface.evader, tenth);
        assert_eq!(state.attempt_count(), 10);
        assert_eq!(surface.wobbles, 10);
        assert_eq!(surface.interactive, 1);
    }

    #[test]
    fn test_placements_stay_contained_in_offset_container() {
        let mut surface = FakeSurface::new(500.0, 260.0, Vec2::new(150.0, 130.0), Vec2::new(330.0, 130.0));
        let offset = Vec2::new(40.0, 90.0);
        surface.container = surface.container.relative_to(-offset);
        surface.target = surface.target.relative_to(-offset);
        surface.evader = surface.evader.relative_to(-offset);

        let padded = surface.container.inset(8.0);
        let mut state = EvasionState::new(25);
        let mut rng = StdRng::seed_from_u64(8);

        while !state.is_settled() {
            run(&mut surface, &mut state, &mut rng);
            assert!(padded.contains_rect(&surface.evader));
        }
    }
}
