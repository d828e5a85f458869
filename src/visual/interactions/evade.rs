use bevy::prelude::*;

use crate::{
    game::{config::EvasionConfig, session::InteractionSession},
    geometry::{EvasionOutcome, GeometrySource, Placer, PositionSink, Rect, evade},
    visual::{
        buttons::{ButtonExtent, EvaderAffordance, EvaderButton, TargetButton, Wobble},
        setup::{InitialPlacement, PlayArea},
    },
};

/// Why the evader was asked to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvadeReason {
    /// Pointer moving close to the target
    NearTarget,
    /// Touch starting close to the target
    TouchNearTarget,
    /// Pointer entered the evader
    Hover,
    /// Evader was clicked/tapped before settling
    Activated,
}

#[derive(Message, Debug, Clone, Copy)]
pub struct EvadeRequest {
    pub reason: EvadeReason,
}

/// Board geometry seen through the placer's layout frame
struct WorldLayout<'a> {
    area: &'a PlayArea,
    target: Rect,
    evader: Rect,
}

impl<'a> WorldLayout<'a> {
    fn new(area: &'a PlayArea, target: (&Transform, &ButtonExtent), evader: (&Transform, &ButtonExtent)) -> Self {
        WorldLayout {
            area,
            target: area.layout_rect(target.0.translation.truncate(), target.1.size),
            evader: area.layout_rect(evader.0.translation.truncate(), evader.1.size),
        }
    }
}

impl GeometrySource for WorldLayout<'_> {
    fn container_rect(&self) -> Rect {
        self.area.container_rect()
    }

    fn target_rect(&self) -> Rect {
        self.target
    }

    fn evader_rect(&self) -> Rect {
        self.evader
    }
}

/// Writes placements back onto the evader entity
struct EvaderSink<'a> {
    area: &'a PlayArea,
    transform: &'a mut Transform,
    wobble: &'a mut Wobble,
    affordance: &'a mut EvaderAffordance,
}

impl PositionSink for EvaderSink<'_> {
    fn move_evader(&mut self, center: Vec2) {
        // Already on whole pixels in the layout frame
        let world = self.area.to_world(center);
        self.transform.translation.x = world.x;
        self.transform.translation.y = world.y;
    }

    fn retrigger_wobble(&mut self) {
        self.wobble.retrigger();
    }

    fn mark_interactive(&mut self) {
        self.affordance.interactive = true;
    }
}

/// System: Run queued evasions (several requests in one frame make one jump)
///
/// Requests that arrive before the evader is first shown are dropped so they
/// do not use up attempts on jumps nobody sees.
pub fn apply_evasions(
    mut requests: MessageReader<EvadeRequest>,
    area: Res<PlayArea>,
    initial: Res<InitialPlacement>,
    config: Res<EvasionConfig>,
    mut session: ResMut<InteractionSession>,
    targets: Query<(&Transform, &ButtonExtent), (With<TargetButton>, Without<EvaderButton>)>,
    mut evaders: Query<
        (
            &mut Transform,
            &ButtonExtent,
            &Visibility,
            &mut Wobble,
            &mut EvaderAffordance,
        ),
        (With<EvaderButton>, Without<TargetButton>),
    >,
) {
    let Some(request) = requests.read().last().copied() else {
        return;
    };
    if !session.is_playing() || !initial.done {
        return;
    }

    let Ok(target) = targets.single() else {
        return;
    };
    let Ok((mut transform, extent, visibility, mut wobble, mut affordance)) = evaders.single_mut()
    else {
        return;
    };
    if *visibility == Visibility::Hidden {
        debug!("Evader hidden, dropping {:?} request", request.reason);
        return;
    }

    let layout = WorldLayout::new(&area, target, (&*transform, extent));
    let mut sink = EvaderSink {
        area: &area,
        transform: &mut transform,
        wobble: &mut wobble,
        affordance: &mut affordance,
    };

    let placer = Placer::new(config.placement);
    let outcome = evade(
        &layout,
        &mut sink,
        session.state_mut(),
        &placer,
        &mut rand::rng(),
    );

    match outcome {
        EvasionOutcome::Settled => {}
        EvasionOutcome::Moved {
            placement,
            just_settled,
        } => {
            let state = session.state();
            info!(
                "🏃 Evaded ({:?}) {}/{}, {} left -> ({:.0}, {:.0}) {:?}",
                request.reason,
                state.attempt_count(),
                state.attempt_limit(),
                state.remaining(),
                placement.center.x,
                placement.center.y,
                placement.kind
            );
            if just_settled {
                info!("Evader settled after {} attempts", state.attempt_count());
            }
        }
    }
}
