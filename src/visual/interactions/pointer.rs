use bevy::prelude::*;

use crate::{
    camera::MainCamera,
    game::session::{EvaderActivation, InteractionSession, TargetActivation},
    geometry::Rect,
    input::{KeyActivation, PointerEvent, PointerEventType},
    visual::{
        buttons::{ButtonExtent, EvaderButton, TargetButton},
        celebration::{Celebrate, SoftDecline},
        interactions::evade::{EvadeReason, EvadeRequest},
        setup::PlayArea,
    },
};

#[derive(Resource, Default)]
pub struct HoverState {
    /// Was the mouse over the evader on the last move?
    pub over_evader: bool,
}

/// Where the two buttons currently are, in the layout frame
#[derive(Debug, Clone, Copy)]
struct ButtonHits {
    target: Rect,
    /// None while the evader is hidden
    evader: Option<Rect>,
}

/// What one pointer event asks of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PointerIntent {
    Evade(EvadeReason),
    ActivateTarget,
    ActivateEvader,
}

/// Outgoing messages for one frame of input
struct Dispatch<'a, 'we, 'wc, 'wd> {
    evade: &'a mut MessageWriter<'we, EvadeRequest>,
    celebrate: &'a mut MessageWriter<'wc, Celebrate>,
    decline: &'a mut MessageWriter<'wd, SoftDecline>,
}

impl Dispatch<'_, '_, '_, '_> {
    fn apply(&mut self, intent: PointerIntent, session: &mut InteractionSession) {
        match intent {
            PointerIntent::Evade(reason) => {
                self.evade.write(EvadeRequest { reason });
            }
            PointerIntent::ActivateTarget => self.target_activated(session),
            PointerIntent::ActivateEvader => self.evader_activated(session),
        }
    }

    fn target_activated(&mut self, session: &mut InteractionSession) {
        match session.activate_target() {
            TargetActivation::Celebrate => {
                info!("💕 Target activated - celebrating!");
                self.celebrate.write(Celebrate);
            }
            TargetActivation::Ignored => {
                debug!("Target activation ignored while {:?}", session.phase());
            }
        }
    }

    fn evader_activated(&mut self, session: &mut InteractionSession) {
        match session.activate_evader() {
            EvaderActivation::Evade => {
                self.evade.write(EvadeRequest {
                    reason: EvadeReason::Activated,
                });
            }
            EvaderActivation::SoftDecline => {
                info!("Evader activated after settling - soft decline");
                self.decline.write(SoftDecline);
            }
            EvaderActivation::Ignored => {
                debug!("Evader activation ignored while {:?}", session.phase());
            }
        }
    }
}

/// Decide what a single pointer event means. `pointer` is in the layout frame.
fn route_pointer(
    event_type: PointerEventType,
    is_touch: bool,
    pointer: Vec2,
    hits: &ButtonHits,
    session: &InteractionSession,
    hover: &mut HoverState,
) -> Vec<PointerIntent> {
    let mut intents = Vec::new();
    let target_center = hits.target.center();
    let over_evader = hits.evader.is_some_and(|rect| rect.contains_point(pointer));

    match event_type {
        PointerEventType::Move => {
            if is_touch {
                return intents;
            }

            // Enter is edge-triggered: only the move that crosses into the evader
            if over_evader && !hover.over_evader && session.evader_entered() {
                intents.push(PointerIntent::Evade(EvadeReason::Hover));
            }
            hover.over_evader = over_evader;

            if session.pointer_moved(pointer, target_center) {
                intents.push(PointerIntent::Evade(EvadeReason::NearTarget));
            }
        }

        PointerEventType::Down => {
            if hits.target.contains_point(pointer) {
                intents.push(PointerIntent::ActivateTarget);
            } else if over_evader {
                intents.push(PointerIntent::ActivateEvader);
            } else if is_touch && session.touch_started(pointer, target_center) {
                intents.push(PointerIntent::Evade(EvadeReason::TouchNearTarget));
            }
        }

        PointerEventType::Up => {
            if is_touch {
                hover.over_evader = false;
            }
        }
    }

    intents
}

/// System: Turn pointer and keyboard input into evasions and activations
pub fn handle_pointer_input(
    mut pointer_events: MessageReader<PointerEvent>,
    mut key_activations: MessageReader<KeyActivation>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    targets: Query<(&Transform, &ButtonExtent), With<TargetButton>>,
    evaders: Query<(&Transform, &ButtonExtent, &Visibility), With<EvaderButton>>,
    area: Res<PlayArea>,
    mut session: ResMut<InteractionSession>,
    mut hover_state: ResMut<HoverState>,
    mut evade_writer: MessageWriter<EvadeRequest>,
    mut celebrate_writer: MessageWriter<Celebrate>,
    mut decline_writer: MessageWriter<SoftDecline>,
) {
    let mut dispatch = Dispatch {
        evade: &mut evade_writer,
        celebrate: &mut celebrate_writer,
        decline: &mut decline_writer,
    };

    for activation in key_activations.read() {
        let intent = match activation {
            KeyActivation::Target => PointerIntent::ActivateTarget,
            KeyActivation::Evader => PointerIntent::ActivateEvader,
        };
        dispatch.apply(intent, &mut session);
    }

    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok((target_transform, target_extent)) = targets.single() else {
        return;
    };
    let Ok((evader_transform, evader_extent, evader_visibility)) = evaders.single() else {
        return;
    };

    let hits = ButtonHits {
        target: area.layout_rect(target_transform.translation.truncate(), target_extent.size),
        evader: (*evader_visibility != Visibility::Hidden)
            .then(|| area.layout_rect(evader_transform.translation.truncate(), evader_extent.size)),
    };

    for event in pointer_events.read() {
        let Some(world_pos) = event.to_world_position(camera, camera_transform) else {
            continue;
        };

        let pointer = area.to_layout(world_pos);
        let intents = route_pointer(
            event.event_type,
            event.is_touch(),
            pointer,
            &hits,
            &session,
            &mut hover_state,
        );
        for intent in intents {
            dispatch.apply(intent, &mut session);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Vec2 = Vec2::new(112.0, 48.0);

    /// Target at (100, 130), evader far enough away to be outside the proximity radius
    fn hits() -> ButtonHits {
        ButtonHits {
            target: Rect::from_center(Vec2::new(100.0, 130.0), SIZE),
            evader: Some(Rect::from_center(Vec2::new(400.0, 130.0), SIZE)),
        }
    }

    fn mouse_move(pointer: Vec2, session: &InteractionSession, hover: &mut HoverState) -> Vec<PointerIntent> {
        route_pointer(PointerEventType::Move, false, pointer, &hits(), session, hover)
    }

    #[test]
    fn test_hover_enter_fires_once_per_crossing() {
        let session = InteractionSession::new(10, 120.0);
        let mut hover = HoverState::default();
        let outside = Vec2::new(300.0, 20.0);
        let inside = Vec2::new(400.0, 130.0);

        assert!(mouse_move(outside, &session, &mut hover).is_empty());
        assert_eq!(
            mouse_move(inside, &session, &mut hover),
            vec![PointerIntent::Evade(EvadeReason::Hover)]
        );
        // Still inside: no new enter
        assert!(mouse_move(inside + Vec2::new(5.0, 0.0), &session, &mut hover).is_empty());

        assert!(mouse_move(outside, &session, &mut hover).is_empty());
        assert_eq!(
            mouse_move(inside, &session, &mut hover),
            vec![PointerIntent::Evade(EvadeReason::Hover)]
        );
    }

    #[test]
    fn test_hidden_evader_cannot_be_entered() {
        let session = InteractionSession::new(10, 120.0);
        let mut hover = HoverState::default();
        let hidden = ButtonHits {
            evader: None,
            ..hits()
        };

        let intents = route_pointer(
            PointerEventType::Move,
            false,
            Vec2::new(400.0, 130.0),
            &hidden,
            &session,
            &mut hover,
        );
        assert!(intents.is_empty());
        assert!(!hover.over_evader);
    }

    #[test]
    fn test_mouse_near_target_evades() {
        let session = InteractionSession::new(10, 120.0);
        let mut hover = HoverState::default();

        assert_eq!(
            mouse_move(Vec2::new(180.0, 130.0), &session, &mut hover),
            vec![PointerIntent::Evade(EvadeReason::NearTarget)]
        );
    }

    #[test]
    fn test_touch_on_target_activates_instead_of_evading() {
        let session = InteractionSession::new(10, 120.0);
        let mut hover = HoverState::default();

        let on_target = route_pointer(
            PointerEventType::Down,
            true,
            Vec2::new(100.0, 130.0),
            &hits(),
            &session,
            &mut hover,
        );
        assert_eq!(on_target, vec![PointerIntent::ActivateTarget]);

        let near_target = route_pointer(
            PointerEventType::Down,
            true,
            Vec2::new(100.0, 200.0),
            &hits(),
            &session,
            &mut hover,
        );
        assert_eq!(near_target, vec![PointerIntent::Evade(EvadeReason::TouchNearTarget)]);
    }

    #[test]
    fn test_mouse_down_near_target_does_nothing() {
        let session = InteractionSession::new(10, 120.0);
        let mut hover = HoverState::default();

        let intents = route_pointer(
            PointerEventType::Down,
            false,
            Vec2::new(100.0, 200.0),
            &hits(),
            &session,
            &mut hover,
        );
        assert!(intents.is_empty());
    }

    #[test]
    fn test_down_on_evader_activates_it() {
        let session = InteractionSession::new(10, 120.0);
        let mut hover = HoverState::default();

        let intents = route_pointer(
            PointerEventType::Down,
            true,
            Vec2::new(400.0, 130.0),
            &hits(),
            &session,
            &mut hover,
        );
        assert_eq!(intents, vec![PointerIntent::ActivateEvader]);
    }

    #[test]
    fn test_touch_moves_are_ignored() {
        let session = InteractionSession::new(10, 120.0);
        let mut hover = HoverState::default();

        let intents = route_pointer(
            PointerEventType::Move,
            true,
            Vec2::new(400.0, 130.0),
            &hits(),
            &session,
            &mut hover,
        );
        assert!(intents.is_empty());
    }
}
