pub mod evade;
pub mod pointer;

pub use evade::{EvadeReason, EvadeRequest, apply_evasions};
pub use pointer::{HoverState, handle_pointer_input};

#[cfg(test)]
mod tests {
    use bevy::ecs::message::Messages;
    use bevy::prelude::*;

    use super::*;
    use crate::{
        camera::CameraBounds,
        game::{config::EvasionConfig, session::{InteractionSession, Phase}},
        input::{KeyActivation, PointerEvent},
        visual::{
            buttons::{ButtonExtent, EvaderAffordance, EvaderButton, TargetButton, Wobble},
            celebration::{Celebrate, SoftDecline},
            setup::{InitialPlacement, PlayArea},
        },
    };

    const SIZE: Vec2 = Vec2::new(112.0, 48.0);

    /// Both buttons at their homes; the evader is hidden until `revealed`
    fn test_app(revealed: bool) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(EvasionConfig::default())
            .insert_resource(InteractionSession::new(10, 120.0))
            .init_resource::<HoverState>()
            .add_message::<KeyActivation>()
            .add_message::<PointerEvent>()
            .add_message::<EvadeRequest>()
            .add_message::<Celebrate>()
            .add_message::<SoftDecline>()
            .add_systems(Update, (handle_pointer_input, apply_evasions).chain());

        let area = PlayArea {
            bounds: CameraBounds::region_around(Vec2::ZERO, 560.0, 260.0),
        };
        let target = area.to_world(area.target_home());
        let evader = area.to_world(area.evader_home());
        let visibility = if revealed {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };

        app.world_mut().spawn((
            Transform::from_translation(target.extend(1.0)),
            ButtonExtent { size: SIZE },
            TargetButton,
        ));
        app.world_mut().spawn((
            Transform::from_translation(evader.extend(1.0)),
            ButtonExtent { size: SIZE },
            visibility,
            Wobble::default(),
            EvaderAffordance::default(),
            EvaderButton,
        ));
        app.insert_resource(area).insert_resource(InitialPlacement {
            timer: Timer::from_seconds(0.1, TimerMode::Once),
            done: revealed,
        });
        app
    }

    fn attempts(app: &App) -> u32 {
        app.world()
            .resource::<InteractionSession>()
            .state()
            .attempt_count()
    }

    fn evader(app: &mut App) -> (Vec3, bool) {
        let mut query = app
            .world_mut()
            .query_filtered::<(&Transform, &EvaderAffordance), With<EvaderButton>>();
        let (transform, affordance) = query.single(app.world()).unwrap();
        (transform.translation, affordance.interactive)
    }

    fn sent<M: Message>(app: &App) -> usize {
        app.world().resource::<Messages<M>>().len()
    }

    fn request(app: &mut App) {
        app.world_mut().write_message(EvadeRequest {
            reason: EvadeReason::NearTarget,
        });
    }

    #[test]
    fn test_hidden_evader_keeps_its_attempts() {
        let mut app = test_app(false);
        let (before, _) = evader(&mut app);

        app.world_mut().write_message(KeyActivation::Evader);
        request(&mut app);
        app.update();

        assert_eq!(sent::<EvadeRequest>(&app), 2);
        assert_eq!(attempts(&app), 0);
        assert_eq!(evader(&mut app).0, before);
    }

    #[test]
    fn test_requests_in_one_frame_make_one_jump() {
        let mut app = test_app(true);
        let (before, _) = evader(&mut app);

        request(&mut app);
        request(&mut app);
        app.world_mut().write_message(KeyActivation::Evader);
        app.update();

        assert_eq!(attempts(&app), 1);
        assert_ne!(evader(&mut app).0, before);
    }

    #[test]
    fn test_settles_then_stays_put() {
        let mut app = test_app(true);

        for _ in 0..10 {
            request(&mut app);
            app.update();
        }
        let (settled_at, interactive) = evader(&mut app);
        assert_eq!(attempts(&app), 10);
        assert!(interactive);

        for _ in 0..2 {
            request(&mut app);
            app.update();
        }
        assert_eq!(attempts(&app), 10);
        assert_eq!(evader(&mut app).0, settled_at);
    }

    #[test]
    fn test_target_key_celebrates_once() {
        let mut app = test_app(true);

        app.world_mut().write_message(KeyActivation::Target);
        app.world_mut().write_message(KeyActivation::Target);
        app.update();

        assert_eq!(sent::<Celebrate>(&app), 1);
        assert_eq!(
            app.world().resource::<InteractionSession>().phase(),
            Phase::Celebrating
        );
    }

    #[test]
    fn test_activations_after_celebrating_are_ignored() {
        let mut app = test_app(true);
        app.world_mut()
            .resource_mut::<InteractionSession>()
            .activate_target();

        app.world_mut().write_message(KeyActivation::Evader);
        app.world_mut().write_message(KeyActivation::Target);
        app.update();

        assert_eq!(sent::<Celebrate>(&app), 0);
        assert_eq!(sent::<SoftDecline>(&app), 0);
        assert_eq!(sent::<EvadeRequest>(&app), 0);
        assert_eq!(attempts(&app), 0);
    }

    #[test]
    fn test_settled_evader_key_declines() {
        let mut app = test_app(true);
        {
            let mut session = app.world_mut().resource_mut::<InteractionSession>();
            while !session.state_mut().record_attempt() {}
        }

        app.world_mut().write_message(KeyActivation::Evader);
        app.update();

        assert_eq!(sent::<SoftDecline>(&app), 1);
        assert_eq!(sent::<EvadeRequest>(&app), 0);
        assert_eq!(
            app.world().resource::<InteractionSession>().phase(),
            Phase::Declined
        );
    }
}
