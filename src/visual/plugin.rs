use crate::game::config::EvasionConfig;
use crate::input::InputSet;
use crate::visual::buttons::{animate_wobble, apply_affordance};
use crate::visual::celebration::{
    Celebrate, SoftDecline, animate_confetti, animate_heart, despawn_finished_confetti,
    show_soft_decline, start_celebration,
};
use crate::visual::interactions::{EvadeRequest, HoverState, apply_evasions, handle_pointer_input};
use crate::visual::setup::{relayout_on_resize, run_initial_placement, setup_scene, setup_session};
use crate::visual::ui::{spawn_overlay, sync_labels};
use bevy::prelude::*;

pub struct EvasionPlugin;

impl Plugin for EvasionPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(EvasionConfig::load_or_default())
            .init_resource::<HoverState>()
            .add_message::<EvadeRequest>()
            .add_message::<Celebrate>()
            .add_message::<SoftDecline>()
            // Session first, the scene reads its config, then the text overlay
            .add_systems(Startup, (setup_session, setup_scene, spawn_overlay).chain())
            .add_systems(
                Update,
                (
                    // Layout
                    relayout_on_resize,
                    run_initial_placement,
                    // Interaction
                    handle_pointer_input,
                    apply_evasions,
                    apply_affordance,
                    start_celebration,
                    show_soft_decline,
                    // Animation
                    animate_wobble,
                    animate_heart,
                    animate_confetti,
                    despawn_finished_confetti,
                    // Labels track the buttons after they moved
                    sync_labels,
                )
                    .chain()
                    .after(InputSet),
            );
    }
}
