pub mod confetti;
pub mod heart;

use bevy::prelude::*;

use crate::{
    camera::GameCamera,
    game::config::EvasionConfig,
    visual::{
        buttons::PlayAreaMember,
        setup::{PlayArea, SceneAssets},
        ui::{HeadingText, SubText},
    },
};

pub use confetti::{animate_confetti, despawn_finished_confetti};
pub use heart::animate_heart;

/// Heart edge length as a fraction of the play area height
const HEART_SIZE_FRACTION: f32 = 0.4;

/// The target was activated
#[derive(Message, Debug, Clone, Copy)]
pub struct Celebrate;

/// The settled evader was activated
#[derive(Message, Debug, Clone, Copy)]
pub struct SoftDecline;

fn hide_play_area(members: &mut Query<&mut Visibility, With<PlayAreaMember>>) {
    for mut visibility in members.iter_mut() {
        *visibility = Visibility::Hidden;
    }
}

/// System: Swap the buttons for a heart, a message and a burst of confetti
pub fn start_celebration(
    mut commands: Commands,
    mut celebrations: MessageReader<Celebrate>,
    config: Res<EvasionConfig>,
    assets: Res<SceneAssets>,
    area: Res<PlayArea>,
    game_camera: Res<GameCamera>,
    mut members: Query<&mut Visibility, With<PlayAreaMember>>,
    mut heading: Query<&mut Text, (With<HeadingText>, Without<SubText>)>,
    mut subtext: Query<&mut Text, (With<SubText>, Without<HeadingText>)>,
) {
    // The session only lets one through, but drain anyway
    if celebrations.read().count() == 0 {
        return;
    }

    hide_play_area(&mut members);

    if let Ok(mut text) = heading.single_mut() {
        text.0 = config.texts.celebration_title.clone();
    }
    if let Ok(mut text) = subtext.single_mut() {
        text.0 = config.texts.celebration_subtext.clone();
    }

    heart::spawn_heart(
        &mut commands,
        area.world_center(),
        area.height() * HEART_SIZE_FRACTION,
        &assets.unit_square,
        &assets.unit_circle,
        &assets.heart,
    );

    confetti::launch_confetti(
        &mut commands,
        &mut rand::rng(),
        &config.confetti,
        &game_camera.bounds,
        &assets.unit_square,
        &assets.confetti,
    );
}

/// System: Accept the "no" and clear the buttons away
pub fn show_soft_decline(
    mut declines: MessageReader<SoftDecline>,
    config: Res<EvasionConfig>,
    mut members: Query<&mut Visibility, With<PlayAreaMember>>,
    mut subtext: Query<&mut Text, With<SubText>>,
) {
    if declines.read().count() == 0 {
        return;
    }

    hide_play_area(&mut members);

    if let Ok(mut text) = subtext.single_mut() {
        text.0 = config.texts.decline_subtext.clone();
    }
    info!("Showing soft decline");
}
