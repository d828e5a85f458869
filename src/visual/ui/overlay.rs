//! Text overlay: the question/celebration heading and the labels that ride on
//! top of the world-space buttons.

use bevy::prelude::*;

use crate::{
    camera::MainCamera,
    game::{config::EvasionConfig, session::InteractionSession},
    visual::buttons::EvaderAffordance,
};

/// Screen-space gap between a button's center and its tooltip
const TOOLTIP_OFFSET: f32 = 40.0;

const HEADING_SIZE: f32 = 34.0;
const SUBTEXT_SIZE: f32 = 20.0;
const LABEL_SIZE: f32 = 22.0;
const TOOLTIP_SIZE: f32 = 14.0;

#[derive(Component)]
pub struct HeadingText;

#[derive(Component)]
pub struct SubText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonLabelKind {
    /// Centered on the button
    Label,
    /// Below the button, only once the evader has settled
    Tooltip,
}

/// UI text that tracks a world-space button
#[derive(Component, Debug, Clone, Copy)]
pub struct FollowButton {
    pub owner: Entity,
    pub kind: ButtonLabelKind,
}

/// Spawn the heading block above the play area
pub fn spawn_overlay(mut commands: Commands, config: Res<EvasionConfig>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                row_gap: Val::Px(12.0),
                padding: UiRect::top(Val::Percent(12.0)),
                ..default()
            },
            Name::new("Overlay"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(config.texts.question.clone()),
                TextFont {
                    font_size: HEADING_SIZE,
                    ..default()
                },
                TextColor(Color::srgb(0.55, 0.10, 0.30)),
                HeadingText,
            ));
            parent.spawn((
                Text::new(""),
                TextFont {
                    font_size: SUBTEXT_SIZE,
                    ..default()
                },
                TextColor(Color::srgb(0.45, 0.25, 0.40)),
                SubText,
            ));
        });
}

pub fn spawn_button_label(
    commands: &mut Commands,
    owner: Entity,
    text: &str,
    kind: ButtonLabelKind,
) -> Entity {
    let (font_size, color) = match kind {
        ButtonLabelKind::Label => (LABEL_SIZE, Color::WHITE),
        ButtonLabelKind::Tooltip => (TOOLTIP_SIZE, Color::srgb(0.40, 0.30, 0.45)),
    };

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                ..default()
            },
            Text::new(text.to_owned()),
            TextFont {
                font_size,
                ..default()
            },
            TextColor(color),
            Visibility::Hidden,
            FollowButton { owner, kind },
        ))
        .id()
}

/// System: Keep labels glued to their buttons and mirror their visibility
pub fn sync_labels(
    session: Res<InteractionSession>,
    camera_query: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    owners: Query<(&Transform, &Visibility, Option<&EvaderAffordance>), Without<FollowButton>>,
    mut labels: Query<(&FollowButton, &mut Node, &ComputedNode, &mut Visibility)>,
) {
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    for (follow, mut node, computed, mut visibility) in &mut labels {
        let Ok((transform, owner_visibility, affordance)) = owners.get(follow.owner) else {
            continue;
        };

        let shown = match follow.kind {
            ButtonLabelKind::Label => *owner_visibility != Visibility::Hidden,
            ButtonLabelKind::Tooltip => {
                *owner_visibility != Visibility::Hidden
                    && session.is_playing()
                    && affordance.is_some_and(|a| a.interactive)
            }
        };
        let wanted = if shown {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
        if !shown {
            continue;
        }

        let Ok(screen) = camera.world_to_viewport(camera_transform, transform.translation) else {
            continue;
        };

        let label_size = computed.size() * computed.inverse_scale_factor();
        let anchor = match follow.kind {
            ButtonLabelKind::Label => screen,
            ButtonLabelKind::Tooltip => screen + Vec2::new(0.0, TOOLTIP_OFFSET),
        };
        let top_left = anchor - label_size * 0.5;

        node.left = Val::Px(top_left.x.round());
        node.top = Val::Px(top_left.y.round());
    }
}
