use std::f32::consts::{FRAC_PI_4, SQRT_2, TAU};

use bevy::prelude::*;

const HEART_Z: f32 = 3.0;
/// Bounces per second
const BOUNCE_RATE: f32 = 1.4;
/// Peak extra scale at the top of a bounce
const BOUNCE_AMOUNT: f32 = 0.12;

#[derive(Component, Debug, Default)]
pub struct HeartBounce {
    pub elapsed: f32,
}

/// Scale factor for a heart that has been bouncing for `elapsed` seconds
pub fn bounce_scale(elapsed: f32) -> f32 {
    1.0 + BOUNCE_AMOUNT * (elapsed * BOUNCE_RATE * TAU * 0.5).sin().abs()
}

/// A rotated square with two circles on its upper edges
pub fn spawn_heart(
    commands: &mut Commands,
    center: Vec2,
    size: f32,
    square: &Handle<Mesh>,
    circle: &Handle<Mesh>,
    material: &Handle<StandardMaterial>,
) {
    // Midpoints of the two upper edges of the rotated square
    let lobe_offset = size / (2.0 * SQRT_2);

    commands
        .spawn((
            Transform::from_xyz(center.x, center.y, HEART_Z),
            Visibility::default(),
            HeartBounce::default(),
            Name::new("Heart"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(square.clone()),
                MeshMaterial3d(material.clone()),
                Transform::from_rotation(Quat::from_rotation_z(FRAC_PI_4))
                    .with_scale(Vec3::new(size, size, 1.0)),
            ));
            for side in [-1.0, 1.0] {
                parent.spawn((
                    Mesh3d(circle.clone()),
                    MeshMaterial3d(material.clone()),
                    Transform::from_xyz(side * lobe_offset, lobe_offset, 0.0)
                        .with_scale(Vec3::new(size, size, 1.0)),
                ));
            }
        });
}

/// System: Keep the heart bouncing
pub fn animate_heart(time: Res<Time>, mut hearts: Query<(&mut HeartBounce, &mut Transform)>) {
    for (mut bounce, mut transform) in &mut hearts {
        bounce.elapsed += time.delta_secs();
        transform.scale = Vec3::splat(bounce_scale(bounce.elapsed));
    }
}
