use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::{camera::CameraBounds, game::config::ConfettiConfig};

/// Confetti sits above everything else
const CONFETTI_Z: f32 = 5.0;
/// Full turns made during the fall
const FALL_TURNS: f32 = 2.0;

/// One falling piece. Positions are world space.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct ConfettiPiece {
    pub start: Vec2,
    /// Distance fallen by the end of the animation
    pub travel: f32,
    pub start_angle: f32,
    pub delay: f32,
    pub duration: f32,
    pub elapsed: f32,
}

/// Removes the piece once it has finished falling
#[derive(Component)]
pub struct ConfettiCleanup(pub Timer);

/// Everything needed to spawn a piece
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfettiRoll {
    pub piece: ConfettiPiece,
    pub size: Vec2,
    pub color_index: usize,
    /// Seconds until the piece is despawned
    pub lifetime: f32,
}

impl ConfettiPiece {
    /// Fall progress in [0, 1]; None while still waiting for the delay
    pub fn progress(&self) -> Option<f32> {
        if self.elapsed < self.delay {
            return None;
        }
        Some(((self.elapsed - self.delay) / self.duration).min(1.0))
    }

    /// Position and rotation at the current time (linear fall, constant spin)
    pub fn pose(&self) -> (Vec2, f32) {
        let t = self.progress().unwrap_or(0.0);
        let position = self.start - Vec2::new(0.0, self.travel * t);
        let angle = self.start_angle + t * FALL_TURNS * TAU;
        (position, angle)
    }
}

/// Roll one piece above the visible `window`
pub fn random_confetti(
    rng: &mut impl Rng,
    config: &ConfettiConfig,
    window: &CameraBounds,
    palette_len: usize,
) -> ConfettiRoll {
    // Whole-pixel sizes
    let min_size = config.min_size.round() as i32;
    let max_size = (config.max_size.round() as i32).max(min_size);
    let size = rng.random_range(min_size..=max_size) as f32;
    let height = (size - 2.0).max(8.0);

    let x = window.left + window.width() * rng.random_range(0.05..=0.95);
    let above = window.height() * rng.random_range(0.05..=0.20);
    let start = Vec2::new(x, window.top + above);
    // Fall until fully below the bottom edge
    let travel = start.y - window.bottom + size * 2.0;

    let delay = (rng.random_range(0.0..=config.max_delay_secs.max(0.0)) * 100.0).round() / 100.0;
    let duration = rng.random_range(config.min_duration_secs..=config.max_duration_secs);

    ConfettiRoll {
        piece: ConfettiPiece {
            start,
            travel,
            start_angle: rng.random_range(0.0..TAU),
            delay,
            duration,
            elapsed: 0.0,
        },
        size: Vec2::new(size, height),
        color_index: rng.random_range(0..palette_len.max(1)),
        lifetime: delay + duration + config.cleanup_grace_secs,
    }
}

/// Spawn a burst of confetti across the top of the window
pub fn launch_confetti(
    commands: &mut Commands,
    rng: &mut impl Rng,
    config: &ConfettiConfig,
    window: &CameraBounds,
    mesh: &Handle<Mesh>,
    materials: &[Handle<StandardMaterial>],
) {
    if materials.is_empty() {
        return;
    }

    for _ in 0..config.count {
        let roll = random_confetti(rng, config, window, materials.len());
        let (position, angle) = roll.piece.pose();

        commands.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(materials[roll.color_index].clone()),
            Transform::from_xyz(position.x, position.y, CONFETTI_Z)
                .with_rotation(Quat::from_rotation_z(angle))
                .with_scale(roll.size.extend(1.0)),
            roll.piece,
            ConfettiCleanup(Timer::from_seconds(roll.lifetime, TimerMode::Once)),
        ));
    }

    info!("🎉 Launched {} confetti pieces", config.count);
}

/// System: Advance every falling piece
pub fn animate_confetti(time: Res<Time>, mut pieces: Query<(&mut ConfettiPiece, &mut Transform)>) {
    let dt = time.delta_secs();

    for (mut piece, mut transform) in &mut pieces {
        piece.elapsed += dt;
        let (position, angle) = piece.pose();
        transform.translation.x = position.x;
        transform.translation.y = position.y;
        transform.rotation = Quat::from_rotation_z(angle);
    }
}

/// System: Despawn pieces whose cleanup timer ran out
pub fn despawn_finished_confetti(
    mut commands: Commands,
    time: Res<Time>,
    mut pieces: Query<(Entity, &mut ConfettiCleanup)>,
) {
    for (entity, mut cleanup) in &mut pieces {
        if cleanup.0.tick(time.delta()).is_finished() {
            commands.entity(entity).despawn();
        }
    }
}
