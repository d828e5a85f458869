use std::f32::consts::{PI, TAU};

use bevy::math::Vec2;
use rand::Rng;
use serde::Deserialize;

use super::rect::Rect;

/// Tuning for the evasive placement
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    /// Gap kept between the evader and the container edges
    pub padding: f32,
    /// Containers narrower than this use the small-screen factors
    pub small_breakpoint: f32,
    /// Centers closer than this are treated as coincident
    pub degenerate_threshold: f32,
    /// Jump length as a fraction of the limiting container dimension
    pub reach_large: f32,
    pub reach_small: f32,
    /// Minimum distance from the target center, same units as reach
    pub min_dist_large: f32,
    pub min_dist_small: f32,
    /// Rotation applied per retry, in radians
    pub angle_step: f32,
    /// Rotated retries after the straight-away candidate
    pub rotation_attempts: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            padding: 8.0,
            small_breakpoint: 420.0,
            degenerate_threshold: 8.0,
            reach_large: 0.6,
            reach_small: 0.35,
            min_dist_large: 0.35,
            min_dist_small: 0.25,
            angle_step: PI / 12.0,
            rotation_attempts: 8,
        }
    }
}

/// Live geometry of the three elements, all in the same frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutSnapshot {
    pub container: Rect,
    pub target: Rect,
    pub evader: Rect,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PlacementKind {
    /// Straight away from the target
    Direct,
    /// Heading rotated by `offset` radians
    Rotated { offset: f32 },
    /// Every candidate failed; farthest padded corner
    Fallback,
}

/// New evader center, relative to the container's top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub center: Vec2,
    pub kind: PlacementKind,
}

impl Placement {
    pub fn is_fallback(&self) -> bool {
        self.kind == PlacementKind::Fallback
    }
}

/// Per-snapshot values derived from the container size
#[derive(Debug, Clone, Copy)]
struct Reach {
    width: f32,
    height: f32,
    move_distance: f32,
    min_distance: f32,
}

impl Reach {
    fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Placer {
    pub config: PlacementConfig,
}

impl Placer {
    pub fn new(config: PlacementConfig) -> Self {
        Self { config }
    }

    pub fn is_small(&self, container_width: f32) -> bool {
        container_width < self.config.small_breakpoint
    }

    /// Jump length for a container of the given size
    pub fn move_distance(&self, width: f32, height: f32) -> f32 {
        let factor = if self.is_small(width) {
            self.config.reach_small
        } else {
            self.config.reach_large
        };
        width.min(height).max(0.0) * factor
    }

    /// Minimum accepted distance from the target center
    pub fn min_distance(&self, width: f32, height: f32) -> f32 {
        let factor = if self.is_small(width) {
            self.config.min_dist_small
        } else {
            self.config.min_dist_large
        };
        width.min(height).max(0.0) * factor
    }

    /// Compute the next evader center for `layout`
    pub fn place(&self, layout: &LayoutSnapshot, rng: &mut impl Rng) -> Placement {
        let origin = layout.container.origin();
        let target = layout.target.relative_to(origin);
        let evader = layout.evader.relative_to(origin);

        let width = layout.container.width().max(0.0);
        let height = layout.container.height().max(0.0);
        let reach = Reach {
            width,
            height,
            move_distance: self.move_distance(width, height),
            min_distance: self.min_distance(width, height),
        };

        let target_center = target.center();
        let evader_center = evader.center();
        let evader_size = evader.size();
        let heading = self.escape_direction(evader_center - target_center, rng);

        for attempt in 0..=self.config.rotation_attempts {
            let offset = rotation_offset(attempt, self.config.angle_step);
            let direction = Vec2::from_angle(offset).rotate(heading);
            let candidate = self.clamp_center(
                evader_center + direction * reach.move_distance,
                evader_size,
                reach.size(),
            );

            if self.is_clear(candidate, evader_size, &target, reach.min_distance) {
                let kind = if attempt == 0 {
                    PlacementKind::Direct
                } else {
                    PlacementKind::Rotated { offset }
                };
                return Placement {
                    center: candidate,
                    kind,
                };
            }

            log::trace!(
                "candidate {} at ({:.1}, {:.1}) rejected",
                attempt,
                candidate.x,
                candidate.y
            );
        }

        let center = self.farthest_corner(evader_size, reach.size(), target_center);
        log::debug!(
            "no candidate cleared the target, falling back to corner ({:.1}, {:.1})",
            center.x,
            center.y
        );

        Placement {
            center,
            kind: PlacementKind::Fallback,
        }
    }

    /// Unit vector pointing from the target toward the evader. Falls back to a
    /// random heading when the two centers (nearly) coincide.
    pub fn escape_direction(&self, away: Vec2, rng: &mut impl Rng) -> Vec2 {
        if away.length() >= self.config.degenerate_threshold {
            if let Some(direction) = away.try_normalize() {
                return direction;
            }
        }

        let angle = rng.random::<f32>() * TAU;
        Vec2::from_angle(angle)
    }

    /// Keep an evader center inside a container of `container_size` (container-relative),
    /// snapped to a whole pixel that is still inside
    pub fn clamp_center(&self, center: Vec2, evader_size: Vec2, container_size: Vec2) -> Vec2 {
        let half = evader_size * 0.5;
        Vec2::new(
            clamp_axis(center.x, half.x, self.config.padding, container_size.x),
            clamp_axis(center.y, half.y, self.config.padding, container_size.y),
        )
    }

    /// Bring an existing evader center into a resized container. If the clamped
    /// box lands on the target the evader goes to the farthest padded corner.
    pub fn refit(&self, center: Vec2, evader_size: Vec2, target: &Rect, container_size: Vec2) -> Vec2 {
        let clamped = self.clamp_center(center, evader_size, container_size);
        if !Rect::from_center(clamped, evader_size).overlaps(target) {
            return clamped;
        }

        let corner = self.farthest_corner(evader_size, container_size, target.center());
        log::debug!(
            "refit landed on the target, moving to corner ({:.1}, {:.1})",
            corner.x,
            corner.y
        );
        corner
    }

    fn is_clear(&self, candidate: Vec2, evader_size: Vec2, target: &Rect, min_distance: f32) -> bool {
        if candidate.distance(target.center()) < min_distance {
            return false;
        }

        !Rect::from_center(candidate, evader_size).overlaps(target)
    }

    /// The four padded interior corners, top-left, top-right, bottom-left, bottom-right
    fn corners(&self, evader_size: Vec2, container_size: Vec2) -> [Vec2; 4] {
        let near = self.clamp_center(Vec2::ZERO, evader_size, container_size);
        let far = self.clamp_center(container_size, evader_size, container_size);

        [
            Vec2::new(near.x, near.y),
            Vec2::new(far.x, near.y),
            Vec2::new(near.x, far.y),
            Vec2::new(far.x, far.y),
        ]
    }

    fn farthest_corner(&self, evader_size: Vec2, container_size: Vec2, target_center: Vec2) -> Vec2 {
        let corners = self.corners(evader_size, container_size);

        // Ties keep the earlier corner
        let mut best = corners[0];
        let mut best_distance = best.distance(target_center);
        for &corner in &corners[1..] {
            let distance = corner.distance(target_center);
            if distance > best_distance {
                best = corner;
                best_distance = distance;
            }
        }
        best
    }
}

/// 0, +step, -step, +2step, -2step, ...
pub fn rotation_offset(attempt: u32, step: f32) -> f32 {
    if attempt == 0 {
        return 0.0;
    }
    let ring = attempt.div_ceil(2) as f32;
    if attempt % 2 == 1 { ring * step } else { -ring * step }
}

/// Keep a center on one axis so the half-extent plus padding stays inside.
/// An empty range (element larger than the container) pins to the middle.
/// Whole pixels are preferred, rounding toward the interior at either bound.
fn clamp_axis(value: f32, half: f32, padding: f32, extent: f32) -> f32 {
    let lo = half + padding;
    let hi = extent - half - padding;
    if lo > hi {
        return extent * 0.5;
    }

    let (lo_px, hi_px) = (lo.ceil(), hi.floor());
    if lo_px > hi_px {
        // No whole pixel fits
        return value.clamp(lo, hi);
    }
    value.round().clamp(lo_px, hi_px)
}
