use bevy::camera::ScalingMode;
use bevy::prelude::*;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameCamera>()
            .insert_resource(ClearColor(Color::srgb(1.0, 0.90, 0.93)))
            .add_systems(Startup, setup_camera)
            .add_systems(PreUpdate, update_camera_resource);
    }
}

/// Visible area of the board in world units (one unit per logical pixel)
#[derive(Resource)]
pub struct GameCamera {
    pub bounds: CameraBounds,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl Default for GameCamera {
    fn default() -> Self {
        Self {
            bounds: CameraBounds::from_window_size(720.0, 960.0),
        }
    }
}

impl CameraBounds {
    /// With window-size scaling the origin sits at the window center
    pub fn from_window_size(width: f32, height: f32) -> Self {
        let half_width = width * 0.5;
        let half_height = height * 0.5;

        Self {
            left: -half_width,
            right: half_width,
            bottom: -half_height,
            top: half_height,
        }
    }

    /// Get width of visible area
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Get height of visible area
    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    /// Calculate position with percentage-based padding
    /// For example: position_with_padding(0.5, 0.8, 0.1)
    /// puts something at 50% horizontal, 80% vertical, with 10% padding
    pub fn position_with_padding(
        &self,
        horizontal_percent: f32, // 0.0 = left, 1.0 = right
        vertical_percent: f32,   // 0.0 = bottom, 1.0 = top
        padding_percent: f32,    // Amount to inset from edges
    ) -> Vec2 {
        let padded_left = self.left + self.width() * padding_percent;
        let padded_right = self.right - self.width() * padding_percent;
        let padded_bottom = self.bottom + self.height() * padding_percent;
        let padded_top = self.top - self.height() * padding_percent;

        let x = padded_left + (padded_right - padded_left) * horizontal_percent;
        let y = padded_bottom + (padded_top - padded_bottom) * vertical_percent;

        Vec2::new(x, y)
    }

    /// A `width` x `height` region centered on `center`
    pub fn region_around(center: Vec2, width: f32, height: f32) -> CameraBounds {
        CameraBounds {
            left: center.x - width * 0.5,
            right: center.x + width * 0.5,
            bottom: center.y - height * 0.5,
            top: center.y + height * 0.5,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) * 0.5,
            (self.bottom + self.top) * 0.5,
        )
    }
}

#[derive(Component)]
pub struct MainCamera;

/// Setup an orthographic camera looking down -Z at the XY board
///
/// ```text
///        Y (up on screen)
///        ↑
///        |
///        +---→ X (right on screen)
/// ```
///
/// Window-size scaling keeps one world unit equal to one logical pixel.
fn setup_camera(mut commands: Commands) {
    let projection = Projection::Orthographic(OrthographicProjection {
        scaling_mode: ScalingMode::WindowSize,
        near: 0.0,
        far: 1000.0,
        ..OrthographicProjection::default_3d()
    });
    commands.spawn((
        Camera3d::default(),
        projection,
        Transform::from_xyz(0.0, 0.0, 100.0).looking_at(Vec3::ZERO, Vec3::Y),
        MainCamera,
    ));
}

/// Update camera resource when window is resized
fn update_camera_resource(mut game_camera: ResMut<GameCamera>, windows: Query<&Window>) {
    if let Ok(window) = windows.single() {
        let bounds = CameraBounds::from_window_size(window.width(), window.height());

        // Only touch the resource on real changes so change detection stays meaningful
        if bounds != game_camera.bounds {
            game_camera.bounds = bounds;
            debug!("Camera bounds updated: {:?}", game_camera.bounds);
        }
    }
}
