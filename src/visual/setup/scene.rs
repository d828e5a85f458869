use bevy::prelude::*;

use crate::{
    camera::{CameraBounds, GameCamera},
    game::config::{AreaConfig, EvasionConfig},
    geometry::{Placer, Rect},
    visual::{
        buttons::{
            ButtonExtent, EvaderAffordance, EvaderButton, PlayAreaMember, TargetButton, Wobble,
        },
        ui::{ButtonLabelKind, spawn_button_label},
    },
};

/// Play area center, as a fraction of window height from the bottom
const AREA_VERTICAL_POSITION: f32 = 0.42;

/// Horizontal home positions as a fraction of the play area width
const TARGET_HOME_FRACTION: f32 = 0.3;
const EVADER_HOME_FRACTION: f32 = 0.7;

/// Z layers
const AREA_Z: f32 = 0.0;
const BUTTON_Z: f32 = 1.0;

/// The container both buttons live in.
///
/// World space is y-up with the origin at the window center; the layout frame
/// used by the placer is y-down with the origin at the area's top-left corner.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct PlayArea {
    pub bounds: CameraBounds,
}

impl PlayArea {
    /// Fit the area into the visible window
    pub fn fit(window: &CameraBounds, config: &AreaConfig) -> Self {
        let width = config
            .max_width
            .min(window.width() - 2.0 * config.side_margin)
            .max(0.0);
        let height = config.height.min(window.height()).max(0.0);
        let center = window.position_with_padding(0.5, AREA_VERTICAL_POSITION, 0.0);

        PlayArea {
            bounds: CameraBounds::region_around(center, width, height),
        }
    }

    pub fn width(&self) -> f32 {
        self.bounds.width()
    }

    pub fn height(&self) -> f32 {
        self.bounds.height()
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width(), self.height())
    }

    pub fn world_center(&self) -> Vec2 {
        self.bounds.center()
    }

    /// World point -> layout frame
    pub fn to_layout(&self, world: Vec2) -> Vec2 {
        Vec2::new(world.x - self.bounds.left, self.bounds.top - world.y)
    }

    /// Layout frame -> world point
    pub fn to_world(&self, layout: Vec2) -> Vec2 {
        Vec2::new(self.bounds.left + layout.x, self.bounds.top - layout.y)
    }

    /// The area itself in the layout frame
    pub fn container_rect(&self) -> Rect {
        Rect::from_corners(Vec2::ZERO, self.size())
    }

    /// Layout-frame box of something centered at `world_center`
    pub fn layout_rect(&self, world_center: Vec2, size: Vec2) -> Rect {
        Rect::from_center(self.to_layout(world_center), size)
    }

    pub fn target_home(&self) -> Vec2 {
        Vec2::new(self.width() * TARGET_HOME_FRACTION, self.height() * 0.5)
    }

    pub fn evader_home(&self) -> Vec2 {
        Vec2::new(self.width() * EVADER_HOME_FRACTION, self.height() * 0.5)
    }
}

/// Shared meshes and materials
#[derive(Resource, Clone)]
pub struct SceneAssets {
    pub unit_square: Handle<Mesh>,
    pub unit_circle: Handle<Mesh>,
    pub backdrop: Handle<StandardMaterial>,
    pub target: Handle<StandardMaterial>,
    pub evader: Handle<StandardMaterial>,
    pub evader_settled: Handle<StandardMaterial>,
    pub heart: Handle<StandardMaterial>,
    pub confetti: Vec<Handle<StandardMaterial>>,
}

/// Delay before the evader is first measured and shown
#[derive(Resource)]
pub struct InitialPlacement {
    pub timer: Timer,
    pub done: bool,
}

fn flat_material(materials: &mut Assets<StandardMaterial>, color: Color) -> Handle<StandardMaterial> {
    materials.add(StandardMaterial {
        base_color: color,
        unlit: true,
        ..default()
    })
}

fn button_transform(area: &PlayArea, layout_center: Vec2, size: Vec2) -> Transform {
    let world = area.to_world(layout_center);
    Transform::from_xyz(world.x, world.y, BUTTON_Z).with_scale(size.extend(1.0))
}

fn backdrop_transform(area: &PlayArea) -> Transform {
    let center = area.world_center();
    Transform::from_xyz(center.x, center.y, AREA_Z).with_scale(area.size().extend(1.0))
}

pub fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    game_camera: Res<GameCamera>,
    config: Res<EvasionConfig>,
) {
    let area = PlayArea::fit(&game_camera.bounds, &config.area);
    let button_size = config.button_size();

    info!(
        "Scene setup: play area {}x{}, buttons {}x{}",
        area.width(),
        area.height(),
        button_size.x,
        button_size.y
    );

    let palette = match config.confetti.palette() {
        Ok(palette) => palette,
        Err(err) => {
            warn!("⚠️ {} - confetti falls back to a single colour", err);
            vec![Color::srgb(1.0, 0.30, 0.49)]
        }
    };

    let assets = SceneAssets {
        unit_square: meshes.add(Rectangle::new(1.0, 1.0)),
        unit_circle: meshes.add(Circle::new(0.5)),
        backdrop: flat_material(&mut materials, Color::srgb(1.0, 0.97, 0.98)),
        target: flat_material(&mut materials, Color::srgb(1.0, 0.30, 0.49)),
        evader: flat_material(&mut materials, Color::srgb(0.62, 0.60, 0.66)),
        evader_settled: flat_material(&mut materials, Color::srgb(0.72, 0.56, 0.85)),
        heart: flat_material(&mut materials, Color::srgb(1.0, 0.30, 0.49)),
        confetti: palette
            .into_iter()
            .map(|color| flat_material(&mut materials, color))
            .collect(),
    };

    commands.spawn((
        Mesh3d(assets.unit_square.clone()),
        MeshMaterial3d(assets.backdrop.clone()),
        backdrop_transform(&area),
        PlayAreaMember,
        Name::new("Play Area"),
    ));

    let target = commands
        .spawn((
            Mesh3d(assets.unit_square.clone()),
            MeshMaterial3d(assets.target.clone()),
            button_transform(&area, area.target_home(), button_size),
            TargetButton,
            ButtonExtent { size: button_size },
            PlayAreaMember,
            Name::new("Target Button"),
        ))
        .id();

    // Hidden until the deferred initial placement runs
    let evader = commands
        .spawn((
            Mesh3d(assets.unit_square.clone()),
            MeshMaterial3d(assets.evader.clone()),
            button_transform(&area, area.evader_home(), button_size),
            Visibility::Hidden,
            EvaderButton,
            ButtonExtent { size: button_size },
            Wobble::default(),
            EvaderAffordance::default(),
            PlayAreaMember,
            Name::new("Evader Button"),
        ))
        .id();

    spawn_button_label(&mut commands, target, &config.texts.target_label, ButtonLabelKind::Label);
    spawn_button_label(&mut commands, evader, &config.texts.evader_label, ButtonLabelKind::Label);
    spawn_button_label(
        &mut commands,
        evader,
        &config.texts.settled_tooltip,
        ButtonLabelKind::Tooltip,
    );

    commands.insert_resource(area);
    commands.insert_resource(assets);
    commands.insert_resource(InitialPlacement {
        timer: Timer::from_seconds(config.initial_placement_delay_secs.max(0.0), TimerMode::Once),
        done: false,
    });

    info!("✨ Buttons spawned");
}

/// System: Place and reveal the evader once layout has had a moment to settle
pub fn run_initial_placement(
    time: Res<Time>,
    area: Res<PlayArea>,
    mut initial: ResMut<InitialPlacement>,
    mut evaders: Query<(&mut Transform, &mut Visibility, &ButtonExtent), With<EvaderButton>>,
) {
    if initial.done {
        return;
    }
    if !initial.timer.tick(time.delta()).just_finished() {
        return;
    }

    let Ok((mut transform, mut visibility, extent)) = evaders.single_mut() else {
        return;
    };

    let home = button_transform(&area, area.evader_home(), extent.size);
    transform.translation = home.translation;
    *visibility = Visibility::Inherited;
    initial.done = true;

    info!("Evader placed at {:?}", area.evader_home());
}

/// Keep the evader where it was relative to the area, clamped into the new
/// bounds and kept off the re-anchored target. Returns a layout-frame center.
fn refit_evader(
    placer: &Placer,
    previous: &PlayArea,
    fitted: &PlayArea,
    evader_world: Vec2,
    evader_size: Vec2,
    target_size: Vec2,
) -> Vec2 {
    let layout = previous.to_layout(evader_world);
    let target = Rect::from_center(fitted.target_home(), target_size);
    placer.refit(layout, evader_size, &target, fitted.size())
}

/// System: Re-fit the play area after a window resize
pub fn relayout_on_resize(
    game_camera: Res<GameCamera>,
    config: Res<EvasionConfig>,
    mut area: ResMut<PlayArea>,
    mut backdrop: Query<
        &mut Transform,
        (With<PlayAreaMember>, Without<TargetButton>, Without<EvaderButton>),
    >,
    mut targets: Query<(&mut Transform, &ButtonExtent), (With<TargetButton>, Without<EvaderButton>)>,
    mut evaders: Query<(&mut Transform, &ButtonExtent), (With<EvaderButton>, Without<TargetButton>)>,
) {
    if !game_camera.is_changed() {
        return;
    }

    let fitted = PlayArea::fit(&game_camera.bounds, &config.area);
    if fitted == *area {
        return;
    }
    let previous = *area;
    *area = fitted;

    for mut transform in &mut backdrop {
        *transform = backdrop_transform(&fitted);
    }

    let mut target_size = config.button_size();
    for (mut transform, extent) in &mut targets {
        transform.translation = button_transform(&fitted, fitted.target_home(), extent.size).translation;
        target_size = extent.size;
    }

    let placer = Placer::new(config.placement);
    for (mut transform, extent) in &mut evaders {
        let center = refit_evader(
            &placer,
            &previous,
            &fitted,
            transform.translation.truncate(),
            extent.size,
            target_size,
        );
        transform.translation = button_transform(&fitted, center, extent.size).translation;
    }

    info!("Play area re-laid out: {}x{}", fitted.width(), fitted.height());
}
