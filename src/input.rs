use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::CursorMoved;

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorPos>()
            .add_message::<PointerEvent>()
            .add_message::<KeyActivation>()
            .add_systems(
                Update,
                (collect_pointer_events, collect_key_activations).in_set(InputSet),
            );
    }
}

/// Systems that turn raw input into messages
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputSet;

#[derive(Message, Debug, Clone)]
pub struct PointerEvent {
    /// Window (logical) coordinates: pixels from top-left
    pub position: Vec2,
    pub event_type: PointerEventType,
    /// 0 = mouse, >0 = touch id
    pub id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventType {
    Down,
    Move,
    Up,
}

impl PointerEvent {
    pub fn is_touch(&self) -> bool {
        self.id > 0
    }

    /// Convert window coords to a point on the z=0 board plane
    pub fn to_world_position(
        &self,
        camera: &Camera,
        camera_transform: &GlobalTransform,
    ) -> Option<Vec2> {
        let ray = camera
            .viewport_to_world(camera_transform, self.position)
            .ok()?;

        if ray.direction.z.abs() < f32::EPSILON {
            return None;
        }
        let t = -ray.origin.z / ray.direction.z;
        Some((ray.origin + ray.direction * t).truncate())
    }
}

/// Keyboard stand-in for clicking one of the two buttons
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyActivation {
    Target,
    Evader,
}

#[derive(Resource, Default, Debug, Clone, Copy)]
struct CursorPos(pub Option<Vec2>);

fn collect_pointer_events(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut cursor: ResMut<CursorPos>,
    mut cursor_moves: MessageReader<CursorMoved>,
    mut touch_events: MessageReader<TouchInput>,
    mut out: MessageWriter<PointerEvent>,
) {
    // Every cursor move counts, pressed or not: hovering is what scares the evader
    for e in cursor_moves.read() {
        cursor.0 = Some(e.position);
        out.write(PointerEvent {
            position: e.position,
            event_type: PointerEventType::Move,
            id: 0,
        });
    }

    if let Some(p) = cursor.0 {
        if mouse_buttons.just_pressed(MouseButton::Left) {
            out.write(PointerEvent {
                position: p,
                event_type: PointerEventType::Down,
                id: 0,
            });
        }
        if mouse_buttons.just_released(MouseButton::Left) {
            out.write(PointerEvent {
                position: p,
                event_type: PointerEventType::Up,
                id: 0,
            });
        }
    }

    for ev in touch_events.read() {
        let event_type = match ev.phase {
            TouchPhase::Started => PointerEventType::Down,
            TouchPhase::Moved => PointerEventType::Move,
            TouchPhase::Ended | TouchPhase::Canceled => PointerEventType::Up,
        };
        out.write(PointerEvent {
            position: ev.position,
            event_type,
            // Offset so touch ids never collide with the mouse id
            id: ev.id + 1,
        });
    }
}

fn collect_key_activations(keys: Res<ButtonInput<KeyCode>>, mut out: MessageWriter<KeyActivation>) {
    if keys.just_pressed(KeyCode::KeyY) || keys.just_pressed(KeyCode::Enter) {
        out.write(KeyActivation::Target);
    }
    if keys.just_pressed(KeyCode::KeyN) {
        out.write(KeyActivation::Evader);
    }
}
