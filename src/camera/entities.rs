use bevy::prelude::*;

/// Ground-plane anchor of the camera; parent of the [`RigCamera`].
#[derive(Component, Reflect, Debug, Default)]
pub struct CameraRig {
    /// Pan input accumulated this frame, consumed by `move_rig`.
    pub target: Vec3,
    /// Current pan speed.
    pub speed: f32,
    /// Horizontal velocity measured over the last frame.
    pub velocity: Vec3,
    /// Rig position at the previous velocity sample.
    pub last_position: Vec3,
    /// Camera height the zoom is easing towards.
    pub zoom_height: f32,
    /// Ground point grabbed when the right mouse button went down.
    pub drag_start: Option<Vec3>,
}

impl CameraRig {
    /// Rig resting at `position` with the camera settled at `zoom_height`.
    pub fn new(position: Vec3, zoom_height: f32) -> Self {
        Self {
            last_position: position,
            zoom_height,
            ..default()
        }
    }
}

/// Marker on the `Camera3d` entity riding the [`CameraRig`].
#[derive(Component, Reflect)]
pub struct RigCamera;
