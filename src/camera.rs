//! Strategy-style camera rig.
//!
//! A rig entity slides over the ground plane; its child `Camera3d` hovers
//! above and behind it, always looking at the rig. WASD / arrows and the
//! screen edges pan, right-drag grabs the ground, middle-drag yaws, and the
//! scroll wheel zooms with damping.

mod entities;
mod systems;

pub use entities::{CameraRig, RigCamera};

use bevy::prelude::*;

use crate::GameState;

/// Per-plugin configuration for the camera rig.
#[derive(Resource, Clone, Debug, Reflect)]
#[reflect(Resource)]
pub struct CameraRigConfig {
    /// Top pan speed in world-units per second.
    pub max_speed: f32,
    /// How quickly pan speed approaches `max_speed` (per second).
    pub acceleration: f32,
    /// How quickly leftover velocity decays once input stops (per second).
    pub damping: f32,
    /// Height change per scroll line.
    pub step_size: f32,
    /// How quickly the camera eases towards its zoom height (per second).
    pub zoom_damping: f32,
    /// Lowest allowed camera height above the rig.
    pub min_height: f32,
    /// Highest allowed camera height above the rig.
    pub max_height: f32,
    /// Backward pull per unit of zoom height change.
    pub zoom_speed: f32,
    /// Yaw in degrees per pixel of middle-drag.
    pub rotation_speed: f32,
    /// Edge band that triggers panning, as a fraction of the window size.
    pub edge_tolerance: f32,
    /// Pan when the cursor rests in the edge band.
    pub use_screen_edge: bool,
    /// Initial camera height above the rig.
    pub start_height: f32,
    /// Initial camera distance behind the rig.
    pub start_distance: f32,
}

impl Default for CameraRigConfig {
    fn default() -> Self {
        Self {
            max_speed: 5.0,
            acceleration: 10.0,
            damping: 15.0,
            step_size: 2.0,
            zoom_damping: 7.5,
            min_height: 5.0,
            max_height: 50.0,
            zoom_speed: 2.0,
            rotation_speed: 1.0,
            edge_tolerance: 0.05,
            use_screen_edge: true,
            start_height: 20.0,
            start_distance: 15.0,
        }
    }
}

/// Free-roaming camera rig with pan, drag, yaw and damped zoom.
pub struct CameraRigPlugin(pub CameraRigConfig);

impl Plugin for CameraRigPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<CameraRigConfig>()
            .register_type::<CameraRig>()
            .register_type::<RigCamera>()
            .insert_resource(self.0.clone())
            .add_systems(Startup, systems::spawn_rig)
            .add_systems(
                Update,
                (
                    systems::keyboard_pan,
                    systems::edge_scroll,
                    systems::drag_pan,
                    systems::rotate_rig,
                    systems::read_zoom,
                    systems::follow_zoom,
                    systems::move_rig,
                )
                    .chain()
                    .run_if(in_state(GameState::Running)),
            );
    }
}
