use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use super::CameraRigConfig;
use super::entities::{CameraRig, RigCamera};
use crate::grid::{GridConfig, GridCoordinate};
use crate::math;

/// Spawns the rig over the middle of the configured grid, with its camera
/// looking down at it.
pub fn spawn_rig(
    mut commands: Commands,
    cfg: Res<CameraRigConfig>,
    grid: Option<Res<GridConfig>>,
) {
    let center = grid
        .filter(|g| !g.dimensions.is_empty())
        .map(|g| {
            let last = GridCoordinate::new(
                g.dimensions.columns - 1,
                g.dimensions.rows - 1,
            );
            math::ground_midpoint(
                g.shape.position_for(GridCoordinate::default()),
                g.shape.position_for(last),
            )
        })
        .unwrap_or(Vec3::ZERO);

    commands
        .spawn((
            Name::new("CameraRig"),
            CameraRig::new(center, cfg.start_height),
            Transform::from_translation(center),
            Visibility::default(),
        ))
        .with_children(|rig| {
            rig.spawn((
                Name::new("RigCamera"),
                RigCamera,
                Camera3d::default(),
                Tonemapping::TonyMcMapface,
                Transform::from_xyz(0.0, cfg.start_height, cfg.start_distance)
                    .looking_at(Vec3::ZERO, Vec3::Y),
            ));
        });
}

/// WASD / arrow keys along the camera's ground-projected right/forward axes.
pub fn keyboard_pan(
    keys: Res<ButtonInput<KeyCode>>,
    cam_q: Query<&GlobalTransform, With<RigCamera>>,
    mut rig_q: Query<&mut CameraRig>,
) {
    let (Ok(cam_gt), Ok(mut rig)) = (cam_q.single(), rig_q.single_mut()) else {
        return;
    };

    let mut input = Vec2::ZERO;
    if keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        input.y += 1.0;
    }
    if keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        input.y -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        input.x += 1.0;
    }
    if keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        input.x -= 1.0;
    }

    let direction = (input.x * math::flatten_xz(*cam_gt.right())
        + input.y * math::flatten_xz(*cam_gt.forward()))
    .normalize_or_zero();
    if direction.length_squared() > 0.1 {
        rig.target += direction;
    }
}

/// Pans while the cursor rests in the window's edge band.
pub fn edge_scroll(
    cfg: Res<CameraRigConfig>,
    mouse: Res<ButtonInput<MouseButton>>,
    window_q: Query<&Window, With<PrimaryWindow>>,
    cam_q: Query<&GlobalTransform, With<RigCamera>>,
    mut rig_q: Query<&mut CameraRig>,
) {
    if !cfg.use_screen_edge || mouse.pressed(MouseButton::Right) {
        return;
    }
    let (Ok(window), Ok(cam_gt), Ok(mut rig)) =
        (window_q.single(), cam_q.single(), rig_q.single_mut())
    else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    let axes = math::edge_scroll_axes(cursor, window.size(), cfg.edge_tolerance);
    rig.target += axes.x * math::flatten_xz(*cam_gt.right())
        + axes.y * math::flatten_xz(*cam_gt.forward());
}

/// Right-drag keeps the ground point grabbed at press time under the cursor.
pub fn drag_pan(
    mouse: Res<ButtonInput<MouseButton>>,
    window_q: Query<&Window, With<PrimaryWindow>>,
    cam_q: Query<(&Camera, &GlobalTransform), With<RigCamera>>,
    mut rig_q: Query<&mut CameraRig>,
) {
    let Ok(mut rig) = rig_q.single_mut() else {
        return;
    };
    if !mouse.pressed(MouseButton::Right) {
        rig.drag_start = None;
        return;
    }
    let (Ok(window), Ok((camera, cam_gt))) = (window_q.single(), cam_q.single()) else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Ok(ray) = camera.viewport_to_world(cam_gt, cursor) else {
        return;
    };
    let Some(distance) = ray.intersect_plane(Vec3::ZERO, InfinitePlane3d::new(Vec3::Y)) else {
        return;
    };
    let point = ray.get_point(distance);

    let grabbed = rig.drag_start;
    match grabbed {
        Some(start) if !mouse.just_pressed(MouseButton::Right) => rig.target += start - point,
        _ => rig.drag_start = Some(point),
    }
}

/// Middle-drag yaws the rig around its vertical axis.
pub fn rotate_rig(
    mouse: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    cfg: Res<CameraRigConfig>,
    mut rig_q: Query<&mut Transform, With<CameraRig>>,
) {
    if !mouse.pressed(MouseButton::Middle) || motion.delta.x == 0.0 {
        return;
    }
    let Ok(mut transform) = rig_q.single_mut() else {
        return;
    };
    transform.rotate_y(-(motion.delta.x * cfg.rotation_speed).to_radians());
}

/// Scroll wheel sets a new clamped zoom height.
pub fn read_zoom(
    scroll: Res<AccumulatedMouseScroll>,
    cfg: Res<CameraRigConfig>,
    cam_q: Query<&Transform, With<RigCamera>>,
    mut rig_q: Query<&mut CameraRig>,
) {
    let lines = match scroll.unit {
        MouseScrollUnit::Line => scroll.delta.y,
        MouseScrollUnit::Pixel => scroll.delta.y / 40.0,
    };
    let (Ok(cam_tf), Ok(mut rig)) = (cam_q.single(), rig_q.single_mut()) else {
        return;
    };
    if let Some(height) = math::zoom_target(
        cam_tf.translation.y,
        lines,
        cfg.step_size,
        cfg.min_height,
        cfg.max_height,
    ) {
        rig.zoom_height = height;
    }
}

/// Eases the camera towards its zoom height and keeps it aimed at the rig.
pub fn follow_zoom(
    time: Res<Time>,
    cfg: Res<CameraRigConfig>,
    rig_q: Query<&CameraRig>,
    mut cam_q: Query<&mut Transform, With<RigCamera>>,
) {
    let (Ok(rig), Ok(mut cam_tf)) = (rig_q.single(), cam_q.single_mut()) else {
        return;
    };
    let target = math::zoom_offset(cam_tf.translation, rig.zoom_height, cfg.zoom_speed);
    let t = math::damp_factor(cfg.zoom_damping, time.delta_secs());
    cam_tf.translation = cam_tf.translation.lerp(target, t);
    cam_tf.look_at(Vec3::ZERO, Vec3::Y);
}

/// Applies accumulated pan input, or coasts on the last measured velocity
/// when there is none.
pub fn move_rig(
    time: Res<Time>,
    cfg: Res<CameraRigConfig>,
    mut rig_q: Query<(&mut CameraRig, &mut Transform)>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }
    let Ok((mut rig, mut transform)) = rig_q.single_mut() else {
        return;
    };

    let mut velocity = (transform.translation - rig.last_position) / dt;
    velocity.y = 0.0;
    rig.velocity = velocity;
    rig.last_position = transform.translation;

    if rig.target.length_squared() > 0.1 {
        let t = math::damp_factor(cfg.acceleration, dt);
        let speed = rig.speed + (cfg.max_speed - rig.speed) * t;
        rig.speed = speed;
        transform.translation += rig.target * speed * dt;
    } else {
        let t = math::damp_factor(cfg.damping, dt);
        let velocity = rig.velocity.lerp(Vec3::ZERO, t);
        rig.velocity = velocity;
        transform.translation += velocity * dt;
    }

    rig.target = Vec3::ZERO;
}
