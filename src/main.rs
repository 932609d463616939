//! Hex grid viewer.
//!
//! Lays out the configured hex grid, lets the camera rig roam over it, and
//! regenerates the tiles live as the grid config is edited in the inspector.

use bevy::app::AppExit;
use bevy::prelude::*;
#[cfg(feature = "native")]
use bevy::remote::{RemotePlugin, http::RemoteHttpPlugin};
use bevy_inspector_egui::quick::{ResourceInspectorPlugin, WorldInspectorPlugin};

use hex_grid::GameState;
use hex_grid::camera::{CameraRigConfig, CameraRigPlugin};
use hex_grid::grid::{GridConfig, GridError, GridPlugin};

fn main() -> AppExit {
    let grid_config = match load_grid_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("hex-grid: {err}");
            return AppExit::error();
        }
    };

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Hex Grid".into(),
            ..default()
        }),
        ..default()
    }))
    .register_type::<GameState>()
    .init_state::<GameState>()
    .insert_resource(ClearColor(Color::srgb(0.05, 0.06, 0.08)))
    .add_plugins(bevy_egui::EguiPlugin::default())
    .add_plugins(GridPlugin(grid_config))
    .add_plugins(CameraRigPlugin(CameraRigConfig::default()))
    .add_systems(Startup, spawn_light)
    .add_systems(Update, exit_on_esc)
    .add_systems(Update, toggle_inspector)
    .add_plugins(WorldInspectorPlugin::new().run_if(in_state(GameState::Debugging)))
    .add_plugins(
        ResourceInspectorPlugin::<GridConfig>::default().run_if(in_state(GameState::Debugging)),
    );

    #[cfg(feature = "native")]
    app.add_plugins(RemotePlugin::default())
        .add_plugins(RemoteHttpPlugin::default());

    app.run()
}

#[cfg(feature = "native")]
fn load_grid_config() -> Result<GridConfig, GridError> {
    use clap::Parser;

    hex_grid::cli::Cli::parse().into_config()
}

#[cfg(not(feature = "native"))]
fn load_grid_config() -> Result<GridConfig, GridError> {
    let config = GridConfig::default();
    config.validate()?;
    Ok(config)
}

fn spawn_light(mut commands: Commands) {
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(10.0, 20.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn toggle_inspector(
    keys: Res<ButtonInput<KeyCode>>,
    state: Res<State<GameState>>,
    mut next: ResMut<NextState<GameState>>,
) {
    if keys.just_pressed(KeyCode::Tab) {
        let new_state = match state.get() {
            GameState::Running => GameState::Debugging,
            GameState::Debugging => GameState::Running,
        };
        info!("switching to {new_state:?}");
        next.set(new_state);
    }
}

fn exit_on_esc(keys: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
