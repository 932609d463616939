//! Rectangular hex grid: layout math, generation driver, and the Bevy plugin
//! that keeps the spawned tiles in sync with [`GridConfig`].

mod entities;
mod error;
mod generator;
mod hex_layout;
mod systems;

pub use entities::{GridTiles, HexGridRoot, HexTile, TileAppearance};
pub use error::{FactoryError, GridError};
pub use generator::{GridGenerator, PlacedTile, TileFactory};
pub use hex_layout::{
    GridCoordinate, GridDimensions, HexShapeParams, MAX_TILE_COUNT, Orientation, layout_positions,
    position_for,
};
pub use systems::{EcsTileFactory, TileLabel, tile_label, tile_mesh};

use bevy::prelude::*;

use crate::GameState;

/// Grid configuration. Any change triggers a full regeneration pass.
#[derive(Resource, Clone, Debug, Reflect)]
#[reflect(Resource)]
pub struct GridConfig {
    /// Number of columns and rows.
    pub dimensions: GridDimensions,
    /// Shape shared by every tile.
    pub shape: HexShapeParams,
    /// Base color of the tile material.
    pub tile_color: Color,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            dimensions: GridDimensions::new(10, 10),
            shape: HexShapeParams::default(),
            tile_color: Color::srgb(0.32, 0.55, 0.36),
        }
    }
}

impl GridConfig {
    /// Validates the configuration without generating anything.
    pub fn validate(&self) -> Result<(), GridError> {
        self.dimensions.validate()?;
        self.shape.validate()
    }
}

/// Spawns the grid container at startup and regenerates the tiles whenever
/// [`GridConfig`] changes.
pub struct GridPlugin(pub GridConfig);

impl Plugin for GridPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<GridConfig>()
            .register_type::<HexGridRoot>()
            .register_type::<HexTile>()
            .insert_resource(self.0.clone())
            .init_resource::<GridTiles>()
            .add_systems(Startup, systems::spawn_grid_root)
            .add_systems(
                Update,
                systems::regenerate_grid.run_if(resource_changed::<GridConfig>),
            )
            .add_systems(
                Update,
                systems::draw_tile_labels.run_if(in_state(GameState::Debugging)),
            );
    }
}
