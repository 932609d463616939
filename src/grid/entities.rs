use bevy::prelude::*;

use super::generator::GridGenerator;
use super::hex_layout::{GridCoordinate, HexShapeParams};

/// Parent container of every spawned tile.
///
/// Tile transforms are local to this entity; regeneration never writes to
/// its own `Transform`.
#[derive(Component, Reflect)]
pub struct HexGridRoot;

/// Marker and metadata on each spawned tile entity.
#[derive(Component, Reflect, Clone, Copy, Debug)]
pub struct HexTile {
    /// Grid address of this tile.
    pub coordinate: GridCoordinate,
    /// Shape the tile was built with.
    pub shape: HexShapeParams,
}

/// Material applied uniformly to every tile of a pass.
#[derive(Clone, Debug)]
pub struct TileAppearance {
    /// Surface material handle.
    pub material: Handle<StandardMaterial>,
}

/// Tile entities owned by the latest regeneration pass.
#[derive(Resource, Default)]
pub struct GridTiles(pub GridGenerator<Entity>);
