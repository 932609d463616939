use thiserror::Error;

use super::hex_layout::{GridCoordinate, MAX_TILE_COUNT};

/// Boxed error produced by a [`TileFactory`](super::TileFactory).
pub type FactoryError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by grid layout and regeneration.
#[derive(Debug, Error)]
pub enum GridError {
    /// Column or row count was negative, beyond `u32`, or the grid exceeds
    /// [`MAX_TILE_COUNT`] tiles.
    #[error(
        "invalid grid dimensions {columns}x{rows}: each count must lie in 0..={max_count} \
         and the grid may hold at most {max_tiles} tiles",
        max_count = u32::MAX,
        max_tiles = MAX_TILE_COUNT
    )]
    InvalidDimensions {
        /// Requested column count.
        columns: i64,
        /// Requested row count.
        rows: i64,
    },
    /// Shape parameters shared by every tile are unusable.
    #[error("invalid hex shape: {0}")]
    InvalidShapeParameters(String),
    /// The tile factory could not build the tile at `coordinate`.
    #[error("tile factory failed at {coordinate}: {source}")]
    TileCreation {
        /// Coordinate of the failed tile.
        coordinate: GridCoordinate,
        /// Factory-specific cause.
        #[source]
        source: FactoryError,
    },
}
