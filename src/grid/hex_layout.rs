//! Offset-coordinate hex layout: grid data model and the coordinate → world
//! position transform.
//!
//! Everything here is free of ECS state. The grid lies in the XZ plane with
//! increasing rows moving towards `-Z`.

use std::fmt;

use bevy::prelude::*;

use super::error::GridError;

/// `√3`, used by both orientations for the short hex extent.
const SQRT_3: f32 = 1.732_050_8;

/// Largest number of tiles one pass may lay out. Larger grids are rejected
/// as [`GridError::InvalidDimensions`] before anything is allocated.
pub const MAX_TILE_COUNT: usize = 1 << 20;

/// Which pair of opposite sides of the hexagon lies horizontally.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect)]
#[cfg_attr(feature = "native", derive(clap::ValueEnum))]
pub enum Orientation {
    /// Corners point up/down along Z; odd rows are staggered along X.
    #[default]
    PointyTop,
    /// Flat sides face up/down along Z; even columns are staggered along Z.
    FlatTopped,
}

impl Orientation {
    /// The matching `hexx` orientation, used when building tile meshes.
    pub fn to_hexx(self) -> hexx::HexOrientation {
        match self {
            Self::PointyTop => hexx::HexOrientation::Pointy,
            Self::FlatTopped => hexx::HexOrientation::Flat,
        }
    }
}

/// Column/row counts of a rectangular grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Reflect)]
pub struct GridDimensions {
    /// Number of tiles along X.
    pub columns: u32,
    /// Number of tiles along Z.
    pub rows: u32,
}

impl GridDimensions {
    /// Creates dimensions from unsigned counts.
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Creates dimensions from signed input (CLI, scripting), rejecting
    /// negative, out-of-range or oversized counts.
    pub fn try_new(columns: i64, rows: i64) -> Result<Self, GridError> {
        match (u32::try_from(columns), u32::try_from(rows)) {
            (Ok(columns), Ok(rows)) => {
                let dimensions = Self { columns, rows };
                dimensions.validate()?;
                Ok(dimensions)
            }
            _ => Err(GridError::InvalidDimensions { columns, rows }),
        }
    }

    /// Rejects grids with more than [`MAX_TILE_COUNT`] tiles.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.tile_count() > MAX_TILE_COUNT {
            return Err(GridError::InvalidDimensions {
                columns: self.columns.into(),
                rows: self.rows.into(),
            });
        }
        Ok(())
    }

    /// Total number of tiles a full pass produces.
    pub fn tile_count(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    /// `true` when either axis is zero.
    pub fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }

    /// Every coordinate of the grid in row-major order (all columns of row 0,
    /// then row 1, ...).
    pub fn coordinates(&self) -> impl Iterator<Item = GridCoordinate> + use<> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |row| (0..columns).map(move |column| GridCoordinate { column, row }))
    }

    /// Whether `coordinate` falls inside `[0, columns) × [0, rows)`.
    pub fn contains(&self, coordinate: GridCoordinate) -> bool {
        coordinate.column < self.columns && coordinate.row < self.rows
    }
}

/// A (column, row) address in offset coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct GridCoordinate {
    /// Column index, along X.
    pub column: u32,
    /// Row index, along -Z.
    pub row: u32,
}

impl GridCoordinate {
    /// Creates a coordinate.
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.column, self.row)
    }
}

/// Shape shared by every tile of one generation pass.
#[derive(Clone, Copy, Debug, PartialEq, Reflect)]
pub struct HexShapeParams {
    /// Center-to-corner distance.
    pub outer_radius: f32,
    /// Inset used by the tile mesh for wall thickness; must stay below
    /// `outer_radius`.
    pub inner_radius: f32,
    /// Extrusion height of the tile prism.
    pub extrude_height: f32,
    /// Hexagon orientation.
    pub orientation: Orientation,
}

impl Default for HexShapeParams {
    fn default() -> Self {
        Self {
            outer_radius: 1.0,
            inner_radius: 0.0,
            extrude_height: 0.4,
            orientation: Orientation::PointyTop,
        }
    }
}

impl HexShapeParams {
    /// Full extent of one hexagon along X.
    pub fn hex_width(&self) -> f32 {
        match self.orientation {
            Orientation::PointyTop => SQRT_3 * self.outer_radius,
            Orientation::FlatTopped => 2.0 * self.outer_radius,
        }
    }

    /// Full extent of one hexagon along Z.
    pub fn hex_height(&self) -> f32 {
        match self.orientation {
            Orientation::PointyTop => 2.0 * self.outer_radius,
            Orientation::FlatTopped => SQRT_3 * self.outer_radius,
        }
    }

    /// Distance between the centres of two adjacent columns.
    pub fn horizontal_step(&self) -> f32 {
        match self.orientation {
            Orientation::PointyTop => self.hex_width(),
            Orientation::FlatTopped => self.hex_width() * 0.75,
        }
    }

    /// Distance between the centres of two adjacent rows.
    pub fn vertical_step(&self) -> f32 {
        match self.orientation {
            Orientation::PointyTop => self.hex_height() * 0.75,
            Orientation::FlatTopped => self.hex_height(),
        }
    }

    /// Checks the parameters every tile of a pass depends on.
    pub fn validate(&self) -> Result<(), GridError> {
        if !self.outer_radius.is_finite() || self.outer_radius <= 0.0 {
            return Err(GridError::InvalidShapeParameters(format!(
                "outer radius must be positive, got {}",
                self.outer_radius
            )));
        }
        if !self.inner_radius.is_finite() || self.inner_radius < 0.0 {
            return Err(GridError::InvalidShapeParameters(format!(
                "inner radius must be zero or positive, got {}",
                self.inner_radius
            )));
        }
        if self.inner_radius >= self.outer_radius {
            return Err(GridError::InvalidShapeParameters(format!(
                "inner radius {} must be smaller than outer radius {}",
                self.inner_radius, self.outer_radius
            )));
        }
        if !self.extrude_height.is_finite() || self.extrude_height <= 0.0 {
            return Err(GridError::InvalidShapeParameters(format!(
                "extrude height must be positive, got {}",
                self.extrude_height
            )));
        }
        Ok(())
    }

    /// World-space center of the tile at `coordinate`. See [`position_for`].
    pub fn position_for(&self, coordinate: GridCoordinate) -> Vec3 {
        position_for(coordinate, self)
    }
}

/// World-space center of the hexagon at `coordinate`.
///
/// Odd rows (pointy-top) or even columns (flat-top) receive a half-tile
/// stagger so neighbouring tiles share edges without gaps. Flat-top column 0
/// is therefore pushed half a hex towards `+Z`. The result always has
/// `y == 0`.
pub fn position_for(coordinate: GridCoordinate, shape: &HexShapeParams) -> Vec3 {
    let column = coordinate.column as f32;
    let row = coordinate.row as f32;

    match shape.orientation {
        Orientation::PointyTop => {
            let offset = if coordinate.row % 2 == 1 {
                shape.hex_width() / 2.0
            } else {
                0.0
            };
            let x = column * shape.horizontal_step() + offset;
            let z = row * shape.vertical_step();
            Vec3::new(x, 0.0, -z)
        }
        Orientation::FlatTopped => {
            let offset = if coordinate.column % 2 == 0 {
                shape.hex_height() / 2.0
            } else {
                0.0
            };
            let x = column * shape.horizontal_step();
            let z = row * shape.vertical_step() - offset;
            Vec3::new(x, 0.0, -z)
        }
    }
}

/// Every `(coordinate, position)` pair a generation pass over `dimensions`
/// produces, in row-major order.
pub fn layout_positions(
    dimensions: GridDimensions,
    shape: &HexShapeParams,
) -> Result<Vec<(GridCoordinate, Vec3)>, GridError> {
    dimensions.validate()?;
    shape.validate()?;
    Ok(dimensions
        .coordinates()
        .map(|coordinate| (coordinate, position_for(coordinate, shape)))
        .collect())
}
