//! Grid generation driver.
//!
//! [`GridGenerator`] owns the tiles of one grid and replaces them wholesale on
//! every pass. Tile construction is delegated to a [`TileFactory`], so the
//! driver runs the same against ECS entities or a test double.

use bevy::prelude::*;

use super::error::{FactoryError, GridError};
use super::hex_layout::{GridCoordinate, GridDimensions, HexShapeParams, layout_positions};

/// Builds, positions, parents and destroys individual tiles.
pub trait TileFactory {
    /// Handle to one created tile.
    type Tile;
    /// Container the tiles are attached under.
    type Parent: Copy;
    /// Surface appearance, passed through to every tile unchanged.
    type Appearance;
    /// Failure raised by [`TileFactory::create_tile`].
    type Error: Into<FactoryError>;

    /// Builds the tile for `coordinate`. Every tile of a pass receives the
    /// same `shape` and `appearance`.
    fn create_tile(
        &mut self,
        coordinate: GridCoordinate,
        shape: &HexShapeParams,
        appearance: &Self::Appearance,
    ) -> Result<Self::Tile, Self::Error>;

    /// Moves `tile` to `position`, relative to its parent.
    fn place(&mut self, tile: &Self::Tile, position: Vec3);

    /// Attaches `tile` under `parent` without touching the parent's transform.
    fn attach(&mut self, tile: &Self::Tile, parent: Self::Parent);

    /// Tears `tile` down.
    fn destroy(&mut self, tile: Self::Tile);
}

/// One tile owned by a [`GridGenerator`].
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedTile<T> {
    /// Grid address of the tile.
    pub coordinate: GridCoordinate,
    /// Position the tile was placed at.
    pub position: Vec3,
    /// Factory handle.
    pub tile: T,
}

/// Owner of the tile set produced by the latest generation pass.
#[derive(Debug)]
pub struct GridGenerator<T> {
    tiles: Vec<PlacedTile<T>>,
    dimensions: GridDimensions,
}

impl<T> Default for GridGenerator<T> {
    fn default() -> Self {
        Self {
            tiles: Vec::new(),
            dimensions: GridDimensions::default(),
        }
    }
}

impl<T> GridGenerator<T> {
    /// Runs one full generation pass, replacing any tiles from a previous pass.
    ///
    /// Invalid shape parameters are rejected before any factory call and the
    /// current tiles are kept. If the factory fails part-way, every tile
    /// created by this pass is destroyed again, the generator is left empty,
    /// and the failing coordinate is reported.
    pub fn regenerate<F>(
        &mut self,
        factory: &mut F,
        parent: F::Parent,
        dimensions: GridDimensions,
        shape: &HexShapeParams,
        appearance: &F::Appearance,
    ) -> Result<&[PlacedTile<T>], GridError>
    where
        F: TileFactory<Tile = T>,
    {
        let positions = layout_positions(dimensions, shape)?;

        self.clear(factory);

        let mut created = Vec::with_capacity(positions.len());
        for (coordinate, position) in positions {
            match factory.create_tile(coordinate, shape, appearance) {
                Ok(tile) => {
                    factory.place(&tile, position);
                    factory.attach(&tile, parent);
                    created.push(PlacedTile {
                        coordinate,
                        position,
                        tile,
                    });
                }
                Err(err) => {
                    for placed in created {
                        factory.destroy(placed.tile);
                    }
                    return Err(GridError::TileCreation {
                        coordinate,
                        source: err.into(),
                    });
                }
            }
        }

        self.tiles = created;
        self.dimensions = dimensions;
        Ok(&self.tiles)
    }

    /// Destroys every tile currently owned by the generator.
    pub fn clear<F>(&mut self, factory: &mut F)
    where
        F: TileFactory<Tile = T>,
    {
        for placed in self.tiles.drain(..) {
            factory.destroy(placed.tile);
        }
        self.dimensions = GridDimensions::default();
    }

    /// Tiles of the latest completed pass, in row-major order.
    pub fn tiles(&self) -> &[PlacedTile<T>] {
        &self.tiles
    }

    /// Number of live tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// `true` when no tiles are live.
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Dimensions of the latest completed pass.
    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Tile at `coordinate`, if it lies inside the current grid.
    pub fn tile_at(&self, coordinate: GridCoordinate) -> Option<&PlacedTile<T>> {
        if !self.dimensions.contains(coordinate) {
            return None;
        }
        let index =
            coordinate.row as usize * self.dimensions.columns as usize + coordinate.column as usize;
        self.tiles.get(index)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashSet};

    use super::*;
    use crate::grid::hex_layout::Orientation;

    const ROOT: u32 = 7;

    /// Records every factory call; ids are never reused.
    #[derive(Default)]
    struct RecordingFactory {
        next_id: u32,
        create_calls: usize,
        live: BTreeMap<u32, (Option<Vec3>, Option<u32>)>,
        fail_at: Option<GridCoordinate>,
        appearances: Vec<&'static str>,
    }

    impl TileFactory for RecordingFactory {
        type Tile = u32;
        type Parent = u32;
        type Appearance = &'static str;
        type Error = String;

        fn create_tile(
            &mut self,
            coordinate: GridCoordinate,
            shape: &HexShapeParams,
            appearance: &Self::Appearance,
        ) -> Result<u32, String> {
            self.create_calls += 1;
            assert!(shape.validate().is_ok());
            if self.fail_at == Some(coordinate) {
                return Err(format!("no mesh for {coordinate}"));
            }
            self.appearances.push(*appearance);
            let id = self.next_id;
            self.next_id += 1;
            self.live.insert(id, (None, None));
            Ok(id)
        }

        fn place(&mut self, tile: &u32, position: Vec3) {
            self.live.get_mut(tile).unwrap().0 = Some(position);
        }

        fn attach(&mut self, tile: &u32, parent: u32) {
            self.live.get_mut(tile).unwrap().1 = Some(parent);
        }

        fn destroy(&mut self, tile: u32) {
            assert!(self.live.remove(&tile).is_some(), "double destroy of {tile}");
        }
    }

    fn live_positions(factory: &RecordingFactory) -> Vec<Vec3> {
        factory
            .live
            .values()
            .map(|(pos, _)| pos.expect("every live tile is placed"))
            .collect()
    }

    // ── counts ──────────────────────────────────────────────────────

    #[test]
    fn one_tile_per_coordinate() {
        let mut factory = RecordingFactory::default();
        let mut grid = GridGenerator::default();
        let shape = HexShapeParams::default();

        for (columns, rows) in [(1, 1), (3, 4), (10, 2), (1, 9)] {
            let dims = GridDimensions::new(columns, rows);
            let tiles = grid
                .regenerate(&mut factory, ROOT, dims, &shape, &"stone")
                .unwrap();
            assert_eq!(tiles.len(), dims.tile_count());
            let distinct: HashSet<_> = tiles.iter().map(|t| t.coordinate).collect();
            assert_eq!(distinct.len(), dims.tile_count());
            assert_eq!(factory.live.len(), dims.tile_count());
        }
    }

    #[test]
    fn empty_grid_makes_no_factory_calls() {
        let mut factory = RecordingFactory::default();
        let mut grid = GridGenerator::default();
        let shape = HexShapeParams::default();

        for dims in [
            GridDimensions::new(0, 0),
            GridDimensions::new(4, 0),
            GridDimensions::new(0, 4),
        ] {
            let tiles = grid
                .regenerate(&mut factory, ROOT, dims, &shape, &"stone")
                .unwrap();
            assert!(tiles.is_empty());
        }
        assert_eq!(factory.create_calls, 0);
        assert!(grid.is_empty());
    }

    #[test]
    fn tiles_are_placed_attached_and_share_appearance() {
        let mut factory = RecordingFactory::default();
        let mut grid = GridGenerator::default();
        let shape = HexShapeParams {
            orientation: Orientation::FlatTopped,
            ..default()
        };
        grid.regenerate(&mut factory, ROOT, GridDimensions::new(3, 3), &shape, &"grass")
            .unwrap();

        for placed in grid.tiles() {
            let (pos, parent) = factory.live[&placed.tile];
            assert_eq!(pos, Some(shape.position_for(placed.coordinate)));
            assert_eq!(parent, Some(ROOT));
        }
        assert!(factory.appearances.iter().all(|a| *a == "grass"));
    }

    #[test]
    fn tiles_are_generated_row_major() {
        let mut factory = RecordingFactory::default();
        let mut grid = GridGenerator::default();
        grid.regenerate(
            &mut factory,
            ROOT,
            GridDimensions::new(2, 2),
            &HexShapeParams::default(),
            &"stone",
        )
        .unwrap();
        let order: Vec<_> = grid.tiles().iter().map(|t| t.coordinate).collect();
        assert_eq!(order, GridDimensions::new(2, 2).coordinates().collect::<Vec<_>>());
    }

    // ── regeneration ────────────────────────────────────────────────

    #[test]
    fn regeneration_is_idempotent() {
        let mut factory = RecordingFactory::default();
        let mut grid = GridGenerator::default();
        let dims = GridDimensions::new(5, 4);
        let shape = HexShapeParams::default();

        let first: Vec<_> = grid
            .regenerate(&mut factory, ROOT, dims, &shape, &"stone")
            .unwrap()
            .iter()
            .map(|t| (t.coordinate, t.position))
            .collect();
        let first_live = live_positions(&factory);

        let second: Vec<_> = grid
            .regenerate(&mut factory, ROOT, dims, &shape, &"stone")
            .unwrap()
            .iter()
            .map(|t| (t.coordinate, t.position))
            .collect();

        assert_eq!(first, second);
        assert_eq!(factory.live.len(), 20, "stale tiles accumulated");
        assert_eq!(live_positions(&factory), first_live);
    }

    #[test]
    fn shrinking_grid_removes_stale_tiles() {
        let mut factory = RecordingFactory::default();
        let mut grid = GridGenerator::default();
        let shape = HexShapeParams::default();

        grid.regenerate(&mut factory, ROOT, GridDimensions::new(6, 6), &shape, &"stone")
            .unwrap();
        grid.regenerate(&mut factory, ROOT, GridDimensions::new(2, 3), &shape, &"stone")
            .unwrap();

        assert_eq!(factory.live.len(), 6);
        assert_eq!(grid.len(), 6);
        assert!(grid.tile_at(GridCoordinate::new(5, 5)).is_none());
    }

    #[test]
    fn clear_destroys_everything() {
        let mut factory = RecordingFactory::default();
        let mut grid = GridGenerator::default();
        grid.regenerate(
            &mut factory,
            ROOT,
            GridDimensions::new(3, 3),
            &HexShapeParams::default(),
            &"stone",
        )
        .unwrap();
        grid.clear(&mut factory);
        assert!(grid.is_empty());
        assert!(factory.live.is_empty());
        assert_eq!(grid.dimensions(), GridDimensions::default());
    }

    #[test]
    fn tile_at_finds_row_major_slot() {
        let mut factory = RecordingFactory::default();
        let mut grid = GridGenerator::default();
        grid.regenerate(
            &mut factory,
            ROOT,
            GridDimensions::new(4, 3),
            &HexShapeParams::default(),
            &"stone",
        )
        .unwrap();
        let c = GridCoordinate::new(2, 1);
        assert_eq!(grid.tile_at(c).map(|t| t.coordinate), Some(c));
        assert!(grid.tile_at(GridCoordinate::new(4, 0)).is_none());
    }

    // ── failures ────────────────────────────────────────────────────

    #[test]
    fn invalid_shape_makes_no_factory_calls() {
        let mut factory = RecordingFactory::default();
        let mut grid = GridGenerator::default();

        for shape in [
            HexShapeParams {
                outer_radius: 0.0,
                ..default()
            },
            HexShapeParams {
                outer_radius: -2.0,
                ..default()
            },
            HexShapeParams {
                outer_radius: 1.0,
                inner_radius: 1.5,
                ..default()
            },
        ] {
            let err = grid
                .regenerate(&mut factory, ROOT, GridDimensions::new(3, 3), &shape, &"stone")
                .unwrap_err();
            assert!(matches!(err, GridError::InvalidShapeParameters(_)));
        }
        assert_eq!(factory.create_calls, 0);
    }

    #[test]
    fn invalid_shape_keeps_previous_grid() {
        let mut factory = RecordingFactory::default();
        let mut grid = GridGenerator::default();
        let dims = GridDimensions::new(3, 2);
        grid.regenerate(&mut factory, ROOT, dims, &HexShapeParams::default(), &"stone")
            .unwrap();

        let bad = HexShapeParams {
            extrude_height: -1.0,
            ..default()
        };
        assert!(grid.regenerate(&mut factory, ROOT, dims, &bad, &"stone").is_err());
        assert_eq!(grid.len(), 6);
        assert_eq!(factory.live.len(), 6);
    }

    #[test]
    fn oversized_grid_makes_no_factory_calls() {
        let mut factory = RecordingFactory::default();
        let mut grid = GridGenerator::default();
        let dims = GridDimensions::new(2, 2);
        grid.regenerate(&mut factory, ROOT, dims, &HexShapeParams::default(), &"stone")
            .unwrap();

        let err = grid
            .regenerate(
                &mut factory,
                ROOT,
                GridDimensions::new(100_000, 100_000),
                &HexShapeParams::default(),
                &"stone",
            )
            .unwrap_err();
        assert!(matches!(err, GridError::InvalidDimensions { .. }));
        assert_eq!(factory.create_calls, 4);
        assert_eq!(grid.len(), 4);
        assert_eq!(grid.dimensions(), dims);
    }

    #[test]
    fn factory_failure_rolls_back_the_pass() {
        let mut factory = RecordingFactory {
            fail_at: Some(GridCoordinate::new(1, 2)),
            ..default()
        };
        let mut grid = GridGenerator::default();

        let err = grid
            .regenerate(
                &mut factory,
                ROOT,
                GridDimensions::new(3, 3),
                &HexShapeParams::default(),
                &"stone",
            )
            .unwrap_err();

        match err {
            GridError::TileCreation { coordinate, source } => {
                assert_eq!(coordinate, GridCoordinate::new(1, 2));
                assert!(source.to_string().contains("1,2"));
            }
            other => panic!("unexpected error {other:?}"),
        }
        // Row-major: 3 + 3 + 1 tiles were created before the failure.
        assert_eq!(factory.create_calls, 8);
        assert!(factory.live.is_empty(), "partial grid left behind");
        assert!(grid.is_empty());
    }
}
