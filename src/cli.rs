//! Command-line seeding of the initial [`GridConfig`].

use clap::Parser;

use crate::grid::{GridConfig, GridDimensions, GridError, HexShapeParams, Orientation};

/// Lay out a rectangular hex grid and fly a camera over it.
#[derive(Parser, Debug)]
#[command(name = "hex-grid", version)]
pub struct Cli {
    /// Number of tile columns.
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    pub columns: i64,
    /// Number of tile rows.
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    pub rows: i64,
    /// Center-to-corner tile radius.
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    pub outer_radius: f32,
    /// Inner wall radius; must be smaller than the outer radius.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub inner_radius: f32,
    /// Tile extrusion height.
    #[arg(long, default_value_t = 0.4, allow_negative_numbers = true)]
    pub height: f32,
    /// Hexagon orientation.
    #[arg(long, value_enum, default_value_t = Orientation::PointyTop)]
    pub orientation: Orientation,
}

impl Cli {
    /// Converts the arguments into a validated [`GridConfig`].
    pub fn into_config(self) -> Result<GridConfig, GridError> {
        let config = GridConfig {
            dimensions: GridDimensions::try_new(self.columns, self.rows)?,
            shape: HexShapeParams {
                outer_radius: self.outer_radius,
                inner_radius: self.inner_radius,
                extrude_height: self.height,
                orientation: self.orientation,
            },
            ..GridConfig::default()
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("hex-grid").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn defaults_match_grid_config() {
        let config = parse(&[]).into_config().unwrap();
        let default = GridConfig::default();
        assert_eq!(config.dimensions, default.dimensions);
        assert_eq!(config.shape, default.shape);
    }

    #[test]
    fn flat_topped_orientation_parses() {
        let config = parse(&["--orientation", "flat-topped", "--columns", "3"])
            .into_config()
            .unwrap();
        assert_eq!(config.shape.orientation, Orientation::FlatTopped);
        assert_eq!(config.dimensions, GridDimensions::new(3, 10));
    }

    #[test]
    fn negative_columns_are_invalid_dimensions() {
        let err = parse(&["--columns", "-3"]).into_config().unwrap_err();
        assert!(matches!(
            err,
            GridError::InvalidDimensions { columns: -3, rows: 10 }
        ));
    }

    #[test]
    fn oversized_grid_is_invalid_dimensions() {
        let err = parse(&["--columns", "100000", "--rows", "100000"])
            .into_config()
            .unwrap_err();
        assert!(matches!(
            err,
            GridError::InvalidDimensions {
                columns: 100_000,
                rows: 100_000
            }
        ));
        assert!(err.to_string().contains("at most"));
    }

    #[test]
    fn zero_radius_is_invalid_shape() {
        let err = parse(&["--outer-radius", "0"]).into_config().unwrap_err();
        assert!(matches!(err, GridError::InvalidShapeParameters(_)));
    }

    #[test]
    fn inner_radius_must_be_smaller() {
        let err = parse(&["--outer-radius", "1", "--inner-radius", "2"])
            .into_config()
            .unwrap_err();
        assert!(matches!(err, GridError::InvalidShapeParameters(_)));
    }
}
