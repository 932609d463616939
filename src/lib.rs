#![warn(missing_docs)]
//! Procedural hex grid layout.
//!
//! Lays out a rectangular field of pointy-top or flat-top hexagon tiles in
//! offset coordinates, regenerates the whole field whenever its
//! configuration changes, and provides a strategy-style camera rig to look
//! around it.

pub mod camera;
#[cfg(feature = "native")]
pub mod cli;
pub mod grid;
pub mod math;

use bevy::prelude::*;

/// Application-wide state, used for system scheduling.
#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash, Reflect)]
pub enum GameState {
    /// Normal interaction: camera rig active.
    #[default]
    Running,
    /// Inspector overlay and tile labels visible (Tab to toggle).
    Debugging,
}
