use std::convert::Infallible;

use bevy::asset::RenderAssetUsages;
use bevy::mesh::Indices;
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use bevy_egui::egui;
use hexx::{ColumnMeshBuilder, HexLayout};

use super::GridConfig;
use super::entities::{GridTiles, HexGridRoot, HexTile, TileAppearance};
use super::generator::TileFactory;
use super::hex_layout::{GridCoordinate, HexShapeParams};
use crate::camera::RigCamera;

// ── Tile factory ────────────────────────────────────────────────────

/// [`TileFactory`] spawning one mesh entity per tile through [`Commands`].
///
/// All tiles of a pass share one mesh handle, built by [`tile_mesh`].
pub struct EcsTileFactory<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    mesh: Handle<Mesh>,
}

impl<'a, 'w, 's> EcsTileFactory<'a, 'w, 's> {
    /// Wraps `commands`, handing out `mesh` to every created tile.
    pub fn new(commands: &'a mut Commands<'w, 's>, mesh: Handle<Mesh>) -> Self {
        Self { commands, mesh }
    }
}

impl TileFactory for EcsTileFactory<'_, '_, '_> {
    type Tile = Entity;
    type Parent = Entity;
    type Appearance = TileAppearance;
    type Error = Infallible;

    fn create_tile(
        &mut self,
        coordinate: GridCoordinate,
        shape: &HexShapeParams,
        appearance: &TileAppearance,
    ) -> Result<Entity, Infallible> {
        Ok(self
            .commands
            .spawn((
                HexTile {
                    coordinate,
                    shape: *shape,
                },
                Name::new(format!("Hex {coordinate}")),
                Mesh3d(self.mesh.clone()),
                MeshMaterial3d(appearance.material.clone()),
                Transform::default(),
                Visibility::default(),
            ))
            .id())
    }

    fn place(&mut self, tile: &Entity, position: Vec3) {
        self.commands
            .entity(*tile)
            .insert(Transform::from_translation(position));
    }

    fn attach(&mut self, tile: &Entity, parent: Entity) {
        self.commands.entity(parent).add_child(*tile);
    }

    fn destroy(&mut self, tile: Entity) {
        self.commands.entity(tile).despawn();
    }
}

/// Extruded hexagon column for `shape`, centered on the origin, base at `y = 0`.
pub fn tile_mesh(shape: &HexShapeParams) -> Mesh {
    let layout = HexLayout {
        orientation: shape.orientation.to_hexx(),
        scale: Vec2::splat(shape.outer_radius),
        ..default()
    };
    let info = ColumnMeshBuilder::new(&layout, shape.extrude_height)
        .without_bottom_face()
        .build();
    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, info.vertices)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, info.normals)
    .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, info.uvs)
    .with_inserted_indices(Indices::U16(info.indices))
}

// ── Startup ─────────────────────────────────────────────────────────

/// Spawns the [`HexGridRoot`] container the tiles are parented to.
pub fn spawn_grid_root(mut commands: Commands) {
    spawn_root(&mut commands);
}

fn spawn_root(commands: &mut Commands) -> Entity {
    commands
        .spawn((
            HexGridRoot,
            Name::new("HexGrid"),
            Transform::default(),
            Visibility::default(),
        ))
        .id()
}

// ── Update ──────────────────────────────────────────────────────────

/// Replaces every tile with a fresh pass built from the current [`GridConfig`].
///
/// Runs on the frame the config is inserted and on every later change. An
/// invalid config is logged and leaves the previous grid in place. A missing
/// [`HexGridRoot`] is respawned so the pass is never dropped.
pub fn regenerate_grid(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    cfg: Res<GridConfig>,
    mut tiles: ResMut<GridTiles>,
    root_q: Query<Entity, With<HexGridRoot>>,
) {
    if let Err(err) = cfg.validate() {
        error!("grid regeneration rejected: {err}");
        return;
    }
    let root = match root_q.iter().next() {
        Some(root) => root,
        None => {
            warn!("HexGridRoot missing; spawning a new one");
            spawn_root(&mut commands)
        }
    };

    let mesh = meshes.add(tile_mesh(&cfg.shape));
    let appearance = TileAppearance {
        material: materials.add(StandardMaterial {
            base_color: cfg.tile_color,
            perceptual_roughness: 0.8,
            ..default()
        }),
    };

    let mut factory = EcsTileFactory::new(&mut commands, mesh);
    match tiles
        .0
        .regenerate(&mut factory, root, cfg.dimensions, &cfg.shape, &appearance)
    {
        Ok(placed) => info!(
            "regenerated {}x{} {:?} hex grid: {} tiles",
            cfg.dimensions.columns,
            cfg.dimensions.rows,
            cfg.shape.orientation,
            placed.len()
        ),
        Err(err) => error!("grid regeneration failed: {err}"),
    }
}

// ── Debug labels ────────────────────────────────────────────────────

/// Tiles further than this many outer radii from the camera go unlabelled.
const LABEL_RANGE_IN_RADII: f32 = 40.0;

/// A coordinate label for one tile, in world space.
#[derive(Debug, Clone, PartialEq)]
pub struct TileLabel {
    /// The tile's offset coordinate, `"column,row"`.
    pub text: String,
    /// Center of the tile's top face.
    pub anchor: Vec3,
    /// Point size, shrinking with distance relative to the tile radius.
    pub font_size: f32,
}

/// Label for `tile` centred at `center`, or `None` when the camera at
/// `camera` is out of labelling range for this tile size.
pub fn tile_label(tile: &HexTile, center: Vec3, camera: Vec3) -> Option<TileLabel> {
    let anchor = center + Vec3::Y * tile.shape.extrude_height;
    let distance = camera.distance(anchor);
    let radius = tile.shape.outer_radius;
    if distance > LABEL_RANGE_IN_RADII * radius {
        return None;
    }
    Some(TileLabel {
        text: tile.coordinate.to_string(),
        anchor,
        font_size: (radius * 200.0 / distance.max(radius)).clamp(8.0, 16.0),
    })
}

/// Paints each nearby tile's coordinate over its top face.
pub fn draw_tile_labels(
    mut egui_q: Query<&mut bevy_egui::EguiContext>,
    camera_q: Query<(&Camera, &GlobalTransform), With<RigCamera>>,
    tiles: Query<(&HexTile, &GlobalTransform)>,
    mut fonts_ready: Local<bool>,
) {
    // No fonts before the first egui pass has run.
    if !*fonts_ready {
        *fonts_ready = true;
        return;
    }
    let (Ok((camera, cam_gt)), Ok(mut egui)) = (camera_q.single(), egui_q.single_mut()) else {
        return;
    };
    let painter = egui.get_mut().layer_painter(egui::LayerId::background());

    for (tile, tile_gt) in &tiles {
        let Some(label) = tile_label(tile, tile_gt.translation(), cam_gt.translation()) else {
            continue;
        };
        let Ok(screen) = camera.world_to_viewport(cam_gt, label.anchor) else {
            continue;
        };
        painter.text(
            egui::pos2(screen.x, screen.y),
            egui::Align2::CENTER_CENTER,
            label.text,
            egui::FontId::monospace(label.font_size),
            egui::Color32::from_white_alpha(220),
        );
    }
}
