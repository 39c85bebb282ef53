//! Georeferenced terrain mesh.

use std::io::Write;

use super::error::TerrainError;
use super::martini::GridMesh;
use crate::coord::ProjectedBounds;

/// Triangle mesh of a terrain tile.
///
/// Positions are `[x, y, height]` in the bounds the mesh was decoded with;
/// texture coordinates run from the north-west corner `(0, 0)` to the
/// south-east corner `(1, 1)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainMesh {
    pub positions: Vec<[f64; 3]>,
    pub tex_coords: Vec<[f32; 2]>,
    pub indices: Vec<[u32; 3]>,
    /// `[min, max]` corners of the axis-aligned bounding box
    pub bounding_box: [[f64; 3]; 2],
}

impl TerrainMesh {
    /// Maps a grid-space mesh into `bounds`.
    ///
    /// `terrain` is the `(tile_size + 1)^2` height grid the mesh was built from.
    pub(crate) fn from_grid(
        grid: GridMesh,
        terrain: &[f64],
        tile_size: u32,
        bounds: &ProjectedBounds,
    ) -> Self {
        let grid_size = tile_size as usize + 1;
        let size = tile_size as f64;
        let x_scale = bounds.width() / size;
        let y_scale = bounds.height() / size;

        let mut positions = Vec::with_capacity(grid.vertices.len());
        let mut tex_coords = Vec::with_capacity(grid.vertices.len());
        let mut min = [f64::INFINITY; 3];
        let mut max = [f64::NEG_INFINITY; 3];

        for &[gx, gy] in &grid.vertices {
            let height = terrain[gy as usize * grid_size + gx as usize];
            let position = [
                gx as f64 * x_scale + bounds.min_x,
                -(gy as f64) * y_scale + bounds.max_y,
                height,
            ];

            for axis in 0..3 {
                min[axis] = min[axis].min(position[axis]);
                max[axis] = max[axis].max(position[axis]);
            }

            positions.push(position);
            tex_coords.push([(gx as f64 / size) as f32, (gy as f64 / size) as f32]);
        }

        Self {
            positions,
            tex_coords,
            indices: grid.triangles,
            bounding_box: [min, max],
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len()
    }

    /// Writes the mesh as a Wavefront OBJ document.
    pub fn write_obj<W: Write>(&self, mut writer: W) -> Result<(), TerrainError> {
        writeln!(writer, "# tiledrape terrain mesh")?;
        for [x, y, z] in &self.positions {
            writeln!(writer, "v {} {} {}", x, y, z)?;
        }
        for [u, v] in &self.tex_coords {
            // OBJ texture space has its origin at the bottom-left
            writeln!(writer, "vt {} {}", u, 1.0 - v)?;
        }
        for [a, b, c] in &self.indices {
            let (a, b, c) = (a + 1, b + 1, c + 1);
            writeln!(writer, "f {a}/{a} {b}/{b} {c}/{c}")?;
        }
        writer.flush()?;
        Ok(())
    }
}
