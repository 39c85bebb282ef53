//! Right-triangulated irregular network (RTIN) mesh simplification.
//!
//! A square height grid of `2^k + 1` samples is recursively split along the
//! hypotenuse of right isosceles triangles. Each split point stores the
//! largest interpolation error of its subtree, so a mesh for any error
//! tolerance can be extracted by a single top-down traversal.

use super::error::TerrainError;

/// Largest raster side accepted. The hierarchy for this size holds about
/// 33M triangles.
pub const MAX_TILE_SIZE: u32 = 4096;

/// Precomputed triangle hierarchy for one grid size.
#[derive(Debug)]
pub struct Martini {
    grid_size: usize,
    num_triangles: usize,
    num_parent_triangles: usize,
    /// `[ax, ay, bx, by]` hypotenuse endpoints per triangle
    coords: Vec<[i64; 4]>,
}

impl Martini {
    /// Builds the hierarchy for a `tile_size` x `tile_size` raster.
    ///
    /// `tile_size` must be a power of two between 2 and [`MAX_TILE_SIZE`];
    /// the height grid then has `tile_size + 1` samples per side.
    pub fn new(tile_size: u32) -> Result<Self, TerrainError> {
        if tile_size < 2 || !tile_size.is_power_of_two() {
            return Err(TerrainError::InvalidDimensions {
                width: tile_size,
                height: tile_size,
                reason: "tile size must be a power of two of at least 2".to_string(),
            });
        }
        if tile_size > MAX_TILE_SIZE {
            return Err(TerrainError::InvalidDimensions {
                width: tile_size,
                height: tile_size,
                reason: format!("tile size exceeds {}", MAX_TILE_SIZE),
            });
        }

        let tile = tile_size as i64;
        let tile_cells = (tile_size as usize) * (tile_size as usize);
        let num_triangles = tile_cells * 2 - 2;
        let num_parent_triangles = num_triangles - tile_cells;

        let mut coords = Vec::with_capacity(num_triangles);
        for i in 0..num_triangles {
            let mut id = i + 2;
            let (mut ax, mut ay, mut bx, mut by, mut cx, mut cy) = (0, 0, 0, 0, 0, 0);

            if id & 1 == 1 {
                // bottom-left triangle
                bx = tile;
                by = tile;
                cx = tile;
            } else {
                // top-right triangle
                ax = tile;
                ay = tile;
                cy = tile;
            }

            loop {
                id >>= 1;
                if id <= 1 {
                    break;
                }
                let mx = (ax + bx) >> 1;
                let my = (ay + by) >> 1;

                if id & 1 == 1 {
                    // left half
                    bx = ax;
                    by = ay;
                    ax = cx;
                    ay = cy;
                } else {
                    // right half
                    ax = bx;
                    ay = by;
                    bx = cx;
                    by = cy;
                }
                cx = mx;
                cy = my;
            }

            coords.push([ax, ay, bx, by]);
        }

        Ok(Self {
            grid_size: tile_size as usize + 1,
            num_triangles,
            num_parent_triangles,
            coords,
        })
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    /// Computes the error hierarchy for a height grid.
    pub fn create_tile(&self, terrain: Vec<f64>) -> Result<MartiniTile<'_>, TerrainError> {
        let expected = self.grid_size * self.grid_size;
        if terrain.len() != expected {
            return Err(TerrainError::InvalidDimensions {
                width: self.grid_size as u32,
                height: (terrain.len() / self.grid_size.max(1)) as u32,
                reason: format!("expected {} height samples, got {}", expected, terrain.len()),
            });
        }

        let mut tile = MartiniTile {
            martini: self,
            errors: vec![0.0; terrain.len()],
            terrain,
        };
        tile.update();
        Ok(tile)
    }
}

/// A height grid with its precomputed error hierarchy.
#[derive(Debug)]
pub struct MartiniTile<'a> {
    martini: &'a Martini,
    terrain: Vec<f64>,
    errors: Vec<f64>,
}

/// Grid-space mesh: vertices are `[x, y]` sample positions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridMesh {
    pub vertices: Vec<[u32; 2]>,
    pub triangles: Vec<[u32; 3]>,
}

struct MeshBuilder {
    /// Vertex index + 1 per grid sample, 0 when unassigned
    indices: Vec<u32>,
    mesh: GridMesh,
}

impl MeshBuilder {
    fn vertex(&mut self, x: i64, y: i64, size: usize) -> u32 {
        let slot = y as usize * size + x as usize;
        if self.indices[slot] == 0 {
            self.mesh.vertices.push([x as u32, y as u32]);
            self.indices[slot] = self.mesh.vertices.len() as u32;
        }
        self.indices[slot] - 1
    }
}

impl<'a> MartiniTile<'a> {
    fn update(&mut self) {
        let size = self.martini.grid_size as i64;
        let index = |x: i64, y: i64| (y * size + x) as usize;

        for i in (0..self.martini.num_triangles).rev() {
            let [ax, ay, bx, by] = self.martini.coords[i];
            let mx = (ax + bx) >> 1;
            let my = (ay + by) >> 1;
            let cx = mx + my - ay;
            let cy = my + ax - mx;

            let interpolated = (self.terrain[index(ax, ay)] + self.terrain[index(bx, by)]) / 2.0;
            let middle = index(mx, my);
            let middle_error = (interpolated - self.terrain[middle]).abs();
            self.errors[middle] = self.errors[middle].max(middle_error);

            if i < self.martini.num_parent_triangles {
                let left_child = index((ax + cx) >> 1, (ay + cy) >> 1);
                let right_child = index((bx + cx) >> 1, (by + cy) >> 1);
                self.errors[middle] = self.errors[middle]
                    .max(self.errors[left_child])
                    .max(self.errors[right_child]);
            }
        }
    }

    /// Height samples of the grid, row-major.
    pub fn terrain(&self) -> &[f64] {
        &self.terrain
    }

    /// Extracts the coarsest mesh whose error stays within `max_error`.
    pub fn mesh(&self, max_error: f64) -> GridMesh {
        let size = self.martini.grid_size;
        let max = size as i64 - 1;

        let mut builder = MeshBuilder {
            indices: vec![0; size * size],
            mesh: GridMesh::default(),
        };

        self.process_triangle(0, 0, max, max, max, 0, max_error, &mut builder);
        self.process_triangle(max, max, 0, 0, 0, max, max_error, &mut builder);

        builder.mesh
    }

    #[allow(clippy::too_many_arguments)]
    fn process_triangle(
        &self,
        ax: i64,
        ay: i64,
        bx: i64,
        by: i64,
        cx: i64,
        cy: i64,
        max_error: f64,
        builder: &mut MeshBuilder,
    ) {
        let size = self.martini.grid_size;
        let mx = (ax + bx) >> 1;
        let my = (ay + by) >> 1;

        let splittable = (ax - cx).abs() + (ay - cy).abs() > 1;
        if splittable && self.errors[my as usize * size + mx as usize] > max_error {
            self.process_triangle(cx, cy, ax, ay, mx, my, max_error, builder);
            self.process_triangle(bx, by, cx, cy, mx, my, max_error, builder);
        } else {
            let a = builder.vertex(ax, ay, size);
            let b = builder.vertex(bx, by, size);
            let c = builder.vertex(cx, cy, size);
            builder.mesh.triangles.push([a, b, c]);
        }
    }
}
