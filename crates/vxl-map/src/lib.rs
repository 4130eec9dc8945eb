//! Dense voxel store and the boundary policies its consumers clip against.
#![forbid(unsafe_code)]

mod block;
mod clip;

pub use block::Block;
pub use clip::ClipPolicy;

use vxl_config::WorldDims;
use vxl_geom::Vec3i;

/// Fixed-size voxel grid addressed as `[x][y][z]`, z fastest.
///
/// Every accessor expects in-range coordinates; consumers apply their own
/// boundary policy (see [`ClipPolicy`]) before reaching the store. Use
/// [`VoxelMap::get_checked`] when the coordinate comes from outside.
#[derive(Clone, Debug)]
pub struct VoxelMap {
    dims: WorldDims,
    cells: Vec<Block>,
}

impl VoxelMap {
    /// All-air map. `dims` must already be validated.
    pub fn new(dims: WorldDims) -> Self {
        debug_assert!(dims.validate().is_ok(), "unvalidated world dims {dims:?}");
        Self {
            dims,
            cells: vec![Block::AIR; dims.volume()],
        }
    }

    /// Bulk load from a decoded volume laid out `[x][y][z]`.
    pub fn from_cells(dims: WorldDims, cells: Vec<Block>) -> Self {
        debug_assert!(dims.validate().is_ok(), "unvalidated world dims {dims:?}");
        let mut c = cells;
        let expect = dims.volume();
        if c.len() != expect {
            c.resize(expect, Block::AIR);
        }
        Self { dims, cells: c }
    }

    #[inline]
    pub fn dims(&self) -> WorldDims {
        self.dims
    }

    #[inline]
    fn idx(&self, x: i32, y: i32, z: i32) -> usize {
        debug_assert!(self.contains(x, y, z), "({x}, {y}, {z}) outside {:?}", self.dims);
        (x as usize * self.dims.size_y as usize + y as usize) * self.dims.size_z as usize
            + z as usize
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        x >= 0
            && y >= 0
            && z >= 0
            && (x as u32) < self.dims.size_x
            && (y as u32) < self.dims.size_y
            && (z as u32) < self.dims.size_z
    }

    #[inline]
    pub fn set(&mut self, x: i32, y: i32, z: i32, b: Block) {
        let i = self.idx(x, y, z);
        self.cells[i] = b;
    }

    #[inline]
    pub fn set_air(&mut self, x: i32, y: i32, z: i32) {
        self.set(x, y, z, Block::AIR);
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32, z: i32) -> Block {
        self.cells[self.idx(x, y, z)]
    }

    #[inline]
    pub fn get_checked(&self, x: i32, y: i32, z: i32) -> Option<Block> {
        if !self.contains(x, y, z) {
            return None;
        }
        Some(self.get(x, y, z))
    }

    #[inline]
    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.get(x, y, z).is_solid()
    }

    /// Solid with at least one air face. Faces on the grid edge don't count.
    pub fn is_surface(&self, x: i32, y: i32, z: i32) -> bool {
        if !self.is_solid(x, y, z) {
            return false;
        }
        const FACES: [(i32, i32, i32); 6] = [
            (-1, 0, 0),
            (1, 0, 0),
            (0, -1, 0),
            (0, 1, 0),
            (0, 0, -1),
            (0, 0, 1),
        ];
        FACES.iter().any(|&(dx, dy, dz)| {
            let (nx, ny, nz) = (x + dx, y + dy, z + dz);
            self.contains(nx, ny, nz) && self.get(nx, ny, nz).is_air()
        })
    }

    /// Highest solid cell of a column (smallest z), if any.
    pub fn top_solid_z(&self, x: i32, y: i32) -> Option<i32> {
        let base = self.idx(x, y, 0);
        let column = &self.cells[base..base + self.dims.size_z as usize];
        column.iter().position(|b| b.is_solid()).map(|z| z as i32)
    }

    /// Writes `b` into every in-range cell of the inclusive box `min..=max`.
    pub fn fill_box(&mut self, min: Vec3i, max: Vec3i, b: Block) {
        let x0 = min.x.max(0);
        let y0 = min.y.max(0);
        let z0 = min.z.max(0);
        let x1 = max.x.min(self.dims.size_x as i32 - 1);
        let y1 = max.y.min(self.dims.size_y as i32 - 1);
        let z1 = max.z.min(self.dims.size_z as i32 - 1);
        for x in x0..=x1 {
            for y in y0..=y1 {
                for z in z0..=z1 {
                    self.set(x, y, z, b);
                }
            }
        }
    }

    pub fn solid_count(&self) -> usize {
        self.cells.iter().filter(|b| b.is_solid()).count()
    }

    #[inline]
    pub fn is_all_air(&self) -> bool {
        self.cells.iter().all(|b| b.is_air())
    }
}
