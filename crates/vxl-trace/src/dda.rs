use vxl_geom::{Vec3, Vec3i};
use vxl_map::{ClipPolicy, VoxelMap};

/// Inverse slopes are carried as `delta * SLOPE_SCALE` so the walk stays in integers.
pub const SLOPE_SCALE: f32 = 1024.0;

const X: usize = 0;
const Y: usize = 1;
const Z: usize = 2;

/// Cell-by-cell walk from the cell holding `start` toward the cell holding `end`.
///
/// Cells are addressed at `floor(p - 0.5)`, i.e. relative to voxel centers.
/// Each `next` takes exactly one face step; when several axes are due the
/// tie-break is z, then x, then y. The start cell itself is never yielded.
///
/// The walk is planned for the Manhattan cell distance between the
/// endpoints; [`GridWalk::capped`] shortens it further.
#[derive(Clone, Debug)]
pub struct GridWalk {
    cell: [i64; 3],
    target: [i64; 3],
    step: [i64; 3],
    acc: [i64; 3],
    inc: [i64; 3],
    remaining: u64,
}

impl GridWalk {
    pub fn new(start: Vec3, end: Vec3) -> Self {
        let s = [start.x, start.y, start.z];
        let e = [end.x, end.y, end.z];
        let mut cell = [0i64; 3];
        let mut target = [0i64; 3];
        let mut step = [0i64; 3];
        let mut f = [0f32; 3];
        let mut g = [0f32; 3];
        let mut planned = 0u64;

        // float-to-int casts saturate, so far or non-finite endpoints land on
        // i64 bounds; everything after that saturates too
        for k in 0..3 {
            cell[k] = (s[k] - 0.5).floor() as i64;
            target[k] = (e[k] - 0.5).floor() as i64;
            if target[k] < cell[k] {
                step[k] = -1;
                f[k] = s[k] - cell[k] as f32;
                g[k] = (s[k] - e[k]) * SLOPE_SCALE;
            } else if target[k] > cell[k] {
                step[k] = 1;
                f[k] = cell[k].saturating_add(1) as f32 - s[k];
                g[k] = (e[k] - s[k]) * SLOPE_SCALE;
            }
            planned = planned.saturating_add(cell[k].abs_diff(target[k]));
        }

        let acc = [
            (f[X] * g[Z] - f[Z] * g[X]) as i64,
            (f[Y] * g[Z] - f[Z] * g[Y]) as i64,
            (f[Y] * g[X] - f[X] * g[Y]) as i64,
        ];
        let inc = [g[X] as i64, g[Y] as i64, g[Z] as i64];

        Self {
            cell,
            target,
            step,
            acc,
            inc,
            remaining: planned,
        }
    }

    /// Limits the walk to at most `max_steps` further steps.
    #[inline]
    pub fn capped(mut self, max_steps: u64) -> Self {
        self.remaining = self.remaining.min(max_steps);
        self
    }

    #[inline]
    pub fn steps_left(&self) -> u64 {
        self.remaining
    }

    /// Cell the walk currently stands on.
    #[inline]
    pub fn current(&self) -> Vec3i {
        to_cell(self.cell)
    }

    #[inline]
    pub fn target(&self) -> Vec3i {
        to_cell(self.target)
    }

    fn advance(&mut self) {
        let (acc, inc) = (&mut self.acc, &self.inc);
        if acc[X] >= 0 && acc[Y] >= 0 && self.cell[Z] != self.target[Z] {
            self.cell[Z] = self.cell[Z].saturating_add(self.step[Z]);
            acc[X] = acc[X].saturating_sub(inc[X]);
            acc[Y] = acc[Y].saturating_sub(inc[Y]);
        } else if acc[Z] >= 0 && self.cell[X] != self.target[X] {
            self.cell[X] = self.cell[X].saturating_add(self.step[X]);
            acc[X] = acc[X].saturating_add(inc[Z]);
            acc[Z] = acc[Z].saturating_sub(inc[Y]);
        } else {
            self.cell[Y] = self.cell[Y].saturating_add(self.step[Y]);
            acc[Y] = acc[Y].saturating_add(inc[Z]);
            acc[Z] = acc[Z].saturating_add(inc[X]);
        }
    }
}

impl Iterator for GridWalk {
    type Item = Vec3i;

    fn next(&mut self) -> Option<Vec3i> {
        if self.remaining == 0 {
            return None;
        }
        self.advance();
        self.remaining -= 1;
        Some(to_cell(self.cell))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

#[inline]
fn to_cell(c: [i64; 3]) -> Vec3i {
    Vec3i::new(c[X] as i32, c[Y] as i32, c[Z] as i32)
}

/// Runs `walk` until `policy` reports a solid cell.
pub fn first_solid(walk: GridWalk, map: &VoxelMap, policy: ClipPolicy) -> Option<Vec3i> {
    let mut walk = walk;
    walk.find(|c| policy.is_solid(map, c.x as i64, c.y as i64, c.z as i64))
}
