use vxl_config::WorldDims;
use vxl_geom::Vec3i;

const UNIT: i64 = 512;
const TMAX_ALT: i64 = 0x3FFF_FFFF / 1024;

fn in_grid(dims: WorldDims, c: Vec3i) -> bool {
    c.x >= 0
        && c.y >= 0
        && c.z >= 0
        && (c.x as u32) < dims.size_x
        && (c.y as u32) < dims.size_y
        && (c.z as u32) < dims.size_z
}

/// Cells on the line from `from` to `to`, both inclusive, for block placement.
///
/// Both endpoints must lie inside the grid; otherwise the result is empty.
/// The walk stops after `max_len` cells, on reaching `to`, or when a step
/// would leave the grid through any face.
pub fn block_line(dims: WorldDims, from: Vec3i, to: Vec3i, max_len: usize) -> Vec<Vec3i> {
    if !in_grid(dims, from) || !in_grid(dims, to) {
        log::debug!("block line {from:?} -> {to:?} has an endpoint outside the grid");
        return Vec::new();
    }
    if max_len == 0 {
        return Vec::new();
    }

    let dist = [
        (to.x - from.x) as i64,
        (to.y - from.y) as i64,
        (to.z - from.z) as i64,
    ];
    let step = dist.map(|d| if d < 0 { -1 } else { 1 });
    let [ax, ay, az] = dist.map(i64::abs);
    let ratio = |major: i64, minor: i64| {
        if minor != 0 {
            major * UNIT / minor
        } else {
            TMAX_ALT
        }
    };

    let mut tmax = if ax >= ay && ax >= az {
        [UNIT, ratio(ax, ay), ratio(ax, az)]
    } else if ay >= az {
        [ratio(ay, ax), UNIT, ratio(ay, az)]
    } else {
        [ratio(az, ax), ratio(az, ay), UNIT]
    };
    let delta = tmax.map(|t| t * 2);

    let mut pos = [from.x as i64, from.y as i64, from.z as i64];
    let mut out = Vec::with_capacity(max_len.min(64));
    loop {
        let cell = Vec3i::new(pos[0] as i32, pos[1] as i32, pos[2] as i32);
        out.push(cell);
        if out.len() >= max_len || cell == to {
            break;
        }
        let axis = if tmax[2] <= tmax[0] && tmax[2] <= tmax[1] {
            2
        } else if tmax[0] < tmax[1] {
            0
        } else {
            1
        };
        pos[axis] += step[axis];
        let next = Vec3i::new(pos[0] as i32, pos[1] as i32, pos[2] as i32);
        if !in_grid(dims, next) {
            break;
        }
        tmax[axis] += delta[axis];
    }
    out
}
