use vxl_config::TraceParams;
use vxl_geom::{Vec3, Vec3i};
use vxl_map::{ClipPolicy, VoxelMap};
use vxl_trace::{GridWalk, first_solid};

/// True when no wrapped-solid cell lies between `from` and `to`.
///
/// The walk is capped at `trace.sight_max_steps`, so very distant targets
/// are reported visible once the budget runs out.
pub fn can_see(map: &VoxelMap, trace: &TraceParams, from: Vec3, to: Vec3) -> bool {
    let walk = GridWalk::new(from, to).capped(trace.sight_max_steps as u64);
    first_solid(walk, map, ClipPolicy::Wrapped).is_none()
}

/// Longest ray walked; longer requests are cut to this many cells.
pub const MAX_RAY_LEN: f32 = 65536.0;

/// First wrapped-solid cell along `dir` within `max_len`.
///
/// The returned cell is the walked one, not masked into the grid, so its
/// x/y may lie outside `[0, size)` and z may equal `size_z`.
pub fn cast_ray(map: &VoxelMap, from: Vec3, dir: Vec3, max_len: f32) -> Option<Vec3i> {
    // NaN fails this too
    if !(max_len > 0.0) {
        return None;
    }
    let max_len = max_len.min(MAX_RAY_LEN);
    let cap = max_len.trunc() as u64;
    let walk = GridWalk::new(from, from + dir * max_len).capped(cap);
    let hit = first_solid(walk, map, ClipPolicy::Wrapped);
    log::trace!("cast_ray {from:?} dir {dir:?} len {max_len} -> {hit:?}");
    hit
}
