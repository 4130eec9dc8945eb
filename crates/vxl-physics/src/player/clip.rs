//! Probe columns for the player hull.
//!
//! The hull is sampled, not swept: each check tests a handful of points
//! against [`ClipPolicy::PlayerBox`] at the candidate position.

use vxl_geom::Vec3;
use vxl_map::{ClipPolicy, VoxelMap};

pub(crate) const HALF_WIDTH: f32 = 0.45;
const PROBE_STEP: f32 = 0.9;
const PROBE_FLOOR: f32 = -1.36;
const CLIMB_TOP: f32 = 0.35;
const CLIMB_FLOOR: f32 = -2.36;
pub(crate) const CLIMB_DROP: f32 = 1.0;
pub(crate) const CLIMB_PROBE: f32 = -1.35;

pub(crate) const UNCROUCH_FEET: f32 = 2.25;
pub(crate) const UNCROUCH_HEAD: f32 = -1.35;
pub(crate) const UNCROUCH_RISE: f32 = 0.9;

/// Vertical extent of the hull for a stance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Stance {
    /// Offset from `pos.z` to the probe origin.
    pub center: f32,
    /// Top of the probe column, relative to the probe origin.
    pub top: f32,
}

impl Stance {
    pub(crate) fn of(crouching: bool) -> Stance {
        if crouching {
            Stance {
                center: 0.45,
                top: 0.9,
            }
        } else {
            Stance {
                center: 0.9,
                top: 1.35,
            }
        }
    }
}

/// Result of trying to move along one horizontal axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum AxisMove {
    Committed,
    Climbed,
    Blocked,
}

#[inline]
fn solid(map: &VoxelMap, x: f32, y: f32, z: f32) -> bool {
    ClipPolicy::PlayerBox.is_solid_at(map, Vec3::new(x, y, z))
}

/// Walks a column from `top` down past `floor`, testing two points per level.
fn column_clear(map: &VoxelMap, a: (f32, f32), b: (f32, f32), base: f32, top: f32, floor: f32) -> bool {
    let mut z = top;
    while z >= floor {
        if solid(map, a.0, a.1, base + z) || solid(map, b.0, b.1, base + z) {
            return false;
        }
        z -= PROBE_STEP;
    }
    true
}

/// Decides a horizontal move from the two leading-edge sample points.
fn decide(
    map: &VoxelMap,
    a: (f32, f32),
    b: (f32, f32),
    base: f32,
    stance: Stance,
    may_climb: bool,
) -> AxisMove {
    if column_clear(map, a, b, base, stance.top, PROBE_FLOOR) {
        AxisMove::Committed
    } else if may_climb && column_clear(map, a, b, base, CLIMB_TOP, CLIMB_FLOOR) {
        AxisMove::Climbed
    } else {
        AxisMove::Blocked
    }
}

#[inline]
fn lead(v: f32) -> f32 {
    if v < 0.0 { -HALF_WIDTH } else { HALF_WIDTH }
}

/// Moving along x to `nx` with the body at `y`.
pub(crate) fn probe_x(
    map: &VoxelMap,
    nx: f32,
    y: f32,
    vel_x: f32,
    base: f32,
    stance: Stance,
    may_climb: bool,
) -> AxisMove {
    let x = nx + lead(vel_x);
    decide(map, (x, y - HALF_WIDTH), (x, y + HALF_WIDTH), base, stance, may_climb)
}

/// Moving along y to `ny` with the body at `x`.
pub(crate) fn probe_y(
    map: &VoxelMap,
    x: f32,
    ny: f32,
    vel_y: f32,
    base: f32,
    stance: Stance,
    may_climb: bool,
) -> AxisMove {
    let y = ny + lead(vel_y);
    decide(map, (x - HALF_WIDTH, y), (x + HALF_WIDTH, y), base, stance, may_climb)
}

/// All four hull corners at height `z` are open.
pub(crate) fn corners_clear(map: &VoxelMap, pos: Vec3, z: f32) -> bool {
    let (x1, x2) = (pos.x - HALF_WIDTH, pos.x + HALF_WIDTH);
    let (y1, y2) = (pos.y - HALF_WIDTH, pos.y + HALF_WIDTH);
    !(solid(map, x1, y1, z) || solid(map, x1, y2, z) || solid(map, x2, y1, z) || solid(map, x2, y2, z))
}
