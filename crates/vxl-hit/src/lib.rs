//! Line-of-sight, ray picks and aim checks against the voxel store.
#![forbid(unsafe_code)]

mod aim;
mod hitscan;
mod sight;

pub use aim::{AimBasis, validate_aim};
pub use hitscan::{HitCheck, confirm_hit};
pub use sight::{MAX_RAY_LEN, can_see, cast_ray};
