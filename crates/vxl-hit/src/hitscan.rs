use vxl_geom::{Vec3, Vec3i};
use vxl_map::VoxelMap;

use crate::{cast_ray, validate_aim};

/// Outcome of checking a reported hit against the shooter's view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitCheck {
    Confirmed,
    /// The target was outside the aim cone.
    OffTarget,
    /// A block sits between the shooter's eye and the target.
    Obstructed(Vec3i),
}

impl HitCheck {
    #[inline]
    pub fn is_confirmed(self) -> bool {
        self == HitCheck::Confirmed
    }
}

/// Accepts a hit only if the aim cone from `shooter` contains `target` and a
/// ray from `eye` along `aim`, as long as the eye-to-target distance, hits
/// no block.
pub fn confirm_hit(
    map: &VoxelMap,
    shooter: Vec3,
    eye: Vec3,
    aim: Vec3,
    target: Vec3,
    tolerance: f32,
) -> HitCheck {
    if !validate_aim(shooter, aim, target, tolerance) {
        return HitCheck::OffTarget;
    }
    let reach = eye.distance(target);
    match cast_ray(map, eye, aim, reach) {
        Some(cell) => {
            log::debug!("hit on {target:?} blocked at {cell:?}");
            HitCheck::Obstructed(cell)
        }
        None => HitCheck::Confirmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vxl_config::WorldDims;
    use vxl_map::Block;

    fn open_map() -> VoxelMap {
        VoxelMap::new(WorldDims::new(64, 64, 64))
    }

    #[test]
    fn clear_shot_is_confirmed() {
        let m = open_map();
        let p = Vec3::new(10.5, 10.5, 30.5);
        let check = confirm_hit(&m, p, p, Vec3::new(1.0, 0.0, 0.0), Vec3::new(25.5, 10.5, 30.5), 1.0);
        assert_eq!(check, HitCheck::Confirmed);
        assert!(check.is_confirmed());
    }

    #[test]
    fn wide_shot_is_off_target() {
        let m = open_map();
        let p = Vec3::new(10.5, 10.5, 30.5);
        let check = confirm_hit(&m, p, p, Vec3::new(1.0, 0.0, 0.0), Vec3::new(25.5, 20.5, 30.5), 1.0);
        assert_eq!(check, HitCheck::OffTarget);
    }

    #[test]
    fn wall_between_obstructs() {
        let mut m = open_map();
        m.fill_box(Vec3i::new(18, 0, 0), Vec3i::new(18, 63, 63), Block::DEFAULT);
        let p = Vec3::new(10.5, 10.5, 30.5);
        let check = confirm_hit(&m, p, p, Vec3::new(1.0, 0.0, 0.0), Vec3::new(25.5, 10.5, 30.5), 1.0);
        assert_eq!(check, HitCheck::Obstructed(Vec3i::new(18, 10, 30)));
    }

    #[test]
    fn wall_behind_target_does_not_obstruct() {
        let mut m = open_map();
        m.fill_box(Vec3i::new(30, 0, 0), Vec3i::new(30, 63, 63), Block::DEFAULT);
        let p = Vec3::new(10.5, 10.5, 30.5);
        let check = confirm_hit(&m, p, p, Vec3::new(1.0, 0.0, 0.0), Vec3::new(25.5, 10.5, 30.5), 1.0);
        assert_eq!(check, HitCheck::Confirmed);
    }
}
