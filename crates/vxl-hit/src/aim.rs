use vxl_geom::Vec3;

/// View basis built from a single aim direction.
///
/// `forward` is the aim itself (not renormalized), `strafe` is horizontal
/// and unit length, `height` completes the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AimBasis {
    pub forward: Vec3,
    pub strafe: Vec3,
    pub height: Vec3,
}

impl AimBasis {
    /// `None` when the aim has no horizontal component; the strafe axis is
    /// undefined for a straight up or down look.
    pub fn from_aim(dir: Vec3) -> Option<Self> {
        let h = dir.horizontal_length();
        if !(h > 0.0) || !h.is_finite() {
            return None;
        }
        let strafe = Vec3::new(-dir.y / h, dir.x / h, 0.0);
        let height = Vec3::new(
            -dir.z * strafe.y,
            dir.z * strafe.x,
            dir.x * strafe.y - dir.y * strafe.x,
        );
        Some(Self {
            forward: dir,
            strafe,
            height,
        })
    }

    /// `(lateral, vertical, depth)` of a relative offset.
    #[inline]
    pub fn project(&self, rel: Vec3) -> (f32, f32, f32) {
        (rel.dot(self.strafe), rel.dot(self.height), rel.dot(self.forward))
    }
}

/// Whether `target` falls inside the aim cone of half-width `tolerance`
/// at the target's depth. The interval is open: a target exactly on the
/// boundary misses. Targets at or behind the shooter always miss.
pub fn validate_aim(shooter: Vec3, aim: Vec3, target: Vec3, tolerance: f32) -> bool {
    let Some(basis) = AimBasis::from_aim(aim) else {
        log::debug!("aim {aim:?} has no horizontal component");
        return false;
    };
    let (lateral, vertical, depth) = basis.project(target - shooter);
    if !(depth > 0.0) {
        return false;
    }
    let inv = 1.0 / depth;
    let x = lateral * inv;
    let y = vertical * inv;
    let r = tolerance * inv;
    x - r < 0.0 && x + r > 0.0 && y - r < 0.0 && y + r > 0.0
}
