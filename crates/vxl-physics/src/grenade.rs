use vxl_config::GrenadeParams;
use vxl_geom::{Vec3, Vec3i};
use vxl_map::{ClipPolicy, VoxelMap};

/// Outcome of one grenade step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Bounce {
    None,
    Silent,
    /// Fast enough to play the impact sound.
    Loud,
}

impl Bounce {
    /// Wire code: 0 no contact, 1 silent bounce, 2 loud bounce.
    #[inline]
    pub fn code(self) -> u8 {
        match self {
            Bounce::None => 0,
            Bounce::Silent => 1,
            Bounce::Loud => 2,
        }
    }

    #[inline]
    pub fn bounced(self) -> bool {
        self != Bounce::None
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grenade {
    pub pos: Vec3,
    pub vel: Vec3,
}

#[inline]
fn solid(map: &VoxelMap, c: Vec3i) -> bool {
    ClipPolicy::GrenadeWorld.is_solid(map, c.x as i64, c.y as i64, c.z as i64)
}

impl Grenade {
    pub fn new(pos: Vec3, vel: Vec3) -> Self {
        Self { pos, vel }
    }

    /// Integrates one tick and bounces off the first solid cell entered.
    ///
    /// On contact the grenade is put back where it started the tick, the
    /// velocity flips on the axis it crossed and every component is damped.
    pub fn step(&mut self, map: &VoxelMap, params: &GrenadeParams, delta: f32) -> Bounce {
        let old = self.pos;
        let f = delta * params.motion_scale;
        self.vel.z += delta * params.gravity;
        self.pos += self.vel * f;

        let now = self.pos.floor_cell();
        if !solid(map, now) {
            return Bounce::None;
        }

        let t = params.sound_threshold;
        let bounce = if self.vel.x.abs() > t || self.vel.y.abs() > t || self.vel.z.abs() > t {
            Bounce::Loud
        } else {
            Bounce::Silent
        };

        let was = old.floor_cell();
        if now.z != was.z
            && ((now.x == was.x && now.y == was.y) || !solid(map, Vec3i::new(now.x, now.y, was.z)))
        {
            self.vel.z = -self.vel.z;
        } else if now.x != was.x
            && ((now.y == was.y && now.z == was.z) || !solid(map, Vec3i::new(was.x, now.y, now.z)))
        {
            self.vel.x = -self.vel.x;
        } else if now.y != was.y
            && ((now.x == was.x && now.z == was.z) || !solid(map, Vec3i::new(now.x, was.y, now.z)))
        {
            self.vel.y = -self.vel.y;
        }

        self.pos = old;
        self.vel *= params.restitution;
        log::trace!("grenade bounce at {now:?}: {bounce:?}");
        bounce
    }
}
