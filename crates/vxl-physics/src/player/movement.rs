use std::f32::consts::FRAC_1_SQRT_2;

use vxl_config::PlayerParams;
use vxl_map::VoxelMap;

use super::clip::{self, AxisMove, Stance};
use super::{Player, Tool};

/// What a tick's landing means for the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Landing {
    None,
    /// Hard enough to slow down and play the landing sound.
    Sound,
    /// Fall damage in health points.
    Damage(u32),
}

impl Landing {
    /// Legacy result code: damage, `-1` for the sound, `0` otherwise.
    pub fn code(self) -> i64 {
        match self {
            Landing::None => 0,
            Landing::Sound => -1,
            Landing::Damage(d) => d as i64,
        }
    }
}

/// Classifies the vertical speed a body had when it was stopped.
pub fn landing_outcome(params: &PlayerParams, impact: f32) -> Landing {
    if !(impact > params.fall_slow_down) {
        return Landing::None;
    }
    if impact > params.fall_damage_velocity {
        let over = impact - params.fall_damage_velocity;
        return Landing::Damage((over * over * params.fall_damage_scalar) as u32);
    }
    Landing::Sound
}

impl Player {
    /// Advances the body by one tick of `delta` seconds at simulation `time`.
    pub fn move_player(
        &mut self,
        map: &VoxelMap,
        params: &PlayerParams,
        delta: f32,
        time: f32,
    ) -> Landing {
        if self.intents.jump {
            self.intents.jump = false;
            self.vel.z = -params.jump_velocity;
        }

        self.accelerate(params, delta);
        self.apply_friction(params, delta);

        let impact = self.vel.z;
        self.clip_move(map, params, delta, time);

        if self.vel.z != 0.0 {
            return Landing::None;
        }
        let landing = landing_outcome(params, impact);
        if landing != Landing::None {
            self.vel.x *= params.landing_damping;
            self.vel.y *= params.landing_damping;
            log::trace!("landed at {:?} with {impact:.3}: {landing:?}", self.pos);
        }
        landing
    }

    fn accelerate(&mut self, params: &PlayerParams, delta: f32) {
        let i = self.intents;
        let mut f = delta;
        if self.airborne {
            f *= params.airborne_accel;
        } else if i.crouch {
            f *= params.crouch_accel;
        } else if (i.secondary_fire && self.tool == Tool::Gun) || i.sneak {
            f *= params.aim_accel;
        } else if i.sprint {
            f *= params.sprint_accel;
        }
        if (i.forward || i.back) && (i.left || i.right) {
            f *= FRAC_1_SQRT_2;
        }

        if i.forward {
            self.vel.x += self.forward.x * f;
            self.vel.y += self.forward.y * f;
        } else if i.back {
            self.vel.x -= self.forward.x * f;
            self.vel.y -= self.forward.y * f;
        }
        if i.left {
            self.vel.x -= self.strafe.x * f;
            self.vel.y -= self.strafe.y * f;
        } else if i.right {
            self.vel.x += self.strafe.x * f;
            self.vel.y += self.strafe.y * f;
        }
    }

    fn apply_friction(&mut self, params: &PlayerParams, delta: f32) {
        self.vel.z += delta * params.gravity;
        self.vel.z /= delta + 1.0;

        let f = if self.wading {
            delta * params.water_friction + 1.0
        } else if !self.airborne {
            delta * params.ground_friction + 1.0
        } else {
            delta * params.air_friction + 1.0
        };
        self.vel.x /= f;
        self.vel.y /= f;
    }

    /// Horizontal moves with autoclimb, then the vertical move.
    fn clip_move(&mut self, map: &VoxelMap, params: &PlayerParams, delta: f32, time: f32) {
        let stance = Stance::of(self.intents.crouch);
        let scale = delta * params.motion_scale;
        let nx = scale * self.vel.x + self.pos.x;
        let ny = scale * self.vel.y + self.pos.y;
        let mut nz = self.pos.z + stance.center;

        let can_climb =
            !self.intents.crouch && self.forward.z < params.steep_look && !self.intents.sprint;

        let mut climbed = false;
        match clip::probe_x(map, nx, self.pos.y, self.vel.x, nz, stance, can_climb) {
            AxisMove::Committed => self.pos.x = nx,
            AxisMove::Climbed => {
                self.pos.x = nx;
                climbed = true;
            }
            AxisMove::Blocked => self.vel.x = 0.0,
        }
        match clip::probe_y(map, self.pos.x, ny, self.vel.y, nz, stance, can_climb && !climbed) {
            AxisMove::Committed => self.pos.y = ny,
            AxisMove::Climbed => {
                self.pos.y = ny;
                climbed = true;
            }
            // a y-blocked body that just climbed on x keeps its y speed
            AxisMove::Blocked if !climbed => self.vel.y = 0.0,
            AxisMove::Blocked => {}
        }

        let probe = if climbed {
            self.vel.x *= params.climb_damping;
            self.vel.y *= params.climb_damping;
            self.last_climb = time;
            nz -= clip::CLIMB_DROP;
            clip::CLIMB_PROBE
        } else {
            nz += self.vel.z * scale;
            if self.vel.z < 0.0 { -stance.top } else { stance.top }
        };

        self.airborne = true;
        if !clip::corners_clear(map, self.pos, nz + probe) {
            if self.vel.z >= 0.0 {
                self.wading = self.pos.z > params.wade_level;
                self.airborne = false;
            }
            self.vel.z = 0.0;
        } else {
            self.pos.z = nz - stance.center;
        }

        self.reposition(params, time);
    }
}
