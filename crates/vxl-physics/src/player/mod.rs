mod clip;
mod movement;

pub use movement::{Landing, landing_outcome};

use std::fmt;

use vxl_config::PlayerParams;
use vxl_geom::Vec3;
use vxl_map::VoxelMap;

/// Held item. Ids match the wire protocol.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Tool {
    Spade = 0,
    #[default]
    Block = 1,
    Gun = 2,
    Grenade = 3,
}

impl Tool {
    pub fn from_id(id: u8) -> Option<Tool> {
        match id {
            0 => Some(Tool::Spade),
            1 => Some(Tool::Block),
            2 => Some(Tool::Gun),
            3 => Some(Tool::Grenade),
            _ => None,
        }
    }

    #[inline]
    pub fn id(self) -> u8 {
        self as u8
    }
}

/// Movement key bits as sent by clients.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InputState(pub u8);

impl InputState {
    pub const UP: InputState = InputState(1);
    pub const DOWN: InputState = InputState(1 << 1);
    pub const LEFT: InputState = InputState(1 << 2);
    pub const RIGHT: InputState = InputState(1 << 3);
    pub const JUMP: InputState = InputState(1 << 4);
    pub const CROUCH: InputState = InputState(1 << 5);
    pub const SNEAK: InputState = InputState(1 << 6);
    pub const SPRINT: InputState = InputState(1 << 7);

    pub const NONE: InputState = InputState(0);

    #[inline]
    pub fn contains(self, other: InputState) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn with(self, other: InputState) -> InputState {
        InputState(self.0 | other.0)
    }
}

impl core::ops::BitOr for InputState {
    type Output = InputState;
    fn bitor(self, rhs: InputState) -> InputState {
        self.with(rhs)
    }
}

/// Discrete movement intents for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intents {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub crouch: bool,
    pub sneak: bool,
    pub sprint: bool,
    pub primary_fire: bool,
    pub secondary_fire: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BodyError {
    NonFinite(&'static str),
    TooFar { distance: f32 },
}

impl fmt::Display for BodyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyError::NonFinite(what) => write!(f, "{what} has a non-finite component"),
            BodyError::TooFar { distance } => {
                write!(f, "reported position is {distance:.2} from the simulated one")
            }
        }
    }
}

impl std::error::Error for BodyError {}

/// Humanoid body. `pos` is the body center; z grows downward.
#[derive(Clone, Debug)]
pub struct Player {
    pos: Vec3,
    eye: Vec3,
    vel: Vec3,
    forward: Vec3,
    strafe: Vec3,
    height: Vec3,
    intents: Intents,
    tool: Tool,
    airborne: bool,
    wading: bool,
    last_climb: f32,
}

impl Player {
    pub fn new(pos: Vec3) -> Self {
        let mut p = Self {
            pos,
            eye: pos,
            vel: Vec3::ZERO,
            forward: Vec3::ZERO,
            strafe: Vec3::ZERO,
            height: Vec3::ZERO,
            intents: Intents::default(),
            tool: Tool::default(),
            // the first vertical probe lands a body placed on the ground
            airborne: true,
            wading: false,
            last_climb: f32::NEG_INFINITY,
        };
        p.orient(Vec3::new(1.0, 0.0, 0.0));
        p
    }

    #[inline]
    pub fn pos(&self) -> Vec3 {
        self.pos
    }
    #[inline]
    pub fn eye(&self) -> Vec3 {
        self.eye
    }
    #[inline]
    pub fn vel(&self) -> Vec3 {
        self.vel
    }
    #[inline]
    pub fn forward(&self) -> Vec3 {
        self.forward
    }
    #[inline]
    pub fn strafe(&self) -> Vec3 {
        self.strafe
    }
    #[inline]
    pub fn height(&self) -> Vec3 {
        self.height
    }
    #[inline]
    pub fn intents(&self) -> Intents {
        self.intents
    }
    #[inline]
    pub fn tool(&self) -> Tool {
        self.tool
    }
    #[inline]
    pub fn is_airborne(&self) -> bool {
        self.airborne
    }
    #[inline]
    pub fn is_wading(&self) -> bool {
        self.wading
    }
    #[inline]
    pub fn is_crouching(&self) -> bool {
        self.intents.crouch
    }
    #[inline]
    pub fn last_climb(&self) -> f32 {
        self.last_climb
    }

    fn orient(&mut self, o: Vec3) {
        let mut f = o.horizontal_length();
        if f == 0.0 {
            f = 1.0;
        }
        let s = Vec3::new(-o.y / f, o.x / f, 0.0);
        self.forward = o;
        self.strafe = s;
        self.height = Vec3::new(-o.z * s.y, o.z * s.x, o.x * s.y - o.y * s.x);
    }

    /// Sets the aim direction and rebuilds the strafe and height vectors.
    ///
    /// A vertical aim leaves the strafe vector zero.
    pub fn set_orientation(&mut self, o: Vec3) -> Result<(), BodyError> {
        if !o.is_finite() {
            return Err(BodyError::NonFinite("orientation"));
        }
        self.orient(o);
        Ok(())
    }

    pub fn set_position(&mut self, pos: Vec3) -> Result<(), BodyError> {
        if !pos.is_finite() {
            return Err(BodyError::NonFinite("position"));
        }
        self.pos = pos;
        self.eye = pos;
        Ok(())
    }

    pub fn set_velocity(&mut self, vel: Vec3) -> Result<(), BodyError> {
        if !vel.is_finite() {
            return Err(BodyError::NonFinite("velocity"));
        }
        self.vel = vel;
        Ok(())
    }

    /// Takes a client's own position report if it is close enough to ours.
    pub fn accept_reported_position(
        &mut self,
        params: &PlayerParams,
        reported: Vec3,
    ) -> Result<(), BodyError> {
        if !reported.is_finite() {
            return Err(BodyError::NonFinite("reported position"));
        }
        let distance = self.pos.distance(reported);
        if distance > params.max_position_drift {
            log::warn!("rejecting position report {reported:?}, {distance:.2} away");
            return Err(BodyError::TooFar { distance });
        }
        self.pos = reported;
        self.eye = reported;
        Ok(())
    }

    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
    }

    pub fn set_weapon_input(&mut self, primary: bool, secondary: bool) {
        self.intents.primary_fire = primary;
        self.intents.secondary_fire = secondary;
    }

    /// Applies a client key state.
    ///
    /// Jump is dropped while airborne. Letting go of crouch stands the body
    /// up only if there is room; otherwise it stays crouched.
    pub fn apply_input(&mut self, map: &VoxelMap, input: InputState) {
        let i = &mut self.intents;
        i.forward = input.contains(InputState::UP);
        i.back = input.contains(InputState::DOWN);
        i.left = input.contains(InputState::LEFT);
        i.right = input.contains(InputState::RIGHT);
        i.sneak = input.contains(InputState::SNEAK);
        i.sprint = input.contains(InputState::SPRINT);
        i.jump = input.contains(InputState::JUMP) && !self.airborne;

        let want_crouch = input.contains(InputState::CROUCH);
        if self.intents.crouch && !want_crouch {
            if !self.try_uncrouch(map) {
                log::trace!("no room to stand at {:?}", self.pos);
            }
        } else {
            self.intents.crouch = want_crouch;
        }
    }

    /// Stands up from a crouch if the space allows it.
    ///
    /// In the air the feet drop into the free space below; on the ground the
    /// head rises, moving the body up. Returns false and stays crouched when
    /// neither fits.
    pub fn try_uncrouch(&mut self, map: &VoxelMap) -> bool {
        if self.airborne && clip::corners_clear(map, self.pos, self.pos.z + clip::UNCROUCH_FEET) {
            self.intents.crouch = false;
            return true;
        }
        if clip::corners_clear(map, self.pos, self.pos.z + clip::UNCROUCH_HEAD) {
            self.pos.z -= clip::UNCROUCH_RISE;
            self.eye.z -= clip::UNCROUCH_RISE;
            self.intents.crouch = false;
            return true;
        }
        false
    }

    pub(crate) fn reposition(&mut self, params: &PlayerParams, time: f32) {
        self.eye = self.pos;
        let f = self.last_climb - time;
        let ease = params.climb_ease_secs;
        if f > -ease {
            self.eye.z += (f + ease) / ease;
        }
    }
}
