//! Player hull movement and grenade ballistics over the voxel store.
#![forbid(unsafe_code)]

mod grenade;
mod player;

pub use grenade::{Bounce, Grenade};
pub use player::{BodyError, InputState, Intents, Landing, Player, Tool, landing_outcome};
