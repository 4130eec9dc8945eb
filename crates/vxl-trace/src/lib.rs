//! Integer-accumulator grid walks shared by sight, ray and line queries.
#![forbid(unsafe_code)]

mod dda;
mod line;

pub use dda::{GridWalk, SLOPE_SCALE, first_solid};
pub use line::block_line;
