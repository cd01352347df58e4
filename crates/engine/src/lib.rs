//! allclear-engine - move generation, rotate-end reachability, and spin
//! classification over the core bit-board.

mod frames;
mod movegen;
mod reachable;
mod spins;

pub use frames::frames;
pub use movegen::MoveGenerator;
pub use reachable::{RotateEnd, RotateEndReachable};
pub use spins::{allspin_attack, tspin_attack};
