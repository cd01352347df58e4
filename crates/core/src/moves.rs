//! Landing descriptors produced by move generation.

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::types::RotateType;

/// One legal landing: the piece's reference point and whether a straight
/// drop reaches it (no softdrop input needed).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Move {
    pub rotate: RotateType,
    pub x: i32,
    pub y: i32,
    pub harddrop: bool,
}

impl Move {
    pub fn new(rotate: RotateType, x: i32, y: i32, harddrop: bool) -> Move {
        Move {
            rotate,
            x,
            y,
            harddrop,
        }
    }
}

/// A landing plus its resulting field, used by the scored traversal.
#[derive(Clone)]
pub struct ScoredMove {
    pub field: Field,
    pub mv: Move,
    pub num_cleared: u32,
    pub score: i32,
}
