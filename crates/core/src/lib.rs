//! allclear-core - bit-board field and piece geometry for perfect-clear
//! search.

mod field;
mod moves;
mod piece;
mod types;

pub use field::{Field, FIELD_WIDTH, MAX_FIELD_HEIGHT};
pub use moves::{Move, ScoredMove};
pub use piece::{Blocks, Collider, Factory, Offset, Piece, Point, Transform};
pub use types::{PieceType, RotateType};
