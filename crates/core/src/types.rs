//! Piece and rotation enums shared across the workspace.

use serde::{Deserialize, Serialize};

/// The seven tetrominoes. Discriminants match the wire protocol, so do not
/// reorder.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PieceType {
    T = 0,
    I = 1,
    L = 2,
    J = 3,
    S = 4,
    Z = 5,
    O = 6,
}

impl PieceType {
    pub const ALL: [PieceType; 7] = [
        PieceType::T,
        PieceType::I,
        PieceType::L,
        PieceType::J,
        PieceType::S,
        PieceType::Z,
        PieceType::O,
    ];

    pub fn from_char(c: char) -> Option<PieceType> {
        match c {
            'T' => Some(PieceType::T),
            'I' => Some(PieceType::I),
            'L' => Some(PieceType::L),
            'J' => Some(PieceType::J),
            'S' => Some(PieceType::S),
            'Z' => Some(PieceType::Z),
            'O' => Some(PieceType::O),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            PieceType::T => 'T',
            PieceType::I => 'I',
            PieceType::L => 'L',
            PieceType::J => 'J',
            PieceType::S => 'S',
            PieceType::Z => 'Z',
            PieceType::O => 'O',
        }
    }
}

/// Rotation states. `Spawn` is the orientation a piece enters the field with.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum RotateType {
    #[default]
    Spawn = 0,
    Right = 1,
    Reverse = 2,
    Left = 3,
}

impl RotateType {
    pub const ALL: [RotateType; 4] = [
        RotateType::Spawn,
        RotateType::Right,
        RotateType::Reverse,
        RotateType::Left,
    ];

    pub fn from_index(index: usize) -> RotateType {
        Self::ALL[index % 4]
    }

    pub fn cw(self) -> Self {
        Self::from_index(self as usize + 1)
    }

    pub fn ccw(self) -> Self {
        Self::from_index(self as usize + 3)
    }

    pub fn flip(self) -> Self {
        Self::from_index(self as usize + 2)
    }
}
