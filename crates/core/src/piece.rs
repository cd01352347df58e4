//! Piece geometry tables: aligned masks, per-row hard-drop colliders, and
//! kick tables for the SRS and SRS+ rotation systems.
//!
//! Everything here is built once per [`Factory`] and shared immutably.

use crate::field::{FIELD_WIDTH, MAX_FIELD_HEIGHT, VALID_BOARD_RANGE};
use crate::types::{PieceType, RotateType};

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    pub const ZERO: Offset = Offset { x: 0, y: 0 };

    const fn plus(self, other: Offset) -> Offset {
        Offset {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    const fn minus(self, other: Offset) -> Offset {
        Offset {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Canonicalisation entry: applying `offset` and switching to `to_rotate`
/// yields the same cell pattern.
#[derive(Clone, Copy, Debug)]
pub struct Transform {
    pub offset: Offset,
    pub to_rotate: RotateType,
}

/// Union of a piece mask placed on every row from some lower bound up to the
/// top of the field. Spans the four 6-row board slices.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Collider {
    pub boards: [u64; 4],
}

fn merge_collider(prev: &Collider, mask: u64, height: usize, lower_y: usize) -> Collider {
    debug_assert!(lower_y + height <= MAX_FIELD_HEIGHT);

    let mut collider = *prev;
    let index = lower_y / 6;
    let local_y = lower_y % 6;
    if 6 < local_y + height {
        collider.boards[index] |= (mask << (local_y * FIELD_WIDTH)) & VALID_BOARD_RANGE;
        collider.boards[index + 1] |= mask >> ((6 - local_y) * FIELD_WIDTH);
    } else {
        collider.boards[index] |= mask << (local_y * FIELD_WIDTH);
    }
    collider
}

/// One (piece, rotation) shape: cells, aligned mask, bounding box, and the
/// precomputed hard-drop colliders for every landing row.
#[derive(Clone)]
pub struct Blocks {
    pub rotate: RotateType,
    pub points: [Point; 4],
    mask: u64,
    harddrop_colliders: [Collider; MAX_FIELD_HEIGHT],
    pub min_x: i32,
    pub max_x: i32,
    pub min_y: i32,
    pub max_y: i32,
    pub width: usize,
    pub height: usize,
}

impl Blocks {
    fn create(rotate: RotateType, points: [Point; 4]) -> Blocks {
        let min_x = points.iter().map(|p| p.x).min().unwrap_or(0);
        let max_x = points.iter().map(|p| p.x).max().unwrap_or(0);
        let min_y = points.iter().map(|p| p.y).min().unwrap_or(0);
        let max_y = points.iter().map(|p| p.y).max().unwrap_or(0);

        // Left/bottom align so the mask's origin is (0, 0).
        let mut mask = 0u64;
        for point in &points {
            let x = (point.x - min_x) as usize;
            let y = (point.y - min_y) as usize;
            mask |= 1u64 << (x + y * FIELD_WIDTH);
        }

        let width = (max_x - min_x + 1) as usize;
        let height = (max_y - min_y + 1) as usize;

        let mut harddrop_colliders = [Collider::default(); MAX_FIELD_HEIGHT];
        let top = MAX_FIELD_HEIGHT - height;
        harddrop_colliders[top] = merge_collider(&Collider::default(), mask, height, top);
        for lower_y in (0..top).rev() {
            harddrop_colliders[lower_y] =
                merge_collider(&harddrop_colliders[lower_y + 1], mask, height, lower_y);
        }

        Blocks {
            rotate,
            points,
            mask,
            harddrop_colliders,
            min_x,
            max_x,
            min_y,
            max_y,
            width,
            height,
        }
    }

    pub fn mask_bits(&self) -> u64 {
        self.mask
    }

    /// Mask shifted to `left_x` within the board slice whose local row is
    /// `local_y`. Returns the (lower, upper) word pair.
    pub fn shifted_mask(&self, left_x: usize, local_y: usize) -> (u64, u64) {
        debug_assert!(left_x + self.width <= FIELD_WIDTH);
        debug_assert!(local_y < 6);

        let slide = self.mask << left_x;
        if 6 < local_y + self.height {
            (
                (slide << (local_y * FIELD_WIDTH)) & VALID_BOARD_RANGE,
                slide >> ((6 - local_y) * FIELD_WIDTH),
            )
        } else {
            (slide << (local_y * FIELD_WIDTH), 0)
        }
    }

    /// Collider for a hard drop onto row `lower_y`, shifted to `left_x`.
    pub fn harddrop_collider(&self, left_x: usize, lower_y: usize) -> Collider {
        debug_assert!(left_x + self.width <= FIELD_WIDTH);
        debug_assert!(lower_y + self.height <= MAX_FIELD_HEIGHT);

        let collider = &self.harddrop_colliders[lower_y];
        Collider {
            boards: [
                collider.boards[0] << left_x,
                collider.boards[1] << left_x,
                collider.boards[2] << left_x,
                collider.boards[3] << left_x,
            ],
        }
    }
}

fn rotate_right(points: [Point; 4]) -> [Point; 4] {
    points.map(|p| Point { x: p.y, y: -p.x })
}

fn rotate_left(points: [Point; 4]) -> [Point; 4] {
    points.map(|p| Point { x: -p.y, y: p.x })
}

fn rotate_reverse(points: [Point; 4]) -> [Point; 4] {
    points.map(|p| Point { x: -p.x, y: -p.y })
}

/// A tetromino with all four rotation shapes and its kick tables.
#[derive(Clone)]
pub struct Piece {
    pub piece_type: PieceType,
    pub name: &'static str,
    pub blocks: [Blocks; 4],
    cw_offsets: [Offset; 20],
    ccw_offsets: [Offset; 20],
    rotate_180_offsets: [Offset; 24],
    offsets_size_90: usize,
    offsets_size_180: usize,
    pub transforms: [Transform; 4],
    pub unique_rotates: u8,
    pub same_shape_rotates: [u8; 4],
}

impl Piece {
    /// SRS-style construction: per-rotation offset rows, kicks derived by
    /// element-wise subtraction of the target rotation's offsets.
    fn from_offsets<const N: usize>(
        piece_type: PieceType,
        name: &'static str,
        points: [Point; 4],
        offsets: [[Offset; N]; 4],
        rotate_180_offsets: [Offset; 24],
        offsets_size_180: usize,
        transforms: [Transform; 4],
    ) -> Piece {
        let mut cw_offsets = [Offset::ZERO; 20];
        let mut ccw_offsets = [Offset::ZERO; 20];
        for rotate in 0..4 {
            let from = &offsets[rotate];
            let cw_to = &offsets[(rotate + 1) % 4];
            let ccw_to = &offsets[(rotate + 3) % 4];
            for index in 0..N {
                cw_offsets[rotate * 5 + index] = from[index].minus(cw_to[index]);
                ccw_offsets[rotate * 5 + index] = from[index].minus(ccw_to[index]);
            }
        }

        Self::from_kick_tables(
            piece_type,
            name,
            points,
            cw_offsets,
            ccw_offsets,
            N,
            rotate_180_offsets,
            offsets_size_180,
            transforms,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn from_kick_tables(
        piece_type: PieceType,
        name: &'static str,
        points: [Point; 4],
        cw_offsets: [Offset; 20],
        ccw_offsets: [Offset; 20],
        offsets_size_90: usize,
        rotate_180_offsets: [Offset; 24],
        offsets_size_180: usize,
        transforms: [Transform; 4],
    ) -> Piece {
        let blocks = [
            Blocks::create(RotateType::Spawn, points),
            Blocks::create(RotateType::Right, rotate_right(points)),
            Blocks::create(RotateType::Reverse, rotate_reverse(points)),
            Blocks::create(RotateType::Left, rotate_left(points)),
        ];

        let mut unique_rotates = 0u8;
        for transform in &transforms {
            unique_rotates |= 1 << transform.to_rotate as u8;
        }

        let mut same_shape_rotates = [0u8; 4];
        for (rotate, same) in same_shape_rotates.iter_mut().enumerate() {
            for (target, transform) in transforms.iter().enumerate() {
                if rotate == transform.to_rotate as usize {
                    *same |= 1 << target;
                }
            }
        }
        for rotate in 0..4 {
            let after = transforms[rotate].to_rotate as usize;
            if rotate != after {
                same_shape_rotates[rotate] = same_shape_rotates[after];
            }
        }

        Piece {
            piece_type,
            name,
            blocks,
            cw_offsets,
            ccw_offsets,
            rotate_180_offsets,
            offsets_size_90,
            offsets_size_180,
            transforms,
            unique_rotates,
            same_shape_rotates,
        }
    }

    pub fn cw_kicks(&self, from: RotateType) -> &[Offset] {
        let base = from as usize * 5;
        &self.cw_offsets[base..base + self.offsets_size_90]
    }

    pub fn ccw_kicks(&self, from: RotateType) -> &[Offset] {
        let base = from as usize * 5;
        &self.ccw_offsets[base..base + self.offsets_size_90]
    }

    pub fn kicks_180(&self, from: RotateType) -> &[Offset] {
        let base = from as usize * 6;
        &self.rotate_180_offsets[base..base + self.offsets_size_180]
    }
}

/// Seven pieces plus a flat index of all 28 rotation shapes.
pub struct Factory {
    pieces: [Piece; 7],
    blocks: [Blocks; 28],
}

const ZERO: Offset = Offset::ZERO;

const fn tf(x: i32, y: i32, to_rotate: RotateType) -> Transform {
    Transform {
        offset: Offset { x, y },
        to_rotate,
    }
}

const fn of(x: i32, y: i32) -> Offset {
    Offset { x, y }
}

const T_TRANSFORMS: [Transform; 4] = [
    tf(0, 0, RotateType::Spawn),
    tf(0, 0, RotateType::Right),
    tf(0, 0, RotateType::Reverse),
    tf(0, 0, RotateType::Left),
];

const I_TRANSFORMS: [Transform; 4] = [
    tf(0, 0, RotateType::Spawn),
    tf(0, -1, RotateType::Left),
    tf(-1, 0, RotateType::Spawn),
    tf(0, 0, RotateType::Left),
];

const S_TRANSFORMS: [Transform; 4] = [
    tf(0, 0, RotateType::Spawn),
    tf(1, 0, RotateType::Left),
    tf(0, -1, RotateType::Spawn),
    tf(0, 0, RotateType::Left),
];

const Z_TRANSFORMS: [Transform; 4] = [
    tf(0, 0, RotateType::Spawn),
    tf(0, 0, RotateType::Right),
    tf(0, -1, RotateType::Spawn),
    tf(-1, 0, RotateType::Right),
];

const O_TRANSFORMS: [Transform; 4] = [
    tf(0, 0, RotateType::Spawn),
    tf(0, -1, RotateType::Spawn),
    tf(-1, -1, RotateType::Spawn),
    tf(-1, 0, RotateType::Spawn),
];

const fn points(raw: [(i32, i32); 4]) -> [Point; 4] {
    [
        Point { x: raw[0].0, y: raw[0].1 },
        Point { x: raw[1].0, y: raw[1].1 },
        Point { x: raw[2].0, y: raw[2].1 },
        Point { x: raw[3].0, y: raw[3].1 },
    ]
}

const T_POINTS: [Point; 4] = points([(0, 0), (-1, 0), (1, 0), (0, 1)]);
const I_POINTS: [Point; 4] = points([(0, 0), (-1, 0), (1, 0), (2, 0)]);
const L_POINTS: [Point; 4] = points([(0, 0), (-1, 0), (1, 0), (1, 1)]);
const J_POINTS: [Point; 4] = points([(0, 0), (-1, 0), (1, 0), (-1, 1)]);
const S_POINTS: [Point; 4] = points([(0, 0), (-1, 0), (0, 1), (1, 1)]);
const Z_POINTS: [Point; 4] = points([(0, 0), (1, 0), (0, 1), (-1, 1)]);
const O_POINTS: [Point; 4] = points([(0, 0), (1, 0), (0, 1), (1, 1)]);

const I_OFFSETS: [[Offset; 5]; 4] = [
    [of(0, 0), of(-1, 0), of(2, 0), of(-1, 0), of(2, 0)],
    [of(-1, 0), of(0, 0), of(0, 0), of(0, 1), of(0, -2)],
    [of(-1, 1), of(1, 1), of(-2, 1), of(1, 0), of(-2, 0)],
    [of(0, 1), of(0, 1), of(0, 1), of(0, -1), of(0, 2)],
];

const O_OFFSETS: [[Offset; 1]; 4] = [[of(0, 0)], [of(0, -1)], [of(-1, -1)], [of(-1, 0)]];

const OTHER_OFFSETS: [[Offset; 5]; 4] = [
    [of(0, 0), of(0, 0), of(0, 0), of(0, 0), of(0, 0)],
    [of(0, 0), of(1, 0), of(1, -1), of(0, 2), of(1, 2)],
    [of(0, 0), of(0, 0), of(0, 0), of(0, 0), of(0, 0)],
    [of(0, 0), of(-1, 0), of(-1, -1), of(0, 2), of(-1, 2)],
];

const NO_180: [Offset; 24] = [ZERO; 24];

// SRS+ additions: direct I-piece 90 tables and 180 kick tables.

#[rustfmt::skip]
const I_CW_OFFSETS_PLUS: [Offset; 20] = [
    of(1, 0), of(2, 0), of(-1, 0), of(-1, -1), of(2, 2),
    of(0, -1), of(-1, -1), of(2, -1), of(-1, 1), of(2, -2),
    of(-1, 0), of(1, 0), of(-2, 0), of(1, 1), of(-2, -2),
    of(0, 1), of(1, 1), of(-2, 1), of(2, -1), of(-2, 2),
];

#[rustfmt::skip]
const I_CCW_OFFSETS_PLUS: [Offset; 20] = [
    of(0, -1), of(-1, -1), of(2, -1), of(2, -2), of(-1, 2),
    of(-1, 0), of(-2, 0), of(1, 0), of(-2, -2), of(1, 1),
    of(0, 1), of(-2, 1), of(1, 1), of(-2, 2), of(1, -1),
    of(1, 0), of(2, 0), of(-1, 0), of(2, 2), of(-1, -1),
];

#[rustfmt::skip]
const O_ROTATE_180_OFFSETS: [Offset; 24] = [
    of(1, 1), ZERO, ZERO, ZERO, ZERO, ZERO,
    of(1, -1), ZERO, ZERO, ZERO, ZERO, ZERO,
    of(-1, -1), ZERO, ZERO, ZERO, ZERO, ZERO,
    of(-1, 1), ZERO, ZERO, ZERO, ZERO, ZERO,
];

#[rustfmt::skip]
const OTHER_ROTATE_180_OFFSETS: [Offset; 24] = [
    of(0, 0), of(0, 1), of(1, 1), of(-1, 1), of(1, 0), of(-1, 0),
    of(0, 0), of(1, 0), of(1, 2), of(1, 1), of(0, 2), of(0, 1),
    of(0, 0), of(0, -1), of(-1, -1), of(1, -1), of(-1, 0), of(1, 0),
    of(0, 0), of(-1, 0), of(-1, 2), of(-1, 1), of(0, 2), of(0, 1),
];

fn i_rotate_180_offsets() -> [Offset; 24] {
    let spawn_shift = of(1, -1);
    let right_shift = of(-1, -1);

    let mut table = [ZERO; 24];
    for index in 0..6 {
        table[index] = OTHER_ROTATE_180_OFFSETS[index].plus(spawn_shift);
        table[6 + index] = OTHER_ROTATE_180_OFFSETS[6 + index].plus(right_shift);
        table[12 + index] = OTHER_ROTATE_180_OFFSETS[12 + index].minus(spawn_shift);
        table[18 + index] = OTHER_ROTATE_180_OFFSETS[18 + index].minus(right_shift);
    }
    table
}

impl Factory {
    /// Standard rotation system: 5-offset CW/CCW kicks, no 180.
    pub fn create() -> Factory {
        let t = Piece::from_offsets(PieceType::T, "T", T_POINTS, OTHER_OFFSETS, NO_180, 0, T_TRANSFORMS);
        let i = Piece::from_offsets(PieceType::I, "I", I_POINTS, I_OFFSETS, NO_180, 0, I_TRANSFORMS);
        let l = Piece::from_offsets(PieceType::L, "L", L_POINTS, OTHER_OFFSETS, NO_180, 0, T_TRANSFORMS);
        let j = Piece::from_offsets(PieceType::J, "J", J_POINTS, OTHER_OFFSETS, NO_180, 0, T_TRANSFORMS);
        let s = Piece::from_offsets(PieceType::S, "S", S_POINTS, OTHER_OFFSETS, NO_180, 0, S_TRANSFORMS);
        let z = Piece::from_offsets(PieceType::Z, "Z", Z_POINTS, OTHER_OFFSETS, NO_180, 0, Z_TRANSFORMS);
        let o = Piece::from_offsets(PieceType::O, "O", O_POINTS, O_OFFSETS, NO_180, 0, O_TRANSFORMS);

        Self::assemble(t, i, l, j, s, z, o)
    }

    /// SRS+ variant: extended I-piece CW/CCW tables and 180 kicks.
    pub fn create_srs_plus() -> Factory {
        let i180 = i_rotate_180_offsets();

        let t = Piece::from_offsets(
            PieceType::T, "T", T_POINTS, OTHER_OFFSETS, OTHER_ROTATE_180_OFFSETS, 6, T_TRANSFORMS,
        );
        let i = Piece::from_kick_tables(
            PieceType::I, "I", I_POINTS, I_CW_OFFSETS_PLUS, I_CCW_OFFSETS_PLUS, 5, i180, 6,
            I_TRANSFORMS,
        );
        let l = Piece::from_offsets(
            PieceType::L, "L", L_POINTS, OTHER_OFFSETS, OTHER_ROTATE_180_OFFSETS, 6, T_TRANSFORMS,
        );
        let j = Piece::from_offsets(
            PieceType::J, "J", J_POINTS, OTHER_OFFSETS, OTHER_ROTATE_180_OFFSETS, 6, T_TRANSFORMS,
        );
        let s = Piece::from_offsets(
            PieceType::S, "S", S_POINTS, OTHER_OFFSETS, OTHER_ROTATE_180_OFFSETS, 6, S_TRANSFORMS,
        );
        let z = Piece::from_offsets(
            PieceType::Z, "Z", Z_POINTS, OTHER_OFFSETS, OTHER_ROTATE_180_OFFSETS, 6, Z_TRANSFORMS,
        );
        let o = Piece::from_offsets(
            PieceType::O, "O", O_POINTS, O_OFFSETS, O_ROTATE_180_OFFSETS, 1, O_TRANSFORMS,
        );

        Self::assemble(t, i, l, j, s, z, o)
    }

    fn assemble(t: Piece, i: Piece, l: Piece, j: Piece, s: Piece, z: Piece, o: Piece) -> Factory {
        let blocks = [
            t.blocks[0].clone(), t.blocks[1].clone(), t.blocks[2].clone(), t.blocks[3].clone(),
            i.blocks[0].clone(), i.blocks[1].clone(), i.blocks[2].clone(), i.blocks[3].clone(),
            l.blocks[0].clone(), l.blocks[1].clone(), l.blocks[2].clone(), l.blocks[3].clone(),
            j.blocks[0].clone(), j.blocks[1].clone(), j.blocks[2].clone(), j.blocks[3].clone(),
            s.blocks[0].clone(), s.blocks[1].clone(), s.blocks[2].clone(), s.blocks[3].clone(),
            z.blocks[0].clone(), z.blocks[1].clone(), z.blocks[2].clone(), z.blocks[3].clone(),
            o.blocks[0].clone(), o.blocks[1].clone(), o.blocks[2].clone(), o.blocks[3].clone(),
        ];
        let pieces = [t, i, l, j, s, z, o];
        Factory { pieces, blocks }
    }

    pub fn get(&self, piece: PieceType) -> &Piece {
        &self.pieces[piece as usize]
    }

    pub fn get_blocks(&self, piece: PieceType, rotate: RotateType) -> &Blocks {
        &self.blocks[piece as usize * 4 + rotate as usize]
    }
}
