//! Spin classification and attack values.
//!
//! Two flavours: T-spin only (corner rules) and all-spin (immobility). Both
//! return the attack a clearing placement sends, 0 for non-spins.

use allclear_core::{Factory, Field, Move, PieceType, RotateType, FIELD_WIDTH};

use crate::reachable::RotateEndReachable;

const TSPIN_FULL_ATTACK: [i32; 4] = [0, 2, 4, 6];
const TSPIN_MINI_ATTACK: [i32; 4] = [0, 0, 1, 2];
const ALLSPIN_REGULAR_ATTACK: [i32; 5] = [0, 2, 4, 6, 10];
const ALLSPIN_MINI_ATTACK: [i32; 5] = [0, 0, 1, 2, 4];
const BACK_TO_BACK_BONUS: i32 = 1;

#[inline]
fn b2b_bonus(b2b: bool) -> i32 {
    if b2b {
        BACK_TO_BACK_BONUS
    } else {
        0
    }
}

/// Walls and the floor count as filled; open air above does not.
fn corner_filled(field: &Field, x: i32, y: i32) -> bool {
    if x < 0 || x >= FIELD_WIDTH as i32 || y < 0 {
        return true;
    }
    let y = y as usize;
    y < allclear_core::MAX_FIELD_HEIGHT && field.get(x as usize, y)
}

/// The two corners the T points at, per rotation.
fn front_corners(rotate: RotateType, x: i32, y: i32) -> [(i32, i32); 2] {
    match rotate {
        RotateType::Spawn => [(x - 1, y + 1), (x + 1, y + 1)],
        RotateType::Right => [(x + 1, y + 1), (x + 1, y - 1)],
        RotateType::Reverse => [(x - 1, y - 1), (x + 1, y - 1)],
        RotateType::Left => [(x - 1, y + 1), (x - 1, y - 1)],
    }
}

/// Attack for a T-spin clear, 0 otherwise. Requires a rotate-end entry and
/// the 3-corner rule; both front corners (or the fifth-kick entry) make it
/// a full T-spin, anything else a mini.
pub fn tspin_attack(
    factory: &Factory,
    reachable: &RotateEndReachable,
    field_before: &Field,
    piece_type: PieceType,
    mv: &Move,
    num_cleared: u32,
    b2b: bool,
) -> i32 {
    if piece_type != PieceType::T || num_cleared == 0 {
        return 0;
    }

    let Some(end) = reachable.checks(factory, field_before, piece_type, mv.rotate, mv.x, mv.y)
    else {
        return 0;
    };

    let corners = [
        (mv.x - 1, mv.y + 1),
        (mv.x + 1, mv.y + 1),
        (mv.x - 1, mv.y - 1),
        (mv.x + 1, mv.y - 1),
    ];
    let filled = corners
        .iter()
        .filter(|&&(x, y)| corner_filled(field_before, x, y))
        .count();
    if filled < 3 {
        return 0;
    }

    let front = front_corners(mv.rotate, mv.x, mv.y)
        .iter()
        .all(|&(x, y)| corner_filled(field_before, x, y));
    let full = front || end.fifth_kick;

    let index = (num_cleared as usize).min(3);
    let base = if full {
        TSPIN_FULL_ATTACK[index]
    } else {
        TSPIN_MINI_ATTACK[index]
    };
    base + b2b_bonus(b2b)
}

/// Attack for an all-spin clear: any piece locked immobile (cannot shift
/// left, right, or up) counts as a spin. `regular_attack` scores minis with
/// the full table.
#[allow(clippy::too_many_arguments)]
pub fn allspin_attack(
    factory: &Factory,
    reachable: &RotateEndReachable,
    field_before: &Field,
    piece_type: PieceType,
    mv: &Move,
    num_cleared: u32,
    b2b: bool,
    regular_attack: bool,
) -> i32 {
    if num_cleared == 0 {
        return 0;
    }

    let blocks = factory.get_blocks(piece_type, mv.rotate);
    let immobile = !field_before.can_put(blocks, mv.x - 1, mv.y)
        && !field_before.can_put(blocks, mv.x + 1, mv.y)
        && !field_before.can_put(blocks, mv.x, mv.y + 1);

    let index = (num_cleared as usize).min(4);

    if piece_type == PieceType::T {
        let t_attack = tspin_attack(
            factory,
            reachable,
            field_before,
            piece_type,
            mv,
            num_cleared,
            b2b,
        );
        if t_attack > 0 {
            return if regular_attack {
                ALLSPIN_REGULAR_ATTACK[index] + b2b_bonus(b2b)
            } else {
                t_attack
            };
        }
        if !immobile {
            return 0;
        }
    } else if !immobile {
        return 0;
    }

    let base = if regular_attack {
        ALLSPIN_REGULAR_ATTACK[index]
    } else {
        ALLSPIN_MINI_ATTACK[index]
    };
    base + b2b_bonus(b2b)
}
