//! Two-line PC oracle: can the residual queue clear a fresh 2-row region?
//!
//! Used only to seed the last-hold priority mask, so this is an existence
//! search with first-found exit, not a best-solution search.

use allclear_core::{Field, PieceType};

use crate::search::{validate, SearchContext};

pub(crate) fn can_take_two_line_pc(ctx: &SearchContext<'_>, pieces: &[PieceType]) -> bool {
    if pieces.is_empty() {
        return false;
    }
    search(ctx, pieces, &Field::new(), 0, None, 2)
}

fn search(
    ctx: &SearchContext<'_>,
    pieces: &[PieceType],
    field: &Field,
    current_index: usize,
    hold_index: Option<usize>,
    left_line: u32,
) -> bool {
    let can_use_current = current_index < pieces.len();
    if can_use_current
        && place(
            ctx,
            pieces,
            field,
            pieces[current_index],
            current_index + 1,
            hold_index,
            left_line,
        )
    {
        return true;
    }

    match hold_index {
        Some(hold) => {
            if !can_use_current || pieces[current_index] != pieces[hold] {
                return place(
                    ctx,
                    pieces,
                    field,
                    pieces[hold],
                    current_index + 1,
                    Some(current_index),
                    left_line,
                );
            }
        }
        None if can_use_current => {
            let next_index = current_index + 1;
            if next_index < pieces.len() && pieces[current_index] != pieces[next_index] {
                return place(
                    ctx,
                    pieces,
                    field,
                    pieces[next_index],
                    next_index + 1,
                    Some(current_index),
                    left_line,
                );
            }
        }
        None => {}
    }
    false
}

fn place(
    ctx: &SearchContext<'_>,
    pieces: &[PieceType],
    field: &Field,
    piece: PieceType,
    next_index: usize,
    next_hold_index: Option<usize>,
    left_line: u32,
) -> bool {
    let mut moves = Vec::with_capacity(32);
    ctx.move_gen
        .search(ctx.factory, field, piece, left_line, &mut moves);

    for mv in &moves {
        let blocks = ctx.factory.get_blocks(piece, mv.rotate);
        let mut freeze = *field;
        freeze.put(blocks, mv.x, mv.y);
        let num_cleared = freeze.clear_lines();
        let next_left = left_line - num_cleared;

        if next_left == 0 {
            return true;
        }
        if !validate(&freeze, next_left) {
            continue;
        }
        if search(ctx, pieces, &freeze, next_index, next_hold_index, next_left) {
            return true;
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use allclear_core::Factory;
    use allclear_engine::{MoveGenerator, RotateEndReachable};
    use std::sync::atomic::AtomicBool;

    fn with_ctx(pieces: &[PieceType]) -> bool {
        let factory = Factory::create();
        let move_gen = MoveGenerator::new(false);
        let reachable = RotateEndReachable::new(false);
        let abort = AtomicBool::new(false);
        let ctx = SearchContext {
            factory: &factory,
            move_gen: &move_gen,
            reachable: &reachable,
            abort: &abort,
        };
        can_take_two_line_pc(&ctx, pieces)
    }

    use PieceType::*;

    #[test]
    fn test_three_o_two_i_works() {
        assert!(with_ctx(&[O, O, O, I, I]));
        assert!(with_ctx(&[I, O, O, O, I]));
    }

    #[test]
    fn test_hold_can_defer_a_piece() {
        // The T is held away; the tail supplies the fifth piece.
        assert!(with_ctx(&[O, O, T, O, I, I]));
    }

    #[test]
    fn test_row_parity_rules_out_t() {
        // {T,O,O,O,I} cannot split 10+10 across two rows.
        assert!(!with_ctx(&[T, O, O, O, I]));
    }

    #[test]
    fn test_four_o_one_i_fails() {
        assert!(!with_ctx(&[O, O, O, O, I]));
    }

    #[test]
    fn test_empty_queue_fails() {
        assert!(!with_ctx(&[]));
    }

    #[test]
    fn test_l_j_pairs_work() {
        // Two L/J pairs interlock into 2x4 boxes plus an O.
        assert!(with_ctx(&[L, J, L, J, O]));
    }
}
