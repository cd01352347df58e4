//! Move generation - reachability search over (rotation, x, y) states.
//!
//! Entry states are everything a piece can fall straight into (the hard-drop
//! collider test); from there a BFS expands left/right/softdrop moves and
//! kicked rotations. Landings are canonicalised through the piece's
//! transform table so same-shape rotations are emitted once.

use std::collections::VecDeque;

use allclear_core::{Factory, Field, Move, Piece, PieceType, RotateType, MAX_FIELD_HEIGHT};

// State tables cover x in [-2, 11] and y in [-2, 25].
const X_SLOTS: usize = 14;
const Y_SLOTS: usize = 28;

type StateSet = [[[bool; Y_SLOTS]; X_SLOTS]; 4];

#[inline]
fn slot(x: i32, y: i32) -> Option<(usize, usize)> {
    let xi = x + 2;
    let yi = y + 2;
    if (0..X_SLOTS as i32).contains(&xi) && (0..Y_SLOTS as i32).contains(&yi) {
        Some((xi as usize, yi as usize))
    } else {
        None
    }
}

/// Enumerates legal landings under a soft-drop rotation policy.
#[derive(Clone, Copy, Debug)]
pub struct MoveGenerator {
    allow_180: bool,
}

impl MoveGenerator {
    pub fn new(allow_180: bool) -> MoveGenerator {
        MoveGenerator { allow_180 }
    }

    /// Collect every landing whose cells lie strictly below `max_line`.
    /// Clears `moves` first.
    pub fn search(
        &self,
        factory: &Factory,
        field: &Field,
        piece_type: PieceType,
        max_line: u32,
        moves: &mut Vec<Move>,
    ) {
        moves.clear();

        let piece = factory.get(piece_type);
        let mut visited: StateSet = [[[false; Y_SLOTS]; X_SLOTS]; 4];
        let mut harddrops: StateSet = [[[false; Y_SLOTS]; X_SLOTS]; 4];
        let mut queue: VecDeque<(usize, i32, i32)> = VecDeque::with_capacity(128);

        // Seed: every position the piece can hover at while falling in from
        // above the stack, plus the straight-drop landing itself.
        for rotate in 0..4 {
            let blocks = &piece.blocks[rotate];
            for left_x in 0..=(allclear_core::FIELD_WIDTH - blocks.width) as i32 {
                let x = left_x - blocks.min_x;
                let mut landing = None;
                for lower_y in 0..=(MAX_FIELD_HEIGHT - blocks.height) as i32 {
                    let y = lower_y - blocks.min_y;
                    if field.can_reach_on_harddrop(blocks, x, y) {
                        landing = Some(y);
                        break;
                    }
                }
                let Some(harddrop_y) = landing else {
                    continue;
                };

                for lower_y in (harddrop_y + blocks.min_y)..=(MAX_FIELD_HEIGHT - blocks.height) as i32 {
                    visit(&mut visited, &mut queue, rotate, x, lower_y - blocks.min_y);
                }
                if let Some((xi, yi)) = slot(x, harddrop_y) {
                    harddrops[rotate][xi][yi] = true;
                }
            }
        }

        let mut landings: StateSet = [[[false; Y_SLOTS]; X_SLOTS]; 4];
        let mut harddrop_landings: StateSet = [[[false; Y_SLOTS]; X_SLOTS]; 4];

        while let Some((rotate, x, y)) = queue.pop_front() {
            let blocks = &piece.blocks[rotate];

            if !field.can_put(blocks, x, y - 1) && (blocks.max_y + y) < max_line as i32 {
                let transform = piece.transforms[rotate];
                let cx = x + transform.offset.x;
                let cy = y + transform.offset.y;
                if let Some((xi, yi)) = slot(cx, cy) {
                    let canonical = transform.to_rotate as usize;
                    landings[canonical][xi][yi] = true;
                    if let Some((sx, sy)) = slot(x, y) {
                        if harddrops[rotate][sx][sy] {
                            harddrop_landings[canonical][xi][yi] = true;
                        }
                    }
                }
            }

            if field.can_put(blocks, x - 1, y) {
                visit(&mut visited, &mut queue, rotate, x - 1, y);
            }
            if field.can_put(blocks, x + 1, y) {
                visit(&mut visited, &mut queue, rotate, x + 1, y);
            }
            if field.can_put(blocks, x, y - 1) {
                visit(&mut visited, &mut queue, rotate, x, y - 1);
            }

            self.expand_rotations(field, piece, rotate, x, y, &mut visited, &mut queue);
        }

        for rotate in 0..4 {
            for xi in 0..X_SLOTS {
                for yi in 0..Y_SLOTS {
                    if landings[rotate][xi][yi] {
                        moves.push(Move::new(
                            RotateType::from_index(rotate),
                            xi as i32 - 2,
                            yi as i32 - 2,
                            harddrop_landings[rotate][xi][yi],
                        ));
                    }
                }
            }
        }
    }

    fn expand_rotations(
        &self,
        field: &Field,
        piece: &Piece,
        rotate: usize,
        x: i32,
        y: i32,
        visited: &mut StateSet,
        queue: &mut VecDeque<(usize, i32, i32)>,
    ) {
        let from = RotateType::from_index(rotate);

        let cw = from.cw();
        if let Some((nx, ny)) = try_kicks(field, piece, piece.cw_kicks(from), cw, x, y) {
            visit(visited, queue, cw as usize, nx, ny);
        }

        let ccw = from.ccw();
        if let Some((nx, ny)) = try_kicks(field, piece, piece.ccw_kicks(from), ccw, x, y) {
            visit(visited, queue, ccw as usize, nx, ny);
        }

        if self.allow_180 {
            let flip = from.flip();
            if let Some((nx, ny)) = try_kicks(field, piece, piece.kicks_180(from), flip, x, y) {
                visit(visited, queue, flip as usize, nx, ny);
            }
        }
    }
}

fn try_kicks(
    field: &Field,
    piece: &Piece,
    kicks: &[allclear_core::Offset],
    to: RotateType,
    x: i32,
    y: i32,
) -> Option<(i32, i32)> {
    let to_blocks = &piece.blocks[to as usize];
    for kick in kicks {
        let nx = x + kick.x;
        let ny = y + kick.y;
        if field.can_put(to_blocks, nx, ny) {
            return Some((nx, ny));
        }
    }
    None
}

#[inline]
fn visit(
    visited: &mut StateSet,
    queue: &mut VecDeque<(usize, i32, i32)>,
    rotate: usize,
    x: i32,
    y: i32,
) {
    if let Some((xi, yi)) = slot(x, y) {
        if !visited[rotate][xi][yi] {
            visited[rotate][xi][yi] = true;
            queue.push_back((rotate, x, y));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(field: &Field, piece: PieceType, max_line: u32) -> usize {
        let factory = Factory::create();
        let move_gen = MoveGenerator::new(false);
        let mut moves = Vec::new();
        move_gen.search(&factory, field, piece, max_line, &mut moves);
        moves.len()
    }

    #[test]
    fn test_counts_on_empty_field_four_lines() {
        let field = Field::new();
        assert_eq!(count(&field, PieceType::T, 4), 34);
        assert_eq!(count(&field, PieceType::I, 4), 17);
        assert_eq!(count(&field, PieceType::O, 4), 9);
        assert_eq!(count(&field, PieceType::S, 4), 17);
        assert_eq!(count(&field, PieceType::Z, 4), 17);
        assert_eq!(count(&field, PieceType::L, 4), 34);
        assert_eq!(count(&field, PieceType::J, 4), 34);
    }

    #[test]
    fn test_counts_respect_max_line() {
        let field = Field::new();
        // Two rows: only height-2 shapes fit.
        assert_eq!(count(&field, PieceType::T, 2), 16);
        assert_eq!(count(&field, PieceType::I, 2), 7);
        assert_eq!(count(&field, PieceType::O, 2), 9);
        assert_eq!(count(&field, PieceType::S, 2), 8);
    }

    #[test]
    fn test_harddrop_flags_on_empty_field() {
        let factory = Factory::create();
        let move_gen = MoveGenerator::new(false);
        let mut moves = Vec::new();
        move_gen.search(&factory, &Field::new(), PieceType::L, 4, &mut moves);
        assert!(moves.iter().all(|mv| mv.harddrop));
    }

    #[test]
    fn test_slide_under_lid_is_softdrop() {
        // Lid over columns 0-1; the O must drop beside it and slide in.
        let mut field = Field::new();
        field.set(0, 2);
        field.set(1, 2);

        let factory = Factory::create();
        let move_gen = MoveGenerator::new(false);
        let mut moves = Vec::new();
        move_gen.search(&factory, &field, PieceType::O, 4, &mut moves);

        let under = moves
            .iter()
            .find(|mv| mv.x == 0 && mv.y == 0)
            .expect("landing under the lid");
        assert!(!under.harddrop);
    }

    #[test]
    fn test_rotation_into_tspin_slot() {
        let field = Field::from_text(
            "___X______
             XXX___XXXX
             XXXX_XXXXX",
        );
        let factory = Factory::create();
        let move_gen = MoveGenerator::new(false);
        let mut moves = Vec::new();
        move_gen.search(&factory, &field, PieceType::T, 3, &mut moves);

        let slot = moves
            .iter()
            .find(|mv| mv.rotate == RotateType::Reverse && mv.x == 4 && mv.y == 1)
            .expect("T must rotate into the slot");
        assert!(!slot.harddrop);
    }

    #[test]
    fn test_same_shape_rotations_deduplicated() {
        let factory = Factory::create();
        let move_gen = MoveGenerator::new(false);
        let mut moves = Vec::new();
        move_gen.search(&factory, &Field::new(), PieceType::S, 4, &mut moves);
        for mv in &moves {
            assert!(
                mv.rotate == RotateType::Spawn || mv.rotate == RotateType::Left,
                "S landings must be canonical, got {:?}",
                mv.rotate
            );
        }
    }
}
