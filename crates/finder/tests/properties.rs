//! Property-based invariants over the core primitives.

use allclear_core::{Factory, Field, PieceType, RotateType, FIELD_WIDTH, MAX_FIELD_HEIGHT};
use proptest::prelude::*;

fn arb_field() -> impl Strategy<Value = Field> {
    // Random garbage in the bottom six rows.
    proptest::collection::vec(0u16..1024, 6).prop_map(|rows| {
        let mut field = Field::new();
        for (y, row) in rows.iter().enumerate() {
            for x in 0..FIELD_WIDTH {
                if (row >> x) & 1 == 1 {
                    field.set(x, y);
                }
            }
        }
        field
    })
}

fn arb_piece() -> impl Strategy<Value = (PieceType, RotateType)> {
    (0usize..7, 0usize..4)
        .prop_map(|(p, r)| (PieceType::ALL[p], RotateType::ALL[r]))
}

proptest! {
    /// The collider test must agree with dropping the mask row by row: a
    /// straight drop reaches (x, y) exactly when no higher position along
    /// the drop path collides.
    #[test]
    fn prop_harddrop_collider_matches_stepwise_drop(
        field in arb_field(),
        piece_rotate in arb_piece(),
        x in -2i32..12,
        y in -2i32..12,
    ) {
        let factory = Factory::create();
        let (piece, rotate) = piece_rotate;
        let blocks = factory.get_blocks(piece, rotate);

        let in_bounds = x + blocks.min_x >= 0
            && y + blocks.min_y >= 0
            && (x + blocks.min_x) as usize + blocks.width <= FIELD_WIDTH
            && (y + blocks.min_y) as usize + blocks.height <= MAX_FIELD_HEIGHT;

        let stepwise = in_bounds
            && ((y + blocks.min_y)..=(MAX_FIELD_HEIGHT - blocks.height) as i32)
                .all(|lower_y| field.can_put(blocks, x, lower_y - blocks.min_y));

        prop_assert_eq!(field.can_reach_on_harddrop(blocks, x, y), stepwise);
    }

    /// Clearing lines never invents blocks and removes exactly ten per line.
    #[test]
    fn prop_clear_lines_preserves_blocks(field in arb_field()) {
        let before = field.num_of_blocks();
        let mut cleared_field = field;
        let cleared = cleared_field.clear_lines();
        prop_assert_eq!(
            cleared_field.num_of_blocks(),
            before - cleared * FIELD_WIDTH as u32
        );
    }

    /// Hole counting is stable under clearing full rows from the top.
    #[test]
    fn prop_no_holes_after_clear_of_flat_field(row in 0u16..1024) {
        let mut field = Field::new();
        for x in 0..FIELD_WIDTH {
            if (row >> x) & 1 == 1 {
                field.set(x, 0);
            }
        }
        // A single partial bottom row never forms a hole.
        prop_assert_eq!(field.num_of_holes(), 0);
    }
}
