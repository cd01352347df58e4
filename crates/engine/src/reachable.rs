//! Rotate-end reachability: could a placement have been entered by a kicked
//! rotation? The spin classifiers use this to tell spins from ordinary
//! softdrops.

use allclear_core::{Factory, Field, PieceType, RotateType};

/// How a rotation can end on the queried cells.
#[derive(Clone, Copy, Debug, Default)]
pub struct RotateEnd {
    /// Some source uses the fifth SRS kick, which upgrades a T-mini to a
    /// full T-spin.
    pub fifth_kick: bool,
}

#[derive(Clone, Copy, Debug)]
pub struct RotateEndReachable {
    allow_180: bool,
}

impl RotateEndReachable {
    pub fn new(allow_180: bool) -> RotateEndReachable {
        RotateEndReachable { allow_180 }
    }

    /// Is there a non-colliding source state whose first successful kick
    /// lands exactly on (rotate, x, y)?
    pub fn checks(
        &self,
        factory: &Factory,
        field: &Field,
        piece_type: PieceType,
        rotate: RotateType,
        x: i32,
        y: i32,
    ) -> Option<RotateEnd> {
        let piece = factory.get(piece_type);
        let mut end: Option<RotateEnd> = None;

        // from.cw() == rotate
        let cw_from = rotate.ccw();
        self.scan_source(factory, field, piece_type, rotate, x, y, cw_from, piece.cw_kicks(cw_from), &mut end);

        let ccw_from = rotate.cw();
        self.scan_source(factory, field, piece_type, rotate, x, y, ccw_from, piece.ccw_kicks(ccw_from), &mut end);

        if self.allow_180 {
            let flip_from = rotate.flip();
            self.scan_source(factory, field, piece_type, rotate, x, y, flip_from, piece.kicks_180(flip_from), &mut end);
        }

        end
    }

    #[allow(clippy::too_many_arguments)]
    fn scan_source(
        &self,
        factory: &Factory,
        field: &Field,
        piece_type: PieceType,
        rotate: RotateType,
        x: i32,
        y: i32,
        from: RotateType,
        kicks: &[allclear_core::Offset],
        end: &mut Option<RotateEnd>,
    ) {
        let from_blocks = factory.get_blocks(piece_type, from);
        let to_blocks = factory.get_blocks(piece_type, rotate);

        for (index, kick) in kicks.iter().enumerate() {
            let source_x = x - kick.x;
            let source_y = y - kick.y;
            if !field.can_put(from_blocks, source_x, source_y) {
                continue;
            }

            // This kick is only taken when every earlier one fails.
            let earlier_succeeds = kicks[..index].iter().any(|earlier| {
                field.can_put(to_blocks, source_x + earlier.x, source_y + earlier.y)
            });
            if earlier_succeeds {
                continue;
            }

            let reached = end.get_or_insert_with(RotateEnd::default);
            if index == 4 {
                reached.fifth_kick = true;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use allclear_core::Field;

    #[test]
    fn test_open_air_rotation_reachable() {
        let factory = Factory::create();
        let reachable = RotateEndReachable::new(false);
        let field = Field::new();
        // Nothing stops a rotation in open air.
        assert!(reachable
            .checks(&factory, &field, PieceType::T, RotateType::Reverse, 4, 1)
            .is_some());
    }

    #[test]
    fn test_walled_in_slot_reachable_by_rotation() {
        let field = Field::from_text(
            "___X______
             XXX___XXXX
             XXXX_XXXXX",
        );
        let factory = Factory::create();
        let reachable = RotateEndReachable::new(false);
        assert!(reachable
            .checks(&factory, &field, PieceType::T, RotateType::Reverse, 4, 1)
            .is_some());
    }

    #[test]
    fn test_fully_buried_cell_not_reachable() {
        // A cavity with no room for any source state.
        let field = Field::from_text(
            "XXXXXXXXXX
             XXXXXXXXXX
             XXX___XXXX
             XXXX_XXXXX",
        );
        let factory = Factory::create();
        let reachable = RotateEndReachable::new(false);
        assert!(reachable
            .checks(&factory, &field, PieceType::T, RotateType::Reverse, 4, 1)
            .is_none());
    }
}
