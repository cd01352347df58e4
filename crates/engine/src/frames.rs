//! Input-frame cost of a placement, independent of search history.

use allclear_core::RotateType;

const PLACEMENT_FRAMES: i32 = 1;
const SPAWN_X: i32 = 4;

fn rotation_taps(rotate: RotateType) -> i32 {
    match rotate {
        RotateType::Spawn => 0,
        RotateType::Right | RotateType::Left => 1,
        RotateType::Reverse => 2,
    }
}

/// Additive per-operation cost: a fixed placement cost plus one frame per
/// horizontal tap and per rotation tap.
pub fn frames(rotate: RotateType, x: i32) -> i32 {
    PLACEMENT_FRAMES + (x - SPAWN_X).abs() + rotation_taps(rotate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_column_is_cheapest() {
        assert_eq!(frames(RotateType::Spawn, SPAWN_X), PLACEMENT_FRAMES);
        assert!(frames(RotateType::Spawn, 0) > frames(RotateType::Spawn, SPAWN_X));
        assert!(frames(RotateType::Reverse, SPAWN_X) > frames(RotateType::Right, SPAWN_X));
    }

    #[test]
    fn test_additive_symmetry() {
        assert_eq!(frames(RotateType::Right, 2), frames(RotateType::Left, 6));
    }
}
