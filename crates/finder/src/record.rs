//! Best-record bookkeeping: record variants, the comparator lattices, and
//! hold-priority dominance.

use allclear_core::PieceType;

use crate::modes::Mode;
use crate::types::{Configure, Operation, Solution};

/// 1 when this hold state is marked preferred in the priority byte
/// (bit 7 = empty hold).
pub(crate) fn hold_priority_bit(priority: u8, hold: Option<PieceType>) -> u8 {
    let slide = hold.map_or(7, |piece| piece as u8);
    (priority >> slide) & 1
}

/// +1 when the new hold wins outright, -1 when it loses outright, 0 when the
/// body ordering must decide.
pub(crate) fn compare_hold_priority(priority: u8, best_bit: u8, new_hold: Option<PieceType>) -> i32 {
    let new_bit = hold_priority_bit(priority, new_hold);
    if new_bit ^ best_bit != 0 {
        if new_bit != 0 {
            1
        } else {
            -1
        }
    } else {
        0
    }
}

pub(crate) fn candidate_hold(cfg: &Configure<'_>, hold_index: Option<usize>) -> Option<PieceType> {
    hold_index.and_then(|index| cfg.pieces.get(index).copied())
}

#[derive(Clone, Debug)]
pub(crate) struct FastRecord {
    pub solution: Solution,
    pub hold: Option<PieceType>,
    pub hold_priority: u8,
    pub softdrop_count: i32,
    pub hold_count: i32,
    pub line_clear_count: i32,
    pub max_combo: i32,
    pub frames: i32,
}

#[derive(Clone, Debug)]
pub(crate) struct TSpinRecord {
    pub solution: Solution,
    pub hold: Option<PieceType>,
    pub hold_priority: u8,
    pub softdrop_count: i32,
    pub hold_count: i32,
    pub line_clear_count: i32,
    pub max_combo: i32,
    pub t_spin_attack: i32,
    pub frames: i32,
}

#[derive(Clone, Debug)]
pub(crate) struct AllSpinsRecord {
    pub solution: Solution,
    pub hold: Option<PieceType>,
    pub hold_priority: u8,
    pub softdrop_count: i32,
    pub hold_count: i32,
    pub line_clear_count: i32,
    pub max_combo: i32,
    pub spin_attack: i32,
    pub frames: i32,
}

#[derive(Clone, Debug)]
pub(crate) struct TetrioS2Record {
    pub solution: Solution,
    pub hold: Option<PieceType>,
    pub hold_priority: u8,
    pub hold_count: i32,
    pub line_clear_count: i32,
    pub max_combo: i32,
    pub spin_attack: i32,
    pub b2b: i32,
    pub is_clean: bool,
    pub is_flat_i: bool,
    pub frames: i32,
}

/// Keys shared by the Fast/TSpin/AllSpins body orderings.
#[derive(Clone, Copy, Debug)]
pub(crate) struct BaseRank {
    pub softdrop_count: i32,
    pub line_clear_count: i32,
    pub max_combo: i32,
    pub hold_count: i32,
    pub frames: i32,
}

/// Final tie-break: total input frames including one per hold, then fewer
/// holds.
fn improves_frames(old: &BaseRank, new: &BaseRank) -> bool {
    let new_total = new.hold_count + new.frames;
    let old_total = old.hold_count + old.frames;
    if new_total == old_total {
        new.hold_count < old.hold_count
    } else {
        new_total < old_total
    }
}

pub(crate) fn improves_base(least_line_clears: bool, old: &BaseRank, new: &BaseRank) -> bool {
    if new.softdrop_count != old.softdrop_count {
        return new.softdrop_count < old.softdrop_count;
    }
    if least_line_clears {
        if new.line_clear_count != old.line_clear_count {
            return new.line_clear_count < old.line_clear_count;
        }
    } else {
        if new.max_combo != old.max_combo {
            return old.max_combo < new.max_combo;
        }
        if new.line_clear_count != old.line_clear_count {
            return old.line_clear_count < new.line_clear_count;
        }
    }
    improves_frames(old, new)
}

/// Attack dominates, then the base ordering decides.
pub(crate) fn improves_with_attack(
    least_line_clears: bool,
    old_attack: i32,
    new_attack: i32,
    old: &BaseRank,
    new: &BaseRank,
) -> bool {
    if new_attack != old_attack {
        return old_attack < new_attack;
    }
    improves_base(least_line_clears, old, new)
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct TetrioRank {
    pub spin_attack: i32,
    pub b2b: i32,
    pub is_clean: bool,
    pub is_flat_i: bool,
    pub max_combo: i32,
    pub line_clear_count: i32,
    pub hold_count: i32,
    pub frames: i32,
}

impl TetrioRank {
    fn base(&self) -> BaseRank {
        BaseRank {
            softdrop_count: 0,
            line_clear_count: self.line_clear_count,
            max_combo: self.max_combo,
            hold_count: self.hold_count,
            frames: self.frames,
        }
    }
}

pub(crate) fn improves_tetrio(old: &TetrioRank, new: &TetrioRank) -> bool {
    // Non-spin endings leave boards that are hard to downstack if garbage
    // was tanked; a flat-I ending still allows 4 B2B per 4-line PC.
    let new_safe = new.is_clean || new.is_flat_i;
    let old_safe = old.is_clean || old.is_flat_i;
    if new_safe != old_safe {
        return new_safe;
    }

    if new.b2b != old.b2b {
        return old.b2b < new.b2b;
    }

    let new_score = new.spin_attack + if new.is_clean { 2 } else { 0 };
    let old_score = old.spin_attack + if old.is_clean { 2 } else { 0 };
    if new_score != old_score {
        return old_score < new_score;
    }

    if new.is_clean != old.is_clean {
        return new.is_clean;
    }
    if new.spin_attack != old.spin_attack {
        return old.spin_attack < new.spin_attack;
    }
    if new.max_combo != old.max_combo {
        return old.max_combo < new.max_combo;
    }
    if new.line_clear_count != old.line_clear_count {
        return old.line_clear_count < new.line_clear_count;
    }
    improves_frames(&old.base(), &new.base())
}

/// Owns the best record for one kernel invocation.
pub(crate) struct Recorder<M: Mode> {
    best: Option<M::Record>,
}

impl<M: Mode> Recorder<M> {
    pub fn new() -> Recorder<M> {
        Recorder { best: None }
    }

    pub fn clear(&mut self) {
        self.best = None;
    }

    pub fn seed(&mut self, record: M::Record) {
        self.best = Some(record);
    }

    pub fn take_best(&mut self) -> Option<M::Record> {
        self.best.take()
    }

    pub fn should_update(&self, cfg: &Configure<'_>, candidate: &M::Candidate) -> bool {
        match &self.best {
            None => true,
            Some(best) => M::improves(cfg, best, candidate),
        }
    }

    pub fn update(&mut self, cfg: &Configure<'_>, candidate: &M::Candidate, solution: &[Operation]) {
        self.best = Some(M::make_record(cfg, candidate, solution));
    }

    pub fn is_worse_than_best(&self, least_line_clears: bool, candidate: &M::Candidate) -> bool {
        self.best
            .as_ref()
            .is_some_and(|best| M::is_worse_than_best(best, least_line_clears, candidate))
    }
}

/// Merge a worker's record into the shared best. Record-vs-record comparison
/// ends with a lexicographic tie-break on the operations so the fan-out
/// result does not depend on completion order.
pub(crate) fn merge_record<M: Mode>(
    cfg: &Configure<'_>,
    slot: &mut Option<M::Record>,
    record: M::Record,
) {
    match slot {
        None => *slot = Some(record),
        Some(best) => {
            if M::improves_record(cfg, best, &record) {
                *slot = Some(record);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hold_priority_bits() {
        // 0bEOZSJLIT
        assert_eq!(hold_priority_bit(0b0000_0001, Some(PieceType::T)), 1);
        assert_eq!(hold_priority_bit(0b0000_0010, Some(PieceType::I)), 1);
        assert_eq!(hold_priority_bit(0b1000_0000, None), 1);
        assert_eq!(hold_priority_bit(0b1000_0000, Some(PieceType::O)), 0);
        assert_eq!(hold_priority_bit(0xFF, Some(PieceType::Z)), 1);
    }

    #[test]
    fn test_priority_dominates() {
        assert_eq!(compare_hold_priority(0b10, 0, Some(PieceType::I)), 1);
        assert_eq!(compare_hold_priority(0b10, 1, Some(PieceType::T)), -1);
        assert_eq!(compare_hold_priority(0b10, 1, Some(PieceType::I)), 0);
        assert_eq!(compare_hold_priority(0xFF, 1, Some(PieceType::L)), 0);
    }

    fn rank(softdrop: i32, clears: i32, combo: i32, holds: i32, frames: i32) -> BaseRank {
        BaseRank {
            softdrop_count: softdrop,
            line_clear_count: clears,
            max_combo: combo,
            hold_count: holds,
            frames,
        }
    }

    #[test]
    fn test_least_line_clears_ordering() {
        let old = rank(1, 2, 0, 0, 10);
        assert!(improves_base(true, &old, &rank(0, 5, 0, 0, 50)));
        assert!(improves_base(true, &old, &rank(1, 1, 0, 0, 50)));
        assert!(!improves_base(true, &old, &rank(1, 3, 0, 0, 1)));
        assert!(improves_base(true, &old, &rank(1, 2, 0, 0, 9)));
    }

    #[test]
    fn test_most_line_clears_ordering() {
        let old = rank(1, 2, 2, 0, 10);
        // max combo outranks line clear count.
        assert!(improves_base(false, &old, &rank(1, 1, 3, 0, 50)));
        assert!(improves_base(false, &old, &rank(1, 3, 2, 0, 50)));
        assert!(!improves_base(false, &old, &rank(1, 1, 2, 0, 1)));
    }

    #[test]
    fn test_frames_tiebreak_counts_holds() {
        let old = rank(0, 1, 0, 2, 10);
        // Equal hold+frames totals prefer fewer holds.
        assert!(improves_base(true, &old, &rank(0, 1, 0, 1, 11)));
        assert!(!improves_base(true, &old, &rank(0, 1, 0, 3, 9)));
        assert!(improves_base(true, &old, &rank(0, 1, 0, 1, 10)));
    }

    #[test]
    fn test_attack_dominates_base() {
        let old = rank(0, 1, 0, 0, 1);
        let new = rank(5, 9, 0, 9, 99);
        assert!(improves_with_attack(true, 2, 3, &old, &new));
        assert!(!improves_with_attack(true, 3, 2, &new, &old));
    }

    fn tetrio(
        attack: i32,
        b2b: i32,
        clean: bool,
        flat: bool,
        combo: i32,
        clears: i32,
    ) -> TetrioRank {
        TetrioRank {
            spin_attack: attack,
            b2b,
            is_clean: clean,
            is_flat_i: flat,
            max_combo: combo,
            line_clear_count: clears,
            hold_count: 0,
            frames: 0,
        }
    }

    #[test]
    fn test_tetrio_safe_ending_first() {
        let unsafe_big = tetrio(10, 4, false, false, 4, 4);
        let flat_i = tetrio(0, 1, false, true, 0, 1);
        assert!(improves_tetrio(&unsafe_big, &flat_i));
        assert!(!improves_tetrio(&flat_i, &unsafe_big));
    }

    #[test]
    fn test_tetrio_clean_beats_flat_i_via_score() {
        let flat_i = tetrio(1, 2, false, true, 1, 2);
        let clean = tetrio(1, 2, true, false, 1, 2);
        assert!(improves_tetrio(&flat_i, &clean));
        assert!(!improves_tetrio(&clean, &flat_i));
    }

    #[test]
    fn test_tetrio_b2b_over_attack() {
        let low_b2b = tetrio(8, 1, true, false, 0, 2);
        let high_b2b = tetrio(3, 3, true, false, 0, 2);
        assert!(improves_tetrio(&low_b2b, &high_b2b));
    }

    proptest! {
        #[test]
        fn prop_base_ordering_is_asymmetric(
            a in (0..4i32, 0..6i32, 0..6i32, 0..3i32, 0..60i32),
            b in (0..4i32, 0..6i32, 0..6i32, 0..3i32, 0..60i32),
            least in proptest::bool::ANY,
        ) {
            let ra = rank(a.0, a.1, a.2, a.3, a.4);
            let rb = rank(b.0, b.1, b.2, b.3, b.4);
            // A strict ordering can never hold both ways.
            prop_assert!(!(improves_base(least, &ra, &rb) && improves_base(least, &rb, &ra)));
        }

        #[test]
        fn prop_tetrio_ordering_is_asymmetric(
            a in (0..8i32, 0..5i32, proptest::bool::ANY, proptest::bool::ANY, 0..5i32, 0..6i32),
            b in (0..8i32, 0..5i32, proptest::bool::ANY, proptest::bool::ANY, 0..5i32, 0..6i32),
        ) {
            let ra = tetrio(a.0, a.1, a.2, a.3, a.4, a.5);
            let rb = tetrio(b.0, b.1, b.2, b.3, b.4, b.5);
            prop_assert!(!(improves_tetrio(&ra, &rb) && improves_tetrio(&rb, &ra)));
        }
    }
}
