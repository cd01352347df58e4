//! The four search modes. Each mode owns its candidate accounting
//! (`advance`), its record construction, and its comparator wiring; the
//! kernel in `search.rs` is generic over them.

use allclear_core::{Field, Move, PieceType};
use allclear_engine::{allspin_attack, frames, tspin_attack};

use crate::record::{
    candidate_hold, compare_hold_priority, hold_priority_bit, improves_base, improves_tetrio,
    improves_with_attack, AllSpinsRecord, BaseRank, FastRecord, TSpinRecord, TetrioRank,
    TetrioS2Record,
};
use crate::search::SearchContext;
use crate::types::{
    AllSpinsCandidate, CandidateState, Configure, FastCandidate, Operation, Solution,
    TSpinCandidate, TetrioS2Candidate,
};

pub(crate) trait Mode: Sized {
    type Candidate: Copy + CandidateState + Send + Sync;
    type Record: Clone + Send;

    /// Account one placement. `None` rejects the branch outright.
    #[allow(clippy::too_many_arguments)]
    fn advance(
        ctx: &SearchContext<'_>,
        cfg: &Configure<'_>,
        field_before: &Field,
        candidate: &Self::Candidate,
        piece: PieceType,
        mv: &Move,
        num_cleared: u32,
        last_depth: bool,
        next_index: usize,
        next_hold_index: Option<usize>,
        next_hold_count: i32,
    ) -> Option<Self::Candidate>;

    fn make_record(
        cfg: &Configure<'_>,
        candidate: &Self::Candidate,
        solution: &[Operation],
    ) -> Self::Record;

    fn solution(record: &Self::Record) -> &[Operation];
    fn into_solution(record: Self::Record) -> Solution;
    fn hold_priority(record: &Self::Record) -> u8;

    /// Does the terminal candidate beat the current best record?
    fn improves(cfg: &Configure<'_>, best: &Self::Record, candidate: &Self::Candidate) -> bool;

    /// Record-vs-record comparison for the fan-out merge. Total: full ties
    /// fall back to the lexicographically smaller solution.
    fn improves_record(cfg: &Configure<'_>, best: &Self::Record, record: &Self::Record) -> bool;

    /// Mid-branch pruning against the best record.
    fn is_worse_than_best(
        best: &Self::Record,
        least_line_clears: bool,
        candidate: &Self::Candidate,
    ) -> bool;
}

/// Counter updates shared by every mode.
struct Step {
    softdrop_count: i32,
    line_clear_count: i32,
    current_combo: i32,
    max_combo: i32,
    frames: i32,
}

#[allow(clippy::too_many_arguments)]
fn step(
    mv: &Move,
    num_cleared: u32,
    softdrop_count: i32,
    line_clear_count: i32,
    current_combo: i32,
    max_combo: i32,
    total_frames: i32,
) -> Step {
    let softdrop_count = if mv.harddrop {
        softdrop_count
    } else {
        softdrop_count + 1
    };
    let line_clear_count = if num_cleared > 0 {
        line_clear_count + 1
    } else {
        line_clear_count
    };
    let current_combo = if num_cleared > 0 { current_combo + 1 } else { 0 };
    Step {
        softdrop_count,
        line_clear_count,
        current_combo,
        max_combo: max_combo.max(current_combo),
        frames: total_frames + frames(mv.rotate, mv.x),
    }
}

fn start_indices(hold_empty: bool) -> (usize, Option<usize>) {
    if hold_empty {
        (0, None)
    } else {
        (1, Some(0))
    }
}

pub(crate) struct FastMode;

impl FastMode {
    pub(crate) fn initial(hold_empty: bool, max_line: u32, init_combo: i32) -> FastCandidate {
        let (current_index, hold_index) = start_indices(hold_empty);
        FastCandidate {
            current_index,
            hold_index,
            left_line: max_line,
            depth: 0,
            softdrop_count: 0,
            hold_count: 0,
            line_clear_count: 0,
            current_combo: init_combo,
            max_combo: init_combo,
            frames: 0,
        }
    }
}

impl FastRecord {
    fn rank(&self) -> BaseRank {
        BaseRank {
            softdrop_count: self.softdrop_count,
            line_clear_count: self.line_clear_count,
            max_combo: self.max_combo,
            hold_count: self.hold_count,
            frames: self.frames,
        }
    }
}

impl FastCandidate {
    fn rank(&self) -> BaseRank {
        BaseRank {
            softdrop_count: self.softdrop_count,
            line_clear_count: self.line_clear_count,
            max_combo: self.max_combo,
            hold_count: self.hold_count,
            frames: self.frames,
        }
    }
}

impl Mode for FastMode {
    type Candidate = FastCandidate;
    type Record = FastRecord;

    fn advance(
        _ctx: &SearchContext<'_>,
        _cfg: &Configure<'_>,
        _field_before: &Field,
        candidate: &FastCandidate,
        _piece: PieceType,
        mv: &Move,
        num_cleared: u32,
        _last_depth: bool,
        next_index: usize,
        next_hold_index: Option<usize>,
        next_hold_count: i32,
    ) -> Option<FastCandidate> {
        let s = step(
            mv,
            num_cleared,
            candidate.softdrop_count,
            candidate.line_clear_count,
            candidate.current_combo,
            candidate.max_combo,
            candidate.frames,
        );
        Some(FastCandidate {
            current_index: next_index,
            hold_index: next_hold_index,
            left_line: candidate.left_line - num_cleared,
            depth: candidate.depth + 1,
            softdrop_count: s.softdrop_count,
            hold_count: next_hold_count,
            line_clear_count: s.line_clear_count,
            current_combo: s.current_combo,
            max_combo: s.max_combo,
            frames: s.frames,
        })
    }

    fn make_record(
        cfg: &Configure<'_>,
        candidate: &FastCandidate,
        solution: &[Operation],
    ) -> FastRecord {
        let hold = candidate_hold(cfg, candidate.hold_index);
        FastRecord {
            solution: solution.to_vec(),
            hold,
            hold_priority: hold_priority_bit(cfg.last_hold_priority, hold),
            softdrop_count: candidate.softdrop_count,
            hold_count: candidate.hold_count,
            line_clear_count: candidate.line_clear_count,
            max_combo: candidate.max_combo,
            frames: candidate.frames,
        }
    }

    fn solution(record: &FastRecord) -> &[Operation] {
        &record.solution
    }

    fn into_solution(record: FastRecord) -> Solution {
        record.solution
    }

    fn hold_priority(record: &FastRecord) -> u8 {
        record.hold_priority
    }

    fn improves(cfg: &Configure<'_>, best: &FastRecord, candidate: &FastCandidate) -> bool {
        let new_hold = candidate_hold(cfg, candidate.hold_index);
        match compare_hold_priority(cfg.last_hold_priority, best.hold_priority, new_hold) {
            1 => true,
            -1 => false,
            _ => improves_base(cfg.least_line_clears, &best.rank(), &candidate.rank()),
        }
    }

    fn improves_record(cfg: &Configure<'_>, best: &FastRecord, record: &FastRecord) -> bool {
        match compare_hold_priority(cfg.last_hold_priority, best.hold_priority, record.hold) {
            1 => return true,
            -1 => return false,
            _ => {}
        }
        if improves_base(cfg.least_line_clears, &best.rank(), &record.rank()) {
            return true;
        }
        if improves_base(cfg.least_line_clears, &record.rank(), &best.rank()) {
            return false;
        }
        record.solution < best.solution
    }

    fn is_worse_than_best(
        best: &FastRecord,
        _least_line_clears: bool,
        candidate: &FastCandidate,
    ) -> bool {
        if best.hold_priority == 0 {
            return false;
        }
        best.softdrop_count < candidate.softdrop_count
    }
}

pub(crate) struct TSpinMode;

impl TSpinMode {
    pub(crate) fn initial(
        hold_empty: bool,
        max_line: u32,
        init_combo: i32,
        init_b2b: bool,
        left_num_of_t: i32,
    ) -> TSpinCandidate {
        let (current_index, hold_index) = start_indices(hold_empty);
        TSpinCandidate {
            current_index,
            hold_index,
            left_line: max_line,
            depth: 0,
            softdrop_count: 0,
            hold_count: 0,
            line_clear_count: 0,
            current_combo: init_combo,
            max_combo: init_combo,
            t_spin_attack: 0,
            b2b: init_b2b,
            left_num_of_t,
            frames: 0,
        }
    }
}

impl TSpinRecord {
    fn rank(&self) -> BaseRank {
        BaseRank {
            softdrop_count: self.softdrop_count,
            line_clear_count: self.line_clear_count,
            max_combo: self.max_combo,
            hold_count: self.hold_count,
            frames: self.frames,
        }
    }
}

impl TSpinCandidate {
    fn rank(&self) -> BaseRank {
        BaseRank {
            softdrop_count: self.softdrop_count,
            line_clear_count: self.line_clear_count,
            max_combo: self.max_combo,
            hold_count: self.hold_count,
            frames: self.frames,
        }
    }
}

impl Mode for TSpinMode {
    type Candidate = TSpinCandidate;
    type Record = TSpinRecord;

    fn advance(
        ctx: &SearchContext<'_>,
        _cfg: &Configure<'_>,
        field_before: &Field,
        candidate: &TSpinCandidate,
        piece: PieceType,
        mv: &Move,
        num_cleared: u32,
        last_depth: bool,
        next_index: usize,
        next_hold_index: Option<usize>,
        next_hold_count: i32,
    ) -> Option<TSpinCandidate> {
        let left_num_of_t = if piece == PieceType::T {
            candidate.left_num_of_t - 1
        } else {
            candidate.left_num_of_t
        };

        // The final placement's attack is never sent before the PC resolves.
        let attack = if last_depth {
            0
        } else {
            tspin_attack(
                ctx.factory,
                ctx.reachable,
                field_before,
                piece,
                mv,
                num_cleared,
                candidate.b2b,
            )
        };

        let s = step(
            mv,
            num_cleared,
            candidate.softdrop_count,
            candidate.line_clear_count,
            candidate.current_combo,
            candidate.max_combo,
            candidate.frames,
        );
        let b2b = if num_cleared > 0 {
            attack != 0 || num_cleared == 4
        } else {
            candidate.b2b
        };

        Some(TSpinCandidate {
            current_index: next_index,
            hold_index: next_hold_index,
            left_line: candidate.left_line - num_cleared,
            depth: candidate.depth + 1,
            softdrop_count: s.softdrop_count,
            hold_count: next_hold_count,
            line_clear_count: s.line_clear_count,
            current_combo: s.current_combo,
            max_combo: s.max_combo,
            t_spin_attack: candidate.t_spin_attack + attack,
            b2b,
            left_num_of_t,
            frames: s.frames,
        })
    }

    fn make_record(
        cfg: &Configure<'_>,
        candidate: &TSpinCandidate,
        solution: &[Operation],
    ) -> TSpinRecord {
        let hold = candidate_hold(cfg, candidate.hold_index);
        TSpinRecord {
            solution: solution.to_vec(),
            hold,
            hold_priority: hold_priority_bit(cfg.last_hold_priority, hold),
            softdrop_count: candidate.softdrop_count,
            hold_count: candidate.hold_count,
            line_clear_count: candidate.line_clear_count,
            max_combo: candidate.max_combo,
            t_spin_attack: candidate.t_spin_attack,
            frames: candidate.frames,
        }
    }

    fn solution(record: &TSpinRecord) -> &[Operation] {
        &record.solution
    }

    fn into_solution(record: TSpinRecord) -> Solution {
        record.solution
    }

    fn hold_priority(record: &TSpinRecord) -> u8 {
        record.hold_priority
    }

    fn improves(cfg: &Configure<'_>, best: &TSpinRecord, candidate: &TSpinCandidate) -> bool {
        let new_hold = candidate_hold(cfg, candidate.hold_index);
        match compare_hold_priority(cfg.last_hold_priority, best.hold_priority, new_hold) {
            1 => true,
            -1 => false,
            _ => improves_with_attack(
                cfg.least_line_clears,
                best.t_spin_attack,
                candidate.t_spin_attack,
                &best.rank(),
                &candidate.rank(),
            ),
        }
    }

    fn improves_record(cfg: &Configure<'_>, best: &TSpinRecord, record: &TSpinRecord) -> bool {
        match compare_hold_priority(cfg.last_hold_priority, best.hold_priority, record.hold) {
            1 => return true,
            -1 => return false,
            _ => {}
        }
        if improves_with_attack(
            cfg.least_line_clears,
            best.t_spin_attack,
            record.t_spin_attack,
            &best.rank(),
            &record.rank(),
        ) {
            return true;
        }
        if improves_with_attack(
            cfg.least_line_clears,
            record.t_spin_attack,
            best.t_spin_attack,
            &record.rank(),
            &best.rank(),
        ) {
            return false;
        }
        record.solution < best.solution
    }

    fn is_worse_than_best(
        best: &TSpinRecord,
        _least_line_clears: bool,
        candidate: &TSpinCandidate,
    ) -> bool {
        if best.hold_priority == 0 {
            return false;
        }
        // With no T left the branch's attack is settled.
        if candidate.left_num_of_t == 0 {
            if candidate.t_spin_attack != best.t_spin_attack {
                return candidate.t_spin_attack < best.t_spin_attack;
            }
            return best.softdrop_count < candidate.softdrop_count;
        }
        false
    }
}

pub(crate) struct AllSpinsMode;

impl AllSpinsMode {
    pub(crate) fn initial(
        hold_empty: bool,
        max_line: u32,
        init_combo: i32,
        init_b2b: bool,
    ) -> AllSpinsCandidate {
        let (current_index, hold_index) = start_indices(hold_empty);
        AllSpinsCandidate {
            current_index,
            hold_index,
            left_line: max_line,
            depth: 0,
            softdrop_count: 0,
            hold_count: 0,
            line_clear_count: 0,
            current_combo: init_combo,
            max_combo: init_combo,
            spin_attack: 0,
            b2b: init_b2b,
            frames: 0,
        }
    }
}

impl AllSpinsRecord {
    fn rank(&self) -> BaseRank {
        BaseRank {
            softdrop_count: self.softdrop_count,
            line_clear_count: self.line_clear_count,
            max_combo: self.max_combo,
            hold_count: self.hold_count,
            frames: self.frames,
        }
    }
}

impl AllSpinsCandidate {
    fn rank(&self) -> BaseRank {
        BaseRank {
            softdrop_count: self.softdrop_count,
            line_clear_count: self.line_clear_count,
            max_combo: self.max_combo,
            hold_count: self.hold_count,
            frames: self.frames,
        }
    }
}

impl Mode for AllSpinsMode {
    type Candidate = AllSpinsCandidate;
    type Record = AllSpinsRecord;

    fn advance(
        ctx: &SearchContext<'_>,
        cfg: &Configure<'_>,
        field_before: &Field,
        candidate: &AllSpinsCandidate,
        piece: PieceType,
        mv: &Move,
        num_cleared: u32,
        last_depth: bool,
        next_index: usize,
        next_hold_index: Option<usize>,
        next_hold_count: i32,
    ) -> Option<AllSpinsCandidate> {
        let mut attack = allspin_attack(
            ctx.factory,
            ctx.reachable,
            field_before,
            piece,
            mv,
            num_cleared,
            candidate.b2b,
            cfg.always_regular_attack,
        );

        // A spin on the final piece only sends the PC's fixed damage, but the
        // B2B carry is still worth one line.
        if attack > 0 && last_depth {
            attack = 1;
        }

        let s = step(
            mv,
            num_cleared,
            candidate.softdrop_count,
            candidate.line_clear_count,
            candidate.current_combo,
            candidate.max_combo,
            candidate.frames,
        );
        let b2b = if num_cleared > 0 {
            attack != 0 || num_cleared == 4
        } else {
            candidate.b2b
        };

        Some(AllSpinsCandidate {
            current_index: next_index,
            hold_index: next_hold_index,
            left_line: candidate.left_line - num_cleared,
            depth: candidate.depth + 1,
            softdrop_count: s.softdrop_count,
            hold_count: next_hold_count,
            line_clear_count: s.line_clear_count,
            current_combo: s.current_combo,
            max_combo: s.max_combo,
            spin_attack: candidate.spin_attack + attack,
            b2b,
            frames: s.frames,
        })
    }

    fn make_record(
        cfg: &Configure<'_>,
        candidate: &AllSpinsCandidate,
        solution: &[Operation],
    ) -> AllSpinsRecord {
        let hold = candidate_hold(cfg, candidate.hold_index);
        AllSpinsRecord {
            solution: solution.to_vec(),
            hold,
            hold_priority: hold_priority_bit(cfg.last_hold_priority, hold),
            softdrop_count: candidate.softdrop_count,
            hold_count: candidate.hold_count,
            line_clear_count: candidate.line_clear_count,
            max_combo: candidate.max_combo,
            spin_attack: candidate.spin_attack,
            frames: candidate.frames,
        }
    }

    fn solution(record: &AllSpinsRecord) -> &[Operation] {
        &record.solution
    }

    fn into_solution(record: AllSpinsRecord) -> Solution {
        record.solution
    }

    fn hold_priority(record: &AllSpinsRecord) -> u8 {
        record.hold_priority
    }

    fn improves(cfg: &Configure<'_>, best: &AllSpinsRecord, candidate: &AllSpinsCandidate) -> bool {
        let new_hold = candidate_hold(cfg, candidate.hold_index);
        match compare_hold_priority(cfg.last_hold_priority, best.hold_priority, new_hold) {
            1 => true,
            -1 => false,
            _ => improves_with_attack(
                cfg.least_line_clears,
                best.spin_attack,
                candidate.spin_attack,
                &best.rank(),
                &candidate.rank(),
            ),
        }
    }

    fn improves_record(cfg: &Configure<'_>, best: &AllSpinsRecord, record: &AllSpinsRecord) -> bool {
        match compare_hold_priority(cfg.last_hold_priority, best.hold_priority, record.hold) {
            1 => return true,
            -1 => return false,
            _ => {}
        }
        if improves_with_attack(
            cfg.least_line_clears,
            best.spin_attack,
            record.spin_attack,
            &best.rank(),
            &record.rank(),
        ) {
            return true;
        }
        if improves_with_attack(
            cfg.least_line_clears,
            record.spin_attack,
            best.spin_attack,
            &record.rank(),
            &best.rank(),
        ) {
            return false;
        }
        record.solution < best.solution
    }

    fn is_worse_than_best(
        _best: &AllSpinsRecord,
        _least_line_clears: bool,
        _candidate: &AllSpinsCandidate,
    ) -> bool {
        // Spin attack can still accumulate on the last pieces.
        false
    }
}

pub(crate) struct TetrioS2Mode;

/// Attack re-quantisation for non-T spins, indexed by lines cleared.
const S2_ATTACK_VALUES: [i32; 5] = [0, 0, 1, 2, 4];

impl TetrioS2Mode {
    pub(crate) fn initial(
        hold_empty: bool,
        max_line: u32,
        init_combo: i32,
        init_b2b: bool,
    ) -> TetrioS2Candidate {
        let (current_index, hold_index) = start_indices(hold_empty);
        TetrioS2Candidate {
            current_index,
            hold_index,
            left_line: max_line,
            depth: 0,
            softdrop_count: 0,
            hold_count: 0,
            line_clear_count: 0,
            current_combo: init_combo,
            max_combo: init_combo,
            spin_attack: 0,
            b2b: i32::from(init_b2b),
            is_clean: false,
            is_flat_i: false,
            frames: 0,
        }
    }
}

impl TetrioS2Record {
    fn rank(&self) -> TetrioRank {
        TetrioRank {
            spin_attack: self.spin_attack,
            b2b: self.b2b,
            is_clean: self.is_clean,
            is_flat_i: self.is_flat_i,
            max_combo: self.max_combo,
            line_clear_count: self.line_clear_count,
            hold_count: self.hold_count,
            frames: self.frames,
        }
    }
}

impl TetrioS2Candidate {
    fn rank(&self) -> TetrioRank {
        TetrioRank {
            spin_attack: self.spin_attack,
            b2b: self.b2b,
            is_clean: self.is_clean,
            is_flat_i: self.is_flat_i,
            max_combo: self.max_combo,
            line_clear_count: self.line_clear_count,
            hold_count: self.hold_count,
            frames: self.frames,
        }
    }
}

impl Mode for TetrioS2Mode {
    type Candidate = TetrioS2Candidate;
    type Record = TetrioS2Record;

    fn advance(
        ctx: &SearchContext<'_>,
        cfg: &Configure<'_>,
        field_before: &Field,
        candidate: &TetrioS2Candidate,
        piece: PieceType,
        mv: &Move,
        num_cleared: u32,
        _last_depth: bool,
        next_index: usize,
        next_hold_index: Option<usize>,
        next_hold_count: i32,
    ) -> Option<TetrioS2Candidate> {
        let had_b2b = candidate.b2b > 0;

        // Full T-spins keep their own values; everything under the mini
        // threshold is reclassified through the all-spin rules.
        let mut spin_attack = tspin_attack(
            ctx.factory,
            ctx.reachable,
            field_before,
            piece,
            mv,
            num_cleared,
            had_b2b,
        );
        let is_tspin = spin_attack >= 2;
        if !is_tspin {
            spin_attack = allspin_attack(
                ctx.factory,
                ctx.reachable,
                field_before,
                piece,
                mv,
                num_cleared,
                had_b2b,
                cfg.always_regular_attack,
            );
        }

        // A 4-line clear charges B2B like a spin.
        if num_cleared == 4 {
            spin_attack = 4 + i32::from(had_b2b);
        }

        // The PC-completing clear counts as a spin: B2B charges and the
        // damage sent is the same either way.
        let is_spin = num_cleared == candidate.left_line || spin_attack > 0;

        // Non-spin skims ruin the attack chain.
        if num_cleared > 0 && !is_spin {
            return None;
        }

        // A two-line PC must be spin-single then single, never one double.
        if candidate.left_line == 2 && num_cleared == 2 && candidate.line_clear_count == 0 {
            return None;
        }

        let is_clean = num_cleared == candidate.left_line && spin_attack > 0;
        let is_flat_i = num_cleared == candidate.left_line && num_cleared == 1;

        if is_spin && !is_tspin {
            spin_attack = S2_ATTACK_VALUES[num_cleared as usize] + i32::from(had_b2b);
        }

        let s = step(
            mv,
            num_cleared,
            candidate.softdrop_count,
            candidate.line_clear_count,
            candidate.current_combo,
            candidate.max_combo,
            candidate.frames,
        );
        let b2b = if num_cleared > 0 {
            candidate.b2b + 1
        } else {
            candidate.b2b
        };

        Some(TetrioS2Candidate {
            current_index: next_index,
            hold_index: next_hold_index,
            left_line: candidate.left_line - num_cleared,
            depth: candidate.depth + 1,
            softdrop_count: s.softdrop_count,
            hold_count: next_hold_count,
            line_clear_count: s.line_clear_count,
            current_combo: s.current_combo,
            max_combo: s.max_combo,
            spin_attack: candidate.spin_attack + spin_attack,
            b2b,
            is_clean,
            is_flat_i,
            frames: s.frames,
        })
    }

    fn make_record(
        cfg: &Configure<'_>,
        candidate: &TetrioS2Candidate,
        solution: &[Operation],
    ) -> TetrioS2Record {
        let hold = candidate_hold(cfg, candidate.hold_index);
        TetrioS2Record {
            solution: solution.to_vec(),
            hold,
            hold_priority: hold_priority_bit(cfg.last_hold_priority, hold),
            hold_count: candidate.hold_count,
            line_clear_count: candidate.line_clear_count,
            max_combo: candidate.max_combo,
            spin_attack: candidate.spin_attack,
            b2b: candidate.b2b,
            is_clean: candidate.is_clean,
            is_flat_i: candidate.is_flat_i,
            frames: candidate.frames,
        }
    }

    fn solution(record: &TetrioS2Record) -> &[Operation] {
        &record.solution
    }

    fn into_solution(record: TetrioS2Record) -> Solution {
        record.solution
    }

    fn hold_priority(record: &TetrioS2Record) -> u8 {
        record.hold_priority
    }

    fn improves(cfg: &Configure<'_>, best: &TetrioS2Record, candidate: &TetrioS2Candidate) -> bool {
        let new_hold = candidate_hold(cfg, candidate.hold_index);
        match compare_hold_priority(cfg.last_hold_priority, best.hold_priority, new_hold) {
            1 => true,
            -1 => false,
            // Always the most-line-clears lattice.
            _ => improves_tetrio(&best.rank(), &candidate.rank()),
        }
    }

    fn improves_record(cfg: &Configure<'_>, best: &TetrioS2Record, record: &TetrioS2Record) -> bool {
        match compare_hold_priority(cfg.last_hold_priority, best.hold_priority, record.hold) {
            1 => return true,
            -1 => return false,
            _ => {}
        }
        if improves_tetrio(&best.rank(), &record.rank()) {
            return true;
        }
        if improves_tetrio(&record.rank(), &best.rank()) {
            return false;
        }
        record.solution < best.solution
    }

    fn is_worse_than_best(
        _best: &TetrioS2Record,
        _least_line_clears: bool,
        _candidate: &TetrioS2Candidate,
    ) -> bool {
        false
    }
}
