//! Sequential driver: depth/space accounting, last-hold priority, mode
//! dispatch, and the outer height loop.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use allclear_core::{Factory, Field, PieceType, FIELD_WIDTH};
use allclear_engine::{MoveGenerator, RotateEndReachable};
use tracing::debug;

use crate::modes::{AllSpinsMode, FastMode, TSpinMode, TetrioS2Mode};
use crate::search::{PcFindRunner, SearchContext};
use crate::two_lines::can_take_two_line_pc;
use crate::types::{Configure, SearchKind, Solution};

/// Everything the driver derives once per invocation.
pub(crate) struct Prepared {
    pub max_depth: usize,
    pub fast_search_start_depth: usize,
    pub last_hold_priority: u8,
}

/// Per-invocation knobs, constant across the height loop body.
#[derive(Clone, Copy, Debug)]
pub struct SearchParams {
    pub max_line: u32,
    pub hold_empty: bool,
    pub hold_allowed: bool,
    pub least_line_clears: bool,
    pub kind: SearchKind,
    pub init_combo: i32,
    pub init_b2b: bool,
    pub two_line_follow_up: bool,
    pub num_apply_fast_search: usize,
}

pub(crate) fn prepare_search(
    ctx: &SearchContext<'_>,
    field: &Field,
    pieces: &[PieceType],
    params: &SearchParams,
) -> Option<Prepared> {
    let num_of_space =
        FIELD_WIDTH as i64 * params.max_line as i64 - field.num_of_blocks() as i64;
    if num_of_space <= 0 || num_of_space % 4 != 0 {
        return None;
    }
    let max_depth = (num_of_space / 4) as usize;

    Some(Prepared {
        max_depth,
        fast_search_start_depth: max_depth.saturating_sub(params.num_apply_fast_search),
        last_hold_priority: last_hold_priority(ctx, pieces, max_depth, params),
    })
}

/// Bit per hold state that still admits a follow-up two-line PC; 0xFF when
/// nothing is known (no preference).
pub(crate) fn last_hold_priority(
    ctx: &SearchContext<'_>,
    pieces: &[PieceType],
    max_depth: usize,
    params: &SearchParams,
) -> u8 {
    let mut priority = 0u8;
    if params.two_line_follow_up && max_depth + 5 <= pieces.len() {
        let mut next_pieces = pieces[max_depth..].to_vec();
        if params.hold_empty && can_take_two_line_pc(ctx, &next_pieces) {
            priority |= 0b1000_0000;
        }
        for piece in PieceType::ALL {
            next_pieces[0] = piece;
            if can_take_two_line_pc(ctx, &next_pieces) {
                priority |= 1 << piece as u8;
            }
        }
    }
    if priority == 0 {
        0xFF
    } else {
        priority
    }
}

pub(crate) fn make_configure<'a>(
    pieces: &'a [PieceType],
    params: &SearchParams,
    prepared: &Prepared,
) -> Configure<'a> {
    Configure {
        pieces,
        max_depth: prepared.max_depth,
        fast_search_start_depth: prepared.fast_search_start_depth,
        hold_allowed: params.hold_allowed,
        least_line_clears: params.least_line_clears,
        always_regular_attack: params.kind.always_regular_attack(),
        last_hold_priority: prepared.last_hold_priority,
    }
}

/// Single-threaded perfect-clear finder.
pub struct PerfectClearFinder {
    factory: Arc<Factory>,
    move_gen: MoveGenerator,
    reachable: RotateEndReachable,
    abort: Arc<AtomicBool>,
}

impl PerfectClearFinder {
    pub fn new(factory: Arc<Factory>, allow_180: bool) -> PerfectClearFinder {
        PerfectClearFinder {
            factory,
            move_gen: MoveGenerator::new(allow_180),
            reachable: RotateEndReachable::new(allow_180),
            abort: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn abort(&self) {
        self.abort.store(true, Ordering::SeqCst);
    }

    pub fn reset_abort(&self) {
        self.abort.store(false, Ordering::SeqCst);
    }

    pub(crate) fn context(&self) -> SearchContext<'_> {
        SearchContext {
            factory: &self.factory,
            move_gen: &self.move_gen,
            reachable: &self.reachable,
            abort: &self.abort,
        }
    }

    /// Search one target height. `None` when no PC exists (or the search was
    /// aborted).
    pub fn run(
        &self,
        field: &Field,
        pieces: &[PieceType],
        params: &SearchParams,
    ) -> Option<Solution> {
        let ctx = self.context();
        let prepared = prepare_search(&ctx, field, pieces, params)?;
        let cfg = make_configure(pieces, params, &prepared);
        debug!(
            max_line = params.max_line,
            max_depth = prepared.max_depth,
            kind = ?params.kind,
            priority = prepared.last_hold_priority,
            "sequential pc search"
        );

        let solution = match params.kind {
            SearchKind::Fast => {
                let candidate =
                    FastMode::initial(params.hold_empty, params.max_line, params.init_combo);
                PcFindRunner::<FastMode>::new(ctx, prepared.max_depth).run(&cfg, field, candidate)
            }
            SearchKind::TSpin => {
                let left_num_of_t =
                    pieces.iter().filter(|&&p| p == PieceType::T).count() as i32;
                let candidate = TSpinMode::initial(
                    params.hold_empty,
                    params.max_line,
                    params.init_combo,
                    params.init_b2b,
                    left_num_of_t,
                );
                PcFindRunner::<TSpinMode>::new(ctx, prepared.max_depth).run(&cfg, field, candidate)
            }
            SearchKind::AllSpins | SearchKind::AllSpinsNoMini => {
                let candidate = AllSpinsMode::initial(
                    params.hold_empty,
                    params.max_line,
                    params.init_combo,
                    params.init_b2b,
                );
                PcFindRunner::<AllSpinsMode>::new(ctx, prepared.max_depth)
                    .run(&cfg, field, candidate)
            }
            SearchKind::TetrioS2 => {
                let candidate = TetrioS2Mode::initial(
                    params.hold_empty,
                    params.max_line,
                    params.init_combo,
                    params.init_b2b,
                );
                PcFindRunner::<TetrioS2Mode>::new(ctx, prepared.max_depth)
                    .run(&cfg, field, candidate)
            }
        };

        // An aborted search discards any partial best.
        if self.abort.load(Ordering::SeqCst) {
            return None;
        }
        solution
    }

    pub fn solve(&self, request: &SolveRequest<'_>) -> Option<Solution> {
        solve_with(request, |field, pieces, params| {
            self.run(field, pieces, params)
        })
    }
}

/// Hold slot state at the boundary.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HoldState {
    Empty,
    Disabled,
    Piece(PieceType),
}

/// Input to the outer height loop.
#[derive(Clone, Copy, Debug)]
pub struct SolveRequest<'a> {
    pub field: Field,
    pub queue: &'a [PieceType],
    pub hold: HoldState,
    pub height: u32,
    pub max_height: u32,
    /// Inverse of least-line-clears.
    pub swap: bool,
    pub kind: SearchKind,
    pub init_combo: i32,
    pub init_b2b: bool,
    pub two_line_follow_up: bool,
}

pub(crate) const NUM_APPLY_FAST_SEARCH: usize = 6;

/// Step target heights by two (parity-corrected against the minos already
/// placed) and accept the first height that yields a solution.
pub fn solve_with<F>(request: &SolveRequest<'_>, mut run: F) -> Option<Solution>
where
    F: FnMut(&Field, &[PieceType], &SearchParams) -> Option<Solution>,
{
    let minos_placed = request.field.num_of_blocks();
    // An odd block count can never leave full rows behind.
    if minos_placed % 2 != 0 {
        return None;
    }

    let max_height = request.max_height.min(20);

    let mut pieces = Vec::with_capacity(request.queue.len() + 1);
    let (hold_empty, hold_allowed) = match request.hold {
        HoldState::Empty => (true, true),
        HoldState::Disabled => (true, false),
        HoldState::Piece(piece) => {
            pieces.push(piece);
            (false, true)
        }
    };

    let max_pieces =
        ((max_height as i64 * FIELD_WIDTH as i64 - minos_placed as i64) / 4 + 1).max(0) as usize;
    pieces.extend(request.queue.iter().copied().take(max_pieces));

    let mut height = request.height;
    if minos_placed % 4 == 2 {
        // An odd number of lines must clear.
        if height % 2 == 0 {
            height += 1;
        }
    } else if height % 2 == 1 {
        height += 1;
    }
    if height == 0 {
        height = 2;
    }

    while height <= max_height {
        let space = height as i64 * FIELD_WIDTH as i64 - minos_placed as i64;
        if space > 0 {
            let required = (space / 4 + 1) as usize;
            if required > pieces.len() {
                return None;
            }
            let params = SearchParams {
                max_line: height,
                hold_empty,
                hold_allowed,
                least_line_clears: !request.swap,
                kind: request.kind,
                init_combo: request.init_combo,
                init_b2b: request.init_b2b,
                two_line_follow_up: request.two_line_follow_up,
                num_apply_fast_search: NUM_APPLY_FAST_SEARCH,
            };
            if let Some(solution) = run(&request.field, &pieces, &params) {
                return Some(solution);
            }
        }
        height += 2;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_rejects_non_quadruple_space() {
        let finder = PerfectClearFinder::new(Arc::new(Factory::create()), false);
        let ctx = finder.context();

        let mut field = Field::new();
        field.set(0, 0);
        field.set(1, 0);
        let params = SearchParams {
            max_line: 2,
            hold_empty: true,
            hold_allowed: true,
            least_line_clears: true,
            kind: SearchKind::Fast,
            init_combo: 0,
            init_b2b: false,
            two_line_follow_up: false,
            num_apply_fast_search: NUM_APPLY_FAST_SEARCH,
        };
        // 18 empty cells.
        assert!(prepare_search(&ctx, &field, &[], &params).is_none());

        field.set(2, 0);
        field.set(3, 0);
        // 16 empty cells: four pieces.
        let prepared = prepare_search(&ctx, &field, &[], &params)
            .expect("space divisible by four");
        assert_eq!(prepared.max_depth, 4);
        assert_eq!(prepared.last_hold_priority, 0xFF);
    }

    #[test]
    fn test_last_hold_priority_mask() {
        use PieceType::*;

        let finder = PerfectClearFinder::new(Arc::new(Factory::create()), false);
        let ctx = finder.context();
        let params = SearchParams {
            max_line: 2,
            hold_empty: true,
            hold_allowed: true,
            least_line_clears: true,
            kind: SearchKind::Fast,
            init_combo: 0,
            init_b2b: false,
            two_line_follow_up: true,
            num_apply_fast_search: NUM_APPLY_FAST_SEARCH,
        };

        // Tail after depth 5 is [T, O, O, O, I]: substituting hold = I (or O)
        // decides the follow-up.
        let pieces = [O, O, O, I, I, T, O, O, O, I];
        let priority = last_hold_priority(&ctx, &pieces, 5, &params);
        assert_eq!(priority & (1 << I as u8), 1 << I as u8);
        assert_eq!(priority & (1 << O as u8), 0);
        assert_eq!(priority & (1 << T as u8), 0);
        // Empty-hold bit follows the unmodified tail, which starts with T.
        assert_eq!(priority & 0b1000_0000, 0);
    }

    #[test]
    fn test_last_hold_priority_defaults_to_all() {
        use PieceType::*;
        let finder = PerfectClearFinder::new(Arc::new(Factory::create()), false);
        let ctx = finder.context();
        let params = SearchParams {
            max_line: 2,
            hold_empty: true,
            hold_allowed: true,
            least_line_clears: true,
            kind: SearchKind::Fast,
            init_combo: 0,
            init_b2b: false,
            two_line_follow_up: true,
            num_apply_fast_search: NUM_APPLY_FAST_SEARCH,
        };
        // Queue too short for a follow-up: no preference.
        let priority = last_hold_priority(&ctx, &[O, O, O, I, I], 5, &params);
        assert_eq!(priority, 0xFF);
    }

    #[test]
    fn test_height_parity_correction() {
        use PieceType::*;

        // Two minos placed: only odd heights can reach a PC.
        let mut field = Field::new();
        field.set(0, 0);
        field.set(1, 0);

        let heights = std::cell::RefCell::new(Vec::new());
        let request = SolveRequest {
            field,
            queue: &[O; 14],
            hold: HoldState::Empty,
            height: 0,
            max_height: 6,
            swap: false,
            kind: SearchKind::Fast,
            init_combo: 0,
            init_b2b: false,
            two_line_follow_up: false,
        };
        let result = solve_with(&request, |_, _, params| {
            heights.borrow_mut().push(params.max_line);
            None
        });
        assert!(result.is_none());
        assert_eq!(*heights.borrow(), vec![1, 3, 5]);
    }
}
