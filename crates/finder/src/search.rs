//! The DFS kernel: node dispatch (current / hold / peek-next), scored and
//! generator-order traversal, the solvability filter, and the premove
//! expansion used by the parallel driver.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};

use allclear_core::{Factory, Field, Move, PieceType, ScoredMove, FIELD_WIDTH};
use allclear_engine::{MoveGenerator, RotateEndReachable};

use crate::modes::Mode;
use crate::record::Recorder;
use crate::types::{CandidateState, Configure, Operation, Solution};

/// Shared read-only search services.
#[derive(Clone, Copy)]
pub(crate) struct SearchContext<'a> {
    pub factory: &'a Factory,
    pub move_gen: &'a MoveGenerator,
    pub reachable: &'a RotateEndReachable,
    pub abort: &'a AtomicBool,
}

/// Every wall-bounded column group below `max_line` must hold a multiple of
/// four empty cells, or no tetromino sequence can fill it.
pub(crate) fn validate(field: &Field, max_line: u32) -> bool {
    let mut sum = max_line - field.blocks_on_column(0, max_line);
    for x in 1..FIELD_WIDTH {
        let empty_in_column = max_line - field.blocks_on_column(x, max_line);
        if field.is_wall_between(x, max_line) {
            if sum % 4 != 0 {
                return false;
            }
            sum = empty_in_column;
        } else {
            sum += empty_in_column;
        }
    }
    sum % 4 == 0
}

fn calc_score(field: &Field, harddrop: bool) -> i32 {
    field.num_of_holes() as i32 * 10 + i32::from(!harddrop)
}

fn to_scored_moves(
    factory: &Factory,
    piece: PieceType,
    field: &Field,
    moves: &[Move],
    scored: &mut Vec<ScoredMove>,
) {
    scored.clear();
    for mv in moves {
        let blocks = factory.get_blocks(piece, mv.rotate);
        let mut freeze = *field;
        freeze.put(blocks, mv.x, mv.y);
        let score = calc_score(&freeze, mv.harddrop);
        let num_cleared = freeze.clear_lines();
        scored.push(ScoredMove {
            field: freeze,
            mv: *mv,
            num_cleared,
            score,
        });
    }
    scored.sort_by_key(|entry| entry.score);
}

/// One sequential search invocation: recursion state plus per-depth scratch
/// pools so the hot loop does not allocate.
pub(crate) struct PcFindRunner<'a, M: Mode> {
    ctx: SearchContext<'a>,
    recorder: Recorder<M>,
    move_pool: Vec<Vec<Move>>,
    scored_pool: Vec<Vec<ScoredMove>>,
}

impl<'a, M: Mode> PcFindRunner<'a, M> {
    pub fn new(ctx: SearchContext<'a>, max_depth: usize) -> PcFindRunner<'a, M> {
        PcFindRunner {
            ctx,
            recorder: Recorder::new(),
            move_pool: vec![Vec::new(); max_depth],
            scored_pool: vec![Vec::new(); max_depth],
        }
    }

    pub fn run(
        &mut self,
        cfg: &Configure<'_>,
        field: &Field,
        candidate: M::Candidate,
    ) -> Option<Solution> {
        self.run_record(cfg, field, candidate, None, &[])
            .map(M::into_solution)
    }

    /// Run with an optional seed record (cooperative pruning across workers)
    /// and a prefix of operations already committed by the premove step.
    pub fn run_record(
        &mut self,
        cfg: &Configure<'_>,
        field: &Field,
        candidate: M::Candidate,
        seed: Option<M::Record>,
        prefix: &[Operation],
    ) -> Option<M::Record> {
        self.recorder.clear();
        if let Some(seed) = seed {
            self.recorder.seed(seed);
        }

        let mut solution = vec![Operation::PLACEHOLDER; cfg.max_depth];
        solution[..prefix.len()].copy_from_slice(prefix);

        self.search(cfg, field, &candidate, &mut solution);
        self.recorder.take_best()
    }

    fn search(
        &mut self,
        cfg: &Configure<'_>,
        field: &Field,
        candidate: &M::Candidate,
        solution: &mut [Operation],
    ) {
        if self.ctx.abort.load(Ordering::Relaxed)
            || self
                .recorder
                .is_worse_than_best(cfg.least_line_clears, candidate)
        {
            return;
        }

        let current_index = candidate.current_index();
        let hold_index = candidate.hold_index();
        let hold_count = candidate.hold_count();
        debug_assert!(current_index <= cfg.pieces.len());

        let can_use_current = current_index < cfg.pieces.len();
        if can_use_current {
            let current = cfg.pieces[current_index];
            self.expand(
                cfg, field, candidate, solution,
                current, current_index + 1, hold_index, hold_count,
            );
        }

        if !cfg.hold_allowed {
            return;
        }

        match hold_index {
            Some(hold) => {
                // Swapping identical pieces would duplicate the search tree.
                if !can_use_current || cfg.pieces[current_index] != cfg.pieces[hold] {
                    self.expand(
                        cfg, field, candidate, solution,
                        cfg.pieces[hold], current_index + 1, Some(current_index), hold_count + 1,
                    );
                }
            }
            None => {
                debug_assert!(can_use_current);
                let next_index = current_index + 1;
                if next_index < cfg.pieces.len()
                    && cfg.pieces[current_index] != cfg.pieces[next_index]
                {
                    self.expand(
                        cfg, field, candidate, solution,
                        cfg.pieces[next_index], next_index + 1, Some(current_index), hold_count + 1,
                    );
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn expand(
        &mut self,
        cfg: &Configure<'_>,
        field: &Field,
        candidate: &M::Candidate,
        solution: &mut [Operation],
        piece: PieceType,
        next_index: usize,
        next_hold_index: Option<usize>,
        next_hold_count: i32,
    ) {
        debug_assert!(candidate.left_line() > 0);
        let depth = candidate.depth();
        let last_depth = depth + 1 == cfg.max_depth;

        let mut moves = std::mem::take(&mut self.move_pool[depth]);
        self.ctx.move_gen.search(
            self.ctx.factory,
            field,
            piece,
            candidate.left_line(),
            &mut moves,
        );

        if depth >= cfg.fast_search_start_depth {
            for mv in &moves {
                let blocks = self.ctx.factory.get_blocks(piece, mv.rotate);
                let mut freeze = *field;
                freeze.put(blocks, mv.x, mv.y);
                let num_cleared = freeze.clear_lines();

                let flow = self.visit(
                    cfg, field, &freeze, candidate, solution, piece, mv, num_cleared,
                    last_depth, next_index, next_hold_index, next_hold_count,
                );
                if flow.is_break() {
                    break;
                }
            }
        } else {
            let mut scored = std::mem::take(&mut self.scored_pool[depth]);
            to_scored_moves(self.ctx.factory, piece, field, &moves, &mut scored);
            for entry in &scored {
                let flow = self.visit(
                    cfg, field, &entry.field, candidate, solution, piece, &entry.mv,
                    entry.num_cleared, last_depth, next_index, next_hold_index, next_hold_count,
                );
                if flow.is_break() {
                    break;
                }
            }
            self.scored_pool[depth] = scored;
        }

        self.move_pool[depth] = moves;
    }

    #[allow(clippy::too_many_arguments)]
    fn visit(
        &mut self,
        cfg: &Configure<'_>,
        field_before: &Field,
        freeze: &Field,
        candidate: &M::Candidate,
        solution: &mut [Operation],
        piece: PieceType,
        mv: &Move,
        num_cleared: u32,
        last_depth: bool,
        next_index: usize,
        next_hold_index: Option<usize>,
        next_hold_count: i32,
    ) -> ControlFlow<()> {
        solution[candidate.depth()] = Operation {
            piece,
            rotate: mv.rotate,
            x: mv.x,
            y: mv.y,
        };

        let Some(next) = M::advance(
            &self.ctx, cfg, field_before, candidate, piece, mv, num_cleared,
            last_depth, next_index, next_hold_index, next_hold_count,
        ) else {
            return ControlFlow::Continue(());
        };

        if next.left_line() == 0 {
            if self.recorder.should_update(cfg, &next) {
                self.recorder.update(cfg, &next, solution);
            }
            // No later move at this depth can complete the PC with more
            // cleared lines.
            return ControlFlow::Break(());
        }

        if next.depth() >= cfg.max_depth {
            return ControlFlow::Continue(());
        }
        if !validate(freeze, next.left_line()) {
            return ControlFlow::Continue(());
        }

        self.search(cfg, freeze, &next, solution);
        ControlFlow::Continue(())
    }
}

/// Output of the premove expansion: an independent subproblem root.
pub(crate) struct PreOperation<M: Mode> {
    pub field: Field,
    pub candidate: M::Candidate,
    pub operation: Operation,
    pub score: i32,
}

/// Same accounting as `expand`, but emits subproblems instead of recursing.
#[allow(clippy::too_many_arguments)]
pub(crate) fn premove<M: Mode>(
    ctx: &SearchContext<'_>,
    cfg: &Configure<'_>,
    field: &Field,
    candidate: &M::Candidate,
    piece: PieceType,
    next_index: usize,
    next_hold_index: Option<usize>,
    next_hold_count: i32,
    moves: &mut Vec<Move>,
    output: &mut Vec<PreOperation<M>>,
) {
    debug_assert!(candidate.left_line() > 0);
    let last_depth = candidate.depth() + 1 == cfg.max_depth;

    ctx.move_gen
        .search(ctx.factory, field, piece, candidate.left_line(), moves);

    for mv in moves.iter() {
        let blocks = ctx.factory.get_blocks(piece, mv.rotate);
        let mut freeze = *field;
        freeze.put(blocks, mv.x, mv.y);
        let num_cleared = freeze.clear_lines();

        let Some(next) = M::advance(
            ctx, cfg, field, candidate, piece, mv, num_cleared,
            last_depth, next_index, next_hold_index, next_hold_count,
        ) else {
            continue;
        };

        if !validate(&freeze, next.left_line()) {
            continue;
        }

        output.push(PreOperation {
            field: freeze,
            candidate: next,
            operation: Operation {
                piece,
                rotate: mv.rotate,
                x: mv.x,
                y: mv.y,
            },
            score: calc_score(&freeze, mv.harddrop),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_fillable_regions() {
        assert!(validate(&Field::new(), 4));
        assert!(validate(&Field::new(), 2));
    }

    #[test]
    fn test_validate_rejects_odd_region() {
        // Wall at x=1 up to line 4 with 3 empty cells on the left.
        let field = Field::from_text(
            "_X________
             _X________
             _X________
             XX________",
        );
        assert!(!validate(&field, 4));
    }

    #[test]
    fn test_validate_accepts_mod4_regions() {
        // Wall at x=1; exactly 4 empties on the left side.
        let field = Field::from_text(
            "_X________
             _X________
             _X________
             _X________",
        );
        assert!(validate(&field, 4));
    }

    #[test]
    fn test_validate_checks_every_region() {
        // Three walls; the column-2 group holds 3 empties.
        let field = Field::from_text(
            "_X_X______
             _XXX______
             _X_X______
             _X_X______",
        );
        assert!(!validate(&field, 4));
    }
}
