//! Parallel fan-out: expand the root into independent subproblems with
//! `premove`, dispatch them onto a worker pool, and merge worker records
//! under a shared lock.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use allclear_core::{Factory, Field, Move, PieceType};
use allclear_engine::{MoveGenerator, RotateEndReachable};
use tracing::debug;

use crate::driver::{make_configure, prepare_search, solve_with, SearchParams, SolveRequest};
use crate::modes::{AllSpinsMode, FastMode, Mode, TSpinMode, TetrioS2Mode};
use crate::record::merge_record;
use crate::search::{premove, PcFindRunner, SearchContext};
use crate::types::{CandidateState, Configure, Operation, SearchKind, Solution};

/// An independent root subproblem: the field and candidate after the
/// premoved operations.
struct SubProblem<M: Mode> {
    field: Field,
    candidate: M::Candidate,
    prefix: Vec<Operation>,
    score: i32,
}

/// Perfect-clear finder backed by a fixed-size worker pool.
pub struct ConcurrentPcFinder {
    factory: Arc<Factory>,
    move_gen: MoveGenerator,
    reachable: RotateEndReachable,
    pool: Mutex<rayon::ThreadPool>,
    threads: AtomicUsize,
    abort: Arc<AtomicBool>,
}

impl ConcurrentPcFinder {
    pub fn new(
        factory: Arc<Factory>,
        allow_180: bool,
        threads: usize,
    ) -> Result<ConcurrentPcFinder, crate::types::FinderError> {
        let threads = threads.max(1);
        let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
        Ok(ConcurrentPcFinder {
            factory,
            move_gen: MoveGenerator::new(allow_180),
            reachable: RotateEndReachable::new(allow_180),
            pool: Mutex::new(pool),
            threads: AtomicUsize::new(threads),
            abort: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Replace the pool. Waits for any running search to drain (the pool
    /// lock is held for a search's whole lifetime).
    pub fn change_thread_count(&self, threads: usize) -> Result<(), crate::types::FinderError> {
        let threads = threads.max(1);
        let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
        *self.pool.lock().unwrap_or_else(PoisonError::into_inner) = pool;
        self.threads.store(threads, Ordering::SeqCst);
        Ok(())
    }

    pub fn abort(&self) {
        self.abort.store(true, Ordering::SeqCst);
    }

    pub fn reset_abort(&self) {
        self.abort.store(false, Ordering::SeqCst);
    }

    fn context(&self) -> SearchContext<'_> {
        SearchContext {
            factory: &self.factory,
            move_gen: &self.move_gen,
            reachable: &self.reachable,
            abort: &self.abort,
        }
    }

    /// Search one target height across the worker pool.
    pub fn run(
        &self,
        field: &Field,
        pieces: &[PieceType],
        params: &SearchParams,
    ) -> Option<Solution> {
        let ctx = self.context();
        let prepared = prepare_search(&ctx, field, pieces, params)?;
        let cfg = make_configure(pieces, params, &prepared);

        match params.kind {
            SearchKind::Fast => {
                let candidate =
                    FastMode::initial(params.hold_empty, params.max_line, params.init_combo);
                self.run_concurrent::<FastMode>(&cfg, field, candidate)
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
                self.run_concurrent::<TSpinMode>(&cfg, field, candidate)
            }
            SearchKind::AllSpins | SearchKind::AllSpinsNoMini => {
                let candidate = AllSpinsMode::initial(
                    params.hold_empty,
                    params.max_line,
                    params.init_combo,
                    params.init_b2b,
                );
                self.run_concurrent::<AllSpinsMode>(&cfg, field, candidate)
            }
            SearchKind::TetrioS2 => {
                let candidate = TetrioS2Mode::initial(
                    params.hold_empty,
                    params.max_line,
                    params.init_combo,
                    params.init_b2b,
                );
                self.run_concurrent::<TetrioS2Mode>(&cfg, field, candidate)
            }
        }
    }

    pub fn solve(&self, request: &SolveRequest<'_>) -> Option<Solution> {
        solve_with(request, |field, pieces, params| {
            self.run(field, pieces, params)
        })
    }

    fn run_concurrent<M: Mode>(
        &self,
        cfg: &Configure<'_>,
        field: &Field,
        initial: M::Candidate,
    ) -> Option<Solution> {
        let ctx = self.context();
        let threads = self.threads.load(Ordering::SeqCst);

        let mut subproblems = expand_roots::<M>(&ctx, cfg, field, &initial, &[]);

        // A second premove level when the root fans out too narrowly to
        // keep the pool busy.
        if cfg.max_depth > 2 && subproblems.len() < threads * 2 {
            let mut expanded = Vec::new();
            for sub in subproblems {
                if sub.candidate.left_line() == 0 || sub.candidate.depth() >= cfg.max_depth {
                    expanded.push(sub);
                    continue;
                }
                expanded.extend(expand_roots::<M>(
                    &ctx,
                    cfg,
                    &sub.field,
                    &sub.candidate,
                    &sub.prefix,
                ));
            }
            subproblems = expanded;
        }

        // Most promising subproblems first.
        subproblems.sort_by_key(|sub| sub.score);

        let global: Mutex<Option<M::Record>> = Mutex::new(None);

        // Subproblems that already completed the PC during premove.
        subproblems.retain(|sub| {
            if sub.candidate.left_line() == 0 {
                let record = M::make_record(cfg, &sub.candidate, &sub.prefix);
                let mut slot = global.lock().unwrap_or_else(PoisonError::into_inner);
                merge_record::<M>(cfg, &mut slot, record);
                false
            } else {
                sub.candidate.depth() < cfg.max_depth
            }
        });

        debug!(
            subproblems = subproblems.len(),
            threads,
            max_depth = cfg.max_depth,
            "parallel pc dispatch"
        );

        let pool = self.pool.lock().unwrap_or_else(PoisonError::into_inner);
        pool.scope(|scope| {
            for sub in &subproblems {
                let global = &global;
                scope.spawn(move |_| {
                    if ctx.abort.load(Ordering::Relaxed) {
                        return;
                    }
                    let seed = {
                        let slot = global.lock().unwrap_or_else(PoisonError::into_inner);
                        slot.clone()
                    };
                    let mut runner = PcFindRunner::<M>::new(ctx, cfg.max_depth);
                    if let Some(record) =
                        runner.run_record(cfg, &sub.field, sub.candidate, seed, &sub.prefix)
                    {
                        let mut slot = global.lock().unwrap_or_else(PoisonError::into_inner);
                        merge_record::<M>(cfg, &mut slot, record);
                    }
                });
            }
        });
        drop(pool);

        if self.abort.load(Ordering::SeqCst) {
            return None;
        }
        global
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
            .map(M::into_solution)
    }
}

/// Mirror of the kernel's node dispatch, emitting subproblems.
fn expand_roots<M: Mode>(
    ctx: &SearchContext<'_>,
    cfg: &Configure<'_>,
    field: &Field,
    candidate: &M::Candidate,
    prefix: &[Operation],
) -> Vec<SubProblem<M>> {
    let mut pres = Vec::new();
    let mut moves: Vec<Move> = Vec::new();

    let current_index = candidate.current_index();
    let hold_index = candidate.hold_index();
    let hold_count = candidate.hold_count();
    let can_use_current = current_index < cfg.pieces.len();

    if can_use_current {
        premove::<M>(
            ctx, cfg, field, candidate,
            cfg.pieces[current_index], current_index + 1, hold_index, hold_count,
            &mut moves, &mut pres,
        );
    }

    if cfg.hold_allowed {
        match hold_index {
            Some(hold) => {
                if !can_use_current || cfg.pieces[current_index] != cfg.pieces[hold] {
                    premove::<M>(
                        ctx, cfg, field, candidate,
                        cfg.pieces[hold], current_index + 1, Some(current_index), hold_count + 1,
                        &mut moves, &mut pres,
                    );
                }
            }
            None if can_use_current => {
                let next_index = current_index + 1;
                if next_index < cfg.pieces.len()
                    && cfg.pieces[current_index] != cfg.pieces[next_index]
                {
                    premove::<M>(
                        ctx, cfg, field, candidate,
                        cfg.pieces[next_index], next_index + 1, Some(current_index), hold_count + 1,
                        &mut moves, &mut pres,
                    );
                }
            }
            None => {}
        }
    }

    pres.into_iter()
        .map(|pre| {
            let mut chain = Vec::with_capacity(prefix.len() + 1);
            chain.extend_from_slice(prefix);
            chain.push(pre.operation);
            SubProblem {
                field: pre.field,
                candidate: pre.candidate,
                prefix: chain,
                score: pre.score,
            }
        })
        .collect()
}
