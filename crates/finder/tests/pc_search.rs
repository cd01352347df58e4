//! End-to-end searches over the public driver API.

use std::sync::Arc;

use allclear_core::{Factory, Field, PieceType};
use allclear_finder::{
    ConcurrentPcFinder, HoldState, Operation, PerfectClearFinder, SearchKind, SolveRequest,
};

use PieceType::*;

fn finder() -> PerfectClearFinder {
    PerfectClearFinder::new(Arc::new(Factory::create()), false)
}

fn request<'a>(
    field: Field,
    queue: &'a [PieceType],
    height: u32,
    max_height: u32,
    kind: SearchKind,
) -> SolveRequest<'a> {
    SolveRequest {
        field,
        queue,
        hold: HoldState::Empty,
        height,
        max_height,
        swap: false,
        kind,
        init_combo: 0,
        init_b2b: false,
        two_line_follow_up: false,
    }
}

/// Replay a solution and require the bottom `max_line` rows to end empty.
fn assert_replays_to_pc(field: &Field, solution: &[Operation], max_line: u32) {
    let factory = Factory::create();
    let mut replay = *field;
    let mut cleared = 0;
    for operation in solution {
        let blocks = factory.get_blocks(operation.piece, operation.rotate);
        assert!(
            replay.can_put(blocks, operation.x, operation.y),
            "operation {:?} does not fit",
            operation
        );
        replay.put(blocks, operation.x, operation.y);
        cleared += replay.clear_lines();
    }
    assert_eq!(cleared, max_line, "must clear every target line");
    assert_eq!(replay.num_of_blocks(), 0, "field must end empty");
}

/// Each placed piece must be drawn from the queue: the solution can use at
/// most as many of each piece type as the queue provides.
fn assert_pieces_from_queue(solution: &[Operation], queue: &[PieceType]) {
    for piece in PieceType::ALL {
        let used = solution.iter().filter(|op| op.piece == piece).count();
        let available = queue.iter().filter(|&&q| q == piece).count();
        assert!(
            used <= available,
            "solution uses {} {:?} but queue holds {}",
            used,
            piece,
            available
        );
    }
}

#[test]
fn two_line_pc_opener() {
    let queue = [O, O, O, I, I, T];
    let solution = finder()
        .solve(&request(Field::new(), &queue, 2, 2, SearchKind::Fast))
        .expect("OOOII tiles two lines");
    assert_eq!(solution.len(), 5);
    assert_replays_to_pc(&Field::new(), &solution, 2);
    assert_pieces_from_queue(&solution, &queue);
}

#[test]
fn vertical_i_column_pc() {
    // Rows 0-3 filled except columns 7-9: three upright I pieces finish it.
    let field = Field::from_text(
        "XXXXXXX___
         XXXXXXX___
         XXXXXXX___
         XXXXXXX___",
    );
    let queue = [I, I, I, I];
    let solution = finder()
        .solve(&request(field, &queue, 4, 4, SearchKind::Fast))
        .expect("three vertical I pieces complete the PC");
    assert_eq!(solution.len(), 3);
    assert_replays_to_pc(&field, &solution, 4);
    assert!(solution.iter().all(|op| op.piece == I));
}

#[test]
fn no_solution_on_odd_mino_count() {
    let mut field = Field::new();
    field.set(0, 0);
    let solution = finder().solve(&request(field, &[T, T, T, T], 2, 4, SearchKind::Fast));
    assert!(solution.is_none());
}

#[test]
fn no_solution_on_empty_queue() {
    let solution = finder().solve(&request(Field::new(), &[], 2, 4, SearchKind::Fast));
    assert!(solution.is_none());
}

#[test]
fn tspin_mode_prefers_the_tspin_double() {
    // A TSD slot plus a flat I notch: eight empty cells, two pieces.
    let field = Field::from_text(
        "XXXX____XX
         XXX___XXXX
         XXXX_XXXXX",
    );
    let queue = [T, I, L];
    let solution = finder()
        .solve(&request(field, &queue, 3, 3, SearchKind::TSpin))
        .expect("TSD into flat I completes the PC");
    assert_eq!(solution.len(), 2);
    assert_replays_to_pc(&field, &solution, 3);

    // The T-spin must come first; held to the end it would score nothing.
    assert_eq!(solution[0].piece, T);
    assert_eq!(solution[0].x, 4);
    assert_eq!(solution[0].y, 1);
}

#[test]
fn fast_mode_solves_the_same_slot() {
    let field = Field::from_text(
        "XXXX____XX
         XXX___XXXX
         XXXX_XXXXX",
    );
    let queue = [T, I, L];
    let solution = finder()
        .solve(&request(field, &queue, 3, 3, SearchKind::Fast))
        .expect("fast mode still finds a PC");
    assert_replays_to_pc(&field, &solution, 3);
}

#[test]
fn hold_disabled_still_solves_in_order() {
    let queue = [O, O, O, I, I, T];
    let mut req = request(Field::new(), &queue, 2, 2, SearchKind::Fast);
    req.hold = HoldState::Disabled;
    let solution = finder().solve(&req).expect("no hold needed for OOOII");
    assert_eq!(solution.len(), 5);
    assert_replays_to_pc(&Field::new(), &solution, 2);
}

#[test]
fn tetrio_s2_rejects_skim_only_lines() {
    // OOOII can only finish with plain clears; Season 2 refuses them all
    // (non-spin skims and the lone double are both banned).
    let queue = [O, O, O, I, I, T];
    let solution = finder().solve(&request(Field::new(), &queue, 2, 2, SearchKind::TetrioS2));
    assert!(solution.is_none());
}

#[test]
fn abort_returns_empty() {
    let f = finder();
    f.abort();
    let queue = [O, O, O, I, I, T];
    assert!(f
        .solve(&request(Field::new(), &queue, 2, 2, SearchKind::Fast))
        .is_none());

    f.reset_abort();
    assert!(f
        .solve(&request(Field::new(), &queue, 2, 2, SearchKind::Fast))
        .is_some());
}

#[test]
fn sequential_runs_are_idempotent() {
    let queue = [O, O, O, I, I, T, L, J];
    let f = finder();
    let first = f.solve(&request(Field::new(), &queue, 2, 4, SearchKind::Fast));
    for _ in 0..10 {
        let again = f.solve(&request(Field::new(), &queue, 2, 4, SearchKind::Fast));
        assert_eq!(first, again);
    }
}

#[test]
fn parallel_runs_are_deterministic() {
    let factory = Arc::new(Factory::create());
    let concurrent =
        ConcurrentPcFinder::new(Arc::clone(&factory), false, 4).expect("pool builds");

    let queue = [O, O, O, I, I, T, L, J];
    let req = request(Field::new(), &queue, 2, 2, SearchKind::Fast);

    let first = concurrent.solve(&req).expect("parallel search finds the PC");
    assert_replays_to_pc(&Field::new(), &first, 2);
    for _ in 0..10 {
        assert_eq!(concurrent.solve(&req), Some(first.clone()));
    }
}

#[test]
fn parallel_resize_and_solve() {
    let concurrent = ConcurrentPcFinder::new(Arc::new(Factory::create()), false, 1)
        .expect("pool builds");
    concurrent.change_thread_count(3).expect("resize");

    let queue = [O, O, O, I, I, T];
    let solution = concurrent
        .solve(&request(Field::new(), &queue, 2, 2, SearchKind::Fast))
        .expect("solves after resize");
    assert_replays_to_pc(&Field::new(), &solution, 2);
}

#[test]
fn parallel_abort_returns_empty() {
    let concurrent = ConcurrentPcFinder::new(Arc::new(Factory::create()), false, 2)
        .expect("pool builds");
    concurrent.abort();
    let queue = [O, O, O, I, I, T];
    assert!(concurrent
        .solve(&request(Field::new(), &queue, 2, 2, SearchKind::Fast))
        .is_none());
}
