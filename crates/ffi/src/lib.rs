//! allclear-ffi - C string entry points around the finder.
//!
//! One finder instance per process, selected by game profile at init: PPT
//! (SRS, no 180) or TETR.IO (SRS+, 180 allowed). Every failure path writes
//! `-1` into the caller's buffer.

use std::ffi::{c_char, c_int, c_uint, CStr};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use allclear_core::Factory;
use allclear_finder::{ConcurrentPcFinder, SearchKind, SolveRequest};
use tracing::warn;

pub mod parse;

use parse::{format_solution, parse_field, parse_hold, parse_queue};

const GAME_PPT: c_int = 1;
const GAME_TETRIO: c_int = 2;

fn state() -> &'static Mutex<Option<Arc<ConcurrentPcFinder>>> {
    static STATE: OnceLock<Mutex<Option<Arc<ConcurrentPcFinder>>>> = OnceLock::new();
    STATE.get_or_init(|| Mutex::new(None))
}

/// Grab the finder without keeping the registry locked, so `abort_search`
/// stays responsive while a search runs.
fn current_finder() -> Option<Arc<ConcurrentPcFinder>> {
    state()
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Initialise the process-wide finder for one game profile. Returns true
/// when a finder is ready (repeat calls keep the first profile).
#[no_mangle]
pub extern "C" fn init_finder(game: c_int) -> bool {
    let _ = tracing_subscriber::fmt().with_target(false).try_init();

    let mut slot = state().lock().unwrap_or_else(PoisonError::into_inner);
    if slot.is_some() {
        return true;
    }

    let (factory, allow_180) = match game {
        GAME_PPT => (Factory::create(), false),
        GAME_TETRIO => (Factory::create_srs_plus(), true),
        _ => return false,
    };

    match ConcurrentPcFinder::new(Arc::new(factory), allow_180, 1) {
        Ok(finder) => {
            *slot = Some(Arc::new(finder));
            true
        }
        Err(error) => {
            warn!(%error, "finder init failed");
            false
        }
    }
}

/// Drain current work and resize the worker pool.
#[no_mangle]
pub extern "C" fn set_threads(threads: c_uint) {
    if let Some(finder) = current_finder() {
        if let Err(error) = finder.change_thread_count(threads as usize) {
            warn!(%error, "thread pool resize failed");
        }
    }
}

/// Cooperatively cancel the running search.
#[no_mangle]
pub extern "C" fn abort_search() {
    if let Some(finder) = current_finder() {
        finder.abort();
    }
}

fn run_action(
    field_text: &str,
    queue_text: &str,
    hold_text: &str,
    height: c_int,
    max_height: c_int,
    swap: bool,
    search_type: c_int,
    combo: c_int,
    b2b: bool,
    two_line: bool,
) -> Option<String> {
    let field = parse_field(field_text).ok()?;
    let queue = parse_queue(queue_text).ok()?;
    let hold = parse_hold(hold_text).ok()?;
    let kind = SearchKind::from_code(search_type).ok()?;

    let request = SolveRequest {
        field,
        queue: &queue,
        hold,
        height: height.clamp(0, 20) as u32,
        max_height: max_height.clamp(0, 20) as u32,
        swap,
        kind,
        init_combo: combo,
        init_b2b: b2b,
        two_line_follow_up: two_line,
    };

    let finder = current_finder()?;
    finder.reset_abort();
    Some(format_solution(finder.solve(&request).as_deref()))
}

/// Search a PC for the given position and write the solution string (or
/// `-1`) into `out`, truncated to `out_len` bytes including the NUL.
///
/// # Safety
///
/// `field`, `queue`, and `hold` must be valid NUL-terminated strings and
/// `out` must point to at least `out_len` writable bytes.
#[no_mangle]
#[allow(clippy::too_many_arguments)]
pub unsafe extern "C" fn action(
    field: *const c_char,
    queue: *const c_char,
    hold: *const c_char,
    height: c_int,
    max_height: c_int,
    swap: bool,
    search_type: c_int,
    combo: c_int,
    b2b: bool,
    two_line: bool,
    out: *mut c_char,
    out_len: c_int,
) {
    let result = (|| {
        let field_text = CStr::from_ptr(field).to_str().ok()?;
        let queue_text = CStr::from_ptr(queue).to_str().ok()?;
        let hold_text = CStr::from_ptr(hold).to_str().ok()?;
        run_action(
            field_text,
            queue_text,
            hold_text,
            height,
            max_height,
            swap,
            search_type,
            combo,
            b2b,
            two_line,
        )
    })()
    .unwrap_or_else(|| "-1".to_string());

    write_out(&result, out, out_len);
}

unsafe fn write_out(text: &str, out: *mut c_char, out_len: c_int) {
    if out.is_null() || out_len <= 0 {
        return;
    }
    let capacity = out_len as usize - 1;
    let bytes = text.as_bytes();
    let len = bytes.len().min(capacity);
    std::ptr::copy_nonoverlapping(bytes.as_ptr(), out.cast::<u8>(), len);
    *out.add(len) = 0;
}
