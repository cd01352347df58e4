//! allclear-finder - depth-first perfect-clear search.
//!
//! The sequential driver ([`PerfectClearFinder`]) and the pool-backed
//! variant ([`ConcurrentPcFinder`]) share one kernel, generic over the four
//! search modes (fast, T-spin, all-spin, TETR.IO Season 2).

mod driver;
mod modes;
mod parallel;
mod record;
mod search;
mod two_lines;
mod types;

pub use driver::{solve_with, HoldState, PerfectClearFinder, SearchParams, SolveRequest};
pub use parallel::ConcurrentPcFinder;
pub use types::{FinderError, Operation, SearchKind, Solution};
