//! Search configuration, operations, and the per-mode candidate structs.

use allclear_core::{PieceType, RotateType};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinderError {
    #[error("illegal search type: value={0}")]
    IllegalSearchType(i32),
    #[error("thread pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Which record lattice drives the search.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SearchKind {
    /// No softdrop is top priority.
    Fast,
    /// T-spin attack is top priority, minis score nothing.
    TSpin,
    /// All-spin attack is top priority, minis scored as regular attack.
    AllSpins,
    /// All-spin attack is top priority, minis score nothing.
    AllSpinsNoMini,
    /// TETR.IO Season 2 composite scoring.
    TetrioS2,
}

impl SearchKind {
    pub fn from_code(code: i32) -> Result<SearchKind, FinderError> {
        match code {
            0 => Ok(SearchKind::Fast),
            1 => Ok(SearchKind::TSpin),
            2 => Ok(SearchKind::AllSpins),
            3 => Ok(SearchKind::AllSpinsNoMini),
            4 => Ok(SearchKind::TetrioS2),
            _ => Err(FinderError::IllegalSearchType(code)),
        }
    }

    pub(crate) fn always_regular_attack(self) -> bool {
        matches!(self, SearchKind::AllSpins | SearchKind::TetrioS2)
    }
}

/// One committed placement.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Serialize, Deserialize)]
pub struct Operation {
    pub piece: PieceType,
    pub rotate: RotateType,
    pub x: i32,
    pub y: i32,
}

impl Operation {
    pub(crate) const PLACEHOLDER: Operation = Operation {
        piece: PieceType::T,
        rotate: RotateType::Spawn,
        x: -1,
        y: -1,
    };
}

pub type Solution = Vec<Operation>;

/// Per-invocation search settings shared by every node.
#[derive(Clone, Copy, Debug)]
pub struct Configure<'a> {
    pub pieces: &'a [PieceType],
    pub max_depth: usize,
    pub fast_search_start_depth: usize,
    pub hold_allowed: bool,
    pub least_line_clears: bool,
    pub always_regular_attack: bool,
    /// Bit per piece (bit 7 = empty hold) marking hold states that enable a
    /// follow-up two-line PC. 0xFF means no preference.
    pub last_hold_priority: u8,
}

/// Accessors the kernel needs from any candidate variant.
pub(crate) trait CandidateState {
    fn depth(&self) -> usize;
    fn left_line(&self) -> u32;
    fn current_index(&self) -> usize;
    fn hold_index(&self) -> Option<usize>;
    fn hold_count(&self) -> i32;
}

macro_rules! impl_candidate_state {
    ($name:ident) => {
        impl CandidateState for $name {
            fn depth(&self) -> usize {
                self.depth
            }
            fn left_line(&self) -> u32 {
                self.left_line
            }
            fn current_index(&self) -> usize {
                self.current_index
            }
            fn hold_index(&self) -> Option<usize> {
                self.hold_index
            }
            fn hold_count(&self) -> i32 {
                self.hold_count
            }
        }
    };
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct FastCandidate {
    pub current_index: usize,
    pub hold_index: Option<usize>,
    pub left_line: u32,
    pub depth: usize,
    pub softdrop_count: i32,
    pub hold_count: i32,
    pub line_clear_count: i32,
    pub current_combo: i32,
    pub max_combo: i32,
    pub frames: i32,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct TSpinCandidate {
    pub current_index: usize,
    pub hold_index: Option<usize>,
    pub left_line: u32,
    pub depth: usize,
    pub softdrop_count: i32,
    pub hold_count: i32,
    pub line_clear_count: i32,
    pub current_combo: i32,
    pub max_combo: i32,
    pub t_spin_attack: i32,
    pub b2b: bool,
    pub left_num_of_t: i32,
    pub frames: i32,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct AllSpinsCandidate {
    pub current_index: usize,
    pub hold_index: Option<usize>,
    pub left_line: u32,
    pub depth: usize,
    pub softdrop_count: i32,
    pub hold_count: i32,
    pub line_clear_count: i32,
    pub current_combo: i32,
    pub max_combo: i32,
    pub spin_attack: i32,
    pub b2b: bool,
    pub frames: i32,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct TetrioS2Candidate {
    pub current_index: usize,
    pub hold_index: Option<usize>,
    pub left_line: u32,
    pub depth: usize,
    pub softdrop_count: i32,
    pub hold_count: i32,
    pub line_clear_count: i32,
    pub current_combo: i32,
    pub max_combo: i32,
    pub spin_attack: i32,
    /// Counts consecutive line-clearing placements, not a boolean carry.
    pub b2b: i32,
    pub is_clean: bool,
    pub is_flat_i: bool,
    pub frames: i32,
}

impl_candidate_state!(FastCandidate);
impl_candidate_state!(TSpinCandidate);
impl_candidate_state!(AllSpinsCandidate);
impl_candidate_state!(TetrioS2Candidate);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_kind_codes() {
        assert_eq!(SearchKind::from_code(0).unwrap(), SearchKind::Fast);
        assert_eq!(SearchKind::from_code(4).unwrap(), SearchKind::TetrioS2);
        assert!(SearchKind::from_code(5).is_err());
        assert!(SearchKind::from_code(-1).is_err());
    }

    #[test]
    fn test_regular_attack_mapping() {
        assert!(SearchKind::AllSpins.always_regular_attack());
        assert!(SearchKind::TetrioS2.always_regular_attack());
        assert!(!SearchKind::AllSpinsNoMini.always_regular_attack());
        assert!(!SearchKind::TSpin.always_regular_attack());
    }
}
