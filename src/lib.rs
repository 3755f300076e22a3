//! This crate fills crossword grids.
//! Each slot of the grid is a variable whose candidates are the words
//! of a vocabulary; crossing slots must agree on their shared letter
//! and no word may be used twice.

pub mod arc;
pub mod domain;
pub mod search;

mod config;
mod crossword;
mod error;
mod topology;
mod word;

pub use config::SolverConfig;
pub use crossword::Crossword;
pub use domain::Domains;
pub use error::Error;
pub use search::{Assignment, Entry};
pub use topology::{Direction, Overlap, Slot, Topology};
pub use word::{Vocabulary, Word};

/// A handle to one slot of a [`Topology`].
///
/// Tokens are handed out in insertion order, which also serves as the
/// final tie break when the search has to choose between slots.
#[derive(Copy, Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SlotToken(usize);

impl SlotToken {
    /// The position of the slot within its topology.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A result that may fail on malformed input or an exhausted guess budget.
pub type PsResult<T> = Result<T, Error>;

/// Fill every slot of `topology` with a distinct word from `vocabulary`.
///
/// Returns `None` when no assignment satisfies the overlaps.
///
/// # Examples
///
/// ```
/// use crossword_csp::{solve, Direction, Topology, Vocabulary};
///
/// let mut topology = Topology::new();
/// let across = topology.add_slot(0, 0, Direction::Across, 3).unwrap();
/// let down = topology.add_slot(0, 1, Direction::Down, 3).unwrap();
/// topology.add_overlap(across, down, 1, 0).unwrap();
///
/// let vocabulary: Vocabulary = ["cat", "arc", "dog"].into_iter().collect();
/// let solution = solve(&topology, &vocabulary).unwrap();
/// assert_eq!(solution[across].to_string(), "cat");
/// assert_eq!(solution[down].to_string(), "arc");
/// ```
pub fn solve(topology: &Topology, vocabulary: &Vocabulary) -> Option<Assignment> {
    crossword::solve_with(topology, vocabulary, &SolverConfig::default(), &Default::default())
        .ok()
        .flatten()
}
