use thiserror::Error;

use crate::topology::Direction;
use crate::SlotToken;

#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum Error {
    #[error("slot at ({row}, {col}) must have a length of at least 1")]
    EmptySlot { row: usize, col: usize },

    #[error("a {direction} slot already starts at ({row}, {col})")]
    DuplicateSlot {
        row: usize,
        col: usize,
        direction: Direction,
    },

    #[error("unknown slot {0:?}")]
    UnknownSlot(SlotToken),

    #[error("slot {0:?} cannot overlap itself")]
    SelfOverlap(SlotToken),

    #[error("overlap index {index} is out of bounds for slot {slot:?} of length {length}")]
    OverlapOutOfBounds {
        slot: SlotToken,
        index: usize,
        length: usize,
    },

    #[error("slots {0:?} and {1:?} already overlap at a different cell")]
    ConflictingOverlap(SlotToken, SlotToken),

    #[error("malformed structure: {0}")]
    Structure(String),

    #[error("gave up after {0} guesses")]
    GuessLimitExceeded(u32),
}
