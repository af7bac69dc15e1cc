// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;

/// One participant, as read from a single non-blank line of a participant list.
///
/// The order of the fields is the order in which they appear in the line. No field
/// is given a particular meaning.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ParticipantRecord {
    pub fields: Vec<String>,
}

impl ParticipantRecord {
    pub fn new(fields: Vec<String>) -> ParticipantRecord {
        ParticipantRecord { fields }
    }

    /// The fields joined for display, separated by ` | `.
    pub fn joined(&self) -> String {
        self.fields.join(" | ")
    }
}

/// All the participants of a list, in the order of the lines they came from.
///
/// The index of a record is its display position minus one.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct ParsedTable {
    pub records: Vec<ParticipantRecord>,
}

impl ParsedTable {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ParticipantRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParticipantRecord> {
        self.records.iter()
    }
}

/// A validated request for a draw.
///
/// Invariant: 1 <= winner_count <= pool_size. Only `SelectionRequest::new` builds one.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct SelectionRequest {
    pool_size: usize,
    winner_count: usize,
}

impl SelectionRequest {
    pub fn new(pool_size: usize, winner_count: usize) -> Result<SelectionRequest, DrawError> {
        if pool_size < 1 {
            return Err(DrawError::EmptyPool);
        }
        if winner_count < 1 {
            return Err(DrawError::NoWinnersRequested);
        }
        if winner_count > pool_size {
            return Err(DrawError::WinnerCountExceedsPool {
                pool_size,
                winner_count,
            });
        }
        Ok(SelectionRequest {
            pool_size,
            winner_count,
        })
    }

    pub fn pool_size(&self) -> usize {
        self.pool_size
    }

    pub fn winner_count(&self) -> usize {
        self.winner_count
    }
}

// ******** Output data structures *********

/// The indices of the winners, strictly ascending, each in `[0, pool_size)`.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct WinnerSet {
    pub(crate) indices: Vec<usize>,
}

impl WinnerSet {
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, usize> {
        self.indices.iter()
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.indices
    }
}

/// Errors for draws requested outside of the contract of the sampler.
///
/// The sampler refuses these requests instead of clamping them.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum DrawError {
    EmptyPool,
    NoWinnersRequested,
    WinnerCountExceedsPool {
        pool_size: usize,
        winner_count: usize,
    },
}

impl Error for DrawError {}

impl Display for DrawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrawError::EmptyPool => write!(f, "cannot draw from an empty pool"),
            DrawError::NoWinnersRequested => write!(f, "at least one winner must be drawn"),
            DrawError::WinnerCountExceedsPool {
                pool_size,
                winner_count,
            } => write!(
                f,
                "cannot draw {} winners from a pool of {}",
                winner_count, pool_size
            ),
        }
    }
}
