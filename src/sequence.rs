//! Digit sequences and the candidate universe.
//!
//! A [`Sequence`] is the fundamental unit of the game: secrets, guesses and
//! candidates are all fixed-length tuples of decimal digits, with repetition
//! allowed. The [`CandidateSpace`] enumerates every sequence of a given
//! length once, in ascending numeric order, and is shared read-only by the
//! search.

use crate::error::SolverError;
use std::fmt;
use std::str::FromStr;

/// An immutable fixed-length sequence of digits 0-9.
///
/// Equality, hashing and ordering are structural; since all sequences in a
/// game share one length, ordering coincides with the numeric order of the
/// zero-padded decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Sequence {
    digits: Box<[u8]>,
}

impl Sequence {
    /// Build a sequence from raw digit values (each 0-9).
    pub fn new(digits: Vec<u8>) -> Result<Self, SolverError> {
        if digits.is_empty() {
            return Err(SolverError::InvalidSequence {
                reason: "sequence must have at least one digit".to_string(),
            });
        }
        if let Some(&bad) = digits.iter().find(|&&d| d > 9) {
            return Err(SolverError::InvalidSequence {
                reason: format!("digit value {} is out of range 0-9", bad),
            });
        }
        Ok(Self { digits: digits.into_boxed_slice() })
    }

    /// The sequence at position `index` of the natural enumeration order
    /// for length `len`, i.e. `index` rendered as a zero-padded decimal.
    pub fn from_index(index: u64, len: usize) -> Self {
        debug_assert!(len > 0);
        let mut digits = vec![0u8; len];
        let mut rest = index;
        for slot in digits.iter_mut().rev() {
            *slot = (rest % 10) as u8;
            rest /= 10;
        }
        debug_assert_eq!(rest, 0, "index does not fit in {} digits", len);
        Self { digits: digits.into_boxed_slice() }
    }

    pub fn len(&self) -> usize {
        self.digits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    pub fn digits(&self) -> &[u8] {
        &self.digits
    }
}

impl FromStr for Sequence {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(SolverError::InvalidSequence {
                reason: "sequence must have at least one digit".to_string(),
            });
        }
        let digits: Result<Vec<u8>, _> = s
            .chars()
            .map(|c| {
                c.to_digit(10).map(|d| d as u8).ok_or_else(|| SolverError::InvalidSequence {
                    reason: format!("{:?} is not a decimal digit", c),
                })
            })
            .collect();
        Ok(Self { digits: digits?.into_boxed_slice() })
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &d in self.digits.iter() {
            write!(f, "{}", d)?;
        }
        Ok(())
    }
}

/// The universe of all digit sequences of one fixed length.
///
/// Size is exactly `10^length`. Built once per game length, immutable
/// afterwards; doubles as the set of allowed guesses (guesses are not
/// restricted to the remaining candidates).
#[derive(Debug)]
pub struct CandidateSpace {
    length: usize,
    sequences: Vec<Sequence>,
}

impl CandidateSpace {
    /// Enumerate all sequences of `length` digits, ascending.
    ///
    /// Lengths beyond 9 are rejected along with 0: `10^10` sequences would
    /// not fit in memory and the exhaustive search is hopeless well before
    /// that point.
    pub fn new(length: usize) -> Result<Self, SolverError> {
        if length == 0 {
            return Err(SolverError::EmptyCandidateSpace);
        }
        if length > 9 {
            return Err(SolverError::InvalidSequence {
                reason: format!("code length {} is too large to enumerate", length),
            });
        }
        let size = 10u64.pow(length as u32);
        let sequences = (0..size).map(|i| Sequence::from_index(i, length)).collect();
        Ok(Self { length, sequences })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }

    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    /// Clone the full universe, the starting state of a solver's memory.
    pub fn to_vec(&self) -> Vec<Sequence> {
        self.sequences.clone()
    }
}
