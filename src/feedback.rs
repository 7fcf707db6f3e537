//! Feedback calculation for Mastermind guesses.
//!
//! This module handles computing the (exact, partial) match counts for a
//! guess against a secret sequence, plus the "xAyB" string form used at the
//! boundary (e.g. "2A1B" for two exact and one misplaced digit).

use crate::error::SolverError;
use crate::sequence::Sequence;
use std::fmt;
use std::str::FromStr;

/// The aggregate result of comparing a guess to a secret.
///
/// `exact` counts positions where the digits agree; `partial` counts digits
/// present on both sides but in the wrong place, with duplicates counted no
/// more than their remaining multiplicity on either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Feedback {
    pub exact: u8,
    pub partial: u8,
}

impl Feedback {
    pub fn new(exact: u8, partial: u8) -> Self {
        Self { exact, partial }
    }

    /// Calculate the feedback for a guess against a secret.
    ///
    /// Standard Mastermind rules:
    /// - exact ("A"): digit in the correct position
    /// - partial ("B"): digit present elsewhere, each occurrence consumed
    ///   at most once on each side
    ///
    /// Both sequences must have the same length; digit validity is already
    /// guaranteed by the `Sequence` type. Use [`Feedback::checked`] when the
    /// inputs come from outside the crate.
    pub fn calculate(secret: &Sequence, guess: &Sequence) -> Self {
        let secret = secret.digits();
        let guess = guess.digits();

        debug_assert_eq!(secret.len(), guess.len());

        let mut exact = 0u8;
        let mut unmatched = [0u8; 10];

        for (s, g) in secret.iter().zip(guess.iter()) {
            if s == g {
                exact += 1;
            } else {
                unmatched[*s as usize] += 1;
            }
        }

        let mut partial = 0u8;
        for (s, g) in secret.iter().zip(guess.iter()) {
            if s != g && unmatched[*g as usize] > 0 {
                partial += 1;
                unmatched[*g as usize] -= 1;
            }
        }

        Self { exact, partial }
    }

    /// Length-validating variant of [`Feedback::calculate`] for inputs that
    /// cross the crate boundary.
    pub fn checked(secret: &Sequence, guess: &Sequence) -> Result<Self, SolverError> {
        if secret.len() != guess.len() {
            return Err(SolverError::InvalidSequence {
                reason: format!(
                    "length mismatch: secret has {} digits, guess has {}",
                    secret.len(),
                    guess.len()
                ),
            });
        }
        Ok(Self::calculate(secret, guess))
    }

    /// Whether this feedback reports a full match for codes of length `n`.
    pub fn is_win(self, n: usize) -> bool {
        usize::from(self.exact) == n
    }

    /// Dense index of this feedback among all outcomes for codes of length
    /// `n`. Used to bucket candidates without hashing.
    pub(crate) fn partition_index(self, n: usize) -> usize {
        usize::from(self.exact) * (n + 1) + usize::from(self.partial)
    }

    /// Number of distinct partition indices for codes of length `n`.
    pub(crate) fn partition_count(n: usize) -> usize {
        (n + 1) * (n + 1)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}A{}B", self.exact, self.partial)
    }
}

impl FromStr for Feedback {
    type Err = SolverError;

    /// Parse the "xAyB" wire form, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || SolverError::InvalidFeedback(s.to_string());
        let upper = s.to_ascii_uppercase();
        let rest = upper.strip_suffix('B').ok_or_else(err)?;
        let (a_part, b_part) = rest.split_once('A').ok_or_else(err)?;
        let exact: u8 = a_part.parse().map_err(|_| err())?;
        let partial: u8 = b_part.parse().map_err(|_| err())?;
        Ok(Self { exact, partial })
    }
}
