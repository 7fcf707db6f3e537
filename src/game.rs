//! The game collaborator: holds the secret and reports feedback.
//!
//! Kept outside the solver core on purpose. The solver only sees the
//! `submit_guess`/`is_finished` surface and treats the returned feedback as
//! ground truth.

use crate::error::SolverError;
use crate::feedback::Feedback;
use crate::sequence::Sequence;
use rand::Rng;

/// One Mastermind game: a secret sequence, a step counter and a finished
/// flag.
#[derive(Debug, Clone)]
pub struct Game {
    secret: Sequence,
    steps: usize,
    finished: bool,
}

impl Game {
    /// Start a game with a uniformly random secret of `length` digits.
    pub fn new(length: usize) -> Result<Self, SolverError> {
        if length == 0 {
            return Err(SolverError::EmptyCandidateSpace);
        }
        if length > 9 {
            return Err(SolverError::InvalidSequence {
                reason: format!("code length {} is too large", length),
            });
        }
        Ok(Self::with_secret(Self::random_secret(length)))
    }

    /// Start a game with a known secret (testing and benchmarking).
    pub fn with_secret(secret: Sequence) -> Self {
        Self { secret, steps: 0, finished: false }
    }

    fn random_secret(length: usize) -> Sequence {
        let index = rand::thread_rng().gen_range(0..10u64.pow(length as u32));
        Sequence::from_index(index, length)
    }

    pub fn length(&self) -> usize {
        self.secret.len()
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn peek_secret(&self) -> &Sequence {
        &self.secret
    }

    /// Replace the secret with a fresh random one and clear the counters.
    pub fn reset(&mut self) {
        self.secret = Self::random_secret(self.secret.len());
        self.steps = 0;
        self.finished = false;
    }

    /// Score a guess against the secret. Counts a step and marks the game
    /// finished on a full match; a finished game scores without counting.
    pub fn submit_guess(&mut self, guess: &Sequence) -> Result<Feedback, SolverError> {
        let feedback = Feedback::checked(&self.secret, guess)?;
        if !self.finished {
            self.steps += 1;
            if feedback.is_win(self.secret.len()) {
                self.finished = true;
            }
        }
        Ok(feedback)
    }
}
