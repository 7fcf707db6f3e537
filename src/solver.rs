//! Solver state machine: memory, history and the memo cache.
//!
//! The solver owns the shrinking set of candidates still consistent with
//! every feedback received ("memory"), the per-play-through feedback history,
//! and a cache mapping history prefixes to previously chosen guesses.
//! Feedback for a fixed secret and guess order is deterministic, so a given
//! history prefix always implies the same best next guess; that invariant is
//! what makes the cache sound across play-throughs and is the reason
//! exhaustive benchmarks over every secret run fast after warm-up.
//!
//! The invariant only holds while every guess in the history is the solver's
//! own. A caller-supplied guess (the interactive `feedback` command) takes
//! the play-through off book: the same feedback history can then correspond
//! to a different candidate set, so the cache is neither consulted nor
//! extended again until the next reset.

use crate::error::SolverError;
use crate::feedback::Feedback;
use crate::game::Game;
use crate::search::{self, ScoredGuess};
use crate::sequence::{CandidateSpace, Sequence};
use std::collections::HashMap;

/// The ordered feedback values received so far in one play-through.
///
/// Append-only; structural equality and hashing make it usable as the memo
/// cache key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct History(Vec<Feedback>);

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, feedback: Feedback) {
        self.0.push(feedback);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[Feedback] {
        &self.0
    }

    fn clear(&mut self) {
        self.0.clear();
    }
}

/// Cache of previously selected guesses, keyed by feedback history.
///
/// Entries record the solver's own line of play; they stay valid for any
/// secret of the same code length and are never invalidated within a run.
/// Written only by the orchestrating thread; wrap in a `RwLock` if several
/// solvers ever share one cache.
#[derive(Debug, Default)]
pub struct MemoCache {
    entries: HashMap<History, Sequence>,
}

impl MemoCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, history: &History) -> Option<&Sequence> {
        self.entries.get(history)
    }

    pub fn insert(&mut self, history: History, guess: Sequence) {
        self.entries.insert(history, guess);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The main solver: orchestrates guess -> feedback -> prune cycles.
#[derive(Debug)]
pub struct Solver {
    space: CandidateSpace,
    memory: Vec<Sequence>,
    history: History,
    cache: MemoCache,
    on_book: bool,
    searches_run: usize,
}

impl Solver {
    /// Build a solver for codes of `length` digits.
    pub fn new(length: usize) -> Result<Self, SolverError> {
        let space = CandidateSpace::new(length)?;
        let memory = space.to_vec();
        Ok(Self {
            space,
            memory,
            history: History::new(),
            cache: MemoCache::new(),
            on_book: true,
            searches_run: 0,
        })
    }

    pub fn space(&self) -> &CandidateSpace {
        &self.space
    }

    /// Candidates still consistent with every feedback received.
    pub fn memory(&self) -> &[Sequence] {
        &self.memory
    }

    pub fn remaining_count(&self) -> usize {
        self.memory.len()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn cache(&self) -> &MemoCache {
        &self.cache
    }

    /// How many full parallel searches have run. Cache hits and fast paths
    /// do not count; tests use this to verify both shortcuts.
    pub fn searches_run(&self) -> usize {
        self.searches_run
    }

    /// Select the next guess for the current history.
    ///
    /// Resolution order: memo cache, then the search shortcuts (singleton
    /// memory, untouched memory), then the full parallel entropy search.
    /// The chosen guess is recorded in the cache; memory and history are
    /// not touched. Once a play-through has gone off book the cache is
    /// skipped entirely and the guess comes from the actual memory.
    pub fn next_guess(&mut self) -> Result<Sequence, SolverError> {
        if self.on_book {
            if let Some(cached) = self.cache.get(&self.history) {
                return Ok(cached.clone());
            }
        }

        let guess = match search::fast_path(&self.space, &self.memory) {
            Some(guess) => guess,
            None => {
                self.searches_run += 1;
                search::best_guess(&self.space, &self.memory)
            }
        };

        if self.on_book {
            self.cache.insert(self.history.clone(), guess.clone());
        }
        Ok(guess)
    }

    /// Incorporate the feedback for a guess: prune memory to the candidates
    /// that would have produced it, and append it to the history.
    ///
    /// Feedback is exact, never probabilistic, so pruning is cumulative and
    /// memory only ever shrinks. If no candidate survives, the feedback
    /// contradicts the game rules (or an earlier report); the solver state
    /// is left untouched and the play-through must be abandoned.
    pub fn apply_feedback(&mut self, guess: &Sequence, feedback: Feedback) -> Result<(), SolverError> {
        if guess.len() != self.space.length() {
            return Err(SolverError::InvalidSequence {
                reason: format!(
                    "guess has {} digits, expected {}",
                    guess.len(),
                    self.space.length()
                ),
            });
        }

        let survivors: Vec<Sequence> = self
            .memory
            .iter()
            .filter(|candidate| Feedback::calculate(candidate, guess) == feedback)
            .cloned()
            .collect();

        if survivors.is_empty() {
            return Err(SolverError::InconsistentFeedback {
                guess: guess.to_string(),
                feedback: feedback.to_string(),
            });
        }

        // The cache key is the feedback history alone, which identifies the
        // memory only while every guess is the solver's own. A foreign guess
        // takes this play-through off book.
        let own_guess = self.cache.get(&self.history).map_or(false, |g| g == guess);
        if !own_guess {
            self.on_book = false;
        }

        self.memory = survivors;
        self.history.push(feedback);
        Ok(())
    }

    /// Start a fresh play-through: full memory, empty history. The memo
    /// cache is deliberately kept; its entries are history-keyed and remain
    /// valid for any secret of this length.
    pub fn reset(&mut self) {
        self.memory = self.space.to_vec();
        self.history.clear();
        self.on_book = true;
    }

    /// Play a game to the end, returning the number of guesses used.
    ///
    /// The count comes from the game's own step counter, so it stays
    /// accurate even when the solver carries history from earlier manual
    /// rounds.
    pub fn run_to_completion(&mut self, game: &mut Game) -> Result<usize, SolverError> {
        while !game.is_finished() {
            let guess = self.next_guess()?;
            let feedback = game.submit_guess(&guess)?;
            self.apply_feedback(&guess, feedback)?;
        }
        Ok(game.steps())
    }

    /// Rank the `k` most informative guesses for the current memory.
    pub fn top_guesses(&self, k: usize) -> Vec<ScoredGuess> {
        search::rank_guesses(&self.space, &self.memory, k)
    }
}
