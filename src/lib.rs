//! # Mastermind Bot
//!
//! A multithreaded Mastermind (bulls-and-cows) solver using entropy-based
//! information theory.
//!
//! The secret is a fixed-length sequence of digits 0-9 with repetition
//! allowed. After every guess the solver receives only the aggregate
//! (exact, partial) match counts; it picks each guess by maximizing the
//! expected information gain over the candidates still in play, evaluated
//! in parallel across the full `10^n` guess universe. A history-keyed memo
//! cache lets repeated play-throughs reuse previously computed guesses.

pub mod error;
pub mod feedback;
pub mod game;
pub mod search;
pub mod sequence;
pub mod solver;

pub use error::SolverError;
pub use feedback::Feedback;
pub use game::Game;
pub use sequence::{CandidateSpace, Sequence};
pub use solver::{History, MemoCache, Solver};

/// Default code length, matching the classic four-digit game.
pub const DEFAULT_CODE_LENGTH: usize = 4;
