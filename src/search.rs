//! Entropy-based guess search.
//!
//! This module implements the information-theoretic heart of the solver.
//! The key insight is that we want to maximize the expected information gain
//! (entropy) from each guess, which minimizes the expected number of
//! remaining possible secrets. Every sequence in the candidate space is
//! scored against the current memory in parallel and the best one wins.

use crate::feedback::Feedback;
use crate::sequence::{CandidateSpace, Sequence};
use rayon::prelude::*;
use std::cmp::Ordering;

/// Result of analyzing a potential guess, for ranked display.
#[derive(Debug, Clone)]
pub struct ScoredGuess {
    pub sequence: Sequence,
    pub entropy: f64,
    pub expected_remaining: f64,
    pub is_candidate: bool,
}

/// Shannon entropy of the feedback distribution a guess would induce over
/// the remaining candidates.
///
/// Memory is partitioned by the feedback each member would produce against
/// the guess; with partition weights p the entropy is -sum(p * log2 p),
/// the expected number of bits the guess reveals about the secret.
pub fn entropy(guess: &Sequence, memory: &[Sequence]) -> f64 {
    let m = memory.len() as f64;
    if memory.len() <= 1 {
        return 0.0;
    }

    let n = guess.len();
    let mut bucket_counts = vec![0u32; Feedback::partition_count(n)];

    for candidate in memory {
        let feedback = Feedback::calculate(candidate, guess);
        bucket_counts[feedback.partition_index(n)] += 1;
    }

    let mut bits = 0.0;
    for &count in &bucket_counts {
        if count > 0 {
            let p = f64::from(count) / m;
            bits -= p * p.log2();
        }
    }

    bits
}

/// The fixed opening guess for codes of `len` digits.
///
/// With no feedback yet, memory equals the full space and the entropy
/// search always lands on the same answer, so it is precomputed: distinct
/// ascending digits spread the first partition as evenly as possible.
pub fn canonical_first_guess(len: usize) -> Sequence {
    let index = (0..len as u64).fold(0u64, |acc, i| acc * 10 + (i % 10));
    Sequence::from_index(index, len)
}

/// Shortcuts that make a full search unnecessary.
///
/// - A single remaining candidate must be the secret; guess it.
/// - Untouched memory (first guess of a play-through) always yields the
///   same search result, so the canonical opener is returned directly.
pub fn fast_path(space: &CandidateSpace, memory: &[Sequence]) -> Option<Sequence> {
    if memory.len() == 1 {
        return Some(memory[0].clone());
    }
    if memory.len() == space.len() {
        return Some(canonical_first_guess(space.length()));
    }
    None
}

/// Find the guess with maximum expected information gain.
///
/// Evaluates every sequence in the space against the memory, in parallel.
/// Ties on entropy are broken toward the numerically smallest sequence, so
/// the result does not depend on worker count or completion order.
pub fn best_guess(space: &CandidateSpace, memory: &[Sequence]) -> Sequence {
    debug_assert!(!memory.is_empty());

    let best = space
        .sequences()
        .par_iter()
        .map(|guess| (entropy(guess, memory), guess))
        .reduce_with(|a, b| match a.0.partial_cmp(&b.0) {
            Some(Ordering::Greater) => a,
            Some(Ordering::Less) => b,
            _ => {
                if a.1 <= b.1 {
                    a
                } else {
                    b
                }
            }
        });

    best.map(|(_, guess)| guess.clone())
        .expect("candidate space is never empty")
}

/// Rank the top `k` guesses by entropy, for interactive display.
///
/// Unlike [`best_guess`] this sorts the full analysis, so it is only meant
/// for human-facing output, not the solve loop. Ties order candidates
/// (sequences still in memory) first, then numerically.
pub fn rank_guesses(space: &CandidateSpace, memory: &[Sequence], k: usize) -> Vec<ScoredGuess> {
    if memory.is_empty() {
        return vec![];
    }

    let mut scored: Vec<ScoredGuess> = space
        .sequences()
        .par_iter()
        .map(|guess| {
            let bits = entropy(guess, memory);
            ScoredGuess {
                sequence: guess.clone(),
                entropy: bits,
                expected_remaining: memory.len() as f64 / 2f64.powf(bits),
                is_candidate: memory.contains(guess),
            }
        })
        .collect();

    scored.sort_by(|a, b| match b.entropy.partial_cmp(&a.entropy) {
        Some(Ordering::Equal) | None => b
            .is_candidate
            .cmp(&a.is_candidate)
            .then_with(|| a.sequence.cmp(&b.sequence)),
        Some(ord) => ord,
    });

    scored.truncate(k);
    scored
}
