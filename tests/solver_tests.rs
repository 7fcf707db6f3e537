use mastermind_bot::search::{best_guess, canonical_first_guess, entropy, fast_path};
use mastermind_bot::{CandidateSpace, Feedback, Game, Sequence, Solver, SolverError};

fn seq(s: &str) -> Sequence {
    s.parse().unwrap()
}

/// Memory after one round: candidates consistent with scoring `guess`
/// against `secret`.
fn pruned_memory(space: &CandidateSpace, secret: &Sequence, guess: &Sequence) -> Vec<Sequence> {
    let feedback = Feedback::calculate(secret, guess);
    space
        .to_vec()
        .into_iter()
        .filter(|candidate| Feedback::calculate(candidate, guess) == feedback)
        .collect()
}

#[test]
fn test_solver_creation() {
    let solver = Solver::new(2).unwrap();
    assert_eq!(solver.remaining_count(), 100);
    assert!(solver.history().is_empty());
    assert!(solver.cache().is_empty());
    assert_eq!(solver.searches_run(), 0);
}

#[test]
fn test_solver_rejects_zero_length() {
    assert_eq!(Solver::new(0).unwrap_err(), SolverError::EmptyCandidateSpace);
}

#[test]
fn test_first_guess_shortcut() {
    // With untouched memory the opener comes from the fast path: no full
    // search runs, and the cache picks up the empty-history entry.
    let mut solver = Solver::new(4).unwrap();
    let guess = solver.next_guess().unwrap();
    assert_eq!(guess, canonical_first_guess(4));
    assert_eq!(solver.searches_run(), 0);
    assert_eq!(solver.cache().len(), 1);
}

#[test]
fn test_canonical_first_guess_is_fixed() {
    assert_eq!(canonical_first_guess(4).to_string(), "0123");
    assert_eq!(canonical_first_guess(2).to_string(), "01");
    assert_eq!(canonical_first_guess(4), canonical_first_guess(4));
}

#[test]
fn test_singleton_memory_fast_path() {
    let space = CandidateSpace::new(2).unwrap();
    let memory = vec![seq("77")];
    assert_eq!(fast_path(&space, &memory), Some(seq("77")));
}

#[test]
fn test_fast_path_declines_partial_memory() {
    let space = CandidateSpace::new(2).unwrap();
    let memory = pruned_memory(&space, &seq("42"), &seq("01"));
    assert!(memory.len() > 1);
    assert!(memory.len() < space.len());
    assert_eq!(fast_path(&space, &memory), None);
}

#[test]
fn test_entropy_bounds() {
    let space = CandidateSpace::new(2).unwrap();
    let memory = space.to_vec();

    let bits = entropy(&seq("01"), &memory);
    assert!(bits > 0.0);
    // Entropy can never exceed log2 of the number of candidates.
    assert!(bits <= (memory.len() as f64).log2() + 1e-9);

    // A singleton memory carries no information to gain.
    assert_eq!(entropy(&seq("01"), &[seq("42")]), 0.0);
}

#[test]
fn test_entropy_matches_hand_computed_partition() {
    // Guess 00 against candidates {00, 01, 10, 11}: feedbacks are
    // 2A0B, 1A0B, 1A0B, 0A0B, so p = {1/4, 1/2, 1/4} and H = 1.5 bits.
    let memory = vec![seq("00"), seq("01"), seq("10"), seq("11")];
    let bits = entropy(&seq("00"), &memory);
    assert!((bits - 1.5).abs() < 1e-12);
}

#[test]
fn test_search_determinism_across_worker_counts() {
    let space = CandidateSpace::new(2).unwrap();
    let memory = pruned_memory(&space, &seq("42"), &seq("01"));

    let single = rayon::ThreadPoolBuilder::new()
        .num_threads(1)
        .build()
        .unwrap();
    let many = rayon::ThreadPoolBuilder::new()
        .num_threads(8)
        .build()
        .unwrap();

    let sequential = single.install(|| best_guess(&space, &memory));
    let parallel = many.install(|| best_guess(&space, &memory));
    assert_eq!(sequential, parallel);
}

#[test]
fn test_monotonic_pruning() {
    let mut solver = Solver::new(2).unwrap();
    let guess = seq("01");
    let feedback = Feedback::calculate(&seq("42"), &guess);

    let before: Vec<Sequence> = solver.memory().to_vec();
    solver.apply_feedback(&guess, feedback).unwrap();

    assert!(solver.remaining_count() <= before.len());
    for survivor in solver.memory() {
        assert!(before.contains(survivor));
        assert_eq!(Feedback::calculate(survivor, &guess), feedback);
    }
    assert_eq!(solver.history().len(), 1);
}

#[test]
fn test_inconsistent_feedback_is_fatal_and_state_preserving() {
    let mut solver = Solver::new(2).unwrap();

    // exact == n with a nonzero partial count is impossible for any secret.
    let result = solver.apply_feedback(&seq("00"), Feedback::new(2, 1));
    assert!(matches!(
        result,
        Err(SolverError::InconsistentFeedback { .. })
    ));

    // The bad feedback must not corrupt memory or history.
    assert_eq!(solver.remaining_count(), 100);
    assert!(solver.history().is_empty());
}

#[test]
fn test_apply_feedback_rejects_wrong_length_guess() {
    let mut solver = Solver::new(2).unwrap();
    let result = solver.apply_feedback(&seq("123"), Feedback::new(0, 0));
    assert!(matches!(result, Err(SolverError::InvalidSequence { .. })));
}

#[test]
fn test_solve_known_secret() {
    let mut solver = Solver::new(2).unwrap();
    let mut game = Game::with_secret(seq("42"));

    let steps = solver.run_to_completion(&mut game).unwrap();

    assert!(game.is_finished());
    assert!(steps >= 1);
    assert_eq!(steps, game.steps());
    assert_eq!(steps, solver.history().len());
    assert_eq!(solver.memory(), [seq("42")]);
}

#[test]
fn test_singleton_memory_means_certain_win() {
    // Whenever the candidate set is down to one sequence, the next guess
    // must be that sequence and must win.
    let secret = seq("93");
    let mut solver = Solver::new(2).unwrap();
    let mut game = Game::with_secret(secret.clone());

    while !game.is_finished() {
        let down_to_one = solver.remaining_count() == 1;
        let guess = solver.next_guess().unwrap();
        if down_to_one {
            assert_eq!(guess, secret);
        }
        let feedback = game.submit_guess(&guess).unwrap();
        if down_to_one {
            assert!(feedback.is_win(2));
        }
        solver.apply_feedback(&guess, feedback).unwrap();
    }
}

#[test]
fn test_termination_over_all_secrets() {
    let mut solver = Solver::new(2).unwrap();
    let secrets = solver.space().to_vec();

    for secret in secrets {
        solver.reset();
        let mut game = Game::with_secret(secret.clone());
        let steps = solver.run_to_completion(&mut game).unwrap();

        assert!(game.is_finished(), "did not finish for {}", secret);
        assert!(steps <= 100, "too many guesses for {}", secret);
        assert_eq!(solver.memory(), [secret]);
    }
}

#[test]
fn test_reset_keeps_cache() {
    let mut solver = Solver::new(2).unwrap();
    let mut game = Game::with_secret(seq("42"));
    solver.run_to_completion(&mut game).unwrap();

    let cached = solver.cache().len();
    assert!(cached >= 1);

    solver.reset();
    assert_eq!(solver.remaining_count(), 100);
    assert!(solver.history().is_empty());
    assert_eq!(solver.cache().len(), cached);
}

#[test]
fn test_cache_soundness_on_replay() {
    // Replaying the same secret reaches the same history prefixes, so the
    // second play-through must be answered entirely from the cache with
    // the exact same guesses.
    let mut solver = Solver::new(2).unwrap();

    let mut first = Vec::new();
    let mut game = Game::with_secret(seq("37"));
    while !game.is_finished() {
        let guess = solver.next_guess().unwrap();
        let feedback = game.submit_guess(&guess).unwrap();
        solver.apply_feedback(&guess, feedback).unwrap();
        first.push(guess);
    }

    let searches_after_first = solver.searches_run();

    solver.reset();
    let mut second = Vec::new();
    let mut game = Game::with_secret(seq("37"));
    while !game.is_finished() {
        let guess = solver.next_guess().unwrap();
        let feedback = game.submit_guess(&guess).unwrap();
        solver.apply_feedback(&guess, feedback).unwrap();
        second.push(guess);
    }

    assert_eq!(first, second);
    assert_eq!(solver.searches_run(), searches_after_first);
}

#[test]
fn test_user_guesses_do_not_poison_the_cache() {
    // Two different user-chosen guesses can produce identical feedback
    // histories while leaving different candidate sets. Suggestions after
    // a foreign guess must come from the actual memory, not from a cache
    // entry recorded for the other state.
    let mut solver = Solver::new(2).unwrap();
    let feedback: Feedback = "0A1B".parse().unwrap();

    solver.apply_feedback(&seq("01"), feedback).unwrap();
    let suggestion_a = solver.next_guess().unwrap();

    solver.reset();
    solver.apply_feedback(&seq("89"), feedback).unwrap();
    let suggestion_b = solver.next_guess().unwrap();

    let expected = best_guess(solver.space(), solver.memory());
    assert_eq!(suggestion_b, expected);
    assert_ne!(suggestion_a, suggestion_b);
}

#[test]
fn test_off_book_play_does_not_extend_the_cache() {
    let mut solver = Solver::new(2).unwrap();
    let guess = seq("01");
    let feedback = Feedback::calculate(&seq("42"), &guess);

    // The solver never chose "01", so nothing here is cacheable.
    solver.apply_feedback(&guess, feedback).unwrap();
    solver.next_guess().unwrap();
    assert!(solver.cache().is_empty());

    // A reset starts a fresh solver-driven play-through; caching resumes.
    solver.reset();
    solver.next_guess().unwrap();
    assert_eq!(solver.cache().len(), 1);
}

#[test]
fn test_run_to_completion_counts_only_game_steps() {
    // Leftover manual history must not inflate the reported guess count.
    let mut solver = Solver::new(2).unwrap();
    let guess = seq("01");
    let feedback = Feedback::calculate(&seq("42"), &guess);
    solver.apply_feedback(&guess, feedback).unwrap();

    let mut game = Game::with_secret(seq("42"));
    let steps = solver.run_to_completion(&mut game).unwrap();

    assert_eq!(steps, game.steps());
    assert_eq!(solver.history().len(), steps + 1);
}

#[test]
fn test_fresh_solver_agrees_with_cached_one() {
    // Determinism of the search implies two independent solvers walk the
    // same guess sequence for the same secret.
    let mut a = Solver::new(2).unwrap();
    let mut b = Solver::new(2).unwrap();

    let mut game_a = Game::with_secret(seq("58"));
    let mut game_b = Game::with_secret(seq("58"));

    let steps_a = a.run_to_completion(&mut game_a).unwrap();
    let steps_b = b.run_to_completion(&mut game_b).unwrap();

    assert_eq!(steps_a, steps_b);
    assert_eq!(a.history(), b.history());
}

#[test]
fn test_top_guesses_ranked_by_entropy() {
    let mut solver = Solver::new(2).unwrap();
    let guess = seq("01");
    let feedback = Feedback::calculate(&seq("42"), &guess);
    solver.apply_feedback(&guess, feedback).unwrap();

    let top = solver.top_guesses(5);
    assert_eq!(top.len(), 5);
    for pair in top.windows(2) {
        assert!(pair[0].entropy >= pair[1].entropy);
    }
}

#[test]
fn test_game_counts_steps_and_finishes() {
    let mut game = Game::with_secret(seq("42"));
    assert!(!game.is_finished());
    assert_eq!(game.length(), 2);

    let feedback = game.submit_guess(&seq("24")).unwrap();
    assert_eq!(feedback, Feedback::new(0, 2));
    assert_eq!(game.steps(), 1);
    assert!(!game.is_finished());

    let feedback = game.submit_guess(&seq("42")).unwrap();
    assert!(feedback.is_win(2));
    assert_eq!(game.steps(), 2);
    assert!(game.is_finished());

    // A finished game still scores but no longer counts steps.
    game.submit_guess(&seq("00")).unwrap();
    assert_eq!(game.steps(), 2);
}

#[test]
fn test_game_rejects_wrong_length_guess() {
    let mut game = Game::with_secret(seq("42"));
    let result = game.submit_guess(&seq("042"));
    assert!(matches!(result, Err(SolverError::InvalidSequence { .. })));
    assert_eq!(game.steps(), 0);
}

#[test]
fn test_random_game_has_valid_secret() {
    let game = Game::new(3).unwrap();
    assert_eq!(game.length(), 3);
    assert_eq!(game.peek_secret().len(), 3);
    assert!(game.peek_secret().digits().iter().all(|&d| d <= 9));
}

#[test]
fn test_solve_three_digit_secret() {
    let mut solver = Solver::new(3).unwrap();
    let mut game = Game::with_secret(seq("156"));

    let steps = solver.run_to_completion(&mut game).unwrap();

    assert!(game.is_finished());
    assert!(steps <= 10);
    assert_eq!(solver.memory(), [seq("156")]);
}
