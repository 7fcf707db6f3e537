use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mastermind_bot::search;
use mastermind_bot::{CandidateSpace, Feedback, Game, Sequence, Solver};

fn seq(s: &str) -> Sequence {
    s.parse().unwrap()
}

fn bench_entropy(c: &mut Criterion) {
    let space = CandidateSpace::new(3).unwrap();
    let memory = space.to_vec();
    let guess = seq("012");

    c.bench_function("entropy_len3_full_memory", |b| {
        b.iter(|| search::entropy(black_box(&guess), black_box(&memory)))
    });
}

fn bench_best_guess(c: &mut Criterion) {
    let space = CandidateSpace::new(2).unwrap();
    let guess = seq("01");
    let feedback = Feedback::calculate(&seq("42"), &guess);
    let memory: Vec<Sequence> = space
        .to_vec()
        .into_iter()
        .filter(|candidate| Feedback::calculate(candidate, &guess) == feedback)
        .collect();

    c.bench_function("best_guess_len2_pruned_memory", |b| {
        b.iter(|| search::best_guess(black_box(&space), black_box(&memory)))
    });
}

fn bench_solve_cached(c: &mut Criterion) {
    let mut solver = Solver::new(3).unwrap();
    let secret = seq("156");

    // After the first iteration every history prefix is cached, so this
    // measures the replay path the exhaustive benchmark relies on.
    c.bench_function("solve_len3_warm_cache", |b| {
        b.iter(|| {
            solver.reset();
            let mut game = Game::with_secret(secret.clone());
            solver.run_to_completion(&mut game).unwrap()
        })
    });
}

criterion_group!(benches, bench_entropy, bench_best_guess, bench_solve_cached);
criterion_main!(benches);
