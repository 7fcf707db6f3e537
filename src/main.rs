//! Mastermind Bot CLI
//!
//! Interactive command-line interface for the entropy-based solver.

use mastermind_bot::{Feedback, Game, Sequence, Solver, SolverError, DEFAULT_CODE_LENGTH};
use std::io::{self, BufRead, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

const BANNER_TEXT: &str = include_str!("text/banner.txt");
const USAGE_TEXT: &str = include_str!("text/usage.txt");

/// Progress indicator for long searches, animated on a background thread.
struct Spinner {
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl Spinner {
    const FRAMES: [char; 4] = ['|', '/', '-', '\\'];
    const TICK: Duration = Duration::from_millis(100);

    fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);
        let handle = thread::spawn(move || {
            let mut frames = Self::FRAMES.iter().cycle();
            while flag.load(Ordering::Relaxed) {
                if let Some(frame) = frames.next() {
                    print!("\r{} {}", frame, message);
                }
                let _ = io::stdout().flush();
                thread::sleep(Self::TICK);
            }
            // Blank out the spinner line before handing the terminal back.
            print!("\r{:width$}\r", "", width = message.len() + 2);
            let _ = io::stdout().flush();
        });
        Self { running, handle: Some(handle) }
    }

    fn stop(mut self) {
        self.running.store(false, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.running.store(false, Ordering::Relaxed);
    }
}

fn print_banner() {
    for line in BANNER_TEXT.lines().take(7) {
        println!("{}", line);
    }
}

fn print_help() {
    println!("{}", BANNER_TEXT);
}

/// Parse a secret/guess argument against the solver's code length.
fn parse_sequence(s: &str, length: usize) -> Result<Sequence, String> {
    let seq: Sequence = s.parse().map_err(|e: SolverError| e.to_string())?;
    if seq.len() != length {
        return Err(format!("expected {} digits, got {}", length, seq.len()));
    }
    Ok(seq)
}

/// Solve for a known secret, printing each round. Returns the step count.
fn solve_verbose(solver: &mut Solver, secret: Sequence) -> Result<usize, SolverError> {
    solver.reset();
    let mut game = Game::with_secret(secret);

    while !game.is_finished() {
        let guess = solver.next_guess()?;
        let feedback = game.submit_guess(&guess)?;
        solver.apply_feedback(&guess, feedback)?;
        println!(
            "Guess {}: {} -> {}   ({} candidates left)",
            game.steps(),
            guess,
            feedback,
            solver.remaining_count(),
        );
    }

    Ok(game.steps())
}

/// Solve every possible secret and return (guess count, number of secrets)
/// pairs. Sequential on purpose: the memo cache is shared across the
/// play-throughs and absorbs almost all of the search work after the first
/// few secrets.
fn benchmark_distribution(solver: &mut Solver) -> Result<Vec<(usize, usize)>, SolverError> {
    let secrets = solver.space().to_vec();
    let mut counts: Vec<usize> = Vec::with_capacity(secrets.len());

    for secret in secrets {
        solver.reset();
        let mut game = Game::with_secret(secret);
        counts.push(solver.run_to_completion(&mut game)?);
    }

    let max_guesses = counts.iter().copied().max().unwrap_or(0);
    let mut distribution = vec![0usize; max_guesses + 1];
    for count in counts {
        distribution[count] += 1;
    }

    Ok(distribution
        .into_iter()
        .enumerate()
        .filter(|(_, count)| *count > 0)
        .collect())
}

fn print_benchmark_report(distribution: &[(usize, usize)], elapsed: Duration) {
    let total: usize = distribution.iter().map(|(_, c)| c).sum();
    let total_guesses: usize = distribution.iter().map(|(g, c)| g * c).sum();
    let average = total_guesses as f64 / total as f64;

    println!("Results:");
    println!("{}", "=".repeat(40));
    println!();
    println!("Guess distribution:");
    for (guesses, count) in distribution {
        let pct = *count as f64 / total as f64 * 100.0;
        let bar = "█".repeat((*count * 40 / total).max(1));
        println!("  {} guesses: {:>6} ({:>5.1}%) {}", guesses, count, pct, bar);
    }
    println!();
    println!("Average guesses: {:.3}", average);
    println!("Total secrets: {}", total);
    println!("Time elapsed: {:.2?}", elapsed);
}

fn run_interactive(length: usize) {
    print_banner();

    let mut solver = match Solver::new(length) {
        Ok(solver) => solver,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    println!(
        "Code length {}: {} possible secrets.",
        length,
        solver.space().len()
    );
    println!("Type 'help' for commands or 'suggest' to get started.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("> ");
        stdout.flush().unwrap();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).unwrap() == 0 {
            break;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.is_empty() {
            continue;
        }

        match parts[0].to_lowercase().as_str() {
            "help" | "h" | "?" => {
                print_help();
            }
            "quit" | "exit" | "q" => {
                println!("Goodbye!");
                break;
            }
            "suggest" | "s" | "best" => match solver.next_guess() {
                Ok(guess) => {
                    println!();
                    println!("Best guess: {}", guess);
                    println!("Remaining possibilities: {}", solver.remaining_count());
                    println!();
                }
                Err(e) => {
                    println!("{}", e);
                }
            },
            "top" | "t" => {
                let n: usize = parts.get(1).and_then(|s| s.parse().ok()).unwrap_or(5);
                let spinner = Spinner::new("Ranking guesses...");
                let top = solver.top_guesses(n);
                spinner.stop();

                if top.is_empty() {
                    println!("No candidates remaining.");
                } else {
                    println!();
                    println!("Top {} guesses:", top.len());
                    println!(
                        "{:>4} {:>8} {:>8} {:>12} Candidate?",
                        "#", "Guess", "Entropy", "Exp. Remain"
                    );
                    println!("{}", "-".repeat(50));
                    for (i, scored) in top.iter().enumerate() {
                        println!(
                            "{:>4} {:>8} {:>8.3} {:>12.1} {}",
                            i + 1,
                            scored.sequence,
                            scored.entropy,
                            scored.expected_remaining,
                            if scored.is_candidate { "✓" } else { "" }
                        );
                    }
                    println!();
                }
            }
            "feedback" | "f" | "fb" => {
                if parts.len() < 3 {
                    println!("Usage: feedback <guess> <xAyB>");
                    println!("Example: feedback 0123 1A2B");
                    continue;
                }

                let guess = match parse_sequence(parts[1], length) {
                    Ok(g) => g,
                    Err(e) => {
                        println!("Invalid guess: {}", e);
                        continue;
                    }
                };
                let feedback: Feedback = match parts[2].parse() {
                    Ok(f) => f,
                    Err(_) => {
                        println!("Invalid feedback: {}", parts[2]);
                        println!("Use the xAyB form, e.g. 1A2B");
                        continue;
                    }
                };

                let prev_count = solver.remaining_count();
                match solver.apply_feedback(&guess, feedback) {
                    Ok(()) => {
                        let new_count = solver.remaining_count();
                        println!();
                        println!("Guess: {}", guess);
                        println!("Feedback: {}", feedback);
                        println!(
                            "Eliminated {} candidates ({} -> {})",
                            prev_count - new_count,
                            prev_count,
                            new_count
                        );

                        if feedback.is_win(length) {
                            println!();
                            println!("🎉 Congratulations! You solved it!");
                        } else if new_count <= 10 {
                            println!();
                            println!(
                                "Remaining candidates: {:?}",
                                solver
                                    .memory()
                                    .iter()
                                    .map(|s| s.to_string())
                                    .collect::<Vec<_>>()
                            );
                        }
                        println!();
                    }
                    Err(e) => {
                        println!();
                        println!("⚠️  {}", e);
                        println!("This might indicate an error. Use 'reset' to start over.");
                        println!();
                    }
                }
            }
            "remaining" | "r" | "left" => {
                let remaining = solver.memory();
                println!();
                println!("Remaining possibilities: {}", remaining.len());
                if remaining.len() <= 20 {
                    for (i, seq) in remaining.iter().enumerate() {
                        if i > 0 && i % 10 == 0 {
                            println!();
                        }
                        print!("{:>8}", seq.to_string());
                    }
                    println!();
                }
                println!();
            }
            "solve" => {
                if parts.len() < 2 {
                    println!("Usage: solve <secret>");
                    continue;
                }

                let secret = match parse_sequence(parts[1], length) {
                    Ok(s) => s,
                    Err(e) => {
                        println!("Invalid secret: {}", e);
                        continue;
                    }
                };

                println!();
                println!("Solving for: {}", secret);
                println!();

                match solve_verbose(&mut solver, secret) {
                    Ok(steps) => {
                        println!();
                        println!("✓ Solved in {} guesses!", steps);
                        println!();
                    }
                    Err(e) => {
                        println!("{}", e);
                    }
                }
                solver.reset();
            }
            "play" => {
                let game = match Game::new(length) {
                    Ok(g) => g,
                    Err(e) => {
                        println!("{}", e);
                        continue;
                    }
                };
                let secret = game.peek_secret().clone();
                println!();
                println!("Secret drawn at random. Solving...");
                println!();
                match solve_verbose(&mut solver, secret) {
                    Ok(steps) => {
                        println!();
                        println!("✓ Solved in {} guesses!", steps);
                        println!();
                    }
                    Err(e) => {
                        println!("{}", e);
                    }
                }
                solver.reset();
            }
            "benchmark" | "bench" => {
                println!();
                println!(
                    "Running benchmark on all {} secrets...",
                    solver.space().len()
                );

                let spinner = Spinner::new("Computing...");
                let start = std::time::Instant::now();
                let result = benchmark_distribution(&mut solver);
                let elapsed = start.elapsed();
                spinner.stop();

                match result {
                    Ok(distribution) => {
                        print_benchmark_report(&distribution, elapsed);
                        println!("Cached histories: {}", solver.cache().len());
                        println!();
                    }
                    Err(e) => {
                        println!("{}", e);
                    }
                }
                solver.reset();
            }
            "reset" => {
                solver.reset();
                println!(
                    "Reset to initial state. {} candidates available.",
                    solver.remaining_count()
                );
            }
            _ => {
                println!("Unknown command: {}", parts[0]);
                println!("Type 'help' for available commands.");
            }
        }
    }
}

/// Pull `--digits N` out of the argument list, returning the code length
/// and the remaining arguments.
fn parse_digits(args: Vec<String>) -> Result<(usize, Vec<String>), String> {
    let mut length = DEFAULT_CODE_LENGTH;
    let mut rest = Vec::new();
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        if arg == "--digits" {
            let value = iter.next().ok_or("--digits requires a value")?;
            length = value
                .parse()
                .map_err(|_| format!("invalid --digits value: {}", value))?;
        } else {
            rest.push(arg);
        }
    }

    Ok((length, rest))
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (length, args) = match parse_digits(args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if args.is_empty() {
        run_interactive(length);
        return;
    }

    match args[0].as_str() {
        "--help" | "-h" => {
            println!("{}", USAGE_TEXT);
        }
        "solve" | "play" => {
            let mut solver = match Solver::new(length) {
                Ok(solver) => solver,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            };

            let secret = if args[0] == "play" {
                match Game::new(length) {
                    Ok(game) => game.peek_secret().clone(),
                    Err(e) => {
                        eprintln!("{}", e);
                        std::process::exit(1);
                    }
                }
            } else {
                let Some(arg) = args.get(1) else {
                    eprintln!("Usage: mastermind-bot solve <secret>");
                    std::process::exit(1);
                };
                match parse_sequence(arg, length) {
                    Ok(secret) => secret,
                    Err(e) => {
                        eprintln!("Invalid secret: {}", e);
                        std::process::exit(1);
                    }
                }
            };

            println!("Solving for: {}", secret);
            println!();

            match solve_verbose(&mut solver, secret) {
                Ok(steps) => {
                    println!();
                    println!("Solved in {} guesses.", steps);
                }
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }
        "benchmark" | "bench" => {
            let mut solver = match Solver::new(length) {
                Ok(solver) => solver,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            };

            let spinner = Spinner::new("Running benchmark...");
            let start = std::time::Instant::now();
            let result = benchmark_distribution(&mut solver);
            let elapsed = start.elapsed();
            spinner.stop();

            match result {
                Ok(distribution) => {
                    print_benchmark_report(&distribution, elapsed);
                }
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }
        "suggest" => {
            let mut solver = match Solver::new(length) {
                Ok(solver) => solver,
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            };

            match solver.next_guess() {
                Ok(guess) => {
                    println!("Best opening guess: {}", guess);
                }
                Err(e) => {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
            }
        }
        other => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Use --help for usage information.");
            std::process::exit(1);
        }
    }
}
