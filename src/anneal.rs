//! Simulated annealing over partitions.
//!
//! The search starts from a shuffled, chunked roster and repeatedly swaps
//! two students drawn from two different groups. A swap that does not make
//! the score worse is always kept; a worse one is kept with probability
//! `exp(-delta / temperature)`, where the temperature falls linearly over
//! the iteration budget. The best partition seen is returned.

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, info, trace};

use crate::action::{chunk_partition, Action, Position};
use crate::cache::ScoreCache;
use crate::config::{validate_group_size, AnnealParams, Weights};
use crate::error::ShuffleResult;
use crate::model::condition::{ForbiddenPairs, Score};
use crate::model::entity::Student;
use crate::model::group::Partition;

/// Result of one annealing run.
#[derive(Debug, Clone, Default)]
pub struct Outcome {
    /// Best partition found; never aliases the working state.
    pub partition: Partition,
    pub score: Score,
    /// Score of the first constructed partition.
    pub initial_score: Score,
    /// Iterations consumed, including skipped ones.
    pub iterations: usize,
    pub accepted_moves: usize,
    pub improving_moves: usize,
    /// Accepted moves that made the score worse.
    pub uphill_moves: usize,
    /// Iterations where a picked group was empty.
    pub skipped_moves: usize,
}

struct SwapGenerator;

impl SwapGenerator {
    /// Picks two distinct groups (the same one if there is only one) and a
    /// random member of each. `None` when either group is empty.
    fn next<R: Rng + ?Sized>(partition: &Partition, rng: &mut R) -> Option<Action> {
        let n_groups = partition.len();
        if n_groups == 0 {
            return None;
        }
        let first = rng.gen_range(0..n_groups);
        let second = if n_groups == 1 {
            first
        } else {
            let other = rng.gen_range(0..n_groups - 1);
            if other >= first {
                other + 1
            } else {
                other
            }
        };
        let size1 = partition.groups[first].len();
        let size2 = partition.groups[second].len();
        if size1 == 0 || size2 == 0 {
            return None;
        }
        Some(Action::Swap(
            Position::new(first, rng.gen_range(0..size1)),
            Position::new(second, rng.gen_range(0..size2)),
        ))
    }
}

#[derive(Debug, Clone, Default)]
pub struct Annealer {
    pub params: AnnealParams,
    pub weights: Weights,
}

impl Annealer {
    pub fn new(params: AnnealParams, weights: Weights) -> Annealer {
        Annealer { params, weights }
    }

    pub fn run<R: Rng + ?Sized>(
        &self,
        students: &[Student],
        target_size: usize,
        pairs: &ForbiddenPairs,
        rng: &mut R,
    ) -> ShuffleResult<Outcome> {
        validate_group_size(target_size)?;
        self.params.validate()?;
        self.weights.validate()?;

        if students.is_empty() {
            return Ok(Outcome::default());
        }

        let mut shuffled = students.to_vec();
        shuffled.shuffle(rng);
        let mut partition = chunk_partition(shuffled, target_size)?;
        let mut cache = ScoreCache::create(&partition, pairs, target_size, &self.weights);

        let initial_score = cache.score();
        let mut current_score = initial_score;
        let mut best = partition.clone();
        let mut best_score = initial_score;

        let mut iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut uphill_moves = 0usize;
        let mut skipped_moves = 0usize;

        for step in 0..self.params.iterations {
            if best_score == 0.0 {
                trace!(step, "zero score reached, stopping early");
                break;
            }
            iterations += 1;
            let temperature = self.params.temperature_at(step);

            let Some(action) = SwapGenerator::next(&partition, rng) else {
                skipped_moves += 1;
                continue;
            };
            let touched = action.touched_groups();
            let saved = cache.snapshot(&touched);

            partition.apply(&action)?;
            let new_score = cache.rescore(&partition, &touched);

            let accept = new_score <= current_score
                || rng.gen::<f64>() < (-(new_score - current_score) / temperature).exp();

            if !accept {
                partition.apply(&action)?;
                cache.restore(&saved);
                continue;
            }

            accepted_moves += 1;
            if new_score < current_score {
                improving_moves += 1;
            } else if new_score > current_score {
                uphill_moves += 1;
            }
            current_score = new_score;

            if current_score < best_score {
                best_score = current_score;
                best = partition.clone();
                debug!(step, temperature, score = best_score, "new best partition");
            }
        }

        info!(
            students = students.len(),
            groups = best.len(),
            iterations,
            accepted_moves,
            uphill_moves,
            initial_score,
            best_score,
            "annealing finished"
        );

        Ok(Outcome {
            partition: best,
            score: best_score,
            initial_score,
            iterations,
            accepted_moves,
            improving_moves,
            uphill_moves,
            skipped_moves,
        })
    }

    /// Runs `restarts` independent searches in parallel, seeding run `i`
    /// with `seed + i`. The lowest score wins; ties go to the earlier run.
    pub fn run_restarts(
        &self,
        students: &[Student],
        target_size: usize,
        pairs: &ForbiddenPairs,
        restarts: usize,
        seed: Option<u64>,
    ) -> ShuffleResult<Outcome> {
        let base_seed = seed.unwrap_or_else(rand::random);
        let outcomes = (0..restarts.max(1) as u64)
            .into_par_iter()
            .map(|i| -> ShuffleResult<Outcome> {
                let mut rng = SmallRng::seed_from_u64(base_seed.wrapping_add(i));
                let outcome = self.run(students, target_size, pairs, &mut rng)?;
                debug!(restart = i, score = outcome.score, "restart finished");
                Ok(outcome)
            })
            .collect::<ShuffleResult<Vec<Outcome>>>()?;

        Ok(outcomes
            .into_iter()
            .reduce(|best, outcome| if outcome.score < best.score { outcome } else { best })
            .unwrap_or_default())
    }
}

/// Searches for a low-penalty partition of `students` into groups of
/// `target_size` using the default temperature schedule.
pub fn optimize<R: Rng + ?Sized>(
    students: &[Student],
    target_size: usize,
    pairs: &ForbiddenPairs,
    iterations: usize,
    weights: &Weights,
    rng: &mut R,
) -> ShuffleResult<Outcome> {
    let params = AnnealParams::default().with_iterations(iterations);
    Annealer::new(params, weights.clone()).run(students, target_size, pairs, rng)
}

pub fn optimize_from_entropy(
    students: &[Student],
    target_size: usize,
    pairs: &ForbiddenPairs,
    iterations: usize,
    weights: &Weights,
) -> ShuffleResult<Outcome> {
    let mut rng = SmallRng::from_entropy();
    optimize(students, target_size, pairs, iterations, weights, &mut rng)
}
