//! The rejection loop shared by every run mode, and the [`Generator`] seam.
//!
//! A trial repeats propose → simulate → test until the filter accepts. A
//! rejected draw is discarded, never perturbed or reused.

use indicatif::ProgressBar;
use log::{debug, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::{AbcError, BoxError, Result};
use crate::filter::AcceptanceFilter;
use crate::proposer::ProposerSet;
use crate::stats::RunStats;

/// Attempts between "trial is still running" warnings.
const WARN_EVERY: u64 = 100_000;

/// A simulator mapping a parameter vector to a synthetic observation vector.
///
/// Randomness must come from `rng` so that runs are reproducible from a seed.
/// Plain closures `Fn(&[f64], &mut SmallRng) -> Vec<f64>` implement this trait;
/// implement it directly for a simulator that can fail.
pub trait Generator {
    fn simulate(&self, params: &[f64], rng: &mut SmallRng)
        -> std::result::Result<Vec<f64>, BoxError>;
}

impl<F> Generator for F
where
    F: Fn(&[f64], &mut SmallRng) -> Vec<f64>,
{
    fn simulate(
        &self,
        params: &[f64],
        rng: &mut SmallRng,
    ) -> std::result::Result<Vec<f64>, BoxError> {
        Ok(self(params, rng))
    }
}

/// Everything a trial needs, borrowed for the duration of a run.
pub struct TrialRunner<'a, G: ?Sized, F: ?Sized> {
    pub observed: &'a [f64],
    pub epsilon: f64,
    pub proposers: &'a ProposerSet,
    pub generator: &'a G,
    pub filter: &'a F,
    /// Per-trial retry cap. `None` retries forever.
    pub max_attempts: Option<u64>,
}

impl<G, F> TrialRunner<'_, G, F>
where
    G: Generator + ?Sized,
    F: AcceptanceFilter + ?Sized,
{
    /// Runs trial `trial` to acceptance. Returns the accepted parameters and the
    /// number of draws it took.
    pub fn run_trial(&self, trial: usize, rng: &mut SmallRng) -> Result<(Vec<f64>, u64)> {
        let mut attempts: u64 = 0;
        loop {
            if let Some(max) = self.max_attempts {
                if attempts >= max {
                    return Err(AbcError::AcceptanceTimeout { trial, attempts });
                }
            }
            attempts += 1;

            let params = self.proposers.propose(rng);
            let simulated = self
                .generator
                .simulate(&params, rng)
                .map_err(AbcError::Generator)?;
            AbcError::check_dims(self.observed.len(), simulated.len())?;

            if self.filter.accept(self.observed, &simulated, self.epsilon)? {
                debug!("trial {trial} accepted after {attempts} attempts: {params:?}");
                return Ok((params, attempts));
            }
            if attempts % WARN_EVERY == 0 {
                warn!(
                    "trial {trial} still unaccepted after {attempts} attempts; \
                     epsilon={} may be too strict",
                    self.epsilon
                );
            }
        }
    }

    /// Runs `n` trials in order on a single RNG stream.
    ///
    /// `cancel` is polled between trials; a set flag aborts with
    /// [`AbcError::Cancelled`] and nothing from an unfinished trial is kept.
    pub fn run_trials(
        &self,
        n: usize,
        rng: &mut SmallRng,
        stats: &mut RunStats,
        pb: Option<&ProgressBar>,
        cancel: Option<&AtomicBool>,
    ) -> Result<Vec<Vec<f64>>> {
        let mut accepted = Vec::with_capacity(n);
        if let Some(pb) = pb {
            pb.set_length(n as u64);
        }

        for trial in 0..n {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                return Err(AbcError::Cancelled {
                    completed: accepted.len(),
                });
            }
            let (params, attempts) = self.run_trial(trial, rng)?;
            stats.record(attempts);
            accepted.push(params);

            if let Some(pb) = pb {
                pb.inc(1);
            }
        }

        Ok(accepted)
    }
}

impl<G, F> TrialRunner<'_, G, F>
where
    G: Generator + Sync + ?Sized,
    F: AcceptanceFilter + Sync + ?Sized,
{
    /// Runs `n` trials on the rayon pool.
    ///
    /// Trial `i` draws from its own stream seeded with `seed + i`, so the
    /// result depends only on `seed`, not on scheduling. Samples keep trial order.
    pub fn run_trials_parallel(
        &self,
        n: usize,
        seed: u64,
        stats: &mut RunStats,
    ) -> Result<Vec<Vec<f64>>> {
        let results: Vec<(Vec<f64>, u64)> = (0..n)
            .into_par_iter()
            .map(|trial| {
                let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(trial as u64));
                self.run_trial(trial, &mut rng)
            })
            .collect::<Result<_>>()?;

        Ok(results
            .into_iter()
            .map(|(params, attempts)| {
                stats.record(attempts);
                params
            })
            .collect())
    }
}

/**
Draws `n` accepted parameter vectors by plain rejection sampling.

This is the bare loop without a retry cap; a filter/`epsilon` combination that
never accepts makes it run forever. Use
[`RejectionSampler`](crate::rejection::RejectionSampler) for a cap, progress
reporting or parallel trials.

```rust
use mini_abc::core::rejection_sample;
use mini_abc::filter::EqualFilter;
use mini_abc::proposer::{Proposer, ProposerSet};
use rand::rngs::SmallRng;
use rand::SeedableRng;

let proposers = ProposerSet::from(vec![Proposer::uniform("p", 0.0, 1.0).unwrap()]);
let generator = |params: &[f64], _rng: &mut SmallRng| vec![(params[0] > 0.5) as u8 as f64];
let mut rng = SmallRng::seed_from_u64(42);

let samples = rejection_sample(10, &[1.0], 0.0, &proposers, &generator, &EqualFilter, &mut rng)?;
assert_eq!(samples.len(), 10);
assert!(samples.iter().all(|s| s[0] > 0.5));
# Ok::<(), mini_abc::AbcError>(())
```
*/
pub fn rejection_sample<G, F>(
    n: usize,
    observed: &[f64],
    epsilon: f64,
    proposers: &ProposerSet,
    generator: &G,
    filter: &F,
    rng: &mut SmallRng,
) -> Result<Vec<Vec<f64>>>
where
    G: Generator + ?Sized,
    F: AcceptanceFilter + ?Sized,
{
    let runner = TrialRunner {
        observed,
        epsilon,
        proposers,
        generator,
        filter,
        max_attempts: None,
    };
    runner.run_trials(n, rng, &mut RunStats::default(), None, None)
}
