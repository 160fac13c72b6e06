/*!
# Rejection ABC Sampler

This module implements rejection-based Approximate Bayesian Computation. Given
observed data, a prior per parameter ([`ProposerSet`]), a simulator
([`Generator`]) and an [`AcceptanceFilter`], the sampler draws an approximate
posterior sample. Each trial repeats these steps until the filter accepts:

1. propose a parameter vector from the priors,
2. simulate a dataset from it,
3. test the simulated data against the observed data at tolerance `epsilon`.

Accepted vectors are returned in trial order.

## Termination

Without a retry cap a trial runs until it is accepted. A filter/`epsilon`
combination that (almost) never accepts makes the run hang. Set
[`RejectionSampler::set_max_attempts`] to turn that into an
[`AbcError::AcceptanceTimeout`].

## Reproducibility

The sampler owns a [`SmallRng`] seeded from a global seed (random unless set
with [`RejectionSampler::set_seed`]). Parallel runs give trial `i` its own
stream seeded with `base + i`, so their output does not depend on scheduling.

## Example Usage

```rust
use mini_abc::filter::{Distance, DistanceFilter};
use mini_abc::proposer::{Proposer, ProposerSet};
use mini_abc::rejection::RejectionSampler;
use rand::rngs::SmallRng;
use rand_distr::{Distribution, Normal};

// Observed data: five draws from N(3, 1).
let observed = vec![2.1, 3.4, 2.9, 3.8, 2.6];
let mean = |x: &[f64]| x.iter().sum::<f64>() / x.len() as f64;

let proposers = ProposerSet::from(vec![Proposer::uniform("mu", -10.0, 10.0).unwrap()]);
let generator = move |params: &[f64], rng: &mut SmallRng| {
    let normal = Normal::new(params[0], 1.0).unwrap();
    let sample: Vec<f64> = normal.sample_iter(rng).take(5).collect();
    vec![mean(&sample)]
};

let mut sampler = RejectionSampler::new(
    vec![mean(&observed)],
    0.01,
    proposers,
    generator,
    DistanceFilter::new(Distance::SumOfSquares),
)
.set_seed(42)
.set_max_attempts(1_000_000);

let samples = sampler.run(100)?;
assert_eq!(samples.len(), 100);
# Ok::<(), mini_abc::AbcError>(())
```
*/

use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::prelude::*;
use std::sync::atomic::AtomicBool;

use crate::core::{Generator, TrialRunner};
use crate::error::{AbcError, Result};
use crate::filter::AcceptanceFilter;
use crate::proposer::ProposerSet;
use crate::stats::RunStats;

/// Sampler settings that can be applied in one go with [`RejectionSampler::with_config`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RejectionConfig {
    /// Global seed. `None` keeps the sampler's current seed.
    pub seed: Option<u64>,
    /// Per-trial retry cap. `None` retries forever.
    pub max_attempts: Option<u64>,
}

impl RejectionConfig {
    /// # Errors
    ///
    /// Returns [`AbcError::InvalidConfig`] if `max_attempts` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_attempts == Some(0) {
            return Err(AbcError::InvalidConfig {
                reason: "max_attempts must be positive",
            });
        }
        Ok(())
    }
}

/**
Rejection sampler for approximate posterior inference.

# Type Parameters
- `G`: the simulator. Must implement [`Generator`].
- `F`: the acceptance filter. Must implement [`AcceptanceFilter`].
*/
pub struct RejectionSampler<G, F> {
    /// Observed data every simulated dataset is compared against.
    pub observed: Vec<f64>,
    /// Tolerance handed to the filter.
    pub epsilon: f64,
    /// One prior per inferred parameter.
    pub proposers: ProposerSet,
    pub generator: G,
    pub filter: F,
    /// Per-trial retry cap.
    pub max_attempts: Option<u64>,
    /// The global random seed.
    pub seed: u64,
    /// The random number generator used by sequential runs.
    pub rng: SmallRng,
    stats: RunStats,
}

impl<G, F> RejectionSampler<G, F>
where
    G: Generator,
    F: AcceptanceFilter,
{
    /**
    Constructs a new sampler with a random seed and no retry cap.

    # Arguments

    * `observed` - The observed data.
    * `epsilon` - Tolerance passed through to `filter`.
    * `proposers` - One prior per parameter; its order fixes the parameter order.
    * `generator` - The simulator.
    * `filter` - The acceptance rule.
    */
    pub fn new(
        observed: Vec<f64>,
        epsilon: f64,
        proposers: ProposerSet,
        generator: G,
        filter: F,
    ) -> Self {
        let seed = thread_rng().gen::<u64>();
        Self {
            observed,
            epsilon,
            proposers,
            generator,
            filter,
            max_attempts: None,
            seed,
            rng: SmallRng::seed_from_u64(seed),
            stats: RunStats::default(),
        }
    }

    /// Sets a new global seed and reseeds the sampler's RNG.
    pub fn set_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.rng = SmallRng::seed_from_u64(seed);
        self
    }

    /// Caps the number of draws per trial. Exceeding it fails the run with
    /// [`AbcError::AcceptanceTimeout`].
    ///
    /// A cap of zero is rejected with [`AbcError::InvalidConfig`] when a run starts,
    /// the same as [`RejectionConfig::validate`] does.
    pub fn set_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = Some(max_attempts);
        self
    }

    /// Applies a validated [`RejectionConfig`].
    pub fn with_config(self, config: RejectionConfig) -> Result<Self> {
        config.validate()?;
        let mut sampler = match config.seed {
            Some(seed) => self.set_seed(seed),
            None => self,
        };
        sampler.max_attempts = config.max_attempts;
        Ok(sampler)
    }

    /// Counters accumulated over every successful run of this sampler.
    ///
    /// A run that fails leaves them unchanged, whatever the run mode.
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    fn runner(&self) -> TrialRunner<'_, G, F> {
        TrialRunner {
            observed: &self.observed,
            epsilon: self.epsilon,
            proposers: &self.proposers,
            generator: &self.generator,
            filter: &self.filter,
            max_attempts: self.max_attempts,
        }
    }

    fn log_start(&self, n: usize, mode: &str) {
        info!(
            "rejection sampling {n} trials ({mode}) over {:?}, epsilon={}, seed={}",
            self.proposers.names(),
            self.epsilon,
            self.seed
        );
    }

    /// The settings currently in force, as a [`RejectionConfig`].
    pub fn config(&self) -> RejectionConfig {
        RejectionConfig {
            seed: Some(self.seed),
            max_attempts: self.max_attempts,
        }
    }

    fn commit(&mut self, run: RunStats) {
        self.stats.trials += run.trials;
        self.stats.attempts += run.attempts;
        info!(
            "accepted {} of {} proposals (acceptance rate {:.4})",
            run.trials,
            run.attempts,
            run.acceptance_rate()
        );
    }

    fn run_with(
        &mut self,
        n: usize,
        pb: Option<&ProgressBar>,
        cancel: Option<&AtomicBool>,
    ) -> Result<Vec<Vec<f64>>> {
        self.config().validate()?;
        let mut run = RunStats::default();
        let mut rng = self.rng.clone();
        let result = self.runner().run_trials(n, &mut rng, &mut run, pb, cancel);
        self.rng = rng;
        if result.is_ok() {
            self.commit(run);
        }
        result
    }

    /**
    Draws `n` accepted parameter vectors, sequentially on the sampler's RNG.

    Returns exactly `n` vectors in trial order, or the first error raised by
    the generator, the filter, or the retry cap. `n == 0` returns an empty
    collection without calling the generator or the filter.
    */
    pub fn run(&mut self, n: usize) -> Result<Vec<Vec<f64>>> {
        self.log_start(n, "sequential");
        self.run_with(n, None, None)
    }

    /// Like [`RejectionSampler::run`], while displaying a progress bar.
    pub fn run_progress(&mut self, n: usize) -> Result<Vec<Vec<f64>>> {
        self.log_start(n, "sequential");
        let pb = ProgressBar::new(n as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{prefix} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("##-"),
        );
        pb.set_prefix("Trials");
        let result = self.run_with(n, Some(&pb), None);
        match &result {
            Ok(_) => pb.finish_with_message("Done!"),
            Err(e) => pb.abandon_with_message(e.to_string()),
        }
        result
    }

    /// Like [`RejectionSampler::run`], but stops between trials once `cancel` is set.
    ///
    /// A cancelled run fails with [`AbcError::Cancelled`]; its partial samples are discarded.
    pub fn run_until(&mut self, n: usize, cancel: &AtomicBool) -> Result<Vec<Vec<f64>>> {
        self.log_start(n, "cancellable");
        self.run_with(n, None, Some(cancel))
    }
}

impl<G, F> RejectionSampler<G, F>
where
    G: Generator + Sync,
    F: AcceptanceFilter + Sync,
{
    /**
    Draws `n` accepted parameter vectors with trials spread over the rayon pool.

    A base seed is drawn from the sampler's RNG; trial `i` uses a private stream
    seeded with `base + i`. The output is identical for a given seed whatever
    the number of threads.
    */
    pub fn run_parallel(&mut self, n: usize) -> Result<Vec<Vec<f64>>> {
        self.log_start(n, "parallel");
        self.config().validate()?;
        let base = self.rng.gen::<u64>();
        let mut run = RunStats::default();
        let result = self.runner().run_trials_parallel(n, base, &mut run);
        if result.is_ok() {
            self.commit(run);
        }
        result
    }
}
