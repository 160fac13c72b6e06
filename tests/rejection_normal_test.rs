//! End-to-end checks of rejection ABC on a normal-mean model.
//!
//! 1. `test_accepted_samples_reverify`: every accepted vector passes the filter again.
//! 2. `test_normal_mean_posterior`: the approximate posterior matches the conjugate one.
//! 3. `test_seed_reproducibility`: a fixed seed fixes the output of every run mode.

use mini_abc::filter::{AcceptanceFilter, Distance, DistanceFilter};
use mini_abc::proposer::{Proposer, ProposerSet};
use mini_abc::rejection::RejectionSampler;
use mini_abc::stats;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    /// Mean of `N_OBS` draws from N(mu, 1).
    const N_OBS: usize = 10;

    fn sample_mean(params: &[f64], rng: &mut SmallRng) -> Vec<f64> {
        let normal = Normal::new(params[0], 1.0).unwrap();
        let sum: f64 = normal.sample_iter(rng).take(N_OBS).sum();
        vec![sum / N_OBS as f64]
    }

    #[test]
    fn test_accepted_samples_reverify() {
        let observed = vec![1.0, 0.5];
        let identity = |p: &[f64], _rng: &mut SmallRng| p.to_vec();
        let filter = DistanceFilter::new(Distance::SumOfSquares);
        let proposers = ProposerSet::from(vec![
            Proposer::normal("mu", 0.0, 1.0).unwrap(),
            Proposer::gamma("sigma", 2.0, 2.0).unwrap(),
        ]);

        let mut abc = RejectionSampler::new(observed.clone(), 0.05, proposers, identity, filter)
            .set_seed(42);
        let samples = abc.run(500).unwrap();

        assert_eq!(samples.len(), 500);
        let mut rng = SmallRng::seed_from_u64(0);
        for s in &samples {
            assert_eq!(s.len(), 2);
            let simulated = identity(s, &mut rng);
            assert!(filter.accept(&observed, &simulated, 0.05).unwrap());
        }
        assert!(abc.stats().acceptance_rate() < 1.0);
    }

    #[test]
    fn test_normal_mean_posterior() {
        const TRIALS: usize = 2_000;
        const PRIOR_SD: f64 = 3.0;
        let y_bar = 2.0;

        // Conjugate posterior of mu given the mean of N_OBS unit-variance draws.
        let prior_prec = 1.0 / (PRIOR_SD * PRIOR_SD);
        let data_prec = N_OBS as f64;
        let post_var = 1.0 / (prior_prec + data_prec);
        let post_mean = post_var * data_prec * y_bar;

        let proposers = ProposerSet::from(vec![Proposer::normal("mu", 0.0, PRIOR_SD).unwrap()]);
        let mut abc = RejectionSampler::new(
            vec![y_bar],
            1e-4,
            proposers,
            sample_mean,
            DistanceFilter::new(Distance::SumOfSquares),
        )
        .set_seed(7);

        let samples = abc.run_parallel(TRIALS).unwrap();
        assert_eq!(samples.len(), TRIALS);

        let mean = stats::posterior_mean(&samples).unwrap().unwrap();
        let std = stats::posterior_std(&samples).unwrap().unwrap();
        assert_abs_diff_eq!(mean[0], post_mean, epsilon = 0.05);
        assert_abs_diff_eq!(std[0], post_var.sqrt(), epsilon = 0.05);

        let cov = stats::posterior_cov(&samples).unwrap().unwrap();
        assert_eq!(cov.shape(), &[1, 1]);
        assert_abs_diff_eq!(cov[[0, 0]], std[0] * std[0], epsilon = 1e-9);
    }

    #[test]
    fn test_seed_reproducibility() {
        let build = |seed| {
            let proposers =
                ProposerSet::from(vec![Proposer::uniform("mu", -5.0, 5.0).unwrap()]);
            RejectionSampler::new(
                vec![1.0],
                0.1,
                proposers,
                sample_mean,
                DistanceFilter::new(Distance::Euclidean),
            )
            .set_seed(seed)
        };

        assert_eq!(build(3).run(100).unwrap(), build(3).run(100).unwrap());
        assert_eq!(
            build(3).run_parallel(100).unwrap(),
            build(3).run_parallel(100).unwrap()
        );
        assert_ne!(build(3).run(100).unwrap(), build(4).run(100).unwrap());
    }
}
