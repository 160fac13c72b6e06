//! A small ABC demo: infers the mean and standard deviation of normally distributed
//! data from its summary statistics, then writes the accepted samples to CSV.

use log::{info, Level, LevelFilter, Metadata, Record};
use mini_abc::io::csv::{write_delimited, Delimiter};
use mini_abc::stats::{posterior_mean, posterior_std};
use mini_abc::{
    BoxError, Distance, DistanceFilter, Generator, Proposer, ProposerSet, RejectionSampler,
};
use rand::rngs::SmallRng;
use rand_distr::{Distribution, Normal};
use std::error::Error;

/// Prints records to stdout, errors to stderr.
struct MinimalLogger;

impl log::Log for MinimalLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if record.level() > Level::Error {
            println!("{:<5} {}", record.level(), record.args())
        } else {
            eprintln!("{:<5} {}", record.level(), record.args())
        }
    }

    fn flush(&self) {}
}

static LOGGER: MinimalLogger = MinimalLogger;

/// Draws `n` values from N(mu, sigma) and reduces them to `[mean, std_dev]`.
struct NormalSummary {
    n: usize,
}

impl Generator for NormalSummary {
    fn simulate(&self, params: &[f64], rng: &mut SmallRng) -> Result<Vec<f64>, BoxError> {
        let normal = Normal::new(params[0], params[1])?;
        let draws: Vec<f64> = normal.sample_iter(rng).take(self.n).collect();
        Ok(summarise(&draws).to_vec())
    }
}

fn summarise(data: &[f64]) -> [f64; 2] {
    let n = data.len() as f64;
    let mean = data.iter().sum::<f64>() / n;
    let var = data.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    [mean, var.sqrt()]
}

/// Main entry point: builds the priors, runs the rejection sampler with a progress
/// bar, logs a posterior summary and saves the samples.
fn main() -> Result<(), Box<dyn Error>> {
    const TRIALS: usize = 2_000;
    const EPSILON: f64 = 0.01;
    const SEED: u64 = 42;

    log::set_logger(&LOGGER).map_err(|e| e.to_string())?;
    log::set_max_level(LevelFilter::Info);

    let data = [
        -0.97282116, 0.49710874, -0.08851066, 0.64683817, 0.16645932, -0.98981693, -0.40585841,
        -0.70108671, 0.25486693, -0.06730565, -0.5142657, -0.10126306, 0.67930431, 0.8177273,
        0.54188112, -0.59839544, 0.27969346, -0.69082318, -0.93346952, 0.68355628,
    ];
    let observed = summarise(&data);
    info!(
        "observed summary: mean={:.4}, std_dev={:.4}",
        observed[0], observed[1]
    );

    let proposers = ProposerSet::from(vec![
        Proposer::normal("mu", 0.0, 1.0)?,
        Proposer::gamma("sigma", 2.0, 2.0)?,
    ]);

    let mut sampler = RejectionSampler::new(
        observed.to_vec(),
        EPSILON,
        proposers,
        NormalSummary { n: data.len() },
        DistanceFilter::new(Distance::SumOfSquares),
    )
    .set_seed(SEED)
    .set_max_attempts(10_000_000);

    let samples = sampler.run_progress(TRIALS)?;

    let names = sampler.proposers.names();
    if let (Some(mean), Some(std)) = (posterior_mean(&samples)?, posterior_std(&samples)?) {
        for (i, name) in names.iter().enumerate() {
            info!("{name}: posterior mean {:.4}, sd {:.4}", mean[i], std[i]);
        }
    }
    info!(
        "acceptance rate: {:.5}",
        sampler.stats().acceptance_rate()
    );

    write_delimited(&samples, "abc_samples.csv", Delimiter::Comma, Some(names.as_slice()))?;
    info!("saved {} samples to abc_samples.csv", samples.len());

    Ok(())
}
