//! Run counters and summaries of an accepted sample collection.

use ndarray::prelude::*;
use ndarray_stats::CorrelationExt;

use crate::error::{AbcError, Result};

/// Counts of accepted trials and total proposals for one or more runs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub trials: usize,
    pub attempts: u64,
}

impl RunStats {
    /// Records one accepted trial that took `attempts` draws.
    pub fn record(&mut self, attempts: u64) {
        self.trials += 1;
        self.attempts += attempts;
    }

    /// Accepted trials per proposal in `[0, 1]`, or `0` before any proposal.
    pub fn acceptance_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.trials as f64 / self.attempts as f64
        }
    }
}

/// Stacks accepted parameter vectors into an `n × d` array.
pub fn to_array(samples: &[Vec<f64>]) -> Result<Array2<f64>> {
    let dim = samples.first().map_or(0, Vec::len);
    let mut out = Array2::<f64>::zeros((samples.len(), dim));
    for (mut row, sample) in out.rows_mut().into_iter().zip(samples) {
        AbcError::check_dims(dim, sample.len())?;
        row.assign(&ArrayView1::from(sample.as_slice()));
    }
    Ok(out)
}

/// Per-parameter posterior mean. `None` for an empty collection.
pub fn posterior_mean(samples: &[Vec<f64>]) -> Result<Option<Array1<f64>>> {
    Ok(to_array(samples)?.mean_axis(Axis(0)))
}

/// Per-parameter posterior standard deviation (unbiased). `None` with fewer than two samples.
pub fn posterior_std(samples: &[Vec<f64>]) -> Result<Option<Array1<f64>>> {
    let arr = to_array(samples)?;
    if arr.nrows() < 2 {
        return Ok(None);
    }
    Ok(Some(arr.std_axis(Axis(0), 1.0)))
}

/// `d × d` posterior covariance matrix (unbiased). `None` with fewer than two samples.
pub fn posterior_cov(samples: &[Vec<f64>]) -> Result<Option<Array2<f64>>> {
    let arr = to_array(samples)?;
    if arr.nrows() < 2 {
        return Ok(None);
    }
    Ok(arr.t().cov(1.0).ok())
}
