/*!
Proposers draw candidate parameter values from prior distributions.

A [`Proposer`] binds a parameter name to one boxed [`Distribution`]. A
[`ProposerSet`] holds one proposer per inferred parameter; its order fixes which
position of a parameter vector belongs to which parameter. Joint probabilities
assume independence across parameters.

# Examples

```rust
use mini_abc::proposer::{Proposer, ProposerSet};
use rand::rngs::SmallRng;
use rand::SeedableRng;

let proposers = ProposerSet::from(vec![
    Proposer::normal("mu", 9.0, 3.0).unwrap(),
    Proposer::gamma("tau", 2.0, 1.0).unwrap(),
]);
let mut rng = SmallRng::seed_from_u64(42);
let params = proposers.propose(&mut rng);
assert_eq!(params.len(), 2);

let joint = proposers.total_log_prob(&params).unwrap();
assert!(joint.is_finite());
```
*/

use log::warn;
use rand::rngs::SmallRng;

use crate::distributions::{Distribution, Exponential, Gamma, LogNormal, Moment, Normal, Uniform};
use crate::error::{AbcError, Result};

/// A named wrapper around one prior distribution.
#[derive(Debug)]
pub struct Proposer {
    name: String,
    distribution: Box<dyn Distribution>,
}

impl Proposer {
    pub fn new(name: impl Into<String>, distribution: Box<dyn Distribution>) -> Self {
        Self {
            name: name.into(),
            distribution,
        }
    }

    pub fn normal(name: impl Into<String>, mean: f64, std_dev: f64) -> Result<Self> {
        Ok(Self::new(name, Box::new(Normal::new(mean, std_dev)?)))
    }

    pub fn gamma(name: impl Into<String>, shape: f64, rate: f64) -> Result<Self> {
        Ok(Self::new(name, Box::new(Gamma::new(shape, rate)?)))
    }

    pub fn exponential(name: impl Into<String>, rate: f64) -> Result<Self> {
        Ok(Self::new(name, Box::new(Exponential::new(rate)?)))
    }

    pub fn log_normal(name: impl Into<String>, location: f64, scale: f64) -> Result<Self> {
        Ok(Self::new(name, Box::new(LogNormal::new(location, scale)?)))
    }

    pub fn uniform(name: impl Into<String>, low: f64, high: f64) -> Result<Self> {
        Ok(Self::new(name, Box::new(Uniform::new(low, high)?)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn distribution(&self) -> &dyn Distribution {
        self.distribution.as_ref()
    }

    /// Draws one candidate value.
    pub fn propose(&self, rng: &mut SmallRng) -> f64 {
        self.distribution.sample(rng)
    }

    pub fn prob(&self, value: f64) -> f64 {
        self.distribution.density(value)
    }

    pub fn log_prob(&self, value: f64) -> f64 {
        self.distribution.log_density(value)
    }

    pub fn probs(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.prob(v)).collect()
    }

    pub fn log_probs(&self, values: &[f64]) -> Vec<f64> {
        values.iter().map(|&v| self.log_prob(v)).collect()
    }

    pub fn moments(&self, kinds: &[Moment]) -> Vec<f64> {
        self.distribution.moments(kinds)
    }

    /// Like [`Proposer::moments`], but takes moment names such as `"Mean"`.
    ///
    /// Unrecognised names are skipped, so the result can be shorter than `names`.
    pub fn moments_by_name(&self, names: &[&str]) -> Vec<f64> {
        names
            .iter()
            .filter_map(|name| match name.parse::<Moment>() {
                Ok(kind) => Some(self.distribution.moment(kind)),
                Err(e) => {
                    warn!("proposer {:?}: skipping {e}", self.name);
                    None
                }
            })
            .collect()
    }

    /// Replaces the underlying distribution's parameters positionally.
    pub fn update_moments(&mut self, values: &[f64]) -> Result<()> {
        self.distribution.update(values)
    }
}

/// An ordered, fixed-length collection of proposers, one per parameter.
#[derive(Debug, Default)]
pub struct ProposerSet {
    proposers: Vec<Proposer>,
}

impl ProposerSet {
    pub fn new(proposers: Vec<Proposer>) -> Self {
        Self { proposers }
    }

    pub fn len(&self) -> usize {
        self.proposers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proposers.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Proposer> {
        self.proposers.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Proposer> {
        self.proposers.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Proposer> {
        self.proposers.get_mut(index)
    }

    /// Parameter names in set order.
    pub fn names(&self) -> Vec<&str> {
        self.proposers.iter().map(Proposer::name).collect()
    }

    /// Draws one full parameter vector, one value per proposer in set order.
    pub fn propose(&self, rng: &mut SmallRng) -> Vec<f64> {
        self.proposers.iter().map(|p| p.propose(rng)).collect()
    }

    /// Per-dimension densities of `values`.
    ///
    /// Fails with [`AbcError::DimensionMismatch`] if `values` does not have one
    /// entry per proposer.
    pub fn probs(&self, values: &[f64]) -> Result<Vec<f64>> {
        AbcError::check_dims(self.len(), values.len())?;
        Ok(self
            .proposers
            .iter()
            .zip(values)
            .map(|(p, &v)| p.prob(v))
            .collect())
    }

    /// Per-dimension log-densities of `values`.
    pub fn log_probs(&self, values: &[f64]) -> Result<Vec<f64>> {
        AbcError::check_dims(self.len(), values.len())?;
        Ok(self
            .proposers
            .iter()
            .zip(values)
            .map(|(p, &v)| p.log_prob(v))
            .collect())
    }

    /// Joint density, the product of the per-dimension densities.
    pub fn total_prob(&self, values: &[f64]) -> Result<f64> {
        Ok(self.probs(values)?.into_iter().product())
    }

    /// Joint log-density, the sum of the per-dimension log-densities.
    pub fn total_log_prob(&self, values: &[f64]) -> Result<f64> {
        Ok(self.log_probs(values)?.into_iter().sum())
    }

    /// Updates the parameters of the proposer at `index`.
    pub fn update(&mut self, index: usize, values: &[f64]) -> Result<()> {
        let len = self.len();
        let proposer = self
            .proposers
            .get_mut(index)
            .ok_or(AbcError::DimensionMismatch {
                expected: len,
                found: index.saturating_add(1),
            })?;
        proposer.update_moments(values)
    }
}

impl From<Vec<Proposer>> for ProposerSet {
    fn from(proposers: Vec<Proposer>) -> Self {
        Self::new(proposers)
    }
}

impl FromIterator<Proposer> for ProposerSet {
    fn from_iter<I: IntoIterator<Item = Proposer>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ProposerSet {
    type Item = &'a Proposer;
    type IntoIter = std::slice::Iter<'a, Proposer>;

    fn into_iter(self) -> Self::IntoIter {
        self.proposers.iter()
    }
}
