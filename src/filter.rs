/*!
Acceptance filters decide whether simulated data is close enough to the observed data.

A filter sees the observed vector, the simulated vector and a tolerance
`epsilon`. What `epsilon` means is up to the filter; the sampler passes it
through untouched. Any closure `Fn(&[f64], &[f64], f64) -> bool` is a filter.

```rust
use mini_abc::filter::{AcceptanceFilter, Distance, DistanceFilter, EqualFilter};

let y = [0.0, 0.0];
let x = [0.1, 0.1];
let filter = DistanceFilter::new(Distance::SumOfSquares);
assert!(filter.accept(&y, &x, 0.03).unwrap());
assert!(!filter.accept(&y, &x, 0.01).unwrap());

assert!(EqualFilter.accept(&[1.0, 2.0], &[1.0, 2.0], 0.0).unwrap());
```
*/

use crate::error::{AbcError, Result};

/// Decides acceptance of one simulated dataset.
pub trait AcceptanceFilter {
    /// Returns whether `simulated` is accepted against `observed` at tolerance `epsilon`.
    ///
    /// Implementations must fail with [`AbcError::DimensionMismatch`] when the two
    /// vectors have different lengths.
    fn accept(&self, observed: &[f64], simulated: &[f64], epsilon: f64) -> Result<bool>;
}

impl<F> AcceptanceFilter for F
where
    F: Fn(&[f64], &[f64], f64) -> bool,
{
    fn accept(&self, observed: &[f64], simulated: &[f64], epsilon: f64) -> Result<bool> {
        AbcError::check_dims(observed.len(), simulated.len())?;
        Ok(self(observed, simulated, epsilon))
    }
}

/// Accepts only an exact element-wise match. `epsilon` is ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct EqualFilter;

impl AcceptanceFilter for EqualFilter {
    fn accept(&self, observed: &[f64], simulated: &[f64], _epsilon: f64) -> Result<bool> {
        AbcError::check_dims(observed.len(), simulated.len())?;
        Ok(observed.iter().zip(simulated).all(|(y, x)| y == x))
    }
}

/// Summary distance between two observation vectors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Distance {
    /// Σ (yᵢ − xᵢ)²
    #[default]
    SumOfSquares,
    /// √Σ (yᵢ − xᵢ)²
    Euclidean,
    /// Σ |yᵢ − xᵢ|
    Manhattan,
}

/// Computes `kind` between `y` and `x`.
pub fn distance(kind: Distance, y: &[f64], x: &[f64]) -> Result<f64> {
    AbcError::check_dims(y.len(), x.len())?;
    let pairs = y.iter().zip(x);
    Ok(match kind {
        Distance::SumOfSquares => pairs.map(|(a, b)| (a - b) * (a - b)).sum(),
        Distance::Euclidean => pairs.map(|(a, b)| (a - b) * (a - b)).sum::<f64>().sqrt(),
        Distance::Manhattan => pairs.map(|(a, b)| (a - b).abs()).sum(),
    })
}

/// Accepts when the distance between observed and simulated data is strictly below `epsilon`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DistanceFilter {
    pub kind: Distance,
}

impl DistanceFilter {
    pub fn new(kind: Distance) -> Self {
        Self { kind }
    }
}

impl AcceptanceFilter for DistanceFilter {
    fn accept(&self, observed: &[f64], simulated: &[f64], epsilon: f64) -> Result<bool> {
        Ok(distance(self.kind, observed, simulated)? < epsilon)
    }
}
