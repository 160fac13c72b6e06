/*!
Univariate probability distributions used as priors and proposal distributions.

Every family implements the object-safe [`Distribution`] trait, so a set of
priors can mix families freely behind `Box<dyn Distribution>`. Randomness is
never ambient: [`Distribution::sample`] draws from the caller's [`SmallRng`].

Log-densities are evaluated in closed form in log space, so they remain finite
far out in the tails where the density itself underflows to zero.

# Examples

```rust
use mini_abc::distributions::{Distribution, Moment, Normal};
use rand::rngs::SmallRng;
use rand::SeedableRng;

let mut normal = Normal::new(9.0, 3.0).unwrap();
let mut rng = SmallRng::seed_from_u64(42);
let draw = normal.sample(&mut rng);
println!("draw: {draw}, log-density: {}", normal.log_density(draw));

assert_eq!(normal.moments(&[Moment::Mean, Moment::StdDev]), vec![9.0, 3.0]);

// A negative standard deviation is rejected and leaves the state untouched.
assert!(normal.update(&[0.0, -1.0]).is_err());
assert_eq!(normal.params(), vec![9.0, 3.0]);
```
*/

use rand::rngs::SmallRng;
use rand_distr::Distribution as _;
use statrs::consts::LN_SQRT_2PI;
use statrs::function::gamma::ln_gamma;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::{AbcError, Result};

/// Summary moments a [`Distribution`] can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Moment {
    Mean,
    Variance,
    Skewness,
    /// Excess kurtosis (zero for the normal distribution).
    Kurtosis,
    StdDev,
    /// Standard deviation divided by the mean.
    RelStdDev,
}

impl Moment {
    pub const ALL: [Moment; 6] = [
        Moment::Mean,
        Moment::Variance,
        Moment::Skewness,
        Moment::Kurtosis,
        Moment::StdDev,
        Moment::RelStdDev,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Moment::Mean => "Mean",
            Moment::Variance => "Variance",
            Moment::Skewness => "Skewness",
            Moment::Kurtosis => "Kurtosis",
            Moment::StdDev => "StdDev",
            Moment::RelStdDev => "RelStdDev",
        }
    }
}

impl fmt::Display for Moment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown moment {0:?}")]
pub struct UnknownMoment(pub String);

impl FromStr for Moment {
    type Err = UnknownMoment;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Moment::ALL
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| UnknownMoment(s.to_string()))
    }
}

/// A univariate distribution with mutable, domain-checked parameters.
pub trait Distribution: fmt::Debug + Send + Sync {
    /// Human-readable family name, e.g. `"Normal"`.
    fn family(&self) -> &'static str;

    /// Current defining parameters, in the positional order accepted by [`Distribution::update`].
    fn params(&self) -> Vec<f64>;

    /// Draws one value using `rng`.
    fn sample(&self, rng: &mut SmallRng) -> f64;

    /// Natural log of the density at `x`; `-inf` outside the support.
    fn log_density(&self, x: f64) -> f64;

    /// Density at `x`.
    fn density(&self, x: f64) -> f64 {
        self.log_density(x).exp()
    }

    fn mean(&self) -> f64;

    fn variance(&self) -> f64;

    fn skewness(&self) -> f64;

    /// Excess kurtosis.
    fn kurtosis(&self) -> f64;

    fn moment(&self, kind: Moment) -> f64 {
        match kind {
            Moment::Mean => self.mean(),
            Moment::Variance => self.variance(),
            Moment::Skewness => self.skewness(),
            Moment::Kurtosis => self.kurtosis(),
            Moment::StdDev => self.variance().sqrt(),
            Moment::RelStdDev => self.variance().sqrt() / self.mean(),
        }
    }

    /// Returns the requested moments in request order.
    fn moments(&self, kinds: &[Moment]) -> Vec<f64> {
        kinds.iter().map(|&kind| self.moment(kind)).collect()
    }

    /// Replaces the first `values.len()` parameters positionally.
    ///
    /// Fails with [`AbcError::InvalidParameter`] if there are more values than
    /// parameters or if the new parameters leave the family's domain. On
    /// failure the distribution is left unchanged.
    fn update(&mut self, values: &[f64]) -> Result<()>;
}

/// Overlays `values` onto `current`, position by position.
fn overlay<const N: usize>(
    family: &'static str,
    mut current: [f64; N],
    values: &[f64],
) -> Result<[f64; N]> {
    if values.len() > N {
        return Err(AbcError::invalid(
            family,
            format!("expected at most {N} values, got {}", values.len()),
        ));
    }
    current[..values.len()].copy_from_slice(values);
    Ok(current)
}

fn check_finite(family: &'static str, name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AbcError::invalid(family, format!("{name} must be finite, got {value}")))
    }
}

fn check_positive(family: &'static str, name: &str, value: f64) -> Result<f64> {
    check_finite(family, name, value)?;
    if value > 0.0 {
        Ok(value)
    } else {
        Err(AbcError::invalid(family, format!("{name} must be positive, got {value}")))
    }
}

/**
Normal distribution parameterised by mean and standard deviation.

```rust
use mini_abc::distributions::{Distribution, Normal};

let normal = Normal::new(0.0, 1.0).unwrap();
assert!((normal.density(0.0) - 0.3989422804014327).abs() < 1e-12);
```
*/
#[derive(Debug, Clone)]
pub struct Normal {
    mean: f64,
    std_dev: f64,
    sampler: rand_distr::Normal<f64>,
}

impl Normal {
    const FAMILY: &'static str = "Normal";

    pub fn new(mean: f64, std_dev: f64) -> Result<Self> {
        let mean = check_finite(Self::FAMILY, "mean", mean)?;
        let std_dev = check_positive(Self::FAMILY, "standard deviation", std_dev)?;
        let sampler = rand_distr::Normal::new(mean, std_dev)
            .map_err(|e| AbcError::invalid(Self::FAMILY, e.to_string()))?;
        Ok(Self {
            mean,
            std_dev,
            sampler,
        })
    }
}

impl Distribution for Normal {
    fn family(&self) -> &'static str {
        Self::FAMILY
    }

    fn params(&self) -> Vec<f64> {
        vec![self.mean, self.std_dev]
    }

    fn sample(&self, rng: &mut SmallRng) -> f64 {
        self.sampler.sample(rng)
    }

    fn log_density(&self, x: f64) -> f64 {
        let z = (x - self.mean) / self.std_dev;
        -0.5 * z * z - self.std_dev.ln() - LN_SQRT_2PI
    }

    fn mean(&self) -> f64 {
        self.mean
    }

    fn variance(&self) -> f64 {
        self.std_dev * self.std_dev
    }

    fn skewness(&self) -> f64 {
        0.0
    }

    fn kurtosis(&self) -> f64 {
        0.0
    }

    fn update(&mut self, values: &[f64]) -> Result<()> {
        let [mean, std_dev] = overlay(Self::FAMILY, [self.mean, self.std_dev], values)?;
        *self = Self::new(mean, std_dev)?;
        Ok(())
    }
}

/// Gamma distribution parameterised by shape `k` and rate `β`.
#[derive(Debug, Clone)]
pub struct Gamma {
    shape: f64,
    rate: f64,
    sampler: rand_distr::Gamma<f64>,
}

impl Gamma {
    const FAMILY: &'static str = "Gamma";

    pub fn new(shape: f64, rate: f64) -> Result<Self> {
        let shape = check_positive(Self::FAMILY, "shape", shape)?;
        let rate = check_positive(Self::FAMILY, "rate", rate)?;
        // rand_distr parameterises by scale.
        let sampler = rand_distr::Gamma::new(shape, 1.0 / rate)
            .map_err(|e| AbcError::invalid(Self::FAMILY, e.to_string()))?;
        Ok(Self {
            shape,
            rate,
            sampler,
        })
    }
}

impl Distribution for Gamma {
    fn family(&self) -> &'static str {
        Self::FAMILY
    }

    fn params(&self) -> Vec<f64> {
        vec![self.shape, self.rate]
    }

    fn sample(&self, rng: &mut SmallRng) -> f64 {
        self.sampler.sample(rng)
    }

    fn log_density(&self, x: f64) -> f64 {
        if x < 0.0 {
            return f64::NEG_INFINITY;
        }
        if x == 0.0 {
            return match self.shape.partial_cmp(&1.0) {
                Some(std::cmp::Ordering::Less) => f64::INFINITY,
                Some(std::cmp::Ordering::Equal) => self.rate.ln(),
                _ => f64::NEG_INFINITY,
            };
        }
        self.shape * self.rate.ln() - ln_gamma(self.shape) + (self.shape - 1.0) * x.ln()
            - self.rate * x
    }

    fn mean(&self) -> f64 {
        self.shape / self.rate
    }

    fn variance(&self) -> f64 {
        self.shape / (self.rate * self.rate)
    }

    fn skewness(&self) -> f64 {
        2.0 / self.shape.sqrt()
    }

    fn kurtosis(&self) -> f64 {
        6.0 / self.shape
    }

    fn update(&mut self, values: &[f64]) -> Result<()> {
        let [shape, rate] = overlay(Self::FAMILY, [self.shape, self.rate], values)?;
        *self = Self::new(shape, rate)?;
        Ok(())
    }
}

/// Exponential distribution parameterised by rate `λ`.
#[derive(Debug, Clone)]
pub struct Exponential {
    rate: f64,
    sampler: rand_distr::Exp<f64>,
}

impl Exponential {
    const FAMILY: &'static str = "Exponential";

    pub fn new(rate: f64) -> Result<Self> {
        let rate = check_positive(Self::FAMILY, "rate", rate)?;
        let sampler = rand_distr::Exp::new(rate)
            .map_err(|e| AbcError::invalid(Self::FAMILY, e.to_string()))?;
        Ok(Self { rate, sampler })
    }
}

impl Distribution for Exponential {
    fn family(&self) -> &'static str {
        Self::FAMILY
    }

    fn params(&self) -> Vec<f64> {
        vec![self.rate]
    }

    fn sample(&self, rng: &mut SmallRng) -> f64 {
        self.sampler.sample(rng)
    }

    fn log_density(&self, x: f64) -> f64 {
        if x < 0.0 {
            f64::NEG_INFINITY
        } else {
            self.rate.ln() - self.rate * x
        }
    }

    fn mean(&self) -> f64 {
        1.0 / self.rate
    }

    fn variance(&self) -> f64 {
        1.0 / (self.rate * self.rate)
    }

    fn skewness(&self) -> f64 {
        2.0
    }

    fn kurtosis(&self) -> f64 {
        6.0
    }

    fn update(&mut self, values: &[f64]) -> Result<()> {
        let [rate] = overlay(Self::FAMILY, [self.rate], values)?;
        *self = Self::new(rate)?;
        Ok(())
    }
}

/// Log-normal distribution: `ln X ~ Normal(location, scale)`.
#[derive(Debug, Clone)]
pub struct LogNormal {
    location: f64,
    scale: f64,
    sampler: rand_distr::LogNormal<f64>,
}

impl LogNormal {
    const FAMILY: &'static str = "LogNormal";

    pub fn new(location: f64, scale: f64) -> Result<Self> {
        let location = check_finite(Self::FAMILY, "location", location)?;
        let scale = check_positive(Self::FAMILY, "scale", scale)?;
        let sampler = rand_distr::LogNormal::new(location, scale)
            .map_err(|e| AbcError::invalid(Self::FAMILY, e.to_string()))?;
        Ok(Self {
            location,
            scale,
            sampler,
        })
    }
}

impl Distribution for LogNormal {
    fn family(&self) -> &'static str {
        Self::FAMILY
    }

    fn params(&self) -> Vec<f64> {
        vec![self.location, self.scale]
    }

    fn sample(&self, rng: &mut SmallRng) -> f64 {
        self.sampler.sample(rng)
    }

    fn log_density(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return f64::NEG_INFINITY;
        }
        let ln_x = x.ln();
        let z = (ln_x - self.location) / self.scale;
        -0.5 * z * z - ln_x - self.scale.ln() - LN_SQRT_2PI
    }

    fn mean(&self) -> f64 {
        (self.location + 0.5 * self.scale * self.scale).exp()
    }

    fn variance(&self) -> f64 {
        let s2 = self.scale * self.scale;
        s2.exp_m1() * (2.0 * self.location + s2).exp()
    }

    fn skewness(&self) -> f64 {
        let s2 = self.scale * self.scale;
        (s2.exp() + 2.0) * s2.exp_m1().sqrt()
    }

    fn kurtosis(&self) -> f64 {
        let s2 = self.scale * self.scale;
        (4.0 * s2).exp() + 2.0 * (3.0 * s2).exp() + 3.0 * (2.0 * s2).exp() - 6.0
    }

    fn update(&mut self, values: &[f64]) -> Result<()> {
        let [location, scale] = overlay(Self::FAMILY, [self.location, self.scale], values)?;
        *self = Self::new(location, scale)?;
        Ok(())
    }
}

/// Continuous uniform distribution on `[low, high]`.
#[derive(Debug, Clone)]
pub struct Uniform {
    low: f64,
    high: f64,
    sampler: rand_distr::Uniform<f64>,
}

impl Uniform {
    const FAMILY: &'static str = "Uniform";

    pub fn new(low: f64, high: f64) -> Result<Self> {
        let low = check_finite(Self::FAMILY, "low", low)?;
        let high = check_finite(Self::FAMILY, "high", high)?;
        if low >= high {
            return Err(AbcError::invalid(
                Self::FAMILY,
                format!("low ({low}) must be smaller than high ({high})"),
            ));
        }
        if !(high - low).is_finite() {
            return Err(AbcError::invalid(
                Self::FAMILY,
                format!("width of [{low}, {high}] overflows"),
            ));
        }
        Ok(Self {
            low,
            high,
            sampler: rand_distr::Uniform::new(low, high),
        })
    }
}

impl Distribution for Uniform {
    fn family(&self) -> &'static str {
        Self::FAMILY
    }

    fn params(&self) -> Vec<f64> {
        vec![self.low, self.high]
    }

    fn sample(&self, rng: &mut SmallRng) -> f64 {
        self.sampler.sample(rng)
    }

    fn log_density(&self, x: f64) -> f64 {
        if (self.low..=self.high).contains(&x) {
            -(self.high - self.low).ln()
        } else {
            f64::NEG_INFINITY
        }
    }

    fn mean(&self) -> f64 {
        0.5 * (self.low + self.high)
    }

    fn variance(&self) -> f64 {
        let width = self.high - self.low;
        width * width / 12.0
    }

    fn skewness(&self) -> f64 {
        0.0
    }

    fn kurtosis(&self) -> f64 {
        -1.2
    }

    fn update(&mut self, values: &[f64]) -> Result<()> {
        let [low, high] = overlay(Self::FAMILY, [self.low, self.high], values)?;
        *self = Self::new(low, high)?;
        Ok(())
    }
}

#[cfg(test)]
mod distributions_tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use statrs::distribution::Continuous;

    fn families() -> Vec<Box<dyn Distribution>> {
        vec![
            Box::new(Normal::new(9.0, 3.0).unwrap()),
            Box::new(Gamma::new(2.5, 0.5).unwrap()),
            Box::new(Exponential::new(1.5).unwrap()),
            Box::new(LogNormal::new(0.2, 0.7).unwrap()),
            Box::new(Uniform::new(-1.0, 3.0).unwrap()),
        ]
    }

    #[test]
    fn log_density_is_log_of_density() {
        let points = [-2.0, 0.0, 0.3, 1.0, 2.5, 7.0, 12.0];
        for distr in families() {
            for &x in &points {
                let p = distr.density(x);
                if p > 0.0 {
                    assert_abs_diff_eq!(distr.log_density(x), p.ln(), epsilon = 1e-12);
                } else {
                    assert_eq!(distr.log_density(x), f64::NEG_INFINITY);
                }
            }
        }
    }

    #[test]
    fn log_density_stays_finite_when_density_underflows() {
        let normal = Normal::new(0.0, 1.0).unwrap();
        assert_eq!(normal.density(40.0), 0.0);
        let lp = normal.log_density(40.0);
        assert!(lp.is_finite());
        assert_abs_diff_eq!(lp, -800.0 - LN_SQRT_2PI, epsilon = 1e-9);

        let exp = Exponential::new(2.0).unwrap();
        assert_eq!(exp.density(1_000.0), 0.0);
        assert_abs_diff_eq!(exp.log_density(1_000.0), 2.0_f64.ln() - 2_000.0);
    }

    #[test]
    fn densities_match_statrs() {
        let normal = Normal::new(9.0, 3.0).unwrap();
        let gamma = Gamma::new(2.5, 0.5).unwrap();
        let exp = Exponential::new(1.5).unwrap();
        let lognormal = LogNormal::new(0.2, 0.7).unwrap();
        let uniform = Uniform::new(-1.0, 3.0).unwrap();

        let ref_normal = statrs::distribution::Normal::new(9.0, 3.0).unwrap();
        let ref_gamma = statrs::distribution::Gamma::new(2.5, 0.5).unwrap();
        let ref_exp = statrs::distribution::Exp::new(1.5).unwrap();
        let ref_lognormal = statrs::distribution::LogNormal::new(0.2, 0.7).unwrap();
        let ref_uniform = statrs::distribution::Uniform::new(-1.0, 3.0).unwrap();

        for x in [0.1, 0.5, 1.0, 2.0, 4.0, 9.0, 15.0] {
            assert_abs_diff_eq!(normal.log_density(x), ref_normal.ln_pdf(x), epsilon = 1e-10);
            assert_abs_diff_eq!(gamma.log_density(x), ref_gamma.ln_pdf(x), epsilon = 1e-10);
            assert_abs_diff_eq!(exp.log_density(x), ref_exp.ln_pdf(x), epsilon = 1e-10);
            assert_abs_diff_eq!(
                lognormal.log_density(x),
                ref_lognormal.ln_pdf(x),
                epsilon = 1e-10
            );
            assert_abs_diff_eq!(uniform.density(x), ref_uniform.pdf(x), epsilon = 1e-12);
        }
    }

    #[test]
    fn gamma_density_at_zero() {
        assert_eq!(Gamma::new(0.5, 1.0).unwrap().log_density(0.0), f64::INFINITY);
        assert_abs_diff_eq!(Gamma::new(1.0, 3.0).unwrap().density(0.0), 3.0, epsilon = 1e-12);
        assert_eq!(Gamma::new(2.0, 1.0).unwrap().density(0.0), 0.0);
    }

    #[test]
    fn moments_in_request_order() {
        let gamma = Gamma::new(4.0, 2.0).unwrap();
        let m = gamma.moments(&[
            Moment::Kurtosis,
            Moment::Mean,
            Moment::Variance,
            Moment::Skewness,
            Moment::StdDev,
            Moment::RelStdDev,
        ]);
        assert_eq!(m.len(), 6);
        assert_abs_diff_eq!(m[0], 1.5);
        assert_abs_diff_eq!(m[1], 2.0);
        assert_abs_diff_eq!(m[2], 1.0);
        assert_abs_diff_eq!(m[3], 1.0);
        assert_abs_diff_eq!(m[4], 1.0);
        assert_abs_diff_eq!(m[5], 0.5);
    }

    #[test]
    fn lognormal_moments_match_statrs() {
        use statrs::statistics::Distribution as _;
        let ours = LogNormal::new(0.2, 0.7).unwrap();
        let reference = statrs::distribution::LogNormal::new(0.2, 0.7).unwrap();
        assert_abs_diff_eq!(ours.mean(), reference.mean().unwrap(), epsilon = 1e-12);
        assert_abs_diff_eq!(ours.variance(), reference.variance().unwrap(), epsilon = 1e-12);
        assert_abs_diff_eq!(ours.skewness(), reference.skewness().unwrap(), epsilon = 1e-10);
    }

    #[test]
    fn moment_queries_are_idempotent() {
        let normal = Normal::new(1.5, 0.3).unwrap();
        let first = normal.moments(&[Moment::Mean]);
        let second = normal.moments(&[Moment::Mean]);
        assert_eq!(first, second);
        assert_eq!(first, vec![1.5]);
    }

    #[test]
    fn moment_names_parse() {
        for moment in Moment::ALL {
            assert_eq!(moment.name().parse::<Moment>(), Ok(moment));
        }
        assert_eq!(
            "Median".parse::<Moment>(),
            Err(UnknownMoment("Median".to_string()))
        );
    }

    #[test]
    fn update_replaces_parameters_positionally() {
        let mut normal = Normal::new(0.0, 1.0).unwrap();
        normal.update(&[5.0]).unwrap();
        assert_eq!(normal.params(), vec![5.0, 1.0]);
        normal.update(&[2.0, 0.5]).unwrap();
        assert_eq!(normal.params(), vec![2.0, 0.5]);
        normal.update(&[]).unwrap();
        assert_eq!(normal.params(), vec![2.0, 0.5]);
    }

    #[test]
    fn invalid_update_leaves_state_unchanged() {
        let mut normal = Normal::new(0.0, 1.0).unwrap();
        let err = normal.update(&[3.0, -1.0]).unwrap_err();
        assert!(matches!(err, AbcError::InvalidParameter { family: "Normal", .. }));
        assert_eq!(normal.params(), vec![0.0, 1.0]);

        let mut gamma = Gamma::new(2.0, 1.0).unwrap();
        assert!(gamma.update(&[2.0, 0.0]).is_err());
        assert!(gamma.update(&[f64::NAN]).is_err());
        assert_eq!(gamma.params(), vec![2.0, 1.0]);

        let mut exp = Exponential::new(1.0).unwrap();
        assert!(exp.update(&[1.0, 2.0]).is_err());
        assert_eq!(exp.params(), vec![1.0]);

        let mut uniform = Uniform::new(0.0, 1.0).unwrap();
        assert!(uniform.update(&[2.0]).is_err());
        assert_eq!(uniform.params(), vec![0.0, 1.0]);
    }

    #[test]
    fn invalid_construction_is_rejected() {
        assert!(Normal::new(0.0, 0.0).is_err());
        assert!(Normal::new(f64::INFINITY, 1.0).is_err());
        assert!(Gamma::new(-1.0, 1.0).is_err());
        assert!(Exponential::new(0.0).is_err());
        assert!(LogNormal::new(0.0, -0.1).is_err());
        assert!(Uniform::new(1.0, 1.0).is_err());
    }

    #[test]
    fn overflowing_uniform_width_is_rejected() {
        assert!(matches!(
            Uniform::new(-1e308, 1e308),
            Err(AbcError::InvalidParameter { family: "Uniform", .. })
        ));
        let mut uniform = Uniform::new(0.0, 1.0).unwrap();
        assert!(matches!(
            uniform.update(&[-1e308, 1e308]),
            Err(AbcError::InvalidParameter { .. })
        ));
        assert_eq!(uniform.params(), vec![0.0, 1.0]);
    }

    #[test]
    fn sample_moments_approach_distribution_moments() {
        const N: usize = 200_000;
        let mut rng = SmallRng::seed_from_u64(42);
        for distr in families() {
            let draws: Vec<f64> = (0..N).map(|_| distr.sample(&mut rng)).collect();
            let mean = draws.iter().sum::<f64>() / N as f64;
            let var = draws.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (N - 1) as f64;
            let sd = distr.moment(Moment::StdDev);
            assert!(
                (mean - distr.mean()).abs() < 0.05 * sd.max(1.0),
                "{}: sample mean {mean} vs {}",
                distr.family(),
                distr.mean()
            );
            assert!(
                (var - distr.variance()).abs() < 0.05 * distr.variance().max(1.0),
                "{}: sample variance {var} vs {}",
                distr.family(),
                distr.variance()
            );
        }
    }

    #[test]
    fn seeded_sampling_is_reproducible() {
        let gamma = Gamma::new(3.0, 2.0).unwrap();
        let mut a = SmallRng::seed_from_u64(7);
        let mut b = SmallRng::seed_from_u64(7);
        let xs: Vec<f64> = (0..10).map(|_| gamma.sample(&mut a)).collect();
        let ys: Vec<f64> = (0..10).map(|_| gamma.sample(&mut b)).collect();
        assert_eq!(xs, ys);
    }
}
