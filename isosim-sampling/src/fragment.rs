use rand::Rng;
use rand_distr::{Binomial, Distribution, Gamma, Normal, Poisson};

use isosim_core::{Result, SamplingError};

use crate::consts::MIN_MEAN_VARIANCE_GAP;

///
/// Distribution fragment (or read) lengths are drawn from. Both variants are
/// parameterized by a mean and a variance.
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FragmentLengthModel {
    /// Normal distribution rounded to the nearest integer.
    DiscretizedNormal { mean: f64, variance: f64 },
    /// Moment-matched binomial when `variance < mean`, negative binomial otherwise.
    Binomial { mean: f64, variance: f64 },
}

impl FragmentLengthModel {
    pub fn new(mean: f64, variance: f64, binomial_sampling: bool) -> Result<Self> {
        if !mean.is_finite() || mean <= 0.0 {
            return Err(SamplingError::precondition(format!(
                "fragment length mean must be positive, got {}",
                mean
            )));
        }
        if !variance.is_finite() || variance < 0.0 {
            return Err(SamplingError::precondition(format!(
                "fragment length variance must be non-negative, got {}",
                variance
            )));
        }

        if binomial_sampling {
            check_mean_variance_gap(mean, variance)?;
            Ok(FragmentLengthModel::Binomial { mean, variance })
        } else {
            Ok(FragmentLengthModel::DiscretizedNormal { mean, variance })
        }
    }

    pub fn mean(&self) -> f64 {
        match self {
            FragmentLengthModel::DiscretizedNormal { mean, .. } => *mean,
            FragmentLengthModel::Binomial { mean, .. } => *mean,
        }
    }

    pub fn variance(&self) -> f64 {
        match self {
            FragmentLengthModel::DiscretizedNormal { variance, .. } => *variance,
            FragmentLengthModel::Binomial { variance, .. } => *variance,
        }
    }

    ///
    /// Draw one length. Discretized-normal draws can be negative; callers
    /// decide whether a draw is usable.
    ///
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Result<i64> {
        match *self {
            FragmentLengthModel::DiscretizedNormal { mean, variance } => {
                sample_normal_frag_len(mean, variance, rng)
            }
            FragmentLengthModel::Binomial { mean, variance } => {
                sample_binomial_frag_len(mean, variance, rng)
            }
        }
    }
}

fn check_mean_variance_gap(mean: f64, variance: f64) -> Result<()> {
    if (mean - variance).abs() > MIN_MEAN_VARIANCE_GAP {
        Ok(())
    } else {
        Err(SamplingError::precondition(format!(
            "binomial fragment sampling needs |mean - variance| > {}, got mean {} and variance {}",
            MIN_MEAN_VARIANCE_GAP, mean, variance
        )))
    }
}

///
/// Sample a length from a normal distribution rounded to the nearest integer.
///
pub fn sample_normal_frag_len<R: Rng>(mean: f64, variance: f64, rng: &mut R) -> Result<i64> {
    let normal = Normal::new(mean, variance.sqrt()).map_err(|e| {
        SamplingError::precondition(format!("invalid normal fragment parameters: {}", e))
    })?;
    let sampled: f64 = normal.sample(rng);
    Ok(sampled.round() as i64)
}

///
/// Sample a length from a binomial distribution matching the given mean and
/// variance, or from a negative binomial when `variance > mean`.
///
pub fn sample_binomial_frag_len<R: Rng>(mean: f64, variance: f64, rng: &mut R) -> Result<i64> {
    check_mean_variance_gap(mean, variance)?;

    if variance < mean {
        // n * p = mean, n * p * (1 - p) = variance
        let p = 1.0 - variance / mean;
        let n = (mean / p) as u64;
        let binomial = Binomial::new(n, p).map_err(|e| {
            SamplingError::precondition(format!("invalid binomial fragment parameters: {}", e))
        })?;
        Ok(binomial.sample(rng) as i64)
    } else {
        let r = -(mean * mean) / (mean - variance);
        let p = mean / variance;
        sample_negative_binomial(r, p, rng)
    }
}

///
/// Number of failures before the `r`-th success, with a real-valued `r`,
/// drawn as a gamma-poisson mixture.
///
fn sample_negative_binomial<R: Rng>(r: f64, p: f64, rng: &mut R) -> Result<i64> {
    let gamma = Gamma::new(r, (1.0 - p) / p).map_err(|e| {
        SamplingError::precondition(format!("invalid negative binomial parameters: {}", e))
    })?;
    let lambda: f64 = gamma.sample(rng);
    if lambda <= 0.0 {
        return Ok(0);
    }

    let poisson = Poisson::new(lambda).map_err(|e| {
        SamplingError::precondition(format!("invalid negative binomial rate {}: {}", lambda, e))
    })?;
    let sampled: f64 = poisson.sample(rng);
    Ok(sampled as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::rstest;

    fn moments(draws: &[i64]) -> (f64, f64) {
        let n = draws.len() as f64;
        let mean = draws.iter().map(|&d| d as f64).sum::<f64>() / n;
        let variance = draws
            .iter()
            .map(|&d| (d as f64 - mean).powi(2))
            .sum::<f64>()
            / (n - 1.0);
        (mean, variance)
    }

    #[rstest]
    #[case(200.0, 100.0, false)]
    #[case(200.0, 100.0, true)]
    #[case(200.0, 400.0, true)]
    fn test_sampled_moments_match_parameters(
        #[case] mean: f64,
        #[case] variance: f64,
        #[case] binomial_sampling: bool,
    ) {
        let model = FragmentLengthModel::new(mean, variance, binomial_sampling).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        let draws: Vec<i64> = (0..20_000).map(|_| model.sample(&mut rng).unwrap()).collect();
        let (sample_mean, sample_variance) = moments(&draws);

        assert!(
            (sample_mean - mean).abs() < 1.0,
            "sample mean {} too far from {}",
            sample_mean,
            mean
        );
        assert!(
            (sample_variance - variance).abs() < 0.1 * variance,
            "sample variance {} too far from {}",
            sample_variance,
            variance
        );
    }

    #[rstest]
    #[case(200.0, 200.0)]
    #[case(200.0, 199.5)]
    #[case(200.0, 201.0)]
    fn test_binomial_requires_mean_variance_gap(#[case] mean: f64, #[case] variance: f64) {
        let err = FragmentLengthModel::new(mean, variance, true).unwrap_err();
        assert!(err.is_precondition());

        let mut rng = StdRng::seed_from_u64(1);
        assert!(sample_binomial_frag_len(mean, variance, &mut rng).is_err());
    }

    #[rstest]
    fn test_invalid_parameters_rejected() {
        assert!(FragmentLengthModel::new(-5.0, 10.0, false).is_err());
        assert!(FragmentLengthModel::new(200.0, -1.0, false).is_err());
        assert!(FragmentLengthModel::new(f64::NAN, 10.0, true).is_err());
    }

    #[rstest]
    fn test_sampling_is_reproducible() {
        let model = FragmentLengthModel::new(250.0, 900.0, true).unwrap();

        let mut first = StdRng::seed_from_u64(7);
        let mut second = StdRng::seed_from_u64(7);
        let a: Vec<i64> = (0..100).map(|_| model.sample(&mut first).unwrap()).collect();
        let b: Vec<i64> = (0..100).map(|_| model.sample(&mut second).unwrap()).collect();

        assert_eq!(a, b);
    }

    #[rstest]
    fn test_zero_variance_normal_is_constant() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..10 {
            assert_eq!(sample_normal_frag_len(180.4, 0.0, &mut rng).unwrap(), 180);
        }
    }
}
