use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;

use isosim_core::models::Psi;
use isosim_core::{Result, SamplingError};

/// Isoform and start offset drawn for one read or fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampledPosition {
    pub isoform: usize,
    /// 0-based start offset on the isoform, in `[0, positions)`
    pub start: u64,
    /// Number of valid start offsets on the chosen isoform
    pub positions: u64,
}

///
/// Number of start offsets at which a window fits inside an isoform:
/// `iso_len - window + 1`, or zero when it does not fit at all.
///
pub fn num_positions(iso_len: u64, window: u64) -> u64 {
    (iso_len + 1).saturating_sub(window)
}

///
/// Probability of drawing each isoform: `positions_i * psi_i`, normalized.
/// Longer isoforms yield more reads at the same abundance, so sampling
/// straight from Psi would bias the simulated reads.
///
pub fn isoform_weights(lengths: &[u64], window: u64, psi: &Psi) -> Result<Vec<f64>> {
    if window == 0 {
        return Err(SamplingError::precondition("window length must be positive"));
    }
    psi.check_isoform_count(lengths.len())?;

    let raw: Vec<f64> = lengths
        .iter()
        .zip(psi.iter())
        .map(|(&len, &p)| num_positions(len, window) as f64 * p)
        .collect();

    let total: f64 = raw.iter().sum();
    if total <= 0.0 {
        return Err(SamplingError::degenerate(format!(
            "no isoform with non-zero Psi has a valid position for a {} base window (isoform lengths {:?})",
            window, lengths
        )));
    }

    Ok(raw.into_iter().map(|w| w / total).collect())
}

///
/// Uniform start probability for each offset of an isoform. Offsets where
/// the window would run past the isoform end get zero.
///
pub fn read_position_probabilities(iso_len: u64, window: u64) -> Vec<f64> {
    let positions = num_positions(iso_len, window);
    let mut probs = vec![0.0; iso_len as usize];
    if positions == 0 {
        return probs;
    }

    let p = 1.0 / positions as f64;
    probs
        .iter_mut()
        .take(positions as usize)
        .for_each(|slot| *slot = p);
    probs
}

///
/// Draws (isoform, start offset) pairs for a fixed window length. Build it
/// once per simulation call when the window does not change between reads.
///
#[derive(Debug, Clone)]
pub struct PositionSampler {
    positions: Vec<u64>,
    weights: Vec<f64>,
    index: WeightedIndex<f64>,
    window: u64,
}

impl PositionSampler {
    pub fn new(lengths: &[u64], window: u64, psi: &Psi) -> Result<Self> {
        let weights = isoform_weights(lengths, window, psi)?;
        let index = WeightedIndex::new(&weights).map_err(|e| {
            SamplingError::degenerate(format!("cannot build isoform distribution: {}", e))
        })?;
        let positions = lengths.iter().map(|&len| num_positions(len, window)).collect();

        Ok(PositionSampler {
            positions,
            weights,
            index,
            window,
        })
    }

    pub fn window(&self) -> u64 {
        self.window
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    pub fn positions(&self) -> &[u64] {
        &self.positions
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> SampledPosition {
        // zero-weight isoforms are never drawn, so positions > 0 here
        let isoform = self.index.sample(rng);
        let positions = self.positions[isoform];
        let start = rng.random_range(0..positions);

        SampledPosition {
            isoform,
            start,
            positions,
        }
    }
}

///
/// One-off draw of an isoform and a start offset.
///
pub fn sample_isoform_and_start<R: Rng>(
    lengths: &[u64],
    window: u64,
    psi: &Psi,
    rng: &mut R,
) -> Result<SampledPosition> {
    Ok(PositionSampler::new(lengths, window, psi)?.sample(rng))
}
