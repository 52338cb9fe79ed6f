use log::warn;
use rand::Rng;
use serde::{Deserialize, Serialize};

use isosim_core::consts::EXCLUSION_ISOFORM;
use isosim_core::models::ReadClass;
use isosim_core::{Result, SamplingError};

///
/// Probabilities of systematic read loss/gain in the two-isoform model.
///
/// `p_ni_loss` and `p_ni_gain` are accepted and validated but reserved: they
/// do not change the simulated reads.
///
/// # Example
/// ```toml
/// [noise]
/// p_ne_loss = 0.1
/// p_ne_gain = 0.0
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub p_ne_loss: f64,
    pub p_ne_gain: f64,
    pub p_ni_loss: f64,
    pub p_ni_gain: f64,
}

impl NoiseConfig {
    pub fn exclusion(p_ne_loss: f64, p_ne_gain: f64) -> Self {
        NoiseConfig {
            p_ne_loss,
            p_ne_gain,
            ..Default::default()
        }
    }

    fn probabilities(&self) -> [(&'static str, f64); 4] {
        [
            ("p_ne_loss", self.p_ne_loss),
            ("p_ne_gain", self.p_ne_gain),
            ("p_ni_loss", self.p_ni_loss),
            ("p_ni_gain", self.p_ni_gain),
        ]
    }

    pub fn is_noiseless(&self) -> bool {
        self.probabilities().iter().all(|(_, p)| *p == 0.0)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, p) in self.probabilities() {
            if !(0.0..=1.0).contains(&p) {
                return Err(SamplingError::precondition(format!(
                    "{} must be a probability in [0, 1], got {}",
                    name, p
                )));
            }
        }
        Ok(())
    }
}

/// What happens to one kept read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseOutcome {
    Keep,
    Drop,
    Duplicate,
}

///
/// Applies [NoiseConfig] to reads of a two-isoform gene. Only reads from the
/// exclusion isoform that are exclusively NE are affected.
///
#[derive(Debug, Clone)]
pub struct NoiseInjector {
    config: NoiseConfig,
}

impl NoiseInjector {
    pub fn new(config: NoiseConfig) -> Result<Self> {
        config.validate()?;
        if config.p_ni_loss > 0.0 || config.p_ni_gain > 0.0 {
            warn!(
                "p_ni_loss ({}) and p_ni_gain ({}) are reserved and have no effect",
                config.p_ni_loss, config.p_ni_gain
            );
        }
        Ok(NoiseInjector { config })
    }

    pub fn config(&self) -> &NoiseConfig {
        &self.config
    }

    ///
    /// Decide the fate of a read. Draws from `rng` only when a non-zero
    /// exclusion probability applies to the read.
    ///
    pub fn perturb<R: Rng>(&self, isoform: usize, class: ReadClass, rng: &mut R) -> NoiseOutcome {
        if isoform != EXCLUSION_ISOFORM || class != ReadClass::Exclusion {
            return NoiseOutcome::Keep;
        }

        if self.config.p_ne_loss > 0.0 && rng.random_bool(self.config.p_ne_loss) {
            return NoiseOutcome::Drop;
        }
        if self.config.p_ne_gain > 0.0 && rng.random_bool(self.config.p_ne_gain) {
            return NoiseOutcome::Duplicate;
        }

        NoiseOutcome::Keep
    }
}
