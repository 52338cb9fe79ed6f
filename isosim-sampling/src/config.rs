use std::path::Path;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use isosim_core::{Result, SamplingError};

use crate::consts::{
    DEFAULT_FRAGMENT_MEAN, DEFAULT_FRAGMENT_VARIANCE, DEFAULT_NUM_READS, DEFAULT_OVERHANG_LEN,
    DEFAULT_READ_LEN,
};
use crate::fragment::FragmentLengthModel;
use crate::noise::NoiseConfig;

/// Fragment length distribution for paired-end simulation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct FragmentLengthConfig {
    pub mean: f64,
    pub variance: f64,
    /// Use binomial/negative-binomial sampling instead of a discretized normal
    #[serde(default)]
    pub binomial_sampling: bool,
}

impl FragmentLengthConfig {
    pub fn model(&self) -> Result<FragmentLengthModel> {
        FragmentLengthModel::new(self.mean, self.variance, self.binomial_sampling)
    }
}

impl Default for FragmentLengthConfig {
    fn default() -> Self {
        Self {
            mean: DEFAULT_FRAGMENT_MEAN,
            variance: DEFAULT_FRAGMENT_VARIANCE,
            binomial_sampling: false,
        }
    }
}

///
/// Configuration of a read simulation.
///
/// # Example
/// ```toml
/// read_len = 36
/// overhang_len = 4
/// num_reads = 10000
/// seed = 42
///
/// [fragment_length]
/// mean = 250.0
/// variance = 400.0
/// binomial_sampling = true
///
/// [noise]
/// p_ne_loss = 0.05
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SimulationConfig {
    #[serde(default = "default_read_len")]
    pub read_len: u64,
    #[serde(default = "default_overhang_len")]
    pub overhang_len: u64,
    #[serde(default = "default_num_reads")]
    pub num_reads: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment_length: Option<FragmentLengthConfig>,
    #[serde(default)]
    pub noise: NoiseConfig,
}

fn default_read_len() -> u64 {
    DEFAULT_READ_LEN
}
fn default_overhang_len() -> u64 {
    DEFAULT_OVERHANG_LEN
}
fn default_num_reads() -> u64 {
    DEFAULT_NUM_READS
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            read_len: DEFAULT_READ_LEN,
            overhang_len: DEFAULT_OVERHANG_LEN,
            num_reads: DEFAULT_NUM_READS,
            seed: None,
            fragment_length: None,
            noise: NoiseConfig::default(),
        }
    }
}

impl SimulationConfig {
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read simulation config from {:?}: {}", path, e))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_file(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.read_len == 0 {
            return Err(SamplingError::precondition("read_len must be positive"));
        }
        if self.overhang_len == 0 {
            return Err(SamplingError::precondition("overhang_len must be at least 1"));
        }
        if let Some(fragment_length) = &self.fragment_length {
            fragment_length.model()?;
        }
        self.noise.validate()
    }

    ///
    /// Fragment length model, required for paired-end simulation.
    ///
    pub fn fragment_model(&self) -> Result<FragmentLengthModel> {
        self.fragment_length
            .as_ref()
            .ok_or_else(|| {
                SamplingError::precondition(
                    "paired-end simulation needs a [fragment_length] configuration",
                )
            })?
            .model()
    }

    ///
    /// Random generator for this configuration: seeded when `seed` is set,
    /// from OS entropy otherwise.
    ///
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_os_rng(),
        }
    }
}
