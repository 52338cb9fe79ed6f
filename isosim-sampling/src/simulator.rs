use log::info;
use rand::rngs::StdRng;

use isosim_core::models::{PairedEndBatch, Psi, ReadBatch, TwoIsoformBatch};
use isosim_core::{GeneModel, Result};

use crate::config::SimulationConfig;
use crate::paired_end::simulate_paired_end_reads;
use crate::single_end::{simulate_reads, simulate_two_iso_reads};

///
/// Runs simulations described by a [SimulationConfig], owning the random
/// generator so consecutive runs continue one reproducible stream.
///
pub struct ReadSimulator {
    config: SimulationConfig,
    rng: StdRng,
}

impl ReadSimulator {
    pub fn new(config: SimulationConfig) -> Result<Self> {
        config.validate()?;
        let rng = config.rng();
        Ok(Self { config, rng })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn single_end<G: GeneModel>(&mut self, gene: &G, psi: &Psi) -> Result<ReadBatch> {
        info!(
            "Simulating {} single-end reads (read_len={}, overhang={}, psi={})",
            self.config.num_reads, self.config.read_len, self.config.overhang_len, psi
        );
        simulate_reads(
            gene,
            psi,
            self.config.num_reads,
            self.config.read_len,
            self.config.overhang_len,
            &mut self.rng,
        )
    }

    pub fn two_isoform<G: GeneModel>(&mut self, gene: &G, psi: &Psi) -> Result<TwoIsoformBatch> {
        info!(
            "Simulating {} two-isoform reads (read_len={}, overhang={}, psi={})",
            self.config.num_reads, self.config.read_len, self.config.overhang_len, psi
        );
        simulate_two_iso_reads(
            gene,
            psi,
            self.config.num_reads,
            self.config.read_len,
            self.config.overhang_len,
            &self.config.noise,
            &mut self.rng,
        )
    }

    pub fn paired_end<G: GeneModel>(&mut self, gene: &G, psi: &Psi) -> Result<PairedEndBatch> {
        let fragment_model = self.config.fragment_model()?;
        info!(
            "Simulating {} read pairs (read_len={}, overhang={}, fragment model {:?})",
            self.config.num_reads, self.config.read_len, self.config.overhang_len, fragment_model
        );
        simulate_paired_end_reads(
            gene,
            psi,
            self.config.num_reads,
            self.config.read_len,
            self.config.overhang_len,
            &fragment_model,
            &mut self.rng,
        )
    }
}
