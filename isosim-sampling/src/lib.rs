//! # Read simulation from alternatively spliced isoforms
//!
//! Simulates sequencing reads from a gene whose isoform abundances (Psi) are
//! known, so that estimators of Psi can be checked against ground truth.
//!
//! ## Overview
//!
//! - **Position sampling**: an isoform is chosen with probability proportional
//!   to `psi_i * (L_i - w + 1)`, then a start uniformly among its positions
//! - **Single-end reads**: each read is aligned against every isoform and
//!   dropped when no isoform accepts it under the overhang constraint
//! - **Two-isoform reads**: reads reduced to NI/NE/NB classes, with optional
//!   loss/gain noise on exclusion reads
//! - **Paired-end reads**: one fragment length per pair, from a discretized
//!   normal or a (negative) binomial model
//!
//! ## Example
//!
//! ```
//! use isosim_core::models::{Gene, Psi};
//! use isosim_sampling::config::SimulationConfig;
//! use isosim_sampling::simulator::ReadSimulator;
//!
//! let gene = Gene::skipped_exon("SE1", (1000, 1399), (2000, 2199), (3000, 3399)).unwrap();
//! let psi = Psi::two_isoform(0.6).unwrap();
//!
//! let config = SimulationConfig::from_toml_str("num_reads = 500\nseed = 1").unwrap();
//! let mut simulator = ReadSimulator::new(config).unwrap();
//! let batch = simulator.two_isoform(&gene, &psi).unwrap();
//!
//! assert_eq!(batch.summary.total() as usize, batch.len());
//! ```
//!
//! All randomness flows through a caller-supplied [`rand::Rng`]; the same seed
//! reproduces the same reads.

pub mod config;
pub mod consts;
pub mod fragment;
pub mod noise;
pub mod paired_end;
pub mod position;
pub mod simulator;
pub mod single_end;

// re-exports
pub use config::{FragmentLengthConfig, SimulationConfig};
pub use fragment::FragmentLengthModel;
pub use noise::{NoiseConfig, NoiseInjector, NoiseOutcome};
pub use paired_end::{sample_fragment_length, sample_random_read_pair, simulate_paired_end_reads};
pub use position::{PositionSampler, read_position_probabilities, sample_isoform_and_start};
pub use simulator::ReadSimulator;
pub use single_end::{sample_random_read, simulate_reads, simulate_two_iso_reads};
