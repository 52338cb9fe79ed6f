//! Core models for isosim.
//!
//! This crate holds the types shared by the read simulators and the summary
//! statistics:
//!
//! - [`models::Psi`], the validated isoform abundance vector
//! - the gene/isoform contract ([`GeneModel`], [`IsoformModel`]) and an
//!   exon-structured implementation of it ([`models::Gene`])
//! - alignment results, read classes and simulated read batches
//! - [`SamplingError`], the error returned by every simulation call
//!
//! # Example
//!
//! ```
//! use isosim_core::models::Gene;
//! use isosim_core::GeneModel;
//!
//! let gene = Gene::skipped_exon("SE1", (100, 199), (300, 349), (500, 599)).unwrap();
//! let alignment = gene.align_read(195, 504, 10, 1);
//! assert_eq!(alignment.compatibility, vec![0, 1]);
//! ```

pub mod consts;
pub mod errors;
pub mod models;
pub mod traits;

// re-exports
pub use errors::{GeneModelError, Result, SamplingError, SamplingErrorKind};
pub use traits::{GeneModel, IsoformModel};
