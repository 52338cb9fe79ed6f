//! Summary statistics and validation for simulated isoform reads.
//!
//! - [`summary`]: (NI, NE, NB) tallies, per-isoform unambiguous counts
//! - [`expected`]: closed-form expected counts for the skipped-exon topology
//! - [`density`]: reads per kilobase of mappable positions (RPKC)
//! - [`consistency`]: paired-end alignment/fragment-length consistency

pub mod consistency;
pub mod density;
pub mod expected;
pub mod summary;

// re-exports
pub use consistency::{check_paired_end_read_consistency, is_consistent_batch};
pub use density::compute_rpkc;
pub use expected::{ExpectationModel, ExpectedReadSummary, SkippedExonModel, expected_read_summary};
pub use summary::{
    IsoformReadSummary, ReadSetStatistics, get_reads_summary, isoform_read_summary,
    log_reads_summary, read_counts_to_read_list,
};
