pub const DEFAULT_READ_LEN: u64 = 36;
pub const DEFAULT_OVERHANG_LEN: u64 = 1;
pub const DEFAULT_NUM_READS: u64 = 1000;

pub const DEFAULT_FRAGMENT_MEAN: f64 = 200.0;
pub const DEFAULT_FRAGMENT_VARIANCE: f64 = 100.0;

/// Smallest allowed distance between fragment mean and variance for
/// binomial/negative-binomial sampling.
pub const MIN_MEAN_VARIANCE_GAP: f64 = 1.0;

/// Upper bound on the number of read slots reserved up front for one batch.
pub const MAX_PREALLOCATED_READS: u64 = 1 << 16;
