/// Allowed distance between the sum of a Psi vector and 1.
pub const PSI_TOLERANCE: f64 = 1e-6;

/// Fragment length reported for an isoform a read pair cannot align to.
pub const UNALIGNED_FRAGMENT_LENGTH: f64 = f64::NEG_INFINITY;

/// Isoform index of the inclusion isoform in a two-isoform gene.
pub const INCLUSION_ISOFORM: usize = 0;
/// Isoform index of the exclusion (exon-skipping) isoform in a two-isoform gene.
pub const EXCLUSION_ISOFORM: usize = 1;

/// Part labels of the canonical skipped-exon gene: upstream, skipped, downstream exon.
pub const UPSTREAM_EXON_LABEL: &str = "A";
pub const SKIPPED_EXON_LABEL: &str = "B";
pub const DOWNSTREAM_EXON_LABEL: &str = "C";

/// Separator between part labels in a read category.
pub const CATEGORY_SEPARATOR: &str = "-";
