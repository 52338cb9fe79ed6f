use crate::errors::GeneModelError;
use crate::models::{PairAlignment, Part, ReadAlignment};

///
/// One transcript of a gene, as seen by the read simulators: a length and a
/// way to place isoform-space windows on the genome.
///
pub trait IsoformModel {
    /// Length of the isoform in bases.
    fn length(&self) -> u64;

    /// Map the 0-based, inclusive isoform window `[start, end]` to genomic
    /// coordinates of its first and last base.
    fn isoform_coords_to_genomic(&self, start: u64, end: u64)
    -> Result<(u64, u64), GeneModelError>;
}

///
/// A gene with an ordered set of isoforms. The isoform order defines the
/// index used by Psi and by every compatibility vector.
///
pub trait GeneModel {
    type Isoform: IsoformModel;

    fn isoforms(&self) -> &[Self::Isoform];

    fn num_isoforms(&self) -> usize {
        self.isoforms().len()
    }

    fn isoform_lengths(&self) -> Vec<u64> {
        self.isoforms().iter().map(|iso| iso.length()).collect()
    }

    ///
    /// Classify a single read against every isoform.
    ///
    /// # Arguments
    /// * `genomic_start` - genomic coordinate of the first read base
    /// * `genomic_end` - genomic coordinate of the last read base
    /// * `read_len` - read length, needed to tell a junction read from a read
    ///   spanning a whole exon with the same genomic endpoints
    /// * `overhang` - minimum bases on each side of a splice junction
    ///
    fn align_read(
        &self,
        genomic_start: u64,
        genomic_end: u64,
        read_len: u64,
        overhang: u64,
    ) -> ReadAlignment;

    ///
    /// Classify a read pair against every isoform. An isoform is compatible
    /// when both mates are; the reported fragment length is negative infinity
    /// for incompatible isoforms.
    ///
    fn align_read_pair(
        &self,
        left: (u64, u64),
        right: (u64, u64),
        read_len: u64,
        overhang: u64,
    ) -> PairAlignment;

    fn get_part_by_label(&self, label: &str) -> Option<&Part>;
}
