use crate::models::{ReadClass, ReadSummary};

///
/// A single-end read that survived the overhang filter.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedRead {
    pub compatibility: Vec<u8>,
    pub category: String,
    /// Index of the isoform that generated the read
    pub isoform: usize,
    /// 0-based inclusive window on the generating isoform
    pub isoform_coords: (u64, u64),
    pub genomic_coords: (u64, u64),
}

///
/// Reads kept from one single-end simulation call, in generation order.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadBatch {
    pub reads: Vec<SimulatedRead>,
    /// Number of reads sampled, including the ones excluded by overhang
    pub attempted: u64,
}

impl ReadBatch {
    pub fn with_capacity(capacity: usize) -> Self {
        ReadBatch {
            reads: Vec::with_capacity(capacity),
            attempted: 0,
        }
    }

    pub fn push(&mut self, read: SimulatedRead) {
        self.reads.push(read);
    }

    pub fn len(&self) -> usize {
        self.reads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reads.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SimulatedRead> {
        self.reads.iter()
    }

    pub fn excluded(&self) -> u64 {
        self.attempted - self.reads.len() as u64
    }

    pub fn compatibility_rows(&self) -> Vec<&[u8]> {
        self.reads.iter().map(|r| r.compatibility.as_slice()).collect()
    }

    pub fn categories(&self) -> Vec<&str> {
        self.reads.iter().map(|r| r.category.as_str()).collect()
    }

    pub fn isoforms(&self) -> Vec<usize> {
        self.reads.iter().map(|r| r.isoform).collect()
    }

    pub fn genomic_coords(&self) -> Vec<(u64, u64)> {
        self.reads.iter().map(|r| r.genomic_coords).collect()
    }
}

impl<'a> IntoIterator for &'a ReadBatch {
    type Item = &'a SimulatedRead;
    type IntoIter = std::slice::Iter<'a, SimulatedRead>;

    fn into_iter(self) -> Self::IntoIter {
        self.reads.iter()
    }
}

///
/// A kept read of a two-isoform gene, reduced to its read class.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoIsoformRead {
    pub class: ReadClass,
    pub category: String,
    pub isoform: usize,
    pub genomic_coords: (u64, u64),
}

impl TwoIsoformRead {
    pub fn compatibility(&self) -> [u8; 2] {
        self.class.compatibility()
    }
}

///
/// Output of the two-isoform simulator. `summary` counts every entry of
/// `reads`, so duplicated reads are counted twice.
///
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TwoIsoformBatch {
    pub summary: ReadSummary,
    pub reads: Vec<TwoIsoformRead>,
    /// Summary of the kept reads before noise was applied
    pub noiseless_summary: ReadSummary,
    pub attempted: u64,
}

impl TwoIsoformBatch {
    pub fn push(&mut self, read: TwoIsoformRead) {
        self.summary += read.class;
        self.reads.push(read);
    }

    pub fn len(&self) -> usize {
        self.reads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reads.is_empty()
    }

    pub fn compatibility_rows(&self) -> Vec<[u8; 2]> {
        self.reads.iter().map(|r| r.compatibility()).collect()
    }

    pub fn categories(&self) -> Vec<&str> {
        self.reads.iter().map(|r| r.category.as_str()).collect()
    }

    pub fn true_isoforms(&self) -> Vec<usize> {
        self.reads.iter().map(|r| r.isoform).collect()
    }
}

///
/// One simulated read pair.
///
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedReadPair {
    pub compatibility: Vec<u8>,
    /// Per-isoform fragment length reported by the gene
    pub fragment_lengths: Vec<f64>,
    /// Fragment length that was sampled for this pair
    pub fragment_length: u64,
    pub isoform: usize,
    pub left: (u64, u64),
    pub right: (u64, u64),
}

///
/// Output of one paired-end simulation call.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairedEndBatch {
    pub pairs: Vec<SimulatedReadPair>,
    /// Every fragment length drawn, in draw order
    pub sampled_fragment_lengths: Vec<i64>,
}

impl PairedEndBatch {
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SimulatedReadPair> {
        self.pairs.iter()
    }

    ///
    /// Flatten every (alignment flag, fragment length) entry of the batch,
    /// isoform by isoform, for consistency checks.
    ///
    pub fn alignment_entries(&self) -> Vec<(u8, f64)> {
        self.pairs
            .iter()
            .flat_map(|p| {
                p.compatibility
                    .iter()
                    .copied()
                    .zip(p.fragment_lengths.iter().copied())
            })
            .collect()
    }

    pub fn genomic_coords(&self) -> Vec<((u64, u64), (u64, u64))> {
        self.pairs.iter().map(|p| (p.left, p.right)).collect()
    }
}
