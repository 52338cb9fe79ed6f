use std::fmt::{self, Display};
use std::ops::AddAssign;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SamplingError};

///
/// Result of aligning one read against every isoform of a gene.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadAlignment {
    /// One entry per isoform: 1 if the read is consistent with it, else 0.
    pub compatibility: Vec<u8>,
    /// Labels of the parts the read covers, e.g. `A-B` for a junction read.
    pub category: String,
}

impl ReadAlignment {
    ///
    /// A read consistent with no isoform was excluded by the overhang rule.
    ///
    pub fn is_excluded(&self) -> bool {
        self.compatibility.iter().all(|&c| c == 0)
    }
}

///
/// Result of aligning a read pair against every isoform of a gene.
///
#[derive(Debug, Clone, PartialEq)]
pub struct PairAlignment {
    pub compatibility: Vec<u8>,
    /// Fragment length implied by each isoform, negative infinity where the
    /// pair does not align.
    pub fragment_lengths: Vec<f64>,
}

impl PairAlignment {
    pub fn is_excluded(&self) -> bool {
        self.compatibility.iter().all(|&c| c == 0)
    }
}

///
/// Class of a read in the canonical two-isoform skipped-exon model.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ReadClass {
    /// Consistent with the inclusion isoform only (NI).
    Inclusion,
    /// Consistent with the exclusion isoform only (NE).
    Exclusion,
    /// Consistent with both isoforms (NB).
    Both,
}

impl ReadClass {
    ///
    /// Reduce a two-column compatibility vector to a read class. Returns
    /// `Ok(None)` for a read consistent with neither isoform.
    ///
    pub fn from_compatibility(compatibility: &[u8]) -> Result<Option<ReadClass>> {
        match compatibility {
            [1, 0] => Ok(Some(ReadClass::Inclusion)),
            [0, 1] => Ok(Some(ReadClass::Exclusion)),
            [1, 1] => Ok(Some(ReadClass::Both)),
            [0, 0] => Ok(None),
            [_, _] => Err(SamplingError::precondition(format!(
                "compatibility entries must be 0 or 1, got {:?}",
                compatibility
            ))),
            _ => Err(SamplingError::precondition(format!(
                "read class is only defined for two isoforms, got {} columns",
                compatibility.len()
            ))),
        }
    }

    pub fn compatibility(&self) -> [u8; 2] {
        match self {
            ReadClass::Inclusion => [1, 0],
            ReadClass::Exclusion => [0, 1],
            ReadClass::Both => [1, 1],
        }
    }
}

impl Display for ReadClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReadClass::Inclusion => "NI",
            ReadClass::Exclusion => "NE",
            ReadClass::Both => "NB",
        };
        write!(f, "{}", name)
    }
}

///
/// (NI, NE, NB) read counts of a two-isoform gene.
///
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReadSummary {
    pub ni: u64,
    pub ne: u64,
    pub nb: u64,
}

impl ReadSummary {
    pub fn new(ni: u64, ne: u64, nb: u64) -> Self {
        ReadSummary { ni, ne, nb }
    }

    pub fn add(&mut self, class: ReadClass, count: u64) {
        match class {
            ReadClass::Inclusion => self.ni += count,
            ReadClass::Exclusion => self.ne += count,
            ReadClass::Both => self.nb += count,
        }
    }

    pub fn get(&self, class: ReadClass) -> u64 {
        match class {
            ReadClass::Inclusion => self.ni,
            ReadClass::Exclusion => self.ne,
            ReadClass::Both => self.nb,
        }
    }

    pub fn total(&self) -> u64 {
        self.ni + self.ne + self.nb
    }

    ///
    /// Fraction of reads in each class, or `None` when there are no reads.
    ///
    pub fn proportions(&self) -> Option<(f64, f64, f64)> {
        let total = self.total();
        if total == 0 {
            return None;
        }
        let total = total as f64;
        Some((
            self.ni as f64 / total,
            self.ne as f64 / total,
            self.nb as f64 / total,
        ))
    }
}

impl AddAssign<ReadClass> for ReadSummary {
    fn add_assign(&mut self, class: ReadClass) {
        self.add(class, 1);
    }
}

impl Display for ReadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NI: {}, NE: {}, NB: {}", self.ni, self.ne, self.nb)
    }
}
