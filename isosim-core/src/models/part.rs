use std::fmt::{self, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::GeneModelError;

///
/// Labelled genomic segment of a gene, usually an exon. Coordinates are
/// inclusive on both ends.
///
#[derive(Eq, PartialEq, Hash, Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Part {
    pub label: String,
    pub start: u64,
    pub end: u64,
}

impl Part {
    pub fn new(label: impl Into<String>, start: u64, end: u64) -> Result<Self, GeneModelError> {
        let label = label.into();
        if end < start {
            return Err(GeneModelError::InvalidPart { label, start, end });
        }
        Ok(Part { label, start, end })
    }

    ///
    /// Number of bases in the part
    ///
    pub fn length(&self) -> u64 {
        (self.end + 1).saturating_sub(self.start)
    }

    pub fn contains(&self, position: u64) -> bool {
        self.start <= position && position <= self.end
    }
}

impl Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}-{}", self.label, self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_part_length_is_inclusive() {
        let part = Part::new("A", 100, 199).unwrap();
        assert_eq!(part.length(), 100);
        assert!(part.contains(100));
        assert!(part.contains(199));
        assert!(!part.contains(200));
        assert_eq!(part.to_string(), "A:100-199");
    }

    #[rstest]
    fn test_part_rejects_reversed_coordinates() {
        let err = Part::new("B", 10, 5).unwrap_err();
        assert!(matches!(err, GeneModelError::InvalidPart { .. }));
    }
}
