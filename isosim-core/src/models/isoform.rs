use crate::errors::GeneModelError;
use crate::models::Part;
use crate::traits::IsoformModel;

///
/// Stretch of a read that aligns inside a single part of an isoform.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignedBlock {
    /// Index of the part within the isoform
    pub part: usize,
    pub genomic_start: u64,
    pub genomic_end: u64,
}

impl AlignedBlock {
    pub fn length(&self) -> u64 {
        self.genomic_end - self.genomic_start + 1
    }
}

///
/// Isoform built from an ordered list of non-overlapping parts (exons).
///
#[derive(Debug, Clone, PartialEq)]
pub struct Isoform {
    parts: Vec<Part>,
    sequence: Option<String>,
    length: u64,
}

impl Isoform {
    pub fn new(parts: Vec<Part>) -> Result<Self, GeneModelError> {
        if parts.is_empty() {
            return Err(GeneModelError::EmptyIsoform);
        }

        for pair in parts.windows(2) {
            if pair[1].start <= pair[0].end {
                return Err(GeneModelError::OverlappingParts(
                    pair[0].label.clone(),
                    pair[1].label.clone(),
                ));
            }
        }

        let length = parts.iter().map(|p| p.length()).sum();

        Ok(Isoform {
            parts,
            sequence: None,
            length,
        })
    }

    ///
    /// Attach the spliced sequence of the isoform. The simulators never read
    /// it, but its length must agree with the parts.
    ///
    pub fn with_sequence(mut self, sequence: String) -> Result<Self, GeneModelError> {
        let sequence_len = sequence.len() as u64;
        if sequence_len != self.length {
            return Err(GeneModelError::SequenceLengthMismatch {
                sequence: sequence_len,
                isoform: self.length,
            });
        }
        self.sequence = Some(sequence);
        Ok(self)
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn sequence(&self) -> Option<&str> {
        self.sequence.as_deref()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.parts.iter().map(|p| p.label.as_str()).collect()
    }

    ///
    /// Genomic coordinate of a 0-based isoform offset.
    ///
    pub fn to_genomic(&self, offset: u64) -> Option<u64> {
        let mut remaining = offset;
        for part in &self.parts {
            if remaining < part.length() {
                return Some(part.start + remaining);
            }
            remaining -= part.length();
        }
        None
    }

    ///
    /// Locate a genomic coordinate on the isoform: the index of the part that
    /// holds it and its 0-based isoform offset. `None` when the position is
    /// intronic or outside the isoform.
    ///
    pub fn to_isoform(&self, genomic: u64) -> Option<(usize, u64)> {
        let mut offset = 0;
        for (idx, part) in self.parts.iter().enumerate() {
            if part.contains(genomic) {
                return Some((idx, offset + genomic - part.start));
            }
            offset += part.length();
        }
        None
    }

    ///
    /// Split a read with the given genomic endpoints into the blocks it
    /// covers on this isoform. Returns `None` if the read cannot come from
    /// this isoform: an endpoint lies outside its parts, or the isoform-space
    /// span differs from `read_len`.
    ///
    pub fn aligned_blocks(
        &self,
        genomic_start: u64,
        genomic_end: u64,
        read_len: u64,
    ) -> Option<Vec<AlignedBlock>> {
        let (first, start_offset) = self.to_isoform(genomic_start)?;
        let (last, end_offset) = self.to_isoform(genomic_end)?;

        if end_offset < start_offset || end_offset - start_offset + 1 != read_len {
            return None;
        }

        let blocks = (first..=last)
            .map(|idx| {
                let part = &self.parts[idx];
                AlignedBlock {
                    part: idx,
                    genomic_start: part.start.max(genomic_start),
                    genomic_end: part.end.min(genomic_end),
                }
            })
            .collect();

        Some(blocks)
    }
}

impl IsoformModel for Isoform {
    fn length(&self) -> u64 {
        self.length
    }

    fn isoform_coords_to_genomic(
        &self,
        start: u64,
        end: u64,
    ) -> Result<(u64, u64), GeneModelError> {
        let out_of_range = GeneModelError::CoordinatesOutOfRange {
            start,
            end,
            length: self.length,
        };
        if start > end {
            return Err(out_of_range);
        }
        match (self.to_genomic(start), self.to_genomic(end)) {
            (Some(genomic_start), Some(genomic_end)) => Ok((genomic_start, genomic_end)),
            _ => Err(out_of_range),
        }
    }
}
