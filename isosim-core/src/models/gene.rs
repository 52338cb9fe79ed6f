use crate::consts::{
    CATEGORY_SEPARATOR, DOWNSTREAM_EXON_LABEL, SKIPPED_EXON_LABEL, UNALIGNED_FRAGMENT_LENGTH,
    UPSTREAM_EXON_LABEL,
};
use crate::errors::GeneModelError;
use crate::models::{AlignedBlock, Isoform, PairAlignment, Part, ReadAlignment};
use crate::traits::GeneModel;

///
/// Gene made of exon-structured isoforms sharing a pool of labelled parts.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Gene {
    pub name: String,
    isoforms: Vec<Isoform>,
    parts: Vec<Part>,
}

impl Gene {
    pub fn new(name: impl Into<String>, isoforms: Vec<Isoform>) -> Result<Self, GeneModelError> {
        if isoforms.is_empty() {
            return Err(GeneModelError::EmptyGene);
        }

        let mut parts: Vec<Part> = Vec::new();
        for part in isoforms.iter().flat_map(|iso| iso.parts()) {
            match parts.iter().find(|p| p.label == part.label) {
                Some(existing) if existing != part => {
                    return Err(GeneModelError::ConflictingPartLabel(part.label.clone()));
                }
                Some(_) => {}
                None => parts.push(part.clone()),
            }
        }
        parts.sort_by_key(|p| (p.start, p.end));

        Ok(Gene {
            name: name.into(),
            isoforms,
            parts,
        })
    }

    ///
    /// Canonical skipped-exon gene: isoform 0 includes `A`, `B` and `C`,
    /// isoform 1 skips `B`. Parts are relabelled `A`, `B`, `C`.
    ///
    pub fn skipped_exon(
        name: impl Into<String>,
        upstream: (u64, u64),
        skipped: (u64, u64),
        downstream: (u64, u64),
    ) -> Result<Self, GeneModelError> {
        let a = Part::new(UPSTREAM_EXON_LABEL, upstream.0, upstream.1)?;
        let b = Part::new(SKIPPED_EXON_LABEL, skipped.0, skipped.1)?;
        let c = Part::new(DOWNSTREAM_EXON_LABEL, downstream.0, downstream.1)?;

        let inclusion = Isoform::new(vec![a.clone(), b, c.clone()])?;
        let exclusion = Isoform::new(vec![a, c])?;

        Gene::new(name, vec![inclusion, exclusion])
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    fn category(isoform: &Isoform, blocks: &[AlignedBlock]) -> String {
        blocks
            .iter()
            .map(|b| isoform.parts()[b.part].label.as_str())
            .collect::<Vec<&str>>()
            .join(CATEGORY_SEPARATOR)
    }

    ///
    /// Blocks of a read on one isoform, kept only if every block satisfies
    /// the overhang.
    ///
    fn overhang_blocks(
        isoform: &Isoform,
        genomic_start: u64,
        genomic_end: u64,
        read_len: u64,
        overhang: u64,
    ) -> Option<Vec<AlignedBlock>> {
        isoform
            .aligned_blocks(genomic_start, genomic_end, read_len)
            .filter(|blocks| blocks.iter().all(|b| b.length() >= overhang))
    }
}

impl GeneModel for Gene {
    type Isoform = Isoform;

    fn isoforms(&self) -> &[Isoform] {
        &self.isoforms
    }

    fn align_read(
        &self,
        genomic_start: u64,
        genomic_end: u64,
        read_len: u64,
        overhang: u64,
    ) -> ReadAlignment {
        let mut compatibility = Vec::with_capacity(self.isoforms.len());
        let mut category: Option<String> = None;

        for isoform in &self.isoforms {
            match Gene::overhang_blocks(isoform, genomic_start, genomic_end, read_len, overhang) {
                Some(blocks) => {
                    compatibility.push(1);
                    category.get_or_insert_with(|| Gene::category(isoform, &blocks));
                }
                None => compatibility.push(0),
            }
        }

        ReadAlignment {
            compatibility,
            category: category.unwrap_or_default(),
        }
    }

    fn align_read_pair(
        &self,
        left: (u64, u64),
        right: (u64, u64),
        read_len: u64,
        overhang: u64,
    ) -> PairAlignment {
        let mut compatibility = Vec::with_capacity(self.isoforms.len());
        let mut fragment_lengths = Vec::with_capacity(self.isoforms.len());

        for isoform in &self.isoforms {
            let left_ok = Gene::overhang_blocks(isoform, left.0, left.1, read_len, overhang);
            let right_ok = Gene::overhang_blocks(isoform, right.0, right.1, read_len, overhang);

            let span = match (left_ok, right_ok) {
                (Some(_), Some(_)) => isoform
                    .to_isoform(left.0)
                    .zip(isoform.to_isoform(right.1))
                    .filter(|((_, start), (_, end))| end >= start)
                    .map(|((_, start), (_, end))| end - start + 1),
                _ => None,
            };

            match span {
                Some(fragment_len) => {
                    compatibility.push(1);
                    fragment_lengths.push(fragment_len as f64);
                }
                None => {
                    compatibility.push(0);
                    fragment_lengths.push(UNALIGNED_FRAGMENT_LENGTH);
                }
            }
        }

        PairAlignment {
            compatibility,
            fragment_lengths,
        }
    }

    fn get_part_by_label(&self, label: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.label == label)
    }
}
