//! Analytic read-count expectations for known gene topologies.

use isosim_core::consts::{DOWNSTREAM_EXON_LABEL, SKIPPED_EXON_LABEL, UPSTREAM_EXON_LABEL};
use isosim_core::models::{Psi, ReadSummary};
use isosim_core::{GeneModel, Result, SamplingError};

/// Expected (NI, NE, NB) counts plus the reads lost to the overhang constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ExpectedReadSummary {
    pub ni: f64,
    pub ne: f64,
    pub nb: f64,
    pub overhang_excluded: f64,
}

impl ExpectedReadSummary {
    /// Expected number of reads that survive the overhang filter.
    pub fn kept(&self) -> f64 {
        self.ni + self.ne + self.nb
    }

    ///
    /// Expected NI/NE/NB fractions among kept reads, comparable to
    /// [ReadSummary::proportions].
    ///
    pub fn proportions(&self) -> Option<(f64, f64, f64)> {
        let kept = self.kept();
        if kept <= 0.0 {
            return None;
        }
        Some((self.ni / kept, self.ne / kept, self.nb / kept))
    }

    ///
    /// Largest absolute difference between the expected and observed class
    /// fractions.
    ///
    pub fn max_proportion_error(&self, observed: &ReadSummary) -> Option<f64> {
        let (ni, ne, nb) = self.proportions()?;
        let (oni, one, onb) = observed.proportions()?;
        Some(
            [(ni - oni).abs(), (ne - one).abs(), (nb - onb).abs()]
                .into_iter()
                .fold(0.0, f64::max),
        )
    }
}

/// Maps a gene topology to its closed-form read-count expectation.
pub trait ExpectationModel {
    fn expected_read_summary(
        &self,
        psi: &Psi,
        num_reads: u64,
        read_len: u64,
        overhang_len: u64,
    ) -> Result<ExpectedReadSummary>;
}

///
/// The two-isoform skipped-exon topology: isoform 0 is `A-B-C`, isoform 1
/// is `A-C`.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SkippedExonModel {
    pub upstream_len: u64,
    pub skipped_len: u64,
    pub downstream_len: u64,
}

impl SkippedExonModel {
    pub fn new(upstream_len: u64, skipped_len: u64, downstream_len: u64) -> Self {
        SkippedExonModel {
            upstream_len,
            skipped_len,
            downstream_len,
        }
    }

    ///
    /// Read exon lengths from the `A`, `B` and `C` parts of a two-isoform gene.
    ///
    pub fn from_gene<G: GeneModel>(gene: &G) -> Result<Self> {
        if gene.num_isoforms() != 2 {
            return Err(SamplingError::precondition(format!(
                "skipped-exon expectation requires two isoforms, got {}",
                gene.num_isoforms()
            )));
        }

        let part_len = |label: &str| {
            gene.get_part_by_label(label)
                .map(|part| part.length())
                .ok_or_else(|| {
                    SamplingError::precondition(format!("gene has no part labeled {:?}", label))
                })
        };

        Ok(SkippedExonModel::new(
            part_len(UPSTREAM_EXON_LABEL)?,
            part_len(SKIPPED_EXON_LABEL)?,
            part_len(DOWNSTREAM_EXON_LABEL)?,
        ))
    }

    pub fn isoform_lengths(&self) -> [u64; 2] {
        [
            self.upstream_len + self.skipped_len + self.downstream_len,
            self.upstream_len + self.downstream_len,
        ]
    }
}

impl ExpectationModel for SkippedExonModel {
    fn expected_read_summary(
        &self,
        psi: &Psi,
        num_reads: u64,
        read_len: u64,
        overhang_len: u64,
    ) -> Result<ExpectedReadSummary> {
        psi.check_isoform_count(2)?;
        if read_len == 0 || overhang_len == 0 {
            return Err(SamplingError::precondition(
                "read length and overhang length must be positive",
            ));
        }

        let [inclusion_len, exclusion_len] = self.isoform_lengths();
        let r = read_len as f64;
        let p1 = inclusion_len as f64 - r + 1.0;
        let p2 = exclusion_len as f64 - r + 1.0;
        if p1 <= 0.0 || p2 <= 0.0 {
            return Err(SamplingError::degenerate(format!(
                "read length {} leaves no positions on isoforms of length {} and {}",
                read_len, inclusion_len, exclusion_len
            )));
        }

        let flanking_exon = self.upstream_len.min(self.downstream_len);
        if flanking_exon < read_len || 2 * overhang_len > read_len + 1 {
            return Err(SamplingError::precondition(format!(
                "closed form needs upstream and downstream exons >= read length and \
                 2 * overhang <= read length + 1 (shortest flanking exon {}, read length {}, overhang {})",
                flanking_exon, read_len, overhang_len
            )));
        }
        // a skipped exon shorter than the read is exact unless one read can
        // break the overhang on both flanks at once
        let skipped = self.skipped_len;
        if skipped < overhang_len
            || (skipped + 2 <= read_len && skipped + 2 * overhang_len >= read_len + 2)
        {
            return Err(SamplingError::precondition(format!(
                "closed form does not cover a skipped exon of {} bases with read length {} and overhang {}",
                skipped, read_len, overhang_len
            )));
        }

        let o = overhang_len as f64;
        let n = num_reads as f64;
        let psi = psi[0];

        let psi_f = psi * p1 / (psi * p1 + (1.0 - psi) * p2);
        let junction = r + 1.0 - 2.0 * o;
        let constitutive =
            (self.upstream_len as f64 - r + 1.0) + (self.downstream_len as f64 - r + 1.0);

        let p_oh = 4.0 * (o - 1.0) / p1 * psi_f + 2.0 * (o - 1.0) / p2 * (1.0 - psi_f);
        let p_ni = psi_f * ((self.skipped_len as f64 - r + 1.0) + 2.0 * junction) / p1;
        let p_ne = (1.0 - psi_f) * junction / p2;
        let p_nb = psi_f * constitutive / p1 + (1.0 - psi_f) * constitutive / p2;

        Ok(ExpectedReadSummary {
            ni: p_ni * n,
            ne: p_ne * n,
            nb: p_nb * n,
            overhang_excluded: p_oh * n,
        })
    }
}

///
/// Expected counts for a skipped-exon gene, built from its `A`/`B`/`C` parts.
///
pub fn expected_read_summary<G: GeneModel>(
    gene: &G,
    psi: &Psi,
    num_reads: u64,
    read_len: u64,
    overhang_len: u64,
) -> Result<ExpectedReadSummary> {
    let model = SkippedExonModel::from_gene(gene)?;

    // the part lengths must add up to the isoforms the gene actually builds
    let lengths = gene.isoform_lengths();
    if lengths != model.isoform_lengths() {
        return Err(SamplingError::precondition(format!(
            "isoform lengths {:?} do not match a skipped-exon layout {:?}",
            lengths,
            model.isoform_lengths()
        )));
    }
    model.expected_read_summary(psi, num_reads, read_len, overhang_len)
}

#[cfg(test)]
mod tests {
    use super::*;

    use isosim_core::models::{Gene, Isoform, Part};
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn gene() -> Gene {
        Gene::skipped_exon("SE1", (1000, 1299), (2000, 2199), (3000, 3299)).unwrap()
    }

    #[rstest]
    fn test_model_from_gene(gene: Gene) {
        assert_eq!(
            SkippedExonModel::from_gene(&gene).unwrap(),
            SkippedExonModel::new(300, 200, 300)
        );
    }

    #[rstest]
    fn test_expected_counts_no_overhang(gene: Gene) {
        let psi = Psi::two_isoform(0.5).unwrap();
        let expected = expected_read_summary(&gene, &psi, 1000, 36, 1).unwrap();

        // P1 = 765, P2 = 565, so psi_f * N / P1 = (1 - psi_f) * N / P2 = N / 1330
        assert!((expected.ni - 1000.0 * 235.0 / 1330.0).abs() < 1e-9);
        assert!((expected.ne - 1000.0 * 35.0 / 1330.0).abs() < 1e-9);
        assert!((expected.nb - 1000.0 * 1060.0 / 1330.0).abs() < 1e-9);
        assert_eq!(expected.overhang_excluded, 0.0);
        assert!((expected.kept() - 1000.0).abs() < 1e-9);
    }

    #[rstest]
    #[case(0.0, 1)]
    #[case(0.3, 4)]
    #[case(0.8, 10)]
    #[case(1.0, 18)]
    fn test_expected_counts_cover_every_read(gene: Gene, #[case] psi: f64, #[case] overhang: u64) {
        let psi = Psi::two_isoform(psi).unwrap();
        let expected = expected_read_summary(&gene, &psi, 5000, 36, overhang).unwrap();
        assert!((expected.kept() + expected.overhang_excluded - 5000.0).abs() < 1e-6);
    }

    #[rstest]
    fn test_pure_exclusion_has_no_inclusion_reads(gene: Gene) {
        let psi = Psi::two_isoform(0.0).unwrap();
        let expected = expected_read_summary(&gene, &psi, 1000, 36, 1).unwrap();
        assert_eq!(expected.ni, 0.0);
        assert!(expected.ne > 0.0);
    }

    #[rstest]
    fn test_proportion_error(gene: Gene) {
        let psi = Psi::two_isoform(0.5).unwrap();
        let expected = expected_read_summary(&gene, &psi, 1330, 36, 1).unwrap();
        let observed = ReadSummary::new(235, 35, 1060);
        assert!(expected.max_proportion_error(&observed).unwrap() < 1e-9);
        assert_eq!(expected.max_proportion_error(&ReadSummary::default()), None);
    }

    #[rstest]
    fn test_read_longer_than_isoforms_is_degenerate() {
        let model = SkippedExonModel::new(10, 10, 10);
        let psi = Psi::two_isoform(0.5).unwrap();
        let err = model.expected_read_summary(&psi, 100, 50, 1).unwrap_err();
        assert!(err.is_degenerate());
    }

    #[rstest]
    #[case(SkippedExonModel::new(20, 200, 300), 1)]
    #[case(SkippedExonModel::new(300, 200, 20), 1)]
    #[case(SkippedExonModel::new(300, 20, 300), 10)]
    #[case(SkippedExonModel::new(300, 5, 300), 8)]
    fn test_uncovered_layouts_rejected(#[case] model: SkippedExonModel, #[case] overhang: u64) {
        let psi = Psi::two_isoform(0.5).unwrap();
        let err = model.expected_read_summary(&psi, 100, 36, overhang).unwrap_err();
        assert!(err.is_precondition());
    }

    #[rstest]
    fn test_short_skipped_exon() {
        let model = SkippedExonModel::new(300, 20, 300);
        let psi = Psi::two_isoform(0.5).unwrap();
        let expected = model.expected_read_summary(&psi, 1000, 36, 1).unwrap();

        // P1 = 585, P2 = 565; B + r - 1 = 55 positions touch the skipped exon
        assert!((expected.ni - 1000.0 * 55.0 / 1150.0).abs() < 1e-9);
        assert!((expected.ne - 1000.0 * 35.0 / 1150.0).abs() < 1e-9);
        assert!((expected.nb - 1000.0 * 1060.0 / 1150.0).abs() < 1e-9);
        assert!((expected.kept() - 1000.0).abs() < 1e-9);

        let with_overhang = model.expected_read_summary(&psi, 1000, 36, 4).unwrap();
        assert!((with_overhang.kept() + with_overhang.overhang_excluded - 1000.0).abs() < 1e-9);
    }

    #[rstest]
    fn test_missing_parts() {
        let gene = Gene::new(
            "NOPARTS",
            vec![
                Isoform::new(vec![Part::new("X", 0, 99).unwrap()]).unwrap(),
                Isoform::new(vec![Part::new("Y", 200, 299).unwrap()]).unwrap(),
            ],
        )
        .unwrap();
        let psi = Psi::two_isoform(0.5).unwrap();
        assert!(expected_read_summary(&gene, &psi, 100, 36, 1).unwrap_err().is_precondition());
    }

    #[rstest]
    fn test_wrong_psi_length(gene: Gene) {
        let psi = Psi::new(vec![0.2, 0.3, 0.5]).unwrap();
        assert!(expected_read_summary(&gene, &psi, 100, 36, 1).unwrap_err().is_precondition());
    }
}
