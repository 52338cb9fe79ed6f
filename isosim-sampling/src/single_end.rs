use log::debug;
use rand::Rng;

use isosim_core::models::{
    Psi, ReadAlignment, ReadBatch, ReadClass, SimulatedRead, TwoIsoformBatch, TwoIsoformRead,
};
use isosim_core::{GeneModel, IsoformModel, Result, SamplingError};

use crate::consts::MAX_PREALLOCATED_READS;
use crate::noise::{NoiseConfig, NoiseInjector, NoiseOutcome};
use crate::position::PositionSampler;

///
/// A read as drawn, before the overhang filter.
///
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampledRead {
    pub isoform: usize,
    pub isoform_coords: (u64, u64),
    pub genomic_coords: (u64, u64),
    pub alignment: ReadAlignment,
}

impl SampledRead {
    pub fn into_read(self) -> SimulatedRead {
        SimulatedRead {
            compatibility: self.alignment.compatibility,
            category: self.alignment.category,
            isoform: self.isoform,
            isoform_coords: self.isoform_coords,
            genomic_coords: self.genomic_coords,
        }
    }
}

pub(crate) fn check_read_params(read_len: u64, overhang_len: u64) -> Result<()> {
    if read_len == 0 {
        return Err(SamplingError::precondition("read length must be positive"));
    }
    if overhang_len == 0 {
        return Err(SamplingError::precondition(
            "overhang length must be at least 1",
        ));
    }
    Ok(())
}

///
/// Draw one read: pick an isoform and start with `sampler`, place the read on
/// the genome and align it against every isoform of the gene.
///
pub fn sample_random_read<G, R>(
    gene: &G,
    sampler: &PositionSampler,
    read_len: u64,
    overhang_len: u64,
    rng: &mut R,
) -> Result<SampledRead>
where
    G: GeneModel,
    R: Rng,
{
    let position = sampler.sample(rng);
    let start = position.start;
    let end = start + read_len - 1;

    let isoform = gene.isoforms().get(position.isoform).ok_or_else(|| {
        SamplingError::precondition(format!(
            "sampler drew isoform {} but the gene has {}",
            position.isoform,
            gene.num_isoforms()
        ))
    })?;
    let (genomic_start, genomic_end) = isoform.isoform_coords_to_genomic(start, end)?;
    let alignment = gene.align_read(genomic_start, genomic_end, read_len, overhang_len);

    Ok(SampledRead {
        isoform: position.isoform,
        isoform_coords: (start, end),
        genomic_coords: (genomic_start, genomic_end),
        alignment,
    })
}

///
/// Simulate `num_reads` single-end reads from a gene with the given Psi.
///
/// Exactly `num_reads` reads are drawn; reads consistent with no isoform
/// (overhang violations) are dropped, so the batch can hold fewer reads.
///
pub fn simulate_reads<G, R>(
    gene: &G,
    psi: &Psi,
    num_reads: u64,
    read_len: u64,
    overhang_len: u64,
    rng: &mut R,
) -> Result<ReadBatch>
where
    G: GeneModel,
    R: Rng,
{
    check_read_params(read_len, overhang_len)?;
    psi.check_isoform_count(gene.num_isoforms())?;

    let sampler = PositionSampler::new(&gene.isoform_lengths(), read_len, psi)?;
    let mut batch = ReadBatch::with_capacity(num_reads.min(MAX_PREALLOCATED_READS) as usize);

    for _ in 0..num_reads {
        let sampled = sample_random_read(gene, &sampler, read_len, overhang_len, rng)?;
        batch.attempted += 1;
        if sampled.alignment.is_excluded() {
            continue;
        }
        batch.push(sampled.into_read());
    }

    debug!(
        "Simulated {} single-end reads, kept {} ({} excluded by overhang)",
        batch.attempted,
        batch.len(),
        batch.excluded()
    );

    Ok(batch)
}

///
/// Simulate `num_reads` single-end reads from a two-isoform gene, reducing
/// each kept read to its (NI, NE, NB) class and applying `noise`.
///
pub fn simulate_two_iso_reads<G, R>(
    gene: &G,
    psi: &Psi,
    num_reads: u64,
    read_len: u64,
    overhang_len: u64,
    noise: &NoiseConfig,
    rng: &mut R,
) -> Result<TwoIsoformBatch>
where
    G: GeneModel,
    R: Rng,
{
    if gene.num_isoforms() != 2 {
        return Err(SamplingError::precondition(format!(
            "two-isoform simulation requires a gene with exactly two isoforms, got {}",
            gene.num_isoforms()
        )));
    }
    check_read_params(read_len, overhang_len)?;
    psi.check_isoform_count(2)?;

    let injector = NoiseInjector::new(*noise)?;
    let sampler = PositionSampler::new(&gene.isoform_lengths(), read_len, psi)?;
    let mut batch = TwoIsoformBatch::default();

    for _ in 0..num_reads {
        let sampled = sample_random_read(gene, &sampler, read_len, overhang_len, rng)?;
        batch.attempted += 1;

        let Some(class) = ReadClass::from_compatibility(&sampled.alignment.compatibility)? else {
            continue;
        };
        batch.noiseless_summary += class;

        let read = TwoIsoformRead {
            class,
            category: sampled.alignment.category,
            isoform: sampled.isoform,
            genomic_coords: sampled.genomic_coords,
        };

        match injector.perturb(read.isoform, class, rng) {
            NoiseOutcome::Keep => batch.push(read),
            NoiseOutcome::Drop => {}
            NoiseOutcome::Duplicate => {
                batch.push(read.clone());
                batch.push(read);
            }
        }
    }

    if !noise.is_noiseless() {
        debug!(
            "Noiseless counts {}, noised counts {}",
            batch.noiseless_summary, batch.summary
        );
    }

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    use isosim_core::models::{Gene, Isoform, Part, ReadSummary};
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::*;

    #[fixture]
    fn gene() -> Gene {
        Gene::skipped_exon("SE1", (1000, 1299), (2000, 2199), (3000, 3299)).unwrap()
    }

    #[fixture]
    fn three_isoform_gene() -> Gene {
        let a = Part::new("A", 0, 199).unwrap();
        let b = Part::new("B", 500, 599).unwrap();
        let c = Part::new("C", 900, 1099).unwrap();
        let d = Part::new("D", 1500, 1649).unwrap();
        Gene::new(
            "MXE",
            vec![
                Isoform::new(vec![a.clone(), b.clone(), d.clone()]).unwrap(),
                Isoform::new(vec![a.clone(), c.clone(), d.clone()]).unwrap(),
                Isoform::new(vec![a, d]).unwrap(),
            ],
        )
        .unwrap()
    }

    #[rstest]
    fn test_reads_are_placed_inside_their_isoform(gene: Gene) {
        let psi = Psi::two_isoform(0.6).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let batch = simulate_reads(&gene, &psi, 2_000, 36, 4, &mut rng).unwrap();

        assert_eq!(batch.attempted, 2_000);
        for read in &batch {
            let isoform = &gene.isoforms()[read.isoform];
            let (start, end) = read.isoform_coords;
            assert_eq!(end - start + 1, 36);
            assert!(end < isoform.length());
            assert_eq!(read.compatibility[read.isoform], 1);
            assert!(!read.category.is_empty());
        }
    }

    #[rstest]
    fn test_overhang_exclusion_reduces_yield(gene: Gene) {
        let psi = Psi::two_isoform(0.5).unwrap();
        let mut rng = StdRng::seed_from_u64(2);

        let loose = simulate_reads(&gene, &psi, 5_000, 36, 1, &mut rng).unwrap();
        let strict = simulate_reads(&gene, &psi, 5_000, 36, 12, &mut rng).unwrap();

        assert_eq!(loose.excluded(), 0);
        assert!(strict.excluded() > 0);
        assert!(strict.len() < 5_000);
    }

    #[rstest]
    fn test_multi_isoform_reads(three_isoform_gene: Gene) {
        let psi = Psi::new(vec![0.2, 0.3, 0.5]).unwrap();
        let mut rng = StdRng::seed_from_u64(3);

        let batch = simulate_reads(&three_isoform_gene, &psi, 3_000, 50, 1, &mut rng).unwrap();

        assert_eq!(batch.len(), 3_000);
        assert!(batch.iter().all(|r| r.compatibility.len() == 3));
        for isoform in 0..3 {
            assert!(batch.isoforms().contains(&isoform));
        }
    }

    #[rstest]
    fn test_psi_must_match_isoforms(three_isoform_gene: Gene) {
        let psi = Psi::two_isoform(0.5).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let err = simulate_reads(&three_isoform_gene, &psi, 10, 50, 1, &mut rng).unwrap_err();
        assert!(err.is_precondition());
    }

    #[rstest]
    fn test_two_iso_requires_two_isoforms(three_isoform_gene: Gene) {
        let psi = Psi::new(vec![0.2, 0.3, 0.5]).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        let err = simulate_two_iso_reads(
            &three_isoform_gene,
            &psi,
            10,
            50,
            1,
            &NoiseConfig::default(),
            &mut rng,
        )
        .unwrap_err();
        assert!(err.is_precondition());
    }

    #[rstest]
    fn test_two_iso_summary_counts_kept_reads(gene: Gene) {
        let psi = Psi::two_isoform(0.7).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let batch = simulate_two_iso_reads(
            &gene,
            &psi,
            4_000,
            36,
            8,
            &NoiseConfig::default(),
            &mut rng,
        )
        .unwrap();

        assert_eq!(batch.summary, batch.noiseless_summary);
        assert_eq!(batch.summary.total(), batch.len() as u64);
        assert!(batch.len() < 4_000);
        assert_eq!(batch.categories().len(), batch.len());
        assert_eq!(batch.true_isoforms().len(), batch.len());
    }

    #[rstest]
    fn test_reserved_noise_is_a_no_op(gene: Gene) {
        let psi = Psi::two_isoform(0.5).unwrap();
        let reserved = NoiseConfig {
            p_ni_loss: 0.3,
            p_ni_gain: 0.3,
            ..Default::default()
        };

        let mut first = StdRng::seed_from_u64(6);
        let mut second = StdRng::seed_from_u64(6);
        let noiseless =
            simulate_two_iso_reads(&gene, &psi, 2_000, 36, 1, &NoiseConfig::default(), &mut first)
                .unwrap();
        let with_reserved =
            simulate_two_iso_reads(&gene, &psi, 2_000, 36, 1, &reserved, &mut second).unwrap();

        assert_eq!(noiseless, with_reserved);
    }

    #[rstest]
    fn test_exclusion_loss_removes_ne_reads(gene: Gene) {
        let psi = Psi::two_isoform(0.5).unwrap();
        let mut rng = StdRng::seed_from_u64(7);

        let batch = simulate_two_iso_reads(
            &gene,
            &psi,
            5_000,
            36,
            1,
            &NoiseConfig::exclusion(1.0, 0.0),
            &mut rng,
        )
        .unwrap();

        assert!(batch.noiseless_summary.ne > 0);
        assert_eq!(batch.summary.ne, 0);
        assert_eq!(batch.summary.ni, batch.noiseless_summary.ni);
        assert_eq!(batch.summary.nb, batch.noiseless_summary.nb);
    }

    #[rstest]
    fn test_exclusion_gain_duplicates_ne_reads(gene: Gene) {
        let psi = Psi::two_isoform(0.5).unwrap();
        let mut rng = StdRng::seed_from_u64(8);

        let batch = simulate_two_iso_reads(
            &gene,
            &psi,
            5_000,
            36,
            1,
            &NoiseConfig::exclusion(0.0, 1.0),
            &mut rng,
        )
        .unwrap();

        let noiseless = batch.noiseless_summary;
        assert_eq!(
            batch.summary,
            ReadSummary::new(noiseless.ni, 2 * noiseless.ne, noiseless.nb)
        );
        assert_eq!(batch.len() as u64, batch.summary.total());
    }
}
