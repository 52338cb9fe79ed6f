use log::debug;
use rand::Rng;

use isosim_core::models::{PairedEndBatch, Psi, SimulatedReadPair};
use isosim_core::{GeneModel, IsoformModel, Result, SamplingError};

use crate::consts::MAX_PREALLOCATED_READS;
use crate::fragment::FragmentLengthModel;
use crate::position::sample_isoform_and_start;
use crate::single_end::check_read_params;

///
/// Draw a fragment length and return it with its insert length
/// (`fragment - 2 * read_len`).
///
/// A draw shorter than both mates fails the call immediately instead of
/// being redrawn.
///
pub fn sample_fragment_length<R: Rng>(
    model: &FragmentLengthModel,
    read_len: u64,
    rng: &mut R,
) -> Result<(u64, u64)> {
    let fragment_len = model.sample(rng)?;
    let mates_len = 2 * read_len as i64;

    if fragment_len < mates_len {
        return Err(SamplingError::infeasible(format!(
            "sampled fragment length {} is shorter than 2 * read_len ({})",
            fragment_len, mates_len
        )));
    }

    let fragment_len = fragment_len as u64;
    Ok((fragment_len, fragment_len - 2 * read_len))
}

///
/// Draw one read pair with a fixed fragment length: choose an isoform and a
/// fragment start, place both mates on the genome and align the pair.
///
pub fn sample_random_read_pair<G, R>(
    gene: &G,
    psi: &Psi,
    read_len: u64,
    overhang_len: u64,
    fragment_len: u64,
    rng: &mut R,
) -> Result<SimulatedReadPair>
where
    G: GeneModel,
    R: Rng,
{
    if fragment_len < 2 * read_len {
        return Err(SamplingError::infeasible(format!(
            "fragment length {} is shorter than 2 * read_len ({})",
            fragment_len,
            2 * read_len
        )));
    }
    let insert_len = fragment_len - 2 * read_len;

    let position = sample_isoform_and_start(&gene.isoform_lengths(), fragment_len, psi, rng)?;
    let isoform = gene.isoforms().get(position.isoform).ok_or_else(|| {
        SamplingError::precondition(format!(
            "sampler drew isoform {} but the gene has {}",
            position.isoform,
            gene.num_isoforms()
        ))
    })?;

    let left_start = position.start;
    let left_end = left_start + read_len - 1;
    let right_start = left_start + read_len + insert_len;
    let right_end = left_start + 2 * read_len + insert_len - 1;

    let left = isoform.isoform_coords_to_genomic(left_start, left_end)?;
    let right = isoform.isoform_coords_to_genomic(right_start, right_end)?;
    let alignment = gene.align_read_pair(left, right, read_len, overhang_len);

    Ok(SimulatedReadPair {
        compatibility: alignment.compatibility,
        fragment_lengths: alignment.fragment_lengths,
        fragment_length: fragment_len,
        isoform: position.isoform,
        left,
        right,
    })
}

///
/// Simulate `num_reads` read pairs from a gene with the given Psi. Each pair
/// draws its own fragment length from `fragment_model`.
///
pub fn simulate_paired_end_reads<G, R>(
    gene: &G,
    psi: &Psi,
    num_reads: u64,
    read_len: u64,
    overhang_len: u64,
    fragment_model: &FragmentLengthModel,
    rng: &mut R,
) -> Result<PairedEndBatch>
where
    G: GeneModel,
    R: Rng,
{
    check_read_params(read_len, overhang_len)?;
    psi.check_isoform_count(gene.num_isoforms())?;

    let reserved = num_reads.min(MAX_PREALLOCATED_READS) as usize;
    let mut batch = PairedEndBatch {
        pairs: Vec::with_capacity(reserved),
        sampled_fragment_lengths: Vec::with_capacity(reserved),
    };

    for _ in 0..num_reads {
        let (fragment_len, _) = sample_fragment_length(fragment_model, read_len, rng)?;
        batch.sampled_fragment_lengths.push(fragment_len as i64);

        let pair = sample_random_read_pair(gene, psi, read_len, overhang_len, fragment_len, rng)?;
        batch.pairs.push(pair);
    }

    debug!(
        "Simulated {} read pairs (mean fragment length {})",
        batch.len(),
        fragment_model.mean()
    );

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;

    use isosim_core::consts::UNALIGNED_FRAGMENT_LENGTH;
    use isosim_core::models::Gene;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rstest::*;

    #[fixture]
    fn gene() -> Gene {
        Gene::skipped_exon("SE1", (1000, 1399), (2000, 2199), (3000, 3399)).unwrap()
    }

    #[rstest]
    fn test_short_fragment_fails_fast(gene: Gene) {
        let psi = Psi::two_isoform(0.5).unwrap();
        let model = FragmentLengthModel::new(80.0, 1.0, false).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        let err = simulate_paired_end_reads(&gene, &psi, 100, 50, 1, &model, &mut rng).unwrap_err();
        assert!(err.is_infeasible());
    }

    #[rstest]
    fn test_huge_read_count_fails_before_reserving(gene: Gene) {
        let psi = Psi::two_isoform(0.5).unwrap();
        let model = FragmentLengthModel::new(80.0, 1.0, false).unwrap();
        let mut rng = StdRng::seed_from_u64(6);

        let err =
            simulate_paired_end_reads(&gene, &psi, u64::MAX, 50, 1, &model, &mut rng).unwrap_err();
        assert!(err.is_infeasible());
    }

    #[rstest]
    fn test_mates_share_one_fragment(gene: Gene) {
        let psi = Psi::two_isoform(0.5).unwrap();
        let model = FragmentLengthModel::new(250.0, 400.0, false).unwrap();
        let mut rng = StdRng::seed_from_u64(2);

        let batch = simulate_paired_end_reads(&gene, &psi, 1_000, 50, 1, &model, &mut rng).unwrap();

        assert_eq!(batch.len(), 1_000);
        assert_eq!(batch.sampled_fragment_lengths.len(), 1_000);
        for (pair, &sampled) in batch.iter().zip(&batch.sampled_fragment_lengths) {
            assert_eq!(pair.fragment_length as i64, sampled);
            assert!(pair.fragment_length >= 100);
            // the generating isoform always sees the sampled fragment
            assert_eq!(pair.compatibility[pair.isoform], 1);
            assert_eq!(
                pair.fragment_lengths[pair.isoform],
                pair.fragment_length as f64
            );
            for (&flag, &len) in pair.compatibility.iter().zip(&pair.fragment_lengths) {
                assert_eq!(flag == 0, len == UNALIGNED_FRAGMENT_LENGTH);
            }
        }
    }

    #[rstest]
    fn test_fragment_longer_than_isoforms_is_degenerate(gene: Gene) {
        let psi = Psi::two_isoform(0.5).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let err = sample_random_read_pair(&gene, &psi, 50, 1, 5_000, &mut rng).unwrap_err();
        assert!(err.is_degenerate());
    }

    #[rstest]
    fn test_sample_fragment_length_insert() {
        let model = FragmentLengthModel::new(300.0, 0.0, false).unwrap();
        let mut rng = StdRng::seed_from_u64(4);
        assert_eq!(sample_fragment_length(&model, 100, &mut rng).unwrap(), (300, 100));
        assert!(sample_fragment_length(&model, 151, &mut rng).unwrap_err().is_infeasible());
    }

    #[rstest]
    fn test_binomial_fragment_sampling(gene: Gene) {
        let psi = Psi::two_isoform(0.3).unwrap();
        let model = FragmentLengthModel::new(250.0, 100.0, true).unwrap();
        let mut rng = StdRng::seed_from_u64(5);

        let batch = simulate_paired_end_reads(&gene, &psi, 500, 40, 1, &model, &mut rng).unwrap();
        let mean = batch.sampled_fragment_lengths.iter().sum::<i64>() as f64 / 500.0;
        assert!((mean - 250.0).abs() < 3.0);
    }
}
