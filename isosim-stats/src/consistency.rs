use isosim_core::consts::UNALIGNED_FRAGMENT_LENGTH;
use isosim_core::models::PairedEndBatch;

///
/// Check paired-end alignment entries of `(compatible, fragment_length)`.
///
/// Every aligned entry must carry a finite fragment length and every
/// unaligned entry the negative-infinity sentinel.
///
pub fn check_paired_end_read_consistency(entries: &[(u8, f64)]) -> bool {
    entries.iter().all(|&(compatible, fragment_length)| match compatible {
        0 => fragment_length == UNALIGNED_FRAGMENT_LENGTH,
        _ => fragment_length.is_finite(),
    })
}

/// Consistency of every pair in a simulated batch.
pub fn is_consistent_batch(batch: &PairedEndBatch) -> bool {
    check_paired_end_read_consistency(&batch.alignment_entries())
}
