use isosim_core::{Result, SamplingError};

///
/// Number of reads per kilobase of mappable positions (RPKC).
///
/// Read counts and region lengths are summed independently, so the two
/// slices need not have the same length. Each region contributes
/// `length - read_len + 1` mappable positions.
///
/// # Example
/// ```
/// use isosim_stats::density::compute_rpkc;
///
/// let rpkc = compute_rpkc(&[100], &[300], 50).unwrap();
/// assert!((rpkc - 398.406).abs() < 1e-3);
/// ```
pub fn compute_rpkc(counts: &[u64], lengths: &[u64], read_len: u64) -> Result<f64> {
    let mappable: i64 = lengths
        .iter()
        .map(|&len| len as i64 - read_len as i64 + 1)
        .sum();
    if mappable <= 0 {
        return Err(SamplingError::degenerate(format!(
            "no mappable positions for read length {}",
            read_len
        )));
    }

    let total: u64 = counts.iter().sum();
    Ok(total as f64 / (mappable as f64 / 1000.0))
}
