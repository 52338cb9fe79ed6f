//! Tallies of simulated reads by isoform compatibility.

use std::fmt::{self, Display};

use log::info;

use isosim_core::models::{ReadBatch, ReadClass, ReadSummary, TwoIsoformBatch};
use isosim_core::{Result, SamplingError};

///
/// Tally two-column compatibility rows into (NI, NE, NB).
///
/// Rows consistent with neither isoform are not counted. Any row that does not
/// have exactly two columns is an error.
///
pub fn get_reads_summary<T: AsRef<[u8]>>(rows: &[T]) -> Result<ReadSummary> {
    let mut summary = ReadSummary::default();
    for row in rows {
        if let Some(class) = ReadClass::from_compatibility(row.as_ref())? {
            summary += class;
        }
    }
    Ok(summary)
}

///
/// Expand (NI, NE, NB) counts back into a list of two-column compatibility
/// rows, inclusion rows first.
///
pub fn read_counts_to_read_list(ni: u64, ne: u64, nb: u64) -> Vec<[u8; 2]> {
    [
        (ReadClass::Inclusion, ni),
        (ReadClass::Exclusion, ne),
        (ReadClass::Both, nb),
    ]
    .into_iter()
    .flat_map(|(class, count)| std::iter::repeat_n(class.compatibility(), count as usize))
    .collect()
}

/// Read counts of a gene with any number of isoforms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IsoformReadSummary {
    /// Reads consistent with exactly one isoform, indexed by isoform.
    pub unambiguous: Vec<u64>,
    /// Reads consistent with every isoform.
    pub constitutive: u64,
    pub total: u64,
}

impl Display for IsoformReadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "total: {}, constitutive: {}", self.total, self.constitutive)?;
        for (isoform, count) in self.unambiguous.iter().enumerate() {
            write!(f, ", isoform {}: {}", isoform, count)?;
        }
        Ok(())
    }
}

///
/// Count unambiguous and constitutive reads over rows of width `num_isoforms`.
///
pub fn isoform_read_summary<T: AsRef<[u8]>>(
    rows: &[T],
    num_isoforms: usize,
) -> Result<IsoformReadSummary> {
    let mut summary = IsoformReadSummary {
        unambiguous: vec![0; num_isoforms],
        ..Default::default()
    };

    for row in rows {
        let row = row.as_ref();
        if row.len() != num_isoforms {
            return Err(SamplingError::precondition(format!(
                "expected {} compatibility columns, got {}",
                num_isoforms,
                row.len()
            )));
        }
        summary.total += 1;

        let compatible: Vec<usize> = row
            .iter()
            .enumerate()
            .filter(|(_, flag)| **flag != 0)
            .map(|(i, _)| i)
            .collect();

        if compatible.len() == num_isoforms {
            summary.constitutive += 1;
        }
        // a single-isoform gene counts its reads as both
        if let [isoform] = compatible.as_slice() {
            summary.unambiguous[*isoform] += 1;
        }
    }

    Ok(summary)
}

///
/// Log an [IsoformReadSummary] of the given rows at info level and return it.
///
pub fn log_reads_summary<T: AsRef<[u8]>>(
    rows: &[T],
    num_isoforms: usize,
) -> Result<IsoformReadSummary> {
    let summary = isoform_read_summary(rows, num_isoforms)?;
    info!("Reads summary: {}", summary);
    Ok(summary)
}

/// Summaries computed directly from a batch of simulated reads.
pub trait ReadSetStatistics {
    /// (NI, NE, NB) counts. Fails unless reads carry two compatibility columns.
    fn reads_summary(&self) -> Result<ReadSummary>;

    /// Unambiguous and constitutive counts for `num_isoforms` isoforms.
    fn isoform_summary(&self, num_isoforms: usize) -> Result<IsoformReadSummary>;
}

impl ReadSetStatistics for ReadBatch {
    fn reads_summary(&self) -> Result<ReadSummary> {
        get_reads_summary(&self.compatibility_rows())
    }

    fn isoform_summary(&self, num_isoforms: usize) -> Result<IsoformReadSummary> {
        isoform_read_summary(&self.compatibility_rows(), num_isoforms)
    }
}

impl ReadSetStatistics for TwoIsoformBatch {
    fn reads_summary(&self) -> Result<ReadSummary> {
        Ok(self.summary)
    }

    fn isoform_summary(&self, num_isoforms: usize) -> Result<IsoformReadSummary> {
        isoform_read_summary(&self.compatibility_rows(), num_isoforms)
    }
}
