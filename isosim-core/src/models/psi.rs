use std::fmt::{self, Display};
use std::ops::Index;

use crate::consts::PSI_TOLERANCE;
use crate::errors::{Result, SamplingError};

///
/// True relative abundance of each isoform of a gene. Entries are
/// non-negative, finite and sum to one (within [PSI_TOLERANCE]).
///
#[derive(Debug, Clone, PartialEq)]
pub struct Psi {
    values: Vec<f64>,
}

impl Psi {
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(SamplingError::precondition("Psi must have at least one entry"));
        }

        if let Some(bad) = values.iter().find(|v| !v.is_finite() || **v < 0.0) {
            return Err(SamplingError::precondition(format!(
                "Psi entries must be finite and non-negative, found {}",
                bad
            )));
        }

        let total: f64 = values.iter().sum();
        if (total - 1.0).abs() > PSI_TOLERANCE {
            return Err(SamplingError::precondition(format!(
                "Psi must sum to 1, sums to {}",
                total
            )));
        }

        Ok(Psi { values })
    }

    ///
    /// Psi of a two-isoform gene from the inclusion isoform's abundance.
    ///
    pub fn two_isoform(inclusion: f64) -> Result<Self> {
        Psi::new(vec![inclusion, 1.0 - inclusion])
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.values.iter()
    }

    ///
    /// Fail unless there is exactly one entry per isoform.
    ///
    pub fn check_isoform_count(&self, num_isoforms: usize) -> Result<()> {
        if self.len() != num_isoforms {
            return Err(SamplingError::precondition(format!(
                "Psi has {} entries but the gene has {} isoforms",
                self.len(),
                num_isoforms
            )));
        }
        Ok(())
    }
}

impl Index<usize> for Psi {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.values[index]
    }
}

impl TryFrom<Vec<f64>> for Psi {
    type Error = SamplingError;

    fn try_from(values: Vec<f64>) -> Result<Self> {
        Psi::new(values)
    }
}

impl TryFrom<&[f64]> for Psi {
    type Error = SamplingError;

    fn try_from(values: &[f64]) -> Result<Self> {
        Psi::new(values.to_vec())
    }
}

impl Display for Psi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries: Vec<String> = self.values.iter().map(|v| format!("{:.4}", v)).collect();
        write!(f, "[{}]", entries.join(", "))
    }
}
