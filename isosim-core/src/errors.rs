use std::fmt::{self, Display};

use thiserror::Error;

/// Broad class of a failed simulation call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingErrorKind {
    /// Malformed input: Psi, isoform count, distribution parameters.
    Precondition,
    /// A draw that cannot produce a valid read, e.g. a fragment shorter than both mates.
    Infeasible,
    /// Inputs that leave nothing to sample from, e.g. zero valid read positions.
    Degenerate,
}

impl Display for SamplingErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SamplingErrorKind::Precondition => "precondition",
            SamplingErrorKind::Infeasible => "infeasible sample",
            SamplingErrorKind::Degenerate => "degenerate input",
        };
        write!(f, "{}", name)
    }
}

///
/// Error returned by every simulation and summary call. It only ever aborts
/// the current call; callers can retry with corrected inputs.
///
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind} error: {context}")]
pub struct SamplingError {
    pub kind: SamplingErrorKind,
    pub context: String,
}

impl SamplingError {
    pub fn precondition(context: impl Into<String>) -> Self {
        Self {
            kind: SamplingErrorKind::Precondition,
            context: context.into(),
        }
    }

    pub fn infeasible(context: impl Into<String>) -> Self {
        Self {
            kind: SamplingErrorKind::Infeasible,
            context: context.into(),
        }
    }

    pub fn degenerate(context: impl Into<String>) -> Self {
        Self {
            kind: SamplingErrorKind::Degenerate,
            context: context.into(),
        }
    }

    pub fn is_precondition(&self) -> bool {
        self.kind == SamplingErrorKind::Precondition
    }

    pub fn is_infeasible(&self) -> bool {
        self.kind == SamplingErrorKind::Infeasible
    }

    pub fn is_degenerate(&self) -> bool {
        self.kind == SamplingErrorKind::Degenerate
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneModelError {
    #[error("Part `{label}` ends ({end}) before it starts ({start})")]
    InvalidPart { label: String, start: u64, end: u64 },

    #[error("Isoform must contain at least one part")]
    EmptyIsoform,

    #[error("Parts `{0}` and `{1}` are unsorted or overlap")]
    OverlappingParts(String, String),

    #[error("Gene must contain at least one isoform")]
    EmptyGene,

    #[error("Part label `{0}` is used for two different regions")]
    ConflictingPartLabel(String),

    #[error("Sequence length {sequence} does not match isoform length {isoform}")]
    SequenceLengthMismatch { sequence: u64, isoform: u64 },

    #[error("Isoform coordinates {start}-{end} fall outside an isoform of length {length}")]
    CoordinatesOutOfRange { start: u64, end: u64, length: u64 },
}

impl From<GeneModelError> for SamplingError {
    fn from(err: GeneModelError) -> Self {
        SamplingError::precondition(format!("gene model: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, SamplingError>;

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_error_message_names_kind() {
        let err = SamplingError::infeasible("fragment of 80 bases is shorter than 2 * 50");
        assert_eq!(
            err.to_string(),
            "infeasible sample error: fragment of 80 bases is shorter than 2 * 50"
        );
        assert!(err.is_infeasible());
        assert!(!err.is_precondition());
    }

    #[rstest]
    fn test_gene_model_error_maps_to_precondition() {
        let err: SamplingError = GeneModelError::EmptyGene.into();
        assert!(err.is_precondition());
        assert!(err.context.contains("at least one isoform"));
    }
}
