pub mod alignment;
pub mod gene;
pub mod isoform;
pub mod part;
pub mod psi;
pub mod read;

// re-export for cleaner imports
pub use self::alignment::{PairAlignment, ReadAlignment, ReadClass, ReadSummary};
pub use self::gene::Gene;
pub use self::isoform::{AlignedBlock, Isoform};
pub use self::part::Part;
pub use self::psi::Psi;
pub use self::read::{
    PairedEndBatch, ReadBatch, SimulatedRead, SimulatedReadPair, TwoIsoformBatch, TwoIsoformRead,
};
