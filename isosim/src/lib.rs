#[cfg(feature = "core")]
#[doc(inline)]
pub use isosim_core as core;

#[cfg(feature = "sampling")]
#[doc(inline)]
pub use isosim_sampling as sampling;

#[cfg(feature = "stats")]
#[doc(inline)]
pub use isosim_stats as stats;
