//! Ringspan Core
//!
//! Interval algebra over sequences that may be linear or circular. Every
//! operation is a pure function of its inputs and the sequence length, so
//! all of them can be called from any number of threads without locking.

pub mod error;
pub mod types;
pub mod position;
pub mod coords;
pub mod overlap;
pub mod trim;
pub mod deletion;
pub mod rebase;
pub mod selection;
pub mod gap;
pub mod region;

// Re-export commonly used types and functions
pub use error::{RangeError, RangeResult};
pub use types::{Feature, Range, Remainder, SeqPos, SequenceSpace, Strand, Topology};
pub use position::normalize;
pub use coords::split_if_circular;
pub use overlap::{collapse_overlaps, find_overlaps};
pub use trim::trim;
pub use deletion::{adjust_features_to_deletion, adjust_to_deletion};
pub use rebase::zero;
pub use selection::{get_zeroed_overlaps, visible_features};
pub use gap::{gap, gap_span};
pub use region::{consecutive_with, fuse, sub_range};

/// Version information for the ringspan core library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
