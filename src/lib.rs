pub mod core;
pub mod distributions;
pub mod error;
pub mod filter;
pub mod io;
pub mod proposer;
pub mod rejection;
pub mod stats;

pub use crate::core::{rejection_sample, Generator};
pub use crate::distributions::{Distribution, Moment};
pub use crate::error::{AbcError, BoxError, Result};
pub use crate::filter::{AcceptanceFilter, Distance, DistanceFilter, EqualFilter};
pub use crate::proposer::{Proposer, ProposerSet};
pub use crate::rejection::{RejectionConfig, RejectionSampler};
