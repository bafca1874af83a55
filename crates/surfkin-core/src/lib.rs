//! Core types and traits for surfkin interface kinetics.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! abstractions shared by every rate parameterization in the workspace:
//! physical constants, species and phase IDs, error types, unit handling,
//! configuration records, the per-pass [`CoverageData`] snapshot, the
//! setup-time [`Reaction`] and [`Kinetics`] context, and the [`RateLaw`]
//! capability implemented by base rate laws.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod constants;
pub mod context;
pub mod data;
pub mod error;
pub mod id;
pub mod node;
pub mod traits;
pub mod units;

pub use context::{Kinetics, PhaseKind, Reaction};
pub use data::CoverageData;
pub use error::{NodeError, RateError};
pub use id::{PhaseIndex, SpeciesIndex};
pub use node::{Node, Quantity, Value};
pub use traits::RateLaw;
pub use units::{EnergyUnit, UnitSystem};
