//! Coverage- and potential-dependent rate coefficients for interface
//! reactions.
//!
//! Wraps any [`RateLaw`](surfkin_core::RateLaw) with:
//!
//! - [`CoverageBase`]: coverage-dependent corrections to the pre-exponential
//!   factor, activation energy and reaction order, plus the Butler-Volmer
//!   correction for charge-transfer reactions.
//! - [`StickingCoverage`]: sticking species, sticking order and Motz-Wise
//!   flag for reactions parameterized by a sticking coefficient.
//!
//! [`InterfaceRate`] and [`StickingRate`] compose a base law with these and
//! implement the object-safe [`ReactionRate`] trait consumed by a batched
//! dispatcher. [`new_reaction_rate`] builds one from a configuration record.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coverage;
pub mod factory;
pub mod interface_rate;
pub mod rate;
pub mod sticking;
pub mod sticking_rate;

pub use coverage::{CoverageBase, CoverageDependency};
pub use factory::new_reaction_rate;
pub use interface_rate::InterfaceRate;
pub use rate::{ReactionRate, ValidationWarning};
pub use sticking::StickingCoverage;
pub use sticking_rate::StickingRate;

use surfkin_rates::{Arrhenius, BlowersMasel};

/// Interface rate with a modified Arrhenius base law.
pub type InterfaceArrheniusRate = InterfaceRate<Arrhenius>;
/// Interface rate with a Blowers-Masel base law.
pub type InterfaceBlowersMaselRate = InterfaceRate<BlowersMasel>;
/// Sticking rate with a modified Arrhenius sticking coefficient.
pub type StickingArrheniusRate = StickingRate<Arrhenius>;
/// Sticking rate with a Blowers-Masel sticking coefficient.
pub type StickingBlowersMaselRate = StickingRate<BlowersMasel>;
