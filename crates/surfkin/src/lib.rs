//! Surfkin: rate coefficients for reactions at gas-surface and electrode
//! interfaces.
//!
//! This is the top-level facade crate that re-exports the public API of the
//! surfkin sub-crates. For most users, adding `surfkin` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use surfkin::prelude::*;
//!
//! // CO adsorption on platinum, given as a sticking coefficient.
//! let node = Node::from_json(r#"{
//!     "type": "sticking-Arrhenius",
//!     "sticking-coefficient": {"A": 0.84, "b": 0, "Ea": 0}
//! }"#).unwrap();
//! let mut rate = new_reaction_rate(&node).unwrap();
//!
//! // Resolve species against the mechanism.
//! let kinetics = surfkin_test_utils::fixtures::platinum_hydrogen();
//! let reaction = Reaction::from_equation("CO + PT(S) => CO(S)").unwrap();
//! rate.set_context(&reaction, &kinetics).unwrap();
//!
//! // One evaluation pass.
//! let mut data = kinetics.snapshot();
//! data.update_coverages(900.0, &[0.7, 0.1, 0.1, 0.1]).unwrap();
//! rate.update_from_struct(&data);
//! assert!(rate.eval_from_struct(&data) > 0.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `surfkin-core` | Constants, IDs, errors, units, `Node`, `CoverageData`, `Kinetics`, `RateLaw` |
//! | [`rates`] | `surfkin-rates` | Arrhenius and Blowers-Masel base laws |
//! | [`interface`] | `surfkin-interface` | Coverage corrections, interface and sticking rates |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits and constants (`surfkin-core`).
///
/// Contains the [`types::CoverageData`] snapshot, the setup-time
/// [`types::Kinetics`] and [`types::Reaction`] context, the configuration
/// [`types::Node`] and the [`types::RateLaw`] trait.
pub use surfkin_core as types;

/// Temperature-dependent base rate laws (`surfkin-rates`).
pub use surfkin_rates as rates;

/// Interface and sticking rates (`surfkin-interface`).
///
/// [`interface::CoverageBase`] and [`interface::StickingCoverage`] hold the
/// corrections; [`interface::InterfaceRate`] and
/// [`interface::StickingRate`] combine them with a base law.
pub use surfkin_interface as interface;

/// Common imports for typical surfkin usage.
///
/// ```rust
/// use surfkin::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use surfkin_core::{
        CoverageData, Kinetics, Node, PhaseIndex, PhaseKind, Quantity, RateLaw, Reaction,
        SpeciesIndex, UnitSystem, Value,
    };

    // Errors
    pub use surfkin_core::{NodeError, RateError};

    // Base laws
    pub use surfkin_rates::{Arrhenius, BlowersMasel};

    // Interface rates
    pub use surfkin_interface::{
        new_reaction_rate, CoverageBase, InterfaceArrheniusRate, InterfaceBlowersMaselRate,
        InterfaceRate, ReactionRate, StickingArrheniusRate, StickingBlowersMaselRate,
        StickingCoverage, StickingRate, ValidationWarning,
    };
}
