//! Reference temperature-dependent rate laws.
//!
//! Both laws implement [`RateLaw`](surfkin_core::RateLaw) and can be
//! decorated by the interface and sticking rates of `surfkin-interface`:
//!
//! - [`Arrhenius`]: modified Arrhenius, `k = A T^b exp(-Ea / RT)`.
//! - [`BlowersMasel`]: Arrhenius with an activation energy that depends on
//!   the enthalpy change of the reaction.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod arrhenius;
pub mod blowers_masel;

pub use arrhenius::Arrhenius;
pub use blowers_masel::BlowersMasel;
