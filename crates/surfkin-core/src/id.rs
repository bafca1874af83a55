//! Strongly-typed indices into a kinetics mechanism.

use std::fmt;

/// Identifies a species in the kinetics-wide species numbering.
///
/// `SpeciesIndex(k)` addresses slot `k` of the per-species vectors in
/// [`CoverageData`](crate::CoverageData) that are kinetics-wide
/// (standard chemical potentials, standard concentrations, enthalpies).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpeciesIndex(pub usize);

impl fmt::Display for SpeciesIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for SpeciesIndex {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

/// Identifies a phase participating in a kinetics mechanism.
///
/// Phase indices address [`CoverageData::electric_potentials`](crate::CoverageData).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PhaseIndex(pub usize);

impl fmt::Display for PhaseIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for PhaseIndex {
    fn from(v: usize) -> Self {
        Self(v)
    }
}
