//! Test utilities and mock types for surfkin development.
//!
//! Provides [`MockKinetics`], a table-backed implementation of
//! [`Kinetics`] assembled with [`MockKineticsBuilder`], a [`BatchDriver`]
//! standing in for the batched dispatcher, and reusable mechanisms in
//! [`fixtures`].

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod driver;
pub mod fixtures;

pub use driver::BatchDriver;

use surfkin_core::{CoverageData, Kinetics, PhaseIndex, PhaseKind, SpeciesIndex};

struct MockPhase {
    name: String,
    kind: PhaseKind,
}

struct MockSpecies {
    name: String,
    phase: usize,
    molecular_weight: f64,
    charge: f64,
    size: f64,
    standard_concentration: Option<f64>,
}

/// Mock implementation of [`Kinetics`].
///
/// Species are numbered in the order they were added; coverage species are
/// the species of the interface phase, in that order.
pub struct MockKinetics {
    phases: Vec<MockPhase>,
    species: Vec<MockSpecies>,
    interface: usize,
    coverage_species: Vec<String>,
    site_density: f64,
    motz_wise: bool,
}

impl MockKinetics {
    pub fn builder() -> MockKineticsBuilder {
        MockKineticsBuilder {
            phases: Vec::new(),
            species: Vec::new(),
            interface: None,
            site_density: f64::NAN,
            motz_wise: false,
        }
    }

    pub fn n_species(&self) -> usize {
        self.species.len()
    }

    /// Name of phase `phase`.
    pub fn phase_name(&self, phase: PhaseIndex) -> &str {
        &self.phases[phase.0].name
    }

    /// A ready snapshot sized for this mechanism at 300 K, with the site
    /// density and standard concentrations filled in.
    pub fn snapshot(&self) -> CoverageData {
        let mut data = CoverageData::new();
        data.resize(self.coverage_species.len(), self.species.len(), self.phases.len());
        data.density = self.site_density;
        for (k, sp) in self.species.iter().enumerate() {
            data.standard_concentrations[k] = self.concentration_of(sp);
        }
        data.update_temperature(300.0);
        data
    }

    fn concentration_of(&self, sp: &MockSpecies) -> f64 {
        match sp.standard_concentration {
            Some(c) => c,
            None if sp.phase == self.interface => self.site_density / sp.size,
            None => 1.0,
        }
    }
}

impl Kinetics for MockKinetics {
    fn n_phases(&self) -> usize {
        self.phases.len()
    }

    fn interface_phase(&self) -> PhaseIndex {
        PhaseIndex(self.interface)
    }

    fn phase_kind(&self, phase: PhaseIndex) -> PhaseKind {
        self.phases[phase.0].kind
    }

    fn kinetics_species_index(&self, name: &str) -> Option<SpeciesIndex> {
        self.species
            .iter()
            .position(|s| s.name == name)
            .map(SpeciesIndex)
    }

    fn species_phase(&self, k: SpeciesIndex) -> PhaseIndex {
        PhaseIndex(self.species[k.0].phase)
    }

    fn species_charge(&self, k: SpeciesIndex) -> f64 {
        self.species[k.0].charge
    }

    fn molecular_weight(&self, k: SpeciesIndex) -> f64 {
        self.species[k.0].molecular_weight
    }

    fn site_size(&self, k: SpeciesIndex) -> f64 {
        self.species[k.0].size
    }

    fn standard_concentration(&self, k: SpeciesIndex) -> f64 {
        self.concentration_of(&self.species[k.0])
    }

    fn coverage_species(&self) -> &[String] {
        &self.coverage_species
    }

    fn site_density(&self) -> f64 {
        self.site_density
    }

    fn motz_wise_default(&self) -> bool {
        self.motz_wise
    }
}

/// Builder for [`MockKinetics`].
///
/// Phases are opened with [`gas_phase`](Self::gas_phase),
/// [`bulk_phase`](Self::bulk_phase) or
/// [`interface_phase`](Self::interface_phase); [`species`](Self::species)
/// adds to the most recent phase, and [`charge`](Self::charge),
/// [`size`](Self::size) and
/// [`standard_concentration`](Self::standard_concentration) modify the
/// most recent species.
pub struct MockKineticsBuilder {
    phases: Vec<MockPhase>,
    species: Vec<MockSpecies>,
    interface: Option<usize>,
    site_density: f64,
    motz_wise: bool,
}

impl MockKineticsBuilder {
    fn phase(mut self, name: &str, kind: PhaseKind) -> Self {
        self.phases.push(MockPhase {
            name: name.to_string(),
            kind,
        });
        self
    }

    pub fn gas_phase(self, name: &str) -> Self {
        self.phase(name, PhaseKind::Gas)
    }

    pub fn bulk_phase(self, name: &str) -> Self {
        self.phase(name, PhaseKind::Bulk)
    }

    /// Open the interface phase. The first one opened hosts the reactions.
    pub fn interface_phase(mut self, name: &str, site_density: f64) -> Self {
        if self.interface.is_none() {
            self.interface = Some(self.phases.len());
            self.site_density = site_density;
        }
        self.phase(name, PhaseKind::Interface)
    }

    /// Add a species to the most recent phase, opening a gas phase if
    /// there is none.
    pub fn species(mut self, name: &str, molecular_weight: f64) -> Self {
        if self.phases.is_empty() {
            self = self.gas_phase("gas");
        }
        self.species.push(MockSpecies {
            name: name.to_string(),
            phase: self.phases.len() - 1,
            molecular_weight,
            charge: 0.0,
            size: 1.0,
            standard_concentration: None,
        });
        self
    }

    pub fn charge(mut self, charge: f64) -> Self {
        if let Some(sp) = self.species.last_mut() {
            sp.charge = charge;
        }
        self
    }

    pub fn size(mut self, size: f64) -> Self {
        if let Some(sp) = self.species.last_mut() {
            sp.size = size;
        }
        self
    }

    pub fn standard_concentration(mut self, concentration: f64) -> Self {
        if let Some(sp) = self.species.last_mut() {
            sp.standard_concentration = Some(concentration);
        }
        self
    }

    /// Mechanism-wide Motz-Wise default for sticking reactions.
    pub fn motz_wise(mut self, enabled: bool) -> Self {
        self.motz_wise = enabled;
        self
    }

    pub fn build(self) -> MockKinetics {
        let interface = self.interface.unwrap_or(usize::MAX);
        let coverage_species = self
            .species
            .iter()
            .filter(|s| s.phase == interface)
            .map(|s| s.name.clone())
            .collect();
        MockKinetics {
            phases: self.phases,
            species: self.species,
            interface,
            coverage_species,
            site_density: self.site_density,
            motz_wise: self.motz_wise,
        }
    }
}
