//! The shared per-pass snapshot consumed by interface rates.
//!
//! One [`CoverageData`] is owned by the dispatcher for each rate type. It is
//! refreshed once per evaluation pass and then handed read-only to every
//! reaction of that type. Reactions never mutate it.

use crate::constants::TINY;
use crate::error::RateError;

/// Temperature, coverage, potential and thermodynamic state shared by all
/// reactions of one rate type during one evaluation pass.
///
/// # Indexing
///
/// - `coverages` and `log_coverages` follow the order published by
///   [`Kinetics::coverage_species`](crate::Kinetics::coverage_species).
/// - `partial_molar_enthalpies`, `standard_chem_potentials` and
///   `standard_concentrations` follow the kinetics-wide
///   [`SpeciesIndex`](crate::SpeciesIndex) numbering.
/// - `electric_potentials` is indexed by [`PhaseIndex`](crate::PhaseIndex).
#[derive(Clone, Debug, PartialEq)]
pub struct CoverageData {
    /// Temperature [K].
    pub temperature: f64,
    /// `ln(temperature)`.
    pub log_t: f64,
    /// `1 / temperature`.
    pub recip_t: f64,
    /// `sqrt(temperature)`.
    pub sqrt_t: f64,
    /// Fractional site coverages.
    pub coverages: Vec<f64>,
    /// `ln(max(coverage, TINY))`.
    pub log_coverages: Vec<f64>,
    /// Partial molar enthalpies [J/kmol].
    pub partial_molar_enthalpies: Vec<f64>,
    /// Electric potential of each phase [V].
    pub electric_potentials: Vec<f64>,
    /// Standard chemical potentials [J/kmol].
    pub standard_chem_potentials: Vec<f64>,
    /// Standard concentrations [kmol/m^n].
    pub standard_concentrations: Vec<f64>,
    /// Site density of the interface [kmol/m^2].
    pub density: f64,
    /// Whether `density` and the species vectors are current for this pass.
    pub ready: bool,
    temperature_buf: Option<f64>,
}

impl Default for CoverageData {
    fn default() -> Self {
        Self::new()
    }
}

impl CoverageData {
    /// Create an empty, not-ready snapshot at 1 K.
    pub fn new() -> Self {
        Self {
            temperature: 1.0,
            log_t: 0.0,
            recip_t: 1.0,
            sqrt_t: f64::NAN,
            coverages: Vec::new(),
            log_coverages: Vec::new(),
            partial_molar_enthalpies: Vec::new(),
            electric_potentials: Vec::new(),
            standard_chem_potentials: Vec::new(),
            standard_concentrations: Vec::new(),
            density: f64::NAN,
            ready: false,
            temperature_buf: None,
        }
    }

    /// Size every vector for a mechanism and mark the snapshot ready.
    ///
    /// New slots are zero-filled; existing values are kept.
    pub fn resize(&mut self, n_coverage_species: usize, n_species: usize, n_phases: usize) {
        self.coverages.resize(n_coverage_species, 0.0);
        self.log_coverages.resize(n_coverage_species, TINY.ln());
        self.partial_molar_enthalpies.resize(n_species, 0.0);
        self.standard_chem_potentials.resize(n_species, 0.0);
        self.standard_concentrations.resize(n_species, 0.0);
        self.electric_potentials.resize(n_phases, 0.0);
        self.ready = true;
    }

    /// Update the derived temperature scalars.
    pub fn update_temperature(&mut self, temperature: f64) {
        self.temperature = temperature;
        self.log_t = temperature.ln();
        self.recip_t = 1.0 / temperature;
        self.sqrt_t = temperature.sqrt();
    }

    /// Update temperature and coverages together.
    ///
    /// The first call on an empty snapshot adopts the length of `coverages`;
    /// later calls must supply the same length. Site density is not touched.
    pub fn update_coverages(&mut self, temperature: f64, coverages: &[f64]) -> Result<(), RateError> {
        if self.coverages.is_empty() {
            self.coverages = coverages.to_vec();
            self.log_coverages = vec![0.0; coverages.len()];
        } else if coverages.len() == self.coverages.len() {
            self.coverages.copy_from_slice(coverages);
        } else {
            return Err(RateError::SnapshotMismatch {
                what: "coverage array",
                expected: self.coverages.len(),
                found: coverages.len(),
            });
        }
        for (log_theta, &theta) in self.log_coverages.iter_mut().zip(&self.coverages) {
            *log_theta = theta.max(TINY).ln();
        }
        self.update_temperature(temperature);
        Ok(())
    }

    /// Set the electric potential of `phase`, growing the vector if needed.
    pub fn set_electric_potential(&mut self, phase: usize, potential: f64) {
        if phase >= self.electric_potentials.len() {
            self.electric_potentials.resize(phase + 1, 0.0);
        }
        self.electric_potentials[phase] = potential;
    }

    /// Scale the temperature by `1 + delta_t`, remembering the original.
    ///
    /// Only one perturbation may be active; undo it with
    /// [`restore`](Self::restore).
    pub fn perturb_temperature(&mut self, delta_t: f64) -> Result<(), RateError> {
        if self.temperature_buf.is_some() {
            return Err(RateError::AlreadyPerturbed);
        }
        self.temperature_buf = Some(self.temperature);
        self.update_temperature(self.temperature * (1.0 + delta_t));
        Ok(())
    }

    /// Undo an active temperature perturbation. No-op otherwise.
    pub fn restore(&mut self) {
        if let Some(t) = self.temperature_buf.take() {
            self.update_temperature(t);
        }
    }

    /// Whether a temperature perturbation is active.
    pub fn is_perturbed(&self) -> bool {
        self.temperature_buf.is_some()
    }

    /// Mark temperature-derived data stale.
    pub fn invalidate_cache(&mut self) {
        self.temperature = f64::NAN;
        self.sqrt_t = f64::NAN;
    }
}
