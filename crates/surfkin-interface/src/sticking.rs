//! Sticking-coefficient metadata.
//!
//! A sticking coefficient is the probability that a molecule hitting the
//! surface adsorbs. Turning it into a rate constant needs the kinetic-theory
//! collision flux of the sticking species, `sqrt(RT / (2πM))`, and the
//! conversion of every other reactant from coverage to concentration units.
//! [`StickingCoverage`] works these factors out once, in
//! [`set_context`](StickingCoverage::set_context).

use tracing::debug;

use surfkin_core::constants::{GAS_CONSTANT, PI};
use surfkin_core::{Kinetics, Node, PhaseKind, RateError, Reaction};

use crate::coverage::CoverageBase;

fn collision_factor(weight: f64) -> f64 {
    (GAS_CONSTANT / (2.0 * PI * weight)).sqrt()
}

/// Coverage corrections plus the sticking species, sticking order and
/// Motz-Wise flag of one sticking reaction.
#[derive(Clone, Debug)]
pub struct StickingCoverage {
    coverage: CoverageBase,
    motz_wise: bool,
    explicit_motz_wise: bool,
    sticking_species: String,
    explicit_species: bool,
    surface_order: f64,
    explicit_order: bool,
    /// `sqrt(R / (2πM))` of the sticking species.
    weight_factor: f64,
    explicit_weight: bool,
    /// Site-size and standard-concentration factors of the other reactants.
    reactant_factor: f64,
}

impl Default for StickingCoverage {
    fn default() -> Self {
        Self::new()
    }
}

impl StickingCoverage {
    /// Empty metadata: no species, order zero, unit multiplier.
    pub fn new() -> Self {
        Self {
            coverage: CoverageBase::new(),
            motz_wise: false,
            explicit_motz_wise: false,
            sticking_species: String::new(),
            explicit_species: false,
            surface_order: 0.0,
            explicit_order: false,
            weight_factor: 1.0,
            explicit_weight: false,
            reactant_factor: 1.0,
        }
    }

    /// The underlying coverage corrections.
    pub fn coverage(&self) -> &CoverageBase {
        &self.coverage
    }

    /// Mutable access to the coverage corrections.
    pub fn coverage_mut(&mut self) -> &mut CoverageBase {
        &mut self.coverage
    }

    /// Read `Motz-Wise` (or `motz-wise`) and `sticking-species`.
    ///
    /// Keys that are present become explicit and win over the defaults
    /// worked out in [`set_context`](Self::set_context).
    pub fn set_sticking_parameters(&mut self, node: &Node) -> Result<(), RateError> {
        let motz_wise = node.get("Motz-Wise").or_else(|| node.get("motz-wise"));
        match motz_wise {
            Some(value) => self.set_motz_wise_correction(value.as_bool("Motz-Wise")?),
            None => {
                self.motz_wise = false;
                self.explicit_motz_wise = false;
            }
        }
        match node.get_str("sticking-species")? {
            Some(species) => self.set_sticking_species(species),
            None => {
                self.sticking_species.clear();
                self.explicit_species = false;
            }
        }
        Ok(())
    }

    /// Write the keys read by
    /// [`set_sticking_parameters`](Self::set_sticking_parameters), only
    /// where they were set explicitly.
    pub fn get_sticking_parameters(&self, node: &mut Node) {
        if self.explicit_motz_wise {
            node.insert("Motz-Wise", self.motz_wise);
        }
        if self.explicit_species {
            node.insert("sticking-species", self.sticking_species.as_str());
        }
    }

    /// Whether the Motz-Wise correction `k / (1 - k/2)` is applied.
    pub fn motz_wise_correction(&self) -> bool {
        self.motz_wise
    }

    /// Enable or disable the Motz-Wise correction, overriding the
    /// mechanism-wide default.
    pub fn set_motz_wise_correction(&mut self, motz_wise: bool) {
        self.motz_wise = motz_wise;
        self.explicit_motz_wise = true;
    }

    /// Name of the sticking species. Empty until resolved or set.
    pub fn sticking_species(&self) -> &str {
        &self.sticking_species
    }

    /// Name the sticking species for reactions with several candidates.
    pub fn set_sticking_species(&mut self, species: &str) {
        self.sticking_species = species.to_string();
        self.explicit_species = true;
    }

    /// Exponent applied to the site density.
    pub fn sticking_order(&self) -> f64 {
        self.surface_order
    }

    /// Fix the sticking order instead of deriving it from the reaction.
    pub fn set_sticking_order(&mut self, order: f64) {
        self.surface_order = order;
        self.explicit_order = true;
    }

    /// Molecular weight of the sticking species [kg/kmol].
    pub fn sticking_weight(&self) -> f64 {
        GAS_CONSTANT / (2.0 * PI * self.weight_factor * self.weight_factor)
    }

    /// Fix the molecular weight of the sticking species [kg/kmol].
    pub fn set_sticking_weight(&mut self, weight: f64) {
        self.weight_factor = collision_factor(weight);
        self.explicit_weight = true;
    }

    /// Full conversion multiplier, excluding `sqrt(T)` and the site-density
    /// power.
    pub fn multiplier(&self) -> f64 {
        self.weight_factor * self.reactant_factor
    }

    /// Resolve coverage data, then the sticking species, order and
    /// multiplier.
    pub fn set_context(&mut self, reaction: &Reaction, kinetics: &dyn Kinetics) -> Result<(), RateError> {
        self.coverage.set_context(reaction, kinetics)?;
        if !self.explicit_motz_wise {
            self.motz_wise = kinetics.motz_wise_default();
        }

        let surface = kinetics.interface_phase();
        let mut gas_species = Vec::new();
        let mut any_species = Vec::new();
        for name in reaction.reactants.keys() {
            let k = kinetics.require_species(name, "sticking reaction")?;
            let phase = kinetics.species_phase(k);
            if phase != surface {
                any_species.push(name.as_str());
                if kinetics.phase_kind(phase) == PhaseKind::Gas {
                    gas_species.push(name.as_str());
                }
            }
        }

        if self.explicit_species {
            if !reaction.reactants.contains_key(&self.sticking_species) {
                return Err(RateError::UnknownSpecies {
                    species: self.sticking_species.clone(),
                    context: format!("sticking species of reaction '{}'", reaction.equation()),
                });
            }
        } else if let [species] = gas_species.as_slice() {
            self.sticking_species = species.to_string();
        } else if let [species] = any_species.as_slice() {
            self.sticking_species = species.to_string();
        } else {
            return Err(RateError::AmbiguousStickingSpecies {
                equation: reaction.equation(),
            });
        }
        debug!(
            equation = %reaction.equation(),
            species = %self.sticking_species,
            "resolved sticking species"
        );

        let mut surface_order = 0.0;
        let mut reactant_factor = 1.0;
        let mut weight_factor = self.weight_factor;
        for name in reaction.reactants.keys() {
            let k = kinetics.require_species(name, "sticking reaction")?;
            if *name == self.sticking_species {
                if !self.explicit_weight {
                    weight_factor = collision_factor(kinetics.molecular_weight(k));
                }
                continue;
            }
            let order = reaction.order(name);
            if kinetics.species_phase(k) == surface {
                reactant_factor *= kinetics.site_size(k).powf(order);
                surface_order += order;
            } else {
                reactant_factor *= kinetics.standard_concentration(k).powf(-order);
            }
        }

        if !self.explicit_order {
            self.surface_order = surface_order;
        }
        self.weight_factor = weight_factor;
        self.reactant_factor = reactant_factor;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surfkin_core::Value;
    use surfkin_test_utils::MockKinetics;

    fn kinetics() -> MockKinetics {
        MockKinetics::builder()
            .gas_phase("gas")
            .species("H2", 2.016)
            .species("O2", 31.998)
            .species("CO", 28.010)
            .standard_concentration(0.04)
            .interface_phase("surf", 2.7e-9)
            .species("PT(S)", 195.08)
            .species("H(S)", 1.008)
            .species("O2(S)", 31.998)
            .size(2.0)
            .build()
    }

    #[test]
    fn single_gas_reactant_is_sticking_species() {
        let kin = kinetics();
        let rxn = Reaction::from_equation("H2 + 2 PT(S) => 2 H(S)").unwrap();
        let mut sticking = StickingCoverage::new();
        sticking.set_context(&rxn, &kin).unwrap();
        assert_eq!(sticking.sticking_species(), "H2");
        assert_eq!(sticking.sticking_order(), 2.0);
        assert!((sticking.sticking_weight() - 2.016).abs() < 1e-12);
        assert!((sticking.multiplier() - collision_factor(2.016)).abs() < 1e-15);
    }

    #[test]
    fn several_gas_reactants_need_explicit_species() {
        let kin = kinetics();
        let rxn = Reaction::from_equation("CO + O2 + PT(S) => O2(S) + CO").unwrap();
        let mut sticking = StickingCoverage::new();
        let err = sticking.set_context(&rxn, &kin).unwrap_err();
        assert!(matches!(err, RateError::AmbiguousStickingSpecies { .. }));

        sticking.set_sticking_species("O2");
        sticking.set_context(&rxn, &kin).unwrap();
        assert_eq!(sticking.sticking_species(), "O2");
        // CO is converted with its standard concentration
        let expected = collision_factor(31.998) * 0.04f64.powf(-1.0);
        assert!((sticking.multiplier() - expected).abs() <= 1e-12 * expected);
        assert_eq!(sticking.sticking_order(), 1.0);
    }

    #[test]
    fn explicit_species_must_be_reactant() {
        let kin = kinetics();
        let rxn = Reaction::from_equation("H2 + 2 PT(S) => 2 H(S)").unwrap();
        let mut sticking = StickingCoverage::new();
        sticking.set_sticking_species("O2");
        let err = sticking.set_context(&rxn, &kin).unwrap_err();
        assert!(matches!(err, RateError::UnknownSpecies { ref species, .. } if species == "O2"));
    }

    #[test]
    fn site_size_enters_multiplier() {
        let kin = kinetics();
        let rxn = Reaction::from_equation("H2 + O2(S) => 2 H(S) + O2(S)").unwrap();
        let mut sticking = StickingCoverage::new();
        sticking.set_context(&rxn, &kin).unwrap();
        let expected = collision_factor(2.016) * 2.0;
        assert!((sticking.multiplier() - expected).abs() <= 1e-12 * expected);
    }

    #[test]
    fn explicit_order_and_weight_survive_context() {
        let kin = kinetics();
        let rxn = Reaction::from_equation("H2 + 2 PT(S) => 2 H(S)").unwrap();
        let mut sticking = StickingCoverage::new();
        sticking.set_sticking_order(1.0);
        sticking.set_sticking_weight(4.0);
        sticking.set_context(&rxn, &kin).unwrap();
        assert_eq!(sticking.sticking_order(), 1.0);
        assert!((sticking.sticking_weight() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn motz_wise_default_from_mechanism() {
        let kin = MockKinetics::builder()
            .gas_phase("gas")
            .species("H2", 2.016)
            .interface_phase("surf", 2.7e-9)
            .species("PT(S)", 195.08)
            .species("H(S)", 1.008)
            .motz_wise(true)
            .build();
        let rxn = Reaction::from_equation("H2 + 2 PT(S) => 2 H(S)").unwrap();

        let mut implicit = StickingCoverage::new();
        implicit.set_context(&rxn, &kin).unwrap();
        assert!(implicit.motz_wise_correction());

        let mut explicit = StickingCoverage::new();
        explicit.set_motz_wise_correction(false);
        explicit.set_context(&rxn, &kin).unwrap();
        assert!(!explicit.motz_wise_correction());
    }

    #[test]
    fn sticking_parameters_round_trip() {
        let mut node = Node::new();
        node.insert("motz-wise", true);
        node.insert("sticking-species", "O2");
        let mut sticking = StickingCoverage::new();
        sticking.set_sticking_parameters(&node).unwrap();
        assert!(sticking.motz_wise_correction());

        let mut out = Node::new();
        sticking.get_sticking_parameters(&mut out);
        assert_eq!(out.get("Motz-Wise"), Some(&Value::Bool(true)));
        assert_eq!(out.get_str("sticking-species").unwrap(), Some("O2"));

        let mut empty = Node::new();
        StickingCoverage::new().get_sticking_parameters(&mut empty);
        assert!(empty.is_empty());
    }
}
