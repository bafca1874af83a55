//! Setup-time context: the reaction a rate belongs to and the mechanism
//! that owns it.
//!
//! Rates resolve species names, phases and charges against this context
//! exactly once, in `set_context`, and cache the results in their own
//! numbering-independent form.

use std::fmt::Write;

use indexmap::IndexMap;

use crate::error::RateError;
use crate::id::{PhaseIndex, SpeciesIndex};

/// Physical state of a phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseKind {
    /// Ideal or real gas.
    Gas,
    /// Condensed bulk phase (electrolyte, electrode, solid).
    Bulk,
    /// Two-dimensional interface hosting adsorption sites.
    Interface,
    /// One-dimensional edge between interfaces.
    Edge,
}

/// Read-only view of the kinetics mechanism that owns a reaction.
///
/// Implemented by the surrounding reaction-network bookkeeping. All
/// lookups are consulted at setup time only.
pub trait Kinetics {
    /// Number of phases in the mechanism.
    fn n_phases(&self) -> usize;

    /// The interface phase on which the reactions take place.
    fn interface_phase(&self) -> PhaseIndex;

    /// Physical state of `phase`.
    fn phase_kind(&self, phase: PhaseIndex) -> PhaseKind;

    /// Kinetics-wide index of the species called `name`.
    fn kinetics_species_index(&self, name: &str) -> Option<SpeciesIndex>;

    /// Phase owning species `k`.
    fn species_phase(&self, k: SpeciesIndex) -> PhaseIndex;

    /// Electric charge of species `k` in units of the elementary charge.
    fn species_charge(&self, k: SpeciesIndex) -> f64;

    /// Molecular weight of species `k` [kg/kmol].
    fn molecular_weight(&self, k: SpeciesIndex) -> f64;

    /// Number of sites occupied by interface species `k`.
    ///
    /// Default: 1.
    fn site_size(&self, _k: SpeciesIndex) -> f64 {
        1.0
    }

    /// Standard concentration of species `k` in its phase.
    fn standard_concentration(&self, k: SpeciesIndex) -> f64;

    /// Species whose coverages populate
    /// [`CoverageData::coverages`](crate::CoverageData), in slot order.
    fn coverage_species(&self) -> &[String];

    /// Site density of the interface phase [kmol/m^2].
    fn site_density(&self) -> f64;

    /// Whether sticking reactions use the Motz-Wise correction unless they
    /// say otherwise.
    ///
    /// Default: `false`.
    fn motz_wise_default(&self) -> bool {
        false
    }

    /// Resolve `name`, failing with [`RateError::UnknownSpecies`].
    fn require_species(&self, name: &str, context: &str) -> Result<SpeciesIndex, RateError> {
        self.kinetics_species_index(name)
            .ok_or_else(|| RateError::UnknownSpecies {
                species: name.to_string(),
                context: context.to_string(),
            })
    }
}

/// Stoichiometric description of one reaction.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Reaction {
    /// Reactant species and their stoichiometric coefficients.
    pub reactants: IndexMap<String, f64>,
    /// Product species and their stoichiometric coefficients.
    pub products: IndexMap<String, f64>,
    /// Explicit reaction orders overriding reactant stoichiometry.
    pub orders: IndexMap<String, f64>,
    /// Whether the reaction is written as reversible.
    pub reversible: bool,
}

impl Reaction {
    /// Build an irreversible reaction from reactant and product lists.
    pub fn new<'a>(
        reactants: impl IntoIterator<Item = (&'a str, f64)>,
        products: impl IntoIterator<Item = (&'a str, f64)>,
    ) -> Self {
        let collect = |items: &mut dyn Iterator<Item = (&'a str, f64)>| {
            let mut out: IndexMap<String, f64> = IndexMap::new();
            for (name, nu) in items {
                *out.entry(name.to_string()).or_insert(0.0) += nu;
            }
            out
        };
        Self {
            reactants: collect(&mut reactants.into_iter()),
            products: collect(&mut products.into_iter()),
            orders: IndexMap::new(),
            reversible: false,
        }
    }

    /// Parse an equation such as `"2 H(S) <=> H2 + 2 PT(S)"`.
    ///
    /// Accepted separators are `<=>` and `=` (reversible) and `=>`
    /// (irreversible). Terms are separated by ` + ` and may carry a leading
    /// stoichiometric coefficient.
    pub fn from_equation(equation: &str) -> Result<Self, RateError> {
        let invalid = |reason: String| RateError::InvalidParameter { reason };
        let (lhs, rhs, reversible) = if let Some((l, r)) = equation.split_once("<=>") {
            (l, r, true)
        } else if let Some((l, r)) = equation.split_once("=>") {
            (l, r, false)
        } else if let Some((l, r)) = equation.split_once('=') {
            (l, r, true)
        } else {
            return Err(invalid(format!("no separator in equation '{equation}'")));
        };

        let parse_side = |side: &str| -> Result<IndexMap<String, f64>, RateError> {
            let mut out: IndexMap<String, f64> = IndexMap::new();
            for term in side.split(" + ") {
                let term = term.trim();
                let (nu, name) = match term.split_once(' ') {
                    Some((coeff, rest)) => match coeff.parse::<f64>() {
                        Ok(nu) => (nu, rest.trim()),
                        Err(_) => (1.0, term),
                    },
                    None => (1.0, term),
                };
                if name.is_empty() || name.contains(' ') {
                    return Err(invalid(format!(
                        "cannot read term '{term}' in equation '{equation}'"
                    )));
                }
                *out.entry(name.to_string()).or_insert(0.0) += nu;
            }
            Ok(out)
        };

        Ok(Self {
            reactants: parse_side(lhs)?,
            products: parse_side(rhs)?,
            orders: IndexMap::new(),
            reversible,
        })
    }

    /// Override the reaction order of a reactant.
    pub fn with_order(mut self, species: &str, order: f64) -> Self {
        self.orders.insert(species.to_string(), order);
        self
    }

    /// Effective order of `species`: explicit order, else its reactant
    /// stoichiometric coefficient, else zero.
    pub fn order(&self, species: &str) -> f64 {
        self.orders
            .get(species)
            .or_else(|| self.reactants.get(species))
            .copied()
            .unwrap_or(0.0)
    }

    /// Canonical equation string.
    pub fn equation(&self) -> String {
        let side = |terms: &IndexMap<String, f64>| {
            let mut s = String::new();
            for (i, (name, nu)) in terms.iter().enumerate() {
                if i > 0 {
                    s.push_str(" + ");
                }
                if *nu != 1.0 {
                    let _ = write!(s, "{nu} ");
                }
                s.push_str(name);
            }
            s
        };
        let arrow = if self.reversible { "<=>" } else { "=>" };
        format!("{} {arrow} {}", side(&self.reactants), side(&self.products))
    }
}
