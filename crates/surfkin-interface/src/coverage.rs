//! Coverage-dependent and electrochemical corrections shared by interface
//! and sticking rates.
//!
//! A [`CoverageBase`] holds a table of per-species coverage parameters
//! `(a, m, E)` and, for charge-transfer reactions, the stoichiometry and
//! per-phase charge changes needed for a Butler-Volmer correction. Each
//! evaluation pass it folds the shared [`CoverageData`] snapshot into three
//! scalars:
//!
//! ```text
//! acov = Σ a_k θ_k
//! ecov = Σ E_k θ_k
//! mcov = Σ m_k ln θ_k
//! ```
//!
//! which the owning rate combines as `10^acov · exp(-ecov / T) · exp(mcov)`.

use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::debug;

use surfkin_core::constants::{FARADAY, GAS_CONSTANT};
use surfkin_core::{
    CoverageData, Kinetics, Node, NodeError, PhaseIndex, Quantity, RateError, Reaction,
    SpeciesIndex, UnitSystem, Value,
};

/// Default electrochemical transfer coefficient.
pub const DEFAULT_BETA: f64 = 0.5;

/// Coverage parameters of one species.
///
/// `e` is stored in Kelvin (energy divided by the gas constant).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoverageDependency {
    /// Exponent of ten multiplying the coverage.
    pub a: f64,
    /// Power applied to the coverage.
    pub m: f64,
    /// Activation-energy contribution per unit coverage [K].
    pub e: f64,
}

impl CoverageDependency {
    fn from_value(species: &str, value: &Value, units: &UnitSystem) -> Result<Self, NodeError> {
        match value {
            Value::Map(node) => Ok(Self {
                a: node.require_f64("a")?,
                m: node.require_f64("m")?,
                e: units.convert_activation_energy(node.require("E")?)?,
            }),
            Value::List(_) => {
                let list = value.as_list_of(species, 3)?;
                Ok(Self {
                    a: list[0].as_f64(species)?,
                    m: list[1].as_f64(species)?,
                    e: units.convert_activation_energy(&list[2])?,
                })
            }
            other => Err(NodeError::TypeMismatch {
                key: species.to_string(),
                expected: "map or list",
                found: other.kind(),
            }),
        }
    }

    fn to_value(self, as_list: bool) -> Value {
        let e = Quantity::new(self.e, "K");
        if as_list {
            Value::List(vec![self.a.into(), self.m.into(), e.into()])
        } else {
            let mut node = Node::new();
            node.insert("a", self.a);
            node.insert("m", self.m);
            node.insert("E", e);
            Value::Map(node)
        }
    }
}

/// Coverage and potential corrections for one reaction.
///
/// Lifecycle:
///
/// 1. [`set_parameters`](Self::set_parameters) or
///    [`add_coverage_dependence`](Self::add_coverage_dependence) fill the
///    coverage table.
/// 2. [`set_context`](Self::set_context) resolves species against the
///    mechanism. Until then, [`update_from_struct`](Self::update_from_struct)
///    sets the cached scalars to NaN.
/// 3. Each pass, `update_from_struct` caches `acov`, `ecov`, `mcov` and the
///    electrochemical terms.
#[derive(Clone, Debug)]
pub struct CoverageBase {
    dependencies: IndexMap<String, CoverageDependency>,
    /// Coverage slot of each table row, in table order.
    indices: Vec<usize>,
    site_density: f64,
    acov: f64,
    ecov: f64,
    mcov: f64,
    charge_transfer: bool,
    explicit_charge_transfer: bool,
    beta: f64,
    exchange_current_density: bool,
    stoich: SmallVec<[(SpeciesIndex, f64); 6]>,
    net_charges: SmallVec<[(PhaseIndex, f64); 4]>,
    delta_potential_rt: f64,
    delta_gibbs0_rt: f64,
    prod_standard_concentrations: f64,
}

impl Default for CoverageBase {
    fn default() -> Self {
        Self::new()
    }
}

impl CoverageBase {
    /// An empty table with no electrochemistry.
    pub fn new() -> Self {
        Self {
            dependencies: IndexMap::new(),
            indices: Vec::new(),
            site_density: f64::NAN,
            acov: 0.0,
            ecov: 0.0,
            mcov: 0.0,
            charge_transfer: false,
            explicit_charge_transfer: false,
            beta: DEFAULT_BETA,
            exchange_current_density: false,
            stoich: SmallVec::new(),
            net_charges: SmallVec::new(),
            delta_potential_rt: 0.0,
            delta_gibbs0_rt: 0.0,
            prod_standard_concentrations: 1.0,
        }
    }

    /// Read electrochemistry and coverage settings from a rate record.
    ///
    /// Absent keys reset to defaults, so applying the same record twice
    /// yields the same state.
    pub fn set_parameters(&mut self, node: &Node) -> Result<(), RateError> {
        match node.get("charge-transfer") {
            Some(value) => {
                self.charge_transfer = value.as_bool("charge-transfer")?;
                self.explicit_charge_transfer = true;
            }
            None => {
                self.charge_transfer = false;
                self.explicit_charge_transfer = false;
            }
        }
        self.beta = node.get_f64_or("beta", DEFAULT_BETA)?;
        self.exchange_current_density =
            node.get_bool("exchange-current-density-formulation", false)?;

        match node.get_map("coverage-dependencies")? {
            Some(deps) => self.set_coverage_dependencies(deps, node.units())?,
            None => {
                self.dependencies.clear();
                self.indices.clear();
            }
        }
        Ok(())
    }

    /// Write the settings read by [`set_parameters`](Self::set_parameters).
    ///
    /// Defaults are omitted.
    pub fn get_parameters(&self, node: &mut Node) {
        if self.explicit_charge_transfer {
            node.insert("charge-transfer", self.charge_transfer);
        }
        if self.charge_transfer || self.beta != DEFAULT_BETA {
            node.insert("beta", self.beta);
        }
        if self.exchange_current_density {
            node.insert("exchange-current-density-formulation", true);
        }
        if !self.dependencies.is_empty() {
            let mut deps = Node::new();
            self.get_coverage_dependencies(&mut deps, false);
            node.insert("coverage-dependencies", deps);
        }
    }

    /// Replace the coverage table from a `species → {a, m, E}` or
    /// `species → [a, m, E]` record.
    pub fn set_coverage_dependencies(
        &mut self,
        dependencies: &Node,
        units: &UnitSystem,
    ) -> Result<(), RateError> {
        self.dependencies.clear();
        self.indices.clear();
        for (species, value) in dependencies.iter() {
            let dep = CoverageDependency::from_value(species, value, units)?;
            self.dependencies.insert(species.to_string(), dep);
        }
        Ok(())
    }

    /// Write the coverage table into `dependencies`, one entry per species.
    ///
    /// `as_list` selects the `[a, m, E]` shape instead of `{a, m, E}`.
    pub fn get_coverage_dependencies(&self, dependencies: &mut Node, as_list: bool) {
        for (species, dep) in &self.dependencies {
            dependencies.insert(species.as_str(), dep.to_value(as_list));
        }
    }

    /// Add or replace the coverage parameters of `species`.
    ///
    /// `e` is in Kelvin. A repeated species keeps its position in the table.
    /// Species indices must be resolved again afterwards.
    pub fn add_coverage_dependence(&mut self, species: &str, a: f64, m: f64, e: f64) {
        self.dependencies
            .insert(species.to_string(), CoverageDependency { a, m, e });
        self.indices.clear();
    }

    /// Iterate the coverage table in insertion order.
    pub fn coverage_dependencies(&self) -> impl Iterator<Item = (&str, &CoverageDependency)> {
        self.dependencies.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Resolve the table against the coverage-species order of the snapshot.
    pub fn set_species(&mut self, species: &[String]) -> Result<(), RateError> {
        let mut indices = Vec::with_capacity(self.dependencies.len());
        for name in self.dependencies.keys() {
            let slot = species.iter().position(|s| s == name).ok_or_else(|| {
                RateError::UnknownSpecies {
                    species: name.clone(),
                    context: "coverage dependency".into(),
                }
            })?;
            indices.push(slot);
        }
        self.indices = indices;
        Ok(())
    }

    /// Resolve species, stoichiometry and phase charges against the
    /// mechanism.
    ///
    /// Charge transfer is switched on when any phase changes net charge,
    /// unless `charge-transfer` was configured explicitly.
    pub fn set_context(&mut self, reaction: &Reaction, kinetics: &dyn Kinetics) -> Result<(), RateError> {
        self.set_species(kinetics.coverage_species())?;
        self.site_density = kinetics.site_density();

        self.stoich.clear();
        self.net_charges.clear();
        let sides = [(&reaction.reactants, -1.0), (&reaction.products, 1.0)];
        for (terms, sign) in sides {
            for (name, nu) in terms {
                let k = kinetics.require_species(name, "reaction")?;
                let nu = sign * nu;
                self.stoich.push((k, nu));
                let phase = kinetics.species_phase(k);
                let charge = FARADAY * kinetics.species_charge(k) * nu;
                match self.net_charges.iter_mut().find(|(p, _)| *p == phase) {
                    Some((_, total)) => *total += charge,
                    None => self.net_charges.push((phase, charge)),
                }
            }
        }

        if !self.explicit_charge_transfer {
            self.charge_transfer = self.net_charges.iter().any(|&(_, q)| q != 0.0);
            if self.charge_transfer {
                debug!(equation = %reaction.equation(), "charge transfer detected");
            }
        }
        Ok(())
    }

    /// Refresh the cached scalars from the shared snapshot.
    pub fn update_from_struct(&mut self, data: &CoverageData) {
        if data.ready {
            self.site_density = data.density;
        }

        if self.indices.len() != self.dependencies.len() {
            self.acov = f64::NAN;
            self.ecov = f64::NAN;
            self.mcov = f64::NAN;
            return;
        }
        self.acov = 0.0;
        self.ecov = 0.0;
        self.mcov = 0.0;
        for (dep, &slot) in self.dependencies.values().zip(&self.indices) {
            self.acov += dep.a * data.coverages[slot];
            self.ecov += dep.e * data.coverages[slot];
            self.mcov += dep.m * data.log_coverages[slot];
        }

        let rt = GAS_CONSTANT * data.temperature;
        if self.charge_transfer {
            let delta: f64 = self
                .net_charges
                .iter()
                .map(|&(p, q)| data.electric_potentials[p.0] * q)
                .sum();
            self.delta_potential_rt = delta / rt;
        }

        if self.exchange_current_density {
            let mut delta_g = 0.0;
            let mut prod = 1.0;
            for &(k, nu) in &self.stoich {
                delta_g += data.standard_chem_potentials[k.0] * nu;
                if nu > 0.0 {
                    prod *= data.standard_concentrations[k.0];
                }
            }
            self.delta_gibbs0_rt = delta_g / rt;
            self.prod_standard_concentrations = prod;
        }
    }

    /// Combined coverage factor `10^acov · exp(-ecov / T + mcov)`.
    pub fn coverage_factor(&self, recip_t: f64) -> f64 {
        (std::f64::consts::LN_10 * self.acov - self.ecov * recip_t + self.mcov).exp()
    }

    /// Butler-Volmer correction of the forward rate.
    ///
    /// 1.0 without charge transfer. Otherwise `exp(-β ΔΦ/RT)`, further
    /// multiplied by `exp(-β ΔG°/RT) / (ΠC°_products F)` under the
    /// exchange-current-density formulation.
    pub fn voltage_correction(&self) -> f64 {
        if !self.charge_transfer {
            return 1.0;
        }
        let mut correction = 1.0;
        if self.delta_potential_rt != 0.0 {
            correction = (-self.beta * self.delta_potential_rt).exp();
        }
        if self.exchange_current_density {
            let ecd = (-self.beta * self.delta_gibbs0_rt).exp()
                / (self.prod_standard_concentrations * FARADAY);
            correction *= ecd;
        }
        correction
    }

    /// Whether the Butler-Volmer correction applies.
    pub fn uses_electrochemistry(&self) -> bool {
        self.charge_transfer
    }

    /// Force charge transfer on or off, overriding detection.
    pub fn set_charge_transfer(&mut self, enabled: bool) {
        self.charge_transfer = enabled;
        self.explicit_charge_transfer = true;
    }

    /// Whether rates are given as exchange current densities.
    pub fn exchange_current_density_formulation(&self) -> bool {
        self.exchange_current_density
    }

    /// Transfer coefficient, or NaN without charge transfer.
    pub fn beta(&self) -> f64 {
        if self.charge_transfer {
            self.beta
        } else {
            f64::NAN
        }
    }

    /// Site density [kmol/m^2].
    pub fn site_density(&self) -> f64 {
        self.site_density
    }

    /// Override the site density.
    ///
    /// Replaced by the snapshot value on the next ready update.
    pub fn set_site_density(&mut self, density: f64) {
        self.site_density = density;
    }

    /// Cached `Σ a_k θ_k`.
    pub fn acov(&self) -> f64 {
        self.acov
    }

    /// Cached `Σ E_k θ_k` [K].
    pub fn ecov(&self) -> f64 {
        self.ecov
    }

    /// Cached `Σ m_k ln θ_k`.
    pub fn mcov(&self) -> f64 {
        self.mcov
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surfkin_core::EnergyUnit;
    use surfkin_test_utils::MockKinetics;

    fn kinetics() -> MockKinetics {
        MockKinetics::builder()
            .gas_phase("gas")
            .species("O2", 31.998)
            .interface_phase("surf", 2.7e-9)
            .species("PT(S)", 195.08)
            .species("O(S)", 15.999)
            .species("CO(S)", 28.010)
            .build()
    }

    fn snapshot(coverages: &[f64]) -> CoverageData {
        let mut data = CoverageData::new();
        data.update_coverages(900.0, coverages).unwrap();
        data
    }

    #[test]
    fn unresolved_table_yields_nan() {
        let mut cov = CoverageBase::new();
        cov.add_coverage_dependence("O(S)", 1.0, 0.0, 0.0);
        cov.update_from_struct(&snapshot(&[0.5, 0.5, 0.0]));
        assert!(cov.acov().is_nan());
        assert!(cov.ecov().is_nan());
        assert!(cov.mcov().is_nan());
    }

    #[test]
    fn empty_table_contributes_nothing() {
        let mut cov = CoverageBase::new();
        cov.set_species(&[]).unwrap();
        cov.update_from_struct(&snapshot(&[0.3]));
        assert_eq!(cov.coverage_factor(1.0 / 900.0), 1.0);
    }

    #[test]
    fn weighted_sums_follow_slot_order() {
        let kin = kinetics();
        let rxn = Reaction::from_equation("O2 + 2 PT(S) => 2 O(S)").unwrap();
        let mut cov = CoverageBase::new();
        cov.add_coverage_dependence("CO(S)", 0.0, 1.0, 0.0);
        cov.add_coverage_dependence("O(S)", 2.0, 0.0, 1000.0);
        cov.set_context(&rxn, &kin).unwrap();

        cov.update_from_struct(&snapshot(&[0.1, 0.3, 0.6]));
        assert!((cov.acov() - 0.6).abs() < 1e-15);
        assert!((cov.ecov() - 300.0).abs() < 1e-12);
        assert!((cov.mcov() - 0.6f64.ln()).abs() < 1e-15);
    }

    #[test]
    fn repeated_species_overwrites_in_place() {
        let mut cov = CoverageBase::new();
        cov.add_coverage_dependence("O(S)", 1.0, 0.0, 0.0);
        cov.add_coverage_dependence("CO(S)", 2.0, 0.0, 0.0);
        cov.add_coverage_dependence("O(S)", 3.0, 0.0, 0.0);
        let rows: Vec<_> = cov.coverage_dependencies().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, "O(S)");
        assert_eq!(rows[0].1.a, 3.0);
    }

    #[test]
    fn unknown_coverage_species_is_setup_error() {
        let mut cov = CoverageBase::new();
        cov.add_coverage_dependence("H(S)", 1.0, 0.0, 0.0);
        let err = cov.set_species(&["PT(S)".to_string()]).unwrap_err();
        assert!(matches!(err, RateError::UnknownSpecies { ref species, .. } if species == "H(S)"));
    }

    #[test]
    fn parameters_round_trip_in_both_shapes() {
        let mut node = Node::with_units(UnitSystem::with_activation_energy(
            EnergyUnit::KiloJoulePerMol,
        ));
        let mut deps = Node::new();
        let mut o = Node::new();
        o.insert("a", 0.0);
        o.insert("m", 0.0);
        o.insert("E", -12.5);
        deps.insert("O(S)", o);
        deps.insert("CO(S)", Value::List(vec![1.0.into(), 0.5.into(), "3 kcal/mol".into()]));
        node.insert("coverage-dependencies", deps);

        let mut cov = CoverageBase::new();
        cov.set_parameters(&node).unwrap();

        for as_list in [false, true] {
            let mut written = Node::new();
            cov.get_coverage_dependencies(&mut written, as_list);
            let mut back = CoverageBase::new();
            back.set_coverage_dependencies(&written, &UnitSystem::default())
                .unwrap();
            let a: Vec<_> = cov.coverage_dependencies().collect();
            let b: Vec<_> = back.coverage_dependencies().collect();
            assert_eq!(a, b);
        }
    }

    #[test]
    fn defaults_are_not_written() {
        let cov = CoverageBase::new();
        let mut node = Node::new();
        cov.get_parameters(&mut node);
        assert!(node.is_empty());
        assert!(cov.beta().is_nan());
        assert_eq!(cov.voltage_correction(), 1.0);
    }

    #[test]
    fn set_parameters_is_idempotent() {
        let mut node = Node::new();
        node.insert("charge-transfer", true);
        node.insert("beta", 0.4);
        let mut cov = CoverageBase::new();
        cov.set_parameters(&node).unwrap();
        cov.set_parameters(&node).unwrap();
        assert!(cov.uses_electrochemistry());
        assert_eq!(cov.beta(), 0.4);

        let mut out = Node::new();
        cov.get_parameters(&mut out);
        assert_eq!(out, node);

        cov.set_parameters(&Node::new()).unwrap();
        assert!(!cov.uses_electrochemistry());
    }

    fn electrode() -> MockKinetics {
        MockKinetics::builder()
            .bulk_phase("electrode")
            .species("electron", 5.4858e-4)
            .charge(-1.0)
            .bulk_phase("electrolyte")
            .species("Li+", 6.94)
            .charge(1.0)
            .interface_phase("anode_surf", 1.0e-8)
            .species("(S)", 1.0)
            .species("Li(S)", 6.94)
            .build()
    }

    #[test]
    fn charge_transfer_detected_from_phase_charges() {
        let kin = electrode();
        let rxn = Reaction::from_equation("Li+ + electron + (S) => Li(S)").unwrap();
        let mut cov = CoverageBase::new();
        cov.set_context(&rxn, &kin).unwrap();
        assert!(cov.uses_electrochemistry());
        assert_eq!(cov.beta(), DEFAULT_BETA);

        let mut data = CoverageData::new();
        data.resize(2, 4, 3);
        data.density = 1.0e-8;
        data.update_temperature(300.0);
        data.set_electric_potential(0, 0.1);

        cov.update_from_struct(&data);
        // electron leaves phase 0: ΔΦ = F · (-1) · (-1) · 0.1
        let expected = (-0.5 * FARADAY * 0.1 / (GAS_CONSTANT * 300.0)).exp();
        assert!((cov.voltage_correction() - expected).abs() <= 1e-12 * expected);
    }

    #[test]
    fn explicit_charge_transfer_overrides_detection() {
        let kin = electrode();
        let rxn = Reaction::from_equation("Li+ + electron + (S) => Li(S)").unwrap();
        let mut node = Node::new();
        node.insert("charge-transfer", false);
        let mut cov = CoverageBase::new();
        cov.set_parameters(&node).unwrap();
        cov.set_context(&rxn, &kin).unwrap();
        assert!(!cov.uses_electrochemistry());
        assert_eq!(cov.voltage_correction(), 1.0);
    }

    #[test]
    fn exchange_current_density_scaling() {
        let kin = electrode();
        let rxn = Reaction::from_equation("Li+ + electron + (S) => Li(S)").unwrap();
        let mut node = Node::new();
        node.insert("exchange-current-density-formulation", true);
        let mut cov = CoverageBase::new();
        cov.set_parameters(&node).unwrap();
        cov.set_context(&rxn, &kin).unwrap();

        let mut data = CoverageData::new();
        data.resize(2, 4, 3);
        data.update_temperature(300.0);
        data.standard_chem_potentials = vec![0.0, 0.0, 0.0, -2.0e6];
        data.standard_concentrations = vec![1.0, 1.0, 1.0e-8, 2.0e-8];
        cov.update_from_struct(&data);

        let dg_rt = -2.0e6 / (GAS_CONSTANT * 300.0);
        let expected = (-0.5 * dg_rt).exp() / (2.0e-8 * FARADAY);
        assert!((cov.voltage_correction() - expected).abs() <= 1e-12 * expected);
    }

    #[test]
    fn ready_snapshot_refreshes_site_density() {
        let mut cov = CoverageBase::new();
        cov.set_site_density(3.0e-9);
        let mut data = CoverageData::new();
        cov.update_from_struct(&data);
        assert_eq!(cov.site_density(), 3.0e-9);
        data.resize(0, 0, 0);
        data.density = 4.0e-9;
        cov.update_from_struct(&data);
        assert_eq!(cov.site_density(), 4.0e-9);
    }
}
