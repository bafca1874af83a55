//! Blowers-Masel rate law.
//!
//! An Arrhenius expression whose activation energy follows the enthalpy
//! change of the reaction. With intrinsic barrier `Ea0`, bond energy `w`
//! and reaction enthalpy `ΔH` (all in Kelvin):
//!
//! ```text
//! Ea = 0                                          ΔH < -4 Ea0
//! Ea = ΔH                                         ΔH >  4 Ea0
//! Ea = (w + ΔH/2) (Vp - 2w + ΔH)^2
//!      / (Vp^2 - 4w^2 + ΔH^2)                     otherwise
//! Vp = 2w (w + Ea0) / (w - Ea0)
//! ```

use smallvec::SmallVec;
use surfkin_core::constants::GAS_CONSTANT;
use surfkin_core::{
    CoverageData, Kinetics, Node, NodeError, Quantity, RateError, RateLaw, Reaction,
    SpeciesIndex, UnitSystem, Value,
};

/// Blowers-Masel rate `k = A T^b exp(-Ea(ΔH) / RT)`.
///
/// Configured from `{A, b, Ea0, w}` or `[A, b, Ea0, w]`. The reaction
/// enthalpy is refreshed from
/// [`CoverageData::partial_molar_enthalpies`] in
/// [`update_from_struct`](RateLaw::update_from_struct), using the
/// stoichiometry captured by [`set_context`](RateLaw::set_context).
#[derive(Clone, Debug, PartialEq)]
pub struct BlowersMasel {
    a: f64,
    b: f64,
    ea0_r: f64,
    w_r: f64,
    delta_h_r: f64,
    stoich: SmallVec<[(SpeciesIndex, f64); 6]>,
    negative_a_ok: bool,
}

impl Default for BlowersMasel {
    /// An unconfigured law: all parameters NaN.
    fn default() -> Self {
        Self {
            a: f64::NAN,
            b: f64::NAN,
            ea0_r: f64::NAN,
            w_r: f64::NAN,
            delta_h_r: 0.0,
            stoich: SmallVec::new(),
            negative_a_ok: false,
        }
    }
}

impl BlowersMasel {
    /// Create from `A`, `b`, intrinsic `Ea0` and bond energy `w` [J/kmol].
    pub fn new(a: f64, b: f64, ea0: f64, w: f64) -> Self {
        Self {
            a,
            b,
            ea0_r: ea0 / GAS_CONSTANT,
            w_r: w / GAS_CONSTANT,
            ..Self::default()
        }
    }

    /// Whether parameters have been set.
    pub fn is_configured(&self) -> bool {
        !self.a.is_nan()
    }

    /// Intrinsic activation energy [J/kmol].
    pub fn intrinsic_activation_energy(&self) -> f64 {
        self.ea0_r * GAS_CONSTANT
    }

    /// Bond dissociation energy [J/kmol].
    pub fn bond_energy(&self) -> f64 {
        self.w_r * GAS_CONSTANT
    }

    /// Current enthalpy change of the reaction [J/kmol].
    pub fn delta_enthalpy(&self) -> f64 {
        self.delta_h_r * GAS_CONSTANT
    }

    /// Override the enthalpy change of the reaction [J/kmol].
    ///
    /// Overwritten by the next [`update_from_struct`](RateLaw::update_from_struct)
    /// on a ready snapshot.
    pub fn set_delta_enthalpy(&mut self, delta_h: f64) {
        self.delta_h_r = delta_h / GAS_CONSTANT;
    }

    /// Effective activation energy over the gas constant for `delta_h_r` [K].
    pub fn effective_activation_energy_r(&self, delta_h_r: f64) -> f64 {
        if delta_h_r < -4.0 * self.ea0_r {
            return 0.0;
        }
        if delta_h_r > 4.0 * self.ea0_r {
            return delta_h_r;
        }
        let w = self.w_r;
        let vp = 2.0 * w * ((w + self.ea0_r) / (w - self.ea0_r));
        let vp_2w_dh = vp - 2.0 * w + delta_h_r;
        (w + delta_h_r / 2.0) * (vp_2w_dh * vp_2w_dh)
            / (vp * vp - 4.0 * w * w + delta_h_r * delta_h_r)
    }
}

impl RateLaw for BlowersMasel {
    fn rate_type(&self) -> &'static str {
        "Blowers-Masel"
    }

    fn set_rate_parameters(
        &mut self,
        rate: Option<&Value>,
        units: &UnitSystem,
    ) -> Result<(), RateError> {
        let Some(rate) = rate else {
            self.a = f64::NAN;
            self.b = f64::NAN;
            self.ea0_r = f64::NAN;
            self.w_r = f64::NAN;
            return Ok(());
        };
        match rate {
            Value::Map(node) => {
                self.a = node.require_f64("A")?;
                self.b = node.require_f64("b")?;
                self.ea0_r = units.convert_activation_energy(node.require("Ea0")?)?;
                self.w_r = units.convert_activation_energy(node.require("w")?)?;
            }
            Value::List(_) => {
                let list = rate.as_list_of("rate-constant", 4)?;
                self.a = list[0].as_f64("A")?;
                self.b = list[1].as_f64("b")?;
                self.ea0_r = units.convert_activation_energy(&list[2])?;
                self.w_r = units.convert_activation_energy(&list[3])?;
            }
            other => {
                return Err(NodeError::TypeMismatch {
                    key: "rate-constant".into(),
                    expected: "map or list",
                    found: other.kind(),
                }
                .into())
            }
        }
        Ok(())
    }

    fn get_rate_parameters(&self, node: &mut Node) {
        if !self.is_configured() {
            return;
        }
        node.insert("A", self.a);
        node.insert("b", self.b);
        node.insert("Ea0", Quantity::new(self.ea0_r, "K"));
        node.insert("w", Quantity::new(self.w_r, "K"));
    }

    fn set_context(&mut self, reaction: &Reaction, kinetics: &dyn Kinetics) -> Result<(), RateError> {
        self.stoich.clear();
        for (name, nu) in &reaction.reactants {
            let k = kinetics.require_species(name, "Blowers-Masel reactant")?;
            self.stoich.push((k, -nu));
        }
        for (name, nu) in &reaction.products {
            let k = kinetics.require_species(name, "Blowers-Masel product")?;
            self.stoich.push((k, *nu));
        }
        Ok(())
    }

    fn update_from_struct(&mut self, data: &CoverageData) {
        if data.ready {
            let delta_h: f64 = self
                .stoich
                .iter()
                .map(|&(k, nu)| data.partial_molar_enthalpies[k.0] * nu)
                .sum();
            self.delta_h_r = delta_h / GAS_CONSTANT;
        }
    }

    fn eval_rate(&self, log_t: f64, recip_t: f64) -> f64 {
        let ea_r = self.effective_activation_energy_r(self.delta_h_r);
        self.a * (self.b * log_t - ea_r * recip_t).exp()
    }

    fn pre_exponential_factor(&self) -> f64 {
        self.a
    }

    fn activation_energy(&self) -> f64 {
        self.effective_activation_energy_r(self.delta_h_r) * GAS_CONSTANT
    }

    fn allow_negative_pre_exponential_factor(&self) -> bool {
        self.negative_a_ok
    }

    fn set_allow_negative_pre_exponential_factor(&mut self, allow: bool) {
        self.negative_a_ok = allow;
    }

    fn validate(&self, equation: &str) -> Result<(), RateError> {
        if !self.is_configured() {
            return Err(RateError::NotConfigured {
                equation: equation.to_string(),
            });
        }
        if !self.negative_a_ok && self.a < 0.0 {
            return Err(RateError::NegativePreExponential {
                equation: equation.to_string(),
            });
        }
        if !(self.w_r > self.ea0_r) {
            return Err(RateError::InvalidParameter {
                reason: format!(
                    "bond energy w must exceed intrinsic activation energy Ea0 in reaction '{equation}'"
                ),
            });
        }
        Ok(())
    }
}
