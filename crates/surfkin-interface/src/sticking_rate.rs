//! [`StickingRate`]: a rate constant derived from a sticking coefficient.

use std::f64::consts::LN_10;

use tracing::warn;

use surfkin_core::constants::GAS_CONSTANT;
use surfkin_core::{CoverageData, Kinetics, Node, RateError, RateLaw, Reaction};

use crate::coverage::CoverageBase;
use crate::rate::{ReactionRate, ValidationWarning};
use crate::sticking::StickingCoverage;

/// Temperatures at which [`StickingRate::validate`] probes the base law [K].
pub const VALIDATION_TEMPERATURES: [f64; 6] = [200.0, 500.0, 1000.0, 2000.0, 5000.0, 10000.0];

/// Rate coefficient of a sticking reaction.
///
/// The base law gives the dimensionless sticking probability `γ`, corrected
/// for coverage like an [`InterfaceRate`](crate::InterfaceRate). The rate
/// constant is then
///
/// ```text
/// k = γ' · Γ^(-order) · sqrt(T) · multiplier
/// ```
///
/// with `γ' = γ / (1 - γ/2)` under the Motz-Wise correction, `Γ` the site
/// density and `multiplier` from [`StickingCoverage`].
#[derive(Clone, Debug)]
pub struct StickingRate<R> {
    rate: R,
    sticking: StickingCoverage,
    /// `Γ^(-order)`, refreshed each pass.
    factor: f64,
}

impl<R: RateLaw> StickingRate<R> {
    /// Wrap the sticking-coefficient law `rate`.
    pub fn new(rate: R) -> Self {
        Self {
            rate,
            sticking: StickingCoverage::new(),
            factor: f64::NAN,
        }
    }

    /// Build and configure from a rate record.
    pub fn from_node(node: &Node) -> Result<Self, RateError>
    where
        R: Default,
    {
        let mut out = Self::new(R::default());
        out.set_parameters(node)?;
        Ok(out)
    }

    /// The sticking-coefficient law.
    pub fn rate(&self) -> &R {
        &self.rate
    }

    /// Mutable access to the sticking-coefficient law.
    pub fn rate_mut(&mut self) -> &mut R {
        &mut self.rate
    }

    /// Sticking metadata.
    pub fn sticking(&self) -> &StickingCoverage {
        &self.sticking
    }

    /// Mutable access to the sticking metadata.
    pub fn sticking_mut(&mut self) -> &mut StickingCoverage {
        &mut self.sticking
    }

    /// The coverage corrections.
    pub fn coverage(&self) -> &CoverageBase {
        self.sticking.coverage()
    }

    /// Mutable access to the coverage corrections.
    pub fn coverage_mut(&mut self) -> &mut CoverageBase {
        self.sticking.coverage_mut()
    }
}

impl<R: RateLaw> ReactionRate for StickingRate<R> {
    fn rate_type(&self) -> String {
        format!("sticking-{}", self.rate.rate_type())
    }

    fn set_parameters(&mut self, node: &Node) -> Result<(), RateError> {
        self.sticking.coverage_mut().set_parameters(node)?;
        self.rate
            .set_allow_negative_pre_exponential_factor(node.get_bool("negative-A", false)?);
        self.sticking.set_sticking_parameters(node)?;
        self.rate
            .set_rate_parameters(node.get("sticking-coefficient"), node.units())
    }

    fn get_parameters(&self, node: &mut Node) {
        node.insert("type", self.rate_type());
        if self.rate.allow_negative_pre_exponential_factor() {
            node.insert("negative-A", true);
        }
        self.sticking.get_sticking_parameters(node);
        let mut rate_node = Node::new();
        self.rate.get_rate_parameters(&mut rate_node);
        if !rate_node.is_empty() {
            node.insert("sticking-coefficient", rate_node);
        }
        self.sticking.coverage().get_parameters(node);
    }

    fn set_context(&mut self, reaction: &Reaction, kinetics: &dyn Kinetics) -> Result<(), RateError> {
        self.rate.set_context(reaction, kinetics)?;
        self.sticking.set_context(reaction, kinetics)
    }

    /// Validate the base law, then probe it alone at
    /// [`VALIDATION_TEMPERATURES`]. Every probe above 1 is reported, and a
    /// single aggregated warning is logged.
    fn validate(&self, equation: &str, _kinetics: &dyn Kinetics) -> Result<Vec<ValidationWarning>, RateError> {
        self.rate.validate(equation)?;
        let warnings: Vec<ValidationWarning> = VALIDATION_TEMPERATURES
            .iter()
            .filter_map(|&t| {
                let value = self.rate.eval_rate(t.ln(), 1.0 / t);
                (value > 1.0).then(|| ValidationWarning {
                    equation: equation.to_string(),
                    temperature: t,
                    value,
                })
            })
            .collect();
        if !warnings.is_empty() {
            let details: Vec<String> = warnings.iter().map(ToString::to_string).collect();
            warn!(
                equation = %equation,
                count = warnings.len(),
                "sticking coefficient exceeds 1:\n  {}",
                details.join("\n  ")
            );
        }
        Ok(warnings)
    }

    fn update_from_struct(&mut self, data: &CoverageData) {
        self.rate.update_from_struct(data);
        self.sticking.coverage_mut().update_from_struct(data);
        let order = self.sticking.sticking_order();
        self.factor = self.sticking.coverage().site_density().powf(-order);
    }

    fn eval_from_struct(&self, data: &CoverageData) -> f64 {
        let coverage = self.sticking.coverage();
        let mut out = self.rate.eval_rate(data.log_t, data.recip_t)
            * coverage.coverage_factor(data.recip_t)
            * coverage.voltage_correction();
        if self.sticking.motz_wise_correction() {
            out /= 1.0 - 0.5 * out;
        }
        out * self.factor * data.sqrt_t * self.sticking.multiplier()
    }

    fn ddt_scaled_from_struct(&self, _data: &CoverageData) -> Result<f64, RateError> {
        Err(RateError::NotImplemented {
            operation: "StickingRate::ddt_scaled_from_struct",
        })
    }

    fn pre_exponential_factor(&self) -> f64 {
        let coverage = self.sticking.coverage();
        self.rate.pre_exponential_factor() * (LN_10 * coverage.acov() + coverage.mcov()).exp()
    }

    fn activation_energy(&self) -> f64 {
        self.rate.activation_energy() + self.sticking.coverage().ecov() * GAS_CONSTANT
    }
}
