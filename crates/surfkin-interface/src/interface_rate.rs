//! [`InterfaceRate`]: a base rate law with coverage and potential
//! corrections.

use std::f64::consts::LN_10;

use surfkin_core::constants::GAS_CONSTANT;
use surfkin_core::{CoverageData, Kinetics, Node, RateError, RateLaw, Reaction};

use crate::coverage::CoverageBase;
use crate::rate::{ReactionRate, ValidationWarning};

/// Rate coefficient of an interface reaction:
///
/// ```text
/// k = R(T) · 10^acov · exp(-ecov / T) · exp(mcov) · voltage_correction
/// ```
///
/// where `R` is the base law and the remaining factors come from
/// [`CoverageBase`].
///
/// # Construction
///
/// ```
/// use surfkin_core::Node;
/// use surfkin_interface::{InterfaceArrheniusRate, ReactionRate};
///
/// let node = Node::from_json(r#"{
///     "rate-constant": {"A": 3.7e20, "b": 0, "Ea": "67.4 kJ/mol"},
///     "coverage-dependencies": {"H(S)": {"a": 0, "m": 0, "E": "-6 kJ/mol"}}
/// }"#).unwrap();
/// let rate = InterfaceArrheniusRate::from_node(&node).unwrap();
/// assert_eq!(rate.rate_type(), "interface-Arrhenius");
/// ```
#[derive(Clone, Debug)]
pub struct InterfaceRate<R> {
    rate: R,
    coverage: CoverageBase,
}

impl<R: RateLaw> InterfaceRate<R> {
    /// Wrap `rate` with an empty coverage table.
    pub fn new(rate: R) -> Self {
        Self {
            rate,
            coverage: CoverageBase::new(),
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

    /// The base rate law.
    pub fn rate(&self) -> &R {
        &self.rate
    }

    /// Mutable access to the base rate law.
    pub fn rate_mut(&mut self) -> &mut R {
        &mut self.rate
    }

    /// The coverage corrections.
    pub fn coverage(&self) -> &CoverageBase {
        &self.coverage
    }

    /// Mutable access to the coverage corrections.
    pub fn coverage_mut(&mut self) -> &mut CoverageBase {
        &mut self.coverage
    }
}

impl<R: RateLaw> ReactionRate for InterfaceRate<R> {
    fn rate_type(&self) -> String {
        format!("interface-{}", self.rate.rate_type())
    }

    fn set_parameters(&mut self, node: &Node) -> Result<(), RateError> {
        self.coverage.set_parameters(node)?;
        self.rate
            .set_allow_negative_pre_exponential_factor(node.get_bool("negative-A", false)?);
        self.rate
            .set_rate_parameters(node.get("rate-constant"), node.units())
    }

    fn get_parameters(&self, node: &mut Node) {
        node.insert("type", self.rate_type());
        if self.rate.allow_negative_pre_exponential_factor() {
            node.insert("negative-A", true);
        }
        let mut rate_node = Node::new();
        self.rate.get_rate_parameters(&mut rate_node);
        if !rate_node.is_empty() {
            node.insert("rate-constant", rate_node);
        }
        self.coverage.get_parameters(node);
    }

    fn set_context(&mut self, reaction: &Reaction, kinetics: &dyn Kinetics) -> Result<(), RateError> {
        self.rate.set_context(reaction, kinetics)?;
        self.coverage.set_context(reaction, kinetics)
    }

    fn validate(&self, equation: &str, _kinetics: &dyn Kinetics) -> Result<Vec<ValidationWarning>, RateError> {
        self.rate.validate(equation)?;
        Ok(Vec::new())
    }

    fn update_from_struct(&mut self, data: &CoverageData) {
        self.rate.update_from_struct(data);
        self.coverage.update_from_struct(data);
    }

    fn eval_from_struct(&self, data: &CoverageData) -> f64 {
        self.rate.eval_rate(data.log_t, data.recip_t)
            * self.coverage.coverage_factor(data.recip_t)
            * self.coverage.voltage_correction()
    }

    fn ddt_scaled_from_struct(&self, _data: &CoverageData) -> Result<f64, RateError> {
        Err(RateError::NotImplemented {
            operation: "InterfaceRate::ddt_scaled_from_struct",
        })
    }

    fn pre_exponential_factor(&self) -> f64 {
        self.rate.pre_exponential_factor()
            * (LN_10 * self.coverage.acov() + self.coverage.mcov()).exp()
    }

    fn activation_energy(&self) -> f64 {
        self.rate.activation_energy() + self.coverage.ecov() * GAS_CONSTANT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use surfkin_core::Value;
    use surfkin_rates::Arrhenius;
    use surfkin_test_utils::MockKinetics;

    fn kinetics() -> MockKinetics {
        MockKinetics::builder()
            .gas_phase("gas")
            .species("H2", 2.016)
            .interface_phase("surf", 2.7e-9)
            .species("PT(S)", 195.08)
            .species("H(S)", 1.008)
            .build()
    }

    fn desorption() -> InterfaceRate<Arrhenius> {
        let mut rate = InterfaceRate::new(Arrhenius::new(3.7e20, 0.0, 6.74e7));
        rate.coverage_mut()
            .add_coverage_dependence("H(S)", 1.0, 0.0, 0.0);
        rate
    }

    fn snapshot(t: f64, coverages: &[f64]) -> CoverageData {
        let mut data = CoverageData::new();
        data.update_coverages(t, coverages).unwrap();
        data
    }

    #[test]
    fn type_is_prefixed() {
        assert_eq!(desorption().rate_type(), "interface-Arrhenius");
    }

    #[test]
    fn coverage_scales_by_power_of_ten() {
        let kin = kinetics();
        let rxn = Reaction::from_equation("2 H(S) => H2 + 2 PT(S)").unwrap();
        let mut rate = desorption();
        rate.set_context(&rxn, &kin).unwrap();

        let theta = 0.35;
        let data = snapshot(800.0, &[1.0 - theta, theta]);
        rate.update_from_struct(&data);
        let base = rate.rate().eval_rate(data.log_t, data.recip_t);
        let k = rate.eval_from_struct(&data);
        let expected = base * 10f64.powf(theta);
        assert!((k - expected).abs() <= 1e-12 * expected);
    }

    #[test]
    fn effective_parameters_include_coverage() {
        let kin = kinetics();
        let rxn = Reaction::from_equation("2 H(S) => H2 + 2 PT(S)").unwrap();
        let mut rate = InterfaceRate::new(Arrhenius::new(1.0e13, 0.0, 5.0e7));
        rate.coverage_mut()
            .add_coverage_dependence("H(S)", 1.0, 0.5, -1000.0);
        rate.set_context(&rxn, &kin).unwrap();
        rate.update_from_struct(&snapshot(600.0, &[0.5, 0.5]));

        let a = 1.0e13 * (LN_10 * 0.5 + 0.5 * 0.5f64.ln()).exp();
        assert!((rate.pre_exponential_factor() - a).abs() <= 1e-12 * a);
        let ea = 5.0e7 - 500.0 * GAS_CONSTANT;
        assert!((rate.activation_energy() - ea).abs() <= 1e-9 * ea);
    }

    #[test]
    fn negative_a_flag_round_trips() {
        let mut node = Node::new();
        node.insert("negative-A", true);
        node.insert(
            "rate-constant",
            Value::List(vec![(-1.0e3).into(), 0.0.into(), 0.0.into()]),
        );
        let rate = InterfaceRate::<Arrhenius>::from_node(&node).unwrap();
        assert!(rate.validate("A => B", &kinetics()).is_ok());

        let params = rate.parameters();
        assert_eq!(params.get("negative-A"), Some(&Value::Bool(true)));
        assert_eq!(
            params.get_str("type").unwrap(),
            Some("interface-Arrhenius")
        );
    }

    #[test]
    fn unconfigured_rate_fails_validation() {
        let rate = InterfaceRate::<Arrhenius>::from_node(&Node::new()).unwrap();
        assert!(!rate.parameters().has_key("rate-constant"));
        assert!(matches!(
            rate.validate("A => B", &kinetics()),
            Err(RateError::NotConfigured { .. })
        ));
    }

    #[test]
    fn derivative_is_not_implemented() {
        let rate = desorption();
        let err = rate
            .ddt_scaled_from_struct(&CoverageData::new())
            .unwrap_err();
        assert!(matches!(err, RateError::NotImplemented { .. }));
    }
}
