//! Modified Arrhenius rate law.

use surfkin_core::constants::GAS_CONSTANT;
use surfkin_core::{Node, NodeError, Quantity, RateError, RateLaw, UnitSystem, Value};

/// Modified Arrhenius rate `k = A T^b exp(-Ea / RT)`.
///
/// Configured from a `rate-constant` entry of the form
/// `{A: ..., b: ..., Ea: ...}` or `[A, b, Ea]`. `Ea` may carry units;
/// bare numbers use the record's unit system.
///
/// ```
/// use surfkin_core::RateLaw;
/// use surfkin_rates::Arrhenius;
///
/// let law = Arrhenius::new(1.0e13, 0.0, 0.0);
/// assert_eq!(law.eval_rate(1000f64.ln(), 1.0 / 1000.0), 1.0e13);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Arrhenius {
    a: f64,
    b: f64,
    ea_r: f64,
    negative_a_ok: bool,
}

impl Default for Arrhenius {
    /// An unconfigured law: all parameters NaN.
    fn default() -> Self {
        Self {
            a: f64::NAN,
            b: f64::NAN,
            ea_r: f64::NAN,
            negative_a_ok: false,
        }
    }
}

impl Arrhenius {
    /// Create from `A`, `b` and `Ea` [J/kmol].
    pub fn new(a: f64, b: f64, ea: f64) -> Self {
        Self {
            a,
            b,
            ea_r: ea / GAS_CONSTANT,
            negative_a_ok: false,
        }
    }

    /// Temperature exponent `b`.
    pub fn temperature_exponent(&self) -> f64 {
        self.b
    }

    /// Activation energy divided by the gas constant [K].
    pub fn activation_energy_r(&self) -> f64 {
        self.ea_r
    }

    /// Whether parameters have been set.
    pub fn is_configured(&self) -> bool {
        !self.a.is_nan()
    }
}

impl RateLaw for Arrhenius {
    fn rate_type(&self) -> &'static str {
        "Arrhenius"
    }

    fn set_rate_parameters(
        &mut self,
        rate: Option<&Value>,
        units: &UnitSystem,
    ) -> Result<(), RateError> {
        let Some(rate) = rate else {
            let allow = self.negative_a_ok;
            *self = Self::default();
            self.negative_a_ok = allow;
            return Ok(());
        };
        match rate {
            Value::Map(node) => {
                self.a = node.require_f64("A")?;
                self.b = node.require_f64("b")?;
                self.ea_r = units.convert_activation_energy(node.require("Ea")?)?;
            }
            Value::List(_) => {
                let list = rate.as_list_of("rate-constant", 3)?;
                self.a = list[0].as_f64("A")?;
                self.b = list[1].as_f64("b")?;
                self.ea_r = units.convert_activation_energy(&list[2])?;
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
        node.insert("Ea", Quantity::new(self.ea_r, "K"));
    }

    fn eval_rate(&self, log_t: f64, recip_t: f64) -> f64 {
        self.a * (self.b * log_t - self.ea_r * recip_t).exp()
    }

    fn pre_exponential_factor(&self) -> f64 {
        self.a
    }

    fn activation_energy(&self) -> f64 {
        self.ea_r * GAS_CONSTANT
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
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use surfkin_core::EnergyUnit;

    fn map(a: f64, b: f64, ea: Value) -> Value {
        let mut node = Node::new();
        node.insert("A", a);
        node.insert("b", b);
        node.insert("Ea", ea);
        Value::Map(node)
    }

    #[test]
    fn unconfigured_by_default() {
        let law = Arrhenius::default();
        assert!(!law.is_configured());
        assert!(law.eval_rate(0.0, 1.0).is_nan());
        let mut node = Node::new();
        law.get_rate_parameters(&mut node);
        assert!(node.is_empty());
        assert!(matches!(
            law.validate("A => B"),
            Err(RateError::NotConfigured { .. })
        ));
    }

    #[test]
    fn eval_matches_closed_form() {
        let law = Arrhenius::new(2.0e10, 0.5, 8.0e7);
        let t: f64 = 750.0;
        let expected = 2.0e10 * t.powf(0.5) * (-8.0e7 / (GAS_CONSTANT * t)).exp();
        let k = law.eval_rate(t.ln(), 1.0 / t);
        assert!((k - expected).abs() <= 1e-12 * expected);
    }

    #[test]
    fn reads_map_with_units() {
        let mut law = Arrhenius::default();
        law.set_rate_parameters(
            Some(&map(1.0e13, 0.0, Value::Str("20 kJ/mol".into()))),
            &UnitSystem::default(),
        )
        .unwrap();
        assert_eq!(law.pre_exponential_factor(), 1.0e13);
        assert!((law.activation_energy() - 2.0e7).abs() < 1e-6);
    }

    #[test]
    fn reads_list_in_record_units() {
        let mut law = Arrhenius::default();
        let list = Value::List(vec![3.7e20.into(), Value::Int(0), 67.4.into()]);
        law.set_rate_parameters(
            Some(&list),
            &UnitSystem::with_activation_energy(EnergyUnit::KiloJoulePerMol),
        )
        .unwrap();
        assert_eq!(law.pre_exponential_factor(), 3.7e20);
        assert_eq!(law.temperature_exponent(), 0.0);
        assert!((law.activation_energy() - 6.74e7).abs() < 1e-4);
    }

    #[test]
    fn short_list_rejected() {
        let mut law = Arrhenius::default();
        let list = Value::List(vec![1.0.into(), 0.0.into()]);
        let err = law
            .set_rate_parameters(Some(&list), &UnitSystem::default())
            .unwrap_err();
        assert!(matches!(err, RateError::Config(NodeError::ListLength { .. })));
    }

    #[test]
    fn negative_a_requires_flag() {
        let mut law = Arrhenius::new(-1.0, 0.0, 0.0);
        assert!(matches!(
            law.validate("A => B"),
            Err(RateError::NegativePreExponential { .. })
        ));
        law.set_allow_negative_pre_exponential_factor(true);
        assert!(law.validate("A => B").is_ok());
    }

    #[test]
    fn clearing_keeps_negative_a_flag() {
        let mut law = Arrhenius::new(1.0, 0.0, 0.0);
        law.set_allow_negative_pre_exponential_factor(true);
        law.set_rate_parameters(None, &UnitSystem::default()).unwrap();
        assert!(!law.is_configured());
        assert!(law.allow_negative_pre_exponential_factor());
    }

    proptest! {
        #[test]
        fn parameters_round_trip(
            a in 1.0e-3f64..1.0e20,
            b in -2.0f64..3.0,
            ea_r in 0.0f64..5.0e4,
        ) {
            let mut law = Arrhenius::default();
            law.set_rate_parameters(
                Some(&map(a, b, Quantity::new(ea_r, "K").into())),
                &UnitSystem::default(),
            ).unwrap();
            let mut node = Node::new();
            law.get_rate_parameters(&mut node);

            let mut back = Arrhenius::default();
            back.set_rate_parameters(Some(&Value::Map(node)), &UnitSystem::default()).unwrap();
            prop_assert_eq!(back, law);
        }
    }
}
