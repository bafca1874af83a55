//! The [`ReactionRate`] trait and [`ValidationWarning`].
//!
//! `ReactionRate` is the uniform face the batched dispatcher sees: it hides
//! the base rate law behind a trait object so reactions of different
//! parameterizations can share one container.

use std::fmt;

use surfkin_core::{CoverageData, Kinetics, Node, RateError, Reaction};

/// A non-fatal plausibility finding from [`ReactionRate::validate`].
#[derive(Clone, Debug, PartialEq)]
pub struct ValidationWarning {
    /// Equation of the reaction that triggered the warning.
    pub equation: String,
    /// Temperature of the probe [K].
    pub temperature: f64,
    /// Value the base law returned at that temperature.
    pub value: f64,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sticking coefficient {:e} is greater than 1 for reaction '{}' at T = {:.1}",
            self.value, self.equation, self.temperature
        )
    }
}

/// A fully configured rate coefficient for one interface reaction.
///
/// # Contract
///
/// - Configuration ([`set_parameters`](Self::set_parameters)) and
///   [`set_context`](Self::set_context) happen once, before any pass.
/// - Each pass calls [`update_from_struct`](Self::update_from_struct) and
///   then [`eval_from_struct`](Self::eval_from_struct) with the same
///   snapshot. `eval_from_struct` reads only cached state and the snapshot.
/// - Implementors are `Send + Sync` so an external dispatcher may update
///   distinct reactions on different threads.
///
/// # Object safety
///
/// This trait is object-safe; dispatchers store rates as
/// `Vec<Box<dyn ReactionRate>>`.
pub trait ReactionRate: Send + Sync {
    /// Identifier such as `"interface-Arrhenius"`.
    fn rate_type(&self) -> String;

    /// Configure from a rate record.
    fn set_parameters(&mut self, node: &Node) -> Result<(), RateError>;

    /// Write the configuration into `node`, omitting defaults.
    fn get_parameters(&self, node: &mut Node);

    /// The configuration as a fresh record.
    fn parameters(&self) -> Node {
        let mut node = Node::new();
        self.get_parameters(&mut node);
        node
    }

    /// Resolve species and phases against the owning mechanism.
    fn set_context(&mut self, reaction: &Reaction, kinetics: &dyn Kinetics) -> Result<(), RateError>;

    /// Check the configuration for reaction `equation`.
    ///
    /// Hard errors are returned as `Err`; plausibility findings as warnings.
    fn validate(&self, equation: &str, kinetics: &dyn Kinetics) -> Result<Vec<ValidationWarning>, RateError>;

    /// Cache per-pass scalars from the shared snapshot.
    fn update_from_struct(&mut self, data: &CoverageData);

    /// Evaluate the rate coefficient.
    fn eval_from_struct(&self, data: &CoverageData) -> f64;

    /// Temperature derivative of the rate divided by the rate.
    fn ddt_scaled_from_struct(&self, data: &CoverageData) -> Result<f64, RateError>;

    /// Effective pre-exponential factor including coverage terms.
    fn pre_exponential_factor(&self) -> f64;

    /// Effective activation energy including coverage terms [J/kmol].
    fn activation_energy(&self) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_display_names_reaction_and_temperature() {
        let warning = ValidationWarning {
            equation: "H2 + 2 PT(S) => 2 H(S)".into(),
            temperature: 500.0,
            value: 2.5,
        };
        let text = warning.to_string();
        assert!(text.contains("H2 + 2 PT(S) => 2 H(S)"));
        assert!(text.contains("T = 500.0"));
    }
}
