//! The base rate-law capability.

use crate::context::{Kinetics, Reaction};
use crate::data::CoverageData;
use crate::error::RateError;
use crate::node::{Node, Value};
use crate::units::UnitSystem;

/// A temperature-dependent rate law that interface rates decorate.
///
/// Interface and sticking rates own a `RateLaw` by value and combine its
/// output with coverage and potential corrections; the law itself knows
/// nothing about surfaces.
///
/// # Contract
///
/// - `eval_rate` is pure: it depends only on its arguments and on state set
///   by configuration, `set_context` and `update_from_struct`.
/// - An unconfigured law reports NaN parameters and writes nothing in
///   [`get_rate_parameters`](Self::get_rate_parameters).
/// - `update_from_struct` is an optional hook; laws without per-pass state
///   keep the no-op default.
///
/// # Examples
///
/// A constant rate:
///
/// ```
/// use surfkin_core::{Node, RateError, RateLaw, UnitSystem, Value};
///
/// #[derive(Clone, Debug, Default)]
/// struct Constant {
///     k: f64,
///     negative_a_ok: bool,
/// }
///
/// impl RateLaw for Constant {
///     fn rate_type(&self) -> &'static str { "constant" }
///     fn set_rate_parameters(&mut self, rate: Option<&Value>, _units: &UnitSystem)
///         -> Result<(), RateError>
///     {
///         self.k = match rate {
///             Some(v) => v.as_f64("rate-constant")?,
///             None => f64::NAN,
///         };
///         Ok(())
///     }
///     fn get_rate_parameters(&self, node: &mut Node) {
///         if !self.k.is_nan() {
///             node.insert("k", self.k);
///         }
///     }
///     fn eval_rate(&self, _log_t: f64, _recip_t: f64) -> f64 { self.k }
///     fn pre_exponential_factor(&self) -> f64 { self.k }
///     fn activation_energy(&self) -> f64 { 0.0 }
///     fn allow_negative_pre_exponential_factor(&self) -> bool { self.negative_a_ok }
///     fn set_allow_negative_pre_exponential_factor(&mut self, allow: bool) {
///         self.negative_a_ok = allow;
///     }
/// }
///
/// let mut law = Constant::default();
/// law.set_rate_parameters(Some(&Value::Float(2.0)), &UnitSystem::default()).unwrap();
/// assert_eq!(law.eval_rate(0.0, 1.0), 2.0);
/// ```
pub trait RateLaw: Clone + Send + Sync + 'static {
    /// Identifier of the law, e.g. `"Arrhenius"`.
    fn rate_type(&self) -> &'static str;

    /// Configure from the value of a `rate-constant` (or
    /// `sticking-coefficient`) entry. `None` leaves the law unconfigured.
    fn set_rate_parameters(
        &mut self,
        rate: Option<&Value>,
        units: &UnitSystem,
    ) -> Result<(), RateError>;

    /// Write the parameters read by
    /// [`set_rate_parameters`](Self::set_rate_parameters) into `node`.
    fn get_rate_parameters(&self, node: &mut Node);

    /// Resolve reaction-dependent data. Default: nothing to resolve.
    fn set_context(&mut self, _reaction: &Reaction, _kinetics: &dyn Kinetics) -> Result<(), RateError> {
        Ok(())
    }

    /// Refresh per-pass state from the shared snapshot. Default: no-op.
    fn update_from_struct(&mut self, _data: &CoverageData) {}

    /// Evaluate the rate from `ln(T)` and `1/T`.
    fn eval_rate(&self, log_t: f64, recip_t: f64) -> f64;

    /// Pre-exponential factor in mechanism units.
    fn pre_exponential_factor(&self) -> f64;

    /// Activation energy [J/kmol].
    fn activation_energy(&self) -> f64;

    /// Whether a negative pre-exponential factor is permitted.
    fn allow_negative_pre_exponential_factor(&self) -> bool;

    /// Permit or forbid a negative pre-exponential factor.
    fn set_allow_negative_pre_exponential_factor(&mut self, allow: bool);

    /// Check the configured parameters for reaction `equation`.
    ///
    /// Default: accept.
    fn validate(&self, _equation: &str) -> Result<(), RateError> {
        Ok(())
    }
}
