//! A minimal stand-in for the batched rate dispatcher.

use surfkin_core::{CoverageData, Kinetics, RateError, Reaction};
use surfkin_interface::{ReactionRate, ValidationWarning};

/// Owns one shared [`CoverageData`] and a set of rates, and runs the
/// update-then-evaluate pass the way a production dispatcher would.
pub struct BatchDriver {
    data: CoverageData,
    rates: Vec<Box<dyn ReactionRate>>,
    warnings: Vec<ValidationWarning>,
}

impl BatchDriver {
    /// Start from a prepared snapshot.
    pub fn new(data: CoverageData) -> Self {
        Self {
            data,
            rates: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Resolve `rate` against `reaction`, validate it and add it.
    ///
    /// Returns the slot of the new rate.
    pub fn add(
        &mut self,
        mut rate: Box<dyn ReactionRate>,
        reaction: &Reaction,
        kinetics: &dyn Kinetics,
    ) -> Result<usize, RateError> {
        rate.set_context(reaction, kinetics)?;
        let equation = reaction.equation();
        self.warnings.extend(rate.validate(&equation, kinetics)?);
        self.rates.push(rate);
        Ok(self.rates.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }

    pub fn rate(&self, slot: usize) -> &dyn ReactionRate {
        self.rates[slot].as_ref()
    }

    /// Plausibility warnings collected while adding rates.
    pub fn warnings(&self) -> &[ValidationWarning] {
        &self.warnings
    }

    pub fn data(&self) -> &CoverageData {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut CoverageData {
        &mut self.data
    }

    /// Refresh temperature and coverages in the shared snapshot.
    pub fn set_state(&mut self, temperature: f64, coverages: &[f64]) -> Result<(), RateError> {
        self.data.update_coverages(temperature, coverages)
    }

    /// Let every rate cache its per-pass scalars.
    pub fn update(&mut self) {
        for rate in &mut self.rates {
            rate.update_from_struct(&self.data);
        }
    }

    /// Evaluate every rate against the current snapshot.
    pub fn eval(&self) -> Vec<f64> {
        self.rates
            .iter()
            .map(|rate| rate.eval_from_struct(&self.data))
            .collect()
    }

    /// `set_state`, `update` and `eval` in one go.
    pub fn step(&mut self, temperature: f64, coverages: &[f64]) -> Result<Vec<f64>, RateError> {
        self.set_state(temperature, coverages)?;
        self.update();
        Ok(self.eval())
    }
}
