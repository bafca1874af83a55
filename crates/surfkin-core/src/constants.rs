//! Physical constants in the kmol-based SI system used throughout surfkin.
//!
//! All energies are per kmol, so `GAS_CONSTANT` is in J/kmol/K and
//! `FARADAY` is in C/kmol.

/// Avogadro's number [1/kmol].
pub const AVOGADRO: f64 = 6.02214076e26;

/// Elementary charge [C].
pub const ELECTRON_CHARGE: f64 = 1.602176634e-19;

/// Boltzmann constant [J/K].
pub const BOLTZMANN: f64 = 1.380649e-23;

/// Universal gas constant [J/kmol/K].
pub const GAS_CONSTANT: f64 = AVOGADRO * BOLTZMANN;

/// Faraday constant [C/kmol].
pub const FARADAY: f64 = ELECTRON_CHARGE * AVOGADRO;

/// Archimedes' constant.
pub const PI: f64 = std::f64::consts::PI;

/// Floor applied to coverages before taking logarithms.
pub const TINY: f64 = 1.0e-20;

/// Threshold below which a net charge change is treated as zero.
pub const SMALL_NUMBER: f64 = 1.0e-300;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gas_constant_matches_codata() {
        assert!((GAS_CONSTANT - 8314.462618).abs() < 1e-5);
    }

    #[test]
    fn faraday_matches_codata() {
        assert!((FARADAY - 96_485_332.12).abs() < 1.0);
    }
}
