//! Benchmark profiles for surfkin.
//!
//! - [`reference_profile`]: a platinum mechanism with a mix of coverage
//!   dependent interface rates and sticking rates
//! - [`coverage_sweep`]: deterministic coverage vectors for repeated passes

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use surfkin_core::{Node, RateError};
use surfkin_interface::new_reaction_rate;
use surfkin_test_utils::fixtures::{self, reaction};
use surfkin_test_utils::BatchDriver;

/// Rate records and equations of the reference profile, `copies` times over.
///
/// Each copy holds two sticking adsorptions and two coverage-dependent
/// surface reactions.
pub fn reference_records(copies: usize) -> Vec<(Node, &'static str)> {
    let mut out = Vec::with_capacity(4 * copies);
    for i in 0..copies {
        let scale = 1.0 + i as f64 * 1e-3;
        out.push((
            fixtures::sticking_record(0.046 * scale, 0.0, 0.0),
            fixtures::H2_ADSORPTION,
        ));
        out.push((
            fixtures::sticking_record(0.84 * scale, 0.0, 0.0),
            fixtures::CO_ADSORPTION,
        ));
        out.push((
            fixtures::with_coverage(
                fixtures::interface_record(3.7e20 * scale, 0.0, 6.74e7),
                "H(S)",
                0.0,
                0.0,
                -6.0e6,
            ),
            fixtures::H_DESORPTION,
        ));
        out.push((
            fixtures::with_coverage(
                fixtures::with_coverage(
                    fixtures::interface_record(3.7e20 * scale, 0.0, 1.05e8),
                    "CO(S)",
                    0.0,
                    0.0,
                    -3.3e7,
                ),
                "O(S)",
                1.0,
                0.5,
                0.0,
            ),
            fixtures::CO_OXIDATION,
        ));
    }
    out
}

/// Build a driver over the platinum mechanism holding
/// `4 * copies` rates.
pub fn reference_profile(copies: usize) -> Result<BatchDriver, RateError> {
    let kin = fixtures::platinum_hydrogen();
    let mut driver = BatchDriver::new(kin.snapshot());
    for (record, equation) in reference_records(copies) {
        driver.add(new_reaction_rate(&record)?, &reaction(equation), &kin)?;
    }
    Ok(driver)
}

/// `n` coverage vectors over PT(S), H(S), O(S), CO(S) summing to one.
pub fn coverage_sweep(n: usize) -> Vec<[f64; 4]> {
    (0..n)
        .map(|i| {
            let x = (i as f64 + 0.5) / n as f64;
            let h = 0.3 * x;
            let o = 0.2 * (1.0 - x);
            let co = 0.25 * x * (1.0 - x);
            [1.0 - h - o - co, h, o, co]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_profile_builds() {
        let driver = reference_profile(3).unwrap();
        assert_eq!(driver.len(), 12);
        assert!(driver.warnings().is_empty());
    }

    #[test]
    fn sweep_is_normalized() {
        for theta in coverage_sweep(16) {
            let total: f64 = theta.iter().sum();
            assert!((total - 1.0).abs() < 1e-12);
            assert!(theta.iter().all(|&t| t >= 0.0));
        }
    }
}
