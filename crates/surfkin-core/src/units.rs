//! Unit handling for activation energies.
//!
//! Rate parameterizations store activation energies in Kelvin (energy
//! divided by the gas constant). Configuration records may state them in
//! any [`EnergyUnit`]; bare numbers are read in the record's
//! [`UnitSystem`] default.

use std::fmt;

use crate::constants::{FARADAY, GAS_CONSTANT};
use crate::error::NodeError;
use crate::node::{Quantity, Value};

/// A molar energy unit (or Kelvin, for energy / gas constant).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EnergyUnit {
    /// J/kmol, the internal SI unit.
    #[default]
    JoulePerKmol,
    /// J/mol.
    JoulePerMol,
    /// kJ/mol.
    KiloJoulePerMol,
    /// cal/mol (thermochemical calorie).
    CaloriePerMol,
    /// kcal/mol.
    KiloCaloriePerMol,
    /// eV per molecule.
    ElectronVolt,
    /// Kelvin: the energy already divided by the gas constant.
    Kelvin,
}

impl EnergyUnit {
    /// Parse a unit symbol such as `"kJ/mol"` or `"K"`.
    pub fn parse(symbol: &str) -> Result<Self, NodeError> {
        match symbol.trim() {
            "J/kmol" => Ok(Self::JoulePerKmol),
            "J/mol" => Ok(Self::JoulePerMol),
            "kJ/mol" => Ok(Self::KiloJoulePerMol),
            "cal/mol" => Ok(Self::CaloriePerMol),
            "kcal/mol" => Ok(Self::KiloCaloriePerMol),
            "eV" => Ok(Self::ElectronVolt),
            "K" => Ok(Self::Kelvin),
            other => Err(NodeError::UnknownUnit {
                unit: other.to_string(),
            }),
        }
    }

    /// Canonical symbol, accepted by [`parse`](Self::parse).
    pub fn symbol(self) -> &'static str {
        match self {
            Self::JoulePerKmol => "J/kmol",
            Self::JoulePerMol => "J/mol",
            Self::KiloJoulePerMol => "kJ/mol",
            Self::CaloriePerMol => "cal/mol",
            Self::KiloCaloriePerMol => "kcal/mol",
            Self::ElectronVolt => "eV",
            Self::Kelvin => "K",
        }
    }

    /// Convert a value in this unit to Kelvin.
    pub fn to_kelvin(self, value: f64) -> f64 {
        match self {
            Self::Kelvin => value,
            _ => value * self.joule_per_kmol() / GAS_CONSTANT,
        }
    }

    /// Convert a value in Kelvin to this unit.
    pub fn from_kelvin(self, value: f64) -> f64 {
        match self {
            Self::Kelvin => value,
            _ => value * GAS_CONSTANT / self.joule_per_kmol(),
        }
    }

    /// Size of one unit in J/kmol. Not meaningful for [`Kelvin`](Self::Kelvin).
    fn joule_per_kmol(self) -> f64 {
        match self {
            Self::JoulePerKmol => 1.0,
            Self::JoulePerMol => 1.0e3,
            Self::KiloJoulePerMol => 1.0e6,
            Self::CaloriePerMol => 4184.0,
            Self::KiloCaloriePerMol => 4.184e6,
            // 1 eV per molecule is one volt times the Faraday constant per kmol.
            Self::ElectronVolt => FARADAY,
            Self::Kelvin => GAS_CONSTANT,
        }
    }
}

impl fmt::Display for EnergyUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// The default units applied to bare numbers in a configuration record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct UnitSystem {
    /// Unit of activation energies given without an explicit unit.
    pub activation_energy: EnergyUnit,
}

impl UnitSystem {
    /// A unit system reading bare activation energies in `unit`.
    pub fn with_activation_energy(unit: EnergyUnit) -> Self {
        Self {
            activation_energy: unit,
        }
    }

    /// Convert an activation energy value to Kelvin.
    ///
    /// Accepts a number (in this system's default unit), a [`Quantity`],
    /// or a string of the form `"<value> <unit>"`.
    pub fn convert_activation_energy(&self, value: &Value) -> Result<f64, NodeError> {
        match value {
            Value::Int(_) | Value::Float(_) => {
                let v = value.as_f64("activation energy")?;
                Ok(self.activation_energy.to_kelvin(v))
            }
            Value::Quantity(q) => Ok(EnergyUnit::parse(&q.units)?.to_kelvin(q.value)),
            Value::Str(text) => {
                let q = Quantity::parse(text)?;
                Ok(EnergyUnit::parse(&q.units)?.to_kelvin(q.value))
            }
            other => Err(NodeError::TypeMismatch {
                key: "activation energy".into(),
                expected: "number or quantity",
                found: other.kind(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-12 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn parse_and_symbol_agree() {
        for unit in [
            EnergyUnit::JoulePerKmol,
            EnergyUnit::JoulePerMol,
            EnergyUnit::KiloJoulePerMol,
            EnergyUnit::CaloriePerMol,
            EnergyUnit::KiloCaloriePerMol,
            EnergyUnit::ElectronVolt,
            EnergyUnit::Kelvin,
        ] {
            assert_eq!(EnergyUnit::parse(unit.symbol()).unwrap(), unit);
        }
    }

    #[test]
    fn unknown_unit_rejected() {
        let err = EnergyUnit::parse("furlong").unwrap_err();
        assert_eq!(
            err,
            NodeError::UnknownUnit {
                unit: "furlong".into()
            }
        );
    }

    #[test]
    fn kilojoule_per_mol_to_kelvin() {
        let k = EnergyUnit::KiloJoulePerMol.to_kelvin(1.0);
        assert!(close(k, 1.0e6 / GAS_CONSTANT));
        assert!(close(EnergyUnit::KiloJoulePerMol.from_kelvin(k), 1.0));
    }

    #[test]
    fn kelvin_is_identity() {
        assert_eq!(EnergyUnit::Kelvin.to_kelvin(1234.5), 1234.5);
        assert_eq!(EnergyUnit::Kelvin.from_kelvin(1234.5), 1234.5);
    }

    #[test]
    fn bare_number_uses_system_default() {
        let si = UnitSystem::default();
        assert!(close(
            si.convert_activation_energy(&Value::Float(GAS_CONSTANT)).unwrap(),
            1.0
        ));
        let cal = UnitSystem::with_activation_energy(EnergyUnit::CaloriePerMol);
        assert!(close(
            cal.convert_activation_energy(&Value::Int(1000)).unwrap(),
            1000.0 * 4184.0 / GAS_CONSTANT
        ));
    }

    #[test]
    fn string_quantity_overrides_default() {
        let si = UnitSystem::default();
        let k = si
            .convert_activation_energy(&Value::Str("300 K".into()))
            .unwrap();
        assert_eq!(k, 300.0);
        let k = si
            .convert_activation_energy(&Value::Str("1 eV".into()))
            .unwrap();
        assert!(close(k, FARADAY / GAS_CONSTANT));
    }

    #[test]
    fn non_numeric_rejected() {
        let si = UnitSystem::default();
        assert!(si.convert_activation_energy(&Value::Bool(true)).is_err());
        assert!(si
            .convert_activation_energy(&Value::Str("lots".into()))
            .is_err());
    }
}
