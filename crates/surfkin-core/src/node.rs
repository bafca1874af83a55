//! Configuration records.
//!
//! A [`Node`] is an insertion-ordered key/value map with typed lookups, a
//! [`UnitSystem`] for bare numbers, and nested maps and lists. Rate objects
//! read their parameters from a `Node` and write an equivalent `Node` back,
//! so that re-reading the output reproduces the same object.
//!
//! JSON is the interchange format: [`Node::from_json`] and
//! [`Node::to_json`]. A top-level `"units"` object with an
//! `"activation-energy"` entry sets the unit system of the whole record.

use std::fmt;

use indexmap::IndexMap;

use crate::error::NodeError;
use crate::units::{EnergyUnit, UnitSystem};

/// A number with an attached unit symbol.
#[derive(Clone, Debug, PartialEq)]
pub struct Quantity {
    /// Numeric magnitude.
    pub value: f64,
    /// Unit symbol, e.g. `"kJ/mol"`.
    pub units: String,
}

impl Quantity {
    /// Create a quantity.
    pub fn new(value: f64, units: impl Into<String>) -> Self {
        Self {
            value,
            units: units.into(),
        }
    }

    /// Parse `"<value> <unit>"`. The unit may contain spaces.
    pub fn parse(text: &str) -> Result<Self, NodeError> {
        let invalid = || NodeError::InvalidQuantity {
            text: text.to_string(),
        };
        let trimmed = text.trim();
        let (number, unit) = trimmed.split_once(char::is_whitespace).ok_or_else(invalid)?;
        let value: f64 = number.parse().map_err(|_| invalid())?;
        let unit = unit.trim();
        if unit.is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(value, unit))
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.value, self.units)
    }
}

/// A value stored in a [`Node`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Boolean flag.
    Bool(bool),
    /// Integer.
    Int(i64),
    /// Floating-point number.
    Float(f64),
    /// String.
    Str(String),
    /// Number with units.
    Quantity(Quantity),
    /// Ordered list.
    List(Vec<Value>),
    /// Nested record.
    Map(Node),
}

impl Value {
    /// Short name of the variant, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "integer",
            Self::Float(_) => "float",
            Self::Str(_) => "string",
            Self::Quantity(_) => "quantity",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }

    /// Read as a plain number. Integers are widened.
    pub fn as_f64(&self, key: &str) -> Result<f64, NodeError> {
        match self {
            Self::Float(v) => Ok(*v),
            Self::Int(v) => Ok(*v as f64),
            other => Err(mismatch(key, "number", other)),
        }
    }

    /// Read as a boolean.
    pub fn as_bool(&self, key: &str) -> Result<bool, NodeError> {
        match self {
            Self::Bool(v) => Ok(*v),
            other => Err(mismatch(key, "bool", other)),
        }
    }

    /// Read as a string slice.
    pub fn as_str(&self, key: &str) -> Result<&str, NodeError> {
        match self {
            Self::Str(v) => Ok(v),
            other => Err(mismatch(key, "string", other)),
        }
    }

    /// Read as a nested record.
    pub fn as_map(&self, key: &str) -> Result<&Node, NodeError> {
        match self {
            Self::Map(v) => Ok(v),
            other => Err(mismatch(key, "map", other)),
        }
    }

    /// Read as a list.
    pub fn as_list(&self, key: &str) -> Result<&[Value], NodeError> {
        match self {
            Self::List(v) => Ok(v),
            other => Err(mismatch(key, "list", other)),
        }
    }

    /// Read as a list of exactly `len` entries.
    pub fn as_list_of(&self, key: &str, len: usize) -> Result<&[Value], NodeError> {
        let list = self.as_list(key)?;
        if list.len() != len {
            return Err(NodeError::ListLength {
                key: key.to_string(),
                expected: len,
                found: list.len(),
            });
        }
        Ok(list)
    }

    fn set_units_recursive(&mut self, units: UnitSystem) {
        match self {
            Self::Map(node) => node.set_units(units),
            Self::List(items) => {
                for item in items {
                    item.set_units_recursive(units);
                }
            }
            _ => {}
        }
    }

    fn from_json(value: &serde_json::Value, units: UnitSystem) -> Result<Self, NodeError> {
        use serde_json::Value as J;
        match value {
            J::Bool(b) => Ok(Self::Bool(*b)),
            J::Number(n) => match n.as_i64() {
                Some(i) => Ok(Self::Int(i)),
                None => n.as_f64().map(Self::Float).ok_or_else(|| NodeError::Json {
                    reason: format!("number {n} is not representable"),
                }),
            },
            J::String(s) => Ok(Self::Str(s.clone())),
            J::Array(items) => items
                .iter()
                .map(|item| Self::from_json(item, units))
                .collect::<Result<Vec<_>, _>>()
                .map(Self::List),
            J::Object(map) => Node::from_json_object(map, units).map(Self::Map),
            J::Null => Err(NodeError::Json {
                reason: "null values are not supported".into(),
            }),
        }
    }

    fn to_json(&self) -> serde_json::Value {
        use serde_json::Value as J;
        match self {
            Self::Bool(b) => J::Bool(*b),
            Self::Int(i) => J::from(*i),
            Self::Float(v) => serde_json::Number::from_f64(*v)
                .map(J::Number)
                .unwrap_or(J::Null),
            Self::Str(s) => J::String(s.clone()),
            Self::Quantity(q) => J::String(q.to_string()),
            Self::List(items) => J::Array(items.iter().map(Self::to_json).collect()),
            Self::Map(node) => node.to_json(),
        }
    }
}

fn mismatch(key: &str, expected: &'static str, found: &Value) -> NodeError {
    NodeError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: found.kind(),
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Quantity> for Value {
    fn from(v: Quantity) -> Self {
        Self::Quantity(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::List(v)
    }
}

impl From<Node> for Value {
    fn from(v: Node) -> Self {
        Self::Map(v)
    }
}

/// An ordered configuration record.
///
/// # Examples
///
/// ```
/// use surfkin_core::{Node, UnitSystem};
///
/// let node = Node::from_json(r#"{"beta": 0.4, "negative-A": true}"#).unwrap();
/// assert_eq!(node.get_f64_or("beta", 0.5).unwrap(), 0.4);
/// assert!(node.get_bool("negative-A", false).unwrap());
/// assert!(!node.get_bool("Motz-Wise", false).unwrap());
/// assert_eq!(*node.units(), UnitSystem::default());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Node {
    entries: IndexMap<String, Value>,
    units: UnitSystem,
}

impl Node {
    /// Create an empty record using SI units.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record using the given unit system.
    pub fn with_units(units: UnitSystem) -> Self {
        Self {
            entries: IndexMap::new(),
            units,
        }
    }

    /// Unit system applied to bare numbers in this record.
    pub fn units(&self) -> &UnitSystem {
        &self.units
    }

    /// Set the unit system of this record and every nested record.
    pub fn set_units(&mut self, units: UnitSystem) {
        self.units = units;
        for value in self.entries.values_mut() {
            value.set_units_recursive(units);
        }
    }

    /// Whether `key` is present.
    pub fn has_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Look up `key`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Look up a key that must be present.
    pub fn require(&self, key: &str) -> Result<&Value, NodeError> {
        self.entries.get(key).ok_or_else(|| NodeError::MissingKey {
            key: key.to_string(),
        })
    }

    /// Insert or replace `key`, keeping its original position if replaced.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Remove `key`, preserving the order of the remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the record has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Boolean lookup with a default for absent keys.
    pub fn get_bool(&self, key: &str, default: bool) -> Result<bool, NodeError> {
        self.get(key).map_or(Ok(default), |v| v.as_bool(key))
    }

    /// Numeric lookup with a default for absent keys.
    pub fn get_f64_or(&self, key: &str, default: f64) -> Result<f64, NodeError> {
        self.get(key).map_or(Ok(default), |v| v.as_f64(key))
    }

    /// Numeric lookup of a required key.
    pub fn require_f64(&self, key: &str) -> Result<f64, NodeError> {
        self.require(key)?.as_f64(key)
    }

    /// String lookup; `None` if absent.
    pub fn get_str(&self, key: &str) -> Result<Option<&str>, NodeError> {
        self.get(key).map(|v| v.as_str(key)).transpose()
    }

    /// Nested-record lookup; `None` if absent.
    pub fn get_map(&self, key: &str) -> Result<Option<&Node>, NodeError> {
        self.get(key).map(|v| v.as_map(key)).transpose()
    }

    /// Parse a JSON object.
    pub fn from_json(text: &str) -> Result<Self, NodeError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| NodeError::Json {
                reason: e.to_string(),
            })?;
        match &value {
            serde_json::Value::Object(map) => Self::from_json_object(map, UnitSystem::default()),
            other => Err(NodeError::Json {
                reason: format!("expected an object at top level, found {other}"),
            }),
        }
    }

    fn from_json_object(
        map: &serde_json::Map<String, serde_json::Value>,
        inherited: UnitSystem,
    ) -> Result<Self, NodeError> {
        let mut units = inherited;
        if let Some(spec) = map.get("units") {
            let activation = spec
                .get("activation-energy")
                .and_then(serde_json::Value::as_str)
                .ok_or_else(|| NodeError::Json {
                    reason: "'units' must map 'activation-energy' to a unit string".into(),
                })?;
            units = UnitSystem::with_activation_energy(EnergyUnit::parse(activation)?);
        }
        let mut node = Self::with_units(units);
        for (key, value) in map {
            if key == "units" {
                continue;
            }
            node.entries
                .insert(key.clone(), Value::from_json(value, units)?);
        }
        Ok(node)
    }

    /// Render as a JSON object.
    ///
    /// Quantities become `"<value> <unit>"` strings. A non-default unit
    /// system is written as a top-level `"units"` entry.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        if self.units != UnitSystem::default() {
            let mut spec = serde_json::Map::new();
            spec.insert(
                "activation-energy".into(),
                self.units.activation_energy.symbol().into(),
            );
            map.insert("units".into(), serde_json::Value::Object(spec));
        }
        for (key, value) in &self.entries {
            map.insert(key.clone(), value.to_json());
        }
        serde_json::Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_lookups() {
        let mut node = Node::new();
        node.insert("flag", true);
        node.insert("x", 2.5);
        node.insert("n", 3i64);
        node.insert("name", "CO(S)");

        assert!(node.get_bool("flag", false).unwrap());
        assert!(node.get_bool("absent", true).unwrap());
        assert_eq!(node.require_f64("x").unwrap(), 2.5);
        assert_eq!(node.require_f64("n").unwrap(), 3.0);
        assert_eq!(node.get_str("name").unwrap(), Some("CO(S)"));
        assert_eq!(node.get_str("absent").unwrap(), None);
    }

    #[test]
    fn wrong_type_reports_key() {
        let mut node = Node::new();
        node.insert("flag", 1.0);
        let err = node.get_bool("flag", false).unwrap_err();
        assert_eq!(
            err,
            NodeError::TypeMismatch {
                key: "flag".into(),
                expected: "bool",
                found: "float",
            }
        );
    }

    #[test]
    fn missing_required_key() {
        let node = Node::new();
        assert_eq!(
            node.require_f64("A").unwrap_err(),
            NodeError::MissingKey { key: "A".into() }
        );
    }

    #[test]
    fn insert_preserves_position_on_replace() {
        let mut node = Node::new();
        node.insert("a", 1.0);
        node.insert("b", 2.0);
        node.insert("a", 3.0);
        let keys: Vec<&str> = node.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(node.require_f64("a").unwrap(), 3.0);
    }

    #[test]
    fn quantity_parse_and_display() {
        let q = Quantity::parse("  12.5 kJ/mol ").unwrap();
        assert_eq!(q, Quantity::new(12.5, "kJ/mol"));
        assert_eq!(q.to_string(), "12.5 kJ/mol");
        assert!(Quantity::parse("12.5").is_err());
        assert!(Quantity::parse("abc K").is_err());
    }

    #[test]
    fn list_length_checked() {
        let v = Value::List(vec![1.0.into(), 2.0.into()]);
        assert!(v.as_list_of("dep", 2).is_ok());
        assert_eq!(
            v.as_list_of("dep", 3).unwrap_err(),
            NodeError::ListLength {
                key: "dep".into(),
                expected: 3,
                found: 2,
            }
        );
    }

    #[test]
    fn json_units_propagate_to_children() {
        let node = Node::from_json(
            r#"{"units": {"activation-energy": "kcal/mol"},
                "coverage-dependencies": {"H(S)": {"a": 0, "m": 0, "E": 6.0}}}"#,
        )
        .unwrap();
        assert!(!node.has_key("units"));
        let deps = node.get_map("coverage-dependencies").unwrap().unwrap();
        assert_eq!(
            deps.units().activation_energy,
            EnergyUnit::KiloCaloriePerMol
        );
        let inner = deps.get_map("H(S)").unwrap().unwrap();
        assert_eq!(
            inner.units().activation_energy,
            EnergyUnit::KiloCaloriePerMol
        );
    }

    #[test]
    fn json_round_trip() {
        let mut inner = Node::new();
        inner.insert("a", 0.1);
        inner.insert("E", Quantity::new(1500.0, "K"));
        let mut node = Node::with_units(UnitSystem::with_activation_energy(EnergyUnit::Kelvin));
        node.insert("type", "interface-Arrhenius");
        node.insert("negative-A", true);
        node.insert("list", vec![Value::Int(1), Value::Float(2.5)]);
        node.insert("dep", inner);

        let text = node.to_json().to_string();
        let back = Node::from_json(&text).unwrap();
        assert_eq!(back.units(), node.units());
        assert_eq!(back.get_str("type").unwrap(), Some("interface-Arrhenius"));
        assert!(back.get_bool("negative-A", false).unwrap());
        let dep = back.get_map("dep").unwrap().unwrap();
        assert_eq!(dep.get("E"), Some(&Value::Str("1500 K".into())));
    }

    #[test]
    fn json_rejects_non_object_and_null() {
        assert!(Node::from_json("[1, 2]").is_err());
        assert!(Node::from_json(r#"{"a": null}"#).is_err());
        assert!(Node::from_json("{").is_err());
    }
}
