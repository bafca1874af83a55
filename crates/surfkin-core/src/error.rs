//! Error types for surfkin.
//!
//! Split by subsystem: [`NodeError`] covers configuration record access and
//! unit conversion, [`RateError`] covers rate setup, validation, snapshot
//! maintenance and unimplemented operations.

use std::error::Error;
use std::fmt;

/// Errors from reading a configuration [`Node`](crate::Node).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeError {
    /// A required key is absent.
    MissingKey {
        /// The missing key.
        key: String,
    },
    /// A key holds a value of the wrong kind.
    TypeMismatch {
        /// The offending key (or list position, e.g. `"Ea[2]"`).
        key: String,
        /// What the caller asked for.
        expected: &'static str,
        /// What the record contains.
        found: &'static str,
    },
    /// A list has the wrong number of entries.
    ListLength {
        /// The offending key.
        key: String,
        /// Required length.
        expected: usize,
        /// Actual length.
        found: usize,
    },
    /// A unit string is not recognized.
    UnknownUnit {
        /// The unit as written.
        unit: String,
    },
    /// A string could not be read as `"<value> <unit>"`.
    InvalidQuantity {
        /// The text as written.
        text: String,
    },
    /// JSON input could not be parsed or converted.
    Json {
        /// Parser diagnostic.
        reason: String,
    },
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingKey { key } => write!(f, "missing required key '{key}'"),
            Self::TypeMismatch {
                key,
                expected,
                found,
            } => write!(f, "key '{key}': expected {expected}, found {found}"),
            Self::ListLength {
                key,
                expected,
                found,
            } => write!(f, "key '{key}': expected {expected} entries, found {found}"),
            Self::UnknownUnit { unit } => write!(f, "unknown unit '{unit}'"),
            Self::InvalidQuantity { text } => write!(f, "cannot read quantity from '{text}'"),
            Self::Json { reason } => write!(f, "invalid JSON: {reason}"),
        }
    }
}

impl Error for NodeError {}

/// Errors from configuring, contextualizing or evaluating a rate.
///
/// Everything except [`RateError::NotImplemented`] is raised at setup time,
/// before any evaluation pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RateError {
    /// The configuration record was malformed.
    Config(NodeError),
    /// A species named by the rate is not known to the mechanism.
    UnknownSpecies {
        /// The species name.
        species: String,
        /// Where the name was used.
        context: String,
    },
    /// The sticking species could not be determined.
    AmbiguousStickingSpecies {
        /// Equation of the offending reaction.
        equation: String,
    },
    /// The base rate law has no parameters.
    NotConfigured {
        /// Equation of the offending reaction.
        equation: String,
    },
    /// A negative pre-exponential factor was found without `negative-A`.
    NegativePreExponential {
        /// Equation of the offending reaction.
        equation: String,
    },
    /// A rate parameter is out of its admissible range.
    InvalidParameter {
        /// Description of the violated constraint.
        reason: String,
    },
    /// A vector handed to the snapshot has the wrong length.
    SnapshotMismatch {
        /// Which vector.
        what: &'static str,
        /// Required length.
        expected: usize,
        /// Supplied length.
        found: usize,
    },
    /// The snapshot temperature is already perturbed.
    AlreadyPerturbed,
    /// The `type` of a configuration record names no known rate.
    UnknownRateType {
        /// The type as written.
        name: String,
    },
    /// The operation is a permanent capability gap of this rate.
    NotImplemented {
        /// Qualified name of the operation.
        operation: &'static str,
    },
}

impl fmt::Display for RateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "configuration: {e}"),
            Self::UnknownSpecies { species, context } => {
                write!(f, "{context}: unknown species '{species}'")
            }
            Self::AmbiguousStickingSpecies { equation } => {
                write!(
                    f,
                    "could not determine sticking species for reaction '{equation}'"
                )
            }
            Self::NotConfigured { equation } => {
                write!(f, "rate object for reaction '{equation}' is not configured")
            }
            Self::NegativePreExponential { equation } => write!(
                f,
                "undeclared negative pre-exponential factor in reaction '{equation}'"
            ),
            Self::InvalidParameter { reason } => write!(f, "invalid parameter: {reason}"),
            Self::SnapshotMismatch {
                what,
                expected,
                found,
            } => write!(
                f,
                "incompatible length of {what}: received {found} elements while {expected} are required"
            ),
            Self::AlreadyPerturbed => {
                write!(f, "cannot apply another perturbation as state is already perturbed")
            }
            Self::UnknownRateType { name } => write!(f, "unknown rate type '{name}'"),
            Self::NotImplemented { operation } => write!(f, "not implemented: {operation}"),
        }
    }
}

impl Error for RateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<NodeError> for RateError {
    fn from(e: NodeError) -> Self {
        Self::Config(e)
    }
}
