//! Construction of rates from configuration records.

use surfkin_core::{Node, RateError};
use surfkin_rates::{Arrhenius, BlowersMasel};

use crate::interface_rate::InterfaceRate;
use crate::rate::ReactionRate;
use crate::sticking_rate::StickingRate;

/// Rate types understood by [`new_reaction_rate`].
pub const RATE_TYPES: [&str; 4] = [
    "interface-Arrhenius",
    "interface-Blowers-Masel",
    "sticking-Arrhenius",
    "sticking-Blowers-Masel",
];

/// Build and configure a rate from a record, dispatching on its `type` key.
///
/// Without `type`, a record carrying `sticking-coefficient` is read as
/// `sticking-Arrhenius` and anything else as `interface-Arrhenius`.
///
/// ```
/// use surfkin_core::Node;
/// use surfkin_interface::new_reaction_rate;
///
/// let node = Node::from_json(r#"{
///     "type": "sticking-Arrhenius",
///     "sticking-coefficient": [0.046, 0, 0]
/// }"#).unwrap();
/// let rate = new_reaction_rate(&node).unwrap();
/// assert_eq!(rate.rate_type(), "sticking-Arrhenius");
/// ```
pub fn new_reaction_rate(node: &Node) -> Result<Box<dyn ReactionRate>, RateError> {
    let rate_type = match node.get_str("type")? {
        Some(t) => t,
        None if node.has_key("sticking-coefficient") => "sticking-Arrhenius",
        None => "interface-Arrhenius",
    };
    let rate: Box<dyn ReactionRate> = match rate_type {
        "interface-Arrhenius" => Box::new(InterfaceRate::<Arrhenius>::from_node(node)?),
        "interface-Blowers-Masel" => Box::new(InterfaceRate::<BlowersMasel>::from_node(node)?),
        "sticking-Arrhenius" => Box::new(StickingRate::<Arrhenius>::from_node(node)?),
        "sticking-Blowers-Masel" => Box::new(StickingRate::<BlowersMasel>::from_node(node)?),
        other => {
            return Err(RateError::UnknownRateType {
                name: other.to_string(),
            })
        }
    };
    Ok(rate)
}
