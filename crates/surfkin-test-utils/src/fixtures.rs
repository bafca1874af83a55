//! Reusable mechanisms, reactions and rate records.
//!
//! - [`platinum_hydrogen`]: H2/O2/CO on platinum.
//! - [`lithium_electrode`]: a charge-transfer interface between an
//!   electrode and an electrolyte.

use surfkin_core::{Node, Reaction, Value};

use crate::MockKinetics;

/// Site density of the platinum surface [kmol/m^2].
pub const PT_SITE_DENSITY: f64 = 2.7063e-9;

/// Dissociative hydrogen adsorption.
pub const H2_ADSORPTION: &str = "H2 + 2 PT(S) => 2 H(S)";
/// Recombinative hydrogen desorption.
pub const H_DESORPTION: &str = "2 H(S) => H2 + 2 PT(S)";
/// Molecular CO adsorption.
pub const CO_ADSORPTION: &str = "CO + PT(S) => CO(S)";
/// Surface oxidation of CO.
pub const CO_OXIDATION: &str = "CO(S) + O(S) => CO2 + 2 PT(S)";
/// Lithium intercalation at the electrode surface.
pub const LI_DEPOSITION: &str = "Li+ + electron + (S) => Li(S)";

/// Gas-phase H2, O2, CO, CO2 over a platinum surface with
/// PT(S), H(S), O(S), CO(S).
pub fn platinum_hydrogen() -> MockKinetics {
    MockKinetics::builder()
        .gas_phase("gas")
        .species("H2", 2.016)
        .species("O2", 31.998)
        .species("CO", 28.010)
        .species("CO2", 44.009)
        .interface_phase("Pt_surf", PT_SITE_DENSITY)
        .species("PT(S)", 195.08)
        .species("H(S)", 1.008)
        .species("O(S)", 15.999)
        .species("CO(S)", 28.010)
        .build()
}

/// Electrode (electrons), electrolyte (Li+) and an interface with a free
/// site (S) and adsorbed Li(S).
pub fn lithium_electrode() -> MockKinetics {
    MockKinetics::builder()
        .bulk_phase("electrode")
        .species("electron", 5.4858e-4)
        .charge(-1.0)
        .bulk_phase("electrolyte")
        .species("Li+", 6.94)
        .charge(1.0)
        .standard_concentration(1.0)
        .interface_phase("anode_surf", 1.0e-8)
        .species("(S)", 1.0)
        .species("Li(S)", 6.94)
        .build()
}

/// Parse one of the equation constants above.
pub fn reaction(equation: &str) -> Reaction {
    match Reaction::from_equation(equation) {
        Ok(rxn) => rxn,
        Err(e) => panic!("fixture equation '{equation}' is malformed: {e}"),
    }
}

/// An `{A, b, Ea}` record with `Ea` in J/kmol.
pub fn arrhenius(a: f64, b: f64, ea: f64) -> Node {
    let mut node = Node::new();
    node.insert("A", a);
    node.insert("b", b);
    node.insert("Ea", ea);
    node
}

/// An `interface-Arrhenius` record.
pub fn interface_record(a: f64, b: f64, ea: f64) -> Node {
    let mut node = Node::new();
    node.insert("type", "interface-Arrhenius");
    node.insert("rate-constant", arrhenius(a, b, ea));
    node
}

/// A `sticking-Arrhenius` record.
pub fn sticking_record(a: f64, b: f64, ea: f64) -> Node {
    let mut node = Node::new();
    node.insert("type", "sticking-Arrhenius");
    node.insert("sticking-coefficient", arrhenius(a, b, ea));
    node
}

/// Add a `coverage-dependencies` entry `species: [a, m, E]` to `node`,
/// with `E` in J/kmol.
pub fn with_coverage(mut node: Node, species: &str, a: f64, m: f64, e: f64) -> Node {
    let mut deps = match node.remove("coverage-dependencies") {
        Some(Value::Map(deps)) => deps,
        _ => Node::new(),
    };
    deps.insert(species, Value::List(vec![a.into(), m.into(), e.into()]));
    node.insert("coverage-dependencies", deps);
    node
}
