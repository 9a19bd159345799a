//! Finds an open chain compound in an atom graph.
//!
//! Every carbon with at most one carbon neighbor may start the main chain.
//! From there, each bonded atom must be a known substituent shape or a
//! saturated alkyl radical, except for at most one: the next atom of the
//! main chain. Simple chains are tried before ethers.

use petgraph::algo::{connected_components, is_cyclic_undirected};
use petgraph::graph::NodeIndex;
use tracing::{debug, info, warn};

use crate::{parse_cml, Element, Group, MoleculeGraph, OpenChain, OrganicError, Substituent};

/// Which open chain the atoms are matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Simple,
    Ether,
}

impl Shape {
    /// Ethers only hold groups of lower priority than the oxygen.
    fn accepts(self, group: Group) -> bool {
        match self {
            Shape::Simple => true,
            Shape::Ether => group == Group::Nitro || group == Group::Hydrogen || group.is_halogen(),
        }
    }
}

/// Bonded atoms, minus the one we arrived from.
fn children(
    graph: &MoleculeGraph,
    atom: NodeIndex,
    parent: Option<NodeIndex>,
) -> impl Iterator<Item = NodeIndex> + '_ {
    graph
        .neighbors(atom)
        .filter(move |&neighbor| Some(neighbor) != parent)
}

fn amount_of(graph: &MoleculeGraph, atom: NodeIndex, element: Element) -> usize {
    graph
        .neighbors(atom)
        .filter(|&neighbor| graph[neighbor] == element)
        .count()
}

/// The group an atom and everything beyond it form, if they are one of
/// H, N, O, OH, NH2, NO2 or a halogen.
fn bondable_group(graph: &MoleculeGraph, atom: NodeIndex, parent: NodeIndex) -> Option<Group> {
    let mut leaves = Vec::new();
    for child in children(graph, atom, Some(parent)) {
        if children(graph, child, Some(atom)).next().is_some() {
            return None;
        }
        leaves.push(graph[child]);
    }

    match (graph[atom], leaves.as_slice()) {
        (Element::H, []) => Some(Group::Hydrogen),
        (Element::N, []) => Some(Group::Nitrile),
        (Element::O, []) => Some(Group::Ketone),
        (Element::O, [Element::H]) => Some(Group::Alcohol),
        (Element::N, [Element::H, Element::H]) => Some(Group::Amine),
        (Element::N, [Element::O, Element::O]) => Some(Group::Nitro),
        (Element::Br, []) => Some(Group::Bromine),
        (Element::Cl, []) => Some(Group::Chlorine),
        (Element::F, []) => Some(Group::Fluorine),
        (Element::I, []) => Some(Group::Iodine),
        _ => None,
    }
}

/// -CH3, -CH2- followed by a radical carbon, or -CH(CH3)2.
fn is_radical_carbon(graph: &MoleculeGraph, atom: NodeIndex, parent: NodeIndex) -> bool {
    if graph[atom] != Element::C || children(graph, atom, Some(parent)).count() != 3 {
        return false;
    }

    match amount_of(graph, atom, Element::H) {
        3 => true,
        2 => {
            let carbons: Vec<NodeIndex> = children(graph, atom, Some(parent))
                .filter(|&child| graph[child] == Element::C)
                .collect();
            matches!(carbons.as_slice(), [carbon] if is_radical_carbon(graph, *carbon, atom))
        }
        1 => {
            children(graph, atom, Some(parent))
                .filter(|&child| {
                    graph[child] == Element::C
                        && amount_of(graph, child, Element::H) == 3
                        && children(graph, child, Some(atom)).count() == 3
                })
                .count()
                == 2
        }
        _ => false,
    }
}

fn build_radical(
    graph: &MoleculeGraph,
    atom: NodeIndex,
    parent: NodeIndex,
) -> Result<Substituent, OrganicError> {
    match amount_of(graph, atom, Element::H) {
        3 => Substituent::radical(1, false),
        1 => Substituent::radical(3, true),
        _ => {
            let next = children(graph, atom, Some(parent)).find(|&child| graph[child] == Element::C);
            match next {
                Some(next) => {
                    let end = build_radical(graph, next, atom)?;
                    Substituent::radical(end.carbon_count() + 1, end.is_iso())
                }
                None => Err(OrganicError::RadicalTooShort {
                    carbon_count: 0,
                    iso: false,
                }),
            }
        }
    }
}

fn is_substituent(graph: &MoleculeGraph, atom: NodeIndex, parent: NodeIndex, shape: Shape) -> bool {
    bondable_group(graph, atom, parent).map_or(false, |group| shape.accepts(group))
        || is_radical_carbon(graph, atom, parent)
}

/// Whether the chain starting at `atom` fits the shape all the way to its
/// end. An ether may cross one oxygen.
fn matches_shape(
    graph: &MoleculeGraph,
    atom: NodeIndex,
    parent: Option<NodeIndex>,
    shape: Shape,
    crossed_oxygen: bool,
) -> bool {
    let others: Vec<NodeIndex> = children(graph, atom, parent)
        .filter(|&child| !is_substituent(graph, child, atom, shape))
        .collect();

    match others.as_slice() {
        [] => true,
        [next] => match graph[*next] {
            Element::C => matches_shape(graph, *next, Some(atom), shape, crossed_oxygen),
            Element::O if shape == Shape::Ether && !crossed_oxygen => {
                matches_shape(graph, *next, Some(atom), shape, true)
            }
            _ => false,
        },
        _ => false,
    }
}

/// Replays the atoms from `atom` onwards as bonds on `open_chain`.
fn build_from(
    graph: &MoleculeGraph,
    atom: NodeIndex,
    parent: Option<NodeIndex>,
    shape: Shape,
    open_chain: &mut OpenChain,
) -> Result<(), OrganicError> {
    let mut next = None;

    for child in children(graph, atom, parent) {
        match bondable_group(graph, child, atom).filter(|&group| shape.accepts(group)) {
            Some(group) => open_chain.bond_group(group)?,
            None if is_radical_carbon(graph, child, atom) => {
                open_chain.bond(build_radical(graph, child, atom)?)?
            }
            None => next = Some(child),
        }
    }

    match next {
        Some(oxygen) if graph[oxygen] == Element::O => {
            open_chain.bond_group(Group::Ether)?;
            match children(graph, oxygen, Some(atom)).next() {
                Some(carbon) => build_from(graph, carbon, Some(oxygen), shape, open_chain),
                None => Ok(()),
            }
        }
        Some(carbon) => {
            open_chain.bond_carbon()?;
            build_from(graph, carbon, Some(atom), shape, open_chain)
        }
        None => Ok(()),
    }
}

fn build(graph: &MoleculeGraph, start: NodeIndex, shape: Shape) -> Option<OpenChain> {
    let mut open_chain = OpenChain::new();
    let built = build_from(graph, start, None, shape, &mut open_chain)
        .and_then(|()| open_chain.correct());

    match built {
        Ok(()) => {
            debug!("Built {open_chain} from a {shape:?} shape");
            Some(open_chain)
        }
        Err(e) => {
            warn!("Matched a {shape:?} shape but couldn't build it: {e}");
            None
        }
    }
}

/// Carbons bonded to at most one other carbon.
fn chain_ends(graph: &MoleculeGraph) -> Vec<NodeIndex> {
    graph
        .node_indices()
        .filter(|&atom| graph[atom] == Element::C && amount_of(graph, atom, Element::C) < 2)
        .collect()
}

fn recognize_simple(graph: &MoleculeGraph) -> Option<OpenChain> {
    info!("Matching simple shape");
    let start = chain_ends(graph)
        .into_iter()
        .find(|&end| matches_shape(graph, end, None, Shape::Simple, false))?;
    build(graph, start, Shape::Simple)
}

fn recognize_ether(graph: &MoleculeGraph) -> Option<OpenChain> {
    info!("Matching ether shape");
    let mut ends = chain_ends(graph);

    // C-O-C has two ends bonded to the oxygen; past that, start away from it
    if ends.len() > 2 {
        ends.retain(|&end| amount_of(graph, end, Element::O) == 0);
    }

    let start = ends
        .into_iter()
        .find(|&end| matches_shape(graph, end, None, Shape::Ether, false))?;
    build(graph, start, Shape::Ether)
}

/// The corrected open chain an atom graph describes, or `None` if it's
/// cyclic, disconnected or not a shape we can name.
pub fn recognize(graph: &MoleculeGraph) -> Option<OpenChain> {
    if graph.node_count() == 0 || connected_components(graph) != 1 {
        warn!("Atom graph is not a single molecule");
        return None;
    }
    if is_cyclic_undirected(graph) {
        warn!("Atom graph is cyclic");
        return None;
    }

    let open_chain = recognize_simple(graph).or_else(|| recognize_ether(graph));
    match &open_chain {
        Some(open_chain) => info!("Recognized {open_chain}"),
        None => warn!("No open chain shape matches the atom graph"),
    }
    open_chain
}

/// Parses a CML document and recognizes it. Unknown atoms and malformed
/// markup count as unrecognized.
pub fn recognize_cml(cml: &str) -> Option<OpenChain> {
    match parse_cml(cml) {
        Ok(graph) => recognize(&graph),
        Err(e) => {
            warn!("Couldn't read CML: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_sequence, write_cml};

    fn graph_of(sequence: &str) -> MoleculeGraph {
        let open_chain = OpenChain::build(&parse_sequence(sequence).unwrap()).unwrap();
        parse_cml(&write_cml(&open_chain)).unwrap()
    }

    // Sequences are written in awkward orientations on purpose: recognition
    // must land on the corrected structure.
    #[test]
    fn test_recognize_simple_chains() {
        let expected = vec![
            ("hydrogen*4", "CH4", "metano"),
            ("hydrogen*3 carbon hydrogen*2 carbon acid", "COOH-CH2-CH3", "ácido propanoico"),
            ("hydrogen*3 radical(2)", "CH3-CH2-CH3", "propano"),
            ("hydrogen*2 alcohol carbon hydrogen*3", "CH2(OH)-CH3", "etanol"),
            ("hydrogen*3 carbon hydrogen carbon hydrogen*2", "CH2=CH-CH3", "prop-1-eno"),
            ("hydrogen*3 carbon hydrogen chlorine carbon hydrogen*3", "CH3-CHCl-CH3", "2-cloropropano"),
            ("hydrogen*3 carbon aldehyde", "CHO-CH3", "etanal"),
            ("hydrogen*3 carbon nitrile", "CN-CH3", "etanonitrilo"),
            ("hydrogen*3 carbon hydrogen iso(3) carbon hydrogen*3", "CH3-CH(CH3)-CH(CH3)-CH3", "2,3-dimetilbutano"),
        ];

        for (sequence, structure, name) in expected {
            let open_chain = recognize(&graph_of(sequence)).unwrap();
            assert_eq!(open_chain.structure(), structure, "for {sequence}");
            assert_eq!(open_chain.name().unwrap(), name, "for {sequence}");
        }
    }

    #[test]
    fn test_recognize_ethers() {
        let expected = vec![
            ("hydrogen*3 ether hydrogen*3", "CH3-O-CH3", "dimetil éter"),
            // the main chain starts away from the oxygen
            ("hydrogen*3 ether hydrogen*2 carbon hydrogen*3", "CH3-CH2-O-CH3", "etil metil éter"),
            ("hydrogen*3 ether hydrogen*2 radical(1)", "CH3-CH2-O-CH3", "etil metil éter"),
            (
                "hydrogen*3 ether hydrogen*2 carbon hydrogen*2 chlorine",
                "CH2Cl-CH2-O-CH3",
                "2-cloroetil metil éter",
            ),
        ];

        for (sequence, structure, name) in expected {
            let open_chain = recognize(&graph_of(sequence)).unwrap();
            assert!(matches!(open_chain, OpenChain::Ether(_)), "for {sequence}");
            assert_eq!(open_chain.structure(), structure, "for {sequence}");
            assert_eq!(open_chain.name().unwrap(), name, "for {sequence}");
        }
    }

    #[test]
    fn test_cycles_are_rejected() {
        // cyclopropane
        let mut graph = MoleculeGraph::new_undirected();
        let carbons: Vec<NodeIndex> = (0..3).map(|_| graph.add_node(Element::C)).collect();
        for i in 0..3 {
            graph.add_edge(carbons[i], carbons[(i + 1) % 3], ());
            for _ in 0..2 {
                let hydrogen = graph.add_node(Element::H);
                graph.add_edge(carbons[i], hydrogen, ());
            }
        }

        assert!(recognize(&graph).is_none());
    }

    #[test]
    fn test_unsupported_shapes() {
        // CH3-NH-CH3 has a nitrogen in the main chain
        let mut graph = MoleculeGraph::new_undirected();
        let nitrogen = graph.add_node(Element::N);
        let hydrogen = graph.add_node(Element::H);
        graph.add_edge(nitrogen, hydrogen, ());
        for _ in 0..2 {
            let carbon = graph.add_node(Element::C);
            graph.add_edge(nitrogen, carbon, ());
            for _ in 0..3 {
                let hydrogen = graph.add_node(Element::H);
                graph.add_edge(carbon, hydrogen, ());
            }
        }
        assert!(recognize(&graph).is_none());

        // two molecules of methane
        let mut graph = graph_of("hydrogen*4");
        let carbon = graph.add_node(Element::C);
        for _ in 0..4 {
            let hydrogen = graph.add_node(Element::H);
            graph.add_edge(carbon, hydrogen, ());
        }
        assert!(recognize(&graph).is_none());
    }

    #[test]
    fn test_unknown_elements_are_not_recognized() {
        let cml = r#"<cml><atom id="a1" elementType="Na"/><atom id="a2" elementType="Cl"/>
            <bond id="a1_a2"/></cml>"#;
        assert!(recognize_cml(cml).is_none());
        assert!(recognize_cml("not xml").is_none());
    }
}
