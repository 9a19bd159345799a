//! Reads and writes the atom/bond markup name parsers hand out:
//!
//! ```xml
//! <cml>
//!   <molecule>
//!     <atomArray>
//!       <atom id="a1" elementType="C"/>
//!       <atom id="a2" elementType="O"/>
//!     </atomArray>
//!     <bondArray>
//!       <bond id="a1_a2" atomRefs2="a1 a2" order="2"/>
//!     </bondArray>
//!   </molecule>
//! </cml>
//! ```

use nom::{
    character::complete::{char, multispace1, u32 as parse_u32},
    combinator::all_consuming,
    sequence::{preceded, separated_pair},
    Finish,
};
use std::collections::BTreeMap;
use std::fmt::Write;
use thiserror::Error;
use tracing::trace;

use super::sequence::Res;
use crate::{Chain, Element, Group, MoleculeGraph, OpenChain, Substituent};

#[derive(Error, Debug)]
pub enum CmlError {
    #[error("Malformed CML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("Unknown element {0:?}")]
    UnknownElement(String),
    #[error("Missing attribute {attribute:?} in a {tag} element")]
    MissingAttribute {
        tag: &'static str,
        attribute: &'static str,
    },
    #[error("Invalid atom or bond id {0:?}")]
    BadId(String),
    #[error("Bond to unknown atom a{0}")]
    UnknownAtom(u32),
}

/// `a12`
fn parse_atom_id(input: &str) -> Res<u32> {
    preceded(char('a'), parse_u32)(input)
}

/// `a1_a2`
fn parse_bond_id(input: &str) -> Res<(u32, u32)> {
    separated_pair(parse_atom_id, char('_'), parse_atom_id)(input)
}

/// `a1 a2`
fn parse_atom_refs(input: &str) -> Res<(u32, u32)> {
    separated_pair(parse_atom_id, multispace1, parse_atom_id)(input)
}

fn parse_whole<'a, T>(
    parser: impl FnMut(&'a str) -> Res<'a, T>,
    input: &'a str,
) -> Result<T, CmlError> {
    all_consuming(parser)(input)
        .finish()
        .map(|(_, parsed)| parsed)
        .map_err(|_| CmlError::BadId(input.to_string()))
}

/// Builds the atom graph described by a CML document. Bond orders are
/// ignored: the hydrogens say everything the naming needs.
pub fn parse_cml(cml: &str) -> Result<MoleculeGraph, CmlError> {
    let document = roxmltree::Document::parse(cml)?;
    let mut graph = MoleculeGraph::new_undirected();
    let mut atoms = BTreeMap::new();

    for node in document
        .descendants()
        .filter(|node| node.tag_name().name() == "atom")
    {
        let id = node.attribute("id").ok_or(CmlError::MissingAttribute {
            tag: "atom",
            attribute: "id",
        })?;
        let symbol = node
            .attribute("elementType")
            .ok_or(CmlError::MissingAttribute {
                tag: "atom",
                attribute: "elementType",
            })?;

        let element = Element::from_symbol(symbol)
            .ok_or_else(|| CmlError::UnknownElement(symbol.to_string()))?;
        let id = parse_whole(parse_atom_id, id)?;
        atoms.insert(id, graph.add_node(element));
    }

    for node in document
        .descendants()
        .filter(|node| node.tag_name().name() == "bond")
    {
        let (first, second) = match (node.attribute("id"), node.attribute("atomRefs2")) {
            (Some(id), _) => parse_whole(parse_bond_id, id)?,
            (None, Some(refs)) => parse_whole(parse_atom_refs, refs)?,
            (None, None) => {
                return Err(CmlError::MissingAttribute {
                    tag: "bond",
                    attribute: "id",
                })
            }
        };

        let first = *atoms.get(&first).ok_or(CmlError::UnknownAtom(first))?;
        let second = *atoms.get(&second).ok_or(CmlError::UnknownAtom(second))?;
        graph.update_edge(first, second, ());
    }

    trace!(
        "Parsed CML with {} atoms and {} bonds",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Accumulates atoms and bonds with 1-based ids.
#[derive(Default)]
struct CmlWriter {
    atoms: Vec<Element>,
    bonds: Vec<(usize, usize, u8)>,
}

impl CmlWriter {
    fn atom(&mut self, element: Element) -> usize {
        self.atoms.push(element);
        self.atoms.len()
    }

    fn bond(&mut self, first: usize, second: usize, order: u8) {
        self.bonds.push((first, second, order));
    }

    fn bonded(&mut self, to: usize, element: Element, order: u8) -> usize {
        let atom = self.atom(element);
        self.bond(to, atom, order);
        atom
    }

    fn hydrogens(&mut self, to: usize, count: usize) {
        for _ in 0..count {
            self.bonded(to, Element::H, 1);
        }
    }

    /// Expands a substituent into atoms. Returns the oxygen of an ether so
    /// the second chain can be bonded to it.
    fn substituent(&mut self, carbon: usize, substituent: &Substituent) -> Option<usize> {
        match substituent.group() {
            Group::Acid => {
                self.bonded(carbon, Element::O, 2);
                let oxygen = self.bonded(carbon, Element::O, 1);
                self.hydrogens(oxygen, 1);
            }
            Group::Amide => {
                self.bonded(carbon, Element::O, 2);
                let nitrogen = self.bonded(carbon, Element::N, 1);
                self.hydrogens(nitrogen, 2);
            }
            Group::Carbamoyl => {
                let inner = self.bonded(carbon, Element::C, 1);
                self.bonded(inner, Element::O, 2);
                let nitrogen = self.bonded(inner, Element::N, 1);
                self.hydrogens(nitrogen, 2);
            }
            Group::Nitrile => {
                self.bonded(carbon, Element::N, 3);
            }
            Group::Cyanide => {
                let inner = self.bonded(carbon, Element::C, 1);
                self.bonded(inner, Element::N, 3);
            }
            Group::Aldehyde => {
                self.bonded(carbon, Element::O, 2);
                self.hydrogens(carbon, 1);
            }
            Group::Ketone => {
                self.bonded(carbon, Element::O, 2);
            }
            Group::Alcohol => {
                let oxygen = self.bonded(carbon, Element::O, 1);
                self.hydrogens(oxygen, 1);
            }
            Group::Amine => {
                let nitrogen = self.bonded(carbon, Element::N, 1);
                self.hydrogens(nitrogen, 2);
            }
            Group::Ether => return Some(self.bonded(carbon, Element::O, 1)),
            Group::Nitro => {
                let nitrogen = self.bonded(carbon, Element::N, 1);
                self.bonded(nitrogen, Element::O, 2);
                self.bonded(nitrogen, Element::O, 1);
            }
            Group::Bromine => {
                self.bonded(carbon, Element::Br, 1);
            }
            Group::Chlorine => {
                self.bonded(carbon, Element::Cl, 1);
            }
            Group::Fluorine => {
                self.bonded(carbon, Element::F, 1);
            }
            Group::Iodine => {
                self.bonded(carbon, Element::I, 1);
            }
            Group::Hydrogen => self.hydrogens(carbon, 1),
            Group::Radical => self.radical(carbon, substituent),
            Group::Alkene | Group::Alkyne => {}
        }
        None
    }

    /// -CH2-...-CH3 or -CH2-...-CH(CH3)2
    fn radical(&mut self, carbon: usize, radical: &Substituent) {
        let methylenes = if radical.is_iso() {
            radical.carbon_count().saturating_sub(3)
        } else {
            radical.carbon_count().saturating_sub(1)
        };

        let mut previous = carbon;
        for _ in 0..methylenes {
            previous = self.bonded(previous, Element::C, 1);
            self.hydrogens(previous, 2);
        }

        let last = self.bonded(previous, Element::C, 1);
        if radical.is_iso() {
            self.hydrogens(last, 1);
            for _ in 0..2 {
                let methyl = self.bonded(last, Element::C, 1);
                self.hydrogens(methyl, 3);
            }
        } else {
            self.hydrogens(last, 3);
        }
    }

    /// Writes every carbon of a chain, bonding the first one to `start`.
    /// Returns the ether oxygen if the chain carries one.
    fn chain(&mut self, chain: &Chain, start: Option<usize>) -> Option<usize> {
        let mut oxygen = None;
        let mut previous: Option<(usize, u8)> = None;

        for carbon in chain.carbons() {
            let atom = self.atom(Element::C);
            match previous {
                Some((previous, free_bond_count)) => self.bond(previous, atom, free_bond_count + 1),
                None => {
                    if let Some(start) = start {
                        self.bond(start, atom, 1);
                    }
                }
            }

            for substituent in carbon.substituents() {
                oxygen = self.substituent(atom, substituent).or(oxygen);
            }
            previous = Some((atom, carbon.free_bond_count()));
        }

        oxygen
    }

    fn finish(self) -> String {
        let mut cml = String::from("<cml xmlns=\"http://www.xml-cml.org/schema\">\n");
        cml.push_str("  <molecule id=\"m1\">\n    <atomArray>\n");
        for (index, element) in self.atoms.iter().enumerate() {
            let _ = writeln!(
                cml,
                "      <atom id=\"a{}\" elementType=\"{}\"/>",
                index + 1,
                element.symbol()
            );
        }
        cml.push_str("    </atomArray>\n    <bondArray>\n");
        for (first, second, order) in &self.bonds {
            let _ = writeln!(
                cml,
                "      <bond id=\"a{first}_a{second}\" atomRefs2=\"a{first} a{second}\" order=\"{order}\"/>"
            );
        }
        cml.push_str("    </bondArray>\n  </molecule>\n</cml>\n");
        cml
    }
}

/// Serializes a compound with every substituent expanded into explicit
/// atoms, hydrogens included.
pub fn write_cml(open_chain: &OpenChain) -> String {
    let mut writer = CmlWriter::default();

    match open_chain {
        OpenChain::Simple(simple) => {
            writer.chain(simple.chain(), None);
        }
        OpenChain::Ether(ether) => {
            let oxygen = writer.chain(ether.first(), None);
            writer.chain(ether.second(), oxygen);
        }
    }

    trace!("Wrote {open_chain} as {} atoms", writer.atoms.len());
    writer.finish()
}
