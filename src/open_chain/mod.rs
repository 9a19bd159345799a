mod simple;
pub use simple::*;

mod ether;
pub use ether::*;

use std::fmt::{Display, Formatter, Result as FmtResult};
use tracing::debug;

use crate::{Group, OrganicError, Step, Substituent};

/// A compound that is a single open chain, or two of them joined by an
/// oxygen. Built bond by bond from the left.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OpenChain {
    Simple(Simple),
    Ether(Ether),
}

impl Default for OpenChain {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenChain {
    /// A single carbon with nothing bonded to it.
    pub fn new() -> Self {
        OpenChain::Simple(Simple::new())
    }

    /// Replays a build sequence onto a fresh compound.
    pub fn build(steps: &[Step]) -> Result<Self, OrganicError> {
        let mut open_chain = Self::new();
        for step in steps {
            match step {
                Step::Bond(substituent) => open_chain.bond(*substituent)?,
                Step::BondCarbon => open_chain.bond_carbon()?,
            }
        }
        Ok(open_chain)
    }

    pub fn is_done(&self) -> bool {
        match self {
            OpenChain::Simple(simple) => simple.is_done(),
            OpenChain::Ether(ether) => ether.is_done(),
        }
    }

    pub fn bondable_groups(&self) -> Vec<Group> {
        match self {
            OpenChain::Simple(simple) => simple.bondable_groups(),
            OpenChain::Ether(ether) => ether.bondable_groups(),
        }
    }

    /// Bonding an ether to a simple chain turns it into an ether whose first
    /// chain is the one built so far.
    pub fn bond(&mut self, substituent: Substituent) -> Result<(), OrganicError> {
        match self {
            OpenChain::Simple(simple) if substituent.group() == Group::Ether => {
                let ether = simple.to_ether()?;
                debug!("Bonded an oxygen, {simple} is now an ether");
                *self = OpenChain::Ether(ether);
                Ok(())
            }
            OpenChain::Simple(simple) => simple.bond(substituent),
            OpenChain::Ether(ether) => ether.bond(substituent),
        }
    }

    pub fn bond_group(&mut self, group: Group) -> Result<(), OrganicError> {
        self.bond(Substituent::new(group)?)
    }

    pub fn can_bond_carbon(&self) -> bool {
        match self {
            OpenChain::Simple(simple) => simple.can_bond_carbon(),
            OpenChain::Ether(ether) => ether.can_bond_carbon(),
        }
    }

    pub fn bond_carbon(&mut self) -> Result<(), OrganicError> {
        match self {
            OpenChain::Simple(simple) => simple.bond_carbon(),
            OpenChain::Ether(ether) => ether.bond_carbon(),
        }
    }

    pub fn correct(&mut self) -> Result<(), OrganicError> {
        match self {
            OpenChain::Simple(simple) => simple.correct(),
            OpenChain::Ether(ether) => ether.correct(),
        }
    }

    pub fn name(&self) -> Result<String, OrganicError> {
        match self {
            OpenChain::Simple(simple) => simple.name(),
            OpenChain::Ether(ether) => ether.name(),
        }
    }

    /// The structural formula, like `CH3-CH2-OH`.
    pub fn structure(&self) -> String {
        self.to_string()
    }
}

impl Display for OpenChain {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            OpenChain::Simple(simple) => write!(f, "{simple}"),
            OpenChain::Ether(ether) => write!(f, "{ether}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ether_bond_converts_in_place() {
        let mut open_chain = OpenChain::new();
        for _ in 0..3 {
            open_chain.bond_group(Group::Hydrogen).unwrap();
        }
        assert!(matches!(open_chain, OpenChain::Simple(_)));

        open_chain.bond_group(Group::Ether).unwrap();
        assert!(matches!(open_chain, OpenChain::Ether(_)));
        assert!(!open_chain.bondable_groups().contains(&Group::Ether));

        open_chain.bond_group(Group::Hydrogen).unwrap();
        open_chain.bond_group(Group::Hydrogen).unwrap();
        open_chain.bond_carbon().unwrap();
        for _ in 0..3 {
            open_chain.bond_group(Group::Hydrogen).unwrap();
        }
        assert!(open_chain.is_done());

        open_chain.correct().unwrap();
        assert_eq!(open_chain.structure(), "CH3-O-CH2-CH3");
        assert_eq!(open_chain.name().unwrap(), "etil metil éter");
    }

    #[test]
    fn test_build_from_steps() {
        let hydrogen = Substituent::new(Group::Hydrogen).unwrap();
        let steps = vec![
            Step::Bond(hydrogen),
            Step::Bond(hydrogen),
            Step::Bond(hydrogen),
            Step::BondCarbon,
            Step::Bond(hydrogen),
            Step::Bond(hydrogen),
            Step::BondCarbon,
            Step::Bond(Substituent::new(Group::Acid).unwrap()),
        ];

        let open_chain = OpenChain::build(&steps).unwrap();
        assert_eq!(open_chain.structure(), "CH3-CH2-COOH");
        assert!(open_chain.is_done());
    }

    #[test]
    fn test_build_stops_at_invalid_bond() {
        let steps = vec![
            Step::Bond(Substituent::new(Group::Ketone).unwrap()),
            Step::Bond(Substituent::new(Group::Ketone).unwrap()),
            Step::Bond(Substituent::new(Group::Ketone).unwrap()),
        ];

        assert!(matches!(
            OpenChain::build(&steps),
            Err(OrganicError::CannotBond { .. })
        ));
        assert!(matches!(
            OpenChain::build(&[Step::BondCarbon; 5]),
            Err(OrganicError::CannotBondCarbon { .. })
        ));
    }
}
