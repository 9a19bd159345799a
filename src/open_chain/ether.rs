use lazy_static::lazy_static;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::naming;
use crate::{bond_symbol, Chain, Group, OrganicError, Substituent};

lazy_static! {
    /// Ethers only carry functions of lower priority than the oxygen.
    static ref BONDABLE_GROUPS: BTreeSet<Group> = [
        Group::Ether,
        Group::Nitro,
        Group::Bromine,
        Group::Chlorine,
        Group::Fluorine,
        Group::Iodine,
        Group::Radical,
        Group::Hydrogen,
    ]
    .into_iter()
    .collect();
}

/// Which chain substituents are bonded to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cursor {
    First,
    Second,
}

/// Two chains joined by an oxygen: `R-O-R'`.
///
/// The oxygen is the ether substituent on the last carbon of `first`;
/// `second` starts with a carbon that has one bond taken by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ether {
    first: Chain,
    second: Chain,
    cursor: Cursor,
}

impl Ether {
    /// Bonds the oxygen to the open end of `first`.
    pub(crate) fn from_chain(mut first: Chain) -> Result<Self, OrganicError> {
        if first.is_bonded_to(Group::Ether) {
            return Err(OrganicError::NotBondable {
                group: Group::Ether,
                shape: "a chain that already has one",
            });
        }
        first.bond(Substituent::new(Group::Ether)?)?;

        let cursor = if first.is_done() {
            Cursor::Second
        } else {
            Cursor::First
        };

        Ok(Self {
            first,
            second: Chain::new(1),
            cursor,
        })
    }

    pub fn first(&self) -> &Chain {
        &self.first
    }

    pub fn second(&self) -> &Chain {
        &self.second
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    fn current(&self) -> &Chain {
        match self.cursor {
            Cursor::First => &self.first,
            Cursor::Second => &self.second,
        }
    }

    fn current_mut(&mut self) -> &mut Chain {
        match self.cursor {
            Cursor::First => &mut self.first,
            Cursor::Second => &mut self.second,
        }
    }

    pub fn is_done(&self) -> bool {
        self.current().is_done()
    }

    pub fn bondable_groups(&self) -> Vec<Group> {
        let mut groups = Vec::new();

        if self.current().free_bond_count() >= 1 {
            if !self.first.is_bonded_to(Group::Ether) {
                groups.push(Group::Ether);
            }
            groups.extend([
                Group::Nitro,
                Group::Bromine,
                Group::Chlorine,
                Group::Fluorine,
                Group::Iodine,
                Group::Radical,
                Group::Hydrogen,
            ]);
        }

        groups
    }

    pub fn bond(&mut self, substituent: Substituent) -> Result<(), OrganicError> {
        let group = substituent.group();
        if !BONDABLE_GROUPS.contains(&group)
            || (group == Group::Ether && self.first.is_bonded_to(Group::Ether))
        {
            return Err(OrganicError::NotBondable {
                group,
                shape: "an ether",
            });
        }

        self.current_mut().bond(substituent)?;

        if self.cursor == Cursor::First && self.first.is_done() {
            self.cursor = Cursor::Second;
        }

        Ok(())
    }

    pub fn can_bond_carbon(&self) -> bool {
        match self.cursor {
            Cursor::First => !self.first.is_bonded_to(Group::Ether) && self.first.can_bond_carbon(),
            Cursor::Second => self.second.can_bond_carbon(),
        }
    }

    pub fn bond_carbon(&mut self) -> Result<(), OrganicError> {
        if !self.can_bond_carbon() {
            return Err(OrganicError::CannotBondCarbon {
                chain: self.to_string(),
            });
        }

        self.current_mut().bond_carbon()
    }

    /// `CF(CH3)-O-` becomes `CH3-CF-O-`, and `-O-CHF(CH3)` becomes
    /// `-O-CHF-CH3`.
    pub fn correct(&mut self) -> Result<(), OrganicError> {
        if self.cursor == Cursor::First || !self.second.is_done() {
            return Err(OrganicError::Unfinished {
                structure: self.to_string(),
            });
        }

        self.first.correct_to_the_left()?;
        self.second.correct_to_the_right()
    }

    /// "etil metil éter", "dimetil éter", ...
    pub fn name(&self) -> Result<String, OrganicError> {
        // Both chains are numbered from the oxygen.
        let first = chain_name(&self.first.inverse())?;
        let second = chain_name(&self.second)?;

        let name = if first == second {
            let di = if naming::starts_with_digit(&first) { "di " } else { "di" };
            format!("{di}{first}")
        } else if first < second {
            format!("{first} {second}")
        } else {
            format!("{second} {first}")
        };

        Ok(format!("{name} {}", naming::ETHER_WORD))
    }
}

/// Radical style name of one side of the oxygen: "2-cloroetil", "propenil".
fn chain_name(chain: &Chain) -> Result<String, OrganicError> {
    let mut prefixes = Vec::new();
    for group in chain.groups() {
        if group.is_bond() || matches!(group, Group::Radical | Group::Hydrogen | Group::Ether) {
            continue;
        }
        if let Some(prefix) = naming::prefix_for(group, chain, is_redundant(group, chain))? {
            prefixes.push(prefix);
        }
    }
    prefixes.extend(naming::radical_locators(chain)?);
    let prefix = naming::join_prefixes(prefixes);

    let bonds = naming::bond_name(Group::Alkene, chain, is_redundant(Group::Alkene, chain))?
        + &naming::bond_name(Group::Alkyne, chain, is_redundant(Group::Alkyne, chain))?;

    let mut quantifier = naming::root(chain.len())?;
    if !bonds.is_empty() && !naming::starts_with_vowel(&bonds) {
        quantifier.push('a');
    }

    Ok(format!("{prefix}{quantifier}{bonds}il"))
}

fn is_redundant(group: Group, chain: &Chain) -> bool {
    match chain.len() {
        // propadienil
        3 => group == Group::Alkene && chain.amount_of(Group::Alkene) == 2,
        // a bond on an ethyl can only be in one place
        2 => group.is_bond(),
        1 => true,
        _ => false,
    }
}

impl Display for Ether {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self.cursor {
            // CH2=CH-O- while the first chain is still open
            Cursor::First => {
                let first = self.first.to_string();
                let free = self.first.free_bond_count();
                let open = if (1..=3).contains(&free) {
                    bond_symbol(free - 1)
                } else {
                    ""
                };
                write!(f, "{}", first.strip_suffix(open).unwrap_or(&first))
            }
            Cursor::Second => write!(f, "{}{}", self.first, self.second),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hydrogens(ether: &mut Ether, count: usize) {
        for _ in 0..count {
            ether.bond(Substituent::new(Group::Hydrogen).unwrap()).unwrap();
        }
    }

    fn methyl_chain() -> Chain {
        let mut chain = Chain::new(0);
        for _ in 0..3 {
            chain.bond(Substituent::new(Group::Hydrogen).unwrap()).unwrap();
        }
        chain
    }

    #[test]
    fn test_dimethyl_ether() {
        let mut ether = Ether::from_chain(methyl_chain()).unwrap();
        assert_eq!(ether.cursor(), Cursor::Second);
        assert_eq!(ether.to_string(), "CH3-O-C≡");

        hydrogens(&mut ether, 3);
        assert!(ether.is_done());
        ether.correct().unwrap();

        assert_eq!(ether.to_string(), "CH3-O-CH3");
        assert_eq!(ether.name().unwrap(), "dimetil éter");
    }

    #[test]
    fn test_ethyl_methyl_ether() {
        let mut ether = Ether::from_chain(methyl_chain()).unwrap();
        hydrogens(&mut ether, 2);
        ether.bond_carbon().unwrap();
        hydrogens(&mut ether, 3);
        ether.correct().unwrap();

        assert_eq!(ether.to_string(), "CH3-O-CH2-CH3");
        assert_eq!(ether.name().unwrap(), "etil metil éter");
    }

    #[test]
    fn test_open_first_chain() {
        // CH3-C(-O-) still needs two bonds after the oxygen
        let mut chain = methyl_chain();
        chain.bond_carbon().unwrap();

        let mut ether = Ether::from_chain(chain).unwrap();
        assert_eq!(ether.cursor(), Cursor::First);
        assert_eq!(ether.to_string(), "CH3-C-O-");
        assert!(!ether.can_bond_carbon());
        assert!(!ether.bondable_groups().contains(&Group::Ether));
        assert!(ether.correct().is_err());

        hydrogens(&mut ether, 1);
        assert_eq!(ether.to_string(), "CH3-CH-O-");
        assert_eq!(ether.cursor(), Cursor::First);

        hydrogens(&mut ether, 1);
        assert_eq!(ether.cursor(), Cursor::Second);
        assert_eq!(ether.to_string(), "CH3-CH2-O-C≡");
    }

    #[test]
    fn test_second_chain_radicals_are_absorbed() {
        // CH3-O-CH2(CH3) is really CH3-O-CH2-CH3
        let mut ether = Ether::from_chain(methyl_chain()).unwrap();
        hydrogens(&mut ether, 2);
        ether.bond(Substituent::radical(1, false).unwrap()).unwrap();
        ether.correct().unwrap();

        assert_eq!(ether.to_string(), "CH3-O-CH2-CH3");
        assert_eq!(ether.name().unwrap(), "etil metil éter");
    }

    #[test]
    fn test_chloroethyl_is_numbered_from_the_oxygen() {
        // CH2Cl-CH2-O-CH3
        let mut chain = Chain::new(0);
        chain.bond(Substituent::new(Group::Chlorine).unwrap()).unwrap();
        for _ in 0..2 {
            chain.bond(Substituent::new(Group::Hydrogen).unwrap()).unwrap();
        }
        chain.bond_carbon().unwrap();
        for _ in 0..2 {
            chain.bond(Substituent::new(Group::Hydrogen).unwrap()).unwrap();
        }

        let mut ether = Ether::from_chain(chain).unwrap();
        hydrogens(&mut ether, 3);
        ether.correct().unwrap();

        assert_eq!(ether.name().unwrap(), "2-cloroetil metil éter");
    }

    #[test]
    fn test_only_low_priority_groups() {
        let mut ether = Ether::from_chain(methyl_chain()).unwrap();
        let alcohol = Substituent::new(Group::Alcohol).unwrap();
        assert!(matches!(
            ether.bond(alcohol),
            Err(OrganicError::NotBondable { .. })
        ));
        assert!(ether
            .bond(Substituent::new(Group::Ether).unwrap())
            .is_err());
        assert_eq!(ether.bondable_groups().len(), 7);
    }
}
