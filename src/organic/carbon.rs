use std::fmt::{Display, Formatter, Result as FmtResult};

use super::{OrganicError, Substituent};
use crate::Group;

/// A bonding site of a chain: a free bond counter and the substituents
/// bonded to it, kept sorted so that two carbons with the same bonds compare
/// equal regardless of the order they were bonded in.
///
/// On a chain carbon the free bonds left after the chain link are the extra
/// order of the bond to the next carbon: one free bond is a double bond.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Carbon {
    free_bond_count: u8,
    substituents: Vec<Substituent>,
}

impl Carbon {
    /// A bare carbon with `used_bond_count` bonds already taken by its
    /// neighbors.
    pub fn new(used_bond_count: u8) -> Self {
        Self {
            free_bond_count: 4u8.saturating_sub(used_bond_count),
            substituents: Vec::new(),
        }
    }

    /// `CH3-`
    pub(crate) fn ch3() -> Self {
        Self {
            free_bond_count: 0,
            substituents: vec![Substituent::hydrogen(); 3],
        }
    }

    /// `-CH2-`
    pub(crate) fn ch2() -> Self {
        Self {
            free_bond_count: 0,
            substituents: vec![Substituent::hydrogen(); 2],
        }
    }

    /// `-CH(CH3)-`
    pub(crate) fn chch3() -> Self {
        Self {
            free_bond_count: 0,
            substituents: vec![Substituent::methyl(), Substituent::hydrogen()],
        }
    }

    pub fn free_bond_count(&self) -> u8 {
        self.free_bond_count
    }

    pub(crate) fn set_free_bond_count(&mut self, free_bond_count: u8) {
        self.free_bond_count = free_bond_count;
    }

    pub fn substituents(&self) -> &[Substituent] {
        &self.substituents
    }

    /// Sum of the bond counts of every bonded substituent.
    pub fn substituent_bond_count(&self) -> u8 {
        self.substituents.iter().map(Substituent::bond_count).sum()
    }

    /// Double and triple bonds are read from the free bond count.
    pub fn is_bonded_to(&self, group: Group) -> bool {
        match group {
            Group::Alkene => self.free_bond_count == 1,
            Group::Alkyne => self.free_bond_count == 2,
            _ => self.substituents.iter().any(|s| s.group() == group),
        }
    }

    pub fn amount_of_group(&self, group: Group) -> usize {
        if group.is_bond() {
            return self.is_bonded_to(group) as usize;
        }

        self.substituents
            .iter()
            .filter(|s| s.group() == group)
            .count()
    }

    pub fn amount_of(&self, substituent: &Substituent) -> usize {
        self.substituents
            .iter()
            .filter(|s| *s == substituent)
            .count()
    }

    /// The longest radical bonded to this carbon, if any.
    pub fn greatest_radical(&self) -> Option<Substituent> {
        self.substituents
            .iter()
            .filter(|s| s.is_radical())
            .max()
            .copied()
    }

    pub fn bond(&mut self, substituent: Substituent) -> Result<(), OrganicError> {
        if substituent.bond_count() > self.free_bond_count {
            return Err(OrganicError::CannotBond {
                substituent: substituent.to_string(),
                carbon: self.to_string(),
            });
        }

        self.insert(substituent);
        self.free_bond_count -= substituent.bond_count();
        Ok(())
    }

    pub fn unbond(&mut self, substituent: &Substituent) -> Result<(), OrganicError> {
        self.remove(substituent)?;
        self.free_bond_count += substituent.bond_count();
        Ok(())
    }

    /// Takes a substituent out without giving its bonds back, for when the
    /// chain itself takes over that bond.
    pub(crate) fn remove(&mut self, substituent: &Substituent) -> Result<(), OrganicError> {
        match self.substituents.iter().position(|s| s == substituent) {
            Some(index) => {
                self.substituents.remove(index);
                Ok(())
            }
            None => Err(OrganicError::NotBonded {
                substituent: substituent.to_string(),
                carbon: self.to_string(),
            }),
        }
    }

    pub fn use_bond(&mut self) -> Result<(), OrganicError> {
        if self.free_bond_count == 0 {
            return Err(OrganicError::NoFreeBond);
        }

        self.free_bond_count -= 1;
        Ok(())
    }

    pub(crate) fn free_bond(&mut self) {
        self.free_bond_count += 1;
    }

    fn insert(&mut self, substituent: Substituent) {
        let index = self.substituents.partition_point(|s| *s <= substituent);
        self.substituents.insert(index, substituent);
    }

    fn others(&self) -> Vec<Substituent> {
        let mut others: Vec<Substituent> = self
            .substituents
            .iter()
            .filter(|s| !matches!(s.group(), Group::Hydrogen | Group::Ether))
            .copied()
            .collect();
        others.dedup();
        others
    }

    fn single_structure(&self, substituent: &Substituent) -> String {
        let group = substituent.group();
        let bare = group.is_halogen()
            || (substituent.bond_count() == 3 && group != Group::Aldehyde)
            || (group == Group::Aldehyde && !self.is_bonded_to(Group::Hydrogen));

        let text = if bare {
            substituent.to_string()
        } else {
            format!("({substituent})")
        };

        text + &count_suffix(self.amount_of(substituent))
    }
}

/// Atom counts are written after the atom unless there is only one.
fn count_suffix(count: usize) -> String {
    if count > 1 {
        count.to_string()
    } else {
        String::new()
    }
}

impl Display for Carbon {
    /// `CHCl2-O-` is `C` + `H` + `Cl2` + `-O-`.
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "C")?;

        let hydrogens = self.amount_of_group(Group::Hydrogen);
        if hydrogens > 0 {
            write!(f, "{}{}", Substituent::hydrogen(), count_suffix(hydrogens))?;
        }

        match self.others().as_slice() {
            [] => {}
            [single] => write!(f, "{}", self.single_structure(single))?,
            others => {
                for other in others {
                    write!(f, "({other}){}", count_suffix(self.amount_of(other)))?;
                }
            }
        }

        if self.is_bonded_to(Group::Ether) {
            write!(f, "-O-")?;
        }

        Ok(())
    }
}
