use std::fmt::{Display, Formatter, Result as FmtResult};
use tracing::{debug, trace};

use super::{Carbon, OrganicError, Substituent};
use crate::Group;

/// Symbol for the link between two carbons, from the free bonds the left one
/// still had after the single bond was made.
pub fn bond_symbol(free_bond_count: u8) -> &'static str {
    match free_bond_count {
        0 => "-",
        1 => "=",
        _ => "≡",
    }
}

/// A non-empty sequence of carbons, bonded left to right.
///
/// The last carbon's free bond count is what the chain still needs to be
/// saturated.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chain {
    carbons: Vec<Carbon>,
}

impl Chain {
    /// A one-carbon chain with `used_bond_count` bonds taken from outside.
    pub fn new(used_bond_count: u8) -> Self {
        Self {
            carbons: vec![Carbon::new(used_bond_count)],
        }
    }

    pub fn len(&self) -> usize {
        self.carbons.len()
    }

    pub fn carbons(&self) -> &[Carbon] {
        &self.carbons
    }

    pub fn carbon(&self, index: usize) -> Option<&Carbon> {
        self.carbons.get(index)
    }

    pub(crate) fn carbon_mut(&mut self, index: usize) -> Option<&mut Carbon> {
        self.carbons.get_mut(index)
    }

    pub fn first_carbon(&self) -> &Carbon {
        &self.carbons[0]
    }

    pub fn last_carbon(&self) -> &Carbon {
        &self.carbons[self.carbons.len() - 1]
    }

    fn last_carbon_mut(&mut self) -> &mut Carbon {
        let last = self.carbons.len() - 1;
        &mut self.carbons[last]
    }

    pub fn free_bond_count(&self) -> u8 {
        self.last_carbon().free_bond_count()
    }

    pub fn is_done(&self) -> bool {
        self.free_bond_count() == 0
    }

    pub fn is_bonded_to(&self, group: Group) -> bool {
        self.carbons.iter().any(|carbon| carbon.is_bonded_to(group))
    }

    /// Every group present, highest priority first.
    pub fn groups(&self) -> Vec<Group> {
        Group::ALL
            .into_iter()
            .filter(|group| self.is_bonded_to(*group))
            .collect()
    }

    pub fn priority_group(&self) -> Option<Group> {
        Group::ALL
            .into_iter()
            .find(|group| self.is_bonded_to(*group))
    }

    pub fn amount_of(&self, group: Group) -> usize {
        self.carbons
            .iter()
            .map(|carbon| carbon.amount_of_group(group))
            .sum()
    }

    /// Every bonded substituent, carbon by carbon.
    pub fn substituents(&self) -> Vec<Substituent> {
        self.carbons
            .iter()
            .flat_map(|carbon| carbon.substituents().iter().copied())
            .collect()
    }

    /// 0-based positions of a group, repeated once per occurrence.
    pub fn indexes_of(&self, group: Group) -> Vec<usize> {
        Self::indexes_from(self.carbons.iter().map(|c| c.amount_of_group(group)))
    }

    pub fn indexes_of_substituent(&self, substituent: &Substituent) -> Vec<usize> {
        Self::indexes_from(self.carbons.iter().map(|c| c.amount_of(substituent)))
    }

    fn indexes_from(amounts: impl Iterator<Item = usize>) -> Vec<usize> {
        amounts
            .enumerate()
            .flat_map(|(index, amount)| std::iter::repeat(index).take(amount))
            .collect()
    }

    pub fn bond(&mut self, substituent: Substituent) -> Result<(), OrganicError> {
        self.last_carbon_mut().bond(substituent)
    }

    pub fn can_bond_carbon(&self) -> bool {
        (1..=3).contains(&self.free_bond_count())
    }

    /// Appends a carbon, taking one of the last carbon's free bonds for the
    /// link. Whatever that carbon has left is shared with the new one.
    pub fn bond_carbon(&mut self) -> Result<(), OrganicError> {
        if !self.can_bond_carbon() {
            return Err(OrganicError::CannotBondCarbon {
                chain: self.to_string(),
            });
        }

        let last = self.last_carbon_mut();
        last.use_bond()?;
        let used = last.free_bond_count() + 1;
        self.carbons.push(Carbon::new(used));
        Ok(())
    }

    pub(crate) fn remove_carbon(&mut self, index: usize) -> Option<Carbon> {
        if index < self.carbons.len() && self.carbons.len() > 1 {
            Some(self.carbons.remove(index))
        } else {
            None
        }
    }

    /// The same chain read right to left. Bond orders belong to the left
    /// carbon of each link, so they shift by one position.
    pub fn inverse(&self) -> Chain {
        let mut carbons: Vec<Carbon> = self.carbons.iter().rev().cloned().collect();
        let n = carbons.len();

        if n > 1 {
            for (i, carbon) in carbons.iter_mut().take(n - 1).enumerate() {
                carbon.set_free_bond_count(self.carbons[n - 2 - i].free_bond_count());
            }
            carbons[n - 1].set_free_bond_count(0);
        }

        Chain { carbons }
    }

    pub fn reverse(&mut self) {
        *self = self.inverse();
    }

    /// Checks every carbon has four bonds counting its chain links, with
    /// `used_bond_count` taken from outside by the first one.
    pub fn conserves_bonds(&self, used_bond_count: u8) -> bool {
        let last = self.carbons.len() - 1;
        let mut incoming = used_bond_count;

        for (i, carbon) in self.carbons.iter().enumerate() {
            let outgoing = if i < last {
                1 + carbon.free_bond_count()
            } else {
                carbon.free_bond_count()
            };

            if carbon.substituent_bond_count() + incoming + outgoing != 4 {
                return false;
            }

            incoming = 1 + carbon.free_bond_count();
        }

        true
    }

    /// `-CH2-CH2(CH3)` becomes `-CH2-CH2-CH3`.
    pub fn correct_to_the_right(&mut self) -> Result<(), OrganicError> {
        if self.is_bonded_to(Group::Radical) {
            self.reverse();
            self.correct_to_the_left()?;
            self.reverse();
        }

        Ok(())
    }

    /// `CH2(CH3)-CH2-` becomes `CH3-CH2-CH2-`.
    ///
    /// Radicals longer than what lies to the left of their carbon take the
    /// place of the left side, which becomes a radical in turn.
    pub fn correct_to_the_left(&mut self) -> Result<(), OrganicError> {
        let mut index = 0;

        while index < self.carbons.len() {
            trace!("Looking for longer radicals at carbon {index} of {self}");

            if self.absorb_radical_at(index)? {
                index = 0;
            } else if self.could_be_part_of_a_radical(index) {
                index += 1;
            } else {
                break;
            }
        }

        Ok(())
    }

    fn absorb_radical_at(&mut self, index: usize) -> Result<bool, OrganicError> {
        let Some(greatest) = self.carbons[index].greatest_radical() else {
            return Ok(false);
        };

        if index > 0 {
            let left = self.radical_to_the_left_of(index)?;
            if greatest <= left {
                return Ok(false);
            }

            let carbon = &mut self.carbons[index];
            carbon.unbond(&greatest)?;
            carbon.bond(left)?;
        } else {
            self.carbons[index].remove(&greatest)?;
        }

        let mut carbons = Self::carbons_in(&greatest);
        carbons.extend(self.carbons.drain(index..));
        self.carbons = carbons;

        debug!("Absorbed radical {greatest} into the main chain: {self}");
        Ok(true)
    }

    /// What the carbons to the left of `index` would look like as a radical.
    fn radical_to_the_left_of(&self, index: usize) -> Result<Substituent, OrganicError> {
        if index > 1 && self.carbons[1] == Carbon::chch3() {
            Substituent::radical(index + 1, true)
        } else {
            Substituent::radical(index, false)
        }
    }

    /// `CH3-CH(CH3)-CH2-` for a 5-carbon iso radical.
    fn carbons_in(radical: &Substituent) -> Vec<Carbon> {
        let mut carbons = vec![Carbon::ch3()];
        let mut counted = 1;

        if radical.is_iso() {
            carbons.push(Carbon::chch3());
            counted += 2;
        }

        let remaining = radical.carbon_count().saturating_sub(counted);
        carbons.extend(std::iter::repeat(Carbon::ch2()).take(remaining));
        carbons
    }

    fn could_be_part_of_a_radical(&self, index: usize) -> bool {
        let carbon = &self.carbons[index];

        match index {
            0 => *carbon == Carbon::ch3(),
            1 => *carbon == Carbon::ch2() || *carbon == Carbon::chch3(),
            _ => *carbon == Carbon::ch2(),
        }
    }
}

impl Display for Chain {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        let first = self.first_carbon();
        write!(f, "{first}")?;

        let mut previous_free = first.free_bond_count();
        for carbon in &self.carbons[1..] {
            write!(f, "{}{carbon}", bond_symbol(previous_free))?;
            previous_free = carbon.free_bond_count();
        }

        // An open end, unless it is a carbon nothing has bonded to yet.
        if (1..=3).contains(&previous_free) {
            write!(f, "{}", bond_symbol(previous_free - 1))?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hydrogen() -> Substituent {
        Substituent::new(Group::Hydrogen).unwrap()
    }

    fn bond_all(chain: &mut Chain, substituents: &[Substituent]) {
        for substituent in substituents {
            chain.bond(*substituent).unwrap();
        }
    }

    #[test]
    fn test_bond_carbon() {
        let mut chain = Chain::new(0);
        assert_eq!(chain.to_string(), "C");
        assert!(chain.can_bond_carbon());

        bond_all(&mut chain, &[hydrogen(); 3]);
        assert_eq!(chain.to_string(), "CH3-");
        chain.bond_carbon().unwrap();
        assert_eq!(chain.to_string(), "CH3-C≡");

        bond_all(&mut chain, &[hydrogen()]);
        assert_eq!(chain.to_string(), "CH3-CH=");
        chain.bond_carbon().unwrap();
        assert_eq!(chain.to_string(), "CH3-CH=C=");
        assert_eq!(chain.free_bond_count(), 2);

        bond_all(&mut chain, &[hydrogen(); 2]);
        assert!(chain.is_done());
        assert!(!chain.can_bond_carbon());
        assert!(matches!(
            chain.bond_carbon(),
            Err(OrganicError::CannotBondCarbon { .. })
        ));
        assert_eq!(chain.to_string(), "CH3-CH=CH2");
        assert!(chain.conserves_bonds(0));
    }

    #[test]
    fn test_groups_and_indexes() {
        let mut chain = Chain::new(0);
        let chlorine = Substituent::new(Group::Chlorine).unwrap();
        bond_all(&mut chain, &[chlorine, hydrogen(), hydrogen()]);
        chain.bond_carbon().unwrap();
        bond_all(&mut chain, &[chlorine]);
        chain.bond_carbon().unwrap();
        bond_all(&mut chain, &[hydrogen(), chlorine]);

        assert_eq!(chain.to_string(), "CH2Cl-CCl=CHCl");
        assert_eq!(chain.groups(), vec![Group::Alkene, Group::Chlorine, Group::Hydrogen]);
        assert_eq!(chain.priority_group(), Some(Group::Alkene));
        assert_eq!(chain.indexes_of(Group::Chlorine), vec![0, 1, 2]);
        assert_eq!(chain.indexes_of(Group::Alkene), vec![1]);
        assert_eq!(chain.indexes_of_substituent(&hydrogen()), vec![0, 0, 2]);
        assert_eq!(chain.amount_of(Group::Hydrogen), 3);
    }

    #[test]
    fn test_inverse_shifts_bond_orders() {
        let mut chain = Chain::new(0);
        bond_all(&mut chain, &[hydrogen(); 3]);
        chain.bond_carbon().unwrap();
        bond_all(&mut chain, &[hydrogen()]);
        chain.bond_carbon().unwrap();
        bond_all(&mut chain, &[hydrogen(); 2]);
        assert_eq!(chain.to_string(), "CH3-CH=CH2");

        let inverse = chain.inverse();
        assert_eq!(inverse.to_string(), "CH2=CH-CH3");
        assert!(inverse.conserves_bonds(0));
        assert_eq!(inverse.inverse(), chain);
    }

    #[test]
    fn test_absorbs_longer_radical_on_first_carbon() {
        // CH2(CH3)-CH3 is propane
        let mut chain = Chain::new(0);
        let methyl = Substituent::radical(1, false).unwrap();
        bond_all(&mut chain, &[methyl, hydrogen(), hydrogen()]);
        chain.bond_carbon().unwrap();
        bond_all(&mut chain, &[hydrogen(); 3]);
        assert_eq!(chain.to_string(), "CH2(CH3)-CH3");

        chain.correct_to_the_left().unwrap();
        assert_eq!(chain.to_string(), "CH3-CH2-CH3");
        assert!(chain.conserves_bonds(0));
    }

    #[test]
    fn test_absorbs_longer_radical_further_in() {
        // CH3-CH(CH2CH2CH3)-CH3 has a longer chain through the propyl
        let mut chain = Chain::new(0);
        bond_all(&mut chain, &[hydrogen(); 3]);
        chain.bond_carbon().unwrap();
        bond_all(&mut chain, &[Substituent::radical(3, false).unwrap(), hydrogen()]);
        chain.bond_carbon().unwrap();
        bond_all(&mut chain, &[hydrogen(); 3]);

        chain.correct_to_the_left().unwrap();
        assert_eq!(chain.to_string(), "CH3-CH2-CH2-CH(CH3)-CH3");
        assert_eq!(chain.len(), 5);
        assert!(chain.conserves_bonds(0));
    }

    #[test]
    fn test_keeps_radical_as_long_as_left_side() {
        // CH3-CH(CH3)-CH2-CH3: the methyl is no longer than the left side
        let mut chain = Chain::new(0);
        bond_all(&mut chain, &[hydrogen(); 3]);
        chain.bond_carbon().unwrap();
        bond_all(&mut chain, &[Substituent::radical(1, false).unwrap(), hydrogen()]);
        chain.bond_carbon().unwrap();
        bond_all(&mut chain, &[hydrogen(); 2]);
        chain.bond_carbon().unwrap();
        bond_all(&mut chain, &[hydrogen(); 3]);

        let before = chain.clone();
        chain.correct_to_the_left().unwrap();
        assert_eq!(chain, before);
    }

    #[test]
    fn test_left_side_becomes_iso_radical() {
        // CH3-CH(CH3)-CH(CH2CH2CH2CH3)-CH3
        let mut chain = Chain::new(0);
        bond_all(&mut chain, &[hydrogen(); 3]);
        chain.bond_carbon().unwrap();
        bond_all(&mut chain, &[Substituent::radical(1, false).unwrap(), hydrogen()]);
        chain.bond_carbon().unwrap();
        bond_all(&mut chain, &[Substituent::radical(4, false).unwrap(), hydrogen()]);
        chain.bond_carbon().unwrap();
        bond_all(&mut chain, &[hydrogen(); 3]);

        chain.correct_to_the_left().unwrap();
        assert_eq!(chain.to_string(), "CH3-CH2-CH2-CH2-CH(CH(CH3)2)-CH3");
        assert!(chain.conserves_bonds(0));
    }

    #[test]
    fn test_correct_to_the_right() {
        // CH3-CH2(CH3) written the other way round
        let mut chain = Chain::new(0);
        bond_all(&mut chain, &[hydrogen(); 3]);
        chain.bond_carbon().unwrap();
        bond_all(&mut chain, &[Substituent::radical(1, false).unwrap(), hydrogen(), hydrogen()]);

        chain.correct_to_the_right().unwrap();
        assert_eq!(chain.to_string(), "CH3-CH2-CH3");
        assert!(chain.conserves_bonds(0));
    }
}
