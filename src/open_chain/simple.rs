use lazy_static::lazy_static;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter, Result as FmtResult};
use tracing::debug;

use super::Ether;
use crate::naming::{self, Locator, Role};
use crate::{Chain, Group, OrganicError, Substituent};

lazy_static! {
    /// Groups a single chain accepts as bonded substituents. The demoted
    /// amide and nitrile forms are accepted so corrected chains can be
    /// rebuilt bond by bond.
    static ref BONDABLE_GROUPS: BTreeSet<Group> = [
        Group::Acid,
        Group::Amide,
        Group::Carbamoyl,
        Group::Nitrile,
        Group::Cyanide,
        Group::Aldehyde,
        Group::Ketone,
        Group::Alcohol,
        Group::Amine,
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

/// A compound made of a single open chain with substituents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Simple {
    chain: Chain,
}

impl Default for Simple {
    fn default() -> Self {
        Self::new()
    }
}

impl Simple {
    pub fn new() -> Self {
        Self {
            chain: Chain::new(0),
        }
    }

    pub fn chain(&self) -> &Chain {
        &self.chain
    }

    pub fn is_done(&self) -> bool {
        self.chain.is_done()
    }

    /// What could be bonded next, highest priority first.
    pub fn bondable_groups(&self) -> Vec<Group> {
        let free = self.chain.free_bond_count();
        let mut groups = Vec::new();

        if free >= 3 {
            groups.extend([Group::Acid, Group::Amide, Group::Nitrile, Group::Aldehyde]);
        }
        if free >= 2 {
            groups.push(Group::Ketone);
        }
        if free >= 1 {
            groups.extend([Group::Alcohol, Group::Amine]);
            if self.would_be_priority(Group::Ether) {
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

    /// Bonds anything but an ether, which turns the compound into an
    /// [`Ether`] (see [`Simple::to_ether`]).
    pub fn bond(&mut self, substituent: Substituent) -> Result<(), OrganicError> {
        if !BONDABLE_GROUPS.contains(&substituent.group()) {
            return Err(OrganicError::NotBondable {
                group: substituent.group(),
                shape: "a simple chain",
            });
        }

        self.chain.bond(substituent)
    }

    /// The ether whose first chain is this one, with the oxygen bonded to
    /// its last carbon.
    pub fn to_ether(&self) -> Result<Ether, OrganicError> {
        if !self.would_be_priority(Group::Ether) {
            return Err(OrganicError::NotBondable {
                group: Group::Ether,
                shape: "a chain with a higher priority function",
            });
        }

        Ether::from_chain(self.chain.clone())
    }

    pub fn can_bond_carbon(&self) -> bool {
        self.chain.can_bond_carbon()
    }

    pub fn bond_carbon(&mut self) -> Result<(), OrganicError> {
        self.chain.bond_carbon()
    }

    /// Rewrites a finished compound into its canonical form:
    /// `C(O)(OH)` becomes `COOH`, `CH2(CH3)-CH2-` becomes `CH3-CH2-CH2-`,
    /// and butan-3-ol becomes butan-2-ol.
    pub fn correct(&mut self) -> Result<(), OrganicError> {
        if !self.is_done() {
            return Err(OrganicError::Unfinished {
                structure: self.to_string(),
            });
        }

        self.correct_substituents()?;
        self.chain.correct_to_the_left()?;
        self.chain.correct_to_the_right()?;
        self.correct_orientation()
    }

    pub fn name(&self) -> Result<String, OrganicError> {
        let chain = &self.chain;

        if chain.len() == 1 && chain.amount_of(Group::Ketone) == 2 {
            return Ok(naming::CARBON_DIOXIDE.to_string());
        }

        let mut groups: Vec<Group> = chain
            .groups()
            .into_iter()
            .filter(|group| *group != Group::Hydrogen)
            .collect();

        let suffix = match groups.first() {
            Some(group) if naming::particle_for(*group, Role::Suffix).is_some() => {
                let group = groups.remove(0);
                self.suffix_for(group)?
            }
            _ => String::new(),
        };

        let mut prefixes = Vec::new();
        for group in groups {
            if group.is_bond() || group == Group::Radical {
                continue;
            }
            if let Some(prefix) = naming::prefix_for(group, chain, self.is_redundant(group))? {
                prefixes.push(prefix);
            }
        }
        prefixes.extend(naming::radical_locators(chain)?);

        let mut prefix = String::new();
        if chain.is_bonded_to(Group::Acid) {
            prefix.push_str(naming::ACID_WORD);
            prefix.push(' ');
        }
        prefix.push_str(&naming::join_prefixes(prefixes));

        let mut bonds = naming::bond_name(Group::Alkene, chain, self.is_redundant(Group::Alkene))?
            + &naming::bond_name(Group::Alkyne, chain, self.is_redundant(Group::Alkyne))?;
        if bonds.is_empty() {
            bonds.push_str("an");
        }
        if suffix.is_empty() || !naming::starts_with_vowel(&suffix) {
            bonds.push('o');
        }
        if naming::starts_with_digit(&suffix) {
            bonds.push('-');
        }

        let mut quantifier = naming::root(chain.len())?;
        if !naming::starts_with_vowel(&bonds) {
            quantifier.push('a');
        }

        Ok(format!("{prefix}{quantifier}{bonds}{suffix}"))
    }

    /// "oico", "1,2-diol", ...
    fn suffix_for(&self, group: Group) -> Result<String, OrganicError> {
        let particle = naming::particle_for(group, Role::Suffix).unwrap_or_default();
        let indexes = self.chain.indexes_of(group);

        let locator = if self.is_redundant(group) {
            Locator::without_positions(indexes.len(), particle)?
        } else {
            Locator::new(&indexes, particle)?
        };

        Ok(locator.to_string())
    }

    /// Whether the positions of a group go without saying.
    fn is_redundant(&self, group: Group) -> bool {
        // Terminal groups are on the first carbon, or on both ends.
        if !group.is_bond() && group.bond_count() == Some(3) {
            return true;
        }

        let chain = &self.chain;
        match chain.len() {
            // methanol
            1 => true,
            // ethanol, ethene, chloroethyne
            2 => {
                // instances, not kinds: CH2Cl-CH2Cl keeps its locants
                let non_hydrogen = chain.substituents().len() - chain.amount_of(Group::Hydrogen);
                group.is_bond() || chain.is_bonded_to(Group::Alkyne) || non_hydrogen == 1
            }
            // propadiene
            3 => group == Group::Alkene && chain.amount_of(Group::Alkene) == 2,
            _ => false,
        }
    }

    fn would_be_priority(&self, group: Group) -> bool {
        self.chain
            .priority_group()
            .map_or(true, |priority| priority >= group)
    }

    fn terminal_indexes(&self) -> Vec<usize> {
        let last = self.chain.len() - 1;
        if last == 0 {
            vec![0]
        } else {
            vec![0, last]
        }
    }

    fn correct_substituents(&mut self) -> Result<(), OrganicError> {
        // CHOOH → CH(O)(OH), CH(ONH2) → CH(O)(NH2), CHO → CH(O)
        self.break_down_terminal(Group::Acid, Group::Alcohol)?;
        self.break_down_terminal(Group::Amide, Group::Amine)?;
        self.break_down_terminal(Group::Aldehyde, Group::Hydrogen)?;

        // CH(O)(OH) → CHOOH, CH(O)(NH2) → CH(ONH2)
        self.group_terminal(Group::Alcohol, Group::Acid)?;
        self.group_terminal(Group::Amine, Group::Amide)?;

        // CH(O) → CHO only if it names the compound
        if self.would_be_priority(Group::Aldehyde) {
            self.group_terminal(Group::Hydrogen, Group::Aldehyde)?;
        }

        // CONH2-COOH → C(OOH)(CONH2), CN-COOH → C(OOH)(CN)
        self.move_out_terminal(Group::Amide, Group::Carbamoyl)?;
        self.move_out_terminal(Group::Nitrile, Group::Cyanide)
    }

    fn break_down_terminal(&mut self, terminal: Group, companion: Group) -> Result<(), OrganicError> {
        let terminal = Substituent::new(terminal)?;
        let ketone = Substituent::new(Group::Ketone)?;
        let companion = Substituent::new(companion)?;

        for index in self.terminal_indexes() {
            let Some(carbon) = self.chain.carbon_mut(index) else {
                continue;
            };
            if carbon.amount_of(&terminal) > 0 {
                carbon.unbond(&terminal)?;
                carbon.bond(ketone)?;
                carbon.bond(companion)?;
            }
        }

        Ok(())
    }

    fn group_terminal(&mut self, companion: Group, terminal: Group) -> Result<(), OrganicError> {
        let ketone = Substituent::new(Group::Ketone)?;
        let companion = Substituent::new(companion)?;
        let terminal = Substituent::new(terminal)?;

        for index in self.terminal_indexes() {
            let Some(carbon) = self.chain.carbon_mut(index) else {
                continue;
            };
            if carbon.amount_of(&ketone) > 0 && carbon.amount_of(&companion) > 0 {
                carbon.unbond(&ketone)?;
                carbon.unbond(&companion)?;
                carbon.bond(terminal)?;
                debug!("Grouped ketone and {} into {}", companion.group(), terminal.group());
            }
        }

        Ok(())
    }

    /// Turns a terminal carbon into a substituent of its neighbor when its
    /// group doesn't name the compound.
    fn move_out_terminal(&mut self, terminal: Group, substitute: Group) -> Result<(), OrganicError> {
        if self.would_be_priority(terminal) {
            return Ok(());
        }

        let terminal = Substituent::new(terminal)?;
        let substitute = Substituent::new(substitute)?;

        // The chain is shorter after each move, so the last index is
        // looked up every time.
        for first in [true, false] {
            let len = self.chain.len();
            if len < 2 {
                break;
            }

            let (ending, before) = if first { (0, 1) } else { (len - 1, len - 2) };
            let bonded = self
                .chain
                .carbon(ending)
                .map_or(false, |carbon| carbon.amount_of(&terminal) > 0);
            if !bonded {
                continue;
            }

            self.chain.remove_carbon(ending);
            let before = if first { before - 1 } else { before };
            if let Some(carbon) = self.chain.carbon_mut(before) {
                carbon.free_bond();
                carbon.bond(substitute)?;
            }
            debug!("Moved terminal {} out as {}", terminal.group(), substitute.group());
        }

        Ok(())
    }

    /// Picks the orientation with the lowest locants, group by group in
    /// priority order. Radical names break ties.
    fn correct_orientation(&mut self) -> Result<(), OrganicError> {
        let inverse = self.chain.inverse();

        for group in self.chain.groups() {
            if group == Group::Hydrogen {
                continue;
            }

            let normal: usize = self.chain.indexes_of(group).iter().sum();
            let reversed: usize = inverse.indexes_of(group).iter().sum();

            match normal.cmp(&reversed) {
                Ordering::Equal => continue,
                Ordering::Greater => {
                    debug!("Reversing {} for lower {group} locants", self.chain);
                    self.chain = inverse;
                    return Ok(());
                }
                Ordering::Less => return Ok(()),
            }
        }

        if !self.chain.is_bonded_to(Group::Radical) {
            return Ok(());
        }

        let names = radical_names(&self.chain)?;
        let reversed_names = radical_names(&inverse)?;

        for (name, reversed) in names.iter().zip(&reversed_names) {
            match name.cmp(reversed) {
                Ordering::Equal => continue,
                Ordering::Greater => {
                    debug!("Reversing {} for alphabetical radicals", self.chain);
                    self.chain = inverse;
                    return Ok(());
                }
                Ordering::Less => return Ok(()),
            }
        }

        Ok(())
    }
}

/// Radical names in chain order.
fn radical_names(chain: &Chain) -> Result<Vec<String>, OrganicError> {
    chain
        .substituents()
        .iter()
        .filter(|s| s.is_radical())
        .map(naming::radical_name)
        .collect()
}

impl From<Chain> for Simple {
    fn from(chain: Chain) -> Self {
        Self { chain }
    }
}

impl Display for Simple {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.chain)
    }
}
