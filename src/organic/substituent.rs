use std::cmp::Ordering;
use std::fmt::{Display, Formatter, Result as FmtResult};

use super::OrganicError;
use crate::Group;

/// Radicals can't outgrow the longest chain with a numeral root.
const MAX_CARBON_COUNT: usize = 999;

/// Something bonded to a carbon of the main chain.
///
/// ```text
/// -Cl            { Chlorine, bond_count: 1, carbon_count: 0, iso: false }
/// =O             { Ketone,   bond_count: 2, carbon_count: 0, iso: false }
/// -CH2-CH2-CH3   { Radical,  bond_count: 1, carbon_count: 3, iso: false }
/// -CH(CH3)-CH3   { Radical,  bond_count: 1, carbon_count: 3, iso: true  }
/// ```
///
/// Every field but `group` is fixed by the group unless it is a radical, so
/// the derived equality compares non-radicals by group and radicals by shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Substituent {
    group: Group,
    bond_count: u8,
    carbon_count: usize,
    iso: bool,
}

impl Substituent {
    /// A non-radical substituent of the given group.
    pub fn new(group: Group) -> Result<Self, OrganicError> {
        match (group, group.bond_count()) {
            (Group::Radical, _) | (_, None) => Err(OrganicError::NotASubstituent(group)),
            (_, Some(bond_count)) => Ok(Self {
                group,
                bond_count,
                carbon_count: 0,
                iso: false,
            }),
        }
    }

    /// An alkyl radical. Iso radicals end in `CH(CH3)2` and need 3 carbons.
    pub fn radical(carbon_count: usize, iso: bool) -> Result<Self, OrganicError> {
        if carbon_count < 1 || (iso && carbon_count < 3) {
            return Err(OrganicError::RadicalTooShort { carbon_count, iso });
        }
        if carbon_count > MAX_CARBON_COUNT {
            return Err(OrganicError::RadicalTooLong(carbon_count));
        }

        Ok(Self {
            group: Group::Radical,
            bond_count: 1,
            carbon_count,
            iso,
        })
    }

    pub(crate) fn hydrogen() -> Self {
        Self {
            group: Group::Hydrogen,
            bond_count: 1,
            carbon_count: 0,
            iso: false,
        }
    }

    pub(crate) fn methyl() -> Self {
        Self {
            group: Group::Radical,
            bond_count: 1,
            carbon_count: 1,
            iso: false,
        }
    }

    pub fn group(&self) -> Group {
        self.group
    }

    pub fn bond_count(&self) -> u8 {
        self.bond_count
    }

    pub fn carbon_count(&self) -> usize {
        self.carbon_count
    }

    pub fn is_iso(&self) -> bool {
        self.iso
    }

    pub fn is_radical(&self) -> bool {
        self.group == Group::Radical
    }

    fn structure(&self) -> String {
        match self.group {
            Group::Acid => "OOH".to_string(),
            Group::Amide => "ONH2".to_string(),
            Group::Carbamoyl => "CONH2".to_string(),
            Group::Nitrile => "N".to_string(),
            Group::Cyanide => "CN".to_string(),
            Group::Aldehyde => "HO".to_string(),
            Group::Ketone => "O".to_string(),
            Group::Alcohol => "OH".to_string(),
            Group::Amine => "NH2".to_string(),
            Group::Ether => "-O-".to_string(),
            Group::Nitro => "NO2".to_string(),
            Group::Bromine => "Br".to_string(),
            Group::Chlorine => "Cl".to_string(),
            Group::Fluorine => "F".to_string(),
            Group::Iodine => "I".to_string(),
            Group::Hydrogen => "H".to_string(),
            Group::Radical if self.iso => {
                "CH2".repeat(self.carbon_count.saturating_sub(3)) + "CH(CH3)2"
            }
            Group::Radical => "CH2".repeat(self.carbon_count.saturating_sub(1)) + "CH3",
            Group::Alkene | Group::Alkyne => String::new(),
        }
    }
}

impl Ord for Substituent {
    /// `OOH < Cl < CH2CH3 < H`, and among radicals
    /// `CH2CH3 < CH(CH3)2 < CH2CH2CH3`.
    fn cmp(&self, other: &Self) -> Ordering {
        if self.is_radical() && other.is_radical() {
            return self
                .carbon_count
                .cmp(&other.carbon_count)
                .then_with(|| other.iso.cmp(&self.iso));
        }

        self.group.cmp(&other.group)
    }
}

impl PartialOrd for Substituent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for Substituent {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.structure())
    }
}
