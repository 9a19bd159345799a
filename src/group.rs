use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// Functional groups, declared in naming priority order: the derived `Ord`
/// is the priority ranking (`Acid` is the most important, `Hydrogen` the least).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Group {
    /// =O, -OH
    Acid,
    /// =O, -NH2
    Amide,
    /// -CONH2, an amide that lost the priority
    Carbamoyl,
    /// ≡N
    Nitrile,
    /// -CN, a nitrile that lost the priority
    Cyanide,
    /// =O, -H
    Aldehyde,
    /// =O
    Ketone,
    /// -OH
    Alcohol,
    /// -NH2
    Amine,
    /// -O-R'
    Ether,
    /// A double bond to the next carbon, not a bonded substituent.
    Alkene,
    /// A triple bond to the next carbon, not a bonded substituent.
    Alkyne,
    /// -NO2
    Nitro,
    Bromine,
    Chlorine,
    Fluorine,
    Iodine,
    /// -R
    Radical,
    Hydrogen,
}

impl Group {
    /// Every group, highest priority first.
    pub const ALL: [Group; 19] = [
        Group::Acid,
        Group::Amide,
        Group::Carbamoyl,
        Group::Nitrile,
        Group::Cyanide,
        Group::Aldehyde,
        Group::Ketone,
        Group::Alcohol,
        Group::Amine,
        Group::Ether,
        Group::Alkene,
        Group::Alkyne,
        Group::Nitro,
        Group::Bromine,
        Group::Chlorine,
        Group::Fluorine,
        Group::Iodine,
        Group::Radical,
        Group::Hydrogen,
    ];

    pub fn is_halogen(self) -> bool {
        matches!(
            self,
            Group::Bromine | Group::Chlorine | Group::Fluorine | Group::Iodine
        )
    }

    /// Double and triple bonds are derived from free bond counts.
    pub fn is_bond(self) -> bool {
        matches!(self, Group::Alkene | Group::Alkyne)
    }

    /// Electron pairs a substituent of this group takes from its carbon.
    /// `None` for the bond pseudo-groups.
    pub fn bond_count(self) -> Option<u8> {
        match self {
            Group::Acid | Group::Amide | Group::Nitrile | Group::Aldehyde => Some(3),
            Group::Ketone => Some(2),
            Group::Alkene | Group::Alkyne => None,
            _ => Some(1),
        }
    }

    /// The word used for this group in build sequences and logs.
    pub fn word(self) -> &'static str {
        match self {
            Group::Acid => "acid",
            Group::Amide => "amide",
            Group::Carbamoyl => "carbamoyl",
            Group::Nitrile => "nitrile",
            Group::Cyanide => "cyanide",
            Group::Aldehyde => "aldehyde",
            Group::Ketone => "ketone",
            Group::Alcohol => "alcohol",
            Group::Amine => "amine",
            Group::Ether => "ether",
            Group::Alkene => "alkene",
            Group::Alkyne => "alkyne",
            Group::Nitro => "nitro",
            Group::Bromine => "bromine",
            Group::Chlorine => "chlorine",
            Group::Fluorine => "fluorine",
            Group::Iodine => "iodine",
            Group::Radical => "radical",
            Group::Hydrogen => "hydrogen",
        }
    }
}

impl Display for Group {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}", self.word())
    }
}

impl FromStr for Group {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Group::ALL
            .iter()
            .copied()
            .find(|group| group.word() == s)
            .ok_or_else(|| format!("Unknown functional group: {s}"))
    }
}
