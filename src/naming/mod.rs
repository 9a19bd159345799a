//! Spanish IUPAC name particles and the pieces every open chain name is
//! assembled from.

pub mod numeral;
pub use numeral::{quantifier, root};

mod locator;
pub use locator::*;

use crate::{Chain, Group, OrganicError, Substituent};

pub const ACID_WORD: &str = "ácido";
pub const ETHER_WORD: &str = "éter";
pub const CARBON_DIOXIDE: &str = "dióxido de carbono";

/// Where a particle goes in a name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// "cloro" in "1-cloropropano"
    Prefix,
    /// "ol" in "propan-1-ol"
    Suffix,
    /// "en" in "prop-1-eno"
    Bond,
}

/// The word a group contributes in a given role, if it has one.
pub fn particle_for(group: Group, role: Role) -> Option<&'static str> {
    match role {
        Role::Prefix => match group {
            Group::Carbamoyl => Some("carbamoil"),
            Group::Cyanide => Some("ciano"),
            Group::Ketone => Some("oxo"),
            Group::Alcohol => Some("hidroxi"),
            Group::Amine => Some("amino"),
            Group::Nitro => Some("nitro"),
            Group::Bromine => Some("bromo"),
            Group::Chlorine => Some("cloro"),
            Group::Fluorine => Some("fluoro"),
            Group::Iodine => Some("yodo"),
            _ => None,
        },
        Role::Suffix => match group {
            Group::Acid => Some("oico"),
            Group::Amide => Some("amida"),
            Group::Nitrile => Some("nitrilo"),
            Group::Aldehyde => Some("al"),
            Group::Ketone => Some("ona"),
            Group::Alcohol => Some("ol"),
            Group::Amine => Some("amina"),
            _ => None,
        },
        Role::Bond => match group {
            Group::Alkene => Some("en"),
            Group::Alkyne => Some("in"),
            _ => None,
        },
    }
}

/// "metil", "propil", "isobutil", ...
pub fn radical_name(radical: &Substituent) -> Result<String, OrganicError> {
    let iso = if radical.is_iso() { "iso" } else { "" };
    Ok(format!("{iso}{}il", root(radical.carbon_count())?))
}

/// "1,2-dicloro", or "dicloro" when the positions are obvious. `None` for
/// groups that never go in front of the chain name.
pub(crate) fn prefix_for(
    group: Group,
    chain: &Chain,
    redundant: bool,
) -> Result<Option<Locator>, OrganicError> {
    let Some(particle) = particle_for(group, Role::Prefix) else {
        return Ok(None);
    };

    let indexes = chain.indexes_of(group);
    let locator = if redundant {
        Locator::without_positions(indexes.len(), particle)?
    } else {
        Locator::new(&indexes, particle)?
    };

    Ok(Some(locator))
}

/// "-1,3-dien", "in", or nothing if the chain has no such bond.
pub(crate) fn bond_name(group: Group, chain: &Chain, redundant: bool) -> Result<String, OrganicError> {
    let indexes = chain.indexes_of(group);
    let Some(particle) = particle_for(group, Role::Bond) else {
        return Ok(String::new());
    };
    if indexes.is_empty() {
        return Ok(String::new());
    }

    let locator = if redundant {
        Locator::without_positions(indexes.len(), particle)?
    } else {
        Locator::new(&indexes, particle)?
    }
    .to_string();

    if starts_with_digit(&locator) {
        Ok(format!("-{locator}"))
    } else {
        Ok(locator)
    }
}

/// Every distinct radical as a locator over all its positions.
pub(crate) fn radical_locators(chain: &Chain) -> Result<Vec<Locator>, OrganicError> {
    let mut radicals: Vec<Substituent> = chain
        .substituents()
        .into_iter()
        .filter(Substituent::is_radical)
        .collect();
    radicals.sort();
    radicals.dedup();

    radicals
        .iter()
        .map(|radical| Locator::new(&chain.indexes_of_substituent(radical), radical_name(radical)?))
        .collect()
}

/// Joins prefixes in alphabetical order, with a hyphen before any that
/// starts with a position.
pub(crate) fn join_prefixes(mut prefixes: Vec<Locator>) -> String {
    Locator::sort_alphabetically(&mut prefixes);

    let mut joined = String::new();
    for prefix in prefixes {
        let text = prefix.to_string();
        if !joined.is_empty() && starts_with_digit(&text) {
            joined.push('-');
        }
        joined.push_str(&text);
    }
    joined
}

pub(crate) fn starts_with_digit(text: &str) -> bool {
    text.chars().next().map_or(false, |c| c.is_ascii_digit())
}

/// Looks at the first letter, skipping positions and hyphens.
pub(crate) fn starts_with_vowel(text: &str) -> bool {
    text.chars()
        .find(|c| c.is_alphabetic())
        .map_or(false, |c| "aeiouáéíóú".contains(c))
}
