mod substituent;
pub use substituent::*;

mod carbon;
pub use carbon::*;

mod chain;
pub use chain::*;

use crate::Group;
use thiserror::Error;

/// A bond sequence that no open chain can follow.
///
/// These are contract violations of the builder: once one is returned, the
/// compound under construction must be dropped.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrganicError {
    #[error("Can't bond {substituent} to carbon {carbon}")]
    CannotBond { substituent: String, carbon: String },
    #[error("There is no {substituent} bonded to carbon {carbon}")]
    NotBonded { substituent: String, carbon: String },
    #[error("Can't bond a carbon to the right of chain {chain}")]
    CannotBondCarbon { chain: String },
    #[error("Can't bond {group} to {shape}")]
    NotBondable { group: Group, shape: &'static str },
    #[error("There is no unique substituent with functional group {0}")]
    NotASubstituent(Group),
    #[error("A radical of {carbon_count} carbons can't be {}", if *.iso { "iso" } else { "straight" })]
    RadicalTooShort { carbon_count: usize, iso: bool },
    #[error("A radical of {0} carbons is longer than any nameable chain")]
    RadicalTooLong(usize),
    #[error("Carbon has no free bond to give")]
    NoFreeBond,
    #[error("Can't correct unfinished compound {structure}")]
    Unfinished { structure: String },
    #[error("Can't name a chain of {0} carbons")]
    UnnameableLength(usize),
}
