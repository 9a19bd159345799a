use std::fmt::{Display, Formatter, Result as FmtResult};

use super::numeral::quantifier;
use crate::OrganicError;

/// A located name part, like "2,3-diol".
///
/// ```text
/// "2,3-diol"  { positions: [2, 3], multiplier: "di",    lexeme: "ol"     }
/// "tetrain"   { positions: [],     multiplier: "tetra", lexeme: "in"     }
/// "fluoro"    { positions: [],     multiplier: "",      lexeme: "fluoro" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    positions: Vec<usize>,
    multiplier: String,
    lexeme: String,
}

impl Locator {
    /// From 0-based carbon indexes, one per occurrence.
    pub fn new(indexes: &[usize], lexeme: impl Into<String>) -> Result<Self, OrganicError> {
        Ok(Self {
            positions: indexes.iter().map(|index| index + 1).collect(),
            multiplier: quantifier(indexes.len())?,
            lexeme: lexeme.into(),
        })
    }

    /// Leaves the positions out, for when the chain makes them obvious.
    pub fn without_positions(count: usize, lexeme: impl Into<String>) -> Result<Self, OrganicError> {
        Ok(Self {
            positions: Vec::new(),
            multiplier: quantifier(count)?,
            lexeme: lexeme.into(),
        })
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    /// IUPAC orders by lexeme alone: "2,3-diol" sorts as "ol".
    pub fn sort_alphabetically(locators: &mut [Locator]) {
        locators.sort_by(|a, b| a.lexeme.cmp(&b.lexeme));
    }
}

impl Display for Locator {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        if !self.positions.is_empty() {
            let positions: Vec<String> = self.positions.iter().map(usize::to_string).collect();
            write!(f, "{}-", positions.join(","))?;
        }

        write!(f, "{}{}", self.multiplier, self.lexeme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Locator::new(&[1, 2], "ol").unwrap().to_string(), "2,3-diol");
        assert_eq!(Locator::new(&[0], "cloro").unwrap().to_string(), "1-cloro");
        assert_eq!(Locator::new(&[4, 4, 4], "fluoro").unwrap().to_string(), "5,5,5-trifluoro");
        assert_eq!(Locator::without_positions(4, "in").unwrap().to_string(), "tetrain");
        assert_eq!(Locator::without_positions(1, "fluoro").unwrap().to_string(), "fluoro");
    }

    #[test]
    fn test_sort_ignores_positions_and_multipliers() {
        let mut locators = vec![
            Locator::new(&[0, 1], "metil").unwrap(),
            Locator::new(&[2], "etil").unwrap(),
            Locator::new(&[0, 1, 2], "cloro").unwrap(),
        ];
        Locator::sort_alphabetically(&mut locators);

        let names: Vec<String> = locators.iter().map(Locator::to_string).collect();
        assert_eq!(names, vec!["1,2,3-tricloro", "3-etil", "1,2-dimetil"]);
    }
}
