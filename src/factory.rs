//! Turns names and built compounds into complete results, with the help of
//! an external name parser and compound database.

use tracing::{info, warn};

use crate::{recognize_cml, OpenChain, OrganicError};

/// What a name parser knows about a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OracleResult {
    pub smiles: String,
    pub cml: String,
}

/// Parses chemical names (Spanish or English) into structures.
pub trait NameOracle {
    fn parse_name(&self, name: &str) -> Option<OracleResult>;
}

/// What a compound database knows about a SMILES string. Either field may
/// be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompoundRecord {
    pub molecular_mass: Option<String>,
    pub url_2d: Option<String>,
}

pub trait CompoundDatabase {
    fn lookup(&self, smiles: &str) -> CompoundRecord;
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrganicResult {
    pub name: String,
    pub structure: String,
    pub smiles: Option<String>,
    pub molecular_mass: Option<f32>,
    pub url_2d: Option<String>,
}

impl OrganicResult {
    fn new(name: String, structure: String, smiles: Option<String>, database: &impl CompoundDatabase) -> Self {
        let record = match &smiles {
            Some(smiles) => database.lookup(smiles),
            None => CompoundRecord::default(),
        };

        let molecular_mass = record.molecular_mass.and_then(|mass| match mass.trim().parse::<f32>() {
            Ok(mass) => Some(mass),
            Err(e) => {
                warn!("Ignoring molecular mass {mass:?}: {e}");
                None
            }
        });
        if record.url_2d.is_none() {
            warn!("No 2D image for {name}");
        }

        Self {
            name,
            structure,
            smiles,
            molecular_mass,
            url_2d: record.url_2d,
        }
    }
}

/// SMILES only uses digits to close rings.
fn is_cyclic(smiles: &str) -> bool {
    smiles.chars().any(|c| c.is_ascii_digit())
}

/// Looks a name up and, if it is an open chain we can handle, returns its
/// structure along with whatever the database knows.
pub fn from_name(
    name: &str,
    oracle: &impl NameOracle,
    database: &impl CompoundDatabase,
) -> Option<OrganicResult> {
    let Some(parsed) = oracle.parse_name(name) else {
        warn!("Name parser doesn't know {name:?}");
        return None;
    };

    if is_cyclic(&parsed.smiles) {
        warn!("{name:?} is cyclic: {}", parsed.smiles);
        return None;
    }

    let open_chain = recognize_cml(&parsed.cml)?;
    info!("{name:?} is {open_chain}");

    Some(OrganicResult::new(
        name.to_string(),
        open_chain.structure(),
        Some(parsed.smiles),
        database,
    ))
}

/// Corrects and names a built compound. The SMILES comes from feeding the
/// generated name back to the name parser.
pub fn from_open_chain(
    mut open_chain: OpenChain,
    oracle: &impl NameOracle,
    database: &impl CompoundDatabase,
) -> Result<OrganicResult, OrganicError> {
    open_chain.correct()?;
    let name = open_chain.name()?;
    let structure = open_chain.structure();
    info!("{structure} is {name:?}");

    let smiles = oracle.parse_name(&name).map(|parsed| parsed.smiles);
    if smiles.is_none() {
        warn!("Name parser doesn't know generated name {name:?}");
    }

    Ok(OrganicResult::new(name, structure, smiles, database))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse_sequence, write_cml};
    use std::collections::HashMap;

    /// Knows the names it was given, with CML written from build sequences.
    struct Dictionary(HashMap<&'static str, OracleResult>);

    impl Dictionary {
        fn new(entries: &[(&'static str, &str, &str)]) -> Self {
            let mut names = HashMap::new();
            for (name, smiles, sequence) in entries {
                let open_chain = OpenChain::build(&parse_sequence(sequence).unwrap()).unwrap();
                names.insert(
                    *name,
                    OracleResult {
                        smiles: smiles.to_string(),
                        cml: write_cml(&open_chain),
                    },
                );
            }
            Self(names)
        }
    }

    impl NameOracle for Dictionary {
        fn parse_name(&self, name: &str) -> Option<OracleResult> {
            self.0.get(name).cloned()
        }
    }

    struct Masses;

    impl CompoundDatabase for Masses {
        fn lookup(&self, smiles: &str) -> CompoundRecord {
            match smiles {
                "CCO" => CompoundRecord {
                    molecular_mass: Some("46.07".to_string()),
                    url_2d: Some("https://example.org/CCO.png".to_string()),
                },
                "CC(=O)O" => CompoundRecord {
                    molecular_mass: Some("unknown".to_string()),
                    url_2d: None,
                },
                _ => CompoundRecord::default(),
            }
        }
    }

    #[test]
    fn test_from_name() {
        let oracle = Dictionary::new(&[("etanol", "CCO", "hydrogen*3 carbon hydrogen*2 alcohol")]);

        let result = from_name("etanol", &oracle, &Masses).unwrap();
        assert_eq!(result.structure, "CH2(OH)-CH3");
        assert_eq!(result.smiles.as_deref(), Some("CCO"));
        assert_eq!(result.molecular_mass, Some(46.07));
        assert_eq!(result.url_2d.as_deref(), Some("https://example.org/CCO.png"));

        assert!(from_name("agua bendita", &oracle, &Masses).is_none());
    }

    #[test]
    fn test_cyclic_names_are_rejected() {
        let oracle = Dictionary::new(&[("ciclopropano", "C1CC1", "hydrogen*4")]);
        assert!(from_name("ciclopropano", &oracle, &Masses).is_none());
    }

    #[test]
    fn test_from_open_chain() {
        let oracle = Dictionary::new(&[(
            "ácido etanoico",
            "CC(=O)O",
            "hydrogen*3 carbon acid",
        )]);
        let steps = parse_sequence("hydrogen*3 carbon ketone alcohol").unwrap();
        let open_chain = OpenChain::build(&steps).unwrap();

        let result = from_open_chain(open_chain, &oracle, &Masses).unwrap();
        assert_eq!(result.name, "ácido etanoico");
        assert_eq!(result.structure, "COOH-CH3");
        assert_eq!(result.smiles.as_deref(), Some("CC(=O)O"));
        // unparsable mass and missing image are left empty
        assert_eq!(result.molecular_mass, None);
        assert_eq!(result.url_2d, None);
    }

    #[test]
    fn test_from_open_chain_without_oracle_match() {
        let oracle = Dictionary::new(&[]);
        let steps = parse_sequence("hydrogen*4").unwrap();

        let result = from_open_chain(OpenChain::build(&steps).unwrap(), &oracle, &Masses).unwrap();
        assert_eq!(result.name, "metano");
        assert_eq!(result.smiles, None);
        assert_eq!(result.molecular_mass, None);

        let unfinished = OpenChain::build(&parse_sequence("hydrogen*3").unwrap()).unwrap();
        assert!(matches!(
            from_open_chain(unfinished, &oracle, &Masses),
            Err(OrganicError::Unfinished { .. })
        ));
    }
}
