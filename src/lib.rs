use std::str::FromStr;
use tracing::level_filters::LevelFilter;

mod group;
pub use group::*;

mod organic;
pub use organic::*;

pub mod naming;

mod open_chain;
pub use open_chain::*;

mod parse;
pub use parse::*;

mod recognize;
pub use recognize::*;

pub mod factory;
pub mod batch;

/// The atoms an open chain compound can be made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Element {
    C,
    H,
    N,
    O,
    Br,
    Cl,
    F,
    I,
}

impl Element {
    pub fn symbol(self) -> &'static str {
        match self {
            Element::C => "C",
            Element::H => "H",
            Element::N => "N",
            Element::O => "O",
            Element::Br => "Br",
            Element::Cl => "Cl",
            Element::F => "F",
            Element::I => "I",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "C" => Element::C,
            "H" => Element::H,
            "N" => Element::N,
            "O" => Element::O,
            "Br" => Element::Br,
            "Cl" => Element::Cl,
            "F" => Element::F,
            "I" => Element::I,
            _ => return None,
        })
    }
}

/// Atoms joined by bonds of unspecified order.
pub type MoleculeGraph = petgraph::graph::UnGraph<Element, ()>;

/// Installs a formatting subscriber at the given level (`info` if it can't
/// be parsed). Later calls are no-ops.
pub fn init_logging(level: &str) {
    let level = LevelFilter::from_str(level).unwrap_or(LevelFilter::INFO);
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .try_init();
}
