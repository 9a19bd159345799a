mod sequence;
pub use sequence::*;

mod cml;
pub use cml::*;
