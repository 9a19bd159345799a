//! A textual notation for the bond by bond construction of a compound.
//!
//! ```text
//! hydrogen*3 carbon hydrogen*2 carbon acid     CH3-CH2-COOH
//! hydrogen*2 radical(1) carbon hydrogen*3      CH3-CH2-CH3
//! ```

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, multispace0, multispace1},
    combinator::{all_consuming, map, map_res, opt, value},
    error::{convert_error, VerboseError},
    multi::separated_list0,
    sequence::{delimited, pair, preceded},
    Finish, IResult,
};
use std::fmt::{Display, Formatter, Result as FmtResult};
use thiserror::Error;

use crate::{Group, Substituent};

pub(crate) type Res<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// One call on a compound under construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Bond(Substituent),
    BondCarbon,
}

impl Display for Step {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Step::BondCarbon => write!(f, "carbon"),
            Step::Bond(substituent) if substituent.is_radical() => {
                let shape = if substituent.is_iso() { "iso" } else { "radical" };
                write!(f, "{shape}({})", substituent.carbon_count())
            }
            Step::Bond(substituent) => write!(f, "{}", substituent.group()),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SequenceError {
    #[error("Invalid build sequence:\n{0}")]
    Syntax(String),
    #[error("Empty build sequence")]
    Empty,
}

fn parse_count(input: &str) -> Res<usize> {
    map_res(digit1, str::parse::<usize>)(input)
}

/// `radical(3)` or `iso(4)`
fn parse_radical(input: &str) -> Res<Step> {
    map_res(
        pair(
            alt((value(false, tag("radical")), value(true, tag("iso")))),
            delimited(char('('), parse_count, char(')')),
        ),
        |(iso, carbon_count)| Substituent::radical(carbon_count, iso).map(Step::Bond),
    )(input)
}

/// `carbon`, or the word of any group that can stand alone.
fn parse_word(input: &str) -> Res<Step> {
    map_res(
        take_while1(|c: char| c.is_ascii_alphabetic()),
        |word: &str| -> Result<Step, String> {
            if word == "carbon" {
                return Ok(Step::BondCarbon);
            }
            let group = word.parse::<Group>()?;
            Substituent::new(group)
                .map(Step::Bond)
                .map_err(|e| e.to_string())
        },
    )(input)
}

/// A step with an optional repeat count: `hydrogen*3`.
fn parse_repeated_step(input: &str) -> Res<Vec<Step>> {
    map(
        pair(
            alt((parse_radical, parse_word)),
            opt(preceded(char('*'), parse_count)),
        ),
        |(step, count)| vec![step; count.unwrap_or(1)],
    )(input)
}

fn parse_steps(input: &str) -> Res<Vec<Step>> {
    map(
        delimited(
            multispace0,
            separated_list0(multispace1, parse_repeated_step),
            multispace0,
        ),
        |steps| steps.into_iter().flatten().collect(),
    )(input)
}

/// Parses a whole build sequence.
pub fn parse_sequence(input: &str) -> Result<Vec<Step>, SequenceError> {
    let (_, steps) = all_consuming(parse_steps)(input)
        .finish()
        .map_err(|e| SequenceError::Syntax(convert_error(input, e)))?;

    if steps.is_empty() {
        return Err(SequenceError::Empty);
    }
    Ok(steps)
}

/// The notation for a list of steps, run-length encoded.
pub fn write_sequence(steps: &[Step]) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut i = 0;
    while i < steps.len() {
        let mut count = 1;
        while i + count < steps.len() && steps[i + count] == steps[i] {
            count += 1;
        }
        if count > 1 {
            words.push(format!("{}*{count}", steps[i]));
        } else {
            words.push(steps[i].to_string());
        }
        i += count;
    }
    words.join(" ")
}
