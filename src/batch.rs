//! Names every build sequence of a CSV file.

use anyhow::{anyhow, Context, Result};
use csv::{ReaderBuilder, Writer};
use std::io::{Read, Write};
use tracing::{info, warn};

use crate::{parse_sequence, OpenChain};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub named: usize,
    pub skipped: usize,
}

fn name_sequence(sequence: &str) -> Result<(String, String)> {
    let steps = parse_sequence(sequence)?;
    let mut open_chain = OpenChain::build(&steps)?;
    open_chain.correct()?;
    Ok((open_chain.structure(), open_chain.name()?))
}

/// Reads a CSV with a `sequence` column and writes `sequence,structure,name`
/// rows. Rows that can't be built are skipped.
pub fn name_csv(reader: impl Read, writer: impl Write) -> Result<BatchSummary> {
    let mut rdr = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let column = rdr
        .headers()
        .context("Couldn't read the CSV header")?
        .iter()
        .position(|header| header.trim() == "sequence")
        .ok_or_else(|| anyhow!("The CSV has no \"sequence\" column"))?;

    let mut wtr = Writer::from_writer(writer);
    wtr.write_record(["sequence", "structure", "name"])?;

    let mut summary = BatchSummary::default();
    for (row, record) in rdr.records().enumerate() {
        let record = record.with_context(|| format!("Couldn't read row {}", row + 1))?;
        let sequence = record.get(column).unwrap_or("").trim();

        match name_sequence(sequence) {
            Ok((structure, name)) => {
                wtr.write_record([sequence, structure.as_str(), name.as_str()])?;
                summary.named += 1;
            }
            Err(e) => {
                warn!("Skipping row {} ({sequence:?}): {e}", row + 1);
                summary.skipped += 1;
            }
        }
    }

    wtr.flush()?;
    info!("Named {} compounds, skipped {}", summary.named, summary.skipped);
    Ok(summary)
}
