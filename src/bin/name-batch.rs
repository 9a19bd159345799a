use anyhow::{bail, Context, Result};
use organic::batch::name_csv;
use organic::init_logging;
use std::env;
use std::fs::File;

fn main() -> Result<()> {
    init_logging(&env::var("ORGANIC_LOG").unwrap_or_else(|_| "info".to_string()));

    let args: Vec<String> = env::args().skip(1).collect();
    let [input, output] = args.as_slice() else {
        bail!("usage: name-batch <input.csv> <output.csv>");
    };

    let reader = File::open(input).with_context(|| format!("Couldn't open {input}"))?;
    let writer = File::create(output).with_context(|| format!("Couldn't create {output}"))?;

    let summary = name_csv(reader, writer)?;
    println!("{} named, {} skipped", summary.named, summary.skipped);
    Ok(())
}
