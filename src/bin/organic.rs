use anyhow::{bail, Context, Result};
use organic::*;
use std::env;
use std::fs;

const USAGE: &str = "usage: organic <build sequence>\n       organic --cml <file.cml>";

fn main() -> Result<()> {
    init_logging(&env::var("ORGANIC_LOG").unwrap_or_else(|_| "info".to_string()));

    let args: Vec<String> = env::args().skip(1).collect();
    match args.as_slice() {
        [] => bail!(USAGE),
        [flag, path] if flag == "--cml" => {
            let cml = fs::read_to_string(path).with_context(|| format!("Couldn't read {path}"))?;
            match recognize_cml(&cml) {
                Some(open_chain) => {
                    println!("{}", open_chain.structure());
                    println!("{}", open_chain.name()?);
                }
                None => bail!("{path} is not an open chain compound"),
            }
        }
        words => {
            let sequence = words.join(" ");
            let steps = parse_sequence(&sequence)?;
            let mut open_chain = OpenChain::build(&steps)
                .with_context(|| format!("Couldn't build {sequence:?}"))?;

            if !open_chain.is_done() {
                println!("{open_chain}");
                let groups: Vec<String> = open_chain
                    .bondable_groups()
                    .iter()
                    .map(Group::to_string)
                    .collect();
                println!("next: {}", groups.join(" "));
                if open_chain.can_bond_carbon() {
                    println!("      carbon");
                }
                return Ok(());
            }

            open_chain.correct()?;
            println!("{}", open_chain.structure());
            println!("{}", open_chain.name()?);
        }
    }

    Ok(())
}
