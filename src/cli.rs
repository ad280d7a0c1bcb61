//! Command-line interface for the foraging policy search.

use lexopt::prelude::*;
use std::path::PathBuf;

use crate::scenario::Scenario;

#[derive(Debug, Clone)]
pub struct CliArgs {
    pub command: Command,
    pub random_seed: Option<u64>,
    pub generations: Option<u32>,
    pub individuals: Option<u32>,
    pub days: Option<u32>,
    pub output_file: Option<PathBuf>,
    pub quiet: bool,
    pub verbose: bool,
}

#[derive(Debug, Clone)]
pub enum Command {
    /// Run the policy search on one scenario document.
    Run { config: PathBuf },
    /// Run a YAML-described batch of experiments.
    Batch { config: PathBuf },
}

pub fn parse_args() -> Result<CliArgs, lexopt::Error> {
    let mut parser = lexopt::Parser::from_env();
    let mut random_seed = None;
    let mut generations = None;
    let mut individuals = None;
    let mut days = None;
    let mut output_file = None;
    let mut quiet = false;
    let mut verbose = false;
    let mut subcommand: Option<String> = None;
    let mut config: Option<PathBuf> = None;

    while let Some(arg) = parser.next()? {
        match arg {
            Value(val) => {
                let val = val.string()?;
                if subcommand.is_none() && config.is_none() && (val == "run" || val == "batch") {
                    subcommand = Some(val);
                } else if config.is_none() {
                    config = Some(PathBuf::from(val));
                } else {
                    return Err(lexopt::Error::from("unexpected extra argument"));
                }
            }
            Long("seed") => {
                random_seed = Some(parser.value()?.parse()?);
            }
            Long("generations") | Short('g') => {
                generations = Some(parser.value()?.parse()?);
            }
            Long("individuals") | Short('i') => {
                individuals = Some(parser.value()?.parse()?);
            }
            Long("days") | Short('d') => {
                days = Some(parser.value()?.parse()?);
            }
            Long("output") | Short('o') => {
                output_file = Some(PathBuf::from(parser.value()?.string()?));
            }
            Long("quiet") | Short('q') => quiet = true,
            Long("verbose") | Short('v') => verbose = true,
            Long("help") | Short('h') => {
                print_help();
                std::process::exit(0);
            }
            _ => return Err(arg.unexpected()),
        }
    }

    let config = match config {
        Some(config) => config,
        None => {
            return Err(lexopt::Error::from(
                "a configuration file path is required",
            ));
        }
    };

    let command = match subcommand.as_deref() {
        Some("batch") => Command::Batch { config },
        _ => Command::Run { config },
    };

    Ok(CliArgs {
        command,
        random_seed,
        generations,
        individuals,
        days,
        output_file,
        quiet,
        verbose,
    })
}

/// Applies CLI overrides onto a loaded scenario before validation.
pub fn apply_overrides(scenario: &mut Scenario, args: &CliArgs) {
    if let Some(seed) = args.random_seed {
        scenario.random_seed = Some(seed);
    }
    if let Some(generations) = args.generations {
        scenario.num_generations = generations;
    }
    if let Some(individuals) = args.individuals {
        scenario.num_individuals = individuals;
    }
    if let Some(days) = args.days {
        scenario.days_to_run = days;
    }
}

pub fn print_help() {
    println!("\nForaging Policy Search\n");
    println!("USAGE:");
    println!("    forage-model-sim [COMMAND] CONFIG [OPTIONS]\n");

    println!("COMMANDS:");
    println!("    run CONFIG       Search for a foraging policy (default)");
    println!("    batch CONFIG     Run batch experiments from a YAML config\n");

    println!("OPTIONS:");
    println!("    --seed <N>             Random seed for a reproducible search");
    println!("    -g, --generations <N>  Override the number of generations");
    println!("    -i, --individuals <N>  Override candidates per generation");
    println!("    -d, --days <N>         Override the number of simulated days");
    println!("    -o, --output <FILE>    Write search events (or batch results) as JSON");
    println!("    -q, --quiet            Suppress non-essential output");
    println!("    -v, --verbose          Enable debug logging");
    println!("    -h, --help             Print help information\n");

    println!("EXAMPLES:");
    println!("    # Search with a reproducible seed");
    println!("    forage-model-sim hunting.json --seed 12345\n");

    println!("    # Shorter search for a quick look");
    println!("    forage-model-sim run hunting.json -g 20 -i 5\n");

    println!("    # Batch experiments");
    println!("    forage-model-sim batch experiments.yaml -o results.json");
}
