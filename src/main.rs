use log::LevelFilter;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;

use forage_model::cli::{self, CliArgs, Command};
use forage_model::events::EventLogger;
use forage_model::experiment::{self, ExperimentBatch};
use forage_model::report;
use forage_model::scenario::Scenario;
use forage_model::search::PolicySearch;
use forage_model::simulation::SimulationRunner;

fn main() {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}", e);
            cli::print_help();
            std::process::exit(1);
        }
    };

    let level = if args.verbose {
        LevelFilter::Debug
    } else if args.quiet {
        LevelFilter::Error
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .init();

    let status = match &args.command {
        Command::Run { config } => run_search(config, &args),
        Command::Batch { config } => run_batch(config, &args),
    };

    if let Err(e) = status {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_search(config: &Path, args: &CliArgs) -> Result<(), String> {
    let mut scenario = Scenario::load_from_file(config)?;
    cli::apply_overrides(&mut scenario, args);
    scenario.validate()?;

    if !args.quiet {
        println!("{}", scenario);
    }

    let catalog = scenario.catalog();
    let params = scenario.parameters();
    let seed = scenario.random_seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);

    let runner = SimulationRunner::new(&catalog, &params);
    let search = PolicySearch::new(runner, scenario.search_settings());
    let mut events = EventLogger::new();

    let seeded = search.seed(&mut rng, &mut events).map_err(|e| e.to_string())?;
    if !args.quiet {
        report::print_seed_report(&seeded.elite, seeded.attempts, &catalog);
    }

    let outcome = search
        .evolve(seeded, &mut rng, &mut events)
        .map_err(|e| e.to_string())?;
    report::print_final_report(&outcome, &catalog);

    if let Some(path) = &args.output_file {
        events.save_to_file(path)?;
        if !args.quiet {
            println!("\nSearch events written to {}", path.display());
        }
    }

    Ok(())
}

fn run_batch(config: &Path, args: &CliArgs) -> Result<(), String> {
    let batch = ExperimentBatch::load_from_file(config)?;
    if !args.quiet {
        println!("Batch: {} ({} experiments)", batch.name, batch.experiments.len());
    }

    let results = batch.run(args.quiet);

    let failures = results.iter().filter(|r| !r.success).count();
    for result in &results {
        match (&result.best_score, &result.error) {
            (Some(score), _) => println!(
                "  {} run {}: score {} ({} days, {} ms)",
                result.name,
                result.run,
                score,
                result.days_survived.unwrap_or(0),
                result.duration_ms
            ),
            (None, Some(error)) => {
                println!("  {} run {}: FAILED: {}", result.name, result.run, error)
            }
            (None, None) => println!("  {} run {}: FAILED", result.name, result.run),
        }
    }
    if failures > 0 {
        println!("{} of {} runs failed", failures, results.len());
    }

    if let Some(path) = &args.output_file {
        experiment::save_results(&results, path)?;
        if !args.quiet {
            println!("Results written to {}", path.display());
        }
    }

    Ok(())
}
