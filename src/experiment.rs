//! Batch experiment runner: repeated seeded searches across scenario files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::events::EventLogger;
use crate::scenario::Scenario;
use crate::search::PolicySearch;
use crate::simulation::SimulationRunner;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A batch of experiments, loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentBatch {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Worker threads to spread experiments across; sequential when absent.
    pub parallel: Option<usize>,
    pub experiments: Vec<ExperimentConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub name: String,
    pub scenario: PathBuf,
    #[serde(default)]
    pub overrides: ExperimentOverrides,
    /// Independent repeats; each derives its seed as `baseSeed + index`.
    #[serde(default = "default_repeat")]
    pub repeat: usize,
}

fn default_repeat() -> usize {
    1
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExperimentOverrides {
    pub random_seed: Option<u64>,
    pub generations: Option<u32>,
    pub individuals: Option<u32>,
    pub days: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentResult {
    pub name: String,
    pub run: usize,
    pub success: bool,
    pub error: Option<String>,
    pub best_score: Option<f64>,
    pub days_survived: Option<u32>,
    pub duration_ms: u64,
}

impl ExperimentBatch {
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| format!("failed to parse {}: {}", path.display(), e))
    }

    /// Runs every experiment repeat, optionally across a bounded pool of
    /// worker threads. Each repeat owns its scenario, rng, and population
    /// graph, so only the result collection needs merging.
    pub fn run(&self, quiet: bool) -> Vec<ExperimentResult> {
        let jobs: Vec<(&ExperimentConfig, usize)> = self
            .experiments
            .iter()
            .flat_map(|exp| (0..exp.repeat.max(1)).map(move |run| (exp, run)))
            .collect();

        let workers = self.parallel.unwrap_or(1).max(1);
        if workers == 1 {
            return jobs
                .iter()
                .map(|&(exp, run)| run_single(exp, run, quiet))
                .collect();
        }

        let mut results: Vec<Option<ExperimentResult>> = vec![None; jobs.len()];
        for (chunk_index, chunk) in jobs.chunks(workers).enumerate() {
            let chunk_results: Vec<ExperimentResult> = std::thread::scope(|scope| {
                let handles: Vec<_> = chunk
                    .iter()
                    .map(|&(exp, run)| scope.spawn(move || run_single(exp, run, quiet)))
                    .collect();
                handles
                    .into_iter()
                    .map(|h| match h.join() {
                        Ok(result) => result,
                        Err(_) => ExperimentResult {
                            name: "unknown".to_string(),
                            run: 0,
                            success: false,
                            error: Some("worker thread panicked".to_string()),
                            best_score: None,
                            days_survived: None,
                            duration_ms: 0,
                        },
                    })
                    .collect()
            });
            for (offset, result) in chunk_results.into_iter().enumerate() {
                results[chunk_index * workers + offset] = Some(result);
            }
        }
        results.into_iter().flatten().collect()
    }
}

pub fn save_results(results: &[ExperimentResult], path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(results)
        .map_err(|e| format!("failed to serialize results: {}", e))?;
    std::fs::write(path, json).map_err(|e| format!("failed to write {}: {}", path.display(), e))
}

fn run_single(config: &ExperimentConfig, run: usize, quiet: bool) -> ExperimentResult {
    let start = std::time::Instant::now();
    if !quiet {
        println!("Running experiment: {} (run {})", config.name, run);
    }

    let result = run_search(config, run);
    let duration_ms = start.elapsed().as_millis() as u64;

    match result {
        Ok((best_score, days_survived)) => ExperimentResult {
            name: config.name.clone(),
            run,
            success: true,
            error: None,
            best_score: Some(best_score),
            days_survived: Some(days_survived),
            duration_ms,
        },
        Err(e) => ExperimentResult {
            name: config.name.clone(),
            run,
            success: false,
            error: Some(e),
            best_score: None,
            days_survived: None,
            duration_ms,
        },
    }
}

fn run_search(config: &ExperimentConfig, run: usize) -> Result<(f64, u32), String> {
    let mut scenario = Scenario::load_from_file(&config.scenario)?;

    if let Some(seed) = config.overrides.random_seed {
        scenario.random_seed = Some(seed);
    }
    if let Some(generations) = config.overrides.generations {
        scenario.num_generations = generations;
    }
    if let Some(individuals) = config.overrides.individuals {
        scenario.num_individuals = individuals;
    }
    if let Some(days) = config.overrides.days {
        scenario.days_to_run = days;
    }

    scenario
        .validate()
        .map_err(|e| format!("{}: {}", config.scenario.display(), e))?;

    let catalog = scenario.catalog();
    let params = scenario.parameters();
    let base_seed = scenario.random_seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(base_seed.wrapping_add(run as u64));

    let runner = SimulationRunner::new(&catalog, &params);
    let search = PolicySearch::new(runner, scenario.search_settings());
    let mut events = EventLogger::new();
    let outcome = search.run(&mut rng, &mut events).map_err(|e| e.to_string())?;

    Ok((outcome.best.score, outcome.best.report.days_survived))
}
