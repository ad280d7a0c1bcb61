//! Elitist hill-climbing over decision-network weights.
//!
//! One elite network is retained. Each generation proposes mutated clones of
//! the elite alongside fresh random networks, scores every candidate with a
//! full simulation run, and keeps the best under the configured acceptance
//! rule. There is no crossover and no surviving population.

use log::{debug, info};
use rand::Rng;
use std::fmt;

use crate::events::{CandidateSource, EventLogger, EventType};
use crate::group::AllocationError;
use crate::network::DecisionNetwork;
use crate::simulation::{RunOutcome, RunReport, SimulationRunner, SENTINEL_SCORE};

#[derive(Debug, Clone)]
pub struct SearchSettings {
    pub generations: u32,
    /// Mutated candidates per generation; the same number of fresh random
    /// networks is added on top.
    pub individuals: u32,
    /// Maximize the fitness score, or minimize it (while nonzero).
    pub maximize: bool,
    /// Seed-phase attempt budget before giving up on the scenario.
    pub seed_attempts: u32,
}

#[derive(Debug)]
pub enum SearchError {
    Allocation(AllocationError),
    /// No random candidate survived the scenario within the attempt budget.
    SeedExhausted { attempts: u32 },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::Allocation(e) => write!(f, "{}", e),
            SearchError::SeedExhausted { attempts } => write!(
                f,
                "no surviving policy found in {} random attempts",
                attempts
            ),
        }
    }
}

impl From<AllocationError> for SearchError {
    fn from(e: AllocationError) -> Self {
        SearchError::Allocation(e)
    }
}

/// A retained network together with the run that scored it.
#[derive(Debug, Clone)]
pub struct EliteSnapshot {
    pub network: DecisionNetwork,
    pub score: f64,
    pub report: RunReport,
}

/// State after the seed phase: the initial elite and how many random
/// candidates it took to find it.
pub struct SeededSearch {
    pub elite: EliteSnapshot,
    pub attempts: u32,
}

pub struct SearchOutcome {
    pub seed: EliteSnapshot,
    pub best: EliteSnapshot,
    pub seed_attempts: u32,
    pub generations_run: u32,
}

pub struct PolicySearch<'a> {
    runner: SimulationRunner<'a>,
    settings: SearchSettings,
}

impl<'a> PolicySearch<'a> {
    pub fn new(runner: SimulationRunner<'a>, settings: SearchSettings) -> Self {
        Self { runner, settings }
    }

    fn accepts(&self, candidate: f64, best: f64) -> bool {
        if self.settings.maximize {
            candidate > best
        } else {
            candidate != SENTINEL_SCORE && candidate < best
        }
    }

    /// Draws random networks until one produces a non-sentinel score; that
    /// network becomes the initial elite.
    pub fn seed<R: Rng>(
        &self,
        rng: &mut R,
        events: &mut EventLogger,
    ) -> Result<SeededSearch, SearchError> {
        let floor = if self.settings.maximize {
            SENTINEL_SCORE
        } else {
            f64::MAX
        };

        for attempt in 1..=self.settings.seed_attempts {
            let mut network = DecisionNetwork::random(rng);
            if let RunOutcome::Completed(report) = self.runner.run(&mut network, rng)? {
                if self.accepts(report.score, floor) {
                    debug!(
                        "seed candidate accepted after {} attempts (score {})",
                        attempt, report.score
                    );
                    events.log(
                        0,
                        EventType::SeedFound {
                            attempts: attempt,
                            score: report.score,
                            days_survived: report.days_survived,
                        },
                    );
                    return Ok(SeededSearch {
                        elite: EliteSnapshot {
                            network,
                            score: report.score,
                            report,
                        },
                        attempts: attempt,
                    });
                }
            }
        }

        Err(SearchError::SeedExhausted {
            attempts: self.settings.seed_attempts,
        })
    }

    /// Runs the generation loop from a seeded elite.
    pub fn evolve<R: Rng>(
        &self,
        seeded: SeededSearch,
        rng: &mut R,
        events: &mut EventLogger,
    ) -> Result<SearchOutcome, SearchError> {
        let seed_elite = seeded.elite.clone();
        let mut best = seeded.elite;

        for generation in 0..self.settings.generations {
            let mut candidates: Vec<(DecisionNetwork, CandidateSource)> = Vec::new();
            for _ in 0..self.settings.individuals {
                candidates.push((best.network.mutate(rng), CandidateSource::Mutation));
            }
            for _ in 0..self.settings.individuals {
                candidates.push((DecisionNetwork::random(rng), CandidateSource::Fresh));
            }

            for (mut network, source) in candidates {
                match self.runner.run(&mut network, rng)? {
                    RunOutcome::Completed(report) if self.accepts(report.score, best.score) => {
                        events.log(
                            generation,
                            EventType::EliteReplaced {
                                score: report.score,
                                days_survived: report.days_survived,
                                source,
                            },
                        );
                        best = EliteSnapshot {
                            network,
                            score: report.score,
                            report,
                        };
                    }
                    _ => {}
                }
            }

            info!(
                "generation {}/{} complete, best score {}",
                generation + 1,
                self.settings.generations,
                best.score
            );
            events.log(
                generation,
                EventType::GenerationCompleted {
                    best_score: best.score,
                },
            );
        }

        events.log(
            self.settings.generations,
            EventType::SearchCompleted {
                best_score: best.score,
                generations: self.settings.generations,
            },
        );

        Ok(SearchOutcome {
            seed: seed_elite,
            best,
            seed_attempts: seeded.attempts,
            generations_run: self.settings.generations,
        })
    }

    /// Seed phase followed by the full generation loop.
    pub fn run<R: Rng>(
        &self,
        rng: &mut R,
        events: &mut EventLogger,
    ) -> Result<SearchOutcome, SearchError> {
        let seeded = self.seed(rng, events)?;
        self.evolve(seeded, rng, events)
    }
}
