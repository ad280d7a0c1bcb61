//! One full scenario run for one candidate policy.

use std::collections::BTreeMap;

use rand::Rng;

use crate::group::{AllocationError, Group};
use crate::network::{Decision, DecisionNetwork, Observation};
use crate::resource::{ResourceCatalog, ResourceId};
use crate::scenario::ScenarioParameters;

/// Score of a run that ended in starvation. Always excluded from
/// best-score comparisons by the search.
pub const SENTINEL_SCORE: f64 = 0.0;

/// Points granted per completed day and charged per worst-case deficient
/// day.
const DAY_WEIGHT: f64 = 1_000.0;

/// What one candidate evaluation produced.
#[derive(Debug, Clone)]
pub enum RunOutcome {
    Completed(RunReport),
    /// The day index on which a member starved; the run stopped there.
    StarvedOnDay(u32),
}

impl RunOutcome {
    pub fn score(&self) -> f64 {
        match self {
            RunOutcome::Completed(report) => report.score,
            RunOutcome::StarvedOnDay(_) => SENTINEL_SCORE,
        }
    }
}

/// Bookkeeping from a completed run, kept for reporting on the elite.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub score: f64,
    pub days_survived: u32,
    pub excess_meat: f64,
    pub excess_plants: f64,
    pub max_days_deficient: u32,
    pub total_gathered: BTreeMap<ResourceId, u64>,
}

/// Executes scenarios against candidate networks. One invocation builds a
/// fresh population graph, plays out every day and minute, and scores the
/// result; nothing is shared between invocations.
pub struct SimulationRunner<'a> {
    catalog: &'a ResourceCatalog,
    params: &'a ScenarioParameters,
}

impl<'a> SimulationRunner<'a> {
    pub fn new(catalog: &'a ResourceCatalog, params: &'a ScenarioParameters) -> Self {
        Self { catalog, params }
    }

    pub fn run<R: Rng>(
        &self,
        network: &mut DecisionNetwork,
        rng: &mut R,
    ) -> Result<RunOutcome, AllocationError> {
        let params = self.params;
        let mut group = Group::with_members(params.num_people);

        let mut hunting = true;
        for _ in 0..params.num_parties {
            group.allocate_party(params.party_size, hunting)?;
            hunting = !hunting;
        }

        let minutes_per_day = params.hours_to_run * 60;
        for day in 0..params.days_to_run {
            for minute in 0..minutes_per_day {
                for index in 0..group.parties.len() {
                    self.run_party_minute(&mut group, index, minute, network, rng);
                }
            }

            if group.feed_group(self.catalog, params).is_err() {
                return Ok(RunOutcome::StarvedOnDay(day));
            }

            group.bank_harvest(self.catalog);
            for party in &mut group.parties {
                party.reset_for_day(&mut group.members);
            }
        }

        group.days_survived = params.days_to_run;
        Ok(RunOutcome::Completed(self.score(&group)))
    }

    fn run_party_minute<R: Rng>(
        &self,
        group: &mut Group,
        index: usize,
        minute: u32,
        network: &mut DecisionNetwork,
        rng: &mut R,
    ) {
        let party = &group.parties[index];
        if !party.active {
            return;
        }
        group.parties[index].advance_minutes_foraged(&mut group.members);

        if group.parties[index].is_gathering() {
            group.parties[index].tick_gathering();
            return;
        }

        let party = &group.parties[index];
        let sighted = self.catalog.sample(party.target_kind(), rng);

        let mut observation = Observation {
            party_size: party.size() as f64,
            current_weight: party.current_weight(),
            current_cals: party.current_cals(self.catalog),
            minute_of_day: f64::from(minute),
            ..Observation::default()
        };
        if let Some(id) = sighted {
            let resource = self.catalog.resource(id);
            observation.resource_calories = f64::from(resource.calories);
            observation.resource_gather_time = f64::from(resource.gather_time);
            observation.resource_process_time = f64::from(resource.process_time);
            observation.resource_weight = resource.weight;
            observation.resource_success_rate = resource.success_rate;
        }

        match network.decide(&observation) {
            Decision::Engage => {
                // Engaging with nothing in sight is a deliberate no-op.
                if let Some(id) = sighted {
                    let resource = self.catalog.resource(id);
                    if rng.random::<f64>() <= resource.success_rate {
                        let capacity =
                            group.parties[index].max_weight(&group.members, self.params);
                        let weight = resource.weight;
                        let duration = resource.gather_time + resource.process_time;
                        group.parties[index]
                            .optimize_inventory(self.catalog, id, weight, capacity);
                        group.parties[index].begin_gathering(duration);
                    }
                }
            }
            Decision::Return => group.parties[index].retire(),
            Decision::Ignore => {}
        }
    }

    fn score(&self, group: &Group) -> RunReport {
        let days = group.days_survived;
        let max_days_deficient = group.max_days_deficient();
        let score = f64::from(days) * DAY_WEIGHT + group.excess_meat() + group.excess_plants()
            - f64::from(max_days_deficient) * DAY_WEIGHT;
        RunReport {
            score,
            days_survived: days,
            excess_meat: group.excess_meat(),
            excess_plants: group.excess_plants(),
            max_days_deficient,
            total_gathered: group.total_gathered().clone(),
        }
    }
}
