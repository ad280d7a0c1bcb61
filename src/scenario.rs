use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use crate::resource::{Resource, ResourceCatalog, ResourceKind};
use crate::search::SearchSettings;

/// One scenario document: population and calorie constants, the resource
/// set, and the policy-search settings. Field names on the wire are
/// camelCase, matching the documented configuration format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub num_people: usize,
    pub party_size: usize,
    pub days_to_run: u32,
    pub hours_to_run: u32,
    pub num_parties: usize,
    pub num_generations: u32,
    pub num_individuals: u32,
    pub maximize: bool,
    pub max_weight: u32,
    pub cals_burned_at_rest: u32,
    pub cals_burned_foraging: u32,
    pub meat_ratio: f64,
    pub resources: Vec<Resource>,
    #[serde(default)]
    pub random_seed: Option<u64>,
    /// Budget for the random seed phase before the search gives up.
    #[serde(default = "default_seed_attempts")]
    pub seed_attempts: u32,
}

fn default_seed_attempts() -> u32 {
    10_000
}

/// The immutable per-run constants every simulation entity reads. Built
/// from a validated [`Scenario`] and passed explicitly instead of living in
/// shared global state.
#[derive(Debug, Clone)]
pub struct ScenarioParameters {
    pub num_people: usize,
    pub party_size: usize,
    pub num_parties: usize,
    pub days_to_run: u32,
    pub hours_to_run: u32,
    pub max_weight: u32,
    pub cals_burned_at_rest: u32,
    pub cals_burned_foraging: u32,
    pub meat_ratio: f64,
}

impl Scenario {
    pub fn parameters(&self) -> ScenarioParameters {
        ScenarioParameters {
            num_people: self.num_people,
            party_size: self.party_size,
            num_parties: self.num_parties,
            days_to_run: self.days_to_run,
            hours_to_run: self.hours_to_run,
            max_weight: self.max_weight,
            cals_burned_at_rest: self.cals_burned_at_rest,
            cals_burned_foraging: self.cals_burned_foraging,
            meat_ratio: self.meat_ratio,
        }
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            generations: self.num_generations,
            individuals: self.num_individuals,
            maximize: self.maximize,
            seed_attempts: self.seed_attempts,
        }
    }

    pub fn catalog(&self) -> ResourceCatalog {
        ResourceCatalog::new(self.resources.clone())
    }

    /// Loads a scenario from a JSON document, or YAML when the path ends in
    /// `.yaml`/`.yml`.
    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;

        let yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml") | Some("yml")
        );
        if yaml {
            serde_yaml::from_str(&contents)
                .map_err(|e| format!("failed to parse {}: {}", path.display(), e))
        } else {
            serde_json::from_str(&contents)
                .map_err(|e| format!("failed to parse {}: {}", path.display(), e))
        }
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("failed to serialize scenario: {}", e))?;
        std::fs::write(path, json).map_err(|e| format!("failed to write {}: {}", path.display(), e))
    }

    /// Startup validation; any failure here is fatal before the simulation
    /// begins.
    pub fn validate(&self) -> Result<(), String> {
        if self.num_people == 0 {
            return Err("numPeople must be at least 1".to_string());
        }
        if self.party_size == 0 {
            return Err("partySize must be at least 1".to_string());
        }
        if self.num_parties * self.party_size > self.num_people {
            return Err(format!(
                "{} parties of {} need more members than numPeople = {}",
                self.num_parties, self.party_size, self.num_people
            ));
        }
        if self.days_to_run == 0 {
            return Err("daysToRun must be at least 1".to_string());
        }
        if self.hours_to_run == 0 || self.hours_to_run > 24 {
            return Err("hoursToRun must be between 1 and 24".to_string());
        }
        if !(0.0..=1.0).contains(&self.meat_ratio) {
            return Err("meatRatio must be between 0 and 1".to_string());
        }
        if self.num_individuals == 0 {
            return Err("numIndividuals must be at least 1".to_string());
        }
        if self.resources.is_empty() {
            return Err("at least one resource is required".to_string());
        }

        let mut names = HashSet::new();
        for resource in &self.resources {
            if resource.name.is_empty() {
                return Err("resource names must not be empty".to_string());
            }
            if !names.insert(resource.name.as_str()) {
                return Err(format!("duplicate resource name: {}", resource.name));
            }
            if resource.calories == 0 {
                return Err(format!(
                    "resource {}: calories must be positive",
                    resource.name
                ));
            }
            if resource.encounter_rate == 0 {
                return Err(format!(
                    "resource {}: encounterRate must be positive",
                    resource.name
                ));
            }
            if resource.weight <= 0.0 {
                return Err(format!(
                    "resource {}: weight must be positive",
                    resource.name
                ));
            }
            if !(0.0..=1.0).contains(&resource.success_rate) {
                return Err(format!(
                    "resource {}: successRate must be between 0 and 1",
                    resource.name
                ));
            }
        }

        for kind in [ResourceKind::Animal, ResourceKind::Plant] {
            let mass: f64 = self
                .resources
                .iter()
                .filter(|r| r.kind() == kind)
                .map(|r| 1.0 / f64::from(r.encounter_rate))
                .sum();
            if mass > 1.0 {
                let label = match kind {
                    ResourceKind::Animal => "animal",
                    ResourceKind::Plant => "plant",
                };
                return Err(format!(
                    "{} encounter probabilities sum to {:.3}; must not exceed 1",
                    label, mass
                ));
            }
        }

        Ok(())
    }

    /// A small self-contained scenario used by tests and documentation.
    pub fn example() -> Self {
        Self {
            name: "steppe_band".to_string(),
            description: "One hunting and one gathering party on a sparse steppe".to_string(),
            num_people: 10,
            party_size: 4,
            days_to_run: 30,
            hours_to_run: 12,
            num_parties: 2,
            num_generations: 50,
            num_individuals: 10,
            maximize: true,
            max_weight: 40,
            cals_burned_at_rest: 1,
            cals_burned_foraging: 3,
            meat_ratio: 0.4,
            resources: vec![
                Resource {
                    name: "red deer".to_string(),
                    calories: 90_000,
                    animal: true,
                    gather_time: 45,
                    process_time: 120,
                    encounter_rate: 240,
                    weight: 180.0,
                    success_rate: 0.25,
                },
                Resource {
                    name: "hare".to_string(),
                    calories: 1_800,
                    animal: true,
                    gather_time: 10,
                    process_time: 15,
                    encounter_rate: 45,
                    weight: 3.5,
                    success_rate: 0.55,
                },
                Resource {
                    name: "tubers".to_string(),
                    calories: 700,
                    animal: false,
                    gather_time: 20,
                    process_time: 10,
                    encounter_rate: 30,
                    weight: 2.0,
                    success_rate: 0.9,
                },
                Resource {
                    name: "berries".to_string(),
                    calories: 350,
                    animal: false,
                    gather_time: 15,
                    process_time: 0,
                    encounter_rate: 20,
                    weight: 1.0,
                    success_rate: 0.95,
                },
            ],
            random_seed: None,
            seed_attempts: default_seed_attempts(),
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scenario: {}", self.name)?;
        if !self.description.is_empty() {
            writeln!(f, "Description: {}", self.description)?;
        }
        writeln!(
            f,
            "Population: {} people, {} parties of {}",
            self.num_people, self.num_parties, self.party_size
        )?;
        writeln!(
            f,
            "Schedule: {} days, {} foraging hours per day",
            self.days_to_run, self.hours_to_run
        )?;
        writeln!(
            f,
            "Search: {} generations x {} individuals ({})",
            self.num_generations,
            self.num_individuals,
            if self.maximize { "maximize" } else { "minimize" }
        )?;
        writeln!(f, "Resources:")?;
        for resource in &self.resources {
            writeln!(
                f,
                "  {} ({}): {} kcal, {:.1} lb, every ~{} min, {:.0}% success",
                resource.name,
                if resource.animal { "animal" } else { "plant" },
                resource.calories,
                resource.weight,
                resource.encounter_rate,
                resource.success_rate * 100.0
            )?;
        }
        Ok(())
    }
}
