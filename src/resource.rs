use rand::Rng;
use serde::{Deserialize, Serialize};

/// A plant or animal species a foraging party may encounter away from camp.
///
/// Identity is the name: two resources with the same name are the same
/// species for inventory and harvest accounting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub name: String,
    /// Calories one unit of this resource is worth.
    pub calories: u32,
    pub animal: bool,
    /// Minutes to gather one unit once engaged.
    pub gather_time: u32,
    /// Minutes to process one unit after gathering.
    pub process_time: u32,
    /// Average minutes between sightings.
    pub encounter_rate: u32,
    /// Weight in pounds of one unit.
    pub weight: f64,
    /// Chance an engagement actually lands the resource.
    pub success_rate: f64,
}

impl Resource {
    pub fn kind(&self) -> ResourceKind {
        if self.animal {
            ResourceKind::Animal
        } else {
            ResourceKind::Plant
        }
    }

    /// Calories per pound; drives the party inventory optimizer.
    pub fn calorie_density(&self) -> f64 {
        f64::from(self.calories) / self.weight
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Animal,
    Plant,
}

/// Index of a resource in the catalog it was loaded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResourceId(pub usize);

/// The immutable resource set for one scenario, with per-category encounter
/// tables built once at load time.
///
/// Each resource's raw weight is `1 / encounterRate`; weights are expressed
/// over a category-wide common denominator (the LCM of the category's
/// encounter rates), giving each resource a probability slice per simulated
/// minute. Slices deliberately do not sum to 1: the remainder is the chance
/// of seeing nothing that minute.
pub struct ResourceCatalog {
    resources: Vec<Resource>,
    animal_table: Vec<(ResourceId, f64)>,
    plant_table: Vec<(ResourceId, f64)>,
}

impl ResourceCatalog {
    pub fn new(resources: Vec<Resource>) -> Self {
        let animal_table = encounter_table(&resources, ResourceKind::Animal);
        let plant_table = encounter_table(&resources, ResourceKind::Plant);
        Self {
            resources,
            animal_table,
            plant_table,
        }
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn resource(&self, id: ResourceId) -> &Resource {
        &self.resources[id.0]
    }

    pub fn find(&self, name: &str) -> Option<ResourceId> {
        self.resources
            .iter()
            .position(|r| r.name == name)
            .map(ResourceId)
    }

    fn table(&self, kind: ResourceKind) -> &[(ResourceId, f64)] {
        match kind {
            ResourceKind::Animal => &self.animal_table,
            ResourceKind::Plant => &self.plant_table,
        }
    }

    /// Total per-minute encounter probability for a category.
    pub fn encounter_probability(&self, kind: ResourceKind) -> f64 {
        self.table(kind).iter().map(|(_, slice)| slice).sum()
    }

    /// Draws one minute's encounter for a category: a specific resource, or
    /// `None` when the roll lands in the residual no-encounter mass.
    ///
    /// Resources are walked in catalog order, so sampling is deterministic
    /// for a given rng state.
    pub fn sample<R: Rng>(&self, kind: ResourceKind, rng: &mut R) -> Option<ResourceId> {
        let roll = rng.random::<f64>();
        let mut cumulative = 0.0;
        for &(id, slice) in self.table(kind) {
            cumulative += slice;
            if roll < cumulative {
                return Some(id);
            }
        }
        None
    }
}

fn encounter_table(resources: &[Resource], kind: ResourceKind) -> Vec<(ResourceId, f64)> {
    let rates: Vec<u64> = resources
        .iter()
        .filter(|r| r.kind() == kind)
        .map(|r| u64::from(r.encounter_rate))
        .collect();
    if rates.is_empty() {
        return Vec::new();
    }

    let denominator = lcm_all(&rates);
    resources
        .iter()
        .enumerate()
        .filter(|(_, r)| r.kind() == kind)
        .map(|(index, r)| {
            let slice =
                (denominator as f64 / f64::from(r.encounter_rate)) / denominator as f64;
            (ResourceId(index), slice)
        })
        .collect()
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b > 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

fn lcm(a: u64, b: u64) -> u64 {
    a * (b / gcd(a, b))
}

fn lcm_all(values: &[u64]) -> u64 {
    values.iter().copied().fold(values[0], lcm)
}
