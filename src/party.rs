use std::collections::BTreeMap;

use crate::person::Person;
use crate::resource::{ResourceCatalog, ResourceId, ResourceKind};
use crate::scenario::ScenarioParameters;

/// A foraging unit: several members of the group out hunting or gathering
/// together for the day. Encounters and decisions happen per party.
///
/// Members are indices into the owning [`Group`](crate::group::Group)'s
/// member list; the party never owns people.
#[derive(Debug, Clone)]
pub struct Party {
    pub members: Vec<usize>,
    hunting: bool,
    pub active: bool,
    gathering: bool,
    gather_time_remaining: u32,
    obtained: BTreeMap<ResourceId, f64>,
}

impl Party {
    pub fn new(hunting: bool) -> Self {
        Self {
            members: Vec::new(),
            hunting,
            active: true,
            gathering: false,
            gather_time_remaining: 0,
            obtained: BTreeMap::new(),
        }
    }

    /// Whether this party hunts animals or gathers plants. Fixed at creation.
    pub fn is_hunting(&self) -> bool {
        self.hunting
    }

    pub fn target_kind(&self) -> ResourceKind {
        if self.hunting {
            ResourceKind::Animal
        } else {
            ResourceKind::Plant
        }
    }

    /// Whether the party is currently exploiting a resource. Distinct from
    /// `is_hunting`, which names the party's mode for the whole run.
    pub fn is_gathering(&self) -> bool {
        self.gathering
    }

    pub fn gather_time_remaining(&self) -> u32 {
        self.gather_time_remaining
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    pub fn add_member(&mut self, index: usize, people: &mut [Person]) {
        people[index].in_party = true;
        self.members.push(index);
    }

    /// Starts exploiting a resource for `minutes`. A zero-minute exploit
    /// completes immediately and leaves the party idle.
    pub fn begin_gathering(&mut self, minutes: u32) {
        if minutes > 0 {
            self.gathering = true;
            self.gather_time_remaining = minutes;
        }
    }

    /// Burns one minute of the current exploit; the party returns to idle
    /// when the timer runs out.
    pub fn tick_gathering(&mut self) {
        self.gather_time_remaining = self.gather_time_remaining.saturating_sub(1);
        if self.gather_time_remaining == 0 {
            self.gathering = false;
        }
    }

    /// Heads back to camp for the rest of the day.
    pub fn retire(&mut self) {
        self.active = false;
    }

    /// Day-boundary reset: active, idle, gather state cleared, members'
    /// foraged minutes zeroed.
    pub fn reset_for_day(&mut self, people: &mut [Person]) {
        self.active = true;
        self.gathering = false;
        self.gather_time_remaining = 0;
        for &index in &self.members {
            people[index].minutes_foraged = 0;
        }
    }

    pub fn advance_minutes_foraged(&self, people: &mut [Person]) {
        for &index in &self.members {
            people[index].minutes_foraged += 1;
        }
    }

    pub fn obtained(&self) -> &BTreeMap<ResourceId, f64> {
        &self.obtained
    }

    /// Hands over the day's haul, leaving the inventory empty.
    pub fn drain_obtained(&mut self) -> BTreeMap<ResourceId, f64> {
        std::mem::take(&mut self.obtained)
    }

    /// Pounds currently carried.
    pub fn current_weight(&self) -> f64 {
        self.obtained.values().sum()
    }

    /// Pounds the party can carry: the sum of its members' carry weights.
    pub fn max_weight(&self, people: &[Person], params: &ScenarioParameters) -> f64 {
        self.members
            .iter()
            .map(|&index| people[index].carry_weight(params))
            .sum()
    }

    /// Calories currently carried.
    pub fn current_cals(&self, catalog: &ResourceCatalog) -> f64 {
        self.obtained
            .iter()
            .map(|(&id, &pounds)| pounds * catalog.resource(id).calorie_density())
            .sum()
    }

    fn add(&mut self, id: ResourceId, pounds: f64) {
        *self.obtained.entry(id).or_insert(0.0) += pounds;
    }

    fn remove(&mut self, id: ResourceId, pounds: f64) {
        if let Some(carried) = self.obtained.get_mut(&id) {
            *carried -= pounds;
            if *carried <= 0.0 {
                self.obtained.remove(&id);
            }
        }
    }

    /// Greedy, density-prioritized, capacity-constrained stow of `amount`
    /// pounds of a newly taken resource.
    ///
    /// When there is no room, the lowest calorie-per-pound item in the load
    /// (the new resource included) is evicted until either everything fits
    /// or the new resource is itself the lowest-value item, in which case
    /// the load is simply topped off at capacity. Each round either fits the
    /// remainder or strictly shrinks the lowest-density item, so the loop
    /// terminates.
    pub fn optimize_inventory(
        &mut self,
        catalog: &ResourceCatalog,
        to_add: ResourceId,
        amount: f64,
        capacity: f64,
    ) {
        loop {
            let current = self.current_weight();
            if current + amount < capacity {
                self.add(to_add, amount);
                return;
            }

            if current < capacity {
                self.add(to_add, capacity - current);
            }

            let mut lowest = to_add;
            for &id in self.obtained.keys() {
                if catalog.resource(id).calorie_density()
                    < catalog.resource(lowest).calorie_density()
                {
                    lowest = id;
                }
            }

            if lowest == to_add {
                let current = self.current_weight();
                if current < capacity {
                    self.add(to_add, capacity - current);
                }
                return;
            }

            let excess = self.current_weight() + amount - capacity;
            self.remove(lowest, excess);
        }
    }
}
