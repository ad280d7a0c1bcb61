use std::collections::BTreeMap;
use std::fmt;

use crate::party::Party;
use crate::person::{Person, Starvation};
use crate::resource::{ResourceCatalog, ResourceId};
use crate::scenario::ScenarioParameters;

/// Asked to form a party larger than the pool of unassigned members.
/// Signals a scenario defect; fatal to the run rather than quietly forming
/// a smaller party.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocationError {
    pub requested: usize,
    pub unassigned: usize,
}

impl fmt::Display for AllocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cannot allocate a party of {} from {} unassigned members",
            self.requested, self.unassigned
        )
    }
}

/// The whole population: owns every person and every party. Parties refer to
/// members by index.
#[derive(Debug, Clone, Default)]
pub struct Group {
    pub members: Vec<Person>,
    pub parties: Vec<Party>,
    excess_meat: f64,
    excess_plants: f64,
    total_gathered: BTreeMap<ResourceId, u64>,
    pub days_survived: u32,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_members(count: usize) -> Self {
        Self {
            members: vec![Person::new(); count],
            ..Self::default()
        }
    }

    /// Calories of meat banked beyond daily needs over the whole run.
    pub fn excess_meat(&self) -> f64 {
        self.excess_meat
    }

    /// Calories of plants banked beyond daily needs over the whole run.
    pub fn excess_plants(&self) -> f64 {
        self.excess_plants
    }

    /// Cumulative per-resource unit counts harvested over the run.
    pub fn total_gathered(&self) -> &BTreeMap<ResourceId, u64> {
        &self.total_gathered
    }

    pub fn allocated_members(&self) -> usize {
        self.parties.iter().map(Party::size).sum()
    }

    /// Forms a new hunting or gathering party from unassigned members.
    pub fn allocate_party(&mut self, size: usize, hunting: bool) -> Result<(), AllocationError> {
        let unassigned = self.members.len() - self.allocated_members();
        if unassigned < size {
            return Err(AllocationError {
                requested: size,
                unassigned,
            });
        }

        let mut party = Party::new(hunting);
        for index in 0..self.members.len() {
            if !self.members[index].in_party {
                party.add_member(index, &mut self.members);
            }
            if party.size() == size {
                break;
            }
        }
        self.parties.push(party);
        Ok(())
    }

    /// Daily calorie redistribution. Runs exactly once per simulated day,
    /// after the minute loop and before the day-boundary resets.
    ///
    /// Meat and plant pools are the calorie value of the hunting and
    /// gathering parties' loads. Everyone starts from an equal share; shares
    /// above need are reclaimed and clipped to need, then the reclaimed pool
    /// tops up members still short, partially when it runs dry. Whatever is
    /// left is banked as long-lived excess. Every member is then fed their
    /// final share.
    pub fn feed_group(
        &mut self,
        catalog: &ResourceCatalog,
        params: &ScenarioParameters,
    ) -> Result<(), Starvation> {
        let mut pool_meat = 0.0;
        let mut pool_plants = 0.0;
        for party in &self.parties {
            if party.is_hunting() {
                pool_meat += party.current_cals(catalog);
            } else {
                pool_plants += party.current_cals(catalog);
            }
        }

        let count = self.members.len();
        let share_meat = pool_meat / count as f64;
        let share_plants = pool_plants / count as f64;

        let mut shares_meat = vec![share_meat; count];
        let mut shares_plants = vec![share_plants; count];
        let mut spare_meat = 0.0;
        let mut spare_plants = 0.0;

        // Reclaim anything above need into the redistribution pool.
        for (i, member) in self.members.iter().enumerate() {
            let need_meat = member.meat_needed(params);
            if need_meat < share_meat {
                spare_meat += share_meat - need_meat;
                shares_meat[i] = need_meat;
            }
            let need_plants = member.plants_needed(params);
            if need_plants < share_plants {
                spare_plants += share_plants - need_plants;
                shares_plants[i] = need_plants;
            }
        }

        // Top up members still short, as far as the reclaimed pool goes.
        for (i, member) in self.members.iter().enumerate() {
            let need_meat = member.meat_needed(params);
            if need_meat > shares_meat[i] {
                let missing = need_meat - shares_meat[i];
                if spare_meat >= missing {
                    spare_meat -= missing;
                    shares_meat[i] = need_meat;
                } else {
                    shares_meat[i] += spare_meat;
                    spare_meat = 0.0;
                }
            }
            let need_plants = member.plants_needed(params);
            if need_plants > shares_plants[i] {
                let missing = need_plants - shares_plants[i];
                if spare_plants >= missing {
                    spare_plants -= missing;
                    shares_plants[i] = need_plants;
                } else {
                    shares_plants[i] += spare_plants;
                    spare_plants = 0.0;
                }
            }
        }

        self.excess_meat += spare_meat;
        self.excess_plants += spare_plants;

        for (i, member) in self.members.iter_mut().enumerate() {
            member.feed(shares_meat[i], shares_plants[i], params)?;
        }
        Ok(())
    }

    /// Folds every party's load into the cumulative harvest as whole units,
    /// clearing party inventories.
    pub fn bank_harvest(&mut self, catalog: &ResourceCatalog) {
        for party in &mut self.parties {
            for (id, pounds) in party.drain_obtained() {
                let units = (pounds / catalog.resource(id).weight).ceil() as u64;
                *self.total_gathered.entry(id).or_insert(0) += units;
            }
        }
    }

    /// The worst lifetime deficient-day count over all members.
    pub fn max_days_deficient(&self) -> u32 {
        self.members
            .iter()
            .map(|m| m.days_deficient)
            .max()
            .unwrap_or(0)
    }
}
