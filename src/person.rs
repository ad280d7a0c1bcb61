use std::fmt;

use crate::scenario::ScenarioParameters;

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Consecutive deficient days at which a person is deemed to have starved.
pub const STARVATION_THRESHOLD: u32 = 20;

/// Raised when a member's deficient streak reaches the starvation threshold.
/// Ends the current simulation run, not the surrounding search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Starvation;

impl fmt::Display for Starvation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a member of the group has starved")
    }
}

/// One member of the hunter-gatherer group.
#[derive(Debug, Clone, Default)]
pub struct Person {
    /// Lifetime count of calorie-deficient days; never decremented.
    pub days_deficient: u32,
    /// Consecutive deficient days; resets only on a fully-met day.
    pub deficient_streak: u32,
    pub in_party: bool,
    /// Minutes spent foraging today; reset at the day boundary.
    pub minutes_foraged: u32,
}

impl Person {
    pub fn new() -> Self {
        Self::default()
    }

    fn daily_burn(&self, params: &ScenarioParameters) -> f64 {
        let foraging = self.minutes_foraged * params.cals_burned_foraging;
        let resting = (MINUTES_PER_DAY - self.minutes_foraged) * params.cals_burned_at_rest;
        f64::from(foraging + resting)
    }

    /// Calories of meat this person needs today.
    pub fn meat_needed(&self, params: &ScenarioParameters) -> f64 {
        self.daily_burn(params) * params.meat_ratio
    }

    /// Calories of plants this person needs today.
    pub fn plants_needed(&self, params: &ScenarioParameters) -> f64 {
        self.daily_burn(params) * (1.0 - params.meat_ratio)
    }

    /// Pounds this person can carry. Degrades 5% per consecutive deficient
    /// day.
    pub fn carry_weight(&self, params: &ScenarioParameters) -> f64 {
        f64::from(params.max_weight) * (1.0 - f64::from(self.deficient_streak) * 0.05)
    }

    /// Feeds this person their daily share. A share below need on either
    /// pool marks the day deficient; meeting both resets the streak.
    pub fn feed(
        &mut self,
        cals_meat: f64,
        cals_plants: f64,
        params: &ScenarioParameters,
    ) -> Result<(), Starvation> {
        if cals_meat < self.meat_needed(params) || cals_plants < self.plants_needed(params) {
            self.deficient_day()
        } else {
            self.deficient_streak = 0;
            Ok(())
        }
    }

    fn deficient_day(&mut self) -> Result<(), Starvation> {
        self.days_deficient += 1;
        self.deficient_streak += 1;
        if self.deficient_streak >= STARVATION_THRESHOLD {
            Err(Starvation)
        } else {
            Ok(())
        }
    }
}
