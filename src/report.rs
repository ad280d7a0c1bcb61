//! Console reporting for search results.

use std::collections::BTreeMap;
use std::fmt;

use crate::network::INPUT_NAMES;
use crate::resource::{ResourceCatalog, ResourceId};
use crate::search::{EliteSnapshot, SearchOutcome};

/// Per-resource harvest totals with each resource's share of its category's
/// foraged calories.
pub struct HarvestBreakdown {
    rows: Vec<HarvestRow>,
}

struct HarvestRow {
    name: String,
    animal: bool,
    units: u64,
    percent_of_category: f64,
}

impl HarvestBreakdown {
    pub fn new(catalog: &ResourceCatalog, gathered: &BTreeMap<ResourceId, u64>) -> Self {
        let mut animal_cals = 0.0;
        let mut plant_cals = 0.0;
        for (&id, &units) in gathered {
            let resource = catalog.resource(id);
            let cals = f64::from(resource.calories) * units as f64;
            if resource.animal {
                animal_cals += cals;
            } else {
                plant_cals += cals;
            }
        }

        let rows = gathered
            .iter()
            .map(|(&id, &units)| {
                let resource = catalog.resource(id);
                let cals = f64::from(resource.calories) * units as f64;
                let category_total = if resource.animal {
                    animal_cals
                } else {
                    plant_cals
                };
                let percent_of_category = if category_total > 0.0 {
                    cals / category_total * 100.0
                } else {
                    0.0
                };
                HarvestRow {
                    name: resource.name.clone(),
                    animal: resource.animal,
                    units,
                    percent_of_category,
                }
            })
            .collect();

        Self { rows }
    }
}

impl fmt::Display for HarvestBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rows.is_empty() {
            return writeln!(f, "  (nothing gathered)");
        }
        for row in &self.rows {
            writeln!(
                f,
                "  {}: {} units, {:.1}% of foraged {} kcals",
                row.name,
                row.units,
                row.percent_of_category,
                if row.animal { "meat" } else { "plant" }
            )?;
        }
        Ok(())
    }
}

/// Printed once the seed phase lands an initial elite.
pub fn print_seed_report(seed: &EliteSnapshot, attempts: u32, catalog: &ResourceCatalog) {
    println!("Found initial policy after {} attempts.", attempts);
    println!("Score: {}", seed.score);
    println!("Days survived: {}", seed.report.days_survived);
    println!("Weightings:");
    for (name, weight) in INPUT_NAMES.iter().zip(seed.network.weights()) {
        println!("  {}: {}", name, weight);
    }
    println!("Initial policy harvest:");
    print!(
        "{}",
        HarvestBreakdown::new(catalog, &seed.report.total_gathered)
    );
    println!();
}

/// Printed after the full search.
pub fn print_final_report(outcome: &SearchOutcome, catalog: &ResourceCatalog) {
    let best = &outcome.best;
    println!("Best score: {}", best.score);
    println!("Days survived: {}", best.report.days_survived);
    println!(
        "Excess calories banked: {:.0} meat, {:.0} plant",
        best.report.excess_meat, best.report.excess_plants
    );
    println!(
        "Worst deficient-day count: {}",
        best.report.max_days_deficient
    );
    println!("Best policy harvest:");
    print!(
        "{}",
        HarvestBreakdown::new(catalog, &best.report.total_gathered)
    );
}
