#[cfg(test)]
mod tests {
    use crate::group::Group;
    use crate::person::{Person, STARVATION_THRESHOLD, Starvation};
    use crate::resource::{Resource, ResourceCatalog, ResourceId};
    use crate::scenario::ScenarioParameters;

    const HARE: ResourceId = ResourceId(0);
    const TUBERS: ResourceId = ResourceId(1);

    /// hare: 300 kcal/lb animal, tubers: 100 kcal/lb plant.
    fn catalog() -> ResourceCatalog {
        ResourceCatalog::new(vec![
            Resource {
                name: "hare".to_string(),
                calories: 900,
                animal: true,
                gather_time: 0,
                process_time: 0,
                encounter_rate: 30,
                weight: 3.0,
                success_rate: 1.0,
            },
            Resource {
                name: "tubers".to_string(),
                calories: 200,
                animal: false,
                gather_time: 0,
                process_time: 0,
                encounter_rate: 15,
                weight: 2.0,
                success_rate: 1.0,
            },
        ])
    }

    /// All-meat diet: a person at rest needs exactly 1440 meat kcal.
    fn params(num_people: usize) -> ScenarioParameters {
        ScenarioParameters {
            num_people,
            party_size: 1,
            num_parties: 1,
            days_to_run: 10,
            hours_to_run: 12,
            max_weight: 100,
            cals_burned_at_rest: 1,
            cals_burned_foraging: 3,
            meat_ratio: 1.0,
        }
    }

    /// A group whose single hunting party carries `pool / 300` pounds of
    /// hare, worth `pool` meat kcal.
    fn group_with_meat_pool(members: usize, pool: f64) -> (Group, ResourceCatalog) {
        let catalog = catalog();
        let mut group = Group::with_members(members);
        group
            .allocate_party(1, true)
            .expect("enough members for one party");
        group.parties[0].optimize_inventory(&catalog, HARE, pool / 300.0, 1e9);
        (group, catalog)
    }

    #[test]
    fn test_allocate_party_assigns_unassigned_members() {
        let mut group = Group::with_members(5);
        group.allocate_party(2, true).unwrap();
        group.allocate_party(2, false).unwrap();

        assert_eq!(group.allocated_members(), 4);
        assert!(group.parties[0].is_hunting());
        assert!(!group.parties[1].is_hunting());
        // No member sits in two parties.
        assert_eq!(group.parties[0].members, vec![0, 1]);
        assert_eq!(group.parties[1].members, vec![2, 3]);
        assert!(!group.members[4].in_party);
    }

    #[test]
    fn test_allocate_party_fails_loudly_when_overcommitted() {
        let mut group = Group::with_members(3);
        group.allocate_party(2, true).unwrap();

        let err = group.allocate_party(2, false).unwrap_err();
        assert_eq!(err.requested, 2);
        assert_eq!(err.unassigned, 1);
    }

    #[test]
    fn test_feed_group_banks_leftovers_after_everyone_is_fed() {
        // Needs: 1440 + 2880 + 1440 = 5760. Pool 6000 leaves 240 over.
        let (mut group, catalog) = group_with_meat_pool(3, 6000.0);
        let params = params(3);
        group.members[1].minutes_foraged = 720;

        group.feed_group(&catalog, &params).unwrap();

        assert!((group.excess_meat() - 240.0).abs() < 1e-9);
        assert_eq!(group.excess_plants(), 0.0);
        for member in &group.members {
            assert_eq!(member.deficient_streak, 0);
            assert_eq!(member.days_deficient, 0);
        }
    }

    #[test]
    fn test_feed_group_partial_grant_when_pool_runs_dry() {
        // Needs: 1440 + 2880 + 1440 = 5760 against a pool of 4500. The
        // equal share overfeeds the two resters by 60 each; the forager
        // gets those 120 kcal back but still comes up short.
        let (mut group, catalog) = group_with_meat_pool(3, 4500.0);
        let params = params(3);
        group.members[1].minutes_foraged = 720;

        group.feed_group(&catalog, &params).unwrap();

        // Nothing is banked: every reclaimed calorie was granted.
        assert!(group.excess_meat().abs() < 1e-9);
        assert_eq!(group.members[0].deficient_streak, 0);
        assert_eq!(group.members[1].deficient_streak, 1);
        assert_eq!(group.members[1].days_deficient, 1);
        assert_eq!(group.members[2].deficient_streak, 0);
    }

    #[test]
    fn test_feed_group_conservation_of_pool() {
        // Banked excess equals pool minus what members actually consumed.
        let (mut group, catalog) = group_with_meat_pool(2, 9000.0);
        let params = params(2);

        group.feed_group(&catalog, &params).unwrap();

        // Both members need 1440; everything else must land in the bank.
        let consumed = 2.0 * 1440.0;
        assert!((group.excess_meat() - (9000.0 - consumed)).abs() < 1e-9);
    }

    #[test]
    fn test_feed_group_empty_pool_marks_everyone_deficient() {
        let catalog = catalog();
        let mut group = Group::with_members(2);
        group.allocate_party(1, true).unwrap();
        let params = params(2);

        group.feed_group(&catalog, &params).unwrap();

        for member in &group.members {
            assert_eq!(member.deficient_streak, 1);
            assert_eq!(member.days_deficient, 1);
        }
    }

    #[test]
    fn test_feed_group_raises_starvation_at_threshold() {
        let catalog = catalog();
        let mut group = Group::with_members(1);
        group.allocate_party(1, true).unwrap();
        let params = params(1);
        group.members[0].deficient_streak = STARVATION_THRESHOLD - 1;

        let result = group.feed_group(&catalog, &params);
        assert_eq!(result, Err(Starvation));
    }

    #[test]
    fn test_deficient_streak_resets_only_on_a_fully_met_day() {
        let params = params(1);
        let mut person = Person::new();
        person.deficient_streak = 5;
        person.days_deficient = 5;

        // Meat met, plants met (all-meat ratio): streak resets, lifetime
        // counter stays.
        person.feed(1440.0, 0.0, &params).unwrap();
        assert_eq!(person.deficient_streak, 0);
        assert_eq!(person.days_deficient, 5);

        // One short day starts the streak over from one.
        person.feed(1439.0, 0.0, &params).unwrap();
        assert_eq!(person.deficient_streak, 1);
        assert_eq!(person.days_deficient, 6);
    }

    #[test]
    fn test_starvation_fires_exactly_at_twenty() {
        let params = params(1);
        let mut person = Person::new();
        person.deficient_streak = 18;

        // 19th consecutive short day: not starvation yet.
        assert!(person.feed(0.0, 0.0, &params).is_ok());
        assert_eq!(person.deficient_streak, 19);

        // 20th: starvation.
        assert_eq!(person.feed(0.0, 0.0, &params), Err(Starvation));
        assert_eq!(person.deficient_streak, 20);
    }

    #[test]
    fn test_carry_weight_degrades_with_streak() {
        let params = params(1);
        let mut person = Person::new();
        assert_eq!(person.carry_weight(&params), 100.0);

        person.deficient_streak = 6;
        assert_eq!(person.carry_weight(&params), 70.0);
    }

    #[test]
    fn test_needs_split_by_meat_ratio() {
        let mut params = params(1);
        params.meat_ratio = 0.25;
        let mut person = Person::new();
        person.minutes_foraged = 120;

        // burn = 120 * 3 + 1320 * 1 = 1680
        assert!((person.meat_needed(&params) - 420.0).abs() < 1e-9);
        assert!((person.plants_needed(&params) - 1260.0).abs() < 1e-9);
    }

    #[test]
    fn test_bank_harvest_rounds_pounds_up_to_units() {
        let catalog = catalog();
        let mut group = Group::with_members(2);
        group.allocate_party(1, true).unwrap();
        group.allocate_party(1, false).unwrap();

        group.parties[0].optimize_inventory(&catalog, HARE, 5.0, 1e9);
        group.parties[1].optimize_inventory(&catalog, TUBERS, 2.0, 1e9);
        group.bank_harvest(&catalog);

        // 5 lb of 3 lb hares is two animals' worth; 2 lb of tubers is one.
        assert_eq!(group.total_gathered().get(&HARE), Some(&2));
        assert_eq!(group.total_gathered().get(&TUBERS), Some(&1));
        assert_eq!(group.parties[0].current_weight(), 0.0);

        // The next day's haul accumulates.
        group.parties[0].optimize_inventory(&catalog, HARE, 3.0, 1e9);
        group.bank_harvest(&catalog);
        assert_eq!(group.total_gathered().get(&HARE), Some(&3));
    }
}
