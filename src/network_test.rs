#[cfg(test)]
mod tests {
    use crate::network::{
        Decision, DecisionNetwork, ENGAGE_THRESHOLD, INPUT_COUNT, Observation, RETURN_THRESHOLD,
    };
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// A network that passes `party_size` straight through to the output.
    fn passthrough() -> DecisionNetwork {
        let mut weights = [0.0; INPUT_COUNT];
        weights[0] = 1.0;
        DecisionNetwork::from_weights(weights)
    }

    fn observe(party_size: f64) -> Observation {
        Observation {
            party_size,
            ..Observation::default()
        }
    }

    #[test]
    fn test_activation_bands_are_monotonic_three_way() {
        let mut net = passthrough();

        assert_eq!(net.decide(&observe(0.0)), Decision::Ignore);
        assert_eq!(net.decide(&observe(999.9)), Decision::Ignore);
        assert_eq!(net.decide(&observe(ENGAGE_THRESHOLD)), Decision::Engage);
        assert_eq!(net.decide(&observe(9_999.9)), Decision::Engage);
        assert_eq!(net.decide(&observe(RETURN_THRESHOLD)), Decision::Return);
        assert_eq!(net.decide(&observe(1e9)), Decision::Return);
    }

    #[test]
    fn test_decision_sums_weighted_inputs() {
        let mut weights = [0.0; INPUT_COUNT];
        weights[4] = 20.0; // resource_calories
        weights[8] = 500.0; // resource_success
        let mut net = DecisionNetwork::from_weights(weights);

        let mut observation = Observation::default();
        observation.resource_calories = 100.0;
        observation.resource_success_rate = 1.0;
        // 20 * 100 + 500 * 1 = 2500: engage.
        assert_eq!(net.decide(&observation), Decision::Engage);

        // With nothing sighted every resource slot reads zero.
        assert_eq!(net.decide(&Observation::default()), Decision::Ignore);
    }

    #[test]
    fn test_random_weights_start_in_unit_interval() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..100 {
            let net = DecisionNetwork::random(&mut rng);
            for weight in net.weights() {
                assert!((0.0..1.0).contains(&weight));
            }
        }
    }

    #[test]
    fn test_mutation_factors_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        let parent = DecisionNetwork::random(&mut rng);
        let parent_weights = parent.weights();

        let mut grew = 0;
        let mut shrank = 0;
        for _ in 0..200 {
            let child = parent.mutate(&mut rng);
            for (child_weight, parent_weight) in child.weights().iter().zip(parent_weights) {
                let factor = child_weight / parent_weight;
                // Up draws land in [1.0, 2.2), down draws in [0.8, 2.0).
                assert!(
                    factor > 0.8 - 1e-9 && factor < 2.2,
                    "mutation factor {} out of range",
                    factor
                );
                if factor > 1.0 {
                    grew += 1;
                } else {
                    shrank += 1;
                }
            }
        }
        // Both directions must show up; the overlapping ranges mean growth
        // dominates, but shrinking stays possible.
        assert!(grew > 0);
        assert!(shrank > 0);
    }

    #[test]
    fn test_mutation_leaves_parent_untouched() {
        let mut rng = StdRng::seed_from_u64(5);
        let parent = DecisionNetwork::random(&mut rng);
        let before = parent.weights();
        let _child = parent.mutate(&mut rng);
        assert_eq!(parent.weights(), before);
    }

    #[test]
    fn test_weights_roundtrip() {
        let weights = [0.5, 1.5, 2.5, 3.5, 4.5, 5.5, 6.5, 7.5, 8.5];
        let net = DecisionNetwork::from_weights(weights);
        assert_eq!(net.weights(), weights);
    }
}
