//! The minimal decision network driving party behavior.
//!
//! Nine observed inputs feed one thresholded output unit through one weighted
//! connection each. The weight vector is the genome the policy search
//! perturbs; nothing here is trained by gradient.

use rand::Rng;

/// Input slots in wire order. Resource slots read zero when nothing was
/// sighted this minute.
pub const INPUT_NAMES: [&str; 9] = [
    "party_size",
    "current_weight",
    "current_cals",
    "current_time",
    "resource_calories",
    "resource_gather_time",
    "resource_process_time",
    "resource_weight",
    "resource_success",
];

pub const INPUT_COUNT: usize = INPUT_NAMES.len();

/// Weighted sums below this read as `Ignore`.
pub const ENGAGE_THRESHOLD: f64 = 1_000.0;
/// Weighted sums at or above this read as `Return`; between the two, `Engage`.
pub const RETURN_THRESHOLD: f64 = 10_000.0;

/// What a party does with the current minute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Ignore,
    Engage,
    Return,
}

impl Decision {
    /// Three-way threshold over the output unit's weighted input sum.
    pub fn from_activation(sum: f64) -> Self {
        if sum < ENGAGE_THRESHOLD {
            Decision::Ignore
        } else if sum < RETURN_THRESHOLD {
            Decision::Engage
        } else {
            Decision::Return
        }
    }
}

/// One minute's observed state, as presented to the network.
#[derive(Debug, Clone, Copy, Default)]
pub struct Observation {
    pub party_size: f64,
    pub current_weight: f64,
    pub current_cals: f64,
    pub minute_of_day: f64,
    pub resource_calories: f64,
    pub resource_gather_time: f64,
    pub resource_process_time: f64,
    pub resource_weight: f64,
    pub resource_success_rate: f64,
}

impl Observation {
    fn as_inputs(&self) -> [f64; INPUT_COUNT] {
        [
            self.party_size,
            self.current_weight,
            self.current_cals,
            self.minute_of_day,
            self.resource_calories,
            self.resource_gather_time,
            self.resource_process_time,
            self.resource_weight,
            self.resource_success_rate,
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NeuronKind {
    /// Holds the value loaded from the current observation.
    Fixed(f64),
    /// Computed from its input connections.
    Computed,
}

#[derive(Debug, Clone)]
pub struct Neuron {
    pub name: &'static str,
    pub kind: NeuronKind,
}

/// A weighted edge between two neurons, by index into the network's arena.
#[derive(Debug, Clone)]
pub struct Connection {
    pub from: usize,
    pub to: usize,
    pub weight: f64,
}

/// The evaluator under search: a flat arena of neurons and connections,
/// nine inputs wired straight to one output unit.
#[derive(Debug, Clone)]
pub struct DecisionNetwork {
    neurons: Vec<Neuron>,
    connections: Vec<Connection>,
}

impl DecisionNetwork {
    fn with_weights(weights: [f64; INPUT_COUNT]) -> Self {
        let mut neurons: Vec<Neuron> = INPUT_NAMES
            .iter()
            .map(|&name| Neuron {
                name,
                kind: NeuronKind::Fixed(0.0),
            })
            .collect();
        let output = neurons.len();
        neurons.push(Neuron {
            name: "choice",
            kind: NeuronKind::Computed,
        });

        let connections = weights
            .iter()
            .enumerate()
            .map(|(from, &weight)| Connection {
                from,
                to: output,
                weight,
            })
            .collect();

        Self {
            neurons,
            connections,
        }
    }

    /// A candidate with independently uniform weights in `[0, 1)`.
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let mut weights = [0.0; INPUT_COUNT];
        for weight in &mut weights {
            *weight = rng.random::<f64>();
        }
        Self::with_weights(weights)
    }

    pub fn from_weights(weights: [f64; INPUT_COUNT]) -> Self {
        Self::with_weights(weights)
    }

    /// A perturbed clone. Per weight: a fair coin picks the "up" factor,
    /// uniform in `[1.0, 2.2)`, or the "down" factor, uniform in
    /// `[0.8, 2.0)`. The ranges overlap and both can grow a weight; this
    /// mirrors the reference behavior and is kept as-is.
    pub fn mutate<R: Rng>(&self, rng: &mut R) -> Self {
        let mut mutation = self.clone();
        for connection in &mut mutation.connections {
            let factor = if rng.random_bool(0.5) {
                rng.random_range(1.0..2.2)
            } else {
                rng.random_range(0.8..2.0)
            };
            connection.weight *= factor;
        }
        mutation
    }

    /// Weight per input slot, in [`INPUT_NAMES`] order.
    pub fn weights(&self) -> [f64; INPUT_COUNT] {
        let mut weights = [0.0; INPUT_COUNT];
        for connection in &self.connections {
            weights[connection.from] = connection.weight;
        }
        weights
    }

    fn value(&self, index: usize) -> f64 {
        match self.neurons[index].kind {
            NeuronKind::Fixed(value) => value,
            NeuronKind::Computed => 0.0,
        }
    }

    /// Loads the observation into the input neurons and thresholds the
    /// output unit's weighted sum into a decision.
    pub fn decide(&mut self, observation: &Observation) -> Decision {
        for (neuron, value) in self.neurons.iter_mut().zip(observation.as_inputs()) {
            neuron.kind = NeuronKind::Fixed(value);
        }

        let sum: f64 = self
            .connections
            .iter()
            .map(|c| self.value(c.from) * c.weight)
            .sum();
        Decision::from_activation(sum)
    }
}
