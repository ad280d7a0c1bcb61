use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A timestamped search milestone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub timestamp: DateTime<Utc>,
    pub generation: u32,
    pub event_type: EventType,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EventType {
    SeedFound {
        attempts: u32,
        score: f64,
        days_survived: u32,
    },
    EliteReplaced {
        score: f64,
        days_survived: u32,
        source: CandidateSource,
    },
    GenerationCompleted {
        best_score: f64,
    },
    SearchCompleted {
        best_score: f64,
        generations: u32,
    },
}

/// How a candidate entered the pool.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum CandidateSource {
    Mutation,
    Fresh,
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[gen {}] ", self.generation)?;
        match &self.event_type {
            EventType::SeedFound {
                attempts,
                score,
                days_survived,
            } => write!(
                f,
                "Seed found after {} attempts (score {}, {} days)",
                attempts, score, days_survived
            ),
            EventType::EliteReplaced {
                score,
                days_survived,
                source,
            } => write!(
                f,
                "Elite replaced by {:?} candidate (score {}, {} days)",
                source, score, days_survived
            ),
            EventType::GenerationCompleted { best_score } => {
                write!(f, "Generation complete, best score {}", best_score)
            }
            EventType::SearchCompleted {
                best_score,
                generations,
            } => write!(
                f,
                "Search complete after {} generations, best score {}",
                generations, best_score
            ),
        }
    }
}

#[derive(Default)]
pub struct EventLogger {
    events: Vec<Event>,
}

impl EventLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, generation: u32, event_type: EventType) {
        self.events.push(Event {
            timestamp: Utc::now(),
            generation,
            event_type,
        });
    }

    pub fn get_events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn save_to_file(&self, path: &Path) -> Result<(), String> {
        let json = serde_json::to_string_pretty(&self.events)
            .map_err(|e| format!("failed to serialize events: {}", e))?;
        std::fs::write(path, json).map_err(|e| format!("failed to write {}: {}", path.display(), e))
    }

    pub fn load_from_file(path: &Path) -> Result<Self, String> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
        let events: Vec<Event> = serde_json::from_str(&json)
            .map_err(|e| format!("failed to parse {}: {}", path.display(), e))?;
        Ok(Self { events })
    }
}
