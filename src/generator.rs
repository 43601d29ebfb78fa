//! End-to-end generation pipeline
//!
//! Trains one Markov chain on the pitches and one on the duration types of a
//! MusicXML part, samples a new sequence from each, and encodes the result
//! into a fresh score.

use crate::error::{Error, Result};
use crate::model::MarkovChain;
use crate::musicxml::{writer, TrainingScore};
use crate::score::{encode, select_divisions, Duration};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs;
use std::io::Read;
use std::path::Path;

pub const DEFAULT_ORDER: usize = 4;

/// Generation settings. `Default` matches the CLI defaults.
#[derive(Debug, Clone)]
pub struct Generator {
    /// Markov chain order for both chains.
    pub markov_order: usize,
    /// RNG seed; a fresh OS seed when absent.
    pub seed: Option<u64>,
    /// Training part id; the first part when absent.
    pub part: Option<String>,
    /// Cap on the number of training notes.
    pub training_limit: Option<usize>,
    /// Part name written into the output score.
    pub part_name: Option<String>,
}

/// What a generation run produced, for reporting.
#[derive(Debug, Clone)]
pub struct GenerateReport {
    pub part_id: String,
    pub part_name: String,
    pub training_notes: usize,
    pub generated_notes: usize,
    pub divisions_per_quarter: u32,
    pub measures: usize,
}

impl Default for Generator {
    fn default() -> Self {
        Self {
            markov_order: DEFAULT_ORDER,
            seed: None,
            part: None,
            training_limit: None,
            part_name: None,
        }
    }
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Train on a score read from `input` and write a generated score to
    /// `output`.
    pub fn generate<R: Read>(&self, mut input: R, output: &Path) -> Result<GenerateReport> {
        let mut text = String::new();
        input.read_to_string(&mut text)?;
        self.generate_str(&text, output)
    }

    /// Train on a score file and write a generated score to `output`.
    pub fn generate_file(&self, input: &Path, output: &Path) -> Result<GenerateReport> {
        let text = fs::read_to_string(input)?;
        self.generate_str(&text, output)
    }

    fn generate_str(&self, text: &str, output: &Path) -> Result<GenerateReport> {
        let score = TrainingScore::parse(text)?;
        let mut part = score.read_part(self.part.as_deref())?;
        if let Some(limit) = self.training_limit {
            part.pitches.truncate(limit);
            part.durations.truncate(limit);
        }

        let mut pitch_chain = MarkovChain::new(self.markov_order);
        pitch_chain.train(&part.pitches);
        let mut duration_chain = MarkovChain::new(self.markov_order);
        duration_chain.train(&part.durations);
        if pitch_chain.is_empty() || duration_chain.is_empty() {
            return Err(Error::EmptyTraining);
        }

        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let pitches = pitch_chain.generate(&mut rng);
        let duration_types = duration_chain.generate_exact(pitches.len(), &mut rng);

        let divisions_per_quarter = select_divisions(&duration_types);
        let durations: Vec<Duration> = duration_types
            .iter()
            .map(|duration_type| Duration::plain(*duration_type))
            .collect();
        let encoded = encode(&pitches, &durations, divisions_per_quarter)?;

        let part_name = self
            .part_name
            .clone()
            .unwrap_or_else(|| format!("Markov chain degree {}", self.markov_order));
        writer::write_file(&encoded, &part_name, output)?;

        Ok(GenerateReport {
            part_id: part.id,
            part_name: part.name,
            training_notes: part.pitches.len(),
            generated_notes: pitches.len(),
            divisions_per_quarter,
            measures: encoded.measures.len(),
        })
    }
}
