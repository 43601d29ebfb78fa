//! JSON serialization types for parsed MusicXML note data
//!
//! Used by the `mxl2json` inspection tool to dump the exact sequences the
//! chains would train on.

use super::reader::TrainingPart;
use serde::Serialize;

/// Top-level JSON structure for a score's training data
#[derive(Debug, Clone, Serialize)]
pub struct ScoreJson {
    pub parts: Vec<PartJson>,
}

/// One part's note list
#[derive(Debug, Clone, Serialize)]
pub struct PartJson {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub notes: Vec<NoteJson>,
}

/// One pitched note
#[derive(Debug, Clone, Serialize)]
pub struct NoteJson {
    pub step: char,
    #[serde(skip_serializing_if = "is_zero")]
    pub alter: i32,
    pub octave: i32,
    pub midi: i32,
    pub duration_type: String,
}

impl PartJson {
    pub fn new(part: &TrainingPart) -> Self {
        let notes = part
            .pitches
            .iter()
            .zip(&part.durations)
            .map(|(pitch, duration_type)| NoteJson {
                step: pitch.step.letter(),
                alter: pitch.alter,
                octave: pitch.octave,
                midi: pitch.midi(),
                duration_type: duration_type.name().to_string(),
            })
            .collect();
        Self {
            id: part.id.clone(),
            name: part.name.clone(),
            notes,
        }
    }
}

fn is_zero(value: &i32) -> bool {
    *value == 0
}
