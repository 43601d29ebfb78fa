use crate::score::duration::Duration;
use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("XML error: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("Malformed score: {0}")]
    Parse(String),

    #[error("Unsupported note duration type \"{0}\"")]
    UnknownDurationType(String),

    #[error("Unknown pitch step \"{0}\"")]
    UnknownStep(String),

    #[error("Part \"{0}\" not found in score")]
    UnknownPart(String),

    #[error("Not enough training notes to build the Markov chains")]
    EmptyTraining,

    #[error("{duration} notes are not representable with {divisions_per_quarter} divisions per quarter note")]
    UnrepresentableDuration {
        duration: Duration,
        divisions_per_quarter: u32,
    },

    #[error("Duration of {divisions} divisions is outside the range 1..={max}")]
    DurationOutOfRange { divisions: u32, max: u32 },

    #[error("No combination of note types sums to {divisions} divisions with {divisions_per_quarter} divisions per quarter note")]
    UndecomposableDuration {
        divisions: u32,
        divisions_per_quarter: u32,
    },

    #[error("Note sequence and duration sequence must be of the same length ({pitches} notes, {durations} durations)")]
    LengthMismatch { pitches: usize, durations: usize },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
