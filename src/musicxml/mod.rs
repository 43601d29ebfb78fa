//! MusicXML reading and writing

pub mod json;
pub mod reader;
pub mod writer;

pub use json::{NoteJson, PartJson, ScoreJson};
pub use reader::{TrainingPart, TrainingScore};
pub use writer::{render, write_file};
