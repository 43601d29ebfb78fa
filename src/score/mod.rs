//! The duration-to-notation codec: pitch values, division arithmetic, and the
//! measure-filling encoder.

pub mod duration;
pub mod encode;
pub mod pitch;

pub use duration::{divisions_to_durations, select_divisions, Duration, DurationType};
pub use encode::{encode, Measure, NoteRecord, Score};
pub use pitch::{Pitch, Step};
