//! Pitch values

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// The seven natural letter names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl Step {
    /// Semitone offset of the natural letter within an octave.
    pub fn semitone_offset(self) -> i32 {
        match self {
            Step::C => 0,
            Step::D => 2,
            Step::E => 4,
            Step::F => 5,
            Step::G => 7,
            Step::A => 9,
            Step::B => 11,
        }
    }

    /// Letter as it appears in a MusicXML `<step>` element.
    pub fn letter(self) -> char {
        match self {
            Step::C => 'C',
            Step::D => 'D',
            Step::E => 'E',
            Step::F => 'F',
            Step::G => 'G',
            Step::A => 'A',
            Step::B => 'B',
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim() {
            "C" => Ok(Step::C),
            "D" => Ok(Step::D),
            "E" => Ok(Step::E),
            "F" => Ok(Step::F),
            "G" => Ok(Step::G),
            "A" => Ok(Step::A),
            "B" => Ok(Step::B),
            other => Err(Error::UnknownStep(other.to_string())),
        }
    }
}

/// A single note's pitch: natural letter name, octave, and a signed semitone
/// alteration (sharps positive, flats negative).
///
/// Equality, ordering, and hashing all go through [`Pitch::midi`], so
/// enharmonic spellings (C#4 and Db4) compare equal.
#[derive(Debug, Clone, Copy)]
pub struct Pitch {
    pub step: Step,
    pub octave: i32,
    pub alter: i32,
}

impl Pitch {
    pub fn new(step: Step, octave: i32) -> Self {
        Self::with_alter(step, octave, 0)
    }

    pub fn with_alter(step: Step, octave: i32, alter: i32) -> Self {
        Self {
            step,
            octave,
            alter,
        }
    }

    /// MIDI note number (C4 = 60, A4 = 69).
    pub fn midi(&self) -> i32 {
        (self.octave + 1) * 12 + self.step.semitone_offset() + self.alter
    }
}

impl PartialEq for Pitch {
    fn eq(&self, other: &Self) -> bool {
        self.midi() == other.midi()
    }
}

impl Eq for Pitch {}

impl PartialOrd for Pitch {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Pitch {
    /// A pitch is greater than another when it sounds higher.
    fn cmp(&self, other: &Self) -> Ordering {
        self.midi().cmp(&other.midi())
    }
}

impl Hash for Pitch {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.midi().hash(state);
    }
}

impl fmt::Display for Pitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.step.letter())?;
        if self.alter >= 0 {
            for _ in 0..self.alter {
                write!(f, "#")?;
            }
        } else {
            for _ in 0..-self.alter {
                write!(f, "b")?;
            }
        }
        write!(f, "{}", self.octave)
    }
}
