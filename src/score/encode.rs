//! Measure-filling encoder
//!
//! Packs a parallel (pitch, duration) sequence into 4/4 measures. A note that
//! would overflow the current measure is split at the barline: the part that
//! fits is placed now and the remainder is re-enqueued as continuation
//! fragments of the same note, tied across the barline. Division counts that
//! match no single symbol are likewise expanded into tied fragments.

use super::duration::{divisions_to_durations, Duration};
use super::pitch::Pitch;
use crate::error::{Error, Result};
use std::collections::VecDeque;

/// Time signature is fixed at 4/4.
pub const BEATS: u32 = 4;
pub const BEAT_TYPE: u32 = 4;

/// One notation-ready note fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    pub pitch: Pitch,
    /// Duration in divisions at the score's resolution.
    pub divisions: u32,
    pub duration: Duration,
    /// This fragment continues into the next fragment of the same note.
    pub tie_start: bool,
    /// This fragment continues a previous fragment of the same note.
    pub tie_end: bool,
}

pub type Measure = Vec<NoteRecord>;

/// An encoded piece: measure-grouped note records plus the header constants
/// the serializer needs.
#[derive(Debug, Clone)]
pub struct Score {
    pub divisions_per_quarter: u32,
    pub beats: u32,
    pub beat_type: u32,
    pub measures: Vec<Measure>,
}

impl Score {
    /// Division capacity of one measure.
    pub fn measure_capacity(&self) -> u32 {
        measure_capacity(self.divisions_per_quarter)
    }

    /// Total number of note records across all measures.
    pub fn note_count(&self) -> usize {
        self.measures.iter().map(Vec::len).sum()
    }
}

fn measure_capacity(divisions_per_quarter: u32) -> u32 {
    4 * divisions_per_quarter * BEATS / BEAT_TYPE
}

/// Encode a (pitch, duration) sequence into full measures at the given
/// resolution.
///
/// Every measure except possibly the last sums exactly to the measure
/// capacity; the final measure is left partial rather than padded with rests.
/// Any duration not representable at the resolution aborts the whole
/// encoding.
pub fn encode(pitches: &[Pitch], durations: &[Duration], divisions_per_quarter: u32) -> Result<Score> {
    if pitches.len() != durations.len() {
        return Err(Error::LengthMismatch {
            pitches: pitches.len(),
            durations: durations.len(),
        });
    }

    let capacity = measure_capacity(divisions_per_quarter);
    let mut queue: VecDeque<(Pitch, Duration)> = pitches
        .iter()
        .copied()
        .zip(durations.iter().copied())
        .collect();

    let mut measures: Vec<Measure> = Vec::new();
    let mut current: Measure = Vec::new();
    let mut running_sum = capacity;
    // How many upcoming fragments open a tie, and how many close one.
    let mut tie_start_pending = 0u32;
    let mut tie_end_pending = 0u32;

    while let Some((pitch, duration)) = queue.pop_front() {
        if running_sum == capacity {
            if !current.is_empty() {
                measures.push(std::mem::take(&mut current));
            }
            running_sum = 0;
        }

        let mut div = duration.to_divisions(divisions_per_quarter)?;

        // Split at the barline: keep what fits, push the tail back onto the
        // queue as tied continuation fragments of the same note.
        if capacity - running_sum < div {
            let fit = capacity - running_sum;
            let remainder = div - fit;
            for tail in divisions_to_durations(remainder, divisions_per_quarter)?
                .into_iter()
                .rev()
            {
                queue.push_front((pitch, tail));
                tie_start_pending += 1;
            }
            div = fit;
        }

        // The fitted count itself may not be one clean symbol; place the
        // first fragment now and re-enqueue the rest.
        let mut parts = divisions_to_durations(div, divisions_per_quarter)?;
        let duration = parts.remove(0);
        div = duration.to_divisions(divisions_per_quarter)?;
        for tail in parts.into_iter().rev() {
            queue.push_front((pitch, tail));
            tie_start_pending += 1;
        }

        let tie_end = tie_end_pending > 0;
        if tie_end {
            tie_end_pending -= 1;
        }
        let tie_start = tie_start_pending > 0;
        if tie_start {
            tie_start_pending -= 1;
            // The next fragment of this chain must close the tie we open.
            tie_end_pending += 1;
        }

        current.push(NoteRecord {
            pitch,
            divisions: div,
            duration,
            tie_start,
            tie_end,
        });
        running_sum += div;
    }

    if !current.is_empty() {
        measures.push(current);
    }

    Ok(Score {
        divisions_per_quarter,
        beats: BEATS,
        beat_type: BEAT_TYPE,
        measures,
    })
}
