//! Duration symbols and division arithmetic
//!
//! Durations exist in two forms: symbolically (quarter, dotted half, ...) and
//! as integer division counts at a fixed divisions-per-quarter resolution.
//! This module maps between the two in both directions; the inverse direction
//! falls back to a greedy largest-first decomposition when no single symbol
//! matches, producing a chain of fragments the encoder will tie together.

use crate::error::{Error, Result};
use std::fmt;

/// The six canonical note duration names, shortest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DurationType {
    ThirtySecond,
    Sixteenth,
    Eighth,
    Quarter,
    Half,
    Whole,
}

impl DurationType {
    pub const ALL: [DurationType; 6] = [
        DurationType::ThirtySecond,
        DurationType::Sixteenth,
        DurationType::Eighth,
        DurationType::Quarter,
        DurationType::Half,
        DurationType::Whole,
    ];

    /// Name as it appears in a MusicXML `<type>` element.
    pub fn name(self) -> &'static str {
        match self {
            DurationType::ThirtySecond => "32nd",
            DurationType::Sixteenth => "16th",
            DurationType::Eighth => "eighth",
            DurationType::Quarter => "quarter",
            DurationType::Half => "half",
            DurationType::Whole => "whole",
        }
    }

    pub fn from_name(name: &str) -> Result<Self> {
        match name.trim() {
            "32nd" => Ok(DurationType::ThirtySecond),
            "16th" => Ok(DurationType::Sixteenth),
            "eighth" => Ok(DurationType::Eighth),
            "quarter" => Ok(DurationType::Quarter),
            "half" => Ok(DurationType::Half),
            "whole" => Ok(DurationType::Whole),
            other => Err(Error::UnknownDurationType(other.to_string())),
        }
    }

    /// Subdivision denominator: a whole note is 1, a quarter 4, a 32nd 32.
    pub fn denominator(self) -> u32 {
        match self {
            DurationType::ThirtySecond => 32,
            DurationType::Sixteenth => 16,
            DurationType::Eighth => 8,
            DurationType::Quarter => 4,
            DurationType::Half => 2,
            DurationType::Whole => 1,
        }
    }
}

/// A duration symbol: a note type plus a dotted flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    pub duration_type: DurationType,
    pub dotted: bool,
}

impl Duration {
    pub fn plain(duration_type: DurationType) -> Self {
        Self {
            duration_type,
            dotted: false,
        }
    }

    pub fn dotted(duration_type: DurationType) -> Self {
        Self {
            duration_type,
            dotted: true,
        }
    }

    /// Division count of this symbol at `divisions_per_quarter` divisions.
    ///
    /// Sub-quarter types require their factor to divide the resolution
    /// exactly, and a dot requires an even base (a dot adds half the base).
    pub fn to_divisions(&self, divisions_per_quarter: u32) -> Result<u32> {
        let base = match self.duration_type {
            DurationType::Whole => divisions_per_quarter * 4,
            DurationType::Half => divisions_per_quarter * 2,
            DurationType::Quarter => divisions_per_quarter,
            sub => {
                let factor = sub.denominator() / 4;
                if divisions_per_quarter % factor != 0 {
                    return Err(Error::UnrepresentableDuration {
                        duration: *self,
                        divisions_per_quarter,
                    });
                }
                divisions_per_quarter / factor
            }
        };

        if !self.dotted {
            return Ok(base);
        }
        if base % 2 != 0 {
            return Err(Error::UnrepresentableDuration {
                duration: *self,
                divisions_per_quarter,
            });
        }
        Ok(base * 3 / 2)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.dotted {
            write!(f, "dotted {}", self.duration_type.name())
        } else {
            f.write_str(self.duration_type.name())
        }
    }
}

/// Division counts of the plain symbols that are integral at this resolution,
/// largest first.
fn division_table(divisions_per_quarter: u32) -> Vec<(u32, DurationType)> {
    let mut table = Vec::with_capacity(DurationType::ALL.len());
    for duration_type in DurationType::ALL.iter().rev() {
        if let Ok(div) = Duration::plain(*duration_type).to_divisions(divisions_per_quarter) {
            table.push((div, *duration_type));
        }
    }
    table
}

/// Express a division count as an ordered sequence of duration symbols.
///
/// A count matching a single plain or dotted symbol returns that one symbol.
/// Anything else decomposes greedily, largest candidate first; the resulting
/// fragments sum exactly to `divisions` and must be tied together downstream.
pub fn divisions_to_durations(divisions: u32, divisions_per_quarter: u32) -> Result<Vec<Duration>> {
    let max = 4 * divisions_per_quarter;
    if divisions < 1 || divisions > max {
        return Err(Error::DurationOutOfRange { divisions, max });
    }

    let table = division_table(divisions_per_quarter);
    let lookup = |div: u32| {
        table
            .iter()
            .find(|(entry, _)| *entry == div)
            .map(|(_, duration_type)| *duration_type)
    };

    if let Some(duration_type) = lookup(divisions) {
        return Ok(vec![Duration::plain(duration_type)]);
    }
    if divisions % 3 == 0 {
        if let Some(duration_type) = lookup(divisions * 2 / 3) {
            return Ok(vec![Duration::dotted(duration_type)]);
        }
    }

    let mut remaining = divisions;
    let mut fragments = Vec::new();
    while remaining > 0 {
        let candidate = (1..=remaining).rev().find_map(|div| {
            if let Some(duration_type) = lookup(div) {
                return Some((div, Duration::plain(duration_type)));
            }
            if div % 3 == 0 {
                if let Some(duration_type) = lookup(div * 2 / 3) {
                    return Some((div, Duration::dotted(duration_type)));
                }
            }
            None
        });
        // Possible only at resolutions no symbol set produces (e.g. Q = 3,
        // where nothing sums to 1); bail out instead of spinning.
        let Some((div, duration)) = candidate else {
            return Err(Error::UndecomposableDuration {
                divisions,
                divisions_per_quarter,
            });
        };
        fragments.push(duration);
        remaining -= div;
    }
    Ok(fragments)
}

/// Pick the coarsest divisions-per-quarter resolution that represents every
/// type in the sequence exactly. Defaults to 1 on empty input.
pub fn select_divisions(duration_types: &[DurationType]) -> u32 {
    duration_types
        .iter()
        .map(|duration_type| duration_type.denominator())
        .max()
        .map_or(1, |denominator| (denominator / 4).max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_to_divisions_table() {
        let q = 8;
        assert_eq!(Duration::plain(DurationType::Whole).to_divisions(q).unwrap(), 32);
        assert_eq!(Duration::plain(DurationType::Half).to_divisions(q).unwrap(), 16);
        assert_eq!(Duration::plain(DurationType::Quarter).to_divisions(q).unwrap(), 8);
        assert_eq!(Duration::plain(DurationType::Eighth).to_divisions(q).unwrap(), 4);
        assert_eq!(Duration::plain(DurationType::Sixteenth).to_divisions(q).unwrap(), 2);
        assert_eq!(Duration::plain(DurationType::ThirtySecond).to_divisions(q).unwrap(), 1);
        assert_eq!(Duration::dotted(DurationType::Quarter).to_divisions(q).unwrap(), 12);
    }

    #[test]
    fn unrepresentable_subdivision() {
        let err = Duration::plain(DurationType::Eighth).to_divisions(1).unwrap_err();
        assert!(matches!(
            err,
            Error::UnrepresentableDuration {
                divisions_per_quarter: 1,
                ..
            }
        ));
    }

    #[test]
    fn dotting_an_odd_base_fails() {
        // 32nd at Q=8 is 1 division; a dot would need half of that.
        let err = Duration::dotted(DurationType::ThirtySecond)
            .to_divisions(8)
            .unwrap_err();
        assert!(matches!(err, Error::UnrepresentableDuration { .. }));
    }

    #[test]
    fn single_symbol_inverse() {
        assert_eq!(
            divisions_to_durations(4, 4).unwrap(),
            vec![Duration::plain(DurationType::Quarter)]
        );
        assert_eq!(
            divisions_to_durations(6, 4).unwrap(),
            vec![Duration::dotted(DurationType::Quarter)]
        );
    }

    #[test]
    fn greedy_decomposition_prefers_largest_candidate() {
        // 7 at Q=4: the dotted quarter (6) wins over the plain quarter (4),
        // leaving a 16th.
        assert_eq!(
            divisions_to_durations(7, 4).unwrap(),
            vec![
                Duration::dotted(DurationType::Quarter),
                Duration::plain(DurationType::Sixteenth),
            ]
        );
        assert_eq!(
            divisions_to_durations(5, 4).unwrap(),
            vec![
                Duration::plain(DurationType::Quarter),
                Duration::plain(DurationType::Sixteenth),
            ]
        );
    }

    #[test]
    fn inverse_range_check() {
        assert!(matches!(
            divisions_to_durations(0, 4).unwrap_err(),
            Error::DurationOutOfRange { max: 16, .. }
        ));
        assert!(matches!(
            divisions_to_durations(17, 4).unwrap_err(),
            Error::DurationOutOfRange { max: 16, .. }
        ));
    }

    #[test]
    fn round_trip_of_representable_symbols() {
        for q in [1, 2, 4, 8] {
            for duration_type in DurationType::ALL {
                for dotted in [false, true] {
                    let duration = Duration {
                        duration_type,
                        dotted,
                    };
                    let Ok(div) = duration.to_divisions(q) else {
                        continue;
                    };
                    if div > 4 * q {
                        // A dotted whole is representable forwards but wider
                        // than the inverse mapper's range.
                        continue;
                    }
                    assert_eq!(
                        divisions_to_durations(div, q).unwrap(),
                        vec![duration],
                        "round trip of {duration} at Q={q}"
                    );
                }
            }
        }
    }

    #[test]
    fn decomposition_sums_and_terminates() {
        for q in [1, 2, 4, 8] {
            for div in 1..=4 * q {
                let fragments = divisions_to_durations(div, q).unwrap();
                assert!(!fragments.is_empty());
                let sum: u32 = fragments
                    .iter()
                    .map(|duration| duration.to_divisions(q).unwrap())
                    .sum();
                assert_eq!(sum, div, "decomposition of {div} at Q={q}");
            }
        }
    }

    #[test]
    fn undecomposable_resolution_is_an_error() {
        // Q=3 has no symbol worth 1 division.
        assert!(matches!(
            divisions_to_durations(1, 3).unwrap_err(),
            Error::UndecomposableDuration { .. }
        ));
    }

    #[test]
    fn resolution_selection() {
        use DurationType::*;
        assert_eq!(select_divisions(&[]), 1);
        assert_eq!(select_divisions(&[Whole, Half, Quarter]), 1);
        assert_eq!(select_divisions(&[Quarter, Eighth]), 2);
        assert_eq!(select_divisions(&[Quarter, Sixteenth]), 4);
        assert_eq!(select_divisions(&[ThirtySecond]), 8);
    }

    #[test]
    fn selected_resolution_represents_every_symbol() {
        use DurationType::*;
        let sets: [&[DurationType]; 3] = [
            &[Quarter, Eighth, Eighth],
            &[Whole, Sixteenth],
            &[Half, ThirtySecond, Quarter],
        ];
        for set in sets {
            let q = select_divisions(set);
            for duration_type in set {
                Duration::plain(*duration_type)
                    .to_divisions(q)
                    .expect("selected resolution must represent every input symbol");
            }
            // Minimality: no smaller power-of-two resolution still works.
            if q > 1 {
                let smaller = q / 2;
                assert!(set
                    .iter()
                    .any(|t| Duration::plain(*t).to_divisions(smaller).is_err()));
            }
        }
    }
}
