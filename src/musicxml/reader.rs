//! MusicXML training-input parser
//!
//! Extracts the parallel pitch and duration-type sequences of one part from a
//! score-partwise document. Only what the chains train on is read; layout,
//! dynamics, and every other notation detail is ignored.

use crate::error::{Error, Result};
use crate::score::{DurationType, Pitch, Step};
use roxmltree::{Document, Node};

/// A parsed score-partwise document.
#[derive(Debug)]
pub struct TrainingScore<'input> {
    doc: Document<'input>,
}

/// The training sequences of one part.
#[derive(Debug, Clone)]
pub struct TrainingPart {
    pub id: String,
    pub name: String,
    pub pitches: Vec<Pitch>,
    pub durations: Vec<DurationType>,
}

impl<'input> TrainingScore<'input> {
    pub fn parse(text: &'input str) -> Result<Self> {
        let doc = Document::parse(text)?;
        Ok(Self { doc })
    }

    /// `(id, name)` of every part, in document order.
    pub fn parts(&self) -> Vec<(String, String)> {
        let mut parts = Vec::new();
        let root = self.doc.root_element();
        if let Some(list) = root.children().find(|n| n.has_tag_name("part-list")) {
            for score_part in list.children().filter(|n| n.has_tag_name("score-part")) {
                let id = score_part.attribute("id").unwrap_or("").to_string();
                let name = child_text(score_part, "part-name")
                    .unwrap_or("")
                    .to_string();
                parts.push((id, name));
            }
        }
        parts
    }

    fn part_node(&self, id: Option<&str>) -> Result<Node<'_, 'input>> {
        let root = self.doc.root_element();
        match id {
            Some(id) => root
                .children()
                .find(|n| n.has_tag_name("part") && n.attribute("id") == Some(id))
                .ok_or_else(|| Error::UnknownPart(id.to_string())),
            None => root
                .children()
                .find(|n| n.has_tag_name("part"))
                .ok_or_else(|| Error::Parse("score contains no parts".to_string())),
        }
    }

    /// Read one part's note sequence. `id = None` takes the first part.
    ///
    /// Rests and untyped notes (grace notes) are skipped. Dotted notes are
    /// read as their plain type; the encoder may still emit dotted symbols
    /// where decomposition produces them.
    pub fn read_part(&self, id: Option<&str>) -> Result<TrainingPart> {
        let part = self.part_node(id)?;
        let part_id = part.attribute("id").unwrap_or("").to_string();
        let part_name = self
            .parts()
            .into_iter()
            .find(|(id, _)| *id == part_id)
            .map(|(_, name)| name)
            .unwrap_or_default();

        let mut pitches = Vec::new();
        let mut durations = Vec::new();
        for note in part.descendants().filter(|n| n.has_tag_name("note")) {
            let Some(pitch_node) = note.children().find(|n| n.has_tag_name("pitch")) else {
                continue; // a rest
            };
            let Some(type_name) = child_text(note, "type") else {
                continue;
            };

            let step_text = child_text(pitch_node, "step")
                .ok_or_else(|| Error::Parse("note pitch is missing <step>".to_string()))?;
            let octave_text = child_text(pitch_node, "octave")
                .ok_or_else(|| Error::Parse("note pitch is missing <octave>".to_string()))?;
            let octave = parse_int(octave_text, "octave")?;
            let alter = match child_text(pitch_node, "alter") {
                Some(text) => parse_int(text, "alter")?,
                None => 0,
            };

            let step = Step::from_name(step_text)?;
            pitches.push(Pitch::with_alter(step, octave, alter));
            durations.push(DurationType::from_name(type_name)?);
        }

        Ok(TrainingPart {
            id: part_id,
            name: part_name,
            pitches,
            durations,
        })
    }
}

fn child_text<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<&'a str> {
    node.children()
        .find(|n| n.has_tag_name(name))
        .and_then(|n| n.text())
}

fn parse_int(text: &str, what: &str) -> Result<i32> {
    text.trim()
        .parse()
        .map_err(|_| Error::Parse(format!("invalid <{what}> value \"{text}\"")))
}
