//! MusicXML document serializer
//!
//! Renders an encoded [`Score`] as a score-partwise document with a single
//! part. Measure order, note order, and the tie/dot/pitch/duration fields are
//! emitted verbatim from the note records; the first measure carries the
//! fixed header attributes (key of C, 4/4, treble clef).

use crate::error::Result;
use crate::score::{NoteRecord, Score};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Render the score and write it to a file.
pub fn write_file(score: &Score, part_name: &str, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(render(score, part_name).as_bytes())?;
    file.flush()?;
    Ok(())
}

/// Render a complete score-partwise document.
pub fn render(score: &Score, part_name: &str) -> String {
    let mut xml = String::new();
    xml.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<!DOCTYPE score-partwise PUBLIC \"-//Recordare//DTD MusicXML 3.0 Partwise//EN\" \"http://www.musicxml.org/dtds/partwise.dtd\">\n");
    xml.push_str("<score-partwise version=\"3.0\">\n");
    xml.push_str("  <part-list>\n");
    xml.push_str("    <score-part id=\"P1\">\n");
    xml.push_str(&format!(
        "      <part-name>{}</part-name>\n",
        xml_escape(part_name)
    ));
    xml.push_str("    </score-part>\n");
    xml.push_str("  </part-list>\n");
    xml.push_str("  <part id=\"P1\">\n");

    for (index, measure) in score.measures.iter().enumerate() {
        xml.push_str(&format!("    <measure number=\"{}\">\n", index + 1));
        if index == 0 {
            write_attributes(&mut xml, score);
        }
        for record in measure {
            write_note(&mut xml, record);
        }
        xml.push_str("    </measure>\n");
    }

    xml.push_str("  </part>\n");
    xml.push_str("</score-partwise>\n");
    xml
}

fn write_attributes(xml: &mut String, score: &Score) {
    xml.push_str("      <attributes>\n");
    xml.push_str(&format!(
        "        <divisions>{}</divisions>\n",
        score.divisions_per_quarter
    ));
    xml.push_str("        <key>\n          <fifths>0</fifths>\n        </key>\n");
    xml.push_str(&format!(
        "        <time>\n          <beats>{}</beats>\n          <beat-type>{}</beat-type>\n        </time>\n",
        score.beats, score.beat_type
    ));
    xml.push_str("        <clef>\n          <sign>G</sign>\n          <line>2</line>\n        </clef>\n");
    xml.push_str("      </attributes>\n");
}

fn write_note(xml: &mut String, record: &NoteRecord) {
    xml.push_str("      <note>\n");
    xml.push_str("        <pitch>\n");
    xml.push_str(&format!(
        "          <step>{}</step>\n",
        record.pitch.step.letter()
    ));
    if record.pitch.alter != 0 {
        xml.push_str(&format!(
            "          <alter>{}</alter>\n",
            record.pitch.alter
        ));
    }
    xml.push_str(&format!(
        "          <octave>{}</octave>\n",
        record.pitch.octave
    ));
    xml.push_str("        </pitch>\n");
    xml.push_str(&format!(
        "        <duration>{}</duration>\n",
        record.divisions
    ));
    if record.tie_end {
        xml.push_str("        <tie type=\"stop\"/>\n");
    }
    if record.tie_start {
        xml.push_str("        <tie type=\"start\"/>\n");
    }
    xml.push_str(&format!(
        "        <type>{}</type>\n",
        record.duration.duration_type.name()
    ));
    if record.duration.dotted {
        xml.push_str("        <dot/>\n");
    }
    if record.tie_start || record.tie_end {
        xml.push_str("        <notations>\n");
        if record.tie_end {
            xml.push_str("          <tied type=\"stop\"/>\n");
        }
        if record.tie_start {
            xml.push_str("          <tied type=\"start\"/>\n");
        }
        xml.push_str("        </notations>\n");
    }
    xml.push_str("      </note>\n");
}

fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
