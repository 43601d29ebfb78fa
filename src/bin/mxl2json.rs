//! MusicXML to JSON converter

use chainsong::musicxml::{PartJson, ScoreJson, TrainingScore};
use clap::Parser;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mxl2json")]
#[command(version = "0.1.0")]
#[command(about = "Dump MusicXML parts as JSON note lists", long_about = None)]
struct Args {
    /// Input MusicXML file
    input: PathBuf,

    /// Output JSON file (writes to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output compact JSON (default is pretty-printed)
    #[arg(short, long)]
    compact: bool,

    /// Dump a single part by id (all parts if not specified)
    #[arg(short, long)]
    part: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let text = fs::read_to_string(&args.input)?;
    let score = TrainingScore::parse(&text)?;

    let parts = match &args.part {
        Some(id) => vec![score.read_part(Some(id))?],
        None => score
            .parts()
            .iter()
            .map(|(id, _)| score.read_part(Some(id.as_str())))
            .collect::<Result<Vec<_>, _>>()?,
    };
    let score_json = ScoreJson {
        parts: parts.iter().map(PartJson::new).collect(),
    };

    let json_string = if args.compact {
        serde_json::to_string(&score_json)?
    } else {
        serde_json::to_string_pretty(&score_json)?
    };

    match &args.output {
        Some(path) => fs::write(path, json_string)?,
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(json_string.as_bytes())?;
            handle.write_all(b"\n")?;
        }
    }

    Ok(())
}
