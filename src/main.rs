use chainsong::musicxml::TrainingScore;
use chainsong::Generator;
use clap::Parser;
use std::io::Read;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "chainsong")]
#[command(version = "0.1.0")]
#[command(about = "Markov chain melody generator", long_about = None)]
struct Args {
    /// Output MusicXML file
    #[arg(required_unless_present = "list_parts")]
    output: Option<PathBuf>,

    /// Input MusicXML file (reads from stdin if not specified)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Part id to train on (first part if not specified)
    #[arg(short, long)]
    part: Option<String>,

    /// Markov chain order
    #[arg(short, long, default_value_t = chainsong::generator::DEFAULT_ORDER)]
    order: usize,

    /// RNG seed for reproducible output
    #[arg(short, long)]
    seed: Option<u64>,

    /// Limit on the number of training notes
    #[arg(short = 'l', long)]
    limit: Option<usize>,

    /// List parts in the input score
    #[arg(short = 'L', long)]
    list_parts: bool,
}

fn main() -> Result<(), chainsong::Error> {
    let args = Args::parse();

    if args.list_parts {
        let text = read_input(&args.input)?;
        let score = TrainingScore::parse(&text)?;
        for (id, name) in score.parts() {
            println!("{}\t{}", id, name);
        }
        return Ok(());
    }

    let output = args
        .output
        .expect("output is required when not listing parts");

    let generator = Generator {
        markov_order: args.order,
        seed: args.seed,
        part: args.part,
        training_limit: args.limit,
        part_name: None,
    };

    let report = match &args.input {
        Some(path) => generator.generate_file(path, &output)?,
        None => generator.generate(std::io::stdin(), &output)?,
    };

    println!(
        "Trained on part \"{}\" ({}), {} notes",
        report.part_name, report.part_id, report.training_notes
    );
    println!(
        "Generated {} notes over {} measures at {} divisions per quarter",
        report.generated_notes, report.measures, report.divisions_per_quarter
    );
    println!("Music written to {}", output.display());

    Ok(())
}

fn read_input(path: &Option<PathBuf>) -> Result<String, chainsong::Error> {
    match path {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => {
            let mut text = String::new();
            std::io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}
