use clap::Parser;
use log::LevelFilter;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use crossword_csp::{Assignment, Crossword, SolverConfig, Topology, Vocabulary};

/// Fill a crossword grid from a word list.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Grid structure: one row per line, `_` for open cells, `#` for blocks
    structure: PathBuf,

    /// Word list, one word per line
    words: PathBuf,

    /// Re-run arc consistency after every guess
    #[arg(long)]
    mac: bool,

    /// Give up after this many guesses
    #[arg(long)]
    guess_limit: Option<u32>,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(long)]
    debug: bool,
}

fn init_logger(debug_enabled: bool) {
    let level = if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_target(false);

    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }

    builder.init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logger(args.debug);

    match try_main(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => {
            println!("No solution.");
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn try_main(args: &Args) -> Result<bool, Box<dyn std::error::Error>> {
    let structure = fs::read_to_string(&args.structure)?;
    let topology = Topology::from_structure(&structure)?;
    let vocabulary = Vocabulary::parse(&fs::read_to_string(&args.words)?);
    log::info!(
        "{} slots, {} words",
        topology.len(),
        vocabulary.len()
    );

    let mut config = SolverConfig::new().maintain_arc_consistency(args.mac);
    if let Some(limit) = args.guess_limit {
        config = config.guess_limit(limit);
    }

    let crossword = Crossword::new(topology, vocabulary).with_config(config);
    let start = Instant::now();
    let assignment = crossword.try_solve()?;
    eprintln!(
        "{} guesses in {:.3}s",
        crossword.num_guesses(),
        start.elapsed().as_secs_f64()
    );

    match assignment {
        Some(assignment) => {
            print!("{}", render(&structure, crossword.topology(), &assignment));
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Draw the filled grid, with blocks as `█` and unfilled cells blank.
fn render(structure: &str, topology: &Topology, assignment: &Assignment) -> String {
    let mut letters: HashMap<(usize, usize), char> = HashMap::new();
    for (slot, word) in assignment.iter() {
        for (cell, &letter) in topology[slot].cells().zip(word.letters()) {
            letters.insert(cell, letter);
        }
    }

    let mut rows: Vec<&str> = structure
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .collect();
    while rows.last().map_or(false, |line| line.is_empty()) {
        rows.pop();
    }
    let width = rows.iter().map(|line| line.chars().count()).max().unwrap_or(0);

    let mut out = String::new();
    for (row, line) in rows.into_iter().enumerate() {
        let cells = line.chars().chain(std::iter::repeat('#'));
        for (col, c) in cells.take(width).enumerate() {
            out.push(match c {
                '_' => letters.get(&(row, col)).copied().unwrap_or(' '),
                _ => '█',
            });
        }
        out.push('\n');
    }
    out
}
