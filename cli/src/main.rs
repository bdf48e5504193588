use std::fs;
use std::process;

use clap::Parser;
use dexstack::errors::TraceError;
use dexstack::{CollectorOptions, FrameSequence, NullResolver, ReplayWalker, SnapshotCollector};
use owo_colors::OwoColorize;

mod inspect;

#[derive(Parser)]
#[command(name = "dexstack", about = "Replay and inspect recorded managed stack walks")]
struct Cli {
    /// Path to a recorded walk (one location descriptor per line)
    file: Option<String>,
    /// Emit the frame sequence as JSON
    #[arg(long)]
    json: bool,
    /// Dump each parsed descriptor before rendering
    #[arg(long)]
    parsed: bool,
    /// Keep at most this many frames
    #[arg(long)]
    max_frames: Option<usize>,
    /// Print version and exit
    #[arg(long)]
    version: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.version {
        println!(
            "{} {}",
            "dexstack".bright_cyan().bold(),
            env!("CARGO_PKG_VERSION").bright_black()
        );
        return;
    }

    let Some(file) = cli.file else {
        if let Err(err) = inspect::run() {
            eprintln!("{} {err:?}", "error:".red().bold());
            process::exit(1);
        }
        return;
    };

    let text = match fs::read_to_string(&file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!(
                "{} could not read '{}': {e}",
                "error:".red().bold(),
                file.yellow()
            );
            process::exit(1);
        }
    };

    if cli.parsed {
        for line in text.lines().filter(|line| !line.trim().is_empty()) {
            match dexstack::descriptor::parse_location(line) {
                Ok(parsed) => println!("{} {parsed:?}", "frame".bright_black()),
                Err(err) => println!("{} {err}", "parse error:".red()),
            }
        }
    }

    let mut options = CollectorOptions::new();
    if let Some(max) = cli.max_frames {
        options = options.with_max_frames(max);
    }

    let frames = match replay(&text, options) {
        Ok(frames) => frames,
        Err(err) => {
            eprintln!("{} {err:?}", "capture error:".red().bold());
            process::exit(1);
        }
    };

    if cli.json {
        match frames.to_json() {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("{} {err}", "error:".red().bold());
                process::exit(1);
            }
        }
    } else {
        println!("{}", frames.render());
    }
}

fn replay(text: &str, options: CollectorOptions) -> Result<FrameSequence, TraceError> {
    let mut walker = ReplayWalker::from_lines(text);
    let collector = SnapshotCollector::with_options(&NullResolver, options);
    Ok(collector.capture(&mut walker)?)
}
