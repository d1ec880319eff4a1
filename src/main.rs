use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::warn;

use word_frequency::{
    FrequencyReport, FxWordHasher, NaiveWordHasher, TableConfig, WordFrequency, WordHasher,
};

#[derive(Clone, Copy, Debug, ValueEnum)]
enum HasherKind {
    /// fxhash
    Fx,
    /// Sum of bytes, clusters badly
    Naive,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Count word frequencies in text files", long_about = None)]
struct Args {
    #[arg(help = "Text files, counted into one table [default: stdin]")]
    files: Vec<PathBuf>,
    #[arg(long, value_enum, default_value_t = HasherKind::Fx, help = "Hash function for the table")]
    hasher: HasherKind,
    #[arg(short = 'n', long, default_value_t = 10, help = "Number of most frequent words listed")]
    top: usize,
    #[arg(short, long = "word", help = "Also report the count of this word [repeatable]")]
    words: Vec<String>,
    #[arg(long, default_value_t = 1.0, help = "Max load factor before the table rehashes")]
    max_load_factor: f32,
    #[arg(long, help = "Print the report as JSON")]
    json: bool,
}

fn count<H: WordHasher>(args: &Args, hasher: H) -> Result<FrequencyReport> {
    let config = TableConfig {
        max_load_factor: args.max_load_factor,
        ..TableConfig::default()
    };
    let mut frequencies = WordFrequency::with_config(config, hasher)?;

    if args.files.is_empty() {
        frequencies
            .load_stdin()
            .context("failed to read standard input")?;
    }
    for path in &args.files {
        // Unreadable files count as empty
        if let Err(e) = frequencies.load_path(path) {
            warn!("{}", e);
        }
    }
    Ok(FrequencyReport::new(&frequencies, args.top, &args.words))
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let report = match args.hasher {
        HasherKind::Fx => count(&args, FxWordHasher)?,
        HasherKind::Naive => count(&args, NaiveWordHasher)?,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{report}");
    }
    Ok(())
}
