//! Unflat CLI - Convert CSV files with indexed array columns to JSON.
//!
//! ```bash
//! unflat talent.csv                 # writes talent.json
//! unflat talent.csv out.json        # explicit output path
//! unflat talent.csv -d ';'          # override delimiter detection
//! unflat talent.csv --compact       # single-line JSON
//! ```

use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use unflat::{convert_file, ConvertOptions};

#[derive(Parser)]
#[command(name = "unflat")]
#[command(about = "Convert CSV files with indexed array columns to JSON", long_about = None)]
struct Cli {
    /// Input CSV file
    input: PathBuf,

    /// Output JSON file (default: input path with .json extension)
    output: Option<PathBuf>,

    /// CSV delimiter (auto-detect if not specified)
    #[arg(short, long)]
    delimiter: Option<char>,

    /// Write single-line JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(&cli) {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Converting: {}", cli.input.display());

    let options = ConvertOptions {
        delimiter: cli.delimiter,
        pretty: !cli.compact,
    };

    let conversion = convert_file(&cli.input, &options)?;

    eprintln!("   Encoding: {}", conversion.csv_info.encoding);
    eprintln!(
        "   Delimiter: '{}'{}",
        format_delimiter(conversion.csv_info.delimiter),
        if cli.delimiter.is_none() { " (auto-detected)" } else { "" }
    );
    eprintln!("   Columns: {}", conversion.csv_info.headers.join(", "));
    if !conversion.group_names.is_empty() {
        eprintln!("   Array fields: {}", conversion.group_names.join(", "));
    }
    eprintln!("   Rows: {}", conversion.csv_info.row_count);

    let json = conversion.to_json(options.pretty)?;
    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));
    fs::write(&output, json)?;

    println!("✓ Wrote JSON to: {}", output.display());
    Ok(())
}

/// Input path with its extension replaced by `.json`.
fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension("json")
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}
