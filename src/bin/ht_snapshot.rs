//! Snapshot dumper
//!
//! Feeds bytes from stdin or a file into a headless terminal and writes the
//! resulting snapshot to stdout, as JSON or plain text.
//!
//! ```bash
//! # Process escape sequences and output a JSON snapshot
//! echo -e "Hello \x1b[31mRed\x1b[0m" | ht-snapshot
//!
//! # Process from a file and output text
//! ht-snapshot -i capture.bin -t
//!
//! # Custom terminal size
//! ht-snapshot -c 120 -r 40 -i capture.bin -o snapshot.json
//! ```

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use headless_term::Terminal;

/// Command-line arguments
struct Args {
    /// Input file (stdin if not specified)
    input: Option<PathBuf>,
    /// Output file (stdout if not specified)
    output: Option<PathBuf>,
    /// Output as text instead of JSON
    text: bool,
    /// Terminal columns
    cols: usize,
    /// Terminal rows
    rows: usize,
    /// Show help
    help: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            text: false,
            cols: 80,
            rows: 24,
            help: false,
        }
    }
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let argv: Vec<String> = std::env::args().skip(1).collect();

    let mut i = 0;
    while i < argv.len() {
        match argv[i].as_str() {
            "-h" | "--help" => {
                args.help = true;
            }
            "-i" | "--input" => {
                i += 1;
                if i < argv.len() {
                    args.input = Some(PathBuf::from(&argv[i]));
                }
            }
            "-o" | "--output" => {
                i += 1;
                if i < argv.len() {
                    args.output = Some(PathBuf::from(&argv[i]));
                }
            }
            "-t" | "--text" => {
                args.text = true;
            }
            "-c" | "--cols" => {
                i += 1;
                if i < argv.len() {
                    args.cols = argv[i].parse().unwrap_or(80);
                }
            }
            "-r" | "--rows" => {
                i += 1;
                if i < argv.len() {
                    args.rows = argv[i].parse().unwrap_or(24);
                }
            }
            _ => {}
        }
        i += 1;
    }

    args
}

fn print_help() {
    eprintln!(
        r#"ht-snapshot - feed bytes into a headless terminal, dump the screen

USAGE:
    ht-snapshot [OPTIONS]

OPTIONS:
    -h, --help              Show this help message
    -i, --input <FILE>      Input file (stdin if not specified)
    -o, --output <FILE>     Output file (stdout if not specified)
    -t, --text              Output as plain text instead of JSON
    -c, --cols <N>          Terminal columns (default: 80)
    -r, --rows <N>          Terminal rows (default: 24)
"#
    );
}

fn main() -> io::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let args = parse_args();

    if args.help {
        print_help();
        return Ok(());
    }

    let input_data = if let Some(path) = &args.input {
        std::fs::read(path)?
    } else {
        let mut data = Vec::new();
        io::stdin().read_to_end(&mut data)?;
        data
    };

    let mut terminal = Terminal::new(args.cols, args.rows)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    terminal.write(&input_data);

    let snapshot = terminal.snapshot();
    let output_data = if args.text {
        snapshot.to_text()
    } else {
        snapshot
            .to_json()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
    };

    if let Some(path) = &args.output {
        let mut file = File::create(path)?;
        file.write_all(output_data.as_bytes())?;
    } else {
        io::stdout().write_all(output_data.as_bytes())?;
    }

    Ok(())
}
