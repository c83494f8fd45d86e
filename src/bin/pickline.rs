//! pickline - print K randomly chosen lines to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use oddjobs::sample::sample_lines;
use std::fs::File;
use std::io::{self, BufReader, Write};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Print K randomly chosen lines to stdout
///
/// With no files, or with `-`, reads standard input. Each named input is
/// sampled independently.
#[derive(Parser, Debug)]
#[command(name = "pickline", version)]
struct Cli {
    /// Print K lines
    #[arg(short = 'n', long = "lines", value_name = "K", default_value = "1")]
    lines: usize,

    /// Files to sample from (`-` for stdin)
    files: Vec<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut stdout = io::stdout().lock();

    if cli.files.is_empty() {
        emit(&mut stdout, sample_lines(io::stdin().lock(), cli.lines)?)?;
        return Ok(());
    }

    for file in &cli.files {
        let sampled = if file == "-" {
            sample_lines(io::stdin().lock(), cli.lines)?
        } else {
            let reader = BufReader::new(
                File::open(file).with_context(|| format!("failed to open {file}"))?,
            );
            sample_lines(reader, cli.lines)
                .with_context(|| format!("failed to sample {file}"))?
        };
        emit(&mut stdout, sampled)?;
    }

    Ok(())
}

/// Every sampled line is emitted newline-terminated, even when the source's
/// final line had no trailing newline.
fn emit(stdout: &mut impl Write, lines: Vec<String>) -> Result<()> {
    for line in lines {
        writeln!(stdout, "{line}")?;
    }
    Ok(())
}
