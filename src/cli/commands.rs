use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::{Cli, Command};
use crate::core::model::{DataFiles, FindReport, GenerateReport, VerifyReport};
use crate::core::{find, generate, verify};

/// Dispatch a parsed CLI command to the appropriate handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Generate { num_lines, seed } => {
            cmd_generate(&cli.dir, num_lines, seed, cli.json)
        }
        Command::Verify { num_lines, strict } => {
            cmd_verify(&cli.dir, num_lines, strict, cli.json)
        }
        Command::Find {
            num_lines,
            max_chunk_size,
        } => cmd_find(&cli.dir, num_lines, max_chunk_size, cli.json),
    }
}

fn print_json<T: Serialize>(report: &T) -> Result<()> {
    let json = serde_json::to_string(report).context("failed to serialize report")?;
    println!("{json}");
    Ok(())
}

// ─── generate ───────────────────────────────────────────────────────────────

fn cmd_generate(dir: &Path, num_lines: u64, seed: Option<u64>, json: bool) -> Result<()> {
    let files = DataFiles::new(dir, num_lines.to_string());
    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    info!(num_lines, ?seed, "generating test data");

    let num_dupes = generate::write_test_data(&mut rng, &files, num_lines)
        .context("failed to generate test data")?;

    if json {
        return print_json(&GenerateReport {
            num_lines,
            num_dupes,
            input: files.input(),
            solution: files.solution(),
            seed,
            finished_at: Utc::now(),
        });
    }

    println!("Num dupes: {num_dupes}");
    Ok(())
}

// ─── verify ─────────────────────────────────────────────────────────────────

fn cmd_verify(dir: &Path, label: String, strict: bool, json: bool) -> Result<()> {
    let files = DataFiles::new(dir, label);

    if !json {
        println!(
            "Testing output vs solution file for NUM_LINES = {}",
            files.label()
        );
    }

    let result = verify::verify_files(&files, strict)?;

    if json {
        return print_json(&VerifyReport {
            label: files.label().to_string(),
            matched: result.matched,
            lines_compared: result.lines_compared,
            mismatch: result.mismatch,
            finished_at: Utc::now(),
        });
    }

    if let Some(m) = &result.mismatch {
        println!("{}", m.output);
        println!("{}", m.solution);
    }

    if result.matched {
        println!("Test passed: files match");
    } else {
        println!("Test failed: files do not match");
    }
    Ok(())
}

// ─── find ───────────────────────────────────────────────────────────────────

fn cmd_find(dir: &Path, num_lines: u64, max_chunk_size: usize, json: bool) -> Result<()> {
    let files = DataFiles::new(dir, num_lines.to_string());
    let summary = find::find_duplicates(&files, max_chunk_size)?;

    if summary.num_lines != num_lines {
        warn!(
            expected = num_lines,
            actual = summary.num_lines,
            "input line count differs from file name"
        );
    }

    if json {
        return print_json(&FindReport {
            num_lines: summary.num_lines,
            num_chunks: summary.num_chunks,
            num_dupes: summary.num_dupes,
            sorted: files.sorted(),
            output: files.output(),
            finished_at: Utc::now(),
        });
    }

    println!("Number of duplicate lines: {}", summary.num_dupes);
    Ok(())
}
