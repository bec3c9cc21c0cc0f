pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::core::model::DEFAULT_DIR;

/// dupecheck: generate, find and verify duplicate lines in large text files.
#[derive(Parser, Debug)]
#[command(name = "dupecheck", version, about)]
pub struct Cli {
    /// Directory holding the INPUT/SOLN/SORTED/OUTPUT data files.
    #[arg(long, global = true, default_value = DEFAULT_DIR)]
    pub dir: PathBuf,

    /// Print a one-line JSON report instead of the usual messages.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write a random input file with duplicated lines and its solution file.
    Generate {
        /// Number of lines in the input file.
        #[arg(default_value_t = 1000)]
        num_lines: u64,

        /// Seed for the random generator. Drawn from the OS when omitted.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Compare an output file against the solution file line by line.
    Verify {
        /// Line count used in the file names. Substituted verbatim.
        #[arg(default_value = "30000000")]
        num_lines: String,

        /// Also fail when the solution has lines past the end of the output.
        #[arg(long)]
        strict: bool,
    },

    /// Find duplicate lines in an input file with a bounded-memory external sort.
    Find {
        /// Line count used in the file names.
        num_lines: u64,

        /// Memory budget per sorted chunk, in bytes.
        max_chunk_size: usize,
    },
}

/// Parse CLI arguments. Called from `main`.
pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generate_defaults() {
        let cli = Cli::try_parse_from(["dupecheck", "generate"]).unwrap();
        assert_eq!(cli.dir, PathBuf::from(DEFAULT_DIR));
        assert!(!cli.json);
        match cli.command {
            Command::Generate { num_lines, seed } => {
                assert_eq!(num_lines, 1000);
                assert_eq!(seed, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn verify_keeps_raw_label() {
        let cli = Cli::try_parse_from(["dupecheck", "verify", "1e3", "--dir", "/tmp/x"]).unwrap();
        assert_eq!(cli.dir, PathBuf::from("/tmp/x"));
        match cli.command {
            Command::Verify { num_lines, strict } => {
                assert_eq!(num_lines, "1e3");
                assert!(!strict);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn verify_default_label() {
        let cli = Cli::try_parse_from(["dupecheck", "verify"]).unwrap();
        match cli.command {
            Command::Verify { num_lines, .. } => assert_eq!(num_lines, "30000000"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn generate_rejects_non_integer() {
        assert!(Cli::try_parse_from(["dupecheck", "generate", "ten"]).is_err());
    }

    #[test]
    fn find_requires_both_arguments() {
        assert!(Cli::try_parse_from(["dupecheck", "find", "100"]).is_err());
        assert!(Cli::try_parse_from(["dupecheck", "find", "100", "4096"]).is_ok());
    }
}
