use std::io::BufRead;

use anyhow::{Context, Result};
use tracing::debug;

use super::model::{DataFiles, Mismatch};
use crate::util::fs;

/// Result of comparing an output file against a solution file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub matched: bool,
    /// Output lines read before the comparison stopped.
    pub lines_compared: u64,
    /// The first differing pair, if any.
    pub mismatch: Option<Mismatch>,
}

/// Compare `output` against `solution` line by line, terminators included.
///
/// Iteration is driven by the output: each output line is paired with the
/// next solution line (empty once the solution runs out) and the first
/// inequality stops the comparison. Solution lines left over after the
/// output ends are only checked when `strict` is set.
pub fn compare<O: BufRead, S: BufRead>(
    mut output: O,
    mut solution: S,
    strict: bool,
) -> Result<Comparison> {
    let mut out_line = Vec::new();
    let mut soln_line = Vec::new();
    let mut compared = 0u64;

    while fs::read_raw_line(&mut output, &mut out_line).context("reading output file")? {
        compared += 1;
        fs::read_raw_line(&mut solution, &mut soln_line).context("reading solution file")?;

        if out_line != soln_line {
            debug!(line = compared, "first mismatch");
            return Ok(Comparison {
                matched: false,
                lines_compared: compared,
                mismatch: Some(mismatch(compared, &out_line, &soln_line)),
            });
        }
    }

    if strict
        && fs::read_raw_line(&mut solution, &mut soln_line).context("reading solution file")?
    {
        debug!(line = compared + 1, "solution has lines past end of output");
        return Ok(Comparison {
            matched: false,
            lines_compared: compared,
            mismatch: Some(mismatch(compared + 1, b"", &soln_line)),
        });
    }

    Ok(Comparison {
        matched: true,
        lines_compared: compared,
        mismatch: None,
    })
}

fn mismatch(line: u64, output: &[u8], solution: &[u8]) -> Mismatch {
    Mismatch {
        line,
        output: String::from_utf8_lossy(output).into_owned(),
        solution: String::from_utf8_lossy(solution).into_owned(),
    }
}

/// Open the output and solution files named by `files` and compare them.
pub fn verify_files(files: &DataFiles, strict: bool) -> Result<Comparison> {
    let output = fs::open_reader(&files.output())?;
    let solution = fs::open_reader(&files.solution())?;
    compare(output, solution, strict)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(output: &str, solution: &str, strict: bool) -> Comparison {
        compare(
            Cursor::new(output.as_bytes()),
            Cursor::new(solution.as_bytes()),
            strict,
        )
        .unwrap()
    }

    #[test]
    fn identical_files_match() {
        let c = run("aaa\nbbb\n", "aaa\nbbb\n", false);
        assert!(c.matched);
        assert_eq!(c.lines_compared, 2);
        assert!(c.mismatch.is_none());
    }

    #[test]
    fn differing_line_is_reported() {
        let c = run("aaa\nzzz\n", "aaa\nbbb\n", false);
        assert!(!c.matched);
        let m = c.mismatch.unwrap();
        assert_eq!(m.line, 2);
        assert_eq!(m.output, "zzz\n");
        assert_eq!(m.solution, "bbb\n");
    }

    #[test]
    fn stops_at_first_mismatch() {
        let c = run("x\ny\nz\n", "a\nb\nc\n", false);
        assert_eq!(c.lines_compared, 1);
        assert_eq!(c.mismatch.unwrap().output, "x\n");
    }

    #[test]
    fn empty_output_against_nonempty_solution_matches() {
        let c = run("", "aaa\n", false);
        assert!(c.matched);
        assert_eq!(c.lines_compared, 0);
    }

    #[test]
    fn both_empty_match() {
        assert!(run("", "", false).matched);
        assert!(run("", "", true).matched);
    }

    #[test]
    fn strict_rejects_missing_tail() {
        let c = run("aaa\n", "aaa\nbbb\n", true);
        assert!(!c.matched);
        let m = c.mismatch.unwrap();
        assert_eq!(m.line, 2);
        assert_eq!(m.output, "");
        assert_eq!(m.solution, "bbb\n");
    }

    #[test]
    fn extra_output_line_fails() {
        let c = run("aaa\nbbb\n", "aaa\n", false);
        assert!(!c.matched);
        let m = c.mismatch.unwrap();
        assert_eq!(m.output, "bbb\n");
        assert_eq!(m.solution, "");
    }

    #[test]
    fn terminator_is_part_of_the_line() {
        let c = run("aaa", "aaa\n", false);
        assert!(!c.matched);
    }

    #[test]
    fn missing_file_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let files = DataFiles::new(tmp.path(), "5");
        let err = verify_files(&files, false).unwrap_err();
        assert!(format!("{err:#}").contains("OUTPUT_test_data_5.txt"));
    }
}
