use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Default base directory for every data file.
pub const DEFAULT_DIR: &str = "./testing";

/// Which of the four data files a path refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    /// Randomized lines written by the generator.
    Input,
    /// Sorted duplicate tokens written by the generator.
    Soln,
    /// Fully sorted copy of the input written by the finder.
    Sorted,
    /// Duplicate lines written by the finder (the program under test).
    Output,
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "INPUT"),
            Self::Soln => write!(f, "SOLN"),
            Self::Sorted => write!(f, "SORTED"),
            Self::Output => write!(f, "OUTPUT"),
        }
    }
}

/// Paths of the data files for one line count.
///
/// The label is kept as a string so callers may substitute an argument
/// verbatim without parsing it.
#[derive(Debug, Clone)]
pub struct DataFiles {
    dir: PathBuf,
    label: String,
}

impl DataFiles {
    pub fn new(dir: impl Into<PathBuf>, label: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `<dir>/<KIND>_test_data_<label>.txt`
    pub fn path(&self, kind: FileKind) -> PathBuf {
        self.dir.join(format!("{kind}_test_data_{}.txt", self.label))
    }

    pub fn input(&self) -> PathBuf {
        self.path(FileKind::Input)
    }

    pub fn solution(&self) -> PathBuf {
        self.path(FileKind::Soln)
    }

    pub fn sorted(&self) -> PathBuf {
        self.path(FileKind::Sorted)
    }

    pub fn output(&self) -> PathBuf {
        self.path(FileKind::Output)
    }
}

/// Summary of a `generate` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateReport {
    pub num_lines: u64,
    pub num_dupes: usize,
    pub input: PathBuf,
    pub solution: PathBuf,
    pub seed: Option<u64>,
    pub finished_at: DateTime<Utc>,
}

/// A pair of lines that differed during verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    /// 1-based line number in the output file.
    pub line: u64,
    pub output: String,
    pub solution: String,
}

/// Summary of a `verify` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyReport {
    pub label: String,
    pub matched: bool,
    pub lines_compared: u64,
    pub mismatch: Option<Mismatch>,
    pub finished_at: DateTime<Utc>,
}

/// Summary of a `find` run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindReport {
    pub num_lines: u64,
    pub num_chunks: usize,
    pub num_dupes: u64,
    pub sorted: PathBuf,
    pub output: PathBuf,
    pub finished_at: DateTime<Utc>,
}
