use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

/// Open a file for buffered reading, returning a descriptive error on failure.
pub fn open_reader(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    Ok(BufReader::new(file))
}

/// Create (or truncate) a file for buffered writing.
///
/// Parent directories are not created: a missing directory is an error.
pub fn create_writer(path: &Path) -> Result<BufWriter<File>> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

/// Read the next raw line, keeping its `\n` terminator.
///
/// Returns `Ok(false)` at end of file. `buf` is cleared first.
pub fn read_raw_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> Result<bool> {
    buf.clear();
    let n = reader
        .read_until(b'\n', buf)
        .context("failed to read line")?;
    Ok(n > 0)
}

/// Write every string as-is to `path`, then flush.
pub fn write_all_lines<I, S>(path: &Path, lines: I) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut writer = create_writer(path)?;
    for line in lines {
        writer
            .write_all(line.as_ref().as_bytes())
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))
}
