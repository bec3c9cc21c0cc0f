use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::io::{BufRead, Write};
use std::mem;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use thiserror::Error;
use tracing::{debug, info};

use super::model::DataFiles;
use crate::util::fs;

/// Bytes charged per line on top of its contents when filling a chunk.
pub const LINE_OVERHEAD: usize = mem::size_of::<Vec<u8>>();

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FindError {
    #[error("max chunk size must be greater than zero")]
    ZeroChunkSize,
}

/// Counts gathered while finding duplicates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FindSummary {
    pub num_lines: u64,
    pub num_chunks: usize,
    pub num_dupes: u64,
}

/// Find every repeated line of the input file.
///
/// The input is cut into chunks of at most `max_chunk_size` accounted bytes,
/// each chunk is sorted and spilled to a scratch file, the chunks are merged
/// into the sorted file, and every line equal to its predecessor in sorted
/// order is written to the output file.
pub fn find_duplicates(files: &DataFiles, max_chunk_size: usize) -> Result<FindSummary> {
    if max_chunk_size == 0 {
        return Err(FindError::ZeroChunkSize.into());
    }

    let input = fs::open_reader(&files.input())?;
    let scratch = tempfile::Builder::new()
        .prefix("dupecheck-chunks-")
        .tempdir_in(files.dir())
        .with_context(|| {
            format!(
                "failed to create scratch directory in {}",
                files.dir().display()
            )
        })?;

    let (chunks, num_lines) = split_sorted_chunks(input, max_chunk_size, scratch.path())?;
    info!(lines = num_lines, chunks = chunks.len(), "split input into sorted chunks");

    let sorted = files.sorted();
    let mut writer = fs::create_writer(&sorted)?;
    let merged = merge_chunks(&chunks, &mut writer)?;
    if merged != num_lines {
        bail!("merged {merged} lines from chunks but read {num_lines} from the input");
    }
    debug!(lines = merged, path = %sorted.display(), "wrote sorted file");
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", sorted.display()))?;
    drop(writer);

    let output = files.output();
    let mut writer = fs::create_writer(&output)?;
    let num_dupes = write_adjacent_duplicates(fs::open_reader(&sorted)?, &mut writer)?;
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", output.display()))?;

    scratch
        .close()
        .context("failed to remove scratch directory")?;

    Ok(FindSummary {
        num_lines,
        num_chunks: chunks.len(),
        num_dupes,
    })
}

/// Read `input` into bounded chunks, sort each and spill it under `scratch`.
///
/// Returns the chunk file paths and the total number of lines read. A chunk
/// always holds at least one line, however large.
pub fn split_sorted_chunks<R: BufRead>(
    mut input: R,
    max_chunk_size: usize,
    scratch: &Path,
) -> Result<(Vec<PathBuf>, u64)> {
    let mut paths = Vec::new();
    let mut chunk: Vec<Vec<u8>> = Vec::new();
    let mut chunk_size = 0usize;
    let mut num_lines = 0u64;
    let mut buf = Vec::new();

    while fs::read_raw_line(&mut input, &mut buf).context("reading input file")? {
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        chunk_size += LINE_OVERHEAD + buf.len();
        chunk.push(mem::take(&mut buf));
        num_lines += 1;

        if chunk_size >= max_chunk_size {
            paths.push(spill_chunk(&mut chunk, scratch, paths.len())?);
            chunk_size = 0;
        }
    }
    if !chunk.is_empty() {
        paths.push(spill_chunk(&mut chunk, scratch, paths.len())?);
    }

    Ok((paths, num_lines))
}

fn spill_chunk(chunk: &mut Vec<Vec<u8>>, scratch: &Path, index: usize) -> Result<PathBuf> {
    chunk.sort_unstable();
    let path = scratch.join(format!("chunk_{index}"));
    let mut writer = fs::create_writer(&path)?;
    for line in chunk.drain(..) {
        write_line(&mut writer, &line)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    debug!(path = %path.display(), "spilled chunk");
    Ok(path)
}

/// K-way merge of sorted chunk files into `out`. Returns lines written.
pub fn merge_chunks<W: Write>(chunks: &[PathBuf], out: &mut W) -> Result<u64> {
    let mut readers = Vec::with_capacity(chunks.len());
    let mut heap = BinaryHeap::with_capacity(chunks.len());

    for (idx, path) in chunks.iter().enumerate() {
        let mut reader = fs::open_reader(path)?;
        if let Some(line) = next_line(&mut reader)? {
            heap.push(Reverse((line, idx)));
        }
        readers.push(reader);
    }

    let mut written = 0u64;
    while let Some(Reverse((line, idx))) = heap.pop() {
        write_line(out, &line).context("failed to write sorted file")?;
        written += 1;
        if let Some(next) = next_line(&mut readers[idx])? {
            heap.push(Reverse((next, idx)));
        }
    }

    Ok(written)
}

/// Write each line of sorted `input` that equals the line before it.
/// Returns the number of lines written.
pub fn write_adjacent_duplicates<R: BufRead, W: Write>(
    mut input: R,
    out: &mut W,
) -> Result<u64> {
    let mut prev: Option<Vec<u8>> = None;
    let mut dupes = 0u64;

    while let Some(line) = next_line(&mut input)? {
        if prev.as_deref() == Some(line.as_slice()) {
            write_line(out, &line).context("failed to write output file")?;
            dupes += 1;
        }
        prev = Some(line);
    }

    Ok(dupes)
}

fn next_line<R: BufRead>(reader: &mut R) -> Result<Option<Vec<u8>>> {
    let mut buf = Vec::new();
    if !fs::read_raw_line(reader, &mut buf)? {
        return Ok(None);
    }
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    Ok(Some(buf))
}

fn write_line<W: Write>(out: &mut W, line: &[u8]) -> std::io::Result<()> {
    out.write_all(line)?;
    out.write_all(b"\n")
}
