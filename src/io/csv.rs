/*!
# Delimited Text I/O for Observations and Samples

This module reads observed data from, and writes accepted parameter vectors
to, tab- or comma-delimited text files. Enable via the `csv` feature.

Values are written with eight fractional digits. Files carry no header
unless one is passed to [`write_delimited`]; read those back with
[`read_delimited_with_header`].
*/

use csv::{ReaderBuilder, Trim, WriterBuilder};
use std::path::Path;

use crate::error::{AbcError, Result};

/// Field separator of a delimited file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    Tab,
    #[default]
    Comma,
}

impl Delimiter {
    /// Picks the delimiter from a file extension: `.tsv` and `.tab` mean
    /// [`Delimiter::Tab`], anything else [`Delimiter::Comma`].
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path.as_ref().extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("tsv") || ext.eq_ignore_ascii_case("tab") => {
                Delimiter::Tab
            }
            _ => Delimiter::Comma,
        }
    }

    fn byte(self) -> u8 {
        match self {
            Delimiter::Tab => b'\t',
            Delimiter::Comma => b',',
        }
    }
}

fn reader(
    path: impl AsRef<Path>,
    delimiter: Delimiter,
    has_header: bool,
) -> Result<csv::Reader<std::fs::File>> {
    Ok(ReaderBuilder::new()
        .has_headers(has_header)
        .delimiter(delimiter.byte())
        .trim(Trim::All)
        .flexible(true)
        .from_path(path)?)
}

fn parse_rows<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> Result<Vec<Vec<f64>>> {
    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(rows.len() + 1, |p| p.line() as usize);
        let row = record
            .iter()
            .map(|field| {
                field.parse::<f64>().map_err(|_| AbcError::Parse {
                    line,
                    field: field.to_string(),
                })
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }
    Ok(rows)
}

/**
Reads a headerless delimited file into one `Vec<f64>` per line.

Fields are trimmed before parsing. Rows may have different lengths; checking
the shape is up to the caller.

# Errors

* [`AbcError::Io`] / [`AbcError::Csv`] if the file cannot be read.
* [`AbcError::Parse`] with the 1-based line number for a non-numeric field.
*/
pub fn read_delimited(path: impl AsRef<Path>, delimiter: Delimiter) -> Result<Vec<Vec<f64>>> {
    parse_rows(&mut reader(path, delimiter, false)?)
}

/**
Reads a delimited file whose first line holds column names, such as the
output of [`write_delimited`] with a header.

Returns the column names and the numeric rows below them. Line numbers in
[`AbcError::Parse`] count the header line.
*/
pub fn read_delimited_with_header(
    path: impl AsRef<Path>,
    delimiter: Delimiter,
) -> Result<(Vec<String>, Vec<Vec<f64>>)> {
    let mut rdr = reader(path, delimiter, true)?;
    let names = rdr.headers()?.iter().map(str::to_string).collect();
    let rows = parse_rows(&mut rdr)?;
    Ok((names, rows))
}

/// Reads a delimited file and flattens it row-major into one observation vector.
pub fn read_observed(path: impl AsRef<Path>, delimiter: Delimiter) -> Result<Vec<f64>> {
    Ok(read_delimited(path, delimiter)?
        .into_iter()
        .flatten()
        .collect())
}

/**
Writes one row per sample, each value with eight fractional digits.

# Arguments

* `samples` - Accepted parameter vectors, typically the output of a sampler run.
* `path` - The file to create or truncate.
* `delimiter` - The field separator.
* `header` - Optional column names, e.g. the proposer names.

# Examples

```rust
use mini_abc::io::csv::{read_delimited, write_delimited, Delimiter};

let samples = vec![vec![1.0, 2.5], vec![3.25, -4.0]];
let path = std::env::temp_dir().join("mini_abc_doc_samples.tsv");
write_delimited(&samples, &path, Delimiter::Tab, None)?;
assert_eq!(read_delimited(&path, Delimiter::Tab)?, samples);
# Ok::<(), mini_abc::AbcError>(())
```
*/
pub fn write_delimited(
    samples: &[Vec<f64>],
    path: impl AsRef<Path>,
    delimiter: Delimiter,
    header: Option<&[&str]>,
) -> Result<()> {
    let mut wtr = WriterBuilder::new()
        .delimiter(delimiter.byte())
        .flexible(true)
        .from_path(path)?;

    if let Some(header) = header {
        wtr.write_record(header)?;
    }
    for sample in samples {
        wtr.write_record(sample.iter().map(|v| format!("{v:.8}")))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Writes `samples` comma-delimited without a header.
pub fn save_csv(samples: &[Vec<f64>], path: impl AsRef<Path>) -> Result<()> {
    write_delimited(samples, path, Delimiter::Comma, None)
}

/// Writes `samples` tab-delimited without a header.
pub fn save_tsv(samples: &[Vec<f64>], path: impl AsRef<Path>) -> Result<()> {
    write_delimited(samples, path, Delimiter::Tab, None)
}
