//! Delimiter conversion and CSV output

use std::fs::File;
use std::path::Path;

use polars::prelude::*;
use tracing::info;

use crate::loader::delimiter_byte;
use crate::Result;

/// Rewrite a delimited file with another delimiter
///
/// Records are streamed one at a time and may have differing lengths.
/// Returns the number of records written, header row included.
pub fn convert_delimiter(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    from: char,
    to: char,
) -> Result<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_byte(from)?)
        .has_headers(false)
        .flexible(true)
        .from_path(input.as_ref())?;
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter_byte(to)?)
        .flexible(true)
        .from_path(output.as_ref())?;

    let mut written = 0;
    for record in reader.records() {
        writer.write_record(&record?)?;
        written += 1;
    }
    writer.flush()?;

    info!(
        "Converted '{}' to '{}' ({} records)",
        input.as_ref().display(),
        output.as_ref().display(),
        written
    );
    Ok(written)
}

/// Write a DataFrame with a header row
pub fn save_csv(df: &DataFrame, output: impl AsRef<Path>, delimiter: char) -> Result<()> {
    let mut file = File::create(output.as_ref())?;
    // The writer needs `&mut` to rechunk; write from a copy
    let mut out = df.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(delimiter_byte(delimiter)?)
        .finish(&mut out)?;

    info!("Saved {} rows to '{}'", df.height(), output.as_ref().display());
    Ok(())
}
