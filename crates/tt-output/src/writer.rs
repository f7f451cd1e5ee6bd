//! Writing result frames to disk.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::{AnyValue, DataFrame};
use serde_json::{Map, Value};
use tracing::info;

use tt_common::any_to_string;

/// Export container for result tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Comma-delimited text with a header row.
    #[default]
    Csv,
    /// A JSON array of records keyed by column name.
    Json,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
        }
    }
}

/// Frame cells as strings, row by row.
pub fn frame_rows(df: &DataFrame) -> Vec<Vec<String>> {
    let columns = df.get_columns();
    (0..df.height())
        .map(|idx| {
            columns
                .iter()
                .map(|column| any_to_string(column.get(idx).unwrap_or(AnyValue::Null)))
                .collect()
        })
        .collect()
}

fn column_names(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|name| name.to_string())
        .collect()
}

/// Ensure a parent directory exists for a file path.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    Ok(())
}

/// Writes a frame as CSV with a header row.
pub fn write_csv<W: Write>(df: &DataFrame, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(column_names(df)).context("write csv header")?;
    for row in frame_rows(df) {
        csv.write_record(&row).context("write csv row")?;
    }
    csv.flush().context("flush csv")?;
    Ok(())
}

/// Writes a frame as a pretty-printed JSON array of records.
pub fn write_json<W: Write>(df: &DataFrame, mut writer: W) -> Result<()> {
    let names = column_names(df);
    let records: Vec<Value> = frame_rows(df)
        .into_iter()
        .map(|row| {
            let record: Map<String, Value> = names
                .iter()
                .cloned()
                .zip(row.into_iter().map(Value::String))
                .collect();
            Value::Object(record)
        })
        .collect();
    serde_json::to_writer_pretty(&mut writer, &records).context("serialize json records")?;
    writeln!(writer).context("write json")?;
    Ok(())
}

/// Writes a frame to `path` in `format`, creating parent directories.
pub fn write_frame(df: &DataFrame, path: &Path, format: OutputFormat) -> Result<()> {
    ensure_parent_dir(path)?;
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let writer = BufWriter::new(file);
    match format {
        OutputFormat::Csv => write_csv(df, writer),
        OutputFormat::Json => write_json(df, writer),
    }
    .with_context(|| format!("write {}", path.display()))?;
    info!(
        path = %path.display(),
        rows = df.height(),
        format = format.extension(),
        "wrote output"
    );
    Ok(())
}

/// Writes a frame as `<dir>/<stem>.<ext>` and returns the path.
pub fn write_named(df: &DataFrame, dir: &Path, stem: &str, format: OutputFormat) -> Result<PathBuf> {
    let path = dir.join(format!("{stem}.{}", format.extension()));
    write_frame(df, &path, format)?;
    Ok(path)
}
