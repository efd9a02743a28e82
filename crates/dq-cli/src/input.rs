//! Record ingestion from CSV and JSON-lines files.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use tracing::warn;

use dq_model::{CountryCode, CustomerRecord, FieldKind, RawField};

use crate::cli::InputFormatArg;

/// A CSV column spec: `kind` or `kind:COUNTRY`.
#[derive(Debug, Clone)]
struct ColumnSpec {
    kind: FieldKind,
    country: Option<CountryCode>,
}

/// Read records, inferring the format from the extension when `Auto`.
pub fn read_records(path: &Path, format: InputFormatArg) -> Result<Vec<CustomerRecord>> {
    let format = match format {
        InputFormatArg::Auto => infer_format(path)?,
        other => other,
    };
    match format {
        InputFormatArg::Csv => read_csv(path),
        InputFormatArg::Jsonl => read_jsonl(path),
        InputFormatArg::Auto => unreachable!("inferred above"),
    }
}

fn infer_format(path: &Path) -> Result<InputFormatArg> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("csv") => Ok(InputFormatArg::Csv),
        Some("jsonl" | "ndjson" | "json") => Ok(InputFormatArg::Jsonl),
        other => bail!(
            "cannot infer input format from extension {:?}; pass --format",
            other.unwrap_or("")
        ),
    }
}

fn read_csv(path: &Path) -> Result<Vec<CustomerRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("open CSV input {}", path.display()))?;

    let headers = reader.headers().context("read CSV headers")?.clone();
    let mut columns: Vec<Option<ColumnSpec>> = Vec::with_capacity(headers.len());
    for header in &headers {
        match parse_column(header) {
            Ok(spec) => columns.push(Some(spec)),
            Err(reason) => {
                warn!(header, %reason, "skipping unrecognized CSV column");
                columns.push(None);
            }
        }
    }
    if columns.iter().all(Option::is_none) {
        bail!("no recognized field-kind columns in CSV header");
    }

    let mut records = Vec::new();
    for (line, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("read CSV record #{}", line + 1))?;
        let mut record = CustomerRecord::new();
        for (value, spec) in row.iter().zip(&columns) {
            let Some(spec) = spec else { continue };
            if value.trim().is_empty() {
                continue;
            }
            let mut field = RawField::new(spec.kind, value);
            if let Some(country) = &spec.country {
                field = field.with_country(country.clone());
            }
            record.insert(field);
        }
        records.push(record);
    }
    Ok(records)
}

fn parse_column(header: &str) -> Result<ColumnSpec, String> {
    let (kind_raw, country_raw) = match header.split_once(':') {
        Some((kind, country)) => (kind, Some(country)),
        None => (header, None),
    };
    let kind = FieldKind::from_str(kind_raw).map_err(|e| e.to_string())?;
    let country = match country_raw {
        Some(raw) => Some(CountryCode::new(raw).map_err(|e| e.to_string())?),
        None => None,
    };
    Ok(ColumnSpec { kind, country })
}

/// JSONL rows are flat objects keyed like CSV headers: `{"email": "...",
/// "phone:US": "..."}`.
fn read_jsonl(path: &Path) -> Result<Vec<CustomerRecord>> {
    let file =
        File::open(path).with_context(|| format!("open JSONL input {}", path.display()))?;
    let mut records = Vec::new();
    for (line, text) in BufReader::new(file).lines().enumerate() {
        let text = text.with_context(|| format!("read JSONL line {}", line + 1))?;
        if text.trim().is_empty() {
            continue;
        }
        let row: BTreeMap<String, serde_json::Value> = serde_json::from_str(&text)
            .with_context(|| format!("parse JSONL record on line {}", line + 1))?;
        let mut record = CustomerRecord::new();
        for (key, value) in row {
            let spec = match parse_column(&key) {
                Ok(spec) => spec,
                Err(reason) => {
                    warn!(key, %reason, line = line + 1, "skipping unrecognized JSONL key");
                    continue;
                }
            };
            let Some(value) = value.as_str() else {
                warn!(key, line = line + 1, "skipping non-string JSONL value");
                continue;
            };
            if value.trim().is_empty() {
                continue;
            }
            let mut field = RawField::new(spec.kind, value);
            if let Some(country) = &spec.country {
                field = field.with_country(country.clone());
            }
            record.insert(field);
        }
        records.push(record);
    }
    Ok(records)
}

/// Parse the `--require` list into a schema's mandatory kinds.
pub fn parse_required_kinds(spec: &str) -> Result<Vec<FieldKind>> {
    spec.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| FieldKind::from_str(part).map_err(Into::into))
        .collect()
}
