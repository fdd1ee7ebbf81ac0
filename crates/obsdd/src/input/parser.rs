//! CSV/TSV loader with delimiter detection and storage class inference.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use super::source::SourceMetadata;
use crate::data::{Column, Dataset, StorageClass, Value};
use crate::error::{ObsddError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Timestamp layouts accepted for temporal columns, tried in order.
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parser configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
    /// Columns to load with temporal storage.
    pub parse_dates: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
            parse_dates: Vec::new(),
        }
    }
}

impl ParserConfig {
    /// Use a fixed delimiter instead of auto-detection.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Load the named columns as timestamps.
    pub fn with_parse_dates(mut self, columns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.parse_dates = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Stop after `max_rows` data rows.
    pub fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }
}

/// Loads delimited text files into a [`Dataset`].
#[derive(Debug, Clone, Default)]
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the dataset and metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Dataset, SourceMetadata)> {
        let path = path.as_ref();
        let io_error = |source| ObsddError::Io {
            path: path.to_path_buf(),
            source,
        };

        let mut file = File::open(path).map_err(io_error)?;
        let size_bytes = file.metadata().map_err(io_error)?.len();

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(io_error)?;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };
        debug!(path = %path.display(), delimiter = %(delimiter as char).escape_default(), "Reading delimited file");

        let dataset = self.parse_bytes(&contents, delimiter)?;

        let source = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            SourceMetadata::format_for_delimiter(delimiter).to_string(),
            dataset.row_count(),
            dataset.column_count(),
        );
        info!(
            file = %source.file,
            rows = source.row_count,
            columns = source.column_count,
            "Loaded dataset"
        );

        Ok((dataset, source))
    }

    /// Parse in-memory bytes with a known delimiter.
    pub fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<Dataset> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = reader.records();

        let headers: Vec<String> = if self.config.has_header {
            match records.next() {
                Some(record) => record?.iter().map(|s| s.to_string()).collect(),
                None => return Err(ObsddError::EmptyData("No header row found".to_string())),
            }
        } else {
            Vec::new()
        };

        let mut rows: Vec<Vec<String>> = Vec::new();
        for result in records {
            if self.config.max_rows.is_some_and(|max| rows.len() >= max) {
                break;
            }
            let record = result?;
            rows.push(record.iter().map(|s| s.to_string()).collect());
        }

        if rows.is_empty() {
            return Err(ObsddError::EmptyData("No data rows found".to_string()));
        }

        let headers = if headers.is_empty() {
            (0..rows[0].len()).map(|i| format!("column_{}", i + 1)).collect()
        } else {
            headers
        };
        if headers.is_empty() {
            return Err(ObsddError::EmptyData("No columns found".to_string()));
        }

        let mut dataset = Dataset::new();
        for (index, name) in headers.iter().enumerate() {
            let cells: Vec<&str> = rows
                .iter()
                .map(|row| row.get(index).map(String::as_str).unwrap_or(""))
                .collect();
            dataset.add_column(self.build_column(name, index, &cells)?)?;
        }

        Ok(dataset)
    }

    /// Turn raw cells into a typed column.
    fn build_column(&self, name: &str, index: usize, cells: &[&str]) -> Result<Column> {
        let storage = if self.config.parse_dates.iter().any(|c| c == name) {
            StorageClass::Temporal
        } else {
            infer_storage_class(cells)
        };
        debug!(column = name, storage = %storage, "Inferred storage class");

        let values = cells
            .iter()
            .enumerate()
            .map(|(row, cell)| parse_cell(cell, storage).map_err(|message| ObsddError::Parse {
                row: row + 1,
                column: index + 1,
                message,
            }))
            .collect::<Result<Vec<Value>>>()?;

        Column::new(name, storage, values)
    }
}

/// Check if a value represents a missing/null value.
pub fn is_null_value(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("na")
        || trimmed.eq_ignore_ascii_case("n/a")
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("null")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("nil")
        || trimmed == "."
}

/// Narrowest storage class that holds every non-missing cell.
///
/// A column without observed cells is float, as a dataframe library would
/// load an all-NaN column.
fn infer_storage_class(cells: &[&str]) -> StorageClass {
    let observed: Vec<&str> = cells
        .iter()
        .filter(|c| !is_null_value(c))
        .map(|c| c.trim())
        .collect();

    if observed.is_empty() {
        StorageClass::Float
    } else if observed.iter().all(|c| c.parse::<i64>().is_ok()) {
        StorageClass::Integer
    } else if observed.iter().all(|c| c.parse::<f64>().is_ok()) {
        StorageClass::Float
    } else if observed.iter().all(|c| parse_bool(c).is_some()) {
        StorageClass::Boolean
    } else {
        StorageClass::Text
    }
}

fn parse_bool(cell: &str) -> Option<bool> {
    if cell.eq_ignore_ascii_case("true") {
        Some(true)
    } else if cell.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_cell(cell: &str, storage: StorageClass) -> std::result::Result<Value, String> {
    if is_null_value(cell) {
        return Ok(Value::Missing);
    }
    let trimmed = cell.trim();

    match storage {
        StorageClass::Text => Ok(Value::Text(cell.to_string())),
        StorageClass::Integer => trimmed
            .parse::<i64>()
            .map(Value::Integer)
            .map_err(|e| format!("invalid integer '{}': {}", trimmed, e)),
        StorageClass::Float => trimmed
            .parse::<f64>()
            .map(Value::from)
            .map_err(|e| format!("invalid number '{}': {}", trimmed, e)),
        StorageClass::Boolean => {
            parse_bool(trimmed).map(Value::Boolean).ok_or_else(|| format!("invalid boolean '{}'", trimmed))
        }
        StorageClass::Temporal => parse_timestamp(trimmed)
            .map(Value::Temporal)
            .ok_or_else(|| format!("invalid timestamp '{}'", trimmed)),
    }
}

fn parse_timestamp(cell: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(cell, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(cell, DATE_FORMAT)
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(ObsddError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        let variance =
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64;

        // Consistent counts beat inconsistent ones; tab wins ties
        let score = if consistent {
            first_count * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter_csv() {
        let data = b"a,b,c\n1,2,3\n4,5,6";
        assert_eq!(detect_delimiter(data).unwrap(), b',');
    }

    #[test]
    fn test_detect_delimiter_tsv() {
        let data = b"a\tb\tc\n1\t2\t3\n4\t5\t6";
        assert_eq!(detect_delimiter(data).unwrap(), b'\t');
    }

    #[test]
    fn test_parse_infers_storage_classes() {
        let parser = Parser::new();
        let data = b"name,age,bmi,smoker\nAlice,30,21.5,true\nBob,NA,19.0,false\nCarol,41,,TRUE";
        let dataset = parser.parse_bytes(data, b',').unwrap();

        assert_eq!(dataset.column_names(), vec!["name", "age", "bmi", "smoker"]);
        assert_eq!(dataset.row_count(), 3);

        let storage = |name: &str| dataset.column(name).unwrap().storage_class();
        assert_eq!(storage("name"), StorageClass::Text);
        assert_eq!(storage("age"), StorageClass::Integer);
        assert_eq!(storage("bmi"), StorageClass::Float);
        assert_eq!(storage("smoker"), StorageClass::Boolean);

        let age = dataset.column("age").unwrap();
        assert_eq!(age.values()[1], Value::Missing);
        assert_eq!(age.values()[2], Value::Integer(41));
    }

    #[test]
    fn test_parse_dates_column() {
        let parser = Parser::with_config(ParserConfig::default().with_parse_dates(["visit"]));
        let data = b"id,visit\n1,2020-01-01\n2,2020-02-15 08:30:00\n3,";
        let dataset = parser.parse_bytes(data, b',').unwrap();
        let visit = dataset.column("visit").unwrap();

        assert_eq!(visit.storage_class(), StorageClass::Temporal);
        assert_eq!(visit.values()[1].to_string(), "2020-02-15 08:30:00");
        assert!(visit.values()[2].is_missing());
    }

    #[test]
    fn test_parse_dates_rejects_bad_timestamp() {
        let parser = Parser::with_config(ParserConfig::default().with_parse_dates(["visit"]));
        let err = parser.parse_bytes(b"visit\nnot-a-date\n", b',').unwrap_err();
        assert!(matches!(err, ObsddError::Parse { row: 1, column: 1, .. }));
    }

    #[test]
    fn test_all_missing_column_is_float() {
        let parser = Parser::new();
        let dataset = parser.parse_bytes(b"a,b\n1,\n2,NA\n", b',').unwrap();
        let b = dataset.column("b").unwrap();
        assert_eq!(b.storage_class(), StorageClass::Float);
        assert_eq!(b.missing_count(), 2);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let parser = Parser::new();
        let dataset = parser.parse_bytes(b"a,b\n1\n2,x\n", b',').unwrap();
        assert!(dataset.column("b").unwrap().values()[0].is_missing());
    }

    #[test]
    fn test_no_header_generates_names() {
        let parser = Parser::with_config(ParserConfig {
            has_header: false,
            ..Default::default()
        });
        let dataset = parser.parse_bytes(b"1,x\n2,y\n", b',').unwrap();
        assert_eq!(dataset.column_names(), vec!["column_1", "column_2"]);
        assert_eq!(dataset.row_count(), 2);
    }

    #[test]
    fn test_max_rows() {
        let parser = Parser::with_config(ParserConfig::default().with_max_rows(2));
        let dataset = parser.parse_bytes(b"a\n1\n2\n3\n", b',').unwrap();
        assert_eq!(dataset.row_count(), 2);
    }

    #[test]
    fn test_header_only_is_empty_data() {
        let parser = Parser::new();
        assert!(matches!(
            parser.parse_bytes(b"a,b\n", b','),
            Err(ObsddError::EmptyData(_))
        ));
    }

    #[test]
    fn test_is_null_value() {
        assert!(is_null_value(""));
        assert!(is_null_value("NA"));
        assert!(is_null_value("na"));
        assert!(is_null_value("N/A"));
        assert!(is_null_value("NaN"));
        assert!(is_null_value("null"));
        assert!(is_null_value("."));
        assert!(!is_null_value("value"));
        assert!(!is_null_value("0"));
    }
}
