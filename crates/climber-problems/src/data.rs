//! Tabular input for problem adapters.
//!
//! A [`DataLoader`] turns a file into a [`Dataset`]: a header row plus string
//! records. Adapters pull typed columns out of the dataset and fail with
//! [`DataUnavailable`] before any search runs.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// The input of a problem cannot be used.
#[derive(Debug, Error)]
pub enum DataUnavailable {
    #[error("data file not found: {}", path.display())]
    Missing { path: PathBuf },

    #[error("malformed data in {}: {message}", path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("missing column '{column}'")]
    MissingColumn { column: String },

    #[error("invalid value '{value}' in column '{column}' at row {row}")]
    InvalidValue {
        column: String,
        row: usize,
        value: String,
    },

    #[error("no data rows in {}", path.display())]
    Empty { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, DataUnavailable>;

/// Reads a dataset from a path.
pub trait DataLoader {
    fn load(&self, path: &Path) -> Result<Dataset>;
}

/// CSV reader with a configurable delimiter. Cells are trimmed.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use climber_problems::data::{CsvLoader, DataLoader};
///
/// let enrollment = CsvLoader::tab().load(Path::new("enrollment.tsv")).unwrap();
/// println!("{} rows", enrollment.len());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvLoader {
    delimiter: u8,
}

impl Default for CsvLoader {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tab-separated values.
    pub fn tab() -> Self {
        Self::new().with_delimiter(b'\t')
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }
}

impl DataLoader for CsvLoader {
    fn load(&self, path: &Path) -> Result<Dataset> {
        let malformed = |err: csv::Error| match err.kind() {
            csv::ErrorKind::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
                DataUnavailable::Missing {
                    path: path.to_path_buf(),
                }
            }
            _ => DataUnavailable::Malformed {
                path: path.to_path_buf(),
                message: err.to_string(),
            },
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(malformed)?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(malformed)?
            .iter()
            .map(str::to_string)
            .collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(malformed)?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        if headers.is_empty() || rows.is_empty() {
            return Err(DataUnavailable::Empty {
                path: path.to_path_buf(),
            });
        }
        Ok(Dataset { headers, rows })
    }
}

/// A header row and its records, all as strings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Dataset {
    /// Builds a dataset in memory. Every row must be as wide as `headers`.
    pub fn from_records<H, R, V>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
        R: IntoIterator<Item = V>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.headers
            .iter()
            .position(|header| header == name)
            .ok_or_else(|| DataUnavailable::MissingColumn {
                column: name.to_string(),
            })
    }

    /// Raw cell. Out-of-range positions read as the empty string.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map_or("", String::as_str)
    }

    /// Cell parsed as a number.
    pub fn f64_at(&self, row: usize, column: usize) -> Result<f64> {
        let raw = self.cell(row, column);
        raw.parse::<f64>()
            .map_err(|_| DataUnavailable::InvalidValue {
                column: self.header_name(column),
                row,
                value: raw.to_string(),
            })
    }

    /// Cell parsed as a 0/1 flag. `true`/`false` are accepted too.
    pub fn flag_at(&self, row: usize, column: usize) -> Result<bool> {
        match self.cell(row, column) {
            "1" | "true" | "True" | "TRUE" => Ok(true),
            "0" | "false" | "False" | "FALSE" => Ok(false),
            raw => Err(DataUnavailable::InvalidValue {
                column: self.header_name(column),
                row,
                value: raw.to_string(),
            }),
        }
    }

    pub fn str_column(&self, name: &str) -> Result<Vec<&str>> {
        let column = self.column_index(name)?;
        Ok((0..self.len()).map(|row| self.cell(row, column)).collect())
    }

    pub fn f64_column(&self, name: &str) -> Result<Vec<f64>> {
        let column = self.column_index(name)?;
        (0..self.len()).map(|row| self.f64_at(row, column)).collect()
    }

    pub fn flag_column(&self, name: &str) -> Result<Vec<bool>> {
        let column = self.column_index(name)?;
        (0..self.len()).map(|row| self.flag_at(row, column)).collect()
    }

    /// Values of the first column, used as row labels.
    pub fn row_labels(&self) -> Vec<&str> {
        (0..self.len()).map(|row| self.cell(row, 0)).collect()
    }

    /// Indices of the columns whose every cell parses as a number.
    pub fn numeric_columns(&self) -> Vec<usize> {
        (0..self.headers.len())
            .filter(|&column| {
                (0..self.len()).all(|row| self.cell(row, column).parse::<f64>().is_ok())
            })
            .collect()
    }

    fn header_name(&self, column: usize) -> String {
        self.headers
            .get(column)
            .cloned()
            .unwrap_or_else(|| format!("#{}", column))
    }
}
