//! Human and machine readable outcome of a solved problem.

use std::fmt::Display;
use std::path::Path;

use serde::Serialize;

/// Title, summary metrics and an optional result table.
///
/// # Examples
///
/// ```
/// use climber_problems::Report;
///
/// let report = Report::new("Lab route")
///     .with_summary("distance", "42.00")
///     .with_table(["Stop", "Lab"], vec![vec!["1".to_string(), "A".to_string()]]);
///
/// assert_eq!(report.summary_value("distance"), Some("42.00"));
/// assert_eq!(report.rows.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub title: String,
    pub summary: Vec<(String, String)>,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Report {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_summary(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.summary.push((key.into(), value.to_string()));
        self
    }

    pub fn with_table<H>(mut self, headers: H, rows: Vec<Vec<String>>) -> Self
    where
        H: IntoIterator,
        H::Item: Into<String>,
    {
        self.headers = headers.into_iter().map(Into::into).collect();
        self.rows = rows;
        self
    }

    pub fn summary_value(&self, key: &str) -> Option<&str> {
        self.summary
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_table(&self) -> bool {
        !self.headers.is_empty()
    }

    /// Writes the table, header row first.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), csv::Error> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(&self.headers)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }
}
