//! Corpus ingestion from the labeled statements CSV.
//!
//! The input file carries one row per statement with a `statement` text
//! column and a `status` category column; any other columns (such as a
//! leading unnamed index) are ignored. Rows missing either field are
//! dropped and counted rather than failing the load, since the source
//! data is scraped and gaps are expected.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, SentirError};

/// One labeled statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Raw statement text as it appeared in the file.
    pub statement: String,
    /// Category label, e.g. `"Depression"` or `"Normal"`.
    pub status: String,
}

/// The loaded dataset plus bookkeeping about dropped rows.
///
/// # Examples
///
/// ```
/// use sentir::data::Corpus;
///
/// let csv = "\
/// ,statement,status
/// 0,oh my gosh,Anxiety
/// 1,everything hurts,Depression
/// 2,,Depression
/// ";
/// let corpus = Corpus::from_reader(csv.as_bytes()).unwrap();
/// assert_eq!(corpus.len(), 2);
/// assert_eq!(corpus.n_skipped(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    records: Vec<Record>,
    n_missing_statement: usize,
    n_missing_status: usize,
}

impl Corpus {
    /// Load a corpus from a CSV file on disk.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the file cannot be opened, a CSV error
    /// for malformed rows, and [`SentirError::MissingColumn`] when the
    /// header lacks `statement` or `status`.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        let corpus = Self::from_reader(BufReader::new(file))?;
        info!(
            rows = corpus.len(),
            skipped = corpus.n_skipped(),
            path = %path.as_ref().display(),
            "loaded corpus"
        );
        Ok(corpus)
    }

    /// Load a corpus from any CSV reader.
    ///
    /// Fields are decoded as UTF-8 with a byte-for-byte Latin-1
    /// fallback, so the occasional stray Windows-encoded row does not
    /// abort the load.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);

        let headers = csv_reader.byte_headers()?.clone();
        let statement_col = find_column(&headers, "statement")?;
        let status_col = find_column(&headers, "status")?;

        let mut corpus = Corpus::default();
        for row in csv_reader.byte_records() {
            let row = row?;
            let statement = row.get(statement_col).map(decode_field);
            let status = row.get(status_col).map(decode_field);
            match (statement, status) {
                (Some(statement), Some(status))
                    if !statement.trim().is_empty() && !status.trim().is_empty() =>
                {
                    corpus.records.push(Record {
                        statement,
                        status: status.trim().to_string(),
                    });
                }
                (None, _) => corpus.n_missing_statement += 1,
                (Some(statement), _) => {
                    if statement.trim().is_empty() {
                        corpus.n_missing_statement += 1;
                    } else {
                        corpus.n_missing_status += 1;
                    }
                }
            }
        }
        Ok(corpus)
    }

    /// Kept records, in file order.
    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Number of kept records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no records survived the load.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows dropped for a missing or blank statement.
    #[must_use]
    pub fn n_missing_statement(&self) -> usize {
        self.n_missing_statement
    }

    /// Rows dropped for a missing or blank status.
    #[must_use]
    pub fn n_missing_status(&self) -> usize {
        self.n_missing_status
    }

    /// Total dropped rows.
    #[must_use]
    pub fn n_skipped(&self) -> usize {
        self.n_missing_statement + self.n_missing_status
    }

    /// Statement texts, in file order.
    #[must_use]
    pub fn statements(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.statement.as_str()).collect()
    }

    /// Status labels, in file order.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.status.as_str()).collect()
    }

    /// Records per category, sorted by category name.
    #[must_use]
    pub fn class_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for record in &self.records {
            *counts.entry(record.status.clone()).or_insert(0) += 1;
        }
        counts
    }
}

fn find_column(headers: &csv::ByteRecord, name: &str) -> Result<usize> {
    headers
        .iter()
        .position(|h| decode_field(h).trim() == name)
        .ok_or_else(|| SentirError::MissingColumn {
            column: name.to_string(),
        })
}

/// UTF-8 decode with Latin-1 fallback. Latin-1 maps each byte to the
/// code point of the same value, so the fallback never fails.
fn decode_field(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}
