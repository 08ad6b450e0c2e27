// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! CSV ingestion.
//!
//! The first record of a file is its header; every later record becomes a
//! [`Row`] keyed by the header names, in column order.
//!
//! | Entry point | Shape |
//! |-------------|-------|
//! | [`rows`] | Lazy, single-pass iterator of `Result<Row, CsvError>` |
//! | [`read_all`] | All rows in file order, parsed on a blocking worker |
//! | [`CsvSource`] | A configured path with both of the above |
//!
//! Parsing stops at the first malformed record and partial results are
//! discarded. `read_all` buffers the whole file, so it suits small files
//! only.

use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf}
};

use serde::{Serialize, Serializer, ser::SerializeMap};

/// CSV ingestion errors.
///
/// `Display` never includes the file path or operating system error text;
/// both are available through `Debug` and [`std::error::Error::source`] for
/// server-side logs.
#[derive(Debug, thiserror::Error)]
pub enum CsvError {
    /// The file could not be opened.
    #[error("CSV source could not be opened")]
    Open {
        /// File that failed to open.
        path:   PathBuf,
        /// Operating system error.
        #[source]
        source: io::Error
    },

    /// The underlying reader failed part way through.
    #[error("CSV source could not be read at line {line}")]
    Read {
        /// Line being read.
        line:   u64,
        /// Reader error.
        #[source]
        source: csv::Error
    },

    /// A record is malformed.
    #[error("malformed CSV record at line {line}: {reason}")]
    Parse {
        /// Line of the bad record.
        line:   u64,
        /// Client-safe description.
        reason: String,
        /// Parser error.
        #[source]
        source: csv::Error
    },

    /// The blocking parse task panicked or was cancelled.
    #[error("CSV parsing task did not complete")]
    Worker(#[source] tokio::task::JoinError)
}

impl CsvError {
    fn from_csv(error: csv::Error, fallback_line: u64) -> Self {
        let line = error.position().map_or(fallback_line, csv::Position::line);
        let reason = match error.kind() {
            csv::ErrorKind::Io(_) => {
                return Self::Read {
                    line,
                    source: error
                };
            }
            csv::ErrorKind::UnequalLengths {
                expected_len,
                len,
                ..
            } => format!("found {len} fields, header has {expected_len}"),
            csv::ErrorKind::Utf8 {
                ..
            } => "invalid UTF-8".to_string(),
            _ => "unreadable record".to_string()
        };
        Self::Parse {
            line,
            reason,
            source: error
        }
    }
}

/// One data record, as `(header, value)` pairs in column order.
///
/// Serializes as a JSON object whose keys keep the column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row(Vec<(String, String)>);

impl Row {
    /// Value under `header`, if the column exists.
    pub fn get(&self, header: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(name, _)| name == header)
            .map(|(_, value)| value.as_str())
    }

    /// `(header, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True for a record with no columns.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for Row {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Lazy row iterator over a CSV reader.
///
/// Yields at most one error, after which it is exhausted.
pub struct Rows<R> {
    header:    csv::StringRecord,
    records:   csv::StringRecordsIntoIter<R>,
    last_line: u64,
    finished:  bool
}

impl<R: Read> Rows<R> {
    /// Read the header from `reader` and prepare to iterate the records.
    pub fn from_reader(reader: R) -> Result<Self, CsvError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(false)
            .from_reader(reader);
        let header = reader
            .headers()
            .map_err(|e| CsvError::from_csv(e, 1))?
            .clone();

        Ok(Self {
            header,
            records: reader.into_records(),
            last_line: 1,
            finished: false
        })
    }

    /// Column names in file order.
    pub fn header(&self) -> impl Iterator<Item = &str> {
        self.header.iter()
    }
}

impl<R: Read> Iterator for Rows<R> {
    type Item = Result<Row, CsvError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self.records.next()? {
            Ok(record) => {
                if let Some(position) = record.position() {
                    self.last_line = position.line();
                }
                let row = Row(self
                    .header
                    .iter()
                    .zip(record.iter())
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect());
                tracing::trace!(line = self.last_line, ?row, "parsed CSV row");
                Some(Ok(row))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(CsvError::from_csv(e, self.last_line + 1)))
            }
        }
    }
}

/// Open `path` and return its rows lazily.
pub fn rows(path: impl AsRef<Path>) -> Result<Rows<File>, CsvError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| CsvError::Open {
        path: path.to_path_buf(),
        source
    })?;
    Rows::from_reader(file)
}

/// Parse every row of `path` on a blocking worker thread.
///
/// Completes exactly once: either all rows in file order, or the first
/// error.
pub async fn read_all(path: impl AsRef<Path>) -> Result<Vec<Row>, CsvError> {
    let path = path.as_ref().to_path_buf();
    tokio::task::spawn_blocking(move || -> Result<Vec<Row>, CsvError> { rows(&path)?.collect() })
        .await
        .map_err(CsvError::Worker)?
}

/// A CSV file at a fixed path.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf
}

impl CsvSource {
    /// Source reading `path` on every request.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into()
        }
    }

    /// Configured file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Lazy record iterator, see [`rows`].
    pub fn rows(&self) -> Result<Rows<File>, CsvError> {
        rows(&self.path)
    }

    /// Every record, see [`read_all`].
    pub async fn read_all(&self) -> Result<Vec<Row>, CsvError> {
        read_all(&self.path).await
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rstest::rstest;
    use tempfile::NamedTempFile;

    use super::*;

    fn fixture(contents: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn reads_rows_in_file_order() {
        let file = fixture(b"id,name\n1,Harsh\n2,Veer\n");
        let rows = read_all(file.path()).await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("id"), Some("1"));
        assert_eq!(rows[0].get("name"), Some("Harsh"));
        assert_eq!(rows[1].get("name"), Some("Veer"));
        assert_eq!(
            serde_json::to_string(&rows).unwrap(),
            r#"[{"id":"1","name":"Harsh"},{"id":"2","name":"Veer"}]"#
        );
    }

    #[test]
    fn row_keys_keep_header_order() {
        let rows: Vec<Row> = Rows::from_reader(&b"zeta,alpha,mid\n1,2,3\n"[..])
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            serde_json::to_string(&rows[0]).unwrap(),
            r#"{"zeta":"1","alpha":"2","mid":"3"}"#
        );
        let names: Vec<_> = rows[0].iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[rstest]
    #[case(b"")]
    #[case(b"id,name\n")]
    #[case(b"id,name")]
    fn header_only_or_empty_is_no_rows(#[case] contents: &[u8]) {
        let rows = Rows::from_reader(contents).unwrap().collect::<Result<Vec<_>, _>>();
        assert!(rows.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_file_fails_without_leaking_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.csv");
        let err = read_all(&path).await.unwrap_err();

        assert!(matches!(err, CsvError::Open { .. }));
        let message = err.to_string();
        assert!(!message.contains("absent.csv"));
        assert_eq!(message, "CSV source could not be opened");
    }

    #[tokio::test]
    async fn ragged_row_fails_the_whole_read() {
        let file = fixture(b"id,name\n1,Harsh\n2\n3,Veer\n");
        let err = read_all(file.path()).await.unwrap_err();
        match err {
            CsvError::Parse {
                line, ..
            } => assert_eq!(line, 3),
            other => panic!("unexpected error: {other:?}")
        }
    }

    #[test]
    fn extra_column_is_malformed() {
        let err = Rows::from_reader(&b"a,b\n1,2,3\n"[..])
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "malformed CSV record at line 2: found 3 fields, header has 2"
        );
    }

    #[test]
    fn invalid_utf8_is_malformed() {
        let err = Rows::from_reader(&b"a,b\n1,\xff\xfe\n"[..])
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap_err();
        assert!(err.to_string().contains("invalid UTF-8"), "{err}");
    }

    #[test]
    fn iterator_stops_after_first_error() {
        let mut rows = Rows::from_reader(&b"a,b\n1\n2\n3,4\n"[..]).unwrap();
        assert!(matches!(rows.next(), Some(Err(CsvError::Parse { .. }))));
        assert!(rows.next().is_none());
        assert!(rows.next().is_none());
    }

    #[test]
    fn rows_are_lazy() {
        let mut rows = Rows::from_reader(&b"a\n1\n2\n"[..]).unwrap();
        assert_eq!(rows.header().collect::<Vec<_>>(), vec!["a"]);
        assert_eq!(rows.next().unwrap().unwrap().get("a"), Some("1"));
        assert_eq!(rows.next().unwrap().unwrap().get("a"), Some("2"));
        assert!(rows.next().is_none());
    }

    #[tokio::test]
    async fn source_reads_its_path() {
        let file = fixture(b"k\nv\n");
        let source = CsvSource::new(file.path());
        assert_eq!(source.path(), file.path());
        assert_eq!(source.rows().unwrap().count(), 1);
        assert_eq!(source.read_all().await.unwrap()[0].get("k"), Some("v"));
    }
}
