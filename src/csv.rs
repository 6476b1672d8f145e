// src/csv.rs
//
// Tabular sink for derived artifacts. Unlike the record logs this is a
// one-shot export: the file is created (truncated) with its header row.

use std::{fs::File, path::Path};

use serde::Serialize;

use crate::file::ensure_directory;

pub struct TableSink {
    out: ::csv::Writer<File>,
    rows: usize,
}

impl TableSink {
    /// Create `path` and write the header row immediately, so an export with
    /// no qualifying rows is still a valid table.
    pub fn create(path: &Path, headers: &[&str]) -> Result<Self, ::csv::Error> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                ensure_directory(parent)?;
            }
        }
        let mut out = ::csv::WriterBuilder::new().has_headers(false).from_path(path)?;
        out.write_record(headers)?;
        Ok(Self { out, rows: 0 })
    }

    pub fn write<T: Serialize>(&mut self, row: &T) -> Result<(), ::csv::Error> {
        self.out.serialize(row)?;
        self.rows += 1;
        Ok(())
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn close(mut self) -> Result<usize, ::csv::Error> {
        self.out.flush()?;
        Ok(self.rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{RatingMatrixRow, MATRIX_HEADERS};

    #[test]
    fn header_then_rows_with_quoting() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("out/matrix.csv");
        let mut sink = TableSink::create(&p, &MATRIX_HEADERS).unwrap();
        sink.write(&RatingMatrixRow {
            venue_id: 7,
            venue_name: s!("Fish, Chips & Co"),
            venue_short_url: s!("https://s.test/a"),
            user_id: s!("99"),
            rating: 4.5,
        })
        .unwrap();
        assert_eq!(sink.close().unwrap(), 1);

        let text = std::fs::read_to_string(&p).unwrap();
        assert_eq!(
            text,
            "venueId,venueName,venueShortUrl,userId,rating\n7,\"Fish, Chips & Co\",https://s.test/a,99,4.5\n"
        );
    }

    #[test]
    fn empty_table_still_has_header() {
        let dir = tempfile::tempdir().unwrap();
        let p = dir.path().join("m.csv");
        TableSink::create(&p, &MATRIX_HEADERS).unwrap().close().unwrap();
        assert_eq!(std::fs::read_to_string(&p).unwrap(), "venueId,venueName,venueShortUrl,userId,rating\n");
    }
}
