use crate::error::{Error, Result};
use crate::features::FeatureRow;
use std::fs::{File, OpenOptions};
use std::path::PathBuf;
use tracing::debug;

/// Appends feature rows to a CSV file.
///
/// The header is written only when the file is physically empty at the time of
/// the append; there is no separate "header written" marker. Rows appended to a
/// non-empty file are laid out in that file's existing header order, and a row
/// whose columns differ from the header is refused.
pub struct RowWriter {
    path: PathBuf,
}

impl RowWriter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn append(&self, row: &FeatureRow) -> Result<()> {
        let file = OpenOptions::new()
            .read(true)
            .append(true)
            .create(true)
            .open(&self.path)?;
        let empty = file.metadata()?.len() == 0;

        let header = if empty {
            row.header()
        } else {
            self.existing_header(&file, row)?
        };
        let cells = header
            .iter()
            .map(|column| row.cell(column).unwrap_or_default())
            .collect::<Vec<_>>();

        let mut w = csv::WriterBuilder::new()
            .has_headers(false)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&file);
        if empty {
            debug!(path = %self.path.display(), columns = header.len(), "writing header");
            w.write_record(&header)?;
        }
        w.write_record(&cells)?;
        w.flush()?;
        Ok(())
    }

    /// Header of a non-empty target, checked against the row's own columns
    fn existing_header(&self, file: &File, row: &FeatureRow) -> Result<Vec<String>> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(file);
        let existing: Vec<String> = match rdr.records().next() {
            Some(record) => record?.iter().map(String::from).collect(),
            None => Vec::new(),
        };

        let mut expected = row.header();
        let mut have = existing.clone();
        expected.sort_unstable();
        have.sort_unstable();
        if expected != have {
            return Err(Error::HeaderMismatch {
                path: self.path.clone(),
                expected: existing,
                found: row.header(),
            });
        }
        Ok(existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureMap;

    fn row(artifact: &str, n: u64) -> FeatureRow {
        let mut m = FeatureMap::new("malfind");
        m.count("ninjections", n);
        let mut p = FeatureMap::new("dlllist");
        p.count("ndlls", n * 10).ratio("avg_dlls_per_proc", 2.5);
        let mut r = FeatureRow::new(artifact);
        r.merge(m).unwrap();
        r.merge(p).unwrap();
        r
    }

    #[test]
    fn header_written_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        let w = RowWriter::new(&path);
        w.append(&row("a.dmp", 1)).unwrap();
        w.append(&row("b.dmp", 2)).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "malfind.ninjections,dlllist.ndlls,dlllist.avg_dlls_per_proc,dump_name",
                "1,10,2.5,a.dmp",
                "2,20,2.5,b.dmp",
            ]
        );

        // a fresh writer on the same, now non-empty file adds no header
        RowWriter::new(&path).append(&row("c.dmp", 3)).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 4);
        assert_eq!(text.matches("dump_name").count(), 1);
    }

    #[test]
    fn follows_existing_header_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(
            &path,
            "dump_name,dlllist.avg_dlls_per_proc,dlllist.ndlls,malfind.ninjections\n",
        )
        .unwrap();
        RowWriter::new(&path).append(&row("a.dmp", 4)).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().nth(1), Some("a.dmp,2.5,40,4"));
    }

    #[test]
    fn mismatched_row_refused() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        std::fs::write(&path, "pslist.nproc,dump_name\n3,old.dmp\n").unwrap();
        let err = RowWriter::new(&path).append(&row("a.dmp", 1)).unwrap_err();
        assert!(matches!(err, Error::HeaderMismatch { .. }));
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "pslist.nproc,dump_name\n3,old.dmp\n");
    }
}
