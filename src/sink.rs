use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tracing::info;

use crate::error::GrabError;

/// Which table a batch belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
    Cases,
    Opinions,
}

impl Table {
    pub fn name(self) -> &'static str {
        match self {
            Table::Cases => "cases",
            Table::Opinions => "opinions",
        }
    }
}

/// Destination for finished tables.
pub trait TableSink {
    fn write(&mut self, table: Table, batch: &RecordBatch) -> Result<(), GrabError>;
}

/// Write one batch as a complete Parquet file.
pub fn write_parquet<W: Write + Send>(dest: W, batch: &RecordBatch) -> Result<(), GrabError> {
    let mut writer = ArrowWriter::try_new(dest, batch.schema(), None)?;
    writer.write(batch)?;
    writer.close()?;
    Ok(())
}

/// A single destination path, e.g. the `cases` command's output file. `-`
/// means stdout. Nothing is opened until the table arrives, so a run that
/// fails before writing leaves an existing file untouched.
pub struct ParquetFile {
    path: PathBuf,
    written: bool,
}

impl ParquetFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            written: false,
        }
    }

    fn open(&self) -> Result<Box<dyn Write + Send>, GrabError> {
        if self.path == Path::new("-") {
            Ok(Box::new(io::stdout()))
        } else {
            Ok(Box::new(BufWriter::new(File::create(&self.path)?)))
        }
    }
}

impl TableSink for ParquetFile {
    fn write(&mut self, table: Table, batch: &RecordBatch) -> Result<(), GrabError> {
        if self.written {
            return Err(GrabError::Sink(format!(
                "{} already holds a table, cannot also write {}",
                self.path.display(),
                table.name()
            )));
        }
        write_parquet(self.open()?, batch)?;
        self.written = true;
        info!(
            "Wrote {} rows of {} to {}",
            batch.num_rows(),
            table.name(),
            self.path.display()
        );
        Ok(())
    }
}

/// Writes `{dir}/{year}_{table}.parquet`, one file per table.
pub struct ParquetDir {
    dir: PathBuf,
    year: i32,
}

impl ParquetDir {
    pub fn new(dir: impl Into<PathBuf>, year: i32) -> Self {
        Self {
            dir: dir.into(),
            year,
        }
    }

    pub fn path_for(&self, table: Table) -> PathBuf {
        self.dir.join(format!("{}_{}.parquet", self.year, table.name()))
    }
}

impl TableSink for ParquetDir {
    fn write(&mut self, table: Table, batch: &RecordBatch) -> Result<(), GrabError> {
        let path = self.path_for(table);
        let file = BufWriter::new(File::create(&path)?);
        write_parquet(file, batch)?;
        info!("Wrote {} rows to {}", batch.num_rows(), path.display());
        Ok(())
    }
}

// ── Tests ──

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{to_batch, CaseRecord, OpinionRecord};
    use arrow::array::StringArray;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    fn read_back(path: &Path) -> Vec<RecordBatch> {
        let file = File::open(path).unwrap();
        ParquetRecordBatchReaderBuilder::try_new(file)
            .unwrap()
            .build()
            .unwrap()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    fn case(name: &str) -> CaseRecord {
        CaseRecord {
            case: name.into(),
            docket_num: "410".into(),
            date: "January 22, 1973".into(),
            url: "https://supreme.justia.com/cases/federal/us/410/113/".into(),
        }
    }

    #[test]
    fn dir_paths() {
        let sink = ParquetDir::new("/data/out", 1973);
        assert_eq!(
            sink.path_for(Table::Cases),
            PathBuf::from("/data/out/1973_cases.parquet")
        );
        assert_eq!(
            sink.path_for(Table::Opinions),
            PathBuf::from("/data/out/1973_opinions.parquet")
        );
    }

    #[test]
    fn dir_sink_round_trips_cases() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = ParquetDir::new(tmp.path(), 1973);
        let batch = to_batch(&[case("Roe v. Wade"), case("Doe v. Bolton")]).unwrap();
        sink.write(Table::Cases, &batch).unwrap();

        let batches = read_back(&tmp.path().join("1973_cases.parquet"));
        let rows: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(rows, 2);
        let names = batches[0]
            .column_by_name("case")
            .unwrap()
            .as_any()
            .downcast_ref::<StringArray>()
            .unwrap();
        assert_eq!(names.value(1), "Doe v. Bolton");
    }

    #[test]
    fn empty_table_is_still_written() {
        let tmp = tempfile::tempdir().unwrap();
        let mut sink = ParquetDir::new(tmp.path(), 1800);
        sink.write(Table::Opinions, &to_batch::<OpinionRecord>(&[]).unwrap())
            .unwrap();

        let path = tmp.path().join("1800_opinions.parquet");
        let builder = ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap()).unwrap();
        let names: Vec<String> = builder
            .schema()
            .fields()
            .iter()
            .map(|f| f.name().clone())
            .collect();
        assert_eq!(names, ["url", "title", "opinion"]);
        assert_eq!(builder.metadata().file_metadata().num_rows(), 0);
    }

    #[test]
    fn file_sink_takes_one_table() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cases.parquet");
        let mut sink = ParquetFile::new(&path);
        let batch = to_batch(&[case("Roe v. Wade")]).unwrap();
        sink.write(Table::Cases, &batch).unwrap();

        assert!(matches!(
            sink.write(Table::Cases, &batch),
            Err(GrabError::Sink(_))
        ));
        let rows: usize = read_back(&path).iter().map(|b| b.num_rows()).sum();
        assert_eq!(rows, 1);
    }

    #[test]
    fn file_sink_opens_lazily() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("cases.parquet");
        std::fs::write(&path, b"previous good output").unwrap();

        // A run that fails before its table is ready drops the sink unused.
        let sink = ParquetFile::new(&path);
        drop(sink);
        assert_eq!(std::fs::read(&path).unwrap(), b"previous good output");

        let sink = ParquetFile::new(tmp.path().join("missing.parquet"));
        drop(sink);
        assert!(!tmp.path().join("missing.parquet").exists());
    }
}
