use std::sync::Arc;

use arrow::array::{ArrayRef, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::error::ArrowError;
use arrow::record_batch::RecordBatch;

/// One entry on a year listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseRecord {
    pub case: String,
    pub docket_num: String,
    pub date: String,
    pub url: String,
}

/// One opinion embedded in a case detail page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpinionRecord {
    pub url: String,
    pub title: String,
    pub opinion: String,
}

/// A flat record of text cells that can be laid out as a table.
///
/// `COLUMNS` is the column order of the written table; `cell(i)` returns the
/// value for `COLUMNS[i]`.
pub trait Tabular {
    const COLUMNS: &'static [&'static str];

    fn cell(&self, column: usize) -> &str;
}

impl Tabular for CaseRecord {
    const COLUMNS: &'static [&'static str] = &["case", "docket_num", "date", "url"];

    fn cell(&self, column: usize) -> &str {
        match column {
            0 => &self.case,
            1 => &self.docket_num,
            2 => &self.date,
            _ => &self.url,
        }
    }
}

impl Tabular for OpinionRecord {
    const COLUMNS: &'static [&'static str] = &["url", "title", "opinion"];

    fn cell(&self, column: usize) -> &str {
        match column {
            0 => &self.url,
            1 => &self.title,
            _ => &self.opinion,
        }
    }
}

pub fn schema_for<R: Tabular>() -> Arc<Schema> {
    let fields: Vec<Field> = R::COLUMNS
        .iter()
        .map(|name| Field::new(*name, DataType::Utf8, false))
        .collect();
    Arc::new(Schema::new(fields))
}

/// Lay rows out column by column. An empty slice gives a zero-row batch that
/// still carries the full schema.
pub fn to_batch<R: Tabular>(rows: &[R]) -> Result<RecordBatch, ArrowError> {
    let columns: Vec<ArrayRef> = (0..R::COLUMNS.len())
        .map(|i| {
            let values = StringArray::from_iter_values(rows.iter().map(|r| r.cell(i)));
            Arc::new(values) as ArrayRef
        })
        .collect();
    RecordBatch::try_new(schema_for::<R>(), columns)
}

// ── Tests ──
