pub mod domain;
pub mod application;
pub mod infrastructure;

pub use application::{MaterializeOptions, Materializer};
pub use domain::entity::{
    Axis, Column, ColumnKey, ColumnSchema, DataType, RawValue, ResultSet, Row, Schema, Table, Value,
};
pub use domain::source::{RowSource, SourceError};
pub use infrastructure::source::MemorySource;

// dbresult version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Result table result type
pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("{axis} index {index} is out of range (count {count})")]
    OutOfRange { axis: Axis, index: usize, count: usize },

    #[error("Column '{0}' not found")]
    UnknownColumn(String),

    #[error("Type mismatch in column '{column}': expected {expected}, declared {actual}")]
    TypeMismatch {
        column: String,
        expected: DataType,
        actual: DataType,
    },

    #[error("Cannot convert {value} to {target}")]
    Conversion { value: String, target: DataType },

    #[error("Column '{0}' appears more than once")]
    DuplicateColumn(String),

    #[error("Row {row} has {actual} values, expected {expected}")]
    RowWidth {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Source read error: {source}")]
    SourceRead {
        #[source]
        source: SourceError,
        close_error: Option<SourceError>,
    },

    #[error("Source close error: {source}")]
    SourceClose {
        #[source]
        source: SourceError,
        table: Box<Table>,
    },

    #[error("{error}; source close also failed: {close_error}")]
    Aborted {
        #[source]
        error: Box<Error>,
        close_error: SourceError,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn source_read(source: SourceError) -> Self {
        Error::SourceRead {
            source,
            close_error: None,
        }
    }

    /// 読み込みは成功したがクローズに失敗した場合、materialize済みのテーブルを取り出す
    pub fn into_table(self) -> Option<Table> {
        match self {
            Error::SourceClose { table, .. } => Some(*table),
            _ => None,
        }
    }
}
