use crate::domain::entity::{DataType, RawValue};

// 上流カーソルのエラー
#[derive(thiserror::Error, Debug)]
pub enum SourceError {
    #[error("Read failed: {0}")]
    Read(String),

    #[error("Field ordinal {ordinal} is out of range (field count {field_count})")]
    Ordinal { ordinal: usize, field_count: usize },

    #[error("Row {row} reports {actual} fields, expected {expected}")]
    FieldCountChanged {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Source is closed")]
    Closed,

    #[error("Close failed: {0}")]
    Close(String),

    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// 前方専用・一回限りの結果カーソル（データベースの問い合わせ結果など）
///
/// メタデータ（`field_count`、`name`、`field_type`）は1つの結果の全行で変わらない。
pub trait RowSource {
    /// 最初の `read` の前に、行が存在するかどうか
    fn has_rows(&self) -> bool;

    /// 次の行に進む。行が尽きたら `false`
    fn read(&mut self) -> Result<bool, SourceError>;

    fn field_count(&self) -> usize;

    fn name(&self, ordinal: usize) -> Result<String, SourceError>;

    fn field_type(&self, ordinal: usize) -> Result<DataType, SourceError>;

    /// 現在の行の値
    fn value(&self, ordinal: usize) -> Result<RawValue, SourceError>;

    /// カーソル（と接続）を解放する
    fn close(&mut self) -> Result<(), SourceError>;
}

impl<S: RowSource + ?Sized> RowSource for Box<S> {
    fn has_rows(&self) -> bool {
        (**self).has_rows()
    }

    fn read(&mut self) -> Result<bool, SourceError> {
        (**self).read()
    }

    fn field_count(&self) -> usize {
        (**self).field_count()
    }

    fn name(&self, ordinal: usize) -> Result<String, SourceError> {
        (**self).name(ordinal)
    }

    fn field_type(&self, ordinal: usize) -> Result<DataType, SourceError> {
        (**self).field_type(ordinal)
    }

    fn value(&self, ordinal: usize) -> Result<RawValue, SourceError> {
        (**self).value(ordinal)
    }

    fn close(&mut self) -> Result<(), SourceError> {
        (**self).close()
    }
}
