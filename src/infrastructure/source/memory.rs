use crate::domain::entity::{ColumnSchema, DataType, RawValue, ResultSet};
use crate::domain::source::{RowSource, SourceError};

/// メモリ上の行を返す [`RowSource`] の実装
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    columns: Vec<ColumnSchema>,
    rows: Vec<Vec<RawValue>>,
    // 現在の行（最初の `read` の前は None）
    cursor: Option<usize>,
    closed: bool,
    close_calls: usize,
}

impl MemorySource {
    pub fn new(columns: Vec<ColumnSchema>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    /// 行を追加する（ビルダーパターン）
    pub fn with_row(mut self, row: Vec<RawValue>) -> Self {
        self.rows.push(row);
        self
    }

    pub fn with_rows(mut self, rows: impl IntoIterator<Item = Vec<RawValue>>) -> Self {
        self.rows.extend(rows);
        self
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// `close` が呼ばれた回数
    pub fn close_count(&self) -> usize {
        self.close_calls
    }

    /// 先頭の手前に戻し、再び読めるようにする
    pub fn rewind(&mut self) {
        self.cursor = None;
        self.closed = false;
    }

    fn current_row(&self) -> Result<&[RawValue], SourceError> {
        if self.closed {
            return Err(SourceError::Closed);
        }
        self.cursor
            .and_then(|index| self.rows.get(index))
            .map(Vec::as_slice)
            .ok_or_else(|| SourceError::Read("no current row".to_string()))
    }

    fn column(&self, ordinal: usize) -> Result<&ColumnSchema, SourceError> {
        self.columns.get(ordinal).ok_or(SourceError::Ordinal {
            ordinal,
            field_count: self.columns.len(),
        })
    }
}

impl From<ResultSet> for MemorySource {
    fn from(result_set: ResultSet) -> Self {
        Self::new(result_set.columns).with_rows(result_set.rows)
    }
}

impl RowSource for MemorySource {
    fn has_rows(&self) -> bool {
        !self.closed && !self.rows.is_empty()
    }

    fn read(&mut self) -> Result<bool, SourceError> {
        if self.closed {
            return Err(SourceError::Closed);
        }
        let next = self.cursor.map_or(0, |index| index + 1);
        self.cursor = Some(next.min(self.rows.len()));
        Ok(next < self.rows.len())
    }

    fn field_count(&self) -> usize {
        self.columns.len()
    }

    fn name(&self, ordinal: usize) -> Result<String, SourceError> {
        Ok(self.column(ordinal)?.name.clone())
    }

    fn field_type(&self, ordinal: usize) -> Result<DataType, SourceError> {
        Ok(self.column(ordinal)?.data_type)
    }

    fn value(&self, ordinal: usize) -> Result<RawValue, SourceError> {
        let row = self.current_row()?;
        row.get(ordinal).cloned().ok_or(SourceError::Ordinal {
            ordinal,
            field_count: row.len(),
        })
    }

    fn close(&mut self) -> Result<(), SourceError> {
        self.closed = true;
        self.close_calls += 1;
        Ok(())
    }
}
