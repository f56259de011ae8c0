use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};
use typed_builder::TypedBuilder;

use crate::domain::entity::{ColumnSchema, RawValue, Schema, Table};
use crate::domain::source::{RowSource, SourceError};
use crate::{Error, Result};

/// 読み込み時の設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(default)]
pub struct MaterializeOptions {
    /// 読み込み終了後にソースをクローズするか。
    /// `false` の場合、呼び出し側がソースを再利用・解放する
    #[builder(default = true)]
    pub close_source: bool,

    /// 行バッファの初期容量。確保できない値は無視される
    #[builder(default)]
    pub row_capacity: usize,
}

impl Default for MaterializeOptions {
    fn default() -> Self {
        Self {
            close_source: true,
            row_capacity: 0,
        }
    }
}

/// 上流カーソルを最後まで読み込み、[`Table`] を作る
#[derive(Debug, Clone, Default)]
pub struct Materializer {
    options: MaterializeOptions,
}

impl Materializer {
    pub fn new(options: MaterializeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MaterializeOptions {
        &self.options
    }

    /// ソースを読み切ってテーブルを返す
    ///
    /// `close_source` が有効なら、成功・失敗どちらの場合もソースを一度だけクローズする。
    /// 読み込み失敗は [`Error::SourceRead`]、読み込み成功後のクローズ失敗は
    /// [`Error::SourceClose`] として区別して返す。
    pub fn materialize<S: RowSource + ?Sized>(&self, source: &mut S) -> Result<Table> {
        let drained = self.drain(source);
        if !self.options.close_source {
            return drained;
        }

        let closed = source.close();
        match (drained, closed) {
            (Ok(table), Ok(())) => Ok(table),
            (Ok(table), Err(close_error)) => {
                warn!(error = %close_error, rows = table.rows_count(), "source close failed after a complete read");
                Err(Error::SourceClose {
                    source: close_error,
                    table: Box::new(table),
                })
            }
            (Err(Error::SourceRead { source: read_error, .. }), closed) => {
                if let Err(close_error) = &closed {
                    warn!(error = %close_error, "source close failed after a failed read");
                }
                Err(Error::SourceRead {
                    source: read_error,
                    close_error: closed.err(),
                })
            }
            (Err(error), Err(close_error)) => {
                warn!(error = %close_error, "source close failed after an aborted read");
                Err(Error::Aborted {
                    error: Box::new(error),
                    close_error,
                })
            }
            (Err(error), Ok(())) => Err(error),
        }
    }

    fn drain<S: RowSource + ?Sized>(&self, source: &mut S) -> Result<Table> {
        if !source.has_rows() {
            debug!("source reported no rows");
            return Ok(Table::empty());
        }

        let mut schema: Option<Schema> = None;
        let mut rows: Vec<Vec<RawValue>> = Vec::new();
        if let Err(error) = rows.try_reserve(self.options.row_capacity) {
            warn!(row_capacity = self.options.row_capacity, %error, "row capacity hint ignored");
        }

        while source.read().map_err(Error::source_read)? {
            let field_count = source.field_count();
            match schema.as_ref().map(Schema::len) {
                Some(expected) if expected != field_count => {
                    return Err(Error::source_read(SourceError::FieldCountChanged {
                        row: rows.len(),
                        expected,
                        actual: field_count,
                    }));
                }
                Some(_) => {}
                None => schema = Some(capture_schema(source, field_count)?),
            }

            let mut row = Vec::with_capacity(field_count);
            for ordinal in 0..field_count {
                row.push(source.value(ordinal).map_err(Error::source_read)?);
            }
            trace!(row = rows.len(), "row materialized");
            rows.push(row);
        }

        let schema = schema.unwrap_or_default();
        debug!(
            columns = schema.len(),
            rows = rows.len(),
            "source materialized"
        );
        Ok(Table::from_parts(schema, rows))
    }
}

/// 最初の行でカラム名と宣言型を取得する
fn capture_schema<S: RowSource + ?Sized>(source: &S, field_count: usize) -> Result<Schema> {
    let mut schema = Schema::new();
    for ordinal in 0..field_count {
        let name = source.name(ordinal).map_err(Error::source_read)?;
        let data_type = source.field_type(ordinal).map_err(Error::source_read)?;
        schema.push(ColumnSchema::new(name, data_type))?;
    }
    debug!(columns = ?schema.names().collect::<Vec<_>>(), "captured result schema");
    Ok(schema)
}
