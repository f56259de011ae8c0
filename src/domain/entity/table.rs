use std::iter::FusedIterator;

use crate::application::materializer::{MaterializeOptions, Materializer};
use crate::domain::entity::column::Column;
use crate::domain::entity::data_type::DataType;
use crate::domain::entity::raw_value::RawValue;
use crate::domain::entity::result_set::ResultSet;
use crate::domain::entity::row::Row;
use crate::domain::entity::schema::{Axis, ColumnKey, Schema};
use crate::domain::entity::value::Value;
use crate::domain::source::RowSource;
use crate::{Error, Result};

/// ソースから読み込んだ結果をすべてメモリ上に保持するテーブル
///
/// 構築後は変更できない。行・カラム・値のビューは呼び出しごとにコピーとして作られる。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    schema: Schema,
    /// `[row][column]` の順で並んだ生の値
    rows: Vec<Vec<RawValue>>,
}

impl Table {
    /// カラムも行も持たない空のテーブル（「結果なし」を表す）
    pub fn empty() -> Self {
        Self::default()
    }

    /// ソースを最後まで読み込み、既定の設定（読み込み後にクローズ）でテーブルを作る
    pub fn from_source<S: RowSource + ?Sized>(source: &mut S) -> Result<Self> {
        Materializer::default().materialize(source)
    }

    pub fn from_source_with<S: RowSource + ?Sized>(
        source: &mut S,
        options: MaterializeOptions,
    ) -> Result<Self> {
        Materializer::new(options).materialize(source)
    }

    /// 検証済みのスキーマと行から作る。各行の幅はスキーマと一致していること
    pub(crate) fn from_parts(schema: Schema, rows: Vec<Vec<RawValue>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == schema.len()));
        Self { schema, rows }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// カラム名の一覧（カラム順）
    pub fn columns(&self) -> Vec<&str> {
        self.schema.names().collect()
    }

    pub fn column_types(&self) -> Vec<DataType> {
        self.schema.data_types().collect()
    }

    pub fn columns_count(&self) -> usize {
        self.schema.len()
    }

    pub fn rows_count(&self) -> usize {
        self.rows.len()
    }

    pub fn has_rows(&self) -> bool {
        !self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.schema.index_of(name)
    }

    pub fn get_object<K: ColumnKey>(&self, column: K, row: usize) -> Result<&RawValue> {
        let column = self.schema.resolve(column)?;
        Ok(&self.row_slice(row)?[column])
    }

    pub fn get_value<K: ColumnKey>(&self, column: K, row: usize) -> Result<Value> {
        let column = self.schema.resolve(column)?;
        let raw = self.row_slice(row)?[column].clone();
        let schema = self.schema.column(column);
        Ok(Value::new(schema.data_type, raw, row, schema.name.as_str()))
    }

    pub fn get_row(&self, row: usize) -> Result<Row> {
        let values = self.row_slice(row)?.to_vec();
        Ok(Row::new(row, self.schema.clone(), values))
    }

    pub fn get_column<K: ColumnKey>(&self, column: K) -> Result<Column> {
        let index = self.schema.resolve(column)?;
        let schema = self.schema.column(index);
        let values = self.rows.iter().map(|row| row[index].clone()).collect();
        Ok(Column::new(schema.name.as_str(), schema.data_type, values))
    }

    pub fn get_column_type<K: ColumnKey>(&self, column: K) -> Result<DataType> {
        let index = self.schema.resolve(column)?;
        Ok(self.schema.column(index).data_type)
    }

    /// 宣言型に関係なく32ビット整数への変換を試みる
    pub fn get_int32<K: ColumnKey>(&self, column: K, row: usize) -> Result<i32> {
        self.get_object(column, row)?.to_i32()
    }

    pub fn get_double<K: ColumnKey>(&self, column: K, row: usize) -> Result<f64> {
        self.get_object(column, row)?.to_f64()
    }

    pub fn get_boolean<K: ColumnKey>(&self, column: K, row: usize) -> Result<bool> {
        self.get_object(column, row)?.to_bool()
    }

    pub fn iter(&self) -> Rows<'_> {
        Rows { table: self, next: 0 }
    }

    /// 汎用の表形式（カラム定義 + 行）に書き出す
    pub fn to_result_set(&self) -> ResultSet {
        ResultSet {
            columns: self.schema.columns().to_vec(),
            rows: self.rows.clone(),
        }
    }

    pub fn into_result_set(self) -> ResultSet {
        ResultSet {
            columns: self.schema.into_columns(),
            rows: self.rows,
        }
    }

    fn row_slice(&self, row: usize) -> Result<&[RawValue]> {
        self.rows
            .get(row)
            .map(Vec::as_slice)
            .ok_or(Error::OutOfRange {
                axis: Axis::Row,
                index: row,
                count: self.rows.len(),
            })
    }
}

impl TryFrom<ResultSet> for Table {
    type Error = Error;

    /// カラム名の重複と各行の幅を検証してから取り込む
    fn try_from(result_set: ResultSet) -> Result<Self> {
        let schema = Schema::from_columns(result_set.columns)?;
        for (index, row) in result_set.rows.iter().enumerate() {
            if row.len() != schema.len() {
                return Err(Error::RowWidth {
                    row: index,
                    expected: schema.len(),
                    actual: row.len(),
                });
            }
        }
        Ok(Self::from_parts(schema, result_set.rows))
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = Row;
    type IntoIter = Rows<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// テーブルの行を先頭から順に返すカーソル
///
/// `iter()` の呼び出しごとに独立したカーソルが作られるため、
/// 同じテーブルを複数箇所で同時に走査しても互いの位置には影響しない。
#[derive(Debug, Clone)]
pub struct Rows<'a> {
    table: &'a Table,
    next: usize,
}

impl Rows<'_> {
    /// 先頭の手前に戻す
    pub fn reset(&mut self) {
        self.next = 0;
    }
}

impl Iterator for Rows<'_> {
    type Item = Row;

    fn next(&mut self) -> Option<Row> {
        let values = self.table.rows.get(self.next)?.clone();
        let row = Row::new(self.next, self.table.schema.clone(), values);
        self.next += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.table.rows.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Rows<'_> {}

impl FusedIterator for Rows<'_> {}
