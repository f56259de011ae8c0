use itertools::Itertools;
use std::fmt;
use std::iter::FusedIterator;

use crate::domain::entity::data_type::DataType;
use crate::domain::entity::raw_value::RawValue;
use crate::domain::entity::schema::{ColumnKey, Schema};
use crate::domain::entity::value::Value;
use crate::Result;

/// テーブルの1行のスナップショット
///
/// 取得時点のカラム名・宣言型・値のコピーを保持し、元のテーブルは参照しない。
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    row_index: usize,
    schema: Schema,
    values: Vec<RawValue>,
}

impl Row {
    pub(crate) fn new(row_index: usize, schema: Schema, values: Vec<RawValue>) -> Self {
        debug_assert_eq!(schema.len(), values.len());
        Self {
            row_index,
            schema,
            values,
        }
    }

    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub fn columns(&self) -> Vec<&str> {
        self.schema.names().collect()
    }

    pub fn columns_count(&self) -> usize {
        self.values.len()
    }

    pub fn get_object<K: ColumnKey>(&self, column: K) -> Result<&RawValue> {
        let index = self.schema.resolve(column)?;
        Ok(&self.values[index])
    }

    pub fn get_value<K: ColumnKey>(&self, column: K) -> Result<Value> {
        let index = self.schema.resolve(column)?;
        Ok(self.value_at(index))
    }

    pub fn get_column_type<K: ColumnKey>(&self, column: K) -> Result<DataType> {
        let index = self.schema.resolve(column)?;
        Ok(self.schema.column(index).data_type)
    }

    pub fn get_int32<K: ColumnKey>(&self, column: K) -> Result<i32> {
        self.get_object(column)?.to_i32()
    }

    pub fn get_double<K: ColumnKey>(&self, column: K) -> Result<f64> {
        self.get_object(column)?.to_f64()
    }

    pub fn get_boolean<K: ColumnKey>(&self, column: K) -> Result<bool> {
        self.get_object(column)?.to_bool()
    }

    /// 生の値のスライス（カラム順）
    pub fn objects(&self) -> &[RawValue] {
        &self.values
    }

    pub fn iter(&self) -> RowValues<'_> {
        RowValues { row: self, next: 0 }
    }

    fn value_at(&self, index: usize) -> Value {
        let column = self.schema.column(index);
        Value::new(
            column.data_type,
            self.values[index].clone(),
            self.row_index,
            column.name.as_str(),
        )
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.values.iter().join("\t"))
    }
}

impl<'a> IntoIterator for &'a Row {
    type Item = Value;
    type IntoIter = RowValues<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// 行の値を先頭から順に返すカーソル
#[derive(Debug, Clone)]
pub struct RowValues<'a> {
    row: &'a Row,
    next: usize,
}

impl RowValues<'_> {
    /// 先頭の手前に戻す
    pub fn reset(&mut self) {
        self.next = 0;
    }
}

impl Iterator for RowValues<'_> {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        if self.next >= self.row.values.len() {
            return None;
        }
        let value = self.row.value_at(self.next);
        self.next += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.row.values.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for RowValues<'_> {}

impl FusedIterator for RowValues<'_> {}
