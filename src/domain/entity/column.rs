use std::iter::FusedIterator;

use crate::domain::entity::data_type::DataType;
use crate::domain::entity::raw_value::RawValue;
use crate::domain::entity::schema::Axis;
use crate::domain::entity::value::Value;
use crate::{Error, Result};

/// テーブルの1カラムのスナップショット（全行分の値を行順に保持する）
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data_type: DataType,
    values: Vec<RawValue>,
}

impl Column {
    pub(crate) fn new(name: impl Into<String>, data_type: DataType, values: Vec<RawValue>) -> Self {
        Self {
            name: name.into(),
            data_type,
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn rows_count(&self) -> usize {
        self.values.len()
    }

    pub fn get_object(&self, row: usize) -> Result<&RawValue> {
        self.values.get(row).ok_or(Error::OutOfRange {
            axis: Axis::Row,
            index: row,
            count: self.values.len(),
        })
    }

    pub fn get_value(&self, row: usize) -> Result<Value> {
        let raw = self.get_object(row)?.clone();
        Ok(Value::new(self.data_type, raw, row, self.name.as_str()))
    }

    pub fn objects(&self) -> &[RawValue] {
        &self.values
    }

    pub fn iter(&self) -> ColumnValues<'_> {
        ColumnValues { column: self, next: 0 }
    }
}

impl<'a> IntoIterator for &'a Column {
    type Item = Value;
    type IntoIter = ColumnValues<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// カラムの値を行順に返すカーソル
#[derive(Debug, Clone)]
pub struct ColumnValues<'a> {
    column: &'a Column,
    next: usize,
}

impl ColumnValues<'_> {
    pub fn reset(&mut self) {
        self.next = 0;
    }
}

impl Iterator for ColumnValues<'_> {
    type Item = Value;

    fn next(&mut self) -> Option<Value> {
        let raw = self.column.values.get(self.next)?.clone();
        let value = Value::new(self.column.data_type, raw, self.next, self.column.name.as_str());
        self.next += 1;
        Some(value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.column.values.len().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ColumnValues<'_> {}

impl FusedIterator for ColumnValues<'_> {}
