use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::entity::data_type::DataType;
use crate::domain::entity::raw_value::RawValue;
use crate::{Error, Result};

/// テーブルの1セル。宣言型と取得元の座標（行番号・カラム名）を持つ
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Value {
    data_type: DataType,
    raw: RawValue,
    row_index: usize,
    column_name: String,
}

impl Value {
    pub(crate) fn new(
        data_type: DataType,
        raw: RawValue,
        row_index: usize,
        column_name: impl Into<String>,
    ) -> Self {
        Self {
            data_type,
            raw,
            row_index,
            column_name: column_name.into(),
        }
    }

    /// 元のカラムの宣言型
    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn raw(&self) -> &RawValue {
        &self.raw
    }

    pub fn into_raw(self) -> RawValue {
        self.raw
    }

    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    pub fn is_null(&self) -> bool {
        self.raw.is_null()
    }

    /// 宣言型が `Int32` の場合のみ変換する
    pub fn to_int32(&self) -> Result<i32> {
        self.expect_type(DataType::Int32, |t| t == DataType::Int32)?;
        self.raw.to_i32()
    }

    /// 宣言型が `Double` の場合のみ変換する
    pub fn to_double(&self) -> Result<f64> {
        self.expect_type(DataType::Double, |t| t == DataType::Double)?;
        self.raw.to_f64()
    }

    /// 宣言型が `Boolean` または1バイト表現 (`Int8`) の場合のみ変換する
    pub fn to_boolean(&self) -> Result<bool> {
        self.expect_type(DataType::Boolean, |t| t.is_boolean_like())?;
        self.raw.to_bool()
    }

    fn expect_type(&self, expected: DataType, accepts: impl Fn(DataType) -> bool) -> Result<()> {
        if accepts(self.data_type) {
            Ok(())
        } else {
            Err(Error::TypeMismatch {
                column: self.column_name.clone(),
                expected,
                actual: self.data_type,
            })
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.raw, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_conversion_rejects_numeric_text() {
        let value = Value::new(DataType::String, RawValue::from("42"), 0, "code");
        assert!(matches!(
            value.to_int32(),
            Err(Error::TypeMismatch {
                expected: DataType::Int32,
                actual: DataType::String,
                ..
            })
        ));
    }

    #[test]
    fn strict_conversion_accepts_declared_type() {
        let value = Value::new(DataType::Int32, RawValue::Int32(7), 3, "id");
        assert_eq!(value.to_int32().unwrap(), 7);
        assert_eq!(value.row_index(), 3);
        assert_eq!(value.column_name(), "id");
    }

    #[test]
    fn single_byte_counts_as_boolean() {
        let value = Value::new(DataType::Int8, RawValue::Int8(1), 0, "flag");
        assert!(value.to_boolean().unwrap());
    }

    #[test]
    fn null_in_matching_column_is_a_conversion_error() {
        let value = Value::new(DataType::Double, RawValue::Null, 0, "price");
        assert!(matches!(value.to_double(), Err(Error::Conversion { .. })));
        assert_eq!(value.to_string(), "NULL");
    }
}
