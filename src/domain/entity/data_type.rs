use derive_more::Display;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString};

/// ソースが報告するカラムの宣言型
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum DataType {
    /// 1バイト表現（ブール値としても扱う）
    #[display(fmt = "INT8")]
    #[strum(serialize = "INT8", serialize = "TINYINT", serialize = "SBYTE")]
    Int8,

    #[display(fmt = "INT32")]
    #[strum(serialize = "INT32", serialize = "INT", serialize = "INTEGER")]
    Int32,

    #[display(fmt = "INT64")]
    #[strum(serialize = "INT64", serialize = "BIGINT", serialize = "LONG")]
    Int64,

    #[display(fmt = "DOUBLE")]
    #[strum(serialize = "DOUBLE", serialize = "FLOAT", serialize = "REAL")]
    Double,

    #[display(fmt = "BOOLEAN")]
    #[strum(serialize = "BOOLEAN", serialize = "BOOL")]
    Boolean,

    #[display(fmt = "STRING")]
    #[strum(
        serialize = "STRING",
        serialize = "TEXT",
        serialize = "VARCHAR",
        serialize = "CHAR"
    )]
    String,

    #[display(fmt = "TIMESTAMP")]
    #[strum(serialize = "TIMESTAMP", serialize = "DATETIME")]
    Timestamp,

    #[display(fmt = "BINARY")]
    #[strum(serialize = "BINARY", serialize = "BLOB", serialize = "BYTES")]
    Binary,

    #[display(fmt = "NULL")]
    #[strum(serialize = "NULL")]
    Null,

    /// このクレートが個別に扱わない型
    #[display(fmt = "OTHER")]
    #[strum(serialize = "OTHER")]
    Other,
}

impl DataType {
    /// ソースの型名から宣言型を求める。未知の型名は `Other` になる
    pub fn from_type_name(name: &str) -> Self {
        name.trim().parse().unwrap_or(DataType::Other)
    }

    /// `Value::to_boolean` が受け付ける宣言型かどうか
    pub fn is_boolean_like(&self) -> bool {
        matches!(self, DataType::Boolean | DataType::Int8)
    }
}
