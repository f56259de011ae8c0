use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::entity::data_type::DataType;
use crate::{Error, Result};

// ソースから読み出したセルの生の値
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    Null,
    Int8(i8),
    Int32(i32),
    Int64(i64),
    Double(f64),
    Boolean(bool),
    Text(String),
    Timestamp(DateTime<Utc>),
    Binary(Bytes),
}

impl RawValue {
    /// 値そのものが持つ型（カラムの宣言型とは別）
    pub fn data_type(&self) -> DataType {
        match self {
            RawValue::Null => DataType::Null,
            RawValue::Int8(_) => DataType::Int8,
            RawValue::Int32(_) => DataType::Int32,
            RawValue::Int64(_) => DataType::Int64,
            RawValue::Double(_) => DataType::Double,
            RawValue::Boolean(_) => DataType::Boolean,
            RawValue::Text(_) => DataType::String,
            RawValue::Timestamp(_) => DataType::Timestamp,
            RawValue::Binary(_) => DataType::Binary,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RawValue::Null)
    }

    /// 32ビット整数へのベストエフォート変換
    ///
    /// 浮動小数点数は偶数丸めで整数化し、範囲外なら失敗する。
    pub fn to_i32(&self) -> Result<i32> {
        match self {
            RawValue::Int8(i) => Ok(i32::from(*i)),
            RawValue::Int32(i) => Ok(*i),
            RawValue::Int64(i) => i32::try_from(*i).map_err(|_| self.conversion(DataType::Int32)),
            RawValue::Double(f) => {
                let rounded = f.round_ties_even();
                if rounded.is_finite() && rounded >= i32::MIN as f64 && rounded <= i32::MAX as f64 {
                    Ok(rounded as i32)
                } else {
                    Err(self.conversion(DataType::Int32))
                }
            }
            RawValue::Boolean(b) => Ok(i32::from(*b)),
            RawValue::Text(s) => s
                .trim()
                .parse::<i32>()
                .map_err(|_| self.conversion(DataType::Int32)),
            _ => Err(self.conversion(DataType::Int32)),
        }
    }

    /// 倍精度浮動小数点数へのベストエフォート変換
    pub fn to_f64(&self) -> Result<f64> {
        match self {
            RawValue::Int8(i) => Ok(f64::from(*i)),
            RawValue::Int32(i) => Ok(f64::from(*i)),
            RawValue::Int64(i) => Ok(*i as f64),
            RawValue::Double(f) => Ok(*f),
            RawValue::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
            RawValue::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| self.conversion(DataType::Double)),
            _ => Err(self.conversion(DataType::Double)),
        }
    }

    /// ブール値へのベストエフォート変換（数値は0以外をtrueとする）
    pub fn to_bool(&self) -> Result<bool> {
        match self {
            RawValue::Boolean(b) => Ok(*b),
            RawValue::Int8(i) => Ok(*i != 0),
            RawValue::Int32(i) => Ok(*i != 0),
            RawValue::Int64(i) => Ok(*i != 0),
            RawValue::Double(f) => Ok(*f != 0.0),
            RawValue::Text(s) => match s.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "y" => Ok(true),
                "false" | "0" | "no" | "n" => Ok(false),
                _ => Err(self.conversion(DataType::Boolean)),
            },
            _ => Err(self.conversion(DataType::Boolean)),
        }
    }

    fn conversion(&self, target: DataType) -> Error {
        Error::Conversion {
            value: self.to_string(),
            target,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawValue::Null => write!(f, "NULL"),
            RawValue::Int8(i) => write!(f, "{}", i),
            RawValue::Int32(i) => write!(f, "{}", i),
            RawValue::Int64(i) => write!(f, "{}", i),
            RawValue::Double(n) => write!(f, "{}", n),
            RawValue::Boolean(b) => write!(f, "{}", b),
            RawValue::Text(s) => write!(f, "{}", s),
            RawValue::Timestamp(dt) => write!(f, "{}", dt),
            RawValue::Binary(bytes) => {
                write!(f, "0x")?;
                for byte in bytes.iter() {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
        }
    }
}

impl Default for RawValue {
    fn default() -> Self {
        RawValue::Null
    }
}

impl From<i8> for RawValue {
    fn from(val: i8) -> Self {
        RawValue::Int8(val)
    }
}
impl From<i32> for RawValue {
    fn from(val: i32) -> Self {
        RawValue::Int32(val)
    }
}
impl From<i64> for RawValue {
    fn from(val: i64) -> Self {
        RawValue::Int64(val)
    }
}
impl From<f64> for RawValue {
    fn from(val: f64) -> Self {
        RawValue::Double(val)
    }
}
impl From<bool> for RawValue {
    fn from(val: bool) -> Self {
        RawValue::Boolean(val)
    }
}
impl From<String> for RawValue {
    fn from(val: String) -> Self {
        RawValue::Text(val)
    }
}
impl From<&str> for RawValue {
    fn from(val: &str) -> Self {
        RawValue::Text(val.to_string())
    }
}
impl From<DateTime<Utc>> for RawValue {
    fn from(val: DateTime<Utc>) -> Self {
        RawValue::Timestamp(val)
    }
}
impl From<Bytes> for RawValue {
    fn from(val: Bytes) -> Self {
        RawValue::Binary(val)
    }
}
impl From<Vec<u8>> for RawValue {
    fn from(val: Vec<u8>) -> Self {
        RawValue::Binary(Bytes::from(val))
    }
}
impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(val: Option<T>) -> Self {
        val.map_or(RawValue::Null, Into::into)
    }
}
