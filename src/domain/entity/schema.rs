use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;
use typed_builder::TypedBuilder;

use crate::domain::entity::data_type::DataType;
use crate::{Error, Result};

/// インデックスの軸（範囲外エラーの報告用）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Axis {
    #[display(fmt = "Row")]
    Row,
    #[display(fmt = "Column")]
    Column,
}

/// 結果セットの1カラムのメタデータ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
pub struct ColumnSchema {
    /// カラム名
    #[builder(setter(into))]
    pub name: String,

    /// 宣言型
    pub data_type: DataType,
}

impl ColumnSchema {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

impl fmt::Display for ColumnSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.data_type)
    }
}

/// 順序付きのカラム一覧。名前は重複しない
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schema {
    columns: Vec<ColumnSchema>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// カラム一覧からスキーマを作る。名前が重複していればエラー
    pub fn from_columns(columns: impl IntoIterator<Item = ColumnSchema>) -> Result<Self> {
        let mut schema = Self::new();
        for column in columns {
            schema.push(column)?;
        }
        Ok(schema)
    }

    pub fn push(&mut self, column: ColumnSchema) -> Result<()> {
        // 同名のカラムが既に存在するかチェック
        if self.columns.iter().any(|c| c.name == column.name) {
            return Err(Error::DuplicateColumn(column.name));
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[ColumnSchema] {
        &self.columns
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn data_types(&self) -> impl Iterator<Item = DataType> + '_ {
        self.columns.iter().map(|c| c.data_type)
    }

    /// キー（番号または名前）をカラム番号に解決する
    pub fn resolve<K: ColumnKey>(&self, key: K) -> Result<usize> {
        key.resolve(self)
    }

    /// 名前の完全一致（大文字小文字を区別）でカラム番号を探す
    pub fn index_of(&self, name: &str) -> Result<usize> {
        self.columns
            .iter()
            .position(|c| c.name == name)
            .ok_or_else(|| Error::UnknownColumn(name.to_string()))
    }

    pub fn check_index(&self, index: usize) -> Result<usize> {
        if index < self.columns.len() {
            Ok(index)
        } else {
            Err(Error::OutOfRange {
                axis: Axis::Column,
                index,
                count: self.columns.len(),
            })
        }
    }

    /// 解決済みの番号のカラム。範囲は呼び出し側で保証する
    pub(crate) fn column(&self, index: usize) -> &ColumnSchema {
        &self.columns[index]
    }

    pub(crate) fn into_columns(self) -> Vec<ColumnSchema> {
        self.columns
    }
}

/// カラムを番号または名前で指定するためのキー
pub trait ColumnKey {
    fn resolve(&self, schema: &Schema) -> Result<usize>;
}

impl ColumnKey for usize {
    fn resolve(&self, schema: &Schema) -> Result<usize> {
        schema.check_index(*self)
    }
}

impl ColumnKey for str {
    fn resolve(&self, schema: &Schema) -> Result<usize> {
        schema.index_of(self)
    }
}

impl ColumnKey for String {
    fn resolve(&self, schema: &Schema) -> Result<usize> {
        schema.index_of(self)
    }
}

impl<K: ColumnKey + ?Sized> ColumnKey for &K {
    fn resolve(&self, schema: &Schema) -> Result<usize> {
        (**self).resolve(schema)
    }
}
