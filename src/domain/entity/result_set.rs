use serde::{Deserialize, Serialize};

use crate::domain::entity::raw_value::RawValue;
use crate::domain::entity::schema::ColumnSchema;
use crate::Result;

/// テーブルの書き出し形式（カラム定義と型付きの行）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ResultSet {
    /// 結果セットのスキーマ
    pub columns: Vec<ColumnSchema>,

    /// カラム順に並んだ行の値
    pub rows: Vec<Vec<RawValue>>,
}

impl ResultSet {
    // 行数を取得する
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    // 結果セットが空かどうか
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
