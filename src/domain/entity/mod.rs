pub mod data_type;
pub mod raw_value;
pub mod value;
pub mod schema;
pub mod row;
pub mod column;
pub mod table;
pub mod result_set;
// src/domain/entity/mod.rs

pub use data_type::DataType;
pub use raw_value::RawValue;
pub use value::Value;
pub use schema::{Axis, ColumnKey, ColumnSchema, Schema};
pub use row::{Row, RowValues};
pub use column::{Column, ColumnValues};
pub use table::{Rows, Table};
pub use result_set::ResultSet;
