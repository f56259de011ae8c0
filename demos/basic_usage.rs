use dbresult::{ColumnSchema, DataType, MemorySource, RawValue, Table};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    info!("dbresult version: {}", dbresult::VERSION);

    // ソースの準備（実際にはデータベースのカーソル）
    let mut source = MemorySource::new(vec![
        ColumnSchema::new("id", DataType::Int32),
        ColumnSchema::new("name", DataType::String),
        ColumnSchema::new("age", DataType::Int32),
        ColumnSchema::new("active", DataType::Boolean),
    ])
    .with_row(vec![1.into(), "Alice".into(), 30.into(), true.into()])
    .with_row(vec![2.into(), "Bob".into(), 25.into(), false.into()])
    .with_row(vec![3.into(), "Charlie".into(), RawValue::Null, true.into()]);

    println!("=== dbresult 基本動作チェック ===\n");

    // 1. 読み込み
    println!("1. ソースの読み込み");
    let table = Table::from_source(&mut source)?;
    println!(
        "{}行 x {}カラムを読み込みました（ソースはクローズ済み: {}）\n",
        table.rows_count(),
        table.columns_count(),
        source.is_closed()
    );

    // 2. 全行の表示
    println!("2. 全行の表示");
    println!("{}", table.columns().join("\t"));
    for row in &table {
        println!("{}", row);
    }
    println!();

    // 3. 名前と番号による取得
    println!("3. 値の取得");
    println!("name[1] = {}", table.get_value("name", 1)?);
    println!("age[2] = {}", table.get_value(2usize, 2)?);
    println!("id[2] as Int32 = {}\n", table.get_value("id", 2)?.to_int32()?);

    // 4. カラムの取得
    println!("4. カラム 'name' の取得");
    for value in &table.get_column("name")? {
        println!("  row {}: {}", value.row_index(), value);
    }
    println!();

    // 5. 厳密な型チェック
    println!("5. 厳密な型チェック");
    match table.get_value("name", 0)?.to_int32() {
        Ok(v) => println!("予期しない成功: {}", v),
        Err(e) => println!("期待通りのエラー: {}", e),
    }

    // 6. JSONへの書き出し
    println!("\n6. JSONへの書き出し");
    println!("{}", table.to_result_set().to_json()?);

    Ok(())
}
