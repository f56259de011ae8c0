use chrono::{TimeZone, Utc};
use dbresult::{
    Axis, ColumnSchema, DataType, Error, MemorySource, RawValue, ResultSet, Table, Value,
};

fn orders() -> Table {
    let mut source = MemorySource::new(vec![
        ColumnSchema::new("id", DataType::Int32),
        ColumnSchema::new("total", DataType::Double),
        ColumnSchema::new("paid", DataType::Int8),
        ColumnSchema::new("note", DataType::String),
        ColumnSchema::new("created", DataType::Timestamp),
    ])
    .with_rows([
        vec![
            1.into(),
            9.5.into(),
            1i8.into(),
            "first".into(),
            Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap().into(),
        ],
        vec![
            2.into(),
            20.0.into(),
            0i8.into(),
            RawValue::Null,
            Utc.with_ymd_and_hms(2024, 2, 3, 4, 5, 6).unwrap().into(),
        ],
        vec![
            3.into(),
            RawValue::Null,
            1i8.into(),
            "17".into(),
            RawValue::Null,
        ],
    ]);
    Table::from_source(&mut source).unwrap()
}

#[test]
fn row_view_matches_table() -> dbresult::Result<()> {
    let table = orders();
    let row = table.get_row(1)?;

    assert_eq!(row.row_index(), 1);
    assert_eq!(row.columns(), table.columns());
    assert_eq!(row.columns_count(), 5);
    for column in 0..table.columns_count() {
        assert_eq!(row.get_object(column)?, table.get_object(column, 1)?);
        assert_eq!(row.get_value(column)?, table.get_value(column, 1)?);
        assert_eq!(row.get_column_type(column)?, table.get_column_type(column)?);
    }
    assert_eq!(row.get_double("total")?, 20.0);
    assert!(!row.get_boolean("paid")?);
    Ok(())
}

#[test]
fn column_view_matches_table() -> dbresult::Result<()> {
    let table = orders();
    let column = table.get_column("note")?;

    assert_eq!(column.name(), "note");
    assert_eq!(column.data_type(), DataType::String);
    assert_eq!(column.rows_count(), table.rows_count());
    for row in 0..table.rows_count() {
        assert_eq!(column.get_object(row)?, table.get_object("note", row)?);
        assert_eq!(column.get_value(row)?, table.get_value("note", row)?);
    }
    Ok(())
}

#[test]
fn views_are_disconnected_copies() -> dbresult::Result<()> {
    let row = {
        let table = orders();
        table.get_row(0)?
    };
    assert_eq!(row.get_object("note")?, &RawValue::from("first"));
    Ok(())
}

#[test]
fn unknown_names_fail_everywhere() {
    let table = orders();
    let row = table.get_row(0).unwrap();

    assert!(matches!(table.get_object("missing", 0), Err(Error::UnknownColumn(_))));
    assert!(matches!(table.get_value("ID", 0), Err(Error::UnknownColumn(_))));
    assert!(matches!(table.get_column("missing"), Err(Error::UnknownColumn(_))));
    assert!(matches!(table.get_column_type("missing"), Err(Error::UnknownColumn(_))));
    assert!(matches!(table.get_int32("missing", 0), Err(Error::UnknownColumn(_))));
    assert!(matches!(row.get_value("missing"), Err(Error::UnknownColumn(_))));
    assert!(matches!(row.get_column_type("missing"), Err(Error::UnknownColumn(_))));
}

#[test]
fn out_of_range_never_defaults() {
    let table = orders();
    let column = table.get_column(0usize).unwrap();
    let row = table.get_row(0).unwrap();

    assert!(matches!(
        table.get_value(5usize, 0),
        Err(Error::OutOfRange { axis: Axis::Column, index: 5, count: 5 })
    ));
    assert!(matches!(
        table.get_value(0usize, 3),
        Err(Error::OutOfRange { axis: Axis::Row, index: 3, count: 3 })
    ));
    assert!(matches!(
        column.get_value(3),
        Err(Error::OutOfRange { axis: Axis::Row, .. })
    ));
    assert!(matches!(
        row.get_object(5usize),
        Err(Error::OutOfRange { axis: Axis::Column, .. })
    ));
}

#[test]
fn strict_value_and_permissive_getters_differ() -> dbresult::Result<()> {
    let table = orders();

    // "17" は文字列カラムの値
    assert_eq!(table.get_int32("note", 2)?, 17);
    assert!(matches!(
        table.get_value("note", 2)?.to_int32(),
        Err(Error::TypeMismatch {
            expected: DataType::Int32,
            actual: DataType::String,
            ..
        })
    ));

    assert_eq!(table.get_value("id", 2)?.to_int32()?, 3);
    assert_eq!(table.get_value("total", 0)?.to_double()?, 9.5);
    assert!(table.get_value("paid", 0)?.to_boolean()?);
    assert!(matches!(
        table.get_value("id", 0)?.to_double(),
        Err(Error::TypeMismatch { .. })
    ));
    Ok(())
}

#[test]
fn null_cells_render_without_panicking() -> dbresult::Result<()> {
    let table = orders();
    let note = table.get_value("note", 1)?;

    assert!(note.is_null());
    assert_eq!(note.to_string(), "NULL");
    assert_eq!(table.get_row(2)?.to_string(), "3\tNULL\t1\t17\tNULL");
    assert!(matches!(
        table.get_int32("total", 2),
        Err(Error::Conversion { target: DataType::Int32, .. })
    ));
    Ok(())
}

#[test]
fn enumeration_visits_each_row_once_then_resets() {
    let table = orders();
    let mut rows = table.iter();
    assert_eq!(rows.len(), 3);

    let first_pass: Vec<usize> = rows.by_ref().map(|row| row.row_index()).collect();
    assert_eq!(first_pass, vec![0, 1, 2]);
    assert!(rows.next().is_none());

    rows.reset();
    let second_pass: Vec<usize> = rows.map(|row| row.row_index()).collect();
    assert_eq!(first_pass, second_pass);
}

#[test]
fn row_and_column_enumeration() -> dbresult::Result<()> {
    let table = orders();

    let row = table.get_row(0)?;
    let mut cells = row.iter();
    let names: Vec<String> = cells
        .by_ref()
        .map(|value| value.column_name().to_string())
        .collect();
    assert_eq!(names, table.columns());
    assert!(cells.next().is_none());
    cells.reset();
    assert_eq!(cells.len(), row.columns_count());
    let replayed: Vec<String> = cells.map(|value| value.column_name().to_string()).collect();
    assert_eq!(replayed, names);

    let column = table.get_column("id")?;
    let mut values = column.iter();
    let ids: Vec<i32> = values
        .by_ref()
        .map(|value| value.to_int32())
        .collect::<dbresult::Result<_>>()?;
    assert_eq!(ids, vec![1, 2, 3]);
    assert!(values.next().is_none());
    values.reset();
    assert_eq!(values.next().map(|value| value.row_index()), Some(0));

    let collected: Vec<Value> = (&column).into_iter().collect();
    assert_eq!(collected.len(), 3);
    Ok(())
}

#[test]
fn interleaved_cursors_keep_their_own_position() {
    let table = orders();
    let mut outer = table.iter();
    let mut inner = table.iter();

    assert_eq!(outer.next().map(|row| row.row_index()), Some(0));
    assert_eq!(inner.next().map(|row| row.row_index()), Some(0));
    assert_eq!(inner.next().map(|row| row.row_index()), Some(1));
    assert_eq!(outer.next().map(|row| row.row_index()), Some(1));
}

#[test]
fn concurrent_readers_share_one_table() {
    let table = orders();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    (&table)
                        .into_iter()
                        .map(|row| row.get_int32("id").unwrap())
                        .sum::<i32>()
                })
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 6);
        }
    });
}

#[test]
fn result_set_export_survives_json() -> dbresult::Result<()> {
    let table = orders();
    let exported = table.to_result_set();
    assert_eq!(exported.len(), 3);
    assert_eq!(exported.columns[1], ColumnSchema::new("total", DataType::Double));

    let json = exported.to_json()?;
    let imported = Table::try_from(ResultSet::from_json(&json)?)?;
    assert_eq!(imported, table);
    Ok(())
}

#[test]
fn result_set_import_rejects_duplicate_columns() {
    let result_set = ResultSet {
        columns: vec![
            ColumnSchema::new("a", DataType::Int32),
            ColumnSchema::new("a", DataType::Int32),
        ],
        rows: Vec::new(),
    };
    assert!(matches!(Table::try_from(result_set), Err(Error::DuplicateColumn(_))));
}

#[test]
fn exported_table_can_feed_a_new_source() -> dbresult::Result<()> {
    let table = orders();
    let mut source = MemorySource::from(table.clone().into_result_set());
    assert_eq!(Table::from_source(&mut source)?, table);
    Ok(())
}
