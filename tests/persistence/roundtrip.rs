use std::fs;

use chrono::{NaiveDate, NaiveDateTime};
use ferrum_tablestore::persistence::{DataType, TableStore, Value};
use tempfile::TempDir;

fn _timestamp(day: u32, hour: u32, milli: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 5, day)
        .unwrap()
        .and_hms_milli_opt(hour, 30, 0, milli)
        .unwrap()
}

#[test]
fn reopen_yields_the_same_table_for_every_scalar_type() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("events.csv");
    let columns = ["id", "score", "active", "seen_at", "note"];

    let mut store = TableStore::open(&path, columns).unwrap();
    let rows = vec![
        (1, 2.0, true, _timestamp(1, 9, 0), Some("plain")),
        (2, -0.125, false, _timestamp(2, 18, 250), Some("with, comma")),
        (3, 1e10, true, _timestamp(3, 0, 0), Some("a \"quote\"\nand a line")),
        (4, 3.5, false, _timestamp(4, 23, 999), None),
    ];

    for (id, score, active, seen_at, note) in rows {
        let values = [
            Value::from(id),
            Value::from(score),
            Value::from(active),
            Value::from(seen_at),
            Value::from(note),
        ];
        store.insert(columns.into_iter().zip(values)).unwrap();
    }

    let written = store.read();
    let reopened = TableStore::open_existing(&path).unwrap().read();

    assert_eq!(reopened, written);
    assert_eq!(reopened.columns(), columns);
    assert_eq!(reopened.get(1).unwrap()["score"], Value::Float(-0.125));
    assert_eq!(reopened.get(3).unwrap()["note"], Value::Null);

    let schema = reopened.schema();
    assert_eq!(schema.datatype("id"), Some(DataType::Integer));
    assert_eq!(schema.datatype("score"), Some(DataType::Float));
    assert_eq!(schema.datatype("active"), Some(DataType::Boolean));
    assert_eq!(schema.datatype("seen_at"), Some(DataType::Timestamp));
    assert_eq!(schema.datatype("note"), Some(DataType::Text));
}

#[test]
fn whole_floats_stay_floats() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("prices.csv");

    let mut store = TableStore::open(&path, ["price"]).unwrap();
    store.insert([("price", 2.0)]).unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "price\n2.0\n");
    assert_eq!(
        TableStore::open_existing(&path).unwrap().read().get(0).unwrap()["price"],
        Value::Float(2.0)
    );
}

fn _mixed_values() -> Vec<Value> {
    vec![
        Value::from("7"),
        Value::from("true"),
        Value::from("inf"),
        Value::from("NaN"),
        Value::from("2024-05-01 09:30:00"),
        Value::from(""),
        Value::from("x7"),
        Value::Null,
        Value::Integer(7),
        Value::Float(f64::NAN),
        Value::Float(f64::NEG_INFINITY),
        Value::Boolean(true),
        Value::Timestamp(_timestamp(1, 9, 0)),
    ]
}

#[test]
fn inserted_values_read_back_unchanged() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("mixed.csv");
    let mut store = TableStore::open(&path, ["id", "code"]).unwrap();

    for (id, value) in _mixed_values().into_iter().enumerate() {
        let table = store
            .insert([("id", Value::from(id as i64)), ("code", value.clone())])
            .unwrap();
        assert_eq!(table.get(id).unwrap()["code"], value);
    }

    let written = store.read();
    for (id, value) in _mixed_values().into_iter().enumerate() {
        assert_eq!(written.get(id).unwrap()["code"], value);
    }
    assert_eq!(TableStore::open_existing(&path).unwrap().read(), written);
}

#[test]
fn single_column_tables_keep_every_value() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("single.csv");
    let mut store = TableStore::open(&path, ["code"]).unwrap();

    for value in _mixed_values() {
        store.insert([("code", value)]).unwrap();
    }

    let written = store.read();
    assert_eq!(written.len(), _mixed_values().len());
    assert_eq!(TableStore::open_existing(&path).unwrap().read(), written);
}

#[test]
fn text_that_looks_numeric_is_quoted_on_disk() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("codes.csv");
    let mut store = TableStore::open(&path, ["id", "name"]).unwrap();

    store.insert([("id", Value::from(1)), ("name", Value::from("42"))]).unwrap();
    store.insert([("id", Value::from(2)), ("name", Value::from(""))]).unwrap();
    store.insert([("id", Value::from(3)), ("name", Value::Null)]).unwrap();

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "id,name\n1,\"42\"\n2,\"\"\n3,\n"
    );
}

#[test]
fn updated_text_can_be_found_again() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("names.csv");
    let mut store = TableStore::open(&path, ["id", "name"]).unwrap();
    store.insert([("id", Value::from(1)), ("name", Value::from("Jansen"))]).unwrap();
    store.insert([("id", Value::from(2)), ("name", Value::from("Bonega"))]).unwrap();

    store.update(0, "name", "42").unwrap();

    let found = store.filter("name", "42").unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found.get(0).unwrap()["id"], Value::Integer(1));
    assert!(store.filter("name", 42).unwrap().is_empty());

    let reopened = TableStore::open_existing(&path).unwrap();
    assert_eq!(reopened.filter("name", "42").unwrap().len(), 1);
}

#[test]
fn updates_leave_other_cells_alone() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ids.csv");
    let mut store = TableStore::open(&path, ["id", "name"]).unwrap();
    store.insert([("id", Value::from(1)), ("name", Value::from("Jansen"))]).unwrap();
    store.insert([("id", Value::from(2)), ("name", Value::from("Bonega"))]).unwrap();

    let table = store.update(0, "id", "abc").unwrap();
    assert_eq!(table.get(0).unwrap()["id"], Value::from("abc"));
    assert_eq!(table.get(1).unwrap()["id"], Value::Integer(2));
    assert_eq!(table.schema().datatype("id"), Some(DataType::Text));

    let table = store.update(0, "id", 1.5).unwrap();
    assert_eq!(table.get(0).unwrap()["id"], Value::Float(1.5));
    assert_eq!(table.get(1).unwrap()["id"], Value::Integer(2));
    assert_eq!(table.schema().datatype("id"), Some(DataType::Float));

    assert_eq!(TableStore::open_existing(&path).unwrap().read(), table);
}

#[test]
fn reads_files_written_by_other_tools() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("legacy.csv");
    fs::write(
        &path,
        "id,name,joined\r\n1,Jansen,2023-01-05T10:00:00\r\n\r\n2,,2023-02-01 08:15:30.5\r\n",
    )
    .unwrap();

    let mut store = TableStore::open_existing(&path).unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.read().get(1).unwrap()["name"], Value::Null);

    store.update(1, "name", "Bonega").unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "id,name,joined\n1,Jansen,2023-01-05 10:00:00\n2,Bonega,2023-02-01 08:15:30.500\n"
    );
}
