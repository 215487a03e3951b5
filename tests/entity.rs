use silt::{
    Affinity, Entity, Generation, GenericSqlWriter, Registry, SqlWriter, TableDef, Value,
};

#[derive(Entity, Debug, Clone, PartialEq)]
struct Note {
    #[silt(primary_key, auto_increment)]
    id: i64,
    body: String,
    starred: bool,
}

#[derive(Entity, Debug, Clone, PartialEq, Default)]
#[silt(name = "trades")]
struct Trade {
    symbol: String,
    #[silt(primary_key)]
    id: i64,
    #[silt(name = "qty")]
    quantity: Option<i32>,
    price: f64,
    executed: Option<time::PrimitiveDateTime>,
    #[silt(ignore)]
    cached_total: f64,
}

#[test]
fn declaration_transcribes_the_struct() {
    let decl = Note::declaration();
    assert_eq!(decl.entity, "Note");
    assert_eq!(decl.table, "note");
    let names: Vec<_> = decl.fields.iter().map(|f| f.column).collect();
    assert_eq!(names, ["id", "body", "starred"]);
    assert!(decl.fields[0].primary_key);
    assert_eq!(decl.fields[0].generation, Generation::Auto);
    assert_eq!(decl.fields[1].value, Value::Varchar(None));
    assert!(!decl.fields[1].nullable);
}

#[test]
fn attributes_override_names_and_skip_fields() {
    let decl = Trade::declaration();
    assert_eq!(decl.table, "trades");
    let names: Vec<_> = decl.fields.iter().map(|f| f.column).collect();
    assert_eq!(names, ["symbol", "id", "qty", "price", "executed"]);
    assert!(decl.fields[2].nullable);
    assert_eq!(decl.fields[4].value, Value::Timestamp(None));
}

#[test]
fn descriptor_normalizes_the_key_first() {
    let registry = Registry::new();
    let table = registry.table_of::<Trade>().unwrap();
    let names: Vec<_> = table.columns.iter().map(|c| c.name).collect();
    assert_eq!(names, ["id", "symbol", "qty", "price", "executed"]);
    assert_eq!(table.primary_key.name, "id");
    assert_eq!(table.primary_key.affinity, Affinity::Integer);
    assert_eq!(table.primary_key.generation, Generation::None);
    assert_eq!(table.columns[3].affinity, Affinity::Real);
    assert_eq!(table.columns[4].affinity, Affinity::Text);
}

#[test]
fn create_table_sql() {
    let table = TableDef::derive(Note::declaration()).unwrap();
    let statement = GenericSqlWriter.sql_create_table(&table, true);
    assert_eq!(
        statement.sql,
        "CREATE TABLE IF NOT EXISTS \"note\" (\
         \"id\" INTEGER PRIMARY KEY AUTOINCREMENT, \
         \"body\" TEXT NOT NULL, \
         \"starred\" INTEGER NOT NULL);"
    );
}

#[test]
fn row_follows_the_normalized_order() {
    let trade = Trade {
        symbol: "SILT".into(),
        id: 9,
        quantity: Some(100),
        price: 4.5,
        executed: None,
        cached_total: 450.0,
    };
    assert_eq!(trade.key(), Value::Int64(Some(9)));
    let row = trade.row();
    assert_eq!(row[0], Value::Int64(Some(9)));
    assert_eq!(row[1], Value::Varchar(Some("SILT".into())));
    assert_eq!(row[2], Value::Int32(Some(100)));
    assert_eq!(row[3], Value::Float64(Some(4.5)));
    assert_eq!(row[4], Value::Timestamp(None));
}

#[test]
fn from_row_rebuilds_the_entity() {
    let trade = Trade {
        symbol: "SILT".into(),
        id: 9,
        quantity: None,
        price: 4.5,
        executed: Some(time::macros::datetime!(2026-08-29 13:37:05)),
        cached_total: 0.0,
    };
    let rebuilt = Trade::from_row(&trade.row()).unwrap();
    assert_eq!(rebuilt, trade);
    // Ignored fields come back as their default.
    assert_eq!(rebuilt.cached_total, 0.0);
}

#[test]
fn leading_underscores_are_stripped() {
    #[derive(Entity)]
    struct _Draft {
        #[silt(primary_key)]
        _id: i64,
        _body: String,
    }
    let decl = _Draft::declaration();
    assert_eq!(decl.table, "draft");
    assert_eq!(decl.fields[0].column, "id");
    assert_eq!(decl.fields[1].column, "body");
}
