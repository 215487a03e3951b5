use silt_core::{
    EntityDecl, Error, FieldDecl, Generation, GenericSqlWriter, SqlWriter, TableDef, Value,
};

static TRACK: EntityDecl = EntityDecl {
    entity: "Track",
    table: "track",
    fields: &[
        FieldDecl {
            field: "id",
            column: "id",
            value: Value::Int64(None),
            nullable: false,
            primary_key: true,
            generation: Generation::Auto,
        },
        FieldDecl {
            field: "title",
            column: "title",
            value: Value::Varchar(None),
            nullable: false,
            primary_key: false,
            generation: Generation::None,
        },
        FieldDecl {
            field: "seconds",
            column: "seconds",
            value: Value::Int32(None),
            nullable: true,
            primary_key: false,
            generation: Generation::None,
        },
    ],
};

fn track() -> TableDef {
    TableDef::derive(&TRACK).unwrap()
}

fn row() -> silt_core::Row {
    vec![
        Value::Int64(Some(7)),
        Value::Varchar(Some("Hey".into())),
        Value::Int32(Some(184)),
    ]
    .into_boxed_slice()
}

const WRITER: GenericSqlWriter = GenericSqlWriter;

#[test]
fn create_table() {
    let statement = WRITER.sql_create_table(&track(), true);
    assert_eq!(
        statement.sql,
        "CREATE TABLE IF NOT EXISTS \"track\" (\
         \"id\" INTEGER PRIMARY KEY AUTOINCREMENT, \
         \"title\" TEXT NOT NULL, \
         \"seconds\" INTEGER);"
    );
    assert!(statement.values.is_empty());
}

#[test]
fn drop_table() {
    let statement = WRITER.sql_drop_table(&track(), true);
    assert_eq!(statement.sql, "DROP TABLE IF EXISTS \"track\";");
}

#[test]
fn insert_skips_generated_key() {
    let statement = WRITER.sql_insert(&track(), row());
    assert_eq!(
        statement.sql,
        "INSERT INTO \"track\" (\"title\", \"seconds\") VALUES (?, ?);"
    );
    assert_eq!(
        statement.values,
        [Value::Varchar(Some("Hey".into())), Value::Int32(Some(184))]
    );
}

#[test]
fn insert_keeps_supplied_key() {
    static DECL: EntityDecl = EntityDecl {
        entity: "Country",
        table: "country",
        fields: &[
            FieldDecl {
                field: "code",
                column: "code",
                value: Value::Varchar(None),
                nullable: false,
                primary_key: true,
                generation: Generation::None,
            },
            FieldDecl {
                field: "name",
                column: "name",
                value: Value::Varchar(None),
                nullable: false,
                primary_key: false,
                generation: Generation::None,
            },
        ],
    };
    let table = TableDef::derive(&DECL).unwrap();
    let row = vec![
        Value::Varchar(Some("it".into())),
        Value::Varchar(Some("Italy".into())),
    ]
    .into_boxed_slice();
    let statement = WRITER.sql_insert(&table, row);
    assert_eq!(
        statement.sql,
        "INSERT INTO \"country\" (\"code\", \"name\") VALUES (?, ?);"
    );
    assert_eq!(statement.values.len(), 2);
}

#[test]
fn update_targets_the_key() {
    let statement = WRITER
        .sql_update(&track(), row(), Value::Int64(Some(7)), None, &[])
        .unwrap();
    assert_eq!(
        statement.sql,
        "UPDATE \"track\" SET \"title\" = ?, \"seconds\" = ? WHERE \"id\" = ?;"
    );
    assert_eq!(
        statement.values,
        [
            Value::Varchar(Some("Hey".into())),
            Value::Int32(Some(184)),
            Value::Int64(Some(7)),
        ]
    );
}

#[test]
fn update_with_clause() {
    let statement = WRITER
        .sql_update(
            &track(),
            row(),
            Value::Int64(Some(7)),
            Some("seconds > ?"),
            &[Value::Int32(Some(60))],
        )
        .unwrap();
    assert_eq!(
        statement.sql,
        "UPDATE \"track\" SET \"title\" = ?, \"seconds\" = ? WHERE seconds > ?;"
    );
    assert_eq!(statement.values.len(), 3);
}

#[test]
fn update_without_data_columns_is_malformed() {
    static DECL: EntityDecl = EntityDecl {
        entity: "Marker",
        table: "marker",
        fields: &[FieldDecl {
            field: "id",
            column: "id",
            value: Value::Int64(None),
            nullable: false,
            primary_key: true,
            generation: Generation::None,
        }],
    };
    let table = TableDef::derive(&DECL).unwrap();
    let row = vec![Value::Int64(Some(1))].into_boxed_slice();
    assert!(matches!(
        WRITER.sql_update(&table, row, Value::Int64(Some(1)), None, &[]),
        Err(Error::MalformedQuery(..))
    ));
}

#[test]
fn delete_by_key() {
    let statement = WRITER.sql_delete(&track(), Value::Int64(Some(7)));
    assert_eq!(statement.sql, "DELETE FROM \"track\" WHERE \"id\" = ?;");
    assert_eq!(statement.values, [Value::Int64(Some(7))]);
}

#[test]
fn delete_all_and_delete_where() {
    let statement = WRITER.sql_delete_all(&track(), None, &[]).unwrap();
    assert_eq!(statement.sql, "DELETE FROM \"track\";");
    let statement = WRITER
        .sql_delete_all(&track(), Some("seconds < ?"), &[Value::Int32(Some(30))])
        .unwrap();
    assert_eq!(statement.sql, "DELETE FROM \"track\" WHERE seconds < ?;");
    assert_eq!(statement.values, [Value::Int32(Some(30))]);
}

#[test]
fn select_by_key_lists_every_column() {
    let statement = WRITER.sql_select_by_key(&track(), Value::Int64(Some(7)));
    assert_eq!(
        statement.sql,
        "SELECT \"id\", \"title\", \"seconds\" FROM \"track\" WHERE \"id\" = ?;"
    );
}

#[test]
fn select_with_and_without_clause() {
    let statement = WRITER.sql_select(&track(), None, &[]).unwrap();
    assert_eq!(
        statement.sql,
        "SELECT \"id\", \"title\", \"seconds\" FROM \"track\";"
    );
    let statement = WRITER
        .sql_select(&track(), Some("title = ?"), &[Value::Varchar(Some("Hey".into()))])
        .unwrap();
    assert_eq!(
        statement.sql,
        "SELECT \"id\", \"title\", \"seconds\" FROM \"track\" WHERE title = ?;"
    );
}

#[test]
fn count_and_exists() {
    let statement = WRITER.sql_count(&track());
    assert_eq!(statement.sql, "SELECT COUNT(*) FROM \"track\";");
    let statement = WRITER.sql_exists(&track(), Value::Int64(Some(7)));
    assert_eq!(
        statement.sql,
        "SELECT COUNT(*) FROM \"track\" WHERE \"id\" = ? LIMIT 1;"
    );
}

#[test]
fn arguments_without_clause_are_malformed() {
    assert!(matches!(
        WRITER.sql_select(&track(), None, &[Value::Int32(Some(1))]),
        Err(Error::MalformedQuery(..))
    ));
    assert!(matches!(
        WRITER.sql_select(&track(), Some("   "), &[Value::Int32(Some(1))]),
        Err(Error::MalformedQuery(..))
    ));
}

#[test]
fn identifiers_are_quoted_and_escaped() {
    let mut out = String::new();
    WRITER.write_identifier(&mut out, "odd\"name");
    assert_eq!(out, "\"odd\"\"name\"");
}
