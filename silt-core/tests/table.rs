use silt_core::{
    Affinity, EntityDecl, Error, FieldDecl, Generation, Registry, TableDef, Value,
};
use std::sync::Arc;

const fn field(name: &'static str, value: Value) -> FieldDecl {
    FieldDecl {
        field: name,
        column: name,
        value,
        nullable: false,
        primary_key: false,
        generation: Generation::None,
    }
}

const fn key(name: &'static str, value: Value, generation: Generation) -> FieldDecl {
    FieldDecl {
        field: name,
        column: name,
        value,
        nullable: false,
        primary_key: true,
        generation,
    }
}

static NOTE: EntityDecl = EntityDecl {
    entity: "Note",
    table: "note",
    fields: &[
        key("id", Value::Int64(None), Generation::Auto),
        field("body", Value::Varchar(None)),
        field("starred", Value::Boolean(None)),
    ],
};

#[test]
fn derives_note_descriptor() {
    let table = TableDef::derive(&NOTE).unwrap();
    assert_eq!(table.entity, "Note");
    assert_eq!(table.name, "note");
    assert_eq!(table.primary_key.name, "id");
    assert_eq!(table.primary_key.affinity, Affinity::Integer);
    assert_eq!(table.primary_key.generation, Generation::Auto);
    let names: Vec<_> = table.columns.iter().map(|c| c.name).collect();
    assert_eq!(names, ["id", "body", "starred"]);
    assert_eq!(table.columns[1].affinity, Affinity::Text);
    assert_eq!(table.columns[2].affinity, Affinity::Integer);
}

#[test]
fn key_column_is_normalized_first() {
    static DECL: EntityDecl = EntityDecl {
        entity: "Score",
        table: "score",
        fields: &[
            field("points", Value::Int32(None)),
            key("player", Value::Varchar(None), Generation::None),
        ],
    };
    let table = TableDef::derive(&DECL).unwrap();
    let names: Vec<_> = table.columns.iter().map(|c| c.name).collect();
    assert_eq!(names, ["player", "points"]);
    assert_eq!(table.primary_key.affinity, Affinity::Text);
}

#[test]
fn boolean_key_is_allowed() {
    static DECL: EntityDecl = EntityDecl {
        entity: "Flag",
        table: "flag",
        fields: &[
            key("raised", Value::Boolean(None), Generation::None),
            field("label", Value::Varchar(None)),
        ],
    };
    let table = TableDef::derive(&DECL).unwrap();
    assert_eq!(table.primary_key.affinity, Affinity::Integer);
}

#[test]
fn blob_key_is_rejected() {
    static DECL: EntityDecl = EntityDecl {
        entity: "Digest",
        table: "digest",
        fields: &[key("hash", Value::Blob(None), Generation::None)],
    };
    assert!(matches!(
        TableDef::derive(&DECL),
        Err(Error::NoSuitablePrimaryKeyType {
            entity: "Digest",
            field: "hash",
            affinity: Affinity::Blob,
        })
    ));
}

#[test]
fn auto_generation_requires_integer_key() {
    static DECL: EntityDecl = EntityDecl {
        entity: "Tag",
        table: "tag",
        fields: &[
            key("label", Value::Varchar(None), Generation::Auto),
            field("color", Value::Varchar(None)),
        ],
    };
    assert!(matches!(
        TableDef::derive(&DECL),
        Err(Error::UnauthorizedGenerationStrategy {
            entity: "Tag",
            field: "label",
            affinity: Affinity::Text,
        })
    ));
}

#[test]
fn missing_key_is_rejected() {
    static DECL: EntityDecl = EntityDecl {
        entity: "Orphan",
        table: "orphan",
        fields: &[field("body", Value::Varchar(None))],
    };
    assert!(matches!(
        TableDef::derive(&DECL),
        Err(Error::NoPrimaryKeyFound("Orphan"))
    ));
}

#[test]
fn two_keys_are_rejected() {
    static DECL: EntityDecl = EntityDecl {
        entity: "Pair",
        table: "pair",
        fields: &[
            key("left", Value::Int64(None), Generation::None),
            key("right", Value::Int64(None), Generation::None),
        ],
    };
    assert!(matches!(
        TableDef::derive(&DECL),
        Err(Error::MultiplePrimaryKeys {
            entity: "Pair",
            count: 2,
        })
    ));
}

#[test]
fn unsupported_field_type_is_rejected() {
    static DECL: EntityDecl = EntityDecl {
        entity: "Counter",
        table: "counter",
        fields: &[
            key("id", Value::Int64(None), Generation::None),
            field("hits", Value::UInt64(None)),
        ],
    };
    assert!(matches!(
        TableDef::derive(&DECL),
        Err(Error::UnsupportedFieldType {
            entity: "Counter",
            field: "hits",
        })
    ));
}

#[test]
fn duplicate_column_is_rejected() {
    static DECL: EntityDecl = EntityDecl {
        entity: "Echo",
        table: "echo",
        fields: &[
            key("id", Value::Int64(None), Generation::None),
            FieldDecl {
                field: "first",
                column: "voice",
                value: Value::Varchar(None),
                nullable: false,
                primary_key: false,
                generation: Generation::None,
            },
            FieldDecl {
                field: "second",
                column: "voice",
                value: Value::Varchar(None),
                nullable: false,
                primary_key: false,
                generation: Generation::None,
            },
        ],
    };
    assert!(matches!(
        TableDef::derive(&DECL),
        Err(Error::DuplicateColumn {
            entity: "Echo",
            column: "voice",
        })
    ));
}

struct Note {
    id: i64,
    body: String,
    starred: bool,
}

impl silt_core::Entity for Note {
    fn declaration() -> &'static EntityDecl {
        &NOTE
    }
    fn key(&self) -> Value {
        Value::Int64(Some(self.id))
    }
    fn row(&self) -> silt_core::Row {
        vec![
            Value::Int64(Some(self.id)),
            Value::Varchar(Some(self.body.clone())),
            Value::Boolean(Some(self.starred)),
        ]
        .into_boxed_slice()
    }
    fn from_row(row: &silt_core::Row) -> silt_core::Result<Self> {
        Ok(Self {
            id: silt_core::decode(row, 0, "id")?,
            body: silt_core::decode(row, 1, "body")?,
            starred: silt_core::decode(row, 2, "starred")?,
        })
    }
}

#[test]
fn registry_caches_the_descriptor() {
    let registry = Registry::new();
    let first = registry.table_of::<Note>().unwrap();
    let second = registry.table_of::<Note>().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(registry.tables().len(), 1);
}

#[test]
fn registry_resolves_names() {
    let registry = Registry::new();
    registry.table_of::<Note>().unwrap();
    assert_eq!(registry.table_named("note").unwrap().entity, "Note");
    assert_eq!(registry.table_named("Note").unwrap().name, "note");
    assert!(matches!(
        registry.table_named("String"),
        Err(Error::NotEntity(name)) if name == "String"
    ));
}
