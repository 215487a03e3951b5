use crate::Affinity;

pub type Result<T> = std::result::Result<T, Error>;

/// Classification of an engine-level failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlErrorKind {
    /// Unique, not-null, check or foreign-key violation.
    Constraint,
    /// Any other engine failure: I/O, locked database, misuse.
    Other,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("type `{0}` is not a registered entity")]
    NotEntity(String),
    #[error("entity `{0}` does not declare a primary key field")]
    NoPrimaryKeyFound(&'static str),
    #[error("entity `{entity}` declares {count} primary key fields, exactly one is required")]
    MultiplePrimaryKeys { entity: &'static str, count: usize },
    #[error("field `{field}` of entity `{entity}` has {affinity} affinity, which cannot back a primary key")]
    NoSuitablePrimaryKeyType {
        entity: &'static str,
        field: &'static str,
        affinity: Affinity,
    },
    #[error("automatic key generation on entity `{entity}` requires an integer key, field `{field}` has {affinity} affinity")]
    UnauthorizedGenerationStrategy {
        entity: &'static str,
        field: &'static str,
        affinity: Affinity,
    },
    #[error("field `{field}` of entity `{entity}` has no supported column mapping")]
    UnsupportedFieldType {
        entity: &'static str,
        field: &'static str,
    },
    #[error("entity `{entity}` maps two fields to column `{column}`")]
    DuplicateColumn {
        entity: &'static str,
        column: &'static str,
    },
    #[error("malformed query: {0}")]
    MalformedQuery(String),
    #[error("no row in `{table}` for key {key}")]
    NotFound { table: String, key: String },
    #[error("cannot convert {context}: {message}")]
    Conversion { context: String, message: String },
    #[error("sql execution failed: {message}, statement was `{sql}`")]
    Sql {
        kind: SqlErrorKind,
        message: String,
        sql: String,
    },
}

impl Error {
    /// Constraint violations on insert are expected and drive the DAO's `-1` sentinel.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Error::Sql {
                kind: SqlErrorKind::Constraint,
                ..
            }
        )
    }
}
